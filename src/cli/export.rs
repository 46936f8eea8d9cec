//! `morning script` and `morning export`

use anyhow::Result;
use chrono::Local;
use clap::Args;
use std::path::PathBuf;

use crate::config::Config;
use crate::interview::{command_script, export_plan};
use crate::storage::Storage;

#[derive(Args)]
pub struct ExportArgs {
    /// Directory to write the plan to (defaults to export.directory in config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the plan instead of writing a file
    #[arg(long)]
    stdout: bool,
}

pub async fn run_script(storage: &Storage) -> Result<()> {
    let interview = storage.open_interview();
    if interview.state().selected.is_empty() {
        println!("No tasks selected. Use `morning toggle` or `morning select-all` first.");
        return Ok(());
    }
    println!("{}", command_script(interview.state()));
    Ok(())
}

pub async fn run(storage: &Storage, config: &Config, args: ExportArgs) -> Result<()> {
    let interview = storage.open_interview();
    let plan = export_plan(interview.state(), Local::now());

    if args.stdout {
        println!("{}", plan.markdown);
        return Ok(());
    }

    let dir = args.output.unwrap_or_else(|| config.export.directory());
    let path = plan.write_to(&dir)?;
    println!(
        "Exported {} tasks to {}",
        interview.state().selected.len(),
        path.display()
    );
    Ok(())
}
