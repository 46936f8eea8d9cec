//! Morning Interview - terminal check-in that finds tasks to delegate to agents

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use morning_interview::cli::{self, Cli, Commands};
use morning_interview::config::{get_app_dir, Config};
use morning_interview::storage::Storage;
use morning_interview::tui;
use std::fs::OpenOptions;
use std::sync::Mutex;

fn init_logging() -> Result<()> {
    // Logs go to a file so they never draw over the TUI
    let path = get_app_dir()?.join("debug.log");
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter("morning_interview=debug")
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::var("MORNING_INTERVIEW_DEBUG").is_ok() {
        init_logging()?;
    }

    let cli = Cli::parse();

    if let Some(Commands::Completion { shell }) = cli.command {
        generate(shell, &mut Cli::command(), "morning", &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::load()?;
    let storage = Storage::new()?;

    let Some(command) = cli.command else {
        return tui::run(storage, config).await;
    };

    match command {
        Commands::Answer(args) => cli::answer::run(&storage, args).await,
        Commands::Pick { index } => cli::answer::run_pick(&storage, index).await,
        Commands::More => cli::answer::run_more(&storage).await,
        Commands::Status(args) => cli::status::run(&storage, args).await,
        Commands::Tasks(args) => cli::tasks::run(&storage, args).await,
        Commands::Toggle { task } => cli::tasks::run_toggle(&storage, &task).await,
        Commands::SelectAll => cli::tasks::run_select_all(&storage).await,
        Commands::Script => cli::export::run_script(&storage).await,
        Commands::Export(args) => cli::export::run(&storage, &config, args).await,
        Commands::Reset => cli::run_reset(&storage).await,
        Commands::Completion { .. } => Ok(()),
    }
}
