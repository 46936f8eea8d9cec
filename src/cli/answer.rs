//! `morning answer`, `morning pick` and `morning more`

use anyhow::{bail, Result};
use clap::Args;

use super::{print_prompt, print_step, save_session};
use crate::interview::Stage;
use crate::storage::Storage;

#[derive(Args)]
pub struct AnswerArgs {
    /// Free-text answer (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    text: Vec<String>,
}

pub async fn run(storage: &Storage, args: AnswerArgs) -> Result<()> {
    let mut interview = storage.open_interview();
    let step = interview.advance(&args.text.join(" "));
    save_session(storage, &interview)?;
    print_step(&interview, &step);
    Ok(())
}

pub async fn run_pick(storage: &Storage, index: usize) -> Result<()> {
    let mut interview = storage.open_interview();
    let step = interview.pick(index)?;
    save_session(storage, &interview)?;
    print_step(&interview, &step);
    Ok(())
}

pub async fn run_more(storage: &Storage) -> Result<()> {
    let mut interview = storage.open_interview();
    if interview.stage() != Stage::Synthesis {
        bail!(
            "More context is offered after the last question (currently at '{}')",
            interview.stage()
        );
    }
    interview.add_more_context();
    save_session(storage, &interview)?;
    print_prompt(&interview);
    Ok(())
}
