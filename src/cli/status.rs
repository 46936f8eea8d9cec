//! `morning status` command implementation

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use super::print_quick_replies;
use crate::interview::{ConversationTurn, Stage};
use crate::storage::Storage;

#[derive(Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct StatusJson<'a> {
    stage: Stage,
    progress: u16,
    transcript: &'a [ConversationTurn],
    quick_replies: &'a [String],
    tasks: usize,
    selected: usize,
}

pub async fn run(storage: &Storage, args: StatusArgs) -> Result<()> {
    let interview = storage.open_interview();
    let state = interview.state();

    if args.json {
        let status = StatusJson {
            stage: state.stage,
            progress: interview.progress(),
            transcript: &state.transcript,
            quick_replies: &state.quick_replies,
            tasks: state.tasks.len(),
            selected: state.selected.len(),
        };
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!(
        "Stage: {} ({}%)  Tasks: {}  Selected: {}\n",
        state.stage,
        interview.progress(),
        state.tasks.len(),
        state.selected.len()
    );

    for turn in &state.transcript {
        let time = turn
            .timestamp
            .with_timezone(&chrono::Local)
            .format("%H:%M");
        println!("[{}] {:>9}: {}", time, turn.speaker.label(), turn.text);
    }
    print_quick_replies(&interview);

    Ok(())
}
