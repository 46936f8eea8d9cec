//! `morning tasks`, `morning toggle` and `morning select-all`

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use super::{save_session, truncate};
use crate::interview::export::command_basename;
use crate::interview::ConfidenceBand;
use crate::storage::Storage;

const TABLE_COL_TITLE: usize = 26;
const TABLE_COL_CONFIDENCE: usize = 5;
const TABLE_COL_MINUTES: usize = 6;

#[derive(Args)]
pub struct TasksArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct TaskJson<'a> {
    id: &'a str,
    title: &'a str,
    category: &'a str,
    confidence: f64,
    minutes_saved: u32,
    commands: &'a [String],
    selected: bool,
}

pub async fn run(storage: &Storage, args: TasksArgs) -> Result<()> {
    let interview = storage.open_interview();
    let state = interview.state();

    if args.json {
        let tasks: Vec<TaskJson> = state
            .tasks
            .iter()
            .map(|t| TaskJson {
                id: t.id.as_str(),
                title: &t.title,
                category: &t.category,
                confidence: t.confidence,
                minutes_saved: t.minutes_saved,
                commands: &t.commands,
                selected: state.is_selected(&t.id),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    if state.tasks.is_empty() {
        println!("No tasks discovered yet. Answer the questions to identify agentic opportunities.");
        return Ok(());
    }

    for band in ConfidenceBand::ALL {
        let tasks = state.tasks_in(band);
        if tasks.is_empty() {
            continue;
        }
        println!("{} ({})", band.label(), tasks.len());
        for task in tasks {
            let number = state
                .tasks
                .iter()
                .position(|t| t.id == task.id)
                .map(|i| i + 1)
                .unwrap_or(0);
            let mark = if state.is_selected(&task.id) { "x" } else { " " };
            let commands: Vec<&str> = task.commands.iter().map(|c| command_basename(c)).collect();
            println!(
                "  [{}] {:>2}. {:<width_title$} {:>width_conf$} {:>width_min$}  {}",
                mark,
                number,
                truncate(&task.title, TABLE_COL_TITLE),
                format!("{}%", task.confidence_percent()),
                format!("{}m", task.minutes_saved),
                commands.join(", "),
                width_title = TABLE_COL_TITLE,
                width_conf = TABLE_COL_CONFIDENCE,
                width_min = TABLE_COL_MINUTES,
            );
        }
        println!();
    }

    println!(
        "Tasks: {}  Commands: {}  Time: {}m  Selected: {}",
        state.tasks.len(),
        state.command_count(),
        state.total_minutes(),
        state.selected.len()
    );

    Ok(())
}

pub async fn run_toggle(storage: &Storage, identifier: &str) -> Result<()> {
    let mut interview = storage.open_interview();
    let id = interview.resolve_task(identifier)?.id.clone();
    let selected = interview.toggle_selection(&id)?;
    save_session(storage, &interview)?;

    let title = interview
        .state()
        .task(&id)
        .map(|t| t.title.as_str())
        .unwrap_or_default();
    if selected {
        println!("Selected: {}", title);
    } else {
        println!("Deselected: {}", title);
    }
    Ok(())
}

pub async fn run_select_all(storage: &Storage) -> Result<()> {
    let mut interview = storage.open_interview();
    interview.select_all();
    save_session(storage, &interview)?;
    println!(
        "Selected {} tasks ({} minutes).",
        interview.state().selected.len(),
        interview.state().selected_minutes()
    );
    Ok(())
}
