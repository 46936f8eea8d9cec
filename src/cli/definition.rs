//! Command-line definitions

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use super::answer::AnswerArgs;
use super::export::ExportArgs;
use super::status::StatusArgs;
use super::tasks::TasksArgs;

#[derive(Parser)]
#[command(name = "morning")]
#[command(about = "Morning check-in that finds tasks to delegate to coding agents")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Answer the current question
    #[command(alias = "a")]
    Answer(AnswerArgs),

    /// Answer with a numbered quick reply (1-9)
    Pick {
        /// Quick reply number as shown by `status`
        index: usize,
    },

    /// Show the conversation so far
    Status(StatusArgs),

    /// List detected tasks grouped by confidence
    #[command(alias = "ls")]
    Tasks(TasksArgs),

    /// Select or deselect a task
    Toggle {
        /// Task id, id prefix, list number or category
        task: String,
    },

    /// Select every detected task
    SelectAll,

    /// Ask for more context after the summary
    More,

    /// Print the command script for the selected tasks
    Script,

    /// Write the Markdown plan for the selected tasks
    Export(ExportArgs),

    /// Discard today's session and start over
    Reset,

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}
