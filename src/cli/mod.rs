//! CLI command implementations

pub mod answer;
pub mod definition;
pub mod export;
pub mod status;
pub mod tasks;

pub use definition::{Cli, Commands};

use anyhow::{Context, Result};
use tracing::info;

use crate::interview::{Interview, Step, Synthesis, SynthesisAction};
use crate::storage::Storage;

pub fn save_session(storage: &Storage, interview: &Interview) -> Result<()> {
    storage
        .save(interview.state())
        .with_context(|| format!("Failed to save session to {:?}", storage.path()))
}

pub async fn run_reset(storage: &Storage) -> Result<()> {
    let interview = Interview::start();
    save_session(storage, &interview)?;
    info!("Session reset");
    println!("Started a new session.\n");
    print_prompt(&interview);
    Ok(())
}

/// Print the latest assistant message and the quick replies on offer
pub fn print_prompt(interview: &Interview) {
    if let Some(text) = interview.state().last_assistant_text() {
        println!("{}", text);
    }
    print_quick_replies(interview);
}

pub fn print_quick_replies(interview: &Interview) {
    let replies = interview.quick_replies();
    if replies.is_empty() {
        return;
    }
    println!();
    for (index, reply) in replies.iter().enumerate() {
        println!("  {}. {}", index + 1, reply);
    }
}

pub fn print_step(interview: &Interview, step: &Step) {
    for task in step.detected() {
        println!(
            "+ Detected: {} ({}%, ~{}m)",
            task.title,
            task.confidence_percent(),
            task.minutes_saved
        );
    }
    if !step.detected().is_empty() {
        println!();
    }

    match step {
        Step::Ignored => println!("Nothing to answer with."),
        Step::Next { acknowledgment, .. } => {
            println!("{}\n", acknowledgment);
            print_prompt(interview);
        }
        Step::Synthesis { outcome, .. } => {
            print_prompt(interview);
            if let Synthesis::Summary { .. } = outcome {
                println!();
                let hints: Vec<String> = SynthesisAction::ALL
                    .iter()
                    .map(|a| format!("{} (`morning {}`)", a.label(), action_command(*a)))
                    .collect();
                println!("Next: {}", hints.join(", "));
            }
        }
    }
}

fn action_command(action: SynthesisAction) -> &'static str {
    match action {
        SynthesisAction::SelectAll => "select-all",
        SynthesisAction::AddMoreContext => "more",
        SynthesisAction::Export => "export",
    }
}

pub fn truncate(s: &str, max: usize) -> String {
    use unicode_width::UnicodeWidthStr;

    if s.width() <= max {
        return s.to_string();
    }
    if max <= 3 {
        return s.chars().take(max).collect();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w > max - 3 {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_shorter_than_max() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_equal_to_max() {
        assert_eq!(truncate("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_longer_than_max() {
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_with_small_max() {
        assert_eq!(truncate("hello", 3), "hel");
        assert_eq!(truncate("hello", 0), "");
    }

    #[test]
    fn test_truncate_multibyte_does_not_panic() {
        assert_eq!(truncate("ééééééééé", 6), "ééé...");
    }

    #[test]
    fn test_action_commands_are_real_subcommands() {
        use clap::CommandFactory;

        let cli = Cli::command();
        for action in SynthesisAction::ALL {
            let name = action_command(action);
            assert!(
                cli.get_subcommands().any(|c| c.get_name() == name),
                "missing subcommand {name}"
            );
        }
    }
}
