//! Command script and Markdown plan export

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::model::{prefix_chars, SessionState};

const CONTEXT_MAX_CHARS: usize = 50;
const HIGHLIGHT_TURNS: usize = 5;

/// Render the copy/paste command script for the selected tasks
pub fn command_script(state: &SessionState) -> String {
    let mut lines: Vec<String> = Vec::new();

    for (index, task) in state.selected_tasks().iter().enumerate() {
        lines.push(format!("# Task {}: {}", index + 1, task.title));
        lines.push(String::new());
        for command in &task.commands {
            lines.push(format!("## Command: {}", command_basename(command)));
            lines.push(format!(".Open {}", command));
            lines.push(format!(
                "Context from: {}...",
                prefix_chars(&task.source, CONTEXT_MAX_CHARS)
            ));
            lines.push("Write outputs to registry/".to_string());
            lines.push("Minimal response, files only.".to_string());
            lines.push(String::new());
        }
        lines.push("---".to_string());
        lines.push(String::new());
    }

    lines.join("\n")
}

pub fn command_basename(command: &str) -> &str {
    command.rsplit('/').next().unwrap_or(command)
}

/// A rendered plan, ready to be written out
#[derive(Debug, Clone, PartialEq)]
pub struct PlanDocument {
    pub file_name: String,
    pub markdown: String,
}

impl PlanDocument {
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create export directory {:?}", dir))?;
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.markdown)
            .with_context(|| format!("Failed to write plan to {:?}", path))?;
        info!("Exported plan to {}", path.display());
        Ok(path)
    }
}

/// Build the Markdown plan for the current selection
pub fn export_plan(state: &SessionState, now: DateTime<Local>) -> PlanDocument {
    let selected = state.selected_tasks();
    let mut md = String::from("# Morning Agentic Plan\n");
    md.push_str(&format!("## {}\n\n", now.format("%A %-d %B %Y")));
    md.push_str("## Interview Summary\n\n");

    md.push_str("### Key Points Discussed:\n");
    let user_turns: Vec<&str> = state.user_turns().collect();
    let skip = user_turns.len().saturating_sub(HIGHLIGHT_TURNS);
    for text in &user_turns[skip..] {
        md.push_str(&format!("- {}\n", text));
    }

    md.push_str(&format!("\n## Discovered Tasks ({})\n\n", selected.len()));
    for (index, task) in selected.iter().enumerate() {
        md.push_str(&format!("### {}. {}\n", index + 1, task.title));
        md.push_str(&format!("- **Confidence**: {}%\n", task.confidence_percent()));
        md.push_str(&format!("- **Time Saved**: {} minutes\n", task.minutes_saved));
        md.push_str(&format!("- **Commands**: {}\n\n", task.commands.join(", ")));
    }

    md.push_str(&format!(
        "## Total Time Saved: {} minutes\n\n",
        state.selected_minutes()
    ));
    md.push_str(&format!(
        "## Commands to Execute\n\n```\n{}\n```",
        command_script(state)
    ));

    PlanDocument {
        file_name: format!("morning-plan-{}.md", now.format("%Y-%m-%d")),
        markdown: md,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::Interview;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_command_basename() {
        assert_eq!(
            command_basename(".claude/commands/weekly_status.md"),
            "weekly_status.md"
        );
        assert_eq!(command_basename("plain.md"), "plain.md");
    }

    #[test]
    fn test_script_empty_without_selection() {
        let mut interview = Interview::start();
        interview.advance("weekly status");
        assert_eq!(command_script(interview.state()), "");
    }

    #[test]
    fn test_script_block_layout() {
        let mut interview = Interview::start();
        interview.advance("Can you help with the weekly status update?");
        interview.select_all();

        let script = command_script(interview.state());
        let lines: Vec<&str> = script.lines().collect();
        assert_eq!(lines[0], "# Task 1: Weekly Status Generator");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "## Command: weekly_status.md");
        assert_eq!(lines[3], ".Open .claude/commands/weekly_status.md");
        assert_eq!(
            lines[4],
            "Context from: Can you help with the weekly status update?..."
        );
        assert_eq!(lines[5], "Write outputs to registry/");
        assert_eq!(lines[6], "Minimal response, files only.");
        assert_eq!(lines[8], "## Command: email_weekly_update.md");
        assert!(script.ends_with("---\n"));
    }

    #[test]
    fn test_script_context_truncated_to_50_chars() {
        let mut interview = Interview::start();
        interview.advance(&format!("status {}", "y".repeat(80)));
        interview.select_all();

        let script = command_script(interview.state());
        let context = script
            .lines()
            .find(|l| l.starts_with("Context from: "))
            .unwrap();
        let body = context
            .trim_start_matches("Context from: ")
            .trim_end_matches("...");
        assert_eq!(body.chars().count(), 50);
    }

    #[test]
    fn test_export_select_all_includes_every_task() {
        let mut interview = Interview::start();
        interview.advance("weekly proposal");
        interview.advance("meeting with the client about the readme");
        interview.select_all();

        let plan = export_plan(interview.state(), fixed_now());
        let total: u32 = interview.state().tasks.iter().map(|t| t.minutes_saved).sum();

        assert_eq!(plan.file_name, "morning-plan-2026-10-19.md");
        assert!(plan.markdown.starts_with("# Morning Agentic Plan\n## Monday 19 October 2026\n"));
        assert!(plan.markdown.contains("## Discovered Tasks (5)"));
        for task in &interview.state().tasks {
            assert!(plan.markdown.contains(&format!(". {}\n", task.title)));
        }
        assert!(plan
            .markdown
            .contains(&format!("## Total Time Saved: {} minutes", total)));
        assert!(plan.markdown.contains(&command_script(interview.state())));
    }

    #[test]
    fn test_export_highlights_last_five_user_turns() {
        let mut interview = Interview::start();
        for i in 1..=7 {
            interview.advance(&format!("answer {}", i));
        }
        let plan = export_plan(interview.state(), fixed_now());

        assert!(!plan.markdown.contains("- answer 2\n"));
        for i in 3..=7 {
            assert!(plan.markdown.contains(&format!("- answer {}\n", i)));
        }
    }

    #[test]
    fn test_export_only_selected_tasks() {
        let mut interview = Interview::start();
        interview.advance("proposal and meeting");
        let id = interview.state().tasks[1].id.clone();
        interview.toggle_selection(&id).unwrap();

        let plan = export_plan(interview.state(), fixed_now());
        assert!(plan.markdown.contains("## Discovered Tasks (1)"));
        assert!(plan.markdown.contains("### 1. Meeting Notes Processor"));
        assert!(plan.markdown.contains("- **Confidence**: 70%"));
        assert!(plan.markdown.contains("## Total Time Saved: 45 minutes"));
        assert!(!plan.markdown.contains("Proposal Pipeline"));
    }

    #[test]
    fn test_write_to_creates_file() -> Result<()> {
        let temp = tempdir()?;
        let plan = PlanDocument {
            file_name: "morning-plan-2026-10-19.md".to_string(),
            markdown: "# Morning Agentic Plan\n".to_string(),
        };
        let path = plan.write_to(&temp.path().join("plans"))?;
        assert_eq!(fs::read_to_string(path)?, plan.markdown);
        Ok(())
    }
}
