//! Regex-based task detection

use chrono::Utc;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use super::model::{prefix_chars, SessionState, Task, TaskId};

const SOURCE_MAX_CHARS: usize = 100;
const BASE_CONFIDENCE_PCT: u32 = 60;
const CONFIDENCE_STEP_PCT: u32 = 10;
const MAX_CONFIDENCE_PCT: u32 = 95;

/// One automatable task category
#[derive(Debug)]
pub struct TaskPattern {
    pub key: &'static str,
    pub display_name: &'static str,
    pub pattern: Regex,
    pub commands: &'static [&'static str],
    pub minutes_saved: u32,
}

impl TaskPattern {
    fn new(
        key: &'static str,
        display_name: &'static str,
        pattern: &str,
        commands: &'static [&'static str],
        minutes_saved: u32,
    ) -> Self {
        Self {
            key,
            display_name,
            pattern: Regex::new(&format!("(?i){}", pattern)).unwrap(),
            commands,
            minutes_saved,
        }
    }

    /// Number of non-overlapping matches in `text`
    pub fn match_count(&self, text: &str) -> usize {
        self.pattern.find_iter(text).count()
    }
}

pub static PATTERNS: LazyLock<Vec<TaskPattern>> = LazyLock::new(|| {
    vec![
        TaskPattern::new(
            "weekly_status",
            "Weekly Status Generator",
            r"weekly|status|Friday|update",
            &[
                ".claude/commands/weekly_status.md",
                ".claude/commands/email_weekly_update.md",
            ],
            30,
        ),
        TaskPattern::new(
            "proposal_pipeline",
            "Proposal Pipeline",
            r"proposal|SOW|RFP|draft",
            &[
                ".claude/commands/r0_draft.md",
                ".claude/commands/r3_finalize.md",
            ],
            90,
        ),
        TaskPattern::new(
            "meeting_processor",
            "Meeting Notes Processor",
            r"meeting|notes|actions|transcript",
            &[
                ".claude/commands/action_extractor.md",
                ".claude/commands/summary_generator.md",
            ],
            45,
        ),
        TaskPattern::new(
            "client_updates",
            "Client Update Suite",
            r"client|Long Clawson|account|stakeholder",
            &[
                ".claude/commands/context_distiller_client.md",
                ".claude/commands/daily_heartbeat.md",
            ],
            25,
        ),
        TaskPattern::new(
            "documentation",
            "Documentation Builder",
            r"documentation|readme|technical|guide",
            &[
                ".claude/commands/doc_generator.md",
                ".claude/commands/readme_builder.md",
            ],
            40,
        ),
    ]
});

pub fn pattern(key: &str) -> Option<&'static TaskPattern> {
    PATTERNS.iter().find(|p| p.key == key)
}

/// min(0.95, 0.6 + 0.1 * matches), computed in whole percent
pub fn confidence_for(match_count: usize) -> f64 {
    let steps = u32::try_from(match_count).unwrap_or(u32::MAX);
    let pct = CONFIDENCE_STEP_PCT
        .saturating_mul(steps)
        .saturating_add(BASE_CONFIDENCE_PCT)
        .min(MAX_CONFIDENCE_PCT);
    f64::from(pct) / 100.0
}

/// Scan `text` against every pattern and record a task for each category
/// matched for the first time this session. Returns the new tasks.
pub fn detect(state: &mut SessionState, text: &str) -> Vec<Task> {
    let now = Utc::now();
    let source = prefix_chars(text, SOURCE_MAX_CHARS);
    let mut created = Vec::new();

    for pattern in PATTERNS.iter() {
        let count = pattern.match_count(text);
        if count == 0 {
            continue;
        }
        if state.has_category(pattern.key) {
            debug!("{} matched again, keeping first detection", pattern.key);
            continue;
        }

        let task = Task {
            id: TaskId::new(pattern.key, now),
            title: pattern.display_name.to_string(),
            description: format!("Detected from: \"{}...\"", source),
            commands: pattern.commands.iter().map(|c| c.to_string()).collect(),
            confidence: confidence_for(count),
            minutes_saved: pattern.minutes_saved,
            category: pattern.key.to_string(),
            source: source.to_string(),
        };
        debug!(
            "Detected {} ({} matches, confidence {:.2})",
            task.category, count, task.confidence
        );
        state.tasks.push(task.clone());
        created.push(task);
    }

    created
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekly_status_scenario() {
        let mut state = SessionState::default();
        let created = detect(&mut state, "Can you help with the weekly status update?");

        assert_eq!(created.len(), 1);
        let task = &state.tasks[0];
        assert_eq!(task.category, "weekly_status");
        assert_eq!(task.title, "Weekly Status Generator");
        assert_eq!(task.minutes_saved, 30);
        // weekly + status + update
        assert_eq!(task.confidence, 0.9);
    }

    #[test]
    fn test_no_match_creates_nothing() {
        let mut state = SessionState::default();
        assert!(detect(&mut state, "Catching up").is_empty());
        assert!(state.tasks.is_empty());
    }

    #[test]
    fn test_dedup_by_category() {
        let mut state = SessionState::default();
        detect(&mut state, "meeting");
        let first = state.tasks[0].clone();

        let created = detect(&mut state, "meeting notes and actions from the transcript");
        assert!(created.is_empty());
        assert_eq!(state.tasks.len(), 1);
        assert_eq!(state.tasks[0], first);
    }

    #[test]
    fn test_one_text_can_match_several_categories() {
        let mut state = SessionState::default();
        let created = detect(&mut state, "Draft the client proposal and the README");
        let categories: Vec<&str> = created.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(
            categories,
            vec!["proposal_pipeline", "client_updates", "documentation"]
        );
    }

    #[test]
    fn test_case_insensitive() {
        let mut state = SessionState::default();
        detect(&mut state, "FRIDAY");
        assert_eq!(state.tasks[0].category, "weekly_status");
    }

    #[test]
    fn test_confidence_bounds_and_monotonic() {
        assert_eq!(confidence_for(1), 0.7);
        assert_eq!(confidence_for(2), 0.8);
        assert_eq!(confidence_for(3), 0.9);
        assert_eq!(confidence_for(4), 0.95);
        assert_eq!(confidence_for(usize::MAX), 0.95);

        let mut previous = confidence_for(1);
        for n in 1..50 {
            let c = confidence_for(n);
            assert!((0.6..=0.95).contains(&c));
            assert!(c >= previous);
            previous = c;
        }
    }

    #[test]
    fn test_source_truncated_to_100_chars() {
        let mut state = SessionState::default();
        let text = format!("status {}", "x".repeat(200));
        detect(&mut state, &text);
        let task = &state.tasks[0];
        assert_eq!(task.source.chars().count(), 100);
        assert!(task.description.starts_with("Detected from: \"status "));
        assert!(task.description.ends_with("...\""));
    }

    #[test]
    fn test_pattern_lookup() {
        assert_eq!(pattern("documentation").unwrap().minutes_saved, 40);
        assert!(pattern("unknown").is_none());
    }

    #[test]
    fn test_match_count_is_non_overlapping() {
        let p = pattern("meeting_processor").unwrap();
        assert_eq!(p.match_count("meeting meeting notes"), 3);
        assert_eq!(p.match_count("nothing here"), 0);
    }
}
