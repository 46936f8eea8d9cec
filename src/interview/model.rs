//! Interview data model

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::questions::Stage;

/// Who said a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Assistant,
    User,
}

impl Speaker {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Assistant => "assistant",
            Self::User => "you",
        }
    }
}

/// One message in the transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub speaker: Speaker,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// Calendar day of the turn in local time
    pub fn local_date(&self) -> NaiveDate {
        self.timestamp.with_timezone(&Local).date_naive()
    }
}

/// Task ID in format task_<unix millis>_<category>
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub String);

impl TaskId {
    pub fn new(category: &str, at: DateTime<Utc>) -> Self {
        Self(format!("task_{}_{}", at.timestamp_millis(), category))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A detected automatable task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,

    /// Display name of the pattern that detected it
    pub title: String,

    pub description: String,

    /// Command references, path-like strings pointing at automation scripts
    pub commands: Vec<String>,

    /// Heuristic score in [0.6, 0.95]
    pub confidence: f64,

    pub minutes_saved: u32,

    /// Pattern key, unique across a session's tasks
    pub category: String,

    /// Triggering text, truncated to 100 characters
    pub source: String,
}

impl Task {
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }

    pub fn band(&self) -> ConfidenceBand {
        ConfidenceBand::of(self.confidence)
    }
}

/// Display grouping for tasks. Has no effect on selection or export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    pub const ALL: [ConfidenceBand; 3] = [Self::High, Self::Medium, Self::Low];

    pub fn of(confidence: f64) -> Self {
        if confidence >= 0.8 {
            Self::High
        } else if confidence >= 0.6 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High Confidence",
            Self::Medium => "Medium Confidence",
            Self::Low => "Review Needed",
        }
    }
}

/// Whole-session state, persisted as one snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub stage: Stage,

    #[serde(default)]
    pub transcript: Vec<ConversationTurn>,

    #[serde(default)]
    pub tasks: Vec<Task>,

    #[serde(default)]
    pub selected: BTreeSet<TaskId>,

    /// Quick replies currently on offer, picked positionally
    #[serde(default)]
    pub quick_replies: Vec<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            stage: Stage::Greeting,
            transcript: Vec::new(),
            tasks: Vec::new(),
            selected: BTreeSet::new(),
            quick_replies: Vec::new(),
        }
    }
}

impl SessionState {
    /// Local calendar day the session started on
    pub fn started_on(&self) -> Option<NaiveDate> {
        self.transcript.first().map(ConversationTurn::local_date)
    }

    pub fn push_turn(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.transcript.push(ConversationTurn::new(speaker, text));
    }

    pub fn offer(&mut self, replies: &[&str]) {
        self.quick_replies = replies.iter().map(|r| r.to_string()).collect();
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.tasks.iter().any(|t| t.category == category)
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn is_selected(&self, id: &TaskId) -> bool {
        self.selected.contains(id)
    }

    /// Selected tasks in detection order
    pub fn selected_tasks(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| self.selected.contains(&t.id))
            .collect()
    }

    pub fn tasks_in(&self, band: ConfidenceBand) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.band() == band).collect()
    }

    pub fn total_minutes(&self) -> u32 {
        self.tasks.iter().map(|t| t.minutes_saved).sum()
    }

    pub fn selected_minutes(&self) -> u32 {
        self.selected_tasks().iter().map(|t| t.minutes_saved).sum()
    }

    pub fn command_count(&self) -> usize {
        self.tasks.iter().map(|t| t.commands.len()).sum()
    }

    /// Text of user turns, oldest first
    pub fn user_turns(&self) -> impl Iterator<Item = &str> {
        self.transcript
            .iter()
            .filter(|t| t.speaker == Speaker::User)
            .map(|t| t.text.as_str())
    }

    /// First broken invariant, if any: a selected id with no task, or two
    /// tasks sharing a category
    pub fn inconsistency(&self) -> Option<String> {
        if let Some(id) = self.selected.iter().find(|id| self.task(id).is_none()) {
            return Some(format!("selected id {} has no task", id));
        }
        let mut seen = BTreeSet::new();
        for task in &self.tasks {
            if !seen.insert(task.category.as_str()) {
                return Some(format!("category {} detected twice", task.category));
            }
        }
        None
    }

    pub fn last_assistant_text(&self) -> Option<&str> {
        self.transcript
            .iter()
            .rev()
            .find(|t| t.speaker == Speaker::Assistant)
            .map(|t| t.text.as_str())
    }
}

/// First `max` characters of `s`, never splitting a character
pub fn prefix_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
