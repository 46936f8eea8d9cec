//! Conversation driver: walks the question graph and owns the session state

use thiserror::Error;
use tracing::debug;

use super::detector;
use super::model::{SessionState, Speaker, Task, TaskId};
use super::questions::{
    self, Stage, CLARIFY_PROMPT, CLARIFY_REPLIES, MORE_CONTEXT_PROMPT, MORE_CONTEXT_REPLIES,
    QUESTIONS,
};

#[derive(Debug, Error, PartialEq)]
pub enum InterviewError {
    #[error("Task not found: {0}")]
    UnknownTask(String),

    #[error("No quick reply {index} (only {available} on offer)")]
    NoSuchQuickReply { index: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, InterviewError>;

/// Actions offered once synthesis has found tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisAction {
    SelectAll,
    AddMoreContext,
    Export,
}

impl SynthesisAction {
    pub const ALL: [SynthesisAction; 3] = [Self::SelectAll, Self::AddMoreContext, Self::Export];

    pub fn label(&self) -> &'static str {
        match self {
            Self::SelectAll => "Select All Tasks",
            Self::AddMoreContext => "Add More Context",
            Self::Export => "Export Plan",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Synthesis {
    /// Nothing detected yet; the user is asked for more detail
    NeedsMoreDetail,
    Summary { task_count: usize, total_minutes: u32 },
}

/// Result of one user submission
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Blank input, nothing recorded
    Ignored,
    Next {
        acknowledgment: &'static str,
        stage: Stage,
        detected: Vec<Task>,
    },
    Synthesis {
        outcome: Synthesis,
        detected: Vec<Task>,
    },
}

impl Step {
    pub fn detected(&self) -> &[Task] {
        match self {
            Step::Ignored => &[],
            Step::Next { detected, .. } | Step::Synthesis { detected, .. } => detected,
        }
    }
}

pub struct Interview {
    state: SessionState,
}

impl Interview {
    /// Fresh session with the greeting already asked
    pub fn start() -> Self {
        let mut state = SessionState::default();
        let greeting = &QUESTIONS[0];
        state.stage = greeting.id;
        state.push_turn(Speaker::Assistant, greeting.prompt);
        state.offer(greeting.quick_replies);
        Self { state }
    }

    /// Resume from a restored snapshot
    pub fn resume(state: SessionState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn into_state(self) -> SessionState {
        self.state
    }

    pub fn stage(&self) -> Stage {
        self.state.stage
    }

    pub fn quick_replies(&self) -> &[String] {
        &self.state.quick_replies
    }

    /// Percentage of the question chain answered
    pub fn progress(&self) -> u16 {
        if self.state.stage.is_terminal() {
            return 100;
        }
        let answered = questions::position(self.state.stage);
        ((answered * 100) / QUESTIONS.len()).max(10) as u16
    }

    pub fn advance(&mut self, user_text: &str) -> Step {
        let text = user_text.trim();
        if text.is_empty() {
            return Step::Ignored;
        }

        self.state.push_turn(Speaker::User, text);
        let detected = detector::detect(&mut self.state, text);

        let next = questions::question(self.state.stage)
            .and_then(|q| q.next)
            .and_then(questions::question);

        match next {
            Some(node) => {
                let acknowledgment = questions::acknowledgment(text);
                self.state.push_turn(Speaker::Assistant, acknowledgment);
                self.state.push_turn(Speaker::Assistant, node.prompt);
                self.state.offer(node.quick_replies);
                debug!("Advanced {} -> {}", self.state.stage, node.id);
                self.state.stage = node.id;
                Step::Next {
                    acknowledgment,
                    stage: node.id,
                    detected,
                }
            }
            None => {
                if self.state.stage != Stage::Synthesis {
                    debug!("Advanced {} -> synthesis", self.state.stage);
                    self.state.stage = Stage::Synthesis;
                }
                Step::Synthesis {
                    outcome: self.synthesize(),
                    detected,
                }
            }
        }
    }

    /// Submit the 1-based `index`-th quick reply currently on offer
    pub fn pick(&mut self, index: usize) -> Result<Step> {
        let available = self.state.quick_replies.len();
        let reply = index
            .checked_sub(1)
            .and_then(|i| self.state.quick_replies.get(i))
            .cloned()
            .ok_or(InterviewError::NoSuchQuickReply { index, available })?;
        Ok(self.advance(&reply))
    }

    pub fn synthesize(&mut self) -> Synthesis {
        if self.state.tasks.is_empty() {
            self.state.push_turn(Speaker::Assistant, CLARIFY_PROMPT);
            self.state.offer(CLARIFY_REPLIES);
            return Synthesis::NeedsMoreDetail;
        }

        let task_count = self.state.tasks.len();
        let total_minutes = self.state.total_minutes();
        self.state.push_turn(
            Speaker::Assistant,
            format!(
                "Excellent! I've identified {} tasks we can automate, potentially saving you {} \
                 minutes today. Select the tasks you'd like to delegate, and I'll prepare the \
                 agent commands for you.",
                task_count, total_minutes
            ),
        );
        self.state.quick_replies.clear();
        Synthesis::Summary {
            task_count,
            total_minutes,
        }
    }

    /// Ask for more detail without leaving the current stage
    pub fn add_more_context(&mut self) {
        self.state.push_turn(Speaker::Assistant, MORE_CONTEXT_PROMPT);
        self.state.offer(MORE_CONTEXT_REPLIES);
    }

    /// Flip selection of a task. Returns whether it is now selected.
    pub fn toggle_selection(&mut self, id: &TaskId) -> Result<bool> {
        if self.state.task(id).is_none() {
            return Err(InterviewError::UnknownTask(id.to_string()));
        }
        if self.state.selected.remove(id) {
            Ok(false)
        } else {
            self.state.selected.insert(id.clone());
            Ok(true)
        }
    }

    pub fn select_all(&mut self) {
        self.state.selected = self.state.tasks.iter().map(|t| t.id.clone()).collect();
    }

    /// Resolve a task by exact id, then category, then 1-based index, then id prefix
    pub fn resolve_task(&self, identifier: &str) -> Result<&Task> {
        let tasks = &self.state.tasks;
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(InterviewError::UnknownTask(identifier.to_string()));
        }

        if let Some(task) = tasks.iter().find(|t| t.id.as_str() == identifier) {
            return Ok(task);
        }
        if let Some(task) = tasks.iter().find(|t| t.category == identifier) {
            return Ok(task);
        }
        if let Ok(n) = identifier.parse::<usize>() {
            if let Some(task) = n.checked_sub(1).and_then(|i| tasks.get(i)) {
                return Ok(task);
            }
        }
        if let Some(task) = tasks.iter().find(|t| t.id.as_str().starts_with(identifier)) {
            return Ok(task);
        }

        Err(InterviewError::UnknownTask(identifier.to_string()))
    }
}
