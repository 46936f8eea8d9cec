//! Interview core
//!
//! This module holds everything that does not touch the terminal:
//! - Static question graph and canned replies
//! - Regex task detection with per-category dedup
//! - The conversation driver (advance, synthesis, selection)
//! - Command script and Markdown plan export

pub mod detector;
pub mod driver;
pub mod export;
pub mod model;
pub mod questions;

pub use detector::{detect, TaskPattern, PATTERNS};
pub use driver::{Interview, InterviewError, Step, Synthesis, SynthesisAction};
pub use export::{command_script, export_plan, PlanDocument};
pub use model::{ConfidenceBand, ConversationTurn, SessionState, Speaker, Task, TaskId};
pub use questions::{QuestionNode, Stage};
