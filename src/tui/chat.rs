//! Chat view - conversation, quick replies and task panel

mod render;

use chrono::Local;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use super::app::Action;
use super::dialogs::{ConfirmAction, ConfirmDialog, DialogResult};
use crate::interview::{
    export_plan, ConfidenceBand, Interview, Stage, Step, Synthesis, Task, TaskId,
};
use crate::storage::Storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Tasks,
}

/// An answer waiting out the thinking delay
#[derive(Debug, Clone)]
pub struct PendingAnswer {
    pub text: String,
    pub since: Instant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

pub struct ChatView {
    interview: Interview,
    storage: Storage,
    export_dir: PathBuf,

    // UI state
    input: Input,
    focus: Focus,
    task_cursor: usize,
    pending: Option<PendingAnswer>,
    status: Option<StatusMessage>,

    // Dialogs
    show_help: bool,
    confirm_dialog: Option<ConfirmDialog>,
}

impl ChatView {
    pub fn new(storage: Storage, export_dir: PathBuf) -> Self {
        let interview = storage.open_interview();
        Self {
            interview,
            storage,
            export_dir,
            input: Input::default(),
            focus: Focus::Input,
            task_cursor: 0,
            pending: None,
            status: None,
            show_help: false,
            confirm_dialog: None,
        }
    }

    pub fn interview(&self) -> &Interview {
        &self.interview
    }

    pub fn has_dialog(&self) -> bool {
        self.show_help || self.confirm_dialog.is_some()
    }

    pub fn is_thinking(&self) -> bool {
        self.pending.is_some()
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Tasks in panel order: grouped by confidence band, detection order within a band
    pub fn display_tasks(&self) -> Vec<&Task> {
        let state = self.interview.state();
        ConfidenceBand::ALL
            .iter()
            .flat_map(|band| state.tasks_in(*band))
            .collect()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if self.show_help {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return None;
        }

        if let Some(dialog) = &mut self.confirm_dialog {
            match dialog.handle_key(key) {
                DialogResult::Continue => {}
                DialogResult::Cancel => self.confirm_dialog = None,
                DialogResult::Submit(action) => {
                    self.confirm_dialog = None;
                    match action {
                        ConfirmAction::Reset => self.reset(),
                        ConfirmAction::ExportEmpty => self.write_plan(),
                    }
                }
            }
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('a') => self.select_all(),
                KeyCode::Char('o') => self.add_more_context(),
                KeyCode::Char('e') => self.export(),
                KeyCode::Char('r') => {
                    self.confirm_dialog = Some(ConfirmDialog::new(ConfirmAction::Reset));
                }
                _ => {}
            }
            return None;
        }

        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::Tasks => self.handle_tasks_key(key),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> Option<Action> {
        let empty = self.input.value().is_empty();

        match key.code {
            KeyCode::Enter => {
                let text = self.input.value().to_string();
                if self.submit(&text) {
                    self.input.reset();
                }
            }
            KeyCode::Tab => self.focus = Focus::Tasks,
            KeyCode::Esc => {
                if empty {
                    return Some(Action::Quit);
                }
                self.input.reset();
            }
            KeyCode::Char('?') if empty => self.show_help = true,
            KeyCode::Char(c @ '1'..='9') if empty => {
                let index = c as usize - '0' as usize;
                self.pick(index);
            }
            _ => {
                self.input.handle_event(&Event::Key(key));
            }
        }
        None
    }

    fn handle_tasks_key(&mut self, key: KeyEvent) -> Option<Action> {
        let count = self.interview.state().tasks.len();

        match key.code {
            KeyCode::Tab | KeyCode::Esc => self.focus = Focus::Input,
            KeyCode::Char('j') | KeyCode::Down => {
                if count > 0 {
                    self.task_cursor = (self.task_cursor + 1).min(count - 1);
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.task_cursor = self.task_cursor.saturating_sub(1);
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_current(),
            KeyCode::Char('a') => self.select_all(),
            KeyCode::Char('e') => self.export(),
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('q') => return Some(Action::Quit),
            _ => {}
        }
        None
    }

    /// Queue an answer behind the thinking indicator. Returns false when
    /// nothing was queued.
    pub fn submit(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() || self.pending.is_some() {
            return false;
        }
        self.pending = Some(PendingAnswer {
            text: text.to_string(),
            since: Instant::now(),
        });
        true
    }

    pub fn pick(&mut self, index: usize) {
        let reply = index
            .checked_sub(1)
            .and_then(|i| self.interview.quick_replies().get(i))
            .cloned();
        if let Some(reply) = reply {
            self.submit(&reply);
        }
    }

    /// Process the queued answer once `delay` has passed. Returns true if
    /// something changed.
    pub fn tick(&mut self, delay: Duration) -> bool {
        match &self.pending {
            Some(pending) if pending.since.elapsed() >= delay => {}
            _ => return false,
        }
        if let Some(pending) = self.pending.take() {
            let step = self.interview.advance(&pending.text);
            self.after_step(&step);
            self.persist();
        }
        true
    }

    fn after_step(&mut self, step: &Step) {
        let detected: Vec<&str> = step.detected().iter().map(|t| t.title.as_str()).collect();
        if !detected.is_empty() {
            self.set_status(format!("New task detected: {}", detected.join(", ")), false);
        } else if let Step::Synthesis {
            outcome: Synthesis::Summary { .. },
            ..
        } = step
        {
            self.set_status(
                "Ctrl+A select all, Ctrl+O add more context, Ctrl+E export".to_string(),
                false,
            );
        }
    }

    pub fn toggle_current(&mut self) {
        let id: Option<TaskId> = self
            .display_tasks()
            .get(self.task_cursor)
            .map(|t| t.id.clone());
        let Some(id) = id else {
            return;
        };
        if let Err(e) = self.interview.toggle_selection(&id) {
            self.set_status(e.to_string(), true);
            return;
        }
        self.persist();
    }

    pub fn select_all(&mut self) {
        if self.interview.state().tasks.is_empty() {
            self.set_status("No tasks to select yet".to_string(), true);
            return;
        }
        self.interview.select_all();
        self.persist();
    }

    pub fn add_more_context(&mut self) {
        if self.interview.stage() != Stage::Synthesis {
            self.set_status("Finish the questions first".to_string(), true);
            return;
        }
        self.interview.add_more_context();
        self.focus = Focus::Input;
        self.persist();
    }

    pub fn export(&mut self) {
        if self.interview.state().selected.is_empty() {
            self.confirm_dialog = Some(ConfirmDialog::new(ConfirmAction::ExportEmpty));
            return;
        }
        self.write_plan();
    }

    fn write_plan(&mut self) {
        let plan = export_plan(self.interview.state(), Local::now());
        match plan.write_to(&self.export_dir) {
            Ok(path) => self.set_status(format!("Plan exported to {}", path.display()), false),
            Err(e) => {
                tracing::error!("Failed to export plan: {:#}", e);
                self.set_status(format!("Export failed: {}", e), true);
            }
        }
    }

    pub fn reset(&mut self) {
        self.interview = Interview::start();
        self.pending = None;
        self.task_cursor = 0;
        self.focus = Focus::Input;
        self.input.reset();
        self.persist();
        tracing::info!("Session reset from TUI");
        self.set_status("Started over".to_string(), false);
    }

    fn persist(&mut self) {
        if let Err(e) = self.storage.save(self.interview.state()) {
            tracing::error!("Failed to save session: {}", e);
            self.set_status(format!("Could not save session: {}", e), true);
        }
    }

    fn set_status(&mut self, text: String, is_error: bool) {
        self.status = Some(StatusMessage { text, is_error });
    }
}
