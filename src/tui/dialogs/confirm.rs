//! Yes/No confirmation dialog

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::DialogResult;
use crate::tui::styles::Theme;

/// What a confirmation is guarding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    /// Throw away today's conversation and start again
    Reset,
    /// Export a plan even though no task is selected
    ExportEmpty,
}

impl ConfirmAction {
    fn title(&self) -> &'static str {
        match self {
            Self::Reset => "Start Over",
            Self::ExportEmpty => "Export Plan",
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Self::Reset => "Discard this morning's conversation and detected tasks?",
            Self::ExportEmpty => "No tasks are selected. Export a plan with only the summary?",
        }
    }
}

pub struct ConfirmDialog {
    action: ConfirmAction,
    yes_selected: bool,
}

impl ConfirmDialog {
    pub fn new(action: ConfirmAction) -> Self {
        Self {
            action,
            yes_selected: false,
        }
    }

    pub fn action(&self) -> ConfirmAction {
        self.action
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogResult<ConfirmAction> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => DialogResult::Cancel,
            KeyCode::Enter => {
                if self.yes_selected {
                    DialogResult::Submit(self.action)
                } else {
                    DialogResult::Cancel
                }
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => DialogResult::Submit(self.action),
            KeyCode::Left | KeyCode::Char('h') => {
                self.yes_selected = true;
                DialogResult::Continue
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.yes_selected = false;
                DialogResult::Continue
            }
            KeyCode::Tab => {
                self.yes_selected = !self.yes_selected;
                DialogResult::Continue
            }
            _ => DialogResult::Continue,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let dialog_area = super::centered_rect(area, 50, 8);

        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .style(Style::default().bg(theme.background))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.error))
            .title(format!(" {} ", self.action.title()))
            .title_style(Style::default().fg(theme.error).bold());

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Min(1), Constraint::Length(2)])
            .split(inner);

        let message = Paragraph::new(self.action.message())
            .style(Style::default().fg(theme.text))
            .wrap(Wrap { trim: true });
        frame.render_widget(message, chunks[0]);

        let yes_style = if self.yes_selected {
            Style::default().fg(theme.error).bold()
        } else {
            Style::default().fg(theme.dimmed)
        };
        let no_style = if !self.yes_selected {
            Style::default().fg(theme.confidence_high).bold()
        } else {
            Style::default().fg(theme.dimmed)
        };

        let buttons = Line::from(vec![
            Span::raw("  "),
            Span::styled("[Yes]", yes_style),
            Span::raw("    "),
            Span::styled("[No]", no_style),
        ]);

        frame.render_widget(
            Paragraph::new(buttons).alignment(Alignment::Center),
            chunks[1],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_default_selection_is_no() {
        let mut dialog = ConfirmDialog::new(ConfirmAction::Reset);
        assert!(!dialog.yes_selected);
        assert!(matches!(
            dialog.handle_key(key(KeyCode::Enter)),
            DialogResult::Cancel
        ));
    }

    #[test]
    fn test_y_submits_its_action() {
        let mut dialog = ConfirmDialog::new(ConfirmAction::ExportEmpty);
        assert!(matches!(
            dialog.handle_key(key(KeyCode::Char('Y'))),
            DialogResult::Submit(ConfirmAction::ExportEmpty)
        ));
    }

    #[test]
    fn test_esc_and_n_cancel() {
        let mut dialog = ConfirmDialog::new(ConfirmAction::Reset);
        assert!(matches!(
            dialog.handle_key(key(KeyCode::Esc)),
            DialogResult::Cancel
        ));
        assert!(matches!(
            dialog.handle_key(key(KeyCode::Char('n'))),
            DialogResult::Cancel
        ));
    }

    #[test]
    fn test_tab_then_enter_submits() {
        let mut dialog = ConfirmDialog::new(ConfirmAction::Reset);
        dialog.handle_key(key(KeyCode::Tab));
        assert!(dialog.yes_selected);
        assert!(matches!(
            dialog.handle_key(key(KeyCode::Enter)),
            DialogResult::Submit(ConfirmAction::Reset)
        ));
    }

    #[test]
    fn test_left_right_move_selection() {
        let mut dialog = ConfirmDialog::new(ConfirmAction::Reset);
        dialog.handle_key(key(KeyCode::Left));
        assert!(dialog.yes_selected);
        dialog.handle_key(key(KeyCode::Char('l')));
        assert!(!dialog.yes_selected);
    }

    #[test]
    fn test_unknown_key_continues() {
        let mut dialog = ConfirmDialog::new(ConfirmAction::Reset);
        assert!(matches!(
            dialog.handle_key(key(KeyCode::Char('x'))),
            DialogResult::Continue
        ));
    }
}
