//! Rendering for the chat view

use ratatui::prelude::*;
use ratatui::widgets::*;
use unicode_width::UnicodeWidthChar;

use super::{ChatView, Focus};
use crate::interview::{command_script, ConfidenceBand, Speaker, Stage, SynthesisAction};
use crate::tui::components::{render_answer_field, HelpOverlay};
use crate::tui::styles::Theme;

const THINKING_FRAMES: &[&str] = &["·  ", "·· ", "···"];

impl ChatView {
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        // Layout: header, body, quick replies, answer field, status bar
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(area);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1]);

        self.render_header(frame, rows[0], theme);
        self.render_conversation(frame, body[0], theme);
        self.render_tasks(frame, body[1], theme);
        self.render_quick_replies(frame, rows[2], theme);
        self.render_input(frame, rows[3], theme);
        self.render_status_bar(frame, rows[4], theme);

        if self.show_help {
            HelpOverlay::render(frame, area, theme);
        }

        if let Some(dialog) = &self.confirm_dialog {
            dialog.render(frame, area, theme);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(30)])
            .split(area);

        let title = Line::from(vec![
            Span::styled(" Morning Interview ", Style::default().fg(theme.title).bold()),
            Span::styled(
                format!("· {}", self.interview.stage()),
                Style::default().fg(theme.dimmed),
            ),
        ]);
        frame.render_widget(Paragraph::new(title), cols[0]);

        let progress = self.interview.progress();
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(theme.accent).bg(theme.selection))
            .percent(progress)
            .label(format!("{}%", progress));
        frame.render_widget(gauge, cols[1]);
    }

    fn render_conversation(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let border = if self.focus == Focus::Input {
            theme.focused_border
        } else {
            theme.border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" Conversation ")
            .title_style(Style::default().fg(theme.title));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let width = inner.width.saturating_sub(2) as usize;
        let lines = self.conversation_lines(width, theme);

        // Keep the newest message in view
        let overflow = lines.len().saturating_sub(inner.height as usize);
        let para = Paragraph::new(lines).scroll((overflow as u16, 0));
        frame.render_widget(para, inner);
    }

    fn conversation_lines(&self, width: usize, theme: &Theme) -> Vec<Line<'static>> {
        let state = self.interview.state();
        let mut lines = Vec::new();

        for turn in &state.transcript {
            let color = match turn.speaker {
                Speaker::Assistant => theme.assistant,
                Speaker::User => theme.user,
            };
            lines.push(Line::from(Span::styled(
                format!(" {}", turn.speaker.label()),
                Style::default().fg(color).bold(),
            )));
            for row in wrap_text(&turn.text, width) {
                lines.push(Line::from(Span::styled(
                    format!(" {}", row),
                    Style::default().fg(theme.text),
                )));
            }
            lines.push(Line::from(""));
        }

        if let Some(pending) = &self.pending {
            lines.push(Line::from(Span::styled(
                format!(" {}", Speaker::User.label()),
                Style::default().fg(theme.user).bold(),
            )));
            for row in wrap_text(&pending.text, width) {
                lines.push(Line::from(Span::styled(
                    format!(" {}", row),
                    Style::default().fg(theme.text),
                )));
            }
            lines.push(Line::from(""));

            let frame_index =
                (pending.since.elapsed().as_millis() / 250) as usize % THINKING_FRAMES.len();
            lines.push(Line::from(Span::styled(
                format!(" thinking {}", THINKING_FRAMES[frame_index]),
                Style::default().fg(theme.thinking).italic(),
            )));
        } else if self.interview.stage() == Stage::Synthesis && !state.tasks.is_empty() {
            let hints: Vec<Span> = SynthesisAction::ALL
                .iter()
                .flat_map(|action| {
                    [
                        Span::styled(
                            format!(" {} ", action_key(*action)),
                            Style::default().fg(theme.accent).bold(),
                        ),
                        Span::styled(
                            format!("{} ", action.label()),
                            Style::default().fg(theme.hint),
                        ),
                    ]
                })
                .collect();
            lines.push(Line::from(hints));
        }

        lines
    }

    fn render_tasks(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let state = self.interview.state();
        let border = if self.focus == Focus::Tasks {
            theme.focused_border
        } else {
            theme.border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(format!(" Discovered Tasks ({}) ", state.tasks.len()))
            .title_style(Style::default().fg(theme.title));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if state.tasks.is_empty() {
            let empty_text = vec![
                Line::from(""),
                Line::from("No tasks yet").style(Style::default().fg(theme.dimmed)),
                Line::from(""),
                Line::from("Tasks appear as you answer").style(Style::default().fg(theme.hint)),
            ];
            let para = Paragraph::new(empty_text).alignment(Alignment::Center);
            frame.render_widget(para, inner);
            return;
        }

        let has_script = !state.selected.is_empty();
        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints(if has_script {
                [Constraint::Min(0), Constraint::Length(2), Constraint::Percentage(40)]
            } else {
                [Constraint::Min(0), Constraint::Length(2), Constraint::Length(0)]
            })
            .split(inner);

        let mut items: Vec<ListItem> = Vec::new();
        let mut row = 0;
        for band in ConfidenceBand::ALL {
            let tasks = state.tasks_in(band);
            if tasks.is_empty() {
                continue;
            }
            items.push(ListItem::new(Line::from(Span::styled(
                format!("{} ({})", band.label(), tasks.len()),
                Style::default().fg(theme.band(band)).bold(),
            ))));
            for task in tasks {
                let is_cursor = self.focus == Focus::Tasks && row == self.task_cursor;
                let mark = if state.is_selected(&task.id) { "[x]" } else { "[ ]" };
                let line = Line::from(vec![
                    Span::styled(format!(" {} ", mark), Style::default().fg(theme.accent)),
                    Span::styled(
                        task.title.clone(),
                        if is_cursor {
                            Style::default().fg(theme.text).bold()
                        } else {
                            Style::default().fg(theme.text)
                        },
                    ),
                    Span::styled(
                        format!(" {}% ~{}m", task.confidence_percent(), task.minutes_saved),
                        Style::default().fg(theme.dimmed),
                    ),
                ]);
                items.push(if is_cursor {
                    ListItem::new(line).style(Style::default().bg(theme.selection))
                } else {
                    ListItem::new(line)
                });
                row += 1;
            }
        }
        frame.render_widget(List::new(items), sections[0]);

        let totals = vec![
            Line::from(vec![
                Span::styled(" Total ", Style::default().fg(theme.dimmed)),
                Span::styled(
                    format!("{} min", state.total_minutes()),
                    Style::default().fg(theme.accent).bold(),
                ),
                Span::styled(
                    format!("  {} commands", state.command_count()),
                    Style::default().fg(theme.dimmed),
                ),
            ]),
            Line::from(vec![
                Span::styled(" Selected ", Style::default().fg(theme.dimmed)),
                Span::styled(
                    format!("{} ({} min)", state.selected.len(), state.selected_minutes()),
                    Style::default().fg(theme.text),
                ),
            ]),
        ];
        frame.render_widget(Paragraph::new(totals), sections[1]);

        if has_script {
            let script = Paragraph::new(command_script(state))
                .style(Style::default().fg(theme.hint))
                .block(
                    Block::default()
                        .borders(Borders::TOP)
                        .border_style(Style::default().fg(theme.border))
                        .title(" Commands ")
                        .title_style(Style::default().fg(theme.title)),
                );
            frame.render_widget(script, sections[2]);
        }
    }

    fn render_quick_replies(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let replies = self.interview.quick_replies();
        if replies.is_empty() || self.pending.is_some() {
            return;
        }

        let mut spans = vec![Span::raw(" ")];
        for (index, reply) in replies.iter().enumerate() {
            spans.push(Span::styled(
                format!("{}", index + 1),
                Style::default().fg(theme.accent).bold(),
            ));
            spans.push(Span::styled(
                format!(" {}  ", reply),
                Style::default().fg(theme.hint),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_input(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let focused = self.focus == Focus::Input && !self.has_dialog();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if focused {
                theme.focused_border
            } else {
                theme.border
            }));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let placeholder = if self.pending.is_some() {
            "thinking..."
        } else if self.interview.quick_replies().is_empty() {
            "Type your answer"
        } else {
            "Type your answer or press a number"
        };
        render_answer_field(frame, inner, &self.input, focused, placeholder, theme);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if let Some(status) = &self.status {
            let color = if status.is_error { theme.error } else { theme.accent };
            let para = Paragraph::new(format!(" {}", status.text))
                .style(Style::default().fg(color).bg(theme.selection));
            frame.render_widget(para, area);
            return;
        }

        let key_style = Style::default().fg(theme.accent).bold();
        let desc_style = Style::default().fg(theme.dimmed);
        let sep_style = Style::default().fg(theme.border);

        let spans = vec![
            Span::styled(" Enter", key_style),
            Span::styled(" Answer ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" Tab", key_style),
            Span::styled(" Tasks ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" ^E", key_style),
            Span::styled(" Export ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" ?", key_style),
            Span::styled(" Help ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" ^C", key_style),
            Span::styled(" Quit", desc_style),
        ];

        let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.selection));
        frame.render_widget(status, area);
    }
}

fn action_key(action: SynthesisAction) -> &'static str {
    match action {
        SynthesisAction::SelectAll => "^A",
        SynthesisAction::AddMoreContext => "^O",
        SynthesisAction::Export => "^E",
    }
}

/// Word-wrap `text` to `width` display columns. Words wider than a line are
/// split.
pub(super) fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut rows = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width: usize = word.chars().map(|c| c.width().unwrap_or(0)).sum();
            let needed = if current.is_empty() {
                word_width
            } else {
                word_width + 1
            };

            if current_width + needed > width && !current.is_empty() {
                rows.push(std::mem::take(&mut current));
                current_width = 0;
            }

            if word_width > width {
                for c in word.chars() {
                    let w = c.width().unwrap_or(0);
                    if current_width + w > width {
                        rows.push(std::mem::take(&mut current));
                        current_width = 0;
                    }
                    current.push(c);
                    current_width += w;
                }
                continue;
            }

            if !current.is_empty() {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
        }
        rows.push(current);
    }
    rows
}
