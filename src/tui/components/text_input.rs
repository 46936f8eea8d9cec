//! Answer line rendering

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use tui_input::Input;
use unicode_width::UnicodeWidthChar;

use crate::tui::styles::Theme;

const PROMPT: &str = "> ";

/// Renders the single-line answer field.
///
/// Long values scroll horizontally so the cursor stays visible. When the
/// field is empty the placeholder is shown instead.
pub fn render_answer_field(
    frame: &mut Frame,
    area: Rect,
    input: &Input,
    is_focused: bool,
    placeholder: &str,
    theme: &Theme,
) {
    let prompt_style = if is_focused {
        Style::default().fg(theme.accent).bold()
    } else {
        Style::default().fg(theme.dimmed)
    };
    let value_style = Style::default().fg(theme.text);

    let value = input.value();
    let mut spans = vec![Span::styled(PROMPT, prompt_style)];

    if value.is_empty() {
        if is_focused {
            spans.push(Span::styled(
                " ",
                Style::default().fg(theme.background).bg(theme.accent),
            ));
        }
        spans.push(Span::styled(placeholder, Style::default().fg(theme.dimmed)));
    } else {
        let width = (area.width as usize).saturating_sub(PROMPT.len() + 1);
        // visual_scroll counts display columns; cursor() counts chars
        let scroll = column_to_char(value, input.visual_scroll(width));
        let visible: Vec<char> = value.chars().skip(scroll).collect();
        let cursor = input.cursor().saturating_sub(scroll);

        let before: String = visible.iter().take(cursor).collect();
        spans.push(Span::styled(before, value_style));

        if is_focused {
            let at: String = visible
                .get(cursor)
                .map(|c| c.to_string())
                .unwrap_or_else(|| " ".to_string());
            spans.push(Span::styled(
                at,
                Style::default().fg(theme.background).bg(theme.accent),
            ));
            let after: String = visible.iter().skip(cursor + 1).collect();
            spans.push(Span::styled(after, value_style));
        } else {
            let rest: String = visible.iter().skip(cursor).collect();
            spans.push(Span::styled(rest, value_style));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Index of the first char that starts at or after display column `column`
fn column_to_char(value: &str, column: usize) -> usize {
    let mut width = 0;
    for (index, c) in value.chars().enumerate() {
        if width >= column {
            return index;
        }
        width += c.width().unwrap_or(0);
    }
    value.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_column_to_char_ascii() {
        assert_eq!(column_to_char("hello", 0), 0);
        assert_eq!(column_to_char("hello", 3), 3);
        assert_eq!(column_to_char("hello", 9), 5);
    }

    #[test]
    fn test_column_to_char_wide() {
        // each CJK char is two columns wide
        assert_eq!(column_to_char("日本語abc", 2), 1);
        assert_eq!(column_to_char("日本語abc", 4), 2);
        assert_eq!(column_to_char("日本語abc", 7), 4);
    }

    #[test]
    fn test_cursor_highlight_on_wide_text() {
        let input = Input::new("日本語".to_string());
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(40, 1)).unwrap();
        terminal
            .draw(|f| render_answer_field(f, f.area(), &input, true, "", &theme))
            .unwrap();

        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(2, 0)].symbol(), "日");
        assert_eq!(buffer[(4, 0)].symbol(), "本");
        assert_eq!(buffer[(6, 0)].symbol(), "語");
        // cursor sits past the last char: prompt (2) + 3 wide chars (6)
        assert_eq!(buffer[(8, 0)].bg, theme.accent);
    }
}
