//! TUI theme and styling

use ratatui::style::Color;

use crate::interview::ConfidenceBand;

#[derive(Debug, Clone)]
pub struct Theme {
    // Background and borders
    pub background: Color,
    pub border: Color,
    pub focused_border: Color,
    pub selection: Color,

    // Text colors
    pub title: Color,
    pub text: Color,
    pub dimmed: Color,
    pub hint: Color,

    // Conversation
    pub assistant: Color,
    pub user: Color,
    pub thinking: Color,

    // Confidence bands
    pub confidence_high: Color,
    pub confidence_medium: Color,
    pub confidence_low: Color,

    // UI elements
    pub error: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::phosphor()
    }
}

impl Theme {
    pub fn phosphor() -> Self {
        Self {
            background: Color::Rgb(16, 20, 18),
            border: Color::Rgb(45, 70, 55),
            focused_border: Color::Rgb(100, 220, 160),
            selection: Color::Rgb(30, 50, 40),

            title: Color::Rgb(57, 255, 20),
            text: Color::Rgb(180, 255, 180),
            dimmed: Color::Rgb(80, 120, 90),
            hint: Color::Rgb(100, 160, 120),

            assistant: Color::Rgb(180, 255, 180),
            user: Color::Rgb(130, 170, 255),
            thinking: Color::Rgb(255, 180, 60),

            confidence_high: Color::Rgb(0, 255, 180),
            confidence_medium: Color::Rgb(255, 180, 60),
            confidence_low: Color::Rgb(255, 100, 80),

            error: Color::Rgb(255, 100, 80),
            accent: Color::Rgb(57, 255, 20),
        }
    }

    pub fn band(&self, band: ConfidenceBand) -> Color {
        match band {
            ConfidenceBand::High => self.confidence_high,
            ConfidenceBand::Medium => self.confidence_medium,
            ConfidenceBand::Low => self.confidence_low,
        }
    }
}
