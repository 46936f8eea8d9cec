//! Main TUI application

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use std::time::Duration;

use super::chat::ChatView;
use super::styles::Theme;
use crate::config::Config;
use crate::storage::Storage;

pub struct App {
    chat: ChatView,
    should_quit: bool,
    theme: Theme,
    thinking_delay: Duration,
}

impl App {
    pub fn new(storage: Storage, config: &Config) -> Self {
        let chat = ChatView::new(storage, config.export.directory());

        Self {
            chat,
            should_quit: false,
            theme: Theme::default(),
            thinking_delay: Duration::from_millis(config.interview.thinking_delay_ms),
        }
    }

    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<()> {
        // Initial render
        terminal.clear()?;
        terminal.draw(|f| self.render(f))?;

        loop {
            // Poll with short timeout for responsive input
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);

                    // Draw immediately after input for responsiveness
                    terminal.draw(|f| self.render(f))?;

                    if self.should_quit {
                        break;
                    }
                    continue;
                }
            }

            self.chat.tick(self.thinking_delay);

            // Keep the thinking indicator animated
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        self.chat.render(frame, frame.area(), &self.theme);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Global keybindings
        if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
            self.should_quit = true;
            return;
        }

        if let Some(action) = self.chat.handle_key(key) {
            match action {
                Action::Quit => self.should_quit = true,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_app(temp: &TempDir) -> App {
        let mut config = Config::default();
        config.export.directory = Some(temp.path().display().to_string());
        App::new(Storage::in_dir(temp.path()), &config)
    }

    #[test]
    fn test_ctrl_c_quits() {
        let temp = TempDir::new().unwrap();
        let mut app = test_app(&temp);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_q_does_not_quit_while_typing() {
        let temp = TempDir::new().unwrap();
        let mut app = test_app(&temp);
        app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(!app.should_quit);
    }

    #[test]
    fn test_thinking_delay_from_config() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.interview.thinking_delay_ms = 0;
        let app = App::new(Storage::in_dir(temp.path()), &config);
        assert_eq!(app.thinking_delay, Duration::ZERO);
    }

    #[test]
    fn test_action_clone() {
        let original = Action::Quit;
        let cloned = original.clone();
        assert_eq!(original, cloned);
    }
}
