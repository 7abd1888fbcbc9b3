//! Application controller.
//!
//! This module orchestrates the main application loop:
//! - Terminal initialization and cleanup
//! - Event polling and handling
//! - State updates and rendering
//!
//! Raw mode and the alternate screen are restored in `Drop`, so the
//! terminal comes back even when the loop exits through an error.

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::event::{apply_action, handle_event, poll_event, Action};
use crate::model::AppState;
use crate::ui::{calculate_visible_dimensions, render};

/// The main application controller.
pub struct App {
    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state
    state: AppState,
    /// Event poll timeout
    tick_rate: Duration,
}

impl App {
    /// Creates a new application with the given state.
    pub fn new(state: AppState) -> Result<Self> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            state,
            tick_rate: Duration::from_millis(50),
        })
    }

    /// Runs the main application loop.
    pub fn run(&mut self) -> Result<()> {
        // Initial viewport setup
        self.update_viewport_size()?;

        loop {
            // Render
            self.terminal.draw(|frame| {
                render(frame, &self.state);
            })?;

            // Handle events
            if let Some(event) = poll_event(self.tick_rate) {
                let action = handle_event(event, &self.state.mode, self.state.show_help);

                // Handle resize specially to update viewport
                if let Action::Resize(_, _) = action {
                    self.update_viewport_size()?;
                }

                apply_action(&mut self.state, action);

                if self.state.should_quit {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Updates the viewport size based on terminal dimensions.
    fn update_viewport_size(&mut self) -> Result<()> {
        let size = self.terminal.size()?;
        let (visible_rows, _) = calculate_visible_dimensions(size.width, size.height);
        self.state.update_viewport_size(visible_rows);
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Convenience function to run the application with a loaded sequence.
pub fn run_app(state: AppState) -> Result<()> {
    let mut app = App::new(state)?;
    app.run()
}

#[cfg(test)]
mod tests {
    use crate::model::Sequence;

    use super::*;

    #[test]
    fn test_app_state_creation() {
        let seq = Sequence::from_parts("seq1", "ACGTACGT", 4);
        let state = AppState::new(seq, Some("test.fa".to_string()));

        assert_eq!(state.sequence.len(), 8);
        assert_eq!(state.sequence.row_count(), 2);
        assert!(!state.should_quit);
    }
}
