//! Keyboard event handling.
//!
//! This module manages keyboard input with Vim-style navigation:
//! - `h`/`j`/`k`/`l` or arrows: move by one base / one row
//! - `Home` / `End`: go to first / last base
//! - `PageUp` / `PageDown`, `Ctrl+U` / `Ctrl+D`: page and half-page moves
//! - `v`: set (or drop) the selection anchor
//! - `Enter`: highlight the anchored selection
//! - `Delete`: clear all highlights
//! - `/`: enter search mode; `n` / `N` (also `>` / `<`): next / previous match
//! - `:`: enter command mode
//!   - `:q` or `:quit`: quit the application
//!   - `:h` or `:help`: show help
//!   - `:rc`, `:r`, `:c`: reverse-complement / reverse / complement
//!   - `:export <path>`: write highlights as tab-separated lines
//!   - `:match <number>`: jump to a match by number
//!   - `:<number>`: go to a 1-based position

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use crate::model::{AppMode, AppState};

/// Actions that can be triggered by keyboard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action (key not recognized)
    None,
    /// Quit the application
    Quit,
    /// Move cursor up one row
    MoveUp,
    /// Move cursor down one row
    MoveDown,
    /// Move cursor left one base
    MoveLeft,
    /// Move cursor right one base
    MoveRight,
    /// Go to the first base (Home)
    GotoTop,
    /// Go to the last base (End)
    GotoBottom,
    /// Move full page up (PageUp)
    PageUp,
    /// Move full page down (PageDown)
    PageDown,
    /// Move half page up (Ctrl+U)
    HalfPageUp,
    /// Move half page down (Ctrl+D)
    HalfPageDown,
    /// Set or drop the selection anchor (v)
    ToggleAnchor,
    /// Highlight the anchored selection (Enter)
    HighlightSelection,
    /// Clear all highlighted regions (Delete)
    ClearHighlights,
    /// Jump to the next match (n)
    NextMatch,
    /// Jump to the previous match (N)
    PreviousMatch,
    /// Enter search mode (/)
    EnterSearchMode,
    /// Add character to search buffer
    SearchChar(char),
    /// Backspace in search mode
    SearchBackspace,
    /// Execute search
    ExecuteSearch,
    /// Cancel search mode
    CancelSearch,
    /// Enter command mode (:)
    EnterCommandMode,
    /// Add character to command buffer
    CommandChar(char),
    /// Backspace in command mode
    CommandBackspace,
    /// Execute current command
    ExecuteCommand,
    /// Cancel command mode
    CancelCommand,
    /// Dismiss the help overlay
    DismissHelp,
    /// Resize event (terminal resized)
    Resize(u16, u16),
}

/// Polls for keyboard events with a timeout.
///
/// Returns `None` if no event occurred within the timeout.
pub fn poll_event(timeout: Duration) -> Option<Event> {
    if event::poll(timeout).ok()? {
        event::read().ok()
    } else {
        None
    }
}

/// Converts a crossterm event to an Action based on current app mode.
pub fn handle_event(event: Event, mode: &AppMode, show_help: bool) -> Action {
    match event {
        Event::Key(key_event) => handle_key_event(key_event, mode, show_help),
        Event::Resize(width, height) => Action::Resize(width, height),
        _ => Action::None,
    }
}

/// Handles a key event based on the current application mode.
fn handle_key_event(key: KeyEvent, mode: &AppMode, show_help: bool) -> Action {
    // If help is shown, any key dismisses it
    if show_help {
        return Action::DismissHelp;
    }

    match mode {
        AppMode::Normal => handle_normal_mode(key),
        AppMode::Search(_) => handle_search_mode(key),
        AppMode::Command(_) => handle_command_mode(key),
    }
}

/// Handles key events in normal mode (Vim-style navigation).
fn handle_normal_mode(key: KeyEvent) -> Action {
    // Handle Ctrl+C for emergency quit
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    // Handle Ctrl+U for half page up
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('u') {
        return Action::HalfPageUp;
    }

    // Handle Ctrl+D for half page down
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('d') {
        return Action::HalfPageDown;
    }

    match key.code {
        // Vim-style navigation
        KeyCode::Char('j') => Action::MoveDown,
        KeyCode::Char('k') => Action::MoveUp,
        KeyCode::Char('l') => Action::MoveRight,
        KeyCode::Char('h') => Action::MoveLeft,

        // Alternative arrow keys for convenience
        KeyCode::Up => Action::MoveUp,
        KeyCode::Down => Action::MoveDown,
        KeyCode::Right => Action::MoveRight,
        KeyCode::Left => Action::MoveLeft,

        // Jump to the start or end of the sequence
        KeyCode::Home => Action::GotoTop,
        KeyCode::End => Action::GotoBottom,

        // Page navigation
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,

        // Selection and highlighting
        KeyCode::Char('v') => Action::ToggleAnchor,
        KeyCode::Enter => Action::HighlightSelection,
        KeyCode::Delete => Action::ClearHighlights,

        // Match navigation; < and > mirror the n/N pair
        KeyCode::Char('n') | KeyCode::Char('>') => Action::NextMatch,
        KeyCode::Char('N') | KeyCode::Char('<') => Action::PreviousMatch,

        // Search and command modes
        KeyCode::Char('/') => Action::EnterSearchMode,
        KeyCode::Char(':') => Action::EnterCommandMode,

        _ => Action::None,
    }
}

/// Handles key events in search mode.
fn handle_search_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::ExecuteSearch,
        KeyCode::Esc => Action::CancelSearch,
        KeyCode::Backspace => Action::SearchBackspace,
        KeyCode::Char(c) => Action::SearchChar(c),
        _ => Action::None,
    }
}

/// Handles key events in command mode.
fn handle_command_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::ExecuteCommand,
        KeyCode::Esc => Action::CancelCommand,
        KeyCode::Backspace => Action::CommandBackspace,
        KeyCode::Char(c) => Action::CommandChar(c),
        _ => Action::None,
    }
}

/// Applies an action to the application state.
///
/// Returns `true` if the application should continue, `false` if it should quit.
pub fn apply_action(state: &mut AppState, action: Action) -> bool {
    match action {
        Action::None => {}
        Action::Quit => {
            state.should_quit = true;
        }
        Action::MoveUp => {
            state.move_up();
        }
        Action::MoveDown => {
            state.move_down();
        }
        Action::MoveLeft => {
            state.move_left();
        }
        Action::MoveRight => {
            state.move_right();
        }
        Action::GotoTop => {
            state.goto_top();
        }
        Action::GotoBottom => {
            state.goto_bottom();
        }
        Action::PageUp => {
            state.page_up();
        }
        Action::PageDown => {
            state.page_down();
        }
        Action::HalfPageUp => {
            state.half_page_up();
        }
        Action::HalfPageDown => {
            state.half_page_down();
        }
        Action::ToggleAnchor => {
            state.toggle_anchor();
        }
        Action::HighlightSelection => {
            state.highlight_selection();
        }
        Action::ClearHighlights => {
            state.clear_highlights();
        }
        Action::NextMatch => {
            state.next_match();
        }
        Action::PreviousMatch => {
            state.previous_match();
        }
        Action::EnterSearchMode => {
            state.enter_search_mode();
        }
        Action::SearchChar(c) => {
            state.search_input(c);
        }
        Action::SearchBackspace => {
            state.search_backspace();
        }
        Action::ExecuteSearch => {
            state.execute_search();
        }
        Action::CancelSearch => {
            state.cancel_search();
        }
        Action::EnterCommandMode => {
            state.enter_command_mode();
        }
        Action::CommandChar(c) => {
            state.command_input(c);
        }
        Action::CommandBackspace => {
            state.command_backspace();
        }
        Action::ExecuteCommand => {
            state.execute_command();
        }
        Action::CancelCommand => {
            state.cancel_command();
        }
        Action::DismissHelp => {
            state.show_help = false;
        }
        Action::Resize(_, _) => {
            // Resize is handled in the main loop with actual terminal dimensions
        }
    }

    !state.should_quit
}
