//! TUI rendering module.
//!
//! This module handles all visual rendering using ratatui:
//! - Two-line column ruler above the grid
//! - Position gutter with the 1-based start of each wrapped row
//! - Colored nucleotide grid with highlight, selection, and cursor overlays
//! - Status bar with mode, pending input, and position info
//! - Key binding overlay
//!
//! Overlay precedence inside the grid: the pending selection covers
//! highlights, and the cursor inverts whatever it sits on.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::highlight::Region;
use crate::model::{AppMode, AppState};

/// Width of the position gutter on the left.
const GUTTER_WIDTH: u16 = 10;
/// Height of the column ruler.
const RULER_HEIGHT: u16 = 2;
/// Height of the status bar.
const STATUS_BAR_HEIGHT: u16 = 1;

/// Key bindings listed in the help overlay.
const KEY_HELP: &[(&str, &str)] = &[
    ("h j k l", "move cursor (arrows work too)"),
    ("Home / End", "first / last base"),
    ("PgUp / PgDn", "page up / down"),
    ("Ctrl+U / D", "half page up / down"),
    ("v", "set or drop the selection anchor"),
    ("Enter", "highlight the selection"),
    ("Delete", "clear all highlights"),
    ("/", "search (regular expression)"),
    ("n / N", "next / previous match"),
    (":rc :r :c", "reverse-complement, reverse, complement"),
    (":export <path>", "write highlights as tab-separated text"),
    (":match <n>", "jump to match n"),
    (":<number>", "go to a 1-based position"),
    (":q", "quit"),
];

/// Color scheme for sequence characters.
///
/// This trait allows for different color schemes to be implemented
/// (e.g., RNA or quality-shaded displays).
pub trait ColorScheme {
    fn get_color(&self, c: char) -> Color;
}

/// DNA nucleotide color scheme.
pub struct DnaColorScheme;

impl ColorScheme for DnaColorScheme {
    fn get_color(&self, c: char) -> Color {
        match c.to_ascii_uppercase() {
            'A' => Color::Red,
            'C' => Color::Green,
            'G' => Color::Yellow,
            'T' | 'U' => Color::Blue,
            _ => Color::DarkGray,
        }
    }
}

/// Renders the complete UI.
pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Main layout: ruler + grid area + status bar
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(RULER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);

    let ruler_area = main_layout[0];
    let content_area = main_layout[1];
    let status_area = main_layout[2];

    // The gutter split is applied to the ruler too, so ruler columns line
    // up with grid columns.
    let (_, ruler_cols) = split_gutter(ruler_area);
    let (gutter_area, grid_area) = split_gutter(content_area);

    render_ruler(frame, state, ruler_cols);
    render_gutter(frame, state, gutter_area);
    render_grid(frame, state, grid_area);
    render_status_bar(frame, state, status_area);

    if state.show_help {
        render_help(frame, area);
    }
}

fn split_gutter(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(GUTTER_WIDTH), Constraint::Min(1)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Renders the two-line column ruler: tens digits over a 1..9,0 cycle.
fn render_ruler(frame: &mut Frame, state: &AppState, area: Rect) {
    let (tens, ones) = state.sequence.layout().ruler();
    let style = Style::default().fg(Color::DarkGray);
    let lines = vec![
        Line::from(Span::styled(tens, style)),
        Line::from(Span::styled(ones, style)),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn gutter_label(start: usize) -> String {
    format!("{:>8}  ", start)
}

/// Renders the position gutter: the 1-based start of each visible row.
fn render_gutter(frame: &mut Frame, state: &AppState, area: Rect) {
    let layout = state.sequence.layout();
    let start_row = state.first_row;
    let end_row = (start_row + area.height as usize).min(state.sequence.row_count());

    let mut lines: Vec<Line> = Vec::new();
    for row_idx in start_row..end_row {
        let style = if row_idx == state.cursor_row() {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::from(Span::styled(
            gutter_label(layout.row_label(row_idx + 1)),
            style,
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

/// Renders the wrapped sequence grid with all overlays.
fn render_grid(frame: &mut Frame, state: &AppState, area: Rect) {
    let color_scheme = DnaColorScheme;
    let layout = state.sequence.layout();
    let len = state.sequence.len();
    let selection = state.selection();
    let current = state.registry.current().ok();
    let regions = state.registry.regions();

    let start_row = state.first_row;
    let end_row = (start_row + area.height as usize).min(state.sequence.row_count());

    let mut lines: Vec<Line> = Vec::new();
    for row_idx in start_row..end_row {
        let bounds = layout.row_bounds(row_idx + 1, len);
        let row_regions: Vec<&Region> = regions
            .iter()
            .filter(|r| r.start < bounds.end && r.end > bounds.start)
            .collect();

        let mut spans: Vec<Span> = Vec::new();
        for pos in bounds {
            let Some(c) = state.sequence.base_at(pos) else {
                break;
            };
            let mut style = Style::default().fg(color_scheme.get_color(c));
            if let Some(region) = row_regions.iter().find(|r| r.contains(pos)) {
                style = Style::default().fg(Color::Black).bg(Color::Yellow);
                if current.is_some_and(|cur| cur.id == region.id) {
                    style = style.add_modifier(Modifier::BOLD);
                }
            }
            if selection.is_some_and(|(lo, hi)| pos >= lo && pos <= hi) {
                style = Style::default().fg(Color::White).bg(Color::Blue);
            }
            if pos == state.cursor_pos {
                style = style
                    .add_modifier(Modifier::REVERSED)
                    .add_modifier(Modifier::BOLD);
            }
            spans.push(Span::styled(c.to_string(), style));
        }
        lines.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

/// Renders the status bar at the bottom.
fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let (mode_str, pending) = match &state.mode {
        AppMode::Normal => ("NORMAL", String::new()),
        AppMode::Search(pattern) => ("SEARCH", format!("/{}", pattern)),
        AppMode::Command(cmd) => ("COMMAND", format!(":{}", cmd)),
    };

    let mut parts: Vec<String> = Vec::new();
    if !state.sequence.id.is_empty() {
        parts.push(state.sequence.id.clone());
    } else if let Some(source) = &state.source_name {
        parts.push(source.clone());
    }
    parts.push(format!("{} bp", state.sequence.len()));
    parts.push(format!("pos {}", state.cursor_pos + 1));
    if let Some((current, total)) = state.match_indicator() {
        parts.push(format!("match {}/{}", current, total));
    }
    if let Some((lo, hi)) = state.selection() {
        parts.push(format!("sel {}-{}", lo + 1, hi + 1));
    }
    let position_info = format!("{} ", parts.join(" | "));

    // Pending input wins over the last status message
    let message = state.status_message.as_deref().unwrap_or("");
    let left_content = if pending.is_empty() {
        format!(" {} | {} ", mode_str, message)
    } else {
        format!(" {} | {} ", mode_str, pending)
    };

    let left_len = left_content.len();
    let status_line = Line::from(vec![
        Span::styled(
            left_content,
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
        Span::styled(
            " ".repeat((area.width as usize).saturating_sub(left_len + position_info.len())),
            Style::default().bg(Color::Cyan),
        ),
        Span::styled(
            position_info,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let paragraph = Paragraph::new(status_line);
    frame.render_widget(paragraph, area);
}

/// Renders the key binding overlay over the main view.
fn render_help(frame: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let inner_width = popup.width.saturating_sub(4).max(20) as usize;
    let intro = "Move around the sequence with Vim-style keys, select a span \
                 with v and Enter, then search, transform, or export from the \
                 : command line. Press any key to close this window.";

    let mut lines: Vec<Line> = textwrap::wrap(intro, inner_width)
        .into_iter()
        .map(|s| Line::from(s.into_owned()))
        .collect();
    lines.push(Line::from(""));
    for (keys, what) in KEY_HELP {
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<15}", keys), Style::default().fg(Color::Yellow)),
            Span::raw(*what),
        ]));
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, popup);
}

/// Centers a `percent_x` by `percent_y` rectangle inside `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

/// Calculates the visible grid dimensions for a terminal size.
pub fn calculate_visible_dimensions(terminal_width: u16, terminal_height: u16) -> (usize, usize) {
    let visible_cols = terminal_width.saturating_sub(GUTTER_WIDTH) as usize;
    let visible_rows = terminal_height.saturating_sub(RULER_HEIGHT + STATUS_BAR_HEIGHT) as usize;
    (visible_rows, visible_cols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sequence;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_dna_colors() {
        let scheme = DnaColorScheme;
        assert_eq!(scheme.get_color('A'), Color::Red);
        assert_eq!(scheme.get_color('a'), Color::Red); // Case insensitive
        assert_eq!(scheme.get_color('C'), Color::Green);
        assert_eq!(scheme.get_color('G'), Color::Yellow);
        assert_eq!(scheme.get_color('T'), Color::Blue);
        assert_eq!(scheme.get_color('U'), Color::Blue);
        assert_eq!(scheme.get_color('-'), Color::DarkGray);
        assert_eq!(scheme.get_color('N'), Color::DarkGray);
    }

    #[test]
    fn test_visible_dimensions() {
        let (rows, cols) = calculate_visible_dimensions(100, 50);
        // 100 - 10 (gutter) = 90 cols
        // 50 - 2 (ruler) - 1 (status) = 47 rows
        assert_eq!(cols, 90);
        assert_eq!(rows, 47);
    }

    #[test]
    fn test_gutter_label_width() {
        assert_eq!(gutter_label(1), "       1  ");
        assert_eq!(gutter_label(1201), "    1201  ");
        assert_eq!(gutter_label(1).len(), GUTTER_WIDTH as usize);
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 100);
        let popup = centered_rect(60, 70, area);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 70);
        assert_eq!(popup.x, 20);
        assert_eq!(popup.y, 15);
    }

    #[test]
    fn test_render_shows_sequence_rows() {
        let mut state = AppState::new(Sequence::from_parts("s", "ACGTACGTAC", 4), None);
        state.update_viewport_size(5);

        let backend = TestBackend::new(24, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, &state)).unwrap();

        let buffer = terminal.backend().buffer();
        let rows: Vec<String> = (0..8)
            .map(|y| (0..24).map(|x| buffer.get(x, y).symbol()).collect())
            .collect();

        // Ruler ones line sits above the grid, aligned past the gutter.
        assert!(rows[1].contains("1234"), "{:?}", rows);
        // Wrapped rows with their gutter labels.
        assert!(rows[2].contains("1  ACGT"), "{:?}", rows);
        assert!(rows[3].contains("5  ACGT"), "{:?}", rows);
        assert!(rows[4].contains("9  AC"), "{:?}", rows);
        assert!(rows[7].contains("NORMAL"), "{:?}", rows);
    }
}
