//! Data model for the sequence viewer.
//!
//! This module contains the two owned states of the application:
//! - [`Sequence`]: the raw bases plus the display row width
//! - [`AppState`]: everything mutable at runtime (sequence, highlight
//!   registry, cursor, selection anchor, viewport, input mode)
//!
//! Length and row count are always derived from the current bases, so
//! they can never be read stale after a transformation replaces the
//! sequence.

use std::fs::File;
use std::io;
use std::path::Path;

use rand::Rng;

use crate::highlight::{write_export, HighlightRegistry, Region};
use crate::layout::GridLayout;
use crate::search::{self, SearchResult};
use crate::transform::TransformOp;

/// Bases drawn during random sequence generation.
const RANDOM_ALPHABET: [char; 4] = ['A', 'C', 'G', 'T'];

/// Default bases per display row.
pub const DEFAULT_ROW_WIDTH: usize = 60;

/// A single sequence with its identifier and display row width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// The sequence name (from the FASTA header, without '>'; possibly
    /// empty)
    pub id: String,
    /// The raw bases
    data: String,
    /// Bases per display row
    row_width: usize,
}

impl Sequence {
    /// Creates a sequence from already-parsed parts.
    ///
    /// # Panics
    ///
    /// Panics if `row_width` is zero or `data` contains non-ASCII
    /// characters. Every position in the viewer is a byte offset, so
    /// each stored base must be exactly one byte; untrusted input goes
    /// through [`crate::fasta::parse_sequence`], which checks this and
    /// returns an error instead.
    pub fn from_parts(id: impl Into<String>, data: impl Into<String>, row_width: usize) -> Self {
        let data = data.into();
        assert!(row_width > 0, "row width must be positive");
        assert!(data.is_ascii(), "sequence data must be ASCII");
        Self {
            id: id.into(),
            data,
            row_width,
        }
    }

    /// Generates a uniformly random A/C/G/T sequence of `length` bases.
    /// The random source is injected so callers can seed it.
    pub fn random<R: Rng>(id: impl Into<String>, length: usize, row_width: usize, rng: &mut R) -> Self {
        let data: String = (0..length)
            .map(|_| RANDOM_ALPHABET[rng.random_range(0..RANDOM_ALPHABET.len())])
            .collect();
        Self::from_parts(id, data, row_width)
    }

    /// Returns the length of the sequence in bases.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bases per display row.
    pub fn row_width(&self) -> usize {
        self.row_width
    }

    /// Number of wrapped display rows.
    pub fn row_count(&self) -> usize {
        self.layout().row_count(self.data.len())
    }

    /// Grid geometry for this sequence's row width.
    pub fn layout(&self) -> GridLayout {
        GridLayout::new(self.row_width)
    }

    /// The raw bases.
    pub fn as_str(&self) -> &str {
        &self.data
    }

    /// The raw bases as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_bytes()
    }

    /// Gets the base at a 0-based position.
    pub fn base_at(&self, pos: usize) -> Option<char> {
        self.data.as_bytes().get(pos).map(|&b| b as char)
    }

    /// Replaces the bases wholesale; name and row width are kept.
    pub(crate) fn replace_data(&mut self, data: String) {
        self.data = data;
    }
}

/// Application mode for handling different input states.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Search pattern input mode (after pressing '/')
    Search(String),
    /// Command input mode (after pressing ':')
    Command(String),
}

/// The complete application state.
#[derive(Debug)]
pub struct AppState {
    /// The sequence on display
    pub sequence: Sequence,
    /// Highlighted regions and the match cursor
    pub registry: HighlightRegistry,
    /// 0-based position of the base under the cursor
    pub cursor_pos: usize,
    /// Selection anchor set with 'v', cleared on highlight
    pub anchor: Option<usize>,
    /// First visible grid row (0-based)
    pub first_row: usize,
    /// Number of grid rows the terminal can show
    pub visible_rows: usize,
    /// Current application mode
    pub mode: AppMode,
    /// Whether the application should quit
    pub should_quit: bool,
    /// Whether the key binding overlay is up
    pub show_help: bool,
    /// Status message to display
    pub status_message: Option<String>,
    /// Where the sequence came from, for the status bar
    pub source_name: Option<String>,
}

impl AppState {
    /// Creates a new application state with the given sequence.
    pub fn new(sequence: Sequence, source_name: Option<String>) -> Self {
        Self {
            sequence,
            registry: HighlightRegistry::new(),
            cursor_pos: 0,
            anchor: None,
            first_row: 0,
            visible_rows: 0,
            mode: AppMode::Normal,
            should_quit: false,
            show_help: false,
            status_message: None,
            source_name,
        }
    }

    /// Replaces the displayed sequence, dropping highlights, selection,
    /// and scroll position.
    pub fn load(&mut self, sequence: Sequence, source_name: Option<String>) {
        self.sequence = sequence;
        self.registry.clear();
        self.cursor_pos = 0;
        self.anchor = None;
        self.first_row = 0;
        self.status_message = None;
        self.source_name = source_name;
    }

    /// Updates the viewport size based on terminal dimensions.
    pub fn update_viewport_size(&mut self, rows: usize) {
        self.visible_rows = rows;
        self.ensure_cursor_visible();
    }

    fn last_pos(&self) -> usize {
        self.sequence.len().saturating_sub(1)
    }

    /// 0-based grid row of the cursor.
    pub fn cursor_row(&self) -> usize {
        self.cursor_pos / self.sequence.row_width()
    }

    // --- movement ---

    /// Moves the cursor left by one base.
    pub fn move_left(&mut self) {
        if self.cursor_pos > 0 {
            self.cursor_pos -= 1;
            self.ensure_cursor_visible();
        }
    }

    /// Moves the cursor right by one base.
    pub fn move_right(&mut self) {
        if self.cursor_pos + 1 < self.sequence.len() {
            self.cursor_pos += 1;
            self.ensure_cursor_visible();
        }
    }

    /// Moves the cursor up by one row.
    pub fn move_up(&mut self) {
        let width = self.sequence.row_width();
        if self.cursor_pos >= width {
            self.cursor_pos -= width;
            self.ensure_cursor_visible();
        }
    }

    /// Moves the cursor down by one row, clamping into a ragged last row.
    pub fn move_down(&mut self) {
        let width = self.sequence.row_width();
        let target = self.cursor_pos + width;
        if target < self.sequence.len() {
            self.cursor_pos = target;
        } else if self.cursor_row() + 1 < self.sequence.row_count() {
            self.cursor_pos = self.last_pos();
        } else {
            return;
        }
        self.ensure_cursor_visible();
    }

    /// Moves the cursor down by one screenful.
    pub fn page_down(&mut self) {
        self.move_rows_down(self.visible_rows.max(1));
    }

    /// Moves the cursor up by one screenful.
    pub fn page_up(&mut self) {
        self.move_rows_up(self.visible_rows.max(1));
    }

    /// Moves the cursor down by half a screenful.
    pub fn half_page_down(&mut self) {
        self.move_rows_down((self.visible_rows / 2).max(1));
    }

    /// Moves the cursor up by half a screenful.
    pub fn half_page_up(&mut self) {
        self.move_rows_up((self.visible_rows / 2).max(1));
    }

    fn move_rows_down(&mut self, rows: usize) {
        let width = self.sequence.row_width();
        self.cursor_pos = (self.cursor_pos + rows * width).min(self.last_pos());
        self.ensure_cursor_visible();
    }

    fn move_rows_up(&mut self, rows: usize) {
        let width = self.sequence.row_width();
        self.cursor_pos = self.cursor_pos.saturating_sub(rows * width);
        self.ensure_cursor_visible();
    }

    /// Jumps to the first base.
    pub fn goto_top(&mut self) {
        self.cursor_pos = 0;
        self.ensure_cursor_visible();
    }

    /// Jumps to the last base.
    pub fn goto_bottom(&mut self) {
        self.cursor_pos = self.last_pos();
        self.ensure_cursor_visible();
    }

    /// Jumps to a 1-based position, as typed in a `:` command.
    pub fn goto_position(&mut self, pos: usize) {
        if pos == 0 || pos > self.sequence.len() {
            self.status_message = Some(format!("invalid position: {}", pos));
            return;
        }
        self.cursor_pos = pos - 1;
        self.ensure_cursor_visible();
    }

    /// Keeps the cursor's row inside the viewport.
    fn ensure_cursor_visible(&mut self) {
        if self.visible_rows == 0 {
            return;
        }
        let row = self.cursor_row();
        if row < self.first_row {
            self.first_row = row;
        } else if row >= self.first_row + self.visible_rows {
            self.first_row = row + 1 - self.visible_rows;
        }
        self.clamp_viewport();
    }

    /// Clamps the viewport so it never scrolls past the last row.
    fn clamp_viewport(&mut self) {
        let row_count = self.sequence.row_count();
        if self.first_row + self.visible_rows > row_count {
            self.first_row = row_count.saturating_sub(self.visible_rows);
        }
    }

    // --- selection and highlighting ---

    /// Sets the selection anchor at the cursor, or drops it if already set.
    pub fn toggle_anchor(&mut self) {
        match self.anchor {
            Some(_) => {
                self.anchor = None;
                self.status_message = Some("selection cancelled".to_string());
            }
            None => {
                self.anchor = Some(self.cursor_pos);
                self.status_message = Some(format!("anchor at {}", self.cursor_pos + 1));
            }
        }
    }

    /// The selected span as inclusive 0-based `(low, high)` positions,
    /// regardless of drag direction.
    pub fn selection(&self) -> Option<(usize, usize)> {
        self.anchor.map(|a| {
            let lo = a.min(self.cursor_pos);
            let hi = a.max(self.cursor_pos);
            (lo, hi)
        })
    }

    /// Turns the anchored selection into a highlighted region. The span is
    /// derived from the two grid cells, so a single-cell selection yields
    /// a one-base region.
    pub fn highlight_selection(&mut self) {
        let Some(anchor) = self.anchor else {
            self.status_message = Some("no selection: press v to set the anchor first".to_string());
            return;
        };
        let layout = self.sequence.layout();
        let a = layout.coordinate(anchor);
        let b = layout.coordinate(self.cursor_pos);
        match self.registry.add_selection(a, b, &layout, self.sequence.len()) {
            Ok(region) => {
                self.registry.sort_regions();
                self.anchor = None;
                self.status_message =
                    Some(format!("highlighted {} - {}", region.start + 1, region.end));
            }
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    /// Removes every highlighted region.
    pub fn clear_highlights(&mut self) {
        self.registry.clear();
        self.anchor = None;
        self.status_message = Some("highlights cleared".to_string());
    }

    // --- searching ---

    /// Runs a pattern search and stages every match as a highlighted
    /// region. The pattern is compiled before anything is staged, so a bad
    /// pattern leaves all state untouched. New matches join any existing
    /// regions; the match cursor rewinds to the first region and the view
    /// jumps there. Returns the number of regions staged.
    pub fn run_search(&mut self, pattern: &str) -> SearchResult<usize> {
        let matches = search::find_all(self.sequence.as_str(), pattern)?;
        let len = self.sequence.len();
        let mut staged = 0;
        for (start, end) in matches {
            // Zero-width matches cover no bases, skip them.
            if start < end && self.registry.add(start, end, len).is_ok() {
                staged += 1;
            }
        }
        self.registry.sort_regions();
        self.registry.rewind();
        if let Ok(region) = self.registry.current() {
            self.cursor_pos = region.start.min(self.last_pos());
        }
        self.ensure_cursor_visible();
        Ok(staged)
    }

    /// Moves to the next match with wraparound.
    pub fn next_match(&mut self) {
        match self.registry.next_match() {
            Ok(region) => self.focus_region(region),
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    /// Moves to the previous match with wraparound.
    pub fn previous_match(&mut self) {
        match self.registry.previous_match() {
            Ok(region) => self.focus_region(region),
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    /// Jumps to match `index` (0-based).
    pub fn go_to_match(&mut self, index: usize) {
        match self.registry.go_to(index) {
            Ok(region) => self.focus_region(region),
            Err(_) => {
                self.status_message = Some(format!(
                    "no match {} ({} total)",
                    index + 1,
                    self.registry.len()
                ));
            }
        }
    }

    fn focus_region(&mut self, region: Region) {
        self.cursor_pos = region.start.min(self.last_pos());
        self.ensure_cursor_visible();
        self.status_message = Some(format!(
            "match {} / {}: {} - {}",
            self.registry.cursor() + 1,
            self.registry.len(),
            region.start + 1,
            region.end
        ));
    }

    /// `(current, total)` for the status bar, when any regions exist.
    pub fn match_indicator(&self) -> Option<(usize, usize)> {
        if self.registry.is_empty() {
            None
        } else {
            Some((self.registry.cursor() + 1, self.registry.len()))
        }
    }

    // --- transformations ---

    /// Applies a transformation, replacing the sequence wholesale. Region
    /// positions would no longer address the bases they were created on,
    /// so the registry is cleared; cursor and scroll survive because the
    /// length is unchanged.
    pub fn apply_transform(&mut self, op: TransformOp) {
        let transformed = op.apply(self.sequence.as_str());
        self.sequence.replace_data(transformed);
        self.registry.clear();
        self.anchor = None;
        self.status_message = Some(format!("applied {}", op.label()));
    }

    // --- export ---

    /// Writes all highlighted regions to `path` as tab-separated lines.
    /// Returns the number of records written; zero regions write an empty
    /// file.
    pub fn export_highlights<P: AsRef<Path>>(&self, path: P) -> io::Result<usize> {
        let records = self
            .registry
            .export(&self.sequence.id, self.sequence.as_str());
        let mut file = File::create(path)?;
        write_export(&mut file, &records)?;
        Ok(records.len())
    }

    // --- search mode ---

    /// Enters search mode.
    pub fn enter_search_mode(&mut self) {
        self.mode = AppMode::Search(String::new());
    }

    /// Handles a character input in search mode.
    pub fn search_input(&mut self, c: char) {
        if let AppMode::Search(ref mut pattern) = self.mode {
            pattern.push(c);
        }
    }

    /// Handles backspace in search mode.
    pub fn search_backspace(&mut self) {
        if let AppMode::Search(ref mut pattern) = self.mode {
            pattern.pop();
            if pattern.is_empty() {
                self.mode = AppMode::Normal;
            }
        }
    }

    /// Runs the typed pattern and reports the match count.
    pub fn execute_search(&mut self) {
        let pattern = match std::mem::replace(&mut self.mode, AppMode::Normal) {
            AppMode::Search(pattern) => pattern,
            other => {
                self.mode = other;
                return;
            }
        };
        if pattern.is_empty() {
            return;
        }
        match self.run_search(&pattern) {
            Ok(0) => self.status_message = Some(format!("no matches for \"{}\"", pattern)),
            Ok(n) => self.status_message = Some(format!("{} match(es) for \"{}\"", n, pattern)),
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    /// Cancels search mode and returns to normal mode.
    pub fn cancel_search(&mut self) {
        self.mode = AppMode::Normal;
    }

    // --- command mode ---

    /// Enters command mode.
    pub fn enter_command_mode(&mut self) {
        self.mode = AppMode::Command(String::new());
    }

    /// Handles a character input in command mode.
    pub fn command_input(&mut self, c: char) {
        if let AppMode::Command(ref mut cmd) = self.mode {
            cmd.push(c);
        }
    }

    /// Handles backspace in command mode.
    pub fn command_backspace(&mut self) {
        if let AppMode::Command(ref mut cmd) = self.mode {
            cmd.pop();
            if cmd.is_empty() {
                self.mode = AppMode::Normal;
            }
        }
    }

    /// Executes the typed command.
    pub fn execute_command(&mut self) {
        let cmd = match std::mem::replace(&mut self.mode, AppMode::Normal) {
            AppMode::Command(cmd) => cmd,
            other => {
                self.mode = other;
                return;
            }
        };
        let cmd = cmd.trim();
        if cmd.is_empty() {
            return;
        }
        let (verb, arg) = match cmd.split_once(char::is_whitespace) {
            Some((verb, arg)) => (verb, arg.trim()),
            None => (cmd, ""),
        };
        match verb {
            "q" | "quit" => self.should_quit = true,
            "h" | "help" => self.show_help = true,
            "clear" => self.clear_highlights(),
            "rc" => self.apply_transform(TransformOp::ReverseComplement),
            "r" => self.apply_transform(TransformOp::Reverse),
            "c" => self.apply_transform(TransformOp::Complement),
            "export" => {
                if arg.is_empty() {
                    self.status_message = Some("usage: :export <path>".to_string());
                } else {
                    match self.export_highlights(arg) {
                        Ok(count) => {
                            self.status_message =
                                Some(format!("exported {} region(s) to {}", count, arg));
                        }
                        Err(e) => self.status_message = Some(format!("export failed: {}", e)),
                    }
                }
            }
            "match" => match arg.parse::<usize>() {
                Ok(n) if n >= 1 => self.go_to_match(n - 1),
                _ => self.status_message = Some("usage: :match <number>".to_string()),
            },
            _ => {
                if let Ok(pos) = cmd.parse::<usize>() {
                    self.goto_position(pos);
                } else {
                    self.status_message = Some(format!("unknown command: {}", cmd));
                }
            }
        }
    }

    /// Cancels command mode and returns to normal mode.
    pub fn cancel_command(&mut self) {
        self.mode = AppMode::Normal;
    }
}
