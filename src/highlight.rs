//! Highlighted regions and match navigation.
//!
//! The registry owns every highlighted span of the current sequence,
//! manual selections and search matches alike. It keeps the spans
//! ordered by start position and tracks which one the user is
//! visiting. Regions store explicit `[start, end)` positions; nothing
//! tracks the sequence text itself, so replacing the sequence requires
//! clearing the registry.
//!
//! Overlapping regions are permitted and never merged.

use std::io::{self, Write};

use thiserror::Error;

use crate::layout::{GridCoord, GridLayout};

/// Errors from region creation and navigation.
#[derive(Error, Debug)]
pub enum RegionError {
    #[error("empty region: start {start} is not below end {end}")]
    EmptySpan { start: usize, end: usize },

    #[error("region {start}..{end} is outside the sequence (length {len})")]
    OutOfBounds { start: usize, end: usize, len: usize },

    #[error("match index {index} out of range ({count} regions)")]
    BadIndex { index: usize, count: usize },

    #[error("no highlighted regions")]
    NoRegions,
}

/// Result type for registry operations.
pub type RegionResult<T> = Result<T, RegionError>;

/// One highlighted span, stored as 0-based `[start, end)`.
///
/// The id is unique for the lifetime of the registry and identifies the
/// region's overlay in the display layer even as sorting reorders the
/// list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub id: u32,
    pub start: usize,
    pub end: usize,
}

impl Region {
    /// Number of bases covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Always false: regions are validated non-empty at creation.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether `pos` falls inside the span.
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }
}

/// One line of the highlight export. Bounds are 1-based and inclusive;
/// the fragment is spelled as the sequence currently reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRecord {
    pub name: String,
    pub start: usize,
    pub end: usize,
    pub fragment: String,
}

/// The set of highlighted regions plus the match cursor.
#[derive(Debug, Default)]
pub struct HighlightRegistry {
    regions: Vec<Region>,
    cursor: usize,
    next_id: u32,
}

impl HighlightRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the registry holds no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// All regions in their current order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Index of the region the user is visiting.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Validates and appends a region with explicit positions (the search
    /// path, where match bounds are exact).
    ///
    /// Fails if `start >= end` or the span reaches past `seq_len`. On
    /// failure the registry is unchanged.
    pub fn add(&mut self, start: usize, end: usize, seq_len: usize) -> RegionResult<Region> {
        if start >= end {
            return Err(RegionError::EmptySpan { start, end });
        }
        if end > seq_len {
            return Err(RegionError::OutOfBounds {
                start,
                end,
                len: seq_len,
            });
        }
        let region = Region {
            id: self.next_id,
            start,
            end,
        };
        self.next_id += 1;
        self.regions.push(region);
        Ok(region)
    }

    /// Appends a region anchored by two grid cells (a selection dragged in
    /// either direction). The span derivation lives in [`GridLayout`];
    /// explicit-position callers should use [`HighlightRegistry::add`]
    /// instead, since the cell conversion addresses whole cells, not exact
    /// match bounds.
    pub fn add_selection(
        &mut self,
        a: GridCoord,
        b: GridCoord,
        layout: &GridLayout,
        seq_len: usize,
    ) -> RegionResult<Region> {
        let (start, end) = layout.selection_span(a, b);
        self.add(start, end, seq_len)
    }

    /// Stable sort ascending by start position. Call after any bulk
    /// insertion, before navigation.
    pub fn sort_regions(&mut self) {
        self.regions.sort_by_key(|r| r.start);
    }

    /// Removes every region and rewinds the cursor. Region ids are not
    /// reused.
    pub fn clear(&mut self) {
        self.regions.clear();
        self.cursor = 0;
    }

    /// Rewinds the cursor to the first region.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Advances the cursor with wraparound and returns the region it
    /// lands on.
    pub fn next_match(&mut self) -> RegionResult<Region> {
        if self.regions.is_empty() {
            return Err(RegionError::NoRegions);
        }
        self.cursor = (self.cursor + 1) % self.regions.len();
        Ok(self.regions[self.cursor])
    }

    /// Retreats the cursor with wraparound and returns the region it
    /// lands on.
    pub fn previous_match(&mut self) -> RegionResult<Region> {
        if self.regions.is_empty() {
            return Err(RegionError::NoRegions);
        }
        let count = self.regions.len();
        self.cursor = (self.cursor + count - 1) % count;
        Ok(self.regions[self.cursor])
    }

    /// The region under the cursor.
    pub fn current(&self) -> RegionResult<Region> {
        self.regions
            .get(self.cursor)
            .copied()
            .ok_or(RegionError::NoRegions)
    }

    /// Moves the cursor to `index` (0-based).
    pub fn go_to(&mut self, index: usize) -> RegionResult<Region> {
        if index >= self.regions.len() {
            return Err(RegionError::BadIndex {
                index,
                count: self.regions.len(),
            });
        }
        self.cursor = index;
        Ok(self.regions[index])
    }

    /// Builds one export record per region in the registry's current
    /// (sorted) order. Fragments are sliced from `seq` as it reads now, so
    /// exporting after a transformation reflects the transformed bases.
    ///
    /// `seq` must be the ASCII text the regions were validated against
    /// (the bounds check happens in [`HighlightRegistry::add`]).
    pub fn export(&self, name: &str, seq: &str) -> Vec<ExportRecord> {
        self.regions
            .iter()
            .map(|r| ExportRecord {
                name: name.to_string(),
                start: r.start + 1,
                end: r.end,
                fragment: seq[r.start..r.end].to_string(),
            })
            .collect()
    }
}

/// Writes export records as tab-separated lines:
/// `name<TAB>start<TAB>end<TAB>fragment`.
pub fn write_export<W: Write>(out: &mut W, records: &[ExportRecord]) -> io::Result<()> {
    for rec in records {
        writeln!(out, "{}\t{}\t{}\t{}", rec.name, rec.start, rec.end, rec.fragment)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(spans: &[(usize, usize)], seq_len: usize) -> HighlightRegistry {
        let mut reg = HighlightRegistry::new();
        for &(s, e) in spans {
            reg.add(s, e, seq_len).unwrap();
        }
        reg
    }

    #[test]
    fn test_add_and_ids() {
        let mut reg = HighlightRegistry::new();
        let a = reg.add(0, 4, 10).unwrap();
        let b = reg.add(2, 6, 10).unwrap();
        assert_eq!(reg.len(), 2);
        assert_ne!(a.id, b.id);
        assert_eq!(a.len(), 4);
        assert!(a.contains(0));
        assert!(a.contains(3));
        assert!(!a.contains(4));
    }

    #[test]
    fn test_add_rejects_empty_span() {
        let mut reg = HighlightRegistry::new();
        assert!(matches!(
            reg.add(3, 3, 10),
            Err(RegionError::EmptySpan { start: 3, end: 3 })
        ));
        assert!(matches!(reg.add(5, 2, 10), Err(RegionError::EmptySpan { .. })));
        assert!(reg.is_empty());
    }

    #[test]
    fn test_add_rejects_out_of_bounds() {
        let mut reg = HighlightRegistry::new();
        assert!(matches!(
            reg.add(7, 11, 10),
            Err(RegionError::OutOfBounds { len: 10, .. })
        ));
        // Exactly reaching the end is fine.
        assert!(reg.add(7, 10, 10).is_ok());
    }

    #[test]
    fn test_overlaps_permitted() {
        let reg = filled(&[(0, 6), (2, 4), (2, 4)], 10);
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut reg = filled(&[(5, 8), (1, 3), (5, 6)], 10);
        reg.sort_regions();
        let starts: Vec<usize> = reg.regions().iter().map(|r| r.start).collect();
        assert_eq!(starts, vec![1, 5, 5]);
        // Equal starts keep insertion order.
        assert_eq!(reg.regions()[1].id, 0);
        assert_eq!(reg.regions()[2].id, 2);
    }

    #[test]
    fn test_navigation_cycles() {
        let mut reg = filled(&[(0, 1), (2, 3), (4, 5)], 10);
        assert_eq!(reg.current().unwrap().start, 0);
        assert_eq!(reg.next_match().unwrap().start, 2);
        assert_eq!(reg.next_match().unwrap().start, 4);
        // Third advance wraps back to the first.
        assert_eq!(reg.next_match().unwrap().start, 0);
    }

    #[test]
    fn test_previous_wraps() {
        let mut reg = filled(&[(0, 1), (2, 3), (4, 5)], 10);
        assert_eq!(reg.previous_match().unwrap().start, 4);
        assert_eq!(reg.previous_match().unwrap().start, 2);
        assert_eq!(reg.previous_match().unwrap().start, 0);
    }

    #[test]
    fn test_navigation_empty() {
        let mut reg = HighlightRegistry::new();
        assert!(matches!(reg.current(), Err(RegionError::NoRegions)));
        assert!(matches!(reg.next_match(), Err(RegionError::NoRegions)));
        assert!(matches!(reg.previous_match(), Err(RegionError::NoRegions)));
    }

    #[test]
    fn test_go_to() {
        let mut reg = filled(&[(0, 1), (2, 3), (4, 5)], 10);
        assert_eq!(reg.go_to(2).unwrap().start, 4);
        assert_eq!(reg.cursor(), 2);
        assert!(matches!(
            reg.go_to(3),
            Err(RegionError::BadIndex { index: 3, count: 3 })
        ));
        // Failed go_to leaves the cursor where it was.
        assert_eq!(reg.cursor(), 2);
    }

    #[test]
    fn test_clear_resets_cursor() {
        let mut reg = filled(&[(0, 1), (2, 3)], 10);
        reg.next_match().unwrap();
        reg.clear();
        assert!(reg.is_empty());
        assert_eq!(reg.cursor(), 0);
        // Ids keep counting after a clear.
        let r = reg.add(0, 1, 10).unwrap();
        assert_eq!(r.id, 2);
    }

    #[test]
    fn test_add_selection_uses_layout() {
        let layout = GridLayout::new(4);
        let mut reg = HighlightRegistry::new();
        let a = GridCoord::new(1, 2);
        let b = GridCoord::new(2, 1);
        let fwd = reg.add_selection(a, b, &layout, 10).unwrap();
        let rev = reg.add_selection(b, a, &layout, 10).unwrap();
        assert_eq!((fwd.start, fwd.end), (1, 5));
        assert_eq!((rev.start, rev.end), (1, 5));
    }

    #[test]
    fn test_export_empty() {
        let reg = HighlightRegistry::new();
        assert!(reg.export("seq", "ACGT").is_empty());
    }

    #[test]
    fn test_export_records() {
        let seq = "ACGTACGTAC";
        let mut reg = filled(&[(4, 8), (0, 3)], seq.len());
        reg.sort_regions();
        let records = reg.export("chr1", seq);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].start, 1);
        assert_eq!(records[0].end, 3);
        assert_eq!(records[0].fragment, "ACG");
        assert_eq!(records[1].start, 5);
        assert_eq!(records[1].end, 8);
        assert_eq!(records[1].fragment, "ACGT");
        assert!(records.iter().all(|r| r.name == "chr1"));
    }

    #[test]
    fn test_write_export_format() {
        let records = vec![
            ExportRecord {
                name: "chr1".into(),
                start: 1,
                end: 3,
                fragment: "ACG".into(),
            },
            ExportRecord {
                name: "chr1".into(),
                start: 5,
                end: 8,
                fragment: "ACGT".into(),
            },
        ];
        let mut out = Vec::new();
        write_export(&mut out, &records).unwrap();
        assert_eq!(out, b"chr1\t1\t3\tACG\nchr1\t5\t8\tACGT\n");
    }
}
