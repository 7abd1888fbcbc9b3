//! Pattern search over the raw sequence text.
//!
//! Patterns are full regular expressions, compiled case-insensitively so
//! `gaattc` finds `GAATTC`. Matching is non-overlapping leftmost-first,
//! the standard regex scan.

use regex::RegexBuilder;
use thiserror::Error;

/// Errors from pattern compilation.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("invalid search pattern: {0}")]
    BadPattern(#[from] regex::Error),
}

/// Result type for search operations.
pub type SearchResult<T> = Result<T, SearchError>;

/// Finds every match of `pattern` in `seq`, returning 0-based
/// `[start, end)` spans in ascending order.
///
/// Compilation happens before any scanning, so an invalid pattern fails
/// without producing partial results.
pub fn find_all(seq: &str, pattern: &str) -> SearchResult<Vec<(usize, usize)>> {
    let re = RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()?;
    Ok(re.find_iter(seq).map(|m| (m.start(), m.end())).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_pattern() {
        let spans = find_all("ggAAgg", "GG").unwrap();
        assert_eq!(spans, vec![(0, 2), (4, 6)]);
    }

    #[test]
    fn test_case_insensitive_both_ways() {
        assert_eq!(find_all("GAATTC", "gaattc").unwrap(), vec![(0, 6)]);
        assert_eq!(find_all("gaattc", "GAATTC").unwrap(), vec![(0, 6)]);
    }

    #[test]
    fn test_regex_pattern() {
        // EcoRI-like site with one ambiguous position.
        let spans = find_all("AAGAATTCAAGACTTCAA", "GA.TTC").unwrap();
        assert_eq!(spans, vec![(2, 8), (11, 17)]);
    }

    #[test]
    fn test_quantifier() {
        let spans = find_all("gggAAgg", "g+").unwrap();
        assert_eq!(spans, vec![(0, 3), (5, 7)]);
    }

    #[test]
    fn test_no_matches() {
        assert!(find_all("ACGT", "TTT").unwrap().is_empty());
    }

    #[test]
    fn test_bad_pattern_is_error() {
        assert!(matches!(
            find_all("ACGT", "(AC"),
            Err(SearchError::BadPattern(_))
        ));
    }

    #[test]
    fn test_zero_width_matches_reported() {
        // The caller decides what to do with empty spans.
        let spans = find_all("AA", "x*").unwrap();
        assert_eq!(spans, vec![(0, 0), (1, 1), (2, 2)]);
    }
}
