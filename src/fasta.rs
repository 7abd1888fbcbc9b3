//! Sequence loading and saving.
//!
//! seqview displays a single sequence. Input is either a one-record FASTA
//! file (a `>` header line followed by sequence lines) or plain sequence
//! text with no header at all. Only the first record is kept; anything
//! after a second `>` header is discarded.

use std::ffi::OsStr;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use thiserror::Error;

use crate::model::Sequence;

/// Errors raised while loading sequence text.
#[derive(Error, Debug)]
pub enum FastaError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("empty input: no sequence text")]
    EmptyInput,

    #[error("header \"{0}\" has no sequence data after it")]
    NoSequenceData(String),

    #[error("sequence data contains non-ASCII character {0:?}")]
    NonAsciiData(char),
}

/// Result type for loading operations.
pub type FastaResult<T> = Result<T, FastaError>;

/// Parses sequence text into a [`Sequence`] wrapped at `row_width`.
///
/// If the first non-blank line starts with `>`, the rest of that line
/// becomes the sequence name; otherwise the name is `fallback_name` and
/// the whole input is sequence. Line terminators and embedded whitespace
/// are stripped from the bases.
///
/// Every position in the viewer is a byte offset into the bases, so the
/// sequence data must be ASCII; any other character is rejected. The
/// header line is free text and carries no such restriction.
pub fn parse_sequence(
    content: &str,
    fallback_name: &str,
    row_width: usize,
) -> FastaResult<Sequence> {
    let mut name: Option<String> = None;
    let mut data = String::new();
    let mut first = true;

    for raw_line in content.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        if first {
            first = false;
            if let Some(header) = line.strip_prefix('>') {
                name = Some(header.trim().to_string());
                continue;
            }
        } else if line.starts_with('>') {
            // Second record: out of scope, stop here.
            break;
        }
        for c in line.chars().filter(|c| !c.is_whitespace()) {
            if !c.is_ascii() {
                return Err(FastaError::NonAsciiData(c));
            }
            data.push(c);
        }
    }

    if data.is_empty() {
        return match name {
            Some(header) => Err(FastaError::NoSequenceData(header)),
            None => Err(FastaError::EmptyInput),
        };
    }

    let name = name.unwrap_or_else(|| fallback_name.to_string());
    Ok(Sequence::from_parts(name, data, row_width))
}

/// Reads a sequence from `path`. Headerless files are named after the
/// file stem.
pub fn read_fasta_file<P: AsRef<Path>>(path: P, row_width: usize) -> FastaResult<Sequence> {
    let content = fs::read_to_string(&path)?;
    let fallback = path
        .as_ref()
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or("sequence");
    parse_sequence(&content, fallback, row_width)
}

/// Writes the sequence as FASTA: one header line, then body lines wrapped
/// at the sequence's display row width.
pub fn write_fasta<W: Write>(out: &mut W, seq: &Sequence) -> io::Result<()> {
    writeln!(out, ">{}", seq.id)?;
    for chunk in seq.as_bytes().chunks(seq.row_width()) {
        out.write_all(chunk)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_with_header() {
        let seq = parse_sequence(">chr1 test\nACGT\nACGT\n", "fb", 60).unwrap();
        assert_eq!(seq.id, "chr1 test");
        assert_eq!(seq.as_str(), "ACGTACGT");
        assert_eq!(seq.len(), 8);
    }

    #[test]
    fn test_parse_without_header() {
        let seq = parse_sequence("ACGT\nTTAA\n", "plasmid", 60).unwrap();
        assert_eq!(seq.id, "plasmid");
        assert_eq!(seq.as_str(), "ACGTTTAA");
    }

    #[test]
    fn test_parse_crlf_and_blank_lines() {
        let seq = parse_sequence(">s\r\n\r\nAC GT\r\ntt\r\n", "fb", 60).unwrap();
        assert_eq!(seq.id, "s");
        assert_eq!(seq.as_str(), "ACGTtt");
    }

    #[test]
    fn test_parse_keeps_first_record_only() {
        let seq = parse_sequence(">one\nACGT\n>two\nTTTT\n", "fb", 60).unwrap();
        assert_eq!(seq.id, "one");
        assert_eq!(seq.as_str(), "ACGT");
    }

    #[test]
    fn test_parse_empty_header_name() {
        let seq = parse_sequence(">\nACGT\n", "fb", 60).unwrap();
        assert_eq!(seq.id, "");
        assert_eq!(seq.as_str(), "ACGT");
    }

    #[test]
    fn test_parse_case_preserved() {
        let seq = parse_sequence(">s\nacgtACGT\n", "fb", 60).unwrap();
        assert_eq!(seq.as_str(), "acgtACGT");
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(matches!(
            parse_sequence("", "fb", 60),
            Err(FastaError::EmptyInput)
        ));
        assert!(matches!(
            parse_sequence("  \n\n  ", "fb", 60),
            Err(FastaError::EmptyInput)
        ));
    }

    #[test]
    fn test_parse_rejects_non_ascii_data() {
        // "ACGTé" at width 5 would put a row boundary inside the 'é'
        // bytes; such data must never become a Sequence.
        assert!(matches!(
            parse_sequence(">s\nACGTé\n", "fb", 5),
            Err(FastaError::NonAsciiData('é'))
        ));
        assert!(matches!(
            parse_sequence("ACGT\u{e9}ACGT\n", "fb", 60),
            Err(FastaError::NonAsciiData('\u{e9}'))
        ));
    }

    #[test]
    fn test_parse_allows_non_ascii_header() {
        // Header text is never indexed by position, only displayed.
        let seq = parse_sequence(">séq π\nACGT\n", "fb", 60).unwrap();
        assert_eq!(seq.id, "séq π");
        assert_eq!(seq.as_str(), "ACGT");
    }

    #[test]
    fn test_parse_header_without_data() {
        assert!(matches!(
            parse_sequence(">lonely\n", "fb", 60),
            Err(FastaError::NoSequenceData(h)) if h == "lonely"
        ));
    }

    #[test]
    fn test_read_fasta_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, ">chrM").unwrap();
        writeln!(file, "GATCACAGGT").unwrap();
        writeln!(file, "CTATCACCCT").unwrap();
        let seq = read_fasta_file(file.path(), 60).unwrap();
        assert_eq!(seq.id, "chrM");
        assert_eq!(seq.len(), 20);
    }

    #[test]
    fn test_read_missing_file() {
        assert!(matches!(
            read_fasta_file("/nonexistent/path.fa", 60),
            Err(FastaError::Io(_))
        ));
    }

    #[test]
    fn test_write_fasta_wraps_at_row_width() {
        let seq = Sequence::from_parts("s", "ACGTACGTAC", 4);
        let mut out = Vec::new();
        write_fasta(&mut out, &seq).unwrap();
        assert_eq!(out, b">s\nACGT\nACGT\nAC\n");
    }

    #[test]
    fn test_roundtrip_through_text() {
        let seq = Sequence::from_parts("plasmid", "ACGTACGTACGTACGT", 5);
        let mut out = Vec::new();
        write_fasta(&mut out, &seq).unwrap();
        let text = String::from_utf8(out).unwrap();
        let back = parse_sequence(&text, "fb", 5).unwrap();
        assert_eq!(back.id, seq.id);
        assert_eq!(back.as_str(), seq.as_str());
    }
}
