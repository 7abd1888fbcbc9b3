//! Reversible sequence transformations.
//!
//! All three operations are total over the display alphabet: A/C/G/T in
//! either case complement to their partner with case preserved, and any
//! other character (N, gaps, IUPAC ambiguity codes) passes through
//! unchanged, staying at its mirrored place.
//!
//! `complement` and `reverse` are involutions, and so is their composition
//! `reverse_complement`; applying any of them twice restores the input.

/// A transformation selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformOp {
    /// Reverse base order.
    Reverse,
    /// Complement each base in place.
    Complement,
    /// Complement and reverse in a single pass.
    ReverseComplement,
}

impl TransformOp {
    /// Applies the operation, producing the new sequence string.
    pub fn apply(&self, seq: &str) -> String {
        match self {
            TransformOp::Reverse => reverse(seq),
            TransformOp::Complement => complement(seq),
            TransformOp::ReverseComplement => reverse_complement(seq),
        }
    }

    /// Human-readable name for status messages.
    pub fn label(&self) -> &'static str {
        match self {
            TransformOp::Reverse => "reverse",
            TransformOp::Complement => "complement",
            TransformOp::ReverseComplement => "reverse-complement",
        }
    }
}

/// Watson-Crick complement of one base, case preserved; anything outside
/// A/C/G/T (either case) is returned unchanged.
pub fn complement_base(base: char) -> char {
    match base {
        'A' => 'T',
        'T' => 'A',
        'C' => 'G',
        'G' => 'C',
        'a' => 't',
        't' => 'a',
        'c' => 'g',
        'g' => 'c',
        _ => base,
    }
}

/// Complements every base, preserving order and length.
pub fn complement(seq: &str) -> String {
    seq.chars().map(complement_base).collect()
}

/// Reverses base order, preserving length.
pub fn reverse(seq: &str) -> String {
    seq.chars().rev().collect()
}

/// Reverse complement in a single pass, equivalent to
/// `reverse(&complement(seq))`.
pub fn reverse_complement(seq: &str) -> String {
    seq.chars().rev().map(complement_base).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complement() {
        assert_eq!(complement("ACGTACGT"), "TGCATGCA");
        assert_eq!(complement("AAAACCCC"), "TTTTGGGG");
    }

    #[test]
    fn test_reverse() {
        assert_eq!(reverse("AACG"), "GCAA");
        assert_eq!(reverse(""), "");
    }

    #[test]
    fn test_reverse_complement() {
        assert_eq!(reverse_complement("AAAACCCC"), "GGGGTTTT");
        // Palindromic input maps to itself.
        assert_eq!(reverse_complement("ACGTACGT"), "ACGTACGT");
        assert_eq!(reverse_complement("ATGC"), "GCAT");
    }

    #[test]
    fn test_single_pass_matches_composition() {
        let seq = "AcGtTTga-NryACGT";
        assert_eq!(reverse_complement(seq), reverse(&complement(seq)));
    }

    #[test]
    fn test_involutions() {
        let seq = "AAcgTN-tGrC";
        assert_eq!(complement(&complement(seq)), seq);
        assert_eq!(reverse(&reverse(seq)), seq);
        assert_eq!(reverse_complement(&reverse_complement(seq)), seq);
    }

    #[test]
    fn test_case_preserved() {
        assert_eq!(complement("aAcCgGtT"), "tTgGcCaA");
        assert_eq!(reverse_complement("aAcCgG"), "CcGgTt");
    }

    #[test]
    fn test_unrecognized_pass_through() {
        // The complement leaves unknown characters at their position.
        assert_eq!(complement("A-C*G"), "T-G*C");
        assert_eq!(complement("NNNN"), "NNNN");
        // IUPAC ambiguity codes are not resolved, only carried to the
        // mirrored position.
        assert_eq!(reverse_complement("ARC"), "GRT");
    }

    #[test]
    fn test_length_preserved() {
        let seq = "ACGTNNNacgt--";
        assert_eq!(complement(seq).len(), seq.len());
        assert_eq!(reverse(seq).len(), seq.len());
        assert_eq!(reverse_complement(seq).len(), seq.len());
    }

    #[test]
    fn test_apply_dispatch() {
        assert_eq!(TransformOp::Reverse.apply("AACG"), "GCAA");
        assert_eq!(TransformOp::Complement.apply("AACG"), "TTGC");
        assert_eq!(TransformOp::ReverseComplement.apply("AAAACCCC"), "GGGGTTTT");
    }

    #[test]
    fn test_labels() {
        assert_eq!(TransformOp::ReverseComplement.label(), "reverse-complement");
    }
}
