use super::Alphabet;
use std::fmt;

/// An ungapped biological sequence.
///
/// Sequences are read once at startup and never mutated afterwards; every
/// alignment row derived from a `Sequence` must ungap back to it exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// Residue symbols (never contains the gap symbol)
    data: Vec<u8>,
    /// Shared reference to alphabet
    alphabet: Alphabet,
}

impl Sequence {
    /// Create from a string, validating every symbol against the alphabet.
    ///
    /// Lowercase input is accepted and upcased.
    ///
    /// # Errors
    /// Returns an error if the string is empty or holds a symbol outside the
    /// alphabet.
    pub fn from_str(s: &str, alphabet: Alphabet) -> Result<Self, InvalidSequence> {
        if s.is_empty() {
            return Err(InvalidSequence::EmptySequence);
        }

        let data: Result<Vec<u8>, _> = s
            .bytes()
            .map(|b| {
                let upper = b.to_ascii_uppercase();
                if alphabet.contains(upper) {
                    Ok(upper)
                } else {
                    Err(InvalidSequence::InvalidChar(b as char))
                }
            })
            .collect();

        Ok(Self {
            data: data?,
            alphabet,
        })
    }

    /// Get length
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if empty
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get residue at position
    #[inline]
    pub fn get(&self, index: usize) -> Option<u8> {
        self.data.get(index).copied()
    }

    /// Get the raw residue bytes
    #[inline]
    pub fn residues(&self) -> &[u8] {
        &self.data
    }

    /// Get alphabet
    #[inline]
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.data {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}

/// Error type for failures when constructing a `Sequence`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidSequence {
    /// A character was not recognized as a symbol of the alphabet.
    InvalidChar(char),

    /// The sequence was empty when a non-empty sequence was required.
    EmptySequence,
}

impl fmt::Display for InvalidSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChar(c) => write!(f, "Invalid character in sequence: '{c}'"),
            Self::EmptySequence => write!(f, "Empty sequence not allowed"),
        }
    }
}

impl std::error::Error for InvalidSequence {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_from_str() {
        let seq = Sequence::from_str("ACGT", Alphabet::dna()).unwrap();
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.residues(), b"ACGT");
    }

    #[test]
    fn test_sequence_from_str_lowercase() {
        let seq = Sequence::from_str("acgt", Alphabet::dna()).unwrap();
        assert_eq!(seq.residues(), b"ACGT");
    }

    #[test]
    fn test_sequence_invalid_char() {
        let result = Sequence::from_str("ACXT", Alphabet::dna());
        assert_eq!(result.unwrap_err(), InvalidSequence::InvalidChar('X'));
    }

    #[test]
    fn test_sequence_gap_rejected() {
        // Gap symbols are alignment artifacts, never part of a sequence
        let result = Sequence::from_str("AC-T", Alphabet::dna());
        assert!(result.is_err());
    }

    #[test]
    fn test_sequence_empty() {
        let result = Sequence::from_str("", Alphabet::dna());
        assert_eq!(result.unwrap_err(), InvalidSequence::EmptySequence);
    }

    #[test]
    fn test_sequence_get() {
        let seq = Sequence::from_str("ACGT", Alphabet::dna()).unwrap();
        assert_eq!(seq.get(0), Some(b'A'));
        assert_eq!(seq.get(3), Some(b'T'));
        assert_eq!(seq.get(4), None);
    }

    #[test]
    fn test_sequence_display() {
        let seq = Sequence::from_str("ATATCCG", Alphabet::dna()).unwrap();
        assert_eq!(seq.to_string(), "ATATCCG");
    }

    #[test]
    fn test_sequence_protein() {
        let seq = Sequence::from_str("PHSWG", Alphabet::protein()).unwrap();
        assert_eq!(seq.alphabet().name(), "PROTEIN");
        assert_eq!(seq.len(), 5);
    }

    #[test]
    fn test_sequence_equality() {
        let seq1 = Sequence::from_str("ACGT", Alphabet::dna()).unwrap();
        let seq2 = Sequence::from_str("ACGT", Alphabet::dna()).unwrap();
        let seq3 = Sequence::from_str("ACGA", Alphabet::dna()).unwrap();
        assert_eq!(seq1, seq2);
        assert_ne!(seq1, seq3);
    }
}
