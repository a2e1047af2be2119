use crate::base::{Sequence, GAP};
use std::fmt;

/// One row of an alignment: residue symbols interleaved with gap symbols.
///
/// A row derived from a `Sequence` must always ungap back to that sequence;
/// operators move gap symbols around but never touch residues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    symbols: Vec<u8>,
}

impl Row {
    /// Create a row from raw symbols.
    pub fn new(symbols: Vec<u8>) -> Self {
        Self { symbols }
    }

    /// Create a row as `gap × offset` followed by the sequence's residues.
    pub fn with_offset(sequence: &Sequence, offset: usize) -> Self {
        let mut symbols = Vec::with_capacity(offset + sequence.len());
        symbols.resize(offset, GAP);
        symbols.extend_from_slice(sequence.residues());
        Self { symbols }
    }

    /// Get length
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if empty
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Get symbol at position
    #[inline]
    pub fn get(&self, index: usize) -> Option<u8> {
        self.symbols.get(index).copied()
    }

    /// Get all symbols as a slice
    #[inline]
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Count of non-gap symbols.
    pub fn residue_count(&self) -> usize {
        self.symbols.iter().filter(|&&s| s != GAP).count()
    }

    /// Count of gap symbols before the first residue.
    pub fn leading_gap_offset(&self) -> usize {
        self.symbols.iter().take_while(|&&s| s == GAP).count()
    }

    /// The row's residues with every gap removed.
    pub fn residues(&self) -> Vec<u8> {
        self.symbols.iter().copied().filter(|&s| s != GAP).collect()
    }

    /// Smallest prefix length containing exactly `n` non-gap symbols.
    ///
    /// Returns the full row length if `n` exceeds the total residue count;
    /// this is the defined edge-case policy, not an error.
    pub fn index_after_residue(&self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        let mut seen = 0;
        for (i, &s) in self.symbols.iter().enumerate() {
            if s != GAP {
                seen += 1;
                if seen == n {
                    return i + 1;
                }
            }
        }
        self.symbols.len()
    }

    /// Maximal runs of at least `min_len` consecutive gap symbols,
    /// as half-open `(start, end)` ranges.
    pub fn gap_blocks(&self, min_len: usize) -> Vec<(usize, usize)> {
        let mut blocks = Vec::new();
        let mut i = 0;
        while i < self.symbols.len() {
            if self.symbols[i] == GAP {
                let start = i;
                while i < self.symbols.len() && self.symbols[i] == GAP {
                    i += 1;
                }
                if i - start >= min_len {
                    blocks.push((start, i));
                }
            } else {
                i += 1;
            }
        }
        blocks
    }

    /// Check that the row's ungapped residues equal the given sequence.
    pub fn preserves(&self, sequence: &Sequence) -> bool {
        self.residues() == sequence.residues()
    }

    pub(crate) fn push(&mut self, symbol: u8) {
        self.symbols.push(symbol);
    }

    pub(crate) fn symbols_mut(&mut self) -> &mut Vec<u8> {
        &mut self.symbols
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &s in &self.symbols {
            write!(f, "{}", s as char)?;
        }
        Ok(())
    }
}

impl From<&str> for Row {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Alphabet;

    #[test]
    fn test_row_with_offset() {
        let seq = Sequence::from_str("ACGT", Alphabet::dna()).unwrap();
        let row = Row::with_offset(&seq, 3);
        assert_eq!(row.to_string(), "---ACGT");
        assert_eq!(row.leading_gap_offset(), 3);
    }

    #[test]
    fn test_row_zero_offset() {
        let seq = Sequence::from_str("ACGT", Alphabet::dna()).unwrap();
        let row = Row::with_offset(&seq, 0);
        assert_eq!(row.to_string(), "ACGT");
        assert_eq!(row.leading_gap_offset(), 0);
    }

    #[test]
    fn test_residue_count() {
        let row = Row::from("-A-CG--T-");
        assert_eq!(row.residue_count(), 4);
        assert_eq!(Row::from("----").residue_count(), 0);
        assert_eq!(Row::from("ACGT").residue_count(), 4);
    }

    #[test]
    fn test_residues() {
        let row = Row::from("-A-CG--T-");
        assert_eq!(row.residues(), b"ACGT");
    }

    #[test]
    fn test_leading_gap_offset_all_gaps() {
        assert_eq!(Row::from("----").leading_gap_offset(), 4);
    }

    #[test]
    fn test_index_after_residue() {
        let row = Row::from("-A-CG--T");
        assert_eq!(row.index_after_residue(0), 0);
        assert_eq!(row.index_after_residue(1), 2); // "-A"
        assert_eq!(row.index_after_residue(2), 4); // "-A-C"
        assert_eq!(row.index_after_residue(3), 5); // "-A-CG"
        assert_eq!(row.index_after_residue(4), 8); // whole row
    }

    #[test]
    fn test_index_after_residue_exceeds_total() {
        // n beyond the residue count returns the full length, by policy
        let row = Row::from("-A-CG--T");
        assert_eq!(row.index_after_residue(5), 8);
        assert_eq!(row.index_after_residue(100), 8);
    }

    #[test]
    fn test_gap_blocks() {
        let row = Row::from("--A---C-G");
        assert_eq!(row.gap_blocks(2), vec![(0, 2), (3, 6)]);
    }

    #[test]
    fn test_gap_blocks_none() {
        let row = Row::from("A-C-G-T");
        assert!(row.gap_blocks(2).is_empty());
    }

    #[test]
    fn test_gap_blocks_trailing() {
        let row = Row::from("ACG----");
        assert_eq!(row.gap_blocks(2), vec![(3, 7)]);
    }

    #[test]
    fn test_preserves() {
        let seq = Sequence::from_str("ACGT", Alphabet::dna()).unwrap();
        assert!(Row::from("-A-CG--T-").preserves(&seq));
        assert!(!Row::from("-A-CG--A-").preserves(&seq));
        assert!(!Row::from("-A-CG---").preserves(&seq));
    }
}
