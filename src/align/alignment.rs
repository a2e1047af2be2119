use super::Row;
use crate::base::{Sequence, GAP};
use std::fmt;

/// Which end of a row padding gaps are added to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadSide {
    Leading,
    Trailing,
}

/// A rectangular multiple sequence alignment: one row per input sequence,
/// index-correlated with the sequence set.
///
/// Invariants maintained by every constructor and operator:
/// - all rows have identical length;
/// - no column is composed entirely of gaps;
/// - row `i`'s ungapped residues equal sequence `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    rows: Vec<Row>,
}

impl Alignment {
    /// Create from rows without normalization. Use `validate` before handing
    /// the result to scoring code.
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Build an alignment by giving every sequence a leading-gap offset,
    /// padding all rows to the maximum length and dropping gap-only columns.
    pub fn from_offsets(offsets: &[usize], sequences: &[Sequence]) -> Self {
        debug_assert_eq!(offsets.len(), sequences.len());

        let mut rows: Vec<Row> = offsets
            .iter()
            .zip(sequences.iter())
            .map(|(&offset, seq)| Row::with_offset(seq, offset))
            .collect();

        let max_len = rows.iter().map(Row::len).max().unwrap_or(0);
        for row in &mut rows {
            let missing = max_len - row.len();
            for _ in 0..missing {
                row.push(GAP);
            }
        }

        let mut alignment = Self { rows };
        alignment.drop_gap_only_columns();
        alignment
    }

    /// Number of rows.
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Check if the alignment has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column count (0 for an empty alignment).
    #[inline]
    pub fn n_columns(&self) -> usize {
        self.rows.first().map_or(0, Row::len)
    }

    /// Get a row by index.
    #[inline]
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Get all rows as a slice.
    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Check that every row has the same length.
    pub fn is_rectangular(&self) -> bool {
        let len = self.n_columns();
        self.rows.iter().all(|r| r.len() == len)
    }

    /// Rectangularity check at an operator boundary.
    ///
    /// A failure here indicates an operator bug; the run must abort rather
    /// than continue with corrupted data.
    pub fn validate(&self) -> Result<(), MalformedAlignment> {
        let expected = self.n_columns();
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != expected {
                return Err(MalformedAlignment {
                    row: i,
                    len: row.len(),
                    expected,
                });
            }
        }
        Ok(())
    }

    /// Check that row `i` ungaps to `sequences[i]` for every row.
    pub fn preserves_residues(&self, sequences: &[Sequence]) -> bool {
        self.rows.len() == sequences.len()
            && self
                .rows
                .iter()
                .zip(sequences.iter())
                .all(|(row, seq)| row.preserves(seq))
    }

    /// Pad every row with gaps to `target_len` on the given side.
    ///
    /// # Errors
    /// Fails if any row is already longer than `target_len`.
    pub fn pad_to(&mut self, target_len: usize, side: PadSide) -> Result<(), MalformedAlignment> {
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() > target_len {
                return Err(MalformedAlignment {
                    row: i,
                    len: row.len(),
                    expected: target_len,
                });
            }
        }

        for row in &mut self.rows {
            let missing = target_len - row.len();
            if missing == 0 {
                continue;
            }
            let symbols = row.symbols_mut();
            match side {
                PadSide::Trailing => symbols.resize(target_len, GAP),
                PadSide::Leading => {
                    symbols.splice(0..0, std::iter::repeat(GAP).take(missing));
                }
            }
        }
        Ok(())
    }

    /// Pad every row with trailing gaps to the length of the longest row.
    pub fn normalize_lengths(&mut self) {
        let max_len = self.rows.iter().map(Row::len).max().unwrap_or(0);
        // Cannot fail: target is the maximum of all row lengths.
        let _ = self.pad_to(max_len, PadSide::Trailing);
    }

    /// Remove every column where all rows hold the gap symbol, preserving the
    /// relative order of the kept columns. Idempotent.
    ///
    /// Applied after every structural edit so the no-all-gap-column invariant
    /// holds before an alignment leaves an operator.
    pub fn drop_gap_only_columns(&mut self) {
        let n_cols = self.n_columns();
        if n_cols == 0 || self.rows.is_empty() {
            return;
        }

        let keep: Vec<bool> = (0..n_cols)
            .map(|col| self.rows.iter().any(|row| row.get(col) != Some(GAP)))
            .collect();

        if keep.iter().all(|&k| k) {
            return;
        }

        for row in &mut self.rows {
            let mut col = 0;
            row.symbols_mut().retain(|_| {
                let kept = keep[col];
                col += 1;
                kept
            });
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

/// Error raised when a row-length mismatch is detected by an invariant check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MalformedAlignment {
    /// Index of the offending row
    pub row: usize,
    /// Its actual length
    pub len: usize,
    /// The length it was required to have
    pub expected: usize,
}

impl fmt::Display for MalformedAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Malformed alignment: row {} has length {} (expected {})",
            self.row, self.len, self.expected
        )
    }
}

impl std::error::Error for MalformedAlignment {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Alphabet;

    fn seqs(strs: &[&str]) -> Vec<Sequence> {
        strs.iter()
            .map(|s| Sequence::from_str(s, Alphabet::dna()).unwrap())
            .collect()
    }

    fn alignment(rows: &[&str]) -> Alignment {
        Alignment::new(rows.iter().map(|&r| Row::from(r)).collect())
    }

    #[test]
    fn test_from_offsets() {
        let sequences = seqs(&["ACGT", "GG"]);
        let a = Alignment::from_offsets(&[2, 0], &sequences);

        assert_eq!(a.row(0).unwrap().to_string(), "--ACGT");
        assert_eq!(a.row(1).unwrap().to_string(), "GG----");
        assert!(a.is_rectangular());
        assert!(a.preserves_residues(&sequences));
    }

    #[test]
    fn test_from_offsets_drops_shared_leading_gaps() {
        let sequences = seqs(&["AC", "GT"]);
        // Both rows start with two gaps: those columns are all-gap and vanish
        let a = Alignment::from_offsets(&[2, 2], &sequences);
        assert_eq!(a.row(0).unwrap().to_string(), "AC");
        assert_eq!(a.row(1).unwrap().to_string(), "GT");
    }

    #[test]
    fn test_drop_gap_only_columns() {
        let mut a = alignment(&["A--C", "G--T"]);
        a.drop_gap_only_columns();
        assert_eq!(a.row(0).unwrap().to_string(), "AC");
        assert_eq!(a.row(1).unwrap().to_string(), "GT");
    }

    #[test]
    fn test_drop_gap_only_columns_keeps_mixed() {
        let mut a = alignment(&["A-C", "GT-"]);
        a.drop_gap_only_columns();
        assert_eq!(a.row(0).unwrap().to_string(), "A-C");
        assert_eq!(a.row(1).unwrap().to_string(), "GT-");
    }

    #[test]
    fn test_drop_gap_only_columns_idempotent() {
        let mut once = alignment(&["-A--C-", "-G--T-"]);
        once.drop_gap_only_columns();
        let mut twice = once.clone();
        twice.drop_gap_only_columns();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_pad_to_trailing() {
        let mut a = alignment(&["AC", "G"]);
        a.pad_to(4, PadSide::Trailing).unwrap();
        assert_eq!(a.row(0).unwrap().to_string(), "AC--");
        assert_eq!(a.row(1).unwrap().to_string(), "G---");
    }

    #[test]
    fn test_pad_to_leading() {
        let mut a = alignment(&["AC", "G"]);
        a.pad_to(3, PadSide::Leading).unwrap();
        assert_eq!(a.row(0).unwrap().to_string(), "-AC");
        assert_eq!(a.row(1).unwrap().to_string(), "--G");
    }

    #[test]
    fn test_pad_to_row_too_long() {
        let mut a = alignment(&["ACGT", "G"]);
        let err = a.pad_to(3, PadSide::Trailing).unwrap_err();
        assert_eq!(err.row, 0);
        assert_eq!(err.len, 4);
    }

    #[test]
    fn test_validate() {
        assert!(alignment(&["AC", "GT"]).validate().is_ok());

        let err = alignment(&["AC", "GTT"]).validate().unwrap_err();
        assert_eq!(err.row, 1);
        assert_eq!(err.expected, 2);
    }

    #[test]
    fn test_preserves_residues() {
        let sequences = seqs(&["ACGT", "GG"]);
        let good = alignment(&["A-CGT", "-GG--"]);
        let bad = alignment(&["A-CGT", "-GC--"]);
        assert!(good.preserves_residues(&sequences));
        assert!(!bad.preserves_residues(&sequences));
    }

    #[test]
    fn test_normalize_lengths() {
        let mut a = alignment(&["ACGT", "GG"]);
        a.normalize_lengths();
        assert!(a.is_rectangular());
        assert_eq!(a.row(1).unwrap().to_string(), "GG--");
    }

    #[test]
    fn test_display() {
        let a = alignment(&["A-C", "G-T"]);
        assert_eq!(a.to_string(), "A-C\nG-T\n");
    }
}
