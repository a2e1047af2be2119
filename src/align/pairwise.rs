use super::{Row, SubstitutionMatrix};
use crate::base::{Sequence, GAP};
use std::fmt;

/// Result of a global pairwise alignment: the optimal score and the two
/// gapped rows reconstructed from the traceback.
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseAlignment {
    pub score: f64,
    pub row_a: Row,
    pub row_b: Row,
}

/// Traceback moves, one per DP cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trace {
    Diagonal,
    Up,
    Left,
}

/// Needleman-Wunsch global aligner over a shared substitution matrix.
///
/// `S[i][j]` is the optimal score aligning the first `i` symbols of A with the
/// first `j` of B; row 0 and column 0 hold cumulative gap penalties. Ties in
/// the recurrence are broken with the fixed priority diagonal > up > left, so
/// a given input always reconstructs the same alignment.
#[derive(Debug, Clone)]
pub struct PairwiseAligner<'m> {
    matrix: &'m SubstitutionMatrix,
}

impl<'m> PairwiseAligner<'m> {
    pub fn new(matrix: &'m SubstitutionMatrix) -> Self {
        Self { matrix }
    }

    /// Column score for two already-aligned symbols: gap on either side costs
    /// the gap penalty, otherwise the substitution score applies.
    #[inline]
    pub fn score_position(&self, a: u8, b: u8) -> f64 {
        if a == GAP || b == GAP {
            self.matrix.gap_penalty()
        } else {
            self.matrix.score(a, b)
        }
    }

    /// Column-wise score of an already-gapped pair of rows.
    ///
    /// This is the primitive the sum-of-pairs MSA objective reduces to.
    pub fn score_gapped_pair(&self, row_a: &Row, row_b: &Row) -> f64 {
        row_a
            .symbols()
            .iter()
            .zip(row_b.symbols().iter())
            .map(|(&a, &b)| self.score_position(a, b))
            .sum()
    }

    /// Compute the optimal global alignment of two ungapped sequences.
    ///
    /// # Errors
    /// Fails with `AlignError::IncompatibleAlphabets` if the sequences use
    /// different alphabets. The failure is fatal to this pairwise call only,
    /// not to a surrounding run.
    pub fn align(&self, seq_a: &Sequence, seq_b: &Sequence) -> Result<PairwiseAlignment, AlignError> {
        if seq_a.alphabet() != seq_b.alphabet() {
            return Err(AlignError::IncompatibleAlphabets {
                left: seq_a.alphabet().name().to_string(),
                right: seq_b.alphabet().name().to_string(),
            });
        }

        let a = seq_a.residues();
        let b = seq_b.residues();
        let g = self.matrix.gap_penalty();
        let cols = b.len() + 1;

        // Score and traceback tables, flattened row-major
        let mut scores = vec![0.0f64; (a.len() + 1) * cols];
        let mut traces = vec![Trace::Diagonal; (a.len() + 1) * cols];

        for j in 1..=b.len() {
            scores[j] = g * j as f64;
            traces[j] = Trace::Left;
        }
        for i in 1..=a.len() {
            scores[i * cols] = g * i as f64;
            traces[i * cols] = Trace::Up;
        }

        for i in 1..=a.len() {
            for j in 1..=b.len() {
                let diag = scores[(i - 1) * cols + (j - 1)] + self.matrix.score(a[i - 1], b[j - 1]);
                let up = scores[(i - 1) * cols + j] + g;
                let left = scores[i * cols + (j - 1)] + g;

                // Tie priority: diagonal > up > left
                let (best, trace) = if diag >= up && diag >= left {
                    (diag, Trace::Diagonal)
                } else if up >= left {
                    (up, Trace::Up)
                } else {
                    (left, Trace::Left)
                };

                scores[i * cols + j] = best;
                traces[i * cols + j] = trace;
            }
        }

        // Walk the traceback from (|A|, |B|) back to (0, 0)
        let mut row_a = Vec::new();
        let mut row_b = Vec::new();
        let (mut i, mut j) = (a.len(), b.len());
        while i > 0 || j > 0 {
            match traces[i * cols + j] {
                Trace::Diagonal => {
                    i -= 1;
                    j -= 1;
                    row_a.push(a[i]);
                    row_b.push(b[j]);
                }
                Trace::Up => {
                    i -= 1;
                    row_a.push(a[i]);
                    row_b.push(GAP);
                }
                Trace::Left => {
                    j -= 1;
                    row_a.push(GAP);
                    row_b.push(b[j]);
                }
            }
        }
        row_a.reverse();
        row_b.reverse();

        Ok(PairwiseAlignment {
            score: scores[a.len() * cols + b.len()],
            row_a: Row::new(row_a),
            row_b: Row::new(row_b),
        })
    }
}

/// Errors that can occur during pairwise alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlignError {
    /// The two sequences use different alphabets
    IncompatibleAlphabets { left: String, right: String },
}

impl fmt::Display for AlignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncompatibleAlphabets { left, right } => {
                write!(f, "Cannot align sequences of different biotypes: {left} vs {right}")
            }
        }
    }
}

impl std::error::Error for AlignError {}
