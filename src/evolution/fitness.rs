use crate::align::{Alignment, PairwiseAligner, SubstitutionMatrix};
use rayon::prelude::*;
use std::sync::Arc;

/// Sum-of-pairs fitness for a full alignment.
///
/// The score of an alignment is the column-wise pair score summed over every
/// unordered pair of rows: gap against anything (including gap against gap)
/// costs the gap penalty, residue pairs score through the substitution
/// matrix. Pure function of the alignment's symbol content and the shared
/// read-only matrix; O(n² · L) for n rows of length L.
#[derive(Debug, Clone)]
pub struct SumOfPairs {
    matrix: Arc<SubstitutionMatrix>,
}

impl SumOfPairs {
    pub fn new(matrix: Arc<SubstitutionMatrix>) -> Self {
        Self { matrix }
    }

    /// The shared substitution matrix.
    pub fn matrix(&self) -> &Arc<SubstitutionMatrix> {
        &self.matrix
    }

    /// Score one alignment.
    pub fn score(&self, alignment: &Alignment) -> f64 {
        let aligner = PairwiseAligner::new(&self.matrix);
        let rows = alignment.rows();

        let mut total = 0.0;
        for i in 0..rows.len() {
            for j in (i + 1)..rows.len() {
                total += aligner.score_gapped_pair(&rows[i], &rows[j]);
            }
        }
        total
    }

    /// Score a batch of alignments in parallel.
    ///
    /// Safe to parallelize: scoring reads only the immutable alignments and
    /// the shared read-only matrix.
    pub fn score_all(&self, alignments: &[Alignment]) -> Vec<f64> {
        alignments.par_iter().map(|a| self.score(a)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::Row;
    use crate::base::Alphabet;

    fn evaluator() -> SumOfPairs {
        SumOfPairs::new(Arc::new(SubstitutionMatrix::match_mismatch(
            1.0,
            -1.0,
            -2.0,
            Alphabet::dna(),
        )))
    }

    fn alignment(rows: &[&str]) -> Alignment {
        Alignment::new(rows.iter().map(|&r| Row::from(r)).collect())
    }

    #[test]
    fn test_score_two_rows() {
        let eval = evaluator();
        // ACGT / ACGA: 3 matches + 1 mismatch
        assert_eq!(eval.score(&alignment(&["ACGT", "ACGA"])), 2.0);
    }

    #[test]
    fn test_score_with_gaps() {
        let eval = evaluator();
        // A-C / AGC: match + gap + match
        assert_eq!(eval.score(&alignment(&["A-C", "AGC"])), 0.0);
    }

    #[test]
    fn test_score_three_rows_sums_all_pairs() {
        let eval = evaluator();
        let a = alignment(&["AC", "AC", "AC"]);
        // Three identical pairs, each worth 2
        assert_eq!(eval.score(&a), 6.0);
    }

    #[test]
    fn test_score_symmetry() {
        // Sum-of-pairs must not depend on row order
        let eval = evaluator();
        let a = alignment(&["A-CG", "ACG-", "-ACG"]);
        let b = alignment(&["-ACG", "A-CG", "ACG-"]);
        assert_eq!(eval.score(&a), eval.score(&b));
    }

    #[test]
    fn test_score_can_be_negative() {
        let eval = evaluator();
        let a = alignment(&["A---", "---A"]);
        assert!(eval.score(&a) < 0.0);
    }

    #[test]
    fn test_score_single_row_is_zero() {
        let eval = evaluator();
        assert_eq!(eval.score(&alignment(&["ACGT"])), 0.0);
    }

    #[test]
    fn test_score_all_matches_sequential() {
        let eval = evaluator();
        let batch = vec![
            alignment(&["ACGT", "ACGA"]),
            alignment(&["A-C", "AGC"]),
            alignment(&["AC", "AC", "AC"]),
        ];

        let parallel = eval.score_all(&batch);
        let sequential: Vec<f64> = batch.iter().map(|a| eval.score(a)).collect();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_score_deterministic() {
        let eval = evaluator();
        let a = alignment(&["AT-AT", "-TCAT", "ATC--"]);
        assert_eq!(eval.score(&a), eval.score(&a));
    }
}
