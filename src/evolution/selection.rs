use rand::Rng;
use std::fmt;

/// Fitness-proportional parent sampling.
///
/// Sum-of-pairs scores can be negative, so when any score is zero or below
/// every score is shifted by `min - 1`, making all weights strictly positive.
/// Draws are independent and with replacement; each index is returned with
/// probability proportional to its adjusted score.
///
/// # Errors
/// Fails with `EmptyPopulation` when `scores` is empty and with
/// `DegenerateWeights` when the adjusted weights cannot form a distribution
/// (zero or non-finite total).
pub fn sample_parents<R: Rng + ?Sized>(
    scores: &[f64],
    n_draws: usize,
    rng: &mut R,
) -> Result<Vec<usize>, SelectionError> {
    if scores.is_empty() {
        return Err(SelectionError::EmptyPopulation);
    }

    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let adjusted: Vec<f64> = if min <= 0.0 {
        scores.iter().map(|&s| s - min + 1.0).collect()
    } else {
        scores.to_vec()
    };

    let total: f64 = adjusted.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return Err(SelectionError::DegenerateWeights { total });
    }

    // Cumulative distribution, sampled by inversion
    let cumulative: Vec<f64> = adjusted
        .iter()
        .scan(0.0, |acc, &w| {
            *acc += w;
            Some(*acc)
        })
        .collect();

    let draws = (0..n_draws)
        .map(|_| {
            let r = rng.random::<f64>() * total;
            cumulative
                .iter()
                .position(|&c| c >= r)
                .unwrap_or(scores.len() - 1)
        })
        .collect();

    Ok(draws)
}

/// Errors that can occur during parent selection. Both are fatal to the run
/// and surfaced to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionError {
    /// The population holds no individuals
    EmptyPopulation,
    /// The adjusted weights do not form a valid distribution
    DegenerateWeights { total: f64 },
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPopulation => write!(f, "Cannot select parents from an empty population"),
            Self::DegenerateWeights { total } => {
                write!(f, "Degenerate selection weights (total = {total})")
            }
        }
    }
}

impl std::error::Error for SelectionError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn test_sample_parents_basic() {
        let scores = vec![1.0, 2.0, 3.0];
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);

        let draws = sample_parents(&scores, 100, &mut rng).unwrap();
        assert_eq!(draws.len(), 100);
        assert!(draws.iter().all(|&i| i < 3));
    }

    #[test]
    fn test_sample_parents_negative_scores() {
        // Negative scores are shifted positive before weighting
        let scores = vec![-30.0, -10.0, -20.0];
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);

        let draws = sample_parents(&scores, 200, &mut rng).unwrap();
        assert!(draws.iter().all(|&i| i < 3));
        // The least-bad individual carries the largest weight (21 of 36)
        let best_count = draws.iter().filter(|&&i| i == 1).count();
        let worst_count = draws.iter().filter(|&&i| i == 0).count();
        assert!(best_count > worst_count);
    }

    #[test]
    fn test_sample_parents_prefers_fitter() {
        let scores = vec![1.0, 100.0];
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);

        let draws = sample_parents(&scores, 500, &mut rng).unwrap();
        let fit_count = draws.iter().filter(|&&i| i == 1).count();
        assert!(fit_count > 400);
    }

    #[test]
    fn test_sample_parents_identical_scores() {
        // Zero score variance is degenerate-but-valid: after shifting, all
        // weights are equal and sampling must not fail.
        let scores = vec![0.0, 0.0, 0.0, 0.0];
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);

        let draws = sample_parents(&scores, 100, &mut rng).unwrap();
        assert_eq!(draws.len(), 100);
        assert!(draws.iter().all(|&i| i < 4));
    }

    #[test]
    fn test_sample_parents_empty_population() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let err = sample_parents(&[], 1, &mut rng).unwrap_err();
        assert_eq!(err, SelectionError::EmptyPopulation);
    }

    #[test]
    fn test_sample_parents_non_finite_scores() {
        let scores = vec![f64::NAN, 1.0];
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        assert!(matches!(
            sample_parents(&scores, 1, &mut rng),
            Err(SelectionError::DegenerateWeights { .. })
        ));
    }

    #[test]
    fn test_sample_parents_single_individual() {
        let scores = vec![5.0];
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let draws = sample_parents(&scores, 10, &mut rng).unwrap();
        assert!(draws.iter().all(|&i| i == 0));
    }

    #[test]
    fn test_sample_parents_zero_draws() {
        let scores = vec![1.0, 2.0];
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        assert!(sample_parents(&scores, 0, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn test_sample_parents_deterministic_with_seed() {
        let scores = vec![1.0, 2.0, 3.0, 4.0];
        let mut rng1 = Xoshiro256PlusPlus::seed_from_u64(9);
        let mut rng2 = Xoshiro256PlusPlus::seed_from_u64(9);
        assert_eq!(
            sample_parents(&scores, 50, &mut rng1).unwrap(),
            sample_parents(&scores, 50, &mut rng2).unwrap()
        );
    }
}
