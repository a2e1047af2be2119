use crate::base::Alphabet;
use std::collections::HashMap;
use std::fmt;

/// Symmetric substitution matrix with a linear gap penalty.
///
/// Loaded once and shared read-only (typically behind an `Arc`) across all
/// scoring calls; nothing in the search mutates it.
#[derive(Debug, Clone)]
pub struct SubstitutionMatrix {
    /// Alphabet the matrix covers
    alphabet: Alphabet,
    /// Scores keyed by symbol pair; stored once per unordered pair
    scores: HashMap<(u8, u8), f64>,
    /// Linear penalty applied per gap position
    gap_penalty: f64,
}

impl SubstitutionMatrix {
    /// Create an empty matrix for an alphabet.
    pub fn new(alphabet: Alphabet, gap_penalty: f64) -> Self {
        Self {
            alphabet,
            scores: HashMap::new(),
            gap_penalty,
        }
    }

    /// Create a match/mismatch matrix over the full alphabet.
    pub fn match_mismatch(
        match_score: f64,
        mismatch_score: f64,
        gap_penalty: f64,
        alphabet: Alphabet,
    ) -> Self {
        let mut matrix = Self::new(alphabet.clone(), gap_penalty);
        let symbols = alphabet.symbols().to_vec();
        for (i, &a) in symbols.iter().enumerate() {
            for &b in &symbols[i..] {
                let score = if a == b { match_score } else { mismatch_score };
                matrix.set(a, b, score);
            }
        }
        matrix
    }

    /// Set the score for a symbol pair (stored symmetrically).
    pub fn set(&mut self, a: u8, b: u8, score: f64) {
        let key = if a <= b { (a, b) } else { (b, a) };
        self.scores.insert(key, score);
    }

    /// Score for an ordered symbol pair; symmetric in its arguments.
    ///
    /// Returns `None` if the pair was never set.
    #[inline]
    pub fn get(&self, a: u8, b: u8) -> Option<f64> {
        let key = if a <= b { (a, b) } else { (b, a) };
        self.scores.get(&key).copied()
    }

    /// Score for a symbol pair, treating unknown pairs as the gap penalty.
    #[inline]
    pub fn score(&self, a: u8, b: u8) -> f64 {
        self.get(a, b).unwrap_or(self.gap_penalty)
    }

    /// The linear gap penalty.
    #[inline]
    pub fn gap_penalty(&self) -> f64 {
        self.gap_penalty
    }

    /// The alphabet this matrix covers.
    #[inline]
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Number of stored pair entries.
    pub fn n_entries(&self) -> usize {
        self.scores.len()
    }
}

impl fmt::Display for SubstitutionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SubstitutionMatrix({}, {} pairs, gap = {})",
            self.alphabet.name(),
            self.scores.len(),
            self.gap_penalty
        )
    }
}
