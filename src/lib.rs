//! Alignevo: a genetic-algorithm optimizer for multiple sequence alignments.
//!
//! This library searches for a high-scoring multiple sequence alignment of a
//! fixed set of biological sequences by evolving gap placements: a population
//! of candidate alignments is scored with a sum-of-pairs objective and refined
//! through residue-preserving crossover and mutation operators.

pub mod align;
pub mod base;
pub mod evolution;
pub mod io;
pub mod search;

// Re-export commonly used types for convenient external access.
//
// These types form the public, stable surface that most consumers of the
// library will use when loading sequences or running a search. Re-exporting
// them here makes them available as `alignevo::Sequence`, `alignevo::Alignment`,
// etc.
pub use align::{Alignment, PairwiseAligner, Row, SubstitutionMatrix};
pub use base::{Alphabet, Sequence, GAP};
pub use search::{run_evolution, Evolution, GaConfig, SearchOutcome};
