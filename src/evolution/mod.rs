//! Evolutionary operators for the alignment search.
//!
//! This module provides the sum-of-pairs fitness evaluator, the
//! residue-preserving crossover and mutation operators, and the
//! fitness-proportional selection policy.

mod crossover;
mod fitness;
mod mutation;
mod selection;

pub use crossover::{CrossoverOperator, CrossoverStrategy};
pub use fitness::SumOfPairs;
pub use mutation::{GapMutation, MutationMove};
pub use selection::{sample_parents, SelectionError};
