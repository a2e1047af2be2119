//! Alignment data structures and pairwise alignment.

mod alignment;
mod matrix;
mod pairwise;
mod row;

pub use alignment::{Alignment, MalformedAlignment, PadSide};
pub use matrix::SubstitutionMatrix;
pub use pairwise::{AlignError, PairwiseAligner, PairwiseAlignment};
pub use row::Row;
