//! Base types for biological sequences.

mod alphabet;
mod sequence;

pub use alphabet::Alphabet;
pub use sequence::{InvalidSequence, Sequence};

/// The gap symbol used in alignment rows. Carries no biological identity.
pub const GAP: u8 = b'-';
