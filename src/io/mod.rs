//! Loaders for the inputs the search consumes: FASTA-style sequence files
//! and substitution-matrix text files. Everything here runs once at startup;
//! the core never touches the filesystem.

mod fasta;
mod submat;

pub use fasta::{parse_fasta, read_fasta};
pub use submat::{parse_submat, read_submat};

use std::fmt;

/// Errors raised while loading input files.
#[derive(Debug)]
pub enum LoadError {
    /// IO error
    Io(std::io::Error),
    /// The file content did not parse
    Parse(String),
    /// A sequence failed alphabet validation
    Sequence(crate::base::InvalidSequence),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {e}"),
            Self::Parse(msg) => write!(f, "Parse error: {msg}"),
            Self::Sequence(e) => write!(f, "Invalid sequence: {e}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(_) => None,
            Self::Sequence(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<crate::base::InvalidSequence> for LoadError {
    fn from(e: crate::base::InvalidSequence) -> Self {
        Self::Sequence(e)
    }
}
