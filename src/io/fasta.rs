use super::LoadError;
use crate::base::{Alphabet, Sequence};
use std::fs;
use std::path::Path;

/// Parse FASTA-style text into validated sequences.
///
/// Header lines start with `>`; `<` and `&` are accepted too, for the
/// course-format files this tool grew up on. Sequence bodies may span
/// multiple lines and are concatenated.
pub fn parse_fasta(text: &str, alphabet: &Alphabet) -> Result<Vec<Sequence>, LoadError> {
    let mut sequences = Vec::new();
    let mut current = String::new();
    let mut in_record = false;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('>') || line.starts_with('<') || line.starts_with('&') {
            if in_record && !current.is_empty() {
                sequences.push(Sequence::from_str(&current, alphabet.clone())?);
            }
            current.clear();
            in_record = true;
        } else {
            current.push_str(line);
        }
    }

    if in_record && !current.is_empty() {
        sequences.push(Sequence::from_str(&current, alphabet.clone())?);
    }

    if sequences.is_empty() {
        return Err(LoadError::Parse("No sequences found in FASTA input".into()));
    }

    Ok(sequences)
}

/// Read and parse a FASTA file.
pub fn read_fasta(path: impl AsRef<Path>, alphabet: &Alphabet) -> Result<Vec<Sequence>, LoadError> {
    let text = fs::read_to_string(path)?;
    parse_fasta(&text, alphabet)
}
