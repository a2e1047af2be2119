use super::LoadError;
use crate::align::SubstitutionMatrix;
use crate::base::Alphabet;
use std::fs;
use std::path::Path;

/// Parse a substitution-matrix text file.
///
/// Format: first line holds the alphabet symbols separated by tabs; each
/// following line is one tab-separated score row, in the same symbol order
/// (full square matrix, symmetric).
pub fn parse_submat(text: &str, gap_penalty: f64) -> Result<SubstitutionMatrix, LoadError> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());

    let header = lines
        .next()
        .ok_or_else(|| LoadError::Parse("Empty substitution matrix file".into()))?;
    let symbols: Vec<u8> = header
        .split('\t')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| {
            if t.len() == 1 {
                Ok(t.as_bytes()[0])
            } else {
                Err(LoadError::Parse(format!("Invalid alphabet symbol: '{t}'")))
            }
        })
        .collect::<Result<_, _>>()?;

    if symbols.is_empty() {
        return Err(LoadError::Parse("No alphabet symbols in header".into()));
    }

    let alphabet = Alphabet::new("CUSTOM", symbols.clone());
    let mut matrix = SubstitutionMatrix::new(alphabet, gap_penalty);

    let mut n_rows = 0;
    for (i, line) in lines.enumerate() {
        if i >= symbols.len() {
            return Err(LoadError::Parse(format!(
                "Too many rows: expected {}",
                symbols.len()
            )));
        }
        let scores: Vec<f64> = line
            .split('\t')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| {
                t.parse::<f64>()
                    .map_err(|_| LoadError::Parse(format!("Invalid score: '{t}'")))
            })
            .collect::<Result<_, _>>()?;

        if scores.len() != symbols.len() {
            return Err(LoadError::Parse(format!(
                "Row {} has {} scores, expected {}",
                i,
                scores.len(),
                symbols.len()
            )));
        }

        for (j, &score) in scores.iter().enumerate() {
            matrix.set(symbols[i], symbols[j], score);
        }
        n_rows += 1;
    }

    // A truncated file would leave pairs unset and silently fall back to the
    // gap penalty during scoring; require the full square matrix.
    if n_rows != symbols.len() {
        return Err(LoadError::Parse(format!(
            "Expected {} score rows, found {}",
            symbols.len(),
            n_rows
        )));
    }

    Ok(matrix)
}

/// Read and parse a substitution-matrix file.
pub fn read_submat(
    path: impl AsRef<Path>,
    gap_penalty: f64,
) -> Result<SubstitutionMatrix, LoadError> {
    let text = fs::read_to_string(path)?;
    parse_submat(&text, gap_penalty)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DNA_MAT: &str = "A\tC\tG\tT\n\
                           1\t-1\t-1\t-1\n\
                           -1\t1\t-1\t-1\n\
                           -1\t-1\t1\t-1\n\
                           -1\t-1\t-1\t1\n";

    #[test]
    fn test_parse_submat() {
        let m = parse_submat(DNA_MAT, -2.0).unwrap();
        assert_eq!(m.score(b'A', b'A'), 1.0);
        assert_eq!(m.score(b'A', b'T'), -1.0);
        assert_eq!(m.score(b'T', b'A'), -1.0);
        assert_eq!(m.gap_penalty(), -2.0);
    }

    #[test]
    fn test_parse_submat_alphabet() {
        let m = parse_submat(DNA_MAT, -2.0).unwrap();
        assert_eq!(m.alphabet().symbols(), b"ACGT");
    }

    #[test]
    fn test_parse_submat_empty() {
        assert!(matches!(parse_submat("", -2.0), Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_parse_submat_ragged_row() {
        let text = "A\tC\n1\t-1\n-1\n";
        assert!(matches!(parse_submat(text, -2.0), Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_parse_submat_bad_score() {
        let text = "A\tC\n1\tx\n-1\t1\n";
        assert!(matches!(parse_submat(text, -2.0), Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_parse_submat_truncated_rows() {
        // 4 symbols but only 2 score rows: accepting this would leave the
        // missing pairs scoring as the gap penalty
        let text = "A\tC\tG\tT\n1\t-1\t-1\t-1\n-1\t1\t-1\t-1\n";
        assert!(matches!(parse_submat(text, -2.0), Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_parse_submat_all_pairs_set() {
        let m = parse_submat(DNA_MAT, -2.0).unwrap();
        for &a in b"ACGT" {
            for &b in b"ACGT" {
                assert!(m.get(a, b).is_some());
            }
        }
    }

    #[test]
    fn test_parse_submat_too_many_rows() {
        let text = "A\n1\n1\n";
        assert!(matches!(parse_submat(text, -2.0), Err(LoadError::Parse(_))));
    }
}
