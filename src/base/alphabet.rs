use std::sync::Arc;

/// Shared, immutable alphabet of residue symbols.
/// Use Arc to share one instance across every sequence and alignment row.
#[derive(Debug, Clone)]
pub struct Alphabet {
    /// Byte representation of the residue symbols
    symbols: Arc<[u8]>,
    /// Human-readable name of the biotype ("DNA", "RNA", "PROTEIN", ...)
    name: Arc<str>,
}

impl Alphabet {
    /// Create a new alphabet from a named symbol set.
    pub fn new(name: impl Into<Arc<str>>, symbols: impl Into<Vec<u8>>) -> Self {
        Self {
            symbols: symbols.into().into(),
            name: name.into(),
        }
    }

    /// Standard DNA alphabet (A, C, G, T)
    pub fn dna() -> Self {
        Self::new("DNA", *b"ACGT")
    }

    /// Standard RNA alphabet (A, C, G, U)
    pub fn rna() -> Self {
        Self::new("RNA", *b"ACGU")
    }

    /// The 20 standard amino acids.
    pub fn protein() -> Self {
        Self::new("PROTEIN", *b"ACDEFGHIKLMNPQRSTVWY")
    }

    /// Get the biotype name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of symbols in this alphabet
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if empty (should never be)
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Get all symbols as a slice
    #[inline]
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Check if a symbol belongs to the alphabet
    #[inline]
    pub fn contains(&self, symbol: u8) -> bool {
        self.symbols.contains(&symbol)
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::dna()
    }
}

impl PartialEq for Alphabet {
    fn eq(&self, other: &Self) -> bool {
        // Fast path: check if they point to the same Arc
        Arc::ptr_eq(&self.symbols, &other.symbols) || self.symbols == other.symbols
    }
}

impl Eq for Alphabet {}
