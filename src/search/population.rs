use crate::align::Alignment;

/// An alignment paired with its sum-of-pairs score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredIndividual {
    pub alignment: Alignment,
    pub score: f64,
}

impl ScoredIndividual {
    pub fn new(alignment: Alignment, score: f64) -> Self {
        Self { alignment, score }
    }
}

/// A fixed-size population of scored alignments, kept sorted descending by
/// score after each generation. Rebuilt each generation from elites plus
/// fresh offspring; old populations are discarded.
#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<ScoredIndividual>,
    generation: usize,
}

impl Population {
    /// Create a population, sorting it descending by score.
    pub fn new(individuals: Vec<ScoredIndividual>) -> Self {
        let mut pop = Self {
            individuals,
            generation: 0,
        };
        pop.sort();
        pop
    }

    /// Number of individuals.
    pub fn size(&self) -> usize {
        self.individuals.len()
    }

    /// Check if population is empty.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Current generation number.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// All individuals, best first.
    pub fn individuals(&self) -> &[ScoredIndividual] {
        &self.individuals
    }

    /// Get an individual by rank (0 = best).
    pub fn get(&self, index: usize) -> Option<&ScoredIndividual> {
        self.individuals.get(index)
    }

    /// The best individual, if any.
    pub fn best(&self) -> Option<&ScoredIndividual> {
        self.individuals.first()
    }

    /// Scores in rank order.
    pub fn scores(&self) -> Vec<f64> {
        self.individuals.iter().map(|ind| ind.score).collect()
    }

    /// Replace the individuals with the next generation and re-sort.
    pub fn advance(&mut self, individuals: Vec<ScoredIndividual>) {
        self.individuals = individuals;
        self.generation += 1;
        self.sort();
    }

    fn sort(&mut self) {
        self.individuals
            .sort_by(|a, b| b.score.total_cmp(&a.score));
    }
}
