use crate::evolution::{CrossoverStrategy, MutationMove};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for one genetic-algorithm run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaConfig {
    /// Number of individuals in the population (fixed across generations)
    pub population_size: usize,
    /// Hard cap on the number of generations
    pub max_generations: usize,
    /// Stop after this many consecutive generations without a new best score
    pub no_improvement_limit: usize,
    /// Upper bound (inclusive) for the random leading-gap offset at init
    pub max_initial_offset: usize,
    /// Fraction of the population carried over unchanged each generation
    pub elitism_fraction: f64,
    /// Per-slot probability of producing the offspring by mutation rather
    /// than crossover
    pub mutation_probability: f64,
    /// Crossover policy
    pub crossover: CrossoverStrategy,
    /// Mutation move
    pub mutation: MutationMove,
    /// Optional RNG seed for reproducibility
    pub seed: Option<u64>,
}

impl GaConfig {
    /// Create a configuration with the default operators.
    ///
    /// # Errors
    /// Returns an error if any parameter is outside its valid range.
    pub fn new(
        population_size: usize,
        max_generations: usize,
        no_improvement_limit: usize,
        max_initial_offset: usize,
        elitism_fraction: f64,
        mutation_probability: f64,
        seed: Option<u64>,
    ) -> Result<Self, InvalidParameter> {
        let config = Self {
            population_size,
            max_generations,
            no_improvement_limit,
            max_initial_offset,
            elitism_fraction,
            mutation_probability,
            crossover: CrossoverStrategy::default(),
            mutation: MutationMove::default(),
            seed,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check all parameter ranges.
    pub fn validate(&self) -> Result<(), InvalidParameter> {
        if self.population_size == 0 {
            return Err(InvalidParameter {
                name: "population_size",
                reason: "must be greater than 0".into(),
            });
        }
        if !(0.0..=1.0).contains(&self.elitism_fraction) {
            return Err(InvalidParameter {
                name: "elitism_fraction",
                reason: format!("{} is outside [0.0, 1.0]", self.elitism_fraction),
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(InvalidParameter {
                name: "mutation_probability",
                reason: format!("{} is outside [0.0, 1.0]", self.mutation_probability),
            });
        }
        Ok(())
    }

    /// Number of individuals carried over unchanged each generation.
    /// At least one, so the best individual always survives.
    pub fn elite_count(&self) -> usize {
        ((self.population_size as f64 * self.elitism_fraction) as usize).max(1)
    }

    /// Set the crossover strategy.
    pub fn with_crossover(mut self, strategy: CrossoverStrategy) -> Self {
        self.crossover = strategy;
        self
    }

    /// Set the mutation move.
    pub fn with_mutation(mut self, mv: MutationMove) -> Self {
        self.mutation = mv;
        self
    }
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 100,
            no_improvement_limit: 30,
            max_initial_offset: 10,
            elitism_fraction: 0.1,
            mutation_probability: 0.5,
            crossover: CrossoverStrategy::default(),
            mutation: MutationMove::default(),
            seed: None,
        }
    }
}

/// An invalid configuration parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidParameter {
    /// Parameter name
    pub name: &'static str,
    /// Why the value was rejected
    pub reason: String,
}

impl fmt::Display for InvalidParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid parameter {}: {}", self.name, self.reason)
    }
}

impl std::error::Error for InvalidParameter {}
