use crate::align::{Alignment, MalformedAlignment, SubstitutionMatrix};
use crate::base::Sequence;
use crate::evolution::{
    sample_parents, CrossoverOperator, GapMutation, SelectionError, SumOfPairs,
};
use crate::search::{GaConfig, InvalidParameter, Population, ScoredIndividual};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::fmt;
use std::sync::Arc;

/// Result of a finished search: the best individual ever seen, its score,
/// and the per-generation best-score history (one entry per generation,
/// including generation 0).
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub best_alignment: Alignment,
    pub best_score: f64,
    pub history: Vec<f64>,
}

/// The generational search engine.
///
/// Owns the population and a single seedable RNG (Xoshiro256++, as in the
/// rest of the crate's stochastic code); all random draws of a run come from
/// this one source, so a seeded run is fully reproducible. Each generation:
/// carry the elites over unchanged, fill the remaining slots with mutation or
/// crossover offspring, re-score, sort, and check the stop criterion.
#[derive(Debug)]
pub struct Evolution {
    /// The original ungapped sequences; every alignment must ungap to these
    sequences: Vec<Sequence>,
    evaluator: SumOfPairs,
    crossover: CrossoverOperator,
    mutation: GapMutation,
    config: GaConfig,
    population: Population,
    best: ScoredIndividual,
    history: Vec<f64>,
    /// Consecutive generations without a new best score
    stagnation: usize,
    rng: Xoshiro256PlusPlus,
}

impl Evolution {
    /// Create a new engine with a randomly initialized, scored population.
    ///
    /// Initialization gives every sequence a uniform random leading-gap
    /// offset in `0..=max_initial_offset`, pads to a rectangle and drops
    /// gap-only columns.
    pub fn new(
        sequences: Vec<Sequence>,
        matrix: Arc<SubstitutionMatrix>,
        config: GaConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        if sequences.is_empty() {
            return Err(EngineError::NoSequences);
        }

        let mut rng = match config.seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_seed(rand::rng().random()),
        };

        let evaluator = SumOfPairs::new(matrix);

        let alignments: Vec<Alignment> = (0..config.population_size)
            .map(|_| {
                let offsets: Vec<usize> = sequences
                    .iter()
                    .map(|_| rng.random_range(0..=config.max_initial_offset))
                    .collect();
                Alignment::from_offsets(&offsets, &sequences)
            })
            .collect();

        let scores = evaluator.score_all(&alignments);
        let individuals = alignments
            .into_iter()
            .zip(scores)
            .map(|(alignment, score)| ScoredIndividual::new(alignment, score))
            .collect();

        let population = Population::new(individuals);
        let best = population
            .best()
            .cloned()
            .expect("population_size > 0 was validated");
        let history = vec![best.score];

        Ok(Self {
            sequences,
            evaluator,
            crossover: CrossoverOperator::new(config.crossover),
            mutation: GapMutation::new(config.mutation),
            config,
            population,
            best,
            history,
            stagnation: 0,
            rng,
        })
    }

    /// The current population.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Current generation number.
    pub fn generation(&self) -> usize {
        self.population.generation()
    }

    /// The best individual seen so far.
    pub fn best(&self) -> &ScoredIndividual {
        &self.best
    }

    /// The sequences being aligned.
    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    /// Advance the search by one generation.
    pub fn step(&mut self) -> Result<(), EngineError> {
        let scores = self.population.scores();
        let mut next: Vec<ScoredIndividual> = self
            .population
            .individuals()
            .iter()
            .take(self.config.elite_count().min(self.population.size()))
            .cloned()
            .collect();

        while next.len() < self.config.population_size {
            let offspring = if self.rng.random::<f64>() < self.config.mutation_probability {
                self.mutation_offspring(&scores)?
            } else {
                self.crossover_offspring(&scores)?
            };
            next.push(offspring);
        }

        self.population.advance(next);

        let best_current = self
            .population
            .best()
            .cloned()
            .expect("population is never empty after advance");
        self.history.push(best_current.score);

        if best_current.score > self.best.score {
            self.best = best_current;
            self.stagnation = 0;
        } else {
            self.stagnation += 1;
        }

        Ok(())
    }

    /// Run to termination: stop once `no_improvement_limit` consecutive
    /// generations pass without a new best score, or the generation counter
    /// reaches `max_generations`. A limit of 0 terminates right after the
    /// generation-0 evaluation.
    pub fn run(mut self) -> Result<SearchOutcome, EngineError> {
        while self.stagnation < self.config.no_improvement_limit
            && self.generation() < self.config.max_generations
        {
            self.step()?;
        }

        Ok(SearchOutcome {
            best_alignment: self.best.alignment,
            best_score: self.best.score,
            history: self.history,
        })
    }

    fn mutation_offspring(&mut self, scores: &[f64]) -> Result<ScoredIndividual, EngineError> {
        let parent_idx = sample_parents(scores, 1, &mut self.rng)?[0];
        let parent = &self.population.individuals()[parent_idx].alignment;

        let child = self.mutation.mutate(parent, &mut self.rng)?;
        let score = self.evaluator.score(&child);
        Ok(ScoredIndividual::new(child, score))
    }

    fn crossover_offspring(&mut self, scores: &[f64]) -> Result<ScoredIndividual, EngineError> {
        let parents = sample_parents(scores, 2, &mut self.rng)?;
        let parent1 = &self.population.individuals()[parents[0]].alignment;
        let parent2 = &self.population.individuals()[parents[1]].alignment;

        // Borrow only the rng field here: the parents keep the population
        // borrowed immutably.
        let point = draw_crossover_point(&mut self.rng, parent1, parent2);
        let (child1, child2) = self
            .crossover
            .offspring(parent1, parent2, point, &mut self.rng)?;

        // Keep whichever of the two offspring scores higher
        let score1 = self.evaluator.score(&child1);
        let score2 = self.evaluator.score(&child2);
        Ok(if score1 > score2 {
            ScoredIndividual::new(child1, score1)
        } else {
            ScoredIndividual::new(child2, score2)
        })
    }

}

/// Draw a crossover point uniformly from the smaller parent's residue count,
/// kept inside the operator's valid row-index range.
fn draw_crossover_point(
    rng: &mut Xoshiro256PlusPlus,
    parent1: &Alignment,
    parent2: &Alignment,
) -> usize {
    let res1 = parent1.row(0).map_or(0, |r| r.residue_count());
    let res2 = parent2.row(0).map_or(0, |r| r.residue_count());
    let max_residues = res1.min(res2);

    let upper = max_residues
        .saturating_sub(1)
        .min(parent1.n_rows().saturating_sub(1))
        .max(1);
    rng.random_range(1..=upper)
}

/// One entry point covering the whole search: build the engine and run it.
pub fn run_evolution(
    sequences: Vec<Sequence>,
    matrix: Arc<SubstitutionMatrix>,
    config: GaConfig,
) -> Result<SearchOutcome, EngineError> {
    Evolution::new(sequences, matrix, config)?.run()
}

/// Errors surfaced by the engine. All of these abort the run.
#[derive(Debug)]
pub enum EngineError {
    /// No sequences were supplied
    NoSequences,
    /// A configuration parameter is out of range
    Parameter(InvalidParameter),
    /// Parent selection failed
    Selection(SelectionError),
    /// An operator produced or received a non-rectangular alignment
    Malformed(MalformedAlignment),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSequences => write!(f, "Cannot run a search without sequences"),
            Self::Parameter(e) => write!(f, "{e}"),
            Self::Selection(e) => write!(f, "{e}"),
            Self::Malformed(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NoSequences => None,
            Self::Parameter(e) => Some(e),
            Self::Selection(e) => Some(e),
            Self::Malformed(e) => Some(e),
        }
    }
}

impl From<InvalidParameter> for EngineError {
    fn from(e: InvalidParameter) -> Self {
        Self::Parameter(e)
    }
}

impl From<SelectionError> for EngineError {
    fn from(e: SelectionError) -> Self {
        Self::Selection(e)
    }
}

impl From<MalformedAlignment> for EngineError {
    fn from(e: MalformedAlignment) -> Self {
        Self::Malformed(e)
    }
}
