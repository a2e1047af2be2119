//! Generational search: population bookkeeping, configuration, and the
//! evolution engine that drives the whole optimization.

mod engine;
mod parameters;
mod population;

pub use engine::{run_evolution, EngineError, Evolution, SearchOutcome};
pub use parameters::{GaConfig, InvalidParameter};
pub use population::{Population, ScoredIndividual};
