//! Alignevo CLI - genetic-algorithm multiple sequence alignment from the command line.

use anyhow::{bail, Context, Result};
use clap::Parser;
use alignevo::align::SubstitutionMatrix;
use alignevo::base::Alphabet;
use alignevo::evolution::{CrossoverStrategy, MutationMove};
use alignevo::io::{read_fasta, read_submat};
use alignevo::search::{run_evolution, GaConfig};
use std::path::PathBuf;
use std::sync::Arc;

/// Alignevo - evolve a multiple sequence alignment
#[derive(Parser, Debug)]
#[command(name = "alignevo")]
#[command(author, version, about = "Genetic-algorithm multiple sequence aligner", long_about = None)]
struct Cli {
    /// Input FASTA file
    #[arg(short, long)]
    fasta: PathBuf,

    /// Sequence alphabet (dna, rna, protein)
    #[arg(short, long, default_value = "dna")]
    alphabet: String,

    /// Substitution matrix file (tab-separated; overrides match/mismatch)
    #[arg(short = 'm', long)]
    matrix: Option<PathBuf>,

    /// Match score when no matrix file is given
    #[arg(long, default_value = "1.0")]
    match_score: f64,

    /// Mismatch score when no matrix file is given
    #[arg(long, default_value = "-1.0")]
    mismatch_score: f64,

    /// Linear gap penalty
    #[arg(short, long, default_value = "-2.0")]
    gap: f64,

    /// Population size
    #[arg(short = 'n', long, default_value = "50")]
    population_size: usize,

    /// Maximum number of generations
    #[arg(short = 'g', long, default_value = "100")]
    generations: usize,

    /// Stop after this many generations without improvement
    #[arg(long, default_value = "30")]
    no_improvement_limit: usize,

    /// Maximum random leading-gap offset at initialization
    #[arg(long, default_value = "10")]
    max_offset: usize,

    /// Fraction of the population kept unchanged each generation
    #[arg(long, default_value = "0.1")]
    elitism: f64,

    /// Probability of mutation (vs crossover) per offspring slot
    #[arg(long, default_value = "0.5")]
    mutation_probability: f64,

    /// Crossover strategy (offset, uniform, splice)
    #[arg(long, default_value = "offset")]
    crossover: String,

    /// Mutation move (split, insert, delete)
    #[arg(long, default_value = "split")]
    mutation: String,

    /// Random seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Write the best-score history as JSON to this file
    #[arg(long)]
    history_out: Option<PathBuf>,
}

fn parse_alphabet(name: &str) -> Result<Alphabet> {
    match name.to_ascii_lowercase().as_str() {
        "dna" => Ok(Alphabet::dna()),
        "rna" => Ok(Alphabet::rna()),
        "protein" => Ok(Alphabet::protein()),
        other => bail!("Unknown alphabet: {other} (expected dna, rna or protein)"),
    }
}

fn parse_crossover(name: &str) -> Result<CrossoverStrategy> {
    match name.to_ascii_lowercase().as_str() {
        "offset" => Ok(CrossoverStrategy::OffsetExchange),
        "uniform" => Ok(CrossoverStrategy::UniformColumns),
        "splice" => Ok(CrossoverStrategy::ColumnSplice),
        other => bail!("Unknown crossover strategy: {other} (expected offset, uniform or splice)"),
    }
}

fn parse_mutation(name: &str) -> Result<MutationMove> {
    match name.to_ascii_lowercase().as_str() {
        "split" => Ok(MutationMove::SplitGapBlock),
        "insert" => Ok(MutationMove::InsertGap),
        "delete" => Ok(MutationMove::DeleteGap),
        other => bail!("Unknown mutation move: {other} (expected split, insert or delete)"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let alphabet = parse_alphabet(&cli.alphabet)?;
    let sequences = read_fasta(&cli.fasta, &alphabet)
        .with_context(|| format!("Failed to read sequences from {}", cli.fasta.display()))?;

    let matrix = match &cli.matrix {
        Some(path) => read_submat(path, cli.gap)
            .with_context(|| format!("Failed to read matrix from {}", path.display()))?,
        None => SubstitutionMatrix::match_mismatch(
            cli.match_score,
            cli.mismatch_score,
            cli.gap,
            alphabet,
        ),
    };

    let config = GaConfig::new(
        cli.population_size,
        cli.generations,
        cli.no_improvement_limit,
        cli.max_offset,
        cli.elitism,
        cli.mutation_probability,
        cli.seed,
    )?
    .with_crossover(parse_crossover(&cli.crossover)?)
    .with_mutation(parse_mutation(&cli.mutation)?);

    println!("Aligning {} sequences:", sequences.len());
    for (i, seq) in sequences.iter().enumerate() {
        println!("  seq {i}: {seq}");
    }
    println!(
        "Population {} | max generations {} | no-improvement limit {}",
        config.population_size, config.max_generations, config.no_improvement_limit
    );
    println!();

    let outcome = run_evolution(sequences, Arc::new(matrix), config)?;

    println!("Best score: {:.2}", outcome.best_score);
    println!("Generations run: {}", outcome.history.len() - 1);
    println!();
    println!("Best alignment:");
    print!("{}", outcome.best_alignment);

    println!();
    println!("Best-score history (every 5 generations):");
    for (gen, score) in outcome.history.iter().enumerate().step_by(5) {
        println!("  gen {gen:3}: {score:.2}");
    }
    if let Some(last) = outcome.history.last() {
        println!("  gen {:3}: {last:.2} (final)", outcome.history.len() - 1);
    }

    if let Some(path) = &cli.history_out {
        let json = serde_json::to_string_pretty(&outcome.history)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write history to {}", path.display()))?;
        println!();
        println!("History written to {}", path.display());
    }

    Ok(())
}
