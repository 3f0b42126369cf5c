//! afinar - evolutionary hyperparameter search CLI
//!
//! Usage:
//!   afinar search data.csv                      # Tune kNN with default settings
//!   afinar search data.csv --generations 20     # Longer search
//!   afinar search data.csv --config search.json # Settings from a file
//!   afinar search data.csv -o result.json       # Save the best configuration
//!   afinar config > search.json                 # Start from the defaults

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use afinar::classification::KnnFactory;
use afinar::config::SearchConfig;
use afinar::data::{train_test_split, Dataset};
use afinar::evolution::{EvolutionEngine, GenerationReport, ModelEvaluator, SearchResult};
use afinar::AfinarError;
use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// afinar - evolutionary hyperparameter search
#[derive(Parser)]
#[command(name = "afinar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Tune a k-nearest-neighbours classifier on a CSV dataset
    Search(SearchArgs),

    /// Print the default search configuration as JSON
    Config,
}

#[derive(clap::Args)]
struct SearchArgs {
    /// CSV file; the last column is the class label
    #[arg(value_name = "DATA")]
    data: PathBuf,

    /// JSON search configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Individuals per generation
    #[arg(long)]
    population_size: Option<usize>,

    /// Generations to run
    #[arg(long)]
    generations: Option<usize>,

    /// Top-ranked individuals eligible as parents
    #[arg(long)]
    parent_count: Option<usize>,

    /// Probability of redrawing an inherited gene
    #[arg(long)]
    mutation_rate: Option<f64>,

    /// Random seed of the search
    #[arg(long)]
    seed: Option<u64>,

    /// Fraction of rows held out for validation
    #[arg(long)]
    test_size: Option<f64>,

    /// Random seed of the train/validation shuffle
    #[arg(long)]
    split_seed: Option<u64>,

    /// The CSV file has no header line
    #[arg(long)]
    no_header: bool,

    /// Write the search result as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl SearchArgs {
    /// Flags take precedence over the configuration file.
    fn resolve(&self) -> Result<SearchConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::from_file(path)?,
            None => SearchConfig::default(),
        };
        let evolution = &mut config.evolution;
        if let Some(n) = self.population_size {
            evolution.population_size = n;
        }
        if let Some(n) = self.generations {
            evolution.generations = n;
        }
        if let Some(n) = self.parent_count {
            evolution.parent_count = n;
        }
        if let Some(p) = self.mutation_rate {
            evolution.mutation_rate = p;
        }
        if self.seed.is_some() {
            evolution.seed = self.seed;
        }
        if let Some(f) = self.test_size {
            config.data.test_size = f;
        }
        if let Some(s) = self.split_seed {
            config.data.split_seed = s;
        }
        if self.no_header {
            config.data.has_header = false;
        }
        config.validate()?;
        Ok(config)
    }
}

/// CLI error types
#[derive(Error, Debug)]
enum CliError {
    /// Candidate or search settings are unusable
    #[error("configuration error: {0}")]
    Configuration(AfinarError),

    /// Dataset missing, empty or malformed
    #[error("data error: {0}")]
    Data(AfinarError),

    /// Input text could not be parsed
    #[error("parse error: {0}")]
    Parse(AfinarError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else from the library
    #[error("{0}")]
    Afinar(AfinarError),
}

impl CliError {
    /// Get exit code for this error
    fn exit_code(&self) -> ExitCode {
        match self {
            Self::Configuration(_) => ExitCode::from(2),
            Self::Data(_) => ExitCode::from(3),
            Self::Parse(_) => ExitCode::from(4),
            Self::Io(_) => ExitCode::from(5),
            Self::Afinar(_) => ExitCode::from(1),
        }
    }
}

impl From<AfinarError> for CliError {
    fn from(e: AfinarError) -> Self {
        match e {
            AfinarError::Io(io) => Self::Io(io),
            AfinarError::Configuration { .. }
            | AfinarError::InvalidHyperparameter { .. }
            | AfinarError::InvalidSpace { .. }
            | AfinarError::UnknownParameter { .. } => Self::Configuration(e),
            AfinarError::DataUnavailable { .. } | AfinarError::DimensionMismatch { .. } => {
                Self::Data(e)
            }
            AfinarError::Parse { .. } | AfinarError::Serialization(_) => Self::Parse(e),
            AfinarError::InvalidFitness { .. } => Self::Afinar(e),
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_report(report: &GenerationReport) {
    println!(
        "Generation {}: best fitness = {:.4}, params = {}",
        report.generation + 1,
        report.best_fitness,
        report.best_genes
    );
}

fn print_summary(result: &SearchResult) {
    println!();
    println!("Best parameters: {}", result.best_genes);
    println!("Best fitness:    {:.4}", result.best_fitness);
    println!(
        "Evaluations:     {} over {} generations",
        result.evaluations, result.generations
    );
}

fn write_result(path: &Path, result: &SearchResult) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(result).map_err(AfinarError::from)?;
    std::fs::write(path, json)?;
    tracing::info!(path = %path.display(), "wrote search result");
    Ok(())
}

fn search(args: &SearchArgs) -> Result<(), CliError> {
    let config = args.resolve()?;

    let data = Dataset::load_csv(&args.data, config.data.has_header)?;
    let split = train_test_split(&data, config.data.test_size, config.data.split_seed)?;
    tracing::info!(
        samples = data.len(),
        features = data.n_features(),
        classes = data.n_classes(),
        train = split.train.len(),
        validation = split.validation.len(),
        "loaded dataset"
    );

    let evaluator = ModelEvaluator::new(KnnFactory::new(), split);
    let engine = EvolutionEngine::new(config.space, evaluator).with_config(config.evolution);
    let result = engine.run_with(print_report)?;
    print_summary(&result);

    if let Some(path) = &args.output {
        write_result(path, &result)?;
    }
    Ok(())
}

fn print_default_config() -> Result<(), CliError> {
    println!("{}", SearchConfig::default().to_json_pretty()?);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Search(args) => search(args),
        Commands::Config => print_default_config(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}
