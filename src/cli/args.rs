//! Command line argument parsing for the spamsift CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::SpamSiftConfig;
use crate::error::Result;

/// spamsift - SMS spam classification with TF-IDF and Naive Bayes
#[derive(Parser, Debug, Clone)]
#[command(name = "spamsift")]
#[command(about = "Train, run and explore an SMS spam classifier")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SpamSiftArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(long, value_name = "FILE", env = "SPAMSIFT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding model.bin and vectorizer.bin
    #[arg(long, value_name = "DIR", global = true)]
    pub models_dir: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SpamSiftArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Load the configuration file (if any) and apply global overrides.
    pub fn load_config(&self) -> Result<SpamSiftConfig> {
        let mut config = SpamSiftConfig::load(self.config.as_deref())?;
        if let Some(models_dir) = &self.models_dir {
            config.artifacts.models_dir = models_dir.clone();
        }
        Ok(config)
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train the model on a labeled CSV and save the artifacts
    Train(TrainArgs),

    /// Classify messages with the saved model
    Predict(PredictArgs),

    /// Interactive terminal front end
    Interactive(InteractiveArgs),

    /// Generate a synthetic labeled dataset
    Generate(GenerateArgs),

    /// Rewrite a CSV whose text column has unquoted commas
    Repair(RepairArgs),

    /// Show class distribution and first rows of a dataset
    Preview(PreviewArgs),
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Labeled dataset (CSV with label,text columns)
    #[arg(short, long, value_name = "CSV")]
    pub data: Option<PathBuf>,

    /// Fraction of rows held out for evaluation
    #[arg(long)]
    pub test_size: Option<f64>,

    /// Seed for the train/test shuffle
    #[arg(long)]
    pub seed: Option<u64>,

    /// Vocabulary size cap
    #[arg(long)]
    pub max_features: Option<usize>,
}

/// Arguments for prediction
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Message to classify; without it, messages are read from stdin until `quit`
    #[arg(short, long)]
    pub text: Option<String>,
}

/// Arguments for the interactive front end
#[derive(Parser, Debug, Clone)]
pub struct InteractiveArgs {
    /// Dataset used for the class distribution and samples
    #[arg(short, long, value_name = "CSV")]
    pub data: Option<PathBuf>,

    /// Seed for sampling dataset rows
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for dataset generation
#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    /// Output CSV path
    #[arg(short, long, value_name = "CSV")]
    pub output: Option<PathBuf>,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of spam messages
    #[arg(long)]
    pub spam: Option<usize>,

    /// Number of ham messages
    #[arg(long)]
    pub ham: Option<usize>,
}

/// Arguments for CSV repair
#[derive(Parser, Debug, Clone)]
pub struct RepairArgs {
    /// Malformed input CSV
    #[arg(short, long, value_name = "CSV")]
    pub input: Option<PathBuf>,

    /// Repaired output CSV
    #[arg(short, long, value_name = "CSV")]
    pub output: Option<PathBuf>,
}

/// Arguments for dataset preview
#[derive(Parser, Debug, Clone)]
pub struct PreviewArgs {
    /// Dataset to preview (defaults to the configured dataset)
    #[arg(value_name = "CSV")]
    pub path: Option<PathBuf>,

    /// Number of leading rows to show
    #[arg(short = 'n', long, default_value = "10")]
    pub rows: usize,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
