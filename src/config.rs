//! Configuration for spamsift.
//!
//! Every section has sensible defaults, so an empty JSON object (or no config
//! file at all) is a valid configuration. CLI flags override individual
//! fields after loading.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpamSiftError};
use crate::ml::naive_bayes::DEFAULT_ALPHA;
use crate::ml::split::{DEFAULT_SPLIT_SEED, DEFAULT_TEST_SIZE};
use crate::ml::tfidf::DEFAULT_MAX_FEATURES;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpamSiftConfig {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub artifacts: ArtifactConfig,

    #[serde(default)]
    pub training: TrainingConfig,

    #[serde(default)]
    pub generator: GeneratorConfig,
}

impl SpamSiftConfig {
    /// Load configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SpamSiftError::invalid_config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: SpamSiftConfig = serde_json::from_str(&content).map_err(|e| {
            SpamSiftError::invalid_config(format!("cannot parse {}: {e}", path.display()))
        })?;
        config.validate()?;

        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        self.training.validate()
    }
}

/// Dataset locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Labeled dataset used for training and previews.
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,

    /// Where `repair` writes its output by default.
    #[serde(default = "default_repaired_path")]
    pub repaired_path: PathBuf,
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("data/spam.csv")
}

fn default_repaired_path() -> PathBuf {
    PathBuf::from("data/spam_fixed.csv")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            repaired_path: default_repaired_path(),
        }
    }
}

/// Locations of the persisted model and vectorizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactConfig {
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,

    #[serde(default = "default_model_file")]
    pub model_file: String,

    #[serde(default = "default_vectorizer_file")]
    pub vectorizer_file: String,
}

fn default_models_dir() -> PathBuf {
    PathBuf::from("models")
}

fn default_model_file() -> String {
    "model.bin".to_string()
}

fn default_vectorizer_file() -> String {
    "vectorizer.bin".to_string()
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            models_dir: default_models_dir(),
            model_file: default_model_file(),
            vectorizer_file: default_vectorizer_file(),
        }
    }
}

impl ArtifactConfig {
    /// Default layout under a different directory.
    pub fn in_dir<P: Into<PathBuf>>(models_dir: P) -> Self {
        Self {
            models_dir: models_dir.into(),
            ..Self::default()
        }
    }

    pub fn model_path(&self) -> PathBuf {
        self.models_dir.join(&self.model_file)
    }

    pub fn vectorizer_path(&self) -> PathBuf {
        self.models_dir.join(&self.vectorizer_file)
    }
}

/// Training hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Fraction of rows held out for evaluation.
    #[serde(default = "default_test_size")]
    pub test_size: f64,

    /// Seed for the train/test shuffle.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Vocabulary cap for the vectorizer (`null` keeps every term).
    #[serde(default = "default_max_features")]
    pub max_features: Option<usize>,

    /// Additive smoothing for Naive Bayes.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

fn default_test_size() -> f64 {
    DEFAULT_TEST_SIZE
}

fn default_seed() -> u64 {
    DEFAULT_SPLIT_SEED
}

fn default_max_features() -> Option<usize> {
    Some(DEFAULT_MAX_FEATURES)
}

fn default_alpha() -> f64 {
    DEFAULT_ALPHA
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_size: default_test_size(),
            seed: default_seed(),
            max_features: default_max_features(),
            alpha: default_alpha(),
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(SpamSiftError::invalid_config(format!(
                "training.test_size must be in (0, 1), got {}",
                self.test_size
            )));
        }
        if self.max_features == Some(0) {
            return Err(SpamSiftError::invalid_config(
                "training.max_features must be at least 1",
            ));
        }
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(SpamSiftError::invalid_config(format!(
                "training.alpha must be positive, got {}",
                self.alpha
            )));
        }
        Ok(())
    }
}

/// Synthetic dataset generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_messages_per_class")]
    pub spam_count: usize,

    #[serde(default = "default_messages_per_class")]
    pub ham_count: usize,

    /// Fixed seed for reproducible output; OS entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_messages_per_class() -> usize {
    crate::dataset::generator::DEFAULT_MESSAGES_PER_CLASS
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            spam_count: default_messages_per_class(),
            ham_count: default_messages_per_class(),
            seed: None,
        }
    }
}
