//! Persisted model and vectorizer artifacts.
//!
//! Two bincode files live under the models directory: the fitted vectorizer
//! and the fitted classifier wrapped in a [`ModelArtifact`] header.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ArtifactConfig;
use crate::error::{Result, SpamSiftError};
use crate::ml::naive_bayes::MultinomialNaiveBayes;
use crate::ml::tfidf::TfIdfVectorizer;

/// Bumped whenever the on-disk layout of [`ModelArtifact`] changes.
pub const MODEL_FORMAT_VERSION: u32 = 1;

/// The classifier as written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub trained_at: DateTime<Utc>,
    pub model: MultinomialNaiveBayes,
}

impl ModelArtifact {
    /// Wrap a freshly fitted model, stamped with the current time.
    pub fn new(model: MultinomialNaiveBayes) -> Self {
        ModelArtifact {
            format_version: MODEL_FORMAT_VERSION,
            trained_at: Utc::now(),
            model,
        }
    }
}

/// Reads and writes the artifact pair.
#[derive(Debug, Clone, Default)]
pub struct ArtifactStore {
    config: ArtifactConfig,
}

impl ArtifactStore {
    pub fn new(config: ArtifactConfig) -> Self {
        ArtifactStore { config }
    }

    /// Store with the default file names under `models_dir`.
    pub fn in_dir<P: Into<PathBuf>>(models_dir: P) -> Self {
        Self::new(ArtifactConfig::in_dir(models_dir))
    }

    pub fn models_dir(&self) -> &Path {
        &self.config.models_dir
    }

    pub fn model_path(&self) -> PathBuf {
        self.config.model_path()
    }

    pub fn vectorizer_path(&self) -> PathBuf {
        self.config.vectorizer_path()
    }

    /// Artifact paths that do not exist on disk.
    pub fn missing(&self) -> Vec<PathBuf> {
        [self.model_path(), self.vectorizer_path()]
            .into_iter()
            .filter(|path| !path.is_file())
            .collect()
    }

    /// Whether both artifacts exist.
    pub fn exists(&self) -> bool {
        self.missing().is_empty()
    }

    /// Write both artifacts, creating the models directory if needed.
    pub fn save(&self, model: &ModelArtifact, vectorizer: &TfIdfVectorizer) -> Result<()> {
        fs::create_dir_all(self.models_dir())?;

        write_bincode(&self.vectorizer_path(), vectorizer)?;
        write_bincode(&self.model_path(), model)?;

        log::info!(
            "saved model to {} and vectorizer to {}",
            self.model_path().display(),
            self.vectorizer_path().display()
        );
        Ok(())
    }

    /// Load both artifacts.
    ///
    /// Fails with [`SpamSiftError::MissingArtifacts`] naming every missing
    /// file before attempting to read either one.
    pub fn load(&self) -> Result<(ModelArtifact, TfIdfVectorizer)> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(SpamSiftError::MissingArtifacts { paths: missing });
        }

        let model: ModelArtifact = read_bincode(&self.model_path())?;
        if model.format_version != MODEL_FORMAT_VERSION {
            return Err(SpamSiftError::serialization(format!(
                "{} has format version {}, expected {}; retrain the model",
                self.model_path().display(),
                model.format_version,
                MODEL_FORMAT_VERSION
            )));
        }
        let vectorizer: TfIdfVectorizer = read_bincode(&self.vectorizer_path())?;

        if vectorizer.vocabulary_size() != model.model.n_features() {
            return Err(SpamSiftError::serialization(format!(
                "vectorizer has {} features but the model expects {}; retrain the model",
                vectorizer.vocabulary_size(),
                model.model.n_features()
            )));
        }

        log::debug!(
            "loaded model trained at {} ({} features)",
            model.trained_at,
            vectorizer.vocabulary_size()
        );
        Ok((model, vectorizer))
    }
}

fn write_bincode<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    bincode::serialize_into(&mut writer, value).map_err(|e| {
        SpamSiftError::serialization(format!("Failed to write {}: {e}", path.display()))
    })?;
    writer.flush()?;
    Ok(())
}

fn read_bincode<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let reader = BufReader::new(File::open(path)?);
    bincode::deserialize_from(reader).map_err(|e| {
        SpamSiftError::serialization(format!("Failed to read {}: {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::ml::tfidf::VectorizerConfig;
    use crate::ml::types::Label;

    fn fitted_pair() -> (ModelArtifact, TfIdfVectorizer) {
        let docs = vec!["free cash prize".to_string(), "see you home".to_string()];
        let mut vectorizer = TfIdfVectorizer::new(VectorizerConfig::default()).unwrap();
        let x = vectorizer.fit_transform(&docs).unwrap();

        let mut model = MultinomialNaiveBayes::default();
        model.fit(&x, &[Label::Spam, Label::Ham]).unwrap();

        (ModelArtifact::new(model), vectorizer)
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::in_dir(dir.path().join("models"));
        let (model, vectorizer) = fitted_pair();

        assert!(!store.exists());
        store.save(&model, &vectorizer).unwrap();
        assert!(store.exists());

        let (loaded_model, loaded_vectorizer) = store.load().unwrap();
        assert_eq!(loaded_model.model, model.model);
        assert_eq!(loaded_model.trained_at, model.trained_at);
        assert_eq!(loaded_vectorizer.feature_names(), vectorizer.feature_names());
    }

    #[test]
    fn test_missing_artifacts_lists_both_paths() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::in_dir(dir.path());

        let err = store.load().unwrap_err();
        assert!(err.is_missing_artifacts());
        let message = err.to_string();
        assert!(message.contains("model.bin"), "{message}");
        assert!(message.contains("vectorizer.bin"), "{message}");
        assert!(message.contains("spamsift train"), "{message}");
    }

    #[test]
    fn test_one_missing_artifact() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::in_dir(dir.path());
        let (model, vectorizer) = fitted_pair();
        store.save(&model, &vectorizer).unwrap();
        fs::remove_file(store.vectorizer_path()).unwrap();

        match store.load() {
            Err(SpamSiftError::MissingArtifacts { paths }) => {
                assert_eq!(paths, vec![store.vectorizer_path()]);
            }
            other => panic!("expected missing artifacts, got {other:?}"),
        }
    }

    #[test]
    fn test_corrupt_artifact() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::in_dir(dir.path());
        let (model, vectorizer) = fitted_pair();
        store.save(&model, &vectorizer).unwrap();
        fs::write(store.model_path(), b"garbage").unwrap();

        assert!(store.load().is_err());
    }
}
