//! Training driver: dataset → cleaned corpus → TF-IDF → Naive Bayes.
//!
//! The labeled rows are split with a seeded shuffle, the vectorizer is fitted
//! on the training split only, and the held-out split is used for the
//! evaluation report.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::analysis::analyzer::TextNormalizer;
use crate::artifacts::{ArtifactStore, ModelArtifact};
use crate::dataset::reader::{Message, read_messages};
use crate::error::{Result, SpamSiftError};
use crate::ml::classifier::Classifier;
use crate::ml::metrics::{ClassificationReport, ConfusionMatrix, accuracy};
use crate::ml::naive_bayes::MultinomialNaiveBayes;
use crate::ml::split::train_test_split;
use crate::ml::tfidf::{TfIdfVectorizer, VectorizerConfig};
use crate::ml::types::Label;

pub use crate::config::TrainingConfig;

/// Evaluation and bookkeeping for one training run.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    /// Labeled rows used.
    pub n_samples: usize,
    /// Rows skipped because their label was not `spam`/`ham`.
    pub n_skipped: usize,
    pub n_train: usize,
    pub n_test: usize,
    pub vocabulary_size: usize,
    pub accuracy: f64,
    pub classification: ClassificationReport,
    pub confusion_matrix: ConfusionMatrix,
}

impl fmt::Display for TrainingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Trained on {} messages ({} train / {} test, {} skipped), vocabulary {} terms",
            self.n_samples, self.n_train, self.n_test, self.n_skipped, self.vocabulary_size
        )?;
        writeln!(f)?;
        writeln!(f, "Accuracy: {:.4}", self.accuracy)?;
        writeln!(f)?;
        writeln!(f, "Report:")?;
        write!(f, "{}", self.classification)?;
        writeln!(f)?;
        writeln!(f, "Confusion Matrix:")?;
        write!(f, "{}", self.confusion_matrix)
    }
}

/// A fitted vectorizer and model, ready to be persisted.
#[derive(Debug, Clone)]
pub struct TrainedPipeline {
    pub vectorizer: TfIdfVectorizer,
    pub model: ModelArtifact,
    pub report: TrainingReport,
}

impl TrainedPipeline {
    /// Persist the vectorizer and model.
    pub fn save(&self, store: &ArtifactStore) -> Result<()> {
        store.save(&self.model, &self.vectorizer)
    }
}

/// Fits the spam detection pipeline.
#[derive(Debug, Clone)]
pub struct Trainer {
    config: TrainingConfig,
    normalizer: TextNormalizer,
}

impl Trainer {
    pub fn new(config: TrainingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Trainer {
            config,
            normalizer: TextNormalizer::new()?,
        })
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Read a dataset file and train on it.
    pub fn train_from_csv<P: AsRef<Path>>(&self, path: P) -> Result<TrainedPipeline> {
        let path = path.as_ref();
        log::info!("reading dataset from {}", path.display());
        self.train(read_messages(path)?)
    }

    /// Train on in-memory messages.
    pub fn train(&self, messages: Vec<Message>) -> Result<TrainedPipeline> {
        let total = messages.len();
        let labeled: Vec<(String, Label)> = messages
            .into_iter()
            .filter_map(|message| match message.label {
                Some(label) => Some((self.normalizer.clean(&message.text), label)),
                None => {
                    log::debug!("skipping unlabeled message: {:?}", message.text);
                    None
                }
            })
            .collect();

        let n_skipped = total - labeled.len();
        if n_skipped > 0 {
            log::warn!("skipped {n_skipped} rows without a spam/ham label");
        }
        if labeled.is_empty() {
            return Err(SpamSiftError::dataset(
                "no rows labeled 'spam' or 'ham' to train on",
            ));
        }
        let n_samples = labeled.len();

        let (train, test) = train_test_split(labeled, self.config.test_size, self.config.seed)?;
        let (train_texts, train_labels): (Vec<String>, Vec<Label>) = train.into_iter().unzip();
        let (test_texts, test_labels): (Vec<String>, Vec<Label>) = test.into_iter().unzip();

        let mut vectorizer = TfIdfVectorizer::new(VectorizerConfig {
            max_features: self.config.max_features,
            ..VectorizerConfig::default()
        })?;
        let x_train = vectorizer.fit_transform(&train_texts)?;
        log::info!(
            "fitted vectorizer on {} messages: {} terms",
            train_texts.len(),
            vectorizer.vocabulary_size()
        );

        let mut model = MultinomialNaiveBayes::new(self.config.alpha)?;
        model.fit(&x_train, &train_labels)?;

        let x_test = vectorizer.transform_all(&test_texts)?;
        let y_pred = x_test
            .iter()
            .map(|features| model.predict(features))
            .collect::<Result<Vec<Label>>>()?;

        let report = TrainingReport {
            n_samples,
            n_skipped,
            n_train: train_texts.len(),
            n_test: test_texts.len(),
            vocabulary_size: vectorizer.vocabulary_size(),
            accuracy: accuracy(&test_labels, &y_pred)?,
            classification: ClassificationReport::new(&test_labels, &y_pred)?,
            confusion_matrix: ConfusionMatrix::new(&test_labels, &y_pred)?,
        };
        log::info!("held-out accuracy: {:.4}", report.accuracy);

        Ok(TrainedPipeline {
            vectorizer,
            model: ModelArtifact::new(model),
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::generator::DatasetGenerator;

    #[test]
    fn test_train_on_generated_data() {
        let messages = DatasetGenerator::new(Some(42)).with_counts(60, 60).generate();
        let trainer = Trainer::new(TrainingConfig::default()).unwrap();

        let pipeline = trainer.train(messages).unwrap();
        let report = &pipeline.report;

        assert_eq!(report.n_samples, 120);
        assert_eq!(report.n_test, 24);
        assert_eq!(report.n_train, 96);
        assert_eq!(report.n_skipped, 0);
        assert!(report.accuracy > 0.9, "accuracy {}", report.accuracy);
        assert_eq!(report.vocabulary_size, pipeline.vectorizer.vocabulary_size());
        assert_eq!(pipeline.model.model.n_features(), report.vocabulary_size);
    }

    #[test]
    fn test_unlabeled_rows_skipped() {
        let mut messages = DatasetGenerator::new(Some(1)).with_counts(20, 20).generate();
        messages.push(Message::unlabeled("orphan line"));
        messages.push(Message::unlabeled("another"));

        let pipeline = Trainer::new(TrainingConfig::default())
            .unwrap()
            .train(messages)
            .unwrap();
        assert_eq!(pipeline.report.n_skipped, 2);
        assert_eq!(pipeline.report.n_samples, 40);
    }

    #[test]
    fn test_no_labeled_rows() {
        let trainer = Trainer::new(TrainingConfig::default()).unwrap();
        let err = trainer
            .train(vec![Message::unlabeled("hello"), Message::unlabeled("there")])
            .unwrap_err();
        assert!(matches!(err, SpamSiftError::Dataset(_)));
    }

    #[test]
    fn test_too_few_rows_to_split() {
        let trainer = Trainer::new(TrainingConfig::default()).unwrap();
        assert!(trainer.train(vec![Message::new(Label::Spam, "win cash")]).is_err());
    }

    #[test]
    fn test_invalid_config() {
        let config = TrainingConfig {
            test_size: 0.0,
            ..TrainingConfig::default()
        };
        assert!(Trainer::new(config).is_err());
    }

    #[test]
    fn test_report_display() {
        let messages = DatasetGenerator::new(Some(2)).with_counts(30, 30).generate();
        let pipeline = Trainer::new(TrainingConfig::default())
            .unwrap()
            .train(messages)
            .unwrap();

        let rendered = pipeline.report.to_string();
        assert!(rendered.contains("Accuracy:"));
        assert!(rendered.contains("Confusion Matrix:"));
        assert!(rendered.contains("weighted avg"));
    }
}
