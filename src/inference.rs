//! Inference entry point.
//!
//! [`SpamDetector`] loads the artifacts once and is then shared read-only by
//! every caller.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analysis::analyzer::TextNormalizer;
use crate::artifacts::ArtifactStore;
use crate::error::Result;
use crate::ml::classifier::Classifier;
use crate::ml::tfidf::TfIdfVectorizer;
use crate::ml::types::{ClassProbability, Label};
use crate::training::TrainedPipeline;

/// Number of explanatory tokens shown alongside a prediction.
pub const DEFAULT_TOP_TOKENS: usize = 12;

/// Result of classifying one message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub label: Label,
    /// Probability of `label`; `1.0` when the classifier has no probability output.
    pub confidence: f64,
    /// Class probabilities, most likely first.
    pub probabilities: Vec<ClassProbability>,
    /// The normalized text that was vectorized.
    pub cleaned: String,
}

impl Prediction {
    pub fn is_spam(&self) -> bool {
        self.label == Label::Spam
    }
}

/// A loaded normalizer + vectorizer + classifier.
pub struct SpamDetector {
    normalizer: TextNormalizer,
    vectorizer: TfIdfVectorizer,
    classifier: Box<dyn Classifier>,
    trained_at: Option<DateTime<Utc>>,
}

impl fmt::Debug for SpamDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpamDetector")
            .field("vectorizer", &self.vectorizer)
            .field("classifier", &self.classifier.name())
            .field("trained_at", &self.trained_at)
            .finish()
    }
}

impl SpamDetector {
    /// Combine a fitted vectorizer with any classifier.
    pub fn new(vectorizer: TfIdfVectorizer, classifier: Box<dyn Classifier>) -> Result<Self> {
        Ok(SpamDetector {
            normalizer: TextNormalizer::new()?,
            vectorizer,
            classifier,
            trained_at: None,
        })
    }

    /// Load the persisted artifacts.
    pub fn load(store: &ArtifactStore) -> Result<Self> {
        let (artifact, vectorizer) = store.load()?;
        let mut detector = Self::new(vectorizer, Box::new(artifact.model))?;
        detector.trained_at = Some(artifact.trained_at);
        Ok(detector)
    }

    /// Use a pipeline straight out of training.
    pub fn from_pipeline(pipeline: TrainedPipeline) -> Result<Self> {
        let mut detector = Self::new(pipeline.vectorizer, Box::new(pipeline.model.model))?;
        detector.trained_at = Some(pipeline.model.trained_at);
        Ok(detector)
    }

    /// Classify one raw message.
    pub fn predict(&self, text: &str) -> Result<Prediction> {
        let cleaned = self.normalizer.clean(text);
        let features = self.vectorizer.transform(&cleaned)?;
        let label = self.classifier.predict(&features)?;

        let (confidence, probabilities) = match self.classifier.predict_proba(&features)? {
            Some(mut probabilities) => {
                probabilities.sort_by(|a, b| b.probability.total_cmp(&a.probability));
                let confidence = probabilities
                    .iter()
                    .find(|p| p.label == label)
                    .map(|p| p.probability)
                    .unwrap_or(1.0);
                (confidence, probabilities)
            }
            None => (
                1.0,
                vec![ClassProbability {
                    label,
                    probability: 1.0,
                }],
            ),
        };

        log::debug!("predicted {label} ({confidence:.3}) for {cleaned:?}");
        Ok(Prediction {
            label,
            confidence,
            probabilities,
            cleaned,
        })
    }

    /// Vocabulary terms most indicative of `label`, strongest first.
    ///
    /// `None` when the classifier does not expose feature weights.
    pub fn top_tokens(&self, label: Label, k: usize) -> Option<Vec<String>> {
        let features = self.classifier.top_features(label, k)?;
        Some(
            features
                .into_iter()
                .filter_map(|(index, _)| self.vectorizer.feature_name(index).map(str::to_string))
                .collect(),
        )
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    /// When the loaded model was trained, if known.
    pub fn trained_at(&self) -> Option<DateTime<Utc>> {
        self.trained_at
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::naive_bayes::MultinomialNaiveBayes;
    use crate::ml::tfidf::VectorizerConfig;
    use crate::ml::vector::SparseVector;

    fn fitted_vectorizer() -> TfIdfVectorizer {
        let docs = vec![
            "congratul cash prize claim".to_string(),
            "call back".to_string(),
            "free recharg click".to_string(),
            "see tomorrow".to_string(),
        ];
        let mut vectorizer = TfIdfVectorizer::new(VectorizerConfig::default()).unwrap();
        vectorizer.fit(&docs).unwrap();
        vectorizer
    }

    fn detector() -> SpamDetector {
        let vectorizer = fitted_vectorizer();
        let docs = [
            "congratul cash prize claim",
            "call back",
            "free recharg click",
            "see tomorrow",
        ];
        let x: Vec<SparseVector> = docs.iter().map(|d| vectorizer.transform(d).unwrap()).collect();
        let y = [Label::Spam, Label::Ham, Label::Spam, Label::Ham];

        let mut model = MultinomialNaiveBayes::default();
        model.fit(&x, &y).unwrap();
        SpamDetector::new(vectorizer, Box::new(model)).unwrap()
    }

    /// Predicts spam without probabilities or explanations.
    struct AlwaysSpam;

    impl Classifier for AlwaysSpam {
        fn classes(&self) -> &[Label] {
            &Label::ALL
        }

        fn predict(&self, _features: &SparseVector) -> Result<Label> {
            Ok(Label::Spam)
        }

        fn name(&self) -> &str {
            "always_spam"
        }
    }

    #[test]
    fn test_predict_spam() {
        let prediction = detector()
            .predict("Congratulations! You won a CASH prize. Claim now.")
            .unwrap();

        assert!(prediction.is_spam());
        assert_eq!(prediction.cleaned, "congratul cash prize claim");
        assert!(prediction.confidence > 0.5);
        assert_eq!(prediction.probabilities[0].label, Label::Spam);

        let total: f64 = prediction.probabilities.iter().map(|p| p.probability).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_predict_ham() {
        let prediction = detector().predict("I will call you back.").unwrap();
        assert_eq!(prediction.label, Label::Ham);
    }

    #[test]
    fn test_empty_message_uses_priors() {
        let prediction = detector().predict("").unwrap();
        assert_eq!(prediction.cleaned, "");
        assert!((prediction.confidence - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_classifier_without_probabilities() {
        let detector = SpamDetector::new(fitted_vectorizer(), Box::new(AlwaysSpam)).unwrap();
        let prediction = detector.predict("anything").unwrap();

        assert_eq!(prediction.label, Label::Spam);
        assert_eq!(prediction.confidence, 1.0);
        assert_eq!(prediction.probabilities.len(), 1);
        assert!(detector.top_tokens(Label::Spam, 12).is_none());
    }

    #[test]
    fn test_top_tokens() {
        let tokens = detector().top_tokens(Label::Spam, 3).unwrap();
        assert_eq!(tokens.len(), 3);
        assert!(!tokens.contains(&"call".to_string()));
        assert!(!tokens.contains(&"tomorrow".to_string()));
    }
}
