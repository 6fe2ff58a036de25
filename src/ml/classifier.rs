//! Classifier trait definition.

use crate::error::Result;
use crate::ml::types::{ClassProbability, Label};
use crate::ml::vector::SparseVector;

/// A trained classifier over TF-IDF feature vectors.
///
/// Only [`predict`](Classifier::predict) is required to produce a label.
/// Probability output and per-class feature explanations are optional
/// capabilities; callers fall back gracefully when they return `None`.
pub trait Classifier: Send + Sync {
    /// Class labels in the order used by probability output.
    fn classes(&self) -> &[Label];

    /// Predict the label for a feature vector.
    fn predict(&self, features: &SparseVector) -> Result<Label>;

    /// Probability for every class, in [`classes`](Classifier::classes) order.
    ///
    /// Returns `Ok(None)` when the classifier cannot estimate probabilities.
    fn predict_proba(&self, features: &SparseVector) -> Result<Option<Vec<ClassProbability>>> {
        let _ = features;
        Ok(None)
    }

    /// The `k` feature indices most indicative of `label`, strongest first,
    /// paired with their weights.
    fn top_features(&self, label: Label, k: usize) -> Option<Vec<(usize, f64)>> {
        let _ = (label, k);
        None
    }

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Always answers ham and exposes nothing else.
    struct ConstantClassifier;

    impl Classifier for ConstantClassifier {
        fn classes(&self) -> &[Label] {
            &Label::ALL
        }

        fn predict(&self, _features: &SparseVector) -> Result<Label> {
            Ok(Label::Ham)
        }

        fn name(&self) -> &str {
            "constant"
        }
    }

    #[test]
    fn test_optional_capabilities_default_to_none() {
        let classifier = ConstantClassifier;
        let features = SparseVector::zeros(4);

        assert_eq!(classifier.predict(&features).unwrap(), Label::Ham);
        assert!(classifier.predict_proba(&features).unwrap().is_none());
        assert!(classifier.top_features(Label::Spam, 3).is_none());
    }
}
