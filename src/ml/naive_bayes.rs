//! Multinomial Naive Bayes over TF-IDF features.
//!
//! With additive smoothing `alpha`, the per-class feature log probabilities are
//!
//! ```text
//! log P(f | c) = ln(count(c, f) + alpha) - ln(sum_f count(c, f) + alpha * n_features)
//! ```
//!
//! and the class prior is the empirical class frequency. Feature "counts" are
//! the accumulated TF-IDF weights, so fractional values are expected.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpamSiftError};
use crate::ml::classifier::Classifier;
use crate::ml::types::{ClassProbability, Label};
use crate::ml::vector::SparseVector;

/// Default additive smoothing.
pub const DEFAULT_ALPHA: f64 = 1.0;

/// Multinomial Naive Bayes classifier.
///
/// # Examples
///
/// ```
/// use spamsift::ml::{Classifier, Label, MultinomialNaiveBayes, SparseVector};
///
/// let x = vec![
///     SparseVector::from_entries(2, vec![(0, 1.0)]),
///     SparseVector::from_entries(2, vec![(1, 1.0)]),
/// ];
/// let y = vec![Label::Spam, Label::Ham];
///
/// let mut model = MultinomialNaiveBayes::default();
/// model.fit(&x, &y).unwrap();
///
/// let query = SparseVector::from_entries(2, vec![(0, 1.0)]);
/// assert_eq!(model.predict(&query).unwrap(), Label::Spam);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NaiveBayesState")]
pub struct MultinomialNaiveBayes {
    alpha: f64,
    /// Classes seen during fitting, sorted.
    classes: Vec<Label>,
    /// Number of training samples per class.
    class_count: Vec<f64>,
    class_log_prior: Vec<f64>,
    /// Accumulated feature weights per class.
    feature_count: Vec<Vec<f64>>,
    feature_log_prob: Vec<Vec<f64>>,
    n_features: usize,
}

impl Default for MultinomialNaiveBayes {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            classes: Vec::new(),
            class_count: Vec::new(),
            class_log_prior: Vec::new(),
            feature_count: Vec::new(),
            feature_log_prob: Vec::new(),
            n_features: 0,
        }
    }
}

impl MultinomialNaiveBayes {
    /// Create an unfitted model with the given smoothing.
    pub fn new(alpha: f64) -> Result<Self> {
        if !alpha.is_finite() || alpha <= 0.0 {
            return Err(SpamSiftError::invalid_argument(format!(
                "alpha must be a positive finite number, got {alpha}"
            )));
        }

        Ok(Self {
            alpha,
            ..Self::default()
        })
    }

    /// Fit the model on feature vectors and their labels.
    pub fn fit(&mut self, x: &[SparseVector], y: &[Label]) -> Result<()> {
        if x.len() != y.len() {
            return Err(SpamSiftError::model(format!(
                "found {} feature vectors but {} labels",
                x.len(),
                y.len()
            )));
        }
        let Some(first) = x.first() else {
            return Err(SpamSiftError::model("cannot fit on zero samples"));
        };

        let n_features = first.dimension();
        if let Some(bad) = x.iter().find(|v| v.dimension() != n_features) {
            return Err(SpamSiftError::model(format!(
                "inconsistent feature dimension: expected {n_features}, found {}",
                bad.dimension()
            )));
        }

        let mut classes: Vec<Label> = y.to_vec();
        classes.sort();
        classes.dedup();

        let mut class_count = vec![0.0_f64; classes.len()];
        let mut feature_count = vec![vec![0.0_f64; n_features]; classes.len()];
        for (features, label) in x.iter().zip(y) {
            let c = classes
                .binary_search(label)
                .map_err(|_| SpamSiftError::model(format!("unexpected label {label}")))?;
            class_count[c] += 1.0;
            for (index, value) in features.iter() {
                feature_count[c][index] += value;
            }
        }

        let n_samples = x.len() as f64;
        let class_log_prior = class_count
            .iter()
            .map(|count| count.ln() - n_samples.ln())
            .collect();

        let smoothing = self.alpha * n_features as f64;
        let feature_log_prob = feature_count
            .iter()
            .map(|counts| {
                let denominator = (counts.iter().sum::<f64>() + smoothing).ln();
                counts
                    .iter()
                    .map(|count| (count + self.alpha).ln() - denominator)
                    .collect()
            })
            .collect();

        self.classes = classes;
        self.class_count = class_count;
        self.class_log_prior = class_log_prior;
        self.feature_count = feature_count;
        self.feature_log_prob = feature_log_prob;
        self.n_features = n_features;

        log::debug!(
            "fitted naive bayes: {} samples, {} classes, {} features",
            x.len(),
            self.classes.len(),
            n_features
        );

        Ok(())
    }

    /// Unnormalized log posterior for every class.
    pub fn joint_log_likelihood(&self, features: &SparseVector) -> Result<Vec<f64>> {
        if self.classes.is_empty() {
            return Err(SpamSiftError::model("classifier is not fitted"));
        }
        if features.dimension() != self.n_features {
            return Err(SpamSiftError::model(format!(
                "expected {} features, found {}",
                self.n_features,
                features.dimension()
            )));
        }

        Ok(self
            .class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_probs)| prior + features.dot_dense(log_probs))
            .collect())
    }

    /// Smoothing parameter.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Number of features the model was fitted on.
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Training samples per class, in class order.
    pub fn class_count(&self) -> &[f64] {
        &self.class_count
    }

    /// Log prior per class, in class order.
    pub fn class_log_prior(&self) -> &[f64] {
        &self.class_log_prior
    }

    /// Per-feature log probabilities for `label`.
    pub fn feature_log_prob(&self, label: Label) -> Option<&[f64]> {
        let c = self.classes.binary_search(&label).ok()?;
        Some(&self.feature_log_prob[c])
    }

    pub fn is_fitted(&self) -> bool {
        !self.classes.is_empty()
    }
}

/// Deserialized model fields, checked for consistency before use.
#[derive(Deserialize)]
struct NaiveBayesState {
    alpha: f64,
    classes: Vec<Label>,
    class_count: Vec<f64>,
    class_log_prior: Vec<f64>,
    feature_count: Vec<Vec<f64>>,
    feature_log_prob: Vec<Vec<f64>>,
    n_features: usize,
}

impl TryFrom<NaiveBayesState> for MultinomialNaiveBayes {
    type Error = SpamSiftError;

    fn try_from(state: NaiveBayesState) -> Result<Self> {
        if !state.alpha.is_finite() || state.alpha <= 0.0 {
            return Err(SpamSiftError::serialization(format!(
                "naive bayes alpha must be positive, got {}",
                state.alpha
            )));
        }
        if state.classes.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(SpamSiftError::serialization(
                "naive bayes classes are not sorted and unique",
            ));
        }

        let n_classes = state.classes.len();
        let per_class = [
            ("class_count", state.class_count.len()),
            ("class_log_prior", state.class_log_prior.len()),
            ("feature_count", state.feature_count.len()),
            ("feature_log_prob", state.feature_log_prob.len()),
        ];
        if let Some((field, len)) = per_class.iter().find(|(_, len)| *len != n_classes) {
            return Err(SpamSiftError::serialization(format!(
                "naive bayes has {n_classes} classes but {len} {field} entries"
            )));
        }

        if let Some(row) = state
            .feature_count
            .iter()
            .chain(&state.feature_log_prob)
            .find(|row| row.len() != state.n_features)
        {
            return Err(SpamSiftError::serialization(format!(
                "naive bayes expects {} features per class, found {}",
                state.n_features,
                row.len()
            )));
        }

        Ok(Self {
            alpha: state.alpha,
            classes: state.classes,
            class_count: state.class_count,
            class_log_prior: state.class_log_prior,
            feature_count: state.feature_count,
            feature_log_prob: state.feature_log_prob,
            n_features: state.n_features,
        })
    }
}

fn log_sum_exp(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max.is_infinite() {
        return max;
    }
    max + values.iter().map(|v| (v - max).exp()).sum::<f64>().ln()
}

impl Classifier for MultinomialNaiveBayes {
    fn classes(&self) -> &[Label] {
        &self.classes
    }

    fn predict(&self, features: &SparseVector) -> Result<Label> {
        let jll = self.joint_log_likelihood(features)?;

        // First maximum wins on ties.
        let mut best = 0;
        for (c, score) in jll.iter().enumerate().skip(1) {
            if *score > jll[best] {
                best = c;
            }
        }

        Ok(self.classes[best])
    }

    fn predict_proba(&self, features: &SparseVector) -> Result<Option<Vec<ClassProbability>>> {
        let jll = self.joint_log_likelihood(features)?;
        let norm = log_sum_exp(&jll);

        Ok(Some(
            self.classes
                .iter()
                .zip(jll)
                .map(|(&label, score)| ClassProbability {
                    label,
                    probability: (score - norm).exp(),
                })
                .collect(),
        ))
    }

    fn top_features(&self, label: Label, k: usize) -> Option<Vec<(usize, f64)>> {
        let log_probs = self.feature_log_prob(label)?;

        let mut ranked: Vec<(usize, f64)> = log_probs.iter().copied().enumerate().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(k);

        Some(ranked)
    }

    fn name(&self) -> &str {
        "multinomial_nb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sv(dimension: usize, entries: &[(usize, f64)]) -> SparseVector {
        SparseVector::from_entries(dimension, entries.iter().copied())
    }

    fn fitted() -> MultinomialNaiveBayes {
        // Features: 0 = "prize", 1 = "claim", 2 = "home"
        let x = vec![
            sv(3, &[(0, 2.0), (1, 1.0)]),
            sv(3, &[(0, 1.0)]),
            sv(3, &[(2, 3.0)]),
            sv(3, &[(2, 1.0), (1, 1.0)]),
        ];
        let y = vec![Label::Spam, Label::Spam, Label::Ham, Label::Ham];

        let mut model = MultinomialNaiveBayes::default();
        model.fit(&x, &y).unwrap();
        model
    }

    #[test]
    fn test_fit_parameters() {
        let model = fitted();

        assert_eq!(model.classes(), &[Label::Ham, Label::Spam]);
        assert_eq!(model.class_count(), &[2.0, 2.0]);
        assert!((model.class_log_prior()[0] - 0.5_f64.ln()).abs() < 1e-12);

        // spam counts: [3, 1, 0], total 4, smoothed denominator 4 + 3 = 7
        let spam = model.feature_log_prob(Label::Spam).unwrap();
        assert!((spam[0] - (4.0_f64 / 7.0).ln()).abs() < 1e-12);
        assert!((spam[2] - (1.0_f64 / 7.0).ln()).abs() < 1e-12);
    }

    #[test]
    fn test_feature_log_prob_sums_to_one() {
        let model = fitted();

        for label in Label::ALL {
            let total: f64 = model
                .feature_log_prob(label)
                .unwrap()
                .iter()
                .map(|lp| lp.exp())
                .sum();
            assert!((total - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_predict_and_proba() {
        let model = fitted();

        let spammy = sv(3, &[(0, 1.0)]);
        assert_eq!(model.predict(&spammy).unwrap(), Label::Spam);
        assert_eq!(model.predict(&sv(3, &[(2, 1.0)])).unwrap(), Label::Ham);

        let proba = model.predict_proba(&spammy).unwrap().unwrap();
        assert_eq!(proba.len(), 2);
        let total: f64 = proba.iter().map(|p| p.probability).sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!(proba[1].probability > proba[0].probability);
    }

    #[test]
    fn test_zero_vector_falls_back_to_prior() {
        let x = vec![sv(2, &[(0, 1.0)]), sv(2, &[(0, 1.0)]), sv(2, &[(1, 1.0)])];
        let y = vec![Label::Ham, Label::Ham, Label::Spam];

        let mut model = MultinomialNaiveBayes::default();
        model.fit(&x, &y).unwrap();

        let proba = model.predict_proba(&SparseVector::zeros(2)).unwrap().unwrap();
        assert!((proba[0].probability - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(model.predict(&SparseVector::zeros(2)).unwrap(), Label::Ham);
    }

    #[test]
    fn test_top_features() {
        let model = fitted();

        let top = model.top_features(Label::Spam, 2).unwrap();
        assert_eq!(top.iter().map(|(i, _)| *i).collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(model.top_features(Label::Ham, 10).unwrap().len(), 3);
    }

    #[test]
    fn test_fit_errors() {
        let mut model = MultinomialNaiveBayes::default();
        assert!(model.fit(&[], &[]).is_err());
        assert!(model.fit(&[sv(2, &[])], &[]).is_err());
        assert!(
            model
                .fit(&[sv(2, &[]), sv(3, &[])], &[Label::Ham, Label::Spam])
                .is_err()
        );
        assert!(model.predict(&sv(2, &[])).is_err());
        assert!(MultinomialNaiveBayes::new(0.0).is_err());
        assert!(MultinomialNaiveBayes::new(f64::NAN).is_err());
    }

    #[test]
    fn test_deserialize_rejects_inconsistent_model() {
        let model = fitted();
        let bytes = bincode::serialize(&model).unwrap();
        let restored: MultinomialNaiveBayes = bincode::deserialize(&bytes).unwrap();
        assert_eq!(restored, model);

        let mut short_prior = model.clone();
        short_prior.class_log_prior.pop();
        let bytes = bincode::serialize(&short_prior).unwrap();
        assert!(bincode::deserialize::<MultinomialNaiveBayes>(&bytes).is_err());

        let mut unsorted = model.clone();
        unsorted.classes.reverse();
        let bytes = bincode::serialize(&unsorted).unwrap();
        assert!(bincode::deserialize::<MultinomialNaiveBayes>(&bytes).is_err());

        let mut ragged = model;
        ragged.feature_log_prob[1].pop();
        let bytes = bincode::serialize(&ragged).unwrap();
        assert!(bincode::deserialize::<MultinomialNaiveBayes>(&bytes).is_err());
    }

    #[test]
    fn test_dimension_mismatch_on_predict() {
        let model = fitted();
        assert!(model.predict(&sv(4, &[(0, 1.0)])).is_err());
    }
}
