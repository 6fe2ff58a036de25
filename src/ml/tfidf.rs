//! TF-IDF vectorizer for text feature extraction.
//!
//! Terms are extracted with a regex token pattern, weighted by raw term
//! count times smoothed inverse document frequency, and each row is scaled to
//! unit L2 norm.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::tokenizer::RegexTokenizer;
use crate::analysis::tokenizer::regex::DEFAULT_TOKEN_PATTERN;
use crate::error::{Result, SpamSiftError};
use crate::ml::vector::SparseVector;

/// Default vocabulary cap.
pub const DEFAULT_MAX_FEATURES: usize = 5000;

/// Configuration for [`TfIdfVectorizer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerConfig {
    /// Keep only the most frequent terms across the corpus (`None` keeps all).
    pub max_features: Option<usize>,
    /// Regex whose matches become terms.
    pub token_pattern: String,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: Some(DEFAULT_MAX_FEATURES),
            token_pattern: DEFAULT_TOKEN_PATTERN.to_string(),
        }
    }
}

/// Serialized form of a vectorizer; the analyzer is rebuilt from the token pattern.
#[derive(Serialize, Deserialize)]
struct VectorizerState {
    config: VectorizerConfig,
    terms: Vec<String>,
    idf: Vec<f64>,
    n_documents: usize,
}

/// TF-IDF vectorizer for text feature extraction.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "VectorizerState", into = "VectorizerState")]
pub struct TfIdfVectorizer {
    config: VectorizerConfig,
    /// Feature index -> term, in lexicographic order.
    terms: Vec<String>,
    /// Vocabulary: term -> feature index.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency for each feature.
    idf: Vec<f64>,
    /// Total number of documents seen during fitting.
    n_documents: usize,
    /// Analyzer for tokenization.
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("config", &self.config)
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Create an unfitted vectorizer.
    pub fn new(config: VectorizerConfig) -> Result<Self> {
        if config.max_features == Some(0) {
            return Err(SpamSiftError::invalid_argument(
                "max_features must be at least 1",
            ));
        }
        let analyzer = Self::build_analyzer(&config.token_pattern)?;

        Ok(Self {
            config,
            terms: Vec::new(),
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            n_documents: 0,
            analyzer,
        })
    }

    fn build_analyzer(token_pattern: &str) -> Result<Arc<dyn Analyzer>> {
        let tokenizer = Arc::new(RegexTokenizer::with_pattern(token_pattern)?);
        Ok(Arc::new(
            PipelineAnalyzer::new(tokenizer).with_name("tfidf_terms"),
        ))
    }

    /// Fit the vocabulary and IDF weights on training documents.
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        if documents.is_empty() {
            return Err(SpamSiftError::model("cannot fit vectorizer on zero documents"));
        }

        let mut term_frequency: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let tokens = self.tokenize(doc)?;
            let unique_tokens: HashSet<&String> = tokens.iter().collect();
            for token in unique_tokens {
                *document_frequency.entry(token.clone()).or_insert(0) += 1;
            }
            for token in tokens {
                *term_frequency.entry(token).or_insert(0) += 1;
            }
        }

        if term_frequency.is_empty() {
            return Err(SpamSiftError::model(
                "empty vocabulary; the documents contain no terms",
            ));
        }

        let mut ranked: Vec<(String, usize)> = term_frequency.into_iter().collect();
        if let Some(max_features) = self.config.max_features
            && ranked.len() > max_features
        {
            ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            ranked.truncate(max_features);
        }

        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort();

        let n = documents.len() as f64;
        let idf = terms
            .iter()
            .map(|term| {
                let df = document_frequency.get(term).copied().unwrap_or(0) as f64;
                // IDF = ln((N + 1) / (df + 1)) + 1
                ((n + 1.0) / (df + 1.0)).ln() + 1.0
            })
            .collect();

        self.vocabulary = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();
        self.terms = terms;
        self.idf = idf;
        self.n_documents = documents.len();

        log::debug!(
            "fitted tfidf vocabulary: {} terms from {} documents",
            self.terms.len(),
            self.n_documents
        );

        Ok(())
    }

    /// Transform a document into an L2-normalized TF-IDF vector.
    ///
    /// Terms outside the fitted vocabulary are ignored.
    pub fn transform(&self, document: &str) -> Result<SparseVector> {
        if !self.is_fitted() {
            return Err(SpamSiftError::model("vectorizer is not fitted"));
        }

        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in self.tokenize(document)? {
            if let Some(&idx) = self.vocabulary.get(&token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut vector = SparseVector::from_entries(
            self.terms.len(),
            counts
                .into_iter()
                .map(|(idx, count)| (idx, count * self.idf[idx])),
        );
        vector.l2_normalize();

        Ok(vector)
    }

    /// Transform many documents.
    pub fn transform_all(&self, documents: &[String]) -> Result<Vec<SparseVector>> {
        documents.iter().map(|doc| self.transform(doc)).collect()
    }

    /// Fit on `documents`, then transform them.
    pub fn fit_transform(&mut self, documents: &[String]) -> Result<Vec<SparseVector>> {
        self.fit(documents)?;
        self.transform_all(documents)
    }

    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyzer.analyze(text)?.map(|token| token.text).collect())
    }

    /// Whether [`fit`](Self::fit) has been run.
    pub fn is_fitted(&self) -> bool {
        !self.terms.is_empty()
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    /// Feature names in index order.
    pub fn feature_names(&self) -> &[String] {
        &self.terms
    }

    /// The term for a feature index.
    pub fn feature_name(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    /// The feature index for a term.
    pub fn feature_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// IDF weight of a feature.
    pub fn idf(&self, index: usize) -> Option<f64> {
        self.idf.get(index).copied()
    }

    /// Number of documents the vectorizer was fitted on.
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }
}

impl TryFrom<VectorizerState> for TfIdfVectorizer {
    type Error = SpamSiftError;

    fn try_from(state: VectorizerState) -> Result<Self> {
        if state.terms.len() != state.idf.len() {
            return Err(SpamSiftError::serialization(format!(
                "vectorizer has {} terms but {} idf weights",
                state.terms.len(),
                state.idf.len()
            )));
        }

        let analyzer = Self::build_analyzer(&state.config.token_pattern)?;
        let vocabulary = state
            .terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();

        Ok(Self {
            config: state.config,
            terms: state.terms,
            vocabulary,
            idf: state.idf,
            n_documents: state.n_documents,
            analyzer,
        })
    }
}

impl From<TfIdfVectorizer> for VectorizerState {
    fn from(vectorizer: TfIdfVectorizer) -> Self {
        Self {
            config: vectorizer.config,
            terms: vectorizer.terms,
            idf: vectorizer.idf,
            n_documents: vectorizer.n_documents,
        }
    }
}
