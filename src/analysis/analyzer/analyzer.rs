//! Core analyzer trait definition.
//!
//! Analyzers are the complete text processing pipeline:
//!
//! ```text
//! Raw Text → Char Filters → Tokenizer → Filter 1 → ... → Filter N → Token Stream
//! ```
//!
//! # Available Implementations
//!
//! - [`PipelineAnalyzer`](super::PipelineAnalyzer) - Custom tokenizer + filter chains
//! - [`TextNormalizer`](super::TextNormalizer) - The SMS cleaning pipeline
//!
//! # Examples
//!
//! ```
//! use spamsift::analysis::analyzer::{Analyzer, TextNormalizer};
//!
//! let analyzer = TextNormalizer::new().unwrap();
//! let tokens: Vec<_> = analyzer.analyze("Claim your PRIZE").unwrap().collect();
//!
//! assert_eq!(tokens[0].text, "claim");
//! assert_eq!(tokens[1].text, "prize");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// The trait requires `Send + Sync` so analyzers can sit behind an `Arc`
/// shared by the vectorizer and its clones.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &str;
}
