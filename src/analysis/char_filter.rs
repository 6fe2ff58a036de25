//! Char filter implementations for text normalization.
//!
//! Char filters pre-process the raw text before it is passed to the
//! tokenizer. The message normalizer uses them to lowercase the input and to
//! blank out URLs and punctuation.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseCharFilter`] - Unicode lowercasing
//! - [`pattern_replace::PatternReplaceCharFilter`] - Regex-based replacement
//!
//! # Examples
//!
//! ```
//! use spamsift::analysis::char_filter::CharFilter;
//! use spamsift::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
//!
//! let filter = PatternReplaceCharFilter::new(r"[^a-z0-9\s]", " ").unwrap();
//! assert_eq!(filter.filter("hi!there"), "hi there");
//! ```

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text and return the filtered text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod pattern_replace;

pub use lowercase::LowercaseCharFilter;
pub use pattern_replace::PatternReplaceCharFilter;
