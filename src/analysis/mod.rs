//! Text analysis for spamsift.
//!
//! Raw message text flows through char filters, a tokenizer and token
//! filters. [`TextNormalizer`] assembles the pipeline used to clean SMS
//! messages before vectorization.

pub mod analyzer;
pub mod char_filter;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
