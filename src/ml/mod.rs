//! Machine learning for spamsift.
//!
//! Feature extraction ([`tfidf`]), the classifier seam ([`classifier`]) and
//! its multinomial Naive Bayes implementation, plus evaluation helpers used
//! by the training driver.

pub mod classifier;
pub mod metrics;
pub mod naive_bayes;
pub mod split;
pub mod tfidf;
pub mod types;
pub mod vector;

pub use classifier::*;
pub use metrics::*;
pub use naive_bayes::*;
pub use split::*;
pub use tfidf::*;
pub use types::*;
pub use vector::*;
