//! # spamsift
//!
//! A small SMS spam classifier.
//!
//! ## Pipeline
//!
//! - [`analysis`]: text normalization (lowercasing, URL and punctuation
//!   removal, stop words, Porter stemming)
//! - [`ml`]: TF-IDF features and multinomial Naive Bayes
//! - [`training`] / [`artifacts`] / [`inference`]: fit, persist and load the
//!   pipeline
//! - [`frontend`] and [`cli`]: interactive terminal front end and commands
//! - [`dataset`]: reading, generating, repairing and previewing CSV datasets
//!
//! ## Example
//!
//! ```
//! use spamsift::dataset::DatasetGenerator;
//! use spamsift::inference::SpamDetector;
//! use spamsift::ml::Label;
//! use spamsift::training::{Trainer, TrainingConfig};
//!
//! let messages = DatasetGenerator::new(Some(42)).with_counts(50, 50).generate();
//! let pipeline = Trainer::new(TrainingConfig::default())?.train(messages)?;
//! let detector = SpamDetector::from_pipeline(pipeline)?;
//!
//! let prediction = detector.predict("URGENT! Your ATM card will be blocked.")?;
//! assert_eq!(prediction.label, Label::Spam);
//! # Ok::<(), spamsift::error::SpamSiftError>(())
//! ```

pub mod analysis;
pub mod artifacts;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod frontend;
pub mod inference;
pub mod ml;
pub mod training;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
