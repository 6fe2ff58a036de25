//! Dataset utilities.
//!
//! Datasets are two-column CSV files (`label`, `text`) with a header row.
//! This module reads them into [`Message`]s, generates synthetic datasets,
//! repairs files with unquoted commas in the text column, and summarizes
//! files for preview.

pub mod generator;
pub mod preview;
pub mod reader;
pub mod repair;

pub use generator::{DatasetGenerator, HAM_TEMPLATES, SPAM_TEMPLATES};
pub use preview::{DatasetPreview, LabelCount};
pub use reader::{Message, Row, decode_text, read_messages, read_rows, read_rows_from_bytes};
pub use repair::{RepairSummary, repair_file, repair_text};

/// Header written to every dataset file.
pub const DATASET_HEADER: [&str; 2] = ["label", "text"];
