//! Repair of dataset files whose text column contains unquoted commas.
//!
//! Each line is split on its first comma only: everything before it is the
//! label and everything after it is the text. The result is rewritten with
//! proper CSV quoting.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::dataset::DATASET_HEADER;
use crate::dataset::reader::decode_text;
use crate::error::{Result, SpamSiftError};

/// What a repair run did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepairSummary {
    /// Data rows written (header excluded).
    pub rows_written: usize,
    /// Whether the input's own header line was dropped.
    pub header_skipped: bool,
    /// Lines without any comma, written with an empty label.
    pub unlabeled_rows: usize,
}

fn is_header(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.starts_with("label") || lower.starts_with("v1")
}

/// Split one malformed line into `(label, text)`.
pub fn split_line(line: &str) -> (String, String) {
    match line.split_once(',') {
        Some((label, text)) => (label.trim().to_string(), text.trim().to_string()),
        None => (String::new(), line.trim().to_string()),
    }
}

/// Repair `input` and write well-formed CSV to `writer`.
pub fn repair_text<W: Write>(input: &str, writer: W) -> Result<RepairSummary> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(DATASET_HEADER)?;

    let mut summary = RepairSummary::default();
    for (index, line) in input.lines().enumerate() {
        if index == 0 && is_header(line) {
            summary.header_skipped = true;
            continue;
        }

        let (label, text) = split_line(line);
        if !line.contains(',') {
            log::debug!("line {}: no comma, writing with empty label", index + 1);
            summary.unlabeled_rows += 1;
        }

        csv_writer.write_record([label.as_str(), text.as_str()])?;
        summary.rows_written += 1;
    }
    csv_writer.flush()?;

    Ok(summary)
}

/// Repair the file at `input`, writing the result to `output`.
///
/// The input is decoded as UTF-8, or as Latin-1 when it is not valid UTF-8.
/// The output is always UTF-8.
pub fn repair_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<RepairSummary> {
    let (input, output) = (input.as_ref(), output.as_ref());

    let bytes = fs::read(input).map_err(|e| {
        SpamSiftError::dataset(format!("Failed to read {}: {e}", input.display()))
    })?;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(output).map_err(|e| {
        SpamSiftError::dataset(format!("Failed to create {}: {e}", output.display()))
    })?;

    let summary = repair_text(&decode_text(&bytes), file)?;
    log::info!(
        "repaired {} rows from {} into {}",
        summary.rows_written,
        input.display(),
        output.display()
    );

    Ok(summary)
}
