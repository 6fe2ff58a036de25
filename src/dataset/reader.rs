//! Reading labeled message datasets.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use serde::Serialize;

use crate::error::{Result, SpamSiftError};
use crate::ml::types::Label;

/// A raw dataset row, exactly as found in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    /// 1-based line number where the record starts.
    pub line: u64,
    pub label: String,
    pub text: String,
}

/// A message with its label, when the label is one of `spam`/`ham`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub label: Option<Label>,
    pub text: String,
}

impl Message {
    pub fn new<S: Into<String>>(label: Label, text: S) -> Self {
        Message {
            label: Some(label),
            text: text.into(),
        }
    }

    pub fn unlabeled<S: Into<String>>(text: S) -> Self {
        Message {
            label: None,
            text: text.into(),
        }
    }
}

impl From<Row> for Message {
    fn from(row: Row) -> Self {
        Message {
            label: row.label.parse().ok(),
            text: row.text,
        }
    }
}

/// Decode file contents as UTF-8, falling back to Latin-1 when the bytes
/// are not valid UTF-8.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        // Every Latin-1 byte maps to the code point of the same value.
        Err(_) => Cow::Owned(bytes.iter().map(|&b| b as char).collect()),
    }
}

/// Parse dataset rows from raw file bytes.
///
/// The first record is the header. Every record must have at least two
/// columns; further columns are tolerated only when empty.
pub fn read_rows_from_bytes(bytes: &[u8]) -> Result<Vec<Row>> {
    let text = decode_text(bytes);
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| SpamSiftError::dataset(format!("Failed to read CSV header: {e}")))?
        .clone();
    if headers.len() < 2 {
        return Err(SpamSiftError::dataset(format!(
            "CSV header must have two columns (label, text), found {}",
            headers.len()
        )));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| SpamSiftError::dataset(format!("Failed to read CSV record: {e}")))?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        if record.len() < 2 {
            return Err(SpamSiftError::dataset(format!(
                "line {line}: expected 2 columns (label, text), found {}",
                record.len()
            )));
        }
        if record.iter().skip(2).any(|extra| !extra.trim().is_empty()) {
            return Err(SpamSiftError::dataset(format!(
                "line {line}: expected 2 columns (label, text), found {}; \
                 quote the text column or run `spamsift repair`",
                record.len()
            )));
        }

        rows.push(Row {
            line,
            label: record[0].to_string(),
            text: record[1].to_string(),
        });
    }

    Ok(rows)
}

/// Read raw rows from a dataset file.
pub fn read_rows<P: AsRef<Path>>(path: P) -> Result<Vec<Row>> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| {
        SpamSiftError::dataset(format!("Failed to read {}: {e}", path.display()))
    })?;
    let rows = read_rows_from_bytes(&bytes)?;
    log::debug!("read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Read messages from a dataset file, parsing labels.
///
/// Rows with a label other than `spam`/`ham` become unlabeled messages.
pub fn read_messages<P: AsRef<Path>>(path: P) -> Result<Vec<Message>> {
    Ok(read_rows(path)?.into_iter().map(Message::from).collect())
}
