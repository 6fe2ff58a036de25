//! Terminal rendering of front end output.

use std::fmt;

use serde::Serialize;

use crate::dataset::preview::{BAR_WIDTH, DatasetPreview, LabelCount, bar_chart, format_rows};
use crate::dataset::reader::Row;
use crate::inference::Prediction;
use crate::ml::types::Label;

/// Width of the confidence bar.
pub const CONFIDENCE_BAR_WIDTH: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// A prediction with its optional explanation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultCard {
    pub prediction: Prediction,
    /// Tokens most indicative of spam, when the classifier exposes them.
    pub top_tokens: Option<Vec<String>>,
}

/// One block of front end output.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Panel {
    Notice { severity: Severity, message: String },
    Result(ResultCard),
    Distribution { title: String, counts: Vec<LabelCount> },
    Sample { rows: Vec<Row> },
    Preview(DatasetPreview),
}

impl Panel {
    pub fn info<S: Into<String>>(message: S) -> Self {
        Panel::Notice {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn warning<S: Into<String>>(message: S) -> Self {
        Panel::Notice {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn error<S: Into<String>>(message: S) -> Self {
        Panel::Notice {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// The severity when this panel is a notice.
    pub fn severity(&self) -> Option<Severity> {
        match self {
            Panel::Notice { severity, .. } => Some(*severity),
            _ => None,
        }
    }
}

/// `[#####-----] 50%` style bar for a value in `[0, 1]`.
pub fn confidence_bar(confidence: f64, width: usize) -> String {
    let percent = (confidence.clamp(0.0, 1.0) * 100.0) as usize;
    let filled = percent * width / 100;
    format!(
        "[{}{}] {percent}%",
        "#".repeat(filled),
        "-".repeat(width - filled)
    )
}

fn format_percent(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}

impl fmt::Display for ResultCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prediction = &self.prediction;
        let headline = match prediction.label {
            Label::Spam => "SPAM",
            Label::Ham => "HAM (Not spam)",
        };
        writeln!(f, "{headline}")?;
        writeln!(f, "Confidence: {}", format_percent(prediction.confidence))?;
        writeln!(
            f,
            "{}",
            confidence_bar(prediction.confidence, CONFIDENCE_BAR_WIDTH)
        )?;

        if prediction.probabilities.len() > 1 {
            writeln!(f)?;
            writeln!(f, "Probability breakdown")?;
            for p in &prediction.probabilities {
                writeln!(f, "  {:<6} {:>6}", p.label.as_str(), format_percent(p.probability))?;
            }
        }

        if let Some(tokens) = &self.top_tokens {
            writeln!(f)?;
            writeln!(f, "Top tokens that indicate spam")?;
            writeln!(f, "  {}", tokens.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Panel::Notice { severity, message } => writeln!(f, "[{severity}] {message}"),
            Panel::Result(card) => write!(f, "{card}"),
            Panel::Distribution { title, counts } => {
                writeln!(f, "{title}")?;
                write!(f, "{}", bar_chart(counts, BAR_WIDTH))
            }
            Panel::Sample { rows } => {
                writeln!(f, "Dataset sample ({} rows)", rows.len())?;
                write!(f, "{}", format_rows(rows))
            }
            Panel::Preview(preview) => write!(f, "{preview}"),
        }
    }
}
