//! Output formatting for CLI commands.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::cli::args::{OutputFormat, SpamSiftArgs};
use crate::dataset::repair::RepairSummary;
use crate::error::Result;
use crate::inference::Prediction;
use crate::training::TrainingReport;

/// Result structure for training.
#[derive(Debug, Serialize)]
pub struct TrainResult {
    pub data_path: PathBuf,
    pub model_path: PathBuf,
    pub vectorizer_path: PathBuf,
    pub report: TrainingReport,
}

impl fmt::Display for TrainResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.report)?;
        writeln!(f)?;
        writeln!(f, "Model saved to: {}", self.model_path.display())?;
        writeln!(f, "Vectorizer saved to: {}", self.vectorizer_path.display())
    }
}

/// Result structure for a single prediction.
#[derive(Debug, Serialize)]
pub struct PredictionResult {
    pub text: String,
    #[serde(flatten)]
    pub prediction: Prediction,
}

impl fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Prediction: {} ({:.1}%)",
            self.prediction.label,
            self.prediction.confidence * 100.0
        )
    }
}

/// Result structure for dataset generation.
#[derive(Debug, Serialize)]
pub struct GenerateResult {
    pub path: PathBuf,
    pub total_rows: usize,
    pub seed: Option<u64>,
}

impl fmt::Display for GenerateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Path: {}", self.path.display())?;
        writeln!(f, "Total rows: {}", self.total_rows)
    }
}

/// Result structure for CSV repair.
#[derive(Debug, Serialize)]
pub struct RepairResult {
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(flatten)]
    pub summary: RepairSummary,
}

impl fmt::Display for RepairResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cleaned CSV written to: {}", self.output.display())?;
        writeln!(f, "Rows written: {}", self.summary.rows_written)?;
        if self.summary.unlabeled_rows > 0 {
            writeln!(
                f,
                "Rows without a label: {} (skipped during training)",
                self.summary.unlabeled_rows
            )?;
        }
        Ok(())
    }
}

/// Render a result in the given format.
pub fn render<T: Serialize + fmt::Display>(
    result: &T,
    format: OutputFormat,
    pretty: bool,
) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(result.to_string()),
        OutputFormat::Json if pretty => Ok(format!("{}\n", serde_json::to_string_pretty(result)?)),
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string(result)?)),
    }
}

/// Output a result in the format selected on the command line.
///
/// In human mode `message` is printed first unless running quietly.
pub fn output_result<T: Serialize + fmt::Display>(
    message: &str,
    result: &T,
    args: &SpamSiftArgs,
) -> Result<()> {
    if args.output_format == OutputFormat::Human && args.verbosity() > 0 && !message.is_empty() {
        println!("{message}");
        println!();
    }

    print!("{}", render(result, args.output_format, args.pretty)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::types::{ClassProbability, Label};

    fn prediction_result() -> PredictionResult {
        PredictionResult {
            text: "Win cash".to_string(),
            prediction: Prediction {
                label: Label::Spam,
                confidence: 0.875,
                probabilities: vec![
                    ClassProbability {
                        label: Label::Spam,
                        probability: 0.875,
                    },
                    ClassProbability {
                        label: Label::Ham,
                        probability: 0.125,
                    },
                ],
                cleaned: "win cash".to_string(),
            },
        }
    }

    #[test]
    fn test_render_human() {
        let rendered = render(&prediction_result(), OutputFormat::Human, false).unwrap();
        assert_eq!(rendered, "Prediction: spam (87.5%)\n");
    }

    #[test]
    fn test_render_json() {
        let rendered = render(&prediction_result(), OutputFormat::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["label"], "spam");
        assert_eq!(value["confidence"], 0.875);
        assert_eq!(value["cleaned"], "win cash");
        assert_eq!(value["probabilities"][1]["label"], "ham");

        let pretty = render(&prediction_result(), OutputFormat::Json, true).unwrap();
        assert!(pretty.lines().count() > 1);
    }

    #[test]
    fn test_repair_result_display() {
        let result = RepairResult {
            input: PathBuf::from("data/spam.csv"),
            output: PathBuf::from("data/spam_fixed.csv"),
            summary: RepairSummary {
                rows_written: 3,
                header_skipped: true,
                unlabeled_rows: 1,
            },
        };

        let rendered = result.to_string();
        assert!(rendered.contains("data/spam_fixed.csv"));
        assert!(rendered.contains("Rows without a label: 1"));

        let json = render(&result, OutputFormat::Json, false).unwrap();
        assert!(json.contains("\"rows_written\":3"));
    }
}
