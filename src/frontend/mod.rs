//! Interactive front end.
//!
//! [`FrontEnd`] is a small state machine: it owns the message being typed and
//! the optionally-loaded detector, and turns each [`Action`] into a list of
//! [`Panel`]s for display. Nothing here is fatal; failures become error
//! notices.

mod panel;

pub use panel::{CONFIDENCE_BAR_WIDTH, Panel, ResultCard, Severity, confidence_bar};

use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::artifacts::ArtifactStore;
use crate::dataset::preview::{DEFAULT_PREVIEW_ROWS, DatasetPreview, label_counts, sample};
use crate::dataset::reader::read_rows;
use crate::inference::{DEFAULT_TOP_TOKENS, SpamDetector};
use crate::ml::types::Label;

pub const EMPTY_INPUT_MESSAGE: &str = "Please enter a message first.";
pub const MODEL_UNAVAILABLE_MESSAGE: &str = "Model not available. Train model and try again.";

/// User actions understood by the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Append a line to the message being composed.
    Input(String),
    /// Classify the composed message.
    Predict,
    /// Discard the composed message.
    Clear,
    /// Show random rows of the configured dataset.
    ShowSample,
    /// Preview an arbitrary CSV file.
    Upload(PathBuf),
}

/// Front end state.
#[derive(Debug)]
pub struct FrontEnd {
    input: String,
    detector: Option<SpamDetector>,
    dataset_path: PathBuf,
    rng: StdRng,
}

impl FrontEnd {
    pub fn new<P: Into<PathBuf>>(detector: Option<SpamDetector>, dataset_path: P) -> Self {
        FrontEnd {
            input: String::new(),
            detector,
            dataset_path: dataset_path.into(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seed the sampling RNG, for reproducible samples.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Load the detector from `store` and build the startup panels.
    ///
    /// A missing or unreadable model disables prediction instead of failing.
    pub fn start<P: Into<PathBuf>>(store: &ArtifactStore, dataset_path: P) -> (Self, Vec<Panel>) {
        let mut panels = Vec::new();
        let detector = match SpamDetector::load(store) {
            Ok(detector) => Some(detector),
            Err(e) => {
                log::warn!("prediction disabled: {e}");
                panels.push(Panel::error(
                    "Model or vectorizer not found. Train the model first: `spamsift train`.",
                ));
                panels.push(Panel::info(format!("Error: {e}")));
                None
            }
        };

        let front_end = Self::new(detector, dataset_path);
        panels.extend(front_end.dataset_overview());
        (front_end, panels)
    }

    /// Class distribution of the configured dataset, or a hint when it is absent.
    pub fn dataset_overview(&self) -> Vec<Panel> {
        if !self.dataset_path.is_file() {
            return vec![Panel::info(format!(
                "No dataset found at {}. You can preview a file with :upload PATH.",
                self.dataset_path.display()
            ))];
        }

        match read_rows(&self.dataset_path) {
            Ok(rows) => vec![Panel::Distribution {
                title: format!("Class distribution ({})", self.dataset_path.display()),
                counts: label_counts(&rows),
            }],
            Err(e) => vec![
                Panel::error(format!("Could not read dataset: {e}")),
                Panel::info(
                    "If your messages include commas, ensure the text field is quoted \
                     (or run `spamsift repair`).",
                ),
            ],
        }
    }

    /// Apply one action.
    pub fn handle(&mut self, action: Action) -> Vec<Panel> {
        match action {
            Action::Input(line) => {
                if !self.input.is_empty() {
                    self.input.push('\n');
                }
                self.input.push_str(&line);
                Vec::new()
            }
            Action::Predict => vec![self.predict()],
            Action::Clear => {
                self.input.clear();
                vec![Panel::info("Input cleared.")]
            }
            Action::ShowSample => vec![self.show_sample()],
            Action::Upload(path) => vec![Self::upload(&path)],
        }
    }

    fn predict(&self) -> Panel {
        if self.input.trim().is_empty() {
            return Panel::warning(EMPTY_INPUT_MESSAGE);
        }
        let Some(detector) = &self.detector else {
            return Panel::error(MODEL_UNAVAILABLE_MESSAGE);
        };

        match detector.predict(&self.input) {
            Ok(prediction) => Panel::Result(ResultCard {
                prediction,
                top_tokens: detector.top_tokens(Label::Spam, DEFAULT_TOP_TOKENS),
            }),
            Err(e) => Panel::error(format!("Prediction failed: {e}")),
        }
    }

    fn show_sample(&mut self) -> Panel {
        if !self.dataset_path.is_file() {
            return Panel::info(format!(
                "No dataset found at {}.",
                self.dataset_path.display()
            ));
        }

        match read_rows(&self.dataset_path) {
            Ok(rows) => Panel::Sample {
                rows: sample(&rows, DEFAULT_PREVIEW_ROWS, &mut self.rng)
                    .into_iter()
                    .cloned()
                    .collect(),
            },
            Err(e) => Panel::error(format!("Could not read dataset: {e}")),
        }
    }

    fn upload(path: &Path) -> Panel {
        match DatasetPreview::load(path, DEFAULT_PREVIEW_ROWS) {
            Ok(preview) => Panel::Preview(preview),
            Err(e) => Panel::error(format!("Couldn't read uploaded file: {e}")),
        }
    }

    /// The message composed so far.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_model_loaded(&self) -> bool {
        self.detector.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::config::TrainingConfig;
    use crate::dataset::generator::DatasetGenerator;
    use crate::training::Trainer;

    fn trained_detector() -> SpamDetector {
        let messages = DatasetGenerator::new(Some(11)).with_counts(50, 50).generate();
        let pipeline = Trainer::new(TrainingConfig::default())
            .unwrap()
            .train(messages)
            .unwrap();
        SpamDetector::from_pipeline(pipeline).unwrap()
    }

    #[test]
    fn test_predict_requires_input() {
        let mut front_end = FrontEnd::new(None, "missing.csv");
        let panels = front_end.handle(Action::Predict);
        assert_eq!(panels[0].to_string(), format!("[warning] {EMPTY_INPUT_MESSAGE}\n"));

        front_end.handle(Action::Input("   ".to_string()));
        let panels = front_end.handle(Action::Predict);
        assert_eq!(panels[0].severity(), Some(Severity::Warning));
    }

    #[test]
    fn test_predict_without_model() {
        let mut front_end = FrontEnd::new(None, "missing.csv");
        front_end.handle(Action::Input("Win cash now".to_string()));

        let panels = front_end.handle(Action::Predict);
        assert_eq!(panels[0].to_string(), format!("[error] {MODEL_UNAVAILABLE_MESSAGE}\n"));
    }

    #[test]
    fn test_predict_and_clear() {
        let mut front_end = FrontEnd::new(Some(trained_detector()), "missing.csv");
        front_end.handle(Action::Input("Congratulations! You won ₹5000 cash prize.".to_string()));
        front_end.handle(Action::Input("Claim now.".to_string()));
        assert_eq!(
            front_end.input(),
            "Congratulations! You won ₹5000 cash prize.\nClaim now."
        );

        let panels = front_end.handle(Action::Predict);
        match &panels[0] {
            Panel::Result(card) => {
                assert_eq!(card.prediction.label, Label::Spam);
                assert_eq!(card.top_tokens.as_ref().map(Vec::len), Some(DEFAULT_TOP_TOKENS));
            }
            other => panic!("expected result panel, got {other:?}"),
        }

        front_end.handle(Action::Clear);
        assert_eq!(front_end.input(), "");
    }

    #[test]
    fn test_start_without_artifacts() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::in_dir(dir.path().join("models"));

        let (front_end, panels) = FrontEnd::start(&store, dir.path().join("spam.csv"));
        assert!(!front_end.is_model_loaded());
        assert_eq!(panels[0].severity(), Some(Severity::Error));
        assert!(panels[1].to_string().contains("spamsift train"));
        assert!(panels[2].to_string().contains("No dataset found"));
    }

    #[test]
    fn test_dataset_panels() {
        let dir = TempDir::new().unwrap();
        let dataset = dir.path().join("spam.csv");
        DatasetGenerator::new(Some(3))
            .with_counts(12, 8)
            .write_csv(&dataset)
            .unwrap();

        let mut front_end = FrontEnd::new(None, &dataset).with_seed(1);
        match &front_end.dataset_overview()[0] {
            Panel::Distribution { counts, .. } => {
                assert_eq!(counts[0].label, "spam");
                assert_eq!(counts[0].count, 12);
            }
            other => panic!("expected distribution, got {other:?}"),
        }

        match &front_end.handle(Action::ShowSample)[0] {
            Panel::Sample { rows } => assert_eq!(rows.len(), DEFAULT_PREVIEW_ROWS),
            other => panic!("expected sample, got {other:?}"),
        }
    }

    #[test]
    fn test_upload() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.csv");
        fs::write(&good, "label,text\nham,hi there\nspam,win\n").unwrap();
        let bad = dir.path().join("bad.csv");
        fs::write(&bad, "label,text\nham,hello, world\n").unwrap();

        let mut front_end = FrontEnd::new(None, "missing.csv");
        match &front_end.handle(Action::Upload(good))[0] {
            Panel::Preview(preview) => assert_eq!(preview.total_rows, 2),
            other => panic!("expected preview, got {other:?}"),
        }

        let panels = front_end.handle(Action::Upload(bad));
        assert!(panels[0].to_string().contains("Couldn't read uploaded file"));
        let panels = front_end.handle(Action::Upload(dir.path().join("nope.csv")));
        assert_eq!(panels[0].severity(), Some(Severity::Error));
    }
}
