//! Command implementations for the spamsift CLI.

use std::io::{self, BufRead, Write};

use crate::artifacts::ArtifactStore;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::cli::repl;
use crate::config::SpamSiftConfig;
use crate::dataset::generator::DatasetGenerator;
use crate::dataset::preview::DatasetPreview;
use crate::dataset::repair::repair_file;
use crate::error::Result;
use crate::frontend::FrontEnd;
use crate::inference::SpamDetector;
use crate::training::Trainer;

/// Execute a CLI command.
pub fn execute_command(args: SpamSiftArgs) -> Result<()> {
    let config = args.load_config()?;

    match &args.command {
        Command::Train(train_args) => train(train_args, &config, &args),
        Command::Predict(predict_args) => predict(predict_args, &config, &args),
        Command::Interactive(interactive_args) => interactive(interactive_args, &config),
        Command::Generate(generate_args) => generate(generate_args, &config, &args),
        Command::Repair(repair_args) => repair(repair_args, &config, &args),
        Command::Preview(preview_args) => preview(preview_args, &config, &args),
    }
}

/// Train the model and save the artifacts.
fn train(args: &TrainArgs, config: &SpamSiftConfig, cli_args: &SpamSiftArgs) -> Result<()> {
    let mut training = config.training.clone();
    if let Some(test_size) = args.test_size {
        training.test_size = test_size;
    }
    if let Some(seed) = args.seed {
        training.seed = seed;
    }
    if let Some(max_features) = args.max_features {
        training.max_features = Some(max_features);
    }

    let data_path = args
        .data
        .clone()
        .unwrap_or_else(|| config.data.dataset_path.clone());

    let pipeline = Trainer::new(training)?.train_from_csv(&data_path)?;
    let store = ArtifactStore::new(config.artifacts.clone());
    pipeline.save(&store)?;

    output_result(
        "Model saved successfully!",
        &TrainResult {
            data_path,
            model_path: store.model_path(),
            vectorizer_path: store.vectorizer_path(),
            report: pipeline.report,
        },
        cli_args,
    )
}

/// Classify `--text`, or every stdin line until `quit`.
fn predict(args: &PredictArgs, config: &SpamSiftConfig, cli_args: &SpamSiftArgs) -> Result<()> {
    let detector = SpamDetector::load(&ArtifactStore::new(config.artifacts.clone()))?;

    if let Some(text) = &args.text {
        return output_prediction(&detector, text, cli_args);
    }

    let stdout = io::stdout();
    predict_lines(
        &detector,
        io::stdin().lock(),
        stdout.lock(),
        cli_args.output_format,
        cli_args.pretty,
    )?;
    Ok(())
}

/// Classify each line of `input` until a `quit` line or end of input.
///
/// Returns the number of messages classified.
pub fn predict_lines<R: BufRead, W: Write>(
    detector: &SpamDetector,
    input: R,
    mut output: W,
    format: OutputFormat,
    pretty: bool,
) -> Result<usize> {
    let prompt = format == OutputFormat::Human;
    let mut lines = input.lines();
    let mut classified = 0;

    loop {
        if prompt {
            write!(output, "Enter a message (or type 'quit'): ")?;
            output.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().eq_ignore_ascii_case("quit") {
            break;
        }

        let result = PredictionResult {
            prediction: detector.predict(&line)?,
            text: line,
        };
        write!(output, "{}", render(&result, format, pretty)?)?;
        classified += 1;
    }

    Ok(classified)
}

fn output_prediction(detector: &SpamDetector, text: &str, cli_args: &SpamSiftArgs) -> Result<()> {
    let prediction = detector.predict(text)?;
    output_result(
        "",
        &PredictionResult {
            text: text.to_string(),
            prediction,
        },
        cli_args,
    )
}

/// Run the interactive front end on stdin/stdout.
fn interactive(args: &InteractiveArgs, config: &SpamSiftConfig) -> Result<()> {
    let store = ArtifactStore::new(config.artifacts.clone());
    let data_path = args
        .data
        .clone()
        .unwrap_or_else(|| config.data.dataset_path.clone());

    let (front_end, panels) = FrontEnd::start(&store, data_path);
    let mut front_end = match args.seed {
        Some(seed) => front_end.with_seed(seed),
        None => front_end,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "SMS Spam Classifier")?;
    writeln!(out)?;
    for panel in panels {
        writeln!(out, "{panel}")?;
    }

    repl::run(&mut front_end, io::stdin().lock(), out)
}

/// Generate a synthetic dataset.
fn generate(args: &GenerateArgs, config: &SpamSiftConfig, cli_args: &SpamSiftArgs) -> Result<()> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| config.data.dataset_path.clone());
    let seed = args.seed.or(config.generator.seed);
    let spam = args.spam.unwrap_or(config.generator.spam_count);
    let ham = args.ham.unwrap_or(config.generator.ham_count);

    let total_rows = DatasetGenerator::new(seed)
        .with_counts(spam, ham)
        .write_csv(&output)?;

    output_result(
        "Dataset created successfully!",
        &GenerateResult {
            path: output,
            total_rows,
            seed,
        },
        cli_args,
    )
}

/// Repair a malformed dataset.
fn repair(args: &RepairArgs, config: &SpamSiftConfig, cli_args: &SpamSiftArgs) -> Result<()> {
    let input = args
        .input
        .clone()
        .unwrap_or_else(|| config.data.dataset_path.clone());
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| config.data.repaired_path.clone());

    let summary = repair_file(&input, &output)?;

    output_result(
        "",
        &RepairResult {
            input,
            output,
            summary,
        },
        cli_args,
    )
}

/// Preview a dataset file.
fn preview(args: &PreviewArgs, config: &SpamSiftConfig, cli_args: &SpamSiftArgs) -> Result<()> {
    let path = args
        .path
        .clone()
        .unwrap_or_else(|| config.data.dataset_path.clone());

    let preview = DatasetPreview::load(&path, args.rows)?;
    output_result("", &preview, cli_args)
}
