//! Command implementations for the textfold CLI.
//!
//! Every command resolves its configuration and classifier first, so bad
//! arguments are reported before any dataset is read.

use log::{debug, info};

use crate::classifier::{ClassifierKind, ClassifierName};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::TextfoldConfig;
use crate::dataset::{Dataset, DatasetName, validate_fraction};
use crate::error::{Result, TextfoldError};
use crate::evaluation::{CrossValidationReport, CrossValidator, hold_out};

/// Execute a CLI command.
pub fn execute_command(args: TextfoldArgs) -> Result<()> {
    match &args.command {
        Command::CrossValidate(cv_args) => {
            let report = cross_validate(cv_args, &args)?;
            output_result("Cross-validation finished", &report, &args)
        }
        Command::Evaluate(evaluate_args) => {
            let result = evaluate(evaluate_args, &args)?;
            output_result("Evaluation finished", &result, &args)
        }
        Command::Predict(predict_args) => {
            let result = predict(predict_args, &args)?;
            output_result("Prediction", &result, &args)
        }
    }
}

/// Configuration and classifier resolved from the command line.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub config: TextfoldConfig,
    pub kind: ClassifierKind,
}

/// Merge the configuration file with the command line flags and validate the result.
///
/// The neighbour count comes from the command line or from the `knn.k`
/// setting of the configuration file; without either, `knn` is a
/// configuration error.
pub fn resolve_settings(
    cli_args: &TextfoldArgs,
    classifier: ClassifierName,
    neighbours: Option<usize>,
    classifier_args: &ClassifierArgs,
    document: &DocumentArgs,
) -> Result<RunSettings> {
    let mut config = match &cli_args.config {
        Some(path) => TextfoldConfig::load(path)?,
        None => TextfoldConfig::default(),
    };

    config.document.preserve_duplicates |= document.preserve_duplicates;
    config.document.remove_stopwords |= document.remove_stopwords;
    if !document.ngrams.is_empty() {
        config.document.ngram_sizes = Some(document.ngrams.clone());
    }
    if let Some(smoothing) = classifier_args.smoothing {
        config.naive_bayes.smoothing = smoothing;
    }
    if classifier_args.no_weighting {
        config.knn.weight_neighbors = false;
    }
    if neighbours.is_some() {
        config.knn.k = neighbours;
    }
    config.validate()?;

    let kind = classifier.kind(config.naive_bayes.smoothing, config.knn.config())?;
    debug!("Resolved classifier {kind} with {:?}", config.document);

    Ok(RunSettings { config, kind })
}

/// Cross-validate a classifier over a dataset.
pub fn cross_validate(args: &CrossValidateArgs, cli_args: &TextfoldArgs) -> Result<CrossValidationReport> {
    if args.folds < 2 {
        return Err(TextfoldError::invalid_config(format!(
            "cross-validation needs at least 2 folds, got {}",
            args.folds
        )));
    }
    let settings = resolve_settings(
        cli_args,
        args.classifier,
        args.neighbours,
        &args.classifier_args,
        &args.document,
    )?;

    let dataset = args.dataset.load(&settings.config)?;
    info!(
        "Cross-validating {} over {} folds of {}",
        settings.kind, args.folds, args.dataset
    );
    let validator = CrossValidator::new(dataset.into_documents(), args.folds)?;
    validator.cross_validate(&settings.kind)
}

/// Train on the first part of every class and test on the rest.
pub fn evaluate(args: &EvaluateArgs, cli_args: &TextfoldArgs) -> Result<EvaluationResult> {
    validate_fraction(args.split)?;
    let settings = resolve_settings(
        cli_args,
        args.classifier,
        args.neighbors,
        &args.classifier_args,
        &args.document,
    )?;

    let dataset = args.dataset.load(&settings.config)?;
    let (training, testing) = dataset.split(args.split)?;
    info!(
        "Evaluating {} on {} training and {} testing documents",
        settings.kind,
        training.len(),
        testing.len()
    );
    let result = hold_out(&settings.kind, training, &testing)?;

    Ok(EvaluationResult {
        dataset: args.dataset,
        classifier: settings.kind,
        split: args.split,
        result,
    })
}

/// Train on a whole dataset and classify one text.
pub fn predict(args: &PredictArgs, cli_args: &TextfoldArgs) -> Result<PredictionResult> {
    let settings = resolve_settings(
        cli_args,
        args.classifier,
        args.neighbors,
        &args.classifier_args,
        &args.document,
    )?;
    let parser = settings.config.document.parser()?;
    let document = parser.parse(args.text.as_str())?;

    let dataset = load_non_empty(args.dataset, &settings.config)?;
    let training_documents = dataset.len();
    let classifier = settings.kind.train(dataset.into_documents())?;
    let label = classifier.predict(&document).to_string();

    Ok(PredictionResult {
        dataset: args.dataset,
        classifier: settings.kind,
        training_documents,
        text: args.text.clone(),
        label,
    })
}

fn load_non_empty(name: DatasetName, config: &TextfoldConfig) -> Result<Dataset> {
    let dataset = name.load(config)?;
    if dataset.is_empty() {
        return Err(TextfoldError::dataset(format!("dataset {name} has no documents")));
    }
    Ok(dataset)
}
