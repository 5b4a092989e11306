//! Output formatting for CLI commands.

use std::fmt;

use serde::Serialize;

use crate::classifier::ClassifierKind;
use crate::cli::args::{OutputFormat, TextfoldArgs};
use crate::dataset::DatasetName;
use crate::error::Result;
use crate::evaluation::FoldResult;

/// Result structure for a hold-out evaluation.
#[derive(Debug, Serialize)]
pub struct EvaluationResult {
    pub dataset: DatasetName,
    pub classifier: ClassifierKind,
    pub split: f64,
    #[serde(flatten)]
    pub result: FoldResult,
}

impl fmt::Display for EvaluationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Trained {} on {} documents of {}, tested on {}",
            self.classifier, self.result.training_documents, self.dataset, self.result.testing_documents
        )?;
        writeln!(f)?;
        write!(f, "{}", self.result.confusion_matrix)
    }
}

/// Result structure for classifying a text.
#[derive(Debug, Serialize)]
pub struct PredictionResult {
    pub dataset: DatasetName,
    pub classifier: ClassifierKind,
    pub training_documents: usize,
    pub text: String,
    pub label: String,
}

impl fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &TextfoldArgs) -> Result<()>
where
    T: Serialize + fmt::Display,
{
    println!("{}", render(message, result, args)?);
    Ok(())
}

/// Render a result the way [`output_result`] prints it.
pub fn render<T>(message: &str, result: &T, args: &TextfoldArgs) -> Result<String>
where
    T: Serialize + fmt::Display,
{
    match args.output_format {
        OutputFormat::Human => Ok(render_human(message, result, args)),
        OutputFormat::Json => render_json(result, args),
    }
}

fn render_human<T: fmt::Display>(message: &str, result: &T, args: &TextfoldArgs) -> String {
    if args.verbosity() > 1 {
        format!("{message}\n\n{result}")
    } else {
        result.to_string()
    }
}

fn render_json<T: Serialize>(result: &T, args: &TextfoldArgs) -> Result<String> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(json)
}
