//! Amazon product reviews, one JSON object per line.
//!
//! Only one-star and five-star reviews are kept, labelled `-` and `+`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::Context;
use log::debug;
use serde::Deserialize;

use crate::dataset::Dataset;
use crate::document::DocumentParser;
use crate::error::Result;

pub const NEGATIVE: &str = "-";
pub const POSITIVE: &str = "+";

#[derive(Debug, Deserialize)]
struct Review {
    overall: f64,
    #[serde(rename = "reviewText", default)]
    review_text: String,
}

/// Label for a star rating, if the rating is one that is kept.
pub fn label(overall: f64) -> Option<&'static str> {
    if overall == 1.0 {
        Some(NEGATIVE)
    } else if overall == 5.0 {
        Some(POSITIVE)
    } else {
        None
    }
}

/// Read a review file, shuffle it with `seed` and optionally balance it.
pub fn load<P: AsRef<Path>>(
    path: P,
    parser: &DocumentParser,
    seed: u64,
    balanced: bool,
) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    let mut documents = Vec::new();
    let mut skipped = 0;
    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let review: Review = serde_json::from_str(&line)
            .with_context(|| format!("Failed to parse {} line {}", path.display(), number + 1))?;

        match label(review.overall) {
            Some(label) => documents.push(parser.parse_labeled(review.review_text, label)?),
            None => skipped += 1,
        }
    }
    debug!(
        "Read {} reviews from {}, skipped {skipped} with other ratings",
        documents.len(),
        path.display()
    );

    let mut dataset = Dataset::new(documents);
    dataset.shuffle(seed);
    Ok(if balanced { dataset.balanced() } else { dataset })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::document::DocumentConfig;
    use crate::error::TextfoldError;

    fn reviews(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file
    }

    #[test]
    fn test_label() {
        assert_eq!(label(1.0), Some("-"));
        assert_eq!(label(5.0), Some("+"));
        assert_eq!(label(3.0), None);
    }

    #[test]
    fn test_load() {
        let file = reviews(&[
            r#"{"overall": 5.0, "reviewText": "Great strap"}"#,
            r#"{"overall": 3.0, "reviewText": "It is fine"}"#,
            r#"{"overall": 1.0, "reviewText": "Broke on day one"}"#,
            "",
            r#"{"overall": 5.0, "reviewText": "Love it"}"#,
            r#"{"overall": 5.0}"#,
        ]);
        let parser = DocumentConfig::default().parser().unwrap();

        let dataset = load(file.path(), &parser, 42, false).unwrap();
        assert_eq!(dataset.len(), 4);
        let groups = dataset.documents_by_class();
        assert_eq!(groups["+"].len(), 3);
        assert_eq!(groups["-"].len(), 1);
        assert!(dataset.documents().iter().any(|d| d.text().is_empty()));

        let balanced = load(file.path(), &parser, 42, true).unwrap();
        assert_eq!(balanced.len(), 2);
        assert_eq!(balanced.minimum_class_count(), 1);
    }

    #[test]
    fn test_load_is_deterministic() {
        let lines: Vec<String> = (0..20)
            .map(|i| format!(r#"{{"overall": 5.0, "reviewText": "review {i}"}}"#))
            .collect();
        let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
        let file = reviews(&lines);
        let parser = DocumentConfig::default().parser().unwrap();

        let first = load(file.path(), &parser, 42, false).unwrap();
        let second = load(file.path(), &parser, 42, false).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_line() {
        let file = reviews(&[r#"{"overall": 5.0, "reviewText": "ok"}"#, "not json"]);
        let parser = DocumentConfig::default().parser().unwrap();

        let error = load(file.path(), &parser, 42, false).unwrap_err();
        assert!(matches!(error, TextfoldError::Anyhow(_)));
        assert!(error.to_string().contains("line 2"));
    }

    #[test]
    fn test_missing_file() {
        let parser = DocumentConfig::default().parser().unwrap();
        assert!(load("/nonexistent/tools.json", &parser, 42, true).is_err());
    }
}
