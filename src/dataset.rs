//! Labelled corpora.
//!
//! A [`Dataset`] is an ordered list of [`ClassDocument`]s with the helpers the
//! evaluation commands need: grouping by class, down-sampling to balanced
//! classes and per-class train/test splits. The corpora the command line
//! knows about are named by [`DatasetName`] and read from
//! [`TextfoldConfig::datasets_dir`].

pub mod amazon;
pub mod bbc;

use std::fmt;

use clap::ValueEnum;
use indexmap::IndexMap;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::config::TextfoldConfig;
use crate::document::{ClassDocument, collect_classes};
use crate::error::{Result, TextfoldError};

/// An ordered collection of labelled documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    documents: Vec<ClassDocument>,
}

impl Dataset {
    pub fn new(documents: Vec<ClassDocument>) -> Self {
        Dataset { documents }
    }

    pub fn documents(&self) -> &[ClassDocument] {
        &self.documents
    }

    pub fn into_documents(self) -> Vec<ClassDocument> {
        self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Distinct labels in first-seen order.
    pub fn classes(&self) -> Vec<String> {
        collect_classes(&self.documents)
    }

    /// Documents grouped by label, classes in first-seen order.
    pub fn documents_by_class(&self) -> IndexMap<&str, Vec<&ClassDocument>> {
        let mut groups: IndexMap<&str, Vec<&ClassDocument>> = IndexMap::new();
        for document in &self.documents {
            groups.entry(document.label()).or_default().push(document);
        }
        groups
    }

    /// Size of the smallest class; 0 for an empty dataset.
    pub fn minimum_class_count(&self) -> usize {
        self.documents_by_class()
            .values()
            .map(Vec::len)
            .min()
            .unwrap_or(0)
    }

    /// Shuffle the documents in place with a seeded generator.
    pub fn shuffle(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        self.documents.shuffle(&mut rng);
    }

    /// Down-sample every class to the size of the smallest one.
    ///
    /// The first documents of each class are kept; the result lists the
    /// classes one after another in first-seen order.
    pub fn balanced(self) -> Self {
        let minimum = self.minimum_class_count();
        let before = self.documents.len();

        let mut documents = Vec::with_capacity(minimum * self.classes().len());
        for (_, class_documents) in self.documents_by_class() {
            documents.extend(class_documents.into_iter().take(minimum).cloned());
        }

        if documents.len() < before {
            warn!(
                "Balanced dataset to {minimum} documents per class, dropped {}",
                before - documents.len()
            );
        }
        Dataset { documents }
    }

    /// Per-class split: the first `floor(n * fraction)` documents of every
    /// class go to training, the rest to testing.
    pub fn split(&self, fraction: f64) -> Result<(Vec<ClassDocument>, Vec<ClassDocument>)> {
        validate_fraction(fraction)?;

        let mut training = Vec::new();
        let mut testing = Vec::new();
        for (class, documents) in self.documents_by_class() {
            let n = (documents.len() as f64 * fraction) as usize;
            if n == 0 {
                return Err(TextfoldError::dataset(format!(
                    "class {class} has {} documents, none left for training at split {fraction}",
                    documents.len()
                )));
            }
            training.extend(documents[..n].iter().copied().cloned());
            testing.extend(documents[n..].iter().copied().cloned());
        }
        Ok((training, testing))
    }
}

impl From<Vec<ClassDocument>> for Dataset {
    fn from(documents: Vec<ClassDocument>) -> Self {
        Dataset::new(documents)
    }
}

/// Check a train/test split fraction, which must lie strictly between 0 and 1.
pub fn validate_fraction(fraction: f64) -> Result<()> {
    if !(fraction > 0.0 && fraction < 1.0) {
        return Err(TextfoldError::invalid_argument(format!(
            "split must be between 0 and 1 (exclusive), got {fraction}"
        )));
    }
    Ok(())
}

/// Corpora known by name.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[value(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DatasetName {
    /// Amazon musical instrument reviews (balanced)
    MusicalInstruments,
    /// Amazon automotive reviews (balanced)
    Automotive,
    /// Amazon instant video reviews (balanced)
    InstantVideo,
    /// Amazon beauty reviews (balanced)
    Beauty,
    /// Amazon tools reviews (balanced)
    Tools,
    /// All five Amazon sets, unbalanced
    AllAmazon,
    /// BBC news articles by category
    Bbc,
}

/// Amazon sets merged by `all_amazon`, in concatenation order.
const ALL_AMAZON: [DatasetName; 5] = [
    DatasetName::MusicalInstruments,
    DatasetName::Automotive,
    DatasetName::InstantVideo,
    DatasetName::Tools,
    DatasetName::Beauty,
];

impl DatasetName {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetName::MusicalInstruments => "musical_instruments",
            DatasetName::Automotive => "automotive",
            DatasetName::InstantVideo => "instant_video",
            DatasetName::Beauty => "beauty",
            DatasetName::Tools => "tools",
            DatasetName::AllAmazon => "all_amazon",
            DatasetName::Bbc => "bbc",
        }
    }

    /// Read the corpus from `config.datasets_dir`, tokenized per `config.document`.
    pub fn load(&self, config: &TextfoldConfig) -> Result<Dataset> {
        let parser = config.document.parser()?;
        let dir = &config.datasets_dir;

        let dataset = match self {
            DatasetName::AllAmazon => {
                let mut documents = Vec::new();
                for name in ALL_AMAZON {
                    let path = dir.join(format!("{}.json", name.as_str()));
                    documents.extend(amazon::load(&path, &parser, config.seed, false)?.into_documents());
                }
                let mut dataset = Dataset::new(documents);
                dataset.shuffle(config.seed);
                dataset
            }
            DatasetName::Bbc => bbc::load(dir.join("bbc"), &parser, config.seed)?,
            name => {
                let path = dir.join(format!("{}.json", name.as_str()));
                amazon::load(&path, &parser, config.seed, true)?
            }
        };

        info!(
            "Loaded dataset {self}: {} documents in {} classes",
            dataset.len(),
            dataset.classes().len()
        );
        Ok(dataset)
    }
}

impl fmt::Display for DatasetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentConfig;

    fn dataset() -> Dataset {
        let parser = DocumentConfig::default().parser().unwrap();
        Dataset::new(vec![
            parser.parse_labeled("A positive document", "+").unwrap(),
            parser.parse_labeled("Another positive document", "+").unwrap(),
            parser.parse_labeled("This time a negative one", "-").unwrap(),
            parser.parse_labeled("Yet one more positive document", "+").unwrap(),
            parser.parse_labeled("Still negative", "-").unwrap(),
        ])
    }

    fn texts(documents: &[ClassDocument]) -> Vec<&str> {
        documents.iter().map(|d| d.text()).collect()
    }

    #[test]
    fn test_documents_by_class() {
        let dataset = dataset();
        let groups = dataset.documents_by_class();

        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec!["+", "-"]);
        assert_eq!(groups["+"].len(), 3);
        assert_eq!(groups["-"][1].text(), "Still negative");
        assert_eq!(dataset.classes(), vec!["+", "-"]);
    }

    #[test]
    fn test_minimum_class_count() {
        assert_eq!(dataset().minimum_class_count(), 2);
        assert_eq!(Dataset::default().minimum_class_count(), 0);
    }

    #[test]
    fn test_balanced() {
        let balanced = dataset().balanced();
        assert_eq!(
            texts(balanced.documents()),
            vec![
                "A positive document",
                "Another positive document",
                "This time a negative one",
                "Still negative",
            ]
        );
    }

    #[test]
    fn test_split() {
        let (training, testing) = dataset().split(0.5).unwrap();

        assert_eq!(
            texts(&training),
            vec!["A positive document", "This time a negative one"]
        );
        assert_eq!(
            texts(&testing),
            vec![
                "Another positive document",
                "Yet one more positive document",
                "Still negative",
            ]
        );
    }

    #[test]
    fn test_split_errors() {
        assert!(dataset().split(0.0).is_err());
        assert!(dataset().split(1.0).is_err());
        assert!(dataset().split(f64::NAN).is_err());
        // 2 * 0.4 rounds down to no training documents for "-"
        assert!(matches!(dataset().split(0.4), Err(TextfoldError::Dataset(_))));
    }

    #[test]
    fn test_shuffle_is_seeded() {
        let mut first = dataset();
        let mut second = dataset();
        first.shuffle(42);
        second.shuffle(42);

        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
    }

    #[test]
    fn test_dataset_names() {
        let names: Vec<String> = DatasetName::value_variants()
            .iter()
            .filter_map(|name| name.to_possible_value())
            .map(|value| value.get_name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "musical_instruments",
                "automotive",
                "instant_video",
                "beauty",
                "tools",
                "all_amazon",
                "bbc",
            ]
        );
        assert_eq!(DatasetName::InstantVideo.to_string(), "instant_video");
    }
}
