//! Run configuration.
//!
//! A [`TextfoldConfig`] collects everything a run needs besides the command
//! line: where the corpora live, the shuffle seed, how documents are
//! tokenized and the default classifier hyperparameters. Every field has a
//! default, so a JSON file only needs to name what it changes:
//!
//! ```json
//! {
//!   "datasets_dir": "/data/corpora",
//!   "document": { "remove_stopwords": true, "ngram_sizes": [2] },
//!   "knn": { "k": 7 }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::classifier::knn::KnnConfig;
use crate::classifier::naive_bayes::NaiveBayesConfig;
use crate::document::DocumentConfig;
use crate::error::Result;

/// Default directory holding the corpora.
pub const DEFAULT_DATASETS_DIR: &str = "documents";

/// Default seed for shuffling corpora.
pub const DEFAULT_SEED: u64 = 42;

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextfoldConfig {
    /// Directory containing the Amazon JSON files and the `bbc/` folder.
    pub datasets_dir: PathBuf,
    /// Seed of the shuffle applied when a corpus is loaded.
    pub seed: u64,
    pub document: DocumentConfig,
    pub naive_bayes: NaiveBayesConfig,
    pub knn: KnnSettings,
}

/// The `knn` section of a configuration file.
///
/// Unlike [`KnnConfig`], the neighbour count has no default: a file that does
/// not name `k` leaves `knn` unconfigured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnnSettings {
    pub k: Option<usize>,
    pub weight_neighbors: bool,
}

impl Default for KnnSettings {
    fn default() -> Self {
        KnnSettings {
            k: None,
            weight_neighbors: true,
        }
    }
}

impl KnnSettings {
    /// The classifier configuration, once a neighbour count is known.
    pub fn config(&self) -> Option<KnnConfig> {
        self.k.map(|k| KnnConfig::new(k).weight_neighbors(self.weight_neighbors))
    }

    pub fn validate(&self) -> Result<()> {
        match self.config() {
            Some(config) => config.validate(),
            None => Ok(()),
        }
    }
}

impl Default for TextfoldConfig {
    fn default() -> Self {
        TextfoldConfig {
            datasets_dir: PathBuf::from(DEFAULT_DATASETS_DIR),
            seed: DEFAULT_SEED,
            document: DocumentConfig::default(),
            naive_bayes: NaiveBayesConfig::default(),
            knn: KnnSettings::default(),
        }
    }
}

impl TextfoldConfig {
    /// Read and validate a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: TextfoldConfig = serde_json::from_str(&content)?;
        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.document.validate()?;
        self.naive_bayes.validate()?;
        self.knn.validate()
    }
}
