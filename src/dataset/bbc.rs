//! BBC news articles: one sub-directory per category holding `*.txt` files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use log::debug;

use crate::dataset::Dataset;
use crate::document::DocumentParser;
use crate::error::{Result, TextfoldError};

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();
    Ok(entries)
}

/// Read every category under `root`, labelled by directory name, then shuffle.
///
/// Files are decoded lossily; the corpus contains a few non-UTF-8 bytes.
pub fn load<P: AsRef<Path>>(root: P, parser: &DocumentParser, seed: u64) -> Result<Dataset> {
    let root = root.as_ref();

    let mut documents = Vec::new();
    for category_dir in sorted_entries(root)? {
        if !category_dir.is_dir() {
            continue;
        }
        let Some(category) = category_dir.file_name().and_then(|name| name.to_str()) else {
            continue;
        };

        let mut count = 0;
        for path in sorted_entries(&category_dir)? {
            if path.extension().and_then(|ext| ext.to_str()) != Some("txt") {
                continue;
            }
            let bytes = fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
            documents.push(parser.parse_labeled(String::from_utf8_lossy(&bytes), category)?);
            count += 1;
        }
        debug!("Read {count} articles from category {category}");
    }

    if documents.is_empty() {
        return Err(TextfoldError::dataset(format!(
            "no *.txt articles found under {}",
            root.display()
        )));
    }

    let mut dataset = Dataset::new(documents);
    dataset.shuffle(seed);
    Ok(dataset)
}
