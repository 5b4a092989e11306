//! ID3 decision tree over word presence.
//!
//! Internal nodes test whether a word occurs in a document's bag of words;
//! leaves hold a class. The tree is stored as a flat arena of
//! [`TreeNode`]s addressed by [`NodeId`], with the root at index 0, and is
//! grown with an explicit work stack so deep trees never recurse.
//!
//! Split words are chosen by information gain. Among equally informative
//! words the last one in vocabulary order wins. A branch that receives no
//! documents becomes a leaf holding the majority class of its parent.

use std::fmt;

use indexmap::IndexSet;
use log::debug;

use crate::classifier::{Classifier, ensure_training_set};
use crate::document::{ClassDocument, Document, collect_classes};
use crate::error::{Result, TextfoldError};
use crate::term_document_matrix::{MatrixOptions, TermDocumentMatrix};

/// Index of a node in the tree arena.
pub type NodeId = usize;

const ROOT: NodeId = 0;

/// A node of the decision tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// Go to `present` if the document contains `word`, else to `absent`.
    Split {
        word: String,
        present: NodeId,
        absent: NodeId,
    },
    /// Predict `class`.
    Leaf { class: String },
}

struct Pending<'a> {
    node: NodeId,
    documents: Vec<&'a ClassDocument>,
    candidates: Vec<&'a str>,
}

/// ID3 decision tree classifier.
#[derive(Debug, Clone)]
pub struct Id3 {
    classes: Vec<String>,
    documents: Vec<ClassDocument>,
    vocabulary: IndexSet<String>,
    nodes: Vec<TreeNode>,
}

impl Id3 {
    /// Grow a tree over the presence of the training vocabulary's words.
    pub fn new(documents: Vec<ClassDocument>) -> Result<Self> {
        ensure_training_set(&documents, "id3")?;

        let classes = collect_classes(&documents);
        let vocabulary = TermDocumentMatrix::new(
            documents.iter().collect::<Vec<_>>(),
            MatrixOptions::vocabulary_only(),
        )
        .vocabulary()
        .clone();

        let mut id3 = Id3 {
            classes,
            documents,
            vocabulary,
            nodes: Vec::new(),
        };
        id3.nodes = id3.grow()?;

        debug!(
            "Grew id3 tree with {} nodes (depth {}) from {} words",
            id3.nodes.len(),
            id3.depth(),
            id3.vocabulary.len()
        );

        Ok(id3)
    }

    fn grow(&self) -> Result<Vec<TreeNode>> {
        let mut nodes: Vec<Option<TreeNode>> = vec![None];
        let mut stack = vec![Pending {
            node: ROOT,
            documents: self.documents.iter().collect(),
            candidates: self.vocabulary.iter().map(String::as_str).collect(),
        }];

        while let Some(Pending {
            node,
            documents,
            candidates,
        }) = stack.pop()
        {
            if let Some(class) = Self::single_class(&documents) {
                nodes[node] = Some(leaf(class));
                continue;
            }

            let majority = self.majority_class(&documents).unwrap_or_default();
            let Some(word) = self.most_informative_word(&documents, &candidates) else {
                nodes[node] = Some(leaf(majority));
                continue;
            };

            let (present, absent) = Self::split(word, &documents);
            let remaining: Vec<&str> = candidates.into_iter().filter(|w| *w != word).collect();

            let mut children = [ROOT; 2];
            let mut branches = Vec::with_capacity(2);
            for (child, subset) in children.iter_mut().zip([present, absent]) {
                *child = nodes.len();
                if subset.is_empty() {
                    nodes.push(Some(leaf(majority)));
                } else {
                    nodes.push(None);
                    branches.push(Pending {
                        node: *child,
                        documents: subset,
                        candidates: remaining.clone(),
                    });
                }
            }
            // Present branch is grown first.
            stack.extend(branches.into_iter().rev());

            nodes[node] = Some(TreeNode::Split {
                word: word.to_string(),
                present: children[0],
                absent: children[1],
            });
        }

        nodes
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| TextfoldError::classification("decision tree has unfinished nodes"))
    }

    /// The distinct training words, in first-seen order.
    pub fn vocabulary(&self) -> &IndexSet<String> {
        &self.vocabulary
    }

    /// The tree arena; the root is the first node.
    pub fn tree(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Number of split levels on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(ROOT, 0)];
        while let Some((id, depth)) = stack.pop() {
            match self.nodes.get(id) {
                Some(TreeNode::Split {
                    present, absent, ..
                }) => {
                    stack.push((*present, depth + 1));
                    stack.push((*absent, depth + 1));
                }
                Some(TreeNode::Leaf { .. }) => deepest = deepest.max(depth),
                None => {}
            }
        }
        deepest
    }

    /// Shannon entropy (base 2) of the class distribution of the documents.
    pub fn entropy(&self, documents: &[&ClassDocument]) -> f64 {
        let total = documents.len();
        let mut entropy = 0.0;
        for class in &self.classes {
            let count = documents.iter().filter(|d| d.label() == class).count();
            if count != 0 && total != 0 {
                let ratio = count as f64 / total as f64;
                entropy -= ratio * ratio.log2();
            }
        }
        entropy
    }

    /// Entropy reduction obtained by splitting the documents on a word.
    pub fn information_gain(&self, word: &str, documents: &[&ClassDocument]) -> f64 {
        if documents.is_empty() {
            return 0.0;
        }
        let total = documents.len() as f64;
        let (present, absent) = Self::split(word, documents);

        let mut gain = self.entropy(documents);
        gain -= self.entropy(&present) * present.len() as f64 / total;
        gain -= self.entropy(&absent) * absent.len() as f64 / total;
        gain
    }

    /// The candidate with the highest information gain; the last one wins ties.
    pub fn most_informative_word<'w>(
        &self,
        documents: &[&ClassDocument],
        candidates: &[&'w str],
    ) -> Option<&'w str> {
        let mut best: Option<(&'w str, f64)> = None;
        for &word in candidates {
            let gain = self.information_gain(word, documents);
            match best {
                Some((_, best_gain)) if gain < best_gain => {}
                _ => best = Some((word, gain)),
            }
        }
        best.map(|(word, _)| word)
    }

    /// Partition documents into those containing the word and those without it.
    pub fn split<'d>(
        word: &str,
        documents: &[&'d ClassDocument],
    ) -> (Vec<&'d ClassDocument>, Vec<&'d ClassDocument>) {
        documents
            .iter()
            .copied()
            .partition(|document| document.bag().contains(word))
    }

    /// Most frequent class among the documents; ties go to the earlier class.
    pub fn majority_class(&self, documents: &[&ClassDocument]) -> Option<&str> {
        let mut best: Option<(&str, usize)> = None;
        for class in &self.classes {
            let count = documents.iter().filter(|d| d.label() == class).count();
            if count == 0 {
                continue;
            }
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((class.as_str(), count)),
            }
        }
        best.map(|(class, _)| class)
    }

    /// The shared label if every document has the same one.
    pub fn single_class<'d>(documents: &[&'d ClassDocument]) -> Option<&'d str> {
        let (first, rest) = documents.split_first()?;
        rest.iter()
            .all(|document| document.label() == first.label())
            .then(|| first.label())
    }
}

fn leaf(class: &str) -> TreeNode {
    TreeNode::Leaf {
        class: class.to_string(),
    }
}

impl Classifier for Id3 {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict(&self, document: &Document) -> &str {
        let mut id = ROOT;
        loop {
            match self.nodes.get(id) {
                Some(TreeNode::Leaf { class }) => return class,
                Some(TreeNode::Split {
                    word,
                    present,
                    absent,
                }) => {
                    id = if document.bag().contains(word) {
                        *present
                    } else {
                        *absent
                    };
                }
                None => {
                    return self
                        .classes
                        .first()
                        .map(String::as_str)
                        .unwrap_or_default();
                }
            }
        }
    }

    fn name(&self) -> &str {
        "id3"
    }
}

/// Indented rendering: one node per line, two spaces per level, the present
/// branch of a split before its absent branch.
impl fmt::Display for Id3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![(ROOT, 0usize)];
        let mut first = true;
        while let Some((id, level)) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            if !first {
                writeln!(f)?;
            }
            first = false;

            let pad = "  ".repeat(level);
            match node {
                TreeNode::Leaf { class } => write!(f, "{pad}{class}")?,
                TreeNode::Split {
                    word,
                    present,
                    absent,
                } => {
                    write!(f, "{pad}{word}")?;
                    stack.push((*absent, level + 1));
                    stack.push((*present, level + 1));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentConfig;

    fn labeled(entries: &[(&str, &str)]) -> Vec<ClassDocument> {
        let parser = DocumentConfig::default().parser().unwrap();
        entries
            .iter()
            .map(|(text, label)| parser.parse_labeled(*text, *label).unwrap())
            .collect()
    }

    fn greetings() -> Vec<ClassDocument> {
        labeled(&[
            ("Hello, friend!", "+"),
            ("Hello, pal!", "+"),
            ("Hello, you.", "+"),
            ("Goodbye, friend.", "-"),
            ("Bye, human.", "-"),
        ])
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_entropy() {
        let documents = labeled(&[
            ("A positive document.", "+"),
            ("Another positive document.", "+"),
            ("Still positive.", "+"),
            ("This time it's negative.", "-"),
            ("Negative again.", "-"),
        ]);
        let id3 = Id3::new(documents.clone()).unwrap();
        let refs: Vec<&ClassDocument> = documents.iter().collect();

        let expected = -(3.0 / 5.0) * (3.0_f64 / 5.0).log2() - (2.0 / 5.0) * (2.0_f64 / 5.0).log2();
        assert!(close(id3.entropy(&refs), expected));
        assert_eq!(id3.entropy(&refs[..3]), 0.0);
        assert_eq!(id3.entropy(&[]), 0.0);
    }

    #[test]
    fn test_information_gain() {
        let documents = labeled(&[
            ("A positive document.", "+"),
            ("Another positive document.", "+"),
            ("Still a document.", "+"),
            ("This time it's negative.", "-"),
            ("Negative again.", "-"),
        ]);
        let id3 = Id3::new(documents.clone()).unwrap();
        let refs: Vec<&ClassDocument> = documents.iter().collect();

        let parent = -(3.0 / 5.0) * (3.0_f64 / 5.0).log2() - (2.0 / 5.0) * (2.0_f64 / 5.0).log2();
        assert!(close(id3.information_gain("document", &refs), parent));

        let without = -(1.0 / 3.0) * (1.0_f64 / 3.0).log2() - (2.0 / 3.0) * (2.0_f64 / 3.0).log2();
        let expected = parent - (3.0 / 5.0) * without;
        assert!(close(id3.information_gain("a", &refs), expected));
    }

    #[test]
    fn test_most_informative_word() {
        let documents = greetings();
        let id3 = Id3::new(documents.clone()).unwrap();
        let refs: Vec<&ClassDocument> = documents.iter().collect();
        let candidates: Vec<&str> = id3.vocabulary().iter().map(String::as_str).collect();

        assert_eq!(id3.most_informative_word(&refs, &candidates), Some("hello"));
        assert_eq!(id3.most_informative_word(&refs, &[]), None);
    }

    #[test]
    fn test_ties_pick_last_word() {
        let documents = labeled(&[("red apple", "+"), ("green pear", "-")]);
        let id3 = Id3::new(documents.clone()).unwrap();
        let refs: Vec<&ClassDocument> = documents.iter().collect();

        assert_eq!(
            id3.most_informative_word(&refs, &["red", "apple", "green", "pear"]),
            Some("pear")
        );
    }

    #[test]
    fn test_split() {
        let documents = greetings();
        let refs: Vec<&ClassDocument> = documents.iter().collect();

        let (present, absent) = Id3::split("friend", &refs);
        let present: Vec<&str> = present.iter().map(|d| d.text()).collect();
        let absent: Vec<&str> = absent.iter().map(|d| d.text()).collect();

        assert_eq!(present, vec!["Hello, friend!", "Goodbye, friend."]);
        assert_eq!(absent, vec!["Hello, pal!", "Hello, you.", "Bye, human."]);
    }

    #[test]
    fn test_majority_class() {
        let documents = labeled(&[("a", "-"), ("b", "+"), ("c", "+"), ("d", "-")]);
        let id3 = Id3::new(documents.clone()).unwrap();
        let refs: Vec<&ClassDocument> = documents.iter().collect();

        assert_eq!(id3.majority_class(&refs), Some("-"));
        assert_eq!(id3.majority_class(&refs[1..3]), Some("+"));
        assert_eq!(id3.majority_class(&[]), None);
    }

    #[test]
    fn test_tree() {
        let id3 = Id3::new(greetings()).unwrap();

        assert_eq!(id3.to_string(), "hello\n  +\n  -");
        assert_eq!(id3.tree().len(), 3);
        assert_eq!(id3.depth(), 1);

        let parser = DocumentConfig::default().parser().unwrap();
        assert_eq!(id3.predict(&parser.parse("hello there").unwrap()), "+");
        assert_eq!(id3.predict(&parser.parse("see you").unwrap()), "-");
    }

    #[test]
    fn test_empty_branch_takes_parent_majority() {
        let id3 = Id3::new(labeled(&[("same", "+"), ("same", "-")])).unwrap();

        assert_eq!(id3.to_string(), "same\n  +\n  +");
        assert_eq!(
            id3.tree()[0],
            TreeNode::Split {
                word: "same".to_string(),
                present: 1,
                absent: 2,
            }
        );
        assert_eq!(
            id3.tree()[2],
            TreeNode::Leaf {
                class: "+".to_string(),
            }
        );

        let parser = DocumentConfig::default().parser().unwrap();
        assert_eq!(id3.predict(&parser.parse("different").unwrap()), "+");
    }

    #[test]
    fn test_single_class_is_a_leaf() {
        let id3 = Id3::new(labeled(&[("one", "x"), ("two", "x")])).unwrap();

        assert_eq!(id3.to_string(), "x");
        assert_eq!(id3.depth(), 0);
        assert!(Id3::new(Vec::new()).is_err());
    }
}
