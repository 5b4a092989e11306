//! Criterion benchmarks for textfold.
//!
//! Covers the stages of a cross-validation run:
//! - Text analysis and bag-of-words construction
//! - Term-document matrix and tf-idf vectors
//! - Training and prediction for each classifier
//! - A full k-fold cross-validation

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use textfold::analysis::analyzer::Analyzer;
use textfold::classifier::{ClassifierKind, KnnConfig};
use textfold::document::{ClassDocument, DocumentConfig};
use textfold::evaluation::CrossValidator;
use textfold::term_document_matrix::{MatrixOptions, TermDocumentMatrix};

const POSITIVE_WORDS: [&str; 12] = [
    "great", "love", "perfect", "sturdy", "recommend", "excellent", "bright", "solid", "happy",
    "comfortable", "value", "works",
];
const NEGATIVE_WORDS: [&str; 12] = [
    "broken", "awful", "returned", "cheap", "flimsy", "refund", "noisy", "cracked", "useless",
    "disappointed", "waste", "stopped",
];
const NEUTRAL_WORDS: [&str; 16] = [
    "the", "strap", "guitar", "cable", "it", "and", "sound", "after", "a", "week", "product",
    "was", "this", "with", "my", "price",
];

/// Generate labelled review-like texts.
fn generate_test_texts(count: usize) -> Vec<(String, &'static str)> {
    let mut texts = Vec::with_capacity(count);
    for i in 0..count {
        let (words, label) = if i % 2 == 0 {
            (&POSITIVE_WORDS, "+")
        } else {
            (&NEGATIVE_WORDS, "-")
        };
        let length = 20 + (i % 30);
        let text: Vec<&str> = (0..length)
            .map(|j| {
                if j % 3 == 0 {
                    words[(i * 7 + j * 13) % words.len()]
                } else {
                    NEUTRAL_WORDS[(i * 5 + j * 11) % NEUTRAL_WORDS.len()]
                }
            })
            .collect();
        texts.push((text.join(" "), label));
    }
    texts
}

fn generate_documents(count: usize, config: &DocumentConfig) -> Vec<ClassDocument> {
    let parser = config.parser().unwrap();
    generate_test_texts(count)
        .into_iter()
        .map(|(text, label)| parser.parse_labeled(text, label).unwrap())
        .collect()
}

/// Benchmark text analysis and document parsing.
fn bench_text_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_analysis");

    let config = DocumentConfig::new().remove_stopwords(true).with_ngrams(vec![2]);
    let analyzer = config.analyzer().unwrap();
    let parser = config.parser().unwrap();
    let texts = generate_test_texts(1000);

    group.bench_function("analyze_single_document", |b| {
        b.iter(|| black_box(analyzer.analyze(black_box(&texts[0].0))))
    });

    group.throughput(Throughput::Elements(100));
    group.bench_function("parse_batch_documents", |b| {
        b.iter(|| {
            for (text, label) in texts.iter().take(100) {
                let _ = black_box(parser.parse_labeled(text.as_str(), *label));
            }
        })
    });

    group.finish();
}

/// Benchmark term-document matrix construction.
fn bench_term_document_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("term_document_matrix");
    group.sample_size(20);

    let documents = generate_documents(500, &DocumentConfig::new().preserve_duplicates(true));

    group.throughput(Throughput::Elements(500));
    group.bench_function("vocabulary_only", |b| {
        b.iter(|| {
            black_box(TermDocumentMatrix::new(
                documents.clone(),
                MatrixOptions::vocabulary_only(),
            ))
        })
    });

    group.bench_function("document_vectors", |b| {
        b.iter(|| {
            black_box(TermDocumentMatrix::new(
                documents.clone(),
                MatrixOptions::default().with_word_vectors(false),
            ))
        })
    });

    group.finish();
}

/// Benchmark training and prediction per classifier.
fn bench_classifiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("classifiers");
    group.sample_size(10);

    let documents = generate_documents(400, &DocumentConfig::default());
    let queries = generate_documents(50, &DocumentConfig::default());

    for kind in [
        ClassifierKind::NaiveBayes { smoothing: 1.0 },
        ClassifierKind::Knn(KnnConfig::new(5)),
        ClassifierKind::Id3,
    ] {
        let name = kind.name();
        group.bench_function(format!("{name}_train"), |b| {
            b.iter(|| black_box(kind.train(documents.clone()).unwrap()))
        });

        let classifier = kind.train(documents.clone()).unwrap();
        group.throughput(Throughput::Elements(queries.len() as u64));
        group.bench_function(format!("{name}_predict"), |b| {
            b.iter(|| {
                for query in &queries {
                    black_box(classifier.predict(query.document()));
                }
            })
        });
    }

    group.finish();
}

/// Benchmark a full cross-validation.
fn bench_cross_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("cross_validation");
    group.sample_size(10);

    let validator = CrossValidator::new(generate_documents(200, &DocumentConfig::default()), 5).unwrap();

    group.bench_function("naive_bayes_5_folds", |b| {
        b.iter(|| {
            black_box(
                validator
                    .cross_validate(&ClassifierKind::NaiveBayes { smoothing: 1.0 })
                    .unwrap(),
            )
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_text_analysis,
    bench_term_document_matrix,
    bench_classifiers
);

criterion_group!(slow_benches, bench_cross_validation);

criterion_main!(benches, slow_benches);
