//! Criterion benchmarks for spamsift.
//!
//! Covers the stages of the classification pipeline:
//! - Text normalization
//! - TF-IDF fitting and transformation
//! - Naive Bayes training and prediction

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use spamsift::analysis::analyzer::TextNormalizer;
use spamsift::dataset::DatasetGenerator;
use spamsift::ml::{Classifier, Label, MultinomialNaiveBayes, TfIdfVectorizer, VectorizerConfig};
use std::hint::black_box;

/// Generate raw labeled messages for benchmarking.
fn generate_messages(count: usize) -> (Vec<String>, Vec<Label>) {
    DatasetGenerator::new(Some(42))
        .with_counts(count / 2, count - count / 2)
        .generate()
        .into_iter()
        .filter_map(|m| m.label.map(|label| (m.text, label)))
        .unzip()
}

fn bench_normalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalization");

    let normalizer = TextNormalizer::new().unwrap();
    let (texts, _) = generate_messages(1000);

    group.bench_function("clean_single_message", |b| {
        b.iter(|| black_box(normalizer.clean(black_box(&texts[0]))))
    });

    group.throughput(Throughput::Elements(1000));
    group.bench_function("clean_batch_messages", |b| {
        b.iter(|| {
            for text in &texts {
                black_box(normalizer.clean(black_box(text)));
            }
        })
    });

    group.finish();
}

fn bench_vectorizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("tfidf");

    let normalizer = TextNormalizer::new().unwrap();
    let (texts, _) = generate_messages(1000);
    let cleaned: Vec<String> = texts.iter().map(|t| normalizer.clean(t)).collect();

    group.throughput(Throughput::Elements(cleaned.len() as u64));
    group.bench_function("fit", |b| {
        b.iter(|| {
            let mut vectorizer = TfIdfVectorizer::new(VectorizerConfig::default()).unwrap();
            vectorizer.fit(black_box(&cleaned)).unwrap();
            black_box(vectorizer)
        })
    });

    let mut vectorizer = TfIdfVectorizer::new(VectorizerConfig::default()).unwrap();
    vectorizer.fit(&cleaned).unwrap();
    group.bench_function("transform", |b| {
        b.iter(|| black_box(vectorizer.transform_all(black_box(&cleaned)).unwrap()))
    });

    group.finish();
}

fn bench_naive_bayes(c: &mut Criterion) {
    let mut group = c.benchmark_group("naive_bayes");

    let normalizer = TextNormalizer::new().unwrap();
    let (texts, labels) = generate_messages(1000);
    let cleaned: Vec<String> = texts.iter().map(|t| normalizer.clean(t)).collect();
    let mut vectorizer = TfIdfVectorizer::new(VectorizerConfig::default()).unwrap();
    let features = vectorizer.fit_transform(&cleaned).unwrap();

    group.throughput(Throughput::Elements(features.len() as u64));
    group.bench_function("fit", |b| {
        b.iter(|| {
            let mut model = MultinomialNaiveBayes::default();
            model.fit(black_box(&features), black_box(&labels)).unwrap();
            black_box(model)
        })
    });

    let mut model = MultinomialNaiveBayes::default();
    model.fit(&features, &labels).unwrap();
    group.bench_function("predict_proba", |b| {
        b.iter(|| {
            for x in &features {
                black_box(model.predict_proba(black_box(x)).unwrap());
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_normalization, bench_vectorizer, bench_naive_bayes);
criterion_main!(benches);
