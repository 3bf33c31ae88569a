use corpus_embed::Corpus;
use criterion::measurement::Measurement;
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkGroup, BenchmarkId, Criterion};
use rand::distr::{Distribution, Uniform};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

#[derive(Clone)]
pub struct CorpusConfig {
    seed: u64,
    corpus_sizes: Vec<(u32, u32)>,
    words_per_document: usize,
    measurement_time: u64,
    sample_size: usize,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            corpus_sizes: vec![(100, 500), (1000, 2000), (3000, 6000)],
            words_per_document: 80,
            measurement_time: 10,
            sample_size: 10,
        }
    }
}

fn create_records(
    num_docs: u32,
    vocab_size: u32,
    words_per_document: usize,
    seed: u64,
) -> Vec<(u32, u32, u32)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let word_dist = Uniform::try_from(1..=vocab_size).unwrap();
    let count_dist = Uniform::try_from(1..=10u32).unwrap();

    let mut records = Vec::with_capacity(num_docs as usize * words_per_document);
    for doc_id in 1..=num_docs {
        for _ in 0..words_per_document {
            records.push((doc_id, word_dist.sample(&mut rng), count_dist.sample(&mut rng)));
        }
    }
    records
}

fn build_corpus(num_docs: u32, vocab_size: u32, records: &[(u32, u32, u32)]) -> Corpus {
    Corpus::build(
        "bench",
        num_docs as usize,
        (1..=vocab_size).map(|id| (id, format!("word{}", id))),
        records.iter().copied(),
    )
    .unwrap()
}

fn configure_group<'a, M: Measurement>(
    c: &'a mut Criterion<M>,
    name: &str,
    config: &CorpusConfig,
) -> BenchmarkGroup<'a, M> {
    let mut group = c.benchmark_group(name);
    group.measurement_time(Duration::from_secs(config.measurement_time));
    group.sample_size(config.sample_size);
    group
}

pub fn bench_corpus_views(c: &mut Criterion) {
    let _ = env_logger::try_init();
    let config = CorpusConfig::default();
    let mut group = configure_group(c, "Corpus_Views", &config);

    for &(num_docs, vocab_size) in config.corpus_sizes.iter() {
        let seed = config.seed + (num_docs * vocab_size) as u64;
        let records = create_records(num_docs, vocab_size, config.words_per_document, seed);
        let label = format!("{}docs_{}words", num_docs, vocab_size);

        group.bench_with_input(BenchmarkId::new("build", &label), &records, |b, records| {
            b.iter(|| build_corpus(num_docs, vocab_size, records));
        });

        group.bench_with_input(
            BenchmarkId::new("document_term", &label),
            &records,
            |b, records| {
                b.iter_batched(
                    || build_corpus(num_docs, vocab_size, records),
                    |corpus| corpus.document_term_matrix().sum(),
                    BatchSize::LargeInput,
                );
            },
        );

        group.bench_with_input(BenchmarkId::new("tfidf", &label), &records, |b, records| {
            b.iter_batched(
                || build_corpus(num_docs, vocab_size, records),
                |corpus| corpus.tfidf_matrix().unwrap().sum(),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(corpus_benches, bench_corpus_views);
criterion_main!(corpus_benches);
