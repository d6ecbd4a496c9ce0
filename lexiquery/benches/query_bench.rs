// Criterion benchmarks for lexiquery.
//
// Set LEXIQUERY_WORDLIST to a wordlist file (one word per line) to benchmark
// against a real vocabulary; otherwise a synthetic one is generated.
//
// Run:
//   cargo bench -p lexiquery
//   LEXIQUERY_WORDLIST=/usr/share/dict/words cargo bench -p lexiquery

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lexiquery::{Corpus, CorpusOptions, PatternMatcher, MultiPatternQuery};

fn synthetic_wordlist() -> Vec<String> {
    // Deterministic pseudo-random words over a small alphabet
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };
    (0..100_000)
        .map(|_| {
            let len = 2 + (next() % 14) as usize;
            (0..len)
                .map(|_| ALPHABET[(next() % ALPHABET.len() as u64) as usize] as char)
                .collect()
        })
        .collect()
}

fn load_corpus() -> Corpus {
    match std::env::var("LEXIQUERY_WORDLIST") {
        Ok(path) => Corpus::load(&path, CorpusOptions::default())
            .unwrap_or_else(|e| panic!("unable to load {}: {}", path, e)),
        Err(_) => Corpus::from_lines(synthetic_wordlist()).unwrap(),
    }
}

fn bench_build(c: &mut Criterion) {
    let words = synthetic_wordlist();
    c.bench_function("build_corpus_100k", |b| {
        b.iter(|| Corpus::from_lines(black_box(&words)).unwrap())
    });
}

fn bench_queries(c: &mut Criterion) {
    let corpus = load_corpus();

    c.bench_function("words_of_length", |b| {
        b.iter(|| corpus.words_of_length(black_box(7)).len())
    });
    c.bench_function("words_containing_short", |b| {
        b.iter(|| corpus.words_containing(black_box("k")).len())
    });
    c.bench_function("words_containing_long", |b| {
        b.iter(|| corpus.words_containing(black_box("tion")).len())
    });
    c.bench_function("pattern_matcher", |b| {
        let matcher = PatternMatcher::new("z", "z", 7);
        b.iter(|| matcher.find(&corpus).len())
    });
    c.bench_function("multi_pattern_query", |b| {
        let query = MultiPatternQuery::new(
            &["a", "in", "sur"],
            &["b", "tion", "x"],
            &["z", "s", "ons"],
            8,
            16,
        );
        b.iter(|| query.find(&corpus).len())
    });
}

criterion_group!(benches, bench_build, bench_queries);
criterion_main!(benches);
