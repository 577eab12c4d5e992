use criterion::{criterion_group, criterion_main, Criterion};
use engine::tokenizer::Tokenizer;
use engine::{process_queries, DocumentStatus, SearchServer};

const WORDS: &[&str] = &[
    "cat", "dog", "bird", "fish", "funny", "nasty", "curly", "hair", "pet", "rat", "city", "tree",
    "river", "stone", "cloud", "green", "quick", "lazy", "brown", "fox",
];

fn text(seed: usize, len: usize) -> String {
    (0..len)
        .map(|i| WORDS[(seed * 31 + i * 17 + i * i) % WORDS.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

fn build_server(docs: usize) -> SearchServer {
    let mut server = SearchServer::with_stop_words("the and in").unwrap();
    for id in 0..docs {
        server
            .add_document(id as i32, &text(id, 40), DocumentStatus::Actual, &[id as i32 % 7])
            .unwrap();
    }
    server
}

fn bench_tokenize(c: &mut Criterion) {
    let tokenizer = Tokenizer::from_text("the and in").unwrap();
    let input = text(3, 2_000);
    c.bench_function("tokenize_2k_words", |b| b.iter(|| tokenizer.tokenize(&input)));
}

fn bench_find_top(c: &mut Criterion) {
    let server = build_server(5_000);
    c.bench_function("find_top_documents", |b| {
        b.iter(|| server.find_top_documents("cat funny -rat hair"))
    });
}

fn bench_batch(c: &mut Criterion) {
    let server = build_server(5_000);
    let queries: Vec<String> = (0..200).map(|i| text(i, 4)).collect();
    c.bench_function("process_queries_200", |b| b.iter(|| process_queries(&server, &queries)));
}

criterion_group!(benches, bench_tokenize, bench_find_top, bench_batch);
criterion_main!(benches);
