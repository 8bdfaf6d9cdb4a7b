use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::seq::SliceRandom;
use sd_core::{SlangDictionary, SlangEntry};
use sd_normalizer::{DictionaryPattern, Normalizer};

fn bench_dictionary() -> SlangDictionary {
    (0..1500)
        .map(|i| SlangEntry::new(format!("s{i}"), format!("meaning for slang {i}")))
        .collect()
}

fn generate_text(words: usize) -> String {
    let mut rng = rand::thread_rng();
    let vocab = ["wyd", "s12", "hello", "S400!", "there,", "s1499", "friend", "ok."];
    (0..words)
        .map(|_| *vocab.choose(&mut rng).unwrap_or(&"x"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn bench_token_policy(c: &mut Criterion) {
    let dict = bench_dictionary();
    let text = generate_text(2000);
    let n = Normalizer::whitespace_token();
    c.bench_function("token_normalize_2000_words", |b| {
        b.iter(|| black_box(n.normalize(&text, Some(&dict)).unwrap()))
    });
}

fn bench_regex_policy(c: &mut Criterion) {
    let dict = bench_dictionary();
    let text = generate_text(2000);
    c.bench_function("regex_compile_1500_keys", |b| {
        b.iter(|| black_box(DictionaryPattern::new(&dict).unwrap()))
    });
    let pattern = DictionaryPattern::new(&dict).unwrap();
    c.bench_function("regex_replace_2000_words", |b| {
        b.iter(|| black_box(pattern.replace(&text, &dict)))
    });
}

criterion_group!(benches, bench_token_policy, bench_regex_policy);
criterion_main!(benches);
