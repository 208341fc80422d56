//! Benchmarks for pattern compilation, matching and name building.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lexical_keys::{
    compile, match_key, match_keys, match_string, BatchConfig, Key, KeyComparer, NamePolicy,
    PatternCache,
};

const PATTERNS: [&str; 3] = [
    "[Key]",
    "{Culture:}{Type:}{anysection_n:}[Key]",
    "Resources/{Culture/}{Assembly.}{Section_0.}{Section_1.}{Section_2.}[Section_n]{-Key}.json",
];

fn deep_key(depth: usize) -> Key {
    let mut key = Key::root().culture("fi").assembly("ConsoleApp1");
    for i in 0..depth {
        key = key.section(format!("Section{i}"));
    }
    key.key("Success")
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");
    for (i, text) in PATTERNS.iter().enumerate() {
        group.bench_with_input(BenchmarkId::new("uncached", i), text, |b, text| {
            b.iter(|| compile(black_box(text)).unwrap())
        });
    }

    let cache = PatternCache::new();
    group.bench_function("cached", |b| {
        b.iter(|| cache.get_or_compile(black_box(PATTERNS[2])).unwrap())
    });
    group.finish();
}

fn bench_match_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("match_key");
    let pattern = compile(PATTERNS[2]).unwrap();
    for depth in [1, 4, 16] {
        let key = deep_key(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &key, |b, key| {
            b.iter(|| match_key(&pattern, black_box(key)).success())
        });
    }
    group.finish();
}

fn bench_match_string(c: &mut Criterion) {
    let mut group = c.benchmark_group("match_string");
    let pattern = compile(PATTERNS[2]).unwrap();
    let name = match_key(&pattern, &deep_key(4)).render().unwrap().to_string();
    pattern.composite_regex().unwrap();

    group.bench_function("resource_path", |b| {
        b.iter(|| match_string(&pattern, black_box(&name)).unwrap().success())
    });
    group.finish();
}

fn bench_build_name(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_name");
    let policy = NamePolicy::default();
    let pattern = compile(PATTERNS[1]).unwrap();
    for depth in [1, 4, 16] {
        let key = deep_key(depth);
        group.bench_with_input(BenchmarkId::new("policy", depth), &key, |b, key| {
            b.iter(|| policy.build_name(black_box(key)))
        });
        group.bench_with_input(BenchmarkId::new("pattern", depth), &key, |b, key| {
            b.iter(|| pattern.build_name(black_box(key)))
        });
    }
    group.finish();
}

fn bench_key_identity(c: &mut Criterion) {
    let mut group = c.benchmark_group("key_identity");
    let comparer = KeyComparer::default_comparer();
    let a = deep_key(8);
    let b = deep_key(8);

    group.bench_function("equals", |bench| {
        bench.iter(|| comparer.equals(black_box(&a), black_box(&b)))
    });
    group.bench_function("hash_uncached", |bench| {
        bench.iter(|| comparer.hash(&deep_key(black_box(8))))
    });
    group.bench_function("hash_cached", |bench| bench.iter(|| comparer.hash(black_box(&a))));
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_match_keys");
    let pattern = compile(PATTERNS[1]).unwrap();
    let keys: Vec<Key> = (0..4096)
        .map(|i| Key::root().culture("fi").type_("Controller").key(format!("K{i}")))
        .collect();

    group.bench_function("sequential", |b| {
        b.iter(|| match_keys(&pattern, black_box(&keys), &BatchConfig::sequential()).len())
    });
    group.bench_function("parallel", |b| {
        b.iter(|| match_keys(&pattern, black_box(&keys), &BatchConfig::default()).len())
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_compile,
    bench_match_key,
    bench_match_string,
    bench_build_name,
    bench_key_identity,
    bench_batch
);
criterion_main!(benches);
