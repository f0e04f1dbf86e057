//! Benchmarks for the aggregation hot paths.
//!
//! Run with: cargo bench
//!
//! Measures classification throughput, payload extraction, and merge
//! performance over realistic list sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rulemerge::classifier::classify;
use rulemerge::parser::parse_payload;
use rulemerge::RuleSet;

/// Generate a mix of untyped and typed tokens.
fn generate_tokens(count: usize) -> Vec<String> {
    let mut tokens = Vec::with_capacity(count);
    for i in 0..count {
        match i % 5 {
            0 => tokens.push(format!("domain{}.example.com", i)),
            1 => tokens.push(format!("*.suffix{}.example", i)),
            2 => tokens.push(format!("10.{}.0.0/16", i % 256)),
            3 => tokens.push(format!("DOMAIN-SUFFIX,typed{}.example", i)),
            _ => tokens.push(format!("keyword{}", i)),
        }
    }
    tokens
}

/// Generate a payload document with the given item count.
fn generate_payload(count: usize) -> String {
    let mut doc = String::from("# NAME: bench\npayload:\n");
    for i in 0..count {
        doc.push_str(&format!("  - DOMAIN,item{}.example.com\n", i));
    }
    doc
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    for size in [1_000, 10_000] {
        let tokens = generate_tokens(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &tokens, |b, tokens| {
            b.iter(|| {
                for token in tokens {
                    black_box(classify(token));
                }
            });
        });
    }
    group.finish();
}

fn bench_parse_payload(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_payload");
    for size in [1_000, 10_000] {
        let doc = generate_payload(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| black_box(parse_payload(doc)));
        });
    }
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let tokens = generate_tokens(10_000);
    let rules: Vec<_> = tokens.iter().map(|t| classify(t)).collect();

    c.bench_function("merge_10k_with_duplicates", |b| {
        b.iter(|| {
            let mut set = RuleSet::new();
            set.extend(rules.iter().cloned());
            // Merging the same rules again exercises the dedup path
            set.extend(rules.iter().cloned());
            black_box(set.len())
        });
    });
}

criterion_group!(benches, bench_classify, bench_parse_payload, bench_merge);
criterion_main!(benches);
