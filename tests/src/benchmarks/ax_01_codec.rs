//! # AX-01 Action Codec Benchmarks
//!
//! - Header pre-checks (`kind`, `is_attorney_non_void`) are constant time
//! - Full decode is dominated by signature verification
//! - Tampered input is rejected no slower than valid input is accepted

use std::time::Duration;

use ax_01_action_codec::{get_tokens, is_attorney_non_void, kind, Action};
use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use rand::Rng;

use crate::fixtures::{grant, join, key, void};

fn random_payload(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen()).collect()
}

pub fn bench_header_prechecks(c: &mut Criterion) {
    let mut group = c.benchmark_group("ax-01-header");
    let bytes = join(&key(1), "alice", r#"{"bio":"benchmark"}"#);

    group.bench_function("kind", |b| b.iter(|| black_box(kind(black_box(&bytes)))));
    group.bench_function("is_attorney_non_void", |b| {
        b.iter(|| black_box(is_attorney_non_void(black_box(&bytes))))
    });
    group.bench_function("get_tokens", |b| {
        b.iter(|| black_box(get_tokens(black_box(&bytes))))
    });

    group.finish();
}

pub fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("ax-01-decode");
    group.measurement_time(Duration::from_secs(5));

    let alice = key(1);
    let join_bytes = join(&alice, "alice", r#"{"bio":"benchmark"}"#);
    let grant_bytes = grant(&alice, &key(2).token());

    group.bench_function("join_network", |b| {
        b.iter(|| black_box(Action::decode(black_box(&join_bytes)).is_ok()))
    });
    group.bench_function("grant_power_of_attorney", |b| {
        b.iter(|| black_box(Action::decode(black_box(&grant_bytes)).is_ok()))
    });

    for size in [0usize, 256, 4096, 65536] {
        let bytes = void(1, &alice.token(), &alice, &random_payload(size));
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::new("void", size), &bytes, |b, bytes| {
            b.iter(|| black_box(Action::decode(black_box(bytes)).is_ok()))
        });
    }

    group.finish();
}

pub fn bench_adversarial(c: &mut Criterion) {
    let mut group = c.benchmark_group("ax-01-adversarial");

    let mut tampered = join(&key(1), "alice", "{}");
    let last = tampered.len() - 1;
    tampered[last] ^= 0xFF;
    group.bench_function("bad_signature", |b| {
        b.iter(|| black_box(Action::decode(black_box(&tampered)).is_err()))
    });

    let garbage = random_payload(512);
    group.bench_function("garbage", |b| {
        b.iter(|| black_box(Action::decode(black_box(&garbage)).is_err()))
    });

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_header_prechecks(c);
    bench_decode(c);
    bench_adversarial(c);
}
