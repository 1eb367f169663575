//! # AX-02 Membership State Benchmarks
//!
//! - Validating a block of joins scales linearly with block size
//! - Merging sibling deltas is independent of input order
//! - Incorporate cost per fact on in-memory vaults

use ax_02_membership_state::{CommittedState, MutationSet};
use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use shared_crypto::{hash_bytes, PrivateKey};

use crate::fixtures::{grant, join};

fn actor(index: u32) -> PrivateKey {
    let mut seed = [0u8; 32];
    seed[..4].copy_from_slice(&index.to_be_bytes());
    PrivateKey::from_seed(seed)
}

fn join_block(size: u32) -> Vec<Vec<u8>> {
    (0..size)
        .map(|i| join(&actor(i), &format!("member-{i}"), "{}"))
        .collect()
}

fn synthetic_set(offset: u32, size: u32) -> MutationSet {
    let mut set = MutationSet::new();
    for i in offset..offset + size {
        let h = hash_bytes(&i.to_be_bytes());
        if i % 3 == 0 {
            set.revoke_power.insert(h);
        } else {
            set.grant_power.insert(h);
        }
        set.new_members.insert(hash_bytes(&(i + 1_000_000).to_be_bytes()));
    }
    set
}

pub fn bench_validate_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("ax-02-validate");

    for size in [10u32, 100, 1000] {
        let block = join_block(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("join_block", size), &block, |b, block| {
            b.iter(|| {
                let state = CommittedState::in_memory();
                let mut overlay = state.validator(1);
                let accepted = block
                    .iter()
                    .filter(|bytes| matches!(overlay.validate(bytes), Ok(v) if v.is_accepted()))
                    .count();
                black_box(accepted)
            })
        });
    }

    // Delegations against committed membership.
    let state = CommittedState::in_memory();
    let mut genesis = state.validator(1);
    for bytes in join_block(100) {
        let _ = genesis.validate(&bytes);
    }
    if state.incorporate(genesis.mutations()).is_ok() {
        let grants: Vec<Vec<u8>> = (0..100)
            .map(|i| grant(&actor(i), &actor(i + 100).token()))
            .collect();
        group.bench_function("grant_block_100", |b| {
            b.iter(|| {
                let mut overlay = state.validator(2);
                for bytes in &grants {
                    let _ = black_box(overlay.validate(bytes));
                }
                black_box(overlay.into_mutations().len())
            })
        });
    }

    group.finish();
}

pub fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("ax-02-merge");

    for siblings in [2u32, 8, 32] {
        let sets: Vec<MutationSet> = (0..siblings).map(|s| synthetic_set(s * 50, 100)).collect();
        group.bench_with_input(BenchmarkId::new("siblings", siblings), &sets, |b, sets| {
            b.iter(|| black_box(MutationSet::merge(sets.iter())))
        });
    }

    group.finish();
}

pub fn bench_incorporate(c: &mut Criterion) {
    let mut group = c.benchmark_group("ax-02-incorporate");
    let set = synthetic_set(0, 1000);
    group.throughput(Throughput::Elements(set.len() as u64));

    group.bench_function("in_memory_1000", |b| {
        b.iter(|| {
            let state = CommittedState::in_memory();
            black_box(state.incorporate(&set).is_ok())
        })
    });

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_validate_block(c);
    bench_merge(c);
    bench_incorporate(c);
}
