//! # Axé Attorney Subsystem Benchmarks
//!
//! | Subsystem | Claim |
//! |-----------|-------|
//! | ax-01 Action Codec | header pre-check is O(1); decode bounded by one verify |
//! | ax-02 Membership State | block validation linear in actions; merge order-free |

use criterion::{criterion_group, criterion_main, Criterion};

use ax_tests::benchmarks::{ax_01_codec, ax_02_membership};

fn bench_action_codec(c: &mut Criterion) {
    ax_01_codec::register_benchmarks(c);
}

fn bench_membership_state(c: &mut Criterion) {
    ax_02_membership::register_benchmarks(c);
}

criterion_group!(benches, bench_action_codec, bench_membership_state);

criterion_main!(benches);
