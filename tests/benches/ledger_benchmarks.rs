//! # PhotoChain Ledger Benchmarks
//!
//! | Path | What is measured |
//! |------|------------------|
//! | submit | validate → hash → store → fold, in-memory store |
//! | replay | full projection rebuild from a block list |
//! | audit | `verify_chain` over every block |
//! | feed | home feed reconstruction with moderation |
//! | scorer | entropy/std-dev histogram over uploaded bytes |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pc_01_state_projection::{FeedQuery, Projection};
use pc_02_chain_ledger::{analyze_bytes, verify_chain, Ledger};
use pc_tests::fixtures::*;
use shared_types::{Block, VoteType};

/// A ledger with `users` accounts following user0, each posting once and
/// voting on the first post.
fn populated_ledger(users: usize) -> Ledger {
    let ledger = memory_ledger().expect("open ledger");
    let names: Vec<String> = (0..users).map(|i| format!("user{i}")).collect();
    for name in &names {
        ledger.submit(register(name)).expect("register");
    }
    let mut first: Option<Block> = None;
    for name in &names {
        if name != "user0" {
            ledger.submit(follow(name, "user0")).expect("follow");
        }
        let post = ledger
            .submit(post_image(name, &format!("{name}.png")))
            .expect("post");
        let target = first.get_or_insert(post);
        ledger
            .submit(vote(name, target, VoteType::Believe))
            .expect("vote");
    }
    ledger
}

fn bench_submit(c: &mut Criterion) {
    let mut group = c.benchmark_group("pc-02-submit");
    group.throughput(Throughput::Elements(1));

    group.bench_function("register_user", |b| {
        let ledger = memory_ledger().expect("open ledger");
        let mut i = 0u64;
        b.iter(|| {
            i += 1;
            black_box(ledger.submit(register(&format!("u{i}"))).expect("submit"))
        })
    });

    group.finish();
}

fn bench_replay_and_audit(c: &mut Criterion) {
    let mut group = c.benchmark_group("pc-01-replay");

    for users in [10usize, 100, 500] {
        let blocks = populated_ledger(users).read_all();
        group.throughput(Throughput::Elements(blocks.len() as u64));

        group.bench_with_input(BenchmarkId::new("replay", users), &blocks, |b, blocks| {
            b.iter(|| black_box(Projection::replay(blocks)))
        });
        group.bench_with_input(BenchmarkId::new("verify_chain", users), &blocks, |b, blocks| {
            b.iter(|| black_box(verify_chain(blocks).expect("valid chain")))
        });
    }

    group.finish();
}

fn bench_feed(c: &mut Criterion) {
    let mut group = c.benchmark_group("pc-01-feed");

    for users in [100usize, 500] {
        let ledger = populated_ledger(users);
        group.bench_function(BenchmarkId::new("home_feed", users), |b| {
            b.iter(|| {
                ledger.with_view(|blocks, projection| {
                    black_box(FeedQuery::new(blocks, projection).home_feed("user1"))
                })
            })
        });
    }

    group.finish();
}

fn bench_scorer(c: &mut Criterion) {
    let mut group = c.benchmark_group("pc-02-scorer");

    for size in [64 * 1024usize, 1024 * 1024] {
        let data: Vec<u8> = (0..size).map(|i| (i * 31 % 251) as u8).collect();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("analyze_bytes", size), &data, |b, data| {
            b.iter(|| black_box(analyze_bytes(data)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_submit,
    bench_replay_and_audit,
    bench_feed,
    bench_scorer
);
criterion_main!(benches);
