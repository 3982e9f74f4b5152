//! Criterion benchmarks for the m2 search hot paths.
//! Focus: BFS closure per candidate, start prune, and full searches for small (n, a).
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use percolate::api::{
    build_neighbors, compute, CancelToken, CirculantParams, InfectionWorkspace,
    NeighborSemantics, Progress, SearchCfg,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_candidate(n: usize, k: usize, rng: &mut StdRng) -> Vec<usize> {
    let mut set = vec![0usize];
    while set.len() < k {
        let v = rng.gen_range(1..n);
        if !set.contains(&v) {
            set.push(v);
        }
    }
    set.sort_unstable();
    set
}

fn bench_workspace(c: &mut Criterion) {
    let mut group = c.benchmark_group("workspace");
    for &(n, a) in &[(64i64, 7i64), (256, 31), (1024, 101)] {
        let params = CirculantParams::new(n, a).unwrap();
        let table = build_neighbors(params, NeighborSemantics::Simple).unwrap();
        let cancel = CancelToken::new();
        let mut ws = InfectionWorkspace::new(n as usize).unwrap();
        let mut rng = StdRng::seed_from_u64(43);
        let k = (a as usize + 3) / 2;
        group.bench_with_input(BenchmarkId::new("can_start", n), &n, |b, _| {
            b.iter_batched(
                || random_candidate(n as usize, k, &mut rng),
                |set| ws.can_start(&table, &set),
                BatchSize::SmallInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("spread", n), &n, |b, _| {
            b.iter_batched(
                || random_candidate(n as usize, k, &mut rng),
                |set| ws.spread(&table, &set, &cancel),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10);
    for &(n, a) in &[(16i64, 5i64), (20, 7), (24, 9)] {
        let params = CirculantParams::new(n, a).unwrap();
        group.bench_with_input(
            BenchmarkId::new("compute", format!("n{n}_a{a}")),
            &params,
            |b, &p| {
                b.iter(|| compute(p, SearchCfg::default(), &CancelToken::new(), &Progress::new()))
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_workspace, bench_search);
criterion_main!(benches);
