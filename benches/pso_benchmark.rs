use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use swarmlab::{prelude::*, problems::ProblemKind};

fn pso_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("PSO");
    group.sample_size(10);
    let kind = ProblemKind::Pathfinding2D;
    let problem = kind.build(kind.default_size());
    for topology in [
        SwarmTopology::Global,
        SwarmTopology::Social { neighbor_size: 5 },
        SwarmTopology::Geographic { neighbor_size: 5 },
    ] {
        group.bench_with_input(
            BenchmarkId::new("Pathfinding2D", topology.name()),
            &topology,
            |b, topology| {
                let config = PSOConfig::new(problem.bounds())
                    .with_n_particles(50)
                    .with_max_iter(100)
                    .with_topology(*topology);
                b.iter_batched(
                    || PSO::new(config.clone(), Rng::with_seed(0)).unwrap(),
                    |mut pso| {
                        let summary = pso.optimize(&problem).unwrap();
                        black_box(summary);
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }
    group.finish();
}

criterion_group!(benches, pso_benchmark);
criterion_main!(benches);
