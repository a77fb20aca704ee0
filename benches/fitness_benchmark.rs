use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use swarmlab::{
    prelude::*,
    problems::{ProblemKind, Scenario},
};

fn fitness_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Fitness");
    for kind in ProblemKind::ALL {
        for size in [1, 3, 5] {
            group.bench_with_input(BenchmarkId::new(kind.name(), size), &size, |b, size| {
                let problem: Scenario = kind.build(*size);
                let mut rng = Rng::with_seed(0);
                let x = problem.bounds().random_vector_in(&mut rng);
                b.iter(|| {
                    let fx = problem.evaluate(black_box(&x), &()).unwrap();
                    black_box(fx);
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, fitness_benchmark);
criterion_main!(benches);
