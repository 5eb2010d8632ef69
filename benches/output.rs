use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use hotsort::datagen::DatasetGenerator;
use hotsort::IngestionController;

// Snapshot cost of output() on a large container, plus a rebalance-heavy batch.
fn benchmark_output(c: &mut Criterion) {
    let mut datasets = DatasetGenerator::from_seed(7);

    let mut sorter = IngestionController::new();
    sorter.load(datasets.random_range(100_000, 0, 1_000_000));

    // Values in 0..=100 repeat far more than the threshold
    let hot_batch = datasets.random_range(5_000, 0, 100);

    let mut group = c.benchmark_group("Output");
    group.sample_size(40);
    group.bench_function("to_vec_100000", |b| {
        b.iter(|| {
            black_box(sorter.output().to_vec());
        });
    });
    group.bench_function("hot_batch_5000", |b| {
        b.iter(|| {
            let mut session = IngestionController::new();
            session.load(sorter.output().iter().copied());
            black_box(session.insert_batch(&hot_batch));
        });
    });
    group.finish();
}

criterion_group!(benches, benchmark_output);
criterion_main!(benches);
