use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pixel_kmeans::{EuclideanDistance, KMeans, KMeansConfig, WeightedDistance};
use rand::prelude::*;
use std::time::Duration;

fn random_image(rows: usize, cols: usize) -> Vec<[u8; 3]> {
    let mut rnd = StdRng::seed_from_u64(1337);
    (0..rows * cols).map(|_| rnd.gen()).collect()
}

fn benchmark_image_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans_image_size");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    for side in [32usize, 64, 128] {
        let pixels = random_image(side, side);
        group.throughput(Throughput::Elements((side * side) as u64));
        group.bench_with_input(BenchmarkId::new("euclidean", side), &side, |b, &side| {
            b.iter(|| {
                let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(42)).build();
                let mut kmean: KMeans<f32, _> = KMeans::new(&pixels, side, side, 8, EuclideanDistance, conf).unwrap();
                kmean.run(black_box(10), -1.0).unwrap()
            });
        });
        group.bench_with_input(BenchmarkId::new("weighted", side), &side, |b, &side| {
            b.iter(|| {
                let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(42)).build();
                let mut kmean: KMeans<f32, _> = KMeans::new(&pixels, side, side, 8, WeightedDistance::default(), conf).unwrap();
                kmean.run(black_box(10), -1.0).unwrap()
            });
        });
    }
    group.finish();
}

fn benchmark_cluster_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans_clusters");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let pixels = random_image(64, 64);
    for k in [2usize, 8, 32] {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            b.iter(|| {
                let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(42)).build();
                let mut kmean: KMeans<f64, _> = KMeans::new(&pixels, 64, 64, k, EuclideanDistance, conf).unwrap();
                kmean.run(black_box(10), -1.0).unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_image_sizes, benchmark_cluster_counts);
criterion_main!(benches);
