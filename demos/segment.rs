use pixel_kmeans::*;
use rand::prelude::*;

fn main() {
    let (rows, cols, k, max_iter) = (60, 80, 3, 100);

    // Three soft bands of color, plus some noise
    let mut rnd = StdRng::seed_from_u64(7);
    let pixels: Vec<[u8; 3]> = (0..rows * cols)
        .map(|i| {
            let base: [u8; 3] = match (i % cols) * 3 / cols {
                0 => [200, 40, 40],
                1 => [40, 200, 40],
                _ => [40, 40, 200],
            };
            base.map(|v| v.saturating_add(rnd.gen_range(0..30)))
        })
        .collect();

    let conf = KMeansConfig::build()
        .random_generator(rnd)
        .init_done(&|centers| println!("Seeded {} centers.", centers.len()))
        .iteration_done(&|nr, _, shift| println!("Iteration {} - center shift: {:.4}", nr, shift))
        .build();

    let mut kmean: KMeans<f32, _> = KMeans::new(&pixels, rows, cols, k, WeightedDistance::default(), conf)
        .expect("valid image");
    let termination = kmean.run(max_iter, 0.5).expect("k-means run");

    println!("Stopped: {:?}", termination);
    for (center, size) in kmean.result_centers().iter().zip(kmean.cluster_sizes()) {
        println!("Center {:?} at ({}, {}) - {} pixels", center.feature, center.row, center.col, size);
    }
    println!("Error: {}", kmean.distsum());
}
