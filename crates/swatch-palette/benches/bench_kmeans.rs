use std::sync::atomic::AtomicBool;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use swatch_image::{Image, ImageSize};
use swatch_palette::{extract_palette, kmeans::kmeans, KMeansConfig, PaletteConfig};

fn random_points(count: usize) -> (Vec<[f64; 3]>, Vec<f64>) {
    let mut rng = StdRng::from_seed([0; 32]);
    let points = (0..count)
        .map(|_| {
            [
                rng.random_range(0.0..256.0),
                rng.random_range(0.0..256.0),
                rng.random_range(0.0..256.0),
            ]
        })
        .collect();
    let weights = (0..count).map(|_| rng.random_range(1.0..10.0)).collect();
    (points, weights)
}

fn bench_kmeans(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans");
    let cancel = AtomicBool::new(false);

    for num_points in [1_000, 10_000, 50_000].iter() {
        let (points, weights) = random_points(*num_points);
        let config = KMeansConfig {
            seed: Some(0),
            ..Default::default()
        };

        group.bench_with_input(
            BenchmarkId::new("k10", num_points),
            &(&points, &weights),
            |b, (points, weights)| b.iter(|| kmeans(points, weights, 10, &config, &cancel).unwrap()),
        );
    }
    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_palette");

    for (width, height) in [(256, 224), (1920, 1080)].iter() {
        let mut rng = StdRng::from_seed([1; 32]);
        let data: Vec<u8> = (0..width * height * 3).map(|_| rng.random()).collect();
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: *width,
                height: *height,
            },
            data,
        )
        .unwrap();

        let mut config = PaletteConfig::default();
        config.kmeans.seed = Some(0);

        let id = format!("{width}x{height}");
        group.bench_with_input(BenchmarkId::new("k10", &id), &image, |b, image| {
            b.iter(|| extract_palette(image, &config).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_kmeans, bench_extract);
criterion_main!(benches);
