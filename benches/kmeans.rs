use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dominant_palette_wasm::{ExtractionConfig, Pixel, SampleSet, cluster_with_rng, extract_palette};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Roughly the sample count of a 200x200 canvas read with stride 3
fn gradient_samples(count: u32) -> SampleSet {
    SampleSet::from_pixels(
        (0..count)
            .map(|i| Pixel::new((i % 256) as u8, (i / 256 % 256) as u8, (i * 7 % 256) as u8))
            .collect(),
    )
}

fn benchmark_kmeans(c: &mut Criterion) {
    let samples = gradient_samples(13_334);

    for k in [3usize, 8, 20] {
        c.bench_function(&format!("cluster_k{k}"), |b| {
            b.iter(|| {
                let mut rng = ChaCha8Rng::seed_from_u64(0);
                black_box(cluster_with_rng(black_box(&samples), k, 10, &mut rng).unwrap())
            })
        });
    }

    let config = ExtractionConfig {
        seed: Some(0),
        ..ExtractionConfig::default()
    };
    c.bench_function("extract_palette_default", |b| {
        b.iter(|| black_box(extract_palette(black_box(&samples), &config).unwrap()))
    });
}

criterion_group!(benches, benchmark_kmeans);
criterion_main!(benches);
