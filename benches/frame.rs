//! Benchmarks for the per-frame CPU work.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use starfield::links::find_links;
use starfield::spawn::spawn_particles;
use starfield::{FieldConfig, LinkStrategy, ParticleField, PixelCanvas, RecordingSurface, Theme};

use rand::rngs::SmallRng;
use rand::SeedableRng;

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");

    for (width, height) in [(800u32, 600u32), (1920, 1080)] {
        let label = format!("{}x{}", width, height);

        group.bench_with_input(BenchmarkId::new("recording", &label), &(width, height), |b, &(w, h)| {
            let mut field = ParticleField::with_seed(w, h, FieldConfig::default(), 1).unwrap();
            let mut surface = RecordingSurface::new(w, h);
            b.iter(|| {
                surface.reset();
                black_box(field.frame(&mut surface, Theme::Dark))
            })
        });

        group.bench_with_input(BenchmarkId::new("raster", &label), &(width, height), |b, &(w, h)| {
            let mut field = ParticleField::with_seed(w, h, FieldConfig::default(), 1).unwrap();
            let mut canvas = PixelCanvas::new(w, h);
            b.iter(|| black_box(field.frame(&mut canvas, Theme::Dark)))
        });
    }

    group.finish();
}

fn bench_links(c: &mut Criterion) {
    let mut group = c.benchmark_group("links");

    // Past the default cap, to see where the grid starts paying off.
    for count in [50u32, 200, 1000] {
        let base = FieldConfig::default()
            .with_max_particles(count)
            .with_area_per_particle(1.0);
        let mut rng = SmallRng::seed_from_u64(7);
        let particles = spawn_particles(&mut rng, 1920, 1080, &base);

        for strategy in [LinkStrategy::AllPairs, LinkStrategy::Grid] {
            let config = base.clone().with_link_strategy(strategy);
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", strategy), count),
                &particles,
                |b, particles| b.iter(|| black_box(find_links(particles, &config))),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_frame, bench_links);
criterion_main!(benches);
