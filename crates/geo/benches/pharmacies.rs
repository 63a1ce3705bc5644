//! Benchmarks for pharmacy generation and distance calculations.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use medfinder_geo::{find_city, haversine_distance, within_range, Coordinate, PharmacyGenerator};

fn bench_single_distance(c: &mut Criterion) {
    let mumbai = Coordinate::new(19.0760, 72.8777);
    let delhi = Coordinate::new(28.7041, 77.1025);

    c.bench_function("haversine_single", |b| {
        b.iter(|| haversine_distance(black_box(&mumbai), black_box(&delhi)))
    });
}

fn bench_generate(c: &mut Criterion) {
    let generator = PharmacyGenerator::seeded(1);
    let city = find_city("mumbai").expect("mumbai is supported");

    c.bench_function("generate_city", |b| b.iter(|| generator.generate(black_box(city))));

    let set = generator.generate(city);
    c.bench_function("within_range_5km", |b| {
        b.iter(|| within_range(black_box(&set), black_box(5.0)))
    });
}

criterion_group!(benches, bench_single_distance, bench_generate);
criterion_main!(benches);
