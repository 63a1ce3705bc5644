//! Benchmarks for suggestion ranking.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use medfinder_search::{filter_loose, match_medicine, suggest, Catalog, MedicineRecord};

const STEMS: [&str; 8] = [
    "Paracetamol",
    "Metformin",
    "Amlodipine",
    "Azithromycin",
    "Cetirizine",
    "Atorvastatin",
    "Ibuprofen",
    "Omeprazole",
];

fn create_catalog(count: usize) -> Catalog {
    Catalog::new((0..count).map(|i| {
        let stem = STEMS[i % STEMS.len()];
        MedicineRecord::new(
            format!("m{i}"),
            format!("{stem} {i}"),
            "fever",
            [format!("{} brand {i}", &stem[..4])],
        )
    }))
}

fn bench_single_match(c: &mut Criterion) {
    let record = MedicineRecord::new("m1", "Paracetamol", "fever", ["Crocin", "Dolo 650"]);

    c.bench_function("match_single", |b| {
        b.iter(|| match_medicine(black_box("pctml"), black_box(&record)))
    });
}

fn bench_suggest(c: &mut Criterion) {
    let mut group = c.benchmark_group("suggest");

    for size in [50, 500, 5000].iter() {
        let catalog = create_catalog(*size);

        group.bench_with_input(BenchmarkId::new("prefix", size), size, |b, _| {
            b.iter(|| suggest(black_box("para"), black_box(&catalog), 8))
        });
        group.bench_with_input(BenchmarkId::new("fuzzy", size), size, |b, _| {
            b.iter(|| suggest(black_box("amdp"), black_box(&catalog), 8))
        });
        group.bench_with_input(BenchmarkId::new("loose_filter", size), size, |b, _| {
            b.iter(|| filter_loose(black_box("brand"), black_box(&catalog)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_match, bench_suggest);
criterion_main!(benches);
