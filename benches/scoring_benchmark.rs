use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use proximity_labeler::models::{Coordinate, ReferencePoint, Station};
use proximity_labeler::processors::{closest_k_average, StationScorer};

// Deterministic grid of points over the southern Great Plains
fn create_reference_points(count: usize) -> Vec<ReferencePoint> {
    (0..count)
        .map(|i| {
            let row = (i / 100) as f64;
            let col = (i % 100) as f64;
            ReferencePoint::new(33.5 + row * 0.05, -103.0 + col * 0.09)
        })
        .collect()
}

fn create_stations(count: usize) -> Vec<Station> {
    (0..count)
        .map(|i| {
            Station::new(
                format!("ST{:04}", i),
                34.0 + (i as f64 * 0.37) % 3.0,
                -102.5 + (i as f64 * 0.61) % 8.0,
            )
        })
        .collect()
}

fn benchmark_closest_k(c: &mut Criterion) {
    let mut group = c.benchmark_group("closest_k_average");
    let station = Coordinate::new(35.5, -97.5);

    for reference_count in [100, 1_000, 10_000].iter() {
        let references = create_reference_points(*reference_count);
        group.bench_with_input(
            BenchmarkId::new("references", reference_count),
            &references,
            |b, references| {
                b.iter(|| closest_k_average(black_box(&station), black_box(references), 5))
            },
        );
    }

    group.finish();
}

fn benchmark_station_scorer(c: &mut Criterion) {
    let mut group = c.benchmark_group("station_scorer");
    let references = create_reference_points(5_000);
    let stations = create_stations(150);

    for workers in [1, 4].iter() {
        let scorer = StationScorer::new(5).with_max_workers(*workers);
        group.bench_with_input(BenchmarkId::new("workers", workers), &stations, |b, stations| {
            b.iter(|| scorer.score(black_box(stations), black_box(&references), None))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_closest_k, benchmark_station_scorer);
criterion_main!(benches);
