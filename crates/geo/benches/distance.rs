//! Benchmarks for distance and radius queries.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tac_geo::{
    find_within_radius, haversine_distance_meters, Coordinate, ParkingSpot, ProximityFilter,
};

fn create_test_spots(count: usize) -> Vec<ParkingSpot> {
    (0..count)
        .map(|i| {
            // Grid of spots around central Rome
            let lat = 41.85 + (i as f64 * 0.0007) % 0.1;
            let lng = 12.45 + (i as f64 * 0.0011) % 0.1;
            ParkingSpot::new(i as i64, lat, lng)
        })
        .collect()
}

fn bench_single_distance(c: &mut Criterion) {
    let center = Coordinate::new(41.8992, 12.5450);
    let termini = Coordinate::new(41.9028, 12.4964);

    c.bench_function("haversine_single", |b| {
        b.iter(|| haversine_distance_meters(black_box(&center), black_box(&termini)))
    });
}

fn bench_radius_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("radius_query");
    let center = Coordinate::new(41.9000, 12.5000);

    for size in [10, 100, 1000, 10000].iter() {
        let spots = create_test_spots(*size);

        group.bench_with_input(BenchmarkId::new("within_200m", size), size, |b, _| {
            b.iter(|| find_within_radius(black_box(&center), black_box(200.0), black_box(&spots)))
        });
    }

    group.finish();
}

fn bench_nearest(c: &mut Criterion) {
    let spots = create_test_spots(10000);
    let center = Coordinate::new(41.9000, 12.5000);
    let filter = ProximityFilter::default();

    c.bench_function("nearest_10_of_10000", |b| {
        b.iter(|| filter.nearest(black_box(&center), black_box(&spots), 10))
    });
}

criterion_group!(benches, bench_single_distance, bench_radius_query, bench_nearest);
criterion_main!(benches);
