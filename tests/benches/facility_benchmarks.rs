//! # Care-Beacon Facility Benchmarks
//!
//! | Path | Target |
//! |------|--------|
//! | Parse a 10k-row directory | well under the 10 s fetch deadline |
//! | Nearest facility over 10k rows | well under the 2 s resolve deadline |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::Write;

use cb_01_facility_registry::parse_facility_table;
use cb_02_nearest_facility::{rank_by_distance, resolve_with_distance};
use shared_types::{Coordinate, FacilityRecord};

fn random_coordinate(rng: &mut StdRng) -> Coordinate {
    Coordinate::new(rng.gen_range(-90.0..=90.0), rng.gen_range(-180.0..=180.0))
        .expect("generated in range")
}

fn directory_csv(rows: usize) -> String {
    let mut rng = StdRng::seed_from_u64(7);
    let mut csv = String::from("name,address,phone,latitude,longitude\n");
    for i in 0..rows {
        let at = random_coordinate(&mut rng);
        let _ = writeln!(
            csv,
            "Hospital {i},{i} Main St,+9100000{i:05},{},{}",
            at.latitude(),
            at.longitude()
        );
    }
    csv
}

fn facilities(count: usize) -> Vec<FacilityRecord> {
    let mut rng = StdRng::seed_from_u64(11);
    (0..count)
        .map(|i| FacilityRecord::new(format!("F{i}"), random_coordinate(&mut rng)))
        .collect()
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("cb-01-facility-registry");

    for rows in [100, 1_000, 10_000] {
        let payload = directory_csv(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::new("parse_table", rows), &payload, |b, p| {
            b.iter(|| black_box(parse_facility_table(p.as_bytes()).is_ok()))
        });
    }

    group.finish();
}

fn bench_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("cb-02-nearest-facility");
    let origin = Coordinate::new(12.97, 77.59).expect("valid origin");

    for count in [100, 1_000, 10_000] {
        let records = facilities(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("resolve", count), &records, |b, r| {
            b.iter(|| black_box(resolve_with_distance(origin, r).map(|n| n.distance_m)))
        });
        group.bench_with_input(BenchmarkId::new("rank_top5", count), &records, |b, r| {
            b.iter(|| black_box(rank_by_distance(origin, r, 5).len()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_nearest);
criterion_main!(benches);
