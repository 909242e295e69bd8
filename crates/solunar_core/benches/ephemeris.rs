use std::hint::black_box;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use chrono::{Duration, TimeZone, Utc};
use solunar_core::{Ephemeris, GeoCoordinate};

fn bench_positions(c: &mut Criterion) {
    let mut group = c.benchmark_group("positions");
    let engine = Ephemeris::new();
    let coords = GeoCoordinate::new_unchecked(50.5, 30.5);
    let date = Utc.with_ymd_and_hms(2013, 3, 5, 0, 0, 0).unwrap();

    group.bench_function("sun_position", |b| {
        b.iter(|| engine.sun_position(black_box(date), black_box(coords)));
    });
    group.bench_function("moon_position", |b| {
        b.iter(|| engine.moon_position(black_box(date), black_box(coords)));
    });
    group.bench_function("moon_illumination", |b| {
        b.iter(|| engine.moon_illumination(black_box(date)));
    });

    group.finish();
}

fn bench_times(c: &mut Criterion) {
    let mut group = c.benchmark_group("times");
    let coords = GeoCoordinate::new_unchecked(50.5, 30.5);
    let date = Utc.with_ymd_and_hms(2013, 3, 5, 0, 0, 0).unwrap();

    for extra in [0usize, 6, 24] {
        let mut engine = Ephemeris::new();
        for i in 0..extra {
            engine.add_threshold(-(i as f64) / 2.0, format!("rise{}", i), format!("set{}", i));
        }
        group.bench_with_input(BenchmarkId::new("sun_times", 6 + extra), &engine, |b, engine| {
            b.iter(|| engine.sun_times(black_box(date), black_box(coords)));
        });
    }

    let engine = Ephemeris::new();
    group.bench_function("moon_times", |b| {
        b.iter(|| engine.moon_times(black_box(date), black_box(coords)));
    });

    group.bench_function("sun_times_year", |b| {
        b.iter(|| {
            for day in 0..365 {
                let _ = black_box(engine.sun_times(date + Duration::days(day), coords));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_positions, bench_times);
criterion_main!(benches);
