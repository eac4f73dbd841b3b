//! Benchmarks for angle and distance calculations

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use exercise_form_coach::geometry::{calculate_angle, distance, Point2D};

fn random_point() -> Point2D {
    Point2D::new(640.0 * rand::random::<f64>(), 480.0 * rand::random::<f64>())
}

fn benchmark_angle(c: &mut Criterion) {
    let mut group = c.benchmark_group("angle");

    let triples: Vec<(Point2D, Point2D, Point2D)> =
        (0..1000).map(|_| (random_point(), random_point(), random_point())).collect();

    group.bench_function("calculate_angle", |b| {
        let (p, q, r) = triples[0];
        b.iter(|| black_box(calculate_angle(black_box(p), black_box(q), black_box(r))));
    });

    group.bench_function("calculate_angle_1000", |b| {
        b.iter(|| {
            for &(p, q, r) in &triples {
                black_box(calculate_angle(p, q, r));
            }
        });
    });

    group.bench_function("degenerate", |b| {
        let p = Point2D::new(100.0, 100.0);
        b.iter(|| black_box(calculate_angle(black_box(p), black_box(p), black_box(p))));
    });

    group.finish();
}

fn benchmark_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("distance");
    let pairs: Vec<(Point2D, Point2D)> = (0..1000).map(|_| (random_point(), random_point())).collect();

    group.bench_function("distance_1000", |b| {
        b.iter(|| {
            for &(p, q) in &pairs {
                black_box(distance(p, q));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_angle, benchmark_distance);
criterion_main!(benches);
