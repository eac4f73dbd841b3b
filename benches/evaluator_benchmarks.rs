//! Benchmarks for per-frame evaluation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use exercise_form_coach::{
    clock::FrameTick,
    exercise::{ExerciseEvaluator, HoldEvaluator, HoldMode, RhythmicEvaluator},
    landmarks::{FrameSize, PoseLandmarks},
};
use std::time::Duration;

const FRAME: FrameSize = FrameSize {
    width: 640,
    height: 480,
};

/// Full 33-landmark poses with some jitter, as a live estimator would produce
fn jittered_poses(count: usize) -> Vec<PoseLandmarks> {
    (0..count)
        .map(|_| {
            let points: Vec<(f64, f64, f64, f64)> = (0..33)
                .map(|i| {
                    let base = f64::from(i) / 33.0;
                    (
                        base + 0.01 * rand::random::<f64>(),
                        base + 0.01 * rand::random::<f64>(),
                        0.0,
                        0.9,
                    )
                })
                .collect();
            PoseLandmarks::from_ordered(&points).unwrap()
        })
        .collect()
}

fn benchmark_evaluators(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluators");
    let poses = jittered_poses(100);
    let tick = FrameTick::new(Duration::ZERO, Duration::from_millis(33));

    let evaluators = vec![
        (
            "plank_normal",
            Box::new(HoldEvaluator::new(Duration::from_secs(600), HoldMode::PauseOnBreak)) as Box<dyn ExerciseEvaluator>,
        ),
        (
            "plank_hardcore",
            Box::new(HoldEvaluator::new(Duration::from_secs(600), HoldMode::ResetOnBreak)),
        ),
        ("criss_cross", Box::new(RhythmicEvaluator::new(Duration::from_secs(5)))),
    ];

    for (name, mut evaluator) in evaluators {
        group.bench_with_input(BenchmarkId::new("single_frame", name), &poses[0], |b, pose| {
            b.iter(|| black_box(evaluator.evaluate(Some(black_box(pose)), FRAME, tick)));
        });

        group.bench_with_input(BenchmarkId::new("sequence_100", name), &poses, |b, poses| {
            b.iter(|| {
                evaluator.reset();
                for pose in poses {
                    black_box(evaluator.evaluate(Some(black_box(pose)), FRAME, tick));
                }
            });
        });

        group.bench_function(BenchmarkId::new("no_pose", name), |b| {
            b.iter(|| black_box(evaluator.evaluate(None, FRAME, tick)));
        });
    }

    group.finish();
}

fn benchmark_pose_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("pose_construction");
    let points: Vec<(f64, f64, f64, f64)> = (0..33).map(|i| (f64::from(i) / 33.0, 0.5, 0.0, 0.9)).collect();

    group.bench_function("from_ordered_33", |b| {
        b.iter(|| black_box(PoseLandmarks::from_ordered(black_box(&points))));
    });

    group.finish();
}

criterion_group!(benches, benchmark_evaluators, benchmark_pose_construction);
criterion_main!(benches);
