//! Helper functions and utilities for tests
#![allow(dead_code)]

use exercise_form_coach::{
    clock::FrameTick,
    geometry::Point2D,
    landmarks::{BodyPart, FrameSize, Landmark, PoseLandmarks},
    pose_stream::PoseFrame,
};
use std::time::Duration;

/// Frame size used by most scenarios
pub const FRAME: FrameSize = FrameSize {
    width: 640,
    height: 480,
};

/// Build a pose from pixel coordinates in `frame`
pub fn pose_from_pixels(frame: FrameSize, points: &[(BodyPart, f64, f64)]) -> PoseLandmarks {
    points
        .iter()
        .map(|&(part, x, y)| {
            let (nx, ny) = frame.normalize(Point2D::new(x, y));
            Landmark::new(part, nx, ny).with_depth(0.0, 0.99)
        })
        .collect()
}

/// Left ear, shoulder and hip at the given pixel positions in [`FRAME`]
pub fn plank_pose(ear: (f64, f64), shoulder: (f64, f64), hip: (f64, f64)) -> PoseLandmarks {
    pose_from_pixels(
        FRAME,
        &[
            (BodyPart::LeftEar, ear.0, ear.1),
            (BodyPart::LeftShoulder, shoulder.0, shoulder.1),
            (BodyPart::LeftHip, hip.0, hip.1),
        ],
    )
}

/// Collinear ear, shoulder and hip (180 degrees)
pub fn straight_plank() -> PoseLandmarks {
    plank_pose((100.0, 50.0), (100.0, 150.0), (100.0, 250.0))
}

/// Hips folded to a right angle (90 degrees)
pub fn bent_plank() -> PoseLandmarks {
    plank_pose((200.0, 50.0), (100.0, 150.0), (200.0, 250.0))
}

/// Criss-cross pose with hands joined overhead and legs spread
pub fn star_pose() -> PoseLandmarks {
    pose_from_pixels(
        FRAME,
        &[
            (BodyPart::LeftWrist, 300.0, 40.0),
            (BodyPart::RightWrist, 310.0, 42.0),
            (BodyPart::LeftShoulder, 280.0, 150.0),
            (BodyPart::RightShoulder, 320.0, 150.0),
            (BodyPart::LeftAnkle, 250.0, 400.0),
            (BodyPart::RightAnkle, 450.0, 400.0),
        ],
    )
}

/// Criss-cross pose with arms down and feet together
pub fn standing_pose() -> PoseLandmarks {
    pose_from_pixels(
        FRAME,
        &[
            (BodyPart::LeftWrist, 250.0, 300.0),
            (BodyPart::RightWrist, 390.0, 300.0),
            (BodyPart::LeftShoulder, 280.0, 150.0),
            (BodyPart::RightShoulder, 360.0, 150.0),
            (BodyPart::LeftAnkle, 300.0, 450.0),
            (BodyPart::RightAnkle, 340.0, 450.0),
        ],
    )
}

/// Tick with explicit elapsed and delta, in seconds
pub fn tick(elapsed: f64, delta: f64) -> FrameTick {
    FrameTick::new(Duration::from_secs_f64(elapsed), Duration::from_secs_f64(delta))
}

/// `count` frames of the same pose, `interval_ms` apart, starting at zero
pub fn frames_every(interval_ms: u64, count: u64, pose: Option<&PoseLandmarks>) -> Vec<PoseFrame> {
    (0..count)
        .map(|i| PoseFrame {
            timestamp: Duration::from_millis(i * interval_ms),
            size: FRAME,
            landmarks: pose.cloned(),
        })
        .collect()
}
