//! Hold-posture evaluation.
//!
//! The user holds a plank while the ear, shoulder and hip on one side stay
//! close to a straight line. Good frames accumulate hold time; bad frames
//! either pause the clock or reset it, depending on [`HoldMode`]. Frames
//! without the required landmarks count as bad frames.

use super::{BodySide, Condition, Evaluation, ExerciseEvaluator, FormThresholds, HoldMode};
use crate::{
    clock::FrameTick,
    constants::{MSG_ADJUST_POSITION, MSG_GOOD_POSTURE, MSG_HOLD_COMPLETE, MSG_NO_LANDMARKS},
    geometry::calculate_angle,
    landmarks::{FrameSize, PoseLandmarks},
};
use log::{debug, info};
use std::time::Duration;

/// Plank-style evaluator that accumulates time in good form
#[derive(Debug, Clone)]
pub struct HoldEvaluator {
    target: Duration,
    mode: HoldMode,
    side: BodySide,
    thresholds: FormThresholds,
    elapsed: Duration,
    complete: bool,
}

impl HoldEvaluator {
    /// Create a new hold evaluator
    #[must_use]
    pub fn new(target: Duration, mode: HoldMode) -> Self {
        Self {
            target,
            mode,
            side: BodySide::default(),
            thresholds: FormThresholds::default(),
            elapsed: Duration::ZERO,
            complete: false,
        }
    }

    /// Measure the back angle on the given side
    #[must_use]
    pub fn with_side(mut self, side: BodySide) -> Self {
        self.side = side;
        self
    }

    /// Use custom thresholds
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: FormThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Time accumulated in good form
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Time still to hold
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.target.saturating_sub(self.elapsed)
    }

    /// Target hold duration
    #[must_use]
    pub fn target(&self) -> Duration {
        self.target
    }

    /// Break policy
    #[must_use]
    pub fn mode(&self) -> HoldMode {
        self.mode
    }

    /// Ear-shoulder-hip angle, or `None` if any of the three is missing
    #[must_use]
    pub fn back_angle(&self, pose: &PoseLandmarks, frame: FrameSize) -> Option<f64> {
        let (ear, shoulder, hip) = self.side.back_triple();
        Some(calculate_angle(
            pose.pixel(ear, frame)?,
            pose.pixel(shoulder, frame)?,
            pose.pixel(hip, frame)?,
        ))
    }

    fn report(&self, angle: Option<f64>, good: bool) -> Evaluation {
        let (message, corrections) = if self.complete {
            (MSG_HOLD_COMPLETE, Vec::new())
        } else {
            match angle {
                None => (MSG_NO_LANDMARKS, Vec::new()),
                Some(_) if good => (MSG_GOOD_POSTURE, Vec::new()),
                Some(_) => (MSG_ADJUST_POSITION, vec![MSG_ADJUST_POSITION.to_string()]),
            }
        };

        Evaluation {
            posture_correct: good,
            angle,
            message: message.to_string(),
            corrections,
            conditions: vec![Condition {
                name: "straight_back",
                satisfied: good,
            }],
            pose_detected: angle.is_some(),
            remaining: Some(self.remaining()),
            complete: self.complete,
            cue: false,
        }
    }
}

impl ExerciseEvaluator for HoldEvaluator {
    fn evaluate(&mut self, pose: Option<&PoseLandmarks>, frame: FrameSize, tick: FrameTick) -> Evaluation {
        let angle = pose.and_then(|pose| self.back_angle(pose, frame));
        let good = angle.is_some_and(|angle| self.thresholds.is_straight(angle));

        if self.complete {
            return self.report(angle, good);
        }

        if good {
            self.elapsed = self.elapsed.saturating_add(tick.delta);
        } else if self.mode == HoldMode::ResetOnBreak {
            if self.elapsed > Duration::ZERO {
                debug!("Form broke after {:.1}s, resetting hold", self.elapsed.as_secs_f64());
            }
            self.elapsed = Duration::ZERO;
        }

        if self.elapsed >= self.target {
            self.complete = true;
            info!("Hold of {}s complete", self.target.as_secs());
        }

        self.report(angle, good)
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.complete = false;
    }

    fn is_complete(&self) -> bool {
        self.complete
    }

    fn name(&self) -> &str {
        "plank"
    }
}
