//! Rhythmic-position evaluation (criss cross / jumping jacks).
//!
//! Two independent checks per frame: hands joined above the head and legs
//! spread. A metronome cue fires every `interval` regardless of form; it
//! paces the exercise and carries no feedback.

use super::{Condition, Evaluation, ExerciseEvaluator, FormThresholds};
use crate::{
    clock::FrameTick,
    constants::{MSG_ADJUST_FORM, MSG_GOOD_POSITION, MSG_JOIN_HANDS, MSG_NO_LANDMARKS, MSG_SPREAD_LEGS},
    geometry::distance,
    landmarks::{BodyPart, FrameSize, PoseLandmarks},
};
use log::debug;
use std::time::Duration;

/// Outcome of the two position checks for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionChecks {
    /// Both wrists above their shoulders and close together
    pub hands_together: bool,
    /// Ankles far enough apart
    pub legs_spread: bool,
    /// Wrist-to-wrist distance in pixels
    pub hand_distance: f64,
    /// Ankle-to-ankle distance in pixels
    pub leg_distance: f64,
}

impl PositionChecks {
    /// Both checks passed
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.hands_together && self.legs_spread
    }
}

/// Criss-cross evaluator with a fixed-interval metronome
#[derive(Debug, Clone)]
pub struct RhythmicEvaluator {
    interval: Duration,
    thresholds: FormThresholds,
    last_cue: Duration,
    cues: u64,
}

impl RhythmicEvaluator {
    /// Create a new rhythmic evaluator
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        assert!(!interval.is_zero(), "Cue interval must be greater than 0");
        Self {
            interval,
            thresholds: FormThresholds::default(),
            last_cue: Duration::ZERO,
            cues: 0,
        }
    }

    /// Use custom thresholds
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: FormThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Metronome interval
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of cues fired this session
    #[must_use]
    pub fn cues_fired(&self) -> u64 {
        self.cues
    }

    /// Run both position checks, or `None` if a required landmark is missing
    #[must_use]
    pub fn check_position(&self, pose: &PoseLandmarks, frame: FrameSize) -> Option<PositionChecks> {
        let left_wrist = pose.pixel(BodyPart::LeftWrist, frame)?;
        let right_wrist = pose.pixel(BodyPart::RightWrist, frame)?;
        let left_shoulder = pose.pixel(BodyPart::LeftShoulder, frame)?;
        let right_shoulder = pose.pixel(BodyPart::RightShoulder, frame)?;
        let left_ankle = pose.pixel(BodyPart::LeftAnkle, frame)?;
        let right_ankle = pose.pixel(BodyPart::RightAnkle, frame)?;

        let hand_distance = distance(left_wrist, right_wrist);
        let leg_distance = distance(left_ankle, right_ankle);

        let hands_together = left_wrist.is_above(left_shoulder)
            && right_wrist.is_above(right_shoulder)
            && hand_distance < self.thresholds.hand_proximity_px;
        let legs_spread = leg_distance >= self.thresholds.leg_spread_px;

        Some(PositionChecks {
            hands_together,
            legs_spread,
            hand_distance,
            leg_distance,
        })
    }

    /// Advance the metronome to `now`; true when a cue is due
    pub fn advance_cue(&mut self, now: Duration) -> bool {
        if now.saturating_sub(self.last_cue) >= self.interval {
            self.last_cue = now;
            self.cues += 1;
            debug!("Cue {} at {:.2}s", self.cues, now.as_secs_f64());
            true
        } else {
            false
        }
    }
}

impl ExerciseEvaluator for RhythmicEvaluator {
    fn evaluate(&mut self, pose: Option<&PoseLandmarks>, frame: FrameSize, tick: FrameTick) -> Evaluation {
        let checks = pose.and_then(|pose| self.check_position(pose, frame));
        let cue = self.advance_cue(tick.elapsed);

        let hands_together = checks.is_some_and(|c| c.hands_together);
        let legs_spread = checks.is_some_and(|c| c.legs_spread);
        let posture_correct = hands_together && legs_spread;

        let mut corrections = Vec::new();
        if checks.is_some() {
            if !hands_together {
                corrections.push(MSG_JOIN_HANDS.to_string());
            }
            if !legs_spread {
                corrections.push(MSG_SPREAD_LEGS.to_string());
            }
        }

        let message = match checks {
            None => MSG_NO_LANDMARKS,
            Some(_) if posture_correct => MSG_GOOD_POSITION,
            Some(_) => MSG_ADJUST_FORM,
        };

        Evaluation {
            posture_correct,
            angle: None,
            message: message.to_string(),
            corrections,
            conditions: vec![
                Condition {
                    name: "hands_together",
                    satisfied: hands_together,
                },
                Condition {
                    name: "legs_spread",
                    satisfied: legs_spread,
                },
            ],
            pose_detected: checks.is_some(),
            remaining: None,
            complete: false,
            cue,
        }
    }

    fn reset(&mut self) {
        self.last_cue = Duration::ZERO;
        self.cues = 0;
    }

    fn is_complete(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "criss_cross"
    }
}
