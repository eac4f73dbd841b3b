//! Exercise evaluators.
//!
//! Every exercise is scored frame by frame through the [`ExerciseEvaluator`]
//! trait. An evaluator owns the session state of one exercise run (hold time,
//! metronome phase); hosts feed it landmarks and a [`FrameTick`] and display
//! or transmit the returned [`Evaluation`].

/// Hold-posture evaluator (plank)
pub mod hold;

/// Rhythmic-position evaluator (criss cross)
pub mod rhythmic;

use crate::{
    clock::FrameTick,
    constants::{
        DEFAULT_CUE_INTERVAL_SECONDS, DEFAULT_HOLD_SECONDS, HAND_PROXIMITY_PX, LEG_SPREAD_PX,
        MAX_CUE_INTERVAL_SECONDS, MAX_HOLD_SECONDS, MIN_CUE_INTERVAL_SECONDS, MIN_HOLD_SECONDS,
        STRAIGHT_BACK_MAX_DEGREES, STRAIGHT_BACK_MIN_DEGREES,
    },
    landmarks::{BodyPart, FrameSize, PoseLandmarks},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::time::Duration;

pub use hold::HoldEvaluator;
pub use rhythmic::RhythmicEvaluator;

/// Trait for all exercise evaluators
pub trait ExerciseEvaluator: Send {
    /// Score one frame. `pose` is `None` when the pose source found nobody.
    fn evaluate(&mut self, pose: Option<&PoseLandmarks>, frame: FrameSize, tick: FrameTick) -> Evaluation;

    /// Reset session state
    fn reset(&mut self);

    /// True once the session reached its terminal state
    fn is_complete(&self) -> bool;

    /// Get evaluator name
    fn name(&self) -> &str;
}

/// One named geometric check and whether it passed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    /// Check identifier, e.g. `legs_spread`
    pub name: &'static str,
    /// Whether the check passed on this frame
    pub satisfied: bool,
}

/// Verdict for a single frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// Overall form verdict
    pub posture_correct: bool,
    /// Diagnostic angle in degrees, when the exercise measures one
    pub angle: Option<f64>,
    /// Status line for the user
    pub message: String,
    /// One hint per failed check
    pub corrections: Vec<String>,
    /// Individual checks behind the verdict
    pub conditions: Vec<Condition>,
    /// Whether the required landmarks were present
    pub pose_detected: bool,
    /// Time left on a hold exercise
    pub remaining: Option<Duration>,
    /// Session reached its terminal state on or before this frame
    pub complete: bool,
    /// Metronome fired on this frame
    pub cue: bool,
}

impl Evaluation {
    /// Look up a named check
    #[must_use]
    pub fn condition(&self, name: &str) -> Option<bool> {
        self.conditions
            .iter()
            .find(|condition| condition.name == name)
            .map(|condition| condition.satisfied)
    }
}

/// Geometric thresholds shared by the evaluators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormThresholds {
    /// Lowest acceptable back angle in degrees
    pub straight_back_min_degrees: f64,
    /// Highest acceptable back angle in degrees
    pub straight_back_max_degrees: f64,
    /// Wrists must be closer than this, in pixels
    pub hand_proximity_px: f64,
    /// Ankles must be at least this far apart, in pixels
    pub leg_spread_px: f64,
}

impl FormThresholds {
    /// Whether an angle lies in the straight-back band
    #[must_use]
    pub fn is_straight(&self, angle: f64) -> bool {
        (self.straight_back_min_degrees..=self.straight_back_max_degrees).contains(&angle)
    }
}

impl Default for FormThresholds {
    fn default() -> Self {
        Self {
            straight_back_min_degrees: STRAIGHT_BACK_MIN_DEGREES,
            straight_back_max_degrees: STRAIGHT_BACK_MAX_DEGREES,
            hand_proximity_px: HAND_PROXIMITY_PX,
            leg_spread_px: LEG_SPREAD_PX,
        }
    }
}

/// What happens to accumulated hold time when form breaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldMode {
    /// Time stops but keeps its progress ("normal")
    #[default]
    #[serde(rename = "normal", alias = "pause")]
    PauseOnBreak,
    /// Time drops back to zero ("hardcore")
    #[serde(rename = "hardcore", alias = "reset")]
    ResetOnBreak,
}

impl HoldMode {
    /// Name used on the command line and in config files
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::PauseOnBreak => "normal",
            Self::ResetOnBreak => "hardcore",
        }
    }
}

impl fmt::Display for HoldMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HoldMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "normal" | "pause" => Ok(Self::PauseOnBreak),
            "hardcore" | "reset" => Ok(Self::ResetOnBreak),
            _ => Err(Error::EvaluatorError(format!("Unknown hold mode: {s}"))),
        }
    }
}

/// Which side of the body the hold angle is measured on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodySide {
    /// Left ear, shoulder and hip
    #[default]
    Left,
    /// Right ear, shoulder and hip
    Right,
}

impl BodySide {
    /// Ear, shoulder and hip on this side; the shoulder is the vertex
    #[must_use]
    pub fn back_triple(self) -> (BodyPart, BodyPart, BodyPart) {
        match self {
            Self::Left => (BodyPart::LeftEar, BodyPart::LeftShoulder, BodyPart::LeftHip),
            Self::Right => (BodyPart::RightEar, BodyPart::RightShoulder, BodyPart::RightHip),
        }
    }
}

impl FromStr for BodySide {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(Error::EvaluatorError(format!("Unknown body side: {s}"))),
        }
    }
}

/// Exercise families known to the factory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseKind {
    /// Time accumulates while a posture holds
    Hold,
    /// Per-frame position checks plus a metronome
    Rhythmic,
}

impl FromStr for ExerciseKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "plank" | "hold" => Ok(Self::Hold),
            "crisscross" | "criss_cross" | "criss-cross" | "rhythmic" => Ok(Self::Rhythmic),
            _ => Err(Error::EvaluatorError(format!("Unknown exercise: {s}"))),
        }
    }
}

/// Create an evaluator from a `name[:param[:param]]` descriptor.
///
/// Accepted forms: `plank`, `plank:<seconds>`, `plank:<seconds>:<normal|hardcore>`,
/// `crisscross`, `crisscross:<seconds>`.
///
/// # Errors
///
/// Returns [`Error::EvaluatorError`] for unknown exercises, extra parameters
/// or out-of-range values.
pub fn create_evaluator(descriptor: &str) -> Result<Box<dyn ExerciseEvaluator>> {
    let mut parts = descriptor.trim().split(':');
    let kind: ExerciseKind = parts.next().unwrap_or_default().parse()?;
    let params: Vec<&str> = parts.collect();

    match kind {
        ExerciseKind::Hold => {
            if params.len() > 2 {
                return Err(Error::EvaluatorError(format!("Too many parameters for plank: {descriptor}")));
            }
            let seconds = match params.first() {
                Some(value) => parse_seconds(value, MIN_HOLD_SECONDS..=MAX_HOLD_SECONDS)?,
                None => DEFAULT_HOLD_SECONDS,
            };
            let mode = match params.get(1) {
                Some(value) => value.parse()?,
                None => HoldMode::default(),
            };
            Ok(Box::new(HoldEvaluator::new(Duration::from_secs(seconds), mode)))
        }
        ExerciseKind::Rhythmic => {
            if params.len() > 1 {
                return Err(Error::EvaluatorError(format!(
                    "Too many parameters for criss cross: {descriptor}"
                )));
            }
            let seconds = match params.first() {
                Some(value) => parse_seconds(value, MIN_CUE_INTERVAL_SECONDS..=MAX_CUE_INTERVAL_SECONDS)?,
                None => DEFAULT_CUE_INTERVAL_SECONDS,
            };
            Ok(Box::new(RhythmicEvaluator::new(Duration::from_secs(seconds))))
        }
    }
}

fn parse_seconds(value: &str, range: RangeInclusive<u64>) -> Result<u64> {
    let seconds: u64 = value
        .trim()
        .parse()
        .map_err(|_| Error::EvaluatorError(format!("Invalid seconds value: {value}")))?;
    if !range.contains(&seconds) {
        return Err(Error::EvaluatorError(format!(
            "Seconds must be between {} and {}, got {seconds}",
            range.start(),
            range.end()
        )));
    }
    Ok(seconds)
}
