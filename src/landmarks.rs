//! Body landmark model shared by pose sources and evaluators.
//!
//! Landmarks arrive from the pose estimator in normalized image coordinates
//! (x and y in `[0, 1]` relative to frame width and height). Evaluators work
//! in pixel space, so every lookup goes through [`PoseLandmarks::pixel`] with
//! the size of the frame the landmarks were estimated on.

use crate::{constants::NUM_BODY_LANDMARKS, geometry::Point2D, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Body landmark identities, numbered in pose estimator output order (33 total)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum BodyPart {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl BodyPart {
    /// All body parts in index order
    pub const ALL: [BodyPart; NUM_BODY_LANDMARKS] = [
        Self::Nose,
        Self::LeftEyeInner,
        Self::LeftEye,
        Self::LeftEyeOuter,
        Self::RightEyeInner,
        Self::RightEye,
        Self::RightEyeOuter,
        Self::LeftEar,
        Self::RightEar,
        Self::MouthLeft,
        Self::MouthRight,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftPinky,
        Self::RightPinky,
        Self::LeftIndex,
        Self::RightIndex,
        Self::LeftThumb,
        Self::RightThumb,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
        Self::LeftHeel,
        Self::RightHeel,
        Self::LeftFootIndex,
        Self::RightFootIndex,
    ];

    /// Position in the estimator output
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a body part by estimator index
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// snake_case name used in recorded streams and relay responses
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEyeInner => "left_eye_inner",
            Self::LeftEye => "left_eye",
            Self::LeftEyeOuter => "left_eye_outer",
            Self::RightEyeInner => "right_eye_inner",
            Self::RightEye => "right_eye",
            Self::RightEyeOuter => "right_eye_outer",
            Self::LeftEar => "left_ear",
            Self::RightEar => "right_ear",
            Self::MouthLeft => "mouth_left",
            Self::MouthRight => "mouth_right",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftPinky => "left_pinky",
            Self::RightPinky => "right_pinky",
            Self::LeftIndex => "left_index",
            Self::RightIndex => "right_index",
            Self::LeftThumb => "left_thumb",
            Self::RightThumb => "right_thumb",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
            Self::LeftHeel => "left_heel",
            Self::RightHeel => "right_heel",
            Self::LeftFootIndex => "left_foot_index",
            Self::RightFootIndex => "right_foot_index",
        }
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BodyPart {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|part| part.name() == wanted)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown body part: {s}")))
    }
}

/// A single estimated landmark
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Which body part this is
    #[serde(rename = "name")]
    pub part: BodyPart,
    /// Normalized horizontal position (0 = left edge, 1 = right edge)
    pub x: f64,
    /// Normalized vertical position (0 = top edge, 1 = bottom edge)
    pub y: f64,
    /// Relative depth, when the estimator provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    /// Visibility / confidence score in `[0, 1]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
}

impl Landmark {
    /// Create a landmark without depth or visibility
    #[must_use]
    pub fn new(part: BodyPart, x: f64, y: f64) -> Self {
        Self {
            part,
            x,
            y,
            z: None,
            visibility: None,
        }
    }

    /// Attach depth and visibility
    #[must_use]
    pub fn with_depth(mut self, z: f64, visibility: f64) -> Self {
        self.z = Some(z);
        self.visibility = Some(visibility);
        self
    }

    /// Scale to pixel coordinates for a frame
    #[must_use]
    pub fn to_pixel(&self, frame: FrameSize) -> Point2D {
        Point2D::new(self.x * f64::from(frame.width), self.y * f64::from(frame.height))
    }
}

/// Frame dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl FrameSize {
    /// Create a frame size
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Normalize a pixel coordinate against this frame
    #[must_use]
    pub fn normalize(&self, point: Point2D) -> (f64, f64) {
        (point.x / f64::from(self.width), point.y / f64::from(self.height))
    }
}

/// All landmarks detected in one frame, keyed by body part
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Landmark>", into = "Vec<Landmark>")]
pub struct PoseLandmarks {
    by_part: BTreeMap<BodyPart, Landmark>,
}

impl PoseLandmarks {
    /// Create an empty landmark set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from estimator output ordered by [`BodyPart::index`].
    ///
    /// Each entry is `(x, y, z, visibility)` in normalized coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if more entries are given than there are body parts.
    pub fn from_ordered(points: &[(f64, f64, f64, f64)]) -> Result<Self> {
        if points.len() > NUM_BODY_LANDMARKS {
            return Err(Error::InvalidInput(format!(
                "Expected at most {NUM_BODY_LANDMARKS} landmarks, got {}",
                points.len()
            )));
        }

        let mut landmarks = Self::new();
        for (part, &(x, y, z, visibility)) in BodyPart::ALL.iter().zip(points) {
            landmarks.insert(Landmark::new(*part, x, y).with_depth(z, visibility));
        }
        Ok(landmarks)
    }

    /// Insert or replace a landmark
    pub fn insert(&mut self, landmark: Landmark) {
        self.by_part.insert(landmark.part, landmark);
    }

    /// Get the landmark for a body part
    #[must_use]
    pub fn get(&self, part: BodyPart) -> Option<&Landmark> {
        self.by_part.get(&part)
    }

    /// Pixel position of a body part, if it was detected
    #[must_use]
    pub fn pixel(&self, part: BodyPart, frame: FrameSize) -> Option<Point2D> {
        self.get(part).map(|landmark| landmark.to_pixel(frame))
    }

    /// Number of detected landmarks
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_part.len()
    }

    /// True when nothing was detected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_part.is_empty()
    }

    /// Iterate landmarks in body part order
    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.by_part.values()
    }
}

impl From<Vec<Landmark>> for PoseLandmarks {
    fn from(landmarks: Vec<Landmark>) -> Self {
        landmarks.into_iter().collect()
    }
}

impl From<PoseLandmarks> for Vec<Landmark> {
    fn from(landmarks: PoseLandmarks) -> Self {
        landmarks.by_part.into_values().collect()
    }
}

impl FromIterator<Landmark> for PoseLandmarks {
    fn from_iter<I: IntoIterator<Item = Landmark>>(iter: I) -> Self {
        let mut landmarks = Self::new();
        for landmark in iter {
            landmarks.insert(landmark);
        }
        landmarks
    }
}
