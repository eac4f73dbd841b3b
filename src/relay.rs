//! Frame relay contract.
//!
//! A relay receives camera frames from a remote client as base64 images
//! (usually `data:image/jpeg;base64,...` URLs), runs the external pose
//! estimator, scores the result and answers with a small JSON verdict:
//!
//! ```json
//! {"posture_correct": true, "angle": 178, "message": "Good posture!"}
//! ```
//!
//! Processing failures never escape [`Relay::handle_frame`]; they are logged
//! and answered with `{"error": "..."}`. The socket or HTTP layer that moves
//! these payloads is up to the host.

use crate::{
    clock::SessionClock,
    constants::MSG_NO_POSE,
    exercise::{Evaluation, ExerciseEvaluator},
    landmarks::{FrameSize, PoseLandmarks},
    Error, Result,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::DynamicImage;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// External body-pose estimator
pub trait PoseEstimator {
    /// Estimate landmarks for one image; `Ok(None)` when nobody is visible
    ///
    /// # Errors
    ///
    /// Returns an error if inference fails
    fn estimate(&mut self, image: &DynamicImage) -> Result<Option<PoseLandmarks>>;
}

impl<F> PoseEstimator for F
where
    F: FnMut(&DynamicImage) -> Result<Option<PoseLandmarks>>,
{
    fn estimate(&mut self, image: &DynamicImage) -> Result<Option<PoseLandmarks>> {
        self(image)
    }
}

/// Verdict sent back to the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// Overall form verdict
    pub posture_correct: bool,
    /// Diagnostic angle truncated to whole degrees
    pub angle: Option<i64>,
    /// Status line for the user
    pub message: String,
    /// Hints for each failed check
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub corrections: Vec<String>,
    /// Seconds left on a hold exercise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_seconds: Option<f64>,
    /// Metronome fired on this frame
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cue: bool,
    /// Estimated landmarks, when the relay echoes them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmarks: Option<PoseLandmarks>,
}

impl AnalysisResponse {
    /// Answer for a frame in which no pose was found
    #[must_use]
    pub fn no_pose() -> Self {
        Self {
            posture_correct: false,
            angle: None,
            message: MSG_NO_POSE.to_string(),
            corrections: Vec::new(),
            remaining_seconds: None,
            cue: false,
            landmarks: None,
        }
    }

    /// No-pose answer that still carries the cue and hold time of `evaluation`
    #[must_use]
    pub fn no_pose_after(evaluation: &Evaluation) -> Self {
        Self {
            remaining_seconds: evaluation.remaining.map(|remaining| remaining.as_secs_f64()),
            cue: evaluation.cue,
            ..Self::no_pose()
        }
    }

    fn from_evaluation(evaluation: &Evaluation) -> Self {
        Self {
            posture_correct: evaluation.posture_correct,
            angle: evaluation.angle.map(truncate_degrees),
            message: evaluation.message.clone(),
            corrections: evaluation.corrections.clone(),
            remaining_seconds: evaluation.remaining.map(|remaining| remaining.as_secs_f64()),
            cue: evaluation.cue,
            landmarks: None,
        }
    }
}

/// Reply to one relayed frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelayReply {
    /// Frame was processed
    Analysis(AnalysisResponse),
    /// Frame could not be processed
    Failure {
        /// Error description
        error: String,
    },
}

impl RelayReply {
    /// Serialize for the wire
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Whether this reply carries an error
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }
}

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    image: Option<String>,
}

/// Relay host: image payloads in, verdicts out
pub struct Relay<E: PoseEstimator> {
    estimator: E,
    evaluator: Box<dyn ExerciseEvaluator>,
    clock: SessionClock,
    echo_landmarks: bool,
}

impl<E: PoseEstimator> Relay<E> {
    /// Create a relay around an estimator and an evaluator
    pub fn new(estimator: E, evaluator: Box<dyn ExerciseEvaluator>) -> Self {
        info!("Relay ready for {} frames", evaluator.name());
        Self {
            estimator,
            evaluator,
            clock: SessionClock::new(),
            echo_landmarks: false,
        }
    }

    /// Include the estimated landmarks in each response
    #[must_use]
    pub fn with_landmarks(mut self, echo: bool) -> Self {
        self.echo_landmarks = echo;
        self
    }

    /// The wrapped estimator
    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    /// Restart the session, e.g. when a new client connects
    pub fn reset(&mut self) {
        info!("Relay session reset");
        self.evaluator.reset();
        self.clock.reset();
    }

    /// Process one frame payload
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be decoded or the estimator fails
    pub fn analyze(&mut self, payload: &str) -> Result<AnalysisResponse> {
        let image = decode_image(payload)?;
        let size = FrameSize::new(image.width(), image.height());
        let landmarks = self.estimator.estimate(&image)?;

        let tick = self.clock.tick_now();
        let evaluation = self.evaluator.evaluate(landmarks.as_ref(), size, tick);
        debug!("Relayed {}x{} frame: {}", size.width, size.height, evaluation.message);

        let mut response = match landmarks {
            None => AnalysisResponse::no_pose_after(&evaluation),
            Some(_) => AnalysisResponse::from_evaluation(&evaluation),
        };
        if self.echo_landmarks {
            response.landmarks = landmarks;
        }
        Ok(response)
    }

    /// Process one frame payload, folding failures into the reply
    pub fn handle_frame(&mut self, payload: &str) -> RelayReply {
        match self.analyze(payload) {
            Ok(response) => RelayReply::Analysis(response),
            Err(e) => {
                warn!("Error processing frame: {}", e);
                RelayReply::Failure { error: e.to_string() }
            }
        }
    }

    /// Process a JSON request body of the form `{"image": "<payload>"}`
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRequest`] if the body is not JSON or has no
    /// image, and any error from [`Relay::analyze`]
    pub fn analyze_request(&mut self, body: &str) -> Result<AnalysisResponse> {
        let request: AnalyzeRequest = serde_json::from_str(body)
            .map_err(|e| Error::MalformedRequest(format!("Invalid request body: {e}")))?;
        let image = request
            .image
            .ok_or_else(|| Error::MalformedRequest("No image data provided".to_string()))?;
        self.analyze(&image)
    }
}

/// Decode a data URL or bare base64 string into raw bytes
///
/// # Errors
///
/// Returns [`Error::MalformedRequest`] for non-base64 data URLs or invalid
/// base64
pub fn decode_data_url(payload: &str) -> Result<Vec<u8>> {
    let payload = payload.trim();
    let encoded = match payload.strip_prefix("data:") {
        Some(rest) => {
            let (header, data) = rest
                .split_once(',')
                .ok_or_else(|| Error::MalformedRequest("Data URL has no payload".to_string()))?;
            if !header.ends_with(";base64") {
                return Err(Error::MalformedRequest(format!(
                    "Data URL is not base64 encoded: data:{header}"
                )));
            }
            data
        }
        None => payload,
    };

    if encoded.is_empty() {
        return Err(Error::MalformedRequest("Empty image payload".to_string()));
    }

    STANDARD
        .decode(encoded)
        .map_err(|e| Error::MalformedRequest(format!("Invalid base64 payload: {e}")))
}

/// Decode an image payload (data URL or bare base64)
///
/// # Errors
///
/// Returns an error if the payload is not base64 or not a supported image
pub fn decode_image(payload: &str) -> Result<DynamicImage> {
    let bytes = decode_data_url(payload)?;
    Ok(image::load_from_memory(&bytes)?)
}

#[allow(clippy::cast_possible_truncation)] // Angles lie in [0, 180]
fn truncate_degrees(angle: f64) -> i64 {
    angle.trunc() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_decode_data_url() {
        assert_eq!(decode_data_url("data:image/jpeg;base64,aGVsbG8=").unwrap(), b"hello");
        assert_eq!(decode_data_url("aGVsbG8=").unwrap(), b"hello");
    }

    #[test]
    fn test_decode_data_url_rejects() {
        assert!(matches!(
            decode_data_url("data:text/plain,hello"),
            Err(Error::MalformedRequest(_))
        ));
        assert!(matches!(decode_data_url("data:image/png;base64"), Err(Error::MalformedRequest(_))));
        assert!(matches!(decode_data_url("!!not base64!!"), Err(Error::MalformedRequest(_))));
        assert!(matches!(decode_data_url(""), Err(Error::MalformedRequest(_))));
    }

    #[test]
    fn test_undecodable_image() {
        assert!(matches!(decode_image("aGVsbG8="), Err(Error::Image(_))));
    }

    #[test]
    fn test_truncate_degrees() {
        assert_eq!(truncate_degrees(179.9), 179);
        assert_eq!(truncate_degrees(0.0), 0);
    }

    #[test]
    fn test_no_pose_after_keeps_cue_and_time() {
        let evaluation = Evaluation {
            posture_correct: false,
            angle: None,
            message: "No landmarks detected".to_string(),
            corrections: Vec::new(),
            conditions: Vec::new(),
            pose_detected: false,
            remaining: Some(Duration::from_secs(12)),
            complete: false,
            cue: true,
        };

        let response = AnalysisResponse::no_pose_after(&evaluation);
        assert!(!response.posture_correct);
        assert_eq!(response.angle, None);
        assert_eq!(response.message, "No pose detected");
        assert_eq!(response.remaining_seconds, Some(12.0));
        assert!(response.cue);
    }

    #[test]
    fn test_no_pose_json() {
        let reply = RelayReply::Analysis(AnalysisResponse::no_pose());
        assert_eq!(
            reply.to_json().unwrap(),
            r#"{"posture_correct":false,"angle":null,"message":"No pose detected"}"#
        );

        let failure = RelayReply::Failure {
            error: "boom".to_string(),
        };
        assert_eq!(failure.to_json().unwrap(), r#"{"error":"boom"}"#);
        assert!(failure.is_failure());
    }
}
