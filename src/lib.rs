//! Posture evaluation for webcam exercise coaching.
//!
//! An external pose estimator turns each video frame into named body
//! landmarks. This library scores those landmarks against simple geometric
//! rules and reports whether the exercise is being performed correctly:
//!
//! - **Plank** (hold exercise): the ear, shoulder and hip must stay close to a
//!   straight line. Time in good form accumulates toward a target; a form
//!   break either pauses the clock or resets it.
//! - **Criss cross** (rhythmic exercise): hands joined above the head and legs
//!   spread, with a metronome cue at a fixed interval.
//!
//! Hosts drive the evaluators: [`app::CoachApp`] replays a pose stream with a
//! stop token and cue sink, [`relay::Relay`] answers base64 image payloads
//! from a remote client.
//!
//! # Examples
//!
//! ## Scoring a single frame
//!
//! ```
//! use exercise_form_coach::{
//!     clock::FrameTick,
//!     exercise::{create_evaluator, ExerciseEvaluator},
//!     landmarks::{BodyPart, FrameSize, Landmark, PoseLandmarks},
//! };
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut plank = create_evaluator("plank:30:hardcore")?;
//!
//! let pose: PoseLandmarks = vec![
//!     Landmark::new(BodyPart::LeftEar, 0.25, 0.1),
//!     Landmark::new(BodyPart::LeftShoulder, 0.25, 0.3),
//!     Landmark::new(BodyPart::LeftHip, 0.25, 0.5),
//! ]
//! .into();
//!
//! let tick = FrameTick::new(Duration::ZERO, Duration::from_millis(33));
//! let verdict = plank.evaluate(Some(&pose), FrameSize::new(640, 480), tick);
//!
//! assert!(verdict.posture_correct);
//! assert_eq!(verdict.message, "Good posture!");
//! # Ok(())
//! # }
//! ```
//!
//! ## Replaying a recorded session
//!
//! ```no_run
//! use exercise_form_coach::{
//!     app::{AppConfig, CoachApp, StopToken},
//!     cue::TerminalBell,
//!     exercise::create_evaluator,
//!     pose_stream::RecordedPoseStream,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut source = RecordedPoseStream::from_file("session.jsonl")?;
//! let mut evaluator = create_evaluator("crisscross:5")?;
//! let mut bell = TerminalBell::stdout();
//!
//! let mut app = CoachApp::new(AppConfig::default());
//! let summary = app.run(&mut source, evaluator.as_mut(), &mut bell, &StopToken::new(), |_, verdict| {
//!     println!("{}", verdict.message);
//! })?;
//! println!("{} of {} frames in good form", summary.correct_frames, summary.frames);
//! # Ok(())
//! # }
//! ```

/// Error types and result handling
pub mod error;

/// Thresholds, defaults and user-facing messages
pub mod constants;

/// Body landmark model
pub mod landmarks;

/// Joint angles and distances
pub mod geometry;

/// Session time keeping
pub mod clock;

/// Exercise evaluators and their factory
pub mod exercise;

/// Metronome cue sinks
pub mod cue;

/// Pose frame sources
pub mod pose_stream;

/// Session loop host
pub mod app;

/// Image-in, verdict-out relay host
pub mod relay;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
