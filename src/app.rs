//! Host session loop.
//!
//! [`CoachApp`] pulls frames from a [`FrameSource`], scores them with an
//! [`ExerciseEvaluator`], rings the [`CueSink`] when the metronome fires and
//! hands every verdict to an observer closure for display. Cancellation is
//! explicit: the host holds a [`StopToken`] and the loop checks it once per
//! frame.

use crate::{
    clock::SessionClock,
    constants::DEFAULT_FRAME_DELAY_MS,
    cue::CueSink,
    error::Result,
    exercise::{Evaluation, ExerciseEvaluator},
    pose_stream::{FrameSource, PoseFrame},
};
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Where session time comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeBase {
    /// Frame timestamps (recorded streams, deterministic)
    #[default]
    FrameTimestamps,
    /// Wall clock at the moment each frame is evaluated (live capture)
    WallClock,
}

/// Session loop configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Pause between frames
    pub frame_delay: Option<Duration>,
    /// Source of session time
    pub time_base: TimeBase,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            frame_delay: Some(Duration::from_millis(DEFAULT_FRAME_DELAY_MS)),
            time_base: TimeBase::default(),
        }
    }
}

impl AppConfig {
    /// Config that replays frames as fast as possible
    #[must_use]
    pub fn unthrottled() -> Self {
        Self {
            frame_delay: None,
            time_base: TimeBase::FrameTimestamps,
        }
    }
}

/// Cancellation handle shared between the host and the session loop
#[derive(Debug, Clone, Default)]
pub struct StopToken {
    stopped: Arc<AtomicBool>,
}

impl StopToken {
    /// Create an un-stopped token
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the session to stop before its next frame
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    /// Whether a stop was requested
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// What happened during one session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Frames evaluated
    pub frames: u64,
    /// Frames where the required landmarks were missing
    pub frames_without_pose: u64,
    /// Frames judged in good form
    pub correct_frames: u64,
    /// Metronome cues fired
    pub cues: u64,
    /// The exercise reached its terminal state
    pub completed: bool,
    /// The host stopped the session
    pub stopped: bool,
}

/// Session host
pub struct CoachApp {
    config: AppConfig,
    clock: SessionClock,
}

impl CoachApp {
    /// Create a new session host
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            clock: SessionClock::new(),
        }
    }

    /// Run one session until the stream ends, the exercise completes or
    /// `stop` is triggered.
    ///
    /// The evaluator and clock are reset first. Cue sink failures are
    /// logged and do not end the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame source fails
    pub fn run<S, F>(
        &mut self,
        source: &mut S,
        evaluator: &mut dyn ExerciseEvaluator,
        cue: &mut dyn CueSink,
        stop: &StopToken,
        mut observer: F,
    ) -> Result<SessionSummary>
    where
        S: FrameSource + ?Sized,
        F: FnMut(&PoseFrame, &Evaluation),
    {
        info!("Starting {} session", evaluator.name());
        evaluator.reset();
        self.clock.reset();

        let mut summary = SessionSummary::default();

        loop {
            if stop.is_stopped() {
                info!("Stop requested");
                summary.stopped = true;
                break;
            }

            let Some(frame) = source.next_frame()? else {
                info!("End of pose stream reached");
                break;
            };

            let tick = match self.config.time_base {
                TimeBase::FrameTimestamps => self.clock.tick_at(frame.timestamp),
                TimeBase::WallClock => self.clock.tick_now(),
            };
            let evaluation = evaluator.evaluate(frame.landmarks.as_ref(), frame.size, tick);

            summary.frames += 1;
            if !evaluation.pose_detected {
                summary.frames_without_pose += 1;
            }
            if evaluation.posture_correct {
                summary.correct_frames += 1;
            }
            if evaluation.cue {
                summary.cues += 1;
                if let Err(e) = cue.cue() {
                    warn!("Failed to signal cue: {}", e);
                }
            }

            debug!(
                "Frame {} at {:.3}s: {} (correct: {})",
                summary.frames,
                tick.elapsed.as_secs_f64(),
                evaluation.message,
                evaluation.posture_correct
            );
            observer(&frame, &evaluation);

            if evaluation.complete {
                info!("{} session complete", evaluator.name());
                summary.completed = true;
                break;
            }

            if let Some(delay) = self.config.frame_delay {
                thread::sleep(delay);
            }
        }

        info!(
            "Session finished: {} frames, {} correct, {} cues",
            summary.frames, summary.correct_frames, summary.cues
        );
        Ok(summary)
    }
}
