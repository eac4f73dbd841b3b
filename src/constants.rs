//! Constants used throughout the application

/// Number of body landmarks produced by the pose estimator
pub const NUM_BODY_LANDMARKS: usize = 33;

/// Lower bound of the straight-back band, in degrees
pub const STRAIGHT_BACK_MIN_DEGREES: f64 = 160.0;

/// Upper bound of the straight-back band, in degrees
pub const STRAIGHT_BACK_MAX_DEGREES: f64 = 200.0;

/// Wrists closer than this (pixels) count as joined
pub const HAND_PROXIMITY_PX: f64 = 100.0;

/// Ankles at least this far apart (pixels) count as spread
pub const LEG_SPREAD_PX: f64 = 150.0;

/// Default plank duration in seconds
pub const DEFAULT_HOLD_SECONDS: u64 = 60;

/// Accepted plank durations in seconds
pub const MIN_HOLD_SECONDS: u64 = 10;
pub const MAX_HOLD_SECONDS: u64 = 600;

/// Default metronome interval in seconds
pub const DEFAULT_CUE_INTERVAL_SECONDS: u64 = 5;

/// Accepted metronome intervals in seconds
pub const MIN_CUE_INTERVAL_SECONDS: u64 = 1;
pub const MAX_CUE_INTERVAL_SECONDS: u64 = 10;

/// Pause between frames in the desktop loop
pub const DEFAULT_FRAME_DELAY_MS: u64 = 30;

/// User-facing messages
pub const MSG_GOOD_POSTURE: &str = "Good posture!";
pub const MSG_ADJUST_POSITION: &str = "Adjust your position!";
pub const MSG_NO_LANDMARKS: &str = "No landmarks detected";
pub const MSG_NO_POSE: &str = "No pose detected";
pub const MSG_HOLD_COMPLETE: &str = "Plank complete!";
pub const MSG_JOIN_HANDS: &str = "Join your hands above your head";
pub const MSG_SPREAD_LEGS: &str = "Spread your legs";
pub const MSG_GOOD_POSITION: &str = "Good position";
pub const MSG_ADJUST_FORM: &str = "Adjust your form!";
