//! Configuration management for the exercise coach

use crate::{
    constants::{
        DEFAULT_CUE_INTERVAL_SECONDS, DEFAULT_FRAME_DELAY_MS, DEFAULT_HOLD_SECONDS, MAX_CUE_INTERVAL_SECONDS,
        MAX_HOLD_SECONDS, MIN_CUE_INTERVAL_SECONDS, MIN_HOLD_SECONDS,
    },
    exercise::{BodySide, ExerciseEvaluator, ExerciseKind, FormThresholds, HoldEvaluator, HoldMode, RhythmicEvaluator},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Plank (hold) settings
    pub plank: PlankConfig,

    /// Criss cross (rhythmic) settings
    pub criss_cross: CrissCrossConfig,

    /// Geometric thresholds
    pub thresholds: FormThresholds,

    /// Session loop settings
    pub session: SessionConfig,
}

/// Plank parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlankConfig {
    /// Target hold time in seconds
    pub target_seconds: u64,

    /// What a form break does to the hold time
    pub mode: HoldMode,

    /// Body side used for the back angle
    pub side: BodySide,
}

/// Criss cross parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrissCrossConfig {
    /// Metronome interval in seconds
    pub cue_interval_seconds: u64,
}

/// Session loop parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Pause between frames in milliseconds (0 disables)
    pub frame_delay_ms: u64,
}

impl Default for PlankConfig {
    fn default() -> Self {
        Self {
            target_seconds: DEFAULT_HOLD_SECONDS,
            mode: HoldMode::default(),
            side: BodySide::default(),
        }
    }
}

impl Default for CrissCrossConfig {
    fn default() -> Self {
        Self {
            cue_interval_seconds: DEFAULT_CUE_INTERVAL_SECONDS,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            frame_delay_ms: DEFAULT_FRAME_DELAY_MS,
        }
    }
}

impl SessionConfig {
    /// Frame delay, `None` when disabled
    #[must_use]
    pub fn frame_delay(&self) -> Option<Duration> {
        (self.frame_delay_ms > 0).then(|| Duration::from_millis(self.frame_delay_ms))
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::IoError(e.to_string()))?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid configuration
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content).map_err(|e| Error::IoError(e.to_string()))?;

        Ok(())
    }

    /// Create an evaluator for the given exercise from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn create_evaluator(&self, kind: ExerciseKind) -> Result<Box<dyn ExerciseEvaluator>> {
        self.validate()?;

        match kind {
            ExerciseKind::Hold => Ok(Box::new(
                HoldEvaluator::new(Duration::from_secs(self.plank.target_seconds), self.plank.mode)
                    .with_side(self.plank.side)
                    .with_thresholds(self.thresholds),
            )),
            ExerciseKind::Rhythmic => Ok(Box::new(
                RhythmicEvaluator::new(Duration::from_secs(self.criss_cross.cue_interval_seconds))
                    .with_thresholds(self.thresholds),
            )),
        }
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] describing the first invalid value
    pub fn validate(&self) -> Result<()> {
        // Exercise parameters
        if !(MIN_HOLD_SECONDS..=MAX_HOLD_SECONDS).contains(&self.plank.target_seconds) {
            return Err(Error::ConfigError(format!(
                "Plank target must be between {MIN_HOLD_SECONDS} and {MAX_HOLD_SECONDS} seconds"
            )));
        }
        if !(MIN_CUE_INTERVAL_SECONDS..=MAX_CUE_INTERVAL_SECONDS).contains(&self.criss_cross.cue_interval_seconds) {
            return Err(Error::ConfigError(format!(
                "Cue interval must be between {MIN_CUE_INTERVAL_SECONDS} and {MAX_CUE_INTERVAL_SECONDS} seconds"
            )));
        }

        // Thresholds
        let t = &self.thresholds;
        if !(0.0..=360.0).contains(&t.straight_back_min_degrees) || !(0.0..=360.0).contains(&t.straight_back_max_degrees) {
            return Err(Error::ConfigError(
                "Straight back bounds must be between 0 and 360 degrees".to_string(),
            ));
        }
        if t.straight_back_min_degrees > t.straight_back_max_degrees {
            return Err(Error::ConfigError(
                "Straight back minimum must not exceed the maximum".to_string(),
            ));
        }
        if !(t.hand_proximity_px.is_finite() && t.hand_proximity_px > 0.0) {
            return Err(Error::ConfigError(
                "Hand proximity must be greater than 0".to_string(),
            ));
        }
        if !(t.leg_spread_px.is_finite() && t.leg_spread_px >= 0.0) {
            return Err(Error::ConfigError(
                "Leg spread must not be negative".to_string(),
            ));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r"# Exercise Form Coach Configuration

# Plank: hold a straight back for the target time
plank:
  target_seconds: 60      # 10 to 600
  mode: normal            # normal (pause on break) or hardcore (reset on break)
  side: left              # left or right ear/shoulder/hip

# Criss cross: hands joined overhead, legs spread, metronome beep
criss_cross:
  cue_interval_seconds: 5 # 1 to 10

# Geometric thresholds (pixels are in frame coordinates)
thresholds:
  straight_back_min_degrees: 160.0
  straight_back_max_degrees: 200.0
  hand_proximity_px: 100.0
  leg_spread_px: 150.0

# Session loop
session:
  frame_delay_ms: 30
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_config_matches_defaults() {
        let parsed = Config::from_yaml(EXAMPLE_CONFIG).unwrap();
        assert_eq!(parsed, Config::default());
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed = Config::from_yaml("plank:\n  mode: hardcore\n").unwrap();
        assert_eq!(parsed.plank.mode, HoldMode::ResetOnBreak);
        assert_eq!(parsed.plank.target_seconds, DEFAULT_HOLD_SECONDS);
        assert_eq!(parsed.criss_cross, CrissCrossConfig::default());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut config = Config::default();
        config.plank.target_seconds = 5;
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));

        let mut config = Config::default();
        config.criss_cross.cue_interval_seconds = 11;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.thresholds.straight_back_min_degrees = 210.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.thresholds.hand_proximity_px = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_create_evaluator_from_config() {
        let config = Config::default();
        assert_eq!(config.create_evaluator(ExerciseKind::Hold).unwrap().name(), "plank");
        assert_eq!(config.create_evaluator(ExerciseKind::Rhythmic).unwrap().name(), "criss_cross");
    }

    #[test]
    fn test_frame_delay() {
        assert_eq!(SessionConfig::default().frame_delay(), Some(Duration::from_millis(30)));
        assert_eq!(SessionConfig { frame_delay_ms: 0 }.frame_delay(), None);
    }
}
