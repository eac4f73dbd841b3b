//! Session time keeping.
//!
//! Evaluators never read the wall clock themselves. Hosts own a
//! [`SessionClock`] and hand each evaluation a [`FrameTick`], either derived
//! from frame timestamps (recorded streams) or from `Instant::now()` (live
//! relays).

use std::time::{Duration, Instant};

/// Time information for one evaluation call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameTick {
    /// Time since the session started
    pub elapsed: Duration,
    /// Time since the previous frame
    pub delta: Duration,
}

impl FrameTick {
    /// Create a tick
    #[must_use]
    pub fn new(elapsed: Duration, delta: Duration) -> Self {
        Self { elapsed, delta }
    }
}

/// Converts frame timestamps or wall-clock time into [`FrameTick`]s
#[derive(Debug, Clone)]
pub struct SessionClock {
    origin: Option<Duration>,
    last: Option<Duration>,
    started: Instant,
}

impl SessionClock {
    /// Start a new session clock
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: None,
            last: None,
            started: Instant::now(),
        }
    }

    /// Tick for a frame captured at `timestamp`.
    ///
    /// The first frame defines the session origin. Timestamps that go
    /// backwards produce a zero delta.
    pub fn tick_at(&mut self, timestamp: Duration) -> FrameTick {
        let origin = *self.origin.get_or_insert(timestamp);
        let delta = self
            .last
            .map_or(Duration::ZERO, |last| timestamp.saturating_sub(last));
        self.last = Some(timestamp.max(self.last.unwrap_or(timestamp)));

        FrameTick::new(timestamp.saturating_sub(origin), delta)
    }

    /// Tick using the wall clock
    pub fn tick_now(&mut self) -> FrameTick {
        let now = self.started.elapsed();
        self.tick_at(now)
    }

    /// Restart the session
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for SessionClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_is_origin() {
        let mut clock = SessionClock::new();
        let tick = clock.tick_at(Duration::from_millis(500));
        assert_eq!(tick, FrameTick::new(Duration::ZERO, Duration::ZERO));
    }

    #[test]
    fn test_deltas_follow_timestamps() {
        let mut clock = SessionClock::new();
        clock.tick_at(Duration::from_millis(1000));
        let tick = clock.tick_at(Duration::from_millis(1033));
        assert_eq!(tick.delta, Duration::from_millis(33));
        assert_eq!(tick.elapsed, Duration::from_millis(33));

        let tick = clock.tick_at(Duration::from_millis(1100));
        assert_eq!(tick.delta, Duration::from_millis(67));
        assert_eq!(tick.elapsed, Duration::from_millis(100));
    }

    #[test]
    fn test_backwards_timestamp() {
        let mut clock = SessionClock::new();
        clock.tick_at(Duration::from_secs(2));
        let tick = clock.tick_at(Duration::from_secs(1));
        assert_eq!(tick.delta, Duration::ZERO);
        assert_eq!(tick.elapsed, Duration::ZERO);

        // Deltas resume from the latest timestamp seen
        let tick = clock.tick_at(Duration::from_secs(3));
        assert_eq!(tick.delta, Duration::from_secs(1));
    }

    #[test]
    fn test_reset() {
        let mut clock = SessionClock::new();
        clock.tick_at(Duration::from_secs(5));
        clock.reset();
        let tick = clock.tick_at(Duration::from_secs(9));
        assert_eq!(tick.elapsed, Duration::ZERO);
    }

    #[test]
    fn test_tick_now_monotonic() {
        let mut clock = SessionClock::new();
        let first = clock.tick_now();
        let second = clock.tick_now();
        assert!(second.elapsed >= first.elapsed);
    }
}
