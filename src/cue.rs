//! Audible cue sinks for the metronome.
//!
//! Evaluators only report that a cue is due; the host decides how to make
//! it heard. The desktop binary rings the terminal bell, tests and relays
//! use [`SilentCue`].

use crate::{error::AppError, Result};
use log::info;
use std::io::{self, Stdout, Write};

/// Something that can signal a metronome beat
pub trait CueSink: Send {
    /// Emit one cue
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying output fails
    fn cue(&mut self) -> Result<()>;

    /// Number of cues emitted so far
    fn count(&self) -> u64;
}

/// Rings the ASCII bell on a writer (stdout by default)
pub struct TerminalBell<W: Write + Send = Stdout> {
    out: W,
    count: u64,
}

impl TerminalBell<Stdout> {
    /// Bell on standard output
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalBell<W> {
    /// Bell on an arbitrary writer
    pub fn new(out: W) -> Self {
        Self { out, count: 0 }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> CueSink for TerminalBell<W> {
    fn cue(&mut self) -> Result<()> {
        self.out
            .write_all(b"\x07")
            .and_then(|()| self.out.flush())
            .map_err(|e| AppError::CueError(format!("Failed to ring bell: {e}")))?;
        self.count += 1;
        info!("Beep ({})", self.count);
        Ok(())
    }

    fn count(&self) -> u64 {
        self.count
    }
}

/// Counts cues without making a sound
#[derive(Debug, Default, Clone)]
pub struct SilentCue {
    count: u64,
}

impl SilentCue {
    /// Create a silent sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CueSink for SilentCue {
    fn cue(&mut self) -> Result<()> {
        self.count += 1;
        Ok(())
    }

    fn count(&self) -> u64 {
        self.count
    }
}
