//! Pose frame sources.
//!
//! A session is fed [`PoseFrame`]s through the [`FrameSource`] trait. The
//! crate ships a JSON-lines reader for recorded sessions; live hosts wrap
//! their pose estimator in their own source, and in-memory frames work via
//! [`IterSource`].
//!
//! Recorded line format:
//!
//! ```text
//! {"timestamp_ms": 33, "width": 640, "height": 480,
//!  "landmarks": [{"name": "left_ear", "x": 0.1, "y": 0.2, "z": 0.0, "visibility": 0.9}]}
//! ```
//!
//! `"landmarks": null` (or a missing key) records a frame with nobody in it.

use crate::{
    landmarks::{FrameSize, PoseLandmarks},
    Error, Result,
};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Duration;

/// One frame worth of pose estimator output
#[derive(Debug, Clone, PartialEq)]
pub struct PoseFrame {
    /// Capture time relative to an arbitrary origin
    pub timestamp: Duration,
    /// Size of the image the landmarks were estimated on
    pub size: FrameSize,
    /// Detected landmarks, `None` when nobody was found
    pub landmarks: Option<PoseLandmarks>,
}

impl PoseFrame {
    /// Frame with a detected pose
    #[must_use]
    pub fn detected(timestamp: Duration, size: FrameSize, landmarks: PoseLandmarks) -> Self {
        Self {
            timestamp,
            size,
            landmarks: Some(landmarks),
        }
    }

    /// Frame in which no pose was found
    #[must_use]
    pub fn empty(timestamp: Duration, size: FrameSize) -> Self {
        Self {
            timestamp,
            size,
            landmarks: None,
        }
    }

    /// Serialize as one line of a recorded stream
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_json_line(&self) -> Result<String> {
        Ok(serde_json::to_string(&RecordedFrame::from(self))?)
    }
}

/// Anything that yields pose frames in capture order
pub trait FrameSource {
    /// Next frame, or `None` at end of stream
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying source fails or yields malformed data
    fn next_frame(&mut self) -> Result<Option<PoseFrame>>;
}

#[derive(Debug, Serialize, Deserialize)]
struct RecordedFrame {
    timestamp_ms: u64,
    width: u32,
    height: u32,
    #[serde(default)]
    landmarks: Option<PoseLandmarks>,
}

impl From<&PoseFrame> for RecordedFrame {
    fn from(frame: &PoseFrame) -> Self {
        Self {
            timestamp_ms: u64::try_from(frame.timestamp.as_millis()).unwrap_or(u64::MAX),
            width: frame.size.width,
            height: frame.size.height,
            landmarks: frame.landmarks.clone(),
        }
    }
}

/// JSON-lines reader for recorded sessions
pub struct RecordedPoseStream<R: BufRead> {
    reader: R,
    line_number: usize,
    buffer: String,
}

impl RecordedPoseStream<BufReader<File>> {
    /// Open a recorded stream from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening recorded pose stream: {}", path.display());
        let file = File::open(path)
            .map_err(|e| Error::StreamError(format!("Failed to open {}: {e}", path.display())))?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> RecordedPoseStream<R> {
    /// Read frames from any buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buffer: String::new(),
        }
    }

    /// Number of lines consumed so far
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    fn parse_line(&self, line: &str) -> Result<PoseFrame> {
        let recorded: RecordedFrame = serde_json::from_str(line)
            .map_err(|e| Error::StreamError(format!("Line {}: {e}", self.line_number)))?;

        if recorded.width == 0 || recorded.height == 0 {
            return Err(Error::StreamError(format!(
                "Line {}: frame size must be non-zero, got {}x{}",
                self.line_number, recorded.width, recorded.height
            )));
        }

        Ok(PoseFrame {
            timestamp: Duration::from_millis(recorded.timestamp_ms),
            size: FrameSize::new(recorded.width, recorded.height),
            landmarks: recorded.landmarks,
        })
    }
}

impl<R: BufRead> FrameSource for RecordedPoseStream<R> {
    fn next_frame(&mut self) -> Result<Option<PoseFrame>> {
        loop {
            self.buffer.clear();
            let read = self
                .reader
                .read_line(&mut self.buffer)
                .map_err(|e| Error::StreamError(format!("Line {}: {e}", self.line_number + 1)))?;
            if read == 0 {
                debug!("End of recorded stream after {} lines", self.line_number);
                return Ok(None);
            }
            self.line_number += 1;

            let line = self.buffer.trim();
            if line.is_empty() {
                continue;
            }
            return self.parse_line(line).map(Some);
        }
    }
}

/// Source over an in-memory iterator of frames
#[derive(Debug, Clone)]
pub struct IterSource<I> {
    frames: I,
}

impl<I: Iterator<Item = PoseFrame>> FrameSource for IterSource<I> {
    fn next_frame(&mut self) -> Result<Option<PoseFrame>> {
        Ok(self.frames.next())
    }
}

/// Wrap any collection or iterator of frames as a [`FrameSource`]
pub fn from_frames<T: IntoIterator<Item = PoseFrame>>(frames: T) -> IterSource<T::IntoIter> {
    IterSource {
        frames: frames.into_iter(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{BodyPart, Landmark};
    use std::io::Cursor;

    #[test]
    fn test_reads_frames_and_skips_blank_lines() {
        let data = r#"{"timestamp_ms": 0, "width": 640, "height": 480, "landmarks": [{"name": "left_ear", "x": 0.1, "y": 0.2}]}

{"timestamp_ms": 33, "width": 640, "height": 480, "landmarks": null}
{"timestamp_ms": 66, "width": 640, "height": 480}
"#;
        let mut stream = RecordedPoseStream::new(Cursor::new(data));

        let first = stream.next_frame().unwrap().unwrap();
        assert_eq!(first.timestamp, Duration::ZERO);
        assert_eq!(first.size, FrameSize::new(640, 480));
        let pose = first.landmarks.unwrap();
        assert_eq!(pose.get(BodyPart::LeftEar).unwrap().x, 0.1);

        let second = stream.next_frame().unwrap().unwrap();
        assert_eq!(second.timestamp, Duration::from_millis(33));
        assert!(second.landmarks.is_none());

        let third = stream.next_frame().unwrap().unwrap();
        assert!(third.landmarks.is_none());

        assert!(stream.next_frame().unwrap().is_none());
        assert_eq!(stream.line_number(), 4);
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let data = "{\"timestamp_ms\": 0, \"width\": 640, \"height\": 480}\nnot json\n";
        let mut stream = RecordedPoseStream::new(Cursor::new(data));
        stream.next_frame().unwrap();

        let err = stream.next_frame().unwrap_err();
        assert!(err.to_string().contains("Line 2"), "{err}");
    }

    #[test]
    fn test_zero_frame_size_rejected() {
        let data = "{\"timestamp_ms\": 0, \"width\": 0, \"height\": 480}\n";
        let mut stream = RecordedPoseStream::new(Cursor::new(data));
        assert!(matches!(stream.next_frame(), Err(Error::StreamError(_))));
    }

    #[test]
    fn test_json_line_round_trip() {
        let pose: PoseLandmarks = vec![Landmark::new(BodyPart::Nose, 0.5, 0.5)].into();
        let frame = PoseFrame::detected(Duration::from_millis(120), FrameSize::new(320, 240), pose);

        let line = frame.to_json_line().unwrap();
        assert!(line.contains("\"timestamp_ms\":120"));

        let mut stream = RecordedPoseStream::new(Cursor::new(line));
        assert_eq!(stream.next_frame().unwrap(), Some(frame));
    }

    #[test]
    fn test_iter_source() {
        let size = FrameSize::new(640, 480);
        let mut source = from_frames(vec![PoseFrame::empty(Duration::ZERO, size)]);
        assert!(source.next_frame().unwrap().is_some());
        assert!(source.next_frame().unwrap().is_none());
    }
}
