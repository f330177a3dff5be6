//! Replay of recorded face-model output.
//!
//! A recording is a JSON Lines stream: each non-blank line holds the JSON
//! array the face model returned for one frame, in the model's own shape
//! (`topLeft`, `bottomRight`, `probability`, `landmarks`). An empty array is a
//! frame without any face.

use crate::{detector::FaceDetector, features::RawDetection, source::FrameSource, Error, Result};
use log::{debug, info};
use std::{
    collections::VecDeque,
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

/// One recorded frame
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFrame {
    /// Zero-based frame number within the recording
    pub index: usize,
    /// Faces the model reported for this frame
    pub detections: Vec<RawDetection>,
}

enum Frames {
    Reader { reader: Box<dyn BufRead>, line_number: usize },
    Memory(VecDeque<Vec<RawDetection>>),
}

/// Frame source that plays back a recording
pub struct ReplaySource {
    frames: Frames,
    next_index: usize,
}

impl ReplaySource {
    /// Replay from any buffered reader
    pub fn from_reader<R: BufRead + 'static>(reader: R) -> Self {
        Self {
            frames: Frames::Reader {
                reader: Box::new(reader),
                line_number: 0,
            },
            next_index: 0,
        }
    }

    /// Replay a recording file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Replaying detections from {}", path.display());
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file)))
    }

    /// Replay detections read from standard input
    #[must_use]
    pub fn stdin() -> Self {
        info!("Replaying detections from stdin");
        Self::from_reader(BufReader::new(io::stdin()))
    }

    /// Replay frames held in memory
    #[must_use]
    pub fn from_frames(frames: Vec<Vec<RawDetection>>) -> Self {
        Self {
            frames: Frames::Memory(frames.into()),
            next_index: 0,
        }
    }

    fn next_detections(&mut self) -> Result<Option<Vec<RawDetection>>> {
        match &mut self.frames {
            Frames::Memory(frames) => Ok(frames.pop_front()),
            Frames::Reader { reader, line_number } => {
                let mut line = String::new();
                loop {
                    line.clear();
                    if reader.read_line(&mut line)? == 0 {
                        return Ok(None);
                    }
                    *line_number += 1;
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    let detections = serde_json::from_str(trimmed).map_err(|e| {
                        Error::InvalidInput(format!("Bad recording at line {line_number}: {e}"))
                    })?;
                    return Ok(Some(detections));
                }
            }
        }
    }
}

impl FrameSource for ReplaySource {
    type Frame = RecordedFrame;

    fn next_frame(&mut self) -> Result<Option<RecordedFrame>> {
        let Some(detections) = self.next_detections()? else {
            debug!("Replay exhausted after {} frames", self.next_index);
            return Ok(None);
        };
        let frame = RecordedFrame {
            index: self.next_index,
            detections,
        };
        self.next_index += 1;
        Ok(Some(frame))
    }
}

/// Detector that hands back what was recorded for each frame
#[derive(Debug, Default, Clone, Copy)]
pub struct RecordedDetector;

impl FaceDetector for RecordedDetector {
    type Frame = RecordedFrame;

    fn estimate_faces(&mut self, frame: &RecordedFrame) -> Result<Vec<RawDetection>> {
        Ok(frame.detections.clone())
    }
}
