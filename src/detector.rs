//! Face detector capability and confidence gating.
//!
//! The crate never runs a face model itself. Whatever produces detections
//! (a browser model bridge, an ONNX session, a recording) implements
//! [`FaceDetector`], and the [`ConfidenceGate`] decides which of its
//! detections is allowed to move the tracked element.

use crate::{constants::DEFAULT_CONFIDENCE_THRESHOLD, features::RawDetection, Error, Result};

/// External face detector invoked once per frame
pub trait FaceDetector {
    /// Frame type the detector consumes
    type Frame;

    /// Estimate all faces in a frame, most prominent first
    ///
    /// # Errors
    ///
    /// Returns an error when inference fails for this frame.
    fn estimate_faces(&mut self, frame: &Self::Frame) -> Result<Vec<RawDetection>>;
}

impl<D: FaceDetector + ?Sized> FaceDetector for Box<D> {
    type Frame = D::Frame;

    fn estimate_faces(&mut self, frame: &Self::Frame) -> Result<Vec<RawDetection>> {
        (**self).estimate_faces(frame)
    }
}

/// Keeps the first face of a frame if its probability clears the threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceGate {
    threshold: f64,
}

impl ConfidenceGate {
    /// Create a gate; detections must score strictly above `threshold`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] unless `threshold` is within `[0, 1]`.
    pub fn new(threshold: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Error::InvalidInput(format!(
                "Confidence threshold must be between 0.0 and 1.0, got {threshold}"
            )));
        }
        Ok(Self { threshold })
    }

    /// Minimum (exclusive) probability
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Whether a single detection passes
    #[must_use]
    pub fn accepts(&self, detection: &RawDetection) -> bool {
        detection.confidence() > self.threshold
    }

    /// Select the detection to track: only the first face is considered
    #[must_use]
    pub fn select<'a>(&self, detections: &'a [RawDetection]) -> Option<&'a RawDetection> {
        detections.first().filter(|detection| self.accepts(detection))
    }
}

impl Default for ConfidenceGate {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::Point;

    fn detection(probability: f64) -> RawDetection {
        RawDetection {
            top_left: Point::new(0.0, 0.0),
            bottom_right: Point::new(10.0, 10.0),
            probability: vec![probability],
            landmarks: vec![Point::default(); 6],
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        let gate = ConfidenceGate::default();
        assert!(!gate.accepts(&detection(0.99)));
        assert!(gate.accepts(&detection(0.991)));
    }

    #[test]
    fn test_only_first_face_considered() {
        let gate = ConfidenceGate::default();
        let faces = vec![detection(0.5), detection(0.999)];
        assert!(gate.select(&faces).is_none());

        let faces = vec![detection(0.995), detection(0.5)];
        assert_eq!(gate.select(&faces).map(RawDetection::confidence), Some(0.995));

        assert!(gate.select(&[]).is_none());
    }

    #[test]
    fn test_threshold_bounds() {
        assert!(ConfidenceGate::new(0.0).is_ok());
        assert!(ConfidenceGate::new(1.0).is_ok());
        assert!(ConfidenceGate::new(1.5).is_err());
        assert!(ConfidenceGate::new(-0.1).is_err());
        assert!(ConfidenceGate::new(f64::NAN).is_err());
    }
}
