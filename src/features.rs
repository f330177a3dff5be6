//! Face feature reduction.
//!
//! Turns one raw face-model detection into three midpoints that act as stable
//! proxies for where the face, the eyes and the ears are:
//!
//! - `face`: center of the bounding box
//! - `eyes`: midpoint between the left and right eye
//! - `ears`: midpoint between the left and right ear
//!
//! The position controller derives head turn and tilt from the offsets
//! between these three points.

use crate::{
    constants::{LEFT_EAR, LEFT_EYE, NUM_FACE_LANDMARKS, RIGHT_EAR, RIGHT_EYE},
    Error, Result,
};
use serde::{Deserialize, Serialize};

/// 2D point in frame coordinates, serialized as `[x, y]`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Componentwise average of two points
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self {
            x: (self.x + other.x) * 0.5,
            y: (self.y + other.y) * 0.5,
        }
    }

    /// Whether both coordinates are finite
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(point: Point) -> Self {
        [point.x, point.y]
    }
}

/// One face as reported by the external face model.
///
/// Landmarks are ordered right eye, left eye, nose, mouth, right ear, left ear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDetection {
    /// Top-left corner of the face bounding box
    pub top_left: Point,
    /// Bottom-right corner of the face bounding box
    pub bottom_right: Point,
    /// Detection probability, first element is the face confidence
    pub probability: Vec<f64>,
    /// Facial landmarks in detector order
    pub landmarks: Vec<Point>,
}

impl RawDetection {
    /// Confidence of this detection, `0.0` when the detector reported none
    #[must_use]
    pub fn confidence(&self) -> f64 {
        self.probability.first().copied().unwrap_or(0.0)
    }

    /// Check the detector contract before the detection is reduced
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDetection`] when the landmark count is wrong,
    /// the probability is missing or outside `[0, 1]`, or any coordinate is
    /// not finite.
    pub fn validate(&self) -> Result<()> {
        if self.landmarks.len() != NUM_FACE_LANDMARKS {
            return Err(Error::MalformedDetection(format!(
                "expected {NUM_FACE_LANDMARKS} landmarks, got {}",
                self.landmarks.len()
            )));
        }
        if self.probability.is_empty() {
            return Err(Error::MalformedDetection("missing probability".to_string()));
        }
        if let Some(p) = self.probability.iter().find(|p| !(0.0..=1.0).contains(*p)) {
            return Err(Error::MalformedDetection(format!(
                "probability {p} outside [0, 1]"
            )));
        }
        if !self.top_left.is_finite() || !self.bottom_right.is_finite() {
            return Err(Error::MalformedDetection(
                "bounding box has non-finite coordinates".to_string(),
            ));
        }
        if let Some(index) = self.landmarks.iter().position(|p| !p.is_finite()) {
            return Err(Error::MalformedDetection(format!(
                "landmark {index} has non-finite coordinates"
            )));
        }
        Ok(())
    }
}

/// Midpoints derived from one accepted detection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureMidpoints {
    /// Center of the face bounding box
    pub face: Point,
    /// Midpoint between the eyes
    pub eyes: Point,
    /// Midpoint between the ears
    pub ears: Point,
}

/// Reduce a detection to its face, eyes and ears midpoints.
///
/// The detection must carry exactly six landmarks; call
/// [`RawDetection::validate`] at the detector boundary first.
///
/// # Panics
///
/// Panics when fewer than six landmarks are present.
#[must_use]
pub fn reduce(detection: &RawDetection) -> FeatureMidpoints {
    debug_assert_eq!(
        detection.landmarks.len(),
        NUM_FACE_LANDMARKS,
        "face model must report {NUM_FACE_LANDMARKS} landmarks"
    );
    let landmarks = &detection.landmarks;

    FeatureMidpoints {
        face: detection.top_left.midpoint(detection.bottom_right),
        eyes: landmarks[LEFT_EYE].midpoint(landmarks[RIGHT_EYE]),
        ears: landmarks[LEFT_EAR].midpoint(landmarks[RIGHT_EAR]),
    }
}

impl From<&RawDetection> for FeatureMidpoints {
    fn from(detection: &RawDetection) -> Self {
        reduce(detection)
    }
}
