//! Constants used throughout the application

/// Number of landmarks the face model reports per detection
pub const NUM_FACE_LANDMARKS: usize = 6;

/// Landmark indices in detector output order
pub const RIGHT_EYE: usize = 0;
pub const LEFT_EYE: usize = 1;
pub const NOSE: usize = 2;
pub const MOUTH: usize = 3;
pub const RIGHT_EAR: usize = 4;
pub const LEFT_EAR: usize = 5;

/// Minimum (exclusive) detection probability that lets a face through
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.99;

/// Default easing strength: each update closes 1/30 of the remaining gap
pub const DEFAULT_EASING_STRENGTH: f64 = 30.0;

/// Horizontal face-minus-eyes offset that saturates the target
pub const DEFAULT_HORIZONTAL_RANGE: f64 = 40.0;

/// Vertical eyes-minus-ears offset that saturates the target
pub const DEFAULT_VERTICAL_RANGE: f64 = 30.0;

/// Default video frame size
pub const DEFAULT_FRAME_WIDTH: u32 = 320;
pub const DEFAULT_FRAME_HEIGHT: u32 = 240;

/// Default viewport size used when none is configured
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1000;
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 800;

/// Fractions of the frame size subtracted from the targets
pub const HORIZONTAL_FRAME_OFFSET: f64 = 0.5;
pub const VERTICAL_FRAME_OFFSET: f64 = 0.25;
