//! Face-follow library: moves an on-screen element after a detected face.
//!
//! An external face model reports, per video frame, a bounding box and six
//! landmarks for each face. This library turns that noisy stream into a
//! smoothly eased, bounded screen position:
//!
//! 1. The [`detector::ConfidenceGate`] keeps the first face of a frame only if
//!    its probability is strictly above the threshold (0.99 by default)
//! 2. [`features::reduce`] collapses the detection to face, eyes and ears
//!    midpoints
//! 3. The [`controller::PositionController`] derives a target from head turn
//!    and tilt, eases one step toward it and clamps the result
//! 4. Every [`sink::PositionSink`] renders the new position
//!
//! Frames without a qualifying face leave the position untouched.
//!
//! # Examples
//!
//! ## Driving the controller directly
//!
//! ```
//! use face_follow::{
//!     controller::{Dimensions, PositionController},
//!     features::{reduce, Point, RawDetection},
//! };
//!
//! let detection = RawDetection {
//!     top_left: Point::new(232.28, 145.26),
//!     bottom_right: Point::new(449.75, 308.36),
//!     probability: vec![0.998],
//!     landmarks: vec![
//!         Point::new(295.13, 177.64), // right eye
//!         Point::new(382.32, 175.56), // left eye
//!         Point::new(341.18, 205.03), // nose
//!         Point::new(345.12, 250.61), // mouth
//!         Point::new(252.76, 211.37), // right ear
//!         Point::new(431.20, 204.93), // left ear
//!     ],
//! };
//!
//! let mut controller = PositionController::new(Dimensions::new(1000, 800), Dimensions::new(320, 240));
//! let position = controller.sync(&reduce(&detection));
//! assert!(controller.bounds().contains(position));
//! ```
//!
//! ## Running a session
//!
//! ```
//! use face_follow::{
//!     controller::{Dimensions, PositionController},
//!     detector::ConfidenceGate,
//!     replay::{RecordedDetector, ReplaySource},
//!     sink::LogSink,
//!     tracker::Tracker,
//! };
//!
//! # fn main() -> face_follow::Result<()> {
//! let controller = PositionController::new(Dimensions::new(1000, 800), Dimensions::new(320, 240));
//! let mut tracker = Tracker::new(RecordedDetector, ConfidenceGate::default(), controller);
//! tracker.add_sink(LogSink);
//!
//! let mut source = ReplaySource::from_frames(vec![Vec::new(), Vec::new()]);
//! let stats = tracker.run(&mut source)?;
//! assert_eq!(stats.frames, 2);
//! assert_eq!(stats.tracked, 0);
//! # Ok(())
//! # }
//! ```

/// Face feature reduction from raw detections to midpoints
pub mod features;

/// Eased, bounded position controller
pub mod controller;

/// Easing algorithms used by the controller
pub mod easing;

/// Face detector capability and confidence gating
pub mod detector;

/// Frame source capability
pub mod source;

/// Position sinks consuming the controller output
pub mod sink;

/// Per-session tracking pipeline
pub mod tracker;

/// Replay of recorded detections
pub mod replay;

/// Cursor sink for X11 systems
pub mod cursor_control;

/// Parsing and conversion helpers
pub mod utils;

/// Error types and result handling
pub mod error;

/// Main application module
pub mod app;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
