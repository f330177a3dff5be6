//! Position controller that turns face midpoints into an eased screen position.
//!
//! Each [`PositionController::sync`] call:
//!
//! 1. derives a horizontal target from how far the face center sits left or
//!    right of the eyes midpoint (head turn),
//! 2. derives a vertical target from how far the eyes sit above or below the
//!    ears midpoint (head tilt, magnitude only),
//! 3. eases the current position one step toward that target,
//! 4. clamps the result to the bounding region.
//!
//! The controller holds its position between calls; a frame without a usable
//! face simply does not call `sync`.

use crate::{
    constants::{DEFAULT_HORIZONTAL_RANGE, DEFAULT_VERTICAL_RANGE, HORIZONTAL_FRAME_OFFSET, VERTICAL_FRAME_OFFSET},
    easing::{exponential::ExponentialEasing, Easing},
    features::FeatureMidpoints,
    Error, Result,
};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width and height in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Dimensions {
    /// Create new dimensions
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    fn height_f64(self) -> f64 {
        f64::from(self.height)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Screen-space position of the tracked element
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal offset
    pub x: f64,
    /// Vertical offset
    pub y: f64,
}

impl Position {
    /// Create a new position
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin, where every controller starts
    pub const ORIGIN: Self = Self::new(0.0, 0.0);
}

/// Region the tracked position is confined to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Smallest allowed x
    pub min_x: f64,
    /// Largest allowed x
    pub max_x: f64,
    /// Smallest allowed y
    pub min_y: f64,
    /// Largest allowed y
    pub max_y: f64,
}

impl Bounds {
    /// Bounds letting the element hang off the top-left by one frame and
    /// reach the bottom-right edge of the viewport
    #[must_use]
    pub fn new(viewport: Dimensions, frame: Dimensions) -> Self {
        Self {
            min_x: -frame.width_f64(),
            max_x: viewport.width_f64(),
            min_y: -frame.height_f64(),
            max_y: viewport.height_f64(),
        }
    }

    /// Clamp a position into the region. Idempotent.
    #[must_use]
    pub fn clamp(&self, position: Position) -> Position {
        Position {
            x: position.x.clamp(self.min_x, self.max_x),
            y: position.y.clamp(self.min_y, self.max_y),
        }
    }

    /// Whether a position lies inside the region
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        (self.min_x..=self.max_x).contains(&position.x) && (self.min_y..=self.max_y).contains(&position.y)
    }
}

/// Tunables of the position controller
pub struct ControllerConfig {
    /// Horizontal offset (face minus eyes) that saturates the target
    pub horizontal_range: f64,
    /// Vertical offset (eyes minus ears) that saturates the target
    pub vertical_range: f64,
    /// Easing applied once per update on each axis
    pub easing: Box<dyn Easing>,
}

impl ControllerConfig {
    /// Check that both ranges are usable divisors
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] when a range is not finite and positive.
    pub fn validate(&self) -> Result<()> {
        for (name, range) in [("horizontal", self.horizontal_range), ("vertical", self.vertical_range)] {
            if !range.is_finite() || range <= 0.0 {
                return Err(Error::ConfigError(format!(
                    "{name} range must be a positive finite value, got {range}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            horizontal_range: DEFAULT_HORIZONTAL_RANGE,
            vertical_range: DEFAULT_VERTICAL_RANGE,
            easing: Box::new(ExponentialEasing::default()),
        }
    }
}

/// Stateful controller easing a screen position toward the face
pub struct PositionController {
    viewport: Dimensions,
    frame: Dimensions,
    config: ControllerConfig,
    bounds: Bounds,
    position: Position,
}

impl PositionController {
    /// Create a controller with the default tuning (strength 30, ranges 40/30)
    #[must_use]
    pub fn new(viewport: Dimensions, frame: Dimensions) -> Self {
        Self::build(viewport, frame, ControllerConfig::default())
    }

    /// Create a controller with explicit tuning
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration is invalid.
    pub fn with_config(viewport: Dimensions, frame: Dimensions, config: ControllerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(viewport, frame, config))
    }

    fn build(viewport: Dimensions, frame: Dimensions, config: ControllerConfig) -> Self {
        info!(
            "Position controller: viewport {}, frame {}, easing {}",
            viewport,
            frame,
            config.easing.name()
        );
        Self {
            viewport,
            frame,
            bounds: Bounds::new(viewport, frame),
            config,
            position: Position::ORIGIN,
        }
    }

    /// Current eased position
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Region the position is clamped to
    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Current viewport size
    #[must_use]
    pub const fn viewport(&self) -> Dimensions {
        self.viewport
    }

    /// Video frame size
    #[must_use]
    pub const fn frame(&self) -> Dimensions {
        self.frame
    }

    /// Adopt a new viewport size; the held position is re-clamped
    pub fn set_viewport(&mut self, viewport: Dimensions) {
        if viewport != self.viewport {
            debug!("Viewport resized from {} to {}", self.viewport, viewport);
            self.viewport = viewport;
            self.bounds = Bounds::new(viewport, self.frame);
            self.position = self.bounds.clamp(self.position);
        }
    }

    /// Return to the origin
    pub fn reset(&mut self) {
        self.position = Position::ORIGIN;
    }

    /// Horizontal target from the face-minus-eyes offset
    #[must_use]
    pub fn horizontal_target(&self, features: &FeatureMidpoints) -> f64 {
        let movement = features.face.x - features.eyes.x;
        let range = self.config.horizontal_range;
        let alpha = movement.abs().clamp(0.0, range) / range * sign(movement);

        self.viewport.width_f64() * (alpha + 1.0) / 2.0 - self.frame.width_f64() * HORIZONTAL_FRAME_OFFSET
    }

    /// Vertical target from the eyes-minus-ears offset, magnitude only
    #[must_use]
    pub fn vertical_target(&self, features: &FeatureMidpoints) -> f64 {
        let movement = features.eyes.y - features.ears.y;
        let range = self.config.vertical_range;
        let alpha = movement.abs().clamp(0.0, range) / range;

        self.viewport.height_f64() * (1.0 - alpha) - self.frame.height_f64() * VERTICAL_FRAME_OFFSET
    }

    /// Target position for a set of midpoints
    #[must_use]
    pub fn target(&self, features: &FeatureMidpoints) -> Position {
        Position::new(self.horizontal_target(features), self.vertical_target(features))
    }

    /// Ease one step toward the target of `features` and clamp.
    ///
    /// Non-finite targets leave the position untouched.
    pub fn sync(&mut self, features: &FeatureMidpoints) -> Position {
        let target = self.target(features);
        if !target.x.is_finite() || !target.y.is_finite() {
            warn!("Ignoring non-finite target ({}, {})", target.x, target.y);
            return self.position;
        }

        let eased = Position::new(
            self.config.easing.ease(self.position.x, target.x),
            self.config.easing.ease(self.position.y, target.y),
        );
        self.position = self.bounds.clamp(eased);

        debug!(
            "Target ({:.2}, {:.2}) -> position ({:.2}, {:.2})",
            target.x, target.y, self.position.x, self.position.y
        );
        self.position
    }
}

/// Sign of `value`, with zero mapping to zero
fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}
