//! Configuration management for the face-follow application

use crate::{
    constants::{
        DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_EASING_STRENGTH, DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH,
        DEFAULT_HORIZONTAL_RANGE, DEFAULT_VERTICAL_RANGE,
    },
    controller::{ControllerConfig, Dimensions, PositionController},
    detector::ConfidenceGate,
    easing::{create_easing, exponential::ExponentialEasing, Easing},
    utils::parse_dimensions,
    Error, Result,
};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::{fmt, path::Path, str::FromStr};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Detection gating
    pub tracking: TrackingConfig,

    /// Position controller tuning
    pub controller: ControllerSettings,

    /// Size of the video frames the detector sees
    pub frame: Dimensions,

    /// Viewport the element moves in; `None` picks the default, or the
    /// screen size when driving the cursor
    pub viewport: Option<Dimensions>,

    /// Where positions go
    pub output: OutputConfig,
}

/// Detection gating parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Detections must score strictly above this probability (0.0-1.0)
    pub confidence_threshold: f64,
}

/// Position controller parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
    /// Easing name (`exponential`, `snap`); the exponential strength lives in
    /// `strength`, never inline
    pub easing: String,

    /// Exponential easing strength; larger is slower and smoother
    pub strength: f64,

    /// Face-minus-eyes offset that saturates the horizontal target
    pub horizontal_range: f64,

    /// Eyes-minus-ears offset that saturates the vertical target
    pub vertical_range: f64,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Position sink
    pub sink: SinkKind,
}

/// Available position sinks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Log every position
    #[default]
    Log,
    /// JSON Lines on standard output
    Json,
    /// Warp the X11 pointer
    Cursor,
}

impl FromStr for SinkKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "log" => Ok(Self::Log),
            "json" => Ok(Self::Json),
            "cursor" => Ok(Self::Cursor),
            other => Err(Error::ConfigError(format!("Unknown sink: {other}"))),
        }
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Log => "log",
            Self::Json => "json",
            Self::Cursor => "cursor",
        };
        f.write_str(name)
    }
}

/// Command line values layered over a loaded configuration
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    /// Confidence a face must exceed to be followed
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Easing (exponential, exponential:<strength>, snap)
    #[arg(short, long)]
    pub easing: Option<String>,

    /// Viewport size, e.g. 1000x800
    #[arg(long)]
    pub viewport: Option<String>,

    /// Video frame size, e.g. 320x240
    #[arg(long)]
    pub frame: Option<String>,

    /// Position sink (log, json, cursor)
    #[arg(short, long)]
    pub sink: Option<String>,
}

/// Split an easing argument into its name and optional exponential strength
///
/// # Errors
///
/// Returns [`Error::ConfigError`] when a strength is attached to anything but
/// `exponential` or is not a number.
pub fn parse_easing_arg(arg: &str) -> Result<(String, Option<f64>)> {
    let lowered = arg.trim().to_lowercase();
    let Some((name, strength)) = lowered.split_once(':') else {
        return Ok((lowered, None));
    };

    let name = name.trim();
    if name != "exponential" {
        return Err(Error::ConfigError(format!("Easing '{name}' takes no strength")));
    }
    let strength: f64 = strength
        .trim()
        .parse()
        .map_err(|_| Error::ConfigError(format!("Invalid easing strength in '{arg}'")))?;
    Ok((name.to_string(), Some(strength)))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tracking: TrackingConfig::default(),
            controller: ControllerSettings::default(),
            frame: Dimensions::new(DEFAULT_FRAME_WIDTH, DEFAULT_FRAME_HEIGHT),
            viewport: None,
            output: OutputConfig::default(),
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            easing: "exponential".to_string(),
            strength: DEFAULT_EASING_STRENGTH,
            horizontal_range: DEFAULT_HORIZONTAL_RANGE,
            vertical_range: DEFAULT_VERTICAL_RANGE,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { sink: SinkKind::Log }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_yaml()?)?;

        Ok(())
    }

    /// Render the configuration as YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))
    }

    /// Apply command line overrides on top of this configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a size, sink or easing argument cannot be parsed.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) -> Result<()> {
        if let Some(threshold) = overrides.threshold {
            self.tracking.confidence_threshold = threshold;
        }
        if let Some(easing) = &overrides.easing {
            let (name, strength) = parse_easing_arg(easing)?;
            self.controller.easing = name;
            if let Some(strength) = strength {
                self.controller.strength = strength;
            }
        }
        if let Some(viewport) = &overrides.viewport {
            self.viewport = Some(parse_dimensions(viewport)?);
        }
        if let Some(frame) = &overrides.frame {
            self.frame = parse_dimensions(frame)?;
        }
        if let Some(sink) = &overrides.sink {
            self.output.sink = sink.parse()?;
        }
        Ok(())
    }

    /// Create the easing named by the configuration
    pub fn create_easing(&self) -> Result<Box<dyn Easing>> {
        let name = self.controller.easing.trim().to_lowercase();
        if name.contains(':') {
            return Err(Error::ConfigError(format!(
                "Easing '{name}' must be a plain name; set controller.strength instead"
            )));
        }
        match name.as_str() {
            "exponential" => Ok(Box::new(ExponentialEasing::new(self.controller.strength)?)),
            name => create_easing(name),
        }
    }

    /// Controller tuning from configuration
    pub fn controller_config(&self) -> Result<ControllerConfig> {
        Ok(ControllerConfig {
            horizontal_range: self.controller.horizontal_range,
            vertical_range: self.controller.vertical_range,
            easing: self.create_easing()?,
        })
    }

    /// Build a controller for the given viewport
    pub fn build_controller(&self, viewport: Dimensions) -> Result<PositionController> {
        PositionController::with_config(viewport, self.frame, self.controller_config()?)
    }

    /// Confidence gate from configuration
    pub fn confidence_gate(&self) -> Result<ConfidenceGate> {
        ConfidenceGate::new(self.tracking.confidence_threshold)
            .map_err(|e| Error::ConfigError(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.tracking.confidence_threshold) {
            return Err(Error::ConfigError(
                "Confidence threshold must be between 0.0 and 1.0".to_string(),
            ));
        }

        if !self.controller.strength.is_finite() || self.controller.strength < 1.0 {
            return Err(Error::ConfigError("Easing strength must be at least 1".to_string()));
        }
        self.controller_config()
            .and_then(|config| config.validate())
            .map_err(|e| match e {
                Error::ConfigError(_) => e,
                other => Error::ConfigError(other.to_string()),
            })?;

        if self.frame.width == 0 || self.frame.height == 0 {
            return Err(Error::ConfigError("Frame dimensions must be non-zero".to_string()));
        }
        if let Some(viewport) = self.viewport {
            if viewport.width == 0 || viewport.height == 0 {
                return Err(Error::ConfigError("Viewport dimensions must be non-zero".to_string()));
            }
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Face Follow Configuration

# Detection gating
tracking:
  confidence_threshold: 0.99

# Position controller
controller:
  easing: "exponential"
  strength: 30.0
  horizontal_range: 40.0
  vertical_range: 30.0

# Video frame size seen by the detector
frame:
  width: 320
  height: 240

# Viewport the tracked element moves in (omit to use the screen size with the cursor sink)
viewport:
  width: 1000
  height: 800

# Output: log, json or cursor
output:
  sink: "log"
"#;
