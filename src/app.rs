//! Main application module for face following.
//!
//! Wires a [`Config`] into a replay-driven [`Tracker`] with the configured
//! position sink.

use crate::{
    config::{Config, SinkKind},
    constants::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH},
    controller::{Dimensions, Position},
    cursor_control::CursorSink,
    error::Result,
    replay::{RecordedDetector, ReplaySource},
    sink::{JsonLinesSink, LogSink},
    tracker::{Tracker, TrackerStats},
};
use log::{debug, info};
use std::{io, path::PathBuf};

/// Where recorded detections come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectionInput {
    /// JSON Lines on standard input
    Stdin,
    /// JSON Lines file
    File(PathBuf),
}

impl DetectionInput {
    /// `-` means standard input, anything else is a path
    #[must_use]
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Self::Stdin
        } else {
            Self::File(PathBuf::from(arg))
        }
    }

    fn open(&self) -> Result<ReplaySource> {
        match self {
            Self::Stdin => Ok(ReplaySource::stdin()),
            Self::File(path) => ReplaySource::open(path),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Recorded detections to follow
    pub input: DetectionInput,
    /// Tracking, controller and output settings
    pub config: Config,
}

/// Main application struct
pub struct FaceFollowApp {
    tracker: Tracker<RecordedDetector>,
    source: ReplaySource,
}

impl FaceFollowApp {
    /// Create a new face-follow application
    pub fn new(app_config: AppConfig) -> Result<Self> {
        info!("Initializing face-follow application");

        let AppConfig { input, config } = app_config;
        config.validate()?;

        let cursor = match config.output.sink {
            SinkKind::Cursor => Some(CursorSink::new()?),
            SinkKind::Log | SinkKind::Json => None,
        };

        let viewport = config
            .viewport
            .or_else(|| cursor.as_ref().map(CursorSink::screen_dimensions))
            .unwrap_or(Dimensions::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT));
        info!("Viewport {}, frame {}, sink {}", viewport, config.frame, config.output.sink);

        let controller = config.build_controller(viewport)?;
        let mut tracker = Tracker::new(RecordedDetector, config.confidence_gate()?, controller);

        tracker.on_face(|features| debug!("face center axis x: {:.2}", features.face.x));

        match cursor {
            Some(cursor) => {
                let center = Position::new(f64::from(config.frame.width) / 2.0, f64::from(config.frame.height) / 2.0);
                tracker.add_sink(cursor.with_anchor_offset(center));
            }
            None if config.output.sink == SinkKind::Json => {
                tracker.add_sink(JsonLinesSink::new(io::stdout()));
            }
            None => {
                tracker.add_sink(LogSink);
            }
        }

        let source = input.open()?;

        Ok(Self { tracker, source })
    }

    /// Run until the recording ends
    pub fn run(&mut self) -> Result<TrackerStats> {
        self.tracker.run(&mut self.source)
    }

    /// Final eased position
    #[must_use]
    pub const fn position(&self) -> Position {
        self.tracker.position()
    }
}
