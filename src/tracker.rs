//! Per-session tracking pipeline.
//!
//! A [`Tracker`] owns one detector, one confidence gate and one position
//! controller. For every frame it runs the detector, keeps the first face if
//! it is confident enough, reduces it to feature midpoints, notifies the face
//! handlers, eases the controller and hands the new position to every sink.
//! Frames without a qualifying face leave the position where it was.

use crate::{
    controller::{Position, PositionController},
    detector::{ConfidenceGate, FaceDetector},
    features::{reduce, FeatureMidpoints},
    sink::PositionSink,
    source::FrameSource,
    Error, Result,
};
use log::{debug, info, warn};

/// Callback notified with the midpoints of every accepted face
pub type FaceHandler = Box<dyn FnMut(&FeatureMidpoints)>;

/// What happened to a single frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// A face was accepted and the controller moved to this position
    Tracked(Position),
    /// The detector found no face
    NoFace,
    /// The first face did not clear the confidence threshold
    BelowThreshold {
        /// Probability the detector reported
        confidence: f64,
    },
}

/// Frame counters for one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackerStats {
    /// Frames handed to the tracker
    pub frames: u64,
    /// Frames that moved the controller
    pub tracked: u64,
    /// Frames without a qualifying face
    pub skipped: u64,
    /// Frames whose accepted detection broke the detector contract
    pub malformed: u64,
    /// Frames on which the detector failed
    pub detector_errors: u64,
}

/// Face-following session
pub struct Tracker<D: FaceDetector> {
    detector: D,
    gate: ConfidenceGate,
    controller: PositionController,
    face_handlers: Vec<FaceHandler>,
    sinks: Vec<Box<dyn PositionSink>>,
    stats: TrackerStats,
}

impl<D: FaceDetector> Tracker<D> {
    /// Assemble a session
    pub fn new(detector: D, gate: ConfidenceGate, controller: PositionController) -> Self {
        info!("Tracker ready, confidence threshold {}", gate.threshold());
        Self {
            detector,
            gate,
            controller,
            face_handlers: Vec::new(),
            sinks: Vec::new(),
            stats: TrackerStats::default(),
        }
    }

    /// Register a handler for accepted faces
    pub fn on_face<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&FeatureMidpoints) + 'static,
    {
        self.face_handlers.push(Box::new(handler));
        self
    }

    /// Register a consumer of the controller output
    pub fn add_sink<S>(&mut self, sink: S) -> &mut Self
    where
        S: PositionSink + 'static,
    {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Current eased position
    #[must_use]
    pub const fn position(&self) -> Position {
        self.controller.position()
    }

    /// The session's controller
    #[must_use]
    pub const fn controller(&self) -> &PositionController {
        &self.controller
    }

    /// Mutable access to the controller, e.g. to follow a viewport resize
    pub fn controller_mut(&mut self) -> &mut PositionController {
        &mut self.controller
    }

    /// Counters so far
    #[must_use]
    pub const fn stats(&self) -> TrackerStats {
        self.stats
    }

    /// Process one frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DetectorError`] when detection fails,
    /// [`Error::MalformedDetection`] when the accepted face breaks the
    /// detector contract, and any error raised by a sink. The position is
    /// left unchanged in the first two cases.
    pub fn process_frame(&mut self, frame: &D::Frame) -> Result<FrameOutcome> {
        self.stats.frames += 1;

        let detections = match self.detector.estimate_faces(frame) {
            Ok(detections) => detections,
            Err(e) => {
                self.stats.detector_errors += 1;
                return Err(match e {
                    Error::DetectorError(_) => e,
                    other => Error::DetectorError(other.to_string()),
                });
            }
        };

        let Some(detection) = self.gate.select(&detections) else {
            self.stats.skipped += 1;
            return Ok(detections.first().map_or(FrameOutcome::NoFace, |first| {
                debug!("Face below threshold: {:.4}", first.confidence());
                FrameOutcome::BelowThreshold {
                    confidence: first.confidence(),
                }
            }));
        };

        if let Err(e) = detection.validate() {
            self.stats.malformed += 1;
            return Err(e);
        }

        let features = reduce(detection);
        for handler in &mut self.face_handlers {
            handler(&features);
        }

        let position = self.controller.sync(&features);
        self.stats.tracked += 1;
        for sink in &mut self.sinks {
            sink.render(position)?;
        }

        Ok(FrameOutcome::Tracked(position))
    }

    /// Drive the session until the source runs dry.
    ///
    /// Detector failures and malformed detections drop only the frame they
    /// occur in; the next frame supersedes it.
    ///
    /// # Errors
    ///
    /// Returns source and sink errors.
    pub fn run<S>(&mut self, source: &mut S) -> Result<TrackerStats>
    where
        S: FrameSource<Frame = D::Frame> + ?Sized,
    {
        info!("Starting tracking loop");

        while let Some(frame) = source.next_frame()? {
            match self.process_frame(&frame) {
                Ok(_) => {}
                Err(e @ (Error::DetectorError(_) | Error::MalformedDetection(_))) => {
                    warn!("Skipping frame {}: {}", self.stats.frames, e);
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "Tracking finished: {} frames, {} tracked, {} skipped, {} malformed, {} detector errors",
            self.stats.frames,
            self.stats.tracked,
            self.stats.skipped,
            self.stats.malformed,
            self.stats.detector_errors
        );
        Ok(self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{controller::Dimensions, features::Point, features::RawDetection};
    use std::{cell::RefCell, rc::Rc};

    struct FixedDetector(Vec<RawDetection>);

    impl FaceDetector for FixedDetector {
        type Frame = ();

        fn estimate_faces(&mut self, _frame: &()) -> Result<Vec<RawDetection>> {
            Ok(self.0.clone())
        }
    }

    struct FailingDetector;

    impl FaceDetector for FailingDetector {
        type Frame = ();

        fn estimate_faces(&mut self, _frame: &()) -> Result<Vec<RawDetection>> {
            Err(Error::InvalidInput("no model".to_string()))
        }
    }

    fn face(probability: f64) -> RawDetection {
        RawDetection {
            top_left: Point::new(100.0, 100.0),
            bottom_right: Point::new(200.0, 200.0),
            probability: vec![probability],
            landmarks: vec![Point::new(150.0, 150.0); 6],
        }
    }

    fn tracker<D: FaceDetector>(detector: D) -> Tracker<D> {
        let controller = PositionController::new(Dimensions::new(1000, 800), Dimensions::new(320, 240));
        Tracker::new(detector, ConfidenceGate::default(), controller)
    }

    #[test]
    fn test_tracked_frame_notifies_handlers_and_sinks() {
        let faces = Rc::new(RefCell::new(Vec::new()));
        let positions = Rc::new(RefCell::new(Vec::new()));

        let mut tracker = tracker(FixedDetector(vec![face(0.999)]));
        let seen_faces = Rc::clone(&faces);
        let seen_positions = Rc::clone(&positions);
        tracker
            .on_face(move |features| seen_faces.borrow_mut().push(*features))
            .add_sink(move |position: Position| -> Result<()> {
                seen_positions.borrow_mut().push(position);
                Ok(())
            });

        let outcome = tracker.process_frame(&()).unwrap();
        let FrameOutcome::Tracked(position) = outcome else {
            panic!("expected a tracked frame, got {outcome:?}");
        };

        assert_eq!(faces.borrow().len(), 1);
        assert_eq!(faces.borrow()[0].face, Point::new(150.0, 150.0));
        assert_eq!(*positions.borrow(), vec![position]);
        assert_eq!(tracker.position(), position);
        assert_eq!(tracker.stats().tracked, 1);
    }

    #[test]
    fn test_below_threshold_holds_position() {
        let mut tracker = tracker(FixedDetector(vec![face(0.99)]));
        let outcome = tracker.process_frame(&()).unwrap();
        assert_eq!(outcome, FrameOutcome::BelowThreshold { confidence: 0.99 });
        assert_eq!(tracker.position(), Position::ORIGIN);
        assert_eq!(tracker.stats().skipped, 1);
    }

    #[test]
    fn test_no_face() {
        let mut tracker = tracker(FixedDetector(Vec::new()));
        assert_eq!(tracker.process_frame(&()).unwrap(), FrameOutcome::NoFace);
    }

    #[test]
    fn test_malformed_detection_is_reported() {
        let mut broken = face(0.999);
        broken.landmarks.truncate(2);
        let mut tracker = tracker(FixedDetector(vec![broken]));

        let err = tracker.process_frame(&()).unwrap_err();
        assert!(matches!(err, Error::MalformedDetection(_)));
        assert_eq!(tracker.position(), Position::ORIGIN);
        assert_eq!(tracker.stats().malformed, 1);
    }

    #[test]
    fn test_detector_errors_are_wrapped() {
        let mut tracker = tracker(FailingDetector);
        let err = tracker.process_frame(&()).unwrap_err();
        assert!(matches!(err, Error::DetectorError(_)));
        assert_eq!(tracker.stats().detector_errors, 1);
    }

    #[test]
    fn test_sink_error_propagates() {
        let mut tracker = tracker(FixedDetector(vec![face(0.999)]));
        tracker.add_sink(|_position: Position| -> Result<()> { Err(Error::CursorControl("gone".to_string())) });
        assert!(matches!(tracker.process_frame(&()), Err(Error::CursorControl(_))));

        // The controller already moved, so the frame still counts as tracked
        assert_ne!(tracker.position(), Position::ORIGIN);
        assert_eq!(tracker.stats().tracked, 1);
        assert_eq!(tracker.stats().frames, 1);
    }

    #[test]
    fn test_out_of_range_probability_is_malformed() {
        for probability in [7.5, f64::INFINITY] {
            let mut tracker = tracker(FixedDetector(vec![face(probability)]));
            let err = tracker.process_frame(&()).unwrap_err();
            assert!(matches!(err, Error::MalformedDetection(_)));
            assert_eq!(tracker.position(), Position::ORIGIN);
            assert_eq!(tracker.stats().malformed, 1);
            assert_eq!(tracker.stats().tracked, 0);
        }
    }
}
