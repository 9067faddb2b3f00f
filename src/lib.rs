//! AprilTag detection with a visual-tracker fallback for video streams.
//!
//! Each frame is searched for markers. While markers are visible their
//! boxes are authoritative; once they vanish, one tracker per remembered box
//! keeps following the targets until detection reacquires them.

pub mod config;
pub mod display;
pub mod error;
pub mod frame;
pub mod integration;
pub mod marker;
pub mod overlay;
pub mod tracker;
pub mod video;

pub use config::{Config, ConfigError};
pub use display::{DirectorySink, DisplayError, FrameSink, NullSink, PpmStreamSink, Sink, SinkEvent};
pub use error::PipelineError;
pub use frame::Frame;
pub use integration::{
    BoxSource, FrameLoop, FrameOutcome, FrameReporter, Handoff, LoopOptions, ReinitPolicy,
    RunSummary, Termination,
};
pub use marker::{
    AprilTagDetector, DetectError, DetectorParams, MarkerDetection, MarkerDetector,
    MarkerDictionary, MarkerScan, render_marker,
};
pub use overlay::Overlay;
pub use tracker::{
    AnyTracker, BoundingBox, CorrelationParams, CorrelationTracker, MotionTracker, TrackState,
    TrackerError, TrackerFactory, TrackerKind, TrackerSettings, VisualTracker,
};
pub use video::{FrameSource, ImageSequence, PpmStream, VideoError, VideoSource};
