//! Tracker capability and kind selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::frame::Frame;
use crate::tracker::correlation::{CorrelationParams, CorrelationTracker};
use crate::tracker::motion::MotionTracker;
use crate::tracker::rect::BoundingBox;

/// Errors raised when a tracker cannot model a region.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("region {bbox:?} does not fit in a {width}x{height} frame")]
    InvalidRegion {
        bbox: BoundingBox,
        width: u32,
        height: u32,
    },
    #[error("region {0:?} has no texture to track")]
    Featureless(BoundingBox),
    #[error("unknown tracker kind `{0}`")]
    UnknownKind(String),
}

/// A stateful single-target visual tracker.
pub trait VisualTracker {
    /// Establish a model for `bbox` on `frame`, replacing any previous one.
    fn init(&mut self, frame: &Frame, bbox: BoundingBox) -> Result<(), TrackerError>;

    /// Advance the model one frame. `None` means the target was not found.
    fn update(&mut self, frame: &Frame) -> Option<BoundingBox>;
}

/// Creates trackers for the frame loop.
pub trait TrackerFactory {
    type Tracker: VisualTracker;

    fn create(&self) -> Self::Tracker;

    /// Name shown in the overlay while trackers drive the boxes.
    fn name(&self) -> &str;
}

/// Tracker implementations, selected by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackerKind {
    /// Correlation template tracker.
    #[default]
    Kcf,
    /// Correlation tracker with a constant-velocity motion prior.
    Kalman,
}

impl TrackerKind {
    pub const ALL: [TrackerKind; 2] = [Self::Kcf, Self::Kalman];

    pub fn name(self) -> &'static str {
        match self {
            Self::Kcf => "kcf",
            Self::Kalman => "kalman",
        }
    }
}

impl fmt::Display for TrackerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TrackerKind {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| TrackerError::UnknownKind(s.to_string()))
    }
}

/// One tracker of any kind.
#[derive(Debug, Clone)]
pub enum AnyTracker {
    Correlation(CorrelationTracker),
    Motion(MotionTracker),
}

impl VisualTracker for AnyTracker {
    fn init(&mut self, frame: &Frame, bbox: BoundingBox) -> Result<(), TrackerError> {
        match self {
            Self::Correlation(t) => t.init(frame, bbox),
            Self::Motion(t) => t.init(frame, bbox),
        }
    }

    fn update(&mut self, frame: &Frame) -> Option<BoundingBox> {
        match self {
            Self::Correlation(t) => t.update(frame),
            Self::Motion(t) => t.update(frame),
        }
    }
}

/// Kind plus parameters; builds [`AnyTracker`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackerSettings {
    pub kind: TrackerKind,
    pub correlation: CorrelationParams,
}

impl TrackerSettings {
    pub fn new(kind: TrackerKind, correlation: CorrelationParams) -> Self {
        Self { kind, correlation }
    }
}

impl TrackerFactory for TrackerSettings {
    type Tracker = AnyTracker;

    fn create(&self) -> AnyTracker {
        match self.kind {
            TrackerKind::Kcf => AnyTracker::Correlation(CorrelationTracker::new(self.correlation.clone())),
            TrackerKind::Kalman => AnyTracker::Motion(MotionTracker::new(self.correlation.clone())),
        }
    }

    fn name(&self) -> &str {
        self.kind.name()
    }
}
