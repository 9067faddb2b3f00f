mod correlation;
mod kalman_filter;
mod kind;
mod motion;
mod rect;
mod track_state;

pub use correlation::{CorrelationParams, CorrelationTracker, Match};
pub use kalman_filter::KalmanFilter;
pub use kind::{AnyTracker, TrackerError, TrackerFactory, TrackerKind, TrackerSettings, VisualTracker};
pub use motion::MotionTracker;
pub use rect::BoundingBox;
pub use track_state::TrackState;
