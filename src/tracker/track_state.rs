use serde::Serialize;

/// Where the detection/tracking handoff stands after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackState {
    /// Nothing has ever been detected
    #[default]
    NoTarget,
    /// Markers were detected in this frame
    Detected,
    /// Markers vanished; trackers were seeded from the last detection
    TrackingInit,
    /// Trackers advanced over a frame without markers
    Tracking,
}
