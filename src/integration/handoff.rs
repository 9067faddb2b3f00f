//! Per-frame handoff between marker detection and fallback tracking.

use std::fmt;
use std::str::FromStr;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::frame::Frame;
use crate::marker::MarkerDetection;
use crate::tracker::{BoundingBox, TrackState, TrackerFactory, VisualTracker};

/// When trackers are re-seeded from the remembered boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReinitPolicy {
    /// Re-initialize every tracker on each tracking frame before updating.
    #[default]
    EveryFrame,
    /// Initialize once after markers are lost, then only update.
    Once,
}

impl ReinitPolicy {
    pub fn name(self) -> &'static str {
        match self {
            Self::EveryFrame => "every-frame",
            Self::Once => "once",
        }
    }
}

impl fmt::Display for ReinitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReinitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::EveryFrame, Self::Once]
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown re-init policy `{s}` (expected every-frame or once)"))
    }
}

/// Which component produced a frame's boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxSource {
    Detector,
    Tracker,
}

/// Authoritative boxes for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameOutcome {
    pub state: TrackState,
    pub source: BoxSource,
    pub boxes: Vec<BoundingBox>,
    /// At least one tracker reported a new position in this frame.
    pub track_updated: bool,
}

impl FrameOutcome {
    /// The two status lines drawn at the bottom of the frame.
    pub fn labels(&self, detector_name: &str, tracker_name: &str) -> [String; 2] {
        let source = match self.source {
            BoxSource::Detector => format!("Detector: {detector_name}"),
            BoxSource::Tracker => format!("Tracker: {tracker_name}"),
        };
        let tracking = if self.track_updated { "Yes" } else { "No" };
        [source, format!("Tracking: {tracking}")]
    }
}

struct Target<T> {
    seed: BoundingBox,
    tracker: Option<T>,
}

/// The detection/tracking state machine.
///
/// Markers always win: any frame with detections replaces the remembered
/// boxes and drops every tracker. The first frame without markers seeds one
/// tracker per remembered box and updates it right away; later frames only
/// advance them.
pub struct Handoff<F: TrackerFactory> {
    factory: F,
    policy: ReinitPolicy,
    last_known: Option<Vec<BoundingBox>>,
    first_track: bool,
    targets: Vec<Target<F::Tracker>>,
    state: TrackState,
}

impl<F: TrackerFactory> Handoff<F> {
    pub fn new(factory: F, policy: ReinitPolicy) -> Self {
        Self {
            factory,
            policy,
            last_known: None,
            first_track: false,
            targets: Vec::new(),
            state: TrackState::NoTarget,
        }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn policy(&self) -> ReinitPolicy {
        self.policy
    }

    /// State reached by the last [`Handoff::step`].
    pub fn state(&self) -> TrackState {
        self.state
    }

    /// Boxes from the most recent frame with detections.
    pub fn last_known(&self) -> Option<&[BoundingBox]> {
        self.last_known.as_deref()
    }

    pub fn first_track(&self) -> bool {
        self.first_track
    }

    /// Number of live tracker instances.
    pub fn tracker_count(&self) -> usize {
        self.targets.iter().filter(|t| t.tracker.is_some()).count()
    }

    /// Advance the state machine by one frame.
    pub fn step(&mut self, frame: &Frame, markers: &[MarkerDetection]) -> FrameOutcome {
        let outcome = if !markers.is_empty() {
            self.on_detected(markers)
        } else if self.last_known.is_none() {
            FrameOutcome {
                state: TrackState::NoTarget,
                source: BoxSource::Tracker,
                boxes: Vec::new(),
                track_updated: false,
            }
        } else if self.first_track {
            self.on_tracking_init(frame)
        } else {
            self.on_tracking(frame)
        };

        if outcome.state != self.state {
            info!("{:?} -> {:?} ({} boxes)", self.state, outcome.state, outcome.boxes.len());
        }
        self.state = outcome.state;
        outcome
    }

    fn on_detected(&mut self, markers: &[MarkerDetection]) -> FrameOutcome {
        let boxes: Vec<BoundingBox> = markers.iter().map(MarkerDetection::bounding_box).collect();
        self.last_known = Some(boxes.clone());
        self.first_track = true;
        self.targets.clear();
        FrameOutcome {
            state: TrackState::Detected,
            source: BoxSource::Detector,
            boxes,
            track_updated: false,
        }
    }

    /// Seed one tracker per remembered box, then update them on the same
    /// frame.
    fn on_tracking_init(&mut self, frame: &Frame) -> FrameOutcome {
        let seeds = self.last_known.clone().unwrap_or_default();
        self.targets = seeds
            .into_iter()
            .map(|seed| Target {
                seed,
                tracker: self.seeded_tracker(frame, seed),
            })
            .collect();
        self.first_track = false;

        let boxes = self.advance(frame, false);
        FrameOutcome {
            state: TrackState::TrackingInit,
            source: BoxSource::Tracker,
            track_updated: !boxes.is_empty(),
            boxes,
        }
    }

    fn on_tracking(&mut self, frame: &Frame) -> FrameOutcome {
        let boxes = self.advance(frame, self.policy == ReinitPolicy::EveryFrame);
        FrameOutcome {
            state: TrackState::Tracking,
            source: BoxSource::Tracker,
            track_updated: !boxes.is_empty(),
            boxes,
        }
    }

    /// Update every live tracker, re-seeding it first when `reseed` is set.
    /// Trackers that lose their target contribute no box.
    fn advance(&mut self, frame: &Frame, reseed: bool) -> Vec<BoundingBox> {
        let mut boxes = Vec::with_capacity(self.targets.len());
        for i in 0..self.targets.len() {
            if reseed {
                let seed = self.targets[i].seed;
                self.targets[i].tracker = self.seeded_tracker(frame, seed);
            }
            let target = &mut self.targets[i];
            let Some(tracker) = target.tracker.as_mut() else {
                continue;
            };
            match tracker.update(frame) {
                Some(bbox) => boxes.push(bbox),
                None => debug!("tracker for {:?} lost its target", target.seed),
            }
        }
        boxes
    }

    fn seeded_tracker(&self, frame: &Frame, seed: BoundingBox) -> Option<F::Tracker> {
        let mut tracker = self.factory.create();
        match tracker.init(frame, seed.normalized()) {
            Ok(()) => Some(tracker),
            Err(e) => {
                warn!("{} tracker init failed: {e}", self.factory.name());
                None
            }
        }
    }
}
