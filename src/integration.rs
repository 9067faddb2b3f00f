//! Connects marker detection, fallback tracking, video input and display.
//!
//! [`Handoff`] is the pure per-frame state machine; [`FrameLoop`] drives it
//! with frames from a [`FrameSource`](crate::video::FrameSource) and hands
//! the annotated result to a [`FrameSink`](crate::display::FrameSink).

mod handoff;
mod pipeline;
mod report;

pub use handoff::{BoxSource, FrameOutcome, Handoff, ReinitPolicy};
pub use pipeline::{DEFAULT_RESIZE_WIDTH, FrameLoop, LoopOptions, RunSummary, Termination};
pub use report::{FrameRecord, FrameReporter};
