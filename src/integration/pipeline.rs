//! FrameLoop for combining marker detection with fallback tracking.

use log::{debug, info};

use super::handoff::{FrameOutcome, Handoff};
use super::report::{FrameRecord, FrameReporter};
use crate::display::{DisplayError, FrameSink, SinkEvent};
use crate::error::PipelineError;
use crate::frame::Frame;
use crate::marker::MarkerDetector;
use crate::overlay::Overlay;
use crate::tracker::{TrackState, TrackerFactory};
use crate::video::FrameSource;

/// Width frames are scaled to before detection.
pub const DEFAULT_RESIZE_WIDTH: u32 = 750;

/// Loop tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopOptions {
    /// `None` processes frames at their native size.
    pub resize_width: Option<u32>,
    /// Stop after this many frames.
    pub max_frames: Option<u64>,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            resize_width: Some(DEFAULT_RESIZE_WIDTH),
            max_frames: None,
        }
    }
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Termination {
    #[default]
    EndOfStream,
    Quit,
    FrameLimit,
}

/// Counters for a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub frames: u64,
    /// Frames in which markers were detected.
    pub detected_frames: u64,
    /// Frames without markers in which at least one tracker updated.
    pub tracked_frames: u64,
    pub termination: Termination,
}

/// A frame loop that bundles a video source, a marker detector, the
/// detection/tracking handoff and a display sink.
pub struct FrameLoop<S, D, F, K>
where
    S: FrameSource,
    D: MarkerDetector,
    F: TrackerFactory,
    K: FrameSink,
{
    source: S,
    detector: D,
    handoff: Handoff<F>,
    sink: K,
    overlay: Overlay,
    options: LoopOptions,
    report: Option<FrameReporter>,
    frame_index: u64,
}

impl<S, D, F, K> FrameLoop<S, D, F, K>
where
    S: FrameSource,
    D: MarkerDetector,
    F: TrackerFactory,
    K: FrameSink,
    PipelineError: From<D::Error>,
{
    pub fn new(source: S, detector: D, handoff: Handoff<F>, sink: K) -> Self {
        Self {
            source,
            detector,
            handoff,
            sink,
            overlay: Overlay::new(),
            options: LoopOptions::default(),
            report: None,
            frame_index: 0,
        }
    }

    pub fn with_options(mut self, options: LoopOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_overlay(mut self, overlay: Overlay) -> Self {
        self.overlay = overlay;
        self
    }

    pub fn with_report(mut self, report: FrameReporter) -> Self {
        self.report = Some(report);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn handoff(&self) -> &Handoff<F> {
        &self.handoff
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Resize, detect, advance the handoff and draw the overlay.
    ///
    /// Returns the annotated frame and the boxes that drove it.
    pub fn process_frame(&mut self, frame: Frame) -> Result<(Frame, FrameOutcome), PipelineError> {
        self.frame_index += 1;
        let mut frame = match self.options.resize_width {
            Some(width) => frame.resized_to_width(width),
            None => frame,
        };

        let scan = self.detector.detect(&frame)?;
        if !scan.rejected.is_empty() {
            debug!("frame {}: {} rejected candidates", self.frame_index, scan.rejected.len());
        }
        let outcome = self.handoff.step(&frame, &scan.markers);
        let labels = outcome.labels(self.detector.name(), self.handoff.factory().name());
        debug!(
            "frame {}: {} | {} | {} boxes",
            self.frame_index,
            labels[0],
            labels[1],
            outcome.boxes.len()
        );

        self.overlay
            .annotate(frame.image_mut(), &scan.markers, &outcome, &labels);
        if let Some(report) = self.report.as_mut() {
            report
                .write(&FrameRecord::new(self.frame_index, &outcome, &scan.markers, &labels))
                .map_err(PipelineError::Report)?;
        }
        Ok((frame, outcome))
    }

    /// Process frames until the stream ends, the viewer quits or the frame
    /// limit is hit. The source is released however the loop exits.
    pub fn run(&mut self) -> Result<RunSummary, PipelineError> {
        let result = self.run_frames();
        self.source.release();
        if let Ok(summary) = &result {
            info!(
                "stream stopped after {} frames ({:?}): {} detected, {} tracked",
                summary.frames, summary.termination, summary.detected_frames, summary.tracked_frames
            );
        }
        result
    }

    fn run_frames(&mut self) -> Result<RunSummary, PipelineError> {
        let mut summary = RunSummary::default();
        let result = self.pump(&mut summary);

        // Close and flush on every exit; the first error wins.
        let closed = self.sink.close().map_err(<PipelineError as From<DisplayError>>::from);
        let flushed = match self.report.as_mut() {
            Some(report) => report.flush().map_err(PipelineError::Report),
            None => Ok(()),
        };
        result.and(closed).and(flushed)?;
        Ok(summary)
    }

    fn pump(&mut self, summary: &mut RunSummary) -> Result<(), PipelineError> {
        loop {
            if self.options.max_frames.is_some_and(|max| summary.frames >= max) {
                summary.termination = Termination::FrameLimit;
                return Ok(());
            }
            let Some(frame) = self.source.next_frame()? else {
                summary.termination = Termination::EndOfStream;
                return Ok(());
            };

            let (frame, outcome) = self.process_frame(frame)?;
            summary.frames += 1;
            match outcome.state {
                TrackState::Detected => summary.detected_frames += 1,
                TrackState::TrackingInit | TrackState::Tracking if outcome.track_updated => {
                    summary.tracked_frames += 1
                }
                _ => {}
            }

            if self.sink.present(&frame, self.frame_index)? == SinkEvent::Quit {
                summary.termination = Termination::Quit;
                return Ok(());
            }
        }
    }
}
