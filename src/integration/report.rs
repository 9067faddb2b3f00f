//! JSON Lines record of every processed frame.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use super::handoff::{BoxSource, FrameOutcome};
use crate::marker::MarkerDetection;
use crate::tracker::{BoundingBox, TrackState};

/// One line of the report.
#[derive(Debug, Serialize)]
pub struct FrameRecord<'a> {
    pub frame: u64,
    pub state: TrackState,
    pub source: BoxSource,
    pub labels: &'a [String],
    pub markers: &'a [MarkerDetection],
    pub boxes: &'a [BoundingBox],
}

impl<'a> FrameRecord<'a> {
    pub fn new(
        frame: u64,
        outcome: &'a FrameOutcome,
        markers: &'a [MarkerDetection],
        labels: &'a [String],
    ) -> Self {
        Self {
            frame,
            state: outcome.state,
            source: outcome.source,
            labels,
            markers,
            boxes: &outcome.boxes,
        }
    }
}

/// Writes one JSON object per frame.
pub struct FrameReporter {
    writer: Box<dyn Write>,
}

impl FrameReporter {
    pub fn new(writer: impl Write + 'static) -> Self {
        Self {
            writer: Box::new(writer),
        }
    }

    /// Create (or truncate) `path`.
    pub fn create(path: &Path) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }

    pub fn write(&mut self, record: &FrameRecord<'_>) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
