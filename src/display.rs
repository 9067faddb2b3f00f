//! Frame sinks: where annotated frames go.

use std::fs;
use std::io::{self, BufWriter, ErrorKind, Stdout, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::frame::Frame;

/// Errors raised while presenting frames.
#[derive(thiserror::Error, Debug)]
pub enum DisplayError {
    #[error("failed to write frame")]
    Io(#[from] io::Error),
    #[error("failed to save frame {path}")]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to load font {path}")]
    Font {
        path: PathBuf,
        #[source]
        source: ab_glyph::InvalidFont,
    },
}

/// What the viewer asked for after a frame was shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkEvent {
    Continue,
    Quit,
}

/// Presents annotated frames.
pub trait FrameSink {
    /// Show `frame`; `index` counts from 1.
    fn present(&mut self, frame: &Frame, index: u64) -> Result<SinkEvent, DisplayError>;

    fn close(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }
}

/// Writes P6 frames for a viewer such as `ffplay -f image2pipe -i -`.
///
/// The viewer closing its end of the pipe is the quit signal.
pub struct PpmStreamSink<W: Write> {
    writer: W,
    closed: bool,
}

impl<W: Write> PpmStreamSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            closed: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_frame(&mut self, frame: &Frame) -> io::Result<()> {
        write!(self.writer, "P6\n{} {}\n255\n", frame.width(), frame.height())?;
        self.writer.write_all(frame.image().as_raw())?;
        self.writer.flush()
    }
}

impl PpmStreamSink<BufWriter<Stdout>> {
    pub fn stdout() -> Self {
        Self::new(BufWriter::new(io::stdout()))
    }
}

impl<W: Write> FrameSink for PpmStreamSink<W> {
    fn present(&mut self, frame: &Frame, _index: u64) -> Result<SinkEvent, DisplayError> {
        if self.closed {
            return Ok(SinkEvent::Quit);
        }
        match self.write_frame(frame) {
            Ok(()) => Ok(SinkEvent::Continue),
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                info!("viewer closed the stream");
                self.closed = true;
                Ok(SinkEvent::Quit)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn close(&mut self) -> Result<(), DisplayError> {
        if self.closed {
            return Ok(());
        }
        match self.writer.flush() {
            Err(e) if e.kind() != ErrorKind::BrokenPipe => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Saves each frame as `frame_NNNNNN.png` in a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    written: u64,
}

impl DirectorySink {
    /// Creates `dir` if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, DisplayError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, written: 0 })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn frame_path(&self, index: u64) -> PathBuf {
        self.dir.join(format!("frame_{index:06}.png"))
    }
}

impl FrameSink for DirectorySink {
    fn present(&mut self, frame: &Frame, index: u64) -> Result<SinkEvent, DisplayError> {
        let path = self.frame_path(index);
        frame
            .image()
            .save(&path)
            .map_err(|source| DisplayError::Save { path, source })?;
        self.written += 1;
        Ok(SinkEvent::Continue)
    }

    fn close(&mut self) -> Result<(), DisplayError> {
        debug!("wrote {} frames to {}", self.written, self.dir.display());
        Ok(())
    }
}

/// Discards frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _frame: &Frame, _index: u64) -> Result<SinkEvent, DisplayError> {
        Ok(SinkEvent::Continue)
    }
}

/// Sinks the command line can select.
pub enum Sink {
    Stream(PpmStreamSink<BufWriter<Stdout>>),
    Directory(DirectorySink),
    Null(NullSink),
}

impl FrameSink for Sink {
    fn present(&mut self, frame: &Frame, index: u64) -> Result<SinkEvent, DisplayError> {
        match self {
            Self::Stream(s) => s.present(frame, index),
            Self::Directory(s) => s.present(frame, index),
            Self::Null(s) => s.present(frame, index),
        }
    }

    fn close(&mut self) -> Result<(), DisplayError> {
        match self {
            Self::Stream(s) => s.close(),
            Self::Directory(s) => s.close(),
            Self::Null(s) => s.close(),
        }
    }
}
