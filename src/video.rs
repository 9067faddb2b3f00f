//! Frame sources.

mod ppm;
mod sequence;

use std::fs::File;
use std::io::{self, BufReader, StdinLock};
use std::path::{Path, PathBuf};

use log::info;

use crate::frame::Frame;

pub use ppm::PpmStream;
pub use sequence::ImageSequence;

/// Errors raised while reading frames.
#[derive(thiserror::Error, Debug)]
pub enum VideoError {
    #[error("video source {0} does not exist")]
    NotFound(PathBuf),
    #[error("failed to read video source")]
    Io(#[from] io::Error),
    #[error("malformed PPM frame {frame}")]
    MalformedFrame {
        frame: u64,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to decode image {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Anything that yields frames one at a time.
pub trait FrameSource {
    /// Next frame, or `None` once the stream is exhausted.
    fn next_frame(&mut self) -> Result<Option<Frame>, VideoError>;

    /// Close the underlying handle. Later calls to `next_frame` return `None`.
    fn release(&mut self) {}
}

/// Video sources the command line can open.
pub enum VideoSource {
    /// PPM frames piped on stdin, the live camera path.
    Stdin(PpmStream<StdinLock<'static>>),
    PpmFile(PpmStream<BufReader<File>>),
    Images(ImageSequence),
}

impl VideoSource {
    /// Open `path`, or stdin when no path is given.
    ///
    /// Directories are read as sorted image sequences and `.ppm`/`.pnm`
    /// files as frame streams. Any other file is a single still image.
    pub fn open(path: Option<&Path>) -> Result<Self, VideoError> {
        let Some(path) = path else {
            return Ok(Self::camera());
        };
        if !path.exists() {
            return Err(VideoError::NotFound(path.to_path_buf()));
        }

        let source = if path.is_dir() {
            Self::Images(ImageSequence::from_dir(path)?)
        } else if is_ppm_stream(path) {
            Self::PpmFile(PpmStream::new(BufReader::new(File::open(path)?)))
        } else {
            Self::Images(ImageSequence::from_file(path))
        };
        info!("opened {} {}", source.kind(), path.display());
        Ok(source)
    }

    /// Live frames from stdin.
    pub fn camera() -> Self {
        info!("reading PPM frames from stdin");
        Self::Stdin(PpmStream::new(io::stdin().lock()))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Stdin(_) => "camera stream",
            Self::PpmFile(_) => "PPM stream",
            Self::Images(_) => "image sequence",
        }
    }
}

impl FrameSource for VideoSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, VideoError> {
        match self {
            Self::Stdin(s) => s.next_frame(),
            Self::PpmFile(s) => s.next_frame(),
            Self::Images(s) => s.next_frame(),
        }
    }

    fn release(&mut self) {
        match self {
            Self::Stdin(s) => s.release(),
            Self::PpmFile(s) => s.release(),
            Self::Images(s) => s.release(),
        }
    }
}

fn is_ppm_stream(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("ppm") || e.eq_ignore_ascii_case("pnm"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_is_not_found() {
        let err = VideoSource::open(Some(Path::new("/definitely/not/here.ppm")))
            .err()
            .unwrap();
        assert!(matches!(err, VideoError::NotFound(_)));
    }

    #[test]
    fn ppm_extension_selects_stream() {
        assert!(is_ppm_stream(Path::new("clip.PPM")));
        assert!(is_ppm_stream(Path::new("a/b.pnm")));
        assert!(!is_ppm_stream(Path::new("frame.png")));
        assert!(!is_ppm_stream(Path::new("noext")));
    }
}
