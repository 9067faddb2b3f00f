use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use image::ImageFormat;

use super::{FrameSource, VideoError};
use crate::frame::Frame;

/// Still images played back as frames, in file-name order.
#[derive(Debug, Clone, Default)]
pub struct ImageSequence {
    paths: VecDeque<PathBuf>,
}

impl ImageSequence {
    pub fn from_paths(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            paths: paths.into_iter().collect(),
        }
    }

    /// Every file in `dir` with a recognised image extension.
    pub fn from_dir(dir: &Path) -> Result<Self, VideoError> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && ImageFormat::from_path(&path).is_ok() {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(Self::from_paths(paths))
    }

    pub fn from_file(path: &Path) -> Self {
        Self::from_paths([path.to_path_buf()])
    }

    /// Frames not yet read.
    pub fn remaining(&self) -> usize {
        self.paths.len()
    }
}

impl FrameSource for ImageSequence {
    fn next_frame(&mut self) -> Result<Option<Frame>, VideoError> {
        let Some(path) = self.paths.pop_front() else {
            return Ok(None);
        };
        let image = image::open(&path).map_err(|source| VideoError::Decode { path, source })?;
        Ok(Some(Frame::new(image.to_rgb8())))
    }

    fn release(&mut self) {
        self.paths.clear();
    }
}
