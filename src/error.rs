use std::convert::Infallible;
use std::io;

use crate::config::ConfigError;
use crate::display::DisplayError;
use crate::marker::DetectError;
use crate::video::VideoError;

/// Errors that stop the frame loop.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Video(#[from] VideoError),
    #[error(transparent)]
    Display(#[from] DisplayError),
    #[error("marker detection failed")]
    Detect(#[from] DetectError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to write frame report")]
    Report(#[source] io::Error),
}

impl From<Infallible> for PipelineError {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}
