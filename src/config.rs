//! Runtime configuration loaded from JSON.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::integration::{DEFAULT_RESIZE_WIDTH, LoopOptions, ReinitPolicy};
use crate::marker::{DetectorParams, MarkerDictionary};
use crate::tracker::{CorrelationParams, TrackerKind, TrackerSettings};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Everything the frame loop can be tuned with. Missing fields take their
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dictionary: MarkerDictionary,
    pub tracker: TrackerKind,
    pub reinit: ReinitPolicy,
    /// `null` keeps frames at their native size.
    pub resize_width: Option<u32>,
    pub max_frames: Option<u64>,
    pub detector: DetectorParams,
    pub correlation: CorrelationParams,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary: MarkerDictionary::default(),
            tracker: TrackerKind::default(),
            reinit: ReinitPolicy::default(),
            resize_width: Some(DEFAULT_RESIZE_WIDTH),
            max_frames: None,
            detector: DetectorParams::default(),
            correlation: CorrelationParams::default(),
        }
    }
}

impl Config {
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resize_width == Some(0) {
            return Err(ConfigError::Invalid("resize_width must be positive".into()));
        }
        let c = &self.correlation;
        if !(-1.0..=1.0).contains(&c.min_score) {
            return Err(ConfigError::Invalid(format!(
                "correlation.min_score {} is outside [-1, 1]",
                c.min_score
            )));
        }
        if !(0.0..=1.0).contains(&c.learning_rate) {
            return Err(ConfigError::Invalid(format!(
                "correlation.learning_rate {} is outside [0, 1]",
                c.learning_rate
            )));
        }
        if c.search_margin < 0.0 {
            return Err(ConfigError::Invalid("correlation.search_margin is negative".into()));
        }
        if self.detector.threshold_radius == 0 {
            return Err(ConfigError::Invalid("detector.threshold_radius must be positive".into()));
        }
        Ok(())
    }

    pub fn tracker_settings(&self) -> TrackerSettings {
        TrackerSettings::new(self.tracker, self.correlation.clone())
    }

    pub fn loop_options(&self) -> LoopOptions {
        LoopOptions {
            resize_width: self.resize_width,
            max_frames: self.max_frames,
        }
    }
}
