//! Run configuration loaded from JSON.
//!
//! Every field has a default, so a config file only needs the values it
//! changes and no file at all reproduces the stock run.

use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use vox_driver::sampling::{DEFAULT_MAX_INDEX, DEFAULT_MIN_SPACING};
use vox_driver::{DriverConfig, SamplingConfig, Schedule};

/// Bridge program started when no backend is configured
pub const DEFAULT_BRIDGE: &str = "boxm_batch_bridge";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// XML scene descriptor
    pub scene_config: PathBuf,
    /// Directory of camera transform files
    pub camera_dir: PathBuf,
    pub camera_ext: String,
    /// Directory of images, index-aligned with the cameras
    pub image_dir: PathBuf,
    pub image_ext: String,
    /// Raw occupancy output path
    pub output: PathBuf,
    pub sampling: SamplingSection,
    pub schedule: ScheduleSection,
    pub backend: BackendConfig,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scene_config: PathBuf::from(vox_driver::config::DEFAULT_SCENE_CONFIG),
            camera_dir: PathBuf::from("Z:/video/dec/CapitolSiteHigh/cameras_KRT"),
            camera_ext: "txt".to_string(),
            image_dir: PathBuf::from("Z:/video/dec/CapitolSiteHigh/video"),
            image_ext: "png".to_string(),
            output: PathBuf::from(vox_driver::config::DEFAULT_OUTPUT),
            sampling: SamplingSection::default(),
            schedule: ScheduleSection::default(),
            backend: BackendConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Frame sampling parameters
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SamplingSection {
    pub min_spacing: u32,
    pub max_index: u32,
    pub seed: Option<u64>,
}

impl Default for SamplingSection {
    fn default() -> Self {
        Self {
            min_spacing: DEFAULT_MIN_SPACING,
            max_index: DEFAULT_MAX_INDEX,
            seed: None,
        }
    }
}

/// Iteration bounds (`start..nframes` by `step`)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScheduleSection {
    pub start: u32,
    pub nframes: u32,
    pub step: u32,
}

impl Default for ScheduleSection {
    fn default() -> Self {
        let schedule = Schedule::default();
        Self {
            start: schedule.start,
            nframes: schedule.nframes,
            step: schedule.step,
        }
    }
}

/// How to reach the batch library
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendConfig {
    /// Start a bridge program and speak the protocol over its stdio
    Bridge {
        program: String,
        #[serde(default)]
        args: Vec<String>,
    },
    /// Connect to a batch server
    Tcp { address: String },
    /// Record calls without a library
    DryRun,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig::Bridge {
            program: DEFAULT_BRIDGE.to_string(),
            args: Vec::new(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| AppError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Driver settings derived from this configuration
    pub fn driver_config(&self) -> DriverConfig {
        DriverConfig {
            scene_config: self.scene_config.clone(),
            output: self.output.clone(),
            sampling: SamplingConfig {
                min_spacing: self.sampling.min_spacing,
                max_index: self.sampling.max_index,
                seed: self.sampling.seed,
            },
            schedule: Schedule::new(self.schedule.start, self.schedule.nframes, self.schedule.step),
            ..Default::default()
        }
    }
}
