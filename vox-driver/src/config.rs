//! Driver configuration

use crate::sampling::{SamplingConfig, Schedule};
use std::path::PathBuf;

/// Scene descriptor used when none is configured
pub const DEFAULT_SCENE_CONFIG: &str = "createScene.xml";

/// Raw occupancy output used when none is configured
pub const DEFAULT_OUTPUT: &str = "./block_raw";

/// Everything a driver run needs besides the frame catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverConfig {
    /// XML scene descriptor handed to scene creation
    pub scene_config: PathBuf,
    /// Where the library writes the raw occupancy volume
    pub output: PathBuf,
    pub sampling: SamplingConfig,
    pub schedule: Schedule,
    /// Tag passed with every update (sensor/channel selector owned by the library)
    pub update_tag: u32,
    /// Tag passed with the save call
    pub save_tag: u32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            scene_config: PathBuf::from(DEFAULT_SCENE_CONFIG),
            output: PathBuf::from(DEFAULT_OUTPUT),
            sampling: SamplingConfig::default(),
            schedule: Schedule::default(),
            update_tag: 0,
            save_tag: 0,
        }
    }
}
