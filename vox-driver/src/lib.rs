//! Vox Driver
//!
//! Drives incremental occupancy updates in the external voxel library. A run
//! picks frames at random (never two close neighbours in a row), loads each
//! frame's camera and image through the library, folds them into the scene,
//! and finally saves the scene's occupancy as a raw volume.
//!
//! ## Modules
//!
//! - [`ingest`]: camera and image filename lists indexed by frame
//! - [`sampling`]: frame index sampling and iteration scheduling
//! - [`update`]: the create/update/save loop

pub mod config;
pub mod error;
pub mod ingest;
pub mod sampling;
pub mod update;

pub use config::DriverConfig;
pub use error::{DriverError, Result};
pub use ingest::{FileKind, FrameCatalog};
pub use sampling::{FrameSampler, SamplingConfig, Schedule, sample_frame_index};
pub use update::{DriverReport, DriverState, FrameAssets, FrameUpdateDriver, Scene};
