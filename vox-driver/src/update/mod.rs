//! The scene update loop
//!
//! Creates a scene, applies sampled frames to it one at a time, and saves
//! the resulting occupancy volume.

pub mod driver;
pub mod state;

pub use driver::FrameUpdateDriver;
pub use state::{DriverReport, DriverState, FrameAssets, Scene};
