//! Driver states and run report

use std::fmt;
use std::path::PathBuf;
use vox_batch::Handle;

/// Where a driver run is.
///
/// `Init -> Sampling <-> Updating -> Saved -> Done`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Init,
    Sampling,
    Updating,
    Saved,
    Done,
}

impl DriverState {
    /// Whether the run may move from `self` to `next`
    pub fn can_transition_to(self, next: DriverState) -> bool {
        use DriverState::*;
        matches!(
            (self, next),
            (Init, Sampling)
                | (Init, Saved)
                | (Sampling, Updating)
                | (Updating, Sampling)
                | (Updating, Saved)
                | (Saved, Done)
        )
    }
}

impl fmt::Display for DriverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DriverState::Init => "init",
            DriverState::Sampling => "sampling",
            DriverState::Updating => "updating",
            DriverState::Saved => "saved",
            DriverState::Done => "done",
        };
        f.write_str(name)
    }
}

/// The scene being built, held by the library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene(Handle);

impl Scene {
    pub(crate) fn new(handle: Handle) -> Self {
        Self(handle)
    }

    pub fn handle(&self) -> &Handle {
        &self.0
    }
}

/// Camera and image loaded for one frame; dropped after its update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameAssets {
    pub camera: Handle,
    pub image: Handle,
}

/// Summary of a finished run
#[derive(Debug, Clone)]
pub struct DriverReport {
    pub scene: Scene,
    /// Frame indices in the order they were applied
    pub frames: Vec<u32>,
    pub output: PathBuf,
}

impl DriverReport {
    /// Number of updates applied
    pub fn updates(&self) -> usize {
        self.frames.len()
    }
}
