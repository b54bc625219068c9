//! Streams sampled frames into an occupancy scene

use crate::config::DriverConfig;
use crate::error::{DriverError, Result};
use crate::ingest::FrameCatalog;
use crate::sampling::FrameSampler;
use crate::update::state::{DriverReport, DriverState, FrameAssets, Scene};
use rand::Rng;
use std::path::Path;
use tracing::{debug, info, warn};
use vox_batch::{Backend, BatchClient, processes};

/// Runs the scene update loop against the batch library.
///
/// One run creates a scene, applies a fixed number of randomly sampled
/// frames to it, and saves the occupancy volume. Every library failure ends
/// the run; the scene is only saved when all updates went through.
pub struct FrameUpdateDriver<'a, B: Backend> {
    client: &'a mut BatchClient<B>,
    catalog: FrameCatalog,
    config: DriverConfig,
    state: DriverState,
}

impl<'a, B: Backend> FrameUpdateDriver<'a, B> {
    pub fn new(
        client: &'a mut BatchClient<B>,
        catalog: FrameCatalog,
        config: DriverConfig,
    ) -> Self {
        if catalog.len() <= config.sampling.max_index as usize {
            warn!(
                "Sampling indices up to {} but only {} frames are cataloged",
                config.sampling.max_index,
                catalog.len()
            );
        }

        Self {
            client,
            catalog,
            config,
            state: DriverState::Init,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Create the scene from the configured XML descriptor.
    #[tracing::instrument(skip_all)]
    pub fn initialize_scene(&mut self) -> Result<Scene> {
        info!("Creating a Scene");
        self.client.register()?;
        let handle = self
            .client
            .process(processes::CREATE_SCENE)
            .params(path_arg(&self.config.scene_config)?)
            .run()?
            .output(0)?;
        debug!(%handle, "Scene created");
        Ok(Scene::new(handle))
    }

    /// Load the camera and image for frame `index`.
    #[tracing::instrument(skip(self))]
    pub fn load_frame_assets(&mut self, index: u32) -> Result<FrameAssets> {
        info!("Loading Camera");
        let camera_path = path_arg(self.catalog.camera(index)?)?;
        let camera = self
            .client
            .process(processes::LOAD_PERSPECTIVE_CAMERA)
            .string(0, camera_path)
            .run()?
            .output(0)?;

        info!("Loading Image");
        let image_path = path_arg(self.catalog.image(index)?)?;
        let image = self
            .client
            .process(processes::LOAD_IMAGE_VIEW)
            .string(0, image_path)
            .run()?
            .output(0)?;

        Ok(FrameAssets { camera, image })
    }

    /// Fold one frame into the scene's occupancy.
    #[tracing::instrument(skip_all, fields(camera = %assets.camera, image = %assets.image))]
    pub fn update_scene(&mut self, scene: &Scene, assets: &FrameAssets) -> Result<()> {
        info!("Updating Scene");
        self.client
            .process(processes::UPDATE_SCENE)
            .handle(0, &assets.image)
            .handle(1, &assets.camera)
            .handle(2, scene.handle())
            .unsigned(3, self.config.update_tag)
            .run()?;
        Ok(())
    }

    /// Write the scene's occupancy to the configured raw output.
    #[tracing::instrument(skip_all, fields(output = %self.config.output.display()))]
    pub fn persist_scene(&mut self, scene: &Scene) -> Result<()> {
        info!("Saving raw");
        self.client
            .process(processes::SAVE_OCCUPANCY_RAW)
            .handle(0, scene.handle())
            .string(1, path_arg(&self.config.output)?)
            .unsigned(2, self.config.save_tag)
            .run()?;
        Ok(())
    }

    /// Run with a sampler built from the configured sampling parameters.
    pub fn run(self) -> Result<DriverReport> {
        let sampler = FrameSampler::from_config(&self.config.sampling);
        self.run_with_sampler(sampler)
    }

    /// Create, update for every scheduled iteration, then save.
    pub fn run_with_sampler<R: Rng>(
        mut self,
        mut sampler: FrameSampler<R>,
    ) -> Result<DriverReport> {
        let iterations = self.config.schedule.iteration_count()?;
        let scene = self.initialize_scene()?;
        info!(iterations, "Streaming frames into scene");

        let mut frames = Vec::with_capacity(iterations);
        for step in 0..iterations {
            self.transition(DriverState::Sampling);
            let index = sampler.next_index();

            self.transition(DriverState::Updating);
            let assets = self.load_frame_assets(index)?;
            self.update_scene(&scene, &assets)?;
            frames.push(index);
            debug!(step, index, "Frame applied");
        }

        self.persist_scene(&scene)?;
        self.transition(DriverState::Saved);
        self.transition(DriverState::Done);

        info!(
            updates = frames.len(),
            output = %self.config.output.display(),
            "Scene update finished"
        );
        Ok(DriverReport {
            scene,
            frames,
            output: self.config.output.clone(),
        })
    }

    fn transition(&mut self, next: DriverState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid driver transition {} -> {}",
            self.state,
            next
        );
        debug!(from = %self.state, to = %next, "Driver state");
        self.state = next;
    }
}

/// Paths cross the wire as strings, so they must be UTF-8.
fn path_arg(path: &Path) -> Result<String> {
    path.to_str()
        .map(str::to_string)
        .ok_or_else(|| DriverError::NonUtf8Path {
            path: path.to_path_buf(),
        })
}
