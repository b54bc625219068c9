//! Runner set-up: logging, backend selection and the driver run.

use crate::config::{AppConfig, BackendConfig};
use crate::errors::AppError;
use tracing::info;
use vox_batch::{Backend, BatchClient, RecordingBackend, StreamBackend};
use vox_driver::{DriverConfig, DriverReport, FrameCatalog, FrameUpdateDriver};

/// Builder for configuring and running a scene update.
pub struct UpdateApp {
    config: AppConfig,
}

impl UpdateApp {
    /// Create an UpdateApp with the stock configuration.
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Initialize logging, then run.
    pub fn run(self) -> Result<DriverReport, AppError> {
        self.init_logging();
        self.execute()
    }

    /// Catalog frames, connect to the library and drive the update loop.
    pub(crate) fn execute(&self) -> Result<DriverReport, AppError> {
        let config = &self.config;
        let catalog = FrameCatalog::from_dirs(
            &config.camera_dir,
            &config.camera_ext,
            &config.image_dir,
            &config.image_ext,
        )?;
        let driver_config = config.driver_config();

        match &config.backend {
            BackendConfig::Bridge { program, args } => {
                let backend = StreamBackend::spawn(program, args)?;
                Ok(drive(backend, catalog, driver_config)?.0)
            }
            BackendConfig::Tcp { address } => {
                let backend = StreamBackend::connect(address.as_str())?;
                Ok(drive(backend, catalog, driver_config)?.0)
            }
            BackendConfig::DryRun => {
                let (report, backend) = drive(RecordingBackend::new(), catalog, driver_config)?;
                info!(
                    "Dry run: {} requests, {} process runs",
                    backend.requests().len(),
                    backend.runs().len()
                );
                Ok(report)
            }
        }
    }

    fn init_logging(&self) {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(&self.config.logging.level)
                }),
            )
            .with_target(false)
            .init();
    }
}

impl Default for UpdateApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the driver over `backend`, handing the backend back afterwards.
fn drive<B: Backend>(
    backend: B,
    catalog: FrameCatalog,
    config: DriverConfig,
) -> Result<(DriverReport, B), AppError> {
    let mut client = BatchClient::new(backend);
    let report = FrameUpdateDriver::new(&mut client, catalog, config).run()?;
    Ok((report, client.into_backend()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScheduleSection;
    use std::fs::{self, File};
    use std::net::TcpListener;
    use std::path::Path;
    use std::thread;
    use tempfile::{TempDir, tempdir};
    use vox_batch::wire::{read_frame, write_frame};
    use vox_batch::{BatchError, Request};
    use vox_driver::DriverError;

    fn frame_dirs(count: usize) -> (TempDir, AppConfig) {
        let dir = tempdir().unwrap();
        let cams = dir.path().join("cameras_KRT");
        let imgs = dir.path().join("video");
        fs::create_dir_all(&cams).unwrap();
        fs::create_dir_all(&imgs).unwrap();
        for i in 0..count {
            File::create(cams.join(format!("{i:05}.txt"))).unwrap();
            File::create(imgs.join(format!("{i:05}.png"))).unwrap();
        }

        let mut config = AppConfig {
            camera_dir: cams,
            image_dir: imgs,
            output: dir.path().join("block_raw"),
            backend: BackendConfig::DryRun,
            ..Default::default()
        };
        config.sampling.seed = Some(21);
        (dir, config)
    }

    /// Serve one connection, answering with a recording backend.
    fn serve_one(listener: TcpListener) -> thread::JoinHandle<usize> {
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut backend = RecordingBackend::new();
            let mut buffer = Vec::new();
            while let Ok(request) = read_frame::<_, Request>(&mut stream, &mut buffer) {
                let response = backend.call(&request).unwrap();
                write_frame(&mut stream, &response).unwrap();
            }
            backend.runs().len()
        })
    }

    #[test]
    fn test_dry_run_end_to_end() {
        let (_dir, config) = frame_dirs(255);
        let report = UpdateApp::new().with_config(config).execute().unwrap();
        assert_eq!(report.updates(), 20);
        assert!(report.output.ends_with("block_raw"));
    }

    #[test]
    fn test_dry_run_small_index_range() {
        let (_dir, mut config) = frame_dirs(30);
        config.sampling.max_index = 29;
        config.sampling.min_spacing = 5;
        config.schedule = ScheduleSection {
            start: 0,
            nframes: 50,
            step: 1,
        };

        let report = UpdateApp::new().with_config(config).execute().unwrap();
        assert_eq!(report.updates(), 50);
        assert!(report.frames.iter().all(|&i| i < 30));
    }

    #[test]
    fn test_zero_step_config_is_rejected() {
        let (_dir, mut config) = frame_dirs(255);
        config.schedule.step = 0;
        let result = UpdateApp::new().with_config(config).execute();
        assert!(matches!(result, Err(AppError::Driver(DriverError::ZeroStep { .. }))));
    }

    #[test]
    fn test_missing_camera_dir() {
        let (dir, mut config) = frame_dirs(1);
        config.camera_dir = dir.path().join("missing");
        let result = UpdateApp::new().with_config(config).execute();
        assert!(matches!(result, Err(AppError::Driver(DriverError::Catalog { .. }))));
    }

    #[test]
    fn test_missing_bridge_program() {
        let (_dir, mut config) = frame_dirs(1);
        config.backend = BackendConfig::Bridge {
            program: "vox-update-missing-bridge".into(),
            args: vec![],
        };
        let result = UpdateApp::new().with_config(config).execute();
        assert!(matches!(result, Err(AppError::Batch(BatchError::Spawn { .. }))));
    }

    #[test]
    fn test_tcp_backend_round_trip() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap().to_string();
        let server = serve_one(listener);

        let (_dir, mut config) = frame_dirs(255);
        config.backend = BackendConfig::Tcp { address };
        config.schedule = ScheduleSection {
            start: 0,
            nframes: 3,
            step: 1,
        };

        let report = UpdateApp::new().with_config(config).execute().unwrap();
        assert_eq!(report.updates(), 3);
        // create + 3 * (camera, image, update) + save
        assert_eq!(server.join().unwrap(), 11);
    }

    #[test]
    fn test_output_path_is_passed_through() {
        let (dir, config) = frame_dirs(255);
        let report = UpdateApp::new().with_config(config).execute().unwrap();
        assert_eq!(report.output, dir.path().join("block_raw"));
        // The library writes the file; a dry run does not.
        assert!(!Path::new(&report.output).exists());
    }
}
