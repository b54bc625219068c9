//! Vox Update
//!
//! Streams randomly sampled camera/image frames into an occupancy scene held
//! by the external voxel library, then saves the scene as a raw volume.
//!
//! Run without arguments to reproduce the stock configuration, or pass a
//! JSON config file and/or flags to override parts of it.

mod app;
mod config;
mod errors;

use clap::Parser;
use config::{AppConfig, BackendConfig};
use std::path::PathBuf;

/// Vox Update - incremental occupancy scene builder
#[derive(Parser, Debug)]
#[command(name = "vox-update")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// XML scene descriptor
    #[arg(long)]
    scene_config: Option<PathBuf>,

    /// Directory of camera transform files
    #[arg(long)]
    cameras: Option<PathBuf>,

    /// Directory of images, index-aligned with the cameras
    #[arg(long)]
    images: Option<PathBuf>,

    /// Raw occupancy output path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Seed for frame sampling (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Minimum distance between consecutive frame indices
    #[arg(long)]
    min_spacing: Option<u32>,

    /// First value of the iteration range
    #[arg(long)]
    start: Option<u32>,

    /// End (exclusive) of the iteration range
    #[arg(long)]
    nframes: Option<u32>,

    /// Connect to a batch server at this address
    #[arg(long, conflicts_with_all = ["bridge", "dry_run"])]
    connect: Option<String>,

    /// Bridge program to start for the batch library
    #[arg(long, conflicts_with = "dry_run")]
    bridge: Option<String>,

    /// Extra argument for the bridge program (repeatable)
    #[arg(long = "bridge-arg", requires = "bridge", allow_hyphen_values = true)]
    bridge_args: Vec<String>,

    /// Record the call sequence without a library
    #[arg(long)]
    dry_run: bool,

    /// Log level used when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    /// Fold flags into `config`, flags winning.
    fn apply(self, config: &mut AppConfig) {
        if let Some(path) = self.scene_config {
            config.scene_config = path;
        }
        if let Some(dir) = self.cameras {
            config.camera_dir = dir;
        }
        if let Some(dir) = self.images {
            config.image_dir = dir;
        }
        if let Some(path) = self.output {
            config.output = path;
        }
        if self.seed.is_some() {
            config.sampling.seed = self.seed;
        }
        if let Some(spacing) = self.min_spacing {
            config.sampling.min_spacing = spacing;
        }
        if let Some(start) = self.start {
            config.schedule.start = start;
        }
        if let Some(nframes) = self.nframes {
            config.schedule.nframes = nframes;
        }
        if let Some(address) = self.connect {
            config.backend = BackendConfig::Tcp { address };
        }
        if let Some(program) = self.bridge {
            config.backend = BackendConfig::Bridge {
                program,
                args: self.bridge_args,
            };
        }
        if self.dry_run {
            config.backend = BackendConfig::DryRun;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
    }
}

fn main() {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match AppConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Application error: {}", e);
                std::process::exit(1);
            }
        },
        None => AppConfig::default(),
    };
    args.apply(&mut config);

    if let Err(e) = app::UpdateApp::new().with_config(config).run() {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}
