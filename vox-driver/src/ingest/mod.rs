//! Frame ingestion
//!
//! Resolves frame indices to the camera transform and image files the
//! library loads.

mod catalog;

pub use catalog::{FileKind, FrameCatalog};
