//! Vox Batch - client for the occupancy library's batch-process protocol
//!
//! The occupancy library exposes its functionality as named *processes*.
//! A call selects a process, binds positional inputs (strings, numbers, or
//! handles to values the library already holds), runs it, and commits
//! outputs back as opaque [`Handle`]s.
//!
//! - [`BatchClient`]: one-time registration and a builder for process calls
//! - [`Backend`]: request/response channel to the library
//!   - [`StreamBackend`]: framed JSON over a bridge process or TCP
//!   - [`RecordingBackend`]: in-memory stand-in for dry runs and tests
//!
//! ## Example
//!
//! ```ignore
//! use vox_batch::{BatchClient, StreamBackend, processes};
//!
//! let mut client = BatchClient::new(StreamBackend::spawn("boxm_batch_bridge", ["--stdio"])?);
//! client.register()?;
//! let scene = client
//!     .process(processes::CREATE_SCENE)
//!     .params("createScene.xml")
//!     .run()?
//!     .output(0)?;
//! ```

mod backend;
mod client;
mod error;
mod handle;
pub mod processes;
pub mod protocol;
pub mod wire;

pub use backend::{Backend, RecordingBackend, StreamBackend};
pub use client::{BatchClient, CompletedProcess, ProcessCall};
pub use error::{BatchError, Result};
pub use handle::{BatchValue, Handle};
pub use protocol::{Request, Response};
