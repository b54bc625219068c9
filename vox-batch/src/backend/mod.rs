//! Backends carry requests to the batch library and bring back its replies.

use crate::error::Result;
use crate::protocol::{Request, Response};

mod recording;
mod stream;

pub use recording::RecordingBackend;
pub use stream::StreamBackend;

/// A blocking request/response channel to the batch library.
///
/// At most one request is outstanding at a time; `call` returns only once
/// the library has replied.
pub trait Backend {
    fn call(&mut self, request: &Request) -> Result<Response>;
}
