//! Framed backend over a byte stream (bridge process or TCP socket).

use super::Backend;
use crate::error::{BatchError, Result};
use crate::protocol::{Request, Response};
use crate::wire::{read_frame, write_frame};
use std::io::{BufReader, BufWriter, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::process::{Child, Command, Stdio};
use tracing::{debug, info, warn};

/// Initial capacity for the response buffer (typical reply size)
const INITIAL_BUFFER_CAPACITY: usize = 256;

/// Backend speaking the framed protocol over any reader/writer pair.
pub struct StreamBackend {
    reader: Box<dyn Read + Send>,
    writer: Box<dyn Write + Send>,
    child: Option<Child>,
    buffer: Vec<u8>,
}

impl StreamBackend {
    /// Wrap an existing reader/writer pair.
    pub fn from_streams<R, W>(reader: R, writer: W) -> Self
    where
        R: Read + Send + 'static,
        W: Write + Send + 'static,
    {
        Self {
            reader: Box::new(reader),
            writer: Box::new(writer),
            child: None,
            buffer: Vec::with_capacity(INITIAL_BUFFER_CAPACITY),
        }
    }

    /// Start a bridge program and talk to it over its stdin/stdout.
    ///
    /// The bridge's stderr is inherited so library diagnostics reach the
    /// terminal unchanged.
    pub fn spawn<I, S>(program: &str, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| BatchError::Spawn {
                program: program.to_string(),
                source,
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| std::io::Error::other("bridge stdin not captured"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| std::io::Error::other("bridge stdout not captured"))?;

        info!("Started batch bridge `{}` (pid {})", program, child.id());
        let mut backend = Self::from_streams(BufReader::new(stdout), BufWriter::new(stdin));
        backend.child = Some(child);
        Ok(backend)
    }

    /// Connect to a batch server listening on TCP.
    pub fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;
        info!("Connected to batch server at {}", stream.peer_addr()?);
        let reader = stream.try_clone()?;
        Ok(Self::from_streams(BufReader::new(reader), BufWriter::new(stream)))
    }
}

impl Backend for StreamBackend {
    fn call(&mut self, request: &Request) -> Result<Response> {
        debug!(op = request.op(), "Sending request");
        write_frame(&mut self.writer, request)?;
        let response: Response = read_frame(&mut self.reader, &mut self.buffer)?;
        debug!(op = request.op(), %response, "Received response");
        Ok(response)
    }
}

impl Drop for StreamBackend {
    fn drop(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };

        // Closing stdin tells the bridge no more requests are coming.
        let _ = self.writer.flush();
        self.writer = Box::new(std::io::sink());

        match child.wait() {
            Ok(status) if status.success() => debug!("Batch bridge exited"),
            Ok(status) => warn!("Batch bridge exited with {}", status),
            Err(e) => warn!("Failed to wait for batch bridge: {}", e),
        }
    }
}
