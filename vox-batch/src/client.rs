//! High-level client for running batch processes.

use crate::backend::Backend;
use crate::error::{BatchError, Result};
use crate::handle::{BatchValue, Handle};
use crate::protocol::{Request, Response};
use tracing::{debug, info};

/// Client over a [`Backend`] that runs named processes.
///
/// The library needs its process and datatype registries filled once per
/// session; [`BatchClient::register`] does that and every process call
/// before it fails with [`BatchError::NotRegistered`].
pub struct BatchClient<B: Backend> {
    backend: B,
    registered: bool,
}

impl<B: Backend> BatchClient<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            registered: false,
        }
    }

    /// Register processes and datatypes. Repeated calls do nothing.
    pub fn register(&mut self) -> Result<()> {
        if self.registered {
            return Ok(());
        }

        self.expect_ok("registry", Request::RegisterProcesses)?;
        self.expect_ok("registry", Request::RegisterDatatypes)?;
        self.registered = true;
        info!("Registered batch processes and datatypes");
        Ok(())
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Start building a call to the process called `name`.
    pub fn process(&mut self, name: &str) -> ProcessCall<'_, B> {
        ProcessCall {
            client: self,
            name: name.to_string(),
            params: None,
            inputs: Vec::new(),
        }
    }

    fn exchange(&mut self, process: &str, request: Request) -> Result<Response> {
        match self.backend.call(&request)? {
            Response::Error { message } => Err(BatchError::Remote {
                process: process.to_string(),
                message,
            }),
            response => Ok(response),
        }
    }

    fn expect_ok(&mut self, process: &str, request: Request) -> Result<()> {
        let op = request.op();
        match self.exchange(process, request)? {
            Response::Ok => Ok(()),
            other => Err(unexpected(op, &other)),
        }
    }
}

fn unexpected(op: &str, response: &Response) -> BatchError {
    BatchError::UnexpectedResponse {
        request: op.to_string(),
        response: response.to_string(),
    }
}

/// A process call being assembled. Nothing is sent until [`ProcessCall::run`].
pub struct ProcessCall<'a, B: Backend> {
    client: &'a mut BatchClient<B>,
    name: String,
    params: Option<String>,
    inputs: Vec<(u32, BatchValue)>,
}

impl<'a, B: Backend> ProcessCall<'a, B> {
    /// Bind a parameter file (e.g. an XML descriptor).
    pub fn params(mut self, path: impl Into<String>) -> Self {
        self.params = Some(path.into());
        self
    }

    /// Bind input `index`.
    pub fn input(mut self, index: u32, value: impl Into<BatchValue>) -> Self {
        self.inputs.push((index, value.into()));
        self
    }

    pub fn string(self, index: u32, value: impl Into<String>) -> Self {
        self.input(index, BatchValue::String(value.into()))
    }

    pub fn unsigned(self, index: u32, value: u32) -> Self {
        self.input(index, BatchValue::Unsigned(value))
    }

    pub fn handle(self, index: u32, handle: &Handle) -> Self {
        self.input(index, BatchValue::from(handle))
    }

    /// Select the process, bind everything, and execute it.
    pub fn run(self) -> Result<CompletedProcess<'a, B>> {
        let ProcessCall {
            client,
            name,
            params,
            inputs,
        } = self;

        if !client.registered {
            return Err(BatchError::NotRegistered);
        }

        debug!(process = %name, inputs = inputs.len(), "Running process");
        client.expect_ok(&name, Request::InitProcess { name: name.clone() })?;
        if let Some(path) = params {
            client.expect_ok(&name, Request::SetParams { path })?;
        }
        for (index, value) in inputs {
            client.expect_ok(&name, Request::SetInput { index, value })?;
        }

        match client.exchange(&name, Request::RunProcess)? {
            Response::Ran { success: true } => Ok(CompletedProcess { client, name }),
            Response::Ran { success: false } => Err(BatchError::ProcessFailed { process: name }),
            other => Err(unexpected("run_process", &other)),
        }
    }
}

/// A process that ran successfully; its outputs can be committed.
pub struct CompletedProcess<'a, B: Backend> {
    client: &'a mut BatchClient<B>,
    name: String,
}

impl<B: Backend> CompletedProcess<'_, B> {
    /// Commit output `index` to the library's database and return its handle.
    pub fn output(&mut self, index: u32) -> Result<Handle> {
        match self.client.exchange(&self.name, Request::CommitOutput { index })? {
            Response::Output { handle } => {
                debug!(process = %self.name, index, %handle, "Committed output");
                Ok(handle)
            }
            other => Err(unexpected("commit_output", &other)),
        }
    }
}
