//! In-memory backend that records requests and plays the library's part.

use super::Backend;
use crate::error::Result;
use crate::handle::Handle;
use crate::processes;
use crate::protocol::{Request, Response};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Backend for dry runs and tests.
///
/// Every request is recorded. Runs succeed unless a failure was injected
/// with [`RecordingBackend::fail_run`], and each committed output gets the
/// next database id with the type tag the real process would produce.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    requests: Vec<Request>,
    current: Option<String>,
    last_run_ok: bool,
    run_counts: HashMap<String, usize>,
    failures: HashSet<(String, usize)>,
    next_id: u32,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the `nth` run (1-based) of `process` report failure. Calls
    /// accumulate, so several runs of one process can fail.
    pub fn fail_run(mut self, process: &str, nth: usize) -> Self {
        self.failures.insert((process.to_string(), nth));
        self
    }

    /// All requests received so far, in order
    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    /// Names of the processes that were run, in order
    pub fn runs(&self) -> Vec<String> {
        let mut current = None;
        let mut runs = Vec::new();
        for request in &self.requests {
            match request {
                Request::InitProcess { name } => current = Some(name.clone()),
                Request::RunProcess => {
                    if let Some(name) = &current {
                        runs.push(name.clone());
                    }
                }
                _ => {}
            }
        }
        runs
    }

    /// Number of times `process` was run
    pub fn run_count(&self, process: &str) -> usize {
        self.run_counts.get(process).copied().unwrap_or(0)
    }

    fn error(message: &str) -> Response {
        Response::Error {
            message: message.to_string(),
        }
    }
}

impl Backend for RecordingBackend {
    fn call(&mut self, request: &Request) -> Result<Response> {
        debug!(op = request.op(), "Recording request");
        self.requests.push(request.clone());

        let response = match request {
            Request::RegisterProcesses | Request::RegisterDatatypes => Response::Ok,
            Request::InitProcess { name } => {
                self.current = Some(name.clone());
                self.last_run_ok = false;
                Response::Ok
            }
            Request::SetParams { .. } | Request::SetInput { .. } => match self.current {
                Some(_) => Response::Ok,
                None => Self::error("no process initialized"),
            },
            Request::RunProcess => match &self.current {
                Some(name) => {
                    let count = self.run_counts.entry(name.clone()).or_insert(0);
                    *count += 1;
                    let run = *count;
                    let success = !self.failures.contains(&(name.clone(), run));
                    self.last_run_ok = success;
                    Response::Ran { success }
                }
                None => Self::error("no process initialized"),
            },
            Request::CommitOutput { .. } => match &self.current {
                Some(name) if self.last_run_ok => {
                    self.next_id += 1;
                    let type_name = processes::output_type(name).unwrap_or("unknown");
                    Response::Output {
                        handle: Handle::new(self.next_id, type_name),
                    }
                }
                Some(_) => Self::error("process has not run successfully"),
                None => Self::error("no process initialized"),
            },
        };

        Ok(response)
    }
}
