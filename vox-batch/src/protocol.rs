//! Request and response messages exchanged with the batch library.

use crate::handle::{BatchValue, Handle};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single call into the batch library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    /// Make every process known to the library's registry
    RegisterProcesses,
    /// Make every datatype known to the library's database
    RegisterDatatypes,
    /// Select the process the following calls apply to
    InitProcess { name: String },
    /// Bind a parameter file to the selected process
    SetParams { path: String },
    /// Bind a positional input
    SetInput { index: u32, value: BatchValue },
    /// Execute the selected process
    RunProcess,
    /// Store a positional output in the database and return its handle
    CommitOutput { index: u32 },
}

impl Request {
    /// Short operation name used in logs and errors
    pub fn op(&self) -> &'static str {
        match self {
            Request::RegisterProcesses => "register_processes",
            Request::RegisterDatatypes => "register_datatypes",
            Request::InitProcess { .. } => "init_process",
            Request::SetParams { .. } => "set_params",
            Request::SetInput { .. } => "set_input",
            Request::RunProcess => "run_process",
            Request::CommitOutput { .. } => "commit_output",
        }
    }
}

/// The library's reply to a [`Request`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    Ok,
    Ran { success: bool },
    Output { handle: Handle },
    Error { message: String },
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Ok => write!(f, "ok"),
            Response::Ran { success } => write!(f, "ran (success: {})", success),
            Response::Output { handle } => write!(f, "output {}", handle),
            Response::Error { message } => write!(f, "error: {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_encoding() {
        let request = Request::SetInput {
            index: 3,
            value: BatchValue::Unsigned(0),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            json!({ "op": "set_input", "index": 3, "value": { "kind": "unsigned", "value": 0 } })
        );

        let json = serde_json::to_value(Request::RunProcess).unwrap();
        assert_eq!(json, json!({ "op": "run_process" }));
    }

    #[test]
    fn test_response_decoding() {
        let response: Response = serde_json::from_value(json!({
            "status": "output",
            "handle": { "id": 4, "type": "vil_image_view_base_sptr" }
        }))
        .unwrap();
        match response {
            Response::Output { handle } => {
                assert_eq!(handle.id(), 4);
                assert_eq!(handle.type_name(), "vil_image_view_base_sptr");
            }
            other => panic!("unexpected response: {other:?}"),
        }

        let response: Response =
            serde_json::from_value(json!({ "status": "ran", "success": false })).unwrap();
        assert_eq!(response, Response::Ran { success: false });
    }

    #[test]
    fn test_unknown_status_rejected() {
        let result: Result<Response, _> = serde_json::from_value(json!({ "status": "maybe" }));
        assert!(result.is_err());
    }
}
