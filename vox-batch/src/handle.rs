//! Opaque handles and typed process inputs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a value held by the batch library's database.
///
/// The id and type tag are assigned by the library. Handles are only ever
/// received from a backend and passed back as process inputs; nothing on
/// this side inspects what they point at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Handle {
    id: u32,
    #[serde(rename = "type")]
    type_name: String,
}

impl Handle {
    pub(crate) fn new(id: u32, type_name: impl Into<String>) -> Self {
        Self {
            id,
            type_name: type_name.into(),
        }
    }

    /// Database id assigned by the library
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Type tag assigned by the library
    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.type_name, self.id)
    }
}

/// A positional process input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum BatchValue {
    String(String),
    Unsigned(u32),
    Int(i32),
    Float(f32),
    Double(f64),
    Bool(bool),
    /// Value already stored in the library's database
    Handle(Handle),
}

impl From<&str> for BatchValue {
    fn from(value: &str) -> Self {
        BatchValue::String(value.to_string())
    }
}

impl From<String> for BatchValue {
    fn from(value: String) -> Self {
        BatchValue::String(value)
    }
}

impl From<u32> for BatchValue {
    fn from(value: u32) -> Self {
        BatchValue::Unsigned(value)
    }
}

impl From<i32> for BatchValue {
    fn from(value: i32) -> Self {
        BatchValue::Int(value)
    }
}

impl From<f32> for BatchValue {
    fn from(value: f32) -> Self {
        BatchValue::Float(value)
    }
}

impl From<f64> for BatchValue {
    fn from(value: f64) -> Self {
        BatchValue::Double(value)
    }
}

impl From<bool> for BatchValue {
    fn from(value: bool) -> Self {
        BatchValue::Bool(value)
    }
}

impl From<&Handle> for BatchValue {
    fn from(handle: &Handle) -> Self {
        BatchValue::Handle(handle.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_wire_shape() {
        let handle = Handle::new(3, "boxm_scene_parser");
        let json = serde_json::to_value(&handle).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["type"], "boxm_scene_parser");
    }

    #[test]
    fn test_handle_display() {
        let handle = Handle::new(7, "vpgl_camera_double_sptr");
        assert_eq!(handle.to_string(), "vpgl_camera_double_sptr#7");
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(BatchValue::from("a.txt"), BatchValue::String("a.txt".into()));
        assert_eq!(BatchValue::from(0u32), BatchValue::Unsigned(0));
        assert_eq!(BatchValue::from(-2i32), BatchValue::Int(-2));
        assert_eq!(BatchValue::from(true), BatchValue::Bool(true));

        let handle = Handle::new(1, "t");
        assert_eq!(BatchValue::from(&handle), BatchValue::Handle(handle));
    }

    #[test]
    fn test_value_tagging() {
        let json = serde_json::to_value(BatchValue::Unsigned(0)).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "unsigned", "value": 0 }));
    }
}
