//! Domain models for the `/hsm/v2/State/Components` collection.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The `{"Components": [...]}` envelope.
///
/// Records stay untyped so a payload read from one service can be posted
/// to another without dropping fields.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct ComponentArray {
    #[serde(rename = "Components", default)]
    pub components: Vec<Value>,
}

impl ComponentArray {
    pub fn new(components: Vec<Value>) -> Self {
        Self { components }
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns the `ID` of every record that carries one.
    pub fn ids(&self) -> Vec<&str> {
        self.components
            .iter()
            .filter_map(|c| c.get("ID").and_then(Value::as_str))
            .collect()
    }
}

/// A single component as returned by `/hsm/v2/State/Components/{id}`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Component {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(default)]
    pub r#type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub software_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_role: Option<String>,
    /// Node ID; SMD emits it as a JSON number.
    #[serde(rename = "NID", default, skip_serializing_if = "Option::is_none")]
    pub nid: Option<serde_json::Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default)]
    pub reservation_disabled: bool,
    #[serde(default)]
    pub locked: bool,
}

/// Body returned by `DELETE /hsm/v2/State/Components/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteResponse {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "ID", default)]
    pub id: String,
}
