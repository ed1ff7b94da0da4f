use crate::core::domain::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MAX_NODE_ID_LENGTH: usize = 255;

/// An opaque token naming a hardware endpoint (e.g. `x0c0s1b0`).
///
/// Identifiers read back from the service are accepted as-is; identifiers
/// supplied by the caller go through [`validate_node_id`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Creates a validated node identifier.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        validate_node_id(&id)?;
        Ok(Self(id))
    }

    /// Creates a node identifier without validation.
    #[cfg(test)]
    pub(crate) fn new_unchecked(id: String) -> Self {
        Self(id)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the object and returns the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NodeId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Validates a node identifier.
pub(crate) fn validate_node_id(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::Field {
            field: "node_id".to_string(),
            message: "Node identifier cannot be empty".to_string(),
        });
    }
    if id.len() > MAX_NODE_ID_LENGTH {
        return Err(ValidationError::ConstraintViolation(format!(
            "Node identifier exceeds maximum of {} characters",
            MAX_NODE_ID_LENGTH
        )));
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
    {
        return Err(ValidationError::Format(format!(
            "Node identifier '{}' may only contain alphanumerics, '-', '_', '.' and ':'",
            id
        )));
    }
    Ok(())
}
