use serde::{Deserialize, Serialize};
use std::fmt;

/// The `LastDiscoveryStatus` reported by SMD for a Redfish endpoint.
///
/// Values come from the service and are not interpreted beyond the
/// terminal success value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscoveryStatus(String);

impl DiscoveryStatus {
    pub const DISCOVER_OK: &'static str = "DiscoverOK";

    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    /// The terminal status SMD reports after a successful discovery.
    pub fn discover_ok() -> Self {
        Self(Self::DISCOVER_OK.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_discover_ok(&self) -> bool {
        self.0 == Self::DISCOVER_OK
    }
}

impl fmt::Display for DiscoveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
