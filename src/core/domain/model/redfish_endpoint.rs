//! Domain models for the `/hsm/v2/Inventory/RedfishEndpoints` collection.

use crate::core::domain::value_object::{DiscoveryStatus, NodeId};
use serde::{Deserialize, Serialize};

/// Envelope used by SMD for both listing and registering endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RedfishEndpointArray<T> {
    #[serde(rename = "RedfishEndpoints", default = "Vec::new")]
    pub redfish_endpoints: Vec<T>,
}

impl<T> RedfishEndpointArray<T> {
    pub fn new(redfish_endpoints: Vec<T>) -> Self {
        Self { redfish_endpoints }
    }
}

/// A Redfish endpoint as listed by SMD.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RedfishEndpoint {
    /// Endpoint identifier (the BMC xname).
    #[serde(rename = "ID")]
    pub id: NodeId,
    /// Hostname or address SMD uses to reach the BMC.
    #[serde(rename = "FQDN", default, skip_serializing_if = "Option::is_none")]
    pub fqdn: Option<String>,
    /// Asynchronous discovery bookkeeping maintained by SMD.
    #[serde(
        rename = "DiscoveryInfo",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub discovery_info: Option<DiscoveryInfo>,
}

impl RedfishEndpoint {
    /// The last discovery status, if SMD has recorded one.
    pub fn last_discovery_status(&self) -> Option<&DiscoveryStatus> {
        self.discovery_info
            .as_ref()
            .and_then(|info| info.last_discovery_status.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DiscoveryInfo {
    #[serde(
        rename = "LastDiscoveryStatus",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_discovery_status: Option<DiscoveryStatus>,
    #[serde(
        rename = "LastDiscoveryAttempt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_discovery_attempt: Option<String>,
}
