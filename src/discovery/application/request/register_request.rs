use crate::{NodeId, RedfishCredentials, RedfishEndpointArray};
use serde::Serialize;

/// One entry of a `POST /hsm/v2/Inventory/RedfishEndpoints` body.
#[derive(Debug, Clone, Serialize)]
pub struct RedfishEndpointRegistration {
    #[serde(rename = "ID")]
    pub id: NodeId,
    #[serde(rename = "FQDN")]
    pub fqdn: String,
    #[serde(rename = "RediscoverOnUpdate")]
    pub rediscover_on_update: bool,
    #[serde(rename = "User")]
    pub user: String,
    #[serde(rename = "Password")]
    pub password: String,
}

impl RedfishEndpointRegistration {
    /// Registration for a node whose BMC is reachable under its own ID.
    pub fn for_node(node: &NodeId, credentials: &RedfishCredentials) -> Self {
        Self {
            id: node.clone(),
            fqdn: node.to_string(),
            rediscover_on_update: true,
            user: credentials.user().to_string(),
            password: credentials.password().as_str().to_string(),
        }
    }

    /// Wraps the registration in the `RedfishEndpoints` envelope.
    pub fn into_request(self) -> RedfishEndpointArray<Self> {
        RedfishEndpointArray::new(vec![self])
    }
}
