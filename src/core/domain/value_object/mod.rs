mod discovery_status;
mod endpoint_password;
mod node_id;
mod smd_url;

pub use discovery_status::DiscoveryStatus;
pub use endpoint_password::{EndpointPassword, score_from_level};
pub use node_id::NodeId;
pub use smd_url::SmdUrl;

pub(crate) use node_id::validate_node_id;
