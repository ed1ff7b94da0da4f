pub mod component;
pub mod redfish_credentials;
pub mod redfish_endpoint;
pub mod smd_connection;
