//! Discovery-convergence polling and component-state comparison for SMD
//! hardware-state-management services.

mod core;
mod discovery;
mod runner;
mod state;


pub use crate::core::{
    config::{ClientConfig, PollConfig, RateLimitConfig},
    domain::{
        diff::{Change, ChangeKind, DiffResult, diff_grouped_by},
        error::{SmdError, SmdResult, ValidationError},
        model::{
            component::{Component, ComponentArray, DeleteResponse},
            redfish_credentials::RedfishCredentials,
            redfish_endpoint::{DiscoveryInfo, RedfishEndpoint, RedfishEndpointArray},
            smd_connection::SmdConnection,
        },
        value_object::{
            DiscoveryStatus, EndpointPassword, NodeId, SmdUrl, score_from_level,
        },
    },
};
pub use crate::discovery::application::{
    request::register_request::RedfishEndpointRegistration,
    response::register_response::RegistrationOutcome,
    service::{
        convergence_poller::{DiscoveryStatusSource, poll_until_discovered},
        discovery_service::{DiscoveryReport, DiscoveryService},
    },
};
pub use crate::runner::{ComparisonOutcome, ComparisonRunner};
pub use crate::state::application::service::{
    compare_service::{COMPONENT_KEY, CompareService, compare},
    sync_service::SyncService,
};

use crate::core::{
    domain::value_object::validate_node_id,
    infrastructure::api_client::ApiClient,
};
use reqwest::{Method, StatusCode};
use tracing::{info, warn};

pub(crate) const REDFISH_ENDPOINTS_PATH: &str = "hsm/v2/Inventory/RedfishEndpoints";
pub(crate) const COMPONENTS_PATH: &str = "hsm/v2/State/Components";

/// A client for one SMD instance.
///
/// # Examples
///
/// ```no_run
/// use smd_compare::{SmdClient, SmdResult};
///
/// #[tokio::main]
/// async fn main() -> SmdResult<()> {
///     let client = SmdClient::builder()
///         .name("primary")
///         .url("http://smd:27779")?
///         .build()?;
///
///     let components = client.components().await?;
///     println!("{} components", components.len());
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct SmdClient {
    api_client: ApiClient,
}

/// Builder for SmdClient configuration
#[derive(Debug, Default)]
pub struct SmdClientBuilder {
    name: Option<String>,
    url: Option<SmdUrl>,
    config: ClientConfig,
}

impl SmdClientBuilder {
    /// Label used in logs to tell instances apart.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Base URL of the instance, e.g. `http://smd:27779`.
    pub fn url(mut self, url: impl Into<String>) -> SmdResult<Self> {
        self.url = Some(SmdUrl::new(url)?);
        Ok(self)
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> SmdResult<SmdClient> {
        let url = self.url.ok_or_else(|| ValidationError::Field {
            field: "url".to_string(),
            message: "URL is required".to_string(),
        })?;
        let name = self.name.unwrap_or_else(|| url.to_string());
        let connection = SmdConnection::new(name, url);
        let api_client = ApiClient::new(connection, &self.config)?;

        Ok(SmdClient { api_client })
    }
}

impl SmdClient {
    /// Creates a new builder for SmdClient configuration
    pub fn builder() -> SmdClientBuilder {
        SmdClientBuilder::default()
    }

    pub fn name(&self) -> &str {
        self.api_client.connection().name()
    }

    pub fn url(&self) -> &SmdUrl {
        self.api_client.connection().url()
    }

    /// Lists registered Redfish endpoints with their discovery status.
    pub async fn redfish_endpoints(&self) -> SmdResult<Vec<RedfishEndpoint>> {
        let list: RedfishEndpointArray<RedfishEndpoint> =
            self.api_client.get(REDFISH_ENDPOINTS_PATH).await?;
        Ok(list.redfish_endpoints)
    }

    /// Registers (or re-registers) Redfish endpoints, triggering discovery.
    ///
    /// `409 Conflict` means the endpoint already exists; registration is
    /// idempotent, so that is reported as [`RegistrationOutcome::AlreadyRegistered`].
    ///
    /// # Errors
    ///
    /// Any other non-success status is returned as `SmdError::Api`.
    pub async fn register_redfish_endpoints(
        &self,
        body: &RedfishEndpointArray<RedfishEndpointRegistration>,
    ) -> SmdResult<RegistrationOutcome> {
        let response = self
            .api_client
            .send(Method::POST, REDFISH_ENDPOINTS_PATH, Some(body))
            .await?;

        if response.status == StatusCode::CONFLICT {
            warn!(
                instance = self.name(),
                url = %response.url,
                body = %response.body,
                "endpoint already registered"
            );
            return Ok(RegistrationOutcome::AlreadyRegistered);
        }

        let response = response.error_for_status()?;
        info!(
            instance = self.name(),
            status = response.status.as_u16(),
            "registered redfish endpoints"
        );
        Ok(RegistrationOutcome::Created)
    }

    /// Fetches the full component list.
    pub async fn components(&self) -> SmdResult<ComponentArray> {
        self.api_client.get(COMPONENTS_PATH).await
    }

    /// Posts a component payload, creating every record it contains.
    pub async fn seed_components(&self, components: &ComponentArray) -> SmdResult<()> {
        let status = self.api_client.post(COMPONENTS_PATH, components).await?;
        info!(
            instance = self.name(),
            count = components.len(),
            status = status.as_u16(),
            "seeded components"
        );
        Ok(())
    }

    /// Fetches a single component by ID.
    pub async fn component(&self, id: &NodeId) -> SmdResult<Component> {
        validate_node_id(id.as_str())?;
        self.api_client
            .get(&format!("{}/{}", COMPONENTS_PATH, id))
            .await
    }

    /// Replaces a single component and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns `SmdError::Validation` if `component` names a different ID
    /// than `id`, and `SmdError::Api` if the instance does not know `id`.
    pub async fn update_component(
        &self,
        id: &NodeId,
        component: &Component,
    ) -> SmdResult<Component> {
        validate_node_id(id.as_str())?;
        if !component.id.is_empty() && component.id != id.as_str() {
            return Err(ValidationError::Field {
                field: "ID".to_string(),
                message: format!("Body ID '{}' does not match '{}'", component.id, id),
            }
            .into());
        }
        self.api_client
            .put(&format!("{}/{}", COMPONENTS_PATH, id), component)
            .await
    }

    /// Deletes a single component by ID.
    pub async fn delete_component(&self, id: &NodeId) -> SmdResult<DeleteResponse> {
        validate_node_id(id.as_str())?;
        self.api_client
            .delete(&format!("{}/{}", COMPONENTS_PATH, id))
            .await
    }
}
