use crate::{
    DiscoveryStatus, NodeId, PollConfig, RedfishCredentials, RedfishEndpointRegistration,
    RegistrationOutcome, SmdClient, SmdError, SmdResult,
    discovery::application::service::convergence_poller::{
        DiscoveryStatusSource, poll_until_discovered,
    },
};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{info, warn};

/// Outcome of a discovery run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiscoveryReport {
    /// Nodes that were already at `DiscoverOK` before anything was sent.
    pub already_discovered: BTreeSet<NodeId>,
    /// Nodes a registration request was sent for.
    pub registered: BTreeSet<NodeId>,
    /// Registered nodes that never reached `DiscoverOK` within the budget.
    pub undiscovered: BTreeSet<NodeId>,
}

impl DiscoveryReport {
    pub fn is_complete(&self) -> bool {
        self.undiscovered.is_empty()
    }

    /// Fails with `SmdError::DiscoveryIncomplete` if any node is left.
    pub fn ensure_complete(self) -> SmdResult<Self> {
        if self.is_complete() {
            Ok(self)
        } else {
            Err(SmdError::DiscoveryIncomplete(
                self.undiscovered.into_iter().collect(),
            ))
        }
    }
}

/// Registers Redfish endpoints with SMD and waits for discovery to finish.
#[derive(Debug, Clone)]
pub struct DiscoveryService {
    credentials: RedfishCredentials,
    poll: PollConfig,
}

impl DiscoveryService {
    pub fn new(credentials: RedfishCredentials, poll: PollConfig) -> Self {
        Self { credentials, poll }
    }

    /// Runs discovery for `nodes` against `client`.
    ///
    /// This method:
    /// - Reads the current endpoint list once and skips nodes already at `DiscoverOK`
    /// - Sends one registration per remaining node
    /// - Polls until those nodes converge or the attempt budget runs out
    ///
    /// # Errors
    ///
    /// The initial endpoint listing and every registration are required
    /// calls: any failure there is returned immediately. Polling failures
    /// are tolerated, and an unconverged node is reported in
    /// [`DiscoveryReport::undiscovered`] rather than as an error.
    pub async fn execute(&self, client: &SmdClient, nodes: &[NodeId]) -> SmdResult<DiscoveryReport> {
        let targets: BTreeSet<NodeId> = nodes.iter().cloned().collect();
        let initial = client.fetch_statuses().await?;

        let (already_discovered, pending): (BTreeSet<NodeId>, BTreeSet<NodeId>) = targets
            .into_iter()
            .partition(|node| initial.get(node).is_some_and(DiscoveryStatus::is_discover_ok));

        info!(
            instance = client.name(),
            already_discovered = already_discovered.len(),
            pending = pending.len(),
            "starting discovery"
        );

        for node in &pending {
            let request = RedfishEndpointRegistration::for_node(node, &self.credentials).into_request();
            match client.register_redfish_endpoints(&request).await? {
                RegistrationOutcome::Created => info!(%node, "discovery requested"),
                RegistrationOutcome::AlreadyRegistered => {
                    warn!(%node, "endpoint already registered, waiting for existing discovery")
                }
            }
        }

        let undiscovered = poll_until_discovered(
            pending.clone(),
            client,
            &DiscoveryStatus::discover_ok(),
            self.poll.max_attempts,
            self.poll.interval,
        )
        .await;

        Ok(DiscoveryReport {
            already_discovered,
            registered: pending,
            undiscovered,
        })
    }
}
