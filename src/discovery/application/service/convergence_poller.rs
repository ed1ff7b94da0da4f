use crate::{DiscoveryStatus, NodeId, RedfishEndpoint, SmdClient, SmdResult};
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Anything that can report the current discovery status of each node.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiscoveryStatusSource: Send + Sync {
    /// Current status per node. Nodes without a recorded status are absent.
    async fn fetch_statuses(&self) -> SmdResult<HashMap<NodeId, DiscoveryStatus>>;
}

#[async_trait]
impl DiscoveryStatusSource for SmdClient {
    async fn fetch_statuses(&self) -> SmdResult<HashMap<NodeId, DiscoveryStatus>> {
        let endpoints = self.redfish_endpoints().await?;
        Ok(statuses_by_node(endpoints))
    }
}

pub(crate) fn statuses_by_node(
    endpoints: Vec<RedfishEndpoint>,
) -> HashMap<NodeId, DiscoveryStatus> {
    endpoints
        .into_iter()
        .filter_map(|endpoint| {
            let status = endpoint.discovery_info?.last_discovery_status?;
            Some((endpoint.id, status))
        })
        .collect()
}

/// Polls `source` until every target reports `terminal` or `max_attempts`
/// fetches have been made, and returns the nodes that never got there.
///
/// Fetch failures are logged and count as an attempt. A node that reaches
/// `terminal` is not checked again. The loop sleeps `interval` between
/// attempts but never after the last one, so a budget of `n` attempts
/// sleeps at most `n - 1` times.
pub async fn poll_until_discovered<S>(
    targets: BTreeSet<NodeId>,
    source: &S,
    terminal: &DiscoveryStatus,
    max_attempts: u32,
    interval: Duration,
) -> BTreeSet<NodeId>
where
    S: DiscoveryStatusSource + ?Sized,
{
    let mut remaining = targets;
    if remaining.is_empty() {
        return remaining;
    }

    for attempt in 1..=max_attempts {
        match source.fetch_statuses().await {
            Ok(statuses) => {
                remaining.retain(|node| statuses.get(node) != Some(terminal));
                if remaining.is_empty() {
                    info!(attempt, "all nodes reached {}", terminal);
                    break;
                }
                debug!(attempt, remaining = remaining.len(), "waiting for discovery");
            }
            Err(e) => {
                warn!(attempt, error = %e, "failed to fetch discovery status");
            }
        }

        if attempt < max_attempts {
            tokio::time::sleep(interval).await;
        }
    }

    if !remaining.is_empty() {
        let nodes: Vec<&str> = remaining.iter().map(NodeId::as_str).collect();
        warn!(
            attempts = max_attempts,
            nodes = %nodes.join(","),
            "discovery did not converge"
        );
    }

    remaining
}
