//! End-to-end comparison: discover on the primary, copy its components to
//! the secondary, then check both sides hold the same state.

use crate::{
    CompareService, DiscoveryReport, DiscoveryService, NodeId, SmdClient, SmdResult, SyncService,
};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonOutcome {
    pub discovery: DiscoveryReport,
    pub components_copied: usize,
}

#[derive(Debug, Clone)]
pub struct ComparisonRunner {
    discovery: DiscoveryService,
    allow_incomplete_discovery: bool,
}

impl ComparisonRunner {
    pub fn new(discovery: DiscoveryService) -> Self {
        Self {
            discovery,
            allow_incomplete_discovery: false,
        }
    }

    /// Carry on to the comparison even if some nodes never finished
    /// discovery. Off by default: comparing partially discovered state can
    /// pass while hiding missing hardware.
    pub fn allow_incomplete_discovery(mut self, allow: bool) -> Self {
        self.allow_incomplete_discovery = allow;
        self
    }

    /// # Errors
    ///
    /// Returns the first failure: a required call, `DiscoveryIncomplete`
    /// (unless allowed), or `StateMismatch` with the full diff.
    pub async fn run(
        &self,
        primary: &SmdClient,
        secondary: &SmdClient,
        nodes: &[NodeId],
    ) -> SmdResult<ComparisonOutcome> {
        let report = self.discovery.execute(primary, nodes).await?;
        let discovery = if self.allow_incomplete_discovery {
            if !report.is_complete() {
                warn!(
                    undiscovered = report.undiscovered.len(),
                    "continuing with incomplete discovery"
                );
            }
            report
        } else {
            report.ensure_complete()?
        };

        let components_copied = SyncService::new()
            .copy_components(primary, secondary)
            .await?;
        CompareService::new().verify(primary, secondary).await?;

        info!(
            nodes = nodes.len(),
            components = components_copied,
            "comparison passed"
        );
        Ok(ComparisonOutcome {
            discovery,
            components_copied,
        })
    }
}
