use crate::{SmdClient, SmdResult};
use tracing::info;

/// Copies component state from one SMD instance into another.
#[derive(Debug, Default, Clone, Copy)]
pub struct SyncService;

impl SyncService {
    pub fn new() -> Self {
        Self
    }

    /// Reads every component from `source` and posts the same payload to
    /// `target`. Returns the number of records copied.
    ///
    /// # Errors
    ///
    /// Both calls are required; a failure of either is returned as-is.
    pub async fn copy_components(&self, source: &SmdClient, target: &SmdClient) -> SmdResult<usize> {
        let components = source.components().await?;
        info!(
            source = source.name(),
            target = target.name(),
            count = components.len(),
            ids = %components.ids().join(","),
            "copying components"
        );
        target.seed_components(&components).await?;
        Ok(components.len())
    }
}
