use crate::{DiffResult, SmdClient, SmdError, SmdResult, diff_grouped_by};
use serde_json::Value;
use tracing::{info, warn};

/// Field that identifies a component record.
pub const COMPONENT_KEY: &str = "ID";

/// Compares two component lists grouped by their `ID` field.
///
/// Ordering does not matter. An empty result means the collections are
/// equivalent.
///
/// # Errors
///
/// Returns `SmdError::Validation` if a record is not an object, has no
/// string `ID`, or shares its `ID` with another record on the same side.
pub fn compare(expected: &[Value], actual: &[Value]) -> SmdResult<DiffResult> {
    Ok(diff_grouped_by(expected, actual, COMPONENT_KEY)?)
}

/// Checks that two SMD instances hold the same component state.
#[derive(Debug, Default, Clone, Copy)]
pub struct CompareService;

impl CompareService {
    pub fn new() -> Self {
        Self
    }

    /// Fetches both component lists and compares them.
    ///
    /// # Returns
    ///
    /// * `Ok(DiffResult)` (always empty) if both sides match
    /// * `Err(SmdError::StateMismatch)` carrying the full diff otherwise
    ///
    /// # Errors
    ///
    /// Any failed or unparseable fetch is returned before comparing.
    pub async fn verify(&self, expected: &SmdClient, actual: &SmdClient) -> SmdResult<DiffResult> {
        let expected_components = expected.components().await?;
        let actual_components = actual.components().await?;

        info!(
            expected = expected.name(),
            expected_count = expected_components.len(),
            actual = actual.name(),
            actual_count = actual_components.len(),
            "comparing components"
        );

        let diff = compare(&expected_components.components, &actual_components.components)?;
        if diff.is_empty() {
            info!("component state matches");
            Ok(diff)
        } else {
            warn!(
                changes = diff.change_count(),
                records = %diff.record_ids().join(","),
                "component state differs"
            );
            Err(SmdError::StateMismatch(diff))
        }
    }
}
