use crate::cli::settings::Settings;
use anyhow::{Context, Result, bail};
use serde::Serialize;
use smd_compare::{CompareService, ComparisonRunner, SmdError, SmdResult, SyncService};
use tracing::info;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints the diff carried by a `StateMismatch` before handing the error on.
fn report_mismatch<T>(result: SmdResult<T>) -> Result<T> {
    match result {
        Err(SmdError::StateMismatch(diff)) => {
            println!("{}", diff);
            bail!(
                "component state differs: {} change(s) across {} record(s)",
                diff.change_count(),
                diff.record_ids().len()
            )
        }
        other => Ok(other?),
    }
}

pub async fn run(settings: &Settings) -> Result<()> {
    let primary = settings.primary_client()?;
    let secondary = settings.secondary_client()?;
    let nodes = settings.node_ids()?;
    let runner = ComparisonRunner::new(settings.discovery_service()?)
        .allow_incomplete_discovery(settings.allow_incomplete_discovery);

    let outcome = report_mismatch(runner.run(&primary, &secondary, &nodes).await)?;
    print_json(&outcome)
}

pub async fn discover(settings: &Settings) -> Result<()> {
    let primary = settings.primary_client()?;
    let nodes = settings.node_ids()?;
    let report = settings
        .discovery_service()?
        .execute(&primary, &nodes)
        .await
        .with_context(|| format!("discovery on {}", primary.url()))?;

    print_json(&report)?;
    if !settings.allow_incomplete_discovery {
        report.ensure_complete()?;
    }
    Ok(())
}

pub async fn sync(settings: &Settings) -> Result<()> {
    let primary = settings.primary_client()?;
    let secondary = settings.secondary_client()?;
    let copied = SyncService::new()
        .copy_components(&primary, &secondary)
        .await?;

    info!(copied, "sync finished");
    print_json(&serde_json::json!({ "components_copied": copied }))
}

pub async fn compare(settings: &Settings) -> Result<()> {
    let primary = settings.primary_client()?;
    let secondary = settings.secondary_client()?;
    report_mismatch(CompareService::new().verify(&primary, &secondary).await)?;

    println!("component state matches");
    Ok(())
}
