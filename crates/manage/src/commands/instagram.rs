//! `pasos-manage sync-instagram`: backfill the gallery from the Graph API.

use anyhow::Context;
use pasos_instagram::ingest::sync_recent;
use pasos_instagram::{InstagramClient, InstagramConfig};

use crate::cli::SyncInstagramArgs;

pub async fn run(args: SyncInstagramArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.limit > 0, "--limit must be at least 1");

    let config = InstagramConfig::from_env();
    let client = InstagramClient::from_config(&config)
        .context("INSTAGRAM_ACCESS_TOKEN must be set to sync media")?;
    let pool = super::connect(args.database_url.as_deref()).await?;

    let report = sync_recent(&pool, &client, args.limit)
        .await
        .context("Instagram sync failed")?;

    tracing::info!(
        received = report.received,
        inserted = report.inserted,
        updated = report.updated,
        skipped = report.skipped,
        "Instagram sync complete",
    );
    println!(
        "Synced {} media: {} new, {} updated, {} skipped",
        report.received, report.inserted, report.updated, report.skipped
    );
    Ok(())
}
