//! Gallery ingestion of Instagram media.

use serde::Serialize;
use sqlx::PgPool;
use pasos_core::instagram::{InstagramMedia, MediaRef};
use pasos_db::repositories::media_item_repo::UpsertOutcome;
use pasos_db::repositories::MediaItemRepo;

use crate::client::{InstagramClient, InstagramError};

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error(transparent)]
    Instagram(#[from] InstagramError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Per-batch ingestion counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Media references offered for ingestion.
    pub received: usize,
    /// Items written to the gallery (inserted or refreshed).
    pub ingested: usize,
    pub inserted: usize,
    pub updated: usize,
    /// Items dropped: no media URL, fetch failure or write failure.
    pub skipped: usize,
}

impl IngestReport {
    fn record(&mut self, outcome: Option<UpsertOutcome>) {
        match outcome {
            Some(UpsertOutcome::Inserted) => {
                self.ingested += 1;
                self.inserted += 1;
            }
            Some(UpsertOutcome::Updated) => {
                self.ingested += 1;
                self.updated += 1;
            }
            None => self.skipped += 1,
        }
    }

    async fn store(&mut self, pool: &PgPool, media_id: &str, media: InstagramMedia) {
        match ingest_media(pool, media).await {
            Ok(outcome) => self.record(outcome),
            Err(e) => {
                tracing::error!(media_id = %media_id, error = %e, "Failed to ingest Instagram media");
                self.skipped += 1;
            }
        }
    }
}

/// Upsert one media object. Returns `None` when it has nothing to show.
pub async fn ingest_media(
    pool: &PgPool,
    media: InstagramMedia,
) -> Result<Option<UpsertOutcome>, IngestError> {
    let media_id = media.id.clone();
    let Some(item) = media.into_gallery_item() else {
        tracing::info!(media_id = %media_id, "Instagram media has no URL, skipping");
        return Ok(None);
    };
    let (row, outcome) = MediaItemRepo::upsert_instagram(pool, &item).await?;
    tracing::info!(
        media_id = %media_id,
        media_item_id = row.id,
        category = %row.category,
        outcome = ?outcome,
        "Instagram media ingested"
    );
    Ok(Some(outcome))
}

/// Ingest webhook media references.
///
/// References without inline fields are fetched through `client`; with no
/// client they are skipped. Individual failures are logged and counted as
/// skipped so one bad item does not abort the batch.
pub async fn ingest_refs(
    pool: &PgPool,
    client: Option<&InstagramClient>,
    refs: Vec<MediaRef>,
) -> IngestReport {
    let mut report = IngestReport {
        received: refs.len(),
        ..Default::default()
    };

    for media_ref in refs {
        let media_id = media_ref.media_id().to_string();
        let media = match media_ref {
            MediaRef::Inline(media) => media,
            MediaRef::Id(id) => match client {
                Some(client) => match client.fetch_media(&id).await {
                    Ok(media) => media,
                    Err(e) => {
                        tracing::warn!(media_id = %id, error = %e, "Failed to fetch Instagram media");
                        report.skipped += 1;
                        continue;
                    }
                },
                None => {
                    tracing::warn!(media_id = %id, "No Instagram access token, cannot fetch media");
                    report.skipped += 1;
                    continue;
                }
            },
        };

        report.store(pool, &media_id, media).await;
    }

    report
}

/// Pull the latest `limit` media from the account and upsert them.
///
/// Only a failed feed request is an error; items that cannot be stored are
/// logged and counted as skipped, as for webhook deliveries.
pub async fn sync_recent(
    pool: &PgPool,
    client: &InstagramClient,
    limit: usize,
) -> Result<IngestReport, IngestError> {
    let media = client.recent_media(limit).await?;
    let mut report = IngestReport {
        received: media.len(),
        ..Default::default()
    };
    for item in media {
        let media_id = item.id.clone();
        report.store(pool, &media_id, item).await;
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_counts_outcomes() {
        let mut report = IngestReport::default();
        report.record(Some(UpsertOutcome::Inserted));
        report.record(Some(UpsertOutcome::Updated));
        report.record(None);
        assert_eq!(report.ingested, 2);
        assert_eq!((report.inserted, report.updated, report.skipped), (1, 1, 1));
    }
}
