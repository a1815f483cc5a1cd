use std::sync::Arc;

use serde::Serialize;

use crate::{
    db::CatalogStore,
    models::Reel,
    services::providers::{EmbeddingProvider, EmbeddingTask},
};

/// Outcome counts for one ingestion batch
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct IngestReport {
    /// New rows written
    pub ingested: usize,
    /// Identity collisions skipped (existing row wins)
    pub duplicates: usize,
    /// Items that failed to embed or persist
    pub failed: usize,
}

/// Writes reels into the catalog, one embedding per description
///
/// Ingestion is per-item best-effort: a failed item is logged and skipped,
/// never aborting the rest of the batch.
pub struct IngestionService {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn CatalogStore>,
}

impl IngestionService {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, store: Arc<dyn CatalogStore>) -> Self {
        Self { embedder, store }
    }

    /// Embeds and upserts each reel, returning batch counts
    pub async fn ingest(&self, reels: Vec<Reel>) -> IngestReport {
        let mut report = IngestReport::default();

        for reel in reels {
            let embedding = match self
                .embedder
                .embed(&reel.description, EmbeddingTask::Document)
                .await
            {
                Ok(embedding) => embedding,
                Err(e) => {
                    tracing::warn!(url = %reel.url, error = %e, "embedding failed, skipping reel");
                    report.failed += 1;
                    continue;
                }
            };

            let url = reel.url.clone();
            match self.store.upsert(reel, embedding).await {
                Ok(true) => {
                    tracing::info!(url = %url, "reel ingested");
                    report.ingested += 1;
                }
                Ok(false) => {
                    tracing::debug!(url = %url, "reel already present, skipped");
                    report.duplicates += 1;
                }
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "upsert failed, skipping reel");
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            ingested = report.ingested,
            duplicates = report.duplicates,
            failed = report.failed,
            "ingestion batch finished"
        );

        report
    }
}

/// Seed catalog used by the administrative setup endpoint
pub fn sample_reels() -> Vec<Reel> {
    vec![
        Reel::new(
            "https://facebook.com/reels/funny_cat_video_1",
            "A chubby cat gets spooked by a cucumber, funny enough to rewatch",
            0.98,
        ),
        Reel::new(
            "https://facebook.com/reels/cooking_fail_2",
            "A rookie chef's kitchen disaster, absolutely hilarious",
            0.95,
        ),
        Reel::new(
            "https://facebook.com/reels/nature_relax_3",
            "Beautiful Swiss mountain scenery with calm music to help you relax",
            0.92,
        ),
        Reel::new(
            "https://facebook.com/reels/dog_skate_4",
            "A clever dog shows off skateboarding moves like a pro",
            0.94,
        ),
        Reel::new(
            "https://facebook.com/reels/magic_trick_5",
            "A magician demonstrates simple tricks you can do at home",
            0.89,
        ),
    ]
}
