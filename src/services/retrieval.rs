use std::sync::Arc;

use crate::{
    db::CatalogStore,
    error::AppResult,
    models::Reel,
    services::providers::{EmbeddingProvider, EmbeddingTask},
};

/// Number of nearest neighbors requested per query
pub const TOP_K: usize = 5;

/// Embeds a query and finds the nearest catalog reels
///
/// The two stages have deliberately different failure behavior: an embedding
/// failure is fatal (there is nothing to search with), while a store failure
/// degrades to an empty result so the pipeline can still answer with a
/// fallback card.
pub struct RetrievalService {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn CatalogStore>,
}

impl RetrievalService {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, store: Arc<dyn CatalogStore>) -> Self {
        Self { embedder, store }
    }

    /// Returns up to `TOP_K` reels ordered by ascending distance to the query
    ///
    /// An empty result is a normal outcome (empty catalog, no matches, or a
    /// search-side failure), not an error.
    pub async fn retrieve(&self, query: &str) -> AppResult<Vec<Reel>> {
        let query_vector = self.embedder.embed(query, EmbeddingTask::Query).await?;

        match self.store.search(query_vector, TOP_K).await {
            Ok(reels) => {
                tracing::info!(results = reels.len(), "retrieval completed");
                Ok(reels)
            }
            Err(e) => {
                // Fail-open: no suggestions beats no response.
                tracing::warn!(error = %e, "catalog search failed, returning empty result");
                Ok(Vec::new())
            }
        }
    }
}
