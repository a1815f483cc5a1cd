use std::sync::Arc;

use crate::{
    db::CatalogStore,
    services::{
        providers::{EmbeddingProvider, TextGenerator},
        IngestionService, PresentationGenerator, RecommendationPipeline, RetrievalService,
    },
};

/// Shared application state
///
/// Built once at startup from the configured store and model clients, then
/// cloned into every handler. All fields are immutable after construction;
/// the only mutable shared resource is the store behind its own pool.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<RecommendationPipeline>,
    pub ingestion: Arc<IngestionService>,
    pub store: Arc<dyn CatalogStore>,
}

impl AppState {
    /// Wires the service graph from its three external capabilities
    pub fn new(
        store: Arc<dyn CatalogStore>,
        embedder: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        let retrieval = RetrievalService::new(embedder.clone(), store.clone());
        let presentation = PresentationGenerator::new(generator);

        Self {
            pipeline: Arc::new(RecommendationPipeline::new(retrieval, presentation)),
            ingestion: Arc::new(IngestionService::new(embedder, store.clone())),
            store,
        }
    }
}
