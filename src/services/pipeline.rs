use crate::{
    error::AppResult,
    models::RecommendationResponse,
    services::{presentation::PresentationGenerator, retrieval::RetrievalService},
};

/// Composes retrieval and presentation into one request-scoped pipeline
///
/// Stages run strictly in order: embed, search, generate, validate. Typed
/// failures from either stage propagate to the request boundary, where the
/// error-to-response mapping hides the detail behind a generic message.
pub struct RecommendationPipeline {
    retrieval: RetrievalService,
    presentation: PresentationGenerator,
}

impl RecommendationPipeline {
    pub fn new(retrieval: RetrievalService, presentation: PresentationGenerator) -> Self {
        Self {
            retrieval,
            presentation,
        }
    }

    /// Answers one query with a validated recommendation response
    pub async fn handle(&self, query: &str) -> AppResult<RecommendationResponse> {
        let candidates = self.retrieval.retrieve(query).await.map_err(|e| {
            tracing::error!(error = %e, "retrieval stage failed");
            e
        })?;

        let response = self.presentation.present(&candidates).await.map_err(|e| {
            tracing::error!(error = %e, "presentation stage failed");
            e
        })?;

        tracing::info!(cards = response.content_cards.len(), "query handled");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        db::catalog::MockCatalogStore,
        error::AppError,
        models::cards::FALLBACK_CTA_URL,
        services::providers::{MockEmbeddingProvider, MockTextGenerator},
    };

    fn pipeline_with(
        store: MockCatalogStore,
        embedder: MockEmbeddingProvider,
        generator: MockTextGenerator,
    ) -> RecommendationPipeline {
        let embedder = Arc::new(embedder);
        let store = Arc::new(store);
        RecommendationPipeline::new(
            RetrievalService::new(embedder, store),
            PresentationGenerator::new(Arc::new(generator)),
        )
    }

    #[tokio::test]
    async fn test_empty_catalog_yields_fallback_response() {
        let mut embedder = MockEmbeddingProvider::new();
        embedder.expect_embed().returning(|_, _| Ok(vec![0.0; 4]));

        let mut store = MockCatalogStore::new();
        store.expect_search().returning(|_, _| Ok(Vec::new()));

        let mut generator = MockTextGenerator::new();
        generator.expect_generate().never();

        let pipeline = pipeline_with(store, embedder, generator);
        let response = pipeline.handle("anything").await.unwrap();

        assert_eq!(response.content_cards.len(), 1);
        assert_eq!(response.content_cards[0].cta_button.url, FALLBACK_CTA_URL);
    }

    #[tokio::test]
    async fn test_embedding_failure_reaches_the_boundary() {
        let mut embedder = MockEmbeddingProvider::new();
        embedder.expect_embed().returning(|_, _| {
            Err(AppError::EmbeddingUnavailable("backend down".to_string()))
        });

        let store = MockCatalogStore::new();
        let generator = MockTextGenerator::new();

        let pipeline = pipeline_with(store, embedder, generator);
        let result = pipeline.handle("anything").await;

        assert!(matches!(result, Err(AppError::EmbeddingUnavailable(_))));
    }
}
