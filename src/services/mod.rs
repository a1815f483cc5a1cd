pub mod ingestion;
pub mod pipeline;
pub mod presentation;
pub mod providers;
pub mod retrieval;

pub use ingestion::{sample_reels, IngestReport, IngestionService};
pub use pipeline::RecommendationPipeline;
pub use presentation::PresentationGenerator;
pub use retrieval::{RetrievalService, TOP_K};
