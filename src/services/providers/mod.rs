/// External model provider abstractions
///
/// The pipeline talks to two generative capabilities: a text-embedding
/// backend and a text-generation backend. Both sit behind traits so the
/// concrete client (Gemini) can be swapped or mocked without touching the
/// services that consume them.
use crate::error::AppResult;

pub mod gemini;

/// Intended use of an embedding
///
/// Some backends optimize document and query vectors asymmetrically, so the
/// task may change the numeric result. It never changes the vector width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingTask {
    /// Embedding a catalog description at ingestion time
    Document,
    /// Embedding a user query at retrieval time
    Query,
}

impl EmbeddingTask {
    /// Wire value understood by the Gemini embedContent endpoint
    pub fn as_task_type(&self) -> &'static str {
        match self {
            EmbeddingTask::Document => "RETRIEVAL_DOCUMENT",
            EmbeddingTask::Query => "RETRIEVAL_QUERY",
        }
    }
}

/// Trait for text-embedding backends
///
/// `embed` returns a vector of the provider's configured width for every
/// input. A backend that cannot produce a vector fails with
/// `EmbeddingUnavailable`; it never returns a zero vector in place of an
/// error.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str, task: EmbeddingTask) -> AppResult<Vec<f32>>;

    /// Vector width this provider produces
    fn dimensions(&self) -> usize;
}

/// Trait for generative text backends
///
/// Takes a fully-assembled prompt and returns the model's raw text output.
/// Callers own prompt construction and output validation; the provider only
/// moves text across the wire. Failures surface as `GenerationFailed`.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> AppResult<String>;
}
