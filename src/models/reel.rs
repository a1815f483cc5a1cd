use serde::{Deserialize, Serialize};

/// One recommendable reel record.
///
/// Used both as ingestion input and as the projection returned by similarity
/// search. The embedding computed from `description` lives only in the
/// catalog store and is never exposed past retrieval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Reel {
    /// Canonical URL of the reel; the stable identity and dedup key
    pub url: String,
    /// Free-text description; source of the reel's embedding
    pub description: String,
    /// Ranking hint for presentation, not for retrieval ordering
    pub quality_score: f64,
}

impl Reel {
    pub fn new(
        url: impl Into<String>,
        description: impl Into<String>,
        quality_score: f64,
    ) -> Self {
        Self {
            url: url.into(),
            description: description.into(),
            quality_score,
        }
    }
}
