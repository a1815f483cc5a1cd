use pgvector::Vector;
use sqlx::PgPool;

use crate::{
    error::{AppError, AppResult},
    models::Reel,
};

/// Persistent catalog of reels with similarity search
///
/// Implementations persist one row per reel identity (url) together with its
/// precomputed embedding, and rank stored rows by vector distance to a query
/// embedding. Embeddings are supplied by the caller; the store computes
/// nothing itself.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// Idempotent structural setup for the backing storage
    ///
    /// Safe to call any number of times; has no effect after the first
    /// successful call.
    async fn ensure_schema(&self) -> AppResult<()>;

    /// Persists a reel together with its embedding
    ///
    /// Identity collisions succeed as a no-op: the existing row wins and the
    /// call returns `false`. Returns `true` when a new row was written.
    async fn upsert(&self, reel: Reel, embedding: Vec<f32>) -> AppResult<bool>;

    /// Returns up to `k` reels ordered by ascending distance to `query_vector`
    ///
    /// Ties are broken by store iteration order, which is not deterministic
    /// for identical-distance rows.
    async fn search(&self, query_vector: Vec<f32>, k: usize) -> AppResult<Vec<Reel>>;
}

/// pgvector-backed catalog store
///
/// One `reels` table with a unique url column and a VECTOR(D) embedding
/// column, searched with the L2 distance operator.
#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
    dimensions: usize,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool, dimensions: usize) -> Self {
        Self { pool, dimensions }
    }
}

/// DDL for the reels table with the given embedding width
fn schema_ddl(dimensions: usize) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS reels (
            id BIGSERIAL PRIMARY KEY,
            url VARCHAR(255) UNIQUE NOT NULL,
            description TEXT NOT NULL,
            quality_score DOUBLE PRECISION NOT NULL,
            embedding VECTOR({dimensions}) NOT NULL
        )"
    )
}

#[async_trait::async_trait]
impl CatalogStore for PgCatalogStore {
    async fn ensure_schema(&self) -> AppResult<()> {
        sqlx::query("CREATE EXTENSION IF NOT EXISTS vector")
            .execute(&self.pool)
            .await?;

        sqlx::query(&schema_ddl(self.dimensions))
            .execute(&self.pool)
            .await?;

        tracing::info!(dimensions = self.dimensions, "reels table checked/created");
        Ok(())
    }

    async fn upsert(&self, reel: Reel, embedding: Vec<f32>) -> AppResult<bool> {
        if embedding.len() != self.dimensions {
            return Err(AppError::Internal(format!(
                "embedding width {} does not match catalog width {}",
                embedding.len(),
                self.dimensions
            )));
        }

        let result = sqlx::query(
            "INSERT INTO reels (url, description, quality_score, embedding)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (url) DO NOTHING",
        )
        .bind(&reel.url)
        .bind(&reel.description)
        .bind(reel.quality_score)
        .bind(Vector::from(embedding))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn search(&self, query_vector: Vec<f32>, k: usize) -> AppResult<Vec<Reel>> {
        let reels = sqlx::query_as::<_, Reel>(
            "SELECT url, description, quality_score FROM reels
             ORDER BY embedding <-> $1
             LIMIT $2",
        )
        .bind(Vector::from(query_vector))
        .bind(k as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(reels)
    }
}
