use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use reelrec_api::{
    api::{create_router, AppState},
    config::Config,
    db::{create_pool, PgCatalogStore},
    services::providers::gemini::GeminiClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "reelrec_api=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("failed to load configuration")?;

    let pool = create_pool(&config.database_url)
        .await
        .context("failed to connect to database")?;

    let store = Arc::new(PgCatalogStore::new(pool, config.embedding_dimensions));
    let gemini = Arc::new(GeminiClient::new(&config).context("failed to build Gemini client")?);

    let state = AppState::new(store, gemini.clone(), gemini);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(addr = %addr, "server listening");
    axum::serve(listener, app)
        .await
        .context("server exited with error")?;

    Ok(())
}
