use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dota_coach::api::{GeminiClient, OpenDotaClient};
use dota_coach::cache::{GameDataCache, GameDataSource};
use dota_coach::coach::Coach;
use dota_coach::config::{Config, HeroDataSource};
use dota_coach::data::StaticHeroSource;
use dota_coach::routes::{build_router, AppState};

const OPENDOTA_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dota_coach=info,tower_http=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting dota-coach");

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded");

    // Hero data source and cache
    let source: Arc<dyn GameDataSource> = match config.hero_data_source {
        HeroDataSource::OpenDota => Arc::new(OpenDotaClient::new(
            &config.opendota_api_url,
            config.meta_bracket,
            OPENDOTA_TIMEOUT,
        )?),
        HeroDataSource::Static => Arc::new(StaticHeroSource),
    };
    info!("Using {} hero data, cached for {:?}", source.name(), config.game_data_ttl);
    let cache = Arc::new(GameDataCache::new(source, config.game_data_ttl));

    // Model client
    let gemini = GeminiClient::new(
        &config.gemini_api_url,
        &config.gemini_model,
        &config.google_api_key,
        config.llm_timeout,
    )?;
    info!("Gemini client initialized for model {}", config.gemini_model);

    let state = AppState::new(Coach::new(cache, Arc::new(gemini)));
    let app = build_router(state, &config.static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutting down dota-coach");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
