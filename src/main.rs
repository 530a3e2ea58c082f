use std::sync::Arc;

use anyhow::Context;
use movie_recommender::{
    api::{create_router, AppState, QuerySettings},
    config::Config,
    services::{dataset::CsvFileSource, Snapshot},
    telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let config = Config::from_env()?;
    let settings = QuerySettings::from(&config);
    let source = Arc::new(CsvFileSource::new(&config.dataset_path));

    // The service refuses to start without a usable corpus
    let snapshot = Snapshot::load(source.as_ref(), settings.title_match)
        .await
        .with_context(|| format!("Failed to build recommendations from {}", config.dataset_path))?;

    let state = AppState::new(snapshot, source, settings);
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
