//! CVSift — resume parsing and candidate-sifting server.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

mod export;
mod processing;
mod routes;
mod state;

use state::AppState;

fn resolve_data_dir() -> PathBuf {
    std::env::var("CVSIFT_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data_dir = resolve_data_dir();
    info!("Data directory: {}", data_dir.display());

    let config = cvsift_core::CvsiftConfig::from_env(&data_dir)?;
    let port = config.port;

    // ONNX if available, otherwise heuristics-only
    let embedder = cvsift_infer::create_embedder(&config.data_paths.models);

    let state = Arc::new(AppState::new(config, embedder));
    let app = routes::build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("CVSift server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
