use std::{env, net::SocketAddr, path::Path, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use service::{file::player_store::FilePlayerStore, players::PlayerStore, runtime};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(4000);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Resolve the data file path from configs or the DATA_FILE env var.
fn load_data_file() -> String {
    match configs::load_default() {
        Ok(cfg) => cfg.storage.data_file,
        Err(_) => env::var("DATA_FILE").unwrap_or_else(|_| "data/players.json".to_string()),
    }
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let data_file = load_data_file();
    if let Some(dir) = Path::new(&data_file)
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
    {
        runtime::ensure_env(&dir.to_string_lossy()).await?;
    }

    // Player collection, persisted as a single JSON document.
    let store = FilePlayerStore::new(&data_file).await?;
    let store: Arc<dyn PlayerStore> = store;

    // Build router
    let cors = build_cors();
    let app: Router = routes::build_router(store, cors);

    // Bind and serve
    let addr = load_bind_addr()?;
    info!(%addr, %data_file, "starting player service");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
