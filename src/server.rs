use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{api, config::Config, types::PendingLogin};

pub fn router(config: Arc<Config>, state: Arc<Mutex<Option<PendingLogin>>>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .layer(Extension(state))
        .layer(Extension(config))
}

/// Binds the configured server address.
pub async fn bind_api_server(config: &Config) -> Result<TcpListener, String> {
    let addr = SocketAddr::from_str(&config.server_address)
        .map_err(|e| format!("Failed to parse server address: {}", e))?;

    TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind {}: {}", addr, e))
}

/// Serves the login routes on an already bound listener until the process ends.
pub async fn start_api_server(
    listener: TcpListener,
    config: Arc<Config>,
    state: Arc<Mutex<Option<PendingLogin>>>,
) -> Result<(), String> {
    let app = router(config, state);
    axum::serve(listener, app).await.map_err(|e| e.to_string())
}
