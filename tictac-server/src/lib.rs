//! TICTAC Server - JSON API over one game session
//!
//! The UI is an outside collaborator: it reads `/api/game` and posts moves
//! and jumps. Every other path answers `404 {"error": ...}`.

mod routes;
mod state;

use axum::{
    http::{StatusCode, Uri},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

pub use state::ServerState;

/// Server configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8003,
        }
    }
}

/// Create the router with all routes
pub fn create_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/api/status", get(routes::status::status_handler))
        .route("/api/game", get(routes::game::get_game_state))
        .route("/api/game/move", post(routes::game::make_player_move))
        .route("/api/game/jump", post(routes::game::jump_to_move))
        .route("/api/game/new", post(routes::game::new_game))
        .with_state(state)
        .fallback(not_found)
}

async fn not_found(uri: Uri) -> impl IntoResponse {
    let body = Json(json!({ "error": format!("no route for {}", uri.path()) }));
    (StatusCode::NOT_FOUND, body)
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = config.addr();
    let router = create_router(Arc::new(ServerState::new()));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "TICTAC server listening");

    axum::serve(listener, router).await?;

    Ok(())
}
