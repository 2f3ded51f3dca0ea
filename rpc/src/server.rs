//! Axum-based RPC server.

use crate::error::RpcError;
use crate::handlers::{self, AppState};
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Build the router with every endpoint mounted.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/display", get(handlers::display))
        .route("/panel", get(handlers::member_panel))
        .route("/proposals", post(handlers::submit_proposal))
        .route("/proposals/drafts", get(handlers::list_drafts))
        .route("/proposals/open", get(handlers::open_proposal))
        .route("/proposals/closed", get(handlers::recently_closed))
        .route("/proposals/:id", get(handlers::get_proposal))
        .route("/proposals/:id/open", post(handlers::open_voting))
        .route("/proposals/:id/close", post(handlers::close_voting))
        .route("/proposals/:id/ballots", post(handlers::cast_vote))
        .route("/proposals/:id/tally", get(handlers::tally))
        // The public screen polls from another origin.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub struct RpcServer {
    pub addr: SocketAddr,
    state: AppState,
}

impl RpcServer {
    pub fn new(addr: SocketAddr, state: AppState) -> Self {
        Self { addr, state }
    }

    /// Serve until Ctrl-C.
    pub async fn start(&self) -> Result<(), RpcError> {
        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .map_err(|e| RpcError::Server(format!("bind {}: {e}", self.addr)))?;
        info!("RPC server listening on {}", self.addr);
        axum::serve(listener, router(self.state.clone()))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| RpcError::Server(e.to_string()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
