//! HTTP surface for the dashboard.
//!
//! Routes:
//!
//! ```text
//! GET  /health
//! GET  /papers?search=&category=&page=   paged listing with feedback attached
//! POST /papers                           submit feedback (form)
//! GET  /feedback                         all feedback grouped by paper
//! GET  /bookmarks?user_name=&paper_id=
//! POST /bookmarks                        add bookmark (form)
//! ```

mod handlers;
mod state;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::app::App;
use crate::error::Result;

pub use state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/papers",
            get(handlers::list_papers).post(handlers::submit_feedback),
        )
        .route("/feedback", get(handlers::list_feedback))
        .route(
            "/bookmarks",
            get(handlers::list_bookmarks).post(handlers::add_bookmark),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(app: App, addr: &str) -> Result<()> {
    let router = build_router(AppState::new(app));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
}
