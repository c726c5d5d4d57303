use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use engine::SalesBot;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub bot: Arc<SalesBot>,
}

/// Builds the HTTP routes in front of the bot.
pub fn build_router(bot: Arc<SalesBot>) -> Router {
    let app_state = Arc::new(AppState { bot });
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/commands", get(handlers::get_commands))
        .route("/api/interactions", post(handlers::post_interaction))
        .fallback(handlers::not_found)
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(64 * 1024))
}

/// Binds `addr` and serves the bot until the process is stopped.
pub async fn run_server(addr: SocketAddr, bot: Arc<SalesBot>) -> anyhow::Result<()> {
    let app = build_router(bot);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server started and listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
