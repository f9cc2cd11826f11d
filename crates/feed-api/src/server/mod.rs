//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;

use axum::Router;
use feed_common::{AppConfig, AppError};
use feed_service::ServiceContext;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router();
    let router = apply_middleware(
        router,
        &state.config().cors,
        state.config().app.env.is_production(),
    );
    router.with_state(state)
}

/// Wire the engine from configuration
pub fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let service_context = ServiceContext::from_config(&config)?;

    info!(
        worker_id = config.snowflake.worker_id,
        decay_millis = config.ranking.decay_millis,
        comment_weight = config.ranking.comment_weight,
        "Feed engine ready"
    );

    Ok(AppState::new(service_context, config))
}

/// Serve `app` on an already bound listener until the server stops
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), AppError> {
    axum::serve(listener, app)
        .await
        .map_err(AppError::Server)
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| AppError::Bind { addr, source })?;

    info!("Server listening on http://{}", addr);

    serve(listener, app).await
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid API_HOST/API_PORT: {e}")))?;

    let state = create_app_state(config)?;
    let app = create_app(state);

    run_server(app, addr).await
}
