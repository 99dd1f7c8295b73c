//! Gateway server setup
//!
//! Mounts the WebSocket endpoint next to the HTTP API on one listener.

mod handler;
mod signal;
mod state;

pub use handler::ws_handler;
pub use signal::shutdown_signal;
pub use state::GatewayState;

use std::future::Future;

use axum::{routing::get, Router};
use chatdeck_common::{AppConfig, AppError, AppResult};
use chatdeck_service::ServiceContext;
use chatdeck_store::MemStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Create the gateway router
pub fn create_router() -> Router<GatewayState> {
    Router::new().route("/ws", get(ws_handler))
}

/// Build the complete application: `/ws` plus every HTTP route
pub fn create_app(state: GatewayState) -> Router {
    let api = chatdeck_api::create_app(state.api_state());

    create_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .merge(api)
}

/// Fresh state over an empty in-memory store
pub fn create_gateway_state(config: AppConfig) -> GatewayState {
    let store = MemStore::new();
    let service_context = ServiceContext::from_store(&store, config.history.clone());
    GatewayState::new(service_context, config)
}

/// Serve on an already bound listener until `shutdown` resolves
///
/// On shutdown the session registry is cleared, which closes every socket's
/// outbound queue and lets the open connections wind down.
pub async fn serve<F>(listener: TcpListener, state: GatewayState, shutdown: F) -> AppResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let registry_state = state.clone();
    let app = create_app(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            registry_state.registry().clear();
        })
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Bind the configured address and run until Ctrl-C
pub async fn run(config: AppConfig) -> AppResult<()> {
    let addr = config.server.address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::bind(addr.as_str(), e))?;

    tracing::info!(address = %addr, "Listening (HTTP on /api, WebSocket on /ws)");

    let state = create_gateway_state(config);
    serve(listener, state, shutdown_signal()).await
}
