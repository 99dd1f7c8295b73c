//! Application assembly

use axum::Router;

use crate::middleware::apply_middleware_with_config;
use crate::routes::create_router;
use crate::state::ApiState;

/// Build the HTTP application with all routes and middleware
pub fn create_app(state: ApiState) -> Router {
    let config = state.config();
    let router = apply_middleware_with_config(
        create_router(),
        &config.cors,
        config.app.env.is_production(),
    );
    router.with_state(state)
}
