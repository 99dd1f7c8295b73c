//! Chatdeck server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p chatdeck-gateway
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use chatdeck_common::{try_init_tracing_with_config, AppConfig, AppResult, TracingConfig};
use tracing::info;

#[tokio::main]
async fn main() {
    if let Err(e) = start().await {
        // Tracing may not be up yet when configuration fails
        eprintln!("Chatdeck failed: {e}");
        std::process::exit(1);
    }
}

async fn start() -> AppResult<()> {
    let config = AppConfig::from_env()?;

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        address = %config.server.address(),
        "Starting Chatdeck..."
    );

    chatdeck_gateway::run(config).await
}
