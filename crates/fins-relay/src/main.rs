//! FINS Relay - development CORS relay for the SemantyFish catalog
//!
//! Browsers cannot call the catalog directly from the dev front-end, so this
//! service forwards `/api/*` to the catalog's resource tree and answers with
//! the catalog's JSON.

mod error;
mod proxy;
mod server;
mod types;

use crate::error::{RelayError, Result};
use crate::proxy::Forwarder;
use crate::server::{start_server, ServerState, SharedState};
use crate::types::{parse_flag, parse_origins, RelayConfig};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let env_filter = EnvFilter::from_default_env().add_directive("fins_relay=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    info!("Starting FINS relay...");

    let config = load_config()?;
    info!("Port: {}", config.port);
    info!(
        "Forwarding to: {}/{}",
        config.upstream_base_url, config.resource_prefix
    );
    info!("Allowed origins: {:?}", config.origins.allowed);
    info!("Allow any localhost origin: {}", config.origins.allow_localhost);

    let forwarder = Forwarder::new(&config.upstream_base_url, &config.resource_prefix);
    let state: SharedState = Arc::new(ServerState::new(
        forwarder,
        config.origins,
        config.preserve_upstream_status,
    ));

    // Start HTTP server (blocking)
    start_server(state, config.port).await?;

    Ok(())
}

fn load_config() -> Result<RelayConfig> {
    let mut config = RelayConfig::default();

    if let Ok(raw) = std::env::var("PORT") {
        config.port = raw
            .parse::<u16>()
            .map_err(|e| RelayError::Config(format!("invalid PORT {:?}: {}", raw, e)))?;
    }

    if let Ok(url) = std::env::var("UPSTREAM_BASE_URL") {
        config.upstream_base_url = url;
    }

    if let Ok(prefix) = std::env::var("RESOURCE_PREFIX") {
        config.resource_prefix = prefix;
    }

    if let Ok(raw) = std::env::var("CORS_ORIGINS") {
        config.origins.allowed = parse_origins(&raw);
    }

    if let Ok(raw) = std::env::var("CORS_ALLOW_LOCALHOST") {
        config.origins.allow_localhost = parse_flag(&raw).ok_or_else(|| {
            RelayError::Config(format!("invalid CORS_ALLOW_LOCALHOST {:?}", raw))
        })?;
    }

    if let Ok(raw) = std::env::var("PRESERVE_UPSTREAM_STATUS") {
        config.preserve_upstream_status = parse_flag(&raw).ok_or_else(|| {
            RelayError::Config(format!("invalid PRESERVE_UPSTREAM_STATUS {:?}", raw))
        })?;
    }

    Ok(config)
}
