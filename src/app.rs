/*
 * Responsibility
 * - load Config → build dependencies → assemble the Router
 * - wrap the Router in the auth gate and the HTTP layers
 * - start serving with axum::serve()
 */
use std::{panic, process};

use anyhow::Result;
use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::api::v1::handlers::health::health;
use crate::config::Config;
use crate::middleware::{self, auth::AuthGate};
use crate::services::auth::build_static_authenticator;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,auth_gate=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash so it gets noticed. Production: default behaviour.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();

    // A missing TOKEN_PASSWORD ends the process here, before anything listens.
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting auth gate in {:?} mode on {} (realm: {})",
        config.app_env,
        config.addr,
        config.auth_realm
    );

    let state = build_state(&config);
    let gate = AuthGate::from_config(&config);
    let bypass: Vec<&str> = gate.bypass_list().iter().collect();
    tracing::info!(?bypass, "authentication bypass list");

    let app = build_router(state, &gate);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_state(config: &Config) -> AppState {
    AppState::new(
        build_static_authenticator(config),
        config.auth_realm.as_str(),
    )
}

/// Routes → auth gate → HTTP layers, outermost last.
pub fn build_router(state: AppState, gate: &AuthGate) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api::v1::routes())
        .with_state(state);

    let router = gate.apply(router);
    middleware::http::apply(router)
}
