//! This project is split in 2 main modules:
//!
//! - [gateway] (outbound Daraja gateway client)
//! - [api] (inbound API surface for the chama web client)
#![doc = include_str!("../README.md")]

use std::any::Any;
use std::net::{Ipv4Addr, SocketAddrV4};

use axum::Router;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tower_http::catch_panic::CatchPanicLayer;
use tracing_subscriber::EnvFilter;

/// Inbound HTTP surface
///
/// This module defines the endpoints the chama web client calls and the
/// endpoint Daraja posts asynchronous payment results to.
mod api;
mod config;
/// Gateway integration implementation
///
/// This module defines the types and methods to communicate with the
/// Safaricom Daraja STK-push gateway.
mod gateway;
mod state;

/// Converts a handler panic into the api's standard failure body instead of
/// an empty 500.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!("handler panicked: {detail}");
    api::ApiError::Internal(detail).into_response()
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_ansi(false)
        .init();

    match dotenvy::dotenv() {
        Ok(p) => tracing::info!(path = %p.display(), "Loaded environment variables from .env file"),
        Err(e) => tracing::warn!("Failed to load environment variables from .env: {e}"),
    };
    let config = config::AppConfig::from_env().expect("configuration is incomplete");
    let port = config.port;
    tracing::info!(environment = %config.environment, "Starting daraja-connect");

    let state = state::AppState::new(config);

    let app = Router::new()
        .route("/", get(api::home))
        .nest("/api", api::router())
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, port))
        .await
        .expect("listen address is available");

    tracing::info!("Serving on port {port}");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .expect("server runs until shutdown");
}
