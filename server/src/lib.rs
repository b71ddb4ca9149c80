//! # Portal Server
//!
//! Same-origin proxy in front of the CEITBA REST API.
//!
//! # General Infrastructure
//! - Portal pages only ever talk to this server, never to the upstream API
//! - Each route forwards to its `/api/v1/...` counterpart and relays the
//!   upstream status and JSON body
//! - Upstream responses without a JSON content type (HTML error pages) are
//!   folded into a `{ "error": ... }` envelope with status 500, so browser
//!   callers never try to parse HTML as JSON
//! - Handlers are stateless per-request forwarders, nothing is shared
//!   between requests beyond the HTTP client and the config
//!
//! # Notes
//!
//! ## No retries
//! A failed forward is reported to the caller as-is. The member resubmits
//! from the form if they want another attempt, so the server never has two
//! in-flight copies of the same inscription.
//!
//! ## Upstream selection
//! `UPSTREAM_URL` points at the API origin, defaulting to production.
//! Local development against a locally running API only needs
//! `UPSTREAM_URL=http://localhost:3000`.
use std::{sync::Arc, time::Duration};

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};

use signal::{
    ctrl_c,
    unix::{signal, SignalKind},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub mod config;
pub mod error;
pub mod proxy;
pub mod routes;
pub mod state;

use routes::{benefits_handler, inscription_handler, user_handler};
use state::AppState;

pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/inscription", post(inscription_handler))
        .route("/api/benefits", get(benefits_handler))
        .route("/api/user", get(user_handler))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new();

    info!("Starting server...");
    let app = app(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
