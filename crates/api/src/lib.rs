//! # SlotBook API
//!
//! The API crate provides the web server for the SlotBook booking calendar.
//! It exposes per-day slot availability for the public calendar view and
//! the single-slot write used by the admin view.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Admin sessions and error mapping
//! - **Config**: Handle environment and application configuration
//!
//! Storage is reached only through the injected
//! [`SlotStore`](slotbook_db::store::SlotStore), so the handlers are the same
//! for the in-memory and the PostgreSQL backend.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    error_handling::HandleErrorLayer,
    http::{header, HeaderValue, Method, StatusCode},
    BoxError, Json, Router,
};
use eyre::{Result, WrapErr};
use rand::RngCore;
use serde_json::json;
use slotbook_db::store::SlotStore;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::middleware::auth::SessionIssuer;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use slotbook_api::ApiState;
/// use slotbook_db::memory::MemorySlotStore;
///
/// let state = Arc::new(ApiState::new(Arc::new(MemorySlotStore::new())));
/// let app = slotbook_api::build_router(state);
/// ```
pub struct ApiState {
    /// Owner of every DaySlots record
    pub store: Arc<dyn SlotStore>,

    /// Admin session issuer; `None` disables admin authentication
    pub sessions: Option<SessionIssuer>,

    /// Reject writes to labels outside the canonical 32
    pub strict_labels: bool,
}

impl ApiState {
    /// State with an open write endpoint and permissive labels.
    pub fn new(store: Arc<dyn SlotStore>) -> Self {
        Self {
            store,
            sessions: None,
            strict_labels: false,
        }
    }

    pub fn with_sessions(mut self, sessions: SessionIssuer) -> Self {
        self.sessions = Some(sessions);
        self
    }

    pub fn with_strict_labels(mut self, strict_labels: bool) -> Self {
        self.strict_labels = strict_labels;
        self
    }

    /// Builds the state described by `config` around `store`.
    pub fn from_config(config: &config::ApiConfig, store: Arc<dyn SlotStore>) -> Self {
        let state = Self::new(store).with_strict_labels(config.strict_labels);

        let Some(credentials) = config.admin.clone() else {
            warn!("No admin credentials configured; slot writes are unauthenticated");
            return state;
        };

        let secret = match &config.session_secret {
            Some(secret) => secret.as_bytes().to_vec(),
            None => {
                warn!("SESSION_SECRET not set; sessions will not survive a restart");
                let mut secret = vec![0u8; 32];
                rand::thread_rng().fill_bytes(&mut secret);
                secret
            }
        };
        let ttl = chrono::Duration::minutes(i64::from(config.session_ttl_minutes));

        info!(username = %credentials.username, "Admin authentication enabled");
        state.with_sessions(SessionIssuer::new(credentials, &secret, ttl))
    }
}

/// Assembles every route with request tracing on top.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Slot availability endpoints
        .merge(routes::slots::routes())
        // Admin session endpoints
        .merge(routes::session::routes())
        // Attach shared state to all routes
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let allow_origin = if origins.iter().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        let origins = origins
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .wrap_err_with(|| format!("Invalid CORS origin: {origin}"))
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(allow_origin))
}

async fn handle_timeout(err: BoxError) -> (StatusCode, Json<serde_json::Value>) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({ "error": "Request timed out", "code": "timeout" })),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Internal server error: {err}"), "code": "internal_error" })),
        )
    }
}

/// Wraps the router in the CORS and request-timeout layers from `config`.
///
/// # Errors
///
/// Returns an error if a configured CORS origin is not a valid header value.
pub fn build_app(config: &config::ApiConfig, state: Arc<ApiState>) -> Result<Router> {
    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => {
            warn!("API_CORS_ORIGINS not set; cross-origin browser requests will be refused");
            app
        }
    };

    // Add request timeout middleware
    Ok(app.layer(
        tower::ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_timeout))
            .timeout(Duration::from_secs(config.request_timeout)),
    ))
}

/// Starts the API server with the provided configuration and store
///
/// Expects the log subscriber to be installed already. Serves until the
/// listener fails.
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// use std::sync::Arc;
/// use slotbook_api::config::ApiConfig;
/// use slotbook_db::memory::MemorySlotStore;
///
/// let config = ApiConfig::from_env()?;
/// slotbook_api::start_server(config, Arc::new(MemorySlotStore::new())).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, store: Arc<dyn SlotStore>) -> Result<()> {
    let state = Arc::new(ApiState::from_config(&config, store));
    let app = build_app(&config, state)?;

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {addr}"))?;
    info!("Slot backend listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
