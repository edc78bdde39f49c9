//! # Host Bridge HTTP API
//!
//! The game host forwards its hooks here.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /status` - Store counts
//! - `POST /equip` - Decide the variant of an item being equipped
//! - `POST /command` - Run a `/clanskin` chat command
//! - `POST /edit`, `POST /save` - Direct edit/save actions
//! - `POST /groups/destroyed` - Clan destroyed or team disbanded
//! - `POST /clans/membership` - Clan join or leave
//! - `GET /profiles/{group}` - Inspect one profile
//! - `POST /persist` - Flush the store to the data file
//! - `POST /export` - Binary snapshot of the store (base64)
//!
//! ## Security Configuration (Environment Variables)
//!
//! - `CLANSKIN_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)
//! - `CLANSKIN_RATE_LIMIT`: Requests per second (default: 100, 0 to disable)
//! - `CLANSKIN_API_KEY`: If set, requires Bearer token authentication

mod auth;
mod handlers;
mod middleware;
mod types;

pub use auth::get_api_key_from_env;
pub use middleware::{create_rate_limiter, get_rate_limit_from_env};
pub use types::{
    ActorRequest, CommandRequest, CommandResponse, EquipRequest, EquipResponse, ExportResponse,
    GroupDestroyedRequest, GroupDestroyedResponse, HealthResponse, MAX_COMMAND_ARGS,
    MembershipRequest, MembershipResponse, PersistResponse, ProfileResponse, StatusResponse,
};

use crate::config::ClanSkinConfig;
use crate::host::ClanRoster;
use crate::messages::MessageCatalog;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use clanskin_core::{ClanSkinError, DataFile, LoadOutcome, SkinEngine};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Maximum request body size (256 KB).
const MAX_BODY_BYTES: usize = 256 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state.
#[derive(Clone)]
pub struct AppState {
    /// The one engine; every mutation runs under its write guard.
    pub engine: Arc<RwLock<SkinEngine>>,
    /// Where `/persist` and autosave flush to.
    pub data_file: DataFile,
    /// Clan membership mirror, shared with the engine's lookup.
    pub clans: ClanRoster,
    /// Reply text.
    pub messages: Arc<MessageCatalog>,
}

impl AppState {
    /// Create state around an engine that already looks clans up in `clans`.
    #[must_use]
    pub fn new(
        engine: SkinEngine,
        data_file: DataFile,
        clans: ClanRoster,
        messages: MessageCatalog,
    ) -> Self {
        Self {
            engine: Arc::new(RwLock::new(engine)),
            data_file,
            clans,
            messages: Arc::new(messages),
        }
    }

    /// Load the data file and wire the engine from configuration.
    ///
    /// A missing or corrupt data file starts an empty store.
    #[must_use]
    pub fn from_config(config: &ClanSkinConfig, data_file: DataFile) -> Self {
        let (store, outcome) = data_file.load();
        match &outcome {
            LoadOutcome::Loaded { profiles } => {
                tracing::info!(path = %data_file.path().display(), profiles, "Data file loaded");
            }
            LoadOutcome::Missing => {
                tracing::info!(path = %data_file.path().display(), "No data file, starting empty");
            }
            LoadOutcome::Corrupt { reason } => {
                tracing::warn!(path = %data_file.path().display(), %reason, "Data file unreadable, starting empty");
            }
        }

        let clans = ClanRoster::new();
        let engine = SkinEngine::new(store, config.excluded())
            .with_clans(clans.clone())
            .with_permissions(config.permission_table());
        let messages = MessageCatalog::english().with_overrides(&config.messages);

        Self::new(engine, data_file, clans, messages)
    }

    /// Flush the store to the data file.
    pub async fn flush(&self) -> Result<(), ClanSkinError> {
        let engine = self.engine.read().await;
        self.data_file.flush(engine.store())
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from `CLANSKIN_CORS_ORIGINS`.
///
/// - "*": allows all origins
/// - unset: localhost only
/// - otherwise: comma-separated list of allowed origins
fn build_cors_layer() -> CorsLayer {
    let origins_env = std::env::var("CLANSKIN_CORS_ORIGINS").ok();

    match origins_env.as_deref() {
        Some("*") => {
            tracing::warn!("CORS: Allowing ALL origins (CLANSKIN_CORS_ORIGINS=*)");
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => Some(hv),
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed.is_empty() {
                tracing::warn!("CORS: No valid origins in CLANSKIN_CORS_ORIGINS, using localhost");
                build_localhost_cors()
            } else {
                tracing::info!("CORS: Allowing {} origin(s)", allowed.len());
                CorsLayer::new()
                    .allow_origin(allowed)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            }
        }
        None => build_localhost_cors(),
    }
}

/// CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = ["http://localhost:8080", "http://127.0.0.1:8080"]
        .into_iter()
        .filter_map(|o| o.parse::<HeaderValue>().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing
/// 2. CORS
/// 3. Body limit
/// 4. Rate limiting (if enabled)
/// 5. Authentication (if configured)
pub fn create_router(state: AppState) -> Router {
    let rate_limit = get_rate_limit_from_env();
    let rate_limiter = if rate_limit > 0 {
        tracing::info!("Rate limiting enabled: {} requests/second", rate_limit);
        Some(create_rate_limiter(rate_limit))
    } else {
        tracing::info!("Rate limiting disabled");
        None
    };

    let has_auth = get_api_key_from_env().is_some();
    if has_auth {
        tracing::info!("API key authentication enabled");
    } else {
        tracing::warn!(
            "API key authentication DISABLED. Set CLANSKIN_API_KEY to require a bearer token."
        );
    }

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/status", get(handlers::status_handler))
        .route("/equip", post(handlers::equip_handler))
        .route("/command", post(handlers::command_handler))
        .route("/edit", post(handlers::edit_handler))
        .route("/save", post(handlers::save_handler))
        .route("/groups/destroyed", post(handlers::group_destroyed_handler))
        .route("/clans/membership", post(handlers::membership_handler))
        .route("/profiles/{group}", get(handlers::profile_handler))
        .route("/persist", post(handlers::persist_handler))
        .route("/export", post(handlers::export_handler));

    if has_auth {
        router = router.layer(axum_middleware::from_fn(auth::api_key_auth_middleware));
    }

    if let Some(limiter) = rate_limiter {
        router = router.layer(axum_middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit_middleware,
        ));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer())
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server.
///
/// With `autosave` set, the store is flushed on that interval. Ctrl+C stops
/// the server and flushes one last time.
pub async fn run_server(
    addr: &str,
    state: AppState,
    autosave: Option<Duration>,
) -> Result<(), ClanSkinError> {
    let router = create_router(state.clone());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ClanSkinError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("clanskin bridge listening on {}", addr);

    let autosave_task = autosave.map(|period| {
        let state = state.clone();
        tokio::spawn(async move { autosave_loop(state, period).await })
    });

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ClanSkinError::IoError(format!("Server error: {}", e)));

    if let Some(task) = autosave_task {
        task.abort();
    }

    state.flush().await?;
    tracing::info!("Store flushed on shutdown");

    served
}

async fn autosave_loop(state: AppState, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    // The first tick completes immediately.
    ticker.tick().await;
    loop {
        ticker.tick().await;
        match state.flush().await {
            Ok(()) => tracing::debug!("Autosave complete"),
            Err(e) => tracing::error!(error = %e, "Autosave failed"),
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
