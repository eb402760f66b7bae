//! # Folio HTTP API Module
//!
//! This module implements the HTTP server using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/catalogue` - Full catalogue document (`ETag` = fingerprint)
//! - `GET /api/hash` - BLAKE3 fingerprint of the catalogue
//! - `GET /api/profile` - Profile
//! - `GET /api/projects` - Filtered project cards (`skills`, `tools`, `industry`)
//! - `GET /api/projects/{id}` - Project detail
//! - `GET /api/projects/{id}/tables/{slug}` - Sorted table (`sort`, `dir`)
//! - `GET /api/facets` - Facet vocabulary with counts
//! - `GET /api/certifications` - Certifications
//! - `GET /api/experience` - Experience timeline
//! - `GET /api/skills` - Skills matrix
//! - `POST /api/view` - Advance a client-held view state
//! - `POST /api/contact` - Validate and acknowledge a contact message
//!
//! Any other path is served from the configured site directory.
//!
//! ## Configuration (Environment Variables)
//!
//! - `FOLIO_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)
//! - `FOLIO_RATE_LIMIT`: Requests per second (default: 100, 0 to disable)

mod handlers;
mod middleware;
mod types;

pub use handlers::{
    catalogue_handler, certifications_handler, contact_handler, experience_handler,
    facets_handler, hash_handler, health_handler, profile_handler, project_handler,
    projects_handler, skills_handler, table_handler, view_handler,
};
pub use middleware::{DEFAULT_RATE_LIMIT, create_rate_limiter, get_rate_limit_from_env};
pub use types::{
    ContactRequest, ContactResponse, ErrorResponse, HashResponse, HealthResponse,
    ProjectSummary, ProjectsQuery, ProjectsResponse, TableQuery, TableResponse, ViewRequest,
    ViewResponse,
};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use folio_core::{Catalogue, FolioError};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Maximum accepted request body (64 KiB).
const MAX_BODY_BYTES: usize = 64 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state.
///
/// The catalogue is immutable, so requests share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub catalogue: Arc<Catalogue>,
    /// Fingerprint computed once at startup.
    pub fingerprint: Arc<str>,
    pub contact_delay: Duration,
    pub site_dir: Option<PathBuf>,
}

impl AppState {
    /// Create app state over a catalogue, with no contact delay and no site.
    pub fn new(catalogue: Catalogue) -> Result<Self, FolioError> {
        let fingerprint = catalogue.fingerprint()?;
        Ok(Self {
            catalogue: Arc::new(catalogue),
            fingerprint: fingerprint.into(),
            contact_delay: Duration::ZERO,
            site_dir: None,
        })
    }

    #[must_use]
    pub fn with_contact_delay(mut self, delay: Duration) -> Self {
        self.contact_delay = delay;
        self
    }

    #[must_use]
    pub fn with_site_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.site_dir = dir;
        self
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from environment configuration.
///
/// Reads `FOLIO_CORS_ORIGINS`:
/// - If "*": allows all origins
/// - If not set: localhost only
/// - Otherwise: comma-separated list of allowed origins
fn build_cors_layer() -> CorsLayer {
    let origins_env = std::env::var("FOLIO_CORS_ORIGINS").ok();

    match origins_env.as_deref() {
        Some("*") => {
            tracing::warn!("CORS: Allowing ALL origins (FOLIO_CORS_ORIGINS=*)");
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in FOLIO_CORS_ORIGINS, defaulting to localhost only"
                );
                build_localhost_cors()
            } else {
                restricted_cors(allowed_origins)
            }
        }
        None => {
            tracing::info!("CORS: No FOLIO_CORS_ORIGINS set, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:8080",
    ]
    .into_iter()
    .filter_map(|o| o.parse::<HeaderValue>().ok())
    .collect();

    restricted_cors(origins)
}

fn restricted_cors(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::IF_NONE_MATCH])
        .expose_headers([header::ETAG])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Rate Limiting (if enabled)
pub fn create_router(state: AppState) -> Router {
    let rate_limit = get_rate_limit_from_env();
    let rate_limiter = if rate_limit > 0 {
        tracing::info!("Rate limiting enabled: {} requests/second", rate_limit);
        Some(create_rate_limiter(rate_limit))
    } else {
        tracing::info!("Rate limiting disabled");
        None
    };

    let api = Router::new()
        .route("/catalogue", get(handlers::catalogue_handler))
        .route("/hash", get(handlers::hash_handler))
        .route("/profile", get(handlers::profile_handler))
        .route("/projects", get(handlers::projects_handler))
        .route("/projects/{id}", get(handlers::project_handler))
        .route(
            "/projects/{id}/tables/{slug}",
            get(handlers::table_handler),
        )
        .route("/facets", get(handlers::facets_handler))
        .route("/certifications", get(handlers::certifications_handler))
        .route("/experience", get(handlers::experience_handler))
        .route("/skills", get(handlers::skills_handler))
        .route("/view", post(handlers::view_handler))
        .route("/contact", post(handlers::contact_handler));

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .nest("/api", api);

    if let Some(dir) = state.site_dir.clone() {
        tracing::info!("Serving static site from {:?}", dir);
        router = router.fallback_service(ServeDir::new(dir));
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
                .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server and run until Ctrl+C.
pub async fn run_server(addr: &str, state: AppState) -> Result<(), FolioError> {
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| FolioError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("Folio HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| FolioError::Io(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Cannot listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
