//! Route configuration and setup.
//!
//! Health checks live in [health](health).

mod health;

use crate::constants::{
    DOCS_ROUTE, MULTIPART_FRAMING_ALLOWANCE, OPENAPI_JSON_ROUTE, THUMBNAIL_GET_ROUTE,
    THUMBNAIL_UPLOAD_ROUTE,
};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tubely_core::constants::ASSETS_ROUTE;
use tubely_core::{Config, ThumbnailBackend};

/// Setup all application routes
pub async fn setup_routes(
    config: &Config,
    state: Arc<AppState>,
) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let mut app = public_routes()
        .merge(thumbnail_routes(config))
        .merge(utoipa_rapidoc::RapiDoc::new(OPENAPI_JSON_ROUTE).path(DOCS_ROUTE))
        .with_state(state);

    if config.thumbnail_backend() == ThumbnailBackend::Local {
        tracing::info!(
            route = ASSETS_ROUTE,
            assets_root = %config.assets_root(),
            "Serving thumbnail files from the assets directory"
        );
        app = app.nest_service(ASSETS_ROUTE, ServeDir::new(config.assets_root()));
    }

    let app = app.layer(cors).layer(TraceLayer::new_for_http());

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}

fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::liveness_check))
        .route(
            "/health/ready",
            get(|State(state): State<Arc<AppState>>| health::readiness_check(state)),
        )
        .route(
            OPENAPI_JSON_ROUTE,
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .route(
            THUMBNAIL_GET_ROUTE,
            get(handlers::thumbnail_get::get_thumbnail),
        )
}

/// Upload route. The body limit is the per-file limit plus room for the multipart
/// framing, so a file of exactly the configured size is accepted and the per-file
/// check in the upload parser decides. Bodies over the limit fail while being read
/// and are turned into a 400 by the parser.
fn thumbnail_routes(config: &Config) -> Router<Arc<AppState>> {
    let body_limit = config
        .max_upload_size_bytes()
        .saturating_add(MULTIPART_FRAMING_ALLOWANCE);

    Router::new()
        .route(
            THUMBNAIL_UPLOAD_ROUTE,
            post(handlers::thumbnail_upload::upload_thumbnail),
        )
        .layer(DefaultBodyLimit::max(body_limit))
}
