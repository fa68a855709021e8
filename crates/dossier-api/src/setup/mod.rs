//! Application wiring: repositories, router, middleware layers.

pub mod server;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::middleware;
use axum::routing::{delete, get, post, put};
use axum::Router;
use dossier_core::constants::API_PREFIX;
use dossier_core::Config;
use dossier_db::{AgentRepository, JsonStore, RecordRepository, UserRepository};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

use crate::api_doc::ApiDoc;
use crate::auth::middleware::auth_middleware;
use crate::handlers;
use crate::state::AppState;

/// Initialize tracing with an env-filter; `RUST_LOG` overrides the default.
pub fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Load the repositories and build the application router.
pub async fn initialize_app(config: Config) -> anyhow::Result<(Arc<AppState>, Router)> {
    let store = JsonStore::open(&config.data_dir).await?;
    let records = RecordRepository::load(store.clone()).await;
    let users = UserRepository::load(store.clone()).await;
    let agents = AgentRepository::load(store).await;

    let state = Arc::new(AppState::new(config, records, users, agents));
    let router = build_router(state.clone());
    Ok((state, router))
}

/// Assemble the full router for the given state. Used by both the binary
/// and the integration tests.
pub fn build_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route(
            "/records",
            get(handlers::records::list_records).post(handlers::records::upload_records),
        )
        .route("/records/filters", get(handlers::records::list_filter_values))
        .route("/records/bulk/download", post(handlers::records::bulk_download))
        .route("/records/bulk/remove", post(handlers::records::bulk_remove))
        .route("/records/{id}", delete(handlers::records::remove_record))
        .route("/records/{id}/download", get(handlers::records::download_record))
        .route("/records/{id}/status", put(handlers::records::update_record_status))
        .route(
            "/agents",
            get(handlers::agents::list_agents).post(handlers::agents::register_agent),
        )
        .route("/admin/users", get(handlers::admin::list_users))
        .route("/admin/users/{id}", delete(handlers::admin::remove_user))
        .route("/admin/agents", get(handlers::admin::list_all_agents))
        .route("/admin/agents/{id}", delete(handlers::admin::remove_agent))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let public = Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login));

    // Uploads are base64-inflated multipart bodies; cap them at a multiple
    // of the per-file limit rather than axum's 2 MB default.
    let body_limit = (state.config.max_upload_kb as usize) * 1024 * 8;

    Router::new()
        .route("/health", get(handlers::health::health))
        .nest(API_PREFIX, public.merge(protected))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/api-docs"))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config))
                .layer(DefaultBodyLimit::disable())
                .layer(RequestBodyLimitLayer::new(body_limit)),
        )
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
