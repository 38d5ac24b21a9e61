/// Application state and router builder
///
/// Defines the shared application state and builds the axum router with
/// the full middleware stack.
///
/// # Router
///
/// ```text
/// /
/// ├── GET  /health     # Liveness + database connectivity (public)
/// └── /graphql
///     ├── POST         # GraphQL endpoint
///     └── GET          # GraphiQL playground (disabled in production)
/// ```
///
/// # Middleware Stack
///
/// Applied in order (inner to outer):
/// 1. Sessions (tower-sessions, Postgres-backed)
/// 2. Logging (tower-http TraceLayer)
/// 3. CORS (tower-http CorsLayer, credentials allowed)
/// 4. Security headers

use crate::{config::Config, graphql::TaskgraphSchema};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::PostgresStore;
use tracing::Level;

/// Shared application state
///
/// Cloned per request via axum's `State` extractor; cheap because every
/// field is either a pool handle or an Arc.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Executable GraphQL schema
    pub schema: TaskgraphSchema,
}

impl AppState {
    /// Creates new application state, building the schema
    pub fn new(db: PgPool, config: Config) -> Self {
        let config = Arc::new(config);
        let schema = crate::graphql::build_schema(db.clone(), config.clone());

        Self { db, config, schema }
    }

    /// Gets the JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete axum router with all routes and middleware
///
/// The session layer is constructed by the caller because its store needs
/// an async migration at startup.
pub fn build_router(state: AppState, session_layer: SessionManagerLayer<PostgresStore>) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // GraphiQL is development tooling only
    let graphql_routes = if state.config.api.production {
        Router::new().route("/graphql", post(routes::graphql::graphql_handler))
    } else {
        Router::new().route(
            "/graphql",
            get(routes::graphql::graphiql).post(routes::graphql::graphql_handler),
        )
    };

    let cors = build_cors(&state.config);

    Router::new()
        .merge(health_routes)
        .merge(graphql_routes)
        .layer(session_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::security::security_headers,
        ))
        .with_state(state)
}

/// Configures CORS from the allowed-origins list
///
/// `*` means permissive (development). Otherwise only the configured
/// origins are allowed, with credentials, so the session cookie survives
/// cross-origin requests from the frontend.
fn build_cors(config: &Config) -> CorsLayer {
    if config.api.cors_origins.contains(&"*".to_string()) {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    }
}
