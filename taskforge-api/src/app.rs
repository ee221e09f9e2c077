/// Application state, router builder, and auth middleware
///
/// # Router layout
///
/// ```text
/// /
/// ├── GET  /                      # Service banner (public)
/// ├── GET  /health                # Liveness + db connectivity (public)
/// └── /api/
///     ├── POST /register          # Public
///     ├── POST /login             # Public, form-encoded
///     ├── GET  /me                # Authenticated
///     ├── /projects               # Authenticated
///     ├── /tasks                  # Authenticated
///     ├── /comments               # Authenticated
///     └── /analytics              # Authenticated
/// ```
///
/// # Middleware stack
///
/// Applied in order: request tracing (tower-http TraceLayer), CORS, then
/// bearer-token auth on the protected subtree. The auth layer resolves the
/// "current user" once per request and stashes it in request extensions;
/// no protected handler runs without it.

use crate::{config::Config, error::ApiError, routes};
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{delete, get, patch, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskforge_shared::{auth::token, models::user::User};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned into each request handler via Axum's `State` extractor; `Arc`
/// keeps the clone cheap.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Token signing secret
    pub fn jwt_secret(&self) -> &str {
        &self.config.auth.jwt_secret
    }

    /// Configured bearer-token lifetime
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.config.auth.token_ttl_minutes)
    }
}

/// The user resolved from a valid bearer token, for one request
///
/// Inserted into request extensions by the auth middleware; handlers take it
/// with `Extension(CurrentUser(user))`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Builds the complete Axum router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    // Public: liveness and account entry points
    let public_routes = Router::new()
        .route("/", get(routes::health::root))
        .route("/health", get(routes::health::health_check))
        .route("/api/register", post(routes::auth::register))
        .route("/api/login", post(routes::auth::login));

    // Everything else requires a resolved current user
    let protected_routes = Router::new()
        .route("/api/me", get(routes::auth::me))
        .route("/api/projects", post(routes::projects::create_project))
        .route("/api/projects", get(routes::projects::list_projects))
        .route("/api/tasks", post(routes::tasks::create_task))
        .route("/api/tasks", get(routes::tasks::list_tasks))
        .route("/api/tasks/:id", get(routes::tasks::get_task))
        .route("/api/tasks/:id", put(routes::tasks::update_task))
        .route("/api/tasks/:id", delete(routes::tasks::delete_task))
        .route(
            "/api/tasks/:id/status",
            patch(routes::tasks::update_task_status),
        )
        .route(
            "/api/tasks/:id/priority",
            patch(routes::tasks::update_task_priority),
        )
        .route(
            "/api/tasks/:id/comments",
            get(routes::comments::list_comments),
        )
        .route("/api/comments", post(routes::comments::create_comment))
        .route(
            "/api/comments/:id",
            delete(routes::comments::delete_comment),
        )
        .route("/api/analytics", get(routes::analytics::get_analytics))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_layer,
        ));

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
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
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Bearer-token authentication middleware
///
/// Resolves the current user: extract the bearer token, verify it, load the
/// user by the subject claim, require an active account. Every failure mode
/// collapses into the same 401 so the response leaks nothing about which
/// step rejected the request.
async fn auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let unauthorized = || ApiError::Unauthorized("Invalid authentication credentials".to_string());

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(unauthorized)?;

    let claims = token::verify_token(token, state.jwt_secret()).map_err(|_| unauthorized())?;

    let user = User::find_by_username(&state.db, &claims.sub)
        .await?
        .ok_or_else(unauthorized)?;

    if !user.is_active {
        return Err(unauthorized());
    }

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}
