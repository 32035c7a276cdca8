// src/presentation/http/routes.rs
use crate::config::RateLimitConfig;
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{login_config, userpass_login},
    middleware::login_rate_limit_layer,
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    pub allowed_origins: Vec<String>,
    pub login_rate_limit: Option<RateLimitConfig>,
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

pub fn build_router(state: HttpState, options: &RouterOptions) -> Router {
    let mut login = Router::new().route("/api/auth/userpass", post(userpass_login::userpass_login));
    match options.login_rate_limit.as_ref() {
        Some(config) => match login_rate_limit_layer(config) {
            Some(layer) => login = login.layer(layer),
            None => tracing::warn!(?config, "invalid login rate limit, login is not throttled"),
        },
        None => tracing::info!("login rate limiting disabled"),
    }

    Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .merge(login)
        .route("/api/auth/logincfg", get(login_config::login_config))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&options.allowed_origins))
        .layer(Extension(state))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
