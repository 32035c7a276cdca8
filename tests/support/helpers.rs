// tests/support/helpers.rs
use super::mocks::{fixed_now, test_env};
use axum::body::{self, Body};
use axum::http::{Method, Request, Response, header};
use serde_json::Value;
use std::sync::Arc;
use webui_auth::{
    application::ports::{AuthServerGatewayPort, ClockPort, EnvConfigGatewayPort, SessionStorePort},
    config::SessionConfig,
    infrastructure::{
        gateway::EnvConfigGateway,
        ioc::{Container, ContainerBuilder, container_config::finish_container, symbols::gateways},
        session_store::InMemorySessionStore,
        time::FixedClock,
    },
    presentation::http::{
        routes::{RouterOptions, build_router},
        state::HttpState,
    },
};

/// Application container with gateway doubles in place of the real auth server.
pub fn build_test_container_with(
    auth_server: Arc<AuthServerGatewayPort>,
    env_config: EnvConfigGateway,
) -> Container {
    let mut builder = ContainerBuilder::new();
    builder
        .bind_instance(gateways::AUTH_SERVER, auth_server)
        .expect("bind auth server");
    builder
        .bind_instance(
            gateways::ENV_CONFIG,
            Arc::new(env_config) as Arc<EnvConfigGatewayPort>,
        )
        .expect("bind env config");
    builder
        .bind_instance(
            gateways::CLOCK,
            Arc::new(FixedClock(fixed_now())) as Arc<ClockPort>,
        )
        .expect("bind clock");
    finish_container(builder).expect("test container is complete")
}

pub fn build_test_container(auth_server: Arc<AuthServerGatewayPort>) -> Container {
    build_test_container_with(auth_server, test_env())
}

pub fn make_test_router(container: Container) -> axum::Router {
    let sessions: Arc<SessionStorePort> = Arc::new(InMemorySessionStore::new());
    let state = HttpState::new(container, sessions, SessionConfig::default());
    let options = RouterOptions {
        allowed_origins: vec!["http://localhost:3000".into()],
        login_rate_limit: None,
    };
    build_router(state, &options)
}

pub fn login_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/auth/userpass")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// `name=value` part of the response's `Set-Cookie` header.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}
