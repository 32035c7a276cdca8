// tests/support/mocks.rs
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::{Arc, Mutex};
use webui_auth::{
    application::{
        ApplicationResult,
        dto::{AuthToken, UserPassCredentials},
        error::ApplicationError,
        ports::secondary::AuthServerGatewayOutputPort,
    },
    infrastructure::gateway::EnvConfigGateway,
};

pub const TEST_TOKEN: &str = "token-abc";
pub const TEST_AUTH_HOST: &str = "https://rucio-auth.test:443";

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
}

#[derive(Clone)]
pub enum AuthOutcome {
    Token(AuthToken),
    Rejected(String),
    Unreachable,
}

/// Auth server double that records every credential set it receives.
pub struct StubAuthServer {
    outcome: AuthOutcome,
    calls: Mutex<Vec<UserPassCredentials>>,
}

impl StubAuthServer {
    pub fn new(outcome: AuthOutcome) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn accepting() -> Arc<Self> {
        Arc::new(Self::new(AuthOutcome::Token(AuthToken {
            token: TEST_TOKEN.to_string(),
            expires_at: fixed_now() + Duration::hours(1),
        })))
    }

    pub fn rejecting() -> Arc<Self> {
        Arc::new(Self::new(AuthOutcome::Rejected(
            "CannotAuthenticate".to_string(),
        )))
    }

    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self::new(AuthOutcome::Unreachable))
    }

    pub fn calls(&self) -> Vec<UserPassCredentials> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthServerGatewayOutputPort for StubAuthServer {
    async fn userpass_login(
        &self,
        credentials: &UserPassCredentials,
    ) -> ApplicationResult<AuthToken> {
        self.calls.lock().unwrap().push(credentials.clone());
        match &self.outcome {
            AuthOutcome::Token(token) => Ok(token.clone()),
            AuthOutcome::Rejected(msg) => Err(ApplicationError::unauthorized(msg.clone())),
            AuthOutcome::Unreachable => Err(ApplicationError::infrastructure(
                "auth server unreachable: connection refused",
            )),
        }
    }
}

/// Single-VO deployment with userpass and one OIDC provider.
pub fn test_env() -> EnvConfigGateway {
    EnvConfigGateway::from_vars([
        ("RUCIO_HOST", "https://rucio.test:443"),
        ("RUCIO_AUTH_HOST", TEST_AUTH_HOST),
        ("ENABLE_USERPASS", "true"),
        ("ENABLE_X509", "false"),
        ("ENABLE_OIDC", "true"),
        ("OIDC_PROVIDERS", "cern"),
        ("OIDC_PROVIDER_CERN_CLIENT_ID", "webui"),
        ("OIDC_PROVIDER_CERN_AUTHORIZATION_URL", "https://sso.test/auth"),
        ("OIDC_PROVIDER_CERN_TOKEN_URL", "https://sso.test/token"),
        ("OIDC_PROVIDER_CERN_REDIRECT_URL", "https://webui.test/auth/oidc"),
    ])
}
