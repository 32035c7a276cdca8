// src/config.rs
use std::{env, str::FromStr, time::Duration};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    listen_addr: String,
    allowed_origins: Vec<String>,
    session: SessionConfig,
    auth_request_timeout: Duration,
    login_rate_limit: Option<RateLimitConfig>,
}

/// Cookie and lifetime settings for the browser session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub ttl: Duration,
    pub secure: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_session_cookie_name(),
            ttl: Duration::from_secs(default_session_ttl()),
            secure: false,
        }
    }
}

/// One request is replenished every `period`; `burst` requests may be spent at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub period: Duration,
    pub burst: u32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".into()
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".into()]
}

fn default_session_cookie_name() -> String {
    "webui_session".into()
}

fn default_session_ttl() -> u64 {
    60 * 60 * 24
}

fn default_auth_request_timeout() -> u64 {
    10
}

fn parse_flag(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid(format!("{key} must be a number, got {raw:?}"))),
        Err(_) => Ok(default),
    }
}

fn flag_var(key: &'static str, default: bool) -> bool {
    env::var(key).map(|v| parse_flag(v.trim())).unwrap_or(default)
}

impl AppConfig {
    /// Build configuration from environment variables. Optional values fall back to
    /// defaults; malformed numbers are rejected.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let listen_addr = env::var("LISTEN_ADDR").unwrap_or_else(|_| default_listen_addr());
        let allowed_origins = Self::allowed_origins_from_env();

        let cookie_name = env::var("SESSION_COOKIE_NAME")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|_| default_session_cookie_name());
        if cookie_name.is_empty() || cookie_name.contains([';', '=', ' ', ',']) {
            return Err(ConfigError::Invalid(format!(
                "SESSION_COOKIE_NAME is not a valid cookie name: {cookie_name:?}"
            )));
        }

        let session = SessionConfig {
            cookie_name,
            ttl: Duration::from_secs(parse_var("SESSION_TTL_SECONDS", default_session_ttl())?),
            secure: flag_var("SESSION_COOKIE_SECURE", false),
        };

        let auth_request_timeout = Duration::from_secs(parse_var(
            "AUTH_REQUEST_TIMEOUT_SECS",
            default_auth_request_timeout(),
        )?);

        let login_rate_limit = if flag_var("LOGIN_RATE_LIMIT_ENABLED", true) {
            let period = parse_var::<u64>("LOGIN_RATE_LIMIT_PERIOD_SECS", 2)?;
            let burst = parse_var::<u32>("LOGIN_RATE_LIMIT_BURST", 10)?;
            if period == 0 || burst == 0 {
                return Err(ConfigError::Invalid(
                    "login rate limit period and burst must be positive".into(),
                ));
            }
            Some(RateLimitConfig {
                period: Duration::from_secs(period),
                burst,
            })
        } else {
            None
        };

        Ok(Self {
            listen_addr,
            allowed_origins,
            session,
            auth_request_timeout,
            login_rate_limit,
        })
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    pub fn session(&self) -> &SessionConfig {
        &self.session
    }

    /// Upper bound for a single round-trip to the auth server.
    pub fn auth_request_timeout(&self) -> Duration {
        self.auth_request_timeout
    }

    /// `None` when the login rate limiter is switched off.
    pub fn login_rate_limit(&self) -> Option<RateLimitConfig> {
        self.login_rate_limit
    }

    pub fn allowed_origins_from_env() -> Vec<String> {
        env::var("ALLOWED_ORIGINS")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect()
            })
            .unwrap_or_else(default_allowed_origins)
    }
}
