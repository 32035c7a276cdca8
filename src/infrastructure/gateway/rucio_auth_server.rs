// src/infrastructure/gateway/rucio_auth_server.rs
use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::{Client, StatusCode, header::HeaderMap};
use serde::Deserialize;

use crate::application::{
    ApplicationResult,
    dto::{AuthToken, UserPassCredentials},
    error::ApplicationError,
    ports::{EnvConfigGatewayPort, secondary::AuthServerGatewayOutputPort},
};

const APP_ID: &str = "webui";
const TOKEN_HEADER: &str = "X-Rucio-Auth-Token";
const TOKEN_EXPIRES_HEADER: &str = "X-Rucio-Auth-Token-Expires";
const EXPIRY_FORMAT: &str = "%a, %d %b %Y %H:%M:%S UTC";

/// Client for the `/auth/userpass` endpoint of a Rucio auth server.
pub struct RucioAuthServer {
    env_config: Arc<EnvConfigGatewayPort>,
    client: Client,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ExceptionBody {
    exception_class: Option<String>,
    exception_message: Option<String>,
}

impl RucioAuthServer {
    pub fn new(
        env_config: Arc<EnvConfigGatewayPort>,
        timeout: Duration,
    ) -> ApplicationResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ApplicationError::infrastructure(format!("http client: {err}")))?;
        Ok(Self::with_client(env_config, client))
    }

    pub fn with_client(env_config: Arc<EnvConfigGatewayPort>, client: Client) -> Self {
        Self { env_config, client }
    }

    fn token_from_headers(headers: &HeaderMap) -> ApplicationResult<AuthToken> {
        let token = headers
            .get(TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                ApplicationError::infrastructure(format!(
                    "auth server response lacks {TOKEN_HEADER}"
                ))
            })?;

        let expires_raw = headers
            .get(TOKEN_EXPIRES_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                ApplicationError::infrastructure(format!(
                    "auth server response lacks {TOKEN_EXPIRES_HEADER}"
                ))
            })?;

        Ok(AuthToken {
            token: token.to_string(),
            expires_at: parse_expiry(expires_raw)?,
        })
    }

    async fn rejection_message(response: reqwest::Response) -> String {
        let body = response.text().await.unwrap_or_default();
        serde_json::from_str::<ExceptionBody>(&body)
            .ok()
            .and_then(|e| e.exception_message.or(e.exception_class))
            .unwrap_or_else(|| "credentials rejected".to_string())
    }
}

/// Parse the expiry header. The server writes `Tue, 15 Oct 2024 12:00:00 UTC`;
/// RFC 2822 and RFC 3339 are accepted as well.
pub fn parse_expiry(raw: &str) -> ApplicationResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, EXPIRY_FORMAT) {
        return Ok(naive.and_utc());
    }
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ApplicationError::infrastructure(format!("unparseable token expiry: {raw:?}")))
}

#[async_trait]
impl AuthServerGatewayOutputPort for RucioAuthServer {
    async fn userpass_login(
        &self,
        credentials: &UserPassCredentials,
    ) -> ApplicationResult<AuthToken> {
        let auth_host = self.env_config.rucio_auth_host().await?;
        let url = format!("{auth_host}/auth/userpass");
        tracing::debug!(%url, username = %credentials.username, "requesting userpass token");

        let response = self
            .client
            .get(&url)
            .header("X-Rucio-Account", &credentials.account)
            .header("X-Rucio-Username", &credentials.username)
            .header("X-Rucio-Password", &credentials.password)
            .header("X-Rucio-VO", &credentials.vo)
            .header("X-Rucio-AppID", APP_ID)
            .send()
            .await
            .map_err(|err| {
                ApplicationError::infrastructure(format!("auth server unreachable: {err}"))
            })?;

        match response.status() {
            status if status.is_success() => Self::token_from_headers(response.headers()),
            StatusCode::UNAUTHORIZED => {
                Err(ApplicationError::unauthorized(Self::rejection_message(response).await))
            }
            status => {
                tracing::warn!(%status, "auth server answered with unexpected status");
                Err(ApplicationError::infrastructure(format!(
                    "auth server returned {status}"
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn expiry_accepts_server_format() {
        let dt = parse_expiry("Tue, 15 Oct 2024 12:30:05 UTC").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 10, 15));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (12, 30, 5));
    }

    #[test]
    fn expiry_accepts_rfc_formats() {
        let a = parse_expiry("Tue, 15 Oct 2024 12:30:05 +0000").unwrap();
        let b = parse_expiry("2024-10-15T12:30:05Z").unwrap();
        assert_eq!(a, b);
        assert!(parse_expiry("tomorrow").is_err());
    }

    #[test]
    fn missing_token_header_is_an_infrastructure_error() {
        let headers = HeaderMap::new();
        let err = RucioAuthServer::token_from_headers(&headers).unwrap_err();
        assert!(matches!(err, ApplicationError::Infrastructure(_)));
    }
}
