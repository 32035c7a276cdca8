use std::sync::Arc;

use crate::application::{
    ApplicationResult,
    dto::{
        DEFAULT_REDIRECT, DEFAULT_VO, UserPassCredentials, UserPassLoginError,
        UserPassLoginErrorKind, UserPassLoginRequest, UserPassLoginResponse,
    },
    error::ApplicationError,
    ports::{AuthServerGatewayPort, UserPassLoginPresenterPort, primary::UserPassLoginInputPort},
};
use async_trait::async_trait;

/// Logs a user in against the auth server and hands the outcome to its presenter.
pub struct UserPassLoginUseCase {
    presenter: Arc<UserPassLoginPresenterPort>,
    auth_server: Arc<AuthServerGatewayPort>,
}

impl UserPassLoginUseCase {
    pub fn new(
        presenter: Arc<UserPassLoginPresenterPort>,
        auth_server: Arc<AuthServerGatewayPort>,
    ) -> Self {
        Self {
            presenter,
            auth_server,
        }
    }

    fn credentials(
        request: &UserPassLoginRequest,
    ) -> Result<UserPassCredentials, UserPassLoginError> {
        let username = request.username.trim();
        let account = request.account.trim();
        if username.is_empty() || request.password.is_empty() {
            return Err(UserPassLoginError::new(
                UserPassLoginErrorKind::InvalidRequest,
                "username and password are required",
            ));
        }
        if account.is_empty() {
            return Err(UserPassLoginError::new(
                UserPassLoginErrorKind::InvalidRequest,
                "account is required",
            ));
        }

        let vo = request
            .vo
            .as_deref()
            .map(str::trim)
            .filter(|vo| !vo.is_empty())
            .unwrap_or(DEFAULT_VO);

        Ok(UserPassCredentials {
            username: username.to_string(),
            password: request.password.clone(),
            account: account.to_string(),
            vo: vo.to_string(),
        })
    }
}

/// Keep only same-origin paths as redirect targets.
pub fn sanitize_redirect(target: Option<&str>) -> String {
    match target.map(str::trim) {
        Some(path)
            if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') =>
        {
            path.to_string()
        }
        _ => DEFAULT_REDIRECT.to_string(),
    }
}

#[async_trait]
impl UserPassLoginInputPort for UserPassLoginUseCase {
    async fn execute(&self, request: UserPassLoginRequest) -> ApplicationResult<()> {
        let credentials = match Self::credentials(&request) {
            Ok(credentials) => credentials,
            Err(err) => return self.presenter.present_error(err).await,
        };
        let redirect_to = sanitize_redirect(request.redirect_to.as_deref());

        match self.auth_server.userpass_login(&credentials).await {
            Ok(token) => {
                tracing::info!(
                    username = %credentials.username,
                    account = %credentials.account,
                    vo = %credentials.vo,
                    "userpass login succeeded"
                );
                self.presenter
                    .present_success(UserPassLoginResponse {
                        identity: credentials.username,
                        account: credentials.account,
                        vo: credentials.vo,
                        token,
                        redirect_to,
                    })
                    .await
            }
            Err(ApplicationError::Unauthorized(msg)) => {
                tracing::warn!(
                    username = %credentials.username,
                    reason = %msg,
                    "userpass login rejected"
                );
                self.presenter
                    .present_error(UserPassLoginError::new(
                        UserPassLoginErrorKind::InvalidCredentials,
                        "invalid credentials",
                    ))
                    .await
            }
            Err(ApplicationError::Configuration(msg)) => {
                tracing::error!(error = %msg, "auth server gateway is misconfigured");
                self.presenter
                    .present_error(UserPassLoginError::new(
                        UserPassLoginErrorKind::Misconfigured,
                        msg,
                    ))
                    .await
            }
            Err(err) => {
                tracing::error!(error = %err, "auth server call failed");
                self.presenter
                    .present_error(UserPassLoginError::new(
                        UserPassLoginErrorKind::AuthServerError,
                        "the authentication server could not process the login",
                    ))
                    .await
            }
        }
    }
}
