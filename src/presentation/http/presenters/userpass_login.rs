use async_trait::async_trait;
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ErrorViewModel;
use crate::{
    application::{
        ApplicationResult,
        dto::{
            AuthType, SessionUser, UserPassLoginError, UserPassLoginErrorKind,
            UserPassLoginResponse,
        },
        ports::output::UserPassLoginOutputPort,
    },
    presentation::http::{response::ResponseHandle, session::SessionHandle},
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPassLoginViewModel {
    pub status: String,
    pub rucio_identity: String,
    pub rucio_account: String,
    #[serde(rename = "rucioVO")]
    pub rucio_vo: String,
    pub rucio_auth_token_expires: DateTime<Utc>,
    pub redirect_to: String,
}

/// Stores the logged-in user in the session and answers with JSON.
pub struct UserPassLoginPresenter {
    session: SessionHandle,
    response: ResponseHandle,
}

impl UserPassLoginPresenter {
    pub fn new(session: SessionHandle, response: ResponseHandle) -> Self {
        Self { session, response }
    }

    fn status_for(kind: UserPassLoginErrorKind) -> StatusCode {
        match kind {
            UserPassLoginErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
            UserPassLoginErrorKind::InvalidCredentials => StatusCode::UNAUTHORIZED,
            UserPassLoginErrorKind::AuthServerError => StatusCode::BAD_GATEWAY,
            UserPassLoginErrorKind::Misconfigured => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[async_trait]
impl UserPassLoginOutputPort for UserPassLoginPresenter {
    async fn present_success(&self, response: UserPassLoginResponse) -> ApplicationResult<()> {
        let view_model = UserPassLoginViewModel {
            status: "success".into(),
            rucio_identity: response.identity.clone(),
            rucio_account: response.account.clone(),
            rucio_vo: response.vo.clone(),
            rucio_auth_token_expires: response.token.expires_at,
            redirect_to: response.redirect_to,
        };

        self.session.activate_user(SessionUser {
            rucio_identity: response.identity,
            rucio_account: response.account,
            rucio_auth_type: AuthType::Userpass,
            rucio_auth_token: response.token.token,
            rucio_auth_token_expires: response.token.expires_at,
            rucio_vo: response.vo,
            is_logged_in: true,
        });
        // A freshly authenticated session never keeps an id the client chose.
        self.session.regenerate_id().await?;
        self.session.save().await?;

        self.response.send(StatusCode::OK, &view_model)
    }

    async fn present_error(&self, error: UserPassLoginError) -> ApplicationResult<()> {
        self.response
            .send(Self::status_for(error.kind), &ErrorViewModel::new(error.message))
    }
}
