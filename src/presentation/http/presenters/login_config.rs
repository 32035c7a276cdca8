use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ErrorViewModel;
use crate::{
    application::{
        ApplicationResult,
        dto::{LoginConfigError, LoginConfigResponse, OidcProviderDto, VoDto},
        ports::{ClockPort, output::LoginConfigOutputPort},
    },
    presentation::http::{response::ResponseHandle, session::SessionHandle},
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginConfigViewModel {
    pub status: String,
    pub userpass_enabled: bool,
    pub x509_enabled: bool,
    pub oidc_enabled: bool,
    pub oidc_providers: Vec<OidcProviderDto>,
    #[serde(rename = "multiVOEnabled")]
    pub multivo_enabled: bool,
    pub vo_list: Vec<VoDto>,
    pub rucio_auth_host: String,
    pub is_logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
}

pub struct LoginConfigPresenter {
    session: SessionHandle,
    response: ResponseHandle,
    clock: Arc<ClockPort>,
}

impl LoginConfigPresenter {
    pub fn new(session: SessionHandle, response: ResponseHandle, clock: Arc<ClockPort>) -> Self {
        Self {
            session,
            response,
            clock,
        }
    }
}

#[async_trait]
impl LoginConfigOutputPort for LoginConfigPresenter {
    async fn present_success(&self, response: LoginConfigResponse) -> ApplicationResult<()> {
        let active_user = self
            .session
            .user()
            .filter(|user| user.is_active_at(self.clock.now()));

        let view_model = LoginConfigViewModel {
            status: "success".into(),
            userpass_enabled: response.userpass_enabled,
            x509_enabled: response.x509_enabled,
            oidc_enabled: response.oidc_enabled,
            oidc_providers: response.oidc_providers,
            multivo_enabled: response.multivo_enabled,
            vo_list: response.vo_list,
            rucio_auth_host: response.rucio_auth_host,
            is_logged_in: active_user.is_some(),
            account_name: active_user.map(|user| user.rucio_account),
        };
        self.response.send(StatusCode::OK, &view_model)
    }

    async fn present_error(&self, error: LoginConfigError) -> ApplicationResult<()> {
        self.response.send(
            StatusCode::INTERNAL_SERVER_ERROR,
            &ErrorViewModel::new(error.message),
        )
    }
}
