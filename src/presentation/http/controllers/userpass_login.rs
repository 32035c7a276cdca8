// src/presentation/http/controllers/userpass_login.rs
use async_trait::async_trait;
use axum::{Extension, Json, http::HeaderMap, response::Response};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    application::{dto::UserPassLoginRequest, ports::primary::UserPassLoginInputPort},
    infrastructure::ioc::{UseCaseFactory, symbols::controllers},
    presentation::http::{
        error::{HttpResult, IntoHttpResult},
        presenters::{ErrorViewModel, UserPassLoginViewModel},
        response::ResponseHandle,
        session::SessionHandle,
        state::HttpState,
    },
};

/// Login form as posted by the web UI. Missing fields are left empty and rejected by
/// the use case with a 400 body rather than by the JSON extractor.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UserPassLoginBody {
    pub username: String,
    pub password: String,
    pub account: String,
    pub vo: Option<String>,
    pub redirect_to: Option<String>,
}

impl From<UserPassLoginBody> for UserPassLoginRequest {
    fn from(body: UserPassLoginBody) -> Self {
        Self {
            username: body.username,
            password: body.password,
            account: body.account,
            vo: body.vo,
            redirect_to: body.redirect_to,
        }
    }
}

#[derive(Debug)]
pub struct UserPassLoginParams {
    pub request: UserPassLoginRequest,
    pub session: SessionHandle,
    pub response: ResponseHandle,
}

#[async_trait]
pub trait UserPassLoginControllerPort: Send + Sync {
    async fn execute(&self, params: UserPassLoginParams) -> HttpResult<()>;
}

pub struct UserPassLoginController {
    use_case_factory: UseCaseFactory<dyn UserPassLoginInputPort>,
}

impl UserPassLoginController {
    pub fn new(use_case_factory: UseCaseFactory<dyn UserPassLoginInputPort>) -> Self {
        Self { use_case_factory }
    }
}

#[async_trait]
impl UserPassLoginControllerPort for UserPassLoginController {
    async fn execute(&self, params: UserPassLoginParams) -> HttpResult<()> {
        let use_case = self
            .use_case_factory
            .call((params.session, params.response))
            .into_http()?;
        use_case.execute(params.request).await.into_http()
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/userpass",
    request_body = UserPassLoginBody,
    responses(
        (
            status = 200,
            description = "Logged in; the session cookie is set.",
            body = UserPassLoginViewModel
        ),
        (status = 400, description = "A required field is missing.", body = ErrorViewModel),
        (
            status = 401,
            description = "The auth server rejected the credentials.",
            body = ErrorViewModel
        ),
        (status = 429, description = "Too many login attempts."),
        (status = 502, description = "The auth server could not be reached.", body = ErrorViewModel)
    ),
    tag = "Auth"
)]
pub async fn userpass_login(
    Extension(state): Extension<HttpState>,
    headers: HeaderMap,
    Json(body): Json<UserPassLoginBody>,
) -> HttpResult<Response> {
    let session = state.open_session(&headers).await?;
    let response = ResponseHandle::new();

    let controller = state.container.get(controllers::USERPASS_LOGIN).into_http()?;
    controller
        .execute(UserPassLoginParams {
            request: body.into(),
            session: session.clone(),
            response: response.clone(),
        })
        .await?;

    response.into_http(&session, &state.session_config)
}
