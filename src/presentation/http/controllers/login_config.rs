// src/presentation/http/controllers/login_config.rs
use async_trait::async_trait;
use axum::{Extension, http::HeaderMap, response::Response};

use crate::{
    application::ports::primary::LoginConfigInputPort,
    infrastructure::ioc::{UseCaseFactory, symbols::controllers},
    presentation::http::{
        error::{HttpResult, IntoHttpResult},
        presenters::{ErrorViewModel, LoginConfigViewModel},
        response::ResponseHandle,
        session::SessionHandle,
        state::HttpState,
    },
};

#[derive(Debug)]
pub struct LoginConfigParams {
    pub session: SessionHandle,
    pub response: ResponseHandle,
}

#[async_trait]
pub trait LoginConfigControllerPort: Send + Sync {
    async fn execute(&self, params: LoginConfigParams) -> HttpResult<()>;
}

pub struct LoginConfigController {
    use_case_factory: UseCaseFactory<dyn LoginConfigInputPort>,
}

impl LoginConfigController {
    pub fn new(use_case_factory: UseCaseFactory<dyn LoginConfigInputPort>) -> Self {
        Self { use_case_factory }
    }
}

#[async_trait]
impl LoginConfigControllerPort for LoginConfigController {
    async fn execute(&self, params: LoginConfigParams) -> HttpResult<()> {
        let use_case = self
            .use_case_factory
            .call((params.session, params.response))
            .into_http()?;
        use_case.execute().await.into_http()
    }
}

#[utoipa::path(
    get,
    path = "/api/auth/logincfg",
    responses(
        (
            status = 200,
            description = "Login methods offered by this deployment.",
            body = LoginConfigViewModel
        ),
        (
            status = 500,
            description = "The deployment settings are incomplete.",
            body = ErrorViewModel
        )
    ),
    tag = "Auth"
)]
pub async fn login_config(
    Extension(state): Extension<HttpState>,
    headers: HeaderMap,
) -> HttpResult<Response> {
    let session = state.open_session(&headers).await?;
    let response = ResponseHandle::new();

    let controller = state.container.get(controllers::LOGIN_CONFIG).into_http()?;
    controller
        .execute(LoginConfigParams {
            session: session.clone(),
            response: response.clone(),
        })
        .await?;

    response.into_http(&session, &state.session_config)
}
