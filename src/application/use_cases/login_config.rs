use std::sync::Arc;

use crate::application::{
    ApplicationResult,
    dto::{LoginConfigError, LoginConfigResponse, VoDto},
    ports::{EnvConfigGatewayPort, LoginConfigPresenterPort, primary::LoginConfigInputPort},
};
use async_trait::async_trait;

pub struct LoginConfigUseCase {
    presenter: Arc<LoginConfigPresenterPort>,
    env_config: Arc<EnvConfigGatewayPort>,
}

impl LoginConfigUseCase {
    pub fn new(
        presenter: Arc<LoginConfigPresenterPort>,
        env_config: Arc<EnvConfigGatewayPort>,
    ) -> Self {
        Self {
            presenter,
            env_config,
        }
    }

    async fn collect(&self) -> ApplicationResult<LoginConfigResponse> {
        let gateway = &self.env_config;

        let oidc_enabled = gateway.oidc_enabled().await?;
        let oidc_providers = if oidc_enabled {
            gateway.oidc_providers().await?
        } else {
            Vec::new()
        };

        let multivo_enabled = gateway.multivo_enabled().await?;
        let vo_list = if multivo_enabled {
            gateway.vo_list().await?
        } else {
            vec![VoDto::default_vo()]
        };

        Ok(LoginConfigResponse {
            userpass_enabled: gateway.userpass_enabled().await?,
            x509_enabled: gateway.x509_enabled().await?,
            oidc_enabled,
            oidc_providers,
            multivo_enabled,
            vo_list,
            rucio_auth_host: gateway.rucio_auth_host().await?,
        })
    }
}

#[async_trait]
impl LoginConfigInputPort for LoginConfigUseCase {
    async fn execute(&self) -> ApplicationResult<()> {
        match self.collect().await {
            Ok(config) => self.presenter.present_success(config).await,
            Err(err) => {
                tracing::error!(error = %err, "login configuration unavailable");
                self.presenter
                    .present_error(LoginConfigError {
                        message: err.to_string(),
                    })
                    .await
            }
        }
    }
}
