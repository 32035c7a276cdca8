use std::collections::HashMap;

use async_trait::async_trait;

use crate::application::{
    ApplicationResult,
    dto::{OidcProviderDto, VoDto},
    error::ApplicationError,
    ports::secondary::EnvConfigGatewayOutputPort,
};

/// Reads deployment settings from a snapshot of environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvConfigGateway {
    vars: HashMap<String, String>,
}

impl EnvConfigGateway {
    /// Snapshot the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn require(&self, key: &str) -> ApplicationResult<String> {
        self.get(key)
            .map(str::to_string)
            .ok_or_else(|| ApplicationError::configuration(format!("{key} is not set")))
    }

    fn flag(&self, key: &str, default: bool) -> bool {
        self.get(key)
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(default)
    }

    fn list(&self, key: &str) -> Vec<String> {
        self.get(key)
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn url(&self, key: &str) -> ApplicationResult<String> {
        Ok(self.require(key)?.trim_end_matches('/').to_string())
    }

    fn oidc_provider(&self, name: &str) -> ApplicationResult<OidcProviderDto> {
        let prefix = format!("OIDC_PROVIDER_{}", name.to_uppercase());
        Ok(OidcProviderDto {
            name: name.to_string(),
            client_id: self.require(&format!("{prefix}_CLIENT_ID"))?,
            authorization_url: self.require(&format!("{prefix}_AUTHORIZATION_URL"))?,
            token_url: self.require(&format!("{prefix}_TOKEN_URL"))?,
            redirect_url: self.require(&format!("{prefix}_REDIRECT_URL"))?,
        })
    }

    fn vo(&self, short_name: &str) -> VoDto {
        let prefix = format!("VO_{}", short_name.to_uppercase());
        VoDto {
            short_name: short_name.to_string(),
            name: self
                .get(&format!("{prefix}_NAME"))
                .unwrap_or(short_name)
                .to_string(),
            oidc_enabled: self.flag(&format!("{prefix}_OIDC_ENABLED"), false),
            oidc_provider_names: self.list(&format!("{prefix}_OIDC_PROVIDERS")),
        }
    }
}

#[async_trait]
impl EnvConfigGatewayOutputPort for EnvConfigGateway {
    async fn rucio_host(&self) -> ApplicationResult<String> {
        self.url("RUCIO_HOST")
    }

    async fn rucio_auth_host(&self) -> ApplicationResult<String> {
        self.url("RUCIO_AUTH_HOST")
    }

    async fn userpass_enabled(&self) -> ApplicationResult<bool> {
        Ok(self.flag("ENABLE_USERPASS", true))
    }

    async fn x509_enabled(&self) -> ApplicationResult<bool> {
        Ok(self.flag("ENABLE_X509", false))
    }

    async fn oidc_enabled(&self) -> ApplicationResult<bool> {
        Ok(self.flag("ENABLE_OIDC", false))
    }

    async fn oidc_providers(&self) -> ApplicationResult<Vec<OidcProviderDto>> {
        self.list("OIDC_PROVIDERS")
            .iter()
            .map(|name| self.oidc_provider(name))
            .collect()
    }

    async fn multivo_enabled(&self) -> ApplicationResult<bool> {
        Ok(self.flag("MULTIVO_ENABLED", false))
    }

    async fn vo_list(&self) -> ApplicationResult<Vec<VoDto>> {
        let names = self.list("VO_LIST");
        if names.is_empty() {
            return Err(ApplicationError::configuration(
                "VO_LIST must name at least one VO when MULTIVO_ENABLED is set",
            ));
        }
        Ok(names.iter().map(|name| self.vo(name)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(vars: &[(&str, &str)]) -> EnvConfigGateway {
        EnvConfigGateway::from_vars(vars.iter().copied())
    }

    #[tokio::test]
    async fn auth_host_is_required_and_trimmed() {
        let gw = gateway(&[("RUCIO_AUTH_HOST", "https://auth.example:443/ ")]);
        assert_eq!(gw.rucio_auth_host().await.unwrap(), "https://auth.example:443");

        let err = gateway(&[]).rucio_auth_host().await.unwrap_err();
        assert!(
            matches!(err, ApplicationError::Configuration(msg) if msg.contains("RUCIO_AUTH_HOST"))
        );
    }

    #[tokio::test]
    async fn flags_have_defaults() {
        let gw = gateway(&[("ENABLE_X509", "TRUE"), ("ENABLE_USERPASS", "false")]);
        assert!(gw.x509_enabled().await.unwrap());
        assert!(!gw.userpass_enabled().await.unwrap());
        assert!(!gw.oidc_enabled().await.unwrap());
        assert!(gateway(&[]).userpass_enabled().await.unwrap());
    }

    #[tokio::test]
    async fn oidc_providers_are_read_per_name() {
        let gw = gateway(&[
            ("OIDC_PROVIDERS", "cern, indigo"),
            ("OIDC_PROVIDER_CERN_CLIENT_ID", "c1"),
            ("OIDC_PROVIDER_CERN_AUTHORIZATION_URL", "https://cern/auth"),
            ("OIDC_PROVIDER_CERN_TOKEN_URL", "https://cern/token"),
            ("OIDC_PROVIDER_CERN_REDIRECT_URL", "https://ui/cb"),
        ]);

        let err = gw.oidc_providers().await.unwrap_err();
        assert!(err.to_string().contains("OIDC_PROVIDER_INDIGO_CLIENT_ID"));

        let gw = gateway(&[
            ("OIDC_PROVIDERS", "cern"),
            ("OIDC_PROVIDER_CERN_CLIENT_ID", "c1"),
            ("OIDC_PROVIDER_CERN_AUTHORIZATION_URL", "https://cern/auth"),
            ("OIDC_PROVIDER_CERN_TOKEN_URL", "https://cern/token"),
            ("OIDC_PROVIDER_CERN_REDIRECT_URL", "https://ui/cb"),
        ]);
        let providers = gw.oidc_providers().await.unwrap();
        assert_eq!(providers.len(), 1);
        assert_eq!(providers[0].client_id, "c1");
    }

    #[tokio::test]
    async fn vo_list_reads_names_and_oidc_settings() {
        let gw = gateway(&[
            ("VO_LIST", "atl,cms"),
            ("VO_ATL_NAME", "atlas"),
            ("VO_ATL_OIDC_ENABLED", "1"),
            ("VO_ATL_OIDC_PROVIDERS", "cern"),
        ]);

        let vos = gw.vo_list().await.unwrap();
        assert_eq!(vos[0].name, "atlas");
        assert!(vos[0].oidc_enabled);
        assert_eq!(vos[0].oidc_provider_names, vec!["cern".to_string()]);
        assert_eq!(vos[1].name, "cms");
        assert!(!vos[1].oidc_enabled);

        assert!(gateway(&[]).vo_list().await.is_err());
    }
}
