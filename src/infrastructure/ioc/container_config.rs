// src/infrastructure/ioc/container_config.rs
//! Application bindings: which concrete type satisfies which port.
use std::{sync::Arc, time::Duration};

use crate::{
    application::{
        ports::{
            AuthServerGatewayPort, ClockPort, EnvConfigGatewayPort,
            primary::{LoginConfigInputPort, UserPassLoginInputPort},
        },
        use_cases::{LoginConfigUseCase, UserPassLoginUseCase},
    },
    config::AppConfig,
    infrastructure::{
        gateway::{EnvConfigGateway, RucioAuthServer},
        ioc::{
            container::{Container, ContainerBuilder, ContainerError},
            symbols::{controllers, gateways, input_port, required_ports, usecase_factory},
        },
        time::SystemClock,
    },
    presentation::http::{
        controllers::{
            LoginConfigController, LoginConfigControllerPort, UserPassLoginController,
            UserPassLoginControllerPort,
        },
        presenters::{LoginConfigPresenter, UserPassLoginPresenter},
        response::ResponseHandle,
        session::SessionHandle,
    },
};

/// What request-scoped bindings can see of the current request.
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub session: SessionHandle,
    pub response: ResponseHandle,
}

pub struct GatewayOptions {
    pub env_config: EnvConfigGateway,
    pub auth_request_timeout: Duration,
}

impl GatewayOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            env_config: EnvConfigGateway::from_env(),
            auth_request_timeout: config.auth_request_timeout(),
        }
    }
}

/// Gateways are process-wide singletons, built on first use.
pub fn register_gateways(
    b: &mut ContainerBuilder,
    options: GatewayOptions,
) -> Result<(), ContainerError> {
    let env_config = options.env_config;
    b.bind_singleton(gateways::ENV_CONFIG, move |_| {
        Ok(Arc::new(env_config.clone()) as Arc<EnvConfigGatewayPort>)
    })?;

    let timeout = options.auth_request_timeout;
    b.bind_singleton(gateways::AUTH_SERVER, move |r| {
        let env_config = r.get(gateways::ENV_CONFIG)?;
        let server = RucioAuthServer::new(env_config, timeout).map_err(|err| {
            ContainerError::provider(gateways::AUTH_SERVER.name(), err.to_string())
        })?;
        Ok(Arc::new(server) as Arc<AuthServerGatewayPort>)
    })?;

    b.bind_singleton(gateways::CLOCK, |_| {
        Ok(Arc::new(SystemClock) as Arc<ClockPort>)
    })?;

    Ok(())
}

fn userpass_login_use_case(
    container: &Container,
    session: SessionHandle,
    response: ResponseHandle,
) -> Result<Arc<dyn UserPassLoginInputPort>, ContainerError> {
    let auth_server = container.get(gateways::AUTH_SERVER)?;
    let presenter = Arc::new(UserPassLoginPresenter::new(session, response));
    Ok(Arc::new(UserPassLoginUseCase::new(presenter, auth_server)))
}

fn login_config_use_case(
    container: &Container,
    session: SessionHandle,
    response: ResponseHandle,
) -> Result<Arc<dyn LoginConfigInputPort>, ContainerError> {
    let env_config = container.get(gateways::ENV_CONFIG)?;
    let clock = container.get(gateways::CLOCK)?;
    let presenter = Arc::new(LoginConfigPresenter::new(session, response, clock));
    Ok(Arc::new(LoginConfigUseCase::new(presenter, env_config)))
}

/// Input ports resolve per request scope; factories build the same use cases from
/// explicit `(session, response)` arguments and look their gateways up on each call.
pub fn register_use_cases(b: &mut ContainerBuilder) -> Result<(), ContainerError> {
    b.bind_request_scoped(input_port::USERPASS_LOGIN, |r| {
        let ctx = r.context::<RequestContext>()?;
        userpass_login_use_case(r.container(), ctx.session.clone(), ctx.response.clone())
    })?;
    b.bind_factory(usecase_factory::USERPASS_LOGIN, |c, (session, response)| {
        userpass_login_use_case(c, session, response)
    })?;

    b.bind_request_scoped(input_port::LOGIN_CONFIG, |r| {
        let ctx = r.context::<RequestContext>()?;
        login_config_use_case(r.container(), ctx.session.clone(), ctx.response.clone())
    })?;
    b.bind_factory(usecase_factory::LOGIN_CONFIG, |c, (session, response)| {
        login_config_use_case(c, session, response)
    })?;

    Ok(())
}

pub fn register_controllers(b: &mut ContainerBuilder) -> Result<(), ContainerError> {
    b.bind_transient(controllers::USERPASS_LOGIN, |r| {
        let factory = r.get(usecase_factory::USERPASS_LOGIN)?;
        Ok(Arc::new(UserPassLoginController::new((*factory).clone()))
            as Arc<dyn UserPassLoginControllerPort>)
    })?;
    b.bind_transient(controllers::LOGIN_CONFIG, |r| {
        let factory = r.get(usecase_factory::LOGIN_CONFIG)?;
        Ok(Arc::new(LoginConfigController::new((*factory).clone()))
            as Arc<dyn LoginConfigControllerPort>)
    })?;
    Ok(())
}

/// Register use cases and controllers on `b`, freeze it and check completeness.
pub fn finish_container(mut b: ContainerBuilder) -> Result<Container, ContainerError> {
    register_use_cases(&mut b)?;
    register_controllers(&mut b)?;
    let container = b.build();
    container.verify(&required_ports())?;
    tracing::info!(ports = ?container.ports(), "container configured");
    Ok(container)
}

/// Composition root for the running service.
pub fn build_app_container(config: &AppConfig) -> Result<Container, ContainerError> {
    let mut b = ContainerBuilder::new();
    register_gateways(&mut b, GatewayOptions::from_config(config))?;
    finish_container(b)
}
