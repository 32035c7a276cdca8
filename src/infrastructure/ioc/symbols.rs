// src/infrastructure/ioc/symbols.rs
//! Port identifiers for everything the container hands out.
use crate::{
    application::ports::{
        AuthServerGatewayPort, ClockPort, EnvConfigGatewayPort,
        primary::{LoginConfigInputPort, UserPassLoginInputPort},
    },
    infrastructure::ioc::container::{Factory, Port, PortKey},
    presentation::http::{
        controllers::{LoginConfigControllerPort, UserPassLoginControllerPort},
        response::ResponseHandle,
        session::SessionHandle,
    },
};

/// Builds a use case bound to the session and response of one request.
pub type UseCaseFactory<P> = Factory<(SessionHandle, ResponseHandle), P>;

/// Input ports, implemented by the use cases.
pub mod input_port {
    use super::*;

    pub const USERPASS_LOGIN: Port<dyn UserPassLoginInputPort> =
        Port::new("UserPassLoginInputPort");
    pub const LOGIN_CONFIG: Port<dyn LoginConfigInputPort> = Port::new("LoginConfigInputPort");
}

pub mod controllers {
    use super::*;

    pub const USERPASS_LOGIN: Port<dyn UserPassLoginControllerPort> =
        Port::new("UserPassLoginController");
    pub const LOGIN_CONFIG: Port<dyn LoginConfigControllerPort> =
        Port::new("LoginConfigController");
}

pub mod usecase_factory {
    use super::*;

    pub const USERPASS_LOGIN: Port<UseCaseFactory<dyn UserPassLoginInputPort>> =
        Port::new("UserPassLoginUseCaseFactory");
    pub const LOGIN_CONFIG: Port<UseCaseFactory<dyn LoginConfigInputPort>> =
        Port::new("LoginConfigUseCaseFactory");
}

pub mod gateways {
    use super::*;

    pub const AUTH_SERVER: Port<AuthServerGatewayPort> = Port::new("AuthServerGateway");
    pub const ENV_CONFIG: Port<EnvConfigGatewayPort> = Port::new("EnvConfigGateway");
    pub const CLOCK: Port<ClockPort> = Port::new("Clock");
}

/// Every port the application needs bound before it serves a request.
pub fn required_ports() -> Vec<PortKey> {
    vec![
        gateways::AUTH_SERVER.key(),
        gateways::ENV_CONFIG.key(),
        gateways::CLOCK.key(),
        input_port::USERPASS_LOGIN.key(),
        input_port::LOGIN_CONFIG.key(),
        controllers::USERPASS_LOGIN.key(),
        controllers::LOGIN_CONFIG.key(),
        usecase_factory::USERPASS_LOGIN.key(),
        usecase_factory::LOGIN_CONFIG.key(),
    ]
}
