// src/infrastructure/ioc/mod.rs
pub mod container;
pub mod container_config;
pub mod symbols;

pub use container::{
    Container, ContainerBuilder, ContainerError, Factory, Port, PortKey, RequestScope, Resolver,
    Scope,
};
pub use container_config::{GatewayOptions, RequestContext, build_app_container};
pub use symbols::UseCaseFactory;
