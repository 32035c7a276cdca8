// src/infrastructure/gateway/mod.rs
mod env_config;
mod rucio_auth_server;

pub use env_config::EnvConfigGateway;
pub use rucio_auth_server::{RucioAuthServer, parse_expiry};
