// src/application/ports/mod.rs
pub mod output;
pub mod primary;
pub mod secondary;
pub mod session;
pub mod time;

// Type aliases to make port injection sites more descriptive and reduce `dyn` noise
pub type AuthServerGatewayPort = dyn secondary::AuthServerGatewayOutputPort;
pub type EnvConfigGatewayPort = dyn secondary::EnvConfigGatewayOutputPort;
pub type UserPassLoginPresenterPort = dyn output::UserPassLoginOutputPort;
pub type LoginConfigPresenterPort = dyn output::LoginConfigOutputPort;
pub type SessionStorePort = dyn session::SessionStore;
pub type ClockPort = dyn time::Clock;
