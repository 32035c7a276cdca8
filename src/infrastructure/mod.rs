// src/infrastructure/mod.rs
pub mod gateway;
pub mod ioc;
pub mod session_store;
pub mod time;
