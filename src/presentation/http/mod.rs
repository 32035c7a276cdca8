// src/presentation/http/mod.rs
pub mod controllers;
pub mod error;
pub mod middleware;
pub mod openapi;
pub mod presenters;
pub mod response;
pub mod routes;
pub mod session;
pub mod state;
