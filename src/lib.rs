//! Todo Core - per-user todo list service
//!
//! REST API over SQLite with bearer-token authentication. Every response is
//! wrapped in the [`api::ApiResult`] envelope.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod migration;
pub mod openapi;
pub mod repository;
pub mod server;
pub mod service;
pub mod state;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
