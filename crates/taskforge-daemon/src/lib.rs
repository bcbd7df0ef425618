//! Taskforge daemon library
//!
//! Components of the coordination daemon:
//! - REST API handlers and router
//! - session tokens and password hashing
//! - configuration and server lifecycle

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod server;

pub use config::DaemonConfig;
pub use error::{ApiError, DaemonError};
pub use server::Server;
