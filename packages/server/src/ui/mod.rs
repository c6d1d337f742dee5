//! UI layer: axum router, HTTP / WebSocket handlers and per-connection sessions.

mod config;
mod handler;
mod server;
mod session;
mod signal;
pub mod state;

pub use config::ServerConfig;
pub use server::Server;
