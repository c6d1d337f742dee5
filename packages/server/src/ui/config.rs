//! Server configuration.

use std::{num::NonZeroUsize, path::PathBuf, time::Duration};

use crate::infrastructure::message_pusher::DEFAULT_QUEUE_CAPACITY;

/// Default upper bound on a single socket write
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(10);

/// Runtime configuration for [`Server`](super::Server).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address to bind to (e.g., "127.0.0.1")
    pub host: String,
    /// Port number to bind to (e.g., 8080)
    pub port: u16,
    /// Capacity of each connection's outbound queue. A peer whose queue is
    /// full when a broadcast arrives is evicted from its room.
    pub queue_capacity: NonZeroUsize,
    /// Upper bound on a single socket write. A peer that stalls longer has
    /// its session closed.
    pub write_timeout: Duration,
    /// Directory served for any path that is not an API or WebSocket route
    pub static_dir: Option<PathBuf>,
    /// Origins allowed by CORS. Empty disables the CORS layer.
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            queue_capacity: NonZeroUsize::new(DEFAULT_QUEUE_CAPACITY)
                .unwrap_or(NonZeroUsize::MIN),
            write_timeout: DEFAULT_WRITE_TIMEOUT,
            static_dir: None,
            allowed_origins: Vec::new(),
        }
    }
}
