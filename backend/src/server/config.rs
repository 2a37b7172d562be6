//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::path::PathBuf;

use calculator_backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) static_dir: PathBuf,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration backed by the in-memory store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            bind_addr,
            static_dir: static_dir.into(),
            db_pool: None,
        }
    }

    /// Attach a database connection pool for the SQLite adapters.
    ///
    /// Without a pool the server keeps users and calculations in memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
