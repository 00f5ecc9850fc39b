//! Process settings and the immutable server configuration built from them.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use stampcard::domain::AdminAuthenticator;
use stampcard::outbound::persistence::DbPool;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Settings read once at start from `STAMPCARD_*` variables or flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STAMPCARD")]
pub struct AppSettings {
    /// Listening port.
    pub port: Option<u16>,
    /// The single browser origin allowed to call the API.
    pub allowed_origin: Option<String>,
    /// PostgreSQL URL. Without one the server keeps participants in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
}

impl AppSettings {
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn allowed_origin(&self) -> &str {
        self.allowed_origin
            .as_deref()
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .unwrap_or(DEFAULT_ALLOWED_ORIGIN)
    }

    /// The database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE).max(1)
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port()))
    }
}

/// Everything the server factory needs, fixed before the listener starts.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) allowed_origin: String,
    pub(crate) admin: AdminAuthenticator,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        allowed_origin: impl Into<String>,
        admin: AdminAuthenticator,
    ) -> Self {
        Self {
            bind_addr,
            allowed_origin: allowed_origin.into(),
            admin,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for the persistence adapter.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "Exercised by bootstrap tests")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
