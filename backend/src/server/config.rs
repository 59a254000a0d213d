//! Server settings loaded via OrthoConfig.
//!
//! Values are layered from defaults, configuration file, `CATALOG_*`
//! environment variables and CLI flags.

use std::net::{SocketAddr, ToSocketAddrs};

use catalog::outbound::persistence::{DEFAULT_MAX_SIZE, PoolConfig};
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Raised when the configured host and port cannot be bound.
#[derive(Debug, thiserror::Error)]
#[error("invalid bind address {host}:{port}")]
pub struct BindAddrError {
    host: String,
    port: u16,
    #[source]
    source: Option<std::io::Error>,
}

/// Settings for the HTTP server and its storage backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CATALOG")]
pub struct ServerSettings {
    /// Host or IP address to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// PostgreSQL connection URL. The in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Apply embedded migrations before serving.
    pub run_migrations: Option<bool>,
}

impl ServerSettings {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Resolve the listener address.
    ///
    /// # Errors
    ///
    /// Returns [`BindAddrError`] when host and port do not resolve to a
    /// socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, BindAddrError> {
        let (host, port) = (self.host(), self.port());
        let invalid = |source| BindAddrError {
            host: host.to_owned(),
            port,
            source,
        };
        (host, port)
            .to_socket_addrs()
            .map_err(|err| invalid(Some(err)))?
            .next()
            .ok_or_else(|| invalid(None))
    }

    /// Pool settings, or `None` when no database is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url.as_ref().map(|url| {
            PoolConfig::new(url.clone())
                .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_MAX_SIZE))
        })
    }
}
