//! Server configuration module

use clap::Parser;

use crate::config::{
    auth::AuthConfig,
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod auth;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;

/// Emporium JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "emporium-json", about = "Emporium JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces and metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Bearer session settings.
    #[command(flatten)]
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_defaults_with_database_url() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "emporium-json",
            "--database-url",
            "postgres://localhost/emporium",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
        assert_eq!(config.auth.session_ttl_hours, 720);
        assert_eq!(config.auth.session_ttl(), jiff::SignedDuration::from_hours(720));
        assert_eq!(config.database.max_connections, 16);
        assert_eq!(config.server.shutdown_grace().as_secs(), 30);

        Ok(())
    }

    #[test]
    fn session_ttl_can_be_shortened() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "emporium-json",
            "--database-url",
            "postgres://localhost/emporium",
            "--session-ttl-hours",
            "2",
        ])?;

        assert_eq!(config.auth.session_ttl(), jiff::SignedDuration::from_hours(2));

        Ok(())
    }
}
