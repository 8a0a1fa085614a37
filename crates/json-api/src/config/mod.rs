//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig, import::ImportConfig, observability::LoggingConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod import;
pub(crate) mod observability;
pub(crate) mod server;

/// Promo Codes JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "promocodes-json", about = "Promo Codes JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Bulk upload settings.
    #[command(flatten)]
    pub import: ImportConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
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
    fn defaults_apply_when_only_database_is_given() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "promocodes-json",
            "--database-url",
            "postgres://localhost/promocodes",
        ])?;

        assert_eq!(config.import.import_max_codes, 10_000);
        assert!(!config.database.database_migrate);

        Ok(())
    }

    #[test]
    fn import_limit_can_be_overridden() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "promocodes-json",
            "--database-url",
            "postgres://localhost/promocodes",
            "--import-max-codes",
            "50",
            "--port",
            "9000",
        ])?;

        assert_eq!(config.import.import_max_codes, 50);
        assert!(config.socket_addr().ends_with(":9000"));

        Ok(())
    }

    #[test]
    fn json_log_format_is_selectable() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "promocodes-json",
            "--database-url",
            "postgres://localhost/promocodes",
            "--log-format",
            "json",
        ])?;

        assert_eq!(config.logging.log_format, observability::LogFormat::Json);

        Ok(())
    }
}
