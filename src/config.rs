//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;

/// Which credential scheme the account directory uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSchemeKind {
    Plain,
    Sha256,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL; absent means the in-memory store
    pub database_url: Option<String>,

    /// Maximum database connections in pool
    pub database_max_connections: u32,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Credential scheme (plain or sha256)
    pub credential_scheme: CredentialSchemeKind,

    /// Whether to create demo accounts at startup
    pub seed_demo_data: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL").ok();

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS"))?;

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let credential_scheme = match env::var("CREDENTIAL_SCHEME")
            .unwrap_or_else(|_| "plain".to_string())
            .as_str()
        {
            "plain" => CredentialSchemeKind::Plain,
            "sha256" => CredentialSchemeKind::Sha256,
            _ => return Err(ConfigError::InvalidValue("CREDENTIAL_SCHEME")),
        };

        let seed_demo_data = env::var("SEED_DEMO_DATA")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Ok(Self {
            database_url,
            database_max_connections,
            host,
            port,
            credential_scheme,
            seed_demo_data,
        })
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
