// src/config.rs

use dotenvy::dotenv;
use std::{env, fmt};

/// Raised when a required environment variable is missing or malformed.
#[derive(Debug)]
pub struct ConfigError {
    pub key: &'static str,
    pub reason: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.reason)
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub port: u16,
    /// Empty means any origin is accepted.
    pub cors_allowed_origins: Vec<String>,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").map_err(|_| ConfigError {
            key: "DATABASE_URL",
            reason: "must be set".to_string(),
        })?;

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|e| ConfigError {
                key: "PORT",
                reason: e.to_string(),
            })?,
            Err(_) => 8000,
        };

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();

        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        Ok(Self {
            database_url,
            rust_log,
            port,
            cors_allowed_origins,
            log_dir,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_split_and_trimmed() {
        let origins = parse_origins(" http://localhost:5173 , ,http://127.0.0.1:5173");
        assert_eq!(
            origins,
            vec!["http://localhost:5173", "http://127.0.0.1:5173"]
        );
    }

    #[test]
    fn blank_origin_list_means_any() {
        assert!(parse_origins("  ").is_empty());
    }
}
