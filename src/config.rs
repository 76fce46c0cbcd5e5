use std::net::IpAddr;

use axum::http::HeaderValue;
use ipnet::IpNet;

#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. Sheets are kept in memory when unset.
    pub database_url: Option<String>,
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub trusted_proxies: Vec<IpNet>,
    /// Empty means any origin may post.
    pub cors_origins: Vec<HeaderValue>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            host: IpAddr::from([0, 0, 0, 0]),
            port: 3000,
            max_body_size: 1_048_576,
            trusted_proxies: Vec::new(),
            cors_origins: Vec::new(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let host: IpAddr = env_or("FORMSHEET_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid FORMSHEET_HOST: {e}"))?;

        let port: u16 = env_or("FORMSHEET_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid FORMSHEET_PORT: {e}"))?;

        let max_body_size: usize = env_or("FORMSHEET_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid FORMSHEET_MAX_BODY_SIZE: {e}"))?;

        let trusted_proxies: Vec<IpNet> = env_list("FORMSHEET_TRUSTED_PROXIES")
            .map(|s| {
                s.parse()
                    .map_err(|e| format!("Invalid FORMSHEET_TRUSTED_PROXIES entry '{s}': {e}"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let cors_origins: Vec<HeaderValue> = env_list("FORMSHEET_CORS_ORIGINS")
            .filter(|s| s != "*")
            .map(|s| {
                HeaderValue::from_str(&s)
                    .map_err(|e| format!("Invalid FORMSHEET_CORS_ORIGINS entry '{s}': {e}"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let log_level = env_or("FORMSHEET_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            host,
            port,
            max_body_size,
            trusted_proxies,
            cors_origins,
            log_level,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Comma-separated variable, trimmed, blanks dropped.
fn env_list(key: &str) -> impl Iterator<Item = String> {
    env_or(key, "")
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .into_iter()
}
