use anyhow::{anyhow, Context, Result};
use std::env;
use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub max_connections: u32,
}

impl ServiceConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }
}

pub fn load_config() -> Result<ServiceConfig> {
    config_from(|key| env::var(key).ok())
}

fn config_from(lookup: impl Fn(&str) -> Option<String>) -> Result<ServiceConfig> {
    let database_url = lookup("DATABASE_URL")
        .and_then(|value| normalize_optional(&value))
        .ok_or_else(|| anyhow!("DATABASE_URL must be set"))?;

    let host = lookup("HOST")
        .and_then(|value| normalize_optional(&value))
        .unwrap_or_else(|| "0.0.0.0".to_string())
        .parse::<IpAddr>()
        .context("Failed to parse HOST")?;

    let port = lookup("PORT")
        .and_then(|value| normalize_optional(&value))
        .map(|value| value.parse::<u16>())
        .transpose()
        .context("Failed to parse PORT")?
        .unwrap_or(DEFAULT_PORT);

    let max_connections = lookup("DB_MAX_CONNECTIONS")
        .and_then(|value| normalize_optional(&value))
        .map(|value| value.parse::<u32>())
        .transpose()
        .context("Failed to parse DB_MAX_CONNECTIONS")?
        .unwrap_or(DEFAULT_MAX_CONNECTIONS)
        .max(1);

    Ok(ServiceConfig { database_url, host, port, max_connections })
}

fn normalize_optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
