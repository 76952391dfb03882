use kb_config::{
    DEFAULT_API_HOST, DEFAULT_API_PORT, DEFAULT_CORS_ORIGIN, DEFAULT_DB_MAX_CONNECTIONS,
    KB_API_HOST, KB_API_PORT, KB_CORS_ORIGIN, KB_DATABASE_PATH, KB_DB_MAX_CONNECTIONS, PORT,
};
use std::env;
use std::net::IpAddr;
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid host address: {0}")]
    InvalidHost(String),
    #[error("Invalid max connections: {0}")]
    InvalidMaxConnections(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub cors_origin: String,
    pub database_path: PathBuf,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // KB_API_PORT wins over the legacy PORT variable
        let port = match env::var(KB_API_PORT).or_else(|_| env::var(PORT)) {
            Ok(port_str) => port_str.trim().parse::<u16>()?,
            Err(_) => DEFAULT_API_PORT,
        };

        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let host_str = env::var(KB_API_HOST).unwrap_or_else(|_| DEFAULT_API_HOST.to_string());
        let host = host_str
            .trim()
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidHost(host_str.clone()))?;

        let cors_origin =
            env::var(KB_CORS_ORIGIN).unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_string());

        let database_path = env::var(KB_DATABASE_PATH)
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(kb_core::database_file);

        let max_connections = match env::var(KB_DB_MAX_CONNECTIONS) {
            Ok(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidMaxConnections(raw)),
            },
            Err(_) => DEFAULT_DB_MAX_CONNECTIONS,
        };

        Ok(Config {
            host,
            port,
            cors_origin,
            database_path,
            max_connections,
        })
    }
}
