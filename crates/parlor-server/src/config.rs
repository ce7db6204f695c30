//! Server configuration, read from `PARLOR_*` environment variables.

use std::env;
use std::str::FromStr;

use anyhow::{anyhow, Result};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 4000;
const DEFAULT_HTTP_PORT: u16 = 4001;
const DEFAULT_MAX_CLIENTS: usize = 256;

/// Runtime settings for both listeners.
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface both listeners bind to (`PARLOR_BIND_ADDR`).
    pub bind_addr: String,
    /// Chat TCP port (`PARLOR_PORT`).
    pub port: u16,
    /// Liveness HTTP port (`PARLOR_HTTP_PORT`).
    pub http_port: u16,
    /// Admission cap; further connections are refused (`PARLOR_MAX_CLIENTS`).
    pub max_clients: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            bind_addr: read_env_or_default("PARLOR_BIND_ADDR", DEFAULT_BIND_ADDR.to_string())?,
            port: read_env_or_default("PARLOR_PORT", DEFAULT_PORT)?,
            http_port: read_env_or_default("PARLOR_HTTP_PORT", DEFAULT_HTTP_PORT)?,
            max_clients: read_env_or_default("PARLOR_MAX_CLIENTS", DEFAULT_MAX_CLIENTS)?,
        })
    }

    /// `host:port` for the chat listener.
    pub fn chat_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// `host:port` for the liveness listener.
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.http_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            http_port: DEFAULT_HTTP_PORT,
            max_clients: DEFAULT_MAX_CLIENTS,
        }
    }
}

fn read_env_or_default<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| anyhow!("invalid value for {}: {}", key, err)),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(err) => Err(anyhow!("cannot read {}: {}", key, err)),
    }
}
