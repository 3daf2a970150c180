use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::error::ConsoleError;

pub const DEFAULT_API_BASE_URL: &str = "https://smart-timetable-899l.onrender.com/api";
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct ConsoleConfig {
    pub api_base_url: String,
    pub addr: SocketAddr,
    pub request_timeout: Duration,
}

impl ConsoleConfig {
    pub fn new_from_env() -> Result<Self, ConsoleError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConsoleError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim()
            .trim_end_matches('/')
            .to_string();

        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConsoleError::Config(format!(
                "API_BASE_URL must be an http(s) URL, got {}",
                api_base_url
            )));
        }

        let addr = lookup("CONSOLE_ADDR")
            .unwrap_or_else(|| DEFAULT_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConsoleError::Config(format!("CONSOLE_ADDR is invalid: {}", e)))?;

        let timeout_secs = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|e| ConsoleError::Config(format!("REQUEST_TIMEOUT_SECS is invalid: {}", e)))?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            api_base_url,
            addr,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
