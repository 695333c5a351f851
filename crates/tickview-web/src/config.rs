use std::net::SocketAddr;

use thiserror::Error;
use tickview_core::http_client::DEFAULT_TIMEOUT_MS;

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid TICKVIEW_LISTEN_ADDR '{value}': {source}")]
    ListenAddr {
        value: String,
        source: std::net::AddrParseError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub timeout_ms: u64,
    pub mock: bool,
    pub log_format: LogFormat,
}

impl Config {
    /// Read `TICKVIEW_*` variables, loading `.env` first when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr = lookup("TICKVIEW_LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.into());
        let listen_addr = addr
            .parse()
            .map_err(|source| ConfigError::ListenAddr {
                value: addr.clone(),
                source,
            })?;
        let timeout_ms = lookup("TICKVIEW_TIMEOUT_MS")
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);
        let mock = lookup("TICKVIEW_MOCK")
            .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        let log_format = match lookup("TICKVIEW_LOG_FORMAT") {
            Some(value) if value.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            listen_addr,
            timeout_ms,
            mock,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config(&[]).expect("defaults");

        assert_eq!(config.listen_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.timeout_ms, 10_000);
        assert!(!config.mock);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            ("TICKVIEW_LISTEN_ADDR", "0.0.0.0:9000"),
            ("TICKVIEW_TIMEOUT_MS", "2500"),
            ("TICKVIEW_MOCK", "TRUE"),
            ("TICKVIEW_LOG_FORMAT", "json"),
        ])
        .expect("valid");

        assert_eq!(config.listen_addr.port(), 9000);
        assert_eq!(config.timeout_ms, 2500);
        assert!(config.mock);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn rejects_bad_listen_addr() {
        let error = config(&[("TICKVIEW_LISTEN_ADDR", "nowhere")]).expect_err("invalid");
        assert!(error.to_string().contains("nowhere"));
    }
}
