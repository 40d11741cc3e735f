use std::env;
use std::time::Duration;
use thiserror::Error;

pub const API_URL_VAR: &str = "ATTENDANCE_API_URL";
pub const REQUEST_TIMEOUT_VAR: &str = "ATTENDANCE_REQUEST_TIMEOUT_MS";
pub const NOTICE_VAR: &str = "ATTENDANCE_NOTICE_MS";

const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_NOTICE_MS: u64 = 3_000;
const IN_MEMORY_BACKEND: &str = "memory";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Http(String),
    /// Local, seeded with sample records. Nothing is persisted.
    InMemory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub backend: Backend,
    pub request_timeout: Duration,
    pub notice_duration: Duration,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a whole number of milliseconds, got `{value}`")]
    InvalidMillis { name: &'static str, value: String },

    #[error("{name} must be greater than zero")]
    ZeroMillis { name: &'static str },

    #[error("ATTENDANCE_API_URL must start with http:// or https://, got `{0}`")]
    InvalidApiUrl(String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| lookup(name).map(|value| value.trim().to_string()).filter(|value| !value.is_empty());

        let backend = match read(API_URL_VAR) {
            None => Backend::Http(DEFAULT_API_URL.to_string()),
            Some(value) if value.eq_ignore_ascii_case(IN_MEMORY_BACKEND) => Backend::InMemory,
            Some(value) if value.starts_with("http://") || value.starts_with("https://") => Backend::Http(value),
            Some(value) => return Err(ConfigError::InvalidApiUrl(value)),
        };

        Ok(Self {
            backend,
            request_timeout: millis(REQUEST_TIMEOUT_VAR, read(REQUEST_TIMEOUT_VAR), DEFAULT_REQUEST_TIMEOUT_MS)?,
            notice_duration: millis(NOTICE_VAR, read(NOTICE_VAR), DEFAULT_NOTICE_MS)?,
        })
    }
}

fn millis(name: &'static str, value: Option<String>, default: u64) -> Result<Duration, ConfigError> {
    let Some(value) = value else {
        return Ok(Duration::from_millis(default));
    };
    match value.parse::<u64>() {
        Ok(0) => Err(ConfigError::ZeroMillis { name }),
        Ok(ms) => Ok(Duration::from_millis(ms)),
        Err(_) => Err(ConfigError::InvalidMillis { name, value }),
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[rstest]
    fn it_should_fall_back_to_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.backend, Backend::Http("http://localhost:8080".to_string()));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.notice_duration, Duration::from_secs(3));
    }

    #[rstest]
    #[case("memory")]
    #[case(" MEMORY ")]
    fn it_should_select_the_in_memory_backend(#[case] value: &str) {
        let config = config_from(&[(API_URL_VAR, value)]).unwrap();
        assert_eq!(config.backend, Backend::InMemory);
    }

    #[rstest]
    fn it_should_read_every_variable() {
        let config = config_from(&[
            (API_URL_VAR, "https://hr.example.com"),
            (REQUEST_TIMEOUT_VAR, "2500"),
            (NOTICE_VAR, "1000"),
        ])
        .unwrap();

        assert_eq!(config.backend, Backend::Http("https://hr.example.com".to_string()));
        assert_eq!(config.request_timeout, Duration::from_millis(2500));
        assert_eq!(config.notice_duration, Duration::from_millis(1000));
    }

    #[rstest]
    fn it_should_treat_blank_values_as_unset() {
        let config = config_from(&[(NOTICE_VAR, "  ")]).unwrap();
        assert_eq!(config.notice_duration, Duration::from_secs(3));
    }

    #[rstest]
    #[case(&[(REQUEST_TIMEOUT_VAR, "ten")], ConfigError::InvalidMillis { name: REQUEST_TIMEOUT_VAR, value: "ten".to_string() })]
    #[case(&[(NOTICE_VAR, "0")], ConfigError::ZeroMillis { name: NOTICE_VAR })]
    #[case(&[(API_URL_VAR, "localhost:8080")], ConfigError::InvalidApiUrl("localhost:8080".to_string()))]
    fn it_should_reject_invalid_values(#[case] vars: &[(&str, &str)], #[case] expected: ConfigError) {
        assert_eq!(config_from(vars), Err(expected));
    }
}
