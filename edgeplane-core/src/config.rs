//! Provider configuration
//!
//! Built from the provider block attributes, then overridden by
//! environment variables.

use std::collections::HashMap;
use std::time::Duration;

use thiserror::Error;

use crate::resource::Value;

pub const ENV_HOST: &str = "EDGEPLANE_HOST";
pub const ENV_ACCOUNT_SWITCH_KEY: &str = "EDGEPLANE_ACCOUNT_SWITCH_KEY";
pub const ENV_TIMEOUT_SECS: &str = "EDGEPLANE_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing provider setting '{0}'")]
    Missing(&'static str),

    #[error("Invalid provider setting '{key}': {message}")]
    Invalid { key: String, message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    /// Base URL of the API host, e.g. `https://akab-xxx.luna.akamaiapis.net`
    pub host: String,
    pub account_switch_key: Option<String>,
    pub timeout: Duration,
    pub user_agent: String,
}

impl ProviderConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            account_switch_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: default_user_agent(),
        }
    }

    /// Build from provider attributes; `host` is required unless the
    /// environment supplies it
    pub fn from_attributes(attributes: &HashMap<String, Value>) -> Result<Self, ConfigError> {
        Self::resolve(attributes, |key| std::env::var(key).ok())
    }

    /// Same as [`from_attributes`](Self::from_attributes) with an explicit
    /// environment lookup
    pub fn resolve(
        attributes: &HashMap<String, Value>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let host = env(ENV_HOST)
            .or_else(|| get_string(attributes, "host"))
            .ok_or(ConfigError::Missing("host"))?;
        if !host.starts_with("http://") && !host.starts_with("https://") {
            return Err(ConfigError::Invalid {
                key: "host".to_string(),
                message: format!("'{}' is not an http(s) URL", host),
            });
        }

        let mut config = Self::new(host.trim_end_matches('/'));
        config.account_switch_key =
            env(ENV_ACCOUNT_SWITCH_KEY).or_else(|| get_string(attributes, "account_switch_key"));

        let timeout = match env(ENV_TIMEOUT_SECS) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(secs),
                Ok(_) => {
                    return Err(ConfigError::Invalid {
                        key: ENV_TIMEOUT_SECS.to_string(),
                        message: "expected positive integer, got 0".to_string(),
                    });
                }
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        key: ENV_TIMEOUT_SECS.to_string(),
                        message: e.to_string(),
                    });
                }
            },
            None => match attributes.get("timeout_secs") {
                Some(Value::Int(n)) if *n > 0 => Some(*n as u64),
                Some(other) => {
                    return Err(ConfigError::Invalid {
                        key: "timeout_secs".to_string(),
                        message: format!("expected positive integer, got {:?}", other),
                    });
                }
                None => None,
            },
        };
        if let Some(secs) = timeout {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(agent) = get_string(attributes, "user_agent") {
            config.user_agent = agent;
        }
        Ok(config)
    }
}

fn get_string(attributes: &HashMap<String, Value>, key: &str) -> Option<String> {
    match attributes.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn default_user_agent() -> String {
    format!("edgeplane/{}", env!("CARGO_PKG_VERSION"))
}
