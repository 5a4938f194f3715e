//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable that overrides `backend.base_url`.
pub const BACKEND_URL_ENV: &str = "DEVCONNECT_API_URL";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse a TOML document. Missing fields take their defaults.
pub fn parse_config(content: &str) -> Result<ProxyConfig, ConfigError> {
    toml::from_str(content).map_err(ConfigError::Parse)
}

/// Read and parse a TOML file without validating it.
pub fn read_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_config(&content)
}

/// Apply environment overrides through `lookup`, so callers decide whether
/// the process environment or a fixed map is consulted.
///
/// An unset or blank variable leaves the configured value alone.
pub fn apply_env_overrides<F>(config: &mut ProxyConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(BACKEND_URL_ENV) {
        let url = url.trim();
        if !url.is_empty() {
            config.backend.base_url = url.to_string();
        }
    }
}

/// Normalize and validate a fully assembled configuration.
pub fn finalize(mut config: ProxyConfig) -> Result<ProxyConfig, ConfigError> {
    let trimmed = config.backend.base_url.trim_end_matches('/').len();
    config.backend.base_url.truncate(trimmed);

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load, override from the process environment, and validate.
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let mut config = read_config(path)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    finalize(config)
}
