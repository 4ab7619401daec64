pub mod server;
pub mod upload;

use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Reads `key` through `lookup`, falling back to `default` when unset or blank.
pub(crate) fn parse_or<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim().parse::<T>().map_err(|_| ConfigError::Invalid { key, value: raw })
        }
        _ => Ok(default),
    }
}

/// Splits a comma-separated variable, dropping blank entries.
pub(crate) fn parse_list<F>(lookup: &F, key: &'static str) -> Result<Option<Vec<String>>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };

    let items: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if items.is_empty() {
        return Err(ConfigError::Invalid { key, value: raw });
    }
    Ok(Some(items))
}
