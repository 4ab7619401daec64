use super::{parse_list, parse_or, ConfigError};

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    /// `None` means every origin is allowed.
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            cors_allowed_origins: parse_list(&lookup, "CORS_ALLOWED_ORIGINS")?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
