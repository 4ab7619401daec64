use std::path::PathBuf;

use super::{parse_list, parse_or, ConfigError};

pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;
pub const DEFAULT_ALLOWED_MIME_TYPES: [&str; 5] =
    ["image/png", "image/jpeg", "image/jpg", "image/gif", "image/webp"];
pub const DEFAULT_FILE_FIELDS: [&str; 3] = ["image1", "image2", "image3"];

/// Headroom on top of the file payloads for text fields and part headers.
const FORM_OVERHEAD_BYTES: u64 = 1024 * 1024;

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub auth_token: String,
    pub upload_dir: PathBuf,
    pub max_file_size: u64,
    pub allowed_mime_types: Vec<String>,
    pub file_fields: Vec<String>,
    pub rollback_on_error: bool,
}

impl UploadConfig {
    /// Config with the stock limits for the given shared secret and directory.
    pub fn new(auth_token: impl Into<String>, upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            auth_token: auth_token.into(),
            upload_dir: upload_dir.into(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            allowed_mime_types: DEFAULT_ALLOWED_MIME_TYPES.iter().map(|s| s.to_string()).collect(),
            file_fields: DEFAULT_FILE_FIELDS.iter().map(|s| s.to_string()).collect(),
            rollback_on_error: false,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let auth_token = lookup("UPLOAD_AUTH_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::Missing("UPLOAD_AUTH_TOKEN"))?;

        let upload_dir: PathBuf =
            parse_or(&lookup, "UPLOAD_DIR", PathBuf::from(DEFAULT_UPLOAD_DIR))?;

        let mut config = Self::new(auth_token, upload_dir);

        config.max_file_size = parse_or(&lookup, "UPLOAD_MAX_FILE_SIZE", DEFAULT_MAX_FILE_SIZE)?;
        if config.max_file_size == 0 {
            return Err(ConfigError::Invalid {
                key: "UPLOAD_MAX_FILE_SIZE",
                value: "0".to_string(),
            });
        }

        if let Some(mime_types) = parse_list(&lookup, "UPLOAD_ALLOWED_MIME_TYPES")? {
            config.allowed_mime_types = mime_types;
        }
        if let Some(fields) = parse_list(&lookup, "UPLOAD_FILE_FIELDS")? {
            config.file_fields = fields;
        }
        config.rollback_on_error = parse_or(&lookup, "UPLOAD_ROLLBACK_ON_ERROR", false)?;

        Ok(config)
    }

    /// Exact `Authorization` header value a request must present.
    pub fn expected_authorization(&self) -> String {
        format!("Bearer {}", self.auth_token)
    }

    /// Transport-level cap for a whole request body. Large enough that every
    /// field can carry a file at the per-file cap, so oversized files are
    /// caught by the per-file check instead.
    pub fn max_body_size(&self) -> usize {
        let files = self.max_file_size.saturating_mul(self.file_fields.len() as u64);
        usize::try_from(files.saturating_add(FORM_OVERHEAD_BYTES)).unwrap_or(usize::MAX)
    }
}
