use std::{env, fmt::Display, str::FromStr, time::Duration};

use thiserror::Error;
use tracing::{info, warn};

use crate::util::object::{self, Provider};

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("environment variable {key} is required")]
    Missing { key: String },

    #[error("invalid {key} value: {message}")]
    Invalid { key: String, message: String },
}

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub port: u16,
    pub provider: Provider,
    pub bucket: String,
    pub issue_folder: String,
    pub preview_folder: String,
    pub url_expiry: Duration,
    pub listing_cache: Duration,
}

impl SiteConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(|key| env::var(key).ok())
    }

    pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bucket_uri: String = try_load(
            &lookup,
            "STORAGE_BUCKET",
            "gs://mtvgeismar-3bf45.firebasestorage.app",
        )?;
        let provider = object::parse_provider_from_uri(&bucket_uri)?;
        let bucket = object::parse_bucket_from_uri(&bucket_uri).to_string();
        if bucket.is_empty() {
            return Err(ConfigError::Invalid {
                key: "STORAGE_BUCKET".to_string(),
                message: format!("no bucket name in: {}", bucket_uri),
            });
        }

        let url_expiry = Duration::from_secs(try_load(&lookup, "URL_EXPIRY_SECS", "3600")?);
        if url_expiry.is_zero() {
            return Err(ConfigError::Invalid {
                key: "URL_EXPIRY_SECS".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        let mut listing_cache = Duration::from_secs(try_load(&lookup, "LISTING_CACHE_SECS", "0")?);
        if listing_cache > url_expiry {
            warn!(
                listing_cache_secs = listing_cache.as_secs(),
                url_expiry_secs = url_expiry.as_secs(),
                "listing cache outlives download urls, clamping"
            );
            listing_cache = url_expiry;
        }

        Ok(Self {
            port: try_load(&lookup, "SITE_PORT", "8080")?,
            provider,
            bucket,
            issue_folder: try_load(&lookup, "ISSUE_FOLDER", "rundschau")?,
            preview_folder: try_load(&lookup, "PREVIEW_FOLDER", "rundschauPreview")?,
            url_expiry,
            listing_cache,
        })
    }
}

#[derive(Clone)]
pub struct Credentials {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

// Keeps the secret out of log lines.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(|key| env::var(key).ok())
    }

    pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            host: require(&lookup, "SFTP_HOST")?,
            port: try_load(&lookup, "SFTP_PORT", "22")?,
            username: require(&lookup, "SFTP_USERNAME")?,
            password: require(&lookup, "SFTP_KEY")?,
        })
    }
}

fn require(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String, ConfigError> {
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing {
            key: key.to_string(),
        }),
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    lookup(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::Invalid {
            key: key.to_string(),
            message: e.to_string(),
        })
}
