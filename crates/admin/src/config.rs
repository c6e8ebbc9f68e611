//! Catalog store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREKEEP_MEDIA_BASE_URL` - Public base URL for stored media (default: `http://localhost:3000/`)
//! - `STOREKEEP_UPLOAD_PREFIX` - Path prefix of canonical media references (default: `uploads`)
//! - `STOREKEEP_PLACEHOLDER_IMAGE` - Media reference used when a product has no images
//!   (default: `uploads/placeholder.png`)
//! - `STOREKEEP_PAGE_SIZE` - Default page size for paginated listings (default: 10)
//! - `STOREKEEP_AVG_PURCHASE_RATE` - Average purchase cost per item sold, used by the
//!   dashboard (default: 12.50)
//! - `STOREKEEP_STORE_NAME` - Initial store name in the settings singleton (default: Storekeep)

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;
use url::Url;

const DEFAULT_MEDIA_BASE_URL: &str = "http://localhost:3000/";
const DEFAULT_UPLOAD_PREFIX: &str = "uploads";
const DEFAULT_PLACEHOLDER_IMAGE: &str = "uploads/placeholder.png";
const DEFAULT_PAGE_SIZE: u32 = 10;
const DEFAULT_STORE_NAME: &str = "Storekeep";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Catalog store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Base URL that relative media references are resolved against
    pub media_base_url: Url,
    /// First path segment of canonical (store-relative) media references
    pub upload_prefix: String,
    /// Media reference substituted when a product has no images
    pub placeholder_image: String,
    /// Page size used when a caller passes `page_size = 0`
    pub page_size: u32,
    /// Average purchase cost per item, for the dashboard's purchase-cost proxy
    pub average_purchase_rate: Decimal,
    /// Store name the settings singleton starts with
    pub store_name: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            media_base_url: Url::parse(DEFAULT_MEDIA_BASE_URL)
                .expect("default media base URL is valid"),
            upload_prefix: DEFAULT_UPLOAD_PREFIX.to_string(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            average_purchase_rate: Decimal::new(1250, 2),
            store_name: DEFAULT_STORE_NAME.to_string(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed or
    /// fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Missing keys fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a present value is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let media_base_url = match get("STOREKEEP_MEDIA_BASE_URL") {
            Some(raw) => parse_media_base_url(&raw)?,
            None => defaults.media_base_url,
        };

        let upload_prefix = get("STOREKEEP_UPLOAD_PREFIX")
            .map(|raw| raw.trim().trim_matches('/').to_string())
            .unwrap_or(defaults.upload_prefix);
        if upload_prefix.is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "STOREKEEP_UPLOAD_PREFIX".to_string(),
                "must contain at least one path segment".to_string(),
            ));
        }

        let placeholder_image = get("STOREKEEP_PLACEHOLDER_IMAGE")
            .map(|raw| raw.trim().to_string())
            .unwrap_or_else(|| format!("{upload_prefix}/placeholder.png"));

        let page_size = match get("STOREKEEP_PAGE_SIZE") {
            Some(raw) => parse_value::<u32>("STOREKEEP_PAGE_SIZE", &raw)?,
            None => defaults.page_size,
        };
        if page_size == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "STOREKEEP_PAGE_SIZE".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let average_purchase_rate = match get("STOREKEEP_AVG_PURCHASE_RATE") {
            Some(raw) => parse_value::<Decimal>("STOREKEEP_AVG_PURCHASE_RATE", &raw)?,
            None => defaults.average_purchase_rate,
        };
        if average_purchase_rate.is_sign_negative() && !average_purchase_rate.is_zero() {
            return Err(ConfigError::InvalidEnvVar(
                "STOREKEEP_AVG_PURCHASE_RATE".to_string(),
                "cannot be negative".to_string(),
            ));
        }

        let store_name = get("STOREKEEP_STORE_NAME")
            .map(|raw| raw.trim().to_string())
            .unwrap_or(defaults.store_name);

        Ok(Self {
            media_base_url,
            upload_prefix,
            placeholder_image,
            page_size,
            average_purchase_rate,
            store_name,
        })
    }
}

/// Parse a value with `FromStr`, mapping failures to `ConfigError`.
fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Validate that the media base URL is an absolute http(s) URL.
fn parse_media_base_url(raw: &str) -> Result<Url, ConfigError> {
    const KEY: &str = "STOREKEEP_MEDIA_BASE_URL";

    let url = parse_value::<Url>(KEY, raw)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            KEY.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    if url.cannot_be_a_base() || url.host().is_none() {
        return Err(ConfigError::InvalidEnvVar(
            KEY.to_string(),
            "must be an absolute URL with a host".to_string(),
        ));
    }
    Ok(url)
}
