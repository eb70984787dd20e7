//! Run configuration and credentials.
//!
//! Two sources:
//!
//! - **`config.toml`** (optional, checked in): where to write the document,
//!   page size, API endpoint, cover overrides.
//! - **Environment** (never checked in): the Cloudinary account name, API
//!   key and API secret.
//!
//! Only `main.rs` reads either source. Everything below it receives a
//! [`FetchConfig`] and [`Credentials`] by value or reference.
//!
//! ## Config File
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! output = "src/data/gallery.json"
//! page_size = 500
//!
//! [api]
//! base_url = "https://api.cloudinary.com/v1_1"
//! timeout_secs = 60
//!
//! [covers]
//! "2024-sol_april" = 2     # Use the third-newest item as this album's cover
//! ```
//!
//! Config files are sparse: stock defaults are serialized to a TOML table
//! and the user file is merged on top. Unknown keys are rejected to catch
//! typos early.
//!
//! ## Credentials
//!
//! ```text
//! CLOUDINARY_CLOUD_NAME=demo
//! CLOUDINARY_API_KEY=123456789012345
//! CLOUDINARY_API_SECRET=abcdefghijklmnopqrstuvwxyz0
//! ```
//!
//! `CLOUDINARY_URL=cloudinary://<key>:<secret>@<cloud>` works too. When both
//! are set, the individual variables win.

use crate::fetch::MAX_PAGE_SIZE;
use crate::types::CoverOverrides;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const ENV_CLOUD_NAME: &str = "CLOUDINARY_CLOUD_NAME";
pub const ENV_API_KEY: &str = "CLOUDINARY_API_KEY";
pub const ENV_API_SECRET: &str = "CLOUDINARY_API_SECRET";
pub const ENV_URL: &str = "CLOUDINARY_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("Missing credentials: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),
    #[error("Invalid CLOUDINARY_URL: {0}")]
    InvalidCloudinaryUrl(String),
}

impl ConfigError {
    pub fn is_credential_problem(&self) -> bool {
        matches!(
            self,
            ConfigError::MissingCredentials(_) | ConfigError::InvalidCloudinaryUrl(_)
        )
    }
}

/// Run configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    /// Where the JSON document is written.
    pub output: String,
    /// Results requested per search call.
    pub page_size: u32,
    /// Remote API settings.
    pub api: ApiConfig,
    /// Folder key → cover item index.
    pub covers: CoverOverrides,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            output: "src/data/gallery.json".to_string(),
            page_size: MAX_PAGE_SIZE,
            api: ApiConfig::default(),
            covers: CoverOverrides::new(),
        }
    }
}

impl FetchConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::Validation(format!(
                "page_size must be 1-{MAX_PAGE_SIZE}"
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_secs must be non-zero".into(),
            ));
        }
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "api.base_url must not be empty".into(),
            ));
        }
        if self.output.trim().is_empty() {
            return Err(ConfigError::Validation("output must not be empty".into()));
        }
        Ok(())
    }
}

/// Remote API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// API root, without the account segment.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.cloudinary.com/v1_1".to_string(),
            timeout_secs: 60,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(FetchConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the stock defaults, then deserialize and
/// validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<FetchConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: FetchConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from a file.
///
/// A missing file yields the stock defaults. A file that exists but does
/// not parse, carries unknown keys, or fails validation is an error.
pub fn load_config(path: &Path) -> Result<FetchConfig, ConfigError> {
    if !path.exists() {
        return resolve_config(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    resolve_config(Some(value))
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# cloud-gal Configuration
# =======================
# All options are optional. Remove or comment out any you don't need.
# Credentials are NOT configured here; set CLOUDINARY_CLOUD_NAME,
# CLOUDINARY_API_KEY and CLOUDINARY_API_SECRET (or CLOUDINARY_URL).

# Where the gallery document is written, relative to the working directory.
output = "src/data/gallery.json"

# Results per search call. The API caps this at 500.
page_size = 500

# ---------------------------------------------------------------------------
# API
# ---------------------------------------------------------------------------
[api]
base_url = "https://api.cloudinary.com/v1_1"
# Per-request timeout in seconds.
timeout_secs = 60

# ---------------------------------------------------------------------------
# Album covers
# ---------------------------------------------------------------------------
# Folder key = index into the album's items (newest first, 0-based).
# Missing or out-of-range entries use the newest item.
[covers]
# "2024-sol_april" = 2
"##
}

// =============================================================================
// Credentials
// =============================================================================

/// Cloudinary account credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Resolve credentials from environment-style variables.
    ///
    /// `lookup` returns a variable's value, or `None` if unset. Blank
    /// values count as unset. Every missing variable is reported at once.
    pub fn from_env_vars(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Credentials, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let from_url = match get(ENV_URL) {
            Some(url) => Some(parse_cloudinary_url(&url)?),
            None => None,
        };
        let pick = |name: &str, from_url: Option<&String>| get(name).or_else(|| from_url.cloned());

        let cloud_name = pick(ENV_CLOUD_NAME, from_url.as_ref().map(|c| &c.cloud_name));
        let api_key = pick(ENV_API_KEY, from_url.as_ref().map(|c| &c.api_key));
        let api_secret = pick(ENV_API_SECRET, from_url.as_ref().map(|c| &c.api_secret));

        match (cloud_name, api_key, api_secret) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Ok(Credentials {
                cloud_name,
                api_key,
                api_secret,
            }),
            (cloud_name, api_key, api_secret) => {
                let missing = [
                    (cloud_name.is_none(), ENV_CLOUD_NAME),
                    (api_key.is_none(), ENV_API_KEY),
                    (api_secret.is_none(), ENV_API_SECRET),
                ]
                .into_iter()
                .filter_map(|(absent, name)| absent.then_some(name))
                .collect();
                Err(ConfigError::MissingCredentials(missing))
            }
        }
    }
}

/// Parse `cloudinary://<key>:<secret>@<cloud>`.
///
/// Anything after the cloud name (`/path` or `?query`) is ignored.
pub fn parse_cloudinary_url(url: &str) -> Result<Credentials, ConfigError> {
    let invalid = |why: &str| ConfigError::InvalidCloudinaryUrl(why.to_string());

    let rest = url
        .trim()
        .strip_prefix("cloudinary://")
        .ok_or_else(|| invalid("expected cloudinary://<key>:<secret>@<cloud>"))?;
    let (userinfo, host) = rest
        .rsplit_once('@')
        .ok_or_else(|| invalid("missing '@<cloud>'"))?;
    let (api_key, api_secret) = userinfo
        .split_once(':')
        .ok_or_else(|| invalid("missing ':' between key and secret"))?;
    let cloud_name = host.split(['/', '?']).next().unwrap_or_default();

    if api_key.is_empty() || api_secret.is_empty() || cloud_name.is_empty() {
        return Err(invalid("key, secret and cloud name must all be non-empty"));
    }

    Ok(Credentials {
        cloud_name: cloud_name.to_string(),
        api_key: api_key.to_string(),
        api_secret: api_secret.to_string(),
    })
}
