//! Connection configuration for the Fleet API.
//!
//! Explicit values win; missing ones fall back to the `FLEETDM_URL` and
//! `FLEETDM_API_TOKEN` environment variables. Nothing is validated until
//! [`FleetConfig::resolve`] is called, so a table can be registered before
//! its credentials exist.

use crate::error::{Error, Result};
use std::fmt;
use std::time::Duration;
use url::Url;

pub const SERVER_URL_ENV: &str = "FLEETDM_URL";
pub const API_TOKEN_ENV: &str = "FLEETDM_API_TOKEN";

/// Path segments every request is rooted under.
const API_SEGMENTS: [&str; 3] = ["api", "v1", "fleet"];

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    Config,
    Env,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSource::Config => write!(f, "config"),
            ValueSource::Env => write!(f, "env"),
        }
    }
}

/// Connection settings as supplied by the user.
///
/// The `Debug` implementation masks the API token.
#[derive(Clone)]
pub struct FleetConfig {
    pub server_url: Option<String>,
    pub api_token: Option<String>,
    pub timeout: Duration,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            server_url: None,
            api_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl fmt::Debug for FleetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FleetConfig")
            .field("server_url", &self.server_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "***REDACTED***"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Fully resolved settings, ready for a client.
#[derive(Clone)]
pub struct ResolvedConfig {
    /// Server URL as configured (used for the `server_url` column).
    pub server_url: String,
    /// Normalized base, always ending in `/api/v1/fleet/`.
    pub base_url: String,
    pub api_token: String,
    pub timeout: Duration,
}

impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("server_url", &self.server_url)
            .field("base_url", &self.base_url)
            .field("api_token", &"***REDACTED***")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl FleetConfig {
    pub fn builder() -> FleetConfigBuilder {
        FleetConfigBuilder::default()
    }

    /// Config with no explicit values; everything comes from the environment.
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Resolve against the process environment.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.resolve_with(|key| std::env::var(key).ok())
    }

    /// Resolve using `lookup` for the environment fallbacks.
    pub fn resolve_with<F>(&self, lookup: F) -> Result<ResolvedConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (server_url, url_source) = pick(self.server_url.as_deref(), SERVER_URL_ENV, &lookup)
            .ok_or_else(|| {
                Error::config(format!(
                    "server_url must be configured or set via the {} environment variable",
                    SERVER_URL_ENV
                ))
            })?;
        let (api_token, token_source) = pick(self.api_token.as_deref(), API_TOKEN_ENV, &lookup)
            .ok_or_else(|| {
                Error::config(format!(
                    "api_token must be configured or set via the {} environment variable",
                    API_TOKEN_ENV
                ))
            })?;

        tracing::info!(server_url_source = %url_source, api_token_source = %token_source, "resolved FleetDM connection");

        let base_url = normalize_base_url(&server_url)?;
        tracing::debug!(base_url = %base_url, "derived FleetDM base URL");

        Ok(ResolvedConfig {
            server_url,
            base_url,
            api_token,
            timeout: self.timeout,
        })
    }
}

fn pick<F>(explicit: Option<&str>, env_key: &str, lookup: &F) -> Option<(String, ValueSource)>
where
    F: Fn(&str) -> Option<String>,
{
    match explicit.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => Some((value.to_string(), ValueSource::Config)),
        None => lookup(env_key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(|v| (v, ValueSource::Env)),
    }
}

/// Normalize a server URL so its path ends in exactly one `/api/v1/fleet/`.
///
/// Accepts the bare host, the host plus `/api` or `/api/v1`, or the full API
/// path (anything after `/api/v1/fleet` is dropped). A missing scheme
/// defaults to `https`.
pub fn normalize_base_url(server_url: &str) -> Result<String> {
    let raw = server_url.trim();
    let with_scheme = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    };

    let mut url = Url::parse(&with_scheme).map_err(|source| Error::InvalidUrl {
        url: server_url.to_string(),
        source,
    })?;
    if url.cannot_be_a_base() {
        return Err(Error::config(format!(
            "server_url '{}' cannot be used as a base URL",
            server_url
        )));
    }

    let mut segments: Vec<String> = url
        .path_segments()
        .map(|parts| {
            parts
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if let Some(pos) = segments
        .windows(API_SEGMENTS.len())
        .position(|w| w.iter().zip(API_SEGMENTS.iter()).all(|(a, b)| a == b))
    {
        segments.truncate(pos);
    } else if segments.ends_with(&["api".to_string(), "v1".to_string()]) {
        segments.truncate(segments.len() - 2);
    } else if segments.last().map(String::as_str) == Some("api") {
        segments.pop();
    }

    segments.extend(API_SEGMENTS.iter().map(|s| s.to_string()));
    url.set_path(&format!("/{}/", segments.join("/")));
    url.set_query(None);
    url.set_fragment(None);

    Ok(url.to_string())
}

/// Builder for [`FleetConfig`].
#[derive(Debug, Default)]
pub struct FleetConfigBuilder {
    config: FleetConfig,
}

impl FleetConfigBuilder {
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.config.server_url = Some(url.into());
        self
    }

    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.config.api_token = Some(token.into());
        self
    }

    /// Per-request timeout. There is no overall scan deadline.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn build(self) -> FleetConfig {
        self.config
    }
}
