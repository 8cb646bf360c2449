//! FleetDM REST API client
//!
//! Thin wrapper around `reqwest` that knows the Fleet base path, the bearer
//! token and how Fleet reports failures. Every call is a single GET; there
//! are no retries.

use crate::config::{FleetConfig, ResolvedConfig};
use crate::error::{body_snippet, Error, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use std::fmt;
use url::Url;

/// Ordered query parameters for one request.
///
/// Keys may repeat; order is preserved on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) {
        self.0.push((key.into(), value.to_string()));
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.push(key, value);
        self
    }

    pub fn extend(&mut self, other: &QueryParams) {
        self.0.extend(other.0.iter().cloned());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (k, v) in iter {
            params.push(k, v);
        }
        params
    }
}

/// HTTP client for the Fleet API
///
/// # Example
/// ```no_run
/// use fleetdm_client::{FleetClient, FleetConfig, QueryParams};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = FleetConfig::builder()
///     .server_url("https://fleet.example.com")
///     .api_token("token")
///     .build();
/// let client = FleetClient::new(&config)?;
/// let body: serde_json::Value = client.get("version", &QueryParams::new()).await?;
/// println!("{}", body);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FleetClient {
    config: ResolvedConfig,
    base: Url,
    http: reqwest::Client,
}

impl fmt::Debug for FleetClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FleetClient")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .finish()
    }
}

impl FleetClient {
    /// Resolve `config` and build a client.
    ///
    /// # Errors
    /// Returns a configuration error when the server URL or token is missing,
    /// or when the URL cannot be parsed. No request is made.
    pub fn new(config: &FleetConfig) -> Result<Self> {
        Self::from_resolved(config.resolve()?)
    }

    pub fn from_resolved(config: ResolvedConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url).map_err(|source| Error::InvalidUrl {
            url: config.base_url.clone(),
            source,
        })?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|source| Error::Transport {
                url: config.base_url.clone(),
                source,
            })?;

        Ok(Self { config, base, http })
    }

    /// Server URL as configured by the user.
    pub fn server_url(&self) -> &str {
        &self.config.server_url
    }

    /// Normalized base URL ending in `/api/v1/fleet/`.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Full request URL for `endpoint` with `params` attached.
    pub fn endpoint_url(&self, endpoint: &str, params: &QueryParams) -> Result<Url> {
        let mut url = self
            .base
            .join(endpoint.trim_start_matches('/'))
            .map_err(|source| Error::InvalidUrl {
                url: format!("{}{}", self.config.base_url, endpoint),
                source,
            })?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter());
        }
        Ok(url)
    }

    /// GET `endpoint` and decode the JSON body into `T`.
    ///
    /// # Errors
    /// - `Transport` if the request could not be performed
    /// - `Status` for any non-2xx response (body included)
    /// - `Decode` if a 2xx body does not match `T`
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str, params: &QueryParams) -> Result<T> {
        let url = self.endpoint_url(endpoint, params)?;
        let url_str = url.to_string();
        tracing::debug!(url = %url_str, "requesting FleetDM API");

        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_token))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| {
                tracing::error!(url = %url_str, error = %source, "FleetDM request failed");
                Error::Transport {
                    url: url_str.clone(),
                    source,
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| Error::Transport {
            url: url_str.clone(),
            source,
        })?;

        if !status.is_success() {
            tracing::error!(url = %url_str, status = %status, "FleetDM API returned an error status");
            return Err(Error::Status {
                url: url_str,
                status,
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| {
            let snippet = body_snippet(&body);
            tracing::error!(url = %url_str, error = %source, body = %snippet, "failed to decode FleetDM response");
            Error::Decode {
                url: url_str,
                source,
                snippet,
            }
        })
    }
}
