use reqwest::StatusCode;
use thiserror::Error;

/// Maximum number of body characters kept on a decode error.
pub const BODY_SNIPPET_LEN: usize = 500;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("error performing HTTP request to {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API request to {url} failed with status {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("error decoding JSON response from {url}: {source}. Response body: {snippet}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
        snippet: String,
    },
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    /// HTTP status of a `Status` error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// First `BODY_SNIPPET_LEN` characters of a response body.
pub(crate) fn body_snippet(body: &str) -> String {
    match body.char_indices().nth(BODY_SNIPPET_LEN) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
