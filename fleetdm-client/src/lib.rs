// Read-only client for the FleetDM REST API

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod pagination;
pub mod time;

pub use client::{FleetClient, QueryParams};
pub use config::{FleetConfig, FleetConfigBuilder, ResolvedConfig};
pub use error::{Error, Result};
pub use pagination::{Envelope, ListRequest, OrderDirection, PageMeta, Paginator};

pub use reqwest::StatusCode;
