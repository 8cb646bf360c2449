//! Generic page-by-page listing of Fleet collections.
//!
//! Fleet list endpoints take `page` (0-based) and `per_page` and wrap the
//! records in a JSON object keyed by resource name, sometimes with a
//! `meta.has_next_results` hint. [`Paginator`] walks such an endpoint lazily:
//! one request per [`Paginator::next_page`] call, stopping after a short page
//! or once the row quota is satisfied.

use crate::client::{FleetClient, QueryParams};
use crate::error::Result;
use futures::stream::{self, Stream};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// A decoded list response.
pub trait Envelope: DeserializeOwned + Send + 'static {
    type Record: Serialize + DeserializeOwned + Send + 'static;

    fn into_records(self) -> Vec<Self::Record>;

    /// The server's `meta.has_next_results`, when it sends one.
    fn has_next_results(&self) -> Option<bool> {
        None
    }
}

/// `meta` object attached to some list responses.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PageMeta {
    #[serde(default)]
    pub has_next_results: Option<bool>,
    #[serde(default)]
    pub has_previous_results: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderDirection::Asc => "asc",
            OrderDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Description of one listing: where, how big the pages are, extra params.
#[derive(Debug, Clone)]
pub struct ListRequest {
    pub endpoint: String,
    /// `None` means the endpoint is not paged: exactly one request is made.
    pub page_size: Option<usize>,
    pub order: Option<(String, OrderDirection)>,
    pub params: QueryParams,
    /// Stop once this many records have been produced.
    pub limit: Option<usize>,
}

impl ListRequest {
    pub fn paged(endpoint: impl Into<String>, page_size: usize) -> Self {
        Self {
            endpoint: endpoint.into(),
            page_size: Some(page_size),
            order: None,
            params: QueryParams::new(),
            limit: None,
        }
    }

    pub fn unpaged(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            page_size: None,
            order: None,
            params: QueryParams::new(),
            limit: None,
        }
    }

    pub fn order_by(mut self, key: impl Into<String>, direction: OrderDirection) -> Self {
        self.order = Some((key.into(), direction));
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push(key, value);
        self
    }

    pub fn params(mut self, params: &QueryParams) -> Self {
        self.params.extend(params);
        self
    }

    pub fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Parameters for the request of page `page`.
    pub fn page_params(&self, page: usize) -> QueryParams {
        let mut params = QueryParams::new();
        if let Some(per_page) = self.page_size {
            params.push("page", page);
            params.push("per_page", per_page);
        }
        if let Some((key, direction)) = &self.order {
            params.push("order_key", key);
            params.push("order_direction", direction);
        }
        params.extend(&self.params);
        params
    }
}

/// Lazy page walker over one list endpoint.
pub struct Paginator<E: Envelope> {
    client: Arc<FleetClient>,
    request: ListRequest,
    page: usize,
    emitted: usize,
    done: bool,
    _envelope: PhantomData<fn() -> E>,
}

impl<E: Envelope> fmt::Debug for Paginator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginator")
            .field("request", &self.request)
            .field("page", &self.page)
            .field("emitted", &self.emitted)
            .field("done", &self.done)
            .finish()
    }
}

impl<E: Envelope> Paginator<E> {
    pub fn new(client: Arc<FleetClient>, request: ListRequest) -> Self {
        Self {
            client,
            request,
            page: 0,
            emitted: 0,
            done: false,
            _envelope: PhantomData,
        }
    }

    /// Number of requests issued so far.
    pub fn pages_fetched(&self) -> usize {
        self.page
    }

    /// Fetch the next page, or `Ok(None)` once the listing is exhausted.
    ///
    /// A failed request ends the listing; records already returned stay
    /// returned.
    pub async fn next_page(&mut self) -> Result<Option<Vec<E::Record>>> {
        if self.done {
            return Ok(None);
        }
        let remaining = self.request.limit.map(|limit| limit.saturating_sub(self.emitted));
        if remaining == Some(0) {
            self.done = true;
            return Ok(None);
        }

        let params = self.request.page_params(self.page);
        tracing::debug!(endpoint = %self.request.endpoint, page = self.page, "fetching page");

        let envelope: E = match self.client.get(&self.request.endpoint, &params).await {
            Ok(envelope) => envelope,
            Err(e) => {
                self.done = true;
                return Err(e);
            }
        };
        let has_next = envelope.has_next_results();
        let mut records = envelope.into_records();
        let received = records.len();

        tracing::info!(
            endpoint = %self.request.endpoint,
            page = self.page,
            items = received,
            has_next = ?has_next,
            "processed page"
        );

        match self.request.page_size {
            None => self.done = true,
            Some(per_page) if received < per_page => self.done = true,
            Some(_) if has_next == Some(false) => {
                tracing::warn!(
                    endpoint = %self.request.endpoint,
                    page = self.page,
                    "server reported no further results on a full page, fetching next page anyway"
                );
            }
            Some(_) => {}
        }
        self.page += 1;

        if let Some(remaining) = remaining {
            if received >= remaining {
                records.truncate(remaining);
                self.done = true;
            }
        }
        self.emitted += records.len();

        Ok(Some(records))
    }

    /// Turn the paginator into a stream of pages.
    pub fn into_stream(self) -> impl Stream<Item = Result<Vec<E::Record>>> + Send {
        stream::try_unfold(self, |mut paginator| async move {
            let page = paginator.next_page().await?;
            Ok(page.map(|records| (records, paginator)))
        })
    }

    /// Drain every page into one vector.
    pub async fn collect_all(mut self) -> Result<Vec<E::Record>> {
        let mut all = Vec::new();
        while let Some(records) = self.next_page().await? {
            all.extend(records);
        }
        Ok(all)
    }
}
