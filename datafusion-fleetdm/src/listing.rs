//! How a table turns a scan into a stream of record pages.

use fleetdm_client::models::{
    AppStoreAppWithTeam, ListAppStoreAppsResponse, ListTeamsResponse,
};
use fleetdm_client::{Envelope, FleetClient, ListRequest, OrderDirection, Paginator, QueryParams, StatusCode};
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use serde::Serialize;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::Result;
use crate::filter::{quals_to_params, FilterDef, QualValue, Quals};

/// Pages of records, each serialized to a JSON object.
pub type RowStream = BoxStream<'static, Result<Vec<Value>>>;

/// Issues the requests of one listing and decodes them with a fixed envelope.
pub type FetchFn = fn(Arc<FleetClient>, ListRequest) -> RowStream;

/// Adds parameters derived from several predicates at once.
pub type ParamsHook = fn(&Quals, &mut QueryParams);

const TEAMS_PAGE_SIZE: usize = 10000;

fn to_rows<T: Serialize>(records: Vec<T>) -> Result<Vec<Value>> {
    Ok(records
        .iter()
        .map(serde_json::to_value)
        .collect::<serde_json::Result<Vec<_>>>()?)
}

/// Walk a list endpoint page by page.
pub fn paged<E: Envelope>(client: Arc<FleetClient>, request: ListRequest) -> RowStream {
    Paginator::<E>::new(client, request)
        .into_stream()
        .map(|page| to_rows(page?))
        .boxed()
}

/// Fetch a single resource. A 404 yields no rows.
pub fn get_one<E: Envelope>(client: Arc<FleetClient>, request: ListRequest) -> RowStream {
    stream::once(async move {
        let endpoint = request.endpoint.clone();
        match Paginator::<E>::new(client, request).collect_all().await {
            Ok(records) => to_rows(records),
            Err(e) if e.status() == Some(StatusCode::NOT_FOUND) => {
                debug!(endpoint = %endpoint, "resource not found");
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    })
    .boxed()
}

/// A paged list endpoint and the parameters every request carries.
#[derive(Debug, Clone, Copy)]
pub struct PagedListing {
    pub endpoint: &'static str,
    pub page_size: Option<usize>,
    pub order: Option<(&'static str, OrderDirection)>,
    pub fixed_params: &'static [(&'static str, &'static str)],
    pub params_hook: Option<ParamsHook>,
    pub fetch: FetchFn,
}

impl PagedListing {
    pub const fn new(endpoint: &'static str, page_size: usize, fetch: FetchFn) -> Self {
        Self {
            endpoint,
            page_size: Some(page_size),
            order: None,
            fixed_params: &[],
            params_hook: None,
            fetch,
        }
    }

    pub const fn order_by(self, key: &'static str, direction: OrderDirection) -> Self {
        Self {
            order: Some((key, direction)),
            ..self
        }
    }

    pub const fn fixed_params(self, params: &'static [(&'static str, &'static str)]) -> Self {
        Self {
            fixed_params: params,
            ..self
        }
    }

    pub const fn params_hook(self, hook: ParamsHook) -> Self {
        Self {
            params_hook: Some(hook),
            ..self
        }
    }

    /// Build the request for one scan.
    pub fn request(&self, filters: &[FilterDef], quals: &Quals, limit: Option<usize>) -> ListRequest {
        let mut request = match self.page_size {
            Some(page_size) => ListRequest::paged(self.endpoint, page_size),
            None => ListRequest::unpaged(self.endpoint),
        };
        if let Some((key, direction)) = self.order {
            request = request.order_by(key, direction);
        }

        let mut params: QueryParams = self.fixed_params.iter().copied().collect();
        quals_to_params(filters, quals, &mut params);
        if let Some(hook) = self.params_hook {
            hook(quals, &mut params);
        }
        request.params(&params).limit(limit)
    }

    pub fn rows(
        &self,
        client: Arc<FleetClient>,
        filters: &[FilterDef],
        quals: &Quals,
        limit: Option<usize>,
    ) -> RowStream {
        (self.fetch)(client, self.request(filters, quals, limit))
    }
}

/// Direct lookup of one resource when its id is pinned by a predicate.
#[derive(Debug, Clone, Copy)]
pub struct GetById {
    pub column: &'static str,
    /// Collection path; the id is appended as the last segment.
    pub endpoint: &'static str,
    pub fetch: FetchFn,
}

impl GetById {
    pub const fn new(column: &'static str, endpoint: &'static str, fetch: FetchFn) -> Self {
        Self {
            column,
            endpoint,
            fetch,
        }
    }

    pub fn rows(&self, client: Arc<FleetClient>, id: i64) -> RowStream {
        if id < 0 {
            return stream::empty().boxed();
        }
        let request = ListRequest::unpaged(format!("{}/{}", self.endpoint, id));
        (self.fetch)(client, request)
    }
}

/// Strategy a table uses to produce its rows.
#[derive(Debug, Clone, Copy)]
pub enum Listing {
    /// One paged endpoint.
    Paged(PagedListing),
    /// A paged listing whose rows are completed one by one from a detail
    /// endpoint when detail columns are projected.
    Hydrated { list: PagedListing, detail: GetById },
    /// App store apps, listed per team.
    AppStoreByTeam,
}

/// Overlay the non-null fields of `detail` onto `row`.
fn merge_detail(row: &mut Value, detail: Value) {
    if let (Value::Object(base), Value::Object(extra)) = (row, detail) {
        for (key, value) in extra {
            if !value.is_null() || !base.contains_key(&key) {
                base.insert(key, value);
            }
        }
    }
}

async fn hydrate_page(client: Arc<FleetClient>, detail: GetById, rows: Vec<Value>) -> Result<Vec<Value>> {
    let mut hydrated = Vec::with_capacity(rows.len());
    for mut row in rows {
        if let Some(id) = row.get("id").and_then(Value::as_i64) {
            let details: Vec<Value> = detail.rows(client.clone(), id).try_concat().await?;
            if let Some(extra) = details.into_iter().next() {
                merge_detail(&mut row, extra);
            }
        }
        hydrated.push(row);
    }
    Ok(hydrated)
}

/// List with `list`, fetching each row's detail record when `hydrate` is set.
pub fn hydrated(
    client: Arc<FleetClient>,
    list: RowStream,
    detail: GetById,
    hydrate: bool,
) -> RowStream {
    if !hydrate {
        return list;
    }
    list.and_then(move |rows| hydrate_page(client.clone(), detail, rows))
        .boxed()
}

struct FanOut {
    client: Arc<FleetClient>,
    team_filter: Option<QualValue>,
    teams: Option<VecDeque<(u64, Option<String>)>>,
    remaining: Option<usize>,
}

impl FanOut {
    async fn discover_teams(&self) -> Result<VecDeque<(u64, Option<String>)>> {
        if let Some(filter) = &self.team_filter {
            // Negative ids name no team.
            let team = filter.as_int().and_then(|id| u64::try_from(id).ok());
            return Ok(team.map(|id| (id, None)).into_iter().collect());
        }
        let request = ListRequest::paged("teams", TEAMS_PAGE_SIZE);
        let teams = Paginator::<ListTeamsResponse>::new(self.client.clone(), request)
            .collect_all()
            .await?;
        info!(teams = teams.len(), "listing app store apps per team");
        Ok(teams.into_iter().map(|team| (team.id, Some(team.name))).collect())
    }

    async fn next(mut self) -> Result<Option<(Vec<Value>, Self)>> {
        if self.teams.is_none() {
            self.teams = Some(self.discover_teams().await?);
        }
        if self.remaining == Some(0) {
            return Ok(None);
        }
        let Some((team_id, team_name)) = self.teams.as_mut().and_then(VecDeque::pop_front) else {
            return Ok(None);
        };

        let request = ListRequest::unpaged("software/app_store_apps").param("team_id", team_id);
        let apps = Paginator::<ListAppStoreAppsResponse>::new(self.client.clone(), request)
            .collect_all()
            .await?;
        info!(team_id, apps = apps.len(), "processed team");

        let tagged: Vec<AppStoreAppWithTeam> = apps
            .into_iter()
            .map(|app| AppStoreAppWithTeam::new(app, team_id, team_name.clone()))
            .collect();
        let mut rows = to_rows(tagged)?;
        if let Some(remaining) = self.remaining.as_mut() {
            rows.truncate(*remaining);
            *remaining -= rows.len();
        }
        Ok(Some((rows, self)))
    }
}

/// App store apps for the `team_id` predicate, or for every team in turn.
///
/// Each row carries `team_id` and `team_name`; the name is absent when the
/// team came from the predicate.
pub fn app_store_by_team(client: Arc<FleetClient>, quals: &Quals, limit: Option<usize>) -> RowStream {
    let state = FanOut {
        client,
        team_filter: quals.get("team_id").cloned(),
        teams: None,
        remaining: limit,
    };
    stream::try_unfold(state, FanOut::next).boxed()
}
