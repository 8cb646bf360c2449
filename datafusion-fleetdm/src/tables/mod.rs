//! The fixed catalog of Fleet tables.
//!
//! Each module declares one [`TableDef`]: its columns, the columns that can
//! be pushed down as request parameters, and how its rows are listed.

use fleetdm_client::{FleetClient, QueryParams};
use std::sync::Arc;

use crate::filter::{FilterDef, Quals};
use crate::listing::{app_store_by_team, hydrated, GetById, Listing, RowStream};
use crate::schema::{ColumnDef, ColumnKind};

mod activity;
mod app_store_app;
mod carve;
mod fleet_maintained_app;
mod host;
mod host_detail;
mod label;
mod os_version;
mod pack;
mod policy;
mod query;
mod software;
mod software_title;
mod software_version;
mod team;
mod user;

/// Static description of one table.
#[derive(Debug)]
pub struct TableDef {
    pub name: &'static str,
    pub description: &'static str,
    pub columns: &'static [ColumnDef],
    /// Equality predicates sent to the list endpoint.
    pub filters: &'static [FilterDef],
    /// Predicate that replaces the listing with a single lookup.
    pub get_by_id: Option<GetById>,
    pub listing: Listing,
}

/// Inputs of one scan.
#[derive(Debug, Clone)]
pub struct ScanArgs {
    pub client: Arc<FleetClient>,
    pub quals: Quals,
    pub limit: Option<usize>,
    /// Whether detail-only columns were projected.
    pub hydrate: bool,
}

impl TableDef {
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Columns that accept pushed-down equality predicates, with their kinds.
    pub fn predicate_columns(&self) -> Vec<(&'static str, ColumnKind)> {
        let filters = self.filters.iter().map(|f| f.column);
        let lookup = self.get_by_id.iter().map(|g| g.column);
        lookup
            .chain(filters)
            .filter_map(|name| self.column(name).map(|c| (c.name, c.kind)))
            .collect()
    }

    /// Stream the table's rows for one scan.
    pub fn rows(&self, args: ScanArgs) -> RowStream {
        if let Some(lookup) = &self.get_by_id {
            if let Some(id) = args.quals.get(lookup.column).and_then(|q| q.as_int()) {
                return lookup.rows(args.client, id);
            }
        }

        match &self.listing {
            Listing::Paged(list) => list.rows(args.client, self.filters, &args.quals, args.limit),
            Listing::Hydrated { list, detail } => {
                let rows = list.rows(args.client.clone(), self.filters, &args.quals, args.limit);
                hydrated(args.client, rows, *detail, args.hydrate)
            }
            Listing::AppStoreByTeam => app_store_by_team(args.client, &args.quals, args.limit),
        }
    }
}

/// The Fleet API rejects CVSS and exploit filters unless `vulnerable=true`
/// is also sent.
pub(crate) fn require_vulnerable(quals: &Quals, params: &mut QueryParams) {
    let scored = ["min_cvss_score", "max_cvss_score", "exploit"]
        .iter()
        .any(|column| quals.contains(column));
    if scored && !quals.contains("vulnerable_only") {
        params.push("vulnerable", true);
    }
}

static TABLES: [&TableDef; 16] = [
    &activity::TABLE,
    &app_store_app::TABLE,
    &carve::TABLE,
    &fleet_maintained_app::TABLE,
    &host::TABLE,
    &host_detail::TABLE,
    &label::TABLE,
    &os_version::TABLE,
    &pack::TABLE,
    &policy::TABLE,
    &query::TABLE,
    &software::TABLE,
    &software_title::TABLE,
    &software_version::TABLE,
    &team::TABLE,
    &user::TABLE,
];

/// Every table, in name order.
pub fn all_tables() -> &'static [&'static TableDef] {
    &TABLES
}

pub fn find_table(name: &str) -> Option<&'static TableDef> {
    TABLES.iter().copied().find(|t| t.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::QualValue;
    use crate::schema::ColumnSource;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_names() {
        let names: Vec<_> = all_tables().iter().map(|t| t.name).collect();
        assert_eq!(names.len(), 16);
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert!(names.iter().all(|n| n.starts_with("fleetdm_")));
        assert!(find_table("fleetdm_host").is_some());
        assert!(find_table("fleetdm_nope").is_none());
    }

    #[test]
    fn test_columns_are_unique_and_filters_declared() {
        for table in all_tables() {
            let mut seen = HashSet::new();
            for column in table.columns {
                assert!(seen.insert(column.name), "{}: duplicate column {}", table.name, column.name);
                assert!(!column.description.is_empty(), "{}.{} has no description", table.name, column.name);
            }
            for filter in table.filters {
                assert!(table.column(filter.column).is_some(), "{}: undeclared filter {}", table.name, filter.column);
            }
            assert_eq!(
                table.predicate_columns().len(),
                table.filters.len() + usize::from(table.get_by_id.is_some())
            );
        }
    }

    #[test]
    fn test_qual_columns_are_filters() {
        for table in all_tables() {
            for column in table.columns.iter().filter(|c| c.source == ColumnSource::Qual) {
                assert!(
                    table.filters.iter().any(|f| f.column == column.name),
                    "{}.{} echoes a predicate that is never pushed down",
                    table.name,
                    column.name
                );
            }
        }
    }

    #[test]
    fn test_require_vulnerable() {
        let mut quals = Quals::new();
        quals.insert("min_cvss_score", QualValue::Int(7));
        let mut params = QueryParams::new();
        require_vulnerable(&quals, &mut params);
        assert_eq!(params.get("vulnerable"), Some("true"));

        quals.insert("vulnerable_only", QualValue::Bool(false));
        let mut params = QueryParams::new();
        require_vulnerable(&quals, &mut params);
        assert!(params.is_empty());
    }
}
