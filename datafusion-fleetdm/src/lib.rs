// DataFusion table providers over the FleetDM REST API

pub mod batch;
pub mod catalog;
pub mod error;
pub mod exec;
pub mod filter;
pub mod listing;
pub mod schema;
pub mod table;
pub mod tables;

pub use catalog::{FleetCatalog, FleetSchemaProvider, DEFAULT_SCHEMA};
pub use error::{Error, Result};
pub use exec::FleetExec;
pub use table::FleetTable;
pub use tables::{all_tables, find_table, TableDef};

pub use fleetdm_client::{FleetConfig, FleetConfigBuilder};
