use datafusion::catalog::{CatalogProvider, SchemaProvider};
use datafusion::datasource::TableProvider;
use datafusion::error::Result as DataFusionResult;
use fleetdm_client::FleetConfig;
use std::any::Any;
use std::sync::Arc;

use crate::table::FleetTable;
use crate::tables::{all_tables, find_table};

/// Name of the single schema exposed by [`FleetCatalog`].
pub const DEFAULT_SCHEMA: &str = "default";

/// Catalog provider exposing every Fleet table
#[derive(Debug)]
pub struct FleetCatalog {
    schema_provider: Arc<FleetSchemaProvider>,
}

impl FleetCatalog {
    /// The configuration is resolved when a table is scanned, so a missing
    /// URL or token surfaces as a query error.
    pub fn new(config: FleetConfig) -> Self {
        let schema_provider = Arc::new(FleetSchemaProvider::new(Arc::new(config)));
        Self { schema_provider }
    }
}

impl CatalogProvider for FleetCatalog {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn schema_names(&self) -> Vec<String> {
        vec![DEFAULT_SCHEMA.to_string()]
    }

    fn schema(&self, name: &str) -> Option<Arc<dyn SchemaProvider>> {
        if name == DEFAULT_SCHEMA {
            Some(self.schema_provider.clone())
        } else {
            None
        }
    }
}

/// Schema provider for the fixed table catalog
#[derive(Debug)]
pub struct FleetSchemaProvider {
    config: Arc<FleetConfig>,
}

impl FleetSchemaProvider {
    pub fn new(config: Arc<FleetConfig>) -> Self {
        Self { config }
    }
}

#[async_trait::async_trait]
impl SchemaProvider for FleetSchemaProvider {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn table_names(&self) -> Vec<String> {
        all_tables().iter().map(|t| t.name.to_string()).collect()
    }

    async fn table(&self, name: &str) -> DataFusionResult<Option<Arc<dyn TableProvider>>> {
        Ok(find_table(name).map(|def| {
            Arc::new(FleetTable::new(def, self.config.clone())) as Arc<dyn TableProvider>
        }))
    }

    fn table_exist(&self, name: &str) -> bool {
        find_table(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_creation() {
        let catalog = FleetCatalog::new(FleetConfig::default());

        let schema_names = catalog.schema_names();
        assert_eq!(schema_names, vec!["default".to_string()]);
        assert!(catalog.schema("public").is_none());
    }

    #[tokio::test]
    async fn test_get_table() {
        let catalog = FleetCatalog::new(FleetConfig::default());
        let schema = catalog.schema("default").expect("Should have default schema");

        assert_eq!(schema.table_names().len(), 16);
        assert!(schema.table_exist("fleetdm_software_title"));
        assert!(!schema.table_exist("fleetdm_hosts"));

        let table = schema
            .table("fleetdm_policy")
            .await
            .expect("Failed to get table")
            .expect("Should find fleetdm_policy");
        assert!(table.schema().field_with_name("query_text").is_ok());

        assert!(schema.table("fleetdm_nope").await.unwrap().is_none());
    }
}
