use async_trait::async_trait;
use datafusion::arrow::datatypes::SchemaRef;
use datafusion::catalog::Session;
use datafusion::datasource::TableProvider;
use datafusion::error::Result as DataFusionResult;
use datafusion::logical_expr::{Expr, TableProviderFilterPushDown, TableType};
use datafusion::physical_plan::ExecutionPlan;
use fleetdm_client::{FleetClient, FleetConfig};
use std::any::Any;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::exec::FleetExec;
use crate::filter::{extract_qual, extract_quals};
use crate::schema::{create_arrow_schema, create_projected_schema, ColumnDef};
use crate::tables::{find_table, TableDef};

/// TableProvider for one Fleet resource
#[derive(Debug)]
pub struct FleetTable {
    def: &'static TableDef,
    config: Arc<FleetConfig>,
    schema: SchemaRef,
}

impl FleetTable {
    pub fn new(def: &'static TableDef, config: Arc<FleetConfig>) -> Self {
        Self {
            def,
            config,
            schema: create_arrow_schema(def.columns),
        }
    }

    /// Look a table up in the fixed catalog, e.g. `fleetdm_host`.
    pub fn by_name(name: &str, config: Arc<FleetConfig>) -> Result<Self> {
        let def = find_table(name).ok_or_else(|| Error::UnknownTable(name.to_string()))?;
        Ok(Self::new(def, config))
    }

    pub fn definition(&self) -> &'static TableDef {
        self.def
    }

    fn projected_columns(&self, projection: Option<&Vec<usize>>) -> Result<Vec<ColumnDef>> {
        match projection {
            None => Ok(self.def.columns.to_vec()),
            Some(indices) => indices
                .iter()
                .map(|&i| {
                    self.def.columns.get(i).copied().ok_or_else(|| {
                        Error::Internal(format!(
                            "projection index {} out of range for {}",
                            i, self.def.name
                        ))
                    })
                })
                .collect(),
        }
    }
}

#[async_trait]
impl TableProvider for FleetTable {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    fn table_type(&self) -> TableType {
        TableType::Base
    }

    /// Declared predicate columns are `Inexact`: they narrow the request but
    /// DataFusion still applies the filter to the returned rows.
    fn supports_filters_pushdown(
        &self,
        filters: &[&Expr],
    ) -> DataFusionResult<Vec<TableProviderFilterPushDown>> {
        let columns = self.def.predicate_columns();
        Ok(filters
            .iter()
            .map(|expr| {
                let pushable = extract_qual(expr).is_some_and(|(name, value)| {
                    columns
                        .iter()
                        .any(|(column, kind)| *column == name && value.fits(*kind))
                });
                if pushable {
                    TableProviderFilterPushDown::Inexact
                } else {
                    TableProviderFilterPushDown::Unsupported
                }
            })
            .collect())
    }

    async fn scan(
        &self,
        _state: &dyn Session,
        projection: Option<&Vec<usize>>,
        filters: &[Expr],
        limit: Option<usize>,
    ) -> DataFusionResult<Arc<dyn ExecutionPlan>> {
        let client = Arc::new(FleetClient::new(&self.config).map_err(Error::from)?);

        let columns = self.projected_columns(projection)?;
        let schema = match projection {
            Some(indices) => create_projected_schema(&self.schema, indices)?,
            None => self.schema.clone(),
        };
        let quals = extract_quals(filters, &self.def.predicate_columns());

        Ok(Arc::new(FleetExec::new(
            self.def, client, schema, columns, quals, limit,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datafusion::logical_expr::{col, lit};

    fn config() -> Arc<FleetConfig> {
        Arc::new(
            FleetConfig::builder()
                .server_url("https://fleet.example.com")
                .api_token("t")
                .build(),
        )
    }

    #[test]
    fn test_by_name() {
        let table = FleetTable::by_name("fleetdm_user", config()).unwrap();
        assert_eq!(table.definition().name, "fleetdm_user");
        assert!(table.schema().field_with_name("server_url").is_ok());

        let err = FleetTable::by_name("fleetdm_widgets", config()).unwrap_err();
        assert!(matches!(err, Error::UnknownTable(_)));
    }

    #[test]
    fn test_filter_pushdown_classification() {
        let table = FleetTable::by_name("fleetdm_host", config()).unwrap();
        let team = col("team_id").eq(lit(4i64));
        let by_id = col("id").eq(lit(9i64));
        let wrong_type = col("status").eq(lit(1i64));
        let range = col("team_id").gt(lit(4i64));
        let other = col("hostname").eq(lit("mbp"));

        let support = table
            .supports_filters_pushdown(&[&team, &by_id, &wrong_type, &range, &other])
            .unwrap();
        assert_eq!(
            support,
            vec![
                TableProviderFilterPushDown::Inexact,
                TableProviderFilterPushDown::Inexact,
                TableProviderFilterPushDown::Unsupported,
                TableProviderFilterPushDown::Unsupported,
                TableProviderFilterPushDown::Unsupported,
            ]
        );
    }

    #[test]
    fn test_projection_out_of_range() {
        let table = FleetTable::by_name("fleetdm_team", config()).unwrap();
        assert!(table.projected_columns(Some(&vec![0, 99])).is_err());
        assert_eq!(table.projected_columns(Some(&vec![1])).unwrap()[0].name, "name");
    }
}
