use datafusion::arrow::array::RecordBatch;
use datafusion::arrow::datatypes::SchemaRef;
use datafusion::error::{DataFusionError, Result as DataFusionResult};
use datafusion::execution::{RecordBatchStream, SendableRecordBatchStream, TaskContext};
use datafusion::physical_expr::EquivalenceProperties;
use datafusion::physical_plan::execution_plan::{Boundedness, EmissionType};
use datafusion::physical_plan::{
    DisplayAs, DisplayFormatType, ExecutionPlan, Partitioning, PlanProperties,
};
use fleetdm_client::FleetClient;
use futures::stream::{Stream, StreamExt};
use std::any::Any;
use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tracing::info;

use crate::batch::{build_batch, RowContext};
use crate::filter::Quals;
use crate::listing::RowStream;
use crate::schema::ColumnDef;
use crate::tables::{ScanArgs, TableDef};

/// Execution plan for one scan of a Fleet table.
///
/// Always a single partition: pages are requested one after another, only
/// as the output stream is polled, and each page becomes one batch.
#[derive(Debug)]
pub struct FleetExec {
    table: &'static TableDef,
    client: Arc<FleetClient>,
    schema: SchemaRef,
    columns: Vec<ColumnDef>,
    quals: Quals,
    limit: Option<usize>,
    hydrate: bool,
    plan_properties: PlanProperties,
}

impl FleetExec {
    /// `schema` and `columns` describe the projected output.
    pub fn new(
        table: &'static TableDef,
        client: Arc<FleetClient>,
        schema: SchemaRef,
        columns: Vec<ColumnDef>,
        quals: Quals,
        limit: Option<usize>,
    ) -> Self {
        let hydrate = columns.iter().any(ColumnDef::is_detail);
        let plan_properties = PlanProperties::new(
            EquivalenceProperties::new(schema.clone()),
            Partitioning::UnknownPartitioning(1),
            EmissionType::Incremental,
            Boundedness::Bounded,
        );

        Self {
            table,
            client,
            schema,
            columns,
            quals,
            limit,
            hydrate,
            plan_properties,
        }
    }

    pub fn quals(&self) -> &Quals {
        &self.quals
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Whether each row is completed with a per-row detail request.
    pub fn hydrates(&self) -> bool {
        self.hydrate
    }
}

impl DisplayAs for FleetExec {
    fn fmt_as(&self, _t: DisplayFormatType, f: &mut fmt::Formatter) -> fmt::Result {
        let mut quals: Vec<String> = self
            .quals
            .iter()
            .map(|(column, value)| format!("{}={}", column, value))
            .collect();
        quals.sort();
        write!(f, "FleetExec: table={}, quals=[{}]", self.table.name, quals.join(", "))?;
        if let Some(limit) = self.limit {
            write!(f, ", limit={}", limit)?;
        }
        if self.hydrate {
            write!(f, ", hydrate=true")?;
        }
        Ok(())
    }
}

impl ExecutionPlan for FleetExec {
    fn name(&self) -> &str {
        "FleetExec"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    fn properties(&self) -> &PlanProperties {
        &self.plan_properties
    }

    fn children(&self) -> Vec<&Arc<dyn ExecutionPlan>> {
        vec![]
    }

    fn with_new_children(
        self: Arc<Self>,
        _children: Vec<Arc<dyn ExecutionPlan>>,
    ) -> DataFusionResult<Arc<dyn ExecutionPlan>> {
        Ok(self)
    }

    fn execute(
        &self,
        partition: usize,
        _context: Arc<TaskContext>,
    ) -> DataFusionResult<SendableRecordBatchStream> {
        if partition != 0 {
            return Err(DataFusionError::Execution(format!(
                "Partition {} out of range (FleetExec has 1 partition)",
                partition
            )));
        }

        info!(
            table = self.table.name,
            quals = self.quals.len(),
            limit = ?self.limit,
            hydrate = self.hydrate,
            "starting scan"
        );
        let rows = self.table.rows(ScanArgs {
            client: self.client.clone(),
            quals: self.quals.clone(),
            limit: self.limit,
            hydrate: self.hydrate,
        });

        Ok(Box::pin(FleetStream {
            schema: self.schema.clone(),
            columns: self.columns.clone(),
            quals: self.quals.clone(),
            server_url: self.client.server_url().to_string(),
            rows,
        }))
    }
}

/// Stream of RecordBatches, one per page of Fleet records
struct FleetStream {
    schema: SchemaRef,
    columns: Vec<ColumnDef>,
    quals: Quals,
    server_url: String,
    rows: RowStream,
}

impl Stream for FleetStream {
    type Item = DataFusionResult<RecordBatch>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;
        this.rows.poll_next_unpin(cx).map(|page| {
            page.map(|rows| {
                let ctx = RowContext {
                    quals: &this.quals,
                    server_url: &this.server_url,
                };
                rows.and_then(|rows| build_batch(&this.schema, &this.columns, &rows, &ctx))
                    .map_err(DataFusionError::from)
            })
        })
    }
}

impl RecordBatchStream for FleetStream {
    fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }
}
