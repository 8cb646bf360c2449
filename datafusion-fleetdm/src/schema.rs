use datafusion::arrow::datatypes::{DataType as ArrowDataType, Field, Schema, SchemaRef, TimeUnit};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;

/// Metadata key holding a column's description on its Arrow field.
pub const DESCRIPTION_KEY: &str = "description";

/// SQL-facing type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Int64,
    Float64,
    Boolean,
    Utf8,
    /// Microsecond timestamp in UTC.
    Timestamp,
    /// Nested JSON re-encoded as text.
    Json,
}

/// Where a column's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSource {
    /// A field of the listed record.
    Field(&'static str),
    /// A field only present on the per-row detail fetch.
    Detail(&'static str),
    /// The value of the pushed-down predicate on this column.
    Qual,
    /// The configured server URL.
    ServerUrl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub source: ColumnSource,
    pub description: &'static str,
}

impl ColumnDef {
    pub const fn new(name: &'static str, kind: ColumnKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            source: ColumnSource::Field(name),
            description,
        }
    }

    pub const fn int(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ColumnKind::Int64, description)
    }

    pub const fn float(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ColumnKind::Float64, description)
    }

    pub const fn boolean(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ColumnKind::Boolean, description)
    }

    pub const fn string(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ColumnKind::Utf8, description)
    }

    pub const fn timestamp(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ColumnKind::Timestamp, description)
    }

    pub const fn json(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ColumnKind::Json, description)
    }

    /// `server_url` column filled from the connection config.
    pub const fn server_url() -> Self {
        Self {
            name: "server_url",
            kind: ColumnKind::Utf8,
            source: ColumnSource::ServerUrl,
            description: "FleetDM server URL from the connection config.",
        }
    }

    /// Read the value from a differently named record field.
    pub const fn from_field(self, field: &'static str) -> Self {
        Self {
            source: ColumnSource::Field(field),
            ..self
        }
    }

    /// Mark the column as only available after the detail fetch.
    pub const fn detail(self) -> Self {
        let field = match self.source {
            ColumnSource::Field(field) | ColumnSource::Detail(field) => field,
            _ => self.name,
        };
        Self {
            source: ColumnSource::Detail(field),
            ..self
        }
    }

    /// Echo the pushed-down predicate value instead of reading the record.
    pub const fn qual(self) -> Self {
        Self {
            source: ColumnSource::Qual,
            ..self
        }
    }

    pub fn is_detail(&self) -> bool {
        matches!(self.source, ColumnSource::Detail(_))
    }

    pub fn arrow_type(&self) -> ArrowDataType {
        kind_to_arrow_type(self.kind)
    }

    pub fn arrow_field(&self) -> Field {
        let metadata = HashMap::from([(DESCRIPTION_KEY.to_string(), self.description.to_string())]);
        Field::new(self.name, self.arrow_type(), true).with_metadata(metadata)
    }
}

/// Convert a column kind to its Arrow data type
pub fn kind_to_arrow_type(kind: ColumnKind) -> ArrowDataType {
    match kind {
        ColumnKind::Int64 => ArrowDataType::Int64,
        ColumnKind::Float64 => ArrowDataType::Float64,
        ColumnKind::Boolean => ArrowDataType::Boolean,
        ColumnKind::Utf8 | ColumnKind::Json => ArrowDataType::Utf8,
        ColumnKind::Timestamp => ArrowDataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into())),
    }
}

/// Create Arrow schema from column definitions. Every column is nullable.
pub fn create_arrow_schema(columns: &[ColumnDef]) -> SchemaRef {
    let fields: Vec<Field> = columns.iter().map(ColumnDef::arrow_field).collect();
    Arc::new(Schema::new(fields))
}

/// Create projected Arrow schema from column indices
pub fn create_projected_schema(schema: &Schema, projection: &[usize]) -> Result<SchemaRef> {
    Ok(Arc::new(schema.project(projection)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_to_arrow_type_conversion() {
        assert_eq!(kind_to_arrow_type(ColumnKind::Int64), ArrowDataType::Int64);
        assert_eq!(kind_to_arrow_type(ColumnKind::Float64), ArrowDataType::Float64);
        assert_eq!(kind_to_arrow_type(ColumnKind::Boolean), ArrowDataType::Boolean);
        assert_eq!(kind_to_arrow_type(ColumnKind::Utf8), ArrowDataType::Utf8);
        assert_eq!(kind_to_arrow_type(ColumnKind::Json), ArrowDataType::Utf8);
        assert_eq!(
            kind_to_arrow_type(ColumnKind::Timestamp),
            ArrowDataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into()))
        );
    }

    #[test]
    fn test_column_builders() {
        let col = ColumnDef::string("query_sql", "SQL").from_field("query");
        assert_eq!(col.source, ColumnSource::Field("query"));

        let col = ColumnDef::json("users", "Local users").detail();
        assert_eq!(col.source, ColumnSource::Detail("users"));
        assert!(col.is_detail());

        let col = ColumnDef::boolean("vulnerable_only", "Filter").qual();
        assert_eq!(col.source, ColumnSource::Qual);

        assert_eq!(ColumnDef::server_url().source, ColumnSource::ServerUrl);
    }

    #[test]
    fn test_schema_carries_descriptions() {
        let columns = [
            ColumnDef::int("id", "Unique ID."),
            ColumnDef::timestamp("created_at", "Creation time."),
        ];
        let schema = create_arrow_schema(&columns);
        let field = schema.field_with_name("id").unwrap();
        assert!(field.is_nullable());
        assert_eq!(field.metadata().get(DESCRIPTION_KEY).map(String::as_str), Some("Unique ID."));
    }

    #[test]
    fn test_create_projected_schema() {
        let columns = [
            ColumnDef::int("col1", ""),
            ColumnDef::string("col2", ""),
            ColumnDef::float("col3", ""),
        ];
        let schema = create_arrow_schema(&columns);

        let projection = vec![0, 2]; // Select col1 and col3
        let projected = create_projected_schema(&schema, &projection).unwrap();

        assert_eq!(projected.fields().len(), 2);
        assert_eq!(projected.field(0).name(), "col1");
        assert_eq!(projected.field(1).name(), "col3");
    }
}
