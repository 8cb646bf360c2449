//! Conversion of decoded Fleet records into Arrow record batches.
//!
//! Records arrive as `serde_json::Value` objects serialized from the typed
//! client models, so every field has already been validated and timestamps
//! are normalized RFC 3339 strings or `null`.

use chrono::DateTime;
use datafusion::arrow::array::{
    ArrayRef, BooleanBuilder, Float64Builder, Int64Builder, StringBuilder,
    TimestampMicrosecondBuilder,
};
use datafusion::arrow::datatypes::SchemaRef;
use datafusion::arrow::record_batch::{RecordBatch, RecordBatchOptions};
use serde_json::Value;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::filter::{QualValue, Quals};
use crate::schema::{ColumnDef, ColumnKind, ColumnSource};

/// Values shared by every row of a scan.
#[derive(Debug, Clone, Copy)]
pub struct RowContext<'a> {
    pub quals: &'a Quals,
    pub server_url: &'a str,
}

enum Cell<'a> {
    Json(&'a Value),
    Qual(&'a QualValue),
    Text(&'a str),
    Null,
}

fn cell<'a>(column: &ColumnDef, row: &'a Value, ctx: &RowContext<'a>) -> Cell<'a> {
    match column.source {
        ColumnSource::Field(field) | ColumnSource::Detail(field) => match row.get(field) {
            None | Some(Value::Null) => Cell::Null,
            Some(value) => Cell::Json(value),
        },
        ColumnSource::Qual => ctx.quals.get(column.name).map_or(Cell::Null, Cell::Qual),
        ColumnSource::ServerUrl => Cell::Text(ctx.server_url),
    }
}

fn mismatch(column: &ColumnDef, value: &Value) -> Error {
    Error::Internal(format!(
        "column '{}' expected {:?}, got {}",
        column.name, column.kind, value
    ))
}

fn to_i64(column: &ColumnDef, cell: Cell<'_>) -> Result<Option<i64>> {
    match cell {
        Cell::Null => Ok(None),
        Cell::Qual(qual) => Ok(qual.as_int()),
        Cell::Text(s) => Ok(s.parse().ok()),
        Cell::Json(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .map(Some)
            .ok_or_else(|| mismatch(column, &Value::Number(n.clone()))),
        Cell::Json(other) => Err(mismatch(column, other)),
    }
}

fn to_f64(column: &ColumnDef, cell: Cell<'_>) -> Result<Option<f64>> {
    match cell {
        Cell::Null | Cell::Qual(_) | Cell::Text(_) => Ok(None),
        Cell::Json(Value::Number(n)) => Ok(n.as_f64()),
        Cell::Json(other) => Err(mismatch(column, other)),
    }
}

fn to_bool(column: &ColumnDef, cell: Cell<'_>) -> Result<Option<bool>> {
    match cell {
        Cell::Null | Cell::Text(_) => Ok(None),
        Cell::Qual(QualValue::Bool(b)) => Ok(Some(*b)),
        Cell::Qual(_) => Ok(None),
        Cell::Json(Value::Bool(b)) => Ok(Some(*b)),
        Cell::Json(other) => Err(mismatch(column, other)),
    }
}

fn to_text(cell: Cell<'_>) -> Option<String> {
    match cell {
        Cell::Null => None,
        Cell::Qual(qual) => Some(qual.to_string()),
        Cell::Text(s) => Some(s.to_string()),
        Cell::Json(Value::String(s)) => Some(s.clone()),
        Cell::Json(other) => Some(other.to_string()),
    }
}

fn to_json_text(cell: Cell<'_>) -> Option<String> {
    match cell {
        Cell::Null => None,
        Cell::Json(value) => Some(value.to_string()),
        Cell::Qual(qual) => Some(qual.to_string()),
        Cell::Text(s) => Some(Value::String(s.to_string()).to_string()),
    }
}

fn to_micros(column: &ColumnDef, cell: Cell<'_>) -> Result<Option<i64>> {
    match cell {
        Cell::Null | Cell::Qual(_) => Ok(None),
        Cell::Text(s) => parse_micros(column, s),
        Cell::Json(Value::String(s)) => parse_micros(column, s),
        Cell::Json(other) => Err(mismatch(column, other)),
    }
}

fn parse_micros(column: &ColumnDef, s: &str) -> Result<Option<i64>> {
    if s.is_empty() {
        return Ok(None);
    }
    DateTime::parse_from_rfc3339(s)
        .map(|ts| Some(ts.timestamp_micros()))
        .map_err(|e| Error::Internal(format!("column '{}': invalid timestamp '{}': {}", column.name, s, e)))
}

fn build_column(column: &ColumnDef, rows: &[Value], ctx: &RowContext<'_>) -> Result<ArrayRef> {
    let array: ArrayRef = match column.kind {
        ColumnKind::Int64 => {
            let mut builder = Int64Builder::with_capacity(rows.len());
            for row in rows {
                builder.append_option(to_i64(column, cell(column, row, ctx))?);
            }
            Arc::new(builder.finish())
        }
        ColumnKind::Float64 => {
            let mut builder = Float64Builder::with_capacity(rows.len());
            for row in rows {
                builder.append_option(to_f64(column, cell(column, row, ctx))?);
            }
            Arc::new(builder.finish())
        }
        ColumnKind::Boolean => {
            let mut builder = BooleanBuilder::with_capacity(rows.len());
            for row in rows {
                builder.append_option(to_bool(column, cell(column, row, ctx))?);
            }
            Arc::new(builder.finish())
        }
        ColumnKind::Utf8 => {
            let mut builder = StringBuilder::new();
            for row in rows {
                builder.append_option(to_text(cell(column, row, ctx)));
            }
            Arc::new(builder.finish())
        }
        ColumnKind::Json => {
            let mut builder = StringBuilder::new();
            for row in rows {
                builder.append_option(to_json_text(cell(column, row, ctx)));
            }
            Arc::new(builder.finish())
        }
        ColumnKind::Timestamp => {
            let mut builder =
                TimestampMicrosecondBuilder::with_capacity(rows.len()).with_timezone("UTC");
            for row in rows {
                builder.append_option(to_micros(column, cell(column, row, ctx))?);
            }
            Arc::new(builder.finish())
        }
    };
    Ok(array)
}

/// Build one batch holding `rows` for the projected `columns`.
///
/// With no projected columns the batch only carries the row count.
pub fn build_batch(
    schema: &SchemaRef,
    columns: &[ColumnDef],
    rows: &[Value],
    ctx: &RowContext<'_>,
) -> Result<RecordBatch> {
    if columns.is_empty() {
        let options = RecordBatchOptions::new().with_row_count(Some(rows.len()));
        return Ok(RecordBatch::try_new_with_options(schema.clone(), vec![], &options)?);
    }

    let arrays = columns
        .iter()
        .map(|column| build_column(column, rows, ctx))
        .collect::<Result<Vec<_>>>()?;
    Ok(RecordBatch::try_new(schema.clone(), arrays)?)
}
