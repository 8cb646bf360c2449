//! Equality predicate extraction for pushdown into Fleet list parameters.

use datafusion::common::ScalarValue;
use datafusion::logical_expr::{BinaryExpr, Expr, Operator};
use fleetdm_client::QueryParams;
use std::collections::HashMap;
use std::fmt;

use crate::schema::ColumnKind;

/// A literal compared for equality against a column.
#[derive(Debug, Clone, PartialEq)]
pub enum QualValue {
    Int(i64),
    Str(String),
    Bool(bool),
}

impl QualValue {
    /// Whether the literal can stand for a value of a column of `kind`.
    pub fn fits(&self, kind: ColumnKind) -> bool {
        matches!(
            (self, kind),
            (QualValue::Int(_), ColumnKind::Int64)
                | (QualValue::Str(_), ColumnKind::Utf8)
                | (QualValue::Bool(_), ColumnKind::Boolean)
        )
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            QualValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    fn from_scalar(value: &ScalarValue) -> Option<Self> {
        match value {
            ScalarValue::Int8(Some(v)) => Some(QualValue::Int(*v as i64)),
            ScalarValue::Int16(Some(v)) => Some(QualValue::Int(*v as i64)),
            ScalarValue::Int32(Some(v)) => Some(QualValue::Int(*v as i64)),
            ScalarValue::Int64(Some(v)) => Some(QualValue::Int(*v)),
            ScalarValue::UInt8(Some(v)) => Some(QualValue::Int(*v as i64)),
            ScalarValue::UInt16(Some(v)) => Some(QualValue::Int(*v as i64)),
            ScalarValue::UInt32(Some(v)) => Some(QualValue::Int(*v as i64)),
            ScalarValue::UInt64(Some(v)) => i64::try_from(*v).ok().map(QualValue::Int),
            ScalarValue::Utf8(Some(s))
            | ScalarValue::LargeUtf8(Some(s))
            | ScalarValue::Utf8View(Some(s)) => Some(QualValue::Str(s.clone())),
            ScalarValue::Boolean(Some(b)) => Some(QualValue::Bool(*b)),
            _ => None,
        }
    }
}

impl fmt::Display for QualValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualValue::Int(v) => write!(f, "{}", v),
            QualValue::Str(s) => f.write_str(s),
            QualValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Pushed-down equality predicates keyed by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Quals(HashMap<String, QualValue>);

impl Quals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: QualValue) {
        self.0.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> Option<&QualValue> {
        self.0.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QualValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// A column usable as an equality predicate and the list parameter it becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterDef {
    pub column: &'static str,
    pub param: &'static str,
}

impl FilterDef {
    /// Parameter named after the column.
    pub const fn new(column: &'static str) -> Self {
        Self { column, param: column }
    }

    pub const fn renamed(column: &'static str, param: &'static str) -> Self {
        Self { column, param }
    }
}

/// Append the parameters for every declared filter present in `quals`, in
/// declaration order.
pub fn quals_to_params(filters: &[FilterDef], quals: &Quals, params: &mut QueryParams) {
    for filter in filters {
        if let Some(value) = quals.get(filter.column) {
            params.push(filter.param, value.to_string());
        }
    }
}

/// Match `col = lit`, `lit = col`, a bare boolean `col` and `NOT col`.
///
/// Casts on either side are looked through; DataFusion keeps the filter above
/// the scan, so the engine still sees the original comparison.
pub fn extract_qual(expr: &Expr) -> Option<(String, QualValue)> {
    match expr {
        Expr::BinaryExpr(BinaryExpr {
            left,
            op: Operator::Eq,
            right,
        }) => match (column_name(left), literal(right)) {
            (Some(name), Some(value)) => Some((name, value)),
            _ => match (literal(left), column_name(right)) {
                (Some(value), Some(name)) => Some((name, value)),
                _ => None,
            },
        },
        Expr::Column(col) => Some((col.name.clone(), QualValue::Bool(true))),
        Expr::IsTrue(inner) => column_name(inner).map(|name| (name, QualValue::Bool(true))),
        Expr::Not(inner) | Expr::IsFalse(inner) => {
            column_name(inner).map(|name| (name, QualValue::Bool(false)))
        }
        _ => None,
    }
}

/// Collect the predicates on `columns` whose literal fits the column kind.
pub fn extract_quals(filters: &[Expr], columns: &[(&str, ColumnKind)]) -> Quals {
    let mut quals = Quals::new();
    for expr in filters {
        if let Some((name, value)) = extract_qual(expr) {
            let fits = columns
                .iter()
                .any(|(column, kind)| *column == name && value.fits(*kind));
            if fits {
                quals.insert(name, value);
            }
        }
    }
    quals
}

fn column_name(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Column(col) => Some(col.name.clone()),
        Expr::Cast(cast) => column_name(&cast.expr),
        Expr::TryCast(cast) => column_name(&cast.expr),
        _ => None,
    }
}

fn literal(expr: &Expr) -> Option<QualValue> {
    match expr {
        Expr::Literal(value) => QualValue::from_scalar(value),
        Expr::Cast(cast) => literal(&cast.expr),
        Expr::TryCast(cast) => literal(&cast.expr),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datafusion::arrow::datatypes::DataType;
    use datafusion::logical_expr::{cast, col, lit, not};

    #[test]
    fn test_column_eq_literal() {
        let expr = col("team_id").eq(lit(3i64));
        assert_eq!(extract_qual(&expr), Some(("team_id".to_string(), QualValue::Int(3))));

        let expr = lit("online").eq(col("status"));
        assert_eq!(
            extract_qual(&expr),
            Some(("status".to_string(), QualValue::Str("online".to_string())))
        );
    }

    #[test]
    fn test_cast_is_looked_through() {
        let expr = cast(col("team_id"), DataType::Int32).eq(lit(7i32));
        assert_eq!(extract_qual(&expr), Some(("team_id".to_string(), QualValue::Int(7))));
    }

    #[test]
    fn test_boolean_shapes() {
        assert_eq!(
            extract_qual(&col("vulnerable_only")),
            Some(("vulnerable_only".to_string(), QualValue::Bool(true)))
        );
        assert_eq!(
            extract_qual(&not(col("exploit"))),
            Some(("exploit".to_string(), QualValue::Bool(false)))
        );
    }

    #[test]
    fn test_unsupported_shapes() {
        assert_eq!(extract_qual(&col("id").gt(lit(3i64))), None);
        assert_eq!(extract_qual(&col("a").eq(col("b"))), None);
        assert_eq!(extract_qual(&col("id").eq(lit(ScalarValue::Int64(None)))), None);
        assert_eq!(extract_qual(&col("a").eq(lit(1i64)).or(col("a").eq(lit(2i64)))), None);
    }

    #[test]
    fn test_extract_quals_checks_kind() {
        let columns = [("team_id", ColumnKind::Int64), ("query", ColumnKind::Utf8)];
        let filters = vec![
            col("team_id").eq(lit("abc")),
            col("query").eq(lit("chrome")),
            col("name").eq(lit("x")),
        ];
        let quals = extract_quals(&filters, &columns);
        assert_eq!(quals.len(), 1);
        assert_eq!(quals.get("query"), Some(&QualValue::Str("chrome".to_string())));
    }

    #[test]
    fn test_quals_to_params_renames_in_order() {
        let filters = [
            FilterDef::renamed("vulnerable_only", "vulnerable"),
            FilterDef::new("team_id"),
        ];
        let mut quals = Quals::new();
        quals.insert("team_id", QualValue::Int(2));
        quals.insert("vulnerable_only", QualValue::Bool(true));

        let mut params = QueryParams::new();
        quals_to_params(&filters, &quals, &mut params);
        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("vulnerable", "true"), ("team_id", "2")]);
    }
}
