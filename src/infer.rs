//! Column type inference and mapping suggestions for column pickers.
//!
//! Purely advisory: nothing here changes how a chart is built.

use crate::coerce::try_coerce;
use crate::data::{CellValue, Dataset};
use crate::kind::ChartKind;
use crate::mapping::{AxisMapping, Role};
use crate::transform::spec_for;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

const SAMPLE_SIZE: usize = 10;

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%d %b %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %B %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Number,
    Date,
    String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ColumnType,
}

/// Classify a column from its first ten non-null values.
pub fn infer_column_type(data: &Dataset, column: &str) -> ColumnType {
    let sample: Vec<&CellValue> = data
        .column_values(column)
        .filter(|v| !v.is_null())
        .take(SAMPLE_SIZE)
        .collect();

    if sample.is_empty() {
        return ColumnType::String;
    }
    if sample.iter().all(|v| try_coerce(v).is_some()) {
        return ColumnType::Number;
    }
    if sample.iter().all(|v| matches!(v, CellValue::Text(s) if is_date(s))) {
        return ColumnType::Date;
    }
    ColumnType::String
}

/// Whether `s` reads as a calendar date (optionally with a time).
pub fn is_date(s: &str) -> bool {
    let s = s.trim();
    if s.is_empty() {
        return false;
    }
    DateTime::parse_from_rfc3339(s).is_ok()
        || DateTime::parse_from_rfc2822(s).is_ok()
        || DATETIME_FORMATS
            .iter()
            .any(|f| NaiveDateTime::parse_from_str(s, f).is_ok())
        || DATE_FORMATS
            .iter()
            .any(|f| NaiveDate::parse_from_str(s, f).is_ok())
}

pub fn infer_schema(data: &Dataset) -> Vec<ColumnInfo> {
    data.columns()
        .iter()
        .map(|name| ColumnInfo {
            name: name.clone(),
            kind: infer_column_type(data, name),
        })
        .collect()
}

/// Roles whose columns are expected to hold numbers.
pub fn role_wants_number(role: Role) -> bool {
    matches!(
        role,
        Role::Y | Role::Z | Role::Values | Role::Size | Role::Datasets
    )
}

/// Columns a picker should offer for `role`.
pub fn eligible_columns(schema: &[ColumnInfo], role: Role) -> Vec<&ColumnInfo> {
    schema
        .iter()
        .filter(|c| !role_wants_number(role) || c.kind == ColumnType::Number)
        .collect()
}

/// Fill each required role of `kind` with the first eligible column not
/// already used. Roles with no candidate stay unbound.
pub fn suggest_mapping(data: &Dataset, kind: ChartKind) -> AxisMapping {
    let schema = infer_schema(data);
    let mut used: Vec<&str> = Vec::new();
    let mut mapping = AxisMapping::new();

    for &role in spec_for(kind).required {
        let pick = eligible_columns(&schema, role)
            .into_iter()
            .find(|c| !used.contains(&c.name.as_str()));
        if let Some(col) = pick {
            used.push(col.name.as_str());
            mapping.bind(role, vec![col.name.clone()]);
        }
    }

    mapping
}
