use anyhow::{anyhow, bail, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// A single raw spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Number(f64),
    Text(String),
}

static NULL: CellValue = CellValue::Null;

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Display form of the cell. Also the identity used when grouping rows
    /// or looking up categories, so `"3"` and `3` fall into the same bucket.
    pub fn label(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.clone(),
        }
    }

    fn from_json(field: &str, value: &Value) -> Result<Self> {
        Ok(match value {
            Value::Null => CellValue::Null,
            Value::String(s) => CellValue::Text(s.clone()),
            Value::Number(n) => match n.as_f64() {
                Some(f) => CellValue::Number(f),
                None => CellValue::Text(n.to_string()),
            },
            Value::Bool(b) => CellValue::Text(b.to_string()),
            _ => bail!("Unsupported value type for field '{}'", field),
        })
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

pub type Row = HashMap<String, CellValue>;

/// Tabular input: ordered unique column names plus ordered rows.
/// Row order is display order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset, rejecting duplicate columns and rows that carry
    /// keys outside `columns`.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Result<Self> {
        for (i, col) in columns.iter().enumerate() {
            if columns[..i].contains(col) {
                bail!("Duplicate column '{}'", col);
            }
        }
        for (idx, row) in rows.iter().enumerate() {
            if let Some(key) = row.keys().find(|k| !columns.contains(k)) {
                bail!("Row {} has unknown column '{}'", idx, key);
            }
        }
        Ok(Self { columns, rows })
    }

    /// Create a dataset from header/record pairs as produced by a CSV reader.
    /// Empty cells become nulls; everything else stays text.
    pub fn from_records(headers: Vec<String>, records: Vec<Vec<String>>) -> Result<Self> {
        let rows = records
            .into_iter()
            .map(|record| {
                headers
                    .iter()
                    .zip(record)
                    .map(|(h, cell)| {
                        let value = if cell.is_empty() {
                            CellValue::Null
                        } else {
                            CellValue::Text(cell)
                        };
                        (h.clone(), value)
                    })
                    .collect()
            })
            .collect();
        Self::new(headers, rows)
    }

    /// Create a dataset from JSON: either `{"columns": [...], "rows": [...]}`
    /// or a bare array of objects.
    pub fn from_json(value: &Value) -> Result<Self> {
        let (declared, items) = match value {
            Value::Array(items) => (None, items),
            Value::Object(obj) => {
                let items = obj
                    .get("rows")
                    .and_then(Value::as_array)
                    .ok_or_else(|| anyhow!("Dataset object must have a 'rows' array"))?;
                let declared = match obj.get("columns") {
                    Some(Value::Array(cols)) => Some(
                        cols.iter()
                            .map(|c| {
                                c.as_str()
                                    .map(String::from)
                                    .ok_or_else(|| anyhow!("Column names must be strings"))
                            })
                            .collect::<Result<Vec<_>>>()?,
                    ),
                    Some(_) => bail!("'columns' must be an array of strings"),
                    None => None,
                };
                (declared, items)
            }
            _ => bail!("Input data must be a JSON array of objects"),
        };

        let mut columns = declared.clone().unwrap_or_default();
        let mut rows = Vec::with_capacity(items.len());
        for item in items {
            let obj = item
                .as_object()
                .ok_or_else(|| anyhow!("Items in array must be objects"))?;
            let mut row = Row::with_capacity(obj.len());
            for (key, val) in obj {
                if declared.is_none() && !columns.contains(key) {
                    columns.push(key.clone());
                }
                row.insert(key.clone(), CellValue::from_json(key, val)?);
            }
            rows.push(row);
        }

        Self::new(columns, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Cell lookup; a key missing from the row reads as null.
    pub fn cell<'a>(row: &'a Row, column: &str) -> &'a CellValue {
        row.get(column).unwrap_or(&NULL)
    }

    pub fn column_values<'a>(
        &'a self,
        column: &'a str,
    ) -> impl Iterator<Item = &'a CellValue> + 'a {
        self.rows.iter().map(move |row| Self::cell(row, column))
    }
}
