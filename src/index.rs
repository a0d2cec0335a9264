use crate::data::{CellValue, Dataset};
use std::collections::HashMap;

/// Distinct values in first-occurrence order, with a value -> position lookup.
///
/// Order is never sorted: the spreadsheet's row order is the default
/// category order the user sees.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UniqueIndex {
    values: Vec<String>,
    positions: HashMap<String, usize>,
}

impl UniqueIndex {
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = UniqueIndex::default();
        for label in labels {
            let label = label.into();
            if !index.positions.contains_key(&label) {
                index.positions.insert(label.clone(), index.values.len());
                index.values.push(label);
            }
        }
        index
    }

    pub fn from_cells<'a, I>(cells: I) -> Self
    where
        I: IntoIterator<Item = &'a CellValue>,
    {
        Self::from_labels(cells.into_iter().map(CellValue::label))
    }

    pub fn of_column(data: &Dataset, column: &str) -> Self {
        Self::from_cells(data.column_values(column))
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.positions.get(label).copied()
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn into_values(self) -> Vec<String> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Grid coordinate of position `i`, centered on zero:
    /// `i - (len - 1) / 2`.
    pub fn centered(&self, i: usize) -> f64 {
        i as f64 - (self.values.len() as f64 - 1.0) / 2.0
    }
}
