//! Per-kind chart transforms and the dispatch table tying each
//! `ChartKind` to its role requirements and builder.

pub mod bars3d;
pub mod categorical;
pub mod points;
pub mod proportion;
pub mod radar;
pub mod surface;

use crate::coerce::coerce;
use crate::data::{Dataset, Row};
use crate::index::UniqueIndex;
use crate::ir::{Axes3D, Axis3Config, ChartResult, DisplayMeta};
use crate::kind::ChartKind;
use crate::mapping::{AxisMapping, Role};
use crate::palette::ColorPalette;
use crate::scale::{cube_ticks, Axis3, MinMax};
use crate::ChartOptions;
use anyhow::{anyhow, Result};

/// Everything a builder reads. The mapping has already been validated
/// against the kind's role table.
pub struct BuildContext<'a> {
    pub data: &'a Dataset,
    pub mapping: &'a AxisMapping,
    pub options: &'a ChartOptions,
    pub kind: ChartKind,
}

impl<'a> BuildContext<'a> {
    pub fn column(&self, role: Role) -> Result<&'a str> {
        self.mapping
            .column(role)
            .ok_or_else(|| anyhow!("{} is not mapped", role))
    }

    pub fn columns(&self, role: Role) -> Result<&'a [String]> {
        let cols = self.mapping.columns(role);
        if cols.is_empty() {
            return Err(anyhow!("{} is not mapped", role));
        }
        Ok(cols)
    }

    pub fn palette(&self) -> ColorPalette<'a> {
        ColorPalette::new(&self.options.colors)
    }

    pub fn display(&self) -> DisplayMeta {
        self.options.display(self.kind == ChartKind::Area)
    }
}

pub type BuildFn = fn(&BuildContext<'_>) -> Result<ChartResult>;

/// Role table and transform for one chart kind.
pub struct KindSpec {
    pub kind: ChartKind,
    pub required: &'static [Role],
    pub optional: &'static [Role],
    /// Roles whose cells are read as numbers.
    pub numeric: &'static [Role],
    pub build: BuildFn,
}

pub fn spec_for(kind: ChartKind) -> &'static KindSpec {
    match kind {
        ChartKind::Bar => &categorical::BAR,
        ChartKind::Line => &categorical::LINE,
        ChartKind::Area => &categorical::AREA,
        ChartKind::Pie => &proportion::PIE,
        ChartKind::Doughnut => &proportion::DOUGHNUT,
        ChartKind::Scatter => &points::SCATTER,
        ChartKind::Radar => &radar::RADAR,
        ChartKind::Bar3d => &bars3d::BAR3D,
        ChartKind::Scatter3d => &points::SCATTER3D,
        ChartKind::Surface3d => &surface::SURFACE3D,
    }
}

// =============================================================================
// Shared helpers
// =============================================================================

/// For each label, the coerced `value_col` of the first row (passing
/// `keep`) whose `key_col` equals that label. Labels without a matching
/// row read 0.
pub(crate) fn first_match_values<F>(
    data: &Dataset,
    labels: &UniqueIndex,
    key_col: &str,
    value_col: &str,
    keep: F,
) -> Vec<f64>
where
    F: Fn(&Row) -> bool,
{
    let mut values: Vec<Option<f64>> = vec![None; labels.len()];
    for row in data.rows().iter().filter(|r| keep(r)) {
        let key = Dataset::cell(row, key_col).label();
        if let Some(pos) = labels.position(&key) {
            if values[pos].is_none() {
                values[pos] = Some(coerce(Dataset::cell(row, value_col)));
            }
        }
    }
    values.into_iter().map(|v| v.unwrap_or(0.0)).collect()
}

/// Column used to partition rows into point groups: `group`, else `color`.
pub(crate) fn partition_column<'a>(mapping: &'a AxisMapping) -> Option<&'a str> {
    mapping
        .column(Role::Group)
        .or_else(|| mapping.column(Role::Color))
}

/// Row indices per distinct value of `column`, in first-occurrence order.
pub(crate) fn partition_rows(data: &Dataset, column: &str) -> (UniqueIndex, Vec<Vec<usize>>) {
    let keys: Vec<String> = data.column_values(column).map(|v| v.label()).collect();
    let index = UniqueIndex::from_labels(keys.iter().cloned());
    let mut members = vec![Vec::new(); index.len()];
    for (row, key) in keys.iter().enumerate() {
        if let Some(pos) = index.position(key) {
            members[pos].push(row);
        }
    }
    (index, members)
}

/// Axis configuration for the [-5, 5] cube from the raw column ranges.
pub(crate) fn cube_axes(columns: [(&str, &[f64]); 3]) -> Axes3D {
    let [x, y, z] = columns.map(|(name, values)| (name, MinMax::of(values)));
    let axis = |(name, range): (&str, Option<MinMax>), which: Axis3| Axis3Config {
        label: name.to_string(),
        ticks: cube_ticks(which, range.unwrap_or(MinMax { min: 0.0, max: 0.0 })),
    };
    Axes3D {
        x: axis(x, Axis3::X),
        y: axis(y, Axis3::Y),
        z: axis(z, Axis3::Z),
    }
}
