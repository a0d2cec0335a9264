use super::{BuildContext, KindSpec};
use crate::coerce::coerce;
use crate::data::Dataset;
use crate::index::UniqueIndex;
use crate::ir::{ChartResult, ProportionSeries};
use crate::kind::ChartKind;
use crate::mapping::Role;
use anyhow::Result;

const REQUIRED: &[Role] = &[Role::Labels, Role::Values];
const NUMERIC: &[Role] = &[Role::Values];

pub static PIE: KindSpec = KindSpec {
    kind: ChartKind::Pie,
    required: REQUIRED,
    optional: &[],
    numeric: NUMERIC,
    build: build_proportion,
};

pub static DOUGHNUT: KindSpec = KindSpec {
    kind: ChartKind::Doughnut,
    required: REQUIRED,
    optional: &[],
    numeric: NUMERIC,
    build: build_proportion,
};

/// Sum the value column per distinct label.
fn build_proportion(ctx: &BuildContext<'_>) -> Result<ChartResult> {
    let label_col = ctx.column(Role::Labels)?;
    let value_col = ctx.column(Role::Values)?;

    let labels = UniqueIndex::of_column(ctx.data, label_col);
    let mut values = vec![0.0; labels.len()];
    for row in ctx.data.rows() {
        let key = Dataset::cell(row, label_col).label();
        if let Some(pos) = labels.position(&key) {
            values[pos] += coerce(Dataset::cell(row, value_col));
        }
    }

    let colors = ctx.palette().colors(labels.len());
    Ok(ChartResult::Proportion(ProportionSeries {
        labels: labels.into_values(),
        values,
        colors,
        display: ctx.display(),
    }))
}
