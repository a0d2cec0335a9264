//! Bar, line and area charts: one value per x category per series.

use super::{first_match_values, BuildContext, KindSpec};
use crate::data::Dataset;
use crate::index::UniqueIndex;
use crate::ir::{CategoricalSeries, ChartResult, Series};
use crate::kind::ChartKind;
use crate::mapping::Role;
use anyhow::Result;

const REQUIRED: &[Role] = &[Role::X, Role::Y];
const OPTIONAL: &[Role] = &[Role::Group];
const NUMERIC: &[Role] = &[Role::Y];

pub static BAR: KindSpec = KindSpec {
    kind: ChartKind::Bar,
    required: REQUIRED,
    optional: OPTIONAL,
    numeric: NUMERIC,
    build: build_categorical,
};

pub static LINE: KindSpec = KindSpec {
    kind: ChartKind::Line,
    required: REQUIRED,
    optional: OPTIONAL,
    numeric: NUMERIC,
    build: build_categorical,
};

/// Same data walk as line; the fill flag comes from the display block.
pub static AREA: KindSpec = KindSpec {
    kind: ChartKind::Area,
    required: REQUIRED,
    optional: OPTIONAL,
    numeric: NUMERIC,
    build: build_categorical,
};

fn build_categorical(ctx: &BuildContext<'_>) -> Result<ChartResult> {
    let x_col = ctx.column(Role::X)?;
    let y_cols = ctx.columns(Role::Y)?;
    let labels = UniqueIndex::of_column(ctx.data, x_col);
    let palette = ctx.palette();

    let mut series = Vec::new();
    match ctx.mapping.column(Role::Group) {
        None => {
            for y_col in y_cols {
                series.push(Series {
                    name: y_col.clone(),
                    values: first_match_values(ctx.data, &labels, x_col, y_col, |_| true),
                    color: palette.color(series.len()),
                });
            }
        }
        Some(group_col) => {
            let groups = UniqueIndex::of_column(ctx.data, group_col);
            for y_col in y_cols {
                for group in groups.values() {
                    let values = first_match_values(ctx.data, &labels, x_col, y_col, |row| {
                        Dataset::cell(row, group_col).label() == *group
                    });
                    series.push(Series {
                        name: format!("{} ({})", y_col, group),
                        values,
                        color: palette.color(series.len()),
                    });
                }
            }
        }
    }

    Ok(ChartResult::Categorical(CategoricalSeries {
        labels: labels.into_values(),
        series,
        display: ctx.display(),
    }))
}
