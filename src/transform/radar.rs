use super::{first_match_values, BuildContext, KindSpec};
use crate::index::UniqueIndex;
use crate::ir::{ChartResult, RadarSeries, Series};
use crate::kind::ChartKind;
use crate::mapping::Role;
use anyhow::Result;

pub static RADAR: KindSpec = KindSpec {
    kind: ChartKind::Radar,
    required: &[Role::Labels, Role::Datasets],
    optional: &[],
    numeric: &[Role::Datasets],
    build: build_radar,
};

/// One series per dataset column, valued at the first row of each label.
fn build_radar(ctx: &BuildContext<'_>) -> Result<ChartResult> {
    let label_col = ctx.column(Role::Labels)?;
    let dataset_cols = ctx.columns(Role::Datasets)?;
    let labels = UniqueIndex::of_column(ctx.data, label_col);
    let palette = ctx.palette();

    let series = dataset_cols
        .iter()
        .enumerate()
        .map(|(i, col)| Series {
            name: col.clone(),
            values: first_match_values(ctx.data, &labels, label_col, col, |_| true),
            color: palette.color(i),
        })
        .collect();

    Ok(ChartResult::Radar(RadarSeries {
        labels: labels.into_values(),
        series,
        display: ctx.display(),
    }))
}
