//! Scatter plots. Every row becomes exactly one point; rows are only
//! partitioned, never aggregated.

use super::{cube_axes, partition_column, partition_rows, BuildContext, KindSpec};
use crate::coerce::column_values;
use crate::ir::{ChartResult, Point2, Point3, PointGroup, PointGroups, Points3D};
use crate::kind::ChartKind;
use crate::mapping::Role;
use crate::palette::ColorPalette;
use crate::scale::{normalize_observed, SPACE_EXTENT};
use anyhow::Result;

const UNGROUPED_NAME: &str = "Data Points";
const RADIUS_RANGE: (f64, f64) = (0.1, 0.5);
const DEFAULT_RADIUS: f64 = 0.2;

pub static SCATTER: KindSpec = KindSpec {
    kind: ChartKind::Scatter,
    required: &[Role::X, Role::Y],
    optional: &[Role::Group, Role::Color, Role::Size],
    numeric: &[Role::X, Role::Y, Role::Size],
    build: build_scatter,
};

pub static SCATTER3D: KindSpec = KindSpec {
    kind: ChartKind::Scatter3d,
    required: &[Role::X, Role::Y, Role::Z],
    optional: &[Role::Group, Role::Color, Role::Size],
    numeric: &[Role::X, Role::Y, Role::Z, Role::Size],
    build: build_scatter3d,
};

/// Split row indices into named, colored groups. Without a partition
/// column all rows form one group.
fn group_rows<P>(
    ctx: &BuildContext<'_>,
    palette: ColorPalette<'_>,
    mut point: impl FnMut(usize) -> P,
) -> Vec<PointGroup<P>> {
    match partition_column(ctx.mapping) {
        Some(col) => {
            let (keys, members) = partition_rows(ctx.data, col);
            keys.values()
                .iter()
                .zip(members)
                .enumerate()
                .map(|(i, (name, rows))| PointGroup {
                    name: name.clone(),
                    color: palette.color(i),
                    points: rows.into_iter().map(&mut point).collect(),
                })
                .collect()
        }
        None => vec![PointGroup {
            name: UNGROUPED_NAME.to_string(),
            color: palette.color(0),
            points: (0..ctx.data.len()).map(point).collect(),
        }],
    }
}

fn build_scatter(ctx: &BuildContext<'_>) -> Result<ChartResult> {
    let xs = column_values(ctx.data, ctx.column(Role::X)?);
    let ys = column_values(ctx.data, ctx.column(Role::Y)?);
    let sizes = ctx
        .mapping
        .column(Role::Size)
        .map(|col| column_values(ctx.data, col));

    let groups = group_rows(ctx, ctx.palette(), |i| Point2 {
        x: xs[i],
        y: ys[i],
        size: sizes.as_ref().map(|s| s[i]),
    });

    Ok(ChartResult::PointGroups(PointGroups {
        groups,
        display: ctx.display(),
    }))
}

fn build_scatter3d(ctx: &BuildContext<'_>) -> Result<ChartResult> {
    let (x_col, y_col, z_col) = (
        ctx.column(Role::X)?,
        ctx.column(Role::Y)?,
        ctx.column(Role::Z)?,
    );
    let xs = column_values(ctx.data, x_col);
    let ys = column_values(ctx.data, y_col);
    let zs = column_values(ctx.data, z_col);
    let sizes = ctx
        .mapping
        .column(Role::Size)
        .map(|col| column_values(ctx.data, col));

    let nx = normalize_observed(&xs, -SPACE_EXTENT, SPACE_EXTENT);
    let ny = normalize_observed(&ys, -SPACE_EXTENT, SPACE_EXTENT);
    let nz = normalize_observed(&zs, -SPACE_EXTENT, SPACE_EXTENT);
    let radii = sizes
        .as_ref()
        .map(|s| normalize_observed(s, RADIUS_RANGE.0, RADIUS_RANGE.1));

    let groups = group_rows(ctx, ctx.palette(), |i| Point3 {
        x: xs[i],
        y: ys[i],
        z: zs[i],
        size: sizes.as_ref().map(|s| s[i]),
        position: [nx[i], ny[i], nz[i]],
        radius: radii.as_ref().map_or(DEFAULT_RADIUS, |r| r[i]),
    });

    Ok(ChartResult::Points3D(Points3D {
        groups,
        axes: cube_axes([(x_col, &xs), (y_col, &ys), (z_col, &zs)]),
        display: ctx.display(),
    }))
}
