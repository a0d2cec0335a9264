use super::{BuildContext, KindSpec};
use crate::coerce::column_values;
use crate::data::Dataset;
use crate::index::UniqueIndex;
use crate::ir::{AxisLabels3, Bar3, Bars3D, ChartResult};
use crate::kind::ChartKind;
use crate::mapping::Role;
use crate::scale::{format_tick, lerp, normalize_value, AxisTick, MinMax};
use anyhow::{anyhow, Result};

const HEIGHT_RANGE: (f64, f64) = (0.1, 5.0);
const BAR_WIDTH: f64 = 0.8;

pub static BAR3D: KindSpec = KindSpec {
    kind: ChartKind::Bar3d,
    required: &[Role::X, Role::Y, Role::Z],
    optional: &[],
    numeric: &[Role::Y],
    build: build_bars3d,
};

/// One box per row on an x/z category grid centered on the origin.
/// Heights are rescaled into [0.1, 5] so no bar is invisible.
fn build_bars3d(ctx: &BuildContext<'_>) -> Result<ChartResult> {
    let x_col = ctx.column(Role::X)?;
    let y_col = ctx.column(Role::Y)?;
    let z_col = ctx.column(Role::Z)?;

    let x_cats = UniqueIndex::of_column(ctx.data, x_col);
    let z_cats = UniqueIndex::of_column(ctx.data, z_col);
    let heights = column_values(ctx.data, y_col);
    let range = MinMax::of(&heights).ok_or_else(|| anyhow!("no heights to scale"))?;
    let palette = ctx.palette();

    let mut bars = Vec::with_capacity(heights.len());
    for (row, &value) in ctx.data.rows().iter().zip(&heights) {
        let x_label = Dataset::cell(row, x_col).label();
        let z_label = Dataset::cell(row, z_col).label();
        let xi = x_cats
            .position(&x_label)
            .ok_or_else(|| anyhow!("x category '{}' not indexed", x_label))?;
        let zi = z_cats
            .position(&z_label)
            .ok_or_else(|| anyhow!("z category '{}' not indexed", z_label))?;

        let h = normalize_value(value, range.min, range.max, HEIGHT_RANGE.0, HEIGHT_RANGE.1);
        bars.push(Bar3 {
            position: [x_cats.centered(xi), h / 2.0, z_cats.centered(zi)],
            size: [BAR_WIDTH, h, BAR_WIDTH],
            color: palette.color(xi),
            original_value: value,
            label: format!("{}, {}: {}", x_label, z_label, value),
        });
    }

    Ok(ChartResult::Bars3D(Bars3D {
        bars,
        axis_labels: axis_labels(&x_cats, &z_cats, range),
        display: ctx.display(),
    }))
}

/// Category ticks along the front edges and height ticks 0..=5 on the
/// back corner post.
fn axis_labels(x_cats: &UniqueIndex, z_cats: &UniqueIndex, range: MinMax) -> AxisLabels3 {
    let x_edge = -(x_cats.len() as f64) / 2.0 - 0.5;
    let z_edge = -(z_cats.len() as f64) / 2.0 - 0.5;

    let x = x_cats
        .values()
        .iter()
        .enumerate()
        .map(|(i, label)| AxisTick {
            position: [x_cats.centered(i), 0.0, z_edge],
            label: label.clone(),
        })
        .collect();
    let z = z_cats
        .values()
        .iter()
        .enumerate()
        .map(|(i, label)| AxisTick {
            position: [x_edge, 0.0, z_cats.centered(i)],
            label: label.clone(),
        })
        .collect();
    let y = (0..=5)
        .map(|step| {
            let v = step as f64;
            AxisTick {
                position: [x_edge, v, z_edge],
                label: format_tick(lerp(range.min, range.max, v / HEIGHT_RANGE.1)),
            }
        })
        .collect();

    AxisLabels3 { x, y, z }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::AxisMapping;
    use crate::palette::DEFAULT_PALETTE;
    use crate::ChartOptions;
    use serde_json::json;

    fn run(data: &Dataset) -> Bars3D {
        let mapping = AxisMapping::new()
            .with(Role::X, "q")
            .with(Role::Y, "v")
            .with(Role::Z, "r");
        let options = ChartOptions::default();
        let ctx = BuildContext {
            data,
            mapping: &mapping,
            options: &options,
            kind: ChartKind::Bar3d,
        };
        match build_bars3d(&ctx).unwrap() {
            ChartResult::Bars3D(b) => b,
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_bars_grid_and_heights() {
        let data = Dataset::from_json(&json!([
            {"q": "Q1", "r": "N", "v": 10},
            {"q": "Q2", "r": "N", "v": 20},
            {"q": "Q3", "r": "S", "v": 30},
            {"q": "Q1", "r": "S", "v": 20}
        ]))
        .unwrap();
        let out = run(&data);
        assert_eq!(out.bars.len(), 4);

        let first = &out.bars[0];
        assert_eq!(first.position[0], -1.0);
        assert_eq!(first.position[2], -0.5);
        assert_eq!(first.size[1], 0.1);
        assert_eq!(first.position[1], 0.05);
        assert_eq!(first.original_value, 10.0);
        assert_eq!(first.label, "Q1, N: 10");

        assert_eq!(out.bars[2].size[1], 5.0);
        assert_eq!(out.bars[2].position[0], 1.0);

        // Color follows the x category.
        assert_eq!(out.bars[0].color, DEFAULT_PALETTE[0]);
        assert_eq!(out.bars[3].color, DEFAULT_PALETTE[0]);
        assert_eq!(out.bars[1].color, DEFAULT_PALETTE[1]);
    }

    #[test]
    fn test_equal_heights_use_midpoint() {
        let data = Dataset::from_json(&json!([
            {"q": "a", "r": "x", "v": 7},
            {"q": "b", "r": "x", "v": 7}
        ]))
        .unwrap();
        let out = run(&data);
        for bar in &out.bars {
            assert!((bar.size[1] - 2.55).abs() < 1e-12);
        }
    }

    #[test]
    fn test_extreme_heights_stay_finite() {
        let data = Dataset::from_json(&json!([
            {"q": "a", "r": "x", "v": -1e308},
            {"q": "b", "r": "x", "v": 1e308},
            {"q": "c", "r": "x", "v": 0}
        ]))
        .unwrap();
        let out = run(&data);
        let heights: Vec<f64> = out.bars.iter().map(|b| b.size[1]).collect();
        assert_eq!(heights[0], 0.1);
        assert_eq!(heights[1], 5.0);
        assert!((heights[2] - 2.55).abs() < 1e-12);
        assert!(out.axis_labels.y.iter().all(|t| !t.label.contains("NaN")));
    }

    #[test]
    fn test_axis_labels() {
        let data = Dataset::from_json(&json!([
            {"q": "a", "r": "x", "v": 0},
            {"q": "b", "r": "y", "v": 50}
        ]))
        .unwrap();
        let out = run(&data);
        let labels = &out.axis_labels;
        assert_eq!(labels.x.len(), 2);
        assert_eq!(labels.x[1].label, "b");
        assert_eq!(labels.x[1].position, [0.5, 0.0, -1.5]);
        assert_eq!(labels.z[0].position, [-1.5, 0.0, -0.5]);
        let y: Vec<&str> = labels.y.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(y, vec!["0", "10", "20", "30", "40", "50"]);
    }
}
