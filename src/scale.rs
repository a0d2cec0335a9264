use serde::Serialize;

/// Observed range of a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MinMax {
    pub min: f64,
    pub max: f64,
}

impl MinMax {
    /// Range of `values`, `None` when empty.
    pub fn of(values: &[f64]) -> Option<Self> {
        let mut iter = values.iter().copied();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some(MinMax { min, max })
    }

    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }
}

/// Point at fraction `t` of the way from `start` to `end`. Exact at both
/// ends and finite for any finite inputs.
pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start * (1.0 - t) + end * t
}

/// Fraction of the way `value` lies from `min` to `max`. Operands are
/// halved so a span wider than `f64::MAX` does not overflow.
pub fn fraction(value: f64, min: f64, max: f64) -> f64 {
    (value / 2.0 - min / 2.0) / (max / 2.0 - min / 2.0)
}

/// Rescale one value from `[min, max]` into `[target_min, target_max]`.
/// A degenerate source range maps everything to the target midpoint.
pub fn normalize_value(value: f64, min: f64, max: f64, target_min: f64, target_max: f64) -> f64 {
    if min == max {
        return (target_min + target_max) / 2.0;
    }
    lerp(target_min, target_max, fraction(value, min, max))
}

/// Rescale every value from `[min, max]` into `[target_min, target_max]`.
pub fn normalize(values: &[f64], min: f64, max: f64, target_min: f64, target_max: f64) -> Vec<f64> {
    values
        .iter()
        .map(|&v| normalize_value(v, min, max, target_min, target_max))
        .collect()
}

/// Normalize `values` against their own observed range.
pub fn normalize_observed(values: &[f64], target_min: f64, target_max: f64) -> Vec<f64> {
    match MinMax::of(values) {
        Some(mm) => normalize(values, mm.min, mm.max, target_min, target_max),
        None => Vec::new(),
    }
}

/// Half-width of the cube 3D point clouds and surfaces are placed in.
pub const SPACE_EXTENT: f64 = 5.0;

const TICK_STOPS: [f64; 5] = [-5.0, -2.5, 0.0, 2.5, 5.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis3 {
    X,
    Y,
    Z,
}

/// A labelled tick mark in 3D space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTick {
    pub position: [f64; 3],
    pub label: String,
}

/// Ticks for one axis of the `[-5, 5]` cube, labelled with the raw data
/// value each stop corresponds to. Ticks run along the cube's back edge.
pub fn cube_ticks(axis: Axis3, range: MinMax) -> Vec<AxisTick> {
    let edge = -SPACE_EXTENT;
    TICK_STOPS
        .iter()
        .map(|&v| {
            let position = match axis {
                Axis3::X => [v, edge, edge],
                Axis3::Y => [edge, v, edge],
                Axis3::Z => [edge, edge, v],
            };
            let raw = lerp(range.min, range.max, (v + SPACE_EXTENT) / (2.0 * SPACE_EXTENT));
            AxisTick {
                position,
                label: format_tick(raw),
            }
        })
        .collect()
}

/// Tick labels are whole numbers.
pub fn format_tick(value: f64) -> String {
    let rounded = value.round();
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{}", rounded)
    }
}
