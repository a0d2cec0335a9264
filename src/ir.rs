use crate::error::{ChartError, ErrorKind};
use crate::palette::Color;
use crate::scale::AxisTick;
use serde::Serialize;

// =============================================================================
// Cosmetic metadata
// =============================================================================

/// Display hints derived from chart options. Never affects data shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayMeta {
    pub show_legend: bool,
    pub animation_ms: u32,
    pub fill: bool,
    pub border_color: String,
    pub dark_mode: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

// =============================================================================
// 2D results
// =============================================================================

/// One named, colored sequence of values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
    pub color: Color,
}

/// Bar, line and area charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalSeries {
    pub labels: Vec<String>,
    pub series: Vec<Series>,
    pub display: DisplayMeta,
}

/// Pie and doughnut charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProportionSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<Color>,
    pub display: DisplayMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointGroup<P> {
    pub name: String,
    pub color: Color,
    pub points: Vec<P>,
}

/// 2D scatter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointGroups {
    pub groups: Vec<PointGroup<Point2>>,
    pub display: DisplayMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarSeries {
    pub labels: Vec<String>,
    pub series: Vec<Series>,
    pub display: DisplayMeta,
}

// =============================================================================
// 3D results
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bar3 {
    /// Center of the box; y is half the height so the base sits on zero.
    pub position: [f64; 3],
    pub size: [f64; 3],
    pub color: Color,
    pub original_value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLabels3 {
    pub x: Vec<AxisTick>,
    pub y: Vec<AxisTick>,
    pub z: Vec<AxisTick>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bars3D {
    pub bars: Vec<Bar3>,
    pub axis_labels: AxisLabels3,
    pub display: DisplayMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis3Config {
    pub label: String,
    pub ticks: Vec<AxisTick>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axes3D {
    pub x: Axis3Config,
    pub y: Axis3Config,
    pub z: Axis3Config,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    /// Coordinates rescaled into the [-5, 5] cube.
    pub position: [f64; 3],
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Points3D {
    pub groups: Vec<PointGroup<Point3>>,
    pub axes: Axes3D,
    pub display: DisplayMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceMesh3D {
    pub vertices: Vec<[f64; 3]>,
    pub faces: Vec<[usize; 3]>,
    pub vertex_colors: Vec<Color>,
    pub axes: Axes3D,
    pub display: DisplayMeta,
}

// =============================================================================
// Result
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResult {
    pub kind: ErrorKind,
    pub message: String,
}

/// Renderer-ready output: exactly one typed success shape, or an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ChartResult {
    #[serde(rename = "categorical")]
    Categorical(CategoricalSeries),
    #[serde(rename = "proportion")]
    Proportion(ProportionSeries),
    #[serde(rename = "pointGroups")]
    PointGroups(PointGroups),
    #[serde(rename = "radar")]
    Radar(RadarSeries),
    #[serde(rename = "bars3d")]
    Bars3D(Bars3D),
    #[serde(rename = "points3d")]
    Points3D(Points3D),
    #[serde(rename = "surface3d")]
    SurfaceMesh3D(SurfaceMesh3D),
    #[serde(rename = "error")]
    Error(ErrorResult),
}

impl ChartResult {
    pub fn is_error(&self) -> bool {
        matches!(self, ChartResult::Error(_))
    }

    pub fn error(&self) -> Option<&ErrorResult> {
        match self {
            ChartResult::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error().map(|e| e.kind)
    }
}

impl From<ChartError> for ChartResult {
    fn from(err: ChartError) -> Self {
        ChartResult::Error(ErrorResult {
            kind: err.kind(),
            message: err.to_string(),
        })
    }
}
