use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported visualization types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Area,
    Pie,
    Doughnut,
    Scatter,
    Radar,
    Bar3d,
    Scatter3d,
    Surface3d,
}

impl ChartKind {
    pub const ALL: [ChartKind; 10] = [
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Area,
        ChartKind::Pie,
        ChartKind::Doughnut,
        ChartKind::Scatter,
        ChartKind::Radar,
        ChartKind::Bar3d,
        ChartKind::Scatter3d,
        ChartKind::Surface3d,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Area => "area",
            ChartKind::Pie => "pie",
            ChartKind::Doughnut => "doughnut",
            ChartKind::Scatter => "scatter",
            ChartKind::Radar => "radar",
            ChartKind::Bar3d => "bar3d",
            ChartKind::Scatter3d => "scatter3d",
            ChartKind::Surface3d => "surface3d",
        }
    }

    pub fn is_3d(self) -> bool {
        matches!(
            self,
            ChartKind::Bar3d | ChartKind::Scatter3d | ChartKind::Surface3d
        )
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ChartKind {
    type Err = anyhow::Error;

    /// Accepts short ids (`bar3d`) and the dimension-prefixed forms
    /// (`2d-bar`, `3d-bar`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        let id = if let Some(rest) = s.strip_prefix("2d-") {
            rest.to_string()
        } else if let Some(rest) = s.strip_prefix("3d-") {
            format!("{}3d", rest)
        } else {
            s
        };

        ChartKind::ALL
            .iter()
            .copied()
            .find(|k| k.id() == id)
            .ok_or_else(|| anyhow::anyhow!("Unknown chart kind '{}'", id))
    }
}
