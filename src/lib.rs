// Library exports for chartmap

pub mod builder;
pub mod coerce;
pub mod csv_reader;
pub mod data;
pub mod error;
pub mod index;
pub mod infer;
pub mod ir;
pub mod kind;
pub mod mapping;
pub mod palette;
pub mod parser;
pub mod resolve;
pub mod scale;
pub mod transform;

pub use builder::{build, build_resolved};
pub use data::{CellValue, Dataset};
pub use error::{ChartError, ErrorKind};
pub use ir::{ChartResult, DisplayMeta};
pub use kind::ChartKind;
pub use mapping::{AxisMapping, RawMapping, Role};

use palette::Color;
use serde::Deserialize;

const ANIMATION_MS: u32 = 1000;
const BORDER_LIGHT: &str = "#fff";
const BORDER_DARK: &str = "#374151";

/// Caller options. Only `colors` reaches the data; the rest are display
/// hints carried through to the result.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    #[serde(default)]
    pub colors: Vec<Color>,
    #[serde(default = "default_true")]
    pub show_legend: bool,
    #[serde(default = "default_true")]
    pub animation: bool,
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default)]
    pub title: Option<String>,
    /// Reject non-numeric cells in numeric roles instead of reading them as 0.
    #[serde(default)]
    pub strict_numeric: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            colors: Vec::new(),
            show_legend: true,
            animation: true,
            dark_mode: false,
            title: None,
            strict_numeric: false,
        }
    }
}

impl ChartOptions {
    pub fn display(&self, fill: bool) -> DisplayMeta {
        DisplayMeta {
            show_legend: self.show_legend,
            animation_ms: if self.animation { ANIMATION_MS } else { 0 },
            fill,
            border_color: if self.dark_mode { BORDER_DARK } else { BORDER_LIGHT }.to_string(),
            dark_mode: self.dark_mode,
            title: self.title.clone(),
        }
    }
}
