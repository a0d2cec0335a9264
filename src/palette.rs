//! Color allocation for series, categories and surface heights.

use crate::scale::fraction;
use plotters::style::{Color as _, HSLColor};

pub type Color = String;

/// The one default palette. Nothing else in the crate hardcodes colors for
/// data series.
pub const DEFAULT_PALETTE: [&str; 10] = [
    "rgba(255, 99, 132, 0.7)",
    "rgba(54, 162, 235, 0.7)",
    "rgba(255, 206, 86, 0.7)",
    "rgba(75, 192, 192, 0.7)",
    "rgba(153, 102, 255, 0.7)",
    "rgba(255, 159, 64, 0.7)",
    "rgba(199, 199, 199, 0.7)",
    "rgba(83, 102, 255, 0.7)",
    "rgba(40, 159, 64, 0.7)",
    "rgba(210, 199, 199, 0.7)",
];

/// Color of the `index`-th series or category.
///
/// User colors are used in order and never repeated; once they run out the
/// default palette takes over, cycling on the absolute index.
pub fn color_for(index: usize, user_colors: &[Color], default_palette: &[&str]) -> Color {
    if let Some(c) = user_colors.get(index) {
        return c.clone();
    }
    if default_palette.is_empty() {
        return DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()].to_string();
    }
    default_palette[index % default_palette.len()].to_string()
}

/// Allocator bound to one set of user colors.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette<'a> {
    user_colors: &'a [Color],
    defaults: &'a [&'a str],
}

impl<'a> ColorPalette<'a> {
    pub fn new(user_colors: &'a [Color]) -> Self {
        Self {
            user_colors,
            defaults: &DEFAULT_PALETTE,
        }
    }

    pub fn color(&self, index: usize) -> Color {
        color_for(index, self.user_colors, self.defaults)
    }

    pub fn colors(&self, count: usize) -> Vec<Color> {
        (0..count).map(|i| self.color(i)).collect()
    }
}

const HUE_LOW: f64 = 0.7;
const SATURATION: f64 = 0.8;
const LIGHTNESS: f64 = 0.5;

/// Hex color for a height in `[min, max]`: blue at the bottom sweeping to
/// red at the top. Values outside the range are clamped.
pub fn height_color(height: f64, min: f64, max: f64) -> Color {
    let t = if max > min {
        fraction(height, min, max).clamp(0.0, 1.0)
    } else {
        0.5
    };
    let hue = HUE_LOW - t * HUE_LOW;
    let (r, g, b) = HSLColor(hue, SATURATION, LIGHTNESS).to_backend_color().rgb;
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}
