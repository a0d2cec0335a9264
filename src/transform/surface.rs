//! Height surfaces. Scattered (x, z) -> y samples are snapped onto the
//! grid spanned by their distinct x and z values and triangulated.
//!
//! Cells without a sample sit at height 0. When two rows land on the same
//! cell the later row overwrites the earlier one.

use super::{cube_axes, BuildContext, KindSpec};
use crate::coerce::column_values;
use crate::ir::{ChartResult, SurfaceMesh3D};
use crate::kind::ChartKind;
use crate::mapping::Role;
use crate::palette::{height_color, Color};
use crate::scale::{normalize_observed, SPACE_EXTENT};
use anyhow::{bail, Result};
use std::cmp::Ordering;

pub static SURFACE3D: KindSpec = KindSpec {
    kind: ChartKind::Surface3d,
    required: &[Role::X, Role::Y, Role::Z],
    optional: &[],
    numeric: &[Role::X, Role::Y, Role::Z],
    build: build_surface,
};

/// Dense `nx * nz` height grid, stored row-major (`i * nz + j`).
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceGrid {
    xs: Vec<f64>,
    zs: Vec<f64>,
    heights: Vec<f64>,
}

fn distinct_sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    out.dedup();
    out
}

fn grid_index(axis: &[f64], value: f64) -> Option<usize> {
    axis.binary_search_by(|probe| probe.partial_cmp(&value).unwrap_or(Ordering::Less))
        .ok()
}

impl SurfaceGrid {
    /// Build the grid from parallel sample columns. Samples are written
    /// in order.
    pub fn from_samples(xs: &[f64], ys: &[f64], zs: &[f64]) -> Result<Self> {
        if xs.len() != ys.len() || xs.len() != zs.len() {
            bail!(
                "sample columns differ in length ({}, {}, {})",
                xs.len(),
                ys.len(),
                zs.len()
            );
        }

        let grid_x = distinct_sorted(xs);
        let grid_z = distinct_sorted(zs);
        let mut heights = vec![0.0; grid_x.len() * grid_z.len()];

        for ((&x, &y), &z) in xs.iter().zip(ys).zip(zs) {
            let (Some(i), Some(j)) = (grid_index(&grid_x, x), grid_index(&grid_z, z)) else {
                bail!("sample ({}, {}) is off the grid", x, z);
            };
            heights[i * grid_z.len() + j] = y;
        }

        Ok(SurfaceGrid {
            xs: grid_x,
            zs: grid_z,
            heights,
        })
    }

    pub fn nx(&self) -> usize {
        self.xs.len()
    }

    pub fn nz(&self) -> usize {
        self.zs.len()
    }

    pub fn height(&self, i: usize, j: usize) -> f64 {
        self.heights[i * self.nz() + j]
    }

    pub fn vertices(&self) -> Vec<[f64; 3]> {
        let mut out = Vec::with_capacity(self.heights.len());
        for (i, &x) in self.xs.iter().enumerate() {
            for (j, &z) in self.zs.iter().enumerate() {
                out.push([x, self.height(i, j), z]);
            }
        }
        out
    }

    /// Two triangles per grid cell: (tl, bl, br) and (tl, br, tr).
    pub fn faces(&self) -> Vec<[usize; 3]> {
        let nz = self.nz();
        let mut out = Vec::with_capacity(2 * self.nx().saturating_sub(1) * nz.saturating_sub(1));
        for i in 0..self.nx().saturating_sub(1) {
            for j in 0..nz.saturating_sub(1) {
                let top_left = i * nz + j;
                let top_right = top_left + 1;
                let bottom_left = (i + 1) * nz + j;
                let bottom_right = bottom_left + 1;
                out.push([top_left, bottom_left, bottom_right]);
                out.push([top_left, bottom_right, top_right]);
            }
        }
        out
    }

    pub fn vertex_colors(&self) -> Vec<Color> {
        self.heights
            .iter()
            .map(|&h| height_color(h, -SPACE_EXTENT, SPACE_EXTENT))
            .collect()
    }
}

fn build_surface(ctx: &BuildContext<'_>) -> Result<ChartResult> {
    let (x_col, y_col, z_col) = (
        ctx.column(Role::X)?,
        ctx.column(Role::Y)?,
        ctx.column(Role::Z)?,
    );
    let xs = column_values(ctx.data, x_col);
    let ys = column_values(ctx.data, y_col);
    let zs = column_values(ctx.data, z_col);

    let grid = SurfaceGrid::from_samples(
        &normalize_observed(&xs, -SPACE_EXTENT, SPACE_EXTENT),
        &normalize_observed(&ys, -SPACE_EXTENT, SPACE_EXTENT),
        &normalize_observed(&zs, -SPACE_EXTENT, SPACE_EXTENT),
    )?;
    log::debug!("surface grid {}x{}", grid.nx(), grid.nz());

    Ok(ChartResult::SurfaceMesh3D(SurfaceMesh3D {
        vertices: grid.vertices(),
        faces: grid.faces(),
        vertex_colors: grid.vertex_colors(),
        axes: cube_axes([(x_col, &xs), (y_col, &ys), (z_col, &zs)]),
        display: ctx.display(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;
    use crate::mapping::AxisMapping;
    use crate::ChartOptions;
    use serde_json::json;

    #[test]
    fn test_face_count() {
        // 3 distinct x, 4 distinct z.
        let mut xs = Vec::new();
        let mut zs = Vec::new();
        for i in 0..3 {
            for j in 0..4 {
                xs.push(i as f64);
                zs.push(j as f64);
            }
        }
        let ys = vec![1.0; xs.len()];
        let grid = SurfaceGrid::from_samples(&xs, &ys, &zs).unwrap();
        assert_eq!(grid.nx(), 3);
        assert_eq!(grid.nz(), 4);
        assert_eq!(grid.vertices().len(), 12);
        assert_eq!(grid.faces().len(), 2 * 2 * 3);
        assert_eq!(grid.vertex_colors().len(), 12);
    }

    #[test]
    fn test_last_write_wins_and_missing_cells() {
        let xs = [0.0, 1.0, 0.0];
        let zs = [0.0, 1.0, 0.0];
        let ys = [3.0, 4.0, 9.0];
        let grid = SurfaceGrid::from_samples(&xs, &ys, &zs).unwrap();
        assert_eq!(grid.height(0, 0), 9.0);
        assert_eq!(grid.height(1, 1), 4.0);
        assert_eq!(grid.height(0, 1), 0.0);
        assert_eq!(grid.height(1, 0), 0.0);
    }

    #[test]
    fn test_face_winding_row_major() {
        let grid = SurfaceGrid::from_samples(&[0.0, 1.0], &[0.0, 0.0], &[0.0, 1.0]).unwrap();
        assert_eq!(grid.faces(), vec![[0, 2, 3], [0, 3, 1]]);
        let vertices = grid.vertices();
        assert_eq!(vertices[1], [0.0, 0.0, 1.0]);
        assert_eq!(vertices[2], [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_single_line_has_no_faces() {
        let grid = SurfaceGrid::from_samples(&[0.0, 0.0], &[1.0, 2.0], &[0.0, 1.0]).unwrap();
        assert_eq!(grid.nx(), 1);
        assert!(grid.faces().is_empty());
        assert_eq!(grid.vertices().len(), 2);
    }

    #[test]
    fn test_mismatched_columns() {
        assert!(SurfaceGrid::from_samples(&[0.0], &[], &[0.0]).is_err());
    }

    #[test]
    fn test_build_surface_normalizes() {
        let data = Dataset::from_json(&json!([
            {"x": 0, "z": 0, "h": 0},
            {"x": 10, "z": 0, "h": 5},
            {"x": 0, "z": 20, "h": 5},
            {"x": 10, "z": 20, "h": 10}
        ]))
        .unwrap();
        let mapping = AxisMapping::new()
            .with(Role::X, "x")
            .with(Role::Y, "h")
            .with(Role::Z, "z");
        let options = ChartOptions::default();
        let ctx = BuildContext {
            data: &data,
            mapping: &mapping,
            options: &options,
            kind: ChartKind::Surface3d,
        };
        match build_surface(&ctx).unwrap() {
            ChartResult::SurfaceMesh3D(mesh) => {
                assert_eq!(mesh.vertices.len(), 4);
                assert_eq!(mesh.faces.len(), 2);
                assert_eq!(mesh.vertices[0], [-5.0, -5.0, -5.0]);
                assert_eq!(mesh.vertices[3], [5.0, 5.0, 5.0]);
                assert_eq!(mesh.vertices[1][1], 0.0);
                assert_ne!(mesh.vertex_colors[0], mesh.vertex_colors[3]);
                assert_eq!(mesh.axes.y.label, "h");
                assert_eq!(mesh.axes.x.ticks[4].label, "10");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }
}
