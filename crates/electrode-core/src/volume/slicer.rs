//! Orthogonal slicing through a volume
//!
//! Each plane is returned transposed for display: rows run along the second
//! in-plane axis, so `xy` has shape `(ny, nx)`, `xz` is `(nz, nx)` and `yz`
//! is `(nz, ny)`.

use ndarray::{Array2, Array3, Axis};

use crate::types::{nearest_voxel, Point3};

/// One of the three orthogonal viewing planes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Plane {
    /// Axial: fixed z
    Xy,
    /// Coronal: fixed y
    Xz,
    /// Sagittal: fixed x
    Yz,
}

impl Plane {
    /// All planes in display order
    pub const ALL: [Plane; 3] = [Plane::Xy, Plane::Xz, Plane::Yz];

    /// Index of the axis orthogonal to this plane
    pub fn normal_axis(self) -> usize {
        match self {
            Plane::Xy => 2,
            Plane::Xz => 1,
            Plane::Yz => 0,
        }
    }

    /// Project a 3-D point onto this plane's two in-plane coordinates
    pub fn project(self, point: Point3) -> [f64; 2] {
        match self {
            Plane::Xy => [point.x, point.y],
            Plane::Xz => [point.x, point.z],
            Plane::Yz => [point.y, point.z],
        }
    }

    /// Short display name
    pub fn name(self) -> &'static str {
        match self {
            Plane::Xy => "xy",
            Plane::Xz => "xz",
            Plane::Yz => "yz",
        }
    }
}

/// The three cross-sections through a cursor
#[derive(Debug, Clone, PartialEq)]
pub struct SlicePlanes {
    pub xy: Array2<f32>,
    pub xz: Array2<f32>,
    pub yz: Array2<f32>,
}

impl SlicePlanes {
    /// Get the cut for a plane
    pub fn get(&self, plane: Plane) -> &Array2<f32> {
        match plane {
            Plane::Xy => &self.xy,
            Plane::Xz => &self.xz,
            Plane::Yz => &self.yz,
        }
    }
}

/// Cut the three orthogonal planes through a cursor
///
/// The cursor is rounded to the nearest voxel first.
///
/// # Panics
/// If the rounded cursor is outside the volume. Bounds are the caller's
/// responsibility; [`crate::cursor::CursorSync`] validates before slicing.
pub fn slice(data: &Array3<f32>, cursor: Point3) -> SlicePlanes {
    let voxel = nearest_voxel(cursor);
    let (x, y, z) = (voxel.x as usize, voxel.y as usize, voxel.z as usize);

    SlicePlanes {
        xy: data.index_axis(Axis(2), z).t().to_owned(),
        xz: data.index_axis(Axis(1), y).t().to_owned(),
        yz: data.index_axis(Axis(0), x).t().to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Array3<f32> {
        Array3::from_shape_fn((3, 4, 5), |(x, y, z)| (x * 100 + y * 10 + z) as f32)
    }

    #[test]
    fn test_plane_shapes_are_transposed() {
        let planes = slice(&ramp(), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(planes.xy.dim(), (4, 3));
        assert_eq!(planes.xz.dim(), (5, 3));
        assert_eq!(planes.yz.dim(), (5, 4));
    }

    #[test]
    fn test_planes_pass_through_cursor() {
        let planes = slice(&ramp(), Point3::new(1.0, 2.0, 3.0));
        // [row, col] = [second axis, first axis]
        assert_eq!(planes.xy[[2, 1]], 123.0);
        assert_eq!(planes.xz[[3, 1]], 123.0);
        assert_eq!(planes.yz[[3, 2]], 123.0);
        // xy holds z fixed
        assert!(planes.xy.iter().all(|v| (*v as i32) % 10 == 3));
        // yz holds x fixed
        assert!(planes.yz.iter().all(|v| (*v as i32) / 100 == 1));
    }

    #[test]
    fn test_fractional_cursor_rounds() {
        let exact = slice(&ramp(), Point3::new(2.0, 1.0, 4.0));
        let fuzzy = slice(&ramp(), Point3::new(1.6, 0.51, 3.7));
        assert_eq!(exact, fuzzy);
    }

    #[test]
    fn test_plane_projection() {
        let p = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(Plane::Xy.project(p), [1.0, 2.0]);
        assert_eq!(Plane::Xz.project(p), [1.0, 3.0]);
        assert_eq!(Plane::Yz.project(p), [2.0, 3.0]);
        assert_eq!(Plane::Xz.normal_axis(), 1);
    }
}
