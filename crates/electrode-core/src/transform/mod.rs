//! Affine mapping between voxel, RAS and tkr spaces
//!
//! Every loaded volume carries an [`AffinePair`]: one 4×4 matrix taking voxel
//! indices to scanner RAS, and one taking them to the tkr (surface) space.
//! Matrices are given row-major, the way they are stored in image headers.
//!
//! All functions here are pure; nothing is cached between calls.

mod error;

pub use error::{TransformError, TransformResult};

use crate::types::{truncate_point, DMat4, Point3, COORD_DISPLAY_PLACES};

/// Fixed reorientation applied to the tkr affine when a volume is
/// reoriented from scanner-orig to standard orientation
pub const TKR_ORIG_TO_STD: [[f64; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, -1.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Offset from the corner of a conformed 256³ volume to its center
const CONFORMED_CENTER: f64 = 128.0;

/// Build a matrix from row-major rows
pub fn matrix_from_rows(rows: [[f64; 4]; 4]) -> DMat4 {
    // glam stores columns, so the row array read as columns is the transpose
    DMat4::from_cols_array_2d(&rows).transpose()
}

/// Apply an affine to a point in homogeneous coordinates
#[inline]
pub fn apply(point: Point3, matrix: &DMat4) -> Point3 {
    matrix.transform_point3(point)
}

/// Invert an affine, rejecting singular matrices
pub fn invert(matrix: &DMat4) -> TransformResult<DMat4> {
    let determinant = matrix.determinant();
    if !determinant.is_finite() || determinant.abs() < f64::EPSILON {
        return Err(TransformError::Singular { determinant });
    }
    Ok(matrix.inverse())
}

/// Map a cursor position through an affine (or its inverse)
///
/// The result is truncated to two decimal places for display and storage.
///
/// # Errors
/// [`TransformError::Singular`] if `invert` is set and the matrix has no
/// inverse. Callers must surface this; the volume cannot be navigated.
pub fn map_cursor(point: Point3, matrix: &DMat4, invert_matrix: bool) -> TransformResult<Point3> {
    let mapped = if invert_matrix {
        apply(point, &invert(matrix)?)
    } else {
        apply(point, matrix)
    };
    Ok(truncate_point(mapped, COORD_DISPLAY_PLACES))
}

/// Reorientation from a scanner-orig volume to standard orientation
///
/// Built from the translation column of the volume's voxel-to-RAS affine.
pub fn orig_to_std(vox2ras: &DMat4) -> DMat4 {
    let t = vox2ras.w_axis;
    matrix_from_rows([
        [1.0, 0.0, 0.0, t.x - CONFORMED_CENTER],
        [0.0, 0.0, -1.0, t.y + CONFORMED_CENTER],
        [0.0, 1.0, 0.0, t.z - CONFORMED_CENTER],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Voxel-to-RAS and voxel-to-tkr affines of one loaded volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffinePair {
    /// Voxel indices to scanner RAS
    pub vox2ras: DMat4,
    /// Voxel indices to tkr surface space
    pub vox2tkr: DMat4,
}

impl AffinePair {
    /// Create a pair from two affines
    pub fn new(vox2ras: DMat4, vox2tkr: DMat4) -> Self {
        Self { vox2ras, vox2tkr }
    }

    /// Create a pair from row-major matrices
    pub fn from_rows(vox2ras: [[f64; 4]; 4], vox2tkr: [[f64; 4]; 4]) -> Self {
        Self::new(matrix_from_rows(vox2ras), matrix_from_rows(vox2tkr))
    }

    /// Identity pair (voxel, RAS and tkr coincide)
    pub fn identity() -> Self {
        Self::new(DMat4::IDENTITY, DMat4::IDENTITY)
    }

    /// Affines for the same volume after reorientation to standard orientation
    pub fn reoriented_to_std(&self) -> Self {
        Self {
            vox2ras: orig_to_std(&self.vox2ras) * self.vox2ras,
            vox2tkr: matrix_from_rows(TKR_ORIG_TO_STD) * self.vox2tkr,
        }
    }

    /// Map a voxel position to RAS (truncated)
    pub fn to_ras(&self, voxel: Point3) -> Point3 {
        truncate_point(apply(voxel, &self.vox2ras), COORD_DISPLAY_PLACES)
    }

    /// Map a voxel position to tkr (truncated)
    pub fn to_tkr(&self, voxel: Point3) -> Point3 {
        truncate_point(apply(voxel, &self.vox2tkr), COORD_DISPLAY_PLACES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_vox2ras() -> DMat4 {
        matrix_from_rows([
            [-1.0, 0.0, 0.0, 128.5],
            [0.0, 0.0, 1.0, -110.25],
            [0.0, -1.0, 0.0, 140.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    fn assert_close(a: Point3, b: Point3, tol: f64) {
        assert!((a - b).abs().max_element() <= tol, "{a} != {b} (tol {tol})");
    }

    #[test]
    fn test_rows_are_row_major() {
        let m = matrix_from_rows([
            [1.0, 0.0, 0.0, 10.0],
            [0.0, 1.0, 0.0, 20.0],
            [0.0, 0.0, 1.0, 30.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        assert_eq!(apply(Point3::ZERO, &m), Point3::new(10.0, 20.0, 30.0));
    }

    #[test]
    fn test_apply_conformed_affine() {
        let p = apply(Point3::new(10.0, 20.0, 30.0), &sample_vox2ras());
        assert_close(p, Point3::new(118.5, -80.25, 120.0), 1e-12);
    }

    #[test]
    fn test_map_cursor_truncates() {
        let m = matrix_from_rows([
            [1.0, 0.0, 0.0, 0.129],
            [0.0, 1.0, 0.0, -0.129],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let p = map_cursor(Point3::new(1.0, 1.0, 1.0), &m, false).unwrap();
        assert_close(p, Point3::new(1.12, 0.87, 1.0), 1e-12);
    }

    #[test]
    fn test_round_trip_within_truncation() {
        let m = sample_vox2ras();
        for p in [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(128.0, 128.0, 128.0),
            Point3::new(17.0, 203.0, 64.0),
        ] {
            let ras = map_cursor(p, &m, false).unwrap();
            let back = map_cursor(ras, &m, true).unwrap();
            assert_close(back, p, 0.02);
        }
    }

    #[test]
    fn test_singular_inverse_is_error() {
        let m = matrix_from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        assert!(map_cursor(Point3::ONE, &m, false).is_ok());
        let err = map_cursor(Point3::ONE, &m, true).unwrap_err();
        assert!(matches!(err, TransformError::Singular { .. }));
    }

    #[test]
    fn test_reorientation_uses_translation() {
        let std = orig_to_std(&sample_vox2ras());
        let expected = matrix_from_rows([
            [1.0, 0.0, 0.0, 0.5],
            [0.0, 0.0, -1.0, 17.75],
            [0.0, 1.0, 0.0, 12.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        assert!(std.abs_diff_eq(expected, 1e-12));
    }

    #[test]
    fn test_identity_pair_maps_to_itself() {
        let pair = AffinePair::identity();
        let p = Point3::new(3.0, 4.0, 5.0);
        assert_eq!(pair.to_ras(p), p);
        assert_eq!(pair.to_tkr(p), p);
    }
}
