//! Common types for electrode localization
//!
//! Points are `f64` throughout; voxel indices are `IVec3` so that
//! out-of-range (negative) clicks can be represented and rejected.

pub use glam::{DMat4, DVec3, IVec3};

/// A point in voxel, RAS, tkr or surface space
pub type Point3 = DVec3;

/// Decimal places used for displayed coordinates
pub const COORD_DISPLAY_PLACES: u32 = 2;

/// Decimal places used for displayed intensities
pub const INTENSITY_DISPLAY_PLACES: u32 = 3;

/// Truncate a value toward zero to a fixed number of decimal places
///
/// # Example
/// ```
/// use electrode_core::truncate;
///
/// assert_eq!(truncate(1.23456, 2), 1.23);
/// assert_eq!(truncate(-1.23456, 2), -1.23);
/// ```
#[inline]
pub fn truncate(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    (value * scale).trunc() / scale
}

/// Truncate every component of a point
#[inline]
pub fn truncate_point(point: Point3, places: u32) -> Point3 {
    Point3::new(
        truncate(point.x, places),
        truncate(point.y, places),
        truncate(point.z, places),
    )
}

/// Round a point to the nearest voxel index
#[inline]
pub fn nearest_voxel(point: Point3) -> IVec3 {
    point.round().as_ivec3()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_is_toward_zero() {
        assert_eq!(truncate(2.999, 2), 2.99);
        assert_eq!(truncate(-2.999, 2), -2.99);
        assert_eq!(truncate(7.0, 3), 7.0);
    }

    #[test]
    fn test_truncate_point() {
        let p = truncate_point(Point3::new(1.005, -3.14159, 10.0), 2);
        assert_eq!(p, Point3::new(1.0, -3.14, 10.0));
    }

    #[test]
    fn test_nearest_voxel_rounds() {
        assert_eq!(nearest_voxel(Point3::new(1.4, 1.6, -0.6)), IVec3::new(1, 2, -1));
    }
}
