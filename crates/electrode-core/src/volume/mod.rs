//! Loaded imaging volumes
//!
//! A [`Volume`] is a 3-D intensity array plus the affines that place it in
//! RAS and tkr space. Volumes are read-only once loaded; navigation state
//! lives in [`crate::cursor::CursorSync`].

mod pins;
mod slicer;

pub use pins::{PinBoard, PinDrop, PinVisibility, SeriesChange};
pub use slicer::{slice, Plane, SlicePlanes};

use ndarray::{Array3, Axis};

use crate::transform::AffinePair;
use crate::types::{IVec3, Point3};

/// A loaded 3-D volume with its coordinate transforms
#[derive(Debug, Clone)]
pub struct Volume {
    data: Array3<f32>,
    affines: AffinePair,
}

impl Volume {
    /// Create a volume from intensity data indexed `[x, y, z]`
    pub fn new(data: Array3<f32>, affines: AffinePair) -> Self {
        Self { data, affines }
    }

    /// Intensity data indexed `[x, y, z]`
    pub fn data(&self) -> &Array3<f32> {
        &self.data
    }

    /// Affines attached to this volume
    pub fn affines(&self) -> &AffinePair {
        &self.affines
    }

    /// Extent along each axis
    pub fn shape(&self) -> [usize; 3] {
        let (x, y, z) = self.data.dim();
        [x, y, z]
    }

    /// Check that a voxel lies inside the volume (`0 <= c < extent` per axis)
    pub fn contains(&self, voxel: IVec3) -> bool {
        voxel
            .to_array()
            .iter()
            .zip(self.shape())
            .all(|(&c, extent)| c >= 0 && (c as usize) < extent)
    }

    /// Voxel containing a continuous position
    ///
    /// The raw components must satisfy `0 <= c < extent`; the index is the
    /// floor of each. `None` for out-of-range or non-finite positions.
    pub fn voxel_at(&self, position: Point3) -> Option<IVec3> {
        let inside = position
            .to_array()
            .iter()
            .zip(self.shape())
            .all(|(&c, extent)| c >= 0.0 && c < extent as f64);
        // NaN fails every comparison above
        inside.then(|| position.floor().as_ivec3())
    }

    /// Center voxel (integer half of each extent)
    pub fn center(&self) -> IVec3 {
        let [x, y, z] = self.shape();
        IVec3::new((x / 2) as i32, (y / 2) as i32, (z / 2) as i32)
    }

    /// Intensity at a voxel, `None` outside the volume
    pub fn intensity(&self, voxel: IVec3) -> Option<f32> {
        if !self.contains(voxel) {
            return None;
        }
        Some(self.data[[voxel.x as usize, voxel.y as usize, voxel.z as usize]])
    }

    /// Reorient a scanner-orig volume to standard orientation
    ///
    /// Swaps the second and third axes, flips the new third axis and
    /// reorients both affines to match.
    pub fn reoriented_to_std(self) -> Self {
        let mut data = self.data;
        data.swap_axes(1, 2);
        data.invert_axis(Axis(2));
        Self {
            data: data.as_standard_layout().into_owned(),
            affines: self.affines.reoriented_to_std(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(shape: (usize, usize, usize)) -> Volume {
        let data = Array3::from_shape_fn(shape, |(x, y, z)| (x * 100 + y * 10 + z) as f32);
        Volume::new(data, AffinePair::identity())
    }

    #[test]
    fn test_contains_is_half_open() {
        let volume = ramp((4, 5, 6));
        assert!(volume.contains(IVec3::new(0, 0, 0)));
        assert!(volume.contains(IVec3::new(3, 4, 5)));
        assert!(!volume.contains(IVec3::new(4, 0, 0)));
        assert!(!volume.contains(IVec3::new(0, 5, 0)));
        assert!(!volume.contains(IVec3::new(0, 0, 6)));
        assert!(!volume.contains(IVec3::new(-1, 0, 0)));
    }

    #[test]
    fn test_voxel_at_checks_raw_position() {
        let volume = ramp((10, 10, 10));
        assert_eq!(volume.voxel_at(Point3::new(9.6, 0.0, 0.0)), Some(IVec3::new(9, 0, 0)));
        assert_eq!(volume.voxel_at(Point3::new(0.0, 4.5, 2.2)), Some(IVec3::new(0, 4, 2)));
        assert_eq!(volume.voxel_at(Point3::new(-0.4, 0.0, 0.0)), None);
        assert_eq!(volume.voxel_at(Point3::new(0.0, 10.0, 0.0)), None);
        assert_eq!(volume.voxel_at(Point3::new(f64::NAN, 1.0, 1.0)), None);
        assert_eq!(volume.voxel_at(Point3::new(1.0, f64::INFINITY, 1.0)), None);
    }

    #[test]
    fn test_center_uses_integer_division() {
        assert_eq!(ramp((4, 5, 7)).center(), IVec3::new(2, 2, 3));
    }

    #[test]
    fn test_intensity_lookup() {
        let volume = ramp((4, 5, 6));
        assert_eq!(volume.intensity(IVec3::new(3, 2, 1)), Some(321.0));
        assert_eq!(volume.intensity(IVec3::new(9, 2, 1)), None);
    }

    #[test]
    fn test_reorientation_swaps_and_flips() {
        let volume = ramp((2, 3, 4)).reoriented_to_std();
        assert_eq!(volume.shape(), [2, 4, 3]);
        // new[x, z, ny - 1 - y] == old[x, y, z]
        assert_eq!(volume.intensity(IVec3::new(1, 3, 2)), Some(103.0));
        assert_eq!(volume.intensity(IVec3::new(0, 0, 0)), Some(20.0));
    }
}
