//! Grid geometry fitting seam
//!
//! Assigning lattice coordinates from three corner contacts is done by an
//! external fitting routine. The labeling code only needs its contract:
//! given the records of one grid, the corner locations and the target
//! geometry, fill in every record's grid coordinate or fail.

use serde::{Deserialize, Serialize};

use electrode_core::Point3;

use crate::record::ElectrodeRecord;

/// Shape of the grid being fitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridGeometry {
    /// Rectangular array of `rows × cols` contacts
    Grid { rows: u32, cols: u32 },
    /// Strip or depth electrode with `contacts` in a row
    Line { contacts: u32 },
    /// Shape not known yet; only line fits can proceed
    UserDefined,
}

impl GridGeometry {
    /// Smaller and larger dimension, if known
    pub fn extents(&self) -> Option<(u32, u32)> {
        match *self {
            GridGeometry::Grid { rows, cols } => Some((rows.min(cols), rows.max(cols))),
            GridGeometry::Line { contacts } => Some((1, contacts)),
            GridGeometry::UserDefined => None,
        }
    }
}

/// Tolerances used by line fits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineFitParams {
    /// Allowed deviation from the fitted line, as a fraction of spacing
    /// Default: 0.35
    pub delta: f64,
    /// Loose bound on contact spacing in mm
    /// Default: 50.0
    pub rho_loose: f64,
}

impl Default for LineFitParams {
    fn default() -> Self {
        Self {
            delta: 0.35,
            rho_loose: 50.0,
        }
    }
}

/// Locations of the three anchor corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerLocations {
    pub first: Point3,
    pub second: Point3,
    pub third: Point3,
}

/// External routine that assigns grid coordinates
pub trait GridGeometryFitter {
    /// Fit records to a line (strip or depth electrode)
    fn fit_to_line(
        &self,
        records: &mut [ElectrodeRecord],
        corners: &CornerLocations,
        geometry: GridGeometry,
        params: &LineFitParams,
    ) -> anyhow::Result<()>;

    /// Fit records to a plane (grid array)
    fn fit_to_plane(
        &self,
        records: &mut [ElectrodeRecord],
        corners: &CornerLocations,
        geometry: GridGeometry,
    ) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extents_order() {
        assert_eq!(GridGeometry::Grid { rows: 8, cols: 4 }.extents(), Some((4, 8)));
        assert_eq!(GridGeometry::Grid { rows: 2, cols: 6 }.extents(), Some((2, 6)));
        assert_eq!(GridGeometry::Line { contacts: 10 }.extents(), Some((1, 10)));
        assert_eq!(GridGeometry::UserDefined.extents(), None);
    }
}
