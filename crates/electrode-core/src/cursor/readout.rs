//! Display readouts published by the cursor controller

use crate::types::Point3;

/// Coordinate spaces the cursor can be edited in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinateSpace {
    Voxel,
    Ras,
    Tkr,
}

/// Readout fields that change when the cursor or mouse moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadoutField {
    CursorVoxel,
    CursorRas,
    CursorTkr,
    CursorIntensity,
    Mouse,
    Slices,
    Pins,
}

impl ReadoutField {
    /// The cursor field showing a coordinate space
    pub fn cursor(space: CoordinateSpace) -> Self {
        match space {
            CoordinateSpace::Voxel => ReadoutField::CursorVoxel,
            CoordinateSpace::Ras => ReadoutField::CursorRas,
            CoordinateSpace::Tkr => ReadoutField::CursorTkr,
        }
    }
}

/// Which cursor representations a move should leave untouched
///
/// An edit arriving from one representation suppresses republishing that
/// same representation, so its change handler does not fire again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Suppress {
    pub cursor: bool,
    pub ras: bool,
    pub tkr: bool,
}

impl Suppress {
    /// Publish every representation
    pub const NONE: Suppress = Suppress { cursor: false, ras: false, tkr: false };

    /// Suppress only the representation belonging to `space`
    pub fn only(space: CoordinateSpace) -> Self {
        Self {
            cursor: space == CoordinateSpace::Voxel,
            ras: space == CoordinateSpace::Ras,
            tkr: space == CoordinateSpace::Tkr,
        }
    }

    /// Whether `space` is suppressed
    pub fn contains(&self, space: CoordinateSpace) -> bool {
        match space {
            CoordinateSpace::Voxel => self.cursor,
            CoordinateSpace::Ras => self.ras,
            CoordinateSpace::Tkr => self.tkr,
        }
    }
}

/// Published cursor or mouse position in all three spaces
///
/// Coordinates are truncated to two decimals, intensity to three.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Readout {
    pub voxel: Point3,
    pub ras: Point3,
    pub tkr: Point3,
    pub intensity: f64,
}

impl Readout {
    /// The published coordinate for a space
    pub fn position(&self, space: CoordinateSpace) -> Point3 {
        match space {
            CoordinateSpace::Voxel => self.voxel,
            CoordinateSpace::Ras => self.ras,
            CoordinateSpace::Tkr => self.tkr,
        }
    }

    pub(crate) fn set_position(&mut self, space: CoordinateSpace, value: Point3) {
        match space {
            CoordinateSpace::Voxel => self.voxel = value,
            CoordinateSpace::Ras => self.ras = value,
            CoordinateSpace::Tkr => self.tkr = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suppress_only_one_space() {
        let s = Suppress::only(CoordinateSpace::Ras);
        assert!(s.contains(CoordinateSpace::Ras));
        assert!(!s.contains(CoordinateSpace::Tkr));
        assert!(!s.contains(CoordinateSpace::Voxel));
        assert_eq!(Suppress::default(), Suppress::NONE);
    }
}
