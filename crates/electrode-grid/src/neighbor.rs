//! Nearest labeled neighbor along a grid axis

use crate::record::{ElectrodeRecord, GridCoordinate};
use crate::registry::{GridRegistry, RecordId};

/// Lattice axis of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridAxis {
    X,
    Y,
}

impl GridAxis {
    pub const BOTH: [GridAxis; 2] = [GridAxis::X, GridAxis::Y];

    /// Coordinate along this axis
    pub fn along(self, coordinate: GridCoordinate) -> i32 {
        match self {
            GridAxis::X => coordinate.x,
            GridAxis::Y => coordinate.y,
        }
    }

    /// Coordinate on the other axis
    pub fn across(self, coordinate: GridCoordinate) -> i32 {
        match self {
            GridAxis::X => coordinate.y,
            GridAxis::Y => coordinate.x,
        }
    }
}

/// Search direction along an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward lower coordinates
    Minus,
    /// Toward higher coordinates
    Plus,
}

impl Direction {
    /// Signed unit step in this direction
    pub fn step(self) -> i32 {
        match self {
            Direction::Minus => -1,
            Direction::Plus => 1,
        }
    }

    /// Whether `candidate` lies strictly beyond `origin` in this direction
    pub fn is_beyond(self, candidate: i32, origin: i32) -> bool {
        match self {
            Direction::Minus => candidate < origin,
            Direction::Plus => candidate > origin,
        }
    }
}

impl GridRegistry {
    /// Find the nearest record beyond `target` along an axis
    ///
    /// Only records of the target's grid that carry a grid coordinate are
    /// considered, and only those in the same row (for `X`) or column (for
    /// `Y`). Returns `None` if the target has no coordinate or nothing
    /// qualifies.
    pub fn find_closest_neighbor(
        &self,
        target: &ElectrodeRecord,
        axis: GridAxis,
        direction: Direction,
    ) -> Option<(RecordId, &ElectrodeRecord)> {
        let origin = target.grid_coordinate?;

        self.grid(&target.grid_name)
            .filter_map(|(id, record)| record.grid_coordinate.map(|c| (id, record, c)))
            .filter(|(_, _, c)| axis.across(*c) == axis.across(origin))
            .filter(|(_, _, c)| direction.is_beyond(axis.along(*c), axis.along(origin)))
            .min_by_key(|(_, _, c)| (i64::from(axis.along(*c)) - i64::from(axis.along(origin))).abs())
            .map(|(id, record, _)| (id, record))
    }
}
