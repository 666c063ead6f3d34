//! Location of a missing contact from its grid neighbors
//!
//! Strategies are tried in a fixed order and the first that applies wins:
//!
//! 1. bracketed along x (a neighbor on each side)
//! 2. bracketed along y
//! 3. extrapolated past the edge: x-low, x-high, y-low, y-high
//!
//! Bracketing is preferred over extrapolation, and x over y.

use electrode_core::Point3;

use crate::error::{GridError, GridResult};
use crate::neighbor::{Direction, GridAxis};
use crate::record::{ElectrodeRecord, GridCoordinate};
use crate::registry::{GridRegistry, RecordId};

const EDGES: [(GridAxis, Direction); 4] = [
    (GridAxis::X, Direction::Minus),
    (GridAxis::X, Direction::Plus),
    (GridAxis::Y, Direction::Minus),
    (GridAxis::Y, Direction::Plus),
];

impl GridRegistry {
    /// Compute and store the location of a contact from its neighbors
    ///
    /// On success the record's location is set and it is marked as
    /// interpolated. On failure the record is left untouched.
    ///
    /// # Errors
    /// - [`GridError::MissingGridCoordinate`] if the record has no coordinate
    /// - [`GridError::NoInterpolationPath`] if no strategy applies
    pub fn interpolate(&mut self, id: RecordId) -> GridResult<Point3> {
        let location = self.interpolated_location(self.record(id)?)?;

        let record = self.record_mut(id)?;
        record.physical_location = Some(location);
        record.is_interpolated = true;

        log::debug!("interpolate: {} placed at {}", id, location);
        Ok(location)
    }

    /// Compute where a contact should be without storing it
    pub fn interpolated_location(&self, target: &ElectrodeRecord) -> GridResult<Point3> {
        let origin = target
            .grid_coordinate
            .ok_or_else(|| GridError::MissingGridCoordinate {
                label: target.display_name(),
            })?;

        GridAxis::BOTH
            .into_iter()
            .find_map(|axis| self.bracketed(target, origin, axis))
            .or_else(|| {
                EDGES
                    .into_iter()
                    .find_map(|(axis, direction)| self.extrapolated(target, axis, direction))
            })
            .ok_or_else(|| GridError::NoInterpolationPath {
                label: target.display_name(),
            })
    }

    /// Linear interpolation between the nearest neighbors on both sides
    fn bracketed(&self, target: &ElectrodeRecord, origin: GridCoordinate, axis: GridAxis) -> Option<Point3> {
        let (_, low) = self.find_closest_neighbor(target, axis, Direction::Minus)?;
        let (_, high) = self.find_closest_neighbor(target, axis, Direction::Plus)?;

        let lo = f64::from(axis.along(low.grid_coordinate?));
        let hi = f64::from(axis.along(high.grid_coordinate?));
        let ratio = (f64::from(axis.along(origin)) - lo) / (hi - lo);

        let low_location = low.physical_location?;
        let high_location = high.physical_location?;
        Some(low_location + (high_location - low_location) * ratio)
    }

    /// Extend the line through the nearest neighbor and the contact one step
    /// past it
    fn extrapolated(&self, target: &ElectrodeRecord, axis: GridAxis, direction: Direction) -> Option<Point3> {
        let (_, near) = self.find_closest_neighbor(target, axis, direction)?;
        let (_, far) = self.find_closest_neighbor(near, axis, direction)?;

        let near_index = i64::from(axis.along(near.grid_coordinate?));
        let far_index = i64::from(axis.along(far.grid_coordinate?));
        if far_index - near_index != i64::from(direction.step()) {
            return None;
        }

        Some(near.physical_location? * 2.0 - far.physical_location?)
    }
}
