//! Owned collection of electrode records
//!
//! All record mutation goes through [`GridRegistry`] so the one-contact-per-
//! coordinate rule of each grid is checked in a single place.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use electrode_core::Point3;

use crate::error::{GridError, GridResult};
use crate::record::{Corner, ElectrodeRecord, GridCoordinate};

/// Stable handle to a record in a [`GridRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Every electrode record of the session, across all grids
#[derive(Debug, Clone, Default)]
pub struct GridRegistry {
    records: BTreeMap<RecordId, ElectrodeRecord>,
    next_id: u64,
}

impl GridRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record
    ///
    /// # Errors
    /// [`GridError::DuplicateGridCoordinate`] if its grid already has a
    /// contact at the record's coordinate.
    pub fn insert(&mut self, record: ElectrodeRecord) -> GridResult<RecordId> {
        if let Some(coordinate) = record.grid_coordinate {
            self.ensure_vacant(&record.grid_name, coordinate, None)?;
        }

        let id = RecordId(self.next_id);
        self.next_id += 1;
        self.records.insert(id, record);
        Ok(id)
    }

    /// Remove a record, returning it
    pub fn remove(&mut self, id: RecordId) -> Option<ElectrodeRecord> {
        self.records.remove(&id)
    }

    pub fn get(&self, id: RecordId) -> Option<&ElectrodeRecord> {
        self.records.get(&id)
    }

    /// All records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &ElectrodeRecord)> {
        self.records.iter().map(|(id, record)| (*id, record))
    }

    /// Records belonging to one grid
    pub fn grid(&self, grid_name: &str) -> impl Iterator<Item = (RecordId, &ElectrodeRecord)> {
        let grid_name = grid_name.to_string();
        self.iter().filter(move |(_, record)| record.grid_name == grid_name)
    }

    /// Names of all grids with at least one record
    pub fn grid_names(&self) -> BTreeSet<&str> {
        self.records.values().map(|r| r.grid_name.as_str()).collect()
    }

    /// The record occupying a coordinate of a grid
    pub fn occupant(&self, grid_name: &str, coordinate: GridCoordinate) -> Option<RecordId> {
        self.grid(grid_name)
            .find(|(_, record)| record.grid_coordinate == Some(coordinate))
            .map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Mutation
    // ═══════════════════════════════════════════════════════════════════════

    /// Assign (or clear) a record's grid coordinate
    pub fn assign_grid_coordinate(
        &mut self,
        id: RecordId,
        coordinate: Option<GridCoordinate>,
    ) -> GridResult<()> {
        let record = self.record(id)?;
        if let Some(coordinate) = coordinate {
            self.ensure_vacant(&record.grid_name, coordinate, Some(id))?;
        }
        self.record_mut(id)?.grid_coordinate = coordinate;
        Ok(())
    }

    /// Rename a record's channel
    pub fn set_label(&mut self, id: RecordId, label: impl Into<String>) -> GridResult<()> {
        self.record_mut(id)?.label = label.into();
        Ok(())
    }

    /// Place a record at an observed location
    pub fn set_location(&mut self, id: RecordId, location: Point3) -> GridResult<()> {
        let record = self.record_mut(id)?;
        record.physical_location = Some(location);
        record.is_interpolated = false;
        Ok(())
    }

    /// Replace a record's corner tags
    pub fn set_corners(&mut self, id: RecordId, corners: Vec<Corner>) -> GridResult<()> {
        self.record_mut(id)?.corners = corners;
        Ok(())
    }

    /// Store atlas regions looked up for a record
    pub fn set_roi_labels(&mut self, id: RecordId, roi_labels: Vec<String>) -> GridResult<()> {
        self.record_mut(id)?.roi_labels = roi_labels;
        Ok(())
    }

    /// Exchange grid coordinate and label between two records
    ///
    /// Returns `Ok(false)` without changes when either id is missing or
    /// unknown, or both name the same record.
    ///
    /// # Errors
    /// [`GridError::DuplicateGridCoordinate`] when the records belong to
    /// different grids and either coordinate is already taken in the other.
    pub fn swap(&mut self, a: Option<RecordId>, b: Option<RecordId>) -> GridResult<bool> {
        let (Some(a), Some(b)) = (a, b) else {
            return Ok(false);
        };
        if a == b {
            return Ok(false);
        }
        let (Some(first), Some(second)) = (self.records.get(&a), self.records.get(&b)) else {
            return Ok(false);
        };

        if first.grid_name != second.grid_name {
            if let Some(coordinate) = second.grid_coordinate {
                self.ensure_vacant(&first.grid_name, coordinate, Some(a))?;
            }
            if let Some(coordinate) = first.grid_coordinate {
                self.ensure_vacant(&second.grid_name, coordinate, Some(b))?;
            }
        }

        let first_coordinate = first.grid_coordinate;
        let first_label = first.label.clone();
        let second_coordinate = second.grid_coordinate;
        let second_label = second.label.clone();

        let first = self.record_mut(a)?;
        first.grid_coordinate = second_coordinate;
        let displaced_label = std::mem::replace(&mut first.label, second_label);

        let second = self.record_mut(b)?;
        second.grid_coordinate = first_coordinate;
        second.label = displaced_label;

        log::debug!("swap: {} <-> {} ('{}')", a, b, first_label);
        Ok(true)
    }

    /// Write fitted coordinates and labels, already validated by the caller
    pub(crate) fn commit_fit(&mut self, fitted: Vec<(RecordId, GridCoordinate, String)>) -> GridResult<()> {
        for (id, coordinate, label) in fitted {
            let record = self.record_mut(id)?;
            record.grid_coordinate = Some(coordinate);
            record.label = label;
        }
        Ok(())
    }

    pub(crate) fn record(&self, id: RecordId) -> GridResult<&ElectrodeRecord> {
        self.records.get(&id).ok_or(GridError::UnknownRecord(id))
    }

    pub(crate) fn record_mut(&mut self, id: RecordId) -> GridResult<&mut ElectrodeRecord> {
        self.records.get_mut(&id).ok_or(GridError::UnknownRecord(id))
    }

    fn ensure_vacant(
        &self,
        grid_name: &str,
        coordinate: GridCoordinate,
        except: Option<RecordId>,
    ) -> GridResult<()> {
        match self.occupant(grid_name, coordinate) {
            Some(holder) if Some(holder) != except => Err(GridError::DuplicateGridCoordinate {
                grid_name: grid_name.to_string(),
                coordinate,
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(grid: &str, x: i32, y: i32, label: &str) -> ElectrodeRecord {
        ElectrodeRecord::placed(grid, Point3::new(x as f64, y as f64, 0.0))
            .with_grid_coordinate(x, y)
            .with_label(label)
    }

    #[test]
    fn test_insert_rejects_duplicate_coordinate() {
        let mut registry = GridRegistry::new();
        registry.insert(contact("G", 0, 0, "G1")).unwrap();
        // same coordinate in another grid is fine
        registry.insert(contact("H", 0, 0, "H1")).unwrap();

        let err = registry.insert(contact("G", 0, 0, "G2")).unwrap_err();
        assert!(matches!(err, GridError::DuplicateGridCoordinate { .. }));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_assign_coordinate_checks_occupancy() {
        let mut registry = GridRegistry::new();
        let a = registry.insert(contact("G", 0, 0, "G1")).unwrap();
        let b = registry.insert(ElectrodeRecord::unplaced("G")).unwrap();

        assert!(registry.assign_grid_coordinate(b, Some(GridCoordinate::new(0, 0))).is_err());
        registry.assign_grid_coordinate(b, Some(GridCoordinate::new(1, 0))).unwrap();
        // reassigning a record its own coordinate is allowed
        registry.assign_grid_coordinate(a, Some(GridCoordinate::new(0, 0))).unwrap();
        assert_eq!(registry.occupant("G", GridCoordinate::new(1, 0)), Some(b));

        registry.assign_grid_coordinate(b, None).unwrap();
        assert_eq!(registry.occupant("G", GridCoordinate::new(1, 0)), None);
    }

    #[test]
    fn test_swap_twice_restores() {
        let mut registry = GridRegistry::new();
        let a = registry.insert(contact("G", 0, 0, "G1")).unwrap();
        let b = registry.insert(contact("G", 1, 0, "G2")).unwrap();
        let before = (registry.get(a).cloned(), registry.get(b).cloned());

        assert!(registry.swap(Some(a), Some(b)).unwrap());
        assert_eq!(registry.get(a).unwrap().label, "G2");
        assert_eq!(registry.get(a).unwrap().grid_coordinate, Some(GridCoordinate::new(1, 0)));
        assert_eq!(registry.get(b).unwrap().label, "G1");
        // locations stay with the physical contact
        assert_eq!(registry.get(a).unwrap().physical_location, Some(Point3::ZERO));

        assert!(registry.swap(Some(a), Some(b)).unwrap());
        assert_eq!((registry.get(a).cloned(), registry.get(b).cloned()), before);
    }

    #[test]
    fn test_swap_skips_same_or_unset() {
        let mut registry = GridRegistry::new();
        let a = registry.insert(contact("G", 0, 0, "G1")).unwrap();

        assert!(!registry.swap(Some(a), Some(a)).unwrap());
        assert!(!registry.swap(Some(a), None).unwrap());
        assert!(!registry.swap(None, None).unwrap());
        assert!(!registry.swap(Some(a), Some(RecordId(99))).unwrap());
        assert_eq!(registry.get(a).unwrap().label, "G1");
    }

    #[test]
    fn test_cross_grid_swap_keeps_invariant() {
        let mut registry = GridRegistry::new();
        let a = registry.insert(contact("G", 0, 0, "G1")).unwrap();
        registry.insert(contact("G", 1, 0, "G2")).unwrap();
        let c = registry.insert(contact("H", 1, 0, "H2")).unwrap();

        let err = registry.swap(Some(a), Some(c)).unwrap_err();
        assert!(matches!(err, GridError::DuplicateGridCoordinate { .. }));
        assert_eq!(registry.get(a).unwrap().label, "G1");
        assert_eq!(registry.get(c).unwrap().label, "H2");
    }

    #[test]
    fn test_set_location_clears_interpolated_flag() {
        let mut registry = GridRegistry::new();
        let mut record = ElectrodeRecord::unplaced("G");
        record.is_interpolated = true;
        let id = registry.insert(record).unwrap();

        registry.set_location(id, Point3::ONE).unwrap();
        assert!(!registry.get(id).unwrap().is_interpolated);
        assert_eq!(registry.grid_names().into_iter().collect::<Vec<_>>(), vec!["G"]);
        assert!(matches!(
            registry.set_label(RecordId(42), "x"),
            Err(GridError::UnknownRecord(_))
        ));
    }
}
