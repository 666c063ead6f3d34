//! Electrode contact records

use std::fmt;

use electrode_core::Point3;

/// Grid name given to contacts not yet sorted into a grid
pub const DEFAULT_GRID_NAME: &str = "unsorted";

/// Integer position of a contact within its grid's lattice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoordinate {
    pub x: i32,
    pub y: i32,
}

impl GridCoordinate {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Corner markers used to anchor automatic labeling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Corner {
    First,
    Second,
    Third,
}

impl Corner {
    pub const ALL: [Corner; 3] = [Corner::First, Corner::Second, Corner::Third];

    /// Display name as shown in the electrode table
    pub fn name(&self) -> &'static str {
        match self {
            Corner::First => "corner 1",
            Corner::Second => "corner 2",
            Corner::Third => "corner 3",
        }
    }
}

/// One physical electrode contact
#[derive(Debug, Clone, PartialEq)]
pub struct ElectrodeRecord {
    /// Channel name
    pub label: String,
    /// Grid (strip, depth or array) this contact belongs to
    pub grid_name: String,
    /// Location in surface space; `None` until placed or interpolated
    pub physical_location: Option<Point3>,
    /// Position in the grid lattice; `None` until assigned
    pub grid_coordinate: Option<GridCoordinate>,
    /// Location was computed rather than observed
    pub is_interpolated: bool,
    /// Corner tags set by the user for automatic labeling
    pub corners: Vec<Corner>,
    /// Atlas regions near this contact
    pub roi_labels: Vec<String>,
}

impl ElectrodeRecord {
    /// A contact placed at an observed location
    pub fn placed(grid_name: impl Into<String>, location: Point3) -> Self {
        Self {
            physical_location: Some(location),
            ..Self::unplaced(grid_name)
        }
    }

    /// A contact with no location yet, to be interpolated from its neighbors
    pub fn unplaced(grid_name: impl Into<String>) -> Self {
        Self {
            label: String::new(),
            grid_name: grid_name.into(),
            physical_location: None,
            grid_coordinate: None,
            is_interpolated: false,
            corners: Vec::new(),
            roi_labels: Vec::new(),
        }
    }

    pub fn with_grid_coordinate(mut self, x: i32, y: i32) -> Self {
        self.grid_coordinate = Some(GridCoordinate::new(x, y));
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_corner(mut self, corner: Corner) -> Self {
        self.corners.push(corner);
        self
    }

    /// Label if set, otherwise a description of the contact
    pub fn display_name(&self) -> String {
        if self.label.is_empty() {
            self.to_string()
        } else {
            self.label.clone()
        }
    }
}

impl fmt::Display for ElectrodeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.physical_location {
            Some(p) => write!(f, "Elec: {} ({:.2}, {:.2}, {:.2})", self.grid_name, p.x, p.y, p.z),
            None => write!(f, "Elec: {} (unplaced)", self.grid_name),
        }
    }
}

impl Default for ElectrodeRecord {
    fn default() -> Self {
        Self::unplaced(DEFAULT_GRID_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_description() {
        let record = ElectrodeRecord::placed("LTG", Point3::new(1.0, 2.5, -3.0));
        assert_eq!(record.display_name(), "Elec: LTG (1.00, 2.50, -3.00)");
        assert_eq!(record.with_label("LTG1").display_name(), "LTG1");
        assert_eq!(ElectrodeRecord::default().display_name(), "Elec: unsorted (unplaced)");
    }
}
