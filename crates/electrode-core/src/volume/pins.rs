//! Named pins and their per-slice visibility
//!
//! A pin is shown on a plane only while the cursor's slice is within the
//! tolerance of the pin along that plane's normal axis. Visibility is kept
//! per pin so the renderer can redraw only the series that changed.

use std::collections::BTreeMap;

use super::slicer::Plane;
use crate::types::Point3;

/// Per-plane visibility of one pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PinVisibility {
    pub xy: bool,
    pub xz: bool,
    pub yz: bool,
}

impl PinVisibility {
    /// Compute visibility of `pin` relative to `cursor`
    ///
    /// A plane shows the pin iff the distance along its normal axis is
    /// strictly less than `tolerance`.
    pub fn compute(pin: Point3, cursor: Point3, tolerance: f64) -> Self {
        Self {
            xy: (pin.z - cursor.z).abs() < tolerance,
            xz: (pin.y - cursor.y).abs() < tolerance,
            yz: (pin.x - cursor.x).abs() < tolerance,
        }
    }

    /// Visibility on a single plane
    pub fn on(&self, plane: Plane) -> bool {
        match plane {
            Plane::Xy => self.xy,
            Plane::Xz => self.xz,
            Plane::Yz => self.yz,
        }
    }
}

/// Whether a drop registered a new plot series or changed an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesChange {
    Created,
    Updated,
}

/// Result of dropping a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinDrop {
    pub visibility: PinVisibility,
    pub series: SeriesChange,
}

#[derive(Debug, Clone)]
struct Pin {
    location: Point3,
    visibility: PinVisibility,
}

/// All pins dropped in the current session
#[derive(Debug, Clone, Default)]
pub struct PinBoard {
    pins: BTreeMap<String, Pin>,
}

impl PinBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store or move a named pin and recompute its visibility
    pub fn drop_pin(&mut self, name: &str, location: Point3, cursor: Point3, tolerance: f64) -> PinDrop {
        let visibility = PinVisibility::compute(location, cursor, tolerance);
        let pin = Pin { location, visibility };

        let series = match self.pins.get_mut(name) {
            Some(existing) => {
                *existing = pin;
                SeriesChange::Updated
            }
            None => {
                self.pins.insert(name.to_string(), pin);
                SeriesChange::Created
            }
        };

        log::debug!(
            "drop_pin: '{}' at {} ({:?}, visible xy={} xz={} yz={})",
            name, location, series, visibility.xy, visibility.xz, visibility.yz
        );

        PinDrop { visibility, series }
    }

    /// Recompute every pin's visibility against a new cursor
    pub fn refresh(&mut self, cursor: Point3, tolerance: f64) {
        for pin in self.pins.values_mut() {
            pin.visibility = PinVisibility::compute(pin.location, cursor, tolerance);
        }
    }

    /// Location of a named pin
    pub fn location(&self, name: &str) -> Option<Point3> {
        self.pins.get(name).map(|p| p.location)
    }

    /// Visibility of a named pin
    pub fn visibility(&self, name: &str) -> Option<PinVisibility> {
        self.pins.get(name).map(|p| p.visibility)
    }

    /// In-plane coordinates of every pin currently visible on `plane`
    pub fn visible_on(&self, plane: Plane) -> Vec<(&str, [f64; 2])> {
        self.pins
            .iter()
            .filter(|(_, pin)| pin.visibility.on(plane))
            .map(|(name, pin)| (name.as_str(), plane.project(pin.location)))
            .collect()
    }

    /// Pin names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.pins.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_is_strict() {
        let cursor = Point3::new(10.0, 10.0, 10.0);
        let vis = PinVisibility::compute(Point3::new(12.0, 17.5, 2.0), cursor, 7.5);
        assert!(!vis.xy);
        // exactly at the tolerance is hidden
        assert!(!vis.xz);
        assert!(vis.yz);

        let vis = PinVisibility::compute(Point3::new(12.0, 10.0, 3.0), cursor, 7.5);
        assert!(vis.xy);
    }

    #[test]
    fn test_first_drop_creates_then_updates() {
        let mut board = PinBoard::new();
        let cursor = Point3::new(5.0, 5.0, 5.0);

        let first = board.drop_pin("pin", Point3::new(5.0, 5.0, 5.0), cursor, 1.0);
        assert_eq!(first.series, SeriesChange::Created);

        let second = board.drop_pin("pin", Point3::new(6.0, 5.0, 5.0), cursor, 1.0);
        assert_eq!(second.series, SeriesChange::Updated);
        assert_eq!(board.location("pin"), Some(Point3::new(6.0, 5.0, 5.0)));
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_refresh_follows_cursor() {
        let mut board = PinBoard::new();
        board.drop_pin("a", Point3::new(0.0, 0.0, 0.0), Point3::ZERO, 2.0);
        assert_eq!(board.visible_on(Plane::Xy), vec![("a", [0.0, 0.0])]);

        board.refresh(Point3::new(0.0, 0.0, 5.0), 2.0);
        assert!(board.visible_on(Plane::Xy).is_empty());
        assert_eq!(board.visible_on(Plane::Xz), vec![("a", [0.0, 0.0])]);
        assert!(board.visibility("a").unwrap().yz);
    }
}
