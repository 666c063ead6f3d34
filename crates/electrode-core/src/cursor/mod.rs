//! Cursor synchronization across voxel, RAS and tkr spaces
//!
//! [`CursorSync`] owns the loaded volumes and the single navigation cursor.
//! The cursor's ground truth is its voxel index; the RAS and tkr values shown
//! to the user are derived from it on every move. Any of the three can be
//! edited, and an edit is mapped back to a voxel before moving.
//!
//! # Re-entrancy
//!
//! Publishing a readout notifies the [`CursorObserver`], which may be a bound
//! text field that reports its new value straight back as a user edit. While
//! the controller is propagating a change, the `sync_in_progress` guard is set
//! and those echoed edits return [`EditOutcome::Reentrant`] without effect:
//!
//! ```text
//! on_user_edited_ras ─► [guard on] ─► move_cursor ─► publish voxel/tkr
//!                                                        │
//!                        observer echoes as RAS edit ◄───┘
//!                        on_user_edited_ras ─► Reentrant (ignored)
//! ```

mod error;
mod readout;

pub use error::{CursorError, CursorResult};
pub use readout::{CoordinateSpace, Readout, ReadoutField, Suppress};

use std::collections::BTreeMap;

use crate::config::ViewerConfig;
use crate::transform::{apply, map_cursor};
use crate::types::{
    nearest_voxel, truncate, truncate_point, IVec3, Point3, COORD_DISPLAY_PLACES,
    INTENSITY_DISPLAY_PLACES,
};
use crate::volume::{slice, PinBoard, PinDrop, SlicePlanes, Volume};

/// Receives readout change notifications
///
/// The controller is handed back so the observer can react synchronously,
/// including by reporting user edits. Edits made during propagation are
/// ignored by the re-entrancy guard.
pub trait CursorObserver {
    fn readout_changed(&mut self, field: ReadoutField, sync: &mut CursorSync);
}

/// Result of a user edit to one cursor representation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The cursor moved to the edited position
    Applied,
    /// The position fell outside the active volume (or none is loaded)
    OutOfBounds,
    /// Ignored: the edit was an echo of an update already in progress
    Reentrant,
}

/// Owner of the navigation cursor and its derived state
pub struct CursorSync {
    config: ViewerConfig,
    volumes: BTreeMap<String, Volume>,
    active: Option<String>,
    cursor: Option<IVec3>,
    planes: Option<SlicePlanes>,
    pins: PinBoard,
    readout: Readout,
    mouse: Readout,
    sync_in_progress: bool,
    observer: Option<Box<dyn CursorObserver>>,
}

impl CursorSync {
    /// Create a controller with no volumes loaded
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            volumes: BTreeMap::new(),
            active: None,
            cursor: None,
            planes: None,
            pins: PinBoard::new(),
            readout: Readout::default(),
            mouse: Readout::default(),
            sync_in_progress: false,
            observer: None,
        }
    }

    /// Install the observer notified of readout changes
    pub fn set_observer(&mut self, observer: Box<dyn CursorObserver>) {
        self.observer = Some(observer);
    }

    /// Remove and return the observer
    pub fn take_observer(&mut self) -> Option<Box<dyn CursorObserver>> {
        self.observer.take()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Volumes
    // ═══════════════════════════════════════════════════════════════════════

    /// Load a named volume, make it active and center the cursor on it
    ///
    /// A volume loaded under an existing name replaces it.
    pub fn load_volume(&mut self, name: impl Into<String>, volume: Volume) {
        let name = name.into();
        let volume = if self.config.reorient_to_std {
            volume.reoriented_to_std()
        } else {
            volume
        };

        log::info!("load_volume: '{}' with shape {:?}", name, volume.shape());
        let center = volume.center();
        self.volumes.insert(name.clone(), volume);
        self.activate(name, center);
    }

    /// Switch to a loaded volume, placing the cursor at `voxel` or the center
    ///
    /// A `voxel` outside the new volume falls back to its center.
    pub fn switch_volume(&mut self, name: &str, voxel: Option<IVec3>) -> CursorResult<()> {
        let volume = self
            .volumes
            .get(name)
            .ok_or_else(|| CursorError::UnknownVolume(name.to_string()))?;

        let target = voxel
            .filter(|v| volume.contains(*v))
            .unwrap_or_else(|| volume.center());

        log::info!("switch_volume: '{}' at {}", name, target);
        self.activate(name.to_string(), target);
        Ok(())
    }

    fn activate(&mut self, name: String, voxel: IVec3) {
        self.active = Some(name);
        self.cursor = None;
        self.planes = None;
        self.with_sync_guard(|sync| sync.move_cursor(voxel, Suppress::NONE));
    }

    /// Names of all loaded volumes
    pub fn volume_names(&self) -> impl Iterator<Item = &str> {
        self.volumes.keys().map(String::as_str)
    }

    /// Name of the active volume
    pub fn active_volume_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// The active volume
    pub fn active_volume(&self) -> Option<&Volume> {
        self.active.as_ref().and_then(|name| self.volumes.get(name))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Cursor
    // ═══════════════════════════════════════════════════════════════════════

    /// Move the cursor to a voxel
    ///
    /// Out-of-range positions (and calls with no volume loaded) are ignored
    /// and return `false`. Otherwise the slice planes and pins follow the
    /// cursor, the representations not in `suppress` are republished, and
    /// the intensity under the cursor is published.
    pub fn move_cursor(&mut self, voxel: IVec3, suppress: Suppress) -> bool {
        let Some(volume) = self.active_volume() else {
            log::trace!("move_cursor: no volume loaded, ignoring {}", voxel);
            return false;
        };
        // intensity lookup doubles as the bounds check
        let Some(intensity) = volume.intensity(voxel) else {
            log::trace!("move_cursor: {} outside {:?}, ignoring", voxel, volume.shape());
            return false;
        };

        let point = voxel.as_dvec3();
        let planes = slice(volume.data(), point);
        let affines = *volume.affines();

        log::debug!("move_cursor: {} ({:?})", voxel, suppress);
        self.cursor = Some(voxel);
        self.planes = Some(planes);
        self.pins.refresh(point, self.config.pin_tolerance);

        self.with_sync_guard(|sync| {
            sync.notify(ReadoutField::Slices);
            sync.notify(ReadoutField::Pins);

            if !suppress.cursor {
                sync.publish(CoordinateSpace::Voxel, truncate_point(point, COORD_DISPLAY_PLACES));
            }
            if !suppress.ras {
                sync.publish(CoordinateSpace::Ras, affines.to_ras(point));
            }
            if !suppress.tkr {
                sync.publish(CoordinateSpace::Tkr, affines.to_tkr(point));
            }

            sync.readout.intensity = truncate(f64::from(intensity), INTENSITY_DISPLAY_PLACES);
            sync.notify(ReadoutField::CursorIntensity);
        });

        true
    }

    /// Handle a user edit of the voxel readout
    pub fn on_user_edited_voxel(&mut self, voxel: Point3) -> CursorResult<EditOutcome> {
        self.apply_user_edit(CoordinateSpace::Voxel, voxel)
    }

    /// Handle a user edit of the RAS readout
    pub fn on_user_edited_ras(&mut self, ras: Point3) -> CursorResult<EditOutcome> {
        self.apply_user_edit(CoordinateSpace::Ras, ras)
    }

    /// Handle a user edit of the tkr readout
    pub fn on_user_edited_tkr(&mut self, tkr: Point3) -> CursorResult<EditOutcome> {
        self.apply_user_edit(CoordinateSpace::Tkr, tkr)
    }

    fn apply_user_edit(&mut self, space: CoordinateSpace, value: Point3) -> CursorResult<EditOutcome> {
        if self.sync_in_progress {
            log::trace!("apply_user_edit: {:?} edit during propagation, ignoring", space);
            return Ok(EditOutcome::Reentrant);
        }
        let Some(volume) = self.active_volume() else {
            return Ok(EditOutcome::OutOfBounds);
        };

        let voxel = match space {
            CoordinateSpace::Voxel => value,
            CoordinateSpace::Ras => map_cursor(value, &volume.affines().vox2ras, true)?,
            CoordinateSpace::Tkr => map_cursor(value, &volume.affines().vox2tkr, true)?,
        };
        if !voxel.is_finite() {
            log::trace!("apply_user_edit: non-finite {:?} position {}, ignoring", space, voxel);
            return Ok(EditOutcome::OutOfBounds);
        }
        let voxel = nearest_voxel(voxel);

        let moved = self.with_sync_guard(|sync| sync.move_cursor(voxel, Suppress::only(space)));
        Ok(if moved {
            EditOutcome::Applied
        } else {
            EditOutcome::OutOfBounds
        })
    }

    /// Publish the hover position without moving the cursor
    ///
    /// Returns `false` (and publishes nothing) when the position is out of range.
    pub fn move_mouse(&mut self, position: Point3) -> bool {
        let Some(volume) = self.active_volume() else {
            return false;
        };
        let Some(intensity) = volume.voxel_at(position).and_then(|v| volume.intensity(v)) else {
            log::trace!("move_mouse: {} outside {:?}, ignoring", position, volume.shape());
            return false;
        };

        let affines = volume.affines();
        self.mouse = Readout {
            voxel: truncate_point(position, COORD_DISPLAY_PLACES),
            ras: affines.to_ras(position),
            tkr: affines.to_tkr(position),
            intensity: truncate(f64::from(intensity), INTENSITY_DISPLAY_PLACES),
        };
        self.with_sync_guard(|sync| sync.notify(ReadoutField::Mouse));
        true
    }

    /// Current cursor voxel
    pub fn cursor(&self) -> Option<IVec3> {
        self.cursor
    }

    /// Cursor position in a space, computed from the voxel (untruncated)
    pub fn cursor_position(&self, space: CoordinateSpace) -> Option<Point3> {
        let voxel = self.cursor?.as_dvec3();
        let affines = self.active_volume()?.affines();
        Some(match space {
            CoordinateSpace::Voxel => voxel,
            CoordinateSpace::Ras => apply(voxel, &affines.vox2ras),
            CoordinateSpace::Tkr => apply(voxel, &affines.vox2tkr),
        })
    }

    /// Slice planes through the cursor
    pub fn planes(&self) -> Option<&SlicePlanes> {
        self.planes.as_ref()
    }

    /// Published cursor readout
    pub fn readout(&self) -> &Readout {
        &self.readout
    }

    /// Published mouse readout
    pub fn mouse(&self) -> &Readout {
        &self.mouse
    }

    /// Whether a change is currently being propagated
    pub fn is_syncing(&self) -> bool {
        self.sync_in_progress
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Pins
    // ═══════════════════════════════════════════════════════════════════════

    /// Drop a named pin; `None` when no cursor exists yet
    pub fn drop_pin(&mut self, name: &str, location: Point3, tolerance: f64) -> Option<PinDrop> {
        let cursor = self.cursor?.as_dvec3();
        let drop = self.pins.drop_pin(name, location, cursor, tolerance);
        self.with_sync_guard(|sync| sync.notify(ReadoutField::Pins));
        Some(drop)
    }

    /// Drop the current pin using the configured tolerance
    pub fn drop_current_pin(&mut self, location: Point3) -> Option<PinDrop> {
        let name = self.config.current_pin.clone();
        self.drop_pin(&name, location, self.config.pin_tolerance)
    }

    /// Select which pin later drops move
    pub fn set_current_pin(&mut self, name: impl Into<String>) {
        self.config.current_pin = name.into();
    }

    /// Change the pin tolerance and refresh visibility
    pub fn set_pin_tolerance(&mut self, tolerance: f64) {
        self.config.pin_tolerance = tolerance;
        if let Some(cursor) = self.cursor {
            self.pins.refresh(cursor.as_dvec3(), tolerance);
            self.with_sync_guard(|sync| sync.notify(ReadoutField::Pins));
        }
    }

    pub fn pins(&self) -> &PinBoard {
        &self.pins
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Propagation
    // ═══════════════════════════════════════════════════════════════════════

    fn publish(&mut self, space: CoordinateSpace, value: Point3) {
        self.readout.set_position(space, value);
        self.notify(ReadoutField::cursor(space));
    }

    fn notify(&mut self, field: ReadoutField) {
        if let Some(mut observer) = self.observer.take() {
            observer.readout_changed(field, self);
            // keep a replacement installed by the observer itself
            if self.observer.is_none() {
                self.observer = Some(observer);
            }
        }
    }

    fn with_sync_guard<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let previous = std::mem::replace(&mut self.sync_in_progress, true);
        let result = f(self);
        self.sync_in_progress = previous;
        result
    }
}

impl Default for CursorSync {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}
