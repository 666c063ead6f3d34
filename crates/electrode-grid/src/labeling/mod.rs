//! Automatic grid labeling
//!
//! Three contacts of a grid are tagged as corners by the user. From those
//! anchors an external [`GridGeometryFitter`] assigns a lattice coordinate
//! to every placed contact, and each contact is then renamed from its
//! coordinate using the configured [`NamingConvention`].
//!
//! The fit runs on a working copy. Nothing is written to the registry
//! unless the fit succeeds and the result keeps one contact per coordinate.

mod config;
mod error;
mod fitter;

pub use config::{default_labeling_config_path, load_labeling_config, LabelingConfig, NamingConvention};
pub use error::{LabelingError, LabelingResult};
pub use fitter::{CornerLocations, GridGeometry, GridGeometryFitter, LineFitParams};

use std::collections::BTreeSet;

use electrode_core::Point3;

use crate::error::GridError;
use crate::record::{Corner, ElectrodeRecord, GridCoordinate};
use crate::registry::{GridRegistry, RecordId};

/// Channel numbering resolved from convention and geometry
#[derive(Debug, Clone, Copy)]
enum Numbering {
    AlongY,
    ShortAxisFirst(i64),
    LongAxisFirst(i64),
}

impl Numbering {
    fn resolve(grid_name: &str, convention: NamingConvention, geometry: GridGeometry) -> LabelingResult<Self> {
        if convention == NamingConvention::Line {
            return Ok(Numbering::AlongY);
        }
        let (short, long) = geometry.extents().ok_or_else(|| LabelingError::GeometryUnspecified {
            grid_name: grid_name.to_string(),
        })?;
        Ok(match convention {
            NamingConvention::ReverseGrid => Numbering::LongAxisFirst(i64::from(long)),
            _ => Numbering::ShortAxisFirst(i64::from(short)),
        })
    }

    fn number(self, coordinate: GridCoordinate) -> i64 {
        let (x, y) = (i64::from(coordinate.x), i64::from(coordinate.y));
        match self {
            Numbering::AlongY => y + 1,
            Numbering::ShortAxisFirst(short) => x * short + y + 1,
            Numbering::LongAxisFirst(long) => y * long + x + 1,
        }
    }
}

/// Assign grid coordinates and channel names to every placed contact of a
/// grid
///
/// Unplaced contacts are not handed to the fitter and keep their state.
/// Returns the number of contacts relabeled.
///
/// # Errors
/// - [`LabelingError::AmbiguousCornerAssignment`] / [`LabelingError::IncompleteCornerAssignment`]
///   when the corner tags do not name exactly three distinct placed contacts
/// - [`LabelingError::GeometryUnspecified`] for grid naming on a
///   user-defined geometry
/// - [`LabelingError::FitFailed`] when the fitter reports an error
/// - [`LabelingError::Grid`] when the fit leaves a contact without a
///   coordinate or puts two on the same one
pub fn label_automatically(
    registry: &mut GridRegistry,
    grid_name: &str,
    geometry: GridGeometry,
    fitter: &dyn GridGeometryFitter,
    config: &LabelingConfig,
) -> LabelingResult<usize> {
    let corners = resolve_corners(registry, grid_name)?;
    let numbering = Numbering::resolve(grid_name, config.naming_convention, geometry)?;

    let (ids, mut working): (Vec<RecordId>, Vec<ElectrodeRecord>) = registry
        .grid(grid_name)
        .filter(|(_, record)| record.physical_location.is_some())
        .map(|(id, record)| (id, record.clone()))
        .unzip();

    let fitted = match config.naming_convention {
        NamingConvention::Line => fitter.fit_to_line(&mut working, &corners, geometry, &config.line_fit),
        NamingConvention::Grid | NamingConvention::ReverseGrid => {
            fitter.fit_to_plane(&mut working, &corners, geometry)
        }
    };
    if let Err(e) = fitted {
        log::warn!("label_automatically: fit of '{}' failed: {:#}", grid_name, e);
        return Err(LabelingError::FitFailed(e));
    }

    // coordinates held by contacts the fitter never saw
    let held: BTreeSet<GridCoordinate> = registry
        .grid(grid_name)
        .filter(|(_, record)| record.physical_location.is_none())
        .filter_map(|(_, record)| record.grid_coordinate)
        .collect();

    let mut taken = BTreeSet::new();
    let mut updates = Vec::with_capacity(ids.len());
    for (id, record) in ids.into_iter().zip(&working) {
        let coordinate = record.grid_coordinate.ok_or_else(|| GridError::MissingGridCoordinate {
            label: record.display_name(),
        })?;
        if held.contains(&coordinate) || !taken.insert(coordinate) {
            log::warn!(
                "label_automatically: fit of '{}' placed a contact on occupied {}",
                grid_name,
                coordinate
            );
            return Err(GridError::DuplicateGridCoordinate {
                grid_name: grid_name.to_string(),
                coordinate,
            }
            .into());
        }
        let label = format!("{}{}", config.name_stem, numbering.number(coordinate));
        updates.push((id, coordinate, label));
    }

    let count = updates.len();
    registry.commit_fit(updates)?;
    log::info!("label_automatically: labeled {} contacts of '{}'", count, grid_name);
    Ok(count)
}

/// Locations of the three corner contacts of a grid
fn resolve_corners(registry: &GridRegistry, grid_name: &str) -> LabelingResult<CornerLocations> {
    let mut found: [Option<(&ElectrodeRecord, Option<Point3>)>; 3] = [None; 3];

    for (_, record) in registry.grid(grid_name) {
        if record.corners.len() > 1 {
            return Err(LabelingError::AmbiguousCornerAssignment(format!(
                "{} is tagged as more than one corner",
                record.display_name()
            )));
        }
        for corner in &record.corners {
            let slot = &mut found[corner_index(*corner)];
            if let Some((other, _)) = slot {
                return Err(LabelingError::AmbiguousCornerAssignment(format!(
                    "{} is tagged on both {} and {}",
                    corner.name(),
                    other.display_name(),
                    record.display_name()
                )));
            }
            *slot = Some((record, record.physical_location));
        }
    }

    let mut locations = [Point3::ZERO; 3];
    for corner in Corner::ALL {
        let index = corner_index(corner);
        let (record, location) = found[index].ok_or_else(|| {
            LabelingError::IncompleteCornerAssignment(format!("no contact is tagged as {}", corner.name()))
        })?;
        locations[index] = location.ok_or_else(|| {
            LabelingError::IncompleteCornerAssignment(format!(
                "{} ({}) has no location",
                corner.name(),
                record.display_name()
            ))
        })?;
    }

    let [first, second, third] = locations;
    Ok(CornerLocations { first, second, third })
}

fn corner_index(corner: Corner) -> usize {
    match corner {
        Corner::First => 0,
        Corner::Second => 1,
        Corner::Third => 2,
    }
}
