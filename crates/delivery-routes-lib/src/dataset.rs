//! CSV loading for delivery networks.
//!
//! Expected headers:
//! - locations: `id,name`
//! - paths: `from_location,to_location,distance,traffic_factor` (an empty
//!   traffic factor defaults to `1.0`)
//! - windows: `location,window`

use std::fs;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::network::{InMemoryNetwork, Location, LocationId, RawEdge};
use crate::window::DeliveryWindows;

const DEFAULT_TRAFFIC_FACTOR: f64 = 1.0;

#[derive(Debug, Deserialize)]
struct LocationRow {
    id: LocationId,
    name: String,
}

#[derive(Debug, Deserialize)]
struct PathRow {
    from_location: LocationId,
    to_location: LocationId,
    distance: f64,
    #[serde(default)]
    traffic_factor: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WindowRow {
    location: LocationId,
    window: String,
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new().trim(Trim::All).from_reader(reader)
}

/// Read location rows from CSV.
pub fn read_locations<R: Read>(reader: R) -> Result<Vec<Location>> {
    let mut locations = Vec::new();
    for row in csv_reader(reader).deserialize::<LocationRow>() {
        let row = row?;
        locations.push(Location::new(row.id, row.name));
    }
    Ok(locations)
}

/// Read path rows from CSV.
pub fn read_paths<R: Read>(reader: R) -> Result<Vec<RawEdge>> {
    let mut edges = Vec::new();
    for row in csv_reader(reader).deserialize::<PathRow>() {
        let row = row?;
        if !row.distance.is_finite() {
            return Err(Error::DatasetValidation {
                message: format!(
                    "path {} -> {} has non-finite distance",
                    row.from_location, row.to_location
                ),
            });
        }
        edges.push(RawEdge::new(
            row.from_location,
            row.to_location,
            row.distance,
            row.traffic_factor.unwrap_or(DEFAULT_TRAFFIC_FACTOR),
        ));
    }
    Ok(edges)
}

/// Read delivery windows from CSV. A location may only appear once.
pub fn read_windows<R: Read>(reader: R) -> Result<DeliveryWindows> {
    let mut windows = DeliveryWindows::new();
    for row in csv_reader(reader).deserialize::<WindowRow>() {
        let row = row?;
        if windows.insert(row.location, row.window).is_some() {
            return Err(Error::DatasetValidation {
                message: format!("location {} has more than one delivery window", row.location),
            });
        }
    }
    Ok(windows)
}

/// Load a network from a locations CSV and a paths CSV.
pub fn load_network(locations_path: &Path, paths_path: &Path) -> Result<InMemoryNetwork> {
    let locations = read_locations(fs::File::open(locations_path)?)?;
    let edges = read_paths(fs::File::open(paths_path)?)?;
    debug!(
        locations = locations.len(),
        paths = edges.len(),
        "loaded delivery network from {} and {}",
        locations_path.display(),
        paths_path.display()
    );
    InMemoryNetwork::new(locations, edges)
}

/// Load delivery windows from a CSV file.
pub fn load_windows(path: &Path) -> Result<DeliveryWindows> {
    read_windows(fs::File::open(path)?)
}
