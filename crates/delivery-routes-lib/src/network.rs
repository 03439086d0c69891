//! Location and edge records supplied by a data provider.
//!
//! The core never talks to a backing store directly. Anything that can hand
//! over a slice of [`Location`]s and a slice of [`RawEdge`]s implements
//! [`NetworkProvider`] and can feed graph construction and reporting.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Numeric identifier for a delivery location.
pub type LocationId = i64;

/// A named delivery location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
}

impl Location {
    pub fn new(id: LocationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Directed path row as supplied by the provider. The graph treats it as undirected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawEdge {
    pub from: LocationId,
    pub to: LocationId,
    pub base_distance: f64,
    pub traffic_factor: f64,
}

impl RawEdge {
    pub fn new(from: LocationId, to: LocationId, base_distance: f64, traffic_factor: f64) -> Self {
        Self {
            from,
            to,
            base_distance,
            traffic_factor,
        }
    }
}

/// Source of location and edge rows.
pub trait NetworkProvider {
    /// All known locations.
    fn locations(&self) -> &[Location];

    /// All raw edge rows in load order.
    fn edges(&self) -> &[RawEdge];

    /// Lookup a location name by identifier.
    fn location_name(&self, id: LocationId) -> Option<&str> {
        self.locations()
            .iter()
            .find(|location| location.id == id)
            .map(|location| location.name.as_str())
    }
}

/// Provider backed by in-memory vectors.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNetwork {
    locations: Vec<Location>,
    edges: Vec<RawEdge>,
    names: HashMap<LocationId, usize>,
}

impl InMemoryNetwork {
    /// Build a network, rejecting duplicate location identifiers.
    pub fn new(locations: Vec<Location>, edges: Vec<RawEdge>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(locations.len());
        let mut names = HashMap::with_capacity(locations.len());
        for (index, location) in locations.iter().enumerate() {
            if !seen.insert(location.id) {
                return Err(Error::DuplicateLocation { id: location.id });
            }
            names.insert(location.id, index);
        }

        Ok(Self {
            locations,
            edges,
            names,
        })
    }

    /// Lookup a location by identifier.
    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.names.get(&id).map(|&index| &self.locations[index])
    }
}

impl NetworkProvider for InMemoryNetwork {
    fn locations(&self) -> &[Location] {
        &self.locations
    }

    fn edges(&self) -> &[RawEdge] {
        &self.edges
    }

    fn location_name(&self, id: LocationId) -> Option<&str> {
        self.location(id).map(|location| location.name.as_str())
    }
}
