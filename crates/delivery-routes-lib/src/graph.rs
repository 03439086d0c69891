use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};
use crate::network::{Location, LocationId, NetworkProvider, RawEdge};
use crate::traffic::effective_weight;

/// Options applied while turning raw edge rows into the routing graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphBuildOptions {
    /// Multiply each base distance by its traffic factor.
    pub apply_traffic: bool,
}

impl GraphBuildOptions {
    pub fn with_traffic(apply_traffic: bool) -> Self {
        Self { apply_traffic }
    }
}

/// Edge within the routing graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: LocationId,
    pub weight: f64,
}

/// Undirected weighted graph used by the shortest-path engine.
///
/// The adjacency map sits behind an [`Arc`], so clones are cheap and a single
/// graph can be shared read-only between concurrent queries.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    options: GraphBuildOptions,
    adjacency: Arc<HashMap<LocationId, Vec<Edge>>>,
}

impl Graph {
    /// Options that produced this graph.
    pub fn options(&self) -> GraphBuildOptions {
        self.options
    }

    /// Return the neighbours for a given location identifier.
    pub fn neighbours(&self, location: LocationId) -> &[Edge] {
        self.adjacency
            .get(&location)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether the location has an adjacency entry (possibly empty).
    pub fn contains(&self, location: LocationId) -> bool {
        self.adjacency.contains_key(&location)
    }

    /// All location identifiers known to the graph, in arbitrary order.
    pub fn location_ids(&self) -> impl Iterator<Item = LocationId> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of adjacency entries (each undirected edge counts twice).
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Check that every `a -> b (w)` entry is mirrored by `b -> a (w)`.
    pub fn is_symmetric(&self) -> bool {
        self.adjacency.iter().all(|(&from, edges)| {
            edges.iter().all(|edge| {
                let forward = edges
                    .iter()
                    .filter(|e| e.target == edge.target && e.weight == edge.weight)
                    .count();
                let backward = self
                    .neighbours(edge.target)
                    .iter()
                    .filter(|e| e.target == from && e.weight == edge.weight)
                    .count();
                forward == backward
            })
        })
    }
}

/// Build the routing graph from a provider's locations and edges.
pub fn build_graph_from_provider<P: NetworkProvider + ?Sized>(
    provider: &P,
    options: GraphBuildOptions,
) -> Result<Graph> {
    build_graph(provider.locations(), provider.edges(), options)
}

/// Build the routing graph.
///
/// Every location receives an adjacency entry, even when isolated. Each raw
/// edge is inserted in both directions with the same effective weight.
/// Parallel edges are kept as-is. Any negative or non-finite weight aborts
/// construction.
pub fn build_graph(
    locations: &[Location],
    edges: &[RawEdge],
    options: GraphBuildOptions,
) -> Result<Graph> {
    let mut adjacency: HashMap<LocationId, Vec<Edge>> = HashMap::with_capacity(locations.len());
    for location in locations {
        adjacency.entry(location.id).or_default();
    }
    let known: BTreeSet<LocationId> = locations.iter().map(|location| location.id).collect();

    for raw in edges {
        let weight = effective_weight(raw.base_distance, raw.traffic_factor, options.apply_traffic);
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidEdgeWeight {
                from: raw.from,
                to: raw.to,
                weight,
            });
        }

        for endpoint in [raw.from, raw.to] {
            if !known.contains(&endpoint) {
                debug!(location = endpoint, "edge references location missing from location set");
            }
        }

        adjacency.entry(raw.from).or_default().push(Edge {
            target: raw.to,
            weight,
        });
        adjacency.entry(raw.to).or_default().push(Edge {
            target: raw.from,
            weight,
        });
    }

    debug!(
        nodes = adjacency.len(),
        edges = edges.len(),
        apply_traffic = options.apply_traffic,
        "built routing graph"
    );

    Ok(Graph {
        options,
        adjacency: Arc::new(adjacency),
    })
}
