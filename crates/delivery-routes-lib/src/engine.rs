//! Single-source shortest distances over the routing graph.
//!
//! One Dijkstra state machine serves both plain and window-constrained runs.
//! The window check is an optional hook consulted before each relaxation, so
//! the two modes cannot drift apart.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap};
use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Error;
use crate::graph::Graph;
use crate::network::LocationId;
use crate::policy::Criterion;
use crate::window::{parse_window_cutoff, DeliveryWindows, WindowMode};

/// Parameters for a single shortest-distance run.
#[derive(Debug, Clone, Copy)]
pub struct DistanceQuery<'a> {
    pub start: LocationId,
    pub criterion: Criterion,
    /// When present, relaxations into windowed destinations are gated by the window cutoff.
    pub windows: Option<&'a DeliveryWindows>,
    pub window_mode: WindowMode,
}

impl<'a> DistanceQuery<'a> {
    /// Unconstrained query using the given criterion.
    pub fn new(start: LocationId, criterion: Criterion) -> Self {
        Self {
            start,
            criterion,
            windows: None,
            window_mode: WindowMode::default(),
        }
    }

    /// Attach delivery windows to the query.
    pub fn with_windows(mut self, windows: &'a DeliveryWindows, mode: WindowMode) -> Self {
        self.windows = Some(windows);
        self.window_mode = mode;
        self
    }
}

/// Non-fatal conditions encountered while computing distances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteWarning {
    /// The window for `location` could not be parsed; it was treated as absent.
    InvalidWindow {
        location: LocationId,
        window: String,
        reason: String,
    },
    /// The start location has no adjacency entries, so nothing beyond it is reachable.
    MissingStart { location: LocationId },
}

impl fmt::Display for RouteWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteWarning::InvalidWindow {
                location,
                window,
                reason,
            } => write!(
                f,
                "ignored delivery window '{window}' for location {location}: {reason}"
            ),
            RouteWarning::MissingStart { location } => {
                write!(f, "start location {location} has no connecting paths")
            }
        }
    }
}

/// Best known cumulative cost per location.
///
/// Unreachable locations hold `f64::INFINITY` internally and are reported as
/// `None` by every accessor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceTable {
    distances: HashMap<LocationId, f64>,
}

impl DistanceTable {
    /// Distance to a location, or `None` when unreachable or unknown.
    pub fn get(&self, location: LocationId) -> Option<f64> {
        self.distances
            .get(&location)
            .copied()
            .filter(|distance| distance.is_finite())
    }

    pub fn is_reachable(&self, location: LocationId) -> bool {
        self.get(location).is_some()
    }

    /// Whether the location appears in the table at all.
    pub fn contains(&self, location: LocationId) -> bool {
        self.distances.contains_key(&location)
    }

    /// Reachable locations with their distances, in ascending id order.
    pub fn reachable(&self) -> Vec<(LocationId, f64)> {
        let mut entries: Vec<_> = self
            .distances
            .iter()
            .filter(|(_, distance)| distance.is_finite())
            .map(|(&id, &distance)| (id, distance))
            .collect();
        entries.sort_unstable_by_key(|&(id, _)| id);
        entries
    }

    /// Locations present in the table but never reached, in ascending id order.
    pub fn unreachable(&self) -> Vec<LocationId> {
        let mut ids: Vec<_> = self
            .distances
            .iter()
            .filter(|(_, distance)| !distance.is_finite())
            .map(|(&id, _)| id)
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Ordered snapshot with `None` marking unreachable locations.
    pub fn to_map(&self) -> BTreeMap<LocationId, Option<f64>> {
        self.distances
            .keys()
            .map(|&id| (id, self.get(id)))
            .collect()
    }

    fn current(&self, location: LocationId) -> f64 {
        *self.distances.get(&location).unwrap_or(&f64::INFINITY)
    }
}

/// Result of a shortest-distance run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceOutcome {
    pub distances: DistanceTable,
    pub warnings: Vec<RouteWarning>,
}

/// Window gate consulted before each relaxation.
struct WindowConstraint<'a> {
    windows: &'a DeliveryWindows,
    mode: WindowMode,
    reported: BTreeSet<LocationId>,
}

impl<'a> WindowConstraint<'a> {
    fn new(windows: &'a DeliveryWindows, mode: WindowMode) -> Self {
        Self {
            windows,
            mode,
            reported: BTreeSet::new(),
        }
    }

    /// Whether reaching `target` at `candidate` respects its window. A window
    /// that fails to parse does not constrain this attempt; the failure is
    /// recorded once per location.
    fn allows(
        &mut self,
        target: LocationId,
        candidate: f64,
        warnings: &mut Vec<RouteWarning>,
    ) -> bool {
        let Some(window) = self.windows.get(target) else {
            return true;
        };

        match parse_window_cutoff(window, self.mode) {
            Ok(cutoff) => candidate <= cutoff,
            Err(err) => {
                if self.reported.insert(target) {
                    let reason = match err {
                        Error::InvalidWindowFormat { reason, .. } => reason,
                        other => other.to_string(),
                    };
                    warn!(location = target, window, %reason, "ignoring malformed delivery window");
                    warnings.push(RouteWarning::InvalidWindow {
                        location: target,
                        window: window.to_string(),
                        reason,
                    });
                }
                true
            }
        }
    }
}

/// Run Dijkstra's algorithm from `query.start` over the whole graph.
///
/// Every graph location starts unreachable and the start at zero. The
/// frontier accepts duplicate entries; stale ones are discarded on pop.
pub fn shortest_distances(graph: &Graph, query: &DistanceQuery<'_>) -> DistanceOutcome {
    let mut warnings = Vec::new();
    let mut distances: HashMap<LocationId, f64> = graph
        .location_ids()
        .map(|id| (id, f64::INFINITY))
        .collect();
    distances.insert(query.start, 0.0);
    let mut table = DistanceTable { distances };

    if graph.neighbours(query.start).is_empty() {
        warn!(
            location = query.start,
            known = graph.contains(query.start),
            "start location has no adjacency entries"
        );
        warnings.push(RouteWarning::MissingStart {
            location: query.start,
        });
    }

    let mut gate = query
        .windows
        .map(|windows| WindowConstraint::new(windows, query.window_mode));
    let mut queue = BinaryHeap::new();
    queue.push(Frontier {
        location: query.start,
        cost: 0.0,
    });

    let mut settled = 0usize;
    while let Some(entry) = queue.pop() {
        let current = entry.cost;
        if current > table.current(entry.location) {
            continue;
        }
        settled += 1;

        for edge in graph.neighbours(entry.location) {
            let next = edge.target;
            let candidate = current + query.criterion.relaxed_cost(edge.weight);

            if let Some(gate) = gate.as_mut() {
                if !gate.allows(next, candidate, &mut warnings) {
                    continue;
                }
            }

            if candidate < table.current(next) {
                table.distances.insert(next, candidate);
                queue.push(Frontier {
                    location: next,
                    cost: candidate,
                });
            }
        }
    }

    debug!(
        start = query.start,
        criterion = %query.criterion,
        windowed = query.windows.is_some(),
        settled,
        "computed shortest distances"
    );

    DistanceOutcome {
        distances: table,
        warnings,
    }
}

/// Tentative distance waiting in the frontier. Ordered so that
/// [`BinaryHeap`] pops the cheapest entry first, ties broken by lower id.
#[derive(Copy, Clone, Debug)]
struct Frontier {
    location: LocationId,
    cost: f64,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.location.cmp(&self.location))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frontier_pops_lowest_cost_first() {
        let mut heap = BinaryHeap::new();
        for (location, cost) in [(1, 5.0), (2, 1.0), (3, 3.0), (4, 1.0)] {
            heap.push(Frontier { location, cost });
        }
        let order: Vec<_> = std::iter::from_fn(|| heap.pop().map(|e| e.location)).collect();
        assert_eq!(order, vec![2, 4, 3, 1]);
    }

    #[test]
    fn table_hides_infinite_sentinel() {
        let table = DistanceTable {
            distances: HashMap::from([(1, 0.0), (2, f64::INFINITY)]),
        };
        assert_eq!(table.get(1), Some(0.0));
        assert_eq!(table.get(2), None);
        assert!(table.contains(2));
        assert_eq!(table.unreachable(), vec![2]);
        assert_eq!(table.to_map().get(&2), Some(&None));
    }
}
