//! Delivery routes library entry points.
//!
//! This crate exposes helpers to load a delivery network, build the weighted
//! location graph, and compute single-source shortest distances under the
//! supported optimization criteria and optional delivery-window constraints.
//! Higher-level consumers (the CLI) should only depend on the functions
//! exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod dataset;
pub mod engine;
pub mod error;
pub mod graph;
pub mod network;
pub mod output;
pub mod policy;
pub mod routing;
pub mod traffic;
pub mod window;

pub use dataset::{load_network, load_windows, read_locations, read_paths, read_windows};
pub use engine::{shortest_distances, DistanceOutcome, DistanceQuery, DistanceTable, RouteWarning};
pub use error::{Error, Result};
pub use graph::{build_graph, build_graph_from_provider, Edge, Graph, GraphBuildOptions};
pub use network::{InMemoryNetwork, Location, LocationId, NetworkProvider, RawEdge};
pub use output::{DistanceEntry, DistanceSummary, RenderMode};
pub use policy::{Criterion, CriterionParsing};
pub use routing::{plan_distances, plan_distances_on_graph, DistancePlan, RouteRequest};
pub use traffic::effective_weight;
pub use window::{parse_window_cutoff, DeliveryWindow, DeliveryWindows, WindowMode};
