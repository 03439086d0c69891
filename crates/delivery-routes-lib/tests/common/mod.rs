//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use delivery_routes_lib::{InMemoryNetwork, Location, RawEdge};

/// Path to fixtures directory used by tests.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Three locations in a line: 1 -(10)- 2 -(5)- 3.
pub fn line_network(first_traffic: f64) -> InMemoryNetwork {
    InMemoryNetwork::new(
        vec![
            Location::new(1, "Depot"),
            Location::new(2, "Market"),
            Location::new(3, "Clinic"),
        ],
        vec![RawEdge::new(1, 2, 10.0, first_traffic), RawEdge::new(2, 3, 5.0, 1.0)],
    )
    .expect("valid network")
}
