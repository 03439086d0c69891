// Module exports for CLI subcommands.
//
// Each module handles a single subcommand; main.rs only parses arguments,
// resolves inputs and dispatches here.

pub mod distances;
pub mod locations;

use std::path::PathBuf;

use anyhow::{Context, Result};
use delivery_routes_lib::{load_network, InMemoryNetwork};

/// Environment variable consulted when `--locations` is not given.
pub const LOCATIONS_ENV: &str = "DELIVERY_ROUTES_LOCATIONS";
/// Environment variable consulted when `--paths` is not given.
pub const PATHS_ENV: &str = "DELIVERY_ROUTES_PATHS";

/// Resolved CSV inputs describing the network.
#[derive(Debug, Clone)]
pub struct NetworkInputs {
    pub locations: PathBuf,
    pub paths: PathBuf,
}

impl NetworkInputs {
    /// Resolve input paths from explicit arguments, falling back to the environment.
    pub fn resolve(locations: Option<PathBuf>, paths: Option<PathBuf>) -> Result<Self> {
        Ok(Self {
            locations: resolve_input(locations, LOCATIONS_ENV, "--locations")?,
            paths: resolve_input(paths, PATHS_ENV, "--paths")?,
        })
    }

    /// Load the network described by these inputs.
    pub fn load(&self) -> Result<InMemoryNetwork> {
        load_network(&self.locations, &self.paths).with_context(|| {
            format!(
                "failed to load network from {} and {}",
                self.locations.display(),
                self.paths.display()
            )
        })
    }
}

fn resolve_input(explicit: Option<PathBuf>, env_var: &str, flag: &str) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    std::env::var_os(env_var)
        .map(PathBuf::from)
        .ok_or_else(|| anyhow::anyhow!("{flag} is required (or set {env_var})"))
}

