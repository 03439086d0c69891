//! Locations command handler for listing the loaded network.

use anyhow::Result;
use delivery_routes_lib::NetworkProvider;

use delivery_routes_cli::output::{emit, render_locations, OutputFormat};

use super::NetworkInputs;

/// Handle the locations subcommand.
pub fn handle_locations(inputs: &NetworkInputs, format: OutputFormat) -> Result<()> {
    let network = inputs.load()?;
    let rendered = render_locations(network.locations(), format)?;
    emit(&rendered, format)?;
    Ok(())
}
