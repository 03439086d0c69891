//! Output formatting for distance summaries and location listings.

use std::io::{self, Write};

use anyhow::Result;
use clap::ValueEnum;
use delivery_routes_lib::{DistanceSummary, Location, RenderMode};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text, one location per line.
    #[default]
    Text,
    /// Markdown-flavoured text.
    Rich,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    fn render_mode(self) -> Option<RenderMode> {
        match self {
            OutputFormat::Text => Some(RenderMode::PlainText),
            OutputFormat::Rich => Some(RenderMode::RichText),
            OutputFormat::Json => None,
        }
    }
}

/// Render a distance summary in the requested format.
pub fn render_summary(summary: &DistanceSummary, format: OutputFormat) -> Result<String> {
    match format.render_mode() {
        Some(mode) => Ok(summary.render(mode)),
        None => Ok(summary.to_json()?),
    }
}

/// Render the location list in the requested format.
pub fn render_locations(locations: &[Location], format: OutputFormat) -> Result<String> {
    let mut sorted: Vec<&Location> = locations.iter().collect();
    sorted.sort_by_key(|location| location.id);

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&sorted)?,
        OutputFormat::Text => {
            let mut buffer = String::from("Locations:\n");
            for location in sorted {
                buffer.push_str(&format!("{}: {}\n", location.id, location.name));
            }
            buffer
        }
        OutputFormat::Rich => {
            let mut buffer = String::from("**Locations**\n");
            for location in sorted {
                buffer.push_str(&format!("* `{}` {}\n", location.id, location.name));
            }
            buffer
        }
    };
    Ok(rendered)
}

/// Write rendered output to stdout, appending a newline for JSON.
pub fn emit(rendered: &str, format: OutputFormat) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    if format == OutputFormat::Json {
        writeln!(stdout)?;
    }
    stdout.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locations_are_listed_in_id_order() {
        let locations = vec![Location::new(2, "Market"), Location::new(1, "Depot")];
        let text = render_locations(&locations, OutputFormat::Text).unwrap();
        assert_eq!(text, "Locations:\n1: Depot\n2: Market\n");

        let json = render_locations(&locations, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["name"], "Depot");
    }
}
