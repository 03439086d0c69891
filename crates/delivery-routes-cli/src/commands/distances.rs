//! Distances command handler for single-source shortest distances.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ValueEnum;
use delivery_routes_lib::{
    load_windows, plan_distances, CriterionParsing, DeliveryWindows, DistanceSummary,
    LocationId, RouteRequest, WindowMode,
};
use tracing::debug;

use delivery_routes_cli::output::{emit, render_summary, OutputFormat};

use super::NetworkInputs;

/// Window interpretation selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum WindowModeArg {
    /// Cutoff is the two-digit start hour.
    #[default]
    Literal,
    /// Cutoff is the full start time, with both times validated.
    Corrected,
}

impl From<WindowModeArg> for WindowMode {
    fn from(value: WindowModeArg) -> Self {
        match value {
            WindowModeArg::Literal => WindowMode::Literal,
            WindowModeArg::Corrected => WindowMode::Corrected,
        }
    }
}

/// Arguments for the distances command.
#[derive(Debug, Clone)]
pub struct DistancesCommandArgs {
    pub from: LocationId,
    pub criterion: String,
    pub strict_criterion: bool,
    pub traffic: bool,
    pub windows: Vec<(LocationId, String)>,
    pub windows_file: Option<PathBuf>,
    pub window_mode: WindowModeArg,
}

impl DistancesCommandArgs {
    /// Collect windows from the CSV file (if any) and inline flags; inline flags win.
    fn collect_windows(&self) -> Result<Option<DeliveryWindows>> {
        let mut windows = match self.windows_file.as_deref() {
            Some(path) => load_windows(path)
                .with_context(|| format!("failed to load delivery windows from {}", path.display()))?,
            None => DeliveryWindows::new(),
        };
        windows.extend(self.windows.iter().cloned().collect());

        if windows.is_empty() && self.windows_file.is_none() {
            Ok(None)
        } else {
            Ok(Some(windows))
        }
    }

    /// Convert CLI args to a library request.
    pub fn to_request(&self) -> Result<RouteRequest> {
        let parsing = if self.strict_criterion {
            CriterionParsing::Strict
        } else {
            CriterionParsing::Lenient
        };
        let mut request = RouteRequest::new(self.from)
            .with_criterion(self.criterion.clone())
            .with_criterion_parsing(parsing)
            .with_traffic(self.traffic);
        if let Some(windows) = self.collect_windows()? {
            request = request.with_windows(windows, self.window_mode.into());
        }
        Ok(request)
    }
}

/// Parse a `<id>=<HH:MM-HH:MM>` window flag. The window text itself is
/// validated later by the engine.
pub fn parse_window_arg(value: &str) -> std::result::Result<(LocationId, String), String> {
    let (id, window) = value
        .split_once('=')
        .ok_or_else(|| format!("expected <id>=<window>, got '{value}'"))?;
    let id = id
        .trim()
        .parse::<LocationId>()
        .map_err(|err| format!("invalid location id '{id}': {err}"))?;
    Ok((id, window.trim().to_string()))
}

/// Handle the distances subcommand.
pub fn handle_distances(
    inputs: &NetworkInputs,
    format: OutputFormat,
    args: &DistancesCommandArgs,
) -> Result<()> {
    let network = inputs.load()?;
    let request = args.to_request()?;
    debug!(?request, "planning distances");

    let plan = plan_distances(&network, &request)
        .with_context(|| format!("failed to compute distances from location {}", args.from))?;
    let summary = DistanceSummary::from_plan(&plan, &network);

    for warning in &summary.warnings {
        eprintln!("warning: {warning}");
    }

    let rendered = render_summary(&summary, format)?;
    emit(&rendered, format)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> DistancesCommandArgs {
        DistancesCommandArgs {
            from: 1,
            criterion: "plain".to_string(),
            strict_criterion: false,
            traffic: false,
            windows: Vec::new(),
            windows_file: None,
            window_mode: WindowModeArg::Literal,
        }
    }

    #[test]
    fn window_arg_splits_id_and_window() {
        assert_eq!(
            parse_window_arg("2=09:00-12:00").unwrap(),
            (2, "09:00-12:00".to_string())
        );
        assert!(parse_window_arg("09:00-12:00").is_err());
        assert!(parse_window_arg("two=09:00-12:00").is_err());
    }

    #[test]
    fn request_without_windows_is_unconstrained() {
        let request = args().to_request().unwrap();
        assert!(request.windows.is_none());
        assert_eq!(request.criterion_parsing, CriterionParsing::Lenient);
    }

    #[test]
    fn inline_windows_are_attached() {
        let mut args = args();
        args.windows = vec![(2, "09:00-12:00".to_string())];
        args.window_mode = WindowModeArg::Corrected;
        args.strict_criterion = true;

        let request = args.to_request().unwrap();
        let windows = request.windows.expect("windows attached");
        assert_eq!(windows.get(2), Some("09:00-12:00"));
        assert_eq!(request.window_mode, WindowMode::Corrected);
        assert_eq!(request.criterion_parsing, CriterionParsing::Strict);
    }
}
