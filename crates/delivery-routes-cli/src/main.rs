mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use delivery_routes_cli::output::OutputFormat;
use delivery_routes_lib::LocationId;

use commands::distances::{handle_distances, parse_window_arg, DistancesCommandArgs, WindowModeArg};
use commands::locations::handle_locations;
use commands::NetworkInputs;

#[derive(Parser, Debug)]
#[command(author, version, about = "Delivery route distance utilities")]
struct Cli {
    /// Locations CSV (`id,name`). Falls back to DELIVERY_ROUTES_LOCATIONS.
    #[arg(long, global = true)]
    locations: Option<PathBuf>,

    /// Paths CSV (`from_location,to_location,distance,traffic_factor`).
    /// Falls back to DELIVERY_ROUTES_PATHS.
    #[arg(long, global = true)]
    paths: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the loaded locations.
    Locations,
    /// Compute shortest distances from a start location to every other location.
    Distances {
        /// Start location id.
        #[arg(long = "from")]
        from: LocationId,
        /// Optimization criterion: plain, cost or time.
        #[arg(long, default_value = "plain")]
        criterion: String,
        /// Reject unknown criteria instead of falling back to plain.
        #[arg(long)]
        strict_criterion: bool,
        /// Multiply path distances by their traffic factor.
        #[arg(long)]
        traffic: bool,
        /// Delivery window for a location, as `<id>=HH:MM-HH:MM`. Repeatable.
        #[arg(long = "window", value_parser = parse_window_arg)]
        windows: Vec<(LocationId, String)>,
        /// Delivery windows CSV (`location,window`).
        #[arg(long = "windows")]
        windows_file: Option<PathBuf>,
        /// How window strings are turned into cutoffs.
        #[arg(long, value_enum, default_value_t = WindowModeArg::Literal)]
        window_mode: WindowModeArg,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let inputs = NetworkInputs::resolve(cli.locations, cli.paths)?;

    match cli.command {
        Command::Locations => handle_locations(&inputs, cli.format),
        Command::Distances {
            from,
            criterion,
            strict_criterion,
            traffic,
            windows,
            windows_file,
            window_mode,
        } => {
            let args = DistancesCommandArgs {
                from,
                criterion,
                strict_criterion,
                traffic,
                windows,
                windows_file,
                window_mode,
            };
            handle_distances(&inputs, cli.format, &args)
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
