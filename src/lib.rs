//! Geoslim: shrink GeoJSON map data for the web.
//!
//! Geoslim reads a GeoJSON `FeatureCollection`, simplifies polygon
//! boundaries with the Ramer-Douglas-Peucker algorithm, remaps feature
//! properties to a small allow-list, and writes the result back out as
//! compact JSON.
//!
//! # Modules
//!
//! - [`model`]: In-memory feature collections and the GeoJSON reader/writer
//! - [`simplify`]: Ring simplification
//! - [`rewrite`]: Per-feature simplification and property remapping
//! - [`config`]: YAML configuration
//! - [`inspect`]: Collection statistics
//! - [`error`]: Error types for geoslim operations
//!
//! # Example
//!
//! ```
//! use geoslim::model::io_geojson::{from_geojson_str, to_geojson_string};
//! use geoslim::model::OutputStyle;
//! use geoslim::rewrite::{rewrite_collection, RewriteOptions};
//!
//! let mut collection = from_geojson_str(
//!     r#"{"type":"FeatureCollection","features":[{"type":"Feature",
//!         "geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0.00001],[2,0],[0,0]]]},
//!         "properties":{"STATE":"CA"}}]}"#,
//! )?;
//! let report = rewrite_collection(&mut collection, &RewriteOptions::default())?;
//! assert_eq!(report.output_vertices(), 3);
//!
//! let json = to_geojson_string(&collection, OutputStyle::Compact)?;
//! assert!(json.contains(r#""coordinates":[[[0,0],[2,0],[0,0]]]"#));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod error;
pub mod inspect;
pub mod model;
pub mod rewrite;
pub mod simplify;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};

pub use error::GeoslimError;

use config::Config;
use model::{io_geojson, GeometryKind, OutputStyle};
use rewrite::{PropertyRule, RewriteReport};

/// The geoslim CLI application.
#[derive(Parser)]
#[command(name = "geoslim")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Simplify geometries and remap properties of a GeoJSON file.
    Simplify(SimplifyArgs),
    /// Show statistics about a GeoJSON file.
    Inspect(InspectArgs),
}

/// Output format for reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

/// Arguments for the simplify subcommand.
#[derive(clap::Args)]
struct SimplifyArgs {
    /// Input GeoJSON file.
    input: PathBuf,

    /// Output GeoJSON file.
    #[arg(short, long)]
    output: PathBuf,

    /// YAML configuration file.
    #[arg(long, env = "GEOSLIM_CONFIG")]
    config: Option<PathBuf>,

    /// Tolerance for Polygon and MultiPolygon, in coordinate units.
    #[arg(long, allow_negative_numbers = true)]
    tolerance: Option<f64>,

    /// Tolerance for one geometry type (repeatable).
    #[arg(long = "tolerance-for", value_name = "KIND=TOLERANCE")]
    tolerance_for: Vec<String>,

    /// Property to copy to --rename-to.
    #[arg(long, requires = "rename_to")]
    rename_from: Option<String>,

    /// Property receiving the value of --rename-from.
    #[arg(long, requires = "rename_from")]
    rename_to: Option<String>,

    /// Properties to keep after renaming (comma-separated).
    #[arg(long, value_delimiter = ',', requires = "rename_from")]
    keep: Vec<String>,

    /// Top-level member to keep even if configured for removal (repeatable).
    #[arg(long = "keep-member", value_name = "NAME")]
    keep_member: Vec<String>,

    /// Write indented JSON instead of compact JSON.
    #[arg(long)]
    pretty: bool,

    /// Number of worker threads.
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    report: ReportFormat,
}

/// Arguments for the inspect subcommand.
#[derive(clap::Args)]
struct InspectArgs {
    /// Input GeoJSON file.
    input: PathBuf,

    /// Number of property keys to list.
    #[arg(long, default_value_t = 10)]
    top_keys: usize,

    /// Output format for the report.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    output: ReportFormat,
}

/// Run the geoslim CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), GeoslimError> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .format_timestamp(None)
        .init();

    match cli.command {
        Some(Commands::Simplify(args)) => run_simplify(args),
        Some(Commands::Inspect(args)) => run_inspect(args),
        None => {
            println!("geoslim {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Simplify and slim down GeoJSON map data.");
            println!();
            println!("Run 'geoslim --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the simplify subcommand.
fn run_simplify(args: SimplifyArgs) -> Result<(), GeoslimError> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    apply_overrides(&mut config, &args)?;

    // Everything is validated before the input is touched
    let options = config.rewrite_options()?;

    log::info!("reading {}", args.input.display());
    let input_bytes = std::fs::metadata(&args.input)?.len();
    let mut collection = io_geojson::read_geojson(&args.input)?;

    let mut report = with_jobs(args.jobs, || {
        rewrite::rewrite_collection(&mut collection, &options)
    })??;
    report.dropped_members = rewrite::drop_members(&mut collection, &config.drop_members);

    log::info!("writing {}", args.output.display());
    let output_bytes = io_geojson::write_geojson(&args.output, &collection, config.output)?;
    report.input_bytes = Some(input_bytes);
    report.output_bytes = Some(output_bytes);

    print_report(&report, args.report)
}

/// Folds command-line flags into the loaded configuration.
fn apply_overrides(config: &mut Config, args: &SimplifyArgs) -> Result<(), GeoslimError> {
    if let Some(tolerance) = args.tolerance {
        for kind in [GeometryKind::Polygon, GeometryKind::MultiPolygon] {
            config.tolerances.insert(kind.name().to_string(), tolerance);
        }
    }

    for arg in &args.tolerance_for {
        let (kind, value) = parse_kind_tolerance(arg)?;
        config.tolerances.insert(kind, value);
    }

    if let (Some(from), Some(to)) = (&args.rename_from, &args.rename_to) {
        config.property_rule = Some(PropertyRule::new(from, to, args.keep.iter().cloned()));
    }

    config
        .drop_members
        .retain(|member| !args.keep_member.contains(member));

    if args.pretty {
        config.output = OutputStyle::Pretty;
    }

    Ok(())
}

/// Parses `KIND=TOLERANCE`.
fn parse_kind_tolerance(arg: &str) -> Result<(String, f64), GeoslimError> {
    let (kind, value) = arg.split_once('=').ok_or_else(|| {
        GeoslimError::InvalidArgument(format!(
            "--tolerance-for expects KIND=TOLERANCE, got '{arg}'"
        ))
    })?;
    let value = value.trim().parse::<f64>().map_err(|_| {
        GeoslimError::InvalidArgument(format!(
            "--tolerance-for: '{value}' is not a number"
        ))
    })?;
    Ok((kind.trim().to_string(), value))
}

/// Runs `f` on a dedicated pool of `jobs` threads, or the global pool.
fn with_jobs<T, F>(jobs: Option<usize>, f: F) -> Result<T, GeoslimError>
where
    T: Send,
    F: FnOnce() -> T + Send,
{
    match jobs {
        None => Ok(f()),
        Some(0) => Err(GeoslimError::InvalidArgument(
            "--jobs must be at least 1".to_string(),
        )),
        #[cfg(feature = "rayon")]
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| {
                    GeoslimError::InvalidArgument(format!("cannot start {threads} thread(s): {e}"))
                })?;
            Ok(pool.install(f))
        }
        #[cfg(not(feature = "rayon"))]
        Some(threads) => {
            log::warn!("--jobs {threads} ignored: built without parallel support");
            Ok(f())
        }
    }
}

fn print_report(report: &RewriteReport, format: ReportFormat) -> Result<(), GeoslimError> {
    match format {
        ReportFormat::Text => print!("{report}"),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}

/// Execute the inspect subcommand.
fn run_inspect(args: InspectArgs) -> Result<(), GeoslimError> {
    let collection = io_geojson::read_geojson(&args.input)?;

    let opts = inspect::InspectOptions {
        top_keys: args.top_keys,
        ..Default::default()
    };
    let report = inspect::inspect_collection(&collection, &opts);

    match args.output {
        ReportFormat::Text => print!("{report}"),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}
