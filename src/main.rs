//! Ropewatch - hoist rope health analytics CLI
//!
//! Reads sensor readings as JSON (array or one object per line), runs the
//! engine and prints JSON results on stdout. Logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Assess every reading in a file
//! ropewatch --input readings.json assess
//!
//! # Simulated fleet straight into the management report
//! simulation --units 20 --ndjson | ropewatch report
//!
//! # Building comparison with a unit registry
//! ropewatch --input readings.json --registry units.json buildings
//!
//! # Show the effective configuration / check a config file
//! ropewatch config
//! ropewatch config --check ropewatch.toml
//! ```
//!
//! # Environment Variables
//!
//! - `ROPEWATCH_CONFIG`: Path to the engine config (default: ./ropewatch.toml)
//! - `RUST_LOG`: Logging level (default: info)

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ropewatch::alerts::{derive_alert, AlertRecord};
use ropewatch::fleet::{
    analyze_fleet, calculate_roi_report, compare_buildings, fleet_report_from_source,
    generate_maintenance_priority_list,
};
use ropewatch::history::{building_groups, extract_trends, fleet_snapshot};
use ropewatch::types::parse_readings;
use ropewatch::{Assessment, EngineConfig, InMemoryReadingSource, Reading, ReadingSource, RopeHealthEngine, UnitInfo};

/// Building assigned to units missing from the registry.
const UNASSIGNED_BUILDING: &str = "Unassigned";

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "ropewatch")]
#[command(about = "Elevator hoist rope health classification and fleet analytics")]
#[command(version)]
struct CliArgs {
    /// Engine config file (overrides ROPEWATCH_CONFIG and ./ropewatch.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Readings file, JSON array or newline-delimited JSON (default: stdin)
    #[arg(short, long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Unit registry: JSON array of {unit_id, building_name, ...}
    #[arg(long, value_name = "PATH")]
    registry: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Print single-line JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Full assessment of every reading
    Assess {
        /// Also derive the alert each Warning/Critical reading raises
        #[arg(long)]
        alerts: bool,
    },

    /// Fleet analysis over the latest reading of each unit
    Fleet,

    /// Maintenance queue, most urgent first
    Priorities {
        /// Only print the first N entries
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Compare buildings (uses --registry to group units)
    Buildings,

    /// Fleet ROI roll-up
    Roi,

    /// Composite management report
    Report,

    /// Chronological trend series and statistics for one unit
    Trends {
        /// Unit to inspect
        #[arg(long)]
        unit: String,
        /// Most recent readings to include
        #[arg(long, default_value = "100")]
        limit: usize,
    },

    /// Print the effective configuration as TOML, or check a config file
    Config {
        /// Validate this file instead of printing
        #[arg(long, value_name = "PATH")]
        check: Option<PathBuf>,
    },
}

// ============================================================================
// Output shapes
// ============================================================================

#[derive(Serialize)]
struct AssessOutput {
    assessments: Vec<Assessment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    alerts: Option<Vec<AlertRecord>>,
}

#[derive(Serialize)]
struct TrendsOutput {
    unit_id: String,
    trends: ropewatch::history::TrendSeries,
    summary: ropewatch::history::TrendSummary,
}

// ============================================================================
// Helpers
// ============================================================================

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(EngineConfig::load()),
    }
}

fn read_input(path: Option<&Path>) -> Result<Vec<Reading>> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read readings from stdin")?;
            buf
        }
    };

    let readings = parse_readings(&raw).context("Invalid readings")?;
    info!(count = readings.len(), "Loaded readings");
    Ok(readings)
}

fn read_registry(path: &Path) -> Result<Vec<UnitInfo>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read registry {}", path.display()))?;
    let units: Vec<UnitInfo> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid registry {}", path.display()))?;
    info!(units = units.len(), "Loaded unit registry");
    Ok(units)
}

/// Registry units first, then any unit that only appears in the readings.
fn build_source(readings: Vec<Reading>, registry: Vec<UnitInfo>) -> InMemoryReadingSource {
    let mut source = InMemoryReadingSource::new();
    let registered: Vec<String> = registry.iter().map(|u| u.unit_id.clone()).collect();
    for unit in registry {
        source.register_unit(unit);
    }

    let mut unregistered = 0usize;
    for reading in readings {
        if !registered.contains(&reading.unit_id)
            && source.latest_readings(&reading.unit_id, 1).is_empty()
        {
            source.register_unit(UnitInfo::new(&reading.unit_id, UNASSIGNED_BUILDING));
            unregistered += 1;
        }
        source.push(reading);
    }

    if unregistered > 0 && !registered.is_empty() {
        warn!(unregistered, "Readings reference units missing from the registry");
    }
    source
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let out = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{out}");
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.json_logs);

    if let SubCommand::Config { check } = &args.command {
        return match check {
            Some(path) => {
                EngineConfig::load_from_file(path)
                    .with_context(|| format!("Config check failed for {}", path.display()))?;
                info!("Config OK: {}", path.display());
                Ok(())
            }
            None => {
                let config = load_config(args.config.as_deref())?;
                print!("{}", config.to_toml()?);
                Ok(())
            }
        };
    }

    let engine = RopeHealthEngine::try_new(load_config(args.config.as_deref())?)
        .context("Engine config rejected")?;
    let readings = read_input(args.input.as_deref())?;

    match args.command {
        SubCommand::Assess { alerts } => {
            let assessments = readings
                .iter()
                .map(|r| engine.assess(r))
                .collect::<Result<Vec<_>, _>>()
                .context("Assessment failed")?;

            let alerts = alerts.then(|| {
                let now = chrono::Utc::now();
                assessments
                    .iter()
                    .filter_map(|a| derive_alert(a, now))
                    .collect::<Vec<_>>()
            });
            if let Some(raised) = &alerts {
                info!(alerts = raised.len(), "Derived alerts");
            }

            print_json(&AssessOutput { assessments, alerts }, args.compact)
        }
        SubCommand::Config { .. } => Ok(()),
        command => {
            let registry = match &args.registry {
                Some(path) => read_registry(path)?,
                None => Vec::new(),
            };
            let source = build_source(readings, registry);
            run_fleet_command(&engine, &source, command, args.compact)
        }
    }
}

fn run_fleet_command(
    engine: &RopeHealthEngine,
    source: &InMemoryReadingSource,
    command: SubCommand,
    compact: bool,
) -> Result<()> {
    match command {
        SubCommand::Fleet => {
            let report = analyze_fleet(engine, &fleet_snapshot(source)).context("Fleet analysis failed")?;
            print_json(&report, compact)
        }
        SubCommand::Priorities { limit } => {
            let mut queue = generate_maintenance_priority_list(engine, &fleet_snapshot(source))
                .context("Priority ranking failed")?;
            if let Some(limit) = limit {
                queue.truncate(limit);
            }
            print_json(&queue, compact)
        }
        SubCommand::Buildings => {
            let comparison = compare_buildings(engine, &building_groups(source))
                .context("Building comparison failed")?;
            print_json(&comparison, compact)
        }
        SubCommand::Roi => {
            let roi = calculate_roi_report(engine, &fleet_snapshot(source)).context("ROI report failed")?;
            print_json(&roi, compact)
        }
        SubCommand::Report => {
            let report = fleet_report_from_source(engine, source).context("Fleet report failed")?;
            print_json(&report, compact)
        }
        SubCommand::Trends { unit, limit } => {
            let history = source.latest_readings(&unit, limit);
            if history.is_empty() {
                anyhow::bail!("No readings for unit {unit}");
            }
            let trends = extract_trends(&history);
            let summary = trends.summary();
            print_json(&TrendsOutput { unit_id: unit, trends, summary }, compact)
        }
        SubCommand::Assess { .. } | SubCommand::Config { .. } => Ok(()),
    }
}
