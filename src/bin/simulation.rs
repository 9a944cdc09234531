//! Hoist Rope Fleet Simulation
//!
//! Generates synthetic rope sensor readings for exercising Ropewatch.
//! Every unit gets a profile:
//! - Healthy: nominal ropes, very slow degradation
//! - Degrading: readings around the warning bounds, moderate degradation
//! - Critical: readings past the critical bounds, fast degradation
//!
//! Each reading adds noise around the profile's base values, then the base
//! values ratchet towards failure.
//!
//! # Usage
//! ```bash
//! ./simulation --seed 7 --readings 20 --registry units.json > readings.json
//! ./ropewatch --input readings.json --registry units.json buildings
//! ./simulation --units 12 --ndjson | ./ropewatch report
//! ```

use std::io::{self, Write};
use std::path::PathBuf;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use clap::Parser;
use rand::prelude::*;
use rand_distr::{Distribution, Uniform, WeightedIndex};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ropewatch::analysis::round2;
use ropewatch::{Reading, UnitInfo};

// ============================================================================
// Fleet Layout
// ============================================================================

/// Buildings and their cities.
const BUILDINGS: [(&str, &str); 5] = [
    ("Tech Tower A", "Mumbai"),
    ("Business Park B", "Bangalore"),
    ("Corporate Hub C", "Delhi"),
    ("Innovation Center", "Hyderabad"),
    ("Commerce Plaza", "Pune"),
];

const ROPE_TYPES: [&str; 3] = ["8x19 Steel Wire Rope", "8x25 Filler Wire Rope", "6x36 Wire Rope"];

/// Healthy / degrading / critical share of a mixed fleet (percent).
const PROFILE_MIX: [u32; 3] = [60, 30, 10];

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "rope-simulation")]
#[command(about = "Synthetic hoist rope sensor data for Ropewatch")]
#[command(version = "1.0")]
struct Args {
    /// Number of units; default lays out 3-5 units in each of 5 buildings
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=10_000))]
    units: Option<u32>,

    /// Readings per unit
    #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..=10_000))]
    readings: u32,

    /// Days of history the readings are spread over
    #[arg(short, long, default_value = "7", value_parser = clap::value_parser!(u32).range(1..=365))]
    days: u32,

    /// Force every unit to one profile (default: 60/30/10 mix)
    #[arg(long, value_enum)]
    profile: Option<HealthProfile>,

    /// Emit one JSON object per line instead of a JSON array
    #[arg(long)]
    ndjson: bool,

    /// Also write the unit registry (JSON array) to this file
    #[arg(long, value_name = "PATH")]
    registry: Option<PathBuf>,

    /// End of the simulated window, e.g. 2025-10-31T22:00:00 (default: now, UTC)
    #[arg(long)]
    end: Option<String>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Suppress the run log (only output readings)
    #[arg(short, long)]
    quiet: bool,
}

// ============================================================================
// Rope Profiles
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum HealthProfile {
    Healthy,
    Degrading,
    Critical,
}

impl HealthProfile {
    const ALL: [HealthProfile; 3] = [
        HealthProfile::Healthy,
        HealthProfile::Degrading,
        HealthProfile::Critical,
    ];

    fn name(self) -> &'static str {
        match self {
            HealthProfile::Healthy => "healthy",
            HealthProfile::Degrading => "degrading",
            HealthProfile::Critical => "critical",
        }
    }
}

/// Base values a unit's readings scatter around.
#[derive(Debug, Clone)]
struct RopeState {
    tension: f64,
    vibration: f64,
    wear: f64,
    temperature: f64,
    rope_diameter: f64,
    corrosion: f64,
    elongation: f64,
    load_weight: f64,
    load_cycles: u64,
    degradation_rate: f64,
}

impl RopeState {
    fn new(profile: HealthProfile, rng: &mut StdRng) -> Self {
        match profile {
            HealthProfile::Healthy => Self {
                tension: rng.gen_range(93.0..98.0),
                vibration: rng.gen_range(8.0..13.0),
                wear: rng.gen_range(20.0..40.0),
                temperature: rng.gen_range(28.0..35.0),
                rope_diameter: rng.gen_range(12.7..13.1),
                corrosion: rng.gen_range(5.0..15.0),
                elongation: rng.gen_range(1.0..2.5),
                load_weight: rng.gen_range(350.0..550.0),
                load_cycles: rng.gen_range(1_000..=10_000),
                degradation_rate: 0.001,
            },
            HealthProfile::Degrading => Self {
                tension: rng.gen_range(88.0..92.0),
                vibration: rng.gen_range(14.0..18.0),
                wear: rng.gen_range(50.0..65.0),
                temperature: rng.gen_range(38.0..45.0),
                rope_diameter: rng.gen_range(12.3..12.6),
                corrosion: rng.gen_range(20.0..30.0),
                elongation: rng.gen_range(3.0..4.0),
                load_weight: rng.gen_range(550.0..650.0),
                load_cycles: rng.gen_range(25_000..=40_000),
                degradation_rate: 0.005,
            },
            HealthProfile::Critical => Self {
                tension: rng.gen_range(80.0..86.0),
                vibration: rng.gen_range(19.0..24.0),
                wear: rng.gen_range(75.0..90.0),
                temperature: rng.gen_range(48.0..55.0),
                rope_diameter: rng.gen_range(11.5..12.1),
                corrosion: rng.gen_range(40.0..60.0),
                elongation: rng.gen_range(5.0..7.0),
                load_weight: rng.gen_range(700.0..850.0),
                load_cycles: rng.gen_range(45_000..=55_000),
                degradation_rate: 0.01,
            },
        }
    }
}

struct SimulatedUnit {
    info: UnitInfo,
    profile: HealthProfile,
    state: RopeState,
}

// ============================================================================
// Simulation State
// ============================================================================

/// Per-reading sensor noise bands.
struct Noise {
    tension: Uniform<f64>,
    vibration: Uniform<f64>,
    wear: Uniform<f64>,
    temperature: Uniform<f64>,
    rope_diameter: Uniform<f64>,
    corrosion: Uniform<f64>,
    elongation: Uniform<f64>,
    load_weight: Uniform<f64>,
}

impl Noise {
    fn new() -> Self {
        Self {
            tension: Uniform::new_inclusive(-2.0, 2.0),
            vibration: Uniform::new_inclusive(-1.5, 1.5),
            wear: Uniform::new_inclusive(-2.0, 2.0),
            temperature: Uniform::new_inclusive(-3.0, 3.0),
            rope_diameter: Uniform::new_inclusive(-0.2, 0.1),
            corrosion: Uniform::new_inclusive(-2.0, 2.0),
            elongation: Uniform::new_inclusive(-0.3, 0.3),
            load_weight: Uniform::new_inclusive(-100.0, 100.0),
        }
    }
}

struct Simulation {
    rng: StdRng,
    noise: Noise,
    units: Vec<SimulatedUnit>,
    readings_generated: u64,
}

impl Simulation {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            noise: Noise::new(),
            units: Vec::new(),
            readings_generated: 0,
        }
    }

    /// Lay out the fleet: `count` units round-robin over the buildings, or
    /// 3-5 units per building when no count is given.
    fn build_fleet(
        &mut self,
        count: Option<u32>,
        forced: Option<HealthProfile>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mix = WeightedIndex::new(PROFILE_MIX)?;

        let mut slots: Vec<(String, usize)> = Vec::new();
        match count {
            Some(n) => {
                for k in 0..n as usize {
                    slots.push((format!("ELEV-{:03}", k + 1), k % BUILDINGS.len()));
                }
            }
            None => {
                for b in 0..BUILDINGS.len() {
                    let per_building = self.rng.gen_range(3..=5);
                    for j in 0..per_building {
                        slots.push((format!("ELEV-{:03}", b * 5 + j + 1), b));
                    }
                }
            }
        }

        for (unit_id, building) in slots {
            let profile = forced.unwrap_or_else(|| HealthProfile::ALL[mix.sample(&mut self.rng)]);
            let state = RopeState::new(profile, &mut self.rng);
            let info = self.unit_info(&unit_id, building);
            self.units.push(SimulatedUnit { info, profile, state });
        }
        Ok(())
    }

    fn unit_info(&mut self, unit_id: &str, building: usize) -> UnitInfo {
        let (building_name, location) = BUILDINGS[building];
        let mut info = UnitInfo::new(unit_id, building_name);
        info.location = Some(location.to_string());
        info.floor_range = Some(format!("B2 to {}", self.rng.gen_range(15..=30)));
        info.installation_date = Some(format!(
            "{}-{:02}-15",
            self.rng.gen_range(2015..=2022),
            self.rng.gen_range(1..=12)
        ));
        info.last_maintenance = Some(format!(
            "2025-{:02}-{:02}",
            self.rng.gen_range(8..=10),
            self.rng.gen_range(1..=28)
        ));
        info.rope_type = ROPE_TYPES.choose(&mut self.rng).map(|s| (*s).to_string());
        info
    }

    /// Next reading for unit `index`, then degrade its base values.
    fn next_reading(&mut self, index: usize, timestamp: NaiveDateTime) -> Reading {
        let noise = &self.noise;
        let rng = &mut self.rng;
        let unit = &mut self.units[index];
        let s = &mut unit.state;

        let reading = Reading {
            unit_id: unit.info.unit_id.clone(),
            timestamp: timestamp.format("%Y-%m-%dT%H:%M:%S").to_string(),
            tension: round2((s.tension + noise.tension.sample(rng)).max(70.0)),
            vibration: round2((s.vibration + noise.vibration.sample(rng)).max(5.0)),
            wear_pct: round2((s.wear + noise.wear.sample(rng)).clamp(0.0, 100.0)),
            load_cycles: s.load_cycles,
            temperature: round2((s.temperature + noise.temperature.sample(rng)).max(20.0)),
            rope_diameter_mm: round2((s.rope_diameter + noise.rope_diameter.sample(rng)).max(10.0)),
            corrosion_pct: round2((s.corrosion + noise.corrosion.sample(rng)).clamp(0.0, 100.0)),
            elongation: round2((s.elongation + noise.elongation.sample(rng)).max(0.0)),
            load_weight_kg: round2((s.load_weight + noise.load_weight.sample(rng)).max(0.0)),
        };

        s.load_cycles += rng.gen_range(1..=5);

        let rate = s.degradation_rate;
        s.tension -= rate * rng.gen_range(0.5..1.5);
        s.vibration += rate * rng.gen_range(0.5..1.5);
        s.wear += rate * rng.gen_range(2.0..5.0);
        s.temperature += rate * rng.gen_range(0.3..0.8);
        s.rope_diameter -= rate * rng.gen_range(0.01..0.03);
        s.corrosion += rate * rng.gen_range(1.0..3.0);
        s.elongation += rate * rng.gen_range(0.02..0.05);

        self.readings_generated += 1;
        reading
    }
}

fn parse_end(end: Option<&str>) -> Result<NaiveDateTime, Box<dyn std::error::Error>> {
    match end {
        Some(raw) => Ok(raw
            .parse::<DateTime<Utc>>()
            .map(|dt| dt.naive_utc())
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))?),
        None => Ok(Utc::now().naive_utc()),
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_level = if args.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let mut sim = Simulation::new(args.seed);
    sim.build_fleet(args.units, args.profile)?;

    let end = parse_end(args.end.as_deref())?;
    let window = Duration::days(i64::from(args.days));
    let start = end - window;
    let step_seconds = window.num_seconds() / i64::from(args.readings);

    info!(
        units = sim.units.len(),
        readings_per_unit = args.readings,
        days = args.days,
        seed = ?args.seed,
        "Simulation start"
    );
    for profile in HealthProfile::ALL {
        let count = sim.units.iter().filter(|u| u.profile == profile).count();
        info!(profile = profile.name(), units = count, "Profile mix");
    }

    if let Some(path) = &args.registry {
        let registry: Vec<&UnitInfo> = sim.units.iter().map(|u| &u.info).collect();
        std::fs::write(path, serde_json::to_string_pretty(&registry)?)?;
        info!(path = %path.display(), "Registry written");
    }

    // Rounds run oldest to newest so every unit's readings arrive in time order
    let mut readings = Vec::with_capacity(sim.units.len() * args.readings as usize);
    for round in 1..=i64::from(args.readings) {
        let round_time = start + Duration::seconds(step_seconds * round);
        for index in 0..sim.units.len() {
            let jitter = Duration::seconds(sim.rng.gen_range(-600..=0));
            readings.push(sim.next_reading(index, round_time + jitter));
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.ndjson {
        for reading in &readings {
            writeln!(out, "{}", serde_json::to_string(reading)?)?;
        }
    } else {
        writeln!(out, "{}", serde_json::to_string_pretty(&readings)?)?;
    }
    out.flush()?;

    info!(readings = sim.readings_generated, "Simulation complete");
    Ok(())
}
