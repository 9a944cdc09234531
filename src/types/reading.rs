//! Sensor readings from hoist ropes and the metric catalogue they carry

use serde::{Deserialize, Serialize};

use super::EngineError;

/// One sensor snapshot for one elevator unit.
///
/// Readings are produced outside the engine (field sensors or the simulator)
/// and consumed read-only. Values are deliberately not range-checked: a
/// physically implausible but finite value simply drives the tier and risk
/// score. Legacy field names from the monitoring database are accepted as
/// aliases on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Elevator identifier
    #[serde(alias = "elevator_id")]
    pub unit_id: String,
    /// ISO-8601 timestamp of the snapshot
    pub timestamp: String,
    /// Rope tension (N)
    pub tension: f64,
    /// Vibration velocity (mm/s)
    pub vibration: f64,
    /// Wear (0-100 %)
    #[serde(alias = "wear")]
    pub wear_pct: f64,
    /// Cumulative load cycles, non-decreasing per unit over time
    pub load_cycles: u64,
    /// Rope temperature (°C)
    pub temperature: f64,
    /// Measured rope diameter (mm, nominal ~13)
    #[serde(alias = "rope_diameter")]
    pub rope_diameter_mm: f64,
    /// Corrosion (0-100 %)
    #[serde(alias = "corrosion_level")]
    pub corrosion_pct: f64,
    /// Rope elongation (mm)
    pub elongation: f64,
    /// Current car load (kg)
    #[serde(alias = "load_weight")]
    pub load_weight_kg: f64,
}

impl Reading {
    /// Parse a single reading from a JSON object.
    pub fn from_json(raw: &str) -> Result<Self, EngineError> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| EngineError::Parse(e.to_string()))?;
        Self::from_value(value)
    }

    /// Convert an already-parsed JSON value into a validated reading.
    ///
    /// A missing or non-numeric field is reported as `InvalidInput` naming the
    /// offending field, so the request layer can echo it back to the sender.
    /// `load_cycles` may arrive as a whole float (`1500.0`).
    pub fn from_value(mut value: serde_json::Value) -> Result<Self, EngineError> {
        let Some(object) = value.as_object_mut() else {
            return Err(EngineError::invalid("reading", "expected a JSON object"));
        };

        for field in REQUIRED_FIELDS {
            let present = field
                .names
                .iter()
                .find_map(|name| object.get(*name))
                .filter(|v| !v.is_null());
            match present {
                None => return Err(EngineError::invalid(field.names[0], "field is required")),
                Some(v) if field.numeric && !v.is_number() => {
                    return Err(EngineError::invalid(field.names[0], "must be numeric"));
                }
                Some(_) => {}
            }
        }
        normalize_load_cycles(object)?;

        let reading: Self = serde_json::from_value(value).map_err(|e| {
            // Remaining failures are type mismatches serde catches
            EngineError::invalid("reading", &e.to_string())
        })?;
        reading.validate()?;
        Ok(reading)
    }

    /// Reject readings the engine cannot reason about.
    ///
    /// NaN and infinities make every threshold comparison false and would
    /// silently classify a broken sensor as Healthy.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.unit_id.trim().is_empty() {
            return Err(EngineError::invalid("unit_id", "must not be empty"));
        }
        for metric in Metric::ALL {
            let value = self.value(metric);
            if !value.is_finite() {
                return Err(EngineError::invalid(
                    metric.field_name(),
                    &format!("must be a finite number, got {value}"),
                ));
            }
        }
        Ok(())
    }

    /// Value of one monitored metric.
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Tension => self.tension,
            Metric::Vibration => self.vibration,
            Metric::Wear => self.wear_pct,
            Metric::Temperature => self.temperature,
            Metric::RopeDiameter => self.rope_diameter_mm,
            Metric::Corrosion => self.corrosion_pct,
            Metric::Elongation => self.elongation,
            Metric::LoadWeight => self.load_weight_kg,
        }
    }
}

/// Rewrite a whole-number float `load_cycles` as an integer.
fn normalize_load_cycles(
    object: &mut serde_json::Map<String, serde_json::Value>,
) -> Result<(), EngineError> {
    let Some(cycles) = object.get_mut("load_cycles") else {
        return Ok(());
    };
    if cycles.is_u64() {
        return Ok(());
    }
    match cycles.as_f64() {
        Some(x) if x >= 0.0 && x.fract() == 0.0 && x <= u64::MAX as f64 => {
            *cycles = serde_json::Value::from(x as u64);
            Ok(())
        }
        _ => Err(EngineError::invalid(
            "load_cycles",
            "must be a non-negative whole number",
        )),
    }
}

/// Validate a batch, failing on the first unusable reading.
///
/// Fleet aggregations call this before scoring anything, so one broken
/// sensor rejects the whole batch instead of skewing the rankings.
pub fn validate_readings(readings: &[Reading]) -> Result<(), EngineError> {
    readings.iter().try_for_each(Reading::validate)
}

/// Parse a batch of readings.
///
/// Accepts either a JSON array or newline-delimited JSON objects (the
/// simulator emits both). Fails on the first invalid reading.
pub fn parse_readings(raw: &str) -> Result<Vec<Reading>, EngineError> {
    let trimmed = raw.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        let values: Vec<serde_json::Value> =
            serde_json::from_str(trimmed).map_err(|e| EngineError::Parse(e.to_string()))?;
        return values.into_iter().map(Reading::from_value).collect();
    }

    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Reading::from_json)
        .collect()
}

struct RequiredField {
    names: &'static [&'static str],
    numeric: bool,
}

const REQUIRED_FIELDS: [RequiredField; 11] = [
    RequiredField { names: &["unit_id", "elevator_id"], numeric: false },
    RequiredField { names: &["timestamp"], numeric: false },
    RequiredField { names: &["tension"], numeric: true },
    RequiredField { names: &["vibration"], numeric: true },
    RequiredField { names: &["wear_pct", "wear"], numeric: true },
    RequiredField { names: &["load_cycles"], numeric: true },
    RequiredField { names: &["temperature"], numeric: true },
    RequiredField { names: &["rope_diameter_mm", "rope_diameter"], numeric: true },
    RequiredField { names: &["corrosion_pct", "corrosion_level"], numeric: true },
    RequiredField { names: &["elongation"], numeric: true },
    RequiredField { names: &["load_weight_kg", "load_weight"], numeric: true },
];

// ============================================================================
// Metric catalogue
// ============================================================================

/// Which side of a threshold is the dangerous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Lower values are worse (tension, rope diameter)
    Below,
    /// Higher values are worse
    Above,
}

/// The eight metrics checked by the classifier.
///
/// `Metric::ALL` is the fixed evaluation order; it determines the order of
/// issues in a classification's reason and triggered-metric list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Tension,
    Vibration,
    Wear,
    Temperature,
    RopeDiameter,
    Corrosion,
    Elongation,
    LoadWeight,
}

impl Metric {
    pub const ALL: [Metric; 8] = [
        Metric::Tension,
        Metric::Vibration,
        Metric::Wear,
        Metric::Temperature,
        Metric::RopeDiameter,
        Metric::Corrosion,
        Metric::Elongation,
        Metric::LoadWeight,
    ];

    pub fn direction(self) -> Direction {
        match self {
            Metric::Tension | Metric::RopeDiameter => Direction::Below,
            _ => Direction::Above,
        }
    }

    /// Field name on [`Reading`].
    pub fn field_name(self) -> &'static str {
        match self {
            Metric::Tension => "tension",
            Metric::Vibration => "vibration",
            Metric::Wear => "wear_pct",
            Metric::Temperature => "temperature",
            Metric::RopeDiameter => "rope_diameter_mm",
            Metric::Corrosion => "corrosion_pct",
            Metric::Elongation => "elongation",
            Metric::LoadWeight => "load_weight_kg",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Metric::Tension => "N",
            Metric::Vibration => "mm/s",
            Metric::Wear | Metric::Corrosion => "%",
            Metric::Temperature => "°C",
            Metric::RopeDiameter | Metric::Elongation => "mm",
            Metric::LoadWeight => "kg",
        }
    }

    /// Issue wording when the critical bound is crossed.
    pub fn critical_phrase(self) -> &'static str {
        match self {
            Metric::Tension => "Tension critically low",
            Metric::Vibration => "Vibration critically high",
            Metric::Wear => "Wear level critical",
            Metric::Temperature => "Temperature critically high",
            Metric::RopeDiameter => "Rope diameter critically reduced",
            Metric::Corrosion => "Corrosion critically high",
            Metric::Elongation => "Elongation critically high",
            Metric::LoadWeight => "Load weight critically high",
        }
    }

    /// Issue wording when only the warning bound is crossed.
    pub fn warning_phrase(self) -> &'static str {
        match self {
            Metric::Tension => "Tension below optimal",
            Metric::Vibration => "Vibration elevated",
            Metric::Wear => "Wear level elevated",
            Metric::Temperature => "Temperature elevated",
            Metric::RopeDiameter => "Rope diameter reduced",
            Metric::Corrosion => "Corrosion detected",
            Metric::Elongation => "Elongation elevated",
            Metric::LoadWeight => "Load weight elevated",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.field_name())
    }
}
