//! Engine Configuration - threshold table, cost model and model constants as TOML
//!
//! Every constant the analytics use is a field in this module. Each struct
//! implements `Default` with the reference values, so a missing or empty
//! config file reproduces the stock behaviour exactly.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::types::{Direction, Metric};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "ROPEWATCH_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "ropewatch.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration handed to [`crate::analysis::RopeHealthEngine`].
///
/// Load with `EngineConfig::load()` which searches:
/// 1. `$ROPEWATCH_CONFIG`
/// 2. `./ropewatch.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Warning/critical boundaries for the eight monitored metrics
    #[serde(default)]
    pub thresholds: ThresholdConfig,

    /// Monetary constants (INR) and emergency downtime assumption
    #[serde(default)]
    pub costs: CostModel,

    /// Weighted-sum risk score terms
    #[serde(default)]
    pub risk: RiskModelConfig,

    /// Remaining-life estimator constants
    #[serde(default)]
    pub life: LifeModelConfig,

    /// Probability heuristics used by the savings calculator
    #[serde(default)]
    pub savings: SavingsHeuristics,

    /// Fleet ranking and prioritisation policy
    #[serde(default)]
    pub fleet: FleetPolicy,
}

impl EngineConfig {
    /// Load configuration using the standard search order:
    /// 1. `$ROPEWATCH_CONFIG` environment variable
    /// 2. `./ropewatch.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded engine config from {CONFIG_ENV_VAR}");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {CONFIG_ENV_VAR}, falling back");
                    }
                }
            } else {
                warn!(path = %path, "{CONFIG_ENV_VAR} points to non-existent file, falling back");
            }
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded engine config from ./{LOCAL_CONFIG_FILE}");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{LOCAL_CONFIG_FILE}, using defaults");
                }
            }
        }

        info!("No {LOCAL_CONFIG_FILE} found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    ///
    /// Unknown keys only produce warnings; parse and validation failures are
    /// returned as errors.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Write the config to disk, e.g. to seed an operator-editable file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Engine config saved");
        Ok(())
    }

    /// Validate all values for internal consistency.
    ///
    /// Rules:
    /// - Critical bounds must be at least as severe as warning bounds, in the
    ///   metric's own direction
    /// - Costs and hours must be non-negative
    /// - Probabilities must lie in [0, 1]
    /// - Anything used as a divisor must be positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        for metric in Metric::ALL {
            let bounds = self.thresholds.bounds(metric);
            Self::check_escalation(metric, bounds, &mut errors);
        }

        let c = &self.costs;
        for (name, value) in [
            ("costs.rope_replacement_inr", c.rope_replacement_inr),
            ("costs.planned_replacement_inr", c.planned_replacement_inr),
            ("costs.emergency_downtime_per_hour_inr", c.emergency_downtime_per_hour_inr),
            ("costs.emergency_response_inr", c.emergency_response_inr),
            ("costs.preventive_inspection_inr", c.preventive_inspection_inr),
            ("costs.average_emergency_downtime_hours", c.average_emergency_downtime_hours),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("{name} must be a finite, non-negative number (got {value})"));
            }
        }

        let r = &self.risk;
        for (name, value) in [
            ("risk.tension_reference_n", r.tension_reference_n),
            ("risk.vibration_scale_mm_s", r.vibration_scale_mm_s),
            ("risk.temperature_scale_c", r.temperature_scale_c),
            ("risk.elongation_scale_mm", r.elongation_scale_mm),
        ] {
            if !value.is_finite() || value <= 0.0 {
                errors.push(format!("{name} must be > 0 (used as a divisor, got {value})"));
            }
        }
        for (name, value) in [
            ("risk.tension_weight", r.tension_weight),
            ("risk.vibration_weight", r.vibration_weight),
            ("risk.wear_weight", r.wear_weight),
            ("risk.temperature_weight", r.temperature_weight),
            ("risk.corrosion_weight", r.corrosion_weight),
            ("risk.elongation_weight", r.elongation_weight),
            ("risk.diameter_weight_per_mm", r.diameter_weight_per_mm),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("{name} must be a finite, non-negative weight (got {value})"));
            }
        }
        if !r.nominal_diameter_mm.is_finite() {
            errors.push("risk.nominal_diameter_mm must be finite".to_string());
        }

        let l = &self.life;
        if l.base_life_cycles == 0 {
            errors.push("life.base_life_cycles must be > 0".to_string());
        }
        if l.cycles_per_day == 0 {
            errors.push("life.cycles_per_day must be > 0".to_string());
        }
        if !l.temperature_limit_c.is_finite() || l.temperature_limit_c <= 0.0 {
            errors.push(format!(
                "life.temperature_limit_c must be > 0 (got {})",
                l.temperature_limit_c
            ));
        }
        if !(0.0..=1.0).contains(&l.min_temperature_factor) {
            errors.push(format!(
                "life.min_temperature_factor must be in [0, 1] (got {})",
                l.min_temperature_factor
            ));
        }
        for (name, value) in [
            ("life.high_confidence", l.high_confidence),
            ("life.low_confidence", l.low_confidence),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                errors.push(format!("{name} must be in (0, 1] (got {value})"));
            }
        }

        let s = &self.savings;
        for (name, value) in [
            ("savings.escalation_probability", s.escalation_probability),
            ("savings.annual_failure_probability", s.annual_failure_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                errors.push(format!("{name} must be in [0, 1] (got {value})"));
            }
        }
        if s.amortization_months == 0 {
            errors.push("savings.amortization_months must be > 0".to_string());
        }

        let f = &self.fleet;
        if f.top_k == 0 {
            errors.push("fleet.top_k must be > 0".to_string());
        }
        if f.urgent_days > f.soon_days {
            errors.push(format!(
                "fleet.urgent_days ({}) must be <= fleet.soon_days ({})",
                f.urgent_days, f.soon_days
            ));
        }
        for (name, value) in [
            ("fleet.urgent_bonus", f.urgent_bonus),
            ("fleet.soon_bonus", f.soon_bonus),
            ("fleet.max_priority", f.max_priority),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("{name} must be a finite, non-negative number (got {value})"));
            }
        }

        let (range_errors, range_warnings) = super::validation::validate_physical_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_escalation(metric: Metric, bounds: MetricBounds, errors: &mut Vec<String>) {
        let MetricBounds { warning, critical } = bounds;
        let name = metric.field_name();
        // NaN comparisons silently pass, so catch them explicitly
        if !warning.is_finite() || !critical.is_finite() {
            errors.push(format!(
                "thresholds.{name}: values must be finite (got warning={warning}, critical={critical})"
            ));
            return;
        }
        match metric.direction() {
            Direction::Above if critical < warning => errors.push(format!(
                "thresholds.{name}: critical ({critical:.3}) must be >= warning ({warning:.3})"
            )),
            Direction::Below if critical > warning => errors.push(format!(
                "thresholds.{name}: critical ({critical:.3}) must be <= warning ({warning:.3})"
            )),
            _ => {}
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Threshold Table
// ============================================================================

/// Warning and critical boundary of one metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricBounds {
    pub warning: f64,
    pub critical: f64,
}

/// Classification boundaries.
///
/// Tension and rope diameter alarm when the reading falls *below* the bound;
/// every other metric alarms when it rises *above*. A reading exactly on a
/// bound does not trigger it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Tension warning bound (N, below).
    #[serde(default = "default_tension_warning")]
    pub tension_warning_n: f64,

    /// Tension critical bound (N, below).
    #[serde(default = "default_tension_critical")]
    pub tension_critical_n: f64,

    /// Vibration warning bound (mm/s).
    #[serde(default = "default_vibration_warning")]
    pub vibration_warning_mm_s: f64,

    /// Vibration critical bound (mm/s).
    #[serde(default = "default_vibration_critical")]
    pub vibration_critical_mm_s: f64,

    /// Wear warning bound (%).
    #[serde(default = "default_wear_warning")]
    pub wear_warning_pct: f64,

    /// Wear critical bound (%).
    #[serde(default = "default_wear_critical")]
    pub wear_critical_pct: f64,

    /// Rope temperature warning bound (°C).
    #[serde(default = "default_temperature_warning")]
    pub temperature_warning_c: f64,

    /// Rope temperature critical bound (°C).
    #[serde(default = "default_temperature_critical")]
    pub temperature_critical_c: f64,

    /// Rope diameter warning bound (mm, below). Nominal diameter is ~13 mm.
    #[serde(default = "default_rope_diameter_warning")]
    pub rope_diameter_warning_mm: f64,

    /// Rope diameter critical bound (mm, below).
    #[serde(default = "default_rope_diameter_critical")]
    pub rope_diameter_critical_mm: f64,

    /// Corrosion warning bound (%).
    #[serde(default = "default_corrosion_warning")]
    pub corrosion_warning_pct: f64,

    /// Corrosion critical bound (%).
    #[serde(default = "default_corrosion_critical")]
    pub corrosion_critical_pct: f64,

    /// Elongation warning bound (mm).
    #[serde(default = "default_elongation_warning")]
    pub elongation_warning_mm: f64,

    /// Elongation critical bound (mm).
    #[serde(default = "default_elongation_critical")]
    pub elongation_critical_mm: f64,

    /// Car load warning bound (kg).
    #[serde(default = "default_load_weight_warning")]
    pub load_weight_warning_kg: f64,

    /// Car load critical bound (kg).
    #[serde(default = "default_load_weight_critical")]
    pub load_weight_critical_kg: f64,
}

fn default_tension_warning() -> f64 { 90.0 }
fn default_tension_critical() -> f64 { 85.0 }
fn default_vibration_warning() -> f64 { 15.0 }
fn default_vibration_critical() -> f64 { 20.0 }
fn default_wear_warning() -> f64 { 50.0 }
fn default_wear_critical() -> f64 { 75.0 }
fn default_temperature_warning() -> f64 { 40.0 }
fn default_temperature_critical() -> f64 { 50.0 }
fn default_rope_diameter_warning() -> f64 { 12.5 }
fn default_rope_diameter_critical() -> f64 { 12.0 }
fn default_corrosion_warning() -> f64 { 20.0 }
fn default_corrosion_critical() -> f64 { 40.0 }
fn default_elongation_warning() -> f64 { 3.0 }
fn default_elongation_critical() -> f64 { 5.0 }
fn default_load_weight_warning() -> f64 { 600.0 }
fn default_load_weight_critical() -> f64 { 750.0 }

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            tension_warning_n: default_tension_warning(),
            tension_critical_n: default_tension_critical(),
            vibration_warning_mm_s: default_vibration_warning(),
            vibration_critical_mm_s: default_vibration_critical(),
            wear_warning_pct: default_wear_warning(),
            wear_critical_pct: default_wear_critical(),
            temperature_warning_c: default_temperature_warning(),
            temperature_critical_c: default_temperature_critical(),
            rope_diameter_warning_mm: default_rope_diameter_warning(),
            rope_diameter_critical_mm: default_rope_diameter_critical(),
            corrosion_warning_pct: default_corrosion_warning(),
            corrosion_critical_pct: default_corrosion_critical(),
            elongation_warning_mm: default_elongation_warning(),
            elongation_critical_mm: default_elongation_critical(),
            load_weight_warning_kg: default_load_weight_warning(),
            load_weight_critical_kg: default_load_weight_critical(),
        }
    }
}

impl ThresholdConfig {
    pub fn bounds(&self, metric: Metric) -> MetricBounds {
        let (warning, critical) = match metric {
            Metric::Tension => (self.tension_warning_n, self.tension_critical_n),
            Metric::Vibration => (self.vibration_warning_mm_s, self.vibration_critical_mm_s),
            Metric::Wear => (self.wear_warning_pct, self.wear_critical_pct),
            Metric::Temperature => (self.temperature_warning_c, self.temperature_critical_c),
            Metric::RopeDiameter => (self.rope_diameter_warning_mm, self.rope_diameter_critical_mm),
            Metric::Corrosion => (self.corrosion_warning_pct, self.corrosion_critical_pct),
            Metric::Elongation => (self.elongation_warning_mm, self.elongation_critical_mm),
            Metric::LoadWeight => (self.load_weight_warning_kg, self.load_weight_critical_kg),
        };
        MetricBounds { warning, critical }
    }
}

// ============================================================================
// Cost Model
// ============================================================================

/// Monetary constants (INR) behind the savings calculator and ROI report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostModel {
    /// Emergency rope replacement.
    #[serde(default = "default_rope_replacement")]
    pub rope_replacement_inr: f64,

    /// Planned (scheduled) rope replacement.
    #[serde(default = "default_planned_replacement")]
    pub planned_replacement_inr: f64,

    /// Revenue lost per hour of emergency downtime.
    #[serde(default = "default_downtime_per_hour")]
    pub emergency_downtime_per_hour_inr: f64,

    /// Emergency callout fee.
    #[serde(default = "default_emergency_response")]
    pub emergency_response_inr: f64,

    /// One routine inspection.
    #[serde(default = "default_preventive_inspection")]
    pub preventive_inspection_inr: f64,

    /// Typical emergency repair duration (hours).
    #[serde(default = "default_emergency_downtime_hours")]
    pub average_emergency_downtime_hours: f64,
}

fn default_rope_replacement() -> f64 { 50_000.0 }
fn default_planned_replacement() -> f64 { 30_000.0 }
fn default_downtime_per_hour() -> f64 { 5_000.0 }
fn default_emergency_response() -> f64 { 15_000.0 }
fn default_preventive_inspection() -> f64 { 2_000.0 }
fn default_emergency_downtime_hours() -> f64 { 8.0 }

impl Default for CostModel {
    fn default() -> Self {
        Self {
            rope_replacement_inr: default_rope_replacement(),
            planned_replacement_inr: default_planned_replacement(),
            emergency_downtime_per_hour_inr: default_downtime_per_hour(),
            emergency_response_inr: default_emergency_response(),
            preventive_inspection_inr: default_preventive_inspection(),
            average_emergency_downtime_hours: default_emergency_downtime_hours(),
        }
    }
}

impl CostModel {
    /// Downtime cost of one emergency repair.
    pub fn emergency_downtime_cost(&self) -> f64 {
        self.emergency_downtime_per_hour_inr * self.average_emergency_downtime_hours
    }

    /// Full cost of reacting to a rope failure.
    pub fn emergency_cost(&self) -> f64 {
        self.rope_replacement_inr + self.emergency_response_inr + self.emergency_downtime_cost()
    }

    /// Planned replacement plus the inspection that caught the problem.
    pub fn planned_cost(&self) -> f64 {
        self.planned_replacement_inr + self.preventive_inspection_inr
    }
}

// ============================================================================
// Risk Model
// ============================================================================

/// Terms of the continuous 0-100 risk score.
///
/// Each term is clamped to `[0, weight]` before summing; the diameter term
/// has no ceiling of its own, only the final clamp at 100. Load weight is
/// intentionally not part of the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskModelConfig {
    /// Tension at which the tension term is zero (N).
    #[serde(default = "default_tension_reference")]
    pub tension_reference_n: f64,
    #[serde(default = "default_tension_weight")]
    pub tension_weight: f64,

    /// Vibration at which the vibration term saturates (mm/s).
    #[serde(default = "default_vibration_scale")]
    pub vibration_scale_mm_s: f64,
    #[serde(default = "default_vibration_weight")]
    pub vibration_weight: f64,

    #[serde(default = "default_wear_weight")]
    pub wear_weight: f64,

    /// Temperature at which the temperature term saturates (°C).
    #[serde(default = "default_temperature_scale")]
    pub temperature_scale_c: f64,
    #[serde(default = "default_temperature_weight")]
    pub temperature_weight: f64,

    #[serde(default = "default_corrosion_weight")]
    pub corrosion_weight: f64,

    /// Elongation at which the elongation term saturates (mm).
    #[serde(default = "default_elongation_scale")]
    pub elongation_scale_mm: f64,
    #[serde(default = "default_elongation_weight")]
    pub elongation_weight: f64,

    /// Diameter below which the diameter term starts accruing (mm).
    #[serde(default = "default_nominal_diameter")]
    pub nominal_diameter_mm: f64,
    /// Risk points per mm of diameter loss.
    #[serde(default = "default_diameter_weight")]
    pub diameter_weight_per_mm: f64,
}

fn default_tension_reference() -> f64 { 100.0 }
fn default_tension_weight() -> f64 { 20.0 }
fn default_vibration_scale() -> f64 { 25.0 }
fn default_vibration_weight() -> f64 { 15.0 }
fn default_wear_weight() -> f64 { 25.0 }
fn default_temperature_scale() -> f64 { 60.0 }
fn default_temperature_weight() -> f64 { 10.0 }
fn default_corrosion_weight() -> f64 { 15.0 }
fn default_elongation_scale() -> f64 { 10.0 }
fn default_elongation_weight() -> f64 { 10.0 }
fn default_nominal_diameter() -> f64 { 13.5 }
fn default_diameter_weight() -> f64 { 5.0 }

impl Default for RiskModelConfig {
    fn default() -> Self {
        Self {
            tension_reference_n: default_tension_reference(),
            tension_weight: default_tension_weight(),
            vibration_scale_mm_s: default_vibration_scale(),
            vibration_weight: default_vibration_weight(),
            wear_weight: default_wear_weight(),
            temperature_scale_c: default_temperature_scale(),
            temperature_weight: default_temperature_weight(),
            corrosion_weight: default_corrosion_weight(),
            elongation_scale_mm: default_elongation_scale(),
            elongation_weight: default_elongation_weight(),
            nominal_diameter_mm: default_nominal_diameter(),
            diameter_weight_per_mm: default_diameter_weight(),
        }
    }
}

// ============================================================================
// Remaining-Life Model
// ============================================================================

/// Remaining-life estimator constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeModelConfig {
    /// Design life of a new rope (load cycles).
    #[serde(default = "default_base_life")]
    pub base_life_cycles: u64,

    /// Assumed average duty (load cycles per day).
    #[serde(default = "default_cycles_per_day")]
    pub cycles_per_day: u64,

    /// Temperature at which thermal derating reaches its floor (°C).
    #[serde(default = "default_temperature_limit")]
    pub temperature_limit_c: f64,

    /// Lower bound of the thermal derating factor.
    #[serde(default = "default_min_temperature_factor")]
    pub min_temperature_factor: f64,

    /// Estimates longer than this many days get the high confidence.
    #[serde(default = "default_confidence_horizon")]
    pub confidence_horizon_days: u64,

    #[serde(default = "default_high_confidence")]
    pub high_confidence: f64,

    #[serde(default = "default_low_confidence")]
    pub low_confidence: f64,
}

fn default_base_life() -> u64 { 50_000 }
fn default_cycles_per_day() -> u64 { 100 }
fn default_temperature_limit() -> f64 { 60.0 }
fn default_min_temperature_factor() -> f64 { 0.5 }
fn default_confidence_horizon() -> u64 { 30 }
fn default_high_confidence() -> f64 { 0.75 }
fn default_low_confidence() -> f64 { 0.60 }

impl Default for LifeModelConfig {
    fn default() -> Self {
        Self {
            base_life_cycles: default_base_life(),
            cycles_per_day: default_cycles_per_day(),
            temperature_limit_c: default_temperature_limit(),
            min_temperature_factor: default_min_temperature_factor(),
            confidence_horizon_days: default_confidence_horizon(),
            high_confidence: default_high_confidence(),
            low_confidence: default_low_confidence(),
        }
    }
}

// ============================================================================
// Savings Heuristics
// ============================================================================

/// Probability assumptions behind the Warning and Healthy savings figures.
///
/// These are unvalidated heuristics, not empirical constants, which is why
/// they are operator-tunable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsHeuristics {
    /// Chance a Warning escalates to an emergency without intervention.
    #[serde(default = "default_escalation_probability")]
    pub escalation_probability: f64,

    /// Chance per year of an unexpected failure on a monitored Healthy rope.
    #[serde(default = "default_annual_failure_probability")]
    pub annual_failure_probability: f64,

    /// Routine inspections per year (quarterly by default).
    #[serde(default = "default_inspections_per_year")]
    pub inspections_per_year: u32,

    /// Months over which the annual inspection cost is amortised in the ROI report.
    #[serde(default = "default_amortization_months")]
    pub amortization_months: u32,
}

fn default_escalation_probability() -> f64 { 0.6 }
fn default_annual_failure_probability() -> f64 { 0.2 }
fn default_inspections_per_year() -> u32 { 4 }
fn default_amortization_months() -> u32 { 12 }

impl Default for SavingsHeuristics {
    fn default() -> Self {
        Self {
            escalation_probability: default_escalation_probability(),
            annual_failure_probability: default_annual_failure_probability(),
            inspections_per_year: default_inspections_per_year(),
            amortization_months: default_amortization_months(),
        }
    }
}

// ============================================================================
// Fleet Policy
// ============================================================================

/// Ranking and maintenance-queue policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetPolicy {
    /// Highest-risk units listed in a fleet analysis.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Entries per list in the composite fleet report.
    #[serde(default = "default_report_limit")]
    pub report_limit: usize,

    /// Remaining life (days) below which the urgent bonus applies.
    #[serde(default = "default_urgent_days")]
    pub urgent_days: u64,
    #[serde(default = "default_urgent_bonus")]
    pub urgent_bonus: f64,

    /// Remaining life (days) below which the soon bonus applies.
    #[serde(default = "default_soon_days")]
    pub soon_days: u64,
    #[serde(default = "default_soon_bonus")]
    pub soon_bonus: f64,

    /// Ceiling of the priority score.
    #[serde(default = "default_max_priority")]
    pub max_priority: f64,
}

fn default_top_k() -> usize { 5 }
fn default_report_limit() -> usize { 10 }
fn default_urgent_days() -> u64 { 7 }
fn default_urgent_bonus() -> f64 { 30.0 }
fn default_soon_days() -> u64 { 30 }
fn default_soon_bonus() -> f64 { 15.0 }
fn default_max_priority() -> f64 { 100.0 }

impl Default for FleetPolicy {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            report_limit: default_report_limit(),
            urgent_days: default_urgent_days(),
            urgent_bonus: default_urgent_bonus(),
            soon_days: default_soon_days(),
            soon_bonus: default_soon_bonus(),
            max_priority: default_max_priority(),
        }
    }
}
