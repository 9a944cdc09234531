//! Per-reading health outputs: tier, classification, remaining life, savings

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Discrete health tier of a reading.
///
/// Variants are declared in increasing severity so `Ord` ranks
/// `Critical > Warning > Healthy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Healthy,
    Warning,
    Critical,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Critical, Tier::Warning, Tier::Healthy];

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Healthy => "Healthy",
            Tier::Warning => "Warning",
            Tier::Critical => "Critical",
        }
    }

    /// Whether the caller's alert policy fires for this tier.
    pub fn raises_alert(self) -> bool {
        !matches!(self, Tier::Healthy)
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "healthy" => Ok(Tier::Healthy),
            "warning" => Ok(Tier::Warning),
            "critical" => Ok(Tier::Critical),
            other => Err(format!("unknown tier '{other}'")),
        }
    }
}

/// Classifier output for one reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub tier: Tier,
    /// Fixed per tier: 0.95 Critical, 0.85 Warning, 0.90 Healthy
    pub confidence: f64,
    /// Triggered issue descriptions joined with `" | "`
    pub reason: String,
    /// First word of each triggered issue, in evaluation order. Empty when Healthy.
    pub triggered_metrics: Vec<String>,
}

impl Classification {
    /// Metric named as the cause of an alert, if any.
    pub fn primary_metric(&self) -> Option<&str> {
        self.triggered_metrics.first().map(String::as_str)
    }
}

/// Day-count bucket for the replacement recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceUrgency {
    Immediate,
    ThisMonth,
    NextQuarter,
    Routine,
}

impl MaintenanceUrgency {
    /// Bucket a remaining-life estimate: `<7`, `<30`, `<90`, otherwise routine.
    pub fn from_days(days: u64) -> Self {
        match days {
            d if d < 7 => MaintenanceUrgency::Immediate,
            d if d < 30 => MaintenanceUrgency::ThisMonth,
            d if d < 90 => MaintenanceUrgency::NextQuarter,
            _ => MaintenanceUrgency::Routine,
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            MaintenanceUrgency::Immediate => "URGENT: Schedule immediate rope replacement",
            MaintenanceUrgency::ThisMonth => "Schedule rope replacement within this month",
            MaintenanceUrgency::NextQuarter => "Plan rope replacement in next quarter",
            MaintenanceUrgency::Routine => "Continue routine monitoring",
        }
    }
}

/// Remaining useful life projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeEstimate {
    pub estimated_days: u64,
    pub estimated_cycles: u64,
    /// Two-level: high when more than a month remains, low otherwise
    pub confidence: f64,
    pub urgency: MaintenanceUrgency,
    pub recommendation: String,
}

/// Avoided-cost analysis for one reading (INR).
///
/// `breakdown` carries signed contributions (costs negative, avoided costs
/// positive) that sum to `total_savings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsResult {
    pub tier: Tier,
    pub total_savings: f64,
    pub breakdown: BTreeMap<String, f64>,
    /// Reactive vs predictive totals; empty for Healthy readings
    pub comparison: BTreeMap<String, f64>,
    /// Rounded to two decimals, zero when the predictive cost is zero
    pub roi_pct: f64,
    /// Escalation probability applied to Warning readings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalation_probability: Option<f64>,
}

impl SavingsResult {
    pub fn breakdown_sum(&self) -> f64 {
        self.breakdown.values().sum()
    }
}

/// Everything the engine says about a single reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub unit_id: String,
    pub timestamp: String,
    #[serde(flatten)]
    pub classification: Classification,
    /// Rounded to two decimals
    pub risk_score: f64,
    pub remaining_life: LifeEstimate,
    pub cost_savings: SavingsResult,
}

impl Assessment {
    pub fn tier(&self) -> Tier {
        self.classification.tier
    }
}
