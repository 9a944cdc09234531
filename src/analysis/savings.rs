//! Predictive-vs-reactive cost model
//!
//! Every branch produces a signed `breakdown` (avoided costs positive,
//! incurred costs negative) whose values sum to `total_savings`. Warning
//! entries are weighted by the escalation probability; whatever the integer
//! truncation shaves off is carried in `rounding_adjustment`.

use std::collections::BTreeMap;

use super::{ratio_pct, round2};
use crate::config::{CostModel, SavingsHeuristics};
use crate::types::{SavingsResult, Tier};

pub const ROUNDING_ADJUSTMENT: &str = "rounding_adjustment";

/// Savings from catching a reading at `tier` instead of waiting for failure.
pub fn calculate_cost_savings(
    costs: &CostModel,
    heuristics: &SavingsHeuristics,
    tier: Tier,
) -> SavingsResult {
    match tier {
        Tier::Critical => critical_savings(costs),
        Tier::Warning => warning_savings(costs, heuristics),
        Tier::Healthy => healthy_savings(costs, heuristics),
    }
}

/// Emergency replacement avoided by a planned one.
fn critical_savings(costs: &CostModel) -> SavingsResult {
    let emergency_cost = costs.emergency_cost();
    let planned_cost = costs.planned_cost();
    let total_savings = emergency_cost - planned_cost;

    let breakdown = BTreeMap::from([
        ("avoided_emergency_replacement".to_string(), costs.rope_replacement_inr),
        ("avoided_emergency_callout".to_string(), costs.emergency_response_inr),
        ("avoided_downtime_cost".to_string(), costs.emergency_downtime_cost()),
        ("planned_replacement_cost".to_string(), -costs.planned_replacement_inr),
        ("inspection_cost".to_string(), -costs.preventive_inspection_inr),
    ]);
    let comparison = BTreeMap::from([
        ("reactive_maintenance_cost".to_string(), emergency_cost),
        ("predictive_maintenance_cost".to_string(), planned_cost),
    ]);

    SavingsResult {
        tier: Tier::Critical,
        total_savings,
        breakdown,
        comparison,
        roi_pct: round2(ratio_pct(total_savings, planned_cost)),
        escalation_probability: None,
    }
}

/// Inspection now vs a probable emergency later.
fn warning_savings(costs: &CostModel, heuristics: &SavingsHeuristics) -> SavingsResult {
    let p = heuristics.escalation_probability;
    let potential_emergency_cost = costs.emergency_cost();
    let preventive_cost = costs.preventive_inspection_inr;
    let total_savings = ((potential_emergency_cost - preventive_cost) * p).trunc();

    let mut breakdown = BTreeMap::from([
        ("potential_avoided_costs".to_string(), round2(potential_emergency_cost * p)),
        ("preventive_action_cost".to_string(), round2(-preventive_cost * p)),
    ]);
    settle(&mut breakdown, total_savings);

    let comparison = BTreeMap::from([
        ("potential_reactive_cost".to_string(), potential_emergency_cost),
        ("predictive_maintenance_cost".to_string(), preventive_cost),
    ]);

    SavingsResult {
        tier: Tier::Warning,
        total_savings,
        breakdown,
        comparison,
        roi_pct: round2(ratio_pct(total_savings, preventive_cost)),
        escalation_probability: Some(p),
    }
}

/// A year of quarterly inspections vs the expected cost of a surprise failure.
fn healthy_savings(costs: &CostModel, heuristics: &SavingsHeuristics) -> SavingsResult {
    let annual_monitoring_cost =
        costs.preventive_inspection_inr * f64::from(heuristics.inspections_per_year);
    let annual_avoided_emergency = costs.rope_replacement_inr * heuristics.annual_failure_probability;
    let total_savings = (annual_avoided_emergency - annual_monitoring_cost).trunc();

    let mut breakdown = BTreeMap::from([
        ("annual_monitoring_cost".to_string(), -annual_monitoring_cost),
        ("estimated_avoided_emergency_cost".to_string(), round2(annual_avoided_emergency)),
    ]);
    settle(&mut breakdown, total_savings);

    SavingsResult {
        tier: Tier::Healthy,
        total_savings,
        breakdown,
        comparison: BTreeMap::new(),
        roi_pct: round2(ratio_pct(total_savings, annual_monitoring_cost)),
        escalation_probability: None,
    }
}

/// Add a `rounding_adjustment` entry when the breakdown misses the total.
fn settle(breakdown: &mut BTreeMap<String, f64>, total_savings: f64) {
    let residue = round2(total_savings - breakdown.values().sum::<f64>());
    if residue != 0.0 {
        breakdown.insert(ROUNDING_ADJUSTMENT.to_string(), residue);
    }
}
