//! Fleet return-on-investment roll-up

use rayon::prelude::*;

use crate::analysis::{ratio_pct, round2, RopeHealthEngine};
use crate::config::{CostModel, SavingsHeuristics};
use crate::types::{validate_readings, EngineError, Reading, RoiReport, SavingsByTier, Tier};

/// Sum savings against the predictive spend that earned them.
///
/// An empty slice yields zero for every figure.
pub fn calculate_roi_report(
    engine: &RopeHealthEngine,
    readings: &[Reading],
) -> Result<RoiReport, EngineError> {
    validate_readings(readings)?;

    let config = engine.config();
    let per_unit: Vec<(Tier, f64)> = readings
        .par_iter()
        .map(|reading| {
            let tier = engine.classify(reading).tier;
            (tier, engine.calculate_cost_savings(reading, tier).total_savings)
        })
        .collect();

    let mut total_savings = 0.0;
    let mut total_investment = 0.0;
    let mut by_tier = SavingsByTier::default();
    for (tier, savings) in per_unit {
        total_savings += savings;
        total_investment += predictive_investment(&config.costs, &config.savings, tier);
        by_tier.add(tier, savings);
    }

    let units_analyzed = readings.len();
    let average_savings_per_unit = if units_analyzed == 0 {
        0.0
    } else {
        round2(total_savings / units_analyzed as f64)
    };

    Ok(RoiReport {
        total_savings: round2(total_savings),
        total_investment: round2(total_investment),
        net_benefit: round2(total_savings - total_investment),
        overall_roi_pct: round2(ratio_pct(total_savings, total_investment)),
        savings_by_tier: SavingsByTier {
            critical: round2(by_tier.critical),
            warning: round2(by_tier.warning),
            healthy: round2(by_tier.healthy),
        },
        units_analyzed,
        average_savings_per_unit,
    })
}

/// Predictive maintenance spend attributed to one unit at `tier`.
///
/// Healthy units carry one month's share of the annual inspection budget.
pub fn predictive_investment(costs: &CostModel, heuristics: &SavingsHeuristics, tier: Tier) -> f64 {
    match tier {
        Tier::Critical => costs.planned_cost(),
        Tier::Warning => costs.preventive_inspection_inr,
        Tier::Healthy => {
            if heuristics.amortization_months == 0 {
                return 0.0;
            }
            costs.preventive_inspection_inr * f64::from(heuristics.inspections_per_year)
                / f64::from(heuristics.amortization_months)
        }
    }
}
