//! Fleet-wide health analysis
//!
//! Units are evaluated in parallel; the collected results keep input order so
//! the stable sort that follows breaks risk ties by input position.

use rayon::prelude::*;
use tracing::debug;

use crate::analysis::{ratio_pct, round2, RopeHealthEngine};
use crate::types::{validate_readings, EngineError, FleetReport, Reading, TierBreakdown, UnitRisk};

/// Analyse every reading and rank the fleet by risk.
///
/// An empty slice yields an all-zero report. Any non-finite reading fails
/// the whole call.
pub fn analyze_fleet(
    engine: &RopeHealthEngine,
    readings: &[Reading],
) -> Result<FleetReport, EngineError> {
    analyze_fleet_top(engine, readings, engine.config().fleet.top_k)
}

/// [`analyze_fleet`] with an explicit length for `highest_risk_units`.
pub(crate) fn analyze_fleet_top(
    engine: &RopeHealthEngine,
    readings: &[Reading],
    limit: usize,
) -> Result<FleetReport, EngineError> {
    validate_readings(readings)?;

    let mut units: Vec<UnitRisk> = readings.par_iter().map(|r| evaluate_unit(engine, r)).collect();

    let total_units = units.len();
    let mut tier_breakdown = TierBreakdown::default();
    let mut risk_sum = 0.0;
    let mut total_savings = 0.0;
    for unit in &units {
        tier_breakdown.record(unit.tier);
        risk_sum += unit.risk_score;
        total_savings += unit.potential_savings;
    }

    let average_risk_score = if total_units == 0 {
        0.0
    } else {
        round2(risk_sum / total_units as f64)
    };
    let health_pct = round2(ratio_pct(tier_breakdown.healthy as f64, total_units as f64));

    // Rank on the unrounded score; sort_by is stable
    units.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));
    let highest_risk_units = units
        .into_iter()
        .take(limit)
        .map(|unit| UnitRisk {
            risk_score: round2(unit.risk_score),
            ..unit
        })
        .collect();

    debug!(
        total_units,
        critical = tier_breakdown.critical,
        warning = tier_breakdown.warning,
        healthy = tier_breakdown.healthy,
        average_risk_score,
        "Fleet analysed"
    );

    Ok(FleetReport {
        total_units,
        tier_breakdown,
        average_risk_score,
        highest_risk_units,
        health_pct,
        total_estimated_savings: round2(total_savings),
    })
}

/// Classification, unrounded risk and savings for one unit.
fn evaluate_unit(engine: &RopeHealthEngine, reading: &Reading) -> UnitRisk {
    let classification = engine.classify(reading);
    let savings = engine.calculate_cost_savings(reading, classification.tier);

    UnitRisk {
        unit_id: reading.unit_id.clone(),
        tier: classification.tier,
        risk_score: engine.risk_score(reading),
        confidence: classification.confidence,
        reason: classification.reason,
        potential_savings: savings.total_savings,
    }
}
