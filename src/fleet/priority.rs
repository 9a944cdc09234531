//! Maintenance queue
//!
//! Priority is the risk score plus an urgency bonus when remaining life is
//! short, capped at `max_priority`.

use rayon::prelude::*;
use tracing::debug;

use crate::analysis::{round2, RopeHealthEngine};
use crate::config::FleetPolicy;
use crate::types::{validate_readings, EngineError, PriorityItem, Reading};

/// Rank every unit by maintenance priority, most urgent first.
///
/// Equal scores keep their input order. Any non-finite reading fails the
/// whole call.
pub fn generate_maintenance_priority_list(
    engine: &RopeHealthEngine,
    readings: &[Reading],
) -> Result<Vec<PriorityItem>, EngineError> {
    validate_readings(readings)?;

    let mut items: Vec<PriorityItem> =
        readings.par_iter().map(|r| priority_item(engine, r)).collect();
    items.sort_by(|a, b| b.priority_score.total_cmp(&a.priority_score));

    debug!(
        units = items.len(),
        top = items.first().map(|i| i.unit_id.as_str()).unwrap_or("-"),
        "Maintenance priorities ranked"
    );
    Ok(items)
}

/// Risk plus urgency bonus, rounded to two decimals.
pub fn priority_score(policy: &FleetPolicy, risk_score: f64, days_remaining: u64) -> f64 {
    let boosted = if days_remaining < policy.urgent_days {
        (risk_score + policy.urgent_bonus).min(policy.max_priority)
    } else if days_remaining < policy.soon_days {
        (risk_score + policy.soon_bonus).min(policy.max_priority)
    } else {
        risk_score
    };
    round2(boosted)
}

fn priority_item(engine: &RopeHealthEngine, reading: &Reading) -> PriorityItem {
    let classification = engine.classify(reading);
    let risk_score = engine.risk_score(reading);
    let life = engine.predict_remaining_life(reading, reading.load_cycles);

    PriorityItem {
        unit_id: reading.unit_id.clone(),
        priority_score: priority_score(&engine.config().fleet, risk_score, life.estimated_days),
        tier: classification.tier,
        risk_score: round2(risk_score),
        days_remaining: life.estimated_days,
        recommendation: life.recommendation,
        reason: classification.reason,
    }
}
