//! Composite management report: overview, rankings, queue, money

use tracing::debug;

use super::analytics::analyze_fleet_top;
use super::priority::generate_maintenance_priority_list;
use super::roi::calculate_roi_report;
use crate::analysis::RopeHealthEngine;
use crate::history::{fleet_snapshot, ReadingSource};
use crate::types::{EngineError, FinancialSummary, FleetHealthReport, FleetOverview, Reading};

/// Build the fleet report from the latest reading of each unit.
///
/// `registered_units` counts every unit on the books, including those that
/// have not reported yet; `readings` holds one reading per reporting unit.
/// A non-finite reading fails the report before anything is aggregated.
pub fn generate_fleet_report(
    engine: &RopeHealthEngine,
    registered_units: usize,
    readings: &[Reading],
) -> Result<FleetHealthReport, EngineError> {
    let limit = engine.config().fleet.report_limit;

    let analysis = analyze_fleet_top(engine, readings, limit)?;
    let mut maintenance_priorities = generate_maintenance_priority_list(engine, readings)?;
    maintenance_priorities.truncate(limit);
    let roi = calculate_roi_report(engine, readings)?;

    debug!(
        registered_units,
        units_with_data = analysis.total_units,
        "Fleet report generated"
    );

    Ok(FleetHealthReport {
        overview: FleetOverview {
            registered_units,
            units_with_data: analysis.total_units,
            average_risk_score: analysis.average_risk_score,
            health_pct: analysis.health_pct,
        },
        tier_breakdown: analysis.tier_breakdown,
        highest_risk_units: analysis.highest_risk_units,
        maintenance_priorities,
        financial_summary: FinancialSummary {
            total_savings: roi.total_savings,
            total_investment: roi.total_investment,
            net_benefit: roi.net_benefit,
            overall_roi_pct: roi.overall_roi_pct,
        },
    })
}

/// [`generate_fleet_report`] over everything a reading source knows about.
pub fn fleet_report_from_source(
    engine: &RopeHealthEngine,
    source: &dyn ReadingSource,
) -> Result<FleetHealthReport, EngineError> {
    let registered = source.registered_units().len();
    let snapshot = fleet_snapshot(source);
    generate_fleet_report(engine, registered, &snapshot)
}
