//! Building-level comparison

use tracing::debug;

use super::analytics::analyze_fleet;
use crate::analysis::RopeHealthEngine;
use crate::types::{BuildingComparison, BuildingSummary, EngineError, Reading};

/// Analyse each building's units and rank buildings by health percentage.
///
/// Groups are taken in the order given; buildings with equal health keep
/// that order. `needs_attention` lists every building with at least one
/// Critical unit, in ranking order. A non-finite reading in any building
/// fails the whole comparison.
pub fn compare_buildings(
    engine: &RopeHealthEngine,
    grouped: &[(String, Vec<Reading>)],
) -> Result<BuildingComparison, EngineError> {
    let mut buildings = grouped
        .iter()
        .map(|(building_name, readings)| {
            let report = analyze_fleet(engine, readings)?;
            Ok::<_, EngineError>(BuildingSummary {
                building_name: building_name.clone(),
                total_units: report.total_units,
                average_risk: report.average_risk_score,
                health_pct: report.health_pct,
                critical_count: report.tier_breakdown.critical,
                estimated_savings: report.total_estimated_savings,
            })
        })
        .collect::<Result<Vec<BuildingSummary>, EngineError>>()?;

    buildings.sort_by(|a, b| b.health_pct.total_cmp(&a.health_pct));

    let best_performing = buildings.first().map(|b| b.building_name.clone());
    let needs_attention: Vec<String> = buildings
        .iter()
        .filter(|b| b.critical_count > 0)
        .map(|b| b.building_name.clone())
        .collect();

    debug!(
        buildings = buildings.len(),
        needs_attention = needs_attention.len(),
        "Buildings compared"
    );

    Ok(BuildingComparison {
        buildings,
        best_performing,
        needs_attention,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(unit_id: &str, wear: f64) -> Reading {
        Reading {
            unit_id: unit_id.to_string(),
            timestamp: "2025-10-31T22:00:00".to_string(),
            tension: 95.0,
            vibration: 10.0,
            wear_pct: wear,
            load_cycles: 1_000,
            temperature: 30.0,
            rope_diameter_mm: 13.0,
            corrosion_pct: 10.0,
            elongation: 1.5,
            load_weight_kg: 400.0,
        }
    }

    #[test]
    fn test_ranking_and_attention() {
        let grouped = vec![
            (
                "Business Park B".to_string(),
                vec![reading("ELEV-006", 20.0), reading("ELEV-007", 80.0)],
            ),
            (
                "Tech Tower A".to_string(),
                vec![reading("ELEV-001", 20.0), reading("ELEV-002", 25.0)],
            ),
            (
                "Corporate Hub C".to_string(),
                vec![reading("ELEV-011", 60.0), reading("ELEV-012", 20.0)],
            ),
        ];
        let cmp = compare_buildings(&RopeHealthEngine::default(), &grouped).unwrap();
        let names: Vec<&str> = cmp.buildings.iter().map(|b| b.building_name.as_str()).collect();
        // B and C both sit at 50% and keep input order
        assert_eq!(names, vec!["Tech Tower A", "Business Park B", "Corporate Hub C"]);
        assert_eq!(cmp.best_performing.as_deref(), Some("Tech Tower A"));
        assert_eq!(cmp.needs_attention, vec!["Business Park B".to_string()]);
        assert_eq!(cmp.buildings[1].critical_count, 1);
        assert_eq!(cmp.buildings[0].health_pct, 100.0);
    }

    #[test]
    fn test_no_buildings() {
        let cmp = compare_buildings(&RopeHealthEngine::default(), &[]).unwrap();
        assert!(cmp.buildings.is_empty());
        assert!(cmp.best_performing.is_none());
        assert!(cmp.needs_attention.is_empty());
    }
}
