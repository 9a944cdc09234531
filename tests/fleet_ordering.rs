//! Fleet Ordering Tests
//!
//! Rankings produced by the fleet analytics must be deterministic: highest
//! first, ties in input order, and identical to a sequential evaluation even
//! though units are scored on the rayon pool.

use ropewatch::fleet::{
    analyze_fleet, calculate_roi_report, compare_buildings, fleet_report_from_source,
    generate_maintenance_priority_list,
};
use ropewatch::{
    EngineConfig, EngineError, InMemoryReadingSource, Reading, RopeHealthEngine, Tier, UnitInfo,
};

fn reading(unit_id: &str) -> Reading {
    Reading {
        unit_id: unit_id.to_string(),
        timestamp: "2025-10-31T22:00:00".to_string(),
        tension: 95.5,
        vibration: 12.3,
        wear_pct: 45.2,
        load_cycles: 1500,
        temperature: 32.5,
        rope_diameter_mm: 12.8,
        corrosion_pct: 15.0,
        elongation: 2.3,
        load_weight_kg: 450.0,
    }
}

fn warning(unit_id: &str) -> Reading {
    Reading {
        tension: 88.0,
        ..reading(unit_id)
    }
}

fn critical(unit_id: &str) -> Reading {
    Reading {
        unit_id: unit_id.to_string(),
        timestamp: "2025-10-31T22:00:00".to_string(),
        tension: 82.0,
        vibration: 22.0,
        wear_pct: 80.0,
        load_cycles: 45_000,
        temperature: 52.0,
        rope_diameter_mm: 11.5,
        corrosion_pct: 45.0,
        elongation: 5.5,
        load_weight_kg: 780.0,
    }
}

/// Healthy, Warning, Critical in that input order.
fn mixed_fleet() -> Vec<Reading> {
    vec![reading("ELEV-001"), warning("ELEV-002"), critical("ELEV-003")]
}

/// Many units with repeated wear levels so equal risk scores are common.
fn large_fleet() -> Vec<Reading> {
    (0..240)
        .map(|i| Reading {
            wear_pct: f64::from(i % 12) * 6.0,
            ..reading(&format!("ELEV-{i:03}"))
        })
        .collect()
}

fn ids<T>(items: &[T], id: impl Fn(&T) -> &str) -> Vec<String> {
    items.iter().map(|item| id(item).to_string()).collect()
}

// ============================================================================
// Fleet analysis
// ============================================================================

#[test]
fn analysis_ranks_by_risk() {
    let engine = RopeHealthEngine::default();
    let report = analyze_fleet(&engine, &mixed_fleet()).unwrap();

    assert_eq!(report.total_units, 3);
    assert_eq!(report.tier_breakdown.critical, 1);
    assert_eq!(report.tier_breakdown.warning, 1);
    assert_eq!(report.tier_breakdown.healthy, 1);
    assert_eq!(report.health_pct, 33.33);
    assert_eq!(report.total_estimated_savings, 136_800.0);
    assert_eq!(
        ids(&report.highest_risk_units, |u| u.unit_id.as_str()),
        vec!["ELEV-003", "ELEV-002", "ELEV-001"]
    );
    assert_eq!(report.highest_risk_units[0].risk_score, 67.72);
}

#[test]
fn analysis_matches_sequential_ranking() {
    let engine = RopeHealthEngine::default();
    let fleet = large_fleet();
    let report = analyze_fleet(&engine, &fleet).unwrap();

    let mut sequential: Vec<(String, f64)> = fleet
        .iter()
        .map(|r| (r.unit_id.clone(), engine.risk_score(r)))
        .collect();
    sequential.sort_by(|a, b| b.1.total_cmp(&a.1));
    let expected: Vec<String> = sequential
        .into_iter()
        .take(engine.config().fleet.top_k)
        .map(|(id, _)| id)
        .collect();

    assert_eq!(ids(&report.highest_risk_units, |u| u.unit_id.as_str()), expected);
}

#[test]
fn analysis_is_repeatable() {
    let engine = RopeHealthEngine::default();
    let fleet = large_fleet();
    let first = analyze_fleet(&engine, &fleet).unwrap();
    for _ in 0..5 {
        assert_eq!(analyze_fleet(&engine, &fleet).unwrap(), first);
    }
}

#[test]
fn top_k_follows_config() {
    let mut config = EngineConfig::default();
    config.fleet.top_k = 2;
    let engine = RopeHealthEngine::new(config);
    let report = analyze_fleet(&engine, &mixed_fleet()).unwrap();
    assert_eq!(report.highest_risk_units.len(), 2);
    assert_eq!(report.total_units, 3);
}

// ============================================================================
// Maintenance queue
// ============================================================================

#[test]
fn priorities_put_short_life_first() {
    let engine = RopeHealthEngine::default();
    let queue = generate_maintenance_priority_list(&engine, &mixed_fleet()).unwrap();

    assert_eq!(ids(&queue, |p| p.unit_id.as_str()), vec!["ELEV-003", "ELEV-002", "ELEV-001"]);
    // Critical unit has 0 days left: risk 67.72 plus the urgent bonus
    assert_eq!(queue[0].priority_score, 97.72);
    assert_eq!(queue[0].days_remaining, 0);
    assert_eq!(queue[0].tier, Tier::Critical);
    assert!(queue.windows(2).all(|w| w[0].priority_score >= w[1].priority_score));
}

#[test]
fn equal_priorities_keep_input_order() {
    let engine = RopeHealthEngine::default();
    let fleet: Vec<Reading> = ["C", "A", "B", "D"].iter().map(|id| reading(id)).collect();
    let queue = generate_maintenance_priority_list(&engine, &fleet).unwrap();
    assert_eq!(ids(&queue, |p| p.unit_id.as_str()), vec!["C", "A", "B", "D"]);
}

#[test]
fn large_queue_is_stable_against_sequential_sort() {
    let engine = RopeHealthEngine::default();
    let fleet = large_fleet();
    let queue = generate_maintenance_priority_list(&engine, &fleet).unwrap();
    assert_eq!(queue.len(), fleet.len());

    let mut expected = queue.clone();
    expected.sort_by_key(|p| fleet.iter().position(|r| r.unit_id == p.unit_id));
    expected.sort_by(|a, b| b.priority_score.total_cmp(&a.priority_score));
    assert_eq!(queue, expected);
}

// ============================================================================
// Buildings, ROI, composite report
// ============================================================================

#[test]
fn buildings_rank_by_health() {
    let engine = RopeHealthEngine::default();
    let grouped = vec![
        ("Tech Tower A".to_string(), vec![critical("ELEV-001"), reading("ELEV-002")]),
        ("Business Park B".to_string(), vec![reading("ELEV-006")]),
        ("Commerce Plaza".to_string(), vec![warning("ELEV-011")]),
    ];
    let comparison = compare_buildings(&engine, &grouped).unwrap();

    let names = ids(&comparison.buildings, |b| b.building_name.as_str());
    assert_eq!(names, vec!["Business Park B", "Tech Tower A", "Commerce Plaza"]);
    assert_eq!(comparison.best_performing.as_deref(), Some("Business Park B"));
    assert_eq!(comparison.needs_attention, vec!["Tech Tower A"]);
    assert_eq!(comparison.buildings[1].health_pct, 50.0);
}

#[test]
fn roi_mixed_fleet() {
    let engine = RopeHealthEngine::default();
    let roi = calculate_roi_report(&engine, &mixed_fleet()).unwrap();

    assert_eq!(roi.total_savings, 136_800.0);
    assert_eq!(roi.total_investment, 34_666.67);
    assert_eq!(roi.net_benefit, 102_133.33);
    assert_eq!(roi.overall_roi_pct, 394.62);
    assert_eq!(roi.average_savings_per_unit, 45_600.0);
    assert_eq!(roi.savings_by_tier.critical, 73_000.0);
    assert_eq!(roi.savings_by_tier.warning, 61_800.0);
    assert_eq!(roi.savings_by_tier.healthy, 2_000.0);
}

#[test]
fn empty_fleet_is_all_zero() {
    let engine = RopeHealthEngine::default();

    let report = analyze_fleet(&engine, &[]).unwrap();
    assert_eq!(report.total_units, 0);
    assert_eq!(report.average_risk_score, 0.0);
    assert_eq!(report.health_pct, 0.0);
    assert!(report.highest_risk_units.is_empty());

    let roi = calculate_roi_report(&engine, &[]).unwrap();
    assert_eq!(roi.overall_roi_pct, 0.0);
    assert_eq!(roi.average_savings_per_unit, 0.0);
    assert_eq!(roi.units_analyzed, 0);

    assert!(generate_maintenance_priority_list(&engine, &[]).unwrap().is_empty());
    assert!(compare_buildings(&engine, &[]).unwrap().best_performing.is_none());
}

#[test]
fn report_from_source_counts_silent_units() {
    let mut source = InMemoryReadingSource::new();
    for (id, building) in [
        ("ELEV-001", "Tech Tower A"),
        ("ELEV-002", "Tech Tower A"),
        ("ELEV-003", "Business Park B"),
        ("ELEV-004", "Business Park B"),
    ] {
        source.register_unit(UnitInfo::new(id, building));
    }
    source.push(critical("ELEV-001"));
    source.push(reading("ELEV-001"));
    source.push(warning("ELEV-003"));
    source.push(critical("ELEV-002"));

    let engine = RopeHealthEngine::default();
    let report = fleet_report_from_source(&engine, &source).unwrap();

    assert_eq!(report.overview.registered_units, 4);
    assert_eq!(report.overview.units_with_data, 3);
    // ELEV-001's latest reading is the healthy one
    assert_eq!(report.tier_breakdown.healthy, 1);
    assert_eq!(report.tier_breakdown.critical, 1);
    assert_eq!(report.maintenance_priorities[0].unit_id, "ELEV-002");
    assert_eq!(report.financial_summary.total_savings, 136_800.0);
}

// ============================================================================
// Non-finite readings
// ============================================================================

/// A mixed fleet with one NaN vibration reading in the middle.
fn fleet_with_nan() -> Vec<Reading> {
    vec![
        reading("ELEV-001"),
        Reading {
            vibration: f64::NAN,
            ..critical("ELEV-002")
        },
        critical("ELEV-003"),
    ]
}

fn assert_rejects_vibration<T: std::fmt::Debug>(result: Result<T, EngineError>) {
    match result {
        Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "vibration"),
        other => panic!("expected invalid vibration, got {other:?}"),
    }
}

#[test]
fn analysis_rejects_nan_reading() {
    assert_rejects_vibration(analyze_fleet(&RopeHealthEngine::default(), &fleet_with_nan()));
}

#[test]
fn priorities_reject_nan_reading() {
    assert_rejects_vibration(generate_maintenance_priority_list(
        &RopeHealthEngine::default(),
        &fleet_with_nan(),
    ));
}

#[test]
fn buildings_reject_nan_in_any_building() {
    let grouped = vec![
        ("Tech Tower A".to_string(), vec![reading("ELEV-001")]),
        ("Business Park B".to_string(), fleet_with_nan()),
    ];
    assert_rejects_vibration(compare_buildings(&RopeHealthEngine::default(), &grouped));
}

#[test]
fn roi_rejects_nan_reading() {
    assert_rejects_vibration(calculate_roi_report(&RopeHealthEngine::default(), &fleet_with_nan()));
}

#[test]
fn report_rejects_nan_reading() {
    let engine = RopeHealthEngine::default();
    let source = InMemoryReadingSource::from_readings(fleet_with_nan(), "Tech Tower A");
    assert_rejects_vibration(fleet_report_from_source(&engine, &source));
    assert_rejects_vibration(ropewatch::fleet::generate_fleet_report(&engine, 3, &fleet_with_nan()));
}

#[test]
fn infinite_temperature_is_rejected_too() {
    let fleet = vec![Reading {
        temperature: f64::INFINITY,
        ..reading("ELEV-001")
    }];
    match analyze_fleet(&RopeHealthEngine::default(), &fleet) {
        Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "temperature"),
        other => panic!("expected invalid temperature, got {other:?}"),
    }
}
