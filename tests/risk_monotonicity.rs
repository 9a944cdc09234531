//! Risk and Remaining-Life Monotonicity
//!
//! Sweeps each metric from benign to severe and checks the continuous outputs
//! move the right way and stay in range.

use ropewatch::analysis::remaining_life::predict_remaining_life;
use ropewatch::analysis::risk::{risk_score, risk_terms};
use ropewatch::config::{LifeModelConfig, RiskModelConfig};
use ropewatch::Reading;

fn baseline() -> Reading {
    Reading {
        unit_id: "ELEV-007".to_string(),
        timestamp: "2025-10-31T22:00:00".to_string(),
        tension: 95.0,
        vibration: 10.0,
        wear_pct: 30.0,
        load_cycles: 2_000,
        temperature: 30.0,
        rope_diameter_mm: 13.0,
        corrosion_pct: 10.0,
        elongation: 1.5,
        load_weight_kg: 400.0,
    }
}

fn steps(from: f64, to: f64, n: usize) -> Vec<f64> {
    (0..=n).map(|i| from + (to - from) * i as f64 / n as f64).collect()
}

fn assert_non_decreasing(label: &str, values: &[f64]) {
    for pair in values.windows(2) {
        assert!(pair[1] >= pair[0], "{label}: {} then {}", pair[0], pair[1]);
    }
}

fn assert_non_increasing(label: &str, values: &[f64]) {
    for pair in values.windows(2) {
        assert!(pair[1] <= pair[0], "{label}: {} then {}", pair[0], pair[1]);
    }
}

// ============================================================================
// Risk score
// ============================================================================

#[test]
fn risk_rises_as_each_metric_worsens() {
    let model = RiskModelConfig::default();
    let sweeps: [(&str, Vec<f64>, fn(&mut Reading, f64)); 7] = [
        ("tension", steps(120.0, 0.0, 60), |r, v| r.tension = v),
        ("vibration", steps(0.0, 40.0, 60), |r, v| r.vibration = v),
        ("wear", steps(0.0, 100.0, 60), |r, v| r.wear_pct = v),
        ("temperature", steps(-10.0, 90.0, 60), |r, v| r.temperature = v),
        ("corrosion", steps(0.0, 100.0, 60), |r, v| r.corrosion_pct = v),
        ("elongation", steps(0.0, 15.0, 60), |r, v| r.elongation = v),
        ("diameter", steps(14.5, 9.0, 60), |r, v| r.rope_diameter_mm = v),
    ];

    for (label, values, set) in sweeps {
        let scores: Vec<f64> = values
            .iter()
            .map(|&v| {
                let mut r = baseline();
                set(&mut r, v);
                risk_score(&model, &r)
            })
            .collect();
        assert_non_decreasing(label, &scores);
        assert!(scores.last() > scores.first(), "{label} sweep had no effect");
    }
}

#[test]
fn risk_stays_within_bounds() {
    let model = RiskModelConfig::default();
    for wear in steps(-50.0, 400.0, 30) {
        for vibration in steps(-10.0, 500.0, 30) {
            let r = Reading {
                wear_pct: wear,
                vibration,
                rope_diameter_mm: 2.0,
                ..baseline()
            };
            let score = risk_score(&model, &r);
            assert!((0.0..=100.0).contains(&score), "score {score} out of range");
        }
    }
}

#[test]
fn each_term_respects_its_weight() {
    let model = RiskModelConfig::default();
    let extreme = Reading {
        tension: -500.0,
        vibration: 1_000.0,
        wear_pct: 500.0,
        temperature: 900.0,
        corrosion_pct: 500.0,
        elongation: 100.0,
        ..baseline()
    };
    let terms = risk_terms(&model, &extreme);
    assert_eq!(terms.tension, model.tension_weight);
    assert_eq!(terms.vibration, model.vibration_weight);
    assert_eq!(terms.wear, model.wear_weight);
    assert_eq!(terms.temperature, model.temperature_weight);
    assert_eq!(terms.corrosion, model.corrosion_weight);
    assert_eq!(terms.elongation, model.elongation_weight);
}

#[test]
fn load_weight_does_not_move_risk() {
    let model = RiskModelConfig::default();
    let scores: Vec<f64> = steps(0.0, 2_000.0, 20)
        .into_iter()
        .map(|load| {
            risk_score(
                &model,
                &Reading {
                    load_weight_kg: load,
                    ..baseline()
                },
            )
        })
        .collect();
    assert!(scores.iter().all(|&s| s == scores[0]));
}

// ============================================================================
// Remaining life
// ============================================================================

#[test]
fn life_shrinks_with_wear_corrosion_and_heat() {
    let model = LifeModelConfig::default();
    let sweeps: [(&str, Vec<f64>, fn(&mut Reading, f64)); 3] = [
        ("wear", steps(0.0, 100.0, 50), |r, v| r.wear_pct = v),
        ("corrosion", steps(0.0, 100.0, 50), |r, v| r.corrosion_pct = v),
        ("temperature", steps(0.0, 80.0, 50), |r, v| r.temperature = v),
    ];

    for (label, values, set) in sweeps {
        let cycles: Vec<f64> = values
            .iter()
            .map(|&v| {
                let mut r = baseline();
                set(&mut r, v);
                predict_remaining_life(&model, &r, r.load_cycles).estimated_cycles as f64
            })
            .collect();
        assert_non_increasing(label, &cycles);
    }
}

#[test]
fn life_shrinks_with_cycles_run() {
    let model = LifeModelConfig::default();
    let r = baseline();
    let days: Vec<f64> = (0..=40)
        .map(|i| predict_remaining_life(&model, &r, i * 1_000).estimated_days as f64)
        .collect();
    assert_non_increasing("load_cycles", &days);
    assert_eq!(days.last().copied(), Some(0.0));
}

#[test]
fn thermal_factor_has_a_floor() {
    let model = LifeModelConfig::default();
    let at_limit = Reading {
        temperature: 45.0,
        ..baseline()
    };
    let far_beyond = Reading {
        temperature: 200.0,
        ..baseline()
    };
    // Both sit on the 0.5 floor
    assert_eq!(
        predict_remaining_life(&model, &at_limit, 0).estimated_cycles,
        predict_remaining_life(&model, &far_beyond, 0).estimated_cycles
    );
}
