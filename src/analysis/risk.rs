//! Continuous 0-100 risk score
//!
//! Weighted sum over seven metrics, independent of the discrete tier. Load
//! weight is checked by the classifier but does not contribute.

use crate::config::RiskModelConfig;
use crate::types::Reading;

const MAX_RISK: f64 = 100.0;

/// Per-metric contributions before the final clamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskTerms {
    pub tension: f64,
    pub vibration: f64,
    pub wear: f64,
    pub temperature: f64,
    pub corrosion: f64,
    pub elongation: f64,
    pub diameter: f64,
}

impl RiskTerms {
    pub fn total(&self) -> f64 {
        self.tension
            + self.vibration
            + self.wear
            + self.temperature
            + self.corrosion
            + self.elongation
            + self.diameter
    }
}

/// Compute every term, each clamped to `[0, weight]`.
///
/// The diameter term only has a floor; its ceiling comes from the total clamp.
pub fn risk_terms(model: &RiskModelConfig, reading: &Reading) -> RiskTerms {
    RiskTerms {
        tension: term(
            (model.tension_reference_n - reading.tension) / model.tension_reference_n,
            model.tension_weight,
        ),
        vibration: term(reading.vibration / model.vibration_scale_mm_s, model.vibration_weight),
        wear: term(reading.wear_pct / 100.0, model.wear_weight),
        temperature: term(reading.temperature / model.temperature_scale_c, model.temperature_weight),
        corrosion: term(reading.corrosion_pct / 100.0, model.corrosion_weight),
        elongation: term(reading.elongation / model.elongation_scale_mm, model.elongation_weight),
        diameter: ((model.nominal_diameter_mm - reading.rope_diameter_mm)
            * model.diameter_weight_per_mm)
            .max(0.0),
    }
}

/// Risk score in `[0, 100]`, unrounded.
///
/// Stays in range even for a NaN metric, which contributes nothing.
pub fn risk_score(model: &RiskModelConfig, reading: &Reading) -> f64 {
    risk_terms(model, reading).total().max(0.0).min(MAX_RISK)
}

// `f64::max`/`min` drop a NaN operand; `clamp` would return it, or panic on
// a NaN or negative weight.
fn term(fraction: f64, weight: f64) -> f64 {
    (fraction * weight).max(0.0).min(weight.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading() -> Reading {
        Reading {
            unit_id: "ELEV-001".to_string(),
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

    #[test]
    fn test_healthy_example_score() {
        // 0.9 + 7.38 + 11.3 + 5.4167 + 2.25 + 2.3 + 3.5
        let score = risk_score(&RiskModelConfig::default(), &reading());
        assert!((score - 33.04667).abs() < 1e-4, "score = {score}");
    }

    #[test]
    fn test_terms_hit_their_ceilings() {
        let r = Reading {
            tension: 0.0,
            vibration: 500.0,
            wear_pct: 100.0,
            temperature: 500.0,
            corrosion_pct: 100.0,
            elongation: 100.0,
            rope_diameter_mm: 13.5,
            ..reading()
        };
        let terms = risk_terms(&RiskModelConfig::default(), &r);
        assert_eq!(terms.tension, 20.0);
        assert_eq!(terms.vibration, 15.0);
        assert_eq!(terms.wear, 25.0);
        assert_eq!(terms.temperature, 10.0);
        assert_eq!(terms.corrosion, 15.0);
        assert_eq!(terms.elongation, 10.0);
        assert_eq!(terms.diameter, 0.0);
        assert_eq!(terms.total(), 95.0);
    }

    #[test]
    fn test_extremes_stay_in_range() {
        let model = RiskModelConfig::default();
        let worst = Reading {
            tension: -1_000.0,
            vibration: 1e6,
            wear_pct: 1_000.0,
            temperature: 1e4,
            rope_diameter_mm: -50.0,
            corrosion_pct: 1_000.0,
            elongation: 1e3,
            ..reading()
        };
        assert_eq!(risk_score(&model, &worst), 100.0);

        let best = Reading {
            tension: 500.0,
            vibration: -10.0,
            wear_pct: -20.0,
            temperature: -40.0,
            rope_diameter_mm: 20.0,
            corrosion_pct: -5.0,
            elongation: -1.0,
            ..reading()
        };
        assert_eq!(risk_score(&model, &best), 0.0);
    }

    #[test]
    fn test_load_weight_does_not_move_score() {
        let model = RiskModelConfig::default();
        let light = reading();
        let heavy = Reading { load_weight_kg: 2_000.0, ..reading() };
        assert_eq!(risk_score(&model, &light), risk_score(&model, &heavy));
    }

    #[test]
    fn test_nan_metric_contributes_nothing() {
        let model = RiskModelConfig::default();
        let r = Reading { vibration: f64::NAN, ..reading() };
        assert_eq!(risk_terms(&model, &r).vibration, 0.0);

        let score = risk_score(&model, &r);
        assert!((0.0..=100.0).contains(&score), "score = {score}");
        assert!((score - 25.66667).abs() < 1e-4, "score = {score}");

        let all_nan = Reading {
            tension: f64::NAN,
            wear_pct: f64::NAN,
            rope_diameter_mm: f64::NAN,
            ..r
        };
        assert!((0.0..=100.0).contains(&risk_score(&model, &all_nan)));
    }

    #[test]
    fn test_bad_weights_zero_the_term() {
        let model = RiskModelConfig {
            vibration_weight: -1.0,
            wear_weight: f64::NAN,
            ..RiskModelConfig::default()
        };
        let terms = risk_terms(&model, &reading());
        assert_eq!(terms.vibration, 0.0);
        assert_eq!(terms.wear, 0.0);
        assert!((0.0..=100.0).contains(&risk_score(&model, &reading())));
    }
}
