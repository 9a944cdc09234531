//! Remaining useful life projection
//!
//! Design life is derated by three multiplicative factors (wear, corrosion,
//! thermal), cycles already run are subtracted, and the remainder is
//! converted to days at a fixed duty rate.

use crate::config::LifeModelConfig;
use crate::types::{LifeEstimate, MaintenanceUrgency, Reading};

/// Project remaining life from the reading's condition and `load_cycles` run.
pub fn predict_remaining_life(
    model: &LifeModelConfig,
    reading: &Reading,
    load_cycles: u64,
) -> LifeEstimate {
    let wear_factor = (100.0 - reading.wear_pct) / 100.0;
    let corrosion_factor = (100.0 - reading.corrosion_pct) / 100.0;
    let temp_factor = ((model.temperature_limit_c - reading.temperature) / model.temperature_limit_c)
        .max(model.min_temperature_factor);

    let adjusted_life = model.base_life_cycles as f64 * wear_factor * corrosion_factor * temp_factor;
    let remaining_cycles = (adjusted_life - load_cycles as f64).max(0.0);

    let estimated_days = if model.cycles_per_day == 0 {
        0
    } else {
        (remaining_cycles / model.cycles_per_day as f64).floor() as u64
    };

    let confidence = if estimated_days > model.confidence_horizon_days {
        model.high_confidence
    } else {
        model.low_confidence
    };

    let urgency = MaintenanceUrgency::from_days(estimated_days);

    LifeEstimate {
        estimated_days,
        estimated_cycles: remaining_cycles.floor() as u64,
        confidence,
        urgency,
        recommendation: urgency.recommendation().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(wear: f64, corrosion: f64, temperature: f64) -> Reading {
        Reading {
            unit_id: "ELEV-001".to_string(),
            timestamp: "2025-10-31T22:00:00".to_string(),
            tension: 95.0,
            vibration: 10.0,
            wear_pct: wear,
            load_cycles: 0,
            temperature,
            rope_diameter_mm: 13.0,
            corrosion_pct: corrosion,
            elongation: 1.0,
            load_weight_kg: 400.0,
        }
    }

    #[test]
    fn test_new_rope_at_ambient() {
        // 50000 * 1.0 * 1.0 * 0.5 = 25000 cycles -> 250 days
        let est = predict_remaining_life(&LifeModelConfig::default(), &reading(0.0, 0.0, 30.0), 0);
        assert_eq!(est.estimated_cycles, 25_000);
        assert_eq!(est.estimated_days, 250);
        assert_eq!(est.confidence, 0.75);
        assert_eq!(est.urgency, MaintenanceUrgency::Routine);
        assert_eq!(est.recommendation, "Continue routine monitoring");
    }

    #[test]
    fn test_healthy_example() {
        // 50000 * 0.548 * 0.85 * 0.5 lands just under 11645 in floating point
        let est = predict_remaining_life(&LifeModelConfig::default(), &reading(45.2, 15.0, 32.5), 1_500);
        assert_eq!(est.estimated_cycles, 10_144);
        assert_eq!(est.estimated_days, 101);
        assert_eq!(est.confidence, 0.75);
    }

    #[test]
    fn test_temperature_factor_is_floored() {
        let model = LifeModelConfig::default();
        let hot = predict_remaining_life(&model, &reading(0.0, 0.0, 200.0), 0);
        let warm = predict_remaining_life(&model, &reading(0.0, 0.0, 30.0), 0);
        assert_eq!(hot.estimated_cycles, warm.estimated_cycles);
    }

    #[test]
    fn test_worn_out_rope_never_goes_negative() {
        let est = predict_remaining_life(&LifeModelConfig::default(), &reading(80.0, 45.0, 52.0), 45_000);
        assert_eq!(est.estimated_cycles, 0);
        assert_eq!(est.estimated_days, 0);
        assert_eq!(est.confidence, 0.60);
        assert_eq!(est.recommendation, "URGENT: Schedule immediate rope replacement");
    }

    #[test]
    fn test_confidence_boundary_is_exclusive() {
        // 50000 * 0.5 * 1.0 * 0.5 = 12500; minus 9400 -> 3100 cycles = 31 days
        let model = LifeModelConfig::default();
        let est = predict_remaining_life(&model, &reading(50.0, 0.0, 30.0), 9_400);
        assert_eq!(est.estimated_days, 31);
        assert_eq!(est.confidence, 0.75);

        let est = predict_remaining_life(&model, &reading(50.0, 0.0, 30.0), 9_500);
        assert_eq!(est.estimated_days, 30);
        assert_eq!(est.confidence, 0.60);
        assert_eq!(est.urgency, MaintenanceUrgency::NextQuarter);
    }
}
