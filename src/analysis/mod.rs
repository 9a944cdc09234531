//! Per-reading analysis: classification, risk, remaining life, savings
//!
//! Every function here is a pure transform of a [`Reading`] plus the engine's
//! configuration. [`RopeHealthEngine`] owns one [`EngineConfig`] and exposes
//! the four per-reading operations plus [`RopeHealthEngine::assess`], which
//! runs all of them on a validated reading.
//!
//! - `classifier`: multi-metric threshold classifier
//! - `risk`: continuous 0-100 risk score
//! - `remaining_life`: remaining useful life estimate
//! - `savings`: predictive-vs-reactive cost model

pub mod classifier;
pub mod remaining_life;
pub mod risk;
pub mod savings;

use tracing::debug;

use crate::config::{ConfigError, EngineConfig};
use crate::types::{
    Assessment, Classification, EngineError, LifeEstimate, Reading, SavingsResult, Tier,
};

// ============================================================================
// Engine
// ============================================================================

/// Stateless rope health engine.
///
/// Holds nothing but immutable configuration, so a single instance can be
/// shared across threads (fleet analytics fan out over rayon).
#[derive(Debug, Clone, Default)]
pub struct RopeHealthEngine {
    config: EngineConfig,
}

impl RopeHealthEngine {
    /// Wrap a config as is. Prefer [`RopeHealthEngine::try_new`] for config
    /// that did not come through [`EngineConfig::load`] or `from_toml_str`.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Wrap a config after checking it with [`EngineConfig::validate`].
    pub fn try_new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Tier, confidence, reason and triggered metrics for one reading.
    ///
    /// Does not validate; a NaN metric fails every comparison and cannot
    /// raise the tier. Use [`RopeHealthEngine::assess`] for untrusted input.
    pub fn classify(&self, reading: &Reading) -> Classification {
        classifier::classify(&self.config.thresholds, reading)
    }

    /// Unrounded risk score in `[0, 100]`.
    pub fn risk_score(&self, reading: &Reading) -> f64 {
        risk::risk_score(&self.config.risk, reading)
    }

    pub fn predict_remaining_life(&self, reading: &Reading, load_cycles: u64) -> LifeEstimate {
        remaining_life::predict_remaining_life(&self.config.life, reading, load_cycles)
    }

    /// Savings for a reading already classified at `tier`.
    ///
    /// Only the tier feeds the current cost model.
    pub fn calculate_cost_savings(&self, _reading: &Reading, tier: Tier) -> SavingsResult {
        savings::calculate_cost_savings(&self.config.costs, &self.config.savings, tier)
    }

    /// Full assessment of one reading.
    ///
    /// Remaining life uses the reading's own `load_cycles`. Fails only when the
    /// reading is unusable (empty unit id, non-finite metric).
    pub fn assess(&self, reading: &Reading) -> Result<Assessment, EngineError> {
        reading.validate()?;

        let classification = self.classify(reading);
        let risk_score = round2(self.risk_score(reading));
        let remaining_life = self.predict_remaining_life(reading, reading.load_cycles);
        let cost_savings = self.calculate_cost_savings(reading, classification.tier);

        debug!(
            unit_id = %reading.unit_id,
            tier = %classification.tier,
            risk_score,
            days_remaining = remaining_life.estimated_days,
            "Assessed reading"
        );

        Ok(Assessment {
            unit_id: reading.unit_id.clone(),
            timestamp: reading.timestamp.clone(),
            classification,
            risk_score,
            remaining_life,
            cost_savings,
        })
    }
}

// ============================================================================
// Numeric helpers
// ============================================================================

/// Round to two decimals, ties to even (228.125 -> 228.12).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// `numerator / denominator * 100`, or 0 when the denominator is 0.
pub(crate) fn ratio_pct(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator * 100.0
    }
}
