//! Cross-unit aggregates produced by the fleet analytics

use serde::{Deserialize, Serialize};

use super::Tier;

/// Unit counts per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierBreakdown {
    pub critical: usize,
    pub warning: usize,
    pub healthy: usize,
}

impl TierBreakdown {
    pub fn record(&mut self, tier: Tier) {
        match tier {
            Tier::Critical => self.critical += 1,
            Tier::Warning => self.warning += 1,
            Tier::Healthy => self.healthy += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.warning + self.healthy
    }

    pub fn count(&self, tier: Tier) -> usize {
        match tier {
            Tier::Critical => self.critical,
            Tier::Warning => self.warning,
            Tier::Healthy => self.healthy,
        }
    }
}

/// Per-unit line of a fleet analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRisk {
    pub unit_id: String,
    pub tier: Tier,
    pub risk_score: f64,
    pub confidence: f64,
    pub reason: String,
    pub potential_savings: f64,
}

/// Fleet-wide health snapshot. Derived on every call, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetReport {
    pub total_units: usize,
    pub tier_breakdown: TierBreakdown,
    pub average_risk_score: f64,
    /// Highest risk first; ties keep input order
    pub highest_risk_units: Vec<UnitRisk>,
    pub health_pct: f64,
    pub total_estimated_savings: f64,
}

/// One entry of the maintenance queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityItem {
    pub unit_id: String,
    /// Risk score plus urgency bonus, capped and rounded to two decimals
    pub priority_score: f64,
    pub tier: Tier,
    pub risk_score: f64,
    pub days_remaining: u64,
    pub recommendation: String,
    pub reason: String,
}

/// Health figures for one building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingSummary {
    pub building_name: String,
    pub total_units: usize,
    pub average_risk: f64,
    pub health_pct: f64,
    pub critical_count: usize,
    pub estimated_savings: f64,
}

/// Buildings ranked by health percentage, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingComparison {
    pub buildings: Vec<BuildingSummary>,
    pub best_performing: Option<String>,
    /// Buildings with at least one Critical unit, in ranking order
    pub needs_attention: Vec<String>,
}

/// Savings split by tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SavingsByTier {
    pub critical: f64,
    pub warning: f64,
    pub healthy: f64,
}

impl SavingsByTier {
    pub fn add(&mut self, tier: Tier, amount: f64) {
        match tier {
            Tier::Critical => self.critical += amount,
            Tier::Warning => self.warning += amount,
            Tier::Healthy => self.healthy += amount,
        }
    }
}

/// Fleet return-on-investment roll-up (INR).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiReport {
    pub total_savings: f64,
    pub total_investment: f64,
    pub net_benefit: f64,
    pub overall_roi_pct: f64,
    pub savings_by_tier: SavingsByTier,
    pub units_analyzed: usize,
    pub average_savings_per_unit: f64,
}

/// Headline figures of the composite fleet report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetOverview {
    pub registered_units: usize,
    pub units_with_data: usize,
    pub average_risk_score: f64,
    pub health_pct: f64,
}

/// Money figures of the composite fleet report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub total_savings: f64,
    pub total_investment: f64,
    pub net_benefit: f64,
    pub overall_roi_pct: f64,
}

/// Management report combining analysis, queue and ROI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetHealthReport {
    pub overview: FleetOverview,
    pub tier_breakdown: TierBreakdown,
    pub highest_risk_units: Vec<UnitRisk>,
    pub maintenance_priorities: Vec<PriorityItem>,
    pub financial_summary: FinancialSummary,
}
