//! Ropewatch: Elevator Hoist Rope Health Analytics
//!
//! Rule-based health classification and cost-benefit analytics for elevator
//! hoist ropes, from single sensor readings up to fleet-wide rankings.
//!
//! ## Architecture
//!
//! - **Config**: threshold table, cost model and model constants (TOML)
//! - **Analysis**: classifier, risk scorer, remaining-life estimator, savings calculator
//! - **Fleet**: rankings, maintenance queue, building comparison, ROI roll-up
//! - **History**: reading-store seam, fleet snapshots, trend series
//! - **Alerts**: alert policy for callers that persist assessments

pub mod alerts;
pub mod analysis;
pub mod config;
pub mod fleet;
pub mod history;
pub mod types;

// Re-export configuration
pub use config::{ConfigError, EngineConfig};

// Re-export the engine
pub use analysis::RopeHealthEngine;

// Re-export commonly used types
pub use types::{
    Assessment, Classification, EngineError, FleetHealthReport, FleetReport, LifeEstimate,
    Metric, PriorityItem, Reading, RoiReport, SavingsResult, Tier,
};

// Re-export the storage seam
pub use history::{InMemoryReadingSource, ReadingSource, UnitInfo};
