//! Fleet Aggregation
//!
//! Cross-unit analytics built on the per-reading engine. Every function takes
//! the readings to aggregate (normally the latest reading per unit) and
//! derives its result on the spot; nothing is cached between calls.
//!
//! Each function validates the whole batch first and returns
//! `EngineError::InvalidInput` for the first non-finite reading, so a
//! broken sensor never produces a partial ranking.
//!
//! ## Operations
//!
//! - **analyze_fleet**: tier counts, average risk, top-K risk ranking, savings
//! - **generate_maintenance_priority_list**: risk plus urgency bonus, most urgent first
//! - **compare_buildings**: per-building analysis ranked by health percentage
//! - **calculate_roi_report**: fleet savings against predictive spend
//! - **generate_fleet_report**: composite management report
//!
//! ## Ordering
//!
//! Per-unit evaluation runs on rayon, but results are collected in input
//! order and ranked with stable sorts, so ties always resolve by input
//! position and parallel output matches a sequential run.

pub mod analytics;
pub mod buildings;
pub mod priority;
pub mod report;
pub mod roi;

pub use analytics::analyze_fleet;
pub use buildings::compare_buildings;
pub use priority::generate_maintenance_priority_list;
pub use report::{fleet_report_from_source, generate_fleet_report};
pub use roi::calculate_roi_report;
