//! Shared data structures for hoist rope health analytics
//!
//! - `reading`: sensor snapshots and the metric catalogue
//! - `health`: per-reading outputs (tier, classification, life, savings)
//! - `fleet`: cross-unit aggregates (fleet report, priorities, buildings, ROI)
//! - `error`: input-boundary errors

mod error;
mod fleet;
mod health;
mod reading;

pub use error::*;
pub use fleet::*;
pub use health::*;
pub use reading::*;
