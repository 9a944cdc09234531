//! Engine Configuration Module
//!
//! The threshold table, cost model and model constants, loaded from TOML and
//! handed to the engine as an owned value. Nothing here is global: tests and
//! callers build an [`EngineConfig`], tweak it, and pass it to
//! [`crate::analysis::RopeHealthEngine::new`].
//!
//! ## Loading Order
//!
//! 1. `ROPEWATCH_CONFIG` environment variable (path to TOML file)
//! 2. `ropewatch.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! ```ignore
//! let engine = RopeHealthEngine::new(EngineConfig::load());
//! ```

mod engine_config;
pub mod validation;

pub use engine_config::*;
