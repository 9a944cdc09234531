//! Reading history: the storage seam, fleet snapshots and trend series
//!
//! The engine never stores readings. Whatever does (a database, a message
//! log, a test fixture) implements [`ReadingSource`]; the helpers here turn it
//! into the inputs the fleet analytics expect.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::types::Reading;

// ============================================================================
// Unit registry
// ============================================================================

/// Registered elevator and the building it serves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitInfo {
    #[serde(alias = "elevator_id")]
    pub unit_id: String,
    pub building_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// e.g. "B2 to 15"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installation_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_maintenance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rope_type: Option<String>,
}

impl UnitInfo {
    pub fn new(unit_id: &str, building_name: &str) -> Self {
        Self {
            unit_id: unit_id.to_string(),
            building_name: building_name.to_string(),
            location: None,
            floor_range: None,
            installation_date: None,
            last_maintenance: None,
            rope_type: None,
        }
    }
}

// ============================================================================
// Reading source
// ============================================================================

/// Read side of the external reading store.
pub trait ReadingSource: Send + Sync {
    /// Up to `limit` most recent readings for a unit, newest first.
    fn latest_readings(&self, unit_id: &str, limit: usize) -> Vec<Reading>;

    /// Every registered unit, in registry order.
    fn registered_units(&self) -> Vec<UnitInfo>;
}

/// Reading store held in memory. Arrival order is time order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReadingSource {
    units: Vec<UnitInfo>,
    readings: HashMap<String, Vec<Reading>>,
}

impl InMemoryReadingSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a unit; re-registering an id replaces its metadata in place.
    pub fn register_unit(&mut self, info: UnitInfo) {
        match self.units.iter_mut().find(|u| u.unit_id == info.unit_id) {
            Some(existing) => *existing = info,
            None => self.units.push(info),
        }
    }

    /// Append a reading as the newest for its unit.
    pub fn push(&mut self, reading: Reading) {
        self.readings
            .entry(reading.unit_id.clone())
            .or_default()
            .push(reading);
    }

    /// Build a source from readings alone, registering each unit on first
    /// sight under `default_building`.
    pub fn from_readings(readings: Vec<Reading>, default_building: &str) -> Self {
        let mut source = Self::new();
        for reading in readings {
            if !source.readings.contains_key(&reading.unit_id) {
                source.register_unit(UnitInfo::new(&reading.unit_id, default_building));
            }
            source.push(reading);
        }
        source
    }

    pub fn reading_count(&self) -> usize {
        self.readings.values().map(Vec::len).sum()
    }
}

impl ReadingSource for InMemoryReadingSource {
    fn latest_readings(&self, unit_id: &str, limit: usize) -> Vec<Reading> {
        self.readings
            .get(unit_id)
            .map(|history| history.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default()
    }

    fn registered_units(&self) -> Vec<UnitInfo> {
        self.units.clone()
    }
}

/// Latest reading of every registered unit that has reported, in registry order.
pub fn fleet_snapshot(source: &dyn ReadingSource) -> Vec<Reading> {
    source
        .registered_units()
        .iter()
        .filter_map(|unit| source.latest_readings(&unit.unit_id, 1).into_iter().next())
        .collect()
}

/// Latest readings grouped by building, buildings in order of first appearance.
pub fn building_groups(source: &dyn ReadingSource) -> Vec<(String, Vec<Reading>)> {
    let mut groups: Vec<(String, Vec<Reading>)> = Vec::new();
    for unit in source.registered_units() {
        let Some(latest) = source.latest_readings(&unit.unit_id, 1).into_iter().next() else {
            continue;
        };
        match groups.iter_mut().find(|(name, _)| *name == unit.building_name) {
            Some((_, readings)) => readings.push(latest),
            None => groups.push((unit.building_name, vec![latest])),
        }
    }
    groups
}

// ============================================================================
// Trends
// ============================================================================

/// Chronological metric series for one unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub timestamps: Vec<String>,
    pub tension: Vec<f64>,
    pub vibration: Vec<f64>,
    pub wear: Vec<f64>,
    pub temperature: Vec<f64>,
    pub corrosion: Vec<f64>,
}

/// Descriptive statistics of one series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; 0 for a single point
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// Last value minus first value
    pub delta: f64,
}

/// Per-metric statistics; `None` when there is no data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub tension: Option<SeriesStats>,
    pub vibration: Option<SeriesStats>,
    pub wear: Option<SeriesStats>,
    pub temperature: Option<SeriesStats>,
    pub corrosion: Option<SeriesStats>,
}

/// Turn newest-first history (as [`ReadingSource`] returns it) into
/// chronological series.
pub fn extract_trends(readings_newest_first: &[Reading]) -> TrendSeries {
    let mut trends = TrendSeries::default();
    for reading in readings_newest_first.iter().rev() {
        trends.timestamps.push(reading.timestamp.clone());
        trends.tension.push(reading.tension);
        trends.vibration.push(reading.vibration);
        trends.wear.push(reading.wear_pct);
        trends.temperature.push(reading.temperature);
        trends.corrosion.push(reading.corrosion_pct);
    }
    trends
}

impl TrendSeries {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn summary(&self) -> TrendSummary {
        TrendSummary {
            tension: series_stats(&self.tension),
            vibration: series_stats(&self.vibration),
            wear: series_stats(&self.wear),
            temperature: series_stats(&self.temperature),
            corrosion: series_stats(&self.corrosion),
        }
    }
}

fn series_stats(values: &[f64]) -> Option<SeriesStats> {
    let (first, last) = (*values.first()?, *values.last()?);
    let std_dev = if values.len() < 2 { 0.0 } else { values.std_dev() };

    Some(SeriesStats {
        count: values.len(),
        mean: values.mean(),
        std_dev,
        min: values.min(),
        max: values.max(),
        delta: last - first,
    })
}
