//! Rule-based multi-metric classifier
//!
//! Each of the eight metrics is checked against its warning/critical pair in
//! a fixed direction. A metric lands in at most one bucket: the critical
//! check runs first and short-circuits the warning check for that metric.
//! Any critical issue makes the reading Critical; otherwise any warning
//! issue makes it Warning.

use crate::config::{MetricBounds, ThresholdConfig};
use crate::types::{Classification, Direction, Metric, Reading, Tier};

/// Reason reported when no metric crosses a bound.
pub const HEALTHY_REASON: &str = "All metrics within safe operating range";

const CRITICAL_CONFIDENCE: f64 = 0.95;
const WARNING_CONFIDENCE: f64 = 0.85;
const HEALTHY_CONFIDENCE: f64 = 0.90;

/// Classify one reading against the threshold table.
pub fn classify(thresholds: &ThresholdConfig, reading: &Reading) -> Classification {
    let mut critical_issues = Vec::new();
    let mut warning_issues = Vec::new();

    for metric in Metric::ALL {
        let value = reading.value(metric);
        match severity(metric, thresholds.bounds(metric), value) {
            Some(Tier::Critical) => {
                critical_issues.push(describe(metric.critical_phrase(), metric, value));
            }
            Some(Tier::Warning) => {
                warning_issues.push(describe(metric.warning_phrase(), metric, value));
            }
            Some(Tier::Healthy) | None => {}
        }
    }

    if !critical_issues.is_empty() {
        summarize(Tier::Critical, CRITICAL_CONFIDENCE, &critical_issues)
    } else if !warning_issues.is_empty() {
        summarize(Tier::Warning, WARNING_CONFIDENCE, &warning_issues)
    } else {
        Classification {
            tier: Tier::Healthy,
            confidence: HEALTHY_CONFIDENCE,
            reason: HEALTHY_REASON.to_string(),
            triggered_metrics: Vec::new(),
        }
    }
}

/// Which bound, if any, a single metric value crosses.
///
/// Bounds are strict: a value sitting exactly on a bound does not trigger it.
pub fn severity(metric: Metric, bounds: MetricBounds, value: f64) -> Option<Tier> {
    let crosses = |bound: f64| match metric.direction() {
        Direction::Below => value < bound,
        Direction::Above => value > bound,
    };

    if crosses(bounds.critical) {
        Some(Tier::Critical)
    } else if crosses(bounds.warning) {
        Some(Tier::Warning)
    } else {
        None
    }
}

fn describe(phrase: &str, metric: Metric, value: f64) -> String {
    format!("{phrase} ({value:.1}{})", metric.unit())
}

fn summarize(tier: Tier, confidence: f64, issues: &[String]) -> Classification {
    // Token is the first word of the issue ("Rope diameter ..." -> "Rope")
    let triggered_metrics = issues
        .iter()
        .filter_map(|issue| issue.split_whitespace().next())
        .map(str::to_string)
        .collect();

    Classification {
        tier,
        confidence,
        reason: issues.join(" | "),
        triggered_metrics,
    }
}
