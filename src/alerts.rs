//! Alert policy for callers that persist assessments
//!
//! Only Warning and Critical assessments raise an alert. The first triggered
//! metric is recorded as the cause.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Assessment, Tier};

const MESSAGE_REASON_CHARS: usize = 100;

/// Alert record handed to the external store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub alert_id: String,
    pub unit_id: String,
    pub alert_type: Tier,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub resolved: bool,
    pub triggered_by: Option<String>,
}

/// Derive the alert an assessment should raise, if any.
///
/// The id is second-resolution (`ALERT-yyyymmddHHMMSS`), so two alerts raised
/// in the same second share an id; the store decides how to deduplicate.
pub fn derive_alert(assessment: &Assessment, at: DateTime<Utc>) -> Option<AlertRecord> {
    let tier = assessment.tier();
    if !tier.raises_alert() {
        return None;
    }

    let reason: String = assessment
        .classification
        .reason
        .chars()
        .take(MESSAGE_REASON_CHARS)
        .collect();

    Some(AlertRecord {
        alert_id: format!("ALERT-{}", at.format("%Y%m%d%H%M%S")),
        unit_id: assessment.unit_id.clone(),
        alert_type: tier,
        message: format!("{tier}: {reason}"),
        timestamp: at,
        resolved: false,
        triggered_by: assessment.classification.primary_metric().map(str::to_string),
    })
}
