//! Alert acknowledgement echo
//!
//! Acknowledgements are transient annotations: nothing is stored, and the
//! history is a fixed sample relative to the request time.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub const ACKNOWLEDGED_STATUS: &str = "acknowledged";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertAcknowledgement {
    pub id: String,
    pub acknowledged: bool,
    pub acknowledged_at: DateTime<Utc>,
    pub acknowledged_by: String,
    pub notes: Option<String>,
    pub status: String,
}

/// One annotation per id, in request order
pub fn acknowledge(
    alert_ids: &[String],
    acknowledged_by: &str,
    notes: Option<&str>,
    now: DateTime<Utc>,
) -> Vec<AlertAcknowledgement> {
    alert_ids
        .iter()
        .map(|id| AlertAcknowledgement {
            id: id.clone(),
            acknowledged: true,
            acknowledged_at: now,
            acknowledged_by: acknowledged_by.to_string(),
            notes: notes.map(str::to_string),
            status: ACKNOWLEDGED_STATUS.to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcknowledgementEntry {
    pub id: String,
    pub alert_id: String,
    pub acknowledged_by: String,
    pub acknowledged_at: DateTime<Utc>,
    pub notes: String,
    pub resolved: bool,
    pub resolved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcknowledgementHistory {
    pub acknowledgments: Vec<AcknowledgementEntry>,
    pub total: usize,
    pub pending: usize,
    pub resolved: usize,
}

pub fn acknowledgement_history(now: DateTime<Utc>) -> AcknowledgementHistory {
    let acknowledgments = vec![
        AcknowledgementEntry {
            id: "ack-1".to_string(),
            alert_id: "alert-1".to_string(),
            acknowledged_by: "admin@company.com".to_string(),
            acknowledged_at: now - Duration::hours(1),
            notes: "Investigating high CPU usage".to_string(),
            resolved: true,
            resolved_at: Some(now - Duration::minutes(30)),
        },
        AcknowledgementEntry {
            id: "ack-2".to_string(),
            alert_id: "alert-2".to_string(),
            acknowledged_by: "devops@company.com".to_string(),
            acknowledged_at: now - Duration::hours(2),
            notes: "Database maintenance scheduled".to_string(),
            resolved: false,
            resolved_at: None,
        },
    ];

    let resolved = acknowledgments.iter().filter(|a| a.resolved).count();
    AcknowledgementHistory {
        total: acknowledgments.len(),
        pending: acknowledgments.len() - resolved,
        resolved,
        acknowledgments,
    }
}
