//! Notification channel settings, delivery history and dispatch echo

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::Severity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationOverview {
    pub settings: NotificationSettings,
    pub history: Vec<NotificationHistoryEntry>,
    pub stats: DeliveryStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub email: EmailChannel,
    pub slack: SlackChannel,
    pub sms: SmsChannel,
    pub webhook: WebhookChannel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailChannel {
    pub enabled: bool,
    pub recipients: Vec<String>,
    pub alert_levels: Vec<Severity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlackChannel {
    pub enabled: bool,
    pub webhook: String,
    pub channel: String,
    pub alert_levels: Vec<Severity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsChannel {
    pub enabled: bool,
    pub numbers: Vec<String>,
    pub alert_levels: Vec<Severity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookChannel {
    pub enabled: bool,
    pub url: String,
    pub alert_levels: Vec<Severity>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Delivered,
    Failed,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationHistoryEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub channel_type: String,
    pub alert_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub sent_at: DateTime<Utc>,
    pub status: DeliveryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryStats {
    pub total: u64,
    pub delivered: u64,
    pub failed: u64,
    pub pending: u64,
}

/// A notification the dashboard asked to send
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentNotification {
    pub id: String,
    #[serde(rename = "type")]
    pub channel_type: String,
    pub alert_id: Option<String>,
    pub recipients: Option<Vec<String>>,
    pub message: Option<String>,
    pub sent_at: DateTime<Utc>,
    pub status: DeliveryStatus,
}

pub fn notification_overview(now: DateTime<Utc>) -> NotificationOverview {
    let webhook_url = "https://api.company.com/webhooks/alerts".to_string();

    NotificationOverview {
        settings: NotificationSettings {
            email: EmailChannel {
                enabled: true,
                recipients: vec!["admin@company.com".to_string(), "devops@company.com".to_string()],
                alert_levels: vec![Severity::Critical, Severity::Warning],
            },
            slack: SlackChannel {
                enabled: true,
                webhook: "https://hooks.slack.com/services/...".to_string(),
                channel: "#alerts".to_string(),
                alert_levels: vec![Severity::Critical],
            },
            sms: SmsChannel {
                enabled: false,
                numbers: vec!["+1234567890".to_string()],
                alert_levels: vec![Severity::Critical],
            },
            webhook: WebhookChannel {
                enabled: true,
                url: webhook_url.clone(),
                alert_levels: vec![Severity::Critical, Severity::Warning],
            },
        },
        history: vec![
            NotificationHistoryEntry {
                id: "notif-1".to_string(),
                channel_type: "email".to_string(),
                alert_id: "alert-1".to_string(),
                recipient: Some("admin@company.com".to_string()),
                subject: Some("Critical Alert: High CPU Usage".to_string()),
                channel: None,
                url: None,
                sent_at: now - Duration::hours(1),
                status: DeliveryStatus::Delivered,
                error: None,
            },
            NotificationHistoryEntry {
                id: "notif-2".to_string(),
                channel_type: "slack".to_string(),
                alert_id: "alert-1".to_string(),
                recipient: None,
                subject: None,
                channel: Some("#alerts".to_string()),
                url: None,
                sent_at: now - Duration::hours(1),
                status: DeliveryStatus::Delivered,
                error: None,
            },
            NotificationHistoryEntry {
                id: "notif-3".to_string(),
                channel_type: "webhook".to_string(),
                alert_id: "alert-2".to_string(),
                recipient: None,
                subject: None,
                channel: None,
                url: Some(webhook_url),
                sent_at: now - Duration::hours(2),
                status: DeliveryStatus::Failed,
                error: Some("Connection timeout".to_string()),
            },
        ],
        stats: DeliveryStats {
            total: 156,
            delivered: 142,
            failed: 14,
            pending: 0,
        },
    }
}

/// Echo a send request. One in ten simulated deliveries fails.
pub fn dispatch_notification<R: Rng + ?Sized>(
    rng: &mut R,
    channel_type: String,
    alert_id: Option<String>,
    recipients: Option<Vec<String>>,
    message: Option<String>,
    now: DateTime<Utc>,
) -> SentNotification {
    let status = if rng.gen::<f64>() > 0.1 {
        DeliveryStatus::Delivered
    } else {
        DeliveryStatus::Failed
    };

    SentNotification {
        id: format!("notif-{}", now.timestamp_millis()),
        channel_type,
        alert_id,
        recipients,
        message,
        sent_at: now,
        status,
    }
}
