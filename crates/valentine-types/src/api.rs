use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Activity;

/// Header carrying the shared admin secret on dashboard reads.
pub const ADMIN_KEY_HEADER: &str = "X-Admin-Key";

// -- Activity selections --

/// Body of `POST /activity`. The activity fields echo the catalog entry the
/// recipient picked; the server stores them as sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionDraft {
    pub activity_id: i64,
    pub activity_title: String,
    pub activity_emoji: String,
    #[serde(default)]
    pub activity_response: Option<String>,
    #[serde(default)]
    pub client_hint: Option<String>,
    #[serde(default)]
    pub recipient_name: Option<String>,
    #[serde(default)]
    pub host_email: Option<String>,
}

impl SelectionDraft {
    pub fn from_activity(
        activity: &Activity,
        client_hint: String,
        recipient_name: Option<String>,
        host_email: Option<String>,
    ) -> Self {
        Self {
            activity_id: activity.id,
            activity_title: activity.title.to_string(),
            activity_emoji: activity.emoji.to_string(),
            activity_response: Some(activity.response.to_string()),
            client_hint: Some(client_hint),
            recipient_name,
            host_email,
        }
    }

    /// Promote the draft into a stored record with server-assigned id and time.
    pub fn into_record(self, id: Uuid, timestamp: DateTime<Utc>) -> SelectionRecord {
        SelectionRecord {
            id: id.to_string(),
            activity_id: self.activity_id,
            activity_title: self.activity_title,
            activity_emoji: self.activity_emoji,
            activity_response: self.activity_response,
            client_hint: self.client_hint,
            recipient_name: self.recipient_name,
            host_email: self.host_email,
            timestamp,
        }
    }
}

/// A stored selection as returned by `POST /activity` and `GET /activity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionRecord {
    pub id: String,
    pub activity_id: i64,
    #[serde(default)]
    pub activity_title: String,
    #[serde(default)]
    pub activity_emoji: String,
    #[serde(default)]
    pub activity_response: Option<String>,
    #[serde(default)]
    pub client_hint: Option<String>,
    #[serde(default)]
    pub recipient_name: Option<String>,
    #[serde(default)]
    pub host_email: Option<String>,
    pub timestamp: DateTime<Utc>,
}

// -- Health --

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub notifications: bool,
}
