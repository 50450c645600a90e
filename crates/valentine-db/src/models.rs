//! Row types as stored in SQLite. The API layer maps them to
//! `valentine_types::api::SelectionRecord`.

pub struct SelectionRow {
    pub id: String,
    pub activity_id: i64,
    pub activity_title: String,
    pub activity_emoji: String,
    pub activity_response: Option<String>,
    pub client_hint: Option<String>,
    pub recipient_name: Option<String>,
    pub host_email: Option<String>,
    pub created_at: String,
}
