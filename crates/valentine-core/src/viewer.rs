//! Host-side activity log: polled, never pushed.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use valentine_types::api::SelectionRecord;

use crate::store::SelectionStore;

pub const POLL_INTERVAL: Duration = Duration::from_secs(15);
pub const EMPTY_LOG_MESSAGE: &str = "No selections recorded yet.";

/// What the log panel shows right now.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogSnapshot {
    pub selections: Vec<SelectionRecord>,
    pub error: Option<String>,
    pub last_synced_at: Option<DateTime<Utc>>,
    pub loading: bool,
}

impl LogSnapshot {
    /// Nothing recorded yet, as opposed to "still loading".
    pub fn is_empty_log(&self) -> bool {
        !self.loading && self.selections.is_empty()
    }

    /// Text rendering of the panel, top to bottom.
    pub fn render(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "Last updated: {}",
            self.last_synced_at
                .map(|t| t.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "Never".into())
        )];

        if let Some(error) = &self.error {
            lines.push(error.clone());
        }

        if self.is_empty_log() {
            lines.push(EMPTY_LOG_MESSAGE.into());
        }

        for record in &self.selections {
            lines.extend(render_selection(record));
        }
        lines
    }
}

/// One log entry. Missing optional fields get placeholders.
pub fn render_selection(record: &SelectionRecord) -> Vec<String> {
    let title = if record.activity_title.is_empty() {
        "Unknown activity"
    } else {
        record.activity_title.as_str()
    };

    let mut lines = vec![
        format!("{} {}", record.activity_emoji, title).trim().to_string(),
        record.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        format!("Recipient: {}", record.recipient_name.as_deref().unwrap_or("Unknown")),
        format!("Host email: {}", record.host_email.as_deref().unwrap_or("Not provided")),
    ];
    if let Some(hint) = &record.client_hint {
        lines.push(format!("Client: {}", hint));
    }
    lines
}

/// Polls a `SelectionStore` for the host dashboard.
///
/// A failed read keeps the last good list and shows the error; the next poll
/// tries again at the same cadence. Manual refreshes can overlap polls and
/// whichever finishes last wins.
pub struct ActivityLogViewer<S> {
    store: Arc<S>,
    has_admin_access: bool,
    snapshot: Arc<Mutex<LogSnapshot>>,
}

impl<S> Clone for ActivityLogViewer<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            has_admin_access: self.has_admin_access,
            snapshot: self.snapshot.clone(),
        }
    }
}

impl<S: SelectionStore> ActivityLogViewer<S> {
    pub fn new(store: Arc<S>, has_admin_access: bool) -> Self {
        Self {
            store,
            has_admin_access,
            snapshot: Arc::new(Mutex::new(LogSnapshot::default())),
        }
    }

    pub fn snapshot(&self) -> LogSnapshot {
        self.lock().clone()
    }

    pub async fn refresh(&self) {
        if !self.has_admin_access {
            return;
        }

        {
            let mut snap = self.lock();
            snap.loading = true;
            snap.error = None;
        }

        let result = self.store.list().await;

        let mut snap = self.lock();
        snap.loading = false;
        match result {
            Ok(selections) => {
                debug!("Activity log refreshed: {} selections", selections.len());
                snap.selections = selections;
                snap.last_synced_at = Some(Utc::now());
            }
            Err(e) => {
                warn!("Failed to load activity log: {}", e);
                snap.error = Some(e.to_string());
            }
        }
    }

    /// Refresh now and then every `interval` until the handle is stopped or dropped.
    pub fn start(&self, interval: Duration) -> PollHandle {
        let viewer = self.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                viewer.refresh().await;
            }
        });
        PollHandle { task }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LogSnapshot> {
        self.snapshot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Running poll loop, tied to the dashboard being mounted.
#[derive(Debug)]
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn stop(self) {
        self.task.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
