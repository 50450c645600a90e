use std::sync::Arc;

use valentine_db::Database;

use crate::notify::Notifier;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    /// Shared secret for reading the log. Empty disables the check.
    pub admin_key: String,
    pub notifier: Option<Arc<dyn Notifier>>,
}

impl AppStateInner {
    pub fn new(db: Database, admin_key: String, notifier: Option<Arc<dyn Notifier>>) -> AppState {
        Arc::new(Self {
            db,
            admin_key,
            notifier,
        })
    }
}
