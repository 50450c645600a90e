use std::future::Future;

use chrono::Utc;
use reqwest::Client;
use tracing::warn;
use uuid::Uuid;

use valentine_types::api::{ADMIN_KEY_HEADER, SelectionDraft, SelectionRecord};

use crate::config::ClientConfig;
use crate::error::{FetchError, PersistenceError};

/// Append-only log of picked activities, as seen from the page.
///
/// `append` is open to anyone holding a recipient link. `list` is the host's
/// read and carries the admin secret when one is configured.
pub trait SelectionStore: Send + Sync + 'static {
    fn append(
        &self,
        draft: &SelectionDraft,
    ) -> impl Future<Output = Result<SelectionRecord, PersistenceError>> + Send;

    /// All records, in whatever order the backend returns them.
    fn list(&self) -> impl Future<Output = Result<Vec<SelectionRecord>, FetchError>> + Send;
}

/// `SelectionStore` over the REST API. No retries and no timeouts: callers
/// show the failure and move on.
#[derive(Debug, Clone)]
pub struct HttpSelectionStore {
    client: Client,
    activity_url: String,
    admin_secret: String,
}

impl HttpSelectionStore {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &ClientConfig) -> Self {
        Self {
            client,
            activity_url: config.activity_url(),
            admin_secret: config.admin_secret.clone(),
        }
    }
}

impl SelectionStore for HttpSelectionStore {
    async fn append(&self, draft: &SelectionDraft) -> Result<SelectionRecord, PersistenceError> {
        let resp = self
            .client
            .post(&self.activity_url)
            .json(draft)
            .send()
            .await
            .map_err(|e| PersistenceError::Unreachable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PersistenceError::Status(status.as_u16()));
        }

        // Any 2xx counts as stored. A body we can't read still means the
        // backend accepted the write, so keep a local copy of what was sent.
        match resp.json::<SelectionRecord>().await {
            Ok(record) => Ok(record),
            Err(e) => {
                warn!("Selection stored but response unreadable: {}", e);
                Ok(draft.clone().into_record(Uuid::new_v4(), Utc::now()))
            }
        }
    }

    async fn list(&self) -> Result<Vec<SelectionRecord>, FetchError> {
        let mut req = self.client.get(&self.activity_url);
        if !self.admin_secret.is_empty() {
            req = req.header(ADMIN_KEY_HEADER, &self.admin_secret);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| FetchError::Unreachable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        resp.json::<Vec<SelectionRecord>>()
            .await
            .map_err(|e| FetchError::InvalidBody(e.to_string()))
    }
}
