use std::sync::Arc;

use tracing::warn;

use valentine_types::email::is_valid_email;

use crate::capability::{ClipboardWriter, KeyValueStore, LocationReader};
use crate::config::ClientConfig;
use crate::error::ValidationError;
use crate::link::{self, InviteLink};

/// Remembers the host's email between visits to the form.
pub const HOST_EMAIL_STORAGE_KEY: &str = "valentine-host-email";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyStatus {
    Idle,
    Copied,
    Failed,
}

/// State behind the "Who do you want to invite?" form.
pub struct HostSetup {
    base_url: String,
    dashboard_secret: Option<String>,
    storage: Arc<dyn KeyValueStore>,
    clipboard: Arc<dyn ClipboardWriter>,
    name_input: String,
    email_input: String,
    generated_link: Option<String>,
    copy_status: CopyStatus,
    error: Option<ValidationError>,
}

impl HostSetup {
    pub fn new(
        config: &ClientConfig,
        has_admin_access: bool,
        location: &dyn LocationReader,
        storage: Arc<dyn KeyValueStore>,
        clipboard: Arc<dyn ClipboardWriter>,
    ) -> Self {
        let email_input = storage.get(HOST_EMAIL_STORAGE_KEY).unwrap_or_default();
        let dashboard_secret = (config.admin_gating_enabled() && has_admin_access)
            .then(|| config.admin_secret.clone());

        Self {
            base_url: location.base_url(),
            dashboard_secret,
            storage,
            clipboard,
            name_input: String::new(),
            email_input,
            generated_link: None,
            copy_status: CopyStatus::Idle,
            error: None,
        }
    }

    pub fn set_name(&mut self, name: &str) {
        self.name_input = name.to_string();
    }

    pub fn set_email(&mut self, email: &str) {
        self.email_input = email.to_string();
    }

    pub fn email_input(&self) -> &str {
        &self.email_input
    }

    /// Validate the form and build the invite link. A failure clears any
    /// previously generated link.
    pub fn generate(&mut self) -> Result<&str, ValidationError> {
        let name = self.name_input.trim().to_string();
        let email = self.email_input.trim().to_string();

        let checked = if name.is_empty() {
            Err(ValidationError::MissingName)
        } else if !is_valid_email(&email) {
            Err(ValidationError::InvalidEmail)
        } else {
            Ok(())
        };

        if let Err(e) = checked {
            self.error = Some(e);
            self.generated_link = None;
            return Err(e);
        }

        self.storage.set(HOST_EMAIL_STORAGE_KEY, &email);
        self.error = None;
        self.copy_status = CopyStatus::Idle;
        let url = InviteLink::new(&name, &email).to_url(&self.base_url);
        Ok(self.generated_link.insert(url).as_str())
    }

    pub fn generated_link(&self) -> Option<&str> {
        self.generated_link.as_deref()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.map(|e| e.to_string())
    }

    /// Host-only dashboard link, offered when a secret is configured and
    /// the visitor presented it.
    pub fn dashboard_url(&self) -> Option<String> {
        self.dashboard_secret
            .as_deref()
            .map(|secret| link::dashboard_url(&self.base_url, secret))
    }

    pub fn copy_invite(&mut self) -> CopyStatus {
        match self.generated_link.clone() {
            Some(url) => self.copy(&url),
            None => self.copy_status,
        }
    }

    pub fn copy_dashboard(&mut self) -> CopyStatus {
        match self.dashboard_url() {
            Some(url) => self.copy(&url),
            None => self.copy_status,
        }
    }

    pub fn copy_status(&self) -> CopyStatus {
        self.copy_status
    }

    fn copy(&mut self, text: &str) -> CopyStatus {
        self.copy_status = match self.clipboard.write_text(text) {
            Ok(()) => CopyStatus::Copied,
            Err(e) => {
                warn!("Failed to copy link: {}", e);
                CopyStatus::Failed
            }
        };
        self.copy_status
    }
}
