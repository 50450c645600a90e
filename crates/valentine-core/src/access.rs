use tracing::info;

use crate::capability::{KeyValueStore, LocationReader};
use crate::config::ClientConfig;
use crate::fingerprint::{client_fingerprint, client_hint};
use crate::flow::InviteContext;
use crate::link::{self, ADMIN_PARAM, DASHBOARD_PARAM, DecodedInvite, QueryParams};

/// Local storage key remembering a previously presented admin secret.
pub const ADMIN_STORAGE_KEY: &str = "valentine-admin-key";

/// Top-level page picked once at load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// The invitation itself. `is_host_view` also shows the activity log overlay
    /// so a host previewing their own link sees incoming picks.
    Recipient {
        recipient_name: String,
        host_email: Option<String>,
        is_host_view: bool,
    },
    /// Link generation form.
    HostSetup,
    /// Activity log only (`?dashboard=1`).
    Dashboard,
    AccessDenied,
}

/// Everything decided once from the page location at load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLoad {
    pub view: View,
    pub has_admin_access: bool,
    /// Set for recipient views; seeds the proposal flow.
    pub invite: Option<InviteContext>,
}

/// Shared-secret gate for host tools. App-level gating, not authentication.
#[derive(Debug, Clone)]
pub struct AccessResolver {
    admin_secret: String,
}

impl AccessResolver {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            admin_secret: config.admin_secret.clone(),
        }
    }

    /// Whether this request may use host tools. A matching `admin` parameter
    /// is remembered in `storage` for later visits without it.
    pub fn has_admin_access(&self, params: &QueryParams, storage: &dyn KeyValueStore) -> bool {
        if self.admin_secret.is_empty() {
            return true;
        }

        if params.get(ADMIN_PARAM) == Some(self.admin_secret.as_str()) {
            storage.set(ADMIN_STORAGE_KEY, &self.admin_secret);
            info!("Admin secret accepted from link and remembered");
            return true;
        }

        storage.get(ADMIN_STORAGE_KEY).as_deref() == Some(self.admin_secret.as_str())
    }

    pub fn resolve(&self, params: &QueryParams, storage: &dyn KeyValueStore) -> View {
        let admin = self.has_admin_access(params, storage);
        view_for(link::decode(params), admin, params)
    }

    /// Read the query string off `location` and pick the view. Recipient
    /// views also get the invite context, tagged with this browser's hint.
    pub fn load(&self, location: &dyn LocationReader, storage: &dyn KeyValueStore) -> PageLoad {
        let params = QueryParams::parse(&location.search());
        let has_admin_access = self.has_admin_access(&params, storage);
        let view = view_for(link::decode(&params), has_admin_access, &params);

        let invite = match &view {
            View::Recipient {
                recipient_name,
                host_email,
                ..
            } => Some(InviteContext {
                recipient_name: Some(recipient_name.clone()),
                host_email: host_email.clone(),
                client_hint: client_hint(&client_fingerprint(storage), location),
            }),
            _ => None,
        };

        PageLoad {
            view,
            has_admin_access,
            invite,
        }
    }
}

fn view_for(invite: DecodedInvite, admin: bool, params: &QueryParams) -> View {
    if let Some(recipient_name) = invite.recipient_name {
        return View::Recipient {
            recipient_name,
            host_email: invite.host_email,
            is_host_view: admin,
        };
    }

    match (admin, params.get(DASHBOARD_PARAM) == Some("1")) {
        (true, true) => View::Dashboard,
        (true, false) => View::HostSetup,
        (false, _) => View::AccessDenied,
    }
}
