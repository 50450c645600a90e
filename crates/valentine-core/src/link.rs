//! Invite link parameters.
//!
//! A recipient link carries the recipient's name in clear and the host's email
//! base64-encoded under `notify`. The encoding only keeps the address out of
//! plain sight in the URL; it protects nothing.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use tracing::warn;
use url::form_urlencoded;

use crate::error::DecodeError;

pub const NAME_PARAM: &str = "name";
pub const RECIPIENT_PARAM: &str = "recipient";
pub const NOTIFY_PARAM: &str = "notify";
pub const HOST_EMAIL_PARAM: &str = "hostEmail";
pub const ADMIN_PARAM: &str = "admin";
pub const DASHBOARD_PARAM: &str = "dashboard";

/// Decoded query string. Repeated keys keep their first value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            pairs: form_urlencoded::parse(query.as_bytes()).into_owned().collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value of the first key in `keys` that is present with a non-empty value.
    pub fn first_present(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .filter_map(|k| self.get(k))
            .find(|v| !v.is_empty())
    }
}

/// What a recipient link decodes to. Either half may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedInvite {
    pub recipient_name: Option<String>,
    pub host_email: Option<String>,
}

/// A personalised invitation, as generated on the host form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteLink {
    pub recipient_name: String,
    pub host_email_encoded: String,
    pub admin_secret: Option<String>,
}

impl InviteLink {
    pub fn new(recipient_name: &str, host_email: &str) -> Self {
        Self {
            recipient_name: recipient_name.trim().to_string(),
            host_email_encoded: encode_email(host_email),
            admin_secret: None,
        }
    }

    pub fn with_admin(mut self, secret: impl Into<String>) -> Self {
        self.admin_secret = Some(secret.into());
        self
    }

    pub fn to_query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair(NAME_PARAM, &self.recipient_name);
        if !self.host_email_encoded.is_empty() {
            query.append_pair(NOTIFY_PARAM, &self.host_email_encoded);
        }
        if let Some(secret) = &self.admin_secret {
            query.append_pair(ADMIN_PARAM, secret);
        }
        query.finish()
    }

    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}?{}", base_url, self.to_query())
    }
}

/// Query string for a recipient link: `name=<trimmed name>&notify=<encoded email>`.
/// An empty email leaves `notify` out.
pub fn encode(name: &str, host_email: &str) -> String {
    InviteLink::new(name, host_email).to_query()
}

/// Pull the recipient name and host email out of a link's query parameters.
/// Malformed values come back as `None`.
pub fn decode(params: &QueryParams) -> DecodedInvite {
    let recipient_name = params
        .first_present(&[NAME_PARAM, RECIPIENT_PARAM])
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned);

    let host_email = params
        .first_present(&[NOTIFY_PARAM, HOST_EMAIL_PARAM])
        .and_then(|raw| match decode_email(raw) {
            Ok(email) => Some(email),
            Err(e) => {
                warn!("Failed to decode host email from link: {}", e);
                None
            }
        })
        .filter(|email| !email.is_empty());

    DecodedInvite {
        recipient_name,
        host_email,
    }
}

/// Host-only link that opens the activity log straight away.
pub fn dashboard_url(base_url: &str, admin_secret: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair(DASHBOARD_PARAM, "1")
        .append_pair(ADMIN_PARAM, admin_secret)
        .finish();
    format!("{}?{}", base_url, query)
}

fn encode_email(email: &str) -> String {
    if email.is_empty() {
        return String::new();
    }
    URL_SAFE_NO_PAD.encode(email.as_bytes())
}

/// Accepts URL-safe and standard alphabets, with or without padding. Links
/// shared with the standard alphabet often arrive with `+` turned into a space.
fn decode_email(raw: &str) -> Result<String, DecodeError> {
    let restored = raw.replace(' ', "+");
    let unpadded = restored.trim_end_matches('=');

    let bytes = if unpadded.contains(['+', '/']) {
        STANDARD_NO_PAD.decode(unpadded)?
    } else {
        URL_SAFE_NO_PAD.decode(unpadded)?
    };

    Ok(String::from_utf8(bytes)?)
}
