/// Default selection API base, matching the backend's default bind.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";

/// Deploy-time settings for the invitation page. Built once at startup and
/// handed to the resolver and the store client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
    /// Shared admin secret. Empty means host tools are open to everyone.
    pub admin_secret: String,
}

impl ClientConfig {
    pub fn new(api_base: impl Into<String>, admin_secret: impl Into<String>) -> Self {
        let api_base: String = api_base.into();
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            admin_secret: admin_secret.into(),
        }
    }

    /// Reads `VALENTINE_API_BASE_URL` and `VALENTINE_ADMIN_KEY`.
    pub fn from_env() -> Self {
        let api_base = std::env::var("VALENTINE_API_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.into());
        let admin_secret = std::env::var("VALENTINE_ADMIN_KEY").unwrap_or_default();
        Self::new(api_base, admin_secret)
    }

    pub fn admin_gating_enabled(&self) -> bool {
        !self.admin_secret.is_empty()
    }

    pub fn activity_url(&self) -> String {
        format!("{}/activity", self.api_base)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE, "")
    }
}
