use std::path::PathBuf;

use axum::{
    Router,
    http::{HeaderValue, Method},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use valentine_api::state::AppState;

/// Server settings, read from `VALENTINE_*` variables.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub admin_key: String,
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = get("VALENTINE_PORT").unwrap_or_else(|| "8000".into()).parse()?;
        let cors_origins = get("VALENTINE_CORS_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        Ok(Self {
            host: get("VALENTINE_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            db_path: get("VALENTINE_DB_PATH")
                .unwrap_or_else(|| "valentine.db".into())
                .into(),
            admin_key: get("VALENTINE_ADMIN_KEY").unwrap_or_default().trim().to_string(),
            cors_origins,
        })
    }
}

/// `*` (or nothing) allows any origin; otherwise only the listed ones.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", o);
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(allowed))
}

pub fn app(state: AppState, cors_origins: &[String]) -> Router {
    valentine_api::router(state)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(pairs: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        ServerConfig::from_lookup(|key| map.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.db_path, PathBuf::from("valentine.db"));
        assert!(cfg.admin_key.is_empty());
        assert_eq!(cfg.cors_origins, vec!["*"]);
    }

    #[test]
    fn origins_are_split_and_trimmed() {
        let cfg = config(&[
            ("VALENTINE_CORS_ORIGINS", "https://a.example, https://b.example,"),
            ("VALENTINE_ADMIN_KEY", " k "),
        ])
        .unwrap();
        assert_eq!(cfg.cors_origins, vec!["https://a.example", "https://b.example"]);
        assert_eq!(cfg.admin_key, "k");
    }

    #[test]
    fn bad_port_is_an_error() {
        assert!(config(&[("VALENTINE_PORT", "eight")]).is_err());
    }
}
