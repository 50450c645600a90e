use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use url::Url;

use crate::error::ClipboardError;

/// Per-browser persistent key/value storage (local storage on the web).
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

pub trait ClipboardWriter: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Read-only view of the page location.
pub trait LocationReader: Send + Sync {
    /// Query string, with or without the leading `?`.
    fn search(&self) -> String;
    /// Scheme, host and port, e.g. `https://love.example`.
    fn origin(&self) -> String;
    fn pathname(&self) -> String;
    fn hostname(&self) -> String;

    /// Page URL without query or fragment; invite links are built on top of it.
    fn base_url(&self) -> String {
        format!("{}{}", self.origin(), self.pathname())
    }
}

// ── In-memory implementations ───────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(entries: &[(&str, &str)]) -> Self {
        let store = Self::new();
        for (k, v) in entries {
            store.set(k, v);
        }
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }
}

/// Clipboard that remembers the last text written, or refuses every write.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
    denied: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose permission was refused.
    pub fn denied() -> Self {
        Self {
            contents: Mutex::new(None),
            denied: true,
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl ClipboardWriter for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.denied {
            return Err(ClipboardError("permission denied".into()));
        }
        *self.contents.lock().unwrap_or_else(PoisonError::into_inner) = Some(text.to_string());
        Ok(())
    }
}

/// Location backed by a fixed URL.
#[derive(Debug, Clone)]
pub struct StaticLocation {
    url: Url,
}

impl StaticLocation {
    pub fn parse(raw: &str) -> Result<Self, url::ParseError> {
        Ok(Self { url: Url::parse(raw)? })
    }
}

impl LocationReader for StaticLocation {
    fn search(&self) -> String {
        self.url.query().unwrap_or_default().to_string()
    }

    fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    fn pathname(&self) -> String {
        self.url.path().to_string()
    }

    fn hostname(&self) -> String {
        self.url.host_str().unwrap_or_default().to_string()
    }
}
