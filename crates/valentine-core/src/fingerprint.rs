use uuid::Uuid;

use crate::capability::{KeyValueStore, LocationReader};

pub const CLIENT_ID_STORAGE_KEY: &str = "valentine-client-id";

/// Opaque per-browser id, generated on first use and reused afterwards.
/// An analytics hint only.
pub fn client_fingerprint(storage: &dyn KeyValueStore) -> String {
    if let Some(existing) = storage.get(CLIENT_ID_STORAGE_KEY).filter(|id| !id.is_empty()) {
        return existing;
    }

    let generated = Uuid::new_v4().to_string();
    storage.set(CLIENT_ID_STORAGE_KEY, &generated);
    generated
}

/// `<fingerprint>@<hostname>`, sent along with each selection.
pub fn client_hint(fingerprint: &str, location: &dyn LocationReader) -> String {
    let host = location.hostname();
    let host = if host.is_empty() { "unknown-host" } else { host.as_str() };
    format!("{}@{}", fingerprint, host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{MemoryStore, StaticLocation};

    #[test]
    fn fingerprint_is_stable_per_store() {
        let storage = MemoryStore::new();
        let first = client_fingerprint(&storage);
        assert!(Uuid::parse_str(&first).is_ok());
        assert_eq!(client_fingerprint(&storage), first);
        assert_ne!(client_fingerprint(&MemoryStore::new()), first);
    }

    #[test]
    fn hint_combines_fingerprint_and_host() {
        let loc = StaticLocation::parse("https://love.example/?name=A").unwrap();
        assert_eq!(client_hint("abc", &loc), "abc@love.example");

        let loc = StaticLocation::parse("data:text/plain,hi").unwrap();
        assert_eq!(client_hint("abc", &loc), "abc@unknown-host");
    }
}
