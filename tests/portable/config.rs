use wclink::config::{lookup, lookup_or, ConfigEntry, ConfigStore, ConfigValue, MemoryConfigStore};
use wclink::LinkError;

fn store() -> MemoryConfigStore {
    let mut store = MemoryConfigStore::new();
    store
        .insert("HTTP_PORT", ConfigValue::Dword(8443))
        .insert("PRODUCT_ROOT_D", ConfigValue::String("C:\\Program Files\\App".to_string()))
        .insert("BLOB", ConfigValue::Other);
    store
}

struct BrokenStore;

impl ConfigStore for BrokenStore {
    fn entries(&self) -> Result<Vec<ConfigEntry>, LinkError> {
        Err(LinkError::Lookup {
            path: "Software\\App".to_string(),
            code: 2,
        })
    }
}

#[test]
fn dword_and_string_values_render_as_text() {
    let store = store();
    assert_eq!(lookup(&store, "HTTP_PORT").unwrap().as_deref(), Some("8443"));
    assert_eq!(
        lookup(&store, "PRODUCT_ROOT_D").unwrap().as_deref(),
        Some("C:\\Program Files\\App")
    );
}

#[test]
fn other_types_and_unknown_names_fall_back_to_default() {
    let store = store();
    assert_eq!(lookup(&store, "BLOB").unwrap(), None);
    assert_eq!(lookup_or(&store, "BLOB", "none").unwrap(), "none");
    assert_eq!(lookup_or(&store, "MISSING", "fallback").unwrap(), "fallback");
}

#[test]
fn names_compare_exactly() {
    assert_eq!(lookup(&store(), "http_port").unwrap(), None);
}

/// Yields what it read before enumeration stopped.
struct TruncatedStore;

impl ConfigStore for TruncatedStore {
    fn entries(&self) -> Result<Vec<ConfigEntry>, LinkError> {
        Ok(vec![ConfigEntry {
            name: "HTTP_PORT".to_string(),
            value: ConfigValue::Dword(8880),
        }])
    }
}

#[test]
fn unreadable_store_is_an_error_not_a_default() {
    let expected = LinkError::Lookup {
        path: "Software\\App".to_string(),
        code: 2,
    };
    assert_eq!(lookup(&BrokenStore, "HTTP_PORT").unwrap_err(), expected);
    assert_eq!(lookup_or(&BrokenStore, "HTTP_PORT", "dflt").unwrap_err(), expected);
}

#[test]
fn values_past_a_stopped_enumeration_default() {
    assert_eq!(lookup_or(&TruncatedStore, "HTTP_PORT", "80").unwrap(), "8880");
    assert_eq!(lookup_or(&TruncatedStore, "HTTPS_PORT", "443").unwrap(), "443");
}
