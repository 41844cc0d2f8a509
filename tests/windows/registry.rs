use wclink::config::{lookup, lookup_or};
use wclink::windows_native::RegistryConfigStore;
use wclink::LinkError;

const CURRENT_VERSION: &str = "SOFTWARE\\Microsoft\\Windows NT\\CurrentVersion";

#[test]
fn string_value_is_found() {
    let store = RegistryConfigStore::new(CURRENT_VERSION);
    let build = lookup(&store, "CurrentBuild").unwrap().expect("CurrentBuild");
    assert!(build.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn unknown_value_falls_back_to_default() {
    let store = RegistryConfigStore::new(CURRENT_VERSION);
    assert_eq!(
        lookup_or(&store, "wclink-no-such-value", "fallback").unwrap(),
        "fallback"
    );
}

#[test]
fn missing_key_is_a_lookup_error() {
    let store = RegistryConfigStore::new("SOFTWARE\\wclink-no-such-key");
    assert!(matches!(
        lookup(&store, "anything"),
        Err(LinkError::Lookup { code: 2, .. })
    ));
}
