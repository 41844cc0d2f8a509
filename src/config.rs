//! Lookup of single named values from an external configuration store.

use std::collections::BTreeMap;

use crate::error::LinkError;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigValue {
    Dword(u32),
    String(String),
    /// Any other stored type; never matched by a lookup.
    Other,
}

impl ConfigValue {
    fn render(&self) -> Option<String> {
        match self {
            ConfigValue::Dword(value) => Some(value.to_string()),
            ConfigValue::String(value) => Some(value.clone()),
            ConfigValue::Other => None,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigEntry {
    pub name: String,
    pub value: ConfigValue,
}

/// A store whose values can be enumerated as name/value pairs.
pub trait ConfigStore {
    fn entries(&self) -> Result<Vec<ConfigEntry>, LinkError>;
}

/// First DWORD or string entry named `key`, rendered as text.
///
/// Names compare exactly. Entries of other types are skipped even when
/// their name matches.
pub fn lookup<S: ConfigStore + ?Sized>(store: &S, key: &str) -> Result<Option<String>, LinkError> {
    let entries = store.entries()?;
    Ok(entries
        .iter()
        .filter(|entry| entry.name == key)
        .find_map(|entry| entry.value.render()))
}

/// Like [`lookup`], with `default` standing in for a missing value.
///
/// A store that cannot be read at all is still an error.
pub fn lookup_or<S: ConfigStore + ?Sized>(
    store: &S,
    key: &str,
    default: &str,
) -> Result<String, LinkError> {
    Ok(lookup(store, key)?.unwrap_or_else(|| default.to_string()))
}

/// In-process store, ordered by name.
#[derive(Clone, Debug, Default)]
pub struct MemoryConfigStore {
    values: BTreeMap<String, ConfigValue>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ConfigValue) -> &mut Self {
        self.values.insert(name.into(), value);
        self
    }
}

impl ConfigStore for MemoryConfigStore {
    fn entries(&self) -> Result<Vec<ConfigEntry>, LinkError> {
        Ok(self
            .values
            .iter()
            .map(|(name, value)| ConfigEntry {
                name: name.clone(),
                value: value.clone(),
            })
            .collect())
    }
}
