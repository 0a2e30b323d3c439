//! Validated access to persisted settings.
//!
//! The host keeps one container for every extension, keyed first by the
//! extension's namespace. [StateStore] reads straight through (no validation,
//! so the corrector can see bad values) and validates every write against the
//! setting's [ValueCheck](super::registry::ValueCheck).
use anyhow::Result;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{SettingName, StateError};
use crate::logutil::escape_value;

/// Host-owned persisted key/value container.
pub trait StateContainer {
    fn load(&self, namespace: &str, key: &str) -> Option<String>;
    fn store(&mut self, namespace: &str, key: &str, value: &str) -> Result<()>;
}

/// In-memory container.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryState {
    namespaces: BTreeMap<String, BTreeMap<String, String>>,
}

impl MemoryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing validation.
    pub fn with_value(mut self, namespace: &str, key: &str, value: &str) -> Self {
        self.put(namespace, key, value);
        self
    }

    pub fn put(&mut self, namespace: &str, key: &str, value: &str) {
        self.namespaces
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, namespace: &str, key: &str) -> Option<&str> {
        self.namespaces
            .get(namespace)
            .and_then(|ns| ns.get(key))
            .map(String::as_str)
    }
}

impl StateContainer for MemoryState {
    fn load(&self, namespace: &str, key: &str) -> Option<String> {
        self.get(namespace, key).map(str::to_string)
    }

    fn store(&mut self, namespace: &str, key: &str, value: &str) -> Result<()> {
        self.put(namespace, key, value);
        Ok(())
    }
}

pub struct StateStore {
    namespace: String,
    container: Box<dyn StateContainer>,
}

impl StateStore {
    pub fn new(namespace: &str, container: Box<dyn StateContainer>) -> Self {
        Self {
            namespace: namespace.to_string(),
            container,
        }
    }

    pub fn in_memory(namespace: &str) -> Self {
        Self::new(namespace, Box::new(MemoryState::new()))
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Raw persisted value, valid or not.
    pub fn get(&self, name: SettingName) -> Option<String> {
        self.container.load(&self.namespace, name.as_str())
    }

    /// Store `value` if the setting's value check accepts it; otherwise leave
    /// the persisted value untouched.
    pub fn set(&mut self, name: SettingName, value: &str) -> Result<(), StateError> {
        if !name.check().accepts(value) {
            return Err(StateError::InvalidValue {
                name: name.to_string(),
                value: value.to_string(),
            });
        }
        debug!("state {}.{} = {}", self.namespace, name, escape_value(value));
        self.container
            .store(&self.namespace, name.as_str(), value)
            .map_err(|e| StateError::Persist(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_write_keeps_old_value() {
        let mut store = StateStore::in_memory("Kit");
        store.set(SettingName::ValueName, "val1").unwrap();
        let err = store.set(SettingName::ValueName, "val9").unwrap_err();
        assert_eq!(
            err,
            StateError::InvalidValue {
                name: "valueName".into(),
                value: "val9".into()
            }
        );
        assert_eq!(store.get(SettingName::ValueName).as_deref(), Some("val1"));
    }

    #[test]
    fn reads_are_not_validated() {
        let seeded = MemoryState::new().with_value("Kit", "valueName", "garbage");
        let store = StateStore::new("Kit", Box::new(seeded));
        assert_eq!(store.get(SettingName::ValueName).as_deref(), Some("garbage"));
    }

    #[test]
    fn namespaces_do_not_leak() {
        let seeded = MemoryState::new().with_value("Other", "valueName", "val2");
        let store = StateStore::new("Kit", Box::new(seeded));
        assert!(store.get(SettingName::ValueName).is_none());
    }
}
