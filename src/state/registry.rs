//! The setting table.
//!
//! Every setting the extension manages is a [SettingName] variant with exactly
//! one [SettingSpec] in [SETTINGS]. Writes are checked against the name's
//! [ValueCheck]; the corrector and menu work from each setting's acceptable set.
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use super::{RegistryError, StateError};

/// Acceptable values when a spec does not list its own.
pub const DEFAULT_ACCEPTABLES: &[&str] = &["true", "false"];
/// Default when a spec does not name one.
pub const DEFAULT_VALUE: &str = "true";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SettingName {
    ValueName,
    AnnounceChanges,
    StatusMarker,
    SchemaVersion,
}

impl SettingName {
    pub const ALL: [SettingName; 4] = [
        SettingName::ValueName,
        SettingName::AnnounceChanges,
        SettingName::StatusMarker,
        SettingName::SchemaVersion,
    ];

    /// Key under which the value is persisted.
    pub fn as_str(self) -> &'static str {
        match self {
            SettingName::ValueName => "valueName",
            SettingName::AnnounceChanges => "announceChanges",
            SettingName::StatusMarker => "statusMarker",
            SettingName::SchemaVersion => "schemaVersion",
        }
    }

    /// Predicate a value must satisfy before it is stored under this name.
    pub fn check(self) -> ValueCheck {
        match self {
            SettingName::ValueName => ValueCheck::OneOf(&["val1", "val2"]),
            SettingName::AnnounceChanges => ValueCheck::Boolean,
            SettingName::StatusMarker => ValueCheck::MarkerName,
            SettingName::SchemaVersion => ValueCheck::OneOf(&["1"]),
        }
    }
}

impl fmt::Display for SettingName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SettingName {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingName::ALL
            .into_iter()
            .find(|n| n.as_str() == s)
            .ok_or_else(|| StateError::UnknownSetting(s.to_string()))
    }
}

/// Closed family of value predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueCheck {
    OneOf(&'static [&'static str]),
    Boolean,
    /// Token marker names: built-in colours or custom marker tags.
    MarkerName,
}

impl ValueCheck {
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            ValueCheck::OneOf(values) => values.contains(&value),
            ValueCheck::Boolean => DEFAULT_ACCEPTABLES.contains(&value),
            ValueCheck::MarkerName => {
                !value.is_empty()
                    && value
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            }
        }
    }
}

/// Declarative description of one setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingSpec {
    pub name: SettingName,
    pub acceptables: Option<&'static [&'static str]>,
    pub default: Option<&'static str>,
    /// Leave out-of-set values alone at startup (free-form settings).
    pub ignore: bool,
    /// Keep the setting out of the config menu.
    pub hide: bool,
    /// Hand-written prompt options replacing the generated list.
    pub custom_config: Option<&'static str>,
}

impl SettingSpec {
    pub const fn new(name: SettingName) -> Self {
        Self {
            name,
            acceptables: None,
            default: None,
            ignore: false,
            hide: false,
            custom_config: None,
        }
    }

    pub const fn acceptables(self, values: &'static [&'static str]) -> Self {
        Self { acceptables: Some(values), ..self }
    }

    pub const fn default_value(self, value: &'static str) -> Self {
        Self { default: Some(value), ..self }
    }

    pub const fn ignore(self) -> Self {
        Self { ignore: true, ..self }
    }

    pub const fn hide(self) -> Self {
        Self { hide: true, ..self }
    }

    pub const fn custom_config(self, options: &'static str) -> Self {
        Self { custom_config: Some(options), ..self }
    }

    pub fn acceptable_values(&self) -> &'static [&'static str] {
        self.acceptables.unwrap_or(DEFAULT_ACCEPTABLES)
    }

    pub fn default_or_true(&self) -> &'static str {
        self.default.unwrap_or(DEFAULT_VALUE)
    }

    pub fn is_acceptable(&self, value: &str) -> bool {
        self.acceptable_values().contains(&value)
    }
}

/// Settings shipped with the extension.
pub static SETTINGS: &[SettingSpec] = &[
    SettingSpec::new(SettingName::ValueName)
        .acceptables(&["val1", "val2"])
        .default_value("val1"),
    SettingSpec::new(SettingName::AnnounceChanges),
    SettingSpec::new(SettingName::StatusMarker)
        .acceptables(&["red", "blue", "green", "purple"])
        .default_value("red")
        .ignore()
        .custom_config("|red|blue|green|purple|dead|skull"),
    SettingSpec::new(SettingName::SchemaVersion)
        .acceptables(&["1"])
        .default_value("1")
        .hide(),
];

/// Validated, immutable view over a setting table.
#[derive(Debug, Clone)]
pub struct StateRegistry {
    specs: Vec<SettingSpec>,
}

impl StateRegistry {
    pub fn new(specs: &[SettingSpec]) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for spec in specs {
            if !seen.insert(spec.name) {
                return Err(RegistryError::Duplicate(spec.name));
            }
            if spec.acceptables.is_some_and(|a| a.is_empty()) {
                return Err(RegistryError::EmptyAcceptables(spec.name));
            }
            let default = spec.default_or_true();
            if !spec.is_acceptable(default) {
                return Err(RegistryError::DefaultNotAcceptable {
                    name: spec.name,
                    default: default.to_string(),
                });
            }
            if !spec.name.check().accepts(default) {
                return Err(RegistryError::DefaultRejected {
                    name: spec.name,
                    default: default.to_string(),
                });
            }
        }
        Ok(Self {
            specs: specs.to_vec(),
        })
    }

    /// Registry over [SETTINGS].
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::new(SETTINGS)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SettingSpec> {
        self.specs.iter()
    }

    pub fn get(&self, name: SettingName) -> Option<&SettingSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
