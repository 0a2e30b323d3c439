//! # Settings State
//!
//! Persisted extension settings and the machinery that keeps them valid.
//!
//! ## Components
//!
//! - [`registry`] - the fixed table of [`registry::SettingSpec`] records
//! - [`store`] - validated get/set over the host's persisted container
//! - [`file`] - JSON file backed container used outside the host
//! - [`corrector`] - startup repair of missing or out-of-range values
//!
//! ## Data Flow
//!
//! ```text
//! ┌─────────────────┐
//! │ StateRegistry   │ ← what may be stored, defaults, flags
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │ StateStore      │ ← per-name validation on write, raw reads
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │ StateContainer  │ ← namespace → key → value, owned by the host
//! └─────────────────┘
//! ```
use thiserror::Error;

pub mod corrector;
pub mod file;
pub mod registry;
pub mod store;

pub use registry::{SettingName, SettingSpec, StateRegistry};
pub use store::{MemoryState, StateContainer, StateStore};

/// Errors raised by the settings store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("Tried to set state \"{name}\" with unacceptable value \"{value}\".")]
    InvalidValue { name: String, value: String },

    #[error("Setting \"{0}\" is not recognized.")]
    UnknownSetting(String),

    #[error("Failed to persist state: {0}")]
    Persist(String),
}

/// Authoring mistakes in the setting table, caught before the extension starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("setting {0} is declared more than once")]
    Duplicate(SettingName),

    #[error("setting {0} declares an empty acceptable set")]
    EmptyAcceptables(SettingName),

    #[error("default \"{default}\" of setting {name} is not one of its acceptable values")]
    DefaultNotAcceptable { name: SettingName, default: String },

    #[error("default \"{default}\" of setting {name} fails its value check")]
    DefaultRejected { name: SettingName, default: String },
}
