//! Test fixtures shared by the integration suites.
#![allow(dead_code)]

use rollkit::api::Extension;
use rollkit::config::ExtensionConfig;
use rollkit::host::memory::MemoryHost;
use rollkit::host::ChatEvent;
use rollkit::state::{MemoryState, StateRegistry, StateStore};

pub const NS: &str = "API_NAME";

/// State where every built-in setting already holds its default.
pub fn settled_state() -> MemoryState {
    MemoryState::new()
        .with_value(NS, "valueName", "val1")
        .with_value(NS, "announceChanges", "true")
        .with_value(NS, "statusMarker", "red")
        .with_value(NS, "schemaVersion", "1")
}

pub fn extension_with(registry: StateRegistry, seed: MemoryState, host: MemoryHost) -> Extension<MemoryHost> {
    let cfg = ExtensionConfig::default();
    let store = StateStore::new(&cfg.state_namespace, Box::new(seed));
    Extension::new(&cfg, registry, store, host).with_version("9.9.9")
}

pub fn extension(seed: MemoryState) -> Extension<MemoryHost> {
    extension_with(
        StateRegistry::builtin().expect("builtin registry"),
        seed,
        MemoryHost::new().with_player("p1", "Alice", true, true),
    )
}

pub fn from_alice(content: &str) -> ChatEvent {
    ChatEvent::api(content, "Alice (GM)", "p1")
}

/// Messages whispered to `target`.
pub fn whispers_to<'a>(ext: &'a Extension<MemoryHost>, target: &str) -> Vec<&'a (String, String)> {
    let prefix = format!("/w {} ", target);
    ext.host()
        .outbox()
        .iter()
        .filter(|(_, body)| body.starts_with(&prefix))
        .collect()
}
