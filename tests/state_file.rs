use rollkit::api::Extension;
use rollkit::config::ExtensionConfig;
use rollkit::host::memory::MemoryHost;
use rollkit::host::ChatEvent;
use rollkit::state::file::JsonStateFile;
use rollkit::state::{SettingName, StateError, StateRegistry, StateStore};
use std::path::Path;

fn open(path: &Path) -> Extension<MemoryHost> {
    let cfg = ExtensionConfig::default();
    let store = StateStore::new(
        &cfg.state_namespace,
        Box::new(JsonStateFile::open(path).expect("open state")),
    );
    Extension::new(&cfg, StateRegistry::builtin().unwrap(), store, MemoryHost::new())
}

#[test]
fn settings_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let mut first = open(&path);
    assert_eq!(first.startup().corrections.len(), 4);
    first.handle_event(&ChatEvent::api("!apiCall --config --valueName --val2", "Alice", "p1"));
    drop(first);

    let mut second = open(&path);
    assert!(second.startup().corrections.is_empty());
    assert_eq!(second.store().get(SettingName::ValueName).as_deref(), Some("val2"));
    assert!(second.host().outbox().is_empty());
}

#[test]
fn hand_edited_bad_value_is_repaired() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(
        &path,
        r#"{"API_NAME":{"valueName":"val3","announceChanges":"true","statusMarker":"red","schemaVersion":"1"}}"#,
    )
    .unwrap();

    let mut ext = open(&path);
    let corrections = ext.startup().corrections;
    assert_eq!(corrections.len(), 1);
    assert_eq!(corrections[0].old.as_deref(), Some("val3"));

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["API_NAME"]["valueName"], "val1");
}

#[test]
fn unwritable_state_file_leaves_value_alone() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("sub");
    let mut store = StateStore::new(
        "API_NAME",
        Box::new(JsonStateFile::open(sub.join("state.json")).unwrap()),
    );
    std::fs::write(&sub, "not a directory").unwrap();

    let err = store.set(SettingName::ValueName, "val2").unwrap_err();
    assert!(matches!(err, StateError::Persist(_)));
    assert!(store.get(SettingName::ValueName).is_none());
}
