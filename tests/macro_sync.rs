mod common;

use common::{extension_with, settled_state};
use rollkit::host::macros::{MacroDefinition, VISIBLE_TO_ALL};
use rollkit::host::memory::MemoryHost;
use rollkit::host::ObjectStore;
use rollkit::state::StateRegistry;

fn declared() -> Vec<MacroDefinition> {
    vec![
        MacroDefinition::new("ApiConfig", "!apiCall --config"),
        MacroDefinition::new("ApiHelp", "!apiCall --help"),
    ]
}

#[test]
fn missing_macros_are_created_for_online_gm() {
    let host = MemoryHost::new()
        .with_player("p0", "Player", true, false)
        .with_player("g1", "Dana Smith", true, true);
    let mut ext = extension_with(StateRegistry::builtin().unwrap(), settled_state(), host)
        .with_macros(declared());
    let report = ext.startup();

    assert_eq!(report.macros.created, 2);
    assert!(report.corrections.is_empty());
    let m = ext.host().find_macro("ApiConfig").unwrap();
    assert_eq!(m.owner_id, "g1");
    assert_eq!(m.visible_to, VISIBLE_TO_ALL);
    assert!(ext.host().outbox()[0]
        .1
        .contains("**Macro 'ApiConfig' was created and assigned to Dana.**"));
}

#[test]
fn drifted_macro_is_corrected() {
    let mut host = MemoryHost::new();
    host.create_macro("g1", "ApiConfig", "!apiCall config", "g1");
    let mut ext = extension_with(StateRegistry::builtin().unwrap(), settled_state(), host)
        .with_macros(vec![declared().remove(0)]);
    let report = ext.sync_macros();

    assert_eq!(report.made_visible, 1);
    assert_eq!(report.corrected, 1);
    let m = ext.host().find_macro("ApiConfig").unwrap();
    assert_eq!(m.action, "!apiCall --config");
    assert_eq!(m.visible_to, VISIBLE_TO_ALL);
    let outbox = ext.host().outbox();
    assert_eq!(outbox.len(), 2);
    assert!(outbox[0].1.contains("was made visible to all"));
    assert!(outbox[1].1.contains("was corrected"));
}

#[test]
fn no_gm_online_is_silent_until_one_arrives() {
    let host = MemoryHost::new().with_player("g1", "Dana", false, true);
    let mut ext = extension_with(StateRegistry::builtin().unwrap(), settled_state(), host)
        .with_macros(declared());
    let report = ext.sync_macros();
    assert_eq!(report.skipped, 2);
    assert!(ext.host().outbox().is_empty());
    assert!(ext.host().find_macro("ApiConfig").is_none());

    ext.host_mut().players[0].online = true;
    let report = ext.sync_macros();
    assert_eq!(report.created, 2);
}
