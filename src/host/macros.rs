//! Declared macro reconciliation.
//!
//! Each [MacroDefinition] is matched by name against the host's macro objects.
//! Drifted visibility or action text is corrected in place; missing macros are
//! created under the first online GM. With no GM online nothing is created and
//! the next sync gets another chance.
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::Host;
use crate::format::{ChatStyle, Formatter};

/// Visibility every managed macro is kept at.
pub const VISIBLE_TO_ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroDefinition {
    pub name: String,
    pub action: String,
}

impl MacroDefinition {
    pub fn new(name: &str, action: &str) -> Self {
        Self {
            name: name.to_string(),
            action: action.to_string(),
        }
    }
}

/// What a sync pass changed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub created: usize,
    pub made_visible: usize,
    pub corrected: usize,
    pub skipped: usize,
}

impl SyncReport {
    pub fn is_clean(&self) -> bool {
        self.created == 0 && self.made_visible == 0 && self.corrected == 0
    }
}

pub fn sync_macros<H: Host>(
    host: &mut H,
    formatter: &Formatter,
    definitions: &[MacroDefinition],
) -> SyncReport {
    let mut report = SyncReport::default();
    let gm = host
        .online_players()
        .into_iter()
        .find(|p| host.is_gm(&p.id));

    for def in definitions {
        if let Some(existing) = host.find_macro(&def.name) {
            if existing.visible_to != VISIBLE_TO_ALL {
                host.set_macro_visibility(&existing.id, VISIBLE_TO_ALL);
                report.made_visible += 1;
                formatter.to_chat(
                    host,
                    &format!("**Macro '{}' was made visible to all.**", def.name),
                    ChatStyle::Success,
                    None,
                );
            }
            if existing.action != def.action {
                host.set_macro_action(&existing.id, &def.action);
                report.corrected += 1;
                formatter.to_chat(
                    host,
                    &format!("**Macro '{}' was corrected.**", def.name),
                    ChatStyle::Success,
                    None,
                );
            }
            continue;
        }

        match &gm {
            Some(owner) => {
                host.create_macro(&owner.id, &def.name, &def.action, VISIBLE_TO_ALL);
                report.created += 1;
                let owner_name = owner.display_name.split_whitespace().next().unwrap_or_default();
                info!("Created macro '{}' for {}", def.name, owner.id);
                formatter.to_chat(
                    host,
                    &format!(
                        "**Macro '{}' was created and assigned to {}.**",
                        def.name, owner_name
                    ),
                    ChatStyle::Success,
                    None,
                );
            }
            None => {
                debug!("No GM online; macro '{}' not created", def.name);
                report.skipped += 1;
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemoryHost;
    use crate::host::ObjectStore;

    fn defs() -> Vec<MacroDefinition> {
        vec![MacroDefinition::new("KitMenu", "!kit --config")]
    }

    #[test]
    fn second_pass_is_clean() {
        let f = Formatter::new("Kit");
        let mut host = MemoryHost::new().with_player("g", "Game Master", true, true);
        let first = sync_macros(&mut host, &f, &defs());
        assert_eq!(first.created, 1);
        let second = sync_macros(&mut host, &f, &defs());
        assert!(second.is_clean());
        assert_eq!(host.outbox().len(), 1);
    }

    #[test]
    fn offline_gm_does_not_own_macros() {
        let f = Formatter::new("Kit");
        let mut host = MemoryHost::new()
            .with_player("g", "Game Master", false, true)
            .with_player("p", "Player", true, false);
        let report = sync_macros(&mut host, &f, &defs());
        assert_eq!(report.skipped, 1);
        assert!(host.find_macro("KitMenu").is_none());
    }
}
