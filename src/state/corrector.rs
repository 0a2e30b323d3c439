//! Startup repair of persisted settings.
//!
//! Runs once before commands are accepted. Any setting that is unset, or holds
//! a value outside its acceptable set (unless marked `ignore`), is
//! reset to its default. One correction is reported in detail as a code -1
//! error; several are summarised in a single success notice.
use log::{info, warn};

use super::{SettingName, StateRegistry, StateStore};
use crate::api::errors::CommandError;
use crate::format::{ChatStyle, Formatter};
use crate::host::ChatSink;

const MULTIPLE_CORRECTED: &str = "**Multiple settings were wrong or un-set. They have now been corrected. \
If this is your first time running this API, this is normal.**";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    pub name: SettingName,
    pub old: Option<String>,
    pub new: String,
}

/// Reset missing or invalid settings and report what changed.
pub fn correct_state(
    registry: &StateRegistry,
    store: &mut StateStore,
    formatter: &Formatter,
    chat: &mut dyn ChatSink,
) -> Vec<Correction> {
    let mut changed = Vec::new();
    for spec in registry.iter() {
        let current = store.get(spec.name);
        let needs_reset = match current.as_deref() {
            None => true,
            Some(value) => !spec.is_acceptable(value) && !spec.ignore,
        };
        if !needs_reset {
            continue;
        }
        let default = spec.default_or_true();
        if let Err(e) = store.set(spec.name, default) {
            warn!("Could not reset {}: {}", spec.name, e);
            formatter.error(chat, None, &CommandError::State(e));
            continue;
        }
        changed.push(Correction {
            name: spec.name,
            old: current,
            new: default.to_string(),
        });
    }

    match changed.as_slice() {
        [] => {}
        [only] => {
            formatter.error(
                chat,
                None,
                &CommandError::Corrected {
                    name: only.name.to_string(),
                    old: only.old.clone(),
                    new: only.new.clone(),
                },
            );
        }
        many => {
            info!("Corrected {} settings at startup", many.len());
            formatter.to_chat(chat, MULTIPLE_CORRECTED, ChatStyle::Success, None);
        }
    }
    changed
}
