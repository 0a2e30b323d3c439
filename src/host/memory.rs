//! In-memory host used by the CLI and the test suite.
//!
//! Holds players, macros and attributes in plain vectors and records every
//! outbound chat line so callers can inspect what the extension said.
use anyhow::{anyhow, Result};
use log::trace;
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

use super::{Attribute, ChatSink, MacroObject, ObjectStore, Player};
use crate::logutil::escape_log;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemoryHost {
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub macros: Vec<MacroObject>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(skip)]
    outbox: Vec<(String, String)>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_player(mut self, id: &str, display_name: &str, online: bool, gm: bool) -> Self {
        self.players.push(Player {
            id: id.to_string(),
            display_name: display_name.to_string(),
            online,
            gm,
        });
        self
    }

    /// Load a world snapshot; a missing file yields an empty world.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| anyhow!("Failed to parse world file {}: {}", path.display(), e)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(anyhow!("Failed to read world file {}: {}", path.display(), e)),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .map_err(|e| anyhow!("Failed to write world file {}: {}", path.display(), e))
    }

    /// Every (speaker, text) pair sent so far.
    pub fn outbox(&self) -> &Vec<(String, String)> {
        &self.outbox
    }

    /// Drain recorded chat, e.g. to print it after each event.
    pub fn take_outbox(&mut self) -> Vec<(String, String)> {
        std::mem::take(&mut self.outbox)
    }
}

impl ChatSink for MemoryHost {
    fn send_chat(&mut self, speaker: &str, text: &str) {
        trace!("sendChat({}): {}", speaker, escape_log(text));
        self.outbox.push((speaker.to_string(), text.to_string()));
    }
}

impl ObjectStore for MemoryHost {
    fn online_players(&self) -> Vec<Player> {
        self.players.iter().filter(|p| p.online).cloned().collect()
    }

    fn is_gm(&self, player_id: &str) -> bool {
        self.players.iter().any(|p| p.id == player_id && p.gm)
    }

    fn find_macro(&self, name: &str) -> Option<MacroObject> {
        self.macros.iter().find(|m| m.name == name).cloned()
    }

    fn create_macro(
        &mut self,
        owner_id: &str,
        name: &str,
        action: &str,
        visible_to: &str,
    ) -> MacroObject {
        let obj = MacroObject {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            name: name.to_string(),
            action: action.to_string(),
            visible_to: visible_to.to_string(),
        };
        self.macros.push(obj.clone());
        obj
    }

    fn set_macro_action(&mut self, macro_id: &str, action: &str) {
        if let Some(m) = self.macros.iter_mut().find(|m| m.id == macro_id) {
            m.action = action.to_string();
        }
    }

    fn set_macro_visibility(&mut self, macro_id: &str, visible_to: &str) {
        if let Some(m) = self.macros.iter_mut().find(|m| m.id == macro_id) {
            m.visible_to = visible_to.to_string();
        }
    }

    fn find_attributes(&self, character_id: &str, name: &str) -> Vec<Attribute> {
        self.attributes
            .iter()
            .filter(|a| a.character_id == character_id && a.name == name)
            .cloned()
            .collect()
    }

    fn create_attribute(&mut self, character_id: &str, name: &str) -> Attribute {
        let attr = Attribute {
            id: Uuid::new_v4().to_string(),
            character_id: character_id.to_string(),
            name: name.to_string(),
            current: String::new(),
        };
        self.attributes.push(attr.clone());
        attr
    }

    fn set_attribute_current(&mut self, attribute_id: &str, value: &str) {
        if let Some(a) = self.attributes.iter_mut().find(|a| a.id == attribute_id) {
            a.current = value.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_snapshot_round_trips_without_outbox() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("world.json");
        let mut host = MemoryHost::new().with_player("p1", "Alice", true, true);
        host.create_macro("p1", "Menu", "!kit --config", "all");
        host.send_chat("Kit", "hello");
        host.save(&path).unwrap();

        let loaded = MemoryHost::load(&path).unwrap();
        assert_eq!(loaded.players.len(), 1);
        assert_eq!(loaded.macros[0].name, "Menu");
        assert!(loaded.outbox().is_empty());
    }

    #[test]
    fn missing_world_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let host = MemoryHost::load(&dir.path().join("nope.json")).unwrap();
        assert!(host.players.is_empty());
    }
}
