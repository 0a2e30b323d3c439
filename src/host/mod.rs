//! # Host Boundary
//!
//! The virtual-tabletop host owns players, characters, attributes, macros and
//! the chat transport. This module describes exactly the slice of it the
//! extension touches, so the core never depends on a concrete host.
//!
//! - [`ChatEvent`] - inbound chat message as delivered by the host
//! - [`ChatSink`] - outbound chat (`sendChat` equivalent)
//! - [`ObjectStore`] - queries and mutations on host objects
//! - [`memory::MemoryHost`] - in-memory host used by the CLI and tests
//! - [`macros`] - reconciliation of declared macros
//! - [`attrs`] - character attribute helpers
use serde::{Deserialize, Serialize};

pub mod attrs;
pub mod macros;
pub mod memory;

/// Chat event type that carries API commands.
pub const API_EVENT: &str = "api";

/// Inbound chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    pub who: String,
    #[serde(default)]
    pub playerid: String,
}

impl ChatEvent {
    pub fn api(content: &str, who: &str, playerid: &str) -> Self {
        Self {
            kind: API_EVENT.to_string(),
            content: content.to_string(),
            who: who.to_string(),
            playerid: playerid.to_string(),
        }
    }
}

/// The player a dispatch is running on behalf of. Lives for one dispatch only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoker {
    pub name: String,
    pub id: String,
}

impl Invoker {
    pub fn new(name: &str, id: &str) -> Self {
        Self {
            name: name.to_string(),
            id: id.to_string(),
        }
    }

    /// Take the first word of `who` ("Alice (GM)" whispers as "Alice").
    pub fn from_event(ev: &ChatEvent) -> Self {
        let name = ev.who.split_whitespace().next().unwrap_or_default();
        Self::new(name, &ev.playerid)
    }
}

/// Outbound chat transport.
pub trait ChatSink {
    fn send_chat(&mut self, speaker: &str, text: &str);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub online: bool,
    #[serde(default)]
    pub gm: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroObject {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub action: String,
    pub visible_to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: String,
    pub character_id: String,
    pub name: String,
    #[serde(default)]
    pub current: String,
}

/// Host object queries and mutations used by the extension.
pub trait ObjectStore {
    fn online_players(&self) -> Vec<Player>;
    fn is_gm(&self, player_id: &str) -> bool;

    fn find_macro(&self, name: &str) -> Option<MacroObject>;
    fn create_macro(&mut self, owner_id: &str, name: &str, action: &str, visible_to: &str)
        -> MacroObject;
    fn set_macro_action(&mut self, macro_id: &str, action: &str);
    fn set_macro_visibility(&mut self, macro_id: &str, visible_to: &str);

    fn find_attributes(&self, character_id: &str, name: &str) -> Vec<Attribute>;
    fn create_attribute(&mut self, character_id: &str, name: &str) -> Attribute;
    /// Write an attribute's `current` value, firing sheet workers where the host has them.
    fn set_attribute_current(&mut self, attribute_id: &str, value: &str);
}

/// Everything the extension needs from its host.
pub trait Host: ChatSink + ObjectStore {}

impl<T: ChatSink + ObjectStore> Host for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoker_takes_first_word() {
        let ev = ChatEvent::api("!kit", "Alice (GM)", "p1");
        let who = Invoker::from_event(&ev);
        assert_eq!(who.name, "Alice");
        assert_eq!(who.id, "p1");
    }

    #[test]
    fn event_parses_host_json() {
        let raw = r#"{"type":"api","content":"!apiCall --help","who":"Bob","playerid":"p2"}"#;
        let ev: ChatEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(ev.kind, API_EVENT);
        assert_eq!(ev.content, "!apiCall --help");
    }
}
