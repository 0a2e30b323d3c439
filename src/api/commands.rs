//! Dispatch table for the extension's main command tree.
//!
//! The built-in sub-commands (`config`, `help`, `reset`) are handled by the
//! router directly. Everything else an extension wants to offer is registered
//! here as a [CommandSpec]; the router checks arity before calling the handler.
use std::fmt;

use super::errors::CommandError;
use crate::format::Formatter;
use crate::host::{ChatSink, Invoker};
use crate::state::{SettingName, StateRegistry, StateStore};

/// Sub-command names the router owns.
pub const BUILTIN_COMMANDS: &[&str] = &["config", "help", "reset"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandArity {
    Exact(usize),
    AtLeast(usize),
}

impl CommandArity {
    pub fn allows(&self, count: usize) -> bool {
        match *self {
            CommandArity::Exact(n) => count == n,
            CommandArity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for CommandArity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandArity::Exact(n) => write!(f, "{}", n),
            CommandArity::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

/// Everything a command handler may touch during one dispatch.
pub struct CommandContext<'a> {
    pub invoker: &'a Invoker,
    pub registry: &'a StateRegistry,
    pub store: &'a mut StateStore,
    pub formatter: &'a Formatter,
    pub chat: &'a mut dyn ChatSink,
}

pub type CommandHandler = fn(&mut CommandContext<'_>, &[String]) -> Result<(), CommandError>;

#[derive(Clone)]
pub struct CommandSpec {
    pub name: &'static str,
    pub arity: CommandArity,
    /// Help text, one entry per help row.
    pub summary: &'static [&'static str],
    /// Setting whose current value the help card shows.
    pub link: Option<SettingName>,
    pub handler: CommandHandler,
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    commands: Vec<CommandSpec>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command. A later registration under the same name replaces the
    /// earlier one; built-in names are shadowed by the router and never reached.
    pub fn with(mut self, spec: CommandSpec) -> Self {
        if BUILTIN_COMMANDS.contains(&spec.name) {
            log::warn!("command '{}' shadows a built-in and will never run", spec.name);
        }
        self.commands.retain(|c| c.name != spec.name);
        self.commands.push(spec);
        self
    }

    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
