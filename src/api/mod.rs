//! # Extension Core
//!
//! [`Extension`] owns the setting registry, the validated store, the command
//! table and the host handle, and exposes the lifecycle the host drives:
//!
//! 1. [`Extension::startup`] once the host is ready: reconcile macros, then
//!    repair persisted settings
//! 2. [`Extension::handle_event`] for every chat message, one at a time
//!
//! ## Components
//!
//! - [`router`] - chat event parsing and sub-command dispatch
//! - [`menu`] - config menu builder and renderer
//! - [`help`] - help cards
//! - [`commands`] - dispatch table for the main command tree
//! - [`errors`] - error cards and their codes
//!
//! ## Usage
//!
//! ```rust
//! use rollkit::api::Extension;
//! use rollkit::config::ExtensionConfig;
//! use rollkit::host::{memory::MemoryHost, ChatEvent};
//! use rollkit::state::{StateRegistry, StateStore};
//!
//! let cfg = ExtensionConfig::default();
//! let registry = StateRegistry::builtin().unwrap();
//! let store = StateStore::in_memory(&cfg.state_namespace);
//! let host = MemoryHost::new().with_player("p1", "Alice", true, true);
//! let mut ext = Extension::new(&cfg, registry, store, host);
//! ext.startup();
//! ext.handle_event(&ChatEvent::api("!apiCall --config", "Alice (GM)", "p1"));
//! ```
use log::info;

pub mod commands;
pub mod errors;
pub mod help;
pub mod menu;
pub mod router;

use crate::config::ExtensionConfig;
use crate::format::Formatter;
use crate::host::macros::{sync_macros, MacroDefinition, SyncReport};
use crate::host::{Host, Invoker};
use crate::state::corrector::{correct_state, Correction};
use crate::state::{StateRegistry, StateStore};
use commands::CommandTable;

pub use router::{CommandInvocation, Route};

/// What ran at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupReport {
    pub macros: SyncReport,
    pub corrections: Vec<Correction>,
}

pub struct Extension<H: Host> {
    name: String,
    invocation: String,
    version: String,
    registry: StateRegistry,
    store: StateStore,
    formatter: Formatter,
    commands: CommandTable,
    macros: Vec<MacroDefinition>,
    host: H,
}

impl<H: Host> Extension<H> {
    pub fn new(cfg: &ExtensionConfig, registry: StateRegistry, store: StateStore, host: H) -> Self {
        Self {
            name: cfg.name.clone(),
            invocation: cfg.invocation.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            registry,
            store,
            formatter: Formatter::new(&cfg.name),
            commands: CommandTable::new(),
            macros: Vec::new(),
            host,
        }
    }

    pub fn with_commands(mut self, commands: CommandTable) -> Self {
        self.commands = commands;
        self
    }

    pub fn with_macros(mut self, macros: Vec<MacroDefinition>) -> Self {
        self.macros = macros;
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    /// Ready-time work: macro reconciliation followed by state correction.
    pub fn startup(&mut self) -> StartupReport {
        info!("{} v{} starting up", self.name, self.version);
        let macros = self.sync_macros();
        let corrections = self.correct_state();
        StartupReport {
            macros,
            corrections,
        }
    }

    pub fn sync_macros(&mut self) -> SyncReport {
        sync_macros(&mut self.host, &self.formatter, &self.macros)
    }

    pub fn correct_state(&mut self) -> Vec<Correction> {
        correct_state(&self.registry, &mut self.store, &self.formatter, &mut self.host)
    }

    /// Whisper the config menu to `invoker`.
    pub fn show_config(&mut self, invoker: &Invoker) {
        let menu = menu::build_config_menu(&self.name, &self.invocation, &self.registry, &self.store);
        let rendered = menu::render_menu(&menu);
        self.formatter.to_chat(
            &mut self.host,
            &rendered,
            crate::format::ChatStyle::Plain,
            Some(&invoker.name),
        );
    }

    /// Whisper the version card and one card per command to `invoker`.
    pub fn show_help(&mut self, invoker: &Invoker) {
        let target = Some(invoker.name.as_str());
        let plain = crate::format::ChatStyle::Plain;
        self.formatter
            .to_chat(&mut self.host, &help::render_version(&self.version), plain, target);
        for entry in help::help_entries(&self.invocation, &self.commands) {
            let card = help::render_entry(&entry, &self.store);
            self.formatter.to_chat(&mut self.host, &card, plain, target);
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn invocation(&self) -> &str {
        &self.invocation
    }

    pub fn registry(&self) -> &StateRegistry {
        &self.registry
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }
}
