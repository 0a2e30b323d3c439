//! # Rollkit - Chat Command Extension Toolkit for Virtual Tabletops
//!
//! Rollkit is the core of a small in-process extension for a virtual tabletop.
//! It listens for chat commands, keeps a set of named settings valid across
//! sessions, renders an interactive config menu in chat, and keeps the game's
//! macro shortcuts in sync.
//!
//! ## Features
//!
//! - **Declarative Settings**: a fixed table of settings with acceptable values, defaults and menu flags.
//! - **Validated Persistence**: every write is checked per setting; reads pass through untouched.
//! - **Startup Correction**: missing or out-of-range values are reset to defaults and reported once.
//! - **Config Menu**: one clickable prompt per setting that re-invokes the extension with the new value.
//! - **Command Routing**: `--`-delimited commands with built-ins and an open dispatch table.
//! - **Macro Sync**: declared macros are created under a GM or corrected when they drift.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rollkit::api::Extension;
//! use rollkit::config::Config;
//! use rollkit::host::{memory::MemoryHost, ChatEvent};
//! use rollkit::state::{file::JsonStateFile, StateRegistry, StateStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     let registry = StateRegistry::builtin()?;
//!     let container = JsonStateFile::open(&config.storage.state_file)?;
//!     let store = StateStore::new(&config.extension.state_namespace, Box::new(container));
//!
//!     let mut ext = Extension::new(&config.extension, registry, store, MemoryHost::new())
//!         .with_macros(config.macros.clone());
//!     ext.startup();
//!     ext.handle_event(&ChatEvent::api("!apiCall --help", "Alice (GM)", "p1"));
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`api`] - the extension: routing, config menu, help, command table
//! - [`state`] - setting registry, validated store, startup correction
//! - [`host`] - host boundary traits, in-memory host, macros, attributes
//! - [`format`] - chat notice styling and error cards
//! - [`config`] - process configuration (TOML)
//! - [`logutil`] - single-line log escaping
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   Extension     │ ← routing, menu, help
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │   State         │ ← registry, store, corrector
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │   Host          │ ← chat, objects, persisted container
//! └─────────────────┘
//! ```

pub mod api;
pub mod config;
pub mod format;
pub mod host;
pub mod logutil;
pub mod state;
