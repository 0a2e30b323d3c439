//! Chat event routing.
//!
//! An event is only considered when it is an API message whose first
//! `--`-delimited token is the invocation literal. The second token picks the
//! sub-command: `config`, `help` and `reset` are built in, anything else is
//! looked up in the [CommandTable](super::commands::CommandTable). Every
//! failure becomes an error card for the invoking player; nothing escapes a
//! dispatch.
use log::{info, trace};

use super::commands::CommandContext;
use super::errors::CommandError;
use super::Extension;
use crate::format::ChatStyle;
use crate::host::{ChatEvent, Host, Invoker, API_EVENT};
use crate::logutil::escape_value;
use crate::state::SettingName;

/// Whisper target for change notices.
pub const GM_TARGET: &str = "gm";

/// One parsed command message. Lives for a single dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub raw: String,
    /// Trimmed `--` tokens, the invocation literal first.
    pub parts: Vec<String>,
    pub invoker: Invoker,
}

impl CommandInvocation {
    /// Parse `ev` if it addresses `invocation`; `None` means the event is not ours.
    pub fn parse(ev: &ChatEvent, invocation: &str) -> Option<Self> {
        if ev.kind != API_EVENT {
            return None;
        }
        let parts: Vec<String> = ev.content.split("--").map(|s| s.trim().to_string()).collect();
        if parts.first().map(String::as_str) != Some(invocation) {
            return None;
        }
        Some(Self {
            raw: ev.content.clone(),
            parts,
            invoker: Invoker::from_event(ev),
        })
    }

    /// Tokens after the invocation literal.
    pub fn args(&self) -> &[String] {
        &self.parts[1..]
    }

    pub fn subcommand(&self) -> Option<&str> {
        self.args().first().map(String::as_str)
    }
}

/// Where a dispatch ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Ignored,
    ConfigShown,
    ConfigSet {
        name: SettingName,
        old: Option<String>,
        new: String,
    },
    HelpShown,
    Reset { changed: usize },
    MainDispatch(String),
    Rejected { code: i32 },
}

impl<H: Host> Extension<H> {
    /// Handle one chat event to completion.
    pub fn handle_event(&mut self, ev: &ChatEvent) -> Route {
        let Some(inv) = CommandInvocation::parse(ev, &self.invocation) else {
            return Route::Ignored;
        };
        trace!(
            "{} from {} ({}): {:?}",
            self.name,
            inv.invoker.name,
            inv.invoker.id,
            inv.parts
        );
        match self.dispatch(&inv) {
            Ok(route) => route,
            Err(err) => {
                self.formatter.error(&mut self.host, Some(&inv.invoker), &err);
                Route::Rejected { code: err.code() }
            }
        }
    }

    fn dispatch(&mut self, inv: &CommandInvocation) -> Result<Route, CommandError> {
        let args = inv.args();
        match inv.subcommand() {
            Some("config") => match args.len() {
                1 => {
                    self.show_config(&inv.invoker);
                    Ok(Route::ConfigShown)
                }
                3 => self.set_config(&inv.invoker, &args[1], &args[2]),
                n => Err(CommandError::BadArity {
                    command: "config".to_string(),
                    expected: "0 or 2".to_string(),
                    got: n - 1,
                }),
            },
            Some("help") => {
                self.show_help(&inv.invoker);
                Ok(Route::HelpShown)
            }
            Some("reset") => Ok(self.reset_all(&inv.invoker)),
            Some(other) => self.main_api(inv, other),
            None => Err(CommandError::NotUnderstood(inv.raw.clone())),
        }
    }

    fn set_config(
        &mut self,
        invoker: &Invoker,
        name: &str,
        value: &str,
    ) -> Result<Route, CommandError> {
        let name: SettingName = name.parse()?;
        let old = self.store.get(name);
        self.store.set(name, value)?;
        info!(
            "{} changed {} from {:?} to {}",
            invoker.name,
            name,
            old,
            escape_value(value)
        );
        if self.announces_changes() {
            let notice = format!(
                "**{}** has been changed **from {} to {}**.",
                name,
                old.as_deref().unwrap_or("undefined"),
                value
            );
            self.formatter
                .to_chat(&mut self.host, &notice, ChatStyle::Success, Some(GM_TARGET));
        }
        self.show_config(invoker);
        Ok(Route::ConfigSet {
            name,
            old,
            new: value.to_string(),
        })
    }

    fn reset_all(&mut self, invoker: &Invoker) -> Route {
        let mut changed = 0;
        let names: Vec<(SettingName, &'static str)> = self
            .registry
            .iter()
            .map(|s| (s.name, s.default_or_true()))
            .collect();
        for (name, default) in names {
            if self.store.get(name).as_deref() == Some(default) {
                continue;
            }
            match self.store.set(name, default) {
                Ok(()) => changed += 1,
                Err(e) => self
                    .formatter
                    .error(&mut self.host, Some(invoker), &CommandError::State(e)),
            }
        }
        info!("{} reset {} settings", invoker.name, changed);
        self.formatter.to_chat(
            &mut self.host,
            "**All settings were reset to their defaults.**",
            ChatStyle::Success,
            Some(GM_TARGET),
        );
        self.show_config(invoker);
        Route::Reset { changed }
    }

    fn main_api(&mut self, inv: &CommandInvocation, name: &str) -> Result<Route, CommandError> {
        let Some(spec) = self.commands.get(name).cloned() else {
            return Err(CommandError::NotUnderstood(inv.raw.clone()));
        };
        let rest = &inv.args()[1..];
        if !spec.arity.allows(rest.len()) {
            return Err(CommandError::BadArity {
                command: spec.name.to_string(),
                expected: spec.arity.to_string(),
                got: rest.len(),
            });
        }
        let mut ctx = CommandContext {
            invoker: &inv.invoker,
            registry: &self.registry,
            store: &mut self.store,
            formatter: &self.formatter,
            chat: &mut self.host,
        };
        (spec.handler)(&mut ctx, rest)?;
        Ok(Route::MainDispatch(spec.name.to_string()))
    }

    fn announces_changes(&self) -> bool {
        self.store.get(SettingName::AnnounceChanges).as_deref() != Some("false")
    }
}
