//! Help cards.
use super::commands::CommandTable;
use crate::format::code;
use crate::state::{SettingName, StateStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    pub name: String,
    pub desc: Vec<String>,
    pub link: Option<SettingName>,
}

impl HelpEntry {
    fn new(name: String, desc: &[&str], link: Option<SettingName>) -> Self {
        Self {
            name,
            desc: desc.iter().map(|d| d.to_string()).collect(),
            link,
        }
    }
}

/// Help entries for the built-in commands followed by the registered ones.
pub fn help_entries(invocation: &str, commands: &CommandTable) -> Vec<HelpEntry> {
    let mut entries = vec![
        HelpEntry::new(
            format!("{} --help", invocation),
            &["Lists all commands, their parameters, and their usage."],
            None,
        ),
        HelpEntry::new(
            format!("{} --config", invocation),
            &["Shows the configuration menu.", "Click a value to change it."],
            None,
        ),
        HelpEntry::new(
            format!("{} --config --<setting> --<value>", invocation),
            &[
                "Changes one setting.",
                "Values outside the setting's accepted set are refused.",
            ],
            Some(SettingName::AnnounceChanges),
        ),
        HelpEntry::new(
            format!("{} --reset", invocation),
            &["Returns every setting to its default value."],
            None,
        ),
    ];
    entries.extend(
        commands
            .iter()
            .map(|c| HelpEntry::new(format!("{} --{}", invocation, c.name), c.summary, c.link)),
    );
    entries
}

pub fn render_version(version: &str) -> String {
    format!(
        "&{{template:default}} {{{{name=**VERSION**}}}} {{{{Current={}}}}}",
        version
    )
}

/// One default-template card per entry: the first description line under
/// `Function`, further lines in unlabelled rows, then the linked setting.
pub fn render_entry(entry: &HelpEntry, store: &StateStore) -> String {
    let mut out = format!("&{{template:default}} {{{{name={}}}}}", code(&entry.name));
    for (i, line) in entry.desc.iter().enumerate() {
        if i == 0 {
            out.push_str(&format!("{{{{Function={}}}}}", line));
        } else {
            out.push_str(&format!("{{{{={}}}}}", line));
        }
    }
    if let Some(link) = entry.link {
        let current = store.get(link).unwrap_or_else(|| "undefined".to_string());
        out.push_str(&format!("{{{{Current Setting={}}}}}", current));
    }
    out
}
