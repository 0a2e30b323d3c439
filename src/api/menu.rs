//! Config menu: a builder that turns the registry into button descriptors, and
//! a renderer that serialises them to the host's roll-template syntax.
//!
//! Every row is a button whose label is the setting's current value. Clicking
//! it asks for a new value and re-invokes the extension with
//! `<invocation> --config --<setting> --<value>`. The menu ends with a
//! confirm-guarded reset button.
use crate::state::{SettingName, StateRegistry, StateStore};

/// Label shown for a setting with no persisted value.
pub const UNSET_LABEL: &str = "unset";

/// Options offered by a value prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOptions {
    Generated(Vec<String>),
    /// Hand-written option string, used verbatim.
    Custom(String),
}

impl PromptOptions {
    fn render(&self) -> String {
        match self {
            PromptOptions::Generated(values) => values.iter().map(|v| format!("|{}", v)).collect(),
            PromptOptions::Custom(raw) => raw.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub question: String,
    pub options: PromptOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuButton {
    pub label: String,
    /// Command text the prompt answer is appended to.
    pub command: String,
    pub prompt: Prompt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRow {
    pub setting: SettingName,
    pub button: MenuButton,
}

/// Button that runs `command` only after the player picks the confirm option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmButton {
    pub heading: String,
    pub label: String,
    pub question: String,
    pub confirm: String,
    pub command: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigMenu {
    pub title: String,
    pub rows: Vec<MenuRow>,
    pub reset: ConfirmButton,
}

/// Acceptable values with the default moved to the front.
pub fn option_order(values: &[&str], default: &str) -> Vec<String> {
    let mut ordered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    if let Some(idx) = ordered.iter().position(|v| v == default) {
        let d = ordered.remove(idx);
        ordered.insert(0, d);
    }
    ordered
}

pub fn build_config_menu(
    name: &str,
    invocation: &str,
    registry: &StateRegistry,
    store: &StateStore,
) -> ConfigMenu {
    let rows = registry
        .iter()
        .filter(|s| !s.hide)
        .map(|spec| {
            let options = match spec.custom_config {
                Some(raw) => PromptOptions::Custom(raw.to_string()),
                None => PromptOptions::Generated(option_order(
                    spec.acceptable_values(),
                    spec.default_or_true(),
                )),
            };
            MenuRow {
                setting: spec.name,
                button: MenuButton {
                    label: store
                        .get(spec.name)
                        .unwrap_or_else(|| UNSET_LABEL.to_string()),
                    command: format!("{} --config --{} --", invocation, spec.name),
                    prompt: Prompt {
                        question: format!("New {} value", spec.name),
                        options,
                    },
                },
            }
        })
        .collect();

    ConfigMenu {
        title: format!("{} Config", name),
        rows,
        reset: ConfirmButton {
            heading: "**CAUTION**".to_string(),
            label: "RESET ALL".to_string(),
            question: "Are you sure? All settings return to their defaults".to_string(),
            confirm: "I am sure".to_string(),
            command: format!("{} --reset", invocation),
        },
    }
}

pub fn render_button(button: &MenuButton) -> String {
    format!(
        "[{}]({}?{{{}{}}})",
        button.label,
        button.command,
        button.prompt.question,
        button.prompt.options.render()
    )
}

pub fn render_confirm(button: &ConfirmButton) -> String {
    format!(
        "[{}](!&#13;?{{{}|Cancel,|{},{}}})",
        button.label, button.question, button.confirm, button.command
    )
}

/// Serialise a menu as a default roll template.
pub fn render_menu(menu: &ConfigMenu) -> String {
    let mut out = format!("&{{template:default}} {{{{name={}}}}}", menu.title);
    for row in &menu.rows {
        out.push_str(&format!("{{{{{}={}}}}}", row.setting, render_button(&row.button)));
    }
    out.push_str(&format!(
        "{{{{{}={}}}}}",
        menu.reset.heading,
        render_confirm(&menu.reset)
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MemoryState;

    #[test]
    fn default_moves_to_front() {
        assert_eq!(option_order(&["val1", "val2"], "val2"), vec!["val2", "val1"]);
        assert_eq!(option_order(&["a", "b", "c"], "a"), vec!["a", "b", "c"]);
        assert_eq!(option_order(&["a", "b"], "zzz"), vec!["a", "b"]);
    }

    #[test]
    fn hidden_settings_are_not_rows() {
        let reg = StateRegistry::builtin().unwrap();
        let store = StateStore::in_memory("Kit");
        let menu = build_config_menu("Kit", "!kit", &reg, &store);
        assert!(menu.rows.iter().all(|r| r.setting != SettingName::SchemaVersion));
        assert_eq!(menu.rows.len(), reg.iter().filter(|s| !s.hide).count());
    }

    #[test]
    fn row_renders_clickable_prompt() {
        let reg = StateRegistry::builtin().unwrap();
        let seeded = MemoryState::new().with_value("Kit", "valueName", "val2");
        let store = StateStore::new("Kit", Box::new(seeded));
        let menu = build_config_menu("Kit", "!kit", &reg, &store);
        let row = menu
            .rows
            .iter()
            .find(|r| r.setting == SettingName::ValueName)
            .unwrap();
        assert_eq!(
            render_button(&row.button),
            "[val2](!kit --config --valueName --?{New valueName value|val1|val2})"
        );
    }

    #[test]
    fn custom_config_is_verbatim() {
        let reg = StateRegistry::builtin().unwrap();
        let store = StateStore::in_memory("Kit");
        let menu = build_config_menu("Kit", "!kit", &reg, &store);
        let row = menu
            .rows
            .iter()
            .find(|r| r.setting == SettingName::StatusMarker)
            .unwrap();
        assert_eq!(row.button.label, UNSET_LABEL);
        assert!(render_button(&row.button).ends_with("value|red|blue|green|purple|dead|skull})"));
    }

    #[test]
    fn full_menu_shape() {
        let reg = StateRegistry::builtin().unwrap();
        let store = StateStore::in_memory("Kit");
        let out = render_menu(&build_config_menu("Kit", "!kit", &reg, &store));
        assert!(out.starts_with("&{template:default} {{name=Kit Config}}{{valueName=["));
        assert!(out.ends_with(
            "{{**CAUTION**=[RESET ALL](!&#13;?{Are you sure? All settings return to their defaults|Cancel,|I am sure,!kit --reset})}}"
        ));
    }
}
