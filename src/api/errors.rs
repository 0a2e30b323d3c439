use thiserror::Error;

use crate::format::code;
use crate::state::StateError;

/// Everything the extension reports to chat as an error card.
///
/// Each variant carries the numeric code shown to players: user-input errors
/// are zero or positive, state-integrity errors negative.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Command {} not understood.", code(.0))]
    NotUnderstood(String),

    #[error("Command {} expects {expected} argument(s) but got {got}.", code(.command))]
    BadArity {
        command: String,
        expected: String,
        got: usize,
    },

    #[error(
        "\"{name}\" value was \"{}\" but has now been set to its default value, \"{new}\".",
        .old.as_deref().unwrap_or("undefined")
    )]
    Corrected {
        name: String,
        old: Option<String>,
        new: String,
    },

    #[error(transparent)]
    State(#[from] StateError),
}

impl CommandError {
    pub fn code(&self) -> i32 {
        match self {
            CommandError::NotUnderstood(_) => 0,
            CommandError::BadArity { .. } => 1,
            CommandError::Corrected { .. } => -1,
            CommandError::State(StateError::UnknownSetting(_)) => -3,
            CommandError::State(_) => -2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_split_user_and_integrity_errors() {
        assert_eq!(CommandError::NotUnderstood("x".into()).code(), 0);
        let corrected = CommandError::Corrected {
            name: "valueName".into(),
            old: None,
            new: "val1".into(),
        };
        assert_eq!(corrected.code(), -1);
        assert!(corrected.to_string().contains("was \"undefined\""));
        let invalid = CommandError::from(StateError::InvalidValue {
            name: "valueName".into(),
            value: "nope".into(),
        });
        assert_eq!(invalid.code(), -2);
        assert_eq!(
            CommandError::from(StateError::UnknownSetting("zzz".into())).code(),
            -3
        );
    }
}
