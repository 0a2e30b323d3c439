//! Chat formatting: styled notices, inline code spans and error cards.
//!
//! [Formatter] is the single place that knows the host's display syntax for
//! notices. Callers pick a [ChatStyle] and an optional whisper target; the
//! formatter wraps the body and hands the finished line to a [ChatSink].
use log::{debug, warn};

use crate::api::errors::CommandError;
use crate::host::{ChatSink, Invoker};
use crate::logutil::escape_log;

const SUCCESS_DIV: &str =
    "<br><div style=\"background-color: #5cd65c; color: Black; padding: 5px; border-radius: 10px;\">";
const FAILURE_DIV: &str =
    "<br><div style=\"background-color: #ff6666; color: Black; padding: 5px; border-radius: 10px;\">";
const ERROR_DIV: &str =
    "<br><div style='background-color: #ff6666; color: Black; padding: 5px; border-radius: 10px;'>";

/// Visual wrapper applied to an outbound notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatStyle {
    Plain,
    Success,
    Failure,
}

/// Render `snippet` as an inline code span.
pub fn code(snippet: &str) -> String {
    format!(
        "<span style=\"background-color: rgba(0, 0, 0, 0.5); color: White; padding: 2px; border-radius: 3px;\">{}</span>",
        snippet
    )
}

/// Build the whisper prefix for `target` (empty for a broadcast).
pub fn whisper_prefix(target: Option<&str>) -> String {
    match target.map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) => format!("/w {} ", t),
        None => String::new(),
    }
}

#[derive(Debug, Clone)]
pub struct Formatter {
    name: String,
    error_name: String,
}

impl Formatter {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            error_name: format!("{} ERROR", name),
        }
    }

    /// Speaker used for ordinary notices.
    pub fn speaker(&self) -> &str {
        &self.name
    }

    /// Speaker used for error cards.
    pub fn error_speaker(&self) -> &str {
        &self.error_name
    }

    /// Wrap `message` in the given style without sending it.
    pub fn render(&self, message: &str, style: ChatStyle, target: Option<&str>) -> String {
        let open = match style {
            ChatStyle::Plain => "<div>",
            ChatStyle::Success => SUCCESS_DIV,
            ChatStyle::Failure => FAILURE_DIV,
        };
        format!("{}{}{}</div>", whisper_prefix(target), open, message)
    }

    /// Send a styled notice, whispered to `target` when given.
    pub fn to_chat(
        &self,
        chat: &mut dyn ChatSink,
        message: &str,
        style: ChatStyle,
        target: Option<&str>,
    ) {
        let line = self.render(message, style, target);
        debug!("chat -> {:?}: {}", target, escape_log(&line));
        chat.send_chat(&self.name, &line);
    }

    /// Report an error card: whispered to the invoker when known, broadcast otherwise.
    pub fn error(&self, chat: &mut dyn ChatSink, invoker: Option<&Invoker>, err: &CommandError) {
        let target = invoker.map(|p| p.name.as_str()).filter(|n| !n.is_empty());
        let body = format!(
            "{}{}**{}** Error code {}.</div>",
            whisper_prefix(target),
            ERROR_DIV,
            err,
            err.code()
        );
        chat.send_chat(&self.error_name, &body);
        warn!("{}: {} Error code {}.", self.name, escape_log(&err.to_string()), err.code());
    }
}
