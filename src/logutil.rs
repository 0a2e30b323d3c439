//! Logging helpers for chat content.
//!
//! Chat lines routinely carry HTML, template markup and multi-line notes typed by
//! players. Everything that reaches the log goes through [escape_log] (whole chat
//! lines) or [escape_value] (a single setting value) so one event stays on one
//! log line.
use std::fmt::Write;

/// Characters kept from a chat line or rendered card.
pub const CHAT_PREVIEW: usize = 300;
/// Characters kept from a setting value; real values are a word or two.
pub const VALUE_PREVIEW: usize = 48;

/// Escape a chat line for single-line logging.
pub fn escape_log(s: &str) -> String {
    escape_preview(s, CHAT_PREVIEW)
}

/// Escape a player-supplied setting value for logging.
pub fn escape_value(s: &str) -> String {
    escape_preview(s, VALUE_PREVIEW)
}

/// Escape `s` and cut it after `max` characters.
///
/// `<br>` breaks become `\n` so rendered cards read like the chat they
/// produce. Newlines, carriage returns, tabs and backslashes are escaped;
/// other control characters become `\xNN`. A cut is marked with an ellipsis.
pub fn escape_preview(s: &str, max: usize) -> String {
    let mut out = String::with_capacity(s.len().min(max) + 8);
    let mut rest = s;
    let mut count = 0;
    while let Some(ch) = rest.chars().next() {
        if count >= max {
            out.push('…');
            break;
        }
        if rest.starts_with("<br>") {
            out.push_str("\\n");
            rest = &rest[4..];
            count += 1;
            continue;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
        rest = &rest[ch.len_utf8()..];
        count += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_multiline_chat() {
        let esc = escape_log("!apiCall --config\n--valueName\t--val2");
        assert_eq!(esc, "!apiCall --config\\n--valueName\\t--val2");
    }

    #[test]
    fn card_breaks_read_as_newlines() {
        let esc = escape_log("/w gm <br><div>done</div>");
        assert_eq!(esc, "/w gm \\n<div>done</div>");
    }

    #[test]
    fn truncates_long_templates() {
        let long = "x".repeat(400);
        let esc = escape_log(&long);
        assert!(esc.ends_with('…'));
        assert_eq!(esc.chars().count(), CHAT_PREVIEW + 1);
    }

    #[test]
    fn setting_values_are_cut_shorter() {
        assert_eq!(escape_value("val2"), "val2");
        let pasted = "a".repeat(200);
        assert_eq!(escape_value(&pasted).chars().count(), VALUE_PREVIEW + 1);
    }
}
