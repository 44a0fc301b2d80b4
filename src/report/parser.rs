//! Reading the latest assistant reply out of a session log
//!
//! Session logs are JSON Lines. Only records shaped like
//! `{"type":"assistant","message":{"content":[{"type":"text","text":"..."}]}}`
//! are of interest; everything else (user turns, tool calls, summaries) is
//! skipped.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct LogRecord {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    message: Option<LogMessage>,
}

#[derive(Debug, Deserialize)]
struct LogMessage {
    #[serde(default)]
    content: Value,
}

impl LogRecord {
    /// First non-empty text part of an assistant record
    fn assistant_text(self) -> Option<String> {
        if self.kind.as_deref() != Some("assistant") {
            return None;
        }

        let parts = self.message?.content;
        parts.as_array()?.iter().find_map(|part| {
            let part = part.as_object()?;
            if part.get("type").and_then(Value::as_str) != Some("text") {
                return None;
            }
            part.get("text")
                .and_then(Value::as_str)
                .filter(|text| !text.is_empty())
                .map(str::to_owned)
        })
    }
}

/// Latest assistant text in JSON Lines `content`, scanning from the end.
///
/// Lines that fail to parse are skipped.
pub fn latest_assistant_text(content: &str) -> Option<String> {
    content
        .lines()
        .rev()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| serde_json::from_str::<LogRecord>(line).ok())
        .find_map(LogRecord::assistant_text)
}

/// Latest assistant text in the session log at `path`
pub fn latest_assistant_message(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => latest_assistant_text(&content),
        Err(e) => {
            tracing::debug!("Could not read session log {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_assistant_record_wins() {
        let log = concat!(
            r#"{"type":"user","message":{"content":"hi"}}"#,
            "\n",
            r#"{"type":"assistant","message":{"content":[{"type":"text","text":"R1"}]}}"#,
            "\n",
            r#"{"type":"assistant","message":{"content":[{"type":"text","text":"R2"}]}}"#,
            "\n",
        );
        assert_eq!(latest_assistant_text(log).as_deref(), Some("R2"));
    }

    #[test]
    fn test_tool_only_turn_is_skipped() {
        let log = concat!(
            r#"{"type":"assistant","message":{"content":[{"type":"text","text":"done"}]}}"#,
            "\n",
            r#"{"type":"assistant","message":{"content":[{"type":"tool_use","name":"Bash"}]}}"#,
            "\n",
            r#"{"type":"assistant","message":{"content":[{"type":"text","text":""}]}}"#,
        );
        assert_eq!(latest_assistant_text(log).as_deref(), Some("done"));
    }

    #[test]
    fn test_malformed_lines_are_ignored() {
        let log = concat!(
            r#"{"type":"assistant","message":{"content":[{"type":"text","text":"ok"}]}}"#,
            "\n",
            "{not json\n",
            "\n",
        );
        assert_eq!(latest_assistant_text(log).as_deref(), Some("ok"));
    }

    #[test]
    fn test_no_assistant_record() {
        let log = r#"{"type":"user","message":{"content":[{"type":"text","text":"question"}]}}"#;
        assert_eq!(latest_assistant_text(log), None);
        assert_eq!(latest_assistant_text(""), None);
    }

    #[test]
    fn test_first_text_part_of_record_is_used() {
        let log = r#"{"type":"assistant","message":{"content":["raw",{"type":"text","text":"a"},{"type":"text","text":"b"}]}}"#;
        assert_eq!(latest_assistant_text(log).as_deref(), Some("a"));
    }
}
