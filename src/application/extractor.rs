//! Assistant-message extraction from parsed chat exports.
//!
//! Walks the nested export structure and collects content strings
//! authored by the assistant role.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::{AppError, ExtractionStats, Result, SessionSummary};

/// Extracts all assistant-authored content strings from a parsed export.
///
/// The root value must be an array of sessions. Sessions missing the
/// expected `chat.history.messages` structure are skipped, not fatal;
/// the export format varies across sessions.
///
/// # Errors
/// Returns a schema error if the root is not an array.
pub fn extract_assistant_contents(export: &Value) -> Result<(Vec<String>, ExtractionStats)> {
    let sessions = root_sessions(export)?;

    let mut contents = Vec::new();
    let mut stats = ExtractionStats::default();

    for (i, session) in sessions.iter().enumerate() {
        let Some(messages) = session_messages(session) else {
            tracing::debug!("Skipping session #{}: missing chat.history.messages", i + 1);
            stats.sessions_skipped += 1;
            continue;
        };
        stats.sessions_scanned += 1;

        for message in messages {
            if message.get("role").and_then(Value::as_str) != Some("assistant") {
                continue;
            }
            let Some(items) = message.get("content_list").and_then(Value::as_array) else {
                continue;
            };
            stats.assistant_messages += 1;
            for item in items {
                if let Some(text) = item.get("content").and_then(Value::as_str) {
                    contents.push(text.to_string());
                }
            }
        }
    }

    tracing::info!(
        "Extracted {} assistant content string(s) from {} session(s)",
        contents.len(),
        stats.sessions_scanned
    );

    Ok((contents, stats))
}

/// Builds per-session summaries (title, timestamps, message counts).
///
/// Sessions with unexpected structure still appear, with zero counts,
/// so the listing reflects the whole export.
///
/// # Errors
/// Returns a schema error if the root is not an array.
pub fn summarize_sessions(export: &Value) -> Result<Vec<SessionSummary>> {
    let sessions = root_sessions(export)?;

    let summaries = sessions
        .iter()
        .map(|session| {
            let mut message_count = 0;
            let mut assistant_messages = 0;
            if let Some(messages) = session_messages(session) {
                for message in messages {
                    message_count += 1;
                    if message.get("role").and_then(Value::as_str) == Some("assistant") {
                        assistant_messages += 1;
                    }
                }
            }

            SessionSummary {
                title: session_title(session),
                created_at: session_created_at(session),
                message_count,
                assistant_messages,
            }
        })
        .collect();

    Ok(summaries)
}

/// Validates the root shape and returns the session array.
fn root_sessions(export: &Value) -> Result<&Vec<Value>> {
    export
        .as_array()
        .ok_or_else(|| AppError::schema("root is not a list of sessions"))
}

/// Values of `session.chat.history.messages`, tolerating both map and
/// array shapes. Keys of the map form are irrelevant and discarded.
fn session_messages(session: &Value) -> Option<Vec<&Value>> {
    let messages = session.get("chat")?.get("history")?.get("messages")?;
    match messages {
        Value::Object(map) => Some(map.values().collect()),
        Value::Array(items) => Some(items.iter().collect()),
        _ => None,
    }
}

/// Session title, from the session root or the nested chat object.
fn session_title(session: &Value) -> String {
    session
        .get("title")
        .or_else(|| session.get("chat").and_then(|c| c.get("title")))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Session creation time; exports carry epoch seconds, some variants
/// milliseconds or RFC 3339 strings.
fn session_created_at(session: &Value) -> Option<DateTime<Utc>> {
    let value = session.get("created_at")?;

    if let Some(n) = value.as_i64() {
        return if n > 1_000_000_000_000 {
            DateTime::from_timestamp_millis(n)
        } else {
            DateTime::from_timestamp(n, 0)
        };
    }

    value.as_str()?.parse::<DateTime<Utc>>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root_must_be_array() {
        let export = json!({"chat": {}});
        assert!(matches!(
            extract_assistant_contents(&export),
            Err(AppError::Schema { .. })
        ));
    }

    #[test]
    fn test_extracts_assistant_contents_from_map_messages() {
        let export = json!([{
            "chat": {"history": {"messages": {
                "m1": {"role": "user", "content_list": [{"content": "question"}]},
                "m2": {"role": "assistant", "content_list": [
                    {"content": "first"},
                    {"content": "second"}
                ]}
            }}}
        }]);

        let (contents, stats) = extract_assistant_contents(&export).unwrap();
        assert_eq!(contents, vec!["first", "second"]);
        assert_eq!(stats.sessions_scanned, 1);
        assert_eq!(stats.assistant_messages, 1);
    }

    #[test]
    fn test_tolerates_array_shaped_messages() {
        let export = json!([{
            "chat": {"history": {"messages": [
                {"role": "assistant", "content_list": [{"content": "hello"}]}
            ]}}
        }]);

        let (contents, _) = extract_assistant_contents(&export).unwrap();
        assert_eq!(contents, vec!["hello"]);
    }

    #[test]
    fn test_malformed_session_is_skipped() {
        let export = json!([
            {"unexpected": true},
            {"chat": {"history": {"messages": {
                "m": {"role": "assistant", "content_list": [{"content": "kept"}]}
            }}}}
        ]);

        let (contents, stats) = extract_assistant_contents(&export).unwrap();
        assert_eq!(contents, vec!["kept"]);
        assert_eq!(stats.sessions_skipped, 1);
        assert_eq!(stats.sessions_scanned, 1);
    }

    #[test]
    fn test_content_items_without_content_are_ignored() {
        let export = json!([{
            "chat": {"history": {"messages": {
                "m": {"role": "assistant", "content_list": [
                    {"other": "field"},
                    {"content": "present"}
                ]}
            }}}
        }]);

        let (contents, _) = extract_assistant_contents(&export).unwrap();
        assert_eq!(contents, vec!["present"]);
    }

    #[test]
    fn test_summarize_sessions() {
        let export = json!([{
            "title": "Build a CLI",
            "created_at": 1_716_719_546,
            "chat": {"history": {"messages": {
                "m1": {"role": "user", "content_list": [{"content": "q"}]},
                "m2": {"role": "assistant", "content_list": [{"content": "a"}]}
            }}}
        }]);

        let summaries = summarize_sessions(&export).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].title, "Build a CLI");
        assert_eq!(summaries[0].message_count, 2);
        assert_eq!(summaries[0].assistant_messages, 1);
        assert!(summaries[0].created_at.is_some());
    }
}
