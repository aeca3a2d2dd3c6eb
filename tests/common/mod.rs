/// Shared helpers for integration tests
///
/// Builds Qwen-style chat export files on disk for the binary to consume.
use std::path::{Path, PathBuf};

use serde_json::{json, Value};

/// Builder for a chat export document (an array of sessions).
pub struct ExportBuilder {
    sessions: Vec<Value>,
}

impl ExportBuilder {
    pub fn new() -> Self {
        Self {
            sessions: Vec::new(),
        }
    }

    /// Adds a session with a single assistant message holding `content`.
    pub fn with_assistant_content(mut self, content: &str) -> Self {
        self.sessions.push(json!({
            "title": "test session",
            "created_at": 1_716_719_546,
            "chat": {"history": {"messages": {
                "m1": {"role": "assistant", "content_list": [{"content": content}]}
            }}}
        }));
        self
    }

    /// Adds an arbitrary session value.
    #[allow(dead_code)]
    pub fn with_session(mut self, session: Value) -> Self {
        self.sessions.push(session);
        self
    }

    /// Writes the export as `export.json` under `dir` and returns its path.
    pub fn write(self, dir: &Path) -> PathBuf {
        let path = dir.join("export.json");
        std::fs::write(&path, Value::Array(self.sessions).to_string()).unwrap();
        path
    }
}

/// Wraps a file path and content into the `## File:` block convention.
pub fn file_block(path: &str, lang: &str, content: &str) -> String {
    format!("\n\n## File: {path}\n```{lang}\n{content}\n```")
}
