//! Domain models for extracted chat data.
//!
//! These models represent the core entities recovered from a Qwen chat
//! export: file blocks embedded in assistant messages, session summaries,
//! and extraction statistics.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single file recovered from an assistant message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedFile {
    /// Relative path as it appeared after the file marker.
    pub path: String,
    /// Inner text of the fenced region, trimmed.
    pub content: String,
}

/// Relation from relative path to file content.
///
/// Entries keep their first-seen position; inserting an existing path
/// replaces its content in place (last write wins, in processing order).
#[derive(Debug, Clone, Default)]
pub struct FileSet {
    entries: Vec<ExtractedFile>,
    index: HashMap<String, usize>,
}

impl FileSet {
    /// Create an empty relation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a path/content pair, replacing any previous content for the path.
    pub fn insert(&mut self, path: String, content: String) {
        if let Some(&pos) = self.index.get(&path) {
            self.entries[pos].content = content;
        } else {
            self.index.insert(path.clone(), self.entries.len());
            self.entries.push(ExtractedFile { path, content });
        }
    }

    /// Merge another relation into this one (other's entries win on conflict).
    pub fn merge(&mut self, other: Self) {
        for file in other.entries {
            self.insert(file.path, file.content);
        }
    }

    /// Look up the content stored for a path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.index
            .get(path)
            .map(|&pos| self.entries[pos].content.as_str())
    }

    /// Iterate entries in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, ExtractedFile> {
        self.entries.iter()
    }

    /// Number of distinct paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the relation is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a FileSet {
    type Item = &'a ExtractedFile;
    type IntoIter = std::slice::Iter<'a, ExtractedFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Summary of one chat session in the export.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    /// Session title, empty when absent.
    pub title: String,
    /// When the session was created.
    pub created_at: Option<DateTime<Utc>>,
    /// Total messages in the session.
    pub message_count: usize,
    /// Messages attributed to the assistant role.
    pub assistant_messages: usize,
}

/// Summary statistics for an extraction run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionStats {
    /// Sessions with the expected nested structure.
    pub sessions_scanned: usize,
    /// Sessions skipped for missing or malformed structure.
    pub sessions_skipped: usize,
    /// Assistant content strings collected.
    pub assistant_messages: usize,
    /// File blocks recognized across all messages (per-message distinct).
    pub file_blocks: usize,
    /// Distinct paths after last-write-wins merging.
    pub distinct_paths: usize,
}

/// Outcome of a batch materialization.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct WriteReport {
    /// Files written to disk.
    pub written: usize,
    /// Files granted executable permission bits.
    pub made_executable: usize,
    /// Entries rejected by the traversal-safety gate.
    pub skipped_unsafe: usize,
    /// Entries whose write failed.
    pub failed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fileset_insert_preserves_order() {
        let mut files = FileSet::new();
        files.insert("b.txt".into(), "1".into());
        files.insert("a.txt".into(), "2".into());

        let paths: Vec<_> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["b.txt", "a.txt"]);
    }

    #[test]
    fn test_fileset_last_write_wins_in_place() {
        let mut files = FileSet::new();
        files.insert("b.txt".into(), "old".into());
        files.insert("a.txt".into(), "other".into());
        files.insert("b.txt".into(), "new".into());

        assert_eq!(files.len(), 2);
        assert_eq!(files.get("b.txt"), Some("new"));
        // Overwrite keeps the original position
        let paths: Vec<_> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["b.txt", "a.txt"]);
    }

    #[test]
    fn test_fileset_merge() {
        let mut base = FileSet::new();
        base.insert("a".into(), "1".into());
        base.insert("b".into(), "2".into());

        let mut incoming = FileSet::new();
        incoming.insert("b".into(), "3".into());
        incoming.insert("c".into(), "4".into());

        base.merge(incoming);
        assert_eq!(base.len(), 3);
        assert_eq!(base.get("b"), Some("3"));
        assert_eq!(base.get("c"), Some("4"));
    }
}
