//! Output formatting for discovered files and sessions.
//!
//! Supports table and JSON output for the inspection commands.

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};
use serde::Serialize;

use crate::domain::{
    check_relative_path, AppConfig, ExtractionStats, FileSet, PathCheck, SessionSummary,
};

/// Output format options.
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Compact table listing.
    #[default]
    Table,
    /// JSON format for programmatic use.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {s}. Use: table, json")),
        }
    }
}

/// One discovered file, as shown by `list`.
#[derive(Debug, Clone, Serialize)]
pub struct FileRow {
    /// Path as extracted from the message.
    pub path: String,
    /// Content size in bytes (before the trailing newline is appended).
    pub bytes: usize,
    /// Whether the file would receive executable permission bits.
    pub executable: bool,
    /// Whether the path passes the traversal-safety gate.
    pub safe: bool,
}

/// Builds listing rows from the merged relation.
pub fn file_rows(files: &FileSet, config: &AppConfig) -> Vec<FileRow> {
    files
        .iter()
        .map(|file| FileRow {
            path: file.path.clone(),
            bytes: file.content.len(),
            executable: config.is_executable_path(&file.path),
            safe: matches!(check_relative_path(&file.path), PathCheck::Safe(_)),
        })
        .collect()
}

/// Formats a table listing of discovered files.
pub fn format_files_table(rows: &[FileRow]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Path", "Bytes", "Exec", "Status"]);

    for row in rows {
        let status = if row.safe { "ok" } else { "unsafe" };
        table.add_row(vec![
            &truncate(&row.path, 60),
            &row.bytes.to_string(),
            &(if row.executable { "yes" } else { "-" }).to_string(),
            &status.to_string(),
        ]);
    }

    table.to_string()
}

/// Formats file rows as JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn format_files_json(rows: &[FileRow]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(rows)
}

/// Formats a table listing of sessions.
pub fn format_sessions_table(sessions: &[SessionSummary]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Created", "Msgs", "Assistant", "Title"]);

    for (i, session) in sessions.iter().enumerate() {
        let created = session.created_at.map_or_else(
            || "-".to_string(),
            |dt| dt.format("%Y-%m-%d %H:%M").to_string(),
        );

        let title = if session.title.is_empty() {
            "[untitled]".to_string()
        } else {
            truncate(&session.title, 40)
        };

        table.add_row(vec![
            &(i + 1).to_string(),
            &created,
            &session.message_count.to_string(),
            &session.assistant_messages.to_string(),
            &title,
        ]);
    }

    table.to_string()
}

/// Formats sessions as JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn format_sessions_json(sessions: &[SessionSummary]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(sessions)
}

/// Formats extraction statistics for display.
pub fn format_stats(stats: &ExtractionStats) -> String {
    format!(
        "{}\n  Sessions scanned: {} ({} skipped)\n  Assistant messages: {}\n  File blocks: {}\n  Distinct paths: {}",
        "📊 Statistics".bold(),
        stats.sessions_scanned.to_string().cyan(),
        stats.sessions_skipped.to_string().yellow(),
        stats.assistant_messages.to_string().blue(),
        stats.file_blocks.to_string().green(),
        stats.distinct_paths.to_string().cyan()
    )
}

/// Formats extraction statistics as JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn format_stats_json(stats: &ExtractionStats) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(stats)
}

/// Truncates a string to max length with ellipsis.
fn truncate(s: &str, max_len: usize) -> String {
    let s = s.lines().next().unwrap_or(s);
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}
