//! File-block parsing for assistant message content.
//!
//! A file block is a `## File: <path>` marker line followed by a fenced
//! code region holding the file's content. Blocks are recovered with an
//! explicit scanner so first-match behavior is unambiguous.

use crate::domain::FileSet;

/// Marker introducing a file block inside assistant prose.
const FILE_MARKER: &str = "\n\n## File: ";

/// Fence delimiter for the content region.
const FENCE: &str = "```";

/// Parses one content string for embedded file blocks.
///
/// The string is split on the file marker; text before the first marker
/// is preamble and discarded. Each remaining chunk yields a file when it
/// has a non-empty path on the marker line and a fenced region somewhere
/// after it. Chunks without either contribute nothing.
pub fn parse_content_for_files(content: &str) -> FileSet {
    let mut files = FileSet::new();

    let mut chunks = content.split(FILE_MARKER);
    chunks.next();

    for chunk in chunks {
        let (path_line, rest) = chunk.split_once('\n').unwrap_or((chunk, ""));
        let path = path_line.trim();
        if path.is_empty() {
            tracing::debug!("Skipping file block with empty path");
            continue;
        }

        match first_fenced_region(rest) {
            Some(body) => {
                tracing::info!("Found file: {path}");
                files.insert(path.to_string(), body.trim().to_string());
            }
            None => {
                tracing::debug!("No fenced region after marker for: {path}");
            }
        }
    }

    files
}

/// Returns the inner text of the first fenced region in `text`.
///
/// A fence opens with three backticks, an optional language-tag token
/// (`[A-Za-z0-9_.-]*`) and a newline, and closes at the next three
/// backticks. An occurrence whose tag line contains other characters is
/// not an opener; scanning continues at the next candidate.
fn first_fenced_region(text: &str) -> Option<&str> {
    let mut search_from = 0;

    while let Some(found) = text[search_from..].find(FENCE) {
        let open = search_from + found;
        let after_open = open + FENCE.len();

        let Some(tag_len) = text[after_open..].find('\n') else {
            return None;
        };
        let tag = &text[after_open..after_open + tag_len];

        if tag.chars().all(is_tag_char) {
            let body_start = after_open + tag_len + 1;
            let close = text[body_start..].find(FENCE)?;
            return Some(&text[body_start..body_start + close]);
        }

        search_from = open + 1;
    }

    None
}

const fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_block_with_language_tag() {
        let content = "Here is the code:\n\n## File: src/main.py\n```python\nprint(\"hi\")\n```\nDone.";
        let files = parse_content_for_files(content);

        assert_eq!(files.len(), 1);
        assert_eq!(files.get("src/main.py"), Some("print(\"hi\")"));
    }

    #[test]
    fn test_block_without_language_tag() {
        let content = "\n\n## File: notes.txt\n```\nplain text\n```";
        let files = parse_content_for_files(content);

        assert_eq!(files.get("notes.txt"), Some("plain text"));
    }

    #[test]
    fn test_preamble_before_first_marker_is_discarded() {
        let content = "```rust\nnot a file\n```\n\n## File: a.rs\n```rust\nfn main() {}\n```";
        let files = parse_content_for_files(content);

        assert_eq!(files.len(), 1);
        assert_eq!(files.get("a.rs"), Some("fn main() {}"));
    }

    #[test]
    fn test_prose_between_path_and_fence_is_tolerated() {
        let content =
            "\n\n## File: run.sh\nThis script starts the server.\n```bash\necho start\n```";
        let files = parse_content_for_files(content);

        assert_eq!(files.get("run.sh"), Some("echo start"));
    }

    #[test]
    fn test_first_fenced_region_wins() {
        let content = "\n\n## File: a.txt\n```\nfirst\n```\nand also\n```\nsecond\n```";
        let files = parse_content_for_files(content);

        assert_eq!(files.get("a.txt"), Some("first"));
    }

    #[test]
    fn test_chunk_without_fence_contributes_nothing() {
        let content = "\n\n## File: missing.txt\njust prose, no code\n\n## File: ok.txt\n```\nx\n```";
        let files = parse_content_for_files(content);

        assert_eq!(files.len(), 1);
        assert_eq!(files.get("ok.txt"), Some("x"));
    }

    #[test]
    fn test_empty_path_is_skipped() {
        let content = "\n\n## File:   \n```\nbody\n```";
        let files = parse_content_for_files(content);

        assert!(files.is_empty());
    }

    #[test]
    fn test_unclosed_fence_contributes_nothing() {
        let content = "\n\n## File: a.txt\n```\nnever closed";
        let files = parse_content_for_files(content);

        assert!(files.is_empty());
    }

    #[test]
    fn test_invalid_tag_line_is_not_an_opener() {
        // "not a tag" contains spaces, so the first ``` does not open a
        // fence; the next one does.
        let content = "\n\n## File: a.txt\n```not a tag\n```\nreal body\n```";
        let files = parse_content_for_files(content);

        assert_eq!(files.get("a.txt"), Some("real body"));
    }

    #[test]
    fn test_duplicate_path_last_wins_within_one_string() {
        let content = "\n\n## File: a.txt\n```\nold\n```\n\n## File: a.txt\n```\nnew\n```";
        let files = parse_content_for_files(content);

        assert_eq!(files.len(), 1);
        assert_eq!(files.get("a.txt"), Some("new"));
    }

    #[test]
    fn test_content_is_trimmed() {
        let content = "\n\n## File: a.txt\n```\n\n  body line  \n\n```";
        let files = parse_content_for_files(content);

        assert_eq!(files.get("a.txt"), Some("body line"));
    }

    #[test]
    fn test_marker_requires_blank_line() {
        // "## File:" inline in prose (no preceding blank line) is not a marker
        let content = "the header\n## File: a.txt\n```\nx\n```";
        let files = parse_content_for_files(content);

        assert!(files.is_empty());
    }

    #[test]
    fn test_unicode_content_survives() {
        let content = "\n\n## File: docs/réadme.md\n```markdown\n# Привет 世界 🚀\n```";
        let files = parse_content_for_files(content);

        assert_eq!(files.get("docs/réadme.md"), Some("# Привет 世界 🚀"));
    }
}
