//! Syntactic path normalization and traversal safety.
//!
//! The gate operates on the path text alone, never on the filesystem:
//! `.` segments are dropped, interior `..` segments collapse into their
//! parent, and anything that is absolute or still escapes upward after
//! normalization is rejected. Symbolic links inside the output directory
//! are not canonicalized; that residual risk is documented rather than
//! guessed at.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Result of vetting an extracted relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathCheck {
    /// Path is safe to join under the output root; holds the normalized form.
    Safe(PathBuf),
    /// Path is absolute, empty after normalization, or escapes the root.
    Unsafe,
}

/// Normalizes a relative path and decides whether it may be written.
#[must_use]
pub fn check_relative_path(raw: &str) -> PathCheck {
    let mut normalized: Vec<OsString> = Vec::new();

    for component in Path::new(raw).components() {
        match component {
            Component::Prefix(_) | Component::RootDir => return PathCheck::Unsafe,
            Component::CurDir => {}
            Component::ParentDir => match normalized.last() {
                // A leading ".." has nothing to pop and survives
                // normalization, so it is caught below.
                Some(last) if last != ".." => {
                    normalized.pop();
                }
                _ => normalized.push(OsString::from("..")),
            },
            Component::Normal(segment) => normalized.push(segment.to_os_string()),
        }
    }

    if normalized.is_empty() || normalized.iter().any(|s| s == "..") {
        return PathCheck::Unsafe;
    }

    PathCheck::Safe(normalized.iter().collect())
}
