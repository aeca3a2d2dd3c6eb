//! Filesystem materialization of extracted files.
//!
//! Joins vetted relative paths under a single output root, creates parent
//! directories, writes content with a trailing newline, and grants
//! executable bits to shell scripts.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{check_relative_path, AppError, PathCheck, Result};

/// Writes extracted files under a single output root.
pub struct ProjectWriter {
    root: PathBuf,
    executable_suffixes: Vec<String>,
}

/// Outcome of a single write attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// File was written at `path`; `executable` marks granted permission bits.
    Written { path: PathBuf, executable: bool },
    /// Path rejected by the traversal-safety gate; nothing was touched.
    SkippedUnsafe,
}

impl ProjectWriter {
    /// Create a writer rooted at `root`.
    pub fn new(root: impl Into<PathBuf>, executable_suffixes: Vec<String>) -> Self {
        Self {
            root: root.into(),
            executable_suffixes,
        }
    }

    /// The output root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes a single extracted file under the root.
    ///
    /// The relative path is normalized and vetted first; unsafe paths are
    /// reported via [`WriteOutcome::SkippedUnsafe`] without touching the
    /// filesystem. The executable check uses the path as extracted, before
    /// normalization.
    ///
    /// # Errors
    /// Returns error if directory creation, the write, or the permission
    /// change fails. A failure affects only this file; callers continue
    /// with the rest of the batch.
    pub fn write_file(&self, relative: &str, content: &str) -> Result<WriteOutcome> {
        let normalized = match check_relative_path(relative) {
            PathCheck::Safe(p) => p,
            PathCheck::Unsafe => {
                tracing::warn!("Rejected unsafe file path: {relative}");
                return Ok(WriteOutcome::SkippedUnsafe);
            }
        };

        let target = self.root.join(normalized);

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::io(format!("Failed to create directory {}", parent.display()), e)
            })?;
        }

        let mut data = String::with_capacity(content.len() + 1);
        data.push_str(content);
        data.push('\n');

        fs::write(&target, data)
            .map_err(|e| AppError::io(format!("Failed to write {}", target.display()), e))?;

        let executable = self
            .executable_suffixes
            .iter()
            .any(|suffix| relative.ends_with(suffix.as_str()));
        if executable {
            set_executable(&target)?;
        }

        tracing::debug!("Wrote file: {}", target.display());

        Ok(WriteOutcome::Written {
            path: target,
            executable,
        })
    }
}

/// Sets rwxr-xr-x on the file.
#[cfg(unix)]
fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .map_err(|e| AppError::io(format!("Failed to set permissions on {}", path.display()), e))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}
