//! Application configuration models.
//!
//! Pure configuration types; file loading and saving live in the
//! infrastructure layer.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Output directory configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory used when `--output-dir` is not given.
    #[serde(default = "default_output_dir")]
    pub dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> String {
    "project_output".to_string()
}

/// Executable-script configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptConfig {
    /// File suffixes granted executable permission bits after writing.
    #[serde(default = "default_executable_suffixes")]
    pub executable_suffixes: Vec<String>,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            executable_suffixes: default_executable_suffixes(),
        }
    }
}

fn default_executable_suffixes() -> Vec<String> {
    vec![".sh".to_string()]
}

/// Complete application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Output directory configuration.
    #[serde(default)]
    pub output: OutputConfig,

    /// Executable-script configuration.
    #[serde(default)]
    pub scripts: ScriptConfig,
}

impl AppConfig {
    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".qwen-chat-scaffold")
    }

    /// Get the config file path.
    #[must_use]
    pub fn config_file_path() -> PathBuf {
        Self::default_data_dir().join("config.toml")
    }

    /// Whether a path (as extracted, pre-normalization) should be executable.
    #[must_use]
    pub fn is_executable_path(&self, path: &str) -> bool {
        self.scripts
            .executable_suffixes
            .iter()
            .any(|suffix| path.ends_with(suffix.as_str()))
    }
}
