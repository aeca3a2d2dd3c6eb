//! CLI interface using clap.
//!
//! Provides command-line arguments and subcommands for the tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::OutputFormat;

/// Qwen Chat Scaffold - Extract embedded project files from Qwen AI chat exports.
///
/// Quick start: qwen-chat-scaffold build export.json -o my-project
#[derive(Parser, Debug)]
#[command(name = "qwen-chat-scaffold")]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (use multiple times for more verbosity).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output format for listings: table or json.
    #[arg(short, long, default_value = "table")]
    pub format: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the project tree from file blocks in assistant messages.
    Build {
        /// Path to the Qwen JSON chat export file.
        export: PathBuf,

        /// Directory to create the project in (default from config, else project_output).
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// List discovered file blocks without writing anything.
    List {
        /// Path to the Qwen JSON chat export file.
        export: PathBuf,
    },

    /// Print the extracted content of a single file block.
    Show {
        /// Path to the Qwen JSON chat export file.
        export: PathBuf,

        /// Relative path of the file block to print.
        path: String,
    },

    /// List chat sessions in the export.
    Sessions {
        /// Path to the Qwen JSON chat export file.
        export: PathBuf,
    },

    /// Show extraction statistics for the export.
    Stats {
        /// Path to the Qwen JSON chat export file.
        export: PathBuf,
    },

    /// Show the effective configuration and its file path.
    Config,
}

impl Cli {
    /// Parse the output format argument.
    pub fn output_format(&self) -> Result<OutputFormat, String> {
        self.format.parse()
    }
}
