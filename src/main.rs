//! Qwen Chat Scaffold - Extract embedded project files from Qwen AI chat exports.
//!
//! Assistant messages in a Qwen chat export may embed whole files as
//! `## File: <path>` marker lines followed by fenced code regions. This tool
//! recovers those files and materializes them as a project tree on disk,
//! rejecting paths that would escape the output directory and marking shell
//! scripts executable.
//!
//! 🤖 QUICK START:
//!   qwen-chat-scaffold build export.json            # Write files to project_output/
//!   qwen-chat-scaffold build export.json -o my-app  # Choose the output directory
//!   qwen-chat-scaffold list export.json             # Preview file blocks, write nothing
//!   qwen-chat-scaffold show export.json run.sh      # Print one extracted file
//!   qwen-chat-scaffold sessions export.json         # List sessions in the export
//!   qwen-chat-scaffold stats export.json            # Extraction statistics

mod application;
mod cli;
mod domain;
mod infrastructure;

use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use application::{
    extract_assistant_contents, file_rows, format_files_json, format_files_table,
    format_sessions_json, format_sessions_table, format_stats, format_stats_json,
    parse_content_for_files, summarize_sessions, OutputFormat,
};
use cli::{Cli, Commands};
use domain::{ExtractionStats, FileSet, WriteReport};
use infrastructure::{
    config_file_path, ensure_config_exists, load_config, load_export, ProjectWriter, WriteOutcome,
};

fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Main application logic.
fn run(cli: Cli) -> domain::Result<()> {
    let format = cli
        .output_format()
        .map_err(|e| domain::AppError::Config { message: e })?;

    match cli.command {
        Commands::Build { export, output_dir } => {
            cmd_build(&export, output_dir.as_deref())?;
        }
        Commands::List { export } => {
            cmd_list(&export, format)?;
        }
        Commands::Show { export, path } => {
            cmd_show(&export, &path)?;
        }
        Commands::Sessions { export } => {
            cmd_sessions(&export, format)?;
        }
        Commands::Stats { export } => {
            cmd_stats(&export, format)?;
        }
        Commands::Config => {
            cmd_config()?;
        }
    }

    Ok(())
}

/// Parses every assistant content string and merges the results by path.
///
/// Later messages override earlier ones for the same path.
fn merge_file_blocks(contents: &[String], stats: &mut ExtractionStats) -> FileSet {
    let mut files = FileSet::new();

    for (i, content) in contents.iter().enumerate() {
        tracing::debug!("Parsing content from assistant message #{}", i + 1);
        let found = parse_content_for_files(content);
        stats.file_blocks += found.len();
        files.merge(found);
    }

    stats.distinct_paths = files.len();
    files
}

/// Loads an export and returns the merged path→content relation.
fn collect_files(export_path: &Path) -> domain::Result<(FileSet, ExtractionStats)> {
    let export = load_export(export_path)?;
    let (contents, mut stats) = extract_assistant_contents(&export)?;
    let files = merge_file_blocks(&contents, &mut stats);
    Ok((files, stats))
}

/// Build the project tree from an export.
fn cmd_build(export_path: &Path, output_dir: Option<&Path>) -> domain::Result<()> {
    let config = load_config()?;
    let export = load_export(export_path)?;
    let (contents, mut stats) = extract_assistant_contents(&export)?;

    if contents.is_empty() {
        println!("Could not find any content from an 'assistant' role in the export.");
        return Ok(());
    }
    println!("Found {} assistant message(s) to parse.", contents.len());

    let files = merge_file_blocks(&contents, &mut stats);

    if files.is_empty() {
        println!("No files found to create.");
        return Ok(());
    }

    let output_dir =
        output_dir.map_or_else(|| PathBuf::from(&config.output.dir), Path::to_path_buf);
    let writer = ProjectWriter::new(&output_dir, config.scripts.executable_suffixes.clone());

    let display_root = std::path::absolute(&output_dir).unwrap_or_else(|_| output_dir.clone());
    println!("\nBuilding project in: {}", display_root.display());

    let mut report = WriteReport::default();
    for file in &files {
        match writer.write_file(&file.path, &file.content) {
            Ok(WriteOutcome::Written { path, executable }) => {
                report.written += 1;
                if executable {
                    report.made_executable += 1;
                    println!("  {} {} {}", "✓".green(), path.display(), "(executable)".cyan());
                } else {
                    println!("  {} {}", "✓".green(), path.display());
                }
            }
            Ok(WriteOutcome::SkippedUnsafe) => {
                report.skipped_unsafe += 1;
                println!(
                    "  {} skipping unsafe file path: {}",
                    "!".yellow().bold(),
                    file.path
                );
            }
            Err(e) => {
                report.failed += 1;
                println!(
                    "  {} error writing {}: {}",
                    "✗".red().bold(),
                    file.path,
                    e
                );
            }
        }
    }

    println!(
        "\n{} Project generation complete: {} written ({} executable), {} skipped, {} failed.",
        "📁".bold(),
        report.written,
        report.made_executable,
        report.skipped_unsafe,
        report.failed
    );

    Ok(())
}

/// List discovered file blocks without writing.
fn cmd_list(export_path: &Path, format: OutputFormat) -> domain::Result<()> {
    let config = load_config()?;
    let (files, _) = collect_files(export_path)?;

    if files.is_empty() {
        println!("No file blocks found in the export.");
        return Ok(());
    }

    let rows = file_rows(&files, &config);
    let output = match format {
        OutputFormat::Table => format_files_table(&rows),
        OutputFormat::Json => format_files_json(&rows).map_err(domain::AppError::json_parse)?,
    };

    println!("{output}");
    Ok(())
}

/// Print the content of a single file block.
fn cmd_show(export_path: &Path, path: &str) -> domain::Result<()> {
    let (files, _) = collect_files(export_path)?;

    let content = files
        .get(path)
        .ok_or_else(|| domain::AppError::InvalidData {
            message: format!("No file block found for path: {path}"),
        })?;

    println!("{content}");
    Ok(())
}

/// List sessions in the export.
fn cmd_sessions(export_path: &Path, format: OutputFormat) -> domain::Result<()> {
    let export = load_export(export_path)?;
    let sessions = summarize_sessions(&export)?;

    if sessions.is_empty() {
        println!("No sessions in the export.");
        return Ok(());
    }

    let output = match format {
        OutputFormat::Table => format_sessions_table(&sessions),
        OutputFormat::Json => {
            format_sessions_json(&sessions).map_err(domain::AppError::json_parse)?
        }
    };

    println!("{output}");
    println!();
    println!("Total: {} session(s)", sessions.len());
    Ok(())
}

/// Show extraction statistics.
fn cmd_stats(export_path: &Path, format: OutputFormat) -> domain::Result<()> {
    let (_, stats) = collect_files(export_path)?;

    let output = match format {
        OutputFormat::Table => format_stats(&stats),
        OutputFormat::Json => format_stats_json(&stats).map_err(domain::AppError::json_parse)?,
    };

    println!("{output}");
    Ok(())
}

/// Show the effective configuration.
fn cmd_config() -> domain::Result<()> {
    ensure_config_exists()?;
    let config = load_config()?;

    let rendered = toml::to_string_pretty(&config).map_err(|e| domain::AppError::Config {
        message: format!("Failed to serialize config: {e}"),
    })?;

    println!("{}", "⚙ Configuration".bold());
    println!("  file: {}", config_file_path().display());
    println!();
    println!("{rendered}");
    Ok(())
}

/// Setup tracing/logging based on verbosity level.
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}
