//! CLI interface for the text analyzer

use crate::input::file_detector::SUPPORTED_EXTENSIONS;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "text-analyzer")]
#[command(about = "Word frequency analysis for PDF and DOCX documents")]
#[command(long_about = "Extract the text of a PDF or DOCX document, count its words, and visualize the most frequent ones as a word cloud, bar chart, and heatmap")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a single document
    Analyze {
        /// Path to the document (PDF or DOCX)
        file: PathBuf,

        /// Output format: console, json, html
        #[arg(short, long)]
        output: Option<String>,

        /// Number of words in the charts (overrides the configuration)
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Serve the upload page in the browser
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "html" => Ok(crate::config::OutputFormat::Html),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, html", format)),
    }
}

/// Validate file extension against the supported document formats
pub fn validate_file_extension(path: &Path) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    SUPPORTED_EXTENSIONS.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
