//! Text analyzer: word frequency visualizations for PDF and DOCX documents

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use text_analyzer::cli::{self, Cli, Commands, ConfigAction};
use text_analyzer::config::{Config, OutputFormat};
use text_analyzer::output::formatter::ReportGenerator;
use text_analyzer::pipeline::Pipeline;
use text_analyzer::{server, Result, TextAnalyzerError};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Analyze { file, output, top } => {
            cli::validate_file_extension(&file).map_err(TextAnalyzerError::UnsupportedFormat)?;

            let output_format = match output {
                Some(output) => cli::parse_output_format(&output).map_err(TextAnalyzerError::InvalidInput)?,
                None => config.output.format,
            };
            if let Some(top) = top {
                if top == 0 {
                    return Err(TextAnalyzerError::InvalidInput("--top must be at least 1".to_string()));
                }
                config.analysis.top_n = top;
            }

            info!("Analyzing {} as {:?}", file.display(), output_format);
            let pipeline = Pipeline::from_config(&config, output_format == OutputFormat::Html)?;

            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} [{elapsed_precise}] {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.enable_steady_tick(Duration::from_millis(100));
            pb.set_message(format!("Analyzing {}...", file.display()));

            let report = pipeline.analyze_file(&file).await;
            pb.finish_and_clear();
            let report = report?;

            let generator = ReportGenerator::with_options(config.output.color_output, true, true);
            println!("{}", generator.generate_report(&report, &output_format)?);
        }

        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            println!("🌐 Text Analysis App running at http://{}", config.bind_address());
            server::serve(&config).await?;
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("⚙️  Current Configuration ({})\n", path.display());
                    println!("Top words: {}", config.analysis.top_n);
                    println!("Preview length: {} characters", config.analysis.preview_chars);
                    match config.extraction_timeout() {
                        Some(limit) => println!("Extraction timeout: {}s", limit.as_secs()),
                        None => println!("Extraction timeout: disabled"),
                    }
                    println!(
                        "\nWord cloud: {}x{} on {}, up to {} words",
                        config.wordcloud.width,
                        config.wordcloud.height,
                        config.wordcloud.background,
                        config.wordcloud.max_words
                    );
                    println!("Charts: {}x{}", config.charts.width, config.charts.height);
                    match &config.render.font_path {
                        Some(font) => println!("Font: {}", font.display()),
                        None => println!("Font: system default"),
                    }
                    println!(
                        "\nServer: {} (uploads up to {} MB)",
                        config.bind_address(),
                        config.server.max_upload_mb
                    );
                    println!("Output: {:?}", config.output.format);
                }

                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    Config::default().save_to(&path)?;
                    println!("✅ Configuration reset successfully!");
                }

                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}
