//! Configuration management for the text analyzer

use crate::error::{Result, TextAnalyzerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub input: InputConfig,
    pub wordcloud: WordCloudConfig,
    pub charts: ChartConfig,
    pub render: RenderConfig,
    pub server: ServerConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    /// Number of entries shown in the bar chart and heatmap
    pub top_n: usize,
    /// Characters of extracted text shown before the ellipsis
    pub preview_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputConfig {
    /// Upper bound on a single extraction, 0 disables the limit
    pub extraction_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WordCloudConfig {
    pub width: u32,
    pub height: u32,
    pub background: String,
    pub max_words: usize,
    pub min_font_size: f32,
    /// Defaults to the canvas height when unset
    pub max_font_size: Option<f32>,
    pub margin: u32,
    pub prefer_horizontal: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RenderConfig {
    /// TrueType font used for every rendered image; system fonts are searched when unset
    pub font_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OutputFormat {
    Console,
    Json,
    Html,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig {
                top_n: 20,
                preview_chars: 1000,
            },
            input: InputConfig {
                extraction_timeout_secs: 120,
            },
            wordcloud: WordCloudConfig {
                width: 800,
                height: 400,
                background: "white".to_string(),
                max_words: 200,
                min_font_size: 4.0,
                max_font_size: None,
                margin: 2,
                prefer_horizontal: 0.9,
            },
            charts: ChartConfig {
                width: 640,
                height: 480,
            },
            render: RenderConfig::default(),
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8501,
                max_upload_mb: 200,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load the configuration from the default location, writing defaults on first use
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| TextAnalyzerError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| TextAnalyzerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("text-analyzer")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.analysis.top_n == 0 {
            return Err(TextAnalyzerError::Configuration(
                "analysis.top_n must be at least 1".to_string(),
            ));
        }
        if self.wordcloud.width == 0 || self.wordcloud.height == 0 {
            return Err(TextAnalyzerError::Configuration(
                "wordcloud dimensions must be non-zero".to_string(),
            ));
        }
        if self.charts.width < 200 || self.charts.height < 150 {
            return Err(TextAnalyzerError::Configuration(
                "charts must be at least 200x150".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.wordcloud.prefer_horizontal) {
            return Err(TextAnalyzerError::Configuration(
                "wordcloud.prefer_horizontal must be between 0 and 1".to_string(),
            ));
        }
        if self.wordcloud.min_font_size < 1.0 {
            return Err(TextAnalyzerError::Configuration(
                "wordcloud.min_font_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn extraction_timeout(&self) -> Option<std::time::Duration> {
        match self.input.extraction_timeout_secs {
            0 => None,
            secs => Some(std::time::Duration::from_secs(secs)),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
