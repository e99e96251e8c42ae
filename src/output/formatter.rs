//! Output formatters: console, JSON, and the HTML page

use crate::config::OutputFormat;
use crate::error::{Result, TextAnalyzerError};
use crate::input::file_detector::SUPPORTED_EXTENSIONS;
use crate::output::report::AnalysisReport;
use askama::Template;
use colored::{Color, Colorize};

pub const PAGE_TITLE: &str = "📊 Text Analysis App";
pub const INSTRUCTIONS: &str = "Upload a PDF or DOCX file to visualize word frequencies.";

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
}

/// Colored terminal summary
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// Structured output for scripting
pub struct JsonFormatter {
    pretty: bool,
}

/// The browser view
pub struct HtmlFormatter {
    include_styles: bool,
}

/// What the browser view currently shows
pub enum PageState<'a> {
    /// Nothing uploaded yet, or the last upload failed
    Idle { diagnostic: Option<&'a str> },
    Processed(&'a AnalysisReport),
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Text Analysis App</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #31333f;
            max-width: 860px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .section { margin: 28px 0; }
        .section h2 {
            color: #31333f;
            border-bottom: 2px solid #e9ecef;
            padding-bottom: 8px;
        }
        .upload {
            background: #f0f2f6;
            padding: 16px;
            border-radius: 6px;
        }
        .diagnostic {
            background: #fdecea;
            border-left: 4px solid #dc3545;
            padding: 12px 16px;
            border-radius: 6px;
            white-space: pre-wrap;
        }
        pre.preview {
            background: #f0f2f6;
            padding: 16px;
            border-radius: 6px;
            white-space: pre-wrap;
            word-break: break-word;
            font-size: 0.9em;
        }
        img { max-width: 100%; height: auto; display: block; margin: 0 auto; }
        .metadata {
            background: #e9ecef;
            padding: 12px 16px;
            border-radius: 6px;
            font-size: 0.9em;
        }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <h1>{{ title }}</h1>
        <p>{{ instructions }}</p>

        {% if upload_enabled %}
        <form class="upload" method="post" action="/" enctype="multipart/form-data">
            <label for="file">Choose a file</label>
            <input id="file" type="file" name="file" accept="{{ accept }}" required>
            <button type="submit">Analyze</button>
        </form>
        {% endif %}

        {% if has_diagnostic %}
        <div class="section diagnostic">{{ diagnostic }}</div>
        {% endif %}

        {% if has_report %}
        <div class="section">
            <h2>📄 Extracted Text Preview</h2>
            <pre class="preview">{{ preview }}</pre>
        </div>

        <div class="section">
            <h2>📊 Top {{ top_n }} Words - Bar Chart</h2>
            <img alt="Top words bar chart" width="{{ bar_chart_width }}" src="{{ bar_chart_uri }}">
        </div>

        <div class="section">
            <h2>☁️ WordCloud</h2>
            <img alt="Word cloud" width="{{ word_cloud_width }}" src="{{ word_cloud_uri }}">
        </div>

        <div class="section">
            <h2>🔥 Word Frequency Heatmap</h2>
            <img alt="Word frequency heatmap" width="{{ heatmap_width }}" src="{{ heatmap_uri }}">
        </div>

        <div class="metadata">
            <p><strong>Document:</strong> {{ document_name }} ({{ document_format }}, {{ document_size }})</p>
            <p><strong>Words:</strong> {{ total_tokens }} total, {{ distinct_tokens }} distinct | <strong>Characters:</strong> {{ character_count }}</p>
            <p>Generated {{ generated_at }} in {{ processing_time }} ms by Text Analyzer v{{ version }}</p>
        </div>
        {% endif %}
    </div>
</body>
</html>"#, ext = "html")]
struct PageTemplate {
    include_styles: bool,
    title: String,
    instructions: String,
    upload_enabled: bool,
    accept: String,
    has_diagnostic: bool,
    diagnostic: String,
    has_report: bool,
    preview: String,
    top_n: usize,
    bar_chart_uri: String,
    bar_chart_width: u32,
    word_cloud_uri: String,
    word_cloud_width: u32,
    heatmap_uri: String,
    heatmap_width: u32,
    document_name: String,
    document_format: String,
    document_size: String,
    total_tokens: usize,
    distinct_tokens: usize,
    character_count: usize,
    generated_at: String,
    processing_time: u64,
    version: String,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_bar(&self, count: usize, max_count: usize, width: usize) -> String {
        let filled = if max_count == 0 {
            0
        } else {
            ((count as f64 / max_count as f64) * width as f64).round().max(1.0) as usize
        };
        self.colorize(&"■".repeat(filled), Color::Cyan)
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let analysis = &report.analysis;
        let mut output = String::new();

        output.push_str(&self.format_header(PAGE_TITLE, 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));
        output.push_str(&format!(
            "Document: {} ({}, {})\n",
            self.colorize(&report.document.name, Color::Cyan),
            report.document.format,
            format_size(report.document.size_bytes)
        ));
        output.push_str(&format!(
            "Words: {} total, {} distinct | Characters: {}\n",
            analysis.total_tokens,
            analysis.distinct_tokens,
            analysis.text.character_count()
        ));

        output.push_str(&self.format_header("📄 Extracted Text Preview", 2));
        if analysis.preview.is_empty() {
            output.push_str(&self.colorize("(no text could be extracted)", Color::Yellow));
            output.push('\n');
        } else {
            output.push_str(&analysis.preview);
            output.push('\n');
        }

        output.push_str(&self.format_header(&format!("📊 Top {} Words", analysis.top_words.len()), 2));
        if analysis.top_words.is_empty() {
            output.push_str("No words found.\n");
        } else {
            let word_width = analysis
                .top_words
                .iter()
                .map(|w| w.word.chars().count())
                .max()
                .unwrap_or(0)
                .min(24);
            let count_width = analysis.max_count().to_string().len();
            for (rank, entry) in analysis.top_words.iter().enumerate() {
                output.push_str(&format!(
                    "{:>2}. {:<word_width$} {:>count_width$} {}\n",
                    rank + 1,
                    entry.word,
                    entry.count,
                    self.format_bar(entry.count, analysis.max_count(), 40),
                    word_width = word_width,
                    count_width = count_width,
                ));
            }
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    /// Render the page for either state. The upload form is only shown when a
    /// server is there to receive it.
    pub fn render_page(&self, state: &PageState<'_>, upload_enabled: bool) -> Result<String> {
        let mut template = PageTemplate {
            include_styles: self.include_styles,
            title: PAGE_TITLE.to_string(),
            instructions: INSTRUCTIONS.to_string(),
            upload_enabled,
            accept: SUPPORTED_EXTENSIONS
                .iter()
                .map(|ext| format!(".{}", ext))
                .collect::<Vec<_>>()
                .join(","),
            has_diagnostic: false,
            diagnostic: String::new(),
            has_report: false,
            preview: String::new(),
            top_n: 0,
            bar_chart_uri: String::new(),
            bar_chart_width: 0,
            word_cloud_uri: String::new(),
            word_cloud_width: 0,
            heatmap_uri: String::new(),
            heatmap_width: 0,
            document_name: String::new(),
            document_format: String::new(),
            document_size: String::new(),
            total_tokens: 0,
            distinct_tokens: 0,
            character_count: 0,
            generated_at: String::new(),
            processing_time: 0,
            version: String::new(),
        };

        match state {
            PageState::Idle { diagnostic } => {
                if let Some(message) = diagnostic {
                    template.has_diagnostic = true;
                    template.diagnostic = message.to_string();
                }
            }
            PageState::Processed(report) => {
                let visuals = report.visuals.as_ref().ok_or_else(|| {
                    TextAnalyzerError::OutputFormatting(
                        "HTML output needs rendered visuals".to_string(),
                    )
                })?;
                let analysis = &report.analysis;

                template.has_report = true;
                template.preview = analysis.preview.clone();
                template.top_n = analysis.top_n;
                template.bar_chart_uri = visuals.bar_chart.data_uri();
                template.bar_chart_width = visuals.bar_chart.width;
                template.word_cloud_uri = visuals.word_cloud.data_uri();
                template.word_cloud_width = visuals.word_cloud.width;
                template.heatmap_uri = visuals.heatmap.data_uri();
                template.heatmap_width = visuals.heatmap.width;
                template.document_name = report.document.name.clone();
                template.document_format = report.document.format.to_string();
                template.document_size = format_size(report.document.size_bytes);
                template.total_tokens = analysis.total_tokens;
                template.distinct_tokens = analysis.distinct_tokens;
                template.character_count = analysis.text.character_count();
                template.generated_at = report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string();
                template.processing_time = report.metadata.processing_time_ms;
                template.version = report.metadata.version.clone();
            }
        }

        template
            .render()
            .map_err(|e| TextAnalyzerError::OutputFormatting(e.to_string()))
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        self.render_page(&PageState::Processed(report), false)
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, true, true)
    }

    pub fn with_options(use_colors: bool, pretty_json: bool, include_html_styles: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(pretty_json),
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn format_size(bytes: usize) -> String {
    match bytes {
        0..=1023 => format!("{} B", bytes),
        1024..=1_048_575 => format!("{:.1} KB", bytes as f64 / 1024.0),
        _ => format!("{:.1} MB", bytes as f64 / 1_048_576.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::input::document::DocumentInfo;
    use crate::input::file_detector::DocumentFormat;
    use crate::output::render::{RenderedImage, RenderedVisuals};
    use crate::processing::analyzer::AnalysisEngine;
    use crate::processing::document::ExtractedText;
    use std::time::Duration;

    fn report(text: &str, with_visuals: bool) -> AnalysisReport {
        let analysis = AnalysisEngine::new(&Config::default().analysis)
            .analyze(ExtractedText::new(text.to_string()));
        let image = |width| RenderedImage { width, height: 10, png: vec![0x89, b'P', b'N', b'G'] };
        let visuals = with_visuals.then(|| RenderedVisuals {
            word_cloud: image(800),
            bar_chart: image(640),
            heatmap: image(640),
        });
        AnalysisReport::new(
            DocumentInfo {
                name: "notes.docx".to_string(),
                format: DocumentFormat::Docx,
                size_bytes: 2048,
            },
            analysis,
            visuals,
            Duration::from_millis(12),
        )
    }

    #[test]
    fn test_console_output() {
        let output = ConsoleFormatter::new(false)
            .format_report(&report("Hello world\nHello again", false))
            .unwrap();
        assert!(output.contains("notes.docx"));
        assert!(output.contains("Hello world\nHello again"));
        assert!(output.contains(" 1. hello 2"));
        assert!(output.contains("Words: 4 total, 3 distinct"));
    }

    #[test]
    fn test_console_output_for_empty_document() {
        let output = ConsoleFormatter::new(false).format_report(&report("", false)).unwrap();
        assert!(output.contains("no text could be extracted"));
        assert!(output.contains("No words found."));
    }

    #[test]
    fn test_json_output() {
        let json = JsonFormatter::new(false)
            .format_report(&report("Cat cat dog", true))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["analysis"]["frequencies"]["cat"], 2);
        assert_eq!(value["analysis"]["top_words"][0]["word"], "cat");
        assert_eq!(value["document"]["format"], "docx");
        assert_eq!(value["visuals"]["word_cloud"]["width"], 800);
        assert!(value["visuals"]["word_cloud"].get("png").is_none());
    }

    #[test]
    fn test_html_page_order() {
        let html = HtmlFormatter::new(true)
            .render_page(&PageState::Processed(&report("Hello <b>world</b>", true)), true)
            .unwrap();

        let positions: Vec<usize> = [
            "Text Analysis App</h1>",
            INSTRUCTIONS,
            "<form",
            "Extracted Text Preview",
            "Bar Chart",
            "WordCloud",
            "Heatmap",
        ]
        .iter()
        .map(|marker| html.find(marker).unwrap_or_else(|| panic!("missing {}", marker)))
        .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));

        assert!(html.contains("data:image/png;base64,"));
        assert!(!html.contains("<b>world"));
        assert!(html.contains("&#60;b&#62;world"));
    }

    #[test]
    fn test_idle_page() {
        let html = HtmlFormatter::new(false)
            .render_page(&PageState::Idle { diagnostic: None }, true)
            .unwrap();
        assert!(html.contains("accept=\".pdf,.docx\""));
        assert!(!html.contains("Extracted Text Preview"));

        let failed = HtmlFormatter::new(false)
            .render_page(&PageState::Idle { diagnostic: Some("Could not read document") }, true)
            .unwrap();
        assert!(failed.contains("Could not read document"));
    }

    #[test]
    fn test_html_requires_visuals() {
        let result = HtmlFormatter::new(true).format_report(&report("text", false));
        assert!(matches!(result, Err(TextAnalyzerError::OutputFormatting(_))));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(12), "12 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1_048_576), "3.0 MB");
    }
}
