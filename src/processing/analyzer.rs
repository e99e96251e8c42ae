//! Analysis engine: turns extracted text into frequency statistics

use crate::config::AnalysisConfig;
use crate::processing::document::ExtractedText;
use crate::processing::text_processor::{FrequencyTable, TextProcessor, WordCount};
use log::{debug, info};
use serde::Serialize;

/// Everything derived from one document's text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextAnalysis {
    pub text: ExtractedText,
    pub preview: String,
    pub frequencies: FrequencyTable,
    pub top_words: Vec<WordCount>,
    /// Configured size of the top-words view
    pub top_n: usize,
    pub total_tokens: usize,
    pub distinct_tokens: usize,
}

impl TextAnalysis {
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    pub fn max_count(&self) -> usize {
        self.top_words.first().map(|w| w.count).unwrap_or(0)
    }
}

pub struct AnalysisEngine {
    processor: TextProcessor,
    top_n: usize,
    preview_chars: usize,
}

impl AnalysisEngine {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            processor: TextProcessor::new(),
            top_n: config.top_n,
            preview_chars: config.preview_chars,
        }
    }

    pub fn analyze(&self, text: ExtractedText) -> TextAnalysis {
        let preview = text.preview(self.preview_chars);
        let frequencies = self.processor.word_frequencies(text.as_str());
        let top_words = frequencies.top_n(self.top_n);

        info!(
            "Counted {} tokens ({} distinct) in {} characters",
            frequencies.total(),
            frequencies.len(),
            text.character_count()
        );
        if let Some(top) = top_words.first() {
            debug!("Most frequent word: '{}' ({})", top.word, top.count);
        }

        TextAnalysis {
            total_tokens: frequencies.total(),
            distinct_tokens: frequencies.len(),
            text,
            preview,
            frequencies,
            top_words,
            top_n: self.top_n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn engine() -> AnalysisEngine {
        AnalysisEngine::new(&Config::default().analysis)
    }

    #[test]
    fn test_docx_style_text() {
        let analysis = engine().analyze(ExtractedText::new("Hello world\nHello again".to_string()));
        assert_eq!(analysis.frequencies.get("hello"), Some(2));
        assert_eq!(analysis.frequencies.get("world"), Some(1));
        assert_eq!(analysis.frequencies.get("again"), Some(1));
        assert_eq!(analysis.top_words.len(), 3);
        assert_eq!(analysis.top_words[0].word, "hello");
        assert_eq!(analysis.total_tokens, 4);
        assert_eq!(analysis.distinct_tokens, 3);
        assert_eq!(analysis.max_count(), 2);
    }

    #[test]
    fn test_empty_text_is_degenerate_not_error() {
        let analysis = engine().analyze(ExtractedText::new(String::new()));
        assert!(analysis.is_empty());
        assert!(analysis.top_words.is_empty());
        assert_eq!(analysis.preview, "");
        assert_eq!(analysis.max_count(), 0);
    }

    #[test]
    fn test_analysis_is_repeatable() {
        let text = "the quick brown fox jumps over the lazy dog the end fox";
        let first = engine().analyze(ExtractedText::new(text.to_string()));
        let second = engine().analyze(ExtractedText::new(text.to_string()));
        assert_eq!(first, second);
    }

    #[test]
    fn test_top_n_respects_config() {
        let config = AnalysisConfig { top_n: 2, preview_chars: 5 };
        let analysis = AnalysisEngine::new(&config)
            .analyze(ExtractedText::new("one two three two three three".to_string()));
        let words: Vec<&str> = analysis.top_words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(words, vec!["three", "two"]);
        assert_eq!(analysis.preview, "one t...");
    }
}
