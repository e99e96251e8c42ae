//! Text processing and analysis module

pub mod document;
pub mod text_processor;
pub mod analyzer;

pub use analyzer::{AnalysisEngine, TextAnalysis};
pub use document::ExtractedText;
pub use text_processor::{FrequencyTable, TextProcessor, WordCount};
