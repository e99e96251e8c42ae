//! Error handling for the text analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextAnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Could not read document: {0}")]
    CorruptDocument(String),

    #[error("Extraction timed out after {0} seconds")]
    ExtractionTimeout(u64),

    #[error("Rendering error: {0}")]
    Rendering(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),

    #[error("Server error: {0}")]
    Server(String),
}

pub type Result<T> = std::result::Result<T, TextAnalyzerError>;

impl From<image::ImageError> for TextAnalyzerError {
    fn from(err: image::ImageError) -> Self {
        TextAnalyzerError::Rendering(err.to_string())
    }
}

impl From<tokio::task::JoinError> for TextAnalyzerError {
    fn from(err: tokio::task::JoinError) -> Self {
        TextAnalyzerError::Server(format!("Worker task failed: {}", err))
    }
}

impl TextAnalyzerError {
    /// Errors the user can fix by uploading a different file.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            TextAnalyzerError::UnsupportedFormat(_)
                | TextAnalyzerError::CorruptDocument(_)
                | TextAnalyzerError::InvalidInput(_)
                | TextAnalyzerError::ExtractionTimeout(_)
        )
    }
}
