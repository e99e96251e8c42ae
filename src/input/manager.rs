//! Input manager: loads documents and routes them to the right extractor

use crate::error::{Result, TextAnalyzerError};
use crate::input::document::Document;
use crate::input::file_detector::DocumentFormat;
use crate::input::text_extractor::{DocxExtractor, PdfExtractor, TextExtractor};
use log::{debug, info};
use std::path::Path;
use std::time::Duration;

pub struct InputManager {
    timeout: Option<Duration>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self { timeout: None }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read a document from disk. The format comes from the file extension only.
    pub async fn load_document(&self, path: &Path) -> Result<Document> {
        if !path.exists() {
            return Err(TextAnalyzerError::InvalidInput(
                format!("File does not exist: {}", path.display())
            ));
        }

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| TextAnalyzerError::InvalidInput(
                format!("Not a file path: {}", path.display())
            ))?;

        let format = DocumentFormat::from_file_name(&name)?;
        let bytes = tokio::fs::read(path).await?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());

        Ok(Document::new(name, format, bytes))
    }

    /// Extract the plain text of a document on a blocking worker, bounded by the
    /// configured timeout.
    pub async fn extract_text(&self, document: Document) -> Result<String> {
        info!("Extracting text from {} document '{}'", document.format, document.name);

        let task = tokio::task::spawn_blocking(move || extract_document(&document));

        let joined = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, task)
                .await
                .map_err(|_| TextAnalyzerError::ExtractionTimeout(limit.as_secs()))?,
            None => task.await,
        };

        match joined {
            Ok(result) => result,
            Err(e) if e.is_panic() => Err(TextAnalyzerError::CorruptDocument(
                "Extractor aborted on malformed content".to_string()
            )),
            Err(e) => Err(e.into()),
        }
    }
}

/// Synchronous extraction, dispatched on the document's resolved format.
pub fn extract_document(document: &Document) -> Result<String> {
    let text = match document.format {
        DocumentFormat::Pdf => PdfExtractor.extract(&document.bytes)?,
        DocumentFormat::Docx => DocxExtractor.extract(&document.bytes)?,
    };
    info!("Extracted {} characters from '{}'", text.chars().count(), document.name);
    Ok(text)
}
