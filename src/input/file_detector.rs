//! Document format detection

use crate::error::{Result, TextAnalyzerError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "docx"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            _ => None,
        }
    }

    /// Resolve the format from a declared file name. Only the extension is consulted.
    pub fn from_file_name(name: &str) -> Result<Self> {
        let extension = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| TextAnalyzerError::UnsupportedFormat(
                format!("'{}' has no file extension; expected .pdf or .docx", name)
            ))?;

        Self::from_extension(extension).ok_or_else(|| TextAnalyzerError::UnsupportedFormat(
            format!("'.{}' files are not supported; expected .pdf or .docx", extension)
        ))
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Pdf => write!(f, "PDF"),
            DocumentFormat::Docx => write!(f, "DOCX"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_dispatch() {
        assert_eq!(DocumentFormat::from_file_name("report.pdf").unwrap(), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_file_name("Notes.DOCX").unwrap(), DocumentFormat::Docx);
        assert_eq!(DocumentFormat::from_file_name("dir.v2/a.b.pdf").unwrap(), DocumentFormat::Pdf);
    }

    #[test]
    fn test_unsupported_extensions() {
        for name in ["notes.txt", "legacy.doc", "archive.pdf.zip", "README"] {
            assert!(matches!(
                DocumentFormat::from_file_name(name),
                Err(TextAnalyzerError::UnsupportedFormat(_))
            ), "{} should be rejected", name);
        }
    }
}
