//! Uploaded document blobs

use crate::error::Result;
use crate::input::file_detector::DocumentFormat;
use serde::{Deserialize, Serialize};

/// A document as received from the user: its declared name, the format resolved
/// from that name, and the raw bytes. Lives for a single analysis.
#[derive(Debug, Clone)]
pub struct Document {
    pub name: String,
    pub format: DocumentFormat,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub name: String,
    pub format: DocumentFormat,
    pub size_bytes: usize,
}

impl Document {
    pub fn new(name: impl Into<String>, format: DocumentFormat, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            format,
            bytes,
        }
    }

    /// Build a document from an upload, resolving the format from the file name once.
    pub fn from_upload(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let name = name.into();
        let format = DocumentFormat::from_file_name(&name)?;
        Ok(Self::new(name, format, bytes))
    }

    pub fn info(&self) -> DocumentInfo {
        DocumentInfo {
            name: self.name.clone(),
            format: self.format,
            size_bytes: self.bytes.len(),
        }
    }
}
