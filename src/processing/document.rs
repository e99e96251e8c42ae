//! Extracted text and its preview

use serde::Serialize;

pub const ELLIPSIS: &str = "...";

/// Plain text of a whole document, pages or paragraphs in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedText {
    content: String,
    character_count: usize,
}

impl ExtractedText {
    pub fn new(content: String) -> Self {
        let character_count = content.chars().count();
        Self {
            content,
            character_count,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn character_count(&self) -> usize {
        self.character_count
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn preview(&self, max_chars: usize) -> String {
        preview(&self.content, max_chars)
    }
}

/// First `max_chars` characters of `text`, with an ellipsis appended only when
/// something was cut off.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}
