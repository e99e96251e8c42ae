//! Text extraction from PDF and DOCX documents

use crate::error::{Result, TextAnalyzerError};
use docx_rs::{DocumentChild, Paragraph, ParagraphChild, Run, RunChild};
use log::{debug, warn};

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let document = lopdf::Document::load_mem(bytes).map_err(|e| {
            TextAnalyzerError::CorruptDocument(format!("Failed to open PDF: {}", e))
        })?;

        let pages = document.get_pages();
        debug!("PDF has {} pages", pages.len());

        let page_texts = pages.keys().map(|&page_number| {
            match document.extract_text(&[page_number]) {
                Ok(text) => Some(trim_page_end(text)),
                Err(e) => {
                    warn!("No text layer on page {}: {}", page_number, e);
                    None
                }
            }
        });

        Ok(join_pages(page_texts))
    }
}

/// lopdf closes every text object with a newline; the one ending the page is not
/// part of the page's text.
fn trim_page_end(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
    }
    text
}

/// Concatenate page texts in order. Pages without text contribute nothing, and no
/// separator is inserted between pages.
pub fn join_pages<I>(pages: I) -> String
where
    I: IntoIterator<Item = Option<String>>,
{
    pages.into_iter().map(|page| page.unwrap_or_default()).collect()
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let docx = docx_rs::read_docx(bytes).map_err(|e| {
            TextAnalyzerError::CorruptDocument(format!("Failed to open DOCX: {}", e))
        })?;

        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
                _ => None,
            })
            .collect();
        debug!("DOCX has {} body paragraphs", paragraphs.len());

        Ok(join_paragraphs(&paragraphs))
    }
}

/// Paragraphs are newline-separated; empty paragraphs are kept.
pub fn join_paragraphs<S: AsRef<str>>(paragraphs: &[S]) -> String {
    paragraphs
        .iter()
        .map(|p| p.as_ref())
        .collect::<Vec<_>>()
        .join("\n")
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        push_paragraph_child(child, &mut text);
    }
    text
}

fn push_paragraph_child(child: &ParagraphChild, out: &mut String) {
    match child {
        ParagraphChild::Run(run) => push_run(run, out),
        ParagraphChild::Hyperlink(link) => {
            for nested in &link.children {
                push_paragraph_child(nested, out);
            }
        }
        _ => {}
    }
}

fn push_run(run: &Run, out: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(text) => out.push_str(&text.text),
            RunChild::Tab(_) => out.push('\t'),
            RunChild::Break(_) => out.push('\n'),
            _ => {}
        }
    }
}
