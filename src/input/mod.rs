//! Input processing module
//! Handles format detection, document loading, and text extraction

pub mod document;
pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use document::{Document, DocumentInfo};
pub use file_detector::DocumentFormat;
pub use manager::InputManager;
