//! Report assembly, visual rendering, and output formatting

pub mod formatter;
pub mod render;
pub mod report;

pub use formatter::{OutputFormatter, PageState, ReportGenerator};
pub use render::{RenderedImage, RenderedVisuals, Renderer};
pub use report::AnalysisReport;
