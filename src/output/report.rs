//! Report structure shared by every output format

use crate::input::document::DocumentInfo;
use crate::output::render::RenderedVisuals;
use crate::processing::analyzer::TextAnalysis;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub document: DocumentInfo,
    pub analysis: TextAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visuals: Option<RenderedVisuals>,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub processing_time_ms: u64,
    pub version: String,
}

impl ReportMetadata {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            generated_at: Utc::now(),
            processing_time_ms: elapsed.as_millis() as u64,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl AnalysisReport {
    pub fn new(
        document: DocumentInfo,
        analysis: TextAnalysis,
        visuals: Option<RenderedVisuals>,
        elapsed: Duration,
    ) -> Self {
        Self {
            document,
            analysis,
            visuals,
            metadata: ReportMetadata::new(elapsed),
        }
    }

    pub fn has_visuals(&self) -> bool {
        self.visuals.is_some()
    }
}
