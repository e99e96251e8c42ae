//! End-to-end analysis: document bytes in, complete report out

use crate::config::Config;
use crate::error::Result;
use crate::input::{Document, InputManager};
use crate::output::render::Renderer;
use crate::output::report::AnalysisReport;
use crate::processing::{AnalysisEngine, ExtractedText};
use log::{debug, info};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Runs extraction, counting, and (optionally) rendering for one document at a
/// time. A report is only returned once every stage has succeeded.
pub struct Pipeline {
    input: InputManager,
    engine: AnalysisEngine,
    renderer: Option<Arc<Renderer>>,
}

impl Pipeline {
    /// A pipeline that stops after counting; reports carry no visuals.
    pub fn new(config: &Config) -> Self {
        Self {
            input: InputManager::new().with_timeout(config.extraction_timeout()),
            engine: AnalysisEngine::new(&config.analysis),
            renderer: None,
        }
    }

    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    /// Build a pipeline, loading a font only when visuals are wanted.
    pub fn from_config(config: &Config, render_visuals: bool) -> Result<Self> {
        let pipeline = Self::new(config);
        if render_visuals {
            Ok(pipeline.with_renderer(Renderer::from_config(config)?))
        } else {
            Ok(pipeline)
        }
    }

    pub fn renders_visuals(&self) -> bool {
        self.renderer.is_some()
    }

    pub async fn analyze_file(&self, path: &Path) -> Result<AnalysisReport> {
        let document = self.input.load_document(path).await?;
        self.run(document).await
    }

    pub async fn run(&self, document: Document) -> Result<AnalysisReport> {
        let started = Instant::now();
        let info = document.info();
        info!("Analyzing '{}' ({} bytes)", info.name, info.size_bytes);

        let text = self.input.extract_text(document).await?;
        let analysis = self.engine.analyze(ExtractedText::new(text));

        let (analysis, visuals) = match &self.renderer {
            Some(renderer) => {
                let renderer = Arc::clone(renderer);
                let (analysis, visuals) = tokio::task::spawn_blocking(move || {
                    let visuals = renderer.render_all(&analysis);
                    (analysis, visuals)
                })
                .await?;
                (analysis, Some(visuals?))
            }
            None => {
                debug!("Skipping visuals for '{}'", info.name);
                (analysis, None)
            }
        };

        let elapsed = started.elapsed();
        info!("Finished '{}' in {}ms", info.name, elapsed.as_millis());
        Ok(AnalysisReport::new(info, analysis, visuals, elapsed))
    }
}
