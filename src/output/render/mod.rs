//! Raster visualizations: word cloud, bar chart, and heatmap

pub mod bar_chart;
pub mod canvas;
pub mod colormap;
pub mod font;
pub mod heatmap;
pub mod wordcloud;

use crate::config::{ChartConfig, Config, WordCloudConfig};
use crate::error::Result;
use crate::processing::analyzer::TextAnalysis;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use font::FontFace;
use log::{debug, info};
use serde::Serialize;
use std::sync::Arc;
use wordcloud::WordCloudBuilder;

pub const TICK_FONT_SIZE: f32 = 12.0;
pub const LABEL_FONT_SIZE: f32 = 14.0;

/// Pixel bounds of a chart's drawing area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl PlotArea {
    pub fn width(&self) -> f32 {
        (self.right - self.left).max(0.0)
    }

    pub fn height(&self) -> f32 {
        (self.bottom - self.top).max(0.0)
    }
}

/// Evenly spaced integer ticks from 0 up to the first round value at or above `max_value`.
pub fn nice_axis(max_value: usize, target_ticks: usize) -> Vec<usize> {
    if max_value == 0 {
        return vec![0, 1];
    }
    let raw_step = max_value as f64 / target_ticks.max(1) as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let residual = raw_step / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    let step = ((nice * magnitude).round() as usize).max(1);
    let upper = max_value.div_ceil(step) * step;
    (0..=upper).step_by(step).collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedImage {
    pub width: u32,
    pub height: u32,
    #[serde(skip)]
    pub png: Vec<u8>,
}

impl RenderedImage {
    pub fn data_uri(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedVisuals {
    pub word_cloud: RenderedImage,
    pub bar_chart: RenderedImage,
    pub heatmap: RenderedImage,
}

/// Renders all three visuals from one analysis.
pub struct Renderer {
    face: Arc<FontFace>,
    wordcloud: WordCloudConfig,
    charts: ChartConfig,
}

impl Renderer {
    pub fn new(face: Arc<FontFace>, config: &Config) -> Self {
        Self {
            face,
            wordcloud: config.wordcloud.clone(),
            charts: config.charts.clone(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let face = FontFace::load(&config.render)?;
        debug!("Rendering with {}", face.source().display());
        Ok(Self::new(Arc::new(face), config))
    }

    pub fn render_all(&self, analysis: &TextAnalysis) -> Result<RenderedVisuals> {
        let face = self.face.as_ref();

        let builder = WordCloudBuilder::new(&self.wordcloud);
        let cloud_layout = builder.layout(&analysis.frequencies, face);
        info!("Word cloud placed {} of {} words", cloud_layout.words.len(), analysis.distinct_tokens);
        let word_cloud = encode(builder.render(&cloud_layout, face)?)?;

        let bars = bar_chart::layout(&analysis.top_words, self.charts.width, self.charts.height, face);
        let bar_chart = encode(bar_chart::render(&bars, face)?)?;

        let cells = heatmap::layout(&analysis.top_words, self.charts.width, self.charts.height, face);
        let heatmap = encode(heatmap::render(&cells, face)?)?;

        Ok(RenderedVisuals {
            word_cloud,
            bar_chart,
            heatmap,
        })
    }
}

fn encode(canvas: canvas::Canvas) -> Result<RenderedImage> {
    Ok(RenderedImage {
        width: canvas.width(),
        height: canvas.height(),
        png: canvas.to_png()?,
    })
}
