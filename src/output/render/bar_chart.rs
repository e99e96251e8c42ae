//! Horizontal bar chart of the most frequent words

use crate::error::Result;
use crate::output::render::canvas::{Canvas, Orientation, AXIS_GRAY, BLACK, GRID_GRAY, WHITE};
use crate::output::render::colormap::VIRIDIS;
use crate::output::render::font::{FontFace, TextMetrics};
use crate::output::render::{nice_axis, PlotArea, LABEL_FONT_SIZE, TICK_FONT_SIZE};
use crate::processing::text_processor::WordCount;
use image::Rgba;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub word: String,
    pub count: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Rgba<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChartLayout {
    pub width: u32,
    pub height: u32,
    pub plot: PlotArea,
    pub bars: Vec<Bar>,
    /// (value, x position) of each x-axis tick
    pub ticks: Vec<(usize, f32)>,
}

/// Lay out one bar per word, first word on top, bar length proportional to its count.
pub fn layout<M: TextMetrics>(words: &[WordCount], width: u32, height: u32, metrics: &M) -> BarChartLayout {
    let label_width = words
        .iter()
        .map(|w| metrics.text_size(&w.word, TICK_FONT_SIZE).0)
        .fold(0.0f32, f32::max)
        .min(width as f32 * 0.35);
    let (_, tick_height) = metrics.text_size("0", TICK_FONT_SIZE);
    let (_, label_height) = metrics.text_size("Word", LABEL_FONT_SIZE);

    let plot = PlotArea {
        left: label_height + 12.0 + label_width + 8.0,
        top: 16.0,
        right: width as f32 - 24.0,
        bottom: height as f32 - (tick_height + 8.0 + label_height + 12.0),
    };

    let max_count = words.iter().map(|w| w.count).max().unwrap_or(0);
    let axis_values = nice_axis(max_count, 6);
    let axis_max = axis_values.last().copied().unwrap_or(1).max(1) as f32;
    let scale_x = |value: usize| plot.left + plot.width() * value as f32 / axis_max;

    let palette = VIRIDIS.palette(words.len());
    let band = if words.is_empty() { 0.0 } else { plot.height() / words.len() as f32 };
    let bars = words
        .iter()
        .zip(palette)
        .enumerate()
        .map(|(i, (entry, color))| Bar {
            word: entry.word.clone(),
            count: entry.count,
            x: plot.left,
            y: plot.top + band * i as f32 + band * 0.1,
            width: scale_x(entry.count) - plot.left,
            height: band * 0.8,
            color,
        })
        .collect();

    let ticks = axis_values.into_iter().map(|value| (value, scale_x(value))).collect();

    BarChartLayout {
        width,
        height,
        plot,
        bars,
        ticks,
    }
}

pub fn render(layout: &BarChartLayout, face: &FontFace) -> Result<Canvas> {
    let mut canvas = Canvas::new(layout.width, layout.height, WHITE);
    let plot = &layout.plot;

    for &(_, x) in &layout.ticks {
        canvas.vline(x.round() as i32, plot.top as i32, plot.bottom as i32, GRID_GRAY);
    }

    for bar in &layout.bars {
        canvas.fill_rect(
            bar.x.round() as i32,
            bar.y.round() as i32,
            bar.width.round().max(1.0) as i32,
            bar.height.round().max(1.0) as i32,
            bar.color,
        );
        canvas.draw_text_right(
            face,
            &bar.word,
            TICK_FONT_SIZE,
            plot.left - 6.0,
            bar.y + bar.height / 2.0,
            BLACK,
        );
    }

    canvas.stroke_rect(
        plot.left as i32,
        plot.top as i32,
        plot.width() as i32 + 1,
        plot.height() as i32 + 1,
        AXIS_GRAY,
    );

    for &(value, x) in &layout.ticks {
        canvas.vline(x.round() as i32, plot.bottom as i32, plot.bottom as i32 + 4, AXIS_GRAY);
        let (_, tick_height) = face.text_size("0", TICK_FONT_SIZE);
        canvas.draw_text_centered(
            face,
            &value.to_string(),
            TICK_FONT_SIZE,
            x,
            plot.bottom + 6.0 + tick_height / 2.0,
            BLACK,
        );
    }

    let (_, label_height) = face.text_size("Frequency", LABEL_FONT_SIZE);
    canvas.draw_text_centered(
        face,
        "Frequency",
        LABEL_FONT_SIZE,
        plot.left + plot.width() / 2.0,
        layout.height as f32 - 6.0 - label_height / 2.0,
        BLACK,
    );

    let (word_label_width, _) = face.text_size("Word", LABEL_FONT_SIZE);
    canvas.draw_text(
        face,
        "Word",
        LABEL_FONT_SIZE,
        4.0,
        plot.top + plot.height() / 2.0 - word_label_width / 2.0,
        BLACK,
        Orientation::Vertical,
    );

    if layout.bars.is_empty() {
        canvas.draw_text_centered(
            face,
            "No words to display",
            LABEL_FONT_SIZE,
            plot.left + plot.width() / 2.0,
            plot.top + plot.height() / 2.0,
            AXIS_GRAY,
        );
    }

    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::render::font::test_support::{system_font, MonoMetrics};

    fn words(pairs: &[(&str, usize)]) -> Vec<WordCount> {
        pairs
            .iter()
            .map(|&(word, count)| WordCount { word: word.to_string(), count })
            .collect()
    }

    #[test]
    fn test_bars_follow_ranking_top_down() {
        let top = words(&[("hello", 8), ("world", 4), ("again", 2)]);
        let chart = layout(&top, 640, 480, &MonoMetrics);

        assert_eq!(chart.bars.len(), 3);
        assert_eq!(chart.bars[0].word, "hello");
        assert!(chart.bars[0].y < chart.bars[1].y);
        assert!(chart.bars[1].y < chart.bars[2].y);
    }

    #[test]
    fn test_bar_length_is_proportional() {
        let top = words(&[("a", 10), ("b", 5)]);
        let chart = layout(&top, 640, 480, &MonoMetrics);
        let ratio = chart.bars[0].width / chart.bars[1].width;
        assert!((ratio - 2.0).abs() < 1e-3);
        assert!(chart.bars[0].x + chart.bars[0].width <= chart.plot.right + 0.01);
    }

    #[test]
    fn test_ticks_cover_max_count() {
        let top = words(&[("a", 17), ("b", 3)]);
        let chart = layout(&top, 640, 480, &MonoMetrics);
        let last = chart.ticks.last().unwrap().0;
        assert!(last >= 17);
        assert_eq!(chart.ticks[0], (0, chart.plot.left));
    }

    #[test]
    fn test_bar_colors_use_distinct_palette_entries() {
        let top = words(&[("a", 3), ("b", 2), ("c", 1)]);
        let chart = layout(&top, 640, 480, &MonoMetrics);
        assert_ne!(chart.bars[0].color, chart.bars[2].color);
    }

    #[test]
    fn test_empty_chart() {
        let chart = layout(&[], 640, 480, &MonoMetrics);
        assert!(chart.bars.is_empty());
        assert!(!chart.ticks.is_empty());

        if let Some(face) = system_font() {
            let canvas = render(&chart, &face).unwrap();
            assert_eq!((canvas.width(), canvas.height()), (640, 480));
        }
    }

    #[test]
    fn test_render_paints_bars() {
        let Some(face) = system_font() else {
            return;
        };
        let top = words(&[("hello", 2), ("world", 1)]);
        let chart = layout(&top, 640, 480, &face);
        let canvas = render(&chart, &face).unwrap();

        let bar = &chart.bars[0];
        let cx = (bar.x + bar.width / 2.0) as u32;
        let cy = (bar.y + bar.height / 2.0) as u32;
        assert_eq!(canvas.pixel(cx, cy), bar.color);
    }
}
