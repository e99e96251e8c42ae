//! Single-row heatmap: one annotated cell per top word

use crate::error::Result;
use crate::output::render::canvas::{Canvas, Orientation, AXIS_GRAY, BLACK, WHITE};
use crate::output::render::colormap::{luminance, YLGNBU};
use crate::output::render::font::{FontFace, TextMetrics};
use crate::output::render::{nice_axis, PlotArea, LABEL_FONT_SIZE, TICK_FONT_SIZE};
use crate::processing::text_processor::WordCount;
use image::Rgba;

const ROW_LABEL: &str = "Frequency";
const COLORBAR_WIDTH: f32 = 16.0;
const MIN_ANNOTATION_SIZE: f32 = 6.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub word: String,
    pub count: usize,
    pub x: f32,
    pub width: f32,
    /// Normalized intensity in [0, 1]
    pub intensity: f32,
    pub color: Rgba<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapLayout {
    pub width: u32,
    pub height: u32,
    pub plot: PlotArea,
    pub cells: Vec<Cell>,
    pub annotation_size: f32,
    pub colorbar: PlotArea,
    pub min_count: usize,
    pub max_count: usize,
}

/// Map `count` onto [0, 1] between the smallest and largest value shown.
pub fn normalize(count: usize, min: usize, max: usize) -> f32 {
    if max <= min {
        0.0
    } else {
        (count - min) as f32 / (max - min) as f32
    }
}

pub fn layout<M: TextMetrics>(words: &[WordCount], width: u32, height: u32, metrics: &M) -> HeatmapLayout {
    let min_count = words.iter().map(|w| w.count).min().unwrap_or(0);
    let max_count = words.iter().map(|w| w.count).max().unwrap_or(0);

    let (row_label_width, _) = metrics.text_size(ROW_LABEL, TICK_FONT_SIZE);
    let column_label_height = words
        .iter()
        .map(|w| metrics.text_size(&w.word, TICK_FONT_SIZE).0)
        .fold(0.0f32, f32::max)
        .min(height as f32 * 0.4);
    let tick_label_width = metrics.text_size(&max_count.max(1).to_string(), TICK_FONT_SIZE).0;

    let right_reserved = 16.0 + COLORBAR_WIDTH + 6.0 + tick_label_width + 12.0;
    let plot = PlotArea {
        left: row_label_width + 16.0,
        top: 16.0,
        right: width as f32 - right_reserved,
        bottom: height as f32 - column_label_height - 16.0,
    };
    let colorbar = PlotArea {
        left: plot.right + 16.0,
        top: plot.top,
        right: plot.right + 16.0 + COLORBAR_WIDTH,
        bottom: plot.bottom,
    };

    let cell_width = if words.is_empty() { 0.0 } else { plot.width() / words.len() as f32 };
    let cells: Vec<Cell> = words
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let intensity = normalize(entry.count, min_count, max_count);
            Cell {
                word: entry.word.clone(),
                count: entry.count,
                x: plot.left + cell_width * i as f32,
                width: cell_width,
                intensity,
                color: YLGNBU.sample(intensity),
            }
        })
        .collect();

    // largest annotation size at which every count fits in its cell
    let mut annotation_size = TICK_FONT_SIZE;
    let widest = max_count.to_string();
    while annotation_size > MIN_ANNOTATION_SIZE
        && metrics.text_size(&widest, annotation_size).0 > cell_width - 4.0
    {
        annotation_size -= 1.0;
    }

    HeatmapLayout {
        width,
        height,
        plot,
        cells,
        annotation_size,
        colorbar,
        min_count,
        max_count,
    }
}

pub fn render(layout: &HeatmapLayout, face: &FontFace) -> Result<Canvas> {
    let mut canvas = Canvas::new(layout.width, layout.height, WHITE);
    let plot = &layout.plot;

    if layout.cells.is_empty() {
        canvas.stroke_rect(plot.left as i32, plot.top as i32, plot.width() as i32, plot.height() as i32, AXIS_GRAY);
        canvas.draw_text_centered(
            face,
            "No words to display",
            LABEL_FONT_SIZE,
            plot.left + plot.width() / 2.0,
            plot.top + plot.height() / 2.0,
            AXIS_GRAY,
        );
        return Ok(canvas);
    }

    for cell in &layout.cells {
        let left = cell.x.round() as i32;
        let right = (cell.x + cell.width).round() as i32;
        canvas.fill_rect(left, plot.top as i32, right - left, plot.height() as i32, cell.color);

        let ink = if luminance(cell.color) < 0.5 { WHITE } else { BLACK };
        canvas.draw_text_centered(
            face,
            &cell.count.to_string(),
            layout.annotation_size,
            cell.x + cell.width / 2.0,
            plot.top + plot.height() / 2.0,
            ink,
        );

        let (_, label_height) = face.text_size(&cell.word, TICK_FONT_SIZE);
        canvas.draw_text(
            face,
            &cell.word,
            TICK_FONT_SIZE,
            cell.x + cell.width / 2.0 - label_height / 2.0,
            plot.bottom + 6.0,
            BLACK,
            Orientation::Vertical,
        );
    }

    canvas.draw_text_right(
        face,
        ROW_LABEL,
        TICK_FONT_SIZE,
        plot.left - 8.0,
        plot.top + plot.height() / 2.0,
        BLACK,
    );

    draw_colorbar(&mut canvas, layout, face);
    Ok(canvas)
}

fn draw_colorbar(canvas: &mut Canvas, layout: &HeatmapLayout, face: &FontFace) {
    let bar = &layout.colorbar;
    let top = bar.top.round() as i32;
    let bottom = bar.bottom.round() as i32;
    let span = (bottom - top).max(1) as f32;

    for y in top..=bottom {
        let t = (bottom - y) as f32 / span;
        canvas.hline(bar.left as i32, bar.right as i32, y, YLGNBU.sample(t));
    }
    canvas.stroke_rect(bar.left as i32, top, bar.width() as i32 + 1, bottom - top + 1, AXIS_GRAY);

    let (min, max) = (layout.min_count, layout.max_count);
    let mut ticks: Vec<usize> = nice_axis(max, 5)
        .into_iter()
        .filter(|&value| value >= min && value <= max)
        .collect();
    if ticks.is_empty() {
        ticks.push(max);
    }

    for value in ticks {
        let t = normalize(value, min, max);
        let y = bar.bottom - t * bar.height();
        canvas.hline(bar.right as i32, bar.right as i32 + 3, y.round() as i32, AXIS_GRAY);
        let (_, text_height) = face.text_size("0", TICK_FONT_SIZE);
        canvas.draw_text(
            face,
            &value.to_string(),
            TICK_FONT_SIZE,
            bar.right + 6.0,
            y - text_height / 2.0,
            BLACK,
            Orientation::Horizontal,
        );
    }
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
    fn test_normalize() {
        assert_eq!(normalize(5, 1, 9), 0.5);
        assert_eq!(normalize(9, 1, 9), 1.0);
        assert_eq!(normalize(1, 1, 9), 0.0);
        assert_eq!(normalize(3, 3, 3), 0.0);
    }

    #[test]
    fn test_one_column_per_word_in_order() {
        let top = words(&[("hello", 4), ("world", 2), ("again", 1)]);
        let map = layout(&top, 640, 480, &MonoMetrics);

        assert_eq!(map.cells.len(), 3);
        let order: Vec<&str> = map.cells.iter().map(|c| c.word.as_str()).collect();
        assert_eq!(order, vec!["hello", "world", "again"]);
        assert!(map.cells[0].x < map.cells[1].x);
        assert!((map.cells[0].width - map.cells[2].width).abs() < 1e-3);
    }

    #[test]
    fn test_intensity_tracks_frequency() {
        let top = words(&[("a", 10), ("b", 6), ("c", 2)]);
        let map = layout(&top, 640, 480, &MonoMetrics);
        assert_eq!(map.cells[0].intensity, 1.0);
        assert_eq!(map.cells[2].intensity, 0.0);
        assert!(luminance(map.cells[0].color) < luminance(map.cells[2].color));
    }

    #[test]
    fn test_annotations_shrink_for_narrow_cells() {
        let many: Vec<WordCount> = (0..20)
            .map(|i| WordCount { word: format!("w{}", i), count: 12345 - i })
            .collect();
        let narrow = layout(&many, 320, 240, &MonoMetrics);
        let wide = layout(&many[..2], 640, 480, &MonoMetrics);
        assert!(narrow.annotation_size <= wide.annotation_size);
        assert!(narrow.annotation_size >= MIN_ANNOTATION_SIZE);
    }

    #[test]
    fn test_empty_heatmap() {
        let map = layout(&[], 640, 480, &MonoMetrics);
        assert!(map.cells.is_empty());
        if let Some(face) = system_font() {
            let canvas = render(&map, &face).unwrap();
            assert_eq!((canvas.width(), canvas.height()), (640, 480));
        }
    }

    #[test]
    fn test_render_colors_cells() {
        let Some(face) = system_font() else {
            return;
        };
        let top = words(&[("high", 9), ("low", 1)]);
        let map = layout(&top, 640, 480, &face);
        let canvas = render(&map, &face).unwrap();
        let low = &map.cells[1];
        // sample near the cell's top edge, away from the annotation
        let pixel = canvas.pixel((low.x + 3.0) as u32, (map.plot.top + 3.0) as u32);
        assert_eq!(pixel, low.color);
    }
}
