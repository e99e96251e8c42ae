//! Word cloud layout and rendering
//!
//! Every word's font size scales with the square root of its count, so the area
//! it covers grows linearly with frequency. Words are placed largest first along
//! an elliptical spiral from the canvas center; a summed-area table over the
//! occupied pixels rejects any position that would overlap an earlier word.
//! The layout is fully deterministic.

use crate::config::WordCloudConfig;
use crate::error::Result;
use crate::output::render::canvas::{Canvas, Orientation};
use crate::output::render::colormap::{parse_color, VIRIDIS};
use crate::output::render::font::{FontFace, TextMetrics};
use crate::processing::text_processor::{FrequencyTable, WordCount};
use log::debug;

/// Font sizes shrink by this factor when a word does not fit
const SHRINK_FACTOR: f32 = 0.92;
const SPIRAL_TURN_SPACING: f32 = 3.0;
const SPIRAL_ARC_STEP: f32 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub word: String,
    pub count: usize,
    pub font_size: f32,
    /// Top-left of the word's box, margin included
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub orientation: Orientation,
}

impl PlacedWord {
    pub fn overlaps(&self, other: &PlacedWord) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WordCloudLayout {
    pub width: u32,
    pub height: u32,
    pub words: Vec<PlacedWord>,
}

/// Occupied pixels plus their summed-area table for constant-time box queries.
struct OccupancyGrid {
    width: usize,
    height: usize,
    occupied: Vec<bool>,
    sums: Vec<u32>,
}

impl OccupancyGrid {
    fn new(width: u32, height: u32) -> Self {
        let (width, height) = (width as usize, height as usize);
        Self {
            width,
            height,
            occupied: vec![false; width * height],
            sums: vec![0; (width + 1) * (height + 1)],
        }
    }

    fn is_free(&self, x: usize, y: usize, w: usize, h: usize) -> bool {
        if x + w > self.width || y + h > self.height {
            return false;
        }
        let stride = self.width + 1;
        let at = |cx: usize, cy: usize| self.sums[cy * stride + cx];
        at(x + w, y + h) + at(x, y) == at(x, y + h) + at(x + w, y)
    }

    fn occupy(&mut self, x: usize, y: usize, w: usize, h: usize) {
        for row in y..y + h {
            for col in x..x + w {
                self.occupied[row * self.width + col] = true;
            }
        }
        // rows above `y` keep their sums
        let stride = self.width + 1;
        for row in y..self.height {
            let mut row_sum = 0;
            for col in 0..self.width {
                row_sum += self.occupied[row * self.width + col] as u32;
                self.sums[(row + 1) * stride + col + 1] = self.sums[row * stride + col + 1] + row_sum;
            }
        }
    }
}

pub struct WordCloudBuilder<'a> {
    config: &'a WordCloudConfig,
}

impl<'a> WordCloudBuilder<'a> {
    pub fn new(config: &'a WordCloudConfig) -> Self {
        Self { config }
    }

    /// Lay out the most frequent words of the full table.
    pub fn layout<M: TextMetrics>(&self, frequencies: &FrequencyTable, metrics: &M) -> WordCloudLayout {
        let mut ranked = frequencies.ranked();
        ranked.truncate(self.config.max_words);
        self.layout_ranked(&ranked, metrics)
    }

    fn layout_ranked<M: TextMetrics>(&self, ranked: &[WordCount], metrics: &M) -> WordCloudLayout {
        let (width, height) = (self.config.width, self.config.height);
        let mut grid = OccupancyGrid::new(width, height);
        let mut placed = Vec::new();

        let Some(max_count) = ranked.first().map(|w| w.count as f32) else {
            return WordCloudLayout { width, height, words: placed };
        };

        // `base` is the size a word with the top count gets; `cap` keeps sizes
        // non-increasing down the ranking once words start to shrink
        let mut base = self.config.max_font_size.unwrap_or(height as f32);
        let mut cap = base;
        for (rank, entry) in ranked.iter().enumerate() {
            let target = base * (entry.count as f32 / max_count).sqrt();
            let mut size = target.min(cap);

            let preferred = self.preferred_orientation(rank);
            let placement = loop {
                if size < self.config.min_font_size {
                    break None;
                }
                if let Some(found) = self.find_position(&grid, &entry.word, size, preferred, metrics) {
                    break Some(found);
                }
                size *= SHRINK_FACTOR;
            };

            let Some((x, y, w, h, orientation)) = placement else {
                debug!("No room left for '{}'; stopping after {} words", entry.word, placed.len());
                break;
            };

            if rank == 0 {
                base = size;
            }
            cap = size;

            grid.occupy(x as usize, y as usize, w as usize, h as usize);
            placed.push(PlacedWord {
                word: entry.word.clone(),
                count: entry.count,
                font_size: size,
                x,
                y,
                width: w,
                height: h,
                orientation,
            });
        }

        WordCloudLayout { width, height, words: placed }
    }

    /// Spread the configured share of vertical words evenly over the ranks.
    fn preferred_orientation(&self, rank: usize) -> Orientation {
        let vertical_share = 1.0 - self.config.prefer_horizontal;
        let before = (rank as f32 * vertical_share).floor();
        let after = ((rank + 1) as f32 * vertical_share).floor();
        if after > before {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }

    fn find_position<M: TextMetrics>(
        &self,
        grid: &OccupancyGrid,
        word: &str,
        size: f32,
        preferred: Orientation,
        metrics: &M,
    ) -> Option<(u32, u32, u32, u32, Orientation)> {
        let (text_w, text_h) = metrics.text_size(word, size);
        let margin = self.config.margin as f32;
        let box_w = (text_w + 2.0 * margin).ceil() as u32;
        let box_h = (text_h + 2.0 * margin).ceil() as u32;

        let fallback = match preferred {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        };
        [preferred, fallback].into_iter().find_map(|orientation| {
            let (w, h) = match orientation {
                Orientation::Horizontal => (box_w, box_h),
                Orientation::Vertical => (box_h, box_w),
            };
            spiral_search(grid, w, h).map(|(x, y)| (x, y, w, h, orientation))
        })
    }

    pub fn render(&self, layout: &WordCloudLayout, face: &FontFace) -> Result<Canvas> {
        let background = parse_color(&self.config.background)?;
        let mut canvas = Canvas::new(layout.width, layout.height, background);
        let margin = self.config.margin as f32;

        for (rank, placed) in layout.words.iter().enumerate() {
            canvas.draw_text(
                face,
                &placed.word,
                placed.font_size,
                placed.x as f32 + margin,
                placed.y as f32 + margin,
                word_color(rank),
                placed.orientation,
            );
        }
        Ok(canvas)
    }
}

/// Colors walk the viridis map by the golden ratio so neighbours in rank differ.
fn word_color(rank: usize) -> image::Rgba<u8> {
    const GOLDEN: f32 = 0.618_034;
    let t = (0.15 + rank as f32 * GOLDEN).fract();
    VIRIDIS.sample(0.05 + t * 0.85)
}

/// First free top-left corner for a `w`x`h` box along an elliptical spiral from the center.
fn spiral_search(grid: &OccupancyGrid, w: u32, h: u32) -> Option<(u32, u32)> {
    let (width, height) = (grid.width as f32, grid.height as f32);
    if w as f32 > width || h as f32 > height {
        return None;
    }

    let aspect = width / height;
    let (cx, cy) = (width / 2.0, height / 2.0);
    let max_radius = (cy * cy + (cx / aspect) * (cx / aspect)).sqrt() + h as f32;
    let growth = SPIRAL_TURN_SPACING / std::f32::consts::TAU;

    let mut theta = 0.0f32;
    loop {
        let radius = growth * theta;
        if radius > max_radius {
            return None;
        }
        let px = cx + radius * theta.cos() * aspect - w as f32 / 2.0;
        let py = cy + radius * theta.sin() - h as f32 / 2.0;
        if px >= 0.0 && py >= 0.0 {
            let (x, y) = (px.round() as usize, py.round() as usize);
            if grid.is_free(x, y, w as usize, h as usize) {
                return Some((x as u32, y as u32));
            }
        }
        theta += SPIRAL_ARC_STEP / radius.max(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::output::render::font::test_support::{system_font, MonoMetrics};
    use crate::processing::text_processor::TextProcessor;

    fn table(text: &str) -> FrequencyTable {
        TextProcessor::new().word_frequencies(text)
    }

    fn sample_text() -> String {
        let mut text = String::new();
        for (i, word) in ["alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta",
            "iota", "kappa", "lambda", "mu", "nu", "xi", "omicron", "pi", "rho", "sigma"]
            .iter()
            .enumerate()
        {
            for _ in 0..(20 - i) {
                text.push_str(word);
                text.push(' ');
            }
        }
        text
    }

    #[test]
    fn test_grid_queries() {
        let mut grid = OccupancyGrid::new(10, 10);
        assert!(grid.is_free(0, 0, 10, 10));
        grid.occupy(2, 2, 3, 3);
        assert!(!grid.is_free(0, 0, 3, 3));
        assert!(grid.is_free(5, 0, 5, 10));
        assert!(grid.is_free(0, 5, 10, 5));
        assert!(!grid.is_free(4, 4, 1, 1));
        assert!(!grid.is_free(8, 8, 3, 3));
    }

    #[test]
    fn test_layout_has_no_overlaps_and_fits_canvas() {
        let config = Config::default().wordcloud;
        let layout = WordCloudBuilder::new(&config).layout(&table(&sample_text()), &MonoMetrics);

        assert!(!layout.words.is_empty());
        for (i, a) in layout.words.iter().enumerate() {
            assert!(a.x + a.width <= layout.width);
            assert!(a.y + a.height <= layout.height);
            for b in &layout.words[i + 1..] {
                assert!(!a.overlaps(b), "{} overlaps {}", a.word, b.word);
            }
        }
    }

    #[test]
    fn test_larger_counts_get_larger_fonts() {
        let config = Config::default().wordcloud;
        let layout = WordCloudBuilder::new(&config).layout(&table(&sample_text()), &MonoMetrics);

        for pair in layout.words.windows(2) {
            assert!(pair[0].count >= pair[1].count);
            assert!(pair[0].font_size >= pair[1].font_size);
        }
        let first = &layout.words[0];
        assert_eq!(first.word, "alpha");
    }

    #[test]
    fn test_area_tracks_frequency() {
        let mut config = Config::default().wordcloud;
        config.max_font_size = Some(80.0);
        let layout = WordCloudBuilder::new(&config).layout(&table("big big big big small"), &MonoMetrics);
        let big = layout.words.iter().find(|w| w.word == "big").unwrap();
        let small = layout.words.iter().find(|w| w.word == "small").unwrap();
        let ratio = big.font_size / small.font_size;
        assert!((ratio - 2.0).abs() < 0.05, "ratio was {}", ratio);
    }

    #[test]
    fn test_max_words_limit() {
        let mut config = Config::default().wordcloud;
        config.max_words = 5;
        let layout = WordCloudBuilder::new(&config).layout(&table(&sample_text()), &MonoMetrics);
        assert!(layout.words.len() <= 5);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let config = Config::default().wordcloud;
        let builder = WordCloudBuilder::new(&config);
        let frequencies = table(&sample_text());
        assert_eq!(builder.layout(&frequencies, &MonoMetrics), builder.layout(&frequencies, &MonoMetrics));
    }

    #[test]
    fn test_vertical_share() {
        let config = Config::default().wordcloud;
        let builder = WordCloudBuilder::new(&config);
        let vertical = (0..100)
            .filter(|&rank| builder.preferred_orientation(rank) == Orientation::Vertical)
            .count();
        assert!((9..=11).contains(&vertical));

        let mut horizontal_only = config.clone();
        horizontal_only.prefer_horizontal = 1.0;
        let builder = WordCloudBuilder::new(&horizontal_only);
        assert!((0..50).all(|rank| builder.preferred_orientation(rank) == Orientation::Horizontal));
    }

    #[test]
    fn test_empty_table_gives_blank_layout() {
        let config = Config::default().wordcloud;
        let layout = WordCloudBuilder::new(&config).layout(&FrequencyTable::new(), &MonoMetrics);
        assert!(layout.words.is_empty());
        assert_eq!((layout.width, layout.height), (800, 400));
    }

    #[test]
    fn test_render_draws_on_white() {
        let Some(face) = system_font() else {
            return;
        };
        let config = Config::default().wordcloud;
        let builder = WordCloudBuilder::new(&config);

        let blank = builder.render(&builder.layout(&FrequencyTable::new(), &face), &face).unwrap();
        assert_eq!((blank.width(), blank.height()), (800, 400));
        assert_eq!(blank.pixel(400, 200), image::Rgba([255, 255, 255, 255]));

        let layout = builder.layout(&table(&sample_text()), &face);
        let canvas = builder.render(&layout, &face).unwrap();
        let inked = (0..canvas.height())
            .flat_map(|y| (0..canvas.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y) != image::Rgba([255, 255, 255, 255]))
            .count();
        assert!(inked > 0);
    }
}
