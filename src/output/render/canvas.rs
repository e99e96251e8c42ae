//! Raster drawing surface shared by the word cloud and the charts

use crate::error::Result;
use crate::output::render::font::{FontFace, TextMetrics};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use rusttype::{point, Scale};
use std::io::Cursor;

pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const AXIS_GRAY: Rgba<u8> = Rgba([64, 64, 64, 255]);
pub const GRID_GRAY: Rgba<u8> = Rgba([225, 225, 225, 255]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    /// Rotated 90 degrees counter-clockwise, read bottom to top
    Vertical,
}

pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    /// Alpha-blend `color` onto one pixel; out-of-bounds writes are dropped
    pub fn blend(&mut self, x: i32, y: i32, color: Rgba<u8>, coverage: f32) {
        if x < 0 || y < 0 || x >= self.width() as i32 || y >= self.height() as i32 {
            return;
        }
        let alpha = (coverage * color.0[3] as f32 / 255.0).clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let pixel = self.image.get_pixel_mut(x as u32, y as u32);
        for channel in 0..3 {
            let under = pixel.0[channel] as f32;
            let over = color.0[channel] as f32;
            pixel.0[channel] = (under + (over - under) * alpha).round() as u8;
        }
        pixel.0[3] = 255;
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Rgba<u8>) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + width).min(self.width() as i32);
        let y1 = (y + height).min(self.height() as i32);
        for py in y0..y1 {
            for px in x0..x1 {
                self.image.put_pixel(px as u32, py as u32, color);
            }
        }
    }

    pub fn stroke_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Rgba<u8>) {
        self.hline(x, x + width - 1, y, color);
        self.hline(x, x + width - 1, y + height - 1, color);
        self.vline(x, y, y + height - 1, color);
        self.vline(x + width - 1, y, y + height - 1, color);
    }

    pub fn hline(&mut self, x0: i32, x1: i32, y: i32, color: Rgba<u8>) {
        self.fill_rect(x0.min(x1), y, (x1 - x0).abs() + 1, 1, color);
    }

    pub fn vline(&mut self, x: i32, y0: i32, y1: i32, color: Rgba<u8>) {
        self.fill_rect(x, y0.min(y1), 1, (y1 - y0).abs() + 1, color);
    }

    /// Draw `text` with its line box's top-left corner at (`x`, `y`)
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text(
        &mut self,
        face: &FontFace,
        text: &str,
        size: f32,
        x: f32,
        y: f32,
        color: Rgba<u8>,
        orientation: Orientation,
    ) {
        let scale = Scale::uniform(size);
        let ascent = face.ascent(size);
        let (line_width, _) = face.text_size(text, size);

        for glyph in face.font().layout(text, scale, point(0.0, ascent)) {
            let Some(bounds) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let lx = bounds.min.x + gx as i32;
                let ly = bounds.min.y + gy as i32;
                let (px, py) = match orientation {
                    Orientation::Horizontal => (x.round() as i32 + lx, y.round() as i32 + ly),
                    Orientation::Vertical => (
                        x.round() as i32 + ly,
                        y.round() as i32 + line_width as i32 - 1 - lx,
                    ),
                };
                self.blend(px, py, color, coverage);
            });
        }
    }

    /// Horizontal text centered on (`cx`, `cy`)
    pub fn draw_text_centered(
        &mut self,
        face: &FontFace,
        text: &str,
        size: f32,
        cx: f32,
        cy: f32,
        color: Rgba<u8>,
    ) {
        let (width, height) = face.text_size(text, size);
        self.draw_text(face, text, size, cx - width / 2.0, cy - height / 2.0, color, Orientation::Horizontal);
    }

    /// Horizontal text whose right edge sits at `right`, vertically centered on `cy`
    pub fn draw_text_right(
        &mut self,
        face: &FontFace,
        text: &str,
        size: f32,
        right: f32,
        cy: f32,
        color: Rgba<u8>,
    ) {
        let (width, height) = face.text_size(text, size);
        self.draw_text(face, text, size, right - width, cy - height / 2.0, color, Orientation::Horizontal);
    }

    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(self.image.clone())
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}
