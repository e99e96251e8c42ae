//! Continuous colormaps and color parsing

use crate::error::{Result, TextAnalyzerError};
use image::Rgba;

pub struct Colormap {
    stops: &'static [[u8; 3]],
}

pub const VIRIDIS: Colormap = Colormap {
    stops: &[
        [68, 1, 84],
        [71, 44, 122],
        [59, 81, 139],
        [44, 113, 142],
        [33, 144, 141],
        [39, 173, 129],
        [92, 200, 99],
        [170, 220, 50],
        [253, 231, 37],
    ],
};

pub const YLGNBU: Colormap = Colormap {
    stops: &[
        [255, 255, 217],
        [237, 248, 177],
        [199, 233, 180],
        [127, 205, 187],
        [65, 182, 196],
        [29, 145, 192],
        [34, 94, 168],
        [37, 52, 148],
        [8, 29, 88],
    ],
};

impl Colormap {
    /// Color at `t` in [0, 1], linearly interpolated between evenly spaced stops
    pub fn sample(&self, t: f32) -> Rgba<u8> {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let last = self.stops.len() - 1;
        let scaled = t * last as f32;
        let lower = (scaled.floor() as usize).min(last);
        let upper = (lower + 1).min(last);
        let frac = scaled - lower as f32;

        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * frac).round() as u8;
        let (a, b) = (self.stops[lower], self.stops[upper]);
        Rgba([lerp(a[0], b[0]), lerp(a[1], b[1]), lerp(a[2], b[2]), 255])
    }

    /// `n` discrete colors, sampled at the interior points of an even split so
    /// neither extreme of the map is used
    pub fn palette(&self, n: usize) -> Vec<Rgba<u8>> {
        (0..n)
            .map(|i| self.sample((i + 1) as f32 / (n + 1) as f32))
            .collect()
    }
}

/// Perceived brightness in [0, 1]
pub fn luminance(color: Rgba<u8>) -> f32 {
    let [r, g, b, _] = color.0;
    (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32) / 255.0
}

/// Parse a color name or `#rrggbb` hex string
pub fn parse_color(value: &str) -> Result<Rgba<u8>> {
    let named = match value.trim().to_lowercase().as_str() {
        "white" => Some([255, 255, 255]),
        "black" => Some([0, 0, 0]),
        "gray" | "grey" => Some([128, 128, 128]),
        "lightgray" | "lightgrey" => Some([211, 211, 211]),
        "ivory" => Some([255, 255, 240]),
        "navy" => Some([0, 0, 128]),
        _ => None,
    };
    if let Some([r, g, b]) = named {
        return Ok(Rgba([r, g, b, 255]));
    }

    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(TextAnalyzerError::Configuration(format!("Unknown color: {}", value)));
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16)
        .map_err(|e| TextAnalyzerError::Configuration(format!("Bad color '{}': {}", value, e)));
    Ok(Rgba([channel(0)?, channel(2)?, channel(4)?, 255]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_endpoints() {
        assert_eq!(VIRIDIS.sample(0.0), Rgba([68, 1, 84, 255]));
        assert_eq!(VIRIDIS.sample(1.0), Rgba([253, 231, 37, 255]));
        assert_eq!(YLGNBU.sample(-3.0), YLGNBU.sample(0.0));
        assert_eq!(YLGNBU.sample(f32::NAN), YLGNBU.sample(0.0));
    }

    #[test]
    fn test_ylgnbu_darkens() {
        let light = luminance(YLGNBU.sample(0.1));
        let dark = luminance(YLGNBU.sample(0.9));
        assert!(light > dark);
    }

    #[test]
    fn test_palette_avoids_extremes() {
        let palette = VIRIDIS.palette(3);
        assert_eq!(palette.len(), 3);
        assert_ne!(palette[0], VIRIDIS.sample(0.0));
        assert_ne!(palette[2], VIRIDIS.sample(1.0));
        assert_eq!(palette[1], VIRIDIS.sample(0.5));
        assert!(VIRIDIS.palette(0).is_empty());
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("white").unwrap(), Rgba([255, 255, 255, 255]));
        assert_eq!(parse_color("#1d91C0").unwrap(), Rgba([29, 145, 192, 255]));
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("chartreuse-ish").is_err());
    }
}
