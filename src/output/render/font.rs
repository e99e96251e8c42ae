//! Font loading and text measurement

use crate::config::RenderConfig;
use crate::error::{Result, TextAnalyzerError};
use log::{debug, info};
use rusttype::{point, Font, Scale};
use std::path::{Path, PathBuf};

const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/TTF/arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Measures rendered text. Word-cloud and chart layout only depend on this, so
/// they can be computed without a real font.
pub trait TextMetrics {
    /// Width and height in pixels of `text` at `size` px
    fn text_size(&self, text: &str, size: f32) -> (f32, f32);
}

pub struct FontFace {
    font: Font<'static>,
    source: PathBuf,
}

impl FontFace {
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).map_err(|e| {
            TextAnalyzerError::Rendering(format!("Cannot read font {}: {}", path.display(), e))
        })?;
        let font = Font::try_from_vec(data).ok_or_else(|| {
            TextAnalyzerError::Rendering(format!("Not a usable TrueType font: {}", path.display()))
        })?;
        Ok(Self {
            font,
            source: path.to_path_buf(),
        })
    }

    /// The configured font, or the first usable system font
    pub fn load(config: &RenderConfig) -> Result<Self> {
        if let Some(path) = &config.font_path {
            let face = Self::from_file(path)?;
            info!("Loaded configured font: {}", path.display());
            return Ok(face);
        }

        for candidate in SYSTEM_FONT_PATHS {
            let path = Path::new(candidate);
            if !path.exists() {
                continue;
            }
            match Self::from_file(path) {
                Ok(face) => {
                    info!("Loaded system font: {}", candidate);
                    return Ok(face);
                }
                Err(e) => debug!("Skipping font {}: {}", candidate, e),
            }
        }

        Err(TextAnalyzerError::Rendering(
            "No usable system font found; set render.font_path in the configuration".to_string(),
        ))
    }

    pub fn font(&self) -> &Font<'static> {
        &self.font
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Distance from the top of the line box to the baseline
    pub fn ascent(&self, size: f32) -> f32 {
        self.font.v_metrics(Scale::uniform(size)).ascent
    }
}

impl TextMetrics for FontFace {
    fn text_size(&self, text: &str, size: f32) -> (f32, f32) {
        let scale = Scale::uniform(size);
        let v_metrics = self.font.v_metrics(scale);
        let width = self
            .font
            .layout(text, scale, point(0.0, 0.0))
            .last()
            .map(|glyph| glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0);
        (width.ceil(), (v_metrics.ascent - v_metrics.descent).ceil())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::TextMetrics;

    /// Fixed-advance metrics for layout tests
    pub struct MonoMetrics;

    impl TextMetrics for MonoMetrics {
        fn text_size(&self, text: &str, size: f32) -> (f32, f32) {
            ((text.chars().count() as f32 * size * 0.6).ceil(), (size * 1.2).ceil())
        }
    }

    /// A system font when one is installed; rendering tests skip otherwise
    pub fn system_font() -> Option<super::FontFace> {
        super::FontFace::load(&crate::config::RenderConfig::default()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_configured_font_is_rendering_error() {
        let config = RenderConfig {
            font_path: Some(PathBuf::from("/nonexistent/font.ttf")),
        };
        assert!(matches!(FontFace::load(&config), Err(TextAnalyzerError::Rendering(_))));
    }

    #[test]
    fn test_invalid_font_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();
        assert!(matches!(FontFace::from_file(&path), Err(TextAnalyzerError::Rendering(_))));
    }

    #[test]
    fn test_system_font_measures_text() {
        let Some(face) = test_support::system_font() else {
            return;
        };
        let (short, height) = face.text_size("ab", 20.0);
        let (long, _) = face.text_size("abcdef", 20.0);
        assert!(long > short);
        assert!(height >= 20.0);
        assert_eq!(face.text_size("", 20.0).0, 0.0);
    }
}
