//! Text drawn over the finished composite
//!
//! The overlay belongs to the piece but not to the generator: randomizing or
//! reseeding the artwork never touches it.

use crate::config::FONT_SIZE_RANGE;
use crate::error::{Error, Result};
use ab_glyph::{FontArc, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use log::info;
use std::fmt;
use std::path::Path;

/// Caption settings plus the font used to draw it
#[derive(Clone)]
pub struct TextOverlay {
    pub text: String,
    /// Glyph height in output pixels
    pub font_size: f32,
    /// Left edge of the text as a fraction of the canvas width
    pub x: f32,
    /// Top edge of the text as a fraction of the canvas height
    pub y: f32,
    pub color: Rgba<u8>,
    font: Option<FontArc>,
}

impl Default for TextOverlay {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_size: 120.0,
            x: 0.05,
            y: 0.05,
            color: Rgba([255, 255, 255, 255]),
            font: None,
        }
    }
}

impl fmt::Debug for TextOverlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextOverlay")
            .field("text", &self.text)
            .field("font_size", &self.font_size)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("color", &self.color)
            .field("font_loaded", &self.font.is_some())
            .finish()
    }
}

impl TextOverlay {
    /// Use a TrueType/OpenType font from memory
    pub fn load_font(&mut self, bytes: Vec<u8>) -> Result<()> {
        self.font = Some(FontArc::try_from_vec(bytes)?);
        Ok(())
    }

    /// Read and use a font file
    pub fn load_font_file(&mut self, path: &Path) -> Result<()> {
        let bytes = std::fs::read(path)?;
        self.load_font(bytes)?;
        info!("loaded overlay font {}", path.display());
        Ok(())
    }

    pub fn clear_font(&mut self) {
        self.font = None;
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Whether `apply` would draw anything
    pub fn is_active(&self) -> bool {
        self.font.is_some() && !self.text.trim().is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        if !FONT_SIZE_RANGE.contains(&self.font_size) {
            return Err(Error::InvalidConfig(format!(
                "font size {} outside {}-{}",
                self.font_size,
                FONT_SIZE_RANGE.start(),
                FONT_SIZE_RANGE.end()
            )));
        }
        for (axis, value) in [("x", self.x), ("y", self.y)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfig(format!(
                    "overlay {axis} position {value} outside 0-1"
                )));
            }
        }
        Ok(())
    }

    /// Top-left corner of the text in pixels
    pub fn origin(&self, canvas: (u32, u32)) -> (i32, i32) {
        (
            (self.x * canvas.0 as f32).round() as i32,
            (self.y * canvas.1 as f32).round() as i32,
        )
    }

    /// Draw the text onto a finished image; a no-op without font or text
    pub fn apply(&self, image: &mut RgbaImage) {
        let Some(font) = &self.font else {
            return;
        };
        if self.text.trim().is_empty() {
            return;
        }

        let (x, y) = self.origin(image.dimensions());
        draw_text_mut(
            image,
            self.color,
            x,
            y,
            PxScale::from(self.font_size),
            font,
            &self.text,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> RgbaImage {
        RgbaImage::from_fn(64, 32, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([90, 90, 90, 255])
            }
        })
    }

    #[test]
    fn test_default_is_inactive_and_valid() {
        let overlay = TextOverlay::default();
        assert!(!overlay.is_active());
        assert!(!overlay.has_font());
        assert!(overlay.validate().is_ok());
    }

    #[test]
    fn test_apply_without_font_is_noop() {
        let overlay = TextOverlay {
            text: "hello".to_string(),
            ..TextOverlay::default()
        };
        assert!(!overlay.is_active());

        let mut img = checker();
        overlay.apply(&mut img);
        assert_eq!(img, checker());
    }

    #[test]
    fn test_load_font_rejects_garbage() {
        let mut overlay = TextOverlay::default();
        let err = overlay.load_font(b"not a font".to_vec()).unwrap_err();
        assert!(matches!(err, Error::Font(_)));
        assert!(!overlay.has_font());
    }

    #[test]
    fn test_load_font_file_missing() {
        let mut overlay = TextOverlay::default();
        let path = std::env::temp_dir().join("layerart-no-such-font.ttf");
        assert!(matches!(overlay.load_font_file(&path), Err(Error::Io(_))));
    }

    #[test]
    fn test_validate_ranges() {
        let mut overlay = TextOverlay::default();

        overlay.font_size = *FONT_SIZE_RANGE.end() + 1.0;
        assert!(matches!(overlay.validate(), Err(Error::InvalidConfig(_))));
        overlay.font_size = 0.0;
        assert!(overlay.validate().is_err());
        overlay.font_size = *FONT_SIZE_RANGE.start();
        assert!(overlay.validate().is_ok());

        overlay.x = 1.5;
        assert!(overlay.validate().is_err());
        overlay.x = 1.0;
        overlay.y = -0.1;
        assert!(overlay.validate().is_err());
        overlay.y = f32::NAN;
        assert!(overlay.validate().is_err());
    }

    #[test]
    fn test_origin_scales_with_canvas() {
        let overlay = TextOverlay {
            x: 0.5,
            y: 0.25,
            ..TextOverlay::default()
        };
        assert_eq!(overlay.origin((200, 100)), (100, 25));
        assert_eq!(overlay.origin((3840, 2160)), (1920, 540));

        let corner = TextOverlay {
            x: 1.0,
            y: 1.0,
            ..TextOverlay::default()
        };
        assert_eq!(corner.origin((64, 32)), (64, 32));
    }

    #[test]
    fn test_debug_hides_font_data() {
        let text = format!("{:?}", TextOverlay::default());
        assert!(text.contains("font_loaded: false"));
    }
}
