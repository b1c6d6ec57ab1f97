use crate::config::{COMPLEXITY_RANGE, MIN_SHAPE_SIZE, RANDOM_SIZE_RANGE, SIZE_RANGE};
use crate::error::{Error, Result};
use crate::shapes::Shape;
use crate::style::Style;
use image::{Rgba, RgbaImage};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// User-facing knobs for one layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerSettings {
    pub style: Style,
    pub shape: Shape,
    /// Number of shapes, 10-30
    pub complexity: u32,
    /// Largest shape size in pixels, 50-400
    pub size: u32,
    /// Layer opacity, 0 is invisible
    pub transparency: u8,
}

impl LayerSettings {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            style: Style::random(rng),
            shape: Shape::random(rng),
            complexity: rng.gen_range(COMPLEXITY_RANGE),
            size: rng.gen_range(RANDOM_SIZE_RANGE),
            transparency: rng.r#gen(),
        }
    }

    /// Reject a shape count outside the slider range
    pub fn validate(&self) -> Result<()> {
        if !COMPLEXITY_RANGE.contains(&self.complexity) {
            return Err(Error::InvalidConfig(format!(
                "complexity {} outside {}-{}",
                self.complexity,
                COMPLEXITY_RANGE.start(),
                COMPLEXITY_RANGE.end()
            )));
        }
        Ok(())
    }

    /// Shape size bounds `(min, max)` used while drawing
    pub fn size_bounds(&self) -> (u32, u32) {
        let max = self.size.clamp(*SIZE_RANGE.start(), *SIZE_RANGE.end());
        (MIN_SHAPE_SIZE.min(max), max)
    }
}

/// Settings exempt from randomization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayerLocks {
    pub style: bool,
    pub shape: bool,
    pub complexity: bool,
    pub size: bool,
    pub transparency: bool,
}

impl LayerLocks {
    pub fn toggle_style(&mut self) {
        self.style = !self.style;
    }

    pub fn toggle_shape(&mut self) {
        self.shape = !self.shape;
    }

    pub fn toggle_complexity(&mut self) {
        self.complexity = !self.complexity;
    }

    pub fn toggle_size(&mut self) {
        self.size = !self.size;
    }

    pub fn toggle_transparency(&mut self) {
        self.transparency = !self.transparency;
    }
}

/// One generator layer: what to draw and which settings are pinned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layer {
    pub settings: LayerSettings,
    pub locks: LayerLocks,
}

impl Layer {
    pub fn new(settings: LayerSettings) -> Self {
        Self {
            settings,
            locks: LayerLocks::default(),
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::new(LayerSettings::random(rng))
    }

    /// Re-draw every unlocked setting
    pub fn randomize(&mut self, rng: &mut impl Rng) {
        let fresh = LayerSettings::random(rng);
        let settings = &mut self.settings;

        if !self.locks.style {
            settings.style = fresh.style;
        }
        if !self.locks.shape {
            settings.shape = fresh.shape;
        }
        if !self.locks.complexity {
            settings.complexity = fresh.complexity;
        }
        if !self.locks.size {
            settings.size = fresh.size;
        }
        if !self.locks.transparency {
            settings.transparency = fresh.transparency;
        }
    }

    /// Draw this layer onto a fresh transparent surface
    ///
    /// Opacity is left for compositing, so every painted pixel is opaque.
    ///
    /// # Arguments
    /// * `canvas` - Surface width and height
    /// * `colors` - Foreground colors to pick from; nothing is drawn if empty
    /// * `seed` - Seed for placement, colors and shape jitter
    pub fn draw(&self, canvas: (u32, u32), colors: &[Rgba<u8>], seed: u64) -> RgbaImage {
        let mut surface = RgbaImage::new(canvas.0, canvas.1);
        if colors.is_empty() || canvas.0 == 0 || canvas.1 == 0 {
            return surface;
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let settings = &self.settings;
        let (min_size, max_size) = settings.size_bounds();
        let centres = settings
            .style
            .placements(settings.complexity, canvas, &mut rng);

        debug!(
            "drawing {} {} with {} shapes of {}-{}px",
            settings.style,
            settings.shape,
            centres.len(),
            min_size,
            max_size
        );

        for centre in centres {
            let Some(&color) = colors.choose(&mut rng) else {
                break;
            };
            let size = rng.gen_range(min_size..=max_size) as f32;
            settings.shape.draw(&mut surface, centre, size, color, &mut rng);
        }

        surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLORS: [Rgba<u8>; 2] = [Rgba([10, 20, 30, 255]), Rgba([200, 100, 50, 255])];

    fn settings(style: Style, shape: Shape) -> LayerSettings {
        LayerSettings {
            style,
            shape,
            complexity: 15,
            size: 120,
            transparency: 200,
        }
    }

    #[test]
    fn test_random_settings_in_range() {
        let mut rng = StdRng::seed_from_u64(20);
        for _ in 0..200 {
            let s = LayerSettings::random(&mut rng);
            assert!(COMPLEXITY_RANGE.contains(&s.complexity));
            assert!(RANDOM_SIZE_RANGE.contains(&s.size));
        }
    }

    #[test]
    fn test_validate_complexity_range() {
        let mut s = settings(Style::Chaotic, Shape::Circles);
        assert!(s.validate().is_ok());

        s.complexity = *COMPLEXITY_RANGE.start();
        assert!(s.validate().is_ok());
        s.complexity = *COMPLEXITY_RANGE.end();
        assert!(s.validate().is_ok());

        for complexity in [0, 9, 31, 200_000] {
            s.complexity = complexity;
            assert!(matches!(s.validate(), Err(Error::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_random_settings_validate() {
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..100 {
            assert!(LayerSettings::random(&mut rng).validate().is_ok());
        }
    }

    #[test]
    fn test_size_bounds_clamp_min_to_max() {
        let mut s = settings(Style::Chaotic, Shape::Circles);
        assert_eq!(s.size_bounds(), (MIN_SHAPE_SIZE, 120));

        s.size = 50;
        assert_eq!(s.size_bounds(), (50, 50));

        s.size = 10_000;
        assert_eq!(s.size_bounds(), (MIN_SHAPE_SIZE, 400));
    }

    #[test]
    fn test_locks_toggle() {
        let mut locks = LayerLocks::default();
        locks.toggle_size();
        assert!(locks.size);
        locks.toggle_size();
        assert!(!locks.size);
    }

    #[test]
    fn test_randomize_respects_locks() {
        let mut rng = StdRng::seed_from_u64(21);
        let original = settings(Style::Mosaic, Shape::Rings);
        let mut layer = Layer::new(original);
        layer.locks.toggle_style();
        layer.locks.toggle_shape();
        layer.locks.toggle_complexity();
        layer.locks.toggle_size();
        layer.locks.toggle_transparency();

        for _ in 0..50 {
            layer.randomize(&mut rng);
            assert_eq!(layer.settings, original);
        }
    }

    #[test]
    fn test_randomize_partial_lock() {
        let mut rng = StdRng::seed_from_u64(22);
        let mut layer = Layer::new(settings(Style::Mosaic, Shape::Rings));
        layer.locks.shape = true;

        let mut styles = std::collections::HashSet::new();
        for _ in 0..100 {
            layer.randomize(&mut rng);
            assert_eq!(layer.settings.shape, Shape::Rings);
            styles.insert(layer.settings.style);
        }
        assert!(styles.len() > 1);
    }

    #[test]
    fn test_draw_is_transparent_and_deterministic() {
        let layer = Layer::new(settings(Style::Chaotic, Shape::Circles));
        let a = layer.draw((320, 180), &COLORS, 7);
        let b = layer.draw((320, 180), &COLORS, 7);

        assert_eq!(a.dimensions(), (320, 180));
        assert_eq!(a, b);
        assert!(a.pixels().any(|p| p[3] == 255));
        assert!(a.pixels().any(|p| p[3] == 0));
        assert!(a.pixels().all(|p| p[3] == 0 || COLORS.contains(p)));
    }

    #[test]
    fn test_draw_changes_with_seed() {
        let layer = Layer::new(settings(Style::Chaotic, Shape::Squares));
        assert_ne!(
            layer.draw((320, 180), &COLORS, 1),
            layer.draw((320, 180), &COLORS, 2)
        );
    }

    #[test]
    fn test_empty_style_draws_nothing() {
        let layer = Layer::new(settings(Style::Empty, Shape::FilledPolygons));
        let surface = layer.draw((64, 64), &COLORS, 3);
        assert!(surface.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_no_colors_draws_nothing() {
        let layer = Layer::new(settings(Style::Centered, Shape::Dots));
        let surface = layer.draw((64, 64), &[], 3);
        assert!(surface.pixels().all(|p| p[3] == 0));
    }
}
