use crate::composite::composite;
use crate::config::{ArtConfig, LAYER_COUNT};
use crate::error::Result;
use crate::layer::Layer;
use crate::overlay::TextOverlay;
use crate::palette::PaletteState;
use image::{ImageFormat, RgbaImage};
use log::info;
use rand::Rng;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Everything needed to reproduce one piece
///
/// Rendering is a pure function of the palette, the layer settings, the
/// canvas config, the overlay and `seed`.
#[derive(Debug, Clone)]
pub struct Artwork {
    pub config: ArtConfig,
    pub palette: PaletteState,
    pub layers: [Layer; LAYER_COUNT],
    pub seed: u64,
    /// Caption drawn over the composite, never randomized
    pub overlay: TextOverlay,
}

impl Artwork {
    /// Random palette, random layers, random seed
    pub fn random(config: ArtConfig, rng: &mut impl Rng) -> Self {
        Self {
            config,
            palette: PaletteState::random(rng),
            layers: std::array::from_fn(|_| Layer::random(rng)),
            seed: rng.r#gen(),
            overlay: TextOverlay::default(),
        }
    }

    /// Randomize every unlocked setting and pick a new seed
    pub fn randomize(&mut self, rng: &mut impl Rng) {
        self.palette.randomize(rng);
        for layer in &mut self.layers {
            layer.randomize(rng);
        }
        self.seed = rng.r#gen();
    }

    /// Keep the settings, pick a new seed
    pub fn reseed(&mut self, rng: &mut impl Rng) {
        self.seed = rng.r#gen();
    }

    /// Seed for one layer, derived from the artwork seed
    fn layer_seed(&self, index: usize) -> u64 {
        // splitmix64 step so neighbouring layers do not share streams
        let mut z = self
            .seed
            .wrapping_add((index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Render the artwork at the configured resolution
    ///
    /// Layers are drawn in parallel, then composited over the background in
    /// layer order. The text overlay goes on last.
    pub fn render(&self) -> Result<RgbaImage> {
        self.config.validate()?;
        for layer in &self.layers {
            layer.settings.validate()?;
        }
        self.overlay.validate()?;

        let start = Instant::now();
        let canvas = self.config.dimensions();
        let colors = self.palette.foreground_colors();

        let surfaces: Vec<(RgbaImage, u8)> = self
            .layers
            .par_iter()
            .enumerate()
            .map(|(index, layer)| {
                let surface = layer.draw(canvas, &colors, self.layer_seed(index));
                (surface, layer.settings.transparency)
            })
            .collect();

        let mut output = composite(self.palette.background_color(), canvas, &surfaces)?;
        self.overlay.apply(&mut output);

        info!(
            "rendered {}x{} with palette {} (seed {:#018x}) in {:.1} ms",
            canvas.0,
            canvas.1,
            self.palette.palette().name,
            self.seed,
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(output)
    }

    /// Render and save as PNG, appending `.png` if the path lacks it
    ///
    /// # Returns
    /// The path actually written
    pub fn export_png(&self, path: &Path) -> Result<PathBuf> {
        save_png(&self.render()?, path)
    }
}

/// Save an already rendered image as PNG, appending `.png` if needed
///
/// # Returns
/// The path actually written
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<PathBuf> {
    let path = png_path(path);
    image.save_with_format(&path, ImageFormat::Png)?;
    info!(
        "exported {}x{} to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(path)
}

fn png_path(path: &Path) -> PathBuf {
    let is_png = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if is_png {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_owned();
        name.push(".png");
        PathBuf::from(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Shape;
    use crate::style::Style;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn small_config() -> ArtConfig {
        ArtConfig {
            width: 240,
            height: 135,
        }
    }

    fn artwork(seed: u64) -> Artwork {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut art = Artwork::random(small_config(), &mut rng);
        for layer in &mut art.layers {
            layer.settings.size = 60;
        }
        art
    }

    #[test]
    fn test_render_dimensions_and_opacity() {
        let out = artwork(1).render().unwrap();
        assert_eq!(out.dimensions(), (240, 135));
        assert!(out.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn test_render_is_deterministic() {
        let art = artwork(2);
        assert_eq!(art.render().unwrap(), art.render().unwrap());
    }

    #[test]
    fn test_reseed_keeps_settings() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut art = artwork(3);
        let layers = art.layers;
        let palette = art.palette.palette().name;
        let seed = art.seed;

        art.reseed(&mut rng);
        assert_eq!(art.layers, layers);
        assert_eq!(art.palette.palette().name, palette);
        assert_ne!(art.seed, seed);
    }

    #[test]
    fn test_randomize_honours_locks() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut art = artwork(4);
        art.palette.palette_locked = true;
        art.palette.background_locked = true;
        for layer in &mut art.layers {
            layer.locks = crate::layer::LayerLocks {
                style: true,
                shape: true,
                complexity: true,
                size: true,
                transparency: true,
            };
        }
        let before = art.clone();

        art.randomize(&mut rng);
        assert_eq!(art.layers, before.layers);
        assert_eq!(art.palette.palette(), before.palette.palette());
        assert_eq!(art.palette.background_index(), before.palette.background_index());
    }

    #[test]
    fn test_randomize_and_reseed_keep_overlay() {
        let mut rng = StdRng::seed_from_u64(10);
        let mut art = artwork(10);
        art.overlay.text = "Untitled No. 3".to_string();
        art.overlay.font_size = 64.0;
        art.overlay.x = 0.3;
        art.overlay.y = 0.7;
        art.overlay.color = image::Rgba([12, 34, 56, 255]);
        let before = art.overlay.clone();

        for _ in 0..10 {
            art.randomize(&mut rng);
            art.reseed(&mut rng);
        }
        assert_eq!(art.overlay.text, before.text);
        assert_eq!(art.overlay.font_size, before.font_size);
        assert_eq!((art.overlay.x, art.overlay.y), (before.x, before.y));
        assert_eq!(art.overlay.color, before.color);
    }

    #[test]
    fn test_overlay_without_font_leaves_render_unchanged() {
        let mut art = artwork(11);
        let plain = art.render().unwrap();
        art.overlay.text = "caption".to_string();
        assert_eq!(art.render().unwrap(), plain);
    }

    #[test]
    fn test_invalid_overlay_fails_render() {
        let mut art = artwork(12);
        art.overlay.x = 2.0;
        assert!(matches!(art.render(), Err(crate::Error::InvalidConfig(_))));
    }

    #[test]
    fn test_out_of_range_complexity_fails_render() {
        for complexity in [0, 200_000] {
            let mut art = artwork(13);
            art.layers[1].settings.complexity = complexity;
            assert!(matches!(art.render(), Err(crate::Error::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_invisible_layers_leave_background() {
        let mut art = artwork(5);
        for layer in &mut art.layers {
            layer.settings.transparency = 0;
        }
        let out = art.render().unwrap();
        let bg = art.palette.background_color();
        assert!(out.pixels().all(|p| *p == bg));
    }

    #[test]
    fn test_dense_opaque_mosaic_hides_background() {
        let mut art = artwork(6);
        art.palette.select("Forest", &mut StdRng::seed_from_u64(0)).unwrap();
        art.palette.set_background_index(0).unwrap();

        for layer in &mut art.layers {
            layer.settings.style = Style::Mosaic;
            layer.settings.shape = Shape::Squares;
            layer.settings.complexity = 30;
            layer.settings.size = 400;
            layer.settings.transparency = 255;
        }
        // Even the smallest square is wider and taller than a mosaic cell
        let out = art.render().unwrap();
        let bg = art.palette.background_color();
        assert!(out.pixels().all(|p| *p != bg));
    }

    #[test]
    fn test_layer_seeds_differ() {
        let art = artwork(7);
        assert_ne!(art.layer_seed(0), art.layer_seed(1));
        assert_ne!(art.layer_seed(1), art.layer_seed(2));
    }

    #[test]
    fn test_invalid_config_fails_render() {
        let mut art = artwork(8);
        art.config.width = 0;
        assert!(art.render().is_err());
    }

    #[test]
    fn test_png_path() {
        assert_eq!(png_path(Path::new("art.png")), PathBuf::from("art.png"));
        assert_eq!(png_path(Path::new("art.PNG")), PathBuf::from("art.PNG"));
        assert_eq!(png_path(Path::new("out/art")), PathBuf::from("out/art.png"));
        assert_eq!(png_path(Path::new("art.jpg")), PathBuf::from("art.jpg.png"));
    }

    #[test]
    fn test_export_png_writes_file() {
        let dir = std::env::temp_dir().join(format!("layerart-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let written = artwork(9).export_png(&dir.join("piece")).unwrap();
        assert_eq!(written, dir.join("piece.png"));

        let loaded = image::open(&written).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (240, 135));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_png_keeps_rendered_pixels() {
        let dir = std::env::temp_dir().join(format!("layerart-save-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let rendered = artwork(14).render().unwrap();
        let written = save_png(&rendered, &dir.join("cached.png")).unwrap();
        assert_eq!(written, dir.join("cached.png"));
        assert_eq!(image::open(&written).unwrap().to_rgba8(), rendered);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
