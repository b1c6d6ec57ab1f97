//! Color palette tables
//!
//! Every palette is a short list of opaque colors. One of them is picked as
//! the background, the remaining ones are handed to the layers as foreground
//! colors.

use crate::error::{Error, Result};
use image::Rgba;
use rand::Rng;
use rand::seq::SliceRandom;

/// A named list of colors
#[derive(Debug, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub colors: &'static [Rgba<u8>],
}

const fn rgb(hex: u32) -> Rgba<u8> {
    Rgba([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 255])
}

/// All palettes, in the order the palette menu lists them
#[rustfmt::skip]
pub static PALETTES: [Palette; 32] = [
    Palette { name: "Forest", colors: &[rgb(0x323232), rgb(0x295f4e), rgb(0x6db193), rgb(0xf4e5c2)] },
    Palette { name: "Futuristic", colors: &[rgb(0x222831), rgb(0x393e46), rgb(0x00adb5), rgb(0xeeeeee)] },
    Palette { name: "Sunset", colors: &[rgb(0xf9ed69), rgb(0xf08a5d), rgb(0xb83b5e), rgb(0x6a2c70)] },
    Palette { name: "Vintage", colors: &[rgb(0xf85f73), rgb(0xfbe8d3), rgb(0x928a97), rgb(0x283c63)] },
    Palette { name: "Crimson", colors: &[rgb(0x0f1021), rgb(0xd01257), rgb(0xfb90b7), rgb(0xffcee4)] },
    Palette { name: "Vampire", colors: &[rgb(0x34374c), rgb(0x2c2e3e), rgb(0xee2b47), rgb(0xf6f6f6)] },
    Palette { name: "Lightning", colors: &[rgb(0xf3f3f3), rgb(0xffdd67), rgb(0xffcd38), rgb(0x4a4a4a)] },
    Palette { name: "Pastel", colors: &[rgb(0x8fcfd1), rgb(0xdf5e88), rgb(0xf6ab6c), rgb(0xf6efa6)] },
    Palette { name: "Lava", colors: &[rgb(0x2f2519), rgb(0x4a3f35), rgb(0xfa7d09), rgb(0xff4301)] },
    Palette { name: "Neon", colors: &[rgb(0x0c093c), rgb(0xdf42d1), rgb(0xeea5f6), rgb(0xfad6d6)] },
    Palette { name: "Lilac", colors: &[rgb(0xf0e3ff), rgb(0xd89cf6), rgb(0x916dd5), rgb(0x3e206d)] },
    Palette { name: "Soft Gray", colors: &[rgb(0x3c4245), rgb(0x5f6769), rgb(0x719192), rgb(0xdfcdc3)] },
    Palette { name: "Low Saturation", colors: &[rgb(0x333644), rgb(0x84577c), rgb(0xc65f63), rgb(0xf6e1b8)] },
    Palette { name: "Poison", colors: &[rgb(0x151716), rgb(0x3e432e), rgb(0x616f39), rgb(0xa7d129)] },
    // The later Spring definition replaced the earlier one but kept its slot
    Palette { name: "Spring", colors: &[rgb(0x040926), rgb(0x251351), rgb(0x7d2e68), rgb(0xa85751), rgb(0xc97b84)] },
    Palette { name: "Black & White", colors: &[rgb(0x262626), rgb(0x595959), rgb(0xb0b0b0), rgb(0xe3e3e3)] },
    Palette { name: "Corruption", colors: &[rgb(0x6f4a8e), rgb(0x221f3b), rgb(0x050505), rgb(0xebebeb)] },
    Palette { name: "Ivy", colors: &[rgb(0x1fab89), rgb(0x62d2a2), rgb(0x9df3c4), rgb(0xd7fbe8)] },
    Palette { name: "Ocean", colors: &[rgb(0x73f7dd), rgb(0x2cc4cb), rgb(0x1972a4), rgb(0x2e3a87)] },
    Palette { name: "Royalty", colors: &[rgb(0xfcf0c8), rgb(0xf7d098), rgb(0x911f27), rgb(0x630a10)] },
    Palette { name: "Transit", colors: &[rgb(0x5bcefa), rgb(0xf5a9b8), rgb(0xffffff)] },
    Palette {
        name: "Lipstick",
        colors: &[
            rgb(0xd52d00), rgb(0xef7627), rgb(0xff9a56), rgb(0xffffff),
            rgb(0xd162a4), rgb(0xb55690), rgb(0xa30262),
        ],
    },
    Palette {
        name: "Beach",
        colors: &[
            rgb(0x73f7dd), rgb(0x2cc4cb), rgb(0x1972a4), rgb(0x2e3a87),
            rgb(0xfcf0c8), rgb(0xf7d098), rgb(0x911f27), rgb(0x630a10),
        ],
    },
    Palette { name: "Rose", colors: &[rgb(0x6f58c9), rgb(0x7e78d2), rgb(0xb6b8d6), rgb(0xbbdbd1), rgb(0xbdede0)] },
    Palette { name: "Rainforest", colors: &[rgb(0x00241b), rgb(0x4e878c), rgb(0x65b891), rgb(0x93e5ab), rgb(0xb5ffe1)] },
    Palette { name: "Halloween", colors: &[rgb(0x5e503f), rgb(0xa9927d), rgb(0xf2f4f3), rgb(0x22333b), rgb(0x0a0908)] },
    Palette { name: "Autumn", colors: &[rgb(0xc3e991), rgb(0xdfcc74), rgb(0xcb904d), rgb(0x75485e), rgb(0x51a3a3)] },
    Palette { name: "Bright", colors: &[rgb(0x89fc00), rgb(0x008bf8), rgb(0xdc0073), rgb(0xf5b700), rgb(0x04e762)] },
    Palette { name: "Pistacho", colors: &[rgb(0x3c1742), rgb(0xf3ffb9), rgb(0xc42021), rgb(0x6c0e23), rgb(0x561643)] },
    Palette { name: "Steal Teal", colors: &[rgb(0x492c1d), rgb(0x5b5750), rgb(0x6b7f82), rgb(0x7c99b4), rgb(0x8eb8e5)] },
    Palette { name: "Violet Desert", colors: &[rgb(0x18020c), rgb(0x634b66), rgb(0x9590a8), rgb(0xbbcbcb), rgb(0xe5ffde)] },
    Palette { name: "Verve", colors: &[rgb(0xa2666f), rgb(0xf49390), rgb(0xf45866), rgb(0xc45ab3), rgb(0x631a86)] },
];

impl Palette {
    /// Look up a palette by its display name
    pub fn by_name(name: &str) -> Result<&'static Palette> {
        PALETTES
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| Error::UnknownPalette(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Parse a `#RRGGBB` string into an opaque color
///
/// The leading `#` is optional and digits are case-insensitive.
pub fn parse_hex(hex: &str) -> Result<Rgba<u8>> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidColor(hex.to_string()));
    }
    let value =
        u32::from_str_radix(digits, 16).map_err(|_| Error::InvalidColor(hex.to_string()))?;
    Ok(rgb(value))
}

/// Format a color as `#rrggbb`, ignoring alpha
pub fn to_hex(color: Rgba<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}

/// The palette currently in use, the chosen background and their locks
#[derive(Debug, Clone, Copy)]
pub struct PaletteState {
    palette: &'static Palette,
    background_index: usize,
    /// Keeps the palette when randomizing
    pub palette_locked: bool,
    /// Keeps the background index when randomizing
    pub background_locked: bool,
}

impl PaletteState {
    /// Pick a random palette and a random background within it
    pub fn random(rng: &mut impl Rng) -> Self {
        let palette = random_palette(rng);
        Self {
            palette,
            background_index: rng.gen_range(0..palette.len()),
            palette_locked: false,
            background_locked: false,
        }
    }

    pub fn palette(&self) -> &'static Palette {
        self.palette
    }

    pub fn background_index(&self) -> usize {
        self.background_index
    }

    /// Switch to the named palette
    ///
    /// The background index is kept when it still fits the new palette,
    /// otherwise a new one is drawn.
    pub fn select(&mut self, name: &str, rng: &mut impl Rng) -> Result<()> {
        self.palette = Palette::by_name(name)?;
        self.fit_background(rng);
        Ok(())
    }

    pub fn set_background_index(&mut self, index: usize) -> Result<()> {
        if index >= self.palette.len() {
            return Err(Error::BackgroundIndex {
                index,
                len: self.palette.len(),
            });
        }
        self.background_index = index;
        Ok(())
    }

    /// Re-draw whatever is not locked
    pub fn randomize(&mut self, rng: &mut impl Rng) {
        if !self.palette_locked {
            self.palette = random_palette(rng);
            self.fit_background(rng);
        }
        if !self.background_locked {
            self.background_index = rng.gen_range(0..self.palette.len());
        }
    }

    pub fn background_color(&self) -> Rgba<u8> {
        self.palette.colors[self.background_index]
    }

    /// Palette colors minus every entry equal to the background
    ///
    /// Falls back to the background color alone so layers always have
    /// something to draw with.
    pub fn foreground_colors(&self) -> Vec<Rgba<u8>> {
        let background = self.background_color();
        let colors: Vec<_> = self
            .palette
            .colors
            .iter()
            .copied()
            .filter(|c| *c != background)
            .collect();

        if colors.is_empty() {
            vec![background]
        } else {
            colors
        }
    }

    fn fit_background(&mut self, rng: &mut impl Rng) {
        if self.background_index >= self.palette.len() {
            self.background_index = rng.gen_range(0..self.palette.len());
        }
    }
}

fn random_palette(rng: &mut impl Rng) -> &'static Palette {
    // PALETTES is a non-empty static table
    PALETTES.choose(rng).unwrap_or(&PALETTES[0])
}
