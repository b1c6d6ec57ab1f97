//! Placement heuristics
//!
//! A style decides *where* a layer puts its shapes. Each style returns a
//! list of shape centres in canvas coordinates; the shape itself is chosen
//! independently.

use crate::error::Error;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// How shapes are distributed over the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Chaotic,
    StripedHorizontal,
    StripedVertical,
    Mosaic,
    Cornered,
    Centered,
    Empty,
}

impl Style {
    pub const ALL: [Style; 7] = [
        Style::Chaotic,
        Style::StripedHorizontal,
        Style::StripedVertical,
        Style::Mosaic,
        Style::Cornered,
        Style::Centered,
        Style::Empty,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Style::Chaotic => "Chaotic",
            Style::StripedHorizontal => "Striped Horizontal",
            Style::StripedVertical => "Striped Vertical",
            Style::Mosaic => "Mosaic",
            Style::Cornered => "Cornered",
            Style::Centered => "Centered",
            Style::Empty => "Empty",
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Compute shape centres for one layer
    ///
    /// # Arguments
    /// * `complexity` - Requested number of shapes
    /// * `canvas` - Canvas width and height in pixels (both non-zero)
    /// * `rng` - Random source
    ///
    /// # Returns
    /// Centres inside `[0, width) x [0, height)`. Mosaic rounds the count up
    /// to fill its grid, Empty returns nothing.
    pub fn placements(
        self,
        complexity: u32,
        canvas: (u32, u32),
        rng: &mut impl Rng,
    ) -> Vec<(f32, f32)> {
        let (width, height) = (canvas.0 as f32, canvas.1 as f32);

        let points: Vec<(f32, f32)> = match self {
            Style::Chaotic => (0..complexity)
                .map(|_| (rng.gen_range(0.0..width), rng.gen_range(0.0..height)))
                .collect(),

            Style::StripedHorizontal => {
                let bands = rng.gen_range(2..=5u32);
                (0..complexity)
                    .map(|_| {
                        let y = band_position(bands, height, rng);
                        (rng.gen_range(0.0..width), y)
                    })
                    .collect()
            }

            Style::StripedVertical => {
                let bands = rng.gen_range(2..=5u32);
                (0..complexity)
                    .map(|_| {
                        let x = band_position(bands, width, rng);
                        (x, rng.gen_range(0.0..height))
                    })
                    .collect()
            }

            Style::Mosaic => {
                let (cols, rows) = mosaic_grid(complexity, canvas);
                let cell_w = width / cols as f32;
                let cell_h = height / rows as f32;
                (0..rows)
                    .flat_map(|row| {
                        (0..cols).map(move |col| {
                            ((col as f32 + 0.5) * cell_w, (row as f32 + 0.5) * cell_h)
                        })
                    })
                    .collect()
            }

            Style::Cornered => (0..complexity)
                .map(|_| {
                    // |u1 - u2| is triangular on [0, 1), densest at the corner
                    let dx = (rng.r#gen::<f32>() - rng.r#gen::<f32>()).abs() * width / 4.0;
                    let dy = (rng.r#gen::<f32>() - rng.r#gen::<f32>()).abs() * height / 4.0;
                    let x = if rng.gen_bool(0.5) { dx } else { width - dx };
                    let y = if rng.gen_bool(0.5) { dy } else { height - dy };
                    (x, y)
                })
                .collect(),

            Style::Centered => (0..complexity)
                .map(|_| {
                    let dx = (rng.r#gen::<f32>() + rng.r#gen::<f32>() - 1.0) * width / 4.0;
                    let dy = (rng.r#gen::<f32>() + rng.r#gen::<f32>() - 1.0) * height / 4.0;
                    (width / 2.0 + dx, height / 2.0 + dy)
                })
                .collect(),

            Style::Empty => Vec::new(),
        };

        points
            .into_iter()
            .map(|(x, y)| (clamp_to(x, width), clamp_to(y, height)))
            .collect()
    }
}

/// Position across `extent` near the centre of one of `bands` stripes
fn band_position(bands: u32, extent: f32, rng: &mut impl Rng) -> f32 {
    let band_size = extent / bands as f32;
    let band = rng.gen_range(0..bands) as f32;
    let jitter = rng.gen_range(-0.25f32..=0.25) * band_size;
    (band + 0.5) * band_size + jitter
}

/// Grid with at least `count` cells, shaped after the canvas aspect ratio
fn mosaic_grid(count: u32, canvas: (u32, u32)) -> (u32, u32) {
    let count = count.max(1);
    let aspect = canvas.0 as f32 / canvas.1 as f32;
    let cols = ((count as f32 * aspect).sqrt().ceil() as u32).clamp(1, count);
    let rows = count.div_ceil(cols);
    (cols, rows)
}

fn clamp_to(value: f32, extent: f32) -> f32 {
    value.clamp(0.0, (extent - 1.0).max(0.0))
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Style {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownStyle(s.to_string()))
    }
}
