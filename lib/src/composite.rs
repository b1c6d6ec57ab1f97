use crate::error::{Error, Result};
use image::{Rgba, RgbaImage};
use rayon::prelude::*;

/// Stack layers over a solid background
///
/// Layers are blended bottom-up in slice order with source-over, using each
/// pixel's alpha scaled by the layer opacity. The background is opaque, so
/// the result is too.
///
/// # Arguments
/// * `background` - Canvas fill color (alpha is forced to 255)
/// * `canvas` - Output width and height
/// * `layers` - `(surface, opacity)` pairs, first entry at the bottom
///
/// # Returns
/// The flattened image, or an error if a surface does not match `canvas`
pub fn composite(
    background: Rgba<u8>,
    canvas: (u32, u32),
    layers: &[(RgbaImage, u8)],
) -> Result<RgbaImage> {
    for (surface, _) in layers {
        if surface.dimensions() != canvas {
            return Err(Error::LayerSize {
                expected: canvas,
                actual: surface.dimensions(),
            });
        }
    }

    let fill = Rgba([background[0], background[1], background[2], 255]);
    let mut output = RgbaImage::from_pixel(canvas.0, canvas.1, fill);

    for (surface, opacity) in layers {
        if *opacity == 0 {
            continue;
        }
        blend_layer(&mut output, surface, *opacity);
    }

    Ok(output)
}

/// Source-over blend of `layer` onto an opaque `dst`
fn blend_layer(dst: &mut RgbaImage, layer: &RgbaImage, opacity: u8) {
    let dst_buf: &mut [u8] = dst;
    let src_buf: &[u8] = layer;

    dst_buf
        .par_chunks_mut(4)
        .zip(src_buf.par_chunks(4))
        .for_each(|(d, s)| {
            let alpha = s[3] as u32 * opacity as u32;
            if alpha == 0 {
                return;
            }
            // alpha is in 0..=255*255
            for c in 0..3 {
                let blended =
                    s[c] as u32 * alpha + d[c] as u32 * (255 * 255 - alpha) + (255 * 255) / 2;
                d[c] = (blended / (255 * 255)) as u8;
            }
            d[3] = 255;
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: Rgba<u8> = Rgba([10, 20, 30, 255]);
    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    fn solid(color: Rgba<u8>) -> RgbaImage {
        RgbaImage::from_pixel(4, 4, color)
    }

    #[test]
    fn test_background_only() {
        let out = composite(BG, (4, 4), &[]).unwrap();
        assert!(out.pixels().all(|p| *p == BG));
    }

    #[test]
    fn test_background_forced_opaque() {
        let out = composite(Rgba([1, 2, 3, 0]), (2, 2), &[]).unwrap();
        assert_eq!(*out.get_pixel(0, 0), Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn test_full_opacity_replaces() {
        let out = composite(BG, (4, 4), &[(solid(RED), 255)]).unwrap();
        assert!(out.pixels().all(|p| *p == RED));
    }

    #[test]
    fn test_zero_opacity_is_invisible() {
        let out = composite(BG, (4, 4), &[(solid(RED), 0)]).unwrap();
        assert!(out.pixels().all(|p| *p == BG));
    }

    #[test]
    fn test_transparent_pixels_are_skipped() {
        let out = composite(BG, (4, 4), &[(RgbaImage::new(4, 4), 255)]).unwrap();
        assert!(out.pixels().all(|p| *p == BG));
    }

    #[test]
    fn test_half_opacity_blends() {
        let black = Rgba([0, 0, 0, 255]);
        let white = solid(Rgba([255, 255, 255, 255]));
        let out = composite(black, (4, 4), &[(white, 128)]).unwrap();
        let p = out.get_pixel(1, 1);
        assert_eq!(p[0], 128);
        assert_eq!(p[3], 255);
    }

    #[test]
    fn test_layer_order_top_wins() {
        let out = composite(BG, (4, 4), &[(solid(RED), 255), (solid(BLUE), 255)]).unwrap();
        assert!(out.pixels().all(|p| *p == BLUE));

        let out = composite(BG, (4, 4), &[(solid(BLUE), 255), (solid(RED), 255)]).unwrap();
        assert!(out.pixels().all(|p| *p == RED));
    }

    #[test]
    fn test_size_mismatch() {
        let result = composite(BG, (4, 4), &[(RgbaImage::new(3, 4), 255)]);
        assert!(matches!(
            result,
            Err(Error::LayerSize {
                expected: (4, 4),
                actual: (3, 4)
            })
        ));
    }
}
