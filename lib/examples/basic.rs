/// Basic example: Render one hand-configured piece to a PNG
///
/// Three layers with fixed settings over the Forest palette
use layerart::{ArtConfig, Artwork, Layer, LayerSettings, PaletteState, Shape, Style, TextOverlay};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() {
    println!("Layerart - Basic Example");
    println!("========================\n");

    let mut rng = StdRng::seed_from_u64(2022);

    let mut palette = PaletteState::random(&mut rng);
    palette.select("Forest", &mut rng).expect("Forest is a built-in palette");
    palette
        .set_background_index(0)
        .expect("Forest has a first color");

    let art = Artwork {
        config: ArtConfig {
            width: 1920,
            height: 1080,
        },
        palette,
        layers: [
            Layer::new(LayerSettings {
                style: Style::Mosaic,
                shape: Shape::Rings,
                complexity: 24,
                size: 220,
                transparency: 90,
            }),
            Layer::new(LayerSettings {
                style: Style::StripedHorizontal,
                shape: Shape::Curves,
                complexity: 18,
                size: 400,
                transparency: 200,
            }),
            Layer::new(LayerSettings {
                style: Style::Cornered,
                shape: Shape::FilledPolygons,
                complexity: 12,
                size: 300,
                transparency: 255,
            }),
        ],
        seed: 42,
        overlay: TextOverlay::default(),
    };

    println!("Rendering with:");
    println!("  - Palette: {}", art.palette.palette().name);
    for (i, layer) in art.layers.iter().enumerate() {
        let s = &layer.settings;
        println!(
            "  - Layer {}: {} {} (complexity {}, size {}, transparency {})",
            i + 1,
            s.style,
            s.shape,
            s.complexity,
            s.size,
            s.transparency
        );
    }
    println!();

    let path = art
        .export_png("basic_output.png".as_ref())
        .expect("Failed to export");

    println!("✓ Saved output to: {}", path.display());
}
