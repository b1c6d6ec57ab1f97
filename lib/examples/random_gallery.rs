/// Render a handful of random pieces, keeping the first palette locked
///
/// Shows how locks survive `randomize` while everything else changes.
use layerart::{ArtConfig, Artwork};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() {
    println!("Layerart - Random Gallery");
    println!("=========================\n");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(7);
    let mut rng = StdRng::seed_from_u64(seed);

    let config = ArtConfig {
        width: 1280,
        height: 720,
    };
    let mut art = Artwork::random(config, &mut rng);
    art.palette.palette_locked = true;

    for i in 0..4 {
        if i > 0 {
            art.randomize(&mut rng);
        }

        let name = format!("gallery_{i}.png");
        match art.export_png(name.as_ref()) {
            Ok(path) => println!(
                "✓ {} - {} / {} / {}",
                path.display(),
                art.layers[0].settings.style,
                art.layers[1].settings.style,
                art.layers[2].settings.style
            ),
            Err(e) => eprintln!("✗ {name}: {e}"),
        }
    }

    println!("\nPalette stayed on: {}", art.palette.palette().name);
}
