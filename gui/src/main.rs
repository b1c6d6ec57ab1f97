mod app;

use app::ArtApp;
use eframe::egui;

fn main() -> Result<(), eframe::Error> {
    // Configure logging
    env_logger::init();

    // Configure viewport/window
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Layerart")
            .with_icon(load_icon()),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Layerart",
        options,
        Box::new(|cc| Ok(Box::new(ArtApp::new(cc)))),
    )
}

/// Three overlapping translucent discs on a dark square
fn load_icon() -> egui::IconData {
    let icon_size = 32;
    let mut pixels = vec![0u8; icon_size * icon_size * 4];

    let discs: [((f32, f32), [u8; 3]); 3] = [
        ((11.0, 12.0), [0xdf, 0x42, 0xd1]),
        ((21.0, 12.0), [0x00, 0xad, 0xb5]),
        ((16.0, 21.0), [0xf6, 0xab, 0x6c]),
    ];

    for y in 0..icon_size {
        for x in 0..icon_size {
            let idx = (y * icon_size + x) * 4;
            let mut color = [0x2b_u8, 0x28, 0x34];

            for ((cx, cy), disc) in discs {
                let (dx, dy) = (x as f32 + 0.5 - cx, y as f32 + 0.5 - cy);
                if dx * dx + dy * dy <= 64.0 {
                    // Average with what is underneath
                    for c in 0..3 {
                        color[c] = ((color[c] as u16 + disc[c] as u16) / 2) as u8;
                    }
                }
            }

            pixels[idx..idx + 3].copy_from_slice(&color);
            pixels[idx + 3] = 255;
        }
    }

    egui::IconData {
        rgba: pixels,
        width: icon_size as u32,
        height: icon_size as u32,
    }
}
