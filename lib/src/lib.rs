//! Layerart - procedural layered abstract art
//!
//! Three generator layers each scatter one kind of shape over a transparent
//! surface following a placement style. The surfaces are composited over a
//! background color picked from a palette. Any setting can be locked so
//! that randomizing only touches the rest.
//!
//! # Example
//! ```no_run
//! use layerart::{ArtConfig, Artwork};
//!
//! let mut rng = rand::thread_rng();
//! let art = Artwork::random(ArtConfig::default(), &mut rng);
//! art.export_png("art.png".as_ref()).unwrap();
//! ```

pub mod artwork;
pub mod composite;
pub mod config;
pub mod error;
pub mod layer;
pub mod overlay;
pub mod palette;
pub mod shapes;
pub mod style;

// Re-export main types for convenience
pub use artwork::{Artwork, save_png};
pub use config::ArtConfig;
pub use error::{Error, Result};
pub use layer::{Layer, LayerLocks, LayerSettings};
pub use overlay::TextOverlay;
pub use palette::{PALETTES, Palette, PaletteState};
pub use shapes::Shape;
pub use style::Style;
