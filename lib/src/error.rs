use thiserror::Error;

/// Errors produced while configuring, rendering or exporting artwork
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown palette `{0}`")]
    UnknownPalette(String),

    #[error("unknown style `{0}`")]
    UnknownStyle(String),

    #[error("unknown shape `{0}`")]
    UnknownShape(String),

    #[error("malformed hex color `{0}`")]
    InvalidColor(String),

    #[error("background index {index} out of range for a palette of {len} colors")]
    BackgroundIndex { index: usize, len: usize },

    #[error("layer is {actual:?} but the canvas is {expected:?}")]
    LayerSize {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("invalid font: {0}")]
    Font(#[from] ab_glyph::InvalidFont),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
