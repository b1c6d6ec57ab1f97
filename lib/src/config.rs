use crate::error::{Error, Result};
use std::ops::RangeInclusive;

/// Number of layers stacked on top of the background
pub const LAYER_COUNT: usize = 3;

/// Allowed number of shapes drawn per layer
pub const COMPLEXITY_RANGE: RangeInclusive<u32> = 10..=30;
/// Allowed upper bound for the shape size slider, in pixels
pub const SIZE_RANGE: RangeInclusive<u32> = 50..=400;
/// Range used when the size is randomized
pub const RANDOM_SIZE_RANGE: RangeInclusive<u32> = 51..=400;
/// Smallest shape a layer draws, clamped to the layer maximum
pub const MIN_SHAPE_SIZE: u32 = 51;
/// Layer opacity applied at compositing time
pub const TRANSPARENCY_RANGE: RangeInclusive<u8> = 0..=255;
/// Overlay text height in pixels
pub const FONT_SIZE_RANGE: RangeInclusive<f32> = 8.0..=600.0;

const MAX_DIMENSION: u32 = 16384;

/// Output canvas configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtConfig {
    /// Canvas size
    pub width: u32,  // default 3840
    pub height: u32, // default 2160
}

impl Default for ArtConfig {
    fn default() -> Self {
        // 4K, also the export resolution
        Self {
            width: 3840,
            height: 2160,
        }
    }
}

impl ArtConfig {
    /// Validates the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.width > MAX_DIMENSION {
            return Err(Error::InvalidConfig(format!(
                "width must be between 1 and {}, got {}",
                MAX_DIMENSION, self.width
            )));
        }
        if self.height == 0 || self.height > MAX_DIMENSION {
            return Err(Error::InvalidConfig(format!(
                "height must be between 1 and {}, got {}",
                MAX_DIMENSION, self.height
            )));
        }
        Ok(())
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ArtConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.dimensions(), (3840, 2160));
    }

    #[test]
    fn test_invalid_width() {
        let mut config = ArtConfig::default();
        config.width = 0;
        assert!(config.validate().is_err());

        config.width = MAX_DIMENSION + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_height() {
        let mut config = ArtConfig::default();
        config.height = 0;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_random_size_range_within_slider_range() {
        assert!(SIZE_RANGE.contains(RANDOM_SIZE_RANGE.start()));
        assert!(SIZE_RANGE.contains(RANDOM_SIZE_RANGE.end()));
    }
}
