//! Block identifiers and the finished sprite value stored in the cache.

use std::fmt;

use image::{GrayImage, RgbaImage};
use serde::{Deserialize, Serialize};

/// A block type identifier. Not every value has a sprite.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct BlockKind(pub u8);

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block {}", self.0)
    }
}

impl From<u8> for BlockKind {
    fn from(id: u8) -> Self {
        Self(id)
    }
}

/// Per-block auxiliary data selecting orientation, growth stage, color and so on.
pub type AncillaryState = u8;

/// A finished 24×24 sprite together with its separated alpha channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockSprite {
    /// The composited RGBA image.
    pub image: RgbaImage,
    /// The image's alpha channel, used as a paste mask by renderers.
    pub alpha: GrayImage,
}

impl BlockSprite {
    /// Wraps `image`, splitting out its alpha channel.
    pub fn from_image(image: RgbaImage) -> Self {
        let alpha = GrayImage::from_fn(image.width(), image.height(), |x, y| {
            image::Luma([image.get_pixel(x, y)[3]])
        });
        Self { image, alpha }
    }

    /// Whether every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.alpha.pixels().all(|p| p[0] == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_alpha_mask_matches_image() {
        let image = RgbaImage::from_fn(24, 24, |x, y| Rgba([1, 2, 3, (x * 10 + y) as u8]));
        let sprite = BlockSprite::from_image(image.clone());

        assert_eq!(sprite.alpha.dimensions(), (24, 24));
        for (x, y, p) in image.enumerate_pixels() {
            assert_eq!(sprite.alpha.get_pixel(x, y)[0], p[3]);
        }
        assert!(!sprite.is_blank());
        assert!(BlockSprite::from_image(RgbaImage::new(24, 24)).is_blank());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(BlockKind(35).to_string(), "block 35");
        assert_eq!(BlockKind::from(7), BlockKind(7));
    }
}
