//! Colormaps: a flat table of biome colors read from an image.

use std::path::Path;

use image::{DynamicImage, Rgb};

use crate::BiomeError;

/// Biome colors in row-major pixel order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BiomeColormap {
    colors: Vec<Rgb<u8>>,
}

impl BiomeColormap {
    /// Reads a colormap image such as `grasscolor.png`.
    pub fn load(path: &Path) -> Result<Self, BiomeError> {
        let image = image::open(path).map_err(|source| BiomeError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_image(&image))
    }

    pub fn from_image(image: &DynamicImage) -> Self {
        Self {
            colors: image.to_rgb8().pixels().copied().collect(),
        }
    }

    /// The `index`-th color, counting pixels left to right, top to bottom.
    pub fn color(&self, index: usize) -> Option<Rgb<u8>> {
        self.colors.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn test_colors_are_row_major() {
        let img = RgbImage::from_fn(4, 3, |x, y| Rgb([x as u8, y as u8, 9]));
        let map = BiomeColormap::from_image(&DynamicImage::ImageRgb8(img));

        assert_eq!(map.len(), 12);
        assert_eq!(map.color(0), Some(Rgb([0, 0, 9])));
        assert_eq!(map.color(5), Some(Rgb([1, 1, 9])));
        assert_eq!(map.color(11), Some(Rgb([3, 2, 9])));
        assert_eq!(map.color(12), None);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grasscolor.png");
        image::RgbImage::from_pixel(256, 256, Rgb([100, 150, 50]))
            .save(&path)
            .unwrap();

        let map = BiomeColormap::load(&path).unwrap();
        assert_eq!(map.len(), 65536);
        assert_eq!(map.color(300), Some(Rgb([100, 150, 50])));

        let missing = BiomeColormap::load(&dir.path().join("foliagecolor.png"));
        assert!(matches!(missing, Err(BiomeError::Decode { .. })));
    }
}
