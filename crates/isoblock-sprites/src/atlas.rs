//! Atlas slicing: splits a flat terrain atlas into its 256 canonical tiles.
//!
//! The atlas is a square image divided into a 16×16 grid of cells. Every cell is
//! resampled to [`TILE_SIZE`], so texture packs with larger cells still produce
//! tiles the variant masks line up with. Textures that live outside
//! the atlas (water, lava, fire) are attached to the same [`TileSet`].

use std::collections::HashMap;

use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use thiserror::Error;

/// Number of cells along each side of the atlas grid.
pub const ATLAS_GRID: u32 = 16;

/// Number of tiles produced by slicing one atlas.
pub const TILE_COUNT: usize = (ATLAS_GRID * ATLAS_GRID) as usize;

/// Edge length of every tile. Variant masks and offsets are in these pixels.
pub const TILE_SIZE: u32 = 16;

// ---------------------------------------------------------------------------
// AtlasError
// ---------------------------------------------------------------------------

/// Errors returned while slicing an atlas.
#[derive(Debug, Error)]
pub enum AtlasError {
    /// The atlas image is not square.
    #[error("atlas must be square, got {width}x{height}")]
    NotSquare {
        /// Width of the rejected image.
        width: u32,
        /// Height of the rejected image.
        height: u32,
    },

    /// The atlas side length cannot be split into 16 equal cells.
    #[error("atlas side {side} is not a positive multiple of {ATLAS_GRID}")]
    UnevenGrid {
        /// Side length of the rejected image.
        side: u32,
    },

}

// ---------------------------------------------------------------------------
// AuxTexture
// ---------------------------------------------------------------------------

/// Textures that are not part of the atlas and are loaded as standalone images.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AuxTexture {
    /// Still and flowing water.
    Water,
    /// Still and flowing lava.
    Lava,
    /// Fire.
    Fire,
}

impl AuxTexture {
    /// Every auxiliary texture, in load order.
    pub const ALL: [AuxTexture; 3] = [AuxTexture::Water, AuxTexture::Lava, AuxTexture::Fire];

    /// Conventional file name of the texture.
    pub fn file_name(self) -> &'static str {
        match self {
            AuxTexture::Water => "water.png",
            AuxTexture::Lava => "lava.png",
            AuxTexture::Fire => "fire.png",
        }
    }
}

// ---------------------------------------------------------------------------
// TileSet
// ---------------------------------------------------------------------------

/// The immutable tiles every sprite is built from.
///
/// Atlas tiles are addressed by their row-major cell index (`row * 16 + column`).
/// Because there are exactly 256 tiles, every `u8` is a valid index.
#[derive(Clone, Debug)]
pub struct TileSet {
    tiles: Vec<RgbaImage>,
    auxiliary: HashMap<AuxTexture, RgbaImage>,
}

impl TileSet {
    /// Slices `atlas` into 256 tiles of [`TILE_SIZE`] pixels.
    ///
    /// # Errors
    ///
    /// Returns [`AtlasError`] if the atlas is not square or its side is not a
    /// positive multiple of 16.
    pub fn slice(atlas: &DynamicImage) -> Result<Self, AtlasError> {
        let atlas = atlas.to_rgba8();
        let (width, height) = atlas.dimensions();
        if width != height {
            return Err(AtlasError::NotSquare { width, height });
        }
        if width == 0 || !width.is_multiple_of(ATLAS_GRID) {
            return Err(AtlasError::UnevenGrid { side: width });
        }

        let cell = width / ATLAS_GRID;
        let mut tiles = Vec::with_capacity(TILE_COUNT);
        for row in 0..ATLAS_GRID {
            for col in 0..ATLAS_GRID {
                let region =
                    image::imageops::crop_imm(&atlas, col * cell, row * cell, cell, cell).to_image();
                tiles.push(to_tile_size(region));
            }
        }

        Ok(Self {
            tiles,
            auxiliary: HashMap::new(),
        })
    }

    /// Attaches a standalone texture, resampling it to the tile size if needed.
    pub fn with_auxiliary(mut self, texture: AuxTexture, image: &DynamicImage) -> Self {
        let tile = to_tile_size(image.to_rgba8());
        self.auxiliary.insert(texture, tile);
        self
    }

    /// Returns the atlas tile at `index`.
    pub fn tile(&self, index: u8) -> &RgbaImage {
        &self.tiles[index as usize]
    }

    /// Returns a standalone texture, if it was attached.
    pub fn auxiliary(&self, texture: AuxTexture) -> Option<&RgbaImage> {
        self.auxiliary.get(&texture)
    }

    /// Number of atlas tiles (always 256).
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always `false`: a sliced atlas has 256 tiles.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Iterates over the atlas tiles in index order.
    pub fn iter(&self) -> impl Iterator<Item = &RgbaImage> {
        self.tiles.iter()
    }
}

fn to_tile_size(image: RgbaImage) -> RgbaImage {
    if image.dimensions() == (TILE_SIZE, TILE_SIZE) {
        image
    } else {
        image::imageops::resize(&image, TILE_SIZE, TILE_SIZE, FilterType::CatmullRom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// Atlas whose cell `i` is filled with the color `(i, 255 - i, 7, 255)`.
    fn indexed_atlas(cell: u32) -> DynamicImage {
        let side = cell * ATLAS_GRID;
        let img = RgbaImage::from_fn(side, side, |x, y| {
            let index = (y / cell) * ATLAS_GRID + x / cell;
            Rgba([index as u8, 255 - index as u8, 7, 255])
        });
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn test_slicing_yields_256_row_major_tiles() {
        let tiles = TileSet::slice(&indexed_atlas(16)).unwrap();
        assert_eq!(tiles.len(), TILE_COUNT);

        for row in 0..16u32 {
            for col in 0..16u32 {
                let index = (row * 16 + col) as u8;
                let tile = tiles.tile(index);
                assert_eq!(tile.dimensions(), (16, 16));
                assert_eq!(tile.get_pixel(0, 0), &Rgba([index, 255 - index, 7, 255]));
                assert_eq!(tile.get_pixel(15, 15), &Rgba([index, 255 - index, 7, 255]));
            }
        }
    }

    #[test]
    fn test_high_resolution_atlas_is_resampled_to_canonical_size() {
        let tiles = TileSet::slice(&indexed_atlas(32)).unwrap();
        assert_eq!(tiles.len(), TILE_COUNT);
        assert!(tiles.iter().all(|t| t.dimensions() == (16, 16)));
        // Uniform cells stay uniform after resampling.
        assert_eq!(tiles.tile(37).get_pixel(8, 8), &Rgba([37, 218, 7, 255]));
    }

    #[test]
    fn test_non_square_atlas_is_rejected() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(256, 128));
        let result = TileSet::slice(&img);
        assert!(matches!(
            result,
            Err(AtlasError::NotSquare {
                width: 256,
                height: 128
            })
        ));
    }

    #[test]
    fn test_uneven_grid_is_rejected() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(250, 250));
        let result = TileSet::slice(&img);
        assert!(matches!(result, Err(AtlasError::UnevenGrid { side: 250 })));
    }

    #[test]
    fn test_low_resolution_atlas_is_upscaled_to_canonical_size() {
        let tiles = TileSet::slice(&indexed_atlas(8)).unwrap();
        assert!(tiles.iter().all(|t| t.dimensions() == (TILE_SIZE, TILE_SIZE)));
        assert_eq!(tiles.tile(200).get_pixel(3, 12), &Rgba([200, 55, 7, 255]));
    }

    #[test]
    fn test_auxiliary_texture_is_resized_to_tile_size() {
        let tiles = TileSet::slice(&indexed_atlas(16)).unwrap();
        let water = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            32,
            32,
            Rgba([10, 20, 200, 180]),
        ));
        let tiles = tiles.with_auxiliary(AuxTexture::Water, &water);

        let aux = tiles.auxiliary(AuxTexture::Water).unwrap();
        assert_eq!(aux.dimensions(), (16, 16));
        assert!(tiles.auxiliary(AuxTexture::Lava).is_none());
    }

    #[test]
    fn test_aux_file_names() {
        assert_eq!(AuxTexture::Water.file_name(), "water.png");
        assert_eq!(AuxTexture::Lava.file_name(), "lava.png");
        assert_eq!(AuxTexture::Fire.file_name(), "fire.png");
    }
}
