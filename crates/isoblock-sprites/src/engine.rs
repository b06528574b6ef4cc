//! The engine: loads textures once, then builds and owns the sprite cache.

use image::{Rgb, RgbaImage};
use thiserror::Error;
use tracing::info;

use crate::atlas::{ATLAS_GRID, AtlasError, AuxTexture, TileSet};
use crate::cache::{BiomeBlock, BuildOptions, SpriteCache};
use crate::source::{SourceError, TextureSource};
use crate::tint::tint;
use crate::variants::{RegistryError, VariantRegistry};

/// Errors that abort engine initialization.
#[derive(Debug, Error)]
pub enum SpriteError {
    /// A texture could not be loaded.
    #[error("failed to load {resource}")]
    Load {
        /// The texture that failed.
        resource: String,
        #[source]
        source: SourceError,
    },

    /// The atlas has an unusable shape.
    #[error("atlas error: {0}")]
    Atlas(#[from] AtlasError),

    /// The built-in variant table is inconsistent.
    #[error("variant registry error: {0}")]
    Registry(#[from] RegistryError),

    /// The dedicated worker pool could not be started.
    #[error("failed to start sprite workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Owns the sliced tiles, the variant table and the finished cache.
pub struct SpriteEngine {
    tiles: TileSet,
    registry: VariantRegistry,
    cache: SpriteCache,
}

impl SpriteEngine {
    /// Loads the atlas and every standalone texture from `source`, then builds
    /// the cache.
    ///
    /// # Errors
    ///
    /// Fails if any texture is missing or undecodable, if the atlas is not a
    /// square multiple of 16, or if the worker pool cannot start.
    pub fn load(source: &dyn TextureSource, options: &BuildOptions) -> Result<Self, SpriteError> {
        let atlas = source.load_atlas().map_err(|source| SpriteError::Load {
            resource: "terrain atlas".to_string(),
            source,
        })?;
        let mut tiles = TileSet::slice(&atlas)?;
        info!(
            width = atlas.width(),
            cell = atlas.width() / ATLAS_GRID,
            "sliced terrain atlas"
        );

        for texture in AuxTexture::ALL {
            let image = source
                .load_auxiliary(texture)
                .map_err(|source| SpriteError::Load {
                    resource: texture.file_name().to_string(),
                    source,
                })?;
            tiles = tiles.with_auxiliary(texture, &image);
        }

        Self::from_tiles(tiles, options)
    }

    /// Builds the engine from already sliced tiles.
    pub fn from_tiles(tiles: TileSet, options: &BuildOptions) -> Result<Self, SpriteError> {
        let registry = VariantRegistry::standard()?;
        let cache = SpriteCache::build(&registry, &tiles, options)?;
        Ok(Self {
            tiles,
            registry,
            cache,
        })
    }

    pub fn cache(&self) -> &SpriteCache {
        &self.cache
    }

    pub fn tiles(&self) -> &TileSet {
        &self.tiles
    }

    pub fn registry(&self) -> &VariantRegistry {
        &self.registry
    }

    /// The grass or leaf sprite recolored with a biome color.
    pub fn biome_sprite(&self, block: BiomeBlock, color: Rgb<u8>) -> RgbaImage {
        tint(&self.cache.biome_base(block).image, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use crate::sprite::BlockKind;
    use crate::test_support::{test_atlas, test_tiles};
    use image::DynamicImage;

    fn full_source() -> MemorySource {
        let tiles = test_tiles();
        let mut source = MemorySource::new(test_atlas());
        for texture in AuxTexture::ALL {
            let image = tiles.auxiliary(texture).unwrap().clone();
            source = source.with_auxiliary(texture, DynamicImage::ImageRgba8(image));
        }
        source
    }

    #[test]
    fn test_load_builds_cache() {
        let engine = SpriteEngine::load(&full_source(), &BuildOptions::default()).unwrap();
        assert_eq!(engine.tiles().len(), 256);
        assert!(engine.cache().sprite(BlockKind(1)).is_some());
        assert!(engine.cache().variant(BlockKind(55), 127).is_some());
        assert!(engine.registry().is_stateful(BlockKind(55)));
    }

    #[test]
    fn test_missing_auxiliary_names_the_resource() {
        let source = MemorySource::new(test_atlas());
        let err = SpriteEngine::load(&source, &BuildOptions::default())
            .err()
            .unwrap();
        match err {
            SpriteError::Load { resource, .. } => assert_eq!(resource, "water.png"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_atlas_is_fatal() {
        let source = MemorySource::new(DynamicImage::ImageRgba8(RgbaImage::new(100, 50)));
        let err = SpriteEngine::load(&source, &BuildOptions::default())
            .err()
            .unwrap();
        assert!(matches!(err, SpriteError::Atlas(AtlasError::NotSquare { .. })));
    }

    #[test]
    fn test_high_resolution_pack_matches_canonical_geometry() {
        let uniform = |side: u32| {
            let atlas = RgbaImage::from_pixel(side, side, image::Rgba([120, 110, 100, 255]));
            let mut source = MemorySource::new(DynamicImage::ImageRgba8(atlas));
            for texture in AuxTexture::ALL {
                let aux = RgbaImage::from_pixel(side / 16, side / 16, image::Rgba([1, 2, 3, 255]));
                source = source.with_auxiliary(texture, DynamicImage::ImageRgba8(aux));
            }
            let options = BuildOptions {
                parallel: false,
                worker_threads: 0,
            };
            SpriteEngine::load(&source, &options).unwrap()
        };
        let small = uniform(256);
        let large = uniform(512);

        assert!(large.tiles().iter().all(|t| t.dimensions() == (16, 16)));
        for (kind, state) in [(53, 0), (85, 15), (55, 0b1010), (50, 5)] {
            let a = small.cache().variant(BlockKind(kind), state).unwrap();
            let b = large.cache().variant(BlockKind(kind), state).unwrap();
            assert_eq!(a.alpha, b.alpha, "kind {kind} state {state}");
        }
    }

    #[test]
    fn test_biome_sprite_keeps_mask() {
        let engine = SpriteEngine::from_tiles(test_tiles(), &BuildOptions::default()).unwrap();
        let base = engine.cache().biome_base(BiomeBlock::Grass);
        let tinted = engine.biome_sprite(BiomeBlock::Grass, Rgb([90, 160, 60]));

        for (a, b) in base.image.pixels().zip(tinted.pixels()) {
            assert_eq!(a[3], b[3]);
        }
    }
}
