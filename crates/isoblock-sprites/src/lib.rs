//! Isometric block sprites: turns a flat terrain atlas into the 24×24
//! perspective sprites of every block kind and state.

pub mod atlas;
pub mod cache;
pub mod compositor;
pub mod cube;
pub mod engine;
pub mod projection;
pub mod source;
pub mod sprite;
pub mod tint;
pub mod variants;

pub use atlas::{AtlasError, AuxTexture, TILE_SIZE, TileSet};
pub use cache::{BiomeBlock, BuildOptions, SpriteCache};
pub use engine::{SpriteEngine, SpriteError};
pub use source::{DirectorySource, MemorySource, SourceError, TextureNames, TextureSource};
pub use sprite::{AncillaryState, BlockKind, BlockSprite};
pub use variants::{StateDomain, VariantBuilder, VariantRegistry};
