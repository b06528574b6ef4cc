//! Biome data: grass and foliage colormaps and per-region biome index files.

mod cache;
mod colormap;
mod region;

use std::path::PathBuf;

use thiserror::Error;

pub use cache::{BiomeRegionCache, RegionCacheStats};
pub use colormap::BiomeColormap;
pub use region::{BiomeRegion, REGION_BYTES, REGION_SIZE, region_file_name};

/// Errors returned while reading biome data.
#[derive(Debug, Error)]
pub enum BiomeError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A colormap image could not be decoded.
    #[error("failed to decode colormap {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A region file does not have the expected size.
    #[error("biome file {name} is {len} bytes, expected 524288")]
    InvalidRegion { name: String, len: usize },
}
