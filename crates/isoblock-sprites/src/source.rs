//! Texture sources: where the atlas and the standalone textures come from.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

use crate::atlas::AuxTexture;

/// Errors returned by a [`TextureSource`].
#[derive(Debug, Error)]
pub enum SourceError {
    /// No search location contains the file.
    #[error("{name} not found (searched: {})", display_paths(.searched))]
    NotFound {
        /// File name that was looked up.
        name: String,
        /// Locations that were tried, in order.
        searched: Vec<PathBuf>,
    },

    /// The file exists but could not be decoded.
    #[error("failed to decode {name}: {source}")]
    Decode {
        /// File name that failed.
        name: String,
        /// Underlying decoder error.
        #[source]
        source: image::ImageError,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "nothing".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Supplies the raw images sprites are built from.
pub trait TextureSource {
    /// The 16×16-cell terrain atlas.
    fn load_atlas(&self) -> Result<DynamicImage, SourceError>;

    /// A texture that lives outside the atlas.
    fn load_auxiliary(&self, texture: AuxTexture) -> Result<DynamicImage, SourceError>;
}

// ---------------------------------------------------------------------------
// DirectorySource
// ---------------------------------------------------------------------------

/// File names a [`DirectorySource`] looks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureNames {
    pub atlas: String,
    pub water: String,
    pub lava: String,
    pub fire: String,
}

impl Default for TextureNames {
    fn default() -> Self {
        Self {
            atlas: "terrain.png".to_string(),
            water: AuxTexture::Water.file_name().to_string(),
            lava: AuxTexture::Lava.file_name().to_string(),
            fire: AuxTexture::Fire.file_name().to_string(),
        }
    }
}

impl TextureNames {
    fn auxiliary(&self, texture: AuxTexture) -> &str {
        match texture {
            AuxTexture::Water => &self.water,
            AuxTexture::Lava => &self.lava,
            AuxTexture::Fire => &self.fire,
        }
    }
}

/// Loads textures from an ordered list of directories; the first hit wins.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    search_paths: Vec<PathBuf>,
    names: TextureNames,
}

impl DirectorySource {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self::with_names(search_paths, TextureNames::default())
    }

    pub fn with_names(search_paths: Vec<PathBuf>, names: TextureNames) -> Self {
        Self {
            search_paths,
            names,
        }
    }

    /// The first existing `name` in the search paths.
    pub fn find(&self, name: &str) -> Result<PathBuf, SourceError> {
        let mut searched = Vec::with_capacity(self.search_paths.len());
        for dir in &self.search_paths {
            let candidate = dir.join(name);
            if candidate.is_file() {
                debug!(path = %candidate.display(), "found texture");
                return Ok(candidate);
            }
            searched.push(candidate);
        }
        Err(SourceError::NotFound {
            name: name.to_string(),
            searched,
        })
    }

    fn load(&self, name: &str) -> Result<DynamicImage, SourceError> {
        let path = self.find(name)?;
        open_image(&path, name)
    }
}

fn open_image(path: &Path, name: &str) -> Result<DynamicImage, SourceError> {
    image::open(path).map_err(|source| SourceError::Decode {
        name: name.to_string(),
        source,
    })
}

impl TextureSource for DirectorySource {
    fn load_atlas(&self) -> Result<DynamicImage, SourceError> {
        self.load(&self.names.atlas)
    }

    fn load_auxiliary(&self, texture: AuxTexture) -> Result<DynamicImage, SourceError> {
        self.load(self.names.auxiliary(texture))
    }
}

// ---------------------------------------------------------------------------
// MemorySource
// ---------------------------------------------------------------------------

/// Textures held in memory, for embedding and tests.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    atlas: Option<DynamicImage>,
    auxiliary: FxHashMap<AuxTexture, DynamicImage>,
}

impl MemorySource {
    pub fn new(atlas: DynamicImage) -> Self {
        Self {
            atlas: Some(atlas),
            auxiliary: FxHashMap::default(),
        }
    }

    pub fn with_auxiliary(mut self, texture: AuxTexture, image: DynamicImage) -> Self {
        self.auxiliary.insert(texture, image);
        self
    }
}

impl TextureSource for MemorySource {
    fn load_atlas(&self) -> Result<DynamicImage, SourceError> {
        self.atlas.clone().ok_or_else(|| SourceError::NotFound {
            name: "atlas".to_string(),
            searched: Vec::new(),
        })
    }

    fn load_auxiliary(&self, texture: AuxTexture) -> Result<DynamicImage, SourceError> {
        self.auxiliary
            .get(&texture)
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                name: texture.file_name().to_string(),
                searched: Vec::new(),
            })
    }
}
