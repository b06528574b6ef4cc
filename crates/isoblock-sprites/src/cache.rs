//! The sprite cache: every plain and stateful sprite, built once up front.
//!
//! Construction runs every `(kind, state)` job of a [`VariantRegistry`] either
//! on a rayon pool or serially. Both paths produce identical contents. After
//! construction the cache is read-only and hands out shared [`Arc`]s.

use std::collections::BTreeSet;
use std::sync::Arc;

use image::RgbaImage;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::atlas::{TILE_COUNT, TileSet};
use crate::cube::{CubeStyle, build_block};
use crate::sprite::{AncillaryState, BlockKind, BlockSprite};
use crate::variants::VariantRegistry;

/// How the cache is built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOptions {
    /// Run jobs on a rayon pool instead of the calling thread.
    pub parallel: bool,
    /// Size of a dedicated pool; `0` uses rayon's global pool.
    pub worker_threads: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            worker_threads: 0,
        }
    }
}

/// Blocks whose sprites are recolored per position from biome data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BiomeBlock {
    Grass,
    Leaves,
}

type Job = (BlockKind, Option<AncillaryState>);

/// Immutable map from block kind (and state) to finished sprites.
pub struct SpriteCache {
    plain: Vec<Option<Arc<BlockSprite>>>,
    variants: FxHashMap<(BlockKind, AncillaryState), Arc<BlockSprite>>,
    domains: FxHashMap<BlockKind, BTreeSet<AncillaryState>>,
    grass_base: Arc<BlockSprite>,
    leaves_base: Arc<BlockSprite>,
}

impl SpriteCache {
    /// Builds every sprite the registry declares.
    ///
    /// # Errors
    ///
    /// Fails only if a dedicated worker pool cannot be created.
    pub fn build(
        registry: &VariantRegistry,
        tiles: &TileSet,
        options: &BuildOptions,
    ) -> Result<Self, rayon::ThreadPoolBuildError> {
        let jobs = registry.jobs();
        let run = |job: &Job| (*job, registry.generate(job.0, job.1, tiles));

        let results: Vec<(Job, Option<RgbaImage>)> = if !options.parallel {
            jobs.iter().map(run).collect()
        } else if options.worker_threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(options.worker_threads)
                .thread_name(|i| format!("sprite-worker-{i}"))
                .build()?;
            pool.install(|| jobs.par_iter().map(run).collect())
        } else {
            jobs.par_iter().map(run).collect()
        };

        let mut cache = Self {
            plain: vec![None; TILE_COUNT],
            variants: FxHashMap::default(),
            domains: FxHashMap::default(),
            grass_base: Arc::new(BlockSprite::from_image(build_block(
                tiles.tile(0),
                Some(tiles.tile(3)),
                CubeStyle::Standard,
            ))),
            leaves_base: Arc::new(BlockSprite::from_image(build_block(
                tiles.tile(52),
                Some(tiles.tile(52)),
                CubeStyle::Standard,
            ))),
        };

        for kind in registry.stateful_kinds() {
            cache.domains.insert(kind, BTreeSet::new());
        }

        let mut missing = 0usize;
        for ((kind, state), image) in results {
            let Some(image) = image else {
                if let Some(state) = state {
                    warn!(%kind, state, "declared variant produced no sprite");
                } else {
                    warn!(%kind, "plain kind produced no sprite");
                }
                missing += 1;
                continue;
            };
            let sprite = Arc::new(BlockSprite::from_image(image));
            match state {
                None => cache.plain[kind.0 as usize] = Some(sprite),
                Some(state) => {
                    cache.variants.insert((kind, state), sprite);
                    cache.domains.entry(kind).or_default().insert(state);
                }
            }
        }

        for (kind, states) in &cache.domains {
            debug!(%kind, variants = states.len(), "built variants");
        }
        info!(
            plain = cache.plain.iter().flatten().count(),
            variants = cache.variants.len(),
            missing,
            parallel = options.parallel,
            "sprite cache built"
        );
        Ok(cache)
    }

    /// The state-independent sprite of `kind`.
    pub fn sprite(&self, kind: BlockKind) -> Option<Arc<BlockSprite>> {
        self.plain.get(kind.0 as usize)?.clone()
    }

    /// The sprite of `kind` in `state`.
    pub fn variant(&self, kind: BlockKind, state: AncillaryState) -> Option<Arc<BlockSprite>> {
        self.variants.get(&(kind, state)).cloned()
    }

    /// The variant for stateful kinds, otherwise the plain sprite.
    pub fn resolve(&self, kind: BlockKind, state: AncillaryState) -> Option<Arc<BlockSprite>> {
        if self.domains.contains_key(&kind) {
            self.variant(kind, state)
        } else {
            self.sprite(kind)
        }
    }

    /// The states of `kind` that have a variant; empty for plain kinds.
    pub fn known_states(&self, kind: BlockKind) -> BTreeSet<AncillaryState> {
        self.domains.get(&kind).cloned().unwrap_or_default()
    }

    /// Kinds with at least one variant, ascending.
    pub fn stateful_kinds(&self) -> Vec<BlockKind> {
        let mut kinds: Vec<_> = self.domains.keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }

    /// The untinted sprite callers recolor per position with biome data.
    pub fn biome_base(&self, block: BiomeBlock) -> Arc<BlockSprite> {
        match block {
            BiomeBlock::Grass => Arc::clone(&self.grass_base),
            BiomeBlock::Leaves => Arc::clone(&self.leaves_base),
        }
    }

    /// Number of plain sprites.
    pub fn plain_count(&self) -> usize {
        self.plain.iter().flatten().count()
    }

    /// Number of stateful variants.
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
