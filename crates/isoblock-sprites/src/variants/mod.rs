//! Variant generation: a registry of per-kind sprite builders.
//!
//! Plain kinds map to a single sprite that ignores ancillary state. Stateful
//! kinds declare a finite state domain and produce one sprite per state; states
//! outside the domain yield nothing.

mod door;
mod fence;
mod rail;
mod redstone;
mod simple;
mod stairs;
mod table;
mod torch;

use std::ops::Range;

use image::RgbaImage;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::atlas::{AuxTexture, TileSet};
use crate::cube::CubeStyle;
use crate::sprite::{AncillaryState, BlockKind};
use crate::tint::{GRASS_TINT, LEAF_TINT};

pub use door::{Door, Ladder};
pub use fence::Fence;
pub use rail::Rail;
pub use redstone::RedstoneWire;
pub use simple::{
    AuxCube, Crops, FacedCube, Fire, FullFaces, PlainCube, TileChoice, TintedCube, WOOL_TILES,
    WaterFlow,
};
pub use stairs::Stairs;
pub use table::{SIDE_IDS, TOP_IDS, atlas_faces};
pub use torch::Torch;

// ---------------------------------------------------------------------------
// Builder trait
// ---------------------------------------------------------------------------

/// Produces the sprite for one ancillary state of a block kind.
///
/// Builders are pure: the same state and tiles always give the same pixels.
/// Plain builders are called with state `0` and ignore it.
pub trait VariantBuilder: Send + Sync {
    /// Builds the sprite, or `None` when the state has no appearance.
    fn generate(&self, state: AncillaryState, tiles: &TileSet) -> Option<RgbaImage>;
}

impl VariantBuilder for Box<dyn VariantBuilder> {
    fn generate(&self, state: AncillaryState, tiles: &TileSet) -> Option<RgbaImage> {
        (**self).generate(state, tiles)
    }
}

// ---------------------------------------------------------------------------
// StateDomain
// ---------------------------------------------------------------------------

/// The ancillary states a stateful kind is rendered for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StateDomain {
    /// A contiguous half-open range of states.
    Range(Range<AncillaryState>),
    /// An explicit list of states.
    Only(&'static [AncillaryState]),
}

impl StateDomain {
    /// Every state in the domain, ascending.
    pub fn states(&self) -> Vec<AncillaryState> {
        match self {
            StateDomain::Range(range) => range.clone().collect(),
            StateDomain::Only(states) => {
                let mut states = states.to_vec();
                states.sort_unstable();
                states.dedup();
                states
            }
        }
    }

    /// Whether `state` belongs to the domain.
    pub fn contains(&self, state: AncillaryState) -> bool {
        match self {
            StateDomain::Range(range) => range.contains(&state),
            StateDomain::Only(states) => states.contains(&state),
        }
    }

    /// Whether the domain has no states at all.
    pub fn is_empty(&self) -> bool {
        match self {
            StateDomain::Range(range) => range.is_empty(),
            StateDomain::Only(states) => states.is_empty(),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors returned while populating a [`VariantRegistry`].
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A plain builder was already registered for this kind.
    #[error("duplicate plain builder for {0}")]
    DuplicatePlain(BlockKind),

    /// A stateful builder was already registered for this kind.
    #[error("duplicate stateful builder for {0}")]
    DuplicateStateful(BlockKind),

    /// A stateful kind was registered with no states.
    #[error("empty state domain for {0}")]
    EmptyDomain(BlockKind),
}

// ---------------------------------------------------------------------------
// VariantRegistry
// ---------------------------------------------------------------------------

struct Registration {
    domain: StateDomain,
    builder: Box<dyn VariantBuilder>,
}

/// Maps block kinds to the builders that draw them.
///
/// A kind may have both a plain and a stateful builder; the cache stores their
/// results separately.
#[derive(Default)]
pub struct VariantRegistry {
    plain: FxHashMap<BlockKind, Box<dyn VariantBuilder>>,
    stateful: FxHashMap<BlockKind, Registration>,
}

impl VariantRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the state-independent builder for `kind`.
    pub fn register_plain(
        &mut self,
        kind: BlockKind,
        builder: impl VariantBuilder + 'static,
    ) -> Result<(), RegistryError> {
        if self.plain.contains_key(&kind) {
            return Err(RegistryError::DuplicatePlain(kind));
        }
        self.plain.insert(kind, Box::new(builder));
        Ok(())
    }

    /// Registers a builder that is rendered once per state of `domain`.
    pub fn register_states(
        &mut self,
        kind: BlockKind,
        domain: StateDomain,
        builder: impl VariantBuilder + 'static,
    ) -> Result<(), RegistryError> {
        if self.stateful.contains_key(&kind) {
            return Err(RegistryError::DuplicateStateful(kind));
        }
        if domain.is_empty() {
            return Err(RegistryError::EmptyDomain(kind));
        }
        self.stateful.insert(
            kind,
            Registration {
                domain,
                builder: Box::new(builder),
            },
        );
        Ok(())
    }

    /// Builds a sprite.
    ///
    /// With `state` absent the plain builder is used; otherwise the stateful
    /// builder, provided the state lies in the kind's domain.
    pub fn generate(
        &self,
        kind: BlockKind,
        state: Option<AncillaryState>,
        tiles: &TileSet,
    ) -> Option<RgbaImage> {
        match state {
            None => self.plain.get(&kind)?.generate(0, tiles),
            Some(state) => {
                let registration = self.stateful.get(&kind)?;
                if !registration.domain.contains(state) {
                    return None;
                }
                registration.builder.generate(state, tiles)
            }
        }
    }

    /// The declared state domain of a stateful kind.
    pub fn domain(&self, kind: BlockKind) -> Option<&StateDomain> {
        self.stateful.get(&kind).map(|r| &r.domain)
    }

    /// Whether `kind` has a stateful builder.
    pub fn is_stateful(&self, kind: BlockKind) -> bool {
        self.stateful.contains_key(&kind)
    }

    /// Kinds with a plain builder, ascending.
    pub fn plain_kinds(&self) -> Vec<BlockKind> {
        let mut kinds: Vec<_> = self.plain.keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }

    /// Kinds with a stateful builder, ascending.
    pub fn stateful_kinds(&self) -> Vec<BlockKind> {
        let mut kinds: Vec<_> = self.stateful.keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }

    /// Every `(kind, state)` pair the registry declares, plain kinds first.
    pub fn jobs(&self) -> Vec<(BlockKind, Option<AncillaryState>)> {
        let mut jobs: Vec<_> = self.plain_kinds().into_iter().map(|k| (k, None)).collect();
        for kind in self.stateful_kinds() {
            if let Some(domain) = self.domain(kind) {
                jobs.extend(domain.states().into_iter().map(|s| (kind, Some(s))));
            }
        }
        jobs
    }

    /// The registry with every built-in block kind.
    pub fn standard() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        registry.register_atlas_kinds()?;
        registry.register_stateful_kinds()?;
        Ok(registry)
    }

    fn register_atlas_kinds(&mut self) -> Result<(), RegistryError> {
        for id in 0..TOP_IDS.len() as u8 {
            let kind = BlockKind(id);
            let builder: Box<dyn VariantBuilder> = match id {
                8 => Box::new(AuxCube::new(AuxTexture::Water, true)),
                9 => Box::new(AuxCube::new(AuxTexture::Water, false)),
                10 | 11 => Box::new(AuxCube::new(AuxTexture::Lava, true)),
                _ => {
                    let Some((top, side)) = atlas_faces(kind) else {
                        continue;
                    };
                    Box::new(PlainCube::new(top, side, CubeStyle::for_kind(kind)))
                }
            };
            self.register_plain(kind, builder)?;
        }
        Ok(())
    }

    fn register_stateful_kinds(&mut self) -> Result<(), RegistryError> {
        use StateDomain::{Only, Range};

        self.register_states(BlockKind(2), Range(0..11), TintedCube::new(0, 3, GRASS_TINT, false))?;
        self.register_states(
            BlockKind(6),
            Range(0..4),
            TileChoice::new(simple::sapling_tiles, CubeStyle::Billboard),
        )?;
        self.register_states(BlockKind(9), Range(0..32), WaterFlow)?;
        self.register_states(
            BlockKind(17),
            Range(0..3),
            TileChoice::new(simple::wood_tiles, CubeStyle::Standard),
        )?;
        self.register_states(BlockKind(18), Range(0..16), TintedCube::new(52, 52, LEAF_TINT, true))?;
        self.register_states(BlockKind(23), Range(0..6), FacedCube::new(62, 46, 45))?;
        self.register_states(BlockKind(27), Range(0..14), Rail::powered(163, 179, 112))?;
        self.register_states(BlockKind(28), Range(0..6), Rail::new(195, 112))?;
        self.register_states(
            BlockKind(35),
            Range(0..16),
            TileChoice::new(simple::wool_tiles, CubeStyle::Standard),
        )?;
        self.register_states(
            BlockKind(43),
            Range(0..4),
            TileChoice::new(simple::slab_tiles, CubeStyle::Standard),
        )?;
        self.register_states(
            BlockKind(44),
            Range(0..4),
            TileChoice::new(simple::slab_tiles, CubeStyle::HalfStep),
        )?;
        self.register_states(BlockKind(50), Range(1..6), Torch::new(80))?;
        self.register_states(BlockKind(51), Range(0..16), Fire)?;
        self.register_states(BlockKind(53), Range(0..4), Stairs::new(4))?;
        self.register_states(BlockKind(55), Range(0..128), RedstoneWire::new(165, 164))?;
        self.register_states(BlockKind(58), Only(&[0]), FullFaces::new(43, 59, 60))?;
        self.register_states(BlockKind(59), Range(0..8), Crops::new(88))?;
        self.register_states(BlockKind(61), Range(0..6), FacedCube::new(62, 45, 44))?;
        self.register_states(BlockKind(62), Range(0..6), FacedCube::new(62, 45, 61))?;
        self.register_states(BlockKind(64), Range(0..16), Door::new(81, 97))?;
        self.register_states(BlockKind(65), Only(&[2, 3, 4, 5]), Ladder::new(83))?;
        self.register_states(BlockKind(66), Range(0..10), Rail::new(128, 112))?;
        self.register_states(BlockKind(67), Range(0..4), Stairs::new(16))?;
        self.register_states(BlockKind(71), Range(0..16), Door::new(82, 98))?;
        self.register_states(BlockKind(75), Range(1..6), Torch::new(115))?;
        self.register_states(BlockKind(76), Range(1..6), Torch::new(99))?;
        self.register_states(BlockKind(85), Range(0..17), Fence::new(4))?;
        self.register_states(BlockKind(86), Range(0..5), FacedCube::new(102, 119, 118))?;
        self.register_states(BlockKind(91), Range(0..5), FacedCube::new(102, 120, 118))?;
        self.register_states(
            BlockKind(92),
            Range(0..6),
            TileChoice::new(simple::cake_tiles, CubeStyle::Cake),
        )?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
