//! Builders for cube-like kinds that differ only in which tiles they use.

use image::{Rgb, RgbaImage};

use super::VariantBuilder;
use crate::atlas::{AuxTexture, TileSet};
use crate::compositor::{alpha_over, canvas};
use crate::cube::{self, CubeStyle, Faces, build_block, build_full_block};
use crate::projection::{TopSize, mirror, project_side, project_top};
use crate::sprite::AncillaryState;
use crate::tint::tint;

/// Wool tiles, indexed by color.
pub const WOOL_TILES: [u8; 16] = [
    64, 210, 194, 178, 162, 146, 130, 114, 225, 209, 193, 177, 161, 145, 129, 113,
];

// ---------------------------------------------------------------------------
// Tile selectors
// ---------------------------------------------------------------------------

// Only birch (2) gets its own tile; spruce (1) renders as the oak sapling.
pub(super) fn sapling_tiles(state: AncillaryState) -> Option<(u8, u8)> {
    let tile = match state {
        2 => 79,
        _ => 15,
    };
    Some((tile, tile))
}

pub(super) fn wood_tiles(state: AncillaryState) -> Option<(u8, u8)> {
    let side = match state {
        0 => 20,
        1 => 116,
        2 => 117,
        _ => return None,
    };
    Some((21, side))
}

pub(super) fn wool_tiles(state: AncillaryState) -> Option<(u8, u8)> {
    WOOL_TILES.get(state as usize).map(|&tile| (tile, tile))
}

pub(super) fn slab_tiles(state: AncillaryState) -> Option<(u8, u8)> {
    match state {
        0 => Some((6, 5)),
        1 => Some((176, 192)),
        2 => Some((4, 4)),
        3 => Some((16, 16)),
        _ => None,
    }
}

pub(super) fn cake_tiles(_state: AncillaryState) -> Option<(u8, u8)> {
    Some((121, 122))
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// A simple cube with fixed top and side tiles.
#[derive(Clone, Copy, Debug)]
pub struct PlainCube {
    top: u8,
    side: u8,
    style: CubeStyle,
}

impl PlainCube {
    pub fn new(top: u8, side: u8, style: CubeStyle) -> Self {
        Self { top, side, style }
    }
}

impl VariantBuilder for PlainCube {
    fn generate(&self, _state: AncillaryState, tiles: &TileSet) -> Option<RgbaImage> {
        Some(build_block(
            tiles.tile(self.top),
            Some(tiles.tile(self.side)),
            self.style,
        ))
    }
}

/// A cube textured with a standalone texture; optionally top face only.
#[derive(Clone, Copy, Debug)]
pub struct AuxCube {
    texture: AuxTexture,
    with_sides: bool,
}

impl AuxCube {
    pub fn new(texture: AuxTexture, with_sides: bool) -> Self {
        Self {
            texture,
            with_sides,
        }
    }
}

impl VariantBuilder for AuxCube {
    fn generate(&self, _state: AncillaryState, tiles: &TileSet) -> Option<RgbaImage> {
        let texture = tiles.auxiliary(self.texture)?;
        let side = self.with_sides.then_some(texture);
        Some(build_block(texture, side, CubeStyle::Standard))
    }
}

/// A cube whose state picks its `(top, side)` tiles.
#[derive(Clone, Copy, Debug)]
pub struct TileChoice {
    select: fn(AncillaryState) -> Option<(u8, u8)>,
    style: CubeStyle,
}

impl TileChoice {
    pub fn new(select: fn(AncillaryState) -> Option<(u8, u8)>, style: CubeStyle) -> Self {
        Self { select, style }
    }
}

impl VariantBuilder for TileChoice {
    fn generate(&self, state: AncillaryState, tiles: &TileSet) -> Option<RgbaImage> {
        let (top, side) = (self.select)(state)?;
        Some(build_block(tiles.tile(top), Some(tiles.tile(side)), self.style))
    }
}

/// A cube with a biome-tinted top and, optionally, tinted sides.
#[derive(Clone, Copy, Debug)]
pub struct TintedCube {
    top: u8,
    side: u8,
    color: Rgb<u8>,
    tint_sides: bool,
}

impl TintedCube {
    pub fn new(top: u8, side: u8, color: Rgb<u8>, tint_sides: bool) -> Self {
        Self {
            top,
            side,
            color,
            tint_sides,
        }
    }
}

impl VariantBuilder for TintedCube {
    fn generate(&self, _state: AncillaryState, tiles: &TileSet) -> Option<RgbaImage> {
        let top = tint(tiles.tile(self.top), self.color);
        let side = if self.tint_sides {
            tint(tiles.tile(self.side), self.color)
        } else {
            tiles.tile(self.side).clone()
        };
        Some(build_block(&top, Some(&side), CubeStyle::Standard))
    }
}

/// A cube with distinct unshaded front and side textures.
#[derive(Clone, Copy, Debug)]
pub struct FacedCube {
    top: u8,
    left: u8,
    right: u8,
}

impl FacedCube {
    pub fn new(top: u8, left: u8, right: u8) -> Self {
        Self { top, left, right }
    }
}

impl VariantBuilder for FacedCube {
    fn generate(&self, _state: AncillaryState, tiles: &TileSet) -> Option<RgbaImage> {
        Some(cube::build_faced_block(
            tiles.tile(self.top),
            tiles.tile(self.left),
            tiles.tile(self.right),
        ))
    }
}

/// A full block with a top and two distinct front faces.
#[derive(Clone, Copy, Debug)]
pub struct FullFaces {
    top: u8,
    left: u8,
    right: u8,
}

impl FullFaces {
    pub fn new(top: u8, left: u8, right: u8) -> Self {
        Self { top, left, right }
    }
}

impl VariantBuilder for FullFaces {
    fn generate(&self, _state: AncillaryState, tiles: &TileSet) -> Option<RgbaImage> {
        let faces = Faces {
            top: Some(tiles.tile(self.top)),
            side3: Some(tiles.tile(self.left)),
            side4: Some(tiles.tile(self.right)),
            ..Faces::default()
        };
        Some(build_full_block(&faces, CubeStyle::Standard))
    }
}

/// Water drawn on the faces selected by the state's flag bits.
///
/// `0x10` top, `0x1` back-left, `0x8` back-right, `0x2` front-left and
/// `0x4` front-right.
#[derive(Clone, Copy, Debug)]
pub struct WaterFlow;

impl VariantBuilder for WaterFlow {
    fn generate(&self, state: AncillaryState, tiles: &TileSet) -> Option<RgbaImage> {
        let water = tiles.auxiliary(AuxTexture::Water)?;
        let face = |bit: u8| (state & bit != 0).then_some(water);
        let faces = Faces {
            top: face(0x10),
            side1: face(0x1),
            side2: face(0x8),
            side3: face(0x2),
            side4: face(0x4),
            bottom: None,
        };
        Some(build_full_block(&faces, CubeStyle::Standard))
    }
}

/// Fire on all four vertical faces, unshaded.
#[derive(Clone, Copy, Debug)]
pub struct Fire;

impl VariantBuilder for Fire {
    fn generate(&self, _state: AncillaryState, tiles: &TileSet) -> Option<RgbaImage> {
        let fire = tiles.auxiliary(AuxTexture::Fire)?;
        let side = project_side(fire);
        let other = mirror(&side);

        let mut img = canvas();
        alpha_over(&mut img, &side, 12, 0);
        alpha_over(&mut img, &other, 0, 0);
        alpha_over(&mut img, &side, 0, 6);
        alpha_over(&mut img, &other, 12, 6);
        Some(img)
    }
}

/// Crops: the growth stage picks a tile drawn flat and as a crossed billboard.
#[derive(Clone, Copy, Debug)]
pub struct Crops {
    first_tile: u8,
}

impl Crops {
    pub fn new(first_tile: u8) -> Self {
        Self { first_tile }
    }
}

impl VariantBuilder for Crops {
    fn generate(&self, state: AncillaryState, tiles: &TileSet) -> Option<RgbaImage> {
        let raw = tiles.tile(self.first_tile.checked_add(state)?);
        let flat = project_top(raw, TopSize::Standard);
        let side = project_side(raw);
        let other = mirror(&side);

        let mut img = canvas();
        alpha_over(&mut img, &flat, 0, 12);
        alpha_over(&mut img, &side, 6, 3);
        alpha_over(&mut img, &other, 6, 3);
        Some(img)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selectors() {
        assert_eq!(sapling_tiles(0), Some((15, 15)));
        assert_eq!(sapling_tiles(1), Some((15, 15)));
        assert_eq!(sapling_tiles(2), Some((79, 79)));
        assert_eq!(sapling_tiles(3), Some((15, 15)));

        assert_eq!(wood_tiles(1), Some((21, 116)));
        assert_eq!(wood_tiles(3), None);

        assert_eq!(wool_tiles(0), Some((64, 64)));
        assert_eq!(wool_tiles(15), Some((113, 113)));
        assert_eq!(wool_tiles(16), None);

        assert_eq!(slab_tiles(1), Some((176, 192)));
        assert_eq!(slab_tiles(4), None);
    }
}
