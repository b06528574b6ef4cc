//! Doors and ladders: single unshaded faces placed on one side of the cell.

use image::RgbaImage;

use super::VariantBuilder;
use crate::atlas::TileSet;
use crate::compositor::{alpha_over, canvas};
use crate::projection::{mirror, project_side};
use crate::sprite::AncillaryState;

/// A two-tile-high door.
///
/// Bit `0x8` selects the upper half, bit `0x4` marks the door as swung open and
/// the low two bits give the hinge side.
#[derive(Clone, Copy, Debug)]
pub struct Door {
    upper: u8,
    lower: u8,
}

impl Door {
    pub fn new(upper: u8, lower: u8) -> Self {
        Self { upper, lower }
    }
}

impl VariantBuilder for Door {
    fn generate(&self, state: AncillaryState, tiles: &TileSet) -> Option<RgbaImage> {
        let raw = tiles.tile(if state & 0x8 != 0 { self.upper } else { self.lower });
        let swung = state & 0x4 != 0;

        // The flipped variants keep the knob on the correct side.
        let (face, x, y) = match (state & 0x3, swung) {
            (0, false) => (project_side(raw), 0, 6),
            (0, true) => (mirror(&project_side(&mirror(raw))), 0, 0),
            (1, false) => (mirror(&project_side(raw)), 0, 0),
            (1, true) => (project_side(raw), 12, 0),
            (2, false) => (project_side(&mirror(raw)), 12, 0),
            (2, true) => (mirror(&project_side(raw)), 12, 6),
            (_, false) => (mirror(&project_side(&mirror(raw))), 12, 6),
            (_, true) => (project_side(&mirror(raw)), 0, 6),
        };

        let mut img = canvas();
        alpha_over(&mut img, &face, x, y);
        Some(img)
    }
}

/// A ladder against one of four walls.
#[derive(Clone, Copy, Debug)]
pub struct Ladder {
    tile: u8,
}

impl Ladder {
    pub fn new(tile: u8) -> Self {
        Self { tile }
    }
}

impl VariantBuilder for Ladder {
    fn generate(&self, state: AncillaryState, tiles: &TileSet) -> Option<RgbaImage> {
        let side = project_side(tiles.tile(self.tile));
        let (face, x, y) = match state {
            5 => (side, 0, 6),
            2 => (mirror(&side), 12, 6),
            3 => (mirror(&side), 0, 0),
            4 => (side, 12, 0),
            _ => return None,
        };

        let mut img = canvas();
        alpha_over(&mut img, &face, x, y);
        Some(img)
    }
}
