//! Redstone wire: a flat cross or line on the floor, optionally climbing walls.

use image::RgbaImage;

use super::VariantBuilder;
use crate::atlas::TileSet;
use crate::compositor::{Rect, alpha_over, clear_rect};
use crate::cube::{CubeStyle, Faces, build_full_block};
use crate::projection::rotate_quarter_ccw;
use crate::sprite::AncillaryState;
use crate::tint::{WIRE_POWERED, WIRE_UNPOWERED, tint};

const POWERED: u8 = 0x40;
const UP_LEFT: u8 = 0x20;
const UP_RIGHT: u8 = 0x10;

const TOP_LEFT: u8 = 0x1;
const BOTTOM_LEFT: u8 = 0x2;
const BOTTOM_RIGHT: u8 = 0x4;
const TOP_RIGHT: u8 = 0x8;

/// Rectangles cleared from the cross to isolate each branch.
const BRANCH_CUTS: [(u8, [Rect; 3]); 4] = [
    (
        TOP_LEFT,
        [Rect::new(0, 0, 4, 15), Rect::new(11, 0, 15, 15), Rect::new(0, 11, 15, 15)],
    ),
    (
        TOP_RIGHT,
        [Rect::new(0, 0, 15, 4), Rect::new(0, 0, 4, 15), Rect::new(0, 11, 15, 15)],
    ),
    (
        BOTTOM_LEFT,
        [Rect::new(0, 0, 15, 4), Rect::new(11, 0, 15, 15), Rect::new(0, 11, 15, 15)],
    ),
    (
        BOTTOM_RIGHT,
        [Rect::new(0, 0, 15, 4), Rect::new(0, 0, 4, 15), Rect::new(11, 0, 15, 15)],
    ),
];

/// Wire tinted by power level, drawn from a straight and a cross tile.
#[derive(Clone, Copy, Debug)]
pub struct RedstoneWire {
    wire: u8,
    cross: u8,
}

impl RedstoneWire {
    pub fn new(wire: u8, cross: u8) -> Self {
        Self { wire, cross }
    }

    fn textures(&self, state: AncillaryState, tiles: &TileSet) -> (RgbaImage, RgbaImage) {
        let color = if state & POWERED != 0 {
            WIRE_POWERED
        } else {
            WIRE_UNPOWERED
        };
        (
            tint(tiles.tile(self.wire), color),
            tint(tiles.tile(self.cross), color),
        )
    }
}

impl VariantBuilder for RedstoneWire {
    fn generate(&self, state: AncillaryState, tiles: &TileSet) -> Option<RgbaImage> {
        let (wire, cross) = self.textures(state, tiles);
        let bottom = floor(state, &wire, &cross);
        let climbing = rotate_quarter_ccw(&wire, 1);

        let faces = Faces {
            side1: (state & UP_LEFT != 0).then_some(&climbing),
            side2: (state & UP_RIGHT != 0).then_some(&climbing),
            bottom: Some(&bottom),
            ..Faces::default()
        };
        Some(build_full_block(&faces, CubeStyle::Standard))
    }
}

fn floor(state: AncillaryState, wire: &RgbaImage, cross: &RgbaImage) -> RgbaImage {
    if state & 0x3f == 0 {
        return cross.clone();
    }
    match state & 0xf {
        0b1010 => return wire.clone(),
        0b0101 => return rotate_quarter_ccw(wire, 1),
        _ => {}
    }

    let mut bottom = RgbaImage::new(cross.width(), cross.height());
    for (bit, cuts) in BRANCH_CUTS {
        if state & bit == 0 {
            continue;
        }
        let mut branch = cross.clone();
        for rect in cuts {
            clear_rect(&mut branch, rect);
        }
        alpha_over(&mut bottom, &branch, 0, 0);
    }
    bottom
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_tiles;
    use image::Rgba;

    fn white() -> RgbaImage {
        RgbaImage::from_pixel(16, 16, Rgba([255, 255, 255, 255]))
    }

    #[test]
    fn test_branches_stay_in_their_quadrant() {
        let cross = white();
        let top_left = floor(TOP_LEFT, &cross, &cross);
        assert_eq!(top_left.get_pixel(7, 7)[3], 255);
        assert_eq!(top_left.get_pixel(4, 7)[3], 0);
        assert_eq!(top_left.get_pixel(7, 11)[3], 0);

        let bottom_right = floor(BOTTOM_RIGHT, &cross, &cross);
        assert_eq!(bottom_right.get_pixel(7, 12)[3], 255);
        assert_eq!(bottom_right.get_pixel(7, 4)[3], 0);
    }

    #[test]
    fn test_straight_wire_floor() {
        let tiles = test_tiles();
        let builder = RedstoneWire::new(165, 164);
        let wire = tint(tiles.tile(165), WIRE_UNPOWERED);

        let (straight, cross) = builder.textures(0b1010, &tiles);
        assert_eq!(floor(0b1010, &straight, &cross), wire);
        let (straight, cross) = builder.textures(0b0101, &tiles);
        assert_eq!(floor(0b0101, &straight, &cross), rotate_quarter_ccw(&wire, 1));
    }

    #[test]
    fn test_isolated_wire_uses_cross() {
        let mut cross = white();
        cross.put_pixel(0, 0, Rgba([1, 1, 1, 255]));
        let bottom = floor(POWERED, &white(), &cross);
        assert_eq!(bottom, cross);
    }
}
