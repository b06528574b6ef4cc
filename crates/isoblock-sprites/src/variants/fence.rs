//! Fences: a center post with up to four connecting rails.

use image::RgbaImage;

use super::VariantBuilder;
use crate::atlas::TileSet;
use crate::compositor::{LEFT_SHADE, RIGHT_SHADE, Rect, alpha_over, canvas, keep_rects, shade};
use crate::cube::{CubeStyle, side_face};
use crate::projection::{TopSize, mirror, project_top};
use crate::sprite::AncillaryState;

/// Post cross-section, seen from above.
const POST_TOP: [Rect; 1] = [Rect::new(6, 6, 9, 9)];
/// Post seen from the side.
const POST_SIDE: [Rect; 1] = [Rect::new(6, 1, 9, 15)];
/// The two horizontal rails.
const RAILS: [Rect; 2] = [Rect::new(10, 1, 15, 3), Rect::new(10, 7, 15, 9)];

/// A fence cut from a material tile.
///
/// Bits `0x1` and `0x8` add the back rails, `0x2` and `0x4` the front rails.
#[derive(Clone, Copy, Debug)]
pub struct Fence {
    tile: u8,
}

impl Fence {
    pub fn new(tile: u8) -> Self {
        Self { tile }
    }
}

impl VariantBuilder for Fence {
    fn generate(&self, state: AncillaryState, tiles: &TileSet) -> Option<RgbaImage> {
        let raw = tiles.tile(self.tile);
        let post = post(raw);

        let rail = side_face(&keep_rects(raw, &RAILS), CubeStyle::Standard);
        let rail_mirrored = shade(&mirror(&rail), LEFT_SHADE);
        let rail = shade(&rail, LEFT_SHADE);

        let mut img = canvas();
        if state & 0x1 != 0 {
            alpha_over(&mut img, &rail, -2, 0);
        }
        if state & 0x8 != 0 {
            alpha_over(&mut img, &rail_mirrored, 14, 0);
        }
        alpha_over(&mut img, &post, 0, 0);
        if state & 0x2 != 0 {
            alpha_over(&mut img, &rail_mirrored, 6, 4);
        }
        if state & 0x4 != 0 {
            alpha_over(&mut img, &rail, 6, 4);
        }
        Some(img)
    }
}

fn post(raw: &RgbaImage) -> RgbaImage {
    let side = side_face(&keep_rects(raw, &POST_SIDE), CubeStyle::Standard);
    let top = project_top(&keep_rects(raw, &POST_TOP), TopSize::Standard);

    let mut img = canvas();
    alpha_over(&mut img, &shade(&side, LEFT_SHADE), 5, 4);
    alpha_over(&mut img, &shade(&mirror(&side), RIGHT_SHADE), 7, 4);
    alpha_over(&mut img, &top, 0, 1);
    img
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_tiles;
    use image::Rgba;

    #[test]
    fn test_post_is_centered() {
        let raw = RgbaImage::from_pixel(16, 16, Rgba([120, 90, 40, 255]));
        let img = post(&raw);

        assert!(img.get_pixel(12, 12)[3] > 0);
        for x in 0..3 {
            for y in 0..24 {
                assert_eq!(img.get_pixel(x, y)[3], 0, "({x},{y})");
            }
        }
    }

    fn coverage(img: &RgbaImage) -> Vec<(u32, u32)> {
        img.enumerate_pixels()
            .filter(|(_, _, p)| p[3] > 0)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn test_connection_bits_add_rails() {
        let tiles = test_tiles();
        let fence = Fence::new(4);
        let alone = fence.generate(0, &tiles).unwrap();
        assert_eq!(alone, post(tiles.tile(4)));
        let base = coverage(&alone);

        for bit in [0x1, 0x2, 0x4, 0x8] {
            let connected = coverage(&fence.generate(bit, &tiles).unwrap());
            assert!(base.iter().all(|p| connected.contains(p)), "bit {bit:#x}");
            let added: Vec<_> = connected.iter().filter(|p| !base.contains(p)).collect();
            assert!(!added.is_empty(), "bit {bit:#x}");

            match bit {
                // Back rails run off towards the far corners.
                0x1 => assert!(added.iter().all(|&&(x, _)| x < 10)),
                0x8 => assert!(added.iter().all(|&&(x, _)| x >= 14)),
                // Front rails start at (6, 4).
                _ => assert!(added.iter().all(|&&(x, y)| x >= 6 && y >= 4)),
            }
        }

        let all = coverage(&fence.generate(0xf, &tiles).unwrap());
        for bit in [0x1, 0x2, 0x4, 0x8] {
            let connected = coverage(&fence.generate(bit, &tiles).unwrap());
            assert!(connected.iter().all(|p| all.contains(p)), "bit {bit:#x}");
        }
    }
}
