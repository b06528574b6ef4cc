//! Rails: flat straights and corners, and the four slopes.

use image::{Rgba, RgbaImage};

use super::VariantBuilder;
use crate::atlas::TileSet;
use crate::compositor::{alpha_over, canvas, draw_line};
use crate::projection::{TopSize, flip_vertical, mirror, project_slope, project_top, rotate_quarter_ccw};
use crate::sprite::AncillaryState;

/// Color of the line drawn for slopes seen edge-on.
const EDGE_GREY: Rgba<u8> = Rgba([164, 164, 164, 255]);

/// A rail type. Powered rails pick their straight tile from bit `0x8`.
#[derive(Clone, Copy, Debug)]
pub struct Rail {
    straight: u8,
    powered_straight: Option<u8>,
    corner: u8,
}

impl Rail {
    pub fn new(straight: u8, corner: u8) -> Self {
        Self {
            straight,
            powered_straight: None,
            corner,
        }
    }

    pub fn powered(straight: u8, powered_straight: u8, corner: u8) -> Self {
        Self {
            straight,
            powered_straight: Some(powered_straight),
            corner,
        }
    }
}

impl VariantBuilder for Rail {
    fn generate(&self, state: AncillaryState, tiles: &TileSet) -> Option<RgbaImage> {
        let (straight, shape) = match self.powered_straight {
            Some(powered) if state & 0x8 != 0 => (powered, state & 0x7),
            Some(_) => (self.straight, state & 0x7),
            None => (self.straight, state),
        };
        let straight = tiles.tile(straight);
        let corner = tiles.tile(self.corner);

        let mut img = canvas();
        let track = match shape {
            0 => straight.clone(),
            1 => rotate_quarter_ccw(straight, 1),
            6 => corner.clone(),
            7 => rotate_quarter_ccw(corner, 3),
            8 => rotate_quarter_ccw(&flip_vertical(corner), 1),
            9 => flip_vertical(corner),
            2 => {
                alpha_over(&mut img, &mirror(&project_slope(straight)), 2, 0);
                return Some(img);
            }
            3 => {
                draw_line(&mut img, (11, 11), (23, 17), EDGE_GREY);
                return Some(img);
            }
            4 => {
                alpha_over(&mut img, &project_slope(straight), 0, 0);
                return Some(img);
            }
            5 => {
                draw_line(&mut img, (1, 17), (12, 11), EDGE_GREY);
                return Some(img);
            }
            _ => straight.clone(),
        };
        alpha_over(&mut img, &project_top(&track, TopSize::Standard), 0, 12);
        Some(img)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_tiles;

    fn opaque(img: &RgbaImage) -> Vec<(u32, u32)> {
        img.enumerate_pixels()
            .filter(|(_, _, p)| p[3] > 0)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn test_edge_on_slopes_draw_only_a_grey_line() {
        let tiles = test_tiles();
        let rail = Rail::new(128, 112);

        for (state, from, to, length) in [(3, (11, 11), (23, 17), 13), (5, (1, 17), (12, 11), 12)] {
            let img = rail.generate(state, &tiles).unwrap();
            let pixels = opaque(&img);

            assert_eq!(pixels.len(), length, "state {state}");
            assert!(pixels.contains(&from) && pixels.contains(&to), "state {state}");
            for (x, y) in pixels {
                assert_eq!(img.get_pixel(x, y), &EDGE_GREY, "state {state} ({x},{y})");
            }
        }
    }

    #[test]
    fn test_powered_bit_only_changes_the_straight_tile() {
        let tiles = test_tiles();
        let powered = Rail::powered(163, 179, 112);

        assert_eq!(
            powered.generate(0x8 | 3, &tiles),
            Rail::new(195, 112).generate(3, &tiles)
        );
        assert_eq!(
            powered.generate(0x8 | 1, &tiles),
            Rail::new(179, 112).generate(1, &tiles)
        );
        assert_eq!(
            powered.generate(6, &tiles),
            Rail::new(163, 112).generate(6, &tiles)
        );
    }

    #[test]
    fn test_flat_track_lies_on_the_floor() {
        let tiles = test_tiles();
        let rail = Rail::new(128, 112);

        for state in [0, 1, 6, 7, 8, 9] {
            let img = rail.generate(state, &tiles).unwrap();
            let pixels = opaque(&img);
            assert!(!pixels.is_empty(), "state {state}");
            assert!(pixels.iter().all(|&(_, y)| y >= 12), "state {state}");
        }
    }
}
