//! Torches: tilted against one of four walls, or standing on the floor.

use image::RgbaImage;

use super::VariantBuilder;
use crate::atlas::TileSet;
use crate::compositor::{Rect, alpha_over, canvas, clear_rect, crop};
use crate::cube::{CubeStyle, Faces, build_full_block};
use crate::projection::rotate_nearest;
use crate::sprite::AncillaryState;

/// Wall tilt in degrees.
const TILT: f32 = 15.0;

/// A torch drawn from a small atlas tile.
///
/// States 1–4 lean against a wall, state 5 stands on the floor.
#[derive(Clone, Copy, Debug)]
pub struct Torch {
    tile: u8,
}

impl Torch {
    pub fn new(tile: u8) -> Self {
        Self { tile }
    }
}

impl VariantBuilder for Torch {
    fn generate(&self, state: AncillaryState, tiles: &TileSet) -> Option<RgbaImage> {
        let small = tiles.tile(self.tile);
        if state == 5 {
            return Some(standing(small));
        }

        let angle = match state {
            1 | 4 => -TILT,
            2 | 3 => TILT,
            _ => return None,
        };
        let leaning = rotate_nearest(&stick(small), angle);
        let faces = match state {
            1 => Faces {
                side3: Some(&leaning),
                ..Faces::default()
            },
            2 => Faces {
                side2: Some(&leaning),
                ..Faces::default()
            },
            3 => Faces {
                side1: Some(&leaning),
                ..Faces::default()
            },
            _ => Faces {
                side4: Some(&leaning),
                ..Faces::default()
            },
        };
        Some(build_full_block(&faces, CubeStyle::Standard))
    }
}

/// Thickens the torch tile into a larger stick that survives the side shear.
fn stick(small: &RgbaImage) -> RgbaImage {
    let mut img = RgbaImage::new(small.width(), small.height());
    alpha_over(&mut img, small, -4, -3);
    alpha_over(&mut img, small, -5, -2);
    alpha_over(&mut img, small, -3, -2);
    img
}

/// A free-standing torch built from slices of the tile center.
fn standing(small: &RgbaImage) -> RgbaImage {
    let center = crop(small, 2, 2, 12, 12);
    let mut slice = center.clone();
    clear_rect(&mut slice, Rect::new(6, 0, 12, 12));
    clear_rect(&mut slice, Rect::new(0, 0, 4, 12));

    let mut img = canvas();
    alpha_over(&mut img, &slice, 6, 4);
    alpha_over(&mut img, &center, 5, 5);
    alpha_over(&mut img, &center, 6, 5);
    alpha_over(&mut img, &slice, 6, 6);
    img
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_tiles;
    use image::Rgba;

    #[test]
    fn test_stick_is_shifted_up_and_left() {
        let mut small = RgbaImage::new(16, 16);
        small.put_pixel(8, 8, Rgba([255, 200, 0, 255]));
        let img = stick(&small);

        for (x, y) in [(4, 5), (3, 6), (5, 6)] {
            assert_eq!(img.get_pixel(x, y)[3], 255, "({x},{y})");
        }
        assert_eq!(img.pixels().filter(|p| p[3] > 0).count(), 3);
    }

    #[test]
    fn test_standing_slice_keeps_one_column() {
        let small = RgbaImage::from_pixel(16, 16, Rgba([10, 10, 10, 255]));
        let img = standing(&small);
        // The center copies cover columns 5 to 17; the slice extends column 11 down to row 17.
        assert_eq!(img.get_pixel(5, 5)[3], 255);
        assert_eq!(img.get_pixel(17, 16)[3], 255);
        assert_eq!(img.get_pixel(11, 17)[3], 255);
        assert_eq!(img.get_pixel(11, 18)[3], 0);
        assert_eq!(img.get_pixel(4, 10)[3], 0);
    }

    #[test]
    fn test_wall_torches_land_on_their_wall() {
        let tiles = test_tiles();
        let torch = Torch::new(80);
        let stick = stick(tiles.tile(80));
        let away = rotate_nearest(&stick, TILT);
        let towards = rotate_nearest(&stick, -TILT);

        let cases = [
            (1, Faces { side3: Some(&towards), ..Faces::default() }),
            (2, Faces { side2: Some(&away), ..Faces::default() }),
            (3, Faces { side1: Some(&away), ..Faces::default() }),
            (4, Faces { side4: Some(&towards), ..Faces::default() }),
        ];
        for (state, faces) in cases {
            let img = torch.generate(state, &tiles).unwrap();
            assert_eq!(img, build_full_block(&faces, CubeStyle::Standard), "state {state}");

            // Wall 1 and 3 are on the left half of the cell, 2 and 4 on the right.
            let left_half = state % 2 == 1;
            for (x, _, p) in img.enumerate_pixels() {
                if p[3] > 0 {
                    assert_eq!(x < 12, left_half, "state {state}");
                }
            }
        }
        assert!(torch.generate(0, &tiles).is_none());
        assert!(torch.generate(6, &tiles).is_none());
    }
}
