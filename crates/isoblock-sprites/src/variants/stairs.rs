//! Stairs: two stacked half blocks, ascending towards one of four directions.

use image::RgbaImage;

use super::VariantBuilder;
use crate::atlas::TileSet;
use crate::compositor::{Rect, alpha_over, canvas, clear_rect, shade};
use crate::cube::{CubeStyle, Faces, build_full_block};
use crate::projection::{TopSize, mirror, project_side, project_top};
use crate::sprite::AncillaryState;

/// The partial textures a staircase is assembled from.
struct Pieces {
    full: RgbaImage,
    side: RgbaImage,
    upper: RgbaImage,
    lower: RgbaImage,
    left: RgbaImage,
    right: RgbaImage,
}

impl Pieces {
    fn cut(tile: &RgbaImage) -> Self {
        let cleared = |rect: Rect| {
            let mut img = tile.clone();
            clear_rect(&mut img, rect);
            img
        };
        Self {
            full: tile.clone(),
            side: cleared(Rect::new(0, 0, 7, 6)),
            upper: cleared(Rect::new(0, 8, 15, 15)),
            lower: cleared(Rect::new(0, 0, 15, 6)),
            left: cleared(Rect::new(8, 0, 15, 15)),
            right: cleared(Rect::new(0, 0, 7, 15)),
        }
    }
}

/// Stairs made of a single material tile.
#[derive(Clone, Copy, Debug)]
pub struct Stairs {
    tile: u8,
}

impl Stairs {
    pub fn new(tile: u8) -> Self {
        Self { tile }
    }
}

impl VariantBuilder for Stairs {
    fn generate(&self, state: AncillaryState, tiles: &TileSet) -> Option<RgbaImage> {
        let p = Pieces::cut(tiles.tile(self.tile));
        let img = match state {
            0 => {
                let side = mirror(&p.side);
                let mut img = full(&p.right, &p.lower, &side);
                let riser = shade(&project_side(&p.upper), 0.8);
                alpha_over(&mut img, &riser, 6, 3);
                alpha_over(&mut img, &project_top(&p.left, TopSize::Standard), 0, 6);
                img
            }
            1 => {
                let mut img = canvas();
                alpha_over(&mut img, &project_top(&p.right, TopSize::Standard), 0, 6);
                alpha_over(&mut img, &full(&p.left, &p.full, &p.side), 0, 0);
                img
            }
            2 => {
                let mut img = canvas();
                alpha_over(&mut img, &project_top(&p.upper, TopSize::Standard), 0, 6);
                alpha_over(&mut img, &full(&p.lower, &p.side, &p.full), 0, 0);
                img
            }
            3 => {
                let side = mirror(&p.side);
                let mut img = full(&p.upper, &side, &p.lower);
                let riser = shade(&mirror(&project_side(&p.upper)), 0.7);
                alpha_over(&mut img, &riser, 6, 3);
                alpha_over(&mut img, &project_top(&p.lower, TopSize::Standard), 0, 6);
                img.put_pixel(18, 3, image::Rgba([0, 0, 0, 0]));
                img
            }
            _ => return None,
        };
        Some(img)
    }
}

fn full(top: &RgbaImage, left: &RgbaImage, right: &RgbaImage) -> RgbaImage {
    let faces = Faces {
        top: Some(top),
        side3: Some(left),
        side4: Some(right),
        ..Faces::default()
    };
    build_full_block(&faces, CubeStyle::Standard)
}
