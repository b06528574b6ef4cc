//! Biome tinting: grayscale a texture, then colorize it from black to a tint color.

use image::{Rgb, Rgba, RgbaImage};

/// Default tint for grass tops when no biome data is available.
pub const GRASS_TINT: Rgb<u8> = Rgb([115, 175, 71]);

/// Default tint for leaves when no biome data is available.
pub const LEAF_TINT: Rgb<u8> = Rgb([37, 118, 25]);

/// Color of powered redstone wire.
pub const WIRE_POWERED: Rgb<u8> = Rgb([255, 0, 0]);

/// Color of unpowered redstone wire.
pub const WIRE_UNPOWERED: Rgb<u8> = Rgb([48, 0, 0]);

/// ITU-R 601 luma, rounded.
fn luma(r: u8, g: u8, b: u8) -> u32 {
    (r as u32 * 299 + g as u32 * 587 + b as u32 * 114 + 500) / 1000
}

/// Recolors `img` so that black stays black and white becomes `color`.
///
/// Each pixel's Rec. 601 luma scales the tint linearly. Alpha is copied unchanged, so
/// this works on raw tiles and on finished sprites alike.
pub fn tint(img: &RgbaImage, color: Rgb<u8>) -> RgbaImage {
    let mut out = RgbaImage::new(img.width(), img.height());
    for (src, dst) in img.pixels().zip(out.pixels_mut()) {
        let level = luma(src[0], src[1], src[2]);
        let channel = |c: u8| (level * c as u32 / 255) as u8;
        *dst = Rgba([
            channel(color[0]),
            channel(color[1]),
            channel(color[2]),
            src[3],
        ]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tint_preserves_alpha() {
        let img = RgbaImage::from_fn(16, 16, |x, y| {
            Rgba([x as u8 * 16, y as u8 * 16, 128, (x * 16 + y) as u8])
        });
        let tinted = tint(&img, GRASS_TINT);
        for (a, b) in img.pixels().zip(tinted.pixels()) {
            assert_eq!(a[3], b[3]);
        }
    }

    #[test]
    fn test_tint_maps_white_to_color_and_black_to_black() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([255, 255, 255, 255]));
        img.put_pixel(1, 0, Rgba([0, 0, 0, 200]));
        let tinted = tint(&img, GRASS_TINT);

        assert_eq!(tinted.get_pixel(0, 0), &Rgba([115, 175, 71, 255]));
        assert_eq!(tinted.get_pixel(1, 0), &Rgba([0, 0, 0, 200]));
    }

    #[test]
    fn test_unpowered_wire_is_dark_red() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255]));
        let tinted = tint(&img, WIRE_UNPOWERED);
        assert_eq!(tinted.get_pixel(0, 0), &Rgba([48, 0, 0, 255]));
    }

    #[test]
    fn test_luma_uses_rec601_weights() {
        assert_eq!(luma(255, 0, 0), 76);
        assert_eq!(luma(0, 255, 0), 150);
        assert_eq!(luma(0, 0, 255), 29);
        assert_eq!(luma(255, 255, 255), 255);

        let img = RgbaImage::from_pixel(1, 1, Rgba([0, 255, 0, 255]));
        let tinted = tint(&img, Rgb([255, 200, 100]));
        assert_eq!(tinted.get_pixel(0, 0), &Rgba([150, 117, 58, 255]));
    }
}
