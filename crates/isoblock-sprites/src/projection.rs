//! Affine projections that turn flat tiles into the faces of an isometric cube.
//!
//! Every transform is expressed as an *inverse* mapping: for each output pixel
//! center the matrix yields the source coordinate to sample. Pixels that map
//! outside the source stay fully transparent.

use std::f32::consts::FRAC_PI_4;

use glam::{Affine2, Mat2, Vec2};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

/// Width of a projected top face.
pub const TOP_WIDTH: u32 = 24;
/// Height of a projected top face.
pub const TOP_HEIGHT: u32 = 12;
/// Width of a projected side face.
pub const SIDE_WIDTH: u32 = 12;
/// Height of a projected side face.
pub const SIDE_HEIGHT: u32 = 18;
/// Width and height of a projected slope.
pub const SLOPE_SIZE: u32 = 24;

/// Side length a tile is resized to before the side and slope shears.
const SHEAR_INPUT: u32 = 12;

/// Pivot of the top-face rotation, in resized tile coordinates.
const TOP_PIVOT: f32 = 8.5;

/// Resize applied to a tile before it becomes a top face.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TopSize {
    /// 17×17: the diagonal comes out at roughly 24 pixels.
    #[default]
    Standard,
    /// 15×15: for kinds whose top texture is inset (cactus, cake).
    Narrow,
}

impl TopSize {
    fn pixels(self) -> u32 {
        match self {
            TopSize::Standard => 17,
            TopSize::Narrow => 15,
        }
    }
}

/// Sampling filter used by [`warp`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sampling {
    /// Hard edges; used when rotating already projected artwork.
    Nearest,
    /// Alpha-weighted bilinear interpolation.
    Bilinear,
}

/// Projects `tile` into the 24×12 diamond of a cube's top face.
pub fn project_top(tile: &RgbaImage, size: TopSize) -> RgbaImage {
    let n = size.pixels();
    let resized = resize_smooth(tile, n, n);
    let inverse = Affine2::from_translation(Vec2::splat(TOP_PIVOT))
        * Affine2::from_angle(FRAC_PI_4)
        * Affine2::from_translation(Vec2::splat(-(TOP_WIDTH as f32) / 2.0))
        * Affine2::from_scale(Vec2::new(1.0, 2.0));
    warp(&resized, TOP_WIDTH, TOP_HEIGHT, inverse, Sampling::Bilinear)
}

/// Shears `tile` into the 12×18 left face of a cube.
///
/// The right face is the horizontal mirror of this result.
pub fn project_side(tile: &RgbaImage) -> RgbaImage {
    let resized = resize_smooth(tile, SHEAR_INPUT, SHEAR_INPUT);
    let inverse = Affine2::from_mat2(Mat2::from_cols(Vec2::new(1.0, -0.5), Vec2::new(0.0, 1.0)));
    warp(&resized, SIDE_WIDTH, SIDE_HEIGHT, inverse, Sampling::Bilinear)
}

/// Shears `tile` into a 24×24 ramp rising towards the top left.
pub fn project_slope(tile: &RgbaImage) -> RgbaImage {
    let resized = resize_smooth(tile, SHEAR_INPUT, SHEAR_INPUT);
    let inverse = Affine2::from_mat2_translation(
        Mat2::from_cols(Vec2::new(0.75, 0.25), Vec2::new(-0.5, 0.5)),
        Vec2::new(3.0, -3.0),
    );
    warp(&resized, SLOPE_SIZE, SLOPE_SIZE, inverse, Sampling::Bilinear)
}

/// Rotates `img` counter-clockwise by `degrees` about its center, keeping its size.
pub fn rotate_nearest(img: &RgbaImage, degrees: f32) -> RgbaImage {
    let center = Vec2::new(img.width() as f32 / 2.0, img.height() as f32 / 2.0);
    let inverse = Affine2::from_translation(center)
        * Affine2::from_angle(degrees.to_radians())
        * Affine2::from_translation(-center);
    warp(img, img.width(), img.height(), inverse, Sampling::Nearest)
}

/// Rotates `img` counter-clockwise by `turns` quarter turns (exact transposes).
pub fn rotate_quarter_ccw(img: &RgbaImage, turns: u8) -> RgbaImage {
    match turns % 4 {
        0 => img.clone(),
        1 => imageops::rotate270(img),
        2 => imageops::rotate180(img),
        _ => imageops::rotate90(img),
    }
}

/// Mirrors `img` left to right.
pub fn mirror(img: &RgbaImage) -> RgbaImage {
    imageops::flip_horizontal(img)
}

/// Mirrors `img` top to bottom.
pub fn flip_vertical(img: &RgbaImage) -> RgbaImage {
    imageops::flip_vertical(img)
}

/// Resamples `img` to `width × height` with a smooth filter.
pub fn resize_smooth(img: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if img.dimensions() == (width, height) {
        return img.clone();
    }
    imageops::resize(img, width, height, FilterType::Lanczos3)
}

/// Produces a `width × height` image by sampling `src` at `inverse(output pixel center)`.
pub fn warp(
    src: &RgbaImage,
    width: u32,
    height: u32,
    inverse: Affine2,
    sampling: Sampling,
) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let at = inverse.transform_point2(Vec2::new(x as f32 + 0.5, y as f32 + 0.5));
        match sampling {
            Sampling::Nearest => sample_nearest(src, at),
            Sampling::Bilinear => sample_bilinear(src, at),
        }
    })
}

fn texel(src: &RgbaImage, x: i64, y: i64) -> Option<&Rgba<u8>> {
    if x < 0 || y < 0 || x >= src.width() as i64 || y >= src.height() as i64 {
        None
    } else {
        Some(src.get_pixel(x as u32, y as u32))
    }
}

fn sample_nearest(src: &RgbaImage, at: Vec2) -> Rgba<u8> {
    texel(src, at.x.floor() as i64, at.y.floor() as i64)
        .copied()
        .unwrap_or(Rgba([0, 0, 0, 0]))
}

fn sample_bilinear(src: &RgbaImage, at: Vec2) -> Rgba<u8> {
    // Texel centers sit at half-integer coordinates.
    let fx = at.x - 0.5;
    let fy = at.y - 0.5;
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = fx - x0;
    let ty = fy - y0;

    let taps = [
        (0, 0, (1.0 - tx) * (1.0 - ty)),
        (1, 0, tx * (1.0 - ty)),
        (0, 1, (1.0 - tx) * ty),
        (1, 1, tx * ty),
    ];

    // Color is accumulated premultiplied so transparent texels add no tint.
    let mut color = [0.0f32; 3];
    let mut alpha = 0.0f32;
    for (dx, dy, weight) in taps {
        if weight <= 0.0 {
            continue;
        }
        let Some(p) = texel(src, x0 as i64 + dx, y0 as i64 + dy) else {
            continue;
        };
        let a = p[3] as f32 * weight;
        for (c, acc) in color.iter_mut().enumerate() {
            *acc += p[c] as f32 * a;
        }
        alpha += a;
    }

    let coverage = alpha.round().clamp(0.0, 255.0) as u8;
    if coverage == 0 {
        return Rgba([0, 0, 0, 0]);
    }
    let channel = |v: f32| (v / alpha).round().clamp(0.0, 255.0) as u8;
    Rgba([
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        coverage,
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
