//! Face compositing: alpha-over layering, per-face shading and pixel touch-ups.

use image::{Rgba, RgbaImage};

/// Width and height of every finished sprite.
pub const SPRITE_SIZE: u32 = 24;

/// Brightness of faces turned towards the left.
pub const LEFT_SHADE: f32 = 0.9;

/// Brightness of faces turned towards the right.
pub const RIGHT_SHADE: f32 = 0.8;

/// Gaps the side shear leaves along the bottom-right edge; filled from `x - 1`.
const SEAMS_FROM_LEFT: [(u32, u32); 3] = [(13, 23), (17, 21), (21, 19)];

/// Gaps along the top-left edge; filled from `x + 1`.
const SEAMS_FROM_RIGHT: [(u32, u32); 3] = [(3, 4), (7, 2), (11, 0)];

/// An inclusive pixel rectangle `(x0, y0)..=(x1, y1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl Rect {
    pub const fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }
}

/// A fully transparent sprite canvas.
pub fn canvas() -> RgbaImage {
    RgbaImage::new(SPRITE_SIZE, SPRITE_SIZE)
}

/// Composites `src` over `dst` with its top-left corner at `(x, y)`.
///
/// Offsets may be negative; anything outside `dst` is clipped. The source's own
/// alpha is the blend weight, so a pixel laid over a fully transparent one is
/// copied unchanged.
pub fn alpha_over(dst: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    let (dw, dh) = (dst.width() as i64, dst.height() as i64);
    for (sx, sy, pixel) in src.enumerate_pixels() {
        let tx = x + sx as i64;
        let ty = y + sy as i64;
        if tx < 0 || ty < 0 || tx >= dw || ty >= dh {
            continue;
        }
        blend(dst.get_pixel_mut(tx as u32, ty as u32), *pixel);
    }
}

fn blend(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    let sa = src[3] as u32;
    if sa == 0 {
        return;
    }
    if sa == 255 {
        *dst = src;
        return;
    }

    // Both weights are scaled by 255².
    let src_weight = sa * 255;
    let dst_weight = dst[3] as u32 * (255 - sa);
    let total = src_weight + dst_weight;
    for c in 0..3 {
        let sum = src[c] as u32 * src_weight + dst[c] as u32 * dst_weight;
        dst[c] = ((sum + total / 2) / total) as u8;
    }
    dst[3] = ((total + 127) / 255) as u8;
}

/// Scales the color channels of `img` by `factor`, leaving alpha untouched.
pub fn shade(img: &RgbaImage, factor: f32) -> RgbaImage {
    let mut out = img.clone();
    for pixel in out.pixels_mut() {
        for c in 0..3 {
            pixel[c] = (pixel[c] as f32 * factor) as u8;
        }
    }
    out
}

/// Closes the one-pixel gaps a standard two-sided cube leaves along its edges.
pub fn touch_up_seams(img: &mut RgbaImage) {
    for (x, y) in SEAMS_FROM_LEFT {
        let from = *img.get_pixel(x - 1, y);
        img.put_pixel(x, y, from);
    }
    for (x, y) in SEAMS_FROM_RIGHT {
        let from = *img.get_pixel(x + 1, y);
        img.put_pixel(x, y, from);
    }
}

/// Makes every pixel of `img` inside `rect` fully transparent.
pub fn clear_rect(img: &mut RgbaImage, rect: Rect) {
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        if rect.contains(x, y) {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }
}

/// Returns a copy of `img` with everything outside the union of `rects` cleared.
pub fn keep_rects(img: &RgbaImage, rects: &[Rect]) -> RgbaImage {
    let mut out = img.clone();
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        if !rects.iter().any(|r| r.contains(x, y)) {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }
    out
}

/// Copies the `width × height` region at `(x, y)` out of `img`.
pub fn crop(img: &RgbaImage, x: u32, y: u32, width: u32, height: u32) -> RgbaImage {
    image::imageops::crop_imm(img, x, y, width, height).to_image()
}

/// Draws an opaque one-pixel line between two inclusive endpoints.
pub fn draw_line(img: &mut RgbaImage, from: (i32, i32), to: (i32, i32), color: Rgba<u8>) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let step_x = if x < to.0 { 1 } else { -1 };
    let step_y = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
            img.put_pixel(x as u32, y as u32, color);
        }
        if (x, y) == to {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += step_x;
        }
        if e2 <= dx {
            err += dx;
            y += step_y;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
