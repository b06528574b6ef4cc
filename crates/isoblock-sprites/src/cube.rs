//! Cube builders: assemble projected faces into a finished 24×24 sprite.

use image::RgbaImage;

use crate::compositor::{self, LEFT_SHADE, RIGHT_SHADE, alpha_over, canvas, shade};
use crate::projection::{TopSize, mirror, project_side, project_top};
use crate::sprite::BlockKind;

/// Placement rules for a simple cube, chosen by block kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CubeStyle {
    /// A full-height cube.
    #[default]
    Standard,
    /// Two crossed side faces in the middle of the canvas and no top
    /// (flowers, saplings, mushrooms, reeds).
    Billboard,
    /// Inset sides with a narrow top.
    Cactus,
    /// Half-height slab; sides show the lower half of the texture.
    HalfStep,
    /// Thin snow layer; sides show the lower quarter of the texture.
    Snow,
    /// Inset partial-height cake.
    Cake,
}

struct Layout {
    left: (i64, i64),
    right: (i64, i64),
    top: (i64, i64),
    touch_up: bool,
}

impl CubeStyle {
    /// Style the simple builder uses for `kind`.
    pub fn for_kind(kind: BlockKind) -> Self {
        match kind.0 {
            6 | 37 | 38 | 39 | 40 | 83 => CubeStyle::Billboard,
            81 => CubeStyle::Cactus,
            44 => CubeStyle::HalfStep,
            78 => CubeStyle::Snow,
            92 => CubeStyle::Cake,
            _ => CubeStyle::Standard,
        }
    }

    /// Resize used when projecting top faces in this style.
    pub fn top_size(self) -> TopSize {
        match self {
            CubeStyle::Cactus | CubeStyle::Cake => TopSize::Narrow,
            _ => TopSize::Standard,
        }
    }

    /// Masks a side tile before it is sheared.
    ///
    /// Half steps move the lower half of the texture to the top half, snow keeps
    /// only the lower quarter in place. Every other style returns the tile as is.
    pub fn prepare_side(self, tile: &RgbaImage) -> RgbaImage {
        let (width, height) = tile.dimensions();
        match self {
            CubeStyle::HalfStep => {
                let half = height / 2;
                let lower = compositor::crop(tile, 0, half, width, height - half);
                let mut out = RgbaImage::new(width, height);
                alpha_over(&mut out, &lower, 0, 0);
                out
            }
            CubeStyle::Snow => {
                let from = height * 3 / 4;
                let lower = compositor::crop(tile, 0, from, width, height - from);
                let mut out = RgbaImage::new(width, height);
                alpha_over(&mut out, &lower, 0, from as i64);
                out
            }
            _ => tile.clone(),
        }
    }

    fn layout(self) -> Layout {
        let (left, right, top, touch_up) = match self {
            CubeStyle::Standard => ((0, 6), (12, 6), (0, 0), true),
            CubeStyle::Billboard => ((6, 3), (6, 3), (0, 0), false),
            CubeStyle::Cactus => ((2, 6), (10, 6), (0, 2), true),
            CubeStyle::HalfStep => ((0, 12), (12, 12), (0, 6), true),
            CubeStyle::Snow => ((0, 6), (12, 6), (0, 9), true),
            CubeStyle::Cake => ((2, 12), (10, 12), (0, 8), false),
        };
        Layout {
            left,
            right,
            top,
            touch_up,
        }
    }
}

/// Projects a side tile the way `style` requires.
pub fn side_face(tile: &RgbaImage, style: CubeStyle) -> RgbaImage {
    project_side(&style.prepare_side(tile))
}

/// Builds a simple cube from a top and an optional side texture.
///
/// The left face is shaded by [`LEFT_SHADE`], the right face is its mirror
/// shaded by [`RIGHT_SHADE`]. Without a side texture only the top diamond is
/// drawn, at the canvas origin.
pub fn build_block(top: &RgbaImage, side: Option<&RgbaImage>, style: CubeStyle) -> RgbaImage {
    let mut img = canvas();
    let top = project_top(top, style.top_size());

    let Some(side) = side else {
        alpha_over(&mut img, &top, 0, 0);
        return img;
    };

    let left = side_face(side, style);
    let right = shade(&mirror(&left), RIGHT_SHADE);
    let left = shade(&left, LEFT_SHADE);

    let layout = style.layout();
    alpha_over(&mut img, &left, layout.left.0, layout.left.1);
    alpha_over(&mut img, &right, layout.right.0, layout.right.1);
    if style != CubeStyle::Billboard {
        alpha_over(&mut img, &top, layout.top.0, layout.top.1);
    }
    if layout.touch_up {
        compositor::touch_up_seams(&mut img);
    }
    img
}

/// The six optional faces of a full block.
///
/// `side1` is the back-left face, `side2` the back-right, `side3` the
/// front-left and `side4` the front-right.
#[derive(Clone, Copy, Debug, Default)]
pub struct Faces<'a> {
    pub top: Option<&'a RgbaImage>,
    pub side1: Option<&'a RgbaImage>,
    pub side2: Option<&'a RgbaImage>,
    pub side3: Option<&'a RgbaImage>,
    pub side4: Option<&'a RgbaImage>,
    pub bottom: Option<&'a RgbaImage>,
}

/// Builds a block with up to six distinct faces, drawn back to front.
pub fn build_full_block(faces: &Faces<'_>, style: CubeStyle) -> RgbaImage {
    let mut img = canvas();

    if let Some(side1) = faces.side1 {
        let face = shade(&mirror(&side_face(side1, style)), LEFT_SHADE);
        alpha_over(&mut img, &face, 0, 0);
    }
    if let Some(side2) = faces.side2 {
        let face = shade(&side_face(side2, style), RIGHT_SHADE);
        alpha_over(&mut img, &face, 12, 0);
    }
    if let Some(bottom) = faces.bottom {
        let face = project_top(bottom, style.top_size());
        alpha_over(&mut img, &face, 0, 12);
    }
    if let Some(side3) = faces.side3 {
        let face = shade(&side_face(side3, style), LEFT_SHADE);
        alpha_over(&mut img, &face, 0, 6);
    }
    if let Some(side4) = faces.side4 {
        let face = shade(&mirror(&side_face(side4, style)), RIGHT_SHADE);
        alpha_over(&mut img, &face, 12, 6);
    }
    if let Some(top) = faces.top {
        let face = project_top(top, style.top_size());
        alpha_over(&mut img, &face, 0, 0);
    }
    img
}

/// Builds a cube whose two visible sides use different textures, unshaded.
///
/// Used for blocks with a distinct front (furnaces, dispensers, pumpkins).
pub fn build_faced_block(top: &RgbaImage, left: &RgbaImage, right: &RgbaImage) -> RgbaImage {
    let mut img = canvas();
    let top = project_top(top, TopSize::Standard);
    let left = project_side(left);
    let right = mirror(&project_side(right));

    alpha_over(&mut img, &left, 0, 6);
    alpha_over(&mut img, &right, 12, 6);
    alpha_over(&mut img, &top, 0, 0);
    img
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
