//! Lays cached sprites out on sheets.

use image::{RgbaImage, imageops};
use isoblock_sprites::compositor::SPRITE_SIZE;
use isoblock_sprites::{BlockKind, SpriteCache};

/// Sprites per row and column of the plain sheet.
pub const SHEET_GRID: u32 = 16;

/// Every plain sprite at `(kind % 16, kind / 16)`; absent kinds stay empty.
pub fn plain_sheet(cache: &SpriteCache) -> RgbaImage {
    let mut sheet = RgbaImage::new(SHEET_GRID * SPRITE_SIZE, SHEET_GRID * SPRITE_SIZE);
    for id in 0..=u8::MAX {
        if let Some(sprite) = cache.sprite(BlockKind(id)) {
            let x = u32::from(id) % SHEET_GRID * SPRITE_SIZE;
            let y = u32::from(id) / SHEET_GRID * SPRITE_SIZE;
            imageops::replace(&mut sheet, &sprite.image, i64::from(x), i64::from(y));
        }
    }
    sheet
}

/// One row per state-dependent kind, ascending; states left to right.
pub fn variant_sheet(cache: &SpriteCache) -> RgbaImage {
    let rows: Vec<_> = cache
        .stateful_kinds()
        .into_iter()
        .map(|kind| (kind, cache.known_states(kind)))
        .collect();
    let columns = rows.iter().map(|(_, states)| states.len()).max().unwrap_or(0);

    let width = columns.max(1) as u32 * SPRITE_SIZE;
    let height = rows.len().max(1) as u32 * SPRITE_SIZE;
    let mut sheet = RgbaImage::new(width, height);

    for (row, (kind, states)) in rows.iter().enumerate() {
        for (column, &state) in states.iter().enumerate() {
            if let Some(sprite) = cache.variant(*kind, state) {
                let x = column as i64 * i64::from(SPRITE_SIZE);
                let y = row as i64 * i64::from(SPRITE_SIZE);
                imageops::replace(&mut sheet, &sprite.image, x, y);
            }
        }
    }
    sheet
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgba};
    use isoblock_sprites::{AuxTexture, BuildOptions, SpriteEngine, TileSet};

    fn engine() -> SpriteEngine {
        let atlas = RgbaImage::from_fn(256, 256, |x, y| {
            let cell = (y / 16 * 16 + x / 16) as u8;
            Rgba([cell, 255 - cell, 90, 255])
        });
        let mut tiles = TileSet::slice(&DynamicImage::ImageRgba8(atlas)).unwrap();
        for texture in AuxTexture::ALL {
            let image = RgbaImage::from_pixel(16, 16, Rgba([30, 60, 200, 255]));
            tiles = tiles.with_auxiliary(texture, &DynamicImage::ImageRgba8(image));
        }
        let options = BuildOptions {
            parallel: false,
            worker_threads: 0,
        };
        SpriteEngine::from_tiles(tiles, &options).unwrap()
    }

    #[test]
    fn test_plain_sheet_places_sprites_by_kind() {
        let engine = engine();
        let cache = engine.cache();
        let sheet = plain_sheet(cache);
        assert_eq!(sheet.dimensions(), (384, 384));

        // Kind 1 sits in column 1 of row 0.
        let stone = cache.sprite(BlockKind(1)).unwrap();
        assert_eq!(sheet.get_pixel(24 + 12, 6), stone.image.get_pixel(12, 6));
        // Kind 0 is absent.
        assert_eq!(sheet.get_pixel(12, 12)[3], 0);
    }

    #[test]
    fn test_variant_sheet_has_a_row_per_stateful_kind() {
        let engine = engine();
        let cache = engine.cache();
        let sheet = variant_sheet(cache);

        let kinds = cache.stateful_kinds();
        let widest = kinds.iter().map(|&k| cache.known_states(k).len()).max().unwrap();
        assert_eq!(sheet.height(), kinds.len() as u32 * SPRITE_SIZE);
        assert_eq!(sheet.width(), widest as u32 * SPRITE_SIZE);

        // First row is grass, state 0 in the first column.
        assert_eq!(kinds[0], BlockKind(2));
        let grass = cache.variant(BlockKind(2), 0).unwrap();
        assert_eq!(sheet.get_pixel(12, 6), grass.image.get_pixel(12, 6));
    }
}
