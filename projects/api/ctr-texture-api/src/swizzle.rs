//! Storage order of PICA200 texture pixels.
//!
//! Textures are stored as 8x8 pixel tiles, tiles laid out left to right and top to bottom.
//! Inside a tile pixels follow Z-order (Morton order): x takes the even bits of the
//! in-tile index, y the odd bits.
//!
//! ```text
//!  0  1  4  5 16 17 20 21
//!  2  3  6  7 18 19 22 23
//!  8  9 12 13 24 25 28 29
//! 10 11 14 15 26 27 30 31
//! 32 ...
//! ```

use crate::format::Dimensions;

/// Width and height of a storage tile, in pixels.
pub const TILE_DIMENSION: u32 = 8;

/// Number of pixels in a storage tile.
pub const TILE_PIXEL_COUNT: u32 = TILE_DIMENSION * TILE_DIMENSION;

/// Maps between storage order and pixel positions for one texture level.
///
/// The mapping is a pure function of the level's dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSwizzle {
    dimensions: Dimensions,
    tiles_per_row: u32,
}

impl TileSwizzle {
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            tiles_per_row: dimensions.width.div_ceil(TILE_DIMENSION).max(1),
        }
    }

    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Pixel position `(x, y)` of the pixel stored at `index`.
    ///
    /// Positions past the level's edges are possible for dimensions that are not a
    /// multiple of the tile size; callers skip those.
    #[inline]
    pub fn position(&self, index: u32) -> (u32, u32) {
        let tile = index / TILE_PIXEL_COUNT;
        let within_tile = index % TILE_PIXEL_COUNT;

        let tile_x = (tile % self.tiles_per_row) * TILE_DIMENSION;
        let tile_y = (tile / self.tiles_per_row) * TILE_DIMENSION;

        (
            tile_x + compact_even_bits(within_tile),
            tile_y + compact_even_bits(within_tile >> 1),
        )
    }

    /// Storage index of the pixel at `(x, y)`.
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> u32 {
        let tile = (y / TILE_DIMENSION) * self.tiles_per_row + x / TILE_DIMENSION;
        let within_tile =
            spread_to_even_bits(x % TILE_DIMENSION) | (spread_to_even_bits(y % TILE_DIMENSION) << 1);

        tile * TILE_PIXEL_COUNT + within_tile
    }
}

/// Moves bits 0, 2 and 4 of `value` into bits 0, 1 and 2.
#[inline(always)]
fn compact_even_bits(value: u32) -> u32 {
    (value & 1) | ((value >> 1) & 2) | ((value >> 2) & 4)
}

/// Moves bits 0, 1 and 2 of `value` into bits 0, 2 and 4.
#[inline(always)]
fn spread_to_even_bits(value: u32) -> u32 {
    (value & 1) | ((value & 2) << 1) | ((value & 4) << 2)
}
