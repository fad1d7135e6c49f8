use std::ops::RangeInclusive;

use crate::error::LevelError;
use crate::geometry::Aabb;

/// Tile IDs in this range block movement; everything else is decoration.
pub const SOLID_TILES: RangeInclusive<u32> = 1..=7;

/// Dense row-major tile map. Immutable once built.
#[derive(Clone, Debug)]
pub struct TileGrid {
    tiles: Vec<u32>,
    width: u32,
    height: u32,
    tile_size: f32,
}

impl TileGrid {
    pub fn new(
        width: u32,
        height: u32,
        tile_size: f32,
        tiles: Vec<u32>,
    ) -> Result<Self, LevelError> {
        if !(tile_size > 0.0) || !tile_size.is_finite() {
            return Err(LevelError::TileSize(tile_size));
        }
        let expected = width as usize * height as usize;
        if tiles.len() != expected {
            return Err(LevelError::TileCount {
                width,
                height,
                expected,
                actual: tiles.len(),
            });
        }
        Ok(Self { tiles, width, height, tile_size })
    }

    /// A grid with no solid tiles.
    pub fn empty(width: u32, height: u32, tile_size: f32) -> Result<Self, LevelError> {
        Self::new(width, height, tile_size, vec![0; width as usize * height as usize])
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    #[inline]
    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    /// Tile ID at a column/row, `None` outside the map.
    pub fn tile_at(&self, col: i32, row: i32) -> Option<u32> {
        if col < 0 || row < 0 || col as u32 >= self.width || row as u32 >= self.height {
            return None;
        }
        self.tiles.get(row as usize * self.width as usize + col as usize).copied()
    }

    /// Out-of-bounds positions are never solid.
    #[inline]
    pub fn is_solid(&self, col: i32, row: i32) -> bool {
        self.tile_at(col, row).is_some_and(|id| SOLID_TILES.contains(&id))
    }

    pub fn tile_bounds(&self, col: i32, row: i32) -> Aabb {
        let s = self.tile_size;
        Aabb::new(col as f32 * s, row as f32 * s, s, s)
    }

    /// Whether `area` overlaps any solid tile.
    ///
    /// Edges map to tile indices by truncating division, so the scanned range is
    /// inclusive on both ends; the strict rectangle test then drops tiles that
    /// are only touched.
    pub fn overlaps_solid(&self, area: &Aabb) -> bool {
        let s = self.tile_size;
        let left = (area.left() / s) as i32;
        let right = (area.right() / s) as i32;
        let top = (area.top() / s) as i32;
        let bottom = (area.bottom() / s) as i32;

        for row in top..=bottom {
            for col in left..=right {
                if self.is_solid(col, row) && area.intersects(&self.tile_bounds(col, row)) {
                    return true;
                }
            }
        }
        false
    }
}
