//! Chunk - one screen-sized 16x12 grid of blocks

use glam::Vec2;

use super::BlockType;
use crate::geometry::Rect;

pub const SCREEN_WIDTH: u32 = 800;
pub const SCREEN_HEIGHT: u32 = 600;

/// Blocks per chunk, horizontally and vertically
pub const GRID_X: usize = 16;
pub const GRID_Y: usize = 12;

/// Block edge lengths in world pixels (one chunk fills the reference screen)
pub const BLOCK_SIZE_X: f32 = (SCREEN_WIDTH / GRID_X as u32) as f32;
pub const BLOCK_SIZE_Y: f32 = (SCREEN_HEIGHT / GRID_Y as u32) as f32;

pub const CHUNK_WIDTH: f32 = BLOCK_SIZE_X * GRID_X as f32;
pub const CHUNK_HEIGHT: f32 = BLOCK_SIZE_Y * GRID_Y as f32;

/// Number of chunks laid side by side in a world
pub const N_CHUNKS: usize = 24;

/// A 16x12 region of blocks placed at `bounds` in world space
#[derive(Clone, Debug, PartialEq)]
pub struct Chunk {
    /// World-space rectangle covered by this chunk
    pub bounds: Rect,

    /// Block data, row-major: `blocks[y][x]`
    blocks: [[BlockType; GRID_X]; GRID_Y],
}

impl Chunk {
    /// Create an all-air chunk starting at `x_offset`
    pub fn new(x_offset: f32) -> Self {
        Self::with_bounds(Rect::new(x_offset, 0.0, CHUNK_WIDTH, CHUNK_HEIGHT))
    }

    /// Create an all-air chunk covering `bounds` (used when loading saves)
    pub fn with_bounds(bounds: Rect) -> Self {
        Self {
            bounds,
            blocks: [[BlockType::Air; GRID_X]; GRID_Y],
        }
    }

    /// Get block at local grid coordinates (0-15, 0-11)
    #[inline]
    pub fn get_block(&self, x: usize, y: usize) -> BlockType {
        debug_assert!(x < GRID_X && y < GRID_Y);
        self.blocks[y][x]
    }

    /// Set block at local grid coordinates
    #[inline]
    pub fn set_block(&mut self, x: usize, y: usize, block: BlockType) {
        debug_assert!(x < GRID_X && y < GRID_Y);
        self.blocks[y][x] = block;
    }

    /// World-space rectangle of the cell at `(x, y)`
    #[inline]
    pub fn block_rect(&self, x: usize, y: usize) -> Rect {
        Rect::new(
            self.bounds.x + x as f32 * BLOCK_SIZE_X,
            self.bounds.y + y as f32 * BLOCK_SIZE_Y,
            BLOCK_SIZE_X,
            BLOCK_SIZE_Y,
        )
    }

    /// Grid cell under a world-space point, if the point is inside this chunk
    pub fn block_at(&self, point: Vec2) -> Option<(usize, usize)> {
        if !self.bounds.contains_point(point) {
            return None;
        }
        let x = ((point.x - self.bounds.x) / BLOCK_SIZE_X) as usize;
        let y = ((point.y - self.bounds.y) / BLOCK_SIZE_Y) as usize;
        Some((x.min(GRID_X - 1), y.min(GRID_Y - 1)))
    }

    /// Cells that may touch `area`, scanned row by row.
    ///
    /// Both edges of the area are mapped to grid indices and clamped to the
    /// grid, so the scan is always in bounds even when `area` pokes outside.
    pub fn cells_in(&self, area: &Rect) -> impl Iterator<Item = (usize, usize)> + use<> {
        let to_cell = |offset: f32, size: f32, cells: usize| -> usize {
            (offset / size).clamp(0.0, (cells - 1) as f32) as usize
        };

        let start_x = to_cell(area.x - self.bounds.x, BLOCK_SIZE_X, GRID_X);
        let end_x = to_cell(area.right() - self.bounds.x, BLOCK_SIZE_X, GRID_X);
        let start_y = to_cell(area.y - self.bounds.y, BLOCK_SIZE_Y, GRID_Y);
        let end_y = to_cell(area.bottom() - self.bounds.y, BLOCK_SIZE_Y, GRID_Y);

        (start_y..=end_y).flat_map(move |y| (start_x..=end_x).map(move |x| (x, y)))
    }

    /// Iterate all cells with their block, row by row
    pub fn iter_blocks(&self) -> impl Iterator<Item = (usize, usize, BlockType)> + '_ {
        self.blocks
            .iter()
            .enumerate()
            .flat_map(|(y, row)| row.iter().enumerate().map(move |(x, &b)| (x, y, b)))
    }

    /// Count non-air blocks (for debugging save/load)
    pub fn count_solid(&self) -> usize {
        self.blocks
            .iter()
            .flatten()
            .filter(|b| b.is_solid())
            .count()
    }
}

impl Default for Chunk {
    fn default() -> Self {
        Self::new(0.0)
    }
}
