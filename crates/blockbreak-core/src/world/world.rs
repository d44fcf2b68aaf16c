//! World - a horizontal strip of chunks

use glam::Vec2;

use super::{BlockType, CHUNK_HEIGHT, CHUNK_WIDTH, Chunk, N_CHUNKS};
use crate::geometry::Rect;

/// Address of one block: chunk index plus local grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockPos {
    pub chunk: usize,
    pub x: usize,
    pub y: usize,
}

/// The game world, composed of chunks laid out left to right
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    chunks: Vec<Chunk>,
}

impl World {
    pub fn new(chunks: Vec<Chunk>) -> Self {
        Self { chunks }
    }

    /// All-air world with the standard chunk count
    pub fn empty() -> Self {
        let chunks = (0..N_CHUNKS)
            .map(|i| Chunk::new(i as f32 * CHUNK_WIDTH))
            .collect();
        Self::new(chunks)
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn chunk(&self, index: usize) -> Option<&Chunk> {
        self.chunks.get(index)
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Width and height of the playable area in world pixels
    pub fn size(&self) -> Vec2 {
        Vec2::new(CHUNK_WIDTH * self.chunks.len() as f32, CHUNK_HEIGHT)
    }

    /// Index of the first chunk whose bounds overlap `rect`
    pub fn chunk_index_overlapping(&self, rect: &Rect) -> Option<usize> {
        self.chunks.iter().position(|c| c.bounds.overlaps(rect))
    }

    /// The chunk at `index` together with its left and right neighbors
    pub fn neighbors(&self, index: usize) -> Option<(Option<&Chunk>, &Chunk, Option<&Chunk>)> {
        let current = self.chunks.get(index)?;
        let left = index.checked_sub(1).and_then(|i| self.chunks.get(i));
        let right = self.chunks.get(index + 1);
        Some((left, current, right))
    }

    /// Locate the block under a world-space point
    pub fn block_pos_at(&self, point: Vec2) -> Option<BlockPos> {
        self.chunks.iter().enumerate().find_map(|(chunk, c)| {
            c.block_at(point).map(|(x, y)| BlockPos { chunk, x, y })
        })
    }

    pub fn block_at(&self, point: Vec2) -> Option<BlockType> {
        self.block_pos_at(point).map(|pos| self.get_block(pos))
    }

    pub fn get_block(&self, pos: BlockPos) -> BlockType {
        self.chunks[pos.chunk].get_block(pos.x, pos.y)
    }

    /// Replace a block, returning the previous one
    pub fn set_block(&mut self, pos: BlockPos, block: BlockType) -> BlockType {
        let chunk = &mut self.chunks[pos.chunk];
        let previous = chunk.get_block(pos.x, pos.y);
        chunk.set_block(pos.x, pos.y, block);
        previous
    }

    pub fn block_rect(&self, pos: BlockPos) -> Rect {
        self.chunks[pos.chunk].block_rect(pos.x, pos.y)
    }

    /// Count non-air blocks across all chunks
    pub fn count_solid(&self) -> usize {
        self.chunks.iter().map(Chunk::count_solid).sum()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::empty()
    }
}
