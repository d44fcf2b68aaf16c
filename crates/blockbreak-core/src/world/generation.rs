use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use crate::world::{BlockType, CHUNK_WIDTH, Chunk, GRID_X, GRID_Y, N_CHUNKS, World};

/// First row of ground; everything above is air
const SURFACE_ROW: usize = 6;
/// Rows of dirt under the grass before the mixed stone layer starts
const TOPSOIL_ROWS: usize = 2;
/// Chance that a deep block is stone rather than dirt
const STONE_PROBABILITY: f64 = 0.5;

/// World generator: flat grass surface over a random stone/dirt fill
pub struct WorldGenerator {
    pub seed: u64,
    rng: Xoshiro256StarStar,
}

impl WorldGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Xoshiro256StarStar::seed_from_u64(seed),
        }
    }

    /// Generator with a fresh random seed
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Restart the random sequence so the next world repeats the first one
    pub fn reset(&mut self) {
        self.rng = Xoshiro256StarStar::seed_from_u64(self.seed);
    }

    /// Generate one chunk starting at `x_offset`
    pub fn generate_chunk(&mut self, x_offset: f32) -> Chunk {
        let mut chunk = Chunk::new(x_offset);

        for y in SURFACE_ROW..GRID_Y {
            for x in 0..GRID_X {
                let block = self.block_for_row(y);
                chunk.set_block(x, y, block);
            }
        }

        chunk
    }

    /// Generate a complete world of `N_CHUNKS` chunks
    pub fn generate_world(&mut self) -> World {
        let chunks: Vec<Chunk> = (0..N_CHUNKS)
            .map(|i| self.generate_chunk(i as f32 * CHUNK_WIDTH))
            .collect();
        let world = World::new(chunks);

        log::info!(
            "Generated world (seed {}): {} chunks, {} solid blocks",
            self.seed,
            world.chunk_count(),
            world.count_solid()
        );

        world
    }

    fn block_for_row(&mut self, y: usize) -> BlockType {
        let depth = y - SURFACE_ROW;
        if depth == 0 {
            BlockType::Grass
        } else if depth < TOPSOIL_ROWS {
            BlockType::Dirt
        } else if self.rng.gen_bool(STONE_PROBABILITY) {
            BlockType::Stone
        } else {
            BlockType::Dirt
        }
    }
}
