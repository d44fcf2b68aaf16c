//! World management - chunks, collision, editing, loading, saving

mod block;
mod character_physics;
mod chunk;
pub mod collision;
pub mod editing;
pub mod generation;
pub mod persistence;
#[allow(clippy::module_inception)]
mod world;

pub use block::BlockType;
pub use character_physics::CharacterPhysicsSystem;
pub use chunk::{
    BLOCK_SIZE_X, BLOCK_SIZE_Y, CHUNK_HEIGHT, CHUNK_WIDTH, Chunk, GRID_X, GRID_Y, N_CHUNKS,
    SCREEN_HEIGHT, SCREEN_WIDTH,
};
pub use editing::{BlockEdit, BlockTool, PlaceTool, RemoveTool};
pub use generation::WorldGenerator;
pub use persistence::{PersistenceError, SavedWorld, WorldEntry, WorldStore};
pub use world::{BlockPos, World};
