//! # Block Break core
//!
//! Chunked block world, character physics, block editing and world saves.
//! Nothing in here touches a window, GPU or audio device; frontends plug in
//! through the [`platform`] traits.

pub mod camera;
pub mod entity;
pub mod geometry;
pub mod platform;
pub mod session;
pub mod world;

pub use session::{FrameOutcome, Game, GameSettings, Screen};

/// Common imports for internal use
pub mod prelude {
    pub use crate::camera::Camera2D;
    pub use crate::entity::{Character, InputState, Keys, MouseButtons, PhysicsParams};
    pub use crate::geometry::Rect;
    pub use crate::platform::{Canvas, Color, SoundCue, SoundPlayer, TextureId};
    pub use crate::world::{BlockType, Chunk, World};
    pub use glam::Vec2;
}
