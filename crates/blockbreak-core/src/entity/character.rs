use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{Animation, InputState, Keys};
use crate::geometry::Rect;
use crate::world::{BLOCK_SIZE_X, BLOCK_SIZE_Y};

/// Movement tuning, in world pixels per fixed step (1/60 s)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsParams {
    /// Downward acceleration added every step
    pub gravity: f32,
    /// Upward speed given by a jump
    pub jump_impulse: f32,
    /// Horizontal acceleration while A or D is held
    pub walk_acceleration: f32,
    /// Velocity multiplier applied at the end of every step
    pub damping: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            jump_impulse: 10.0,
            walk_acceleration: 0.15,
            damping: 0.98,
        }
    }
}

/// The player-controlled character
#[derive(Debug, Clone)]
pub struct Character {
    /// Top-left corner in world pixels
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Vec2,
    pub animation: Animation,
}

impl Character {
    /// One block wide and one block tall
    pub const SIZE: Vec2 = Vec2::new(BLOCK_SIZE_X, BLOCK_SIZE_Y);

    /// Create a new character at the specified position
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            size: Self::SIZE,
            animation: Animation::default(),
        }
    }

    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.animation = animation;
        self
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_min_size(self.position, self.size)
    }

    /// No vertical motion: standing on a block or stopped against a ceiling
    pub fn is_resting(&self) -> bool {
        self.velocity.y == 0.0
    }

    /// Apply walk and jump input for the next physics step
    pub fn apply_controls(&mut self, input: &InputState, params: &PhysicsParams) {
        if input.is_down(Keys::W) && self.is_resting() {
            self.velocity.y -= params.jump_impulse;
            log::debug!("Character jumped at {:?}", self.position);
        }
        if input.is_down(Keys::A) {
            self.velocity.x -= params.walk_acceleration;
        } else if input.is_down(Keys::D) {
            self.velocity.x += params.walk_acceleration;
        }
    }

    /// Put the character back at `position` with no momentum
    pub fn respawn(&mut self, position: Vec2) {
        self.position = position;
        self.velocity = Vec2::ZERO;
    }
}
