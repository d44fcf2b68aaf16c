//! Character physics system - gravity, chunk collision, world bounds

use glam::Vec2;

use super::World;
use super::collision::resolve_chunk_collision;
use crate::entity::{Character, PhysicsParams};
use crate::geometry::Rect;

/// Character physics system - one fixed step of gravity and collision
pub struct CharacterPhysicsSystem;

impl CharacterPhysicsSystem {
    /// Advance the character by one fixed step.
    ///
    /// Collision is resolved against the first chunk the character currently
    /// overlaps, then against the left or right neighbor when the proposed
    /// bounds cross into it. The result is clamped to the world and the
    /// velocity is damped.
    pub fn update(character: &mut Character, world: &World, params: &PhysicsParams) {
        character.velocity.y += params.gravity;

        let mut new_bounds = Rect::from_min_size(
            character.position + character.velocity,
            character.size,
        );

        if let Some((left, chunk, right)) = world
            .chunk_index_overlapping(&character.bounds())
            .and_then(|index| world.neighbors(index))
        {
            resolve_chunk_collision(chunk, &mut new_bounds, &mut character.velocity);

            if let Some(left) = left
                && new_bounds.x < chunk.bounds.x
            {
                resolve_chunk_collision(left, &mut new_bounds, &mut character.velocity);
            }

            if let Some(right) = right
                && new_bounds.right() > chunk.bounds.right()
            {
                resolve_chunk_collision(right, &mut new_bounds, &mut character.velocity);
            }
        }

        let max = (world.size() - character.size).max(Vec2::ZERO);
        let previous = character.position;
        character.position = new_bounds.min().clamp(Vec2::ZERO, max);
        character.velocity *= params.damping;

        log::trace!(
            "Character: {:?} -> {:?} (vel: {:?})",
            previous,
            character.position,
            character.velocity
        );
    }
}
