//! Block collision - overlap-based axis resolution against one chunk

use glam::Vec2;

use super::Chunk;
use crate::geometry::Rect;

/// Push `bounds` out of every solid block of `chunk` it overlaps.
///
/// Each overlapping block is resolved along the axis of least penetration.
/// When the mover sits exactly on a block's row while moving vertically, the
/// direction of vertical travel decides instead. A mover on that row with no
/// vertical speed is pushed sideways, so walls stop a grounded character.
/// The velocity component along the resolved axis is zeroed. Blocks are
/// processed in row-major order and each correction is visible to the blocks
/// that follow.
///
/// Returns the number of contacts resolved.
pub fn resolve_chunk_collision(chunk: &Chunk, bounds: &mut Rect, velocity: &mut Vec2) -> usize {
    let mut contacts = 0;

    for (x, y) in chunk.cells_in(bounds) {
        if chunk.get_block(x, y).is_air() {
            continue;
        }

        let block = chunk.block_rect(x, y);
        if !bounds.overlaps(&block) {
            continue;
        }

        let normal = bounds.center() - block.center();
        let overlap_x = (block.width / 2.0 + bounds.width / 2.0) - normal.x.abs();
        let overlap_y = (block.height / 2.0 + bounds.height / 2.0) - normal.y.abs();

        if overlap_y < overlap_x {
            bounds.y = if normal.y > 0.0 {
                block.bottom()
            } else {
                block.y - bounds.height
            };
            velocity.y = 0.0;
        } else if normal.y == 0.0 && velocity.y != 0.0 {
            bounds.y = if velocity.y > 0.0 {
                block.y - bounds.height
            } else {
                block.bottom()
            };
            velocity.y = 0.0;
        } else {
            bounds.x = if normal.x > 0.0 {
                block.right()
            } else {
                block.x - bounds.width
            };
            velocity.x = 0.0;
        }

        contacts += 1;
        log::trace!(
            "Collision with block ({}, {}) at {:?} -> bounds {:?}",
            x,
            y,
            block.min(),
            bounds.min()
        );
    }

    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::BlockType;

    fn floor_chunk() -> Chunk {
        let mut chunk = Chunk::new(0.0);
        for x in 0..16 {
            chunk.set_block(x, 6, BlockType::Grass);
        }
        chunk
    }

    #[test]
    fn test_landing_on_floor() {
        let chunk = floor_chunk();
        let mut bounds = Rect::new(100.0, 252.0, 50.0, 50.0);
        let mut velocity = Vec2::new(0.0, 2.0);

        let contacts = resolve_chunk_collision(&chunk, &mut bounds, &mut velocity);

        assert_eq!(contacts, 1);
        assert_eq!(bounds.y, 250.0);
        assert_eq!(bounds.x, 100.0);
        assert_eq!(velocity.y, 0.0);
    }

    #[test]
    fn test_landing_across_two_blocks_resolves_once() {
        let chunk = floor_chunk();
        let mut bounds = Rect::new(120.0, 251.0, 50.0, 50.0);
        let mut velocity = Vec2::new(0.5, 1.0);

        let contacts = resolve_chunk_collision(&chunk, &mut bounds, &mut velocity);

        // After the first push the second block only touches the edge
        assert_eq!(contacts, 1);
        assert_eq!(bounds.y, 250.0);
        assert_eq!(bounds.x, 120.0);
        assert_eq!(velocity, Vec2::new(0.5, 0.0));
    }

    #[test]
    fn test_hitting_ceiling() {
        let mut chunk = Chunk::new(0.0);
        chunk.set_block(2, 2, BlockType::Stone);
        let mut bounds = Rect::new(100.0, 148.0, 50.0, 50.0);
        let mut velocity = Vec2::new(0.0, -5.0);

        resolve_chunk_collision(&chunk, &mut bounds, &mut velocity);

        assert_eq!(bounds.y, 150.0);
        assert_eq!(velocity.y, 0.0);
    }

    #[test]
    fn test_wall_pushes_horizontally() {
        let mut chunk = Chunk::new(0.0);
        chunk.set_block(3, 4, BlockType::Stone);
        // Moving right into the block, slightly above its center line
        let mut bounds = Rect::new(103.0, 195.0, 50.0, 50.0);
        let mut velocity = Vec2::new(3.0, 0.0);

        resolve_chunk_collision(&chunk, &mut bounds, &mut velocity);

        assert_eq!(bounds.x, 100.0);
        assert_eq!(bounds.y, 195.0);
        assert_eq!(velocity.x, 0.0);

        // And from the other side
        let mut bounds = Rect::new(197.0, 205.0, 50.0, 50.0);
        let mut velocity = Vec2::new(-3.0, 0.0);
        resolve_chunk_collision(&chunk, &mut bounds, &mut velocity);
        assert_eq!(bounds.x, 200.0);
        assert_eq!(velocity.x, 0.0);
    }

    #[test]
    fn test_centered_row_uses_vertical_velocity() {
        let mut chunk = Chunk::new(0.0);
        chunk.set_block(3, 4, BlockType::Stone);

        // Same row as the block: overlap_y is the full height, so the
        // horizontal branch is taken only when the mover is off-center.
        let mut bounds = Rect::new(110.0, 200.0, 50.0, 50.0);
        let mut velocity = Vec2::new(1.0, 0.5);
        resolve_chunk_collision(&chunk, &mut bounds, &mut velocity);
        assert_eq!(bounds.y, 150.0);
        assert_eq!(bounds.x, 110.0);
        assert_eq!(velocity, Vec2::new(1.0, 0.0));

        let mut bounds = Rect::new(110.0, 200.0, 50.0, 50.0);
        let mut velocity = Vec2::new(1.0, -0.5);
        resolve_chunk_collision(&chunk, &mut bounds, &mut velocity);
        assert_eq!(bounds.y, 250.0);

        // Without vertical speed the block acts as a wall
        let mut bounds = Rect::new(110.0, 200.0, 50.0, 50.0);
        let mut velocity = Vec2::new(1.0, 0.0);
        resolve_chunk_collision(&chunk, &mut bounds, &mut velocity);
        assert_eq!(bounds, Rect::new(100.0, 200.0, 50.0, 50.0));
        assert_eq!(velocity, Vec2::ZERO);
    }

    #[test]
    fn test_air_and_touching_blocks_ignored() {
        let mut chunk = Chunk::new(0.0);
        chunk.set_block(1, 1, BlockType::Dirt);
        // Exactly resting on top of the block: touching, not overlapping
        let mut bounds = Rect::new(50.0, 0.0, 50.0, 50.0);
        let mut velocity = Vec2::new(0.0, 0.0);

        assert_eq!(resolve_chunk_collision(&chunk, &mut bounds, &mut velocity), 0);
        assert_eq!(bounds.y, 0.0);
    }
}
