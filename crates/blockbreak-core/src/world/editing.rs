//! Mouse-driven block editing

use glam::Vec2;

use super::{BlockPos, BlockType, World};
use crate::camera::Camera2D;
use crate::entity::{InputState, MouseButtons};
use crate::platform::SoundCue;

/// A block change that was applied to the world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockEdit {
    pub pos: BlockPos,
    pub previous: BlockType,
    pub block: BlockType,
}

/// Trait for block editing tools
pub trait BlockTool {
    /// Tool display name
    fn name(&self) -> &str;

    /// Sound played when the tool changes a block
    fn cue(&self) -> SoundCue;

    /// Apply the tool to one block. `None` when the tool does not apply there.
    fn apply(&self, world: &mut World, pos: BlockPos) -> Option<BlockEdit>;
}

/// Breaks any solid block, leaving air
pub struct RemoveTool;

impl BlockTool for RemoveTool {
    fn name(&self) -> &str {
        "Remove"
    }

    fn cue(&self) -> SoundCue {
        SoundCue::Crunch
    }

    fn apply(&self, world: &mut World, pos: BlockPos) -> Option<BlockEdit> {
        if world.get_block(pos).is_air() {
            return None;
        }
        let previous = world.set_block(pos, BlockType::Air);
        Some(BlockEdit {
            pos,
            previous,
            block: BlockType::Air,
        })
    }
}

/// Fills an air cell with the given block
pub struct PlaceTool(pub BlockType);

impl BlockTool for PlaceTool {
    fn name(&self) -> &str {
        "Place"
    }

    fn cue(&self) -> SoundCue {
        SoundCue::Place
    }

    fn apply(&self, world: &mut World, pos: BlockPos) -> Option<BlockEdit> {
        if !world.get_block(pos).is_air() || self.0.is_air() {
            return None;
        }
        let previous = world.set_block(pos, self.0);
        Some(BlockEdit {
            pos,
            previous,
            block: self.0,
        })
    }
}

/// Block under the mouse cursor, if the cursor is over the world
pub fn hovered_block(world: &World, camera: &Camera2D, mouse: Vec2) -> Option<BlockPos> {
    world.block_pos_at(camera.screen_to_world(mouse))
}

/// Run the tool bound to a mouse button that went down this frame.
/// Left click removes a solid block, right click places `selected` into air.
pub fn handle_click(
    world: &mut World,
    input: &InputState,
    pos: BlockPos,
    selected: BlockType,
) -> Option<(BlockEdit, SoundCue)> {
    let air = world.get_block(pos).is_air();
    let tool: &dyn BlockTool = if input.was_button_pressed(MouseButtons::LEFT) && !air {
        &RemoveTool
    } else if input.was_button_pressed(MouseButtons::RIGHT) && air {
        &PlaceTool(selected)
    } else {
        return None;
    };

    let edit = tool.apply(world, pos)?;
    log::debug!(
        "{} {:?}: {} -> {}",
        tool.name(),
        edit.pos,
        edit.previous.name(),
        edit.block.name()
    );
    Some((edit, tool.cue()))
}
