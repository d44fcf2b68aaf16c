//! Placeable block selection bar

use glam::Vec2;

use crate::geometry::Rect;
use crate::platform::{Canvas, Color, TextureId};
use crate::world::{BLOCK_SIZE_Y, BlockType};

/// Edge length of one hotbar slot
pub const SLOT_SIZE: f32 = BLOCK_SIZE_Y;
const NAME_FONT_SIZE: f32 = 16.0;

#[derive(Debug, Clone)]
pub struct Hotbar {
    selected: usize,
    /// Time of the last wheel action, `None` until the first one
    last_action: Option<f64>,
}

impl Default for Hotbar {
    fn default() -> Self {
        Self {
            selected: BlockType::PLACEABLE.len() - 1,
            last_action: None,
        }
    }
}

impl Hotbar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the selection by whole wheel lines. Scrolling up moves left.
    /// Returns whether the wheel moved at all.
    pub fn scroll(&mut self, wheel: f32, now: f64) -> bool {
        let lines = wheel as i32;
        if lines == 0 {
            return false;
        }
        let last = BlockType::PLACEABLE.len() as i32 - 1;
        self.selected = (self.selected as i32 - lines).clamp(0, last) as usize;
        self.last_action = Some(now);
        log::debug!("Hotbar selection: {}", self.selected_block().name());
        true
    }

    pub fn selected_block(&self) -> BlockType {
        BlockType::from_hotbar_index(self.selected).unwrap_or(BlockType::Stone)
    }

    pub fn is_visible(&self, now: f64, display_secs: f64) -> bool {
        self.last_action
            .is_some_and(|last| now - last < display_secs)
    }

    /// Slot rectangles in screen space, left to right
    pub fn slot_rects(screen_size: Vec2) -> [Rect; 3] {
        let start = Vec2::new(screen_size.x / 2.0 - 2.0 * SLOT_SIZE, screen_size.y - SLOT_SIZE);
        std::array::from_fn(|i| {
            Rect::new(start.x + i as f32 * SLOT_SIZE, start.y, SLOT_SIZE, SLOT_SIZE)
        })
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, now: f64, display_secs: f64) {
        if !self.is_visible(now, display_secs) {
            return;
        }
        let slots = Self::slot_rects(canvas.size());
        for (i, (slot, block)) in slots.iter().zip(BlockType::PLACEABLE).enumerate() {
            canvas.draw_texture(TextureId::Block(block), *slot);
            let outline = if i == self.selected {
                canvas.draw_text(
                    block.name(),
                    Vec2::new(slot.x, slot.y - SLOT_SIZE / 2.0),
                    NAME_FONT_SIZE,
                    Color::WHITE,
                );
                Color::WHITE
            } else {
                Color::BLACK
            };
            canvas.stroke_rect(*slot, outline);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selection_is_stone() {
        let hotbar = Hotbar::new();
        assert_eq!(hotbar.selected_block(), BlockType::Stone);
        assert!(!hotbar.is_visible(0.0, 1.0));
    }

    #[test]
    fn test_scroll_clamps() {
        let mut hotbar = Hotbar::new();
        assert!(hotbar.scroll(1.0, 0.0));
        assert_eq!(hotbar.selected_block(), BlockType::Dirt);
        hotbar.scroll(5.0, 0.0);
        assert_eq!(hotbar.selected_block(), BlockType::Grass);
        hotbar.scroll(-1.0, 0.0);
        assert_eq!(hotbar.selected_block(), BlockType::Dirt);
        hotbar.scroll(-3.0, 0.0);
        assert_eq!(hotbar.selected_block(), BlockType::Stone);

        // Fractional motion below a full line is ignored
        assert!(!hotbar.scroll(0.4, 0.0));
        assert_eq!(hotbar.selected_block(), BlockType::Stone);
    }

    #[test]
    fn test_visibility_window() {
        let mut hotbar = Hotbar::new();
        hotbar.scroll(1.0, 10.0);
        assert!(hotbar.is_visible(10.5, 1.0));
        assert!(!hotbar.is_visible(11.0, 1.0));
    }

    #[test]
    fn test_slot_layout() {
        let slots = Hotbar::slot_rects(Vec2::new(800.0, 600.0));
        assert_eq!(slots[0], Rect::new(300.0, 550.0, 50.0, 50.0));
        assert_eq!(slots[1], Rect::new(350.0, 550.0, 50.0, 50.0));
        assert_eq!(slots[2], Rect::new(400.0, 550.0, 50.0, 50.0));
    }
}
