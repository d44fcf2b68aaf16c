//! Seams between the game logic and whatever draws and plays sounds.
//!
//! The desktop frontend implements these with a CPU framebuffer; tests use
//! recording fakes.

use glam::Vec2;

use crate::geometry::Rect;
use crate::world::BlockType;

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const SKY_BLUE: Color = Color::rgb(102, 191, 255);
    pub const YELLOW: Color = Color::rgb(253, 249, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(230, 41, 55);
    pub const DARK_GRAY: Color = Color::rgb(80, 80, 80);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with alpha set from a 0..=1 fraction
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Texture handles the game asks the frontend to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureId {
    Block(BlockType),
    CharacterFrame(usize),
}

/// A 2D drawing surface in screen pixels
pub trait Canvas {
    fn size(&self) -> Vec2;
    fn clear(&mut self, color: Color);
    fn draw_texture(&mut self, texture: TextureId, dest: Rect);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, color: Color);
    fn draw_text(&mut self, text: &str, position: Vec2, size: f32, color: Color);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// A block was broken
    Crunch,
    /// A block was placed
    Place,
}

pub trait SoundPlayer {
    fn play(&mut self, cue: SoundCue);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_alpha() {
        assert_eq!(Color::YELLOW.with_alpha(0.25).a, 64);
        assert_eq!(Color::WHITE.with_alpha(2.0).a, 255);
        assert_eq!(Color::BLACK.with_alpha(0.0).to_array(), [0, 0, 0, 0]);
    }
}
