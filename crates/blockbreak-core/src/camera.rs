//! 2D camera mapping between world and screen pixels

use glam::Vec2;

use crate::geometry::Rect;

pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 4.0;

/// `target` (world) is drawn at `offset` (screen), scaled by `zoom`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera2D {
    pub target: Vec2,
    pub offset: Vec2,
    pub zoom: f32,
}

impl Default for Camera2D {
    fn default() -> Self {
        Self {
            target: Vec2::ZERO,
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera2D {
    pub fn screen_to_world(&self, point: Vec2) -> Vec2 {
        (point - self.offset) / self.zoom + self.target
    }

    pub fn world_to_screen(&self, point: Vec2) -> Vec2 {
        (point - self.target) * self.zoom + self.offset
    }

    pub fn world_rect_to_screen(&self, rect: &Rect) -> Rect {
        Rect::from_min_size(self.world_to_screen(rect.min()), rect.size() * self.zoom)
    }

    /// Visible world area for a screen of `screen_size`
    pub fn visible_world_rect(&self, screen_size: Vec2) -> Rect {
        let min = self.screen_to_world(Vec2::ZERO);
        Rect::from_min_size(min, screen_size / self.zoom)
    }

    /// Keep `target` in the middle of the screen
    pub fn follow(&mut self, target: Vec2, screen_size: Vec2) {
        self.target = target;
        self.offset = screen_size / 2.0;
    }

    pub fn adjust_zoom(&mut self, delta: f32) {
        self.zoom = (self.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_world_inverse() {
        let camera = Camera2D {
            target: Vec2::new(1000.0, 300.0),
            offset: Vec2::new(400.0, 300.0),
            zoom: 2.0,
        };
        let screen = Vec2::new(123.0, 456.0);
        let world = camera.screen_to_world(screen);
        assert_eq!(world, Vec2::new(1000.0 - 138.5, 378.0));
        assert!((camera.world_to_screen(world) - screen).length() < 1e-4);
    }

    #[test]
    fn test_follow_centers_target() {
        let mut camera = Camera2D::default();
        camera.follow(Vec2::new(250.0, 100.0), Vec2::new(800.0, 600.0));
        assert_eq!(camera.world_to_screen(Vec2::new(250.0, 100.0)), Vec2::new(400.0, 300.0));

        let visible = camera.visible_world_rect(Vec2::new(800.0, 600.0));
        assert_eq!(visible, Rect::new(-150.0, -200.0, 800.0, 600.0));
    }

    #[test]
    fn test_zoom_clamped() {
        let mut camera = Camera2D::default();
        camera.adjust_zoom(-5.0);
        assert_eq!(camera.zoom, MIN_ZOOM);
        camera.adjust_zoom(10.0);
        assert_eq!(camera.zoom, MAX_ZOOM);
    }
}
