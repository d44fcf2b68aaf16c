//! CPU framebuffer the game draws into each frame

use blockbreak_core::geometry::Rect;
use blockbreak_core::platform::{Canvas, Color, TextureId};
use glam::Vec2;

use crate::assets::AssetStore;

/// Text queued for the egui overlay, in screen pixels
#[derive(Debug, Clone, PartialEq)]
pub struct TextCommand {
    pub text: String,
    pub position: Vec2,
    pub size: f32,
    pub color: Color,
}

/// RGBA8 framebuffer implementing [`Canvas`]
pub struct FrameCanvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    texts: Vec<TextCommand>,
    assets: AssetStore,
}

impl FrameCanvas {
    pub fn new(width: u32, height: u32, assets: AssetStore) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
            texts: Vec::new(),
            assets,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![0; (width * height * 4) as usize];
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Text drawn since the last clear
    pub fn texts(&self) -> &[TextCommand] {
        &self.texts
    }

    /// Integer pixel span of `rect` clipped to the framebuffer:
    /// `(x0, y0, x1, y1)` with exclusive ends, `None` if nothing is visible
    fn clip(&self, rect: &Rect) -> Option<(u32, u32, u32, u32)> {
        let x0 = rect.x.round().max(0.0);
        let y0 = rect.y.round().max(0.0);
        let x1 = rect.right().round().min(self.width as f32);
        let y1 = rect.bottom().round().min(self.height as f32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    #[inline]
    fn blend(&mut self, x: u32, y: u32, src: [u8; 4]) {
        blend_pixel(&mut self.pixels, self.width, x, y, src);
    }
}

/// Source-over blend of `src` into the pixel at (x, y)
#[inline]
fn blend_pixel(pixels: &mut [u8], width: u32, x: u32, y: u32, src: [u8; 4]) {
    let idx = ((y * width + x) * 4) as usize;
    let dst = &mut pixels[idx..idx + 4];
    match src[3] {
        0 => {}
        255 => dst.copy_from_slice(&src),
        a => {
            let alpha = u32::from(a);
            for c in 0..3 {
                let blended = (u32::from(src[c]) * alpha + u32::from(dst[c]) * (255 - alpha)) / 255;
                dst[c] = blended as u8;
            }
            dst[3] = 255;
        }
    }
}

impl Canvas for FrameCanvas {
    fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    fn clear(&mut self, color: Color) {
        let rgba = color.to_array();
        for pixel in self.pixels.chunks_exact_mut(4) {
            pixel.copy_from_slice(&rgba);
        }
        self.texts.clear();
    }

    /// Nearest-neighbor scaled sprite; unknown textures draw nothing
    fn draw_texture(&mut self, texture: TextureId, dest: Rect) {
        let Some((x0, y0, x1, y1)) = self.clip(&dest) else {
            return;
        };
        let Some(sprite) = self.assets.sprite(texture) else {
            return;
        };
        if sprite.width == 0 || sprite.height == 0 {
            return;
        }
        let sx = sprite.width as f32 / dest.width;
        let sy = sprite.height as f32 / dest.height;
        for y in y0..y1 {
            let v = (((y as f32 + 0.5 - dest.y) * sy) as u32).min(sprite.height - 1);
            for x in x0..x1 {
                let u = (((x as f32 + 0.5 - dest.x) * sx) as u32).min(sprite.width - 1);
                blend_pixel(&mut self.pixels, self.width, x, y, sprite.texel(u, v));
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some((x0, y0, x1, y1)) = self.clip(&rect) else {
            return;
        };
        let rgba = color.to_array();
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend(x, y, rgba);
            }
        }
    }

    /// One-pixel outline along the inside of `rect`
    fn stroke_rect(&mut self, rect: Rect, color: Color) {
        let Some((x0, y0, x1, y1)) = self.clip(&rect) else {
            return;
        };
        let rgba = color.to_array();
        for x in x0..x1 {
            self.blend(x, y0, rgba);
            if y1 - 1 > y0 {
                self.blend(x, y1 - 1, rgba);
            }
        }
        for y in y0 + 1..y1.saturating_sub(1) {
            self.blend(x0, y, rgba);
            if x1 - 1 > x0 {
                self.blend(x1 - 1, y, rgba);
            }
        }
    }

    fn draw_text(&mut self, text: &str, position: Vec2, size: f32, color: Color) {
        self.texts.push(TextCommand {
            text: text.to_string(),
            position,
            size,
            color,
        });
    }
}
