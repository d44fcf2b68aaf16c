//! Rendering: CPU framebuffer plus the wgpu presenter

mod canvas;
mod renderer;

pub use canvas::{FrameCanvas, TextCommand};
pub use renderer::Renderer;
