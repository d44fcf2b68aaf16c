//! # Block Break
//!
//! Desktop frontend: a winit window presenting the game's CPU framebuffer
//! through wgpu, with egui painting the text.

pub mod app;
pub mod assets;
pub mod audio;
pub mod config;
pub mod render;

pub use app::App;
pub use config::GameConfig;
