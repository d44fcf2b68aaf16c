//! Sprite loading for block textures and the character animation

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blockbreak_core::platform::{Color, TextureId};
use blockbreak_core::world::BlockType;

/// Extensions tried for block textures, in order
const BLOCK_EXTENSIONS: [&str; 2] = ["png", "jpg"];
const ANIMATION_DIR: &str = "character_animation";
/// Edge length of generated placeholder sprites
const PLACEHOLDER_SIZE: u32 = 8;

/// Decoded RGBA8 image
#[derive(Debug, Clone)]
pub struct Sprite {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Sprite {
    pub fn load(path: &Path) -> Result<Self> {
        let img = image::open(path)
            .with_context(|| format!("Failed to decode image {}", path.display()))?
            .to_rgba8();
        Ok(Self {
            width: img.width(),
            height: img.height(),
            data: img.into_raw(),
        })
    }

    /// Flat-colored stand-in for a missing image
    pub fn solid(color: Color) -> Self {
        let pixels = (PLACEHOLDER_SIZE * PLACEHOLDER_SIZE) as usize;
        Self {
            width: PLACEHOLDER_SIZE,
            height: PLACEHOLDER_SIZE,
            data: color.to_array().repeat(pixels),
        }
    }

    /// RGBA of the texel at (x, y)
    #[inline]
    pub fn texel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * self.width + x) * 4) as usize;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }
}

/// All sprites the game draws
#[derive(Debug, Clone, Default)]
pub struct AssetStore {
    blocks: HashMap<BlockType, Sprite>,
    character_frames: Vec<Sprite>,
}

impl AssetStore {
    /// Load sprites from `dir`. Missing block textures become flat colors and
    /// a missing animation leaves the character as a plain rectangle.
    pub fn load(dir: &Path) -> Self {
        log::info!("Loading assets from: {}", dir.display());

        let blocks = BlockType::PLACEABLE
            .into_iter()
            .map(|block| (block, load_block_sprite(dir, block)))
            .collect();

        let character_frames = match load_animation(&dir.join(ANIMATION_DIR)) {
            Ok(frames) => frames,
            Err(e) => {
                log::warn!("Character animation unavailable: {:#}", e);
                Vec::new()
            }
        };
        log::info!("Loaded {} character frames", character_frames.len());

        Self {
            blocks,
            character_frames,
        }
    }

    pub fn character_frame_count(&self) -> usize {
        self.character_frames.len()
    }

    pub fn sprite(&self, texture: TextureId) -> Option<&Sprite> {
        match texture {
            TextureId::Block(block) => self.blocks.get(&block),
            TextureId::CharacterFrame(frame) => self.character_frames.get(frame),
        }
    }
}

fn placeholder_color(block: BlockType) -> Color {
    match block {
        BlockType::Grass => Color::rgb(86, 160, 60),
        BlockType::Dirt => Color::rgb(121, 85, 58),
        BlockType::Stone => Color::rgb(128, 128, 128),
        BlockType::Air => Color::rgba(0, 0, 0, 0),
    }
}

fn load_block_sprite(dir: &Path, block: BlockType) -> Sprite {
    let stem = block.name().to_lowercase();
    let candidates: Vec<PathBuf> = BLOCK_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{stem}.{ext}")))
        .collect();

    for path in candidates.iter().filter(|p| p.exists()) {
        match Sprite::load(path) {
            Ok(sprite) => return sprite,
            Err(e) => log::warn!("{:#}", e),
        }
    }

    log::warn!(
        "No usable texture for {} (tried {:?}), using a flat color",
        block.name(),
        candidates
    );
    Sprite::solid(placeholder_color(block))
}

/// Every `*.png` in `dir`, in file name order
fn load_animation(dir: &Path) -> Result<Vec<Sprite>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Could not open directory {}", dir.display()))?
    {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "png") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut frames = Vec::with_capacity(paths.len());
    for path in &paths {
        match Sprite::load(path) {
            Ok(sprite) => frames.push(sprite),
            Err(e) => log::warn!("Skipping animation frame: {:#}", e),
        }
    }
    Ok(frames)
}
