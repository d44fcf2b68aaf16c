//! World save files
//!
//! Worlds are stored as positional text: the camera offset followed by every
//! chunk's bounds and block codes.
//!
//! ```text
//! Camera 400.000000 Chunk { 0.000000, 0.000000, 800.000000, 600.000000 } = {
//! -1, -1, -1, ... 2, 1,
//! }
//! ```

use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::{BlockType, Chunk, GRID_X, GRID_Y, N_CHUNKS, World};
use crate::geometry::Rect;

/// File extension of world saves
pub const WORLD_EXTENSION: &str = "data";

/// Most saves offered on the world selection screen
pub const MAX_LISTED_WORLDS: usize = 16;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("token {index}: expected {expected}, found '{found}'")]
    UnexpectedToken {
        index: usize,
        expected: &'static str,
        found: String,
    },
    #[error("unexpected end of file, expected {expected}")]
    UnexpectedEof { expected: &'static str },
    #[error("token {index}: '{found}' is not a valid number")]
    InvalidNumber { index: usize, found: String },
    #[error("token {index}: {code} is not a block code")]
    InvalidBlockCode { index: usize, code: i32 },
    #[error("world file contains no chunks")]
    NoChunks,
    #[error("invalid world name '{0}'")]
    InvalidName(String),
}

/// Contents of one save file
#[derive(Debug, Clone, PartialEq)]
pub struct SavedWorld {
    /// Horizontal camera offset at the time of saving
    pub camera_offset_x: f32,
    pub world: World,
}

/// Write `world` in the save file format
pub fn write_world<W: Write>(
    writer: &mut W,
    camera_offset_x: f32,
    world: &World,
) -> io::Result<()> {
    write!(writer, "Camera {:.6} ", camera_offset_x)?;
    for chunk in world.chunks() {
        let b = chunk.bounds;
        writeln!(
            writer,
            "Chunk {{ {:.6}, {:.6}, {:.6}, {:.6} }} = {{",
            b.x, b.y, b.width, b.height
        )?;
        for (_, _, block) in chunk.iter_blocks() {
            write!(writer, "{}, ", block.code())?;
        }
        writeln!(writer)?;
        writeln!(writer, "}}")?;
    }
    Ok(())
}

/// Parse a save file
pub fn read_world<R: Read>(reader: &mut R) -> Result<SavedWorld, PersistenceError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_world(&text)
}

fn parse_world(text: &str) -> Result<SavedWorld, PersistenceError> {
    let mut tokens = Tokens::new(text);

    tokens.expect_literal("Camera")?;
    let camera_offset_x = tokens.number("camera offset")?;

    let mut chunks = Vec::with_capacity(N_CHUNKS);
    while !tokens.is_empty() {
        chunks.push(tokens.chunk()?);
    }

    if chunks.is_empty() {
        return Err(PersistenceError::NoChunks);
    }
    if chunks.len() != N_CHUNKS {
        log::warn!(
            "World file has {} chunks, expected {}",
            chunks.len(),
            N_CHUNKS
        );
    }

    Ok(SavedWorld {
        camera_offset_x,
        world: World::new(chunks),
    })
}

/// Whitespace- and comma-separated token stream
struct Tokens<'a> {
    tokens: Vec<&'a str>,
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        let tokens = text
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .collect();
        Self { tokens, pos: 0 }
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn next(&mut self, expected: &'static str) -> Result<(usize, &'a str), PersistenceError> {
        let index = self.pos;
        let token = self
            .tokens
            .get(index)
            .copied()
            .ok_or(PersistenceError::UnexpectedEof { expected })?;
        self.pos += 1;
        Ok((index, token))
    }

    fn expect_literal(&mut self, literal: &'static str) -> Result<(), PersistenceError> {
        let (index, token) = self.next(literal)?;
        if token != literal {
            return Err(PersistenceError::UnexpectedToken {
                index,
                expected: literal,
                found: token.to_string(),
            });
        }
        Ok(())
    }

    fn number(&mut self, expected: &'static str) -> Result<f32, PersistenceError> {
        let (index, token) = self.next(expected)?;
        token.parse().map_err(|_| PersistenceError::InvalidNumber {
            index,
            found: token.to_string(),
        })
    }

    fn block(&mut self) -> Result<BlockType, PersistenceError> {
        let (index, token) = self.next("block code")?;
        let code: i32 = token.parse().map_err(|_| PersistenceError::InvalidNumber {
            index,
            found: token.to_string(),
        })?;
        BlockType::from_code(code).ok_or(PersistenceError::InvalidBlockCode { index, code })
    }

    fn chunk(&mut self) -> Result<Chunk, PersistenceError> {
        self.expect_literal("Chunk")?;
        self.expect_literal("{")?;
        let bounds = Rect::new(
            self.number("chunk x")?,
            self.number("chunk y")?,
            self.number("chunk width")?,
            self.number("chunk height")?,
        );
        self.expect_literal("}")?;
        self.expect_literal("=")?;
        self.expect_literal("{")?;

        let mut chunk = Chunk::with_bounds(bounds);
        for y in 0..GRID_Y {
            for x in 0..GRID_X {
                chunk.set_block(x, y, self.block()?);
            }
        }
        self.expect_literal("}")?;
        Ok(chunk)
    }
}

/// A save file offered on the selection screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldEntry {
    pub name: String,
    pub path: PathBuf,
}

/// Directory of world save files
#[derive(Debug, Clone)]
pub struct WorldStore {
    dir: PathBuf,
}

impl WorldStore {
    /// Open a store, creating the directory if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Saves in the directory, sorted by name, at most [`MAX_LISTED_WORLDS`]
    pub fn list_worlds(&self) -> Result<Vec<WorldEntry>, PersistenceError> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != WORLD_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_stem().and_then(|s| s.to_str()) {
                entries.push(WorldEntry {
                    name: name.to_string(),
                    path: path.clone(),
                });
            }
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries.truncate(MAX_LISTED_WORLDS);
        Ok(entries)
    }

    /// Save path for a user-entered world name
    pub fn path_for_name(&self, name: &str) -> Result<PathBuf, PersistenceError> {
        let name = name.trim();
        let invalid = name.is_empty()
            || name == "."
            || name == ".."
            || name.chars().any(|c| c == '/' || c == '\\' || c.is_control());
        if invalid {
            return Err(PersistenceError::InvalidName(name.to_string()));
        }
        Ok(self.dir.join(format!("{name}.{WORLD_EXTENSION}")))
    }

    /// Write the world next to `path` and move it into place
    pub fn save(
        &self,
        path: &Path,
        camera_offset_x: f32,
        world: &World,
    ) -> Result<(), PersistenceError> {
        let temp_path = path.with_extension(format!("{WORLD_EXTENSION}.tmp"));
        {
            let file = fs::File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            write_world(&mut writer, camera_offset_x, world)?;
            writer.flush()?;
        }
        fs::rename(&temp_path, path)?;
        log::info!(
            "Saved world to {} ({} chunks, {} solid blocks)",
            path.display(),
            world.chunk_count(),
            world.count_solid()
        );
        Ok(())
    }

    pub fn load(&self, path: &Path) -> Result<SavedWorld, PersistenceError> {
        let mut file = fs::File::open(path)?;
        let saved = read_world(&mut file)?;
        log::info!(
            "Loaded world from {} ({} chunks)",
            path.display(),
            saved.world.chunk_count()
        );
        Ok(saved)
    }
}
