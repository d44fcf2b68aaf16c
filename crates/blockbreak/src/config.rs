//! Game configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `config.ron` file (if exists)
//! 3. Environment variables prefixed with `BLOCKBREAK_`
//!
//! Example environment variable: `BLOCKBREAK_PLAYER__GRAVITY=0.8`

use std::path::PathBuf;

use anyhow::{Context, Result};
use blockbreak_core::entity::PhysicsParams;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Main game configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameConfig {
    #[serde(default)]
    pub player: PhysicsParams,

    #[serde(default)]
    pub world: WorldConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

/// World storage and generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Directory holding `*.data` world saves
    pub worlds_dir: PathBuf,
    /// Seed for new worlds, random when unset
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            worlds_dir: PathBuf::from("worlds"),
            seed: None,
        }
    }
}

/// UI and window settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Initial window width
    pub window_width: u32,
    /// Initial window height
    pub window_height: u32,
    /// Seconds the hotbar stays visible after scrolling
    pub hotbar_display_secs: f64,
    /// Directory with block textures and `character_animation/`
    pub assets_dir: PathBuf,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 600,
            hotbar_display_secs: 1.0,
            assets_dir: PathBuf::from("assets"),
        }
    }
}

impl GameConfig {
    /// Load configuration from `config.ron` in the working directory and the
    /// environment
    pub fn load() -> Result<Self> {
        Self::load_from("config")
    }

    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `<file_stem>.ron` (if exists)
    /// 3. Environment variables prefixed with `BLOCKBREAK_` (highest priority)
    pub fn load_from(file_stem: &str) -> Result<Self> {
        let defaults = PhysicsParams::default();
        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("player.gravity", f64::from(defaults.gravity))?
            .set_default("player.jump_impulse", f64::from(defaults.jump_impulse))?
            .set_default("player.walk_acceleration", f64::from(defaults.walk_acceleration))?
            .set_default("player.damping", f64::from(defaults.damping))?
            .set_default("world.worlds_dir", "worlds")?
            .set_default("ui.window_width", 800_i64)?
            .set_default("ui.window_height", 600_i64)?
            .set_default("ui.hotbar_display_secs", 1.0)?
            .set_default("ui.assets_dir", "assets")?
            // Layer 2: Config file (optional, won't error if missing)
            .add_source(
                File::with_name(file_stem)
                    .format(config::FileFormat::Ron)
                    .required(false),
            )
            // Layer 3: Environment variables (BLOCKBREAK_UI__WINDOW_WIDTH, etc.)
            .add_source(Environment::with_prefix("BLOCKBREAK").separator("__"));

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Effective configuration as pretty RON
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.player.gravity, 0.5);
        assert_eq!(config.player.jump_impulse, 10.0);
        assert_eq!(config.world.worlds_dir, PathBuf::from("worlds"));
        assert_eq!(config.world.seed, None);
        assert_eq!(config.ui.window_width, 800);
        assert_eq!(config.ui.hotbar_display_secs, 1.0);
    }

    #[test]
    fn test_load_config_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let stem = dir.path().join("missing");
        let config = GameConfig::load_from(stem.to_str().unwrap()).expect("Failed to load config");
        assert_eq!(config.player.damping, 0.98);
        assert_eq!(config.ui.window_height, 600);
        assert_eq!(config.ui.assets_dir, PathBuf::from("assets"));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("game.ron"),
            "(player: (gravity: 0.75), world: (seed: 99), ui: (window_width: 1024))",
        )
        .unwrap();

        let stem = dir.path().join("game");
        let config = GameConfig::load_from(stem.to_str().unwrap()).unwrap();
        assert_eq!(config.player.gravity, 0.75);
        assert_eq!(config.player.jump_impulse, 10.0);
        assert_eq!(config.world.seed, Some(99));
        assert_eq!(config.ui.window_width, 1024);
        assert_eq!(config.ui.window_height, 600);
    }

    #[test]
    fn test_ron_output_reloads() {
        let config = GameConfig::default();
        let text = config.to_ron().unwrap();
        let parsed: GameConfig = ron::from_str(&text).unwrap();
        assert_eq!(parsed.ui.window_width, config.ui.window_width);
        assert_eq!(parsed.world.worlds_dir, config.world.worlds_dir);
    }
}
