//! Game session - screens, fixed-step simulation and drawing

use std::path::PathBuf;

use anyhow::{Context, Result};
use glam::Vec2;

use crate::camera::Camera2D;
use crate::entity::{Animation, Character, Hotbar, InputState, Keys, PhysicsParams};
use crate::platform::{Canvas, Color, SoundPlayer, TextureId};
use crate::world::editing::{handle_click, hovered_block};
use crate::world::{
    CharacterPhysicsSystem, SavedWorld, World, WorldEntry, WorldGenerator, WorldStore,
};

/// Length of one physics step in seconds
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
/// Physics steps allowed per frame before time is dropped
pub const MAX_STEPS_PER_FRAME: u32 = 5;

const MENU_FONT_SIZE: f32 = 24.0;
const RESET_FONT_SIZE: f32 = 25.0;
const HOVER_ALPHA: f32 = 0.25;

/// Session tuning supplied by the frontend
#[derive(Debug, Clone)]
pub struct GameSettings {
    pub physics: PhysicsParams,
    /// Seconds the hotbar stays up after a wheel action
    pub hotbar_display_secs: f64,
    /// Frames of the character animation, 0 for a plain rectangle
    pub character_frames: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            physics: PhysicsParams::default(),
            hotbar_display_secs: 1.0,
            character_frames: 0,
        }
    }
}

/// Which screen is active
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    SelectWorld { entries: Vec<WorldEntry> },
    NameWorld { buffer: String },
    Playing,
    ConfirmReset,
}

/// What the frontend should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Quit,
}

/// One running game: the loaded world, the character and the active screen
pub struct Game {
    store: WorldStore,
    generator: WorldGenerator,
    settings: GameSettings,

    world: World,
    character: Character,
    camera: Camera2D,
    hotbar: Hotbar,
    screen: Screen,

    /// Save file of the current world, `None` until it is named
    current_path: Option<PathBuf>,
    accumulator: f32,
    clock: f64,
}

impl Game {
    /// Start at the world selection screen, or straight into a fresh world
    /// when there is nothing to select
    pub fn new(
        store: WorldStore,
        generator: WorldGenerator,
        settings: GameSettings,
    ) -> Result<Self> {
        let character = Character::new(Vec2::ZERO)
            .with_animation(Animation::new(settings.character_frames));
        let mut game = Self {
            store,
            generator,
            settings,
            world: World::empty(),
            character,
            camera: Camera2D::default(),
            hotbar: Hotbar::new(),
            screen: Screen::Playing,
            current_path: None,
            accumulator: 0.0,
            clock: 0.0,
        };
        game.enter_world_selection()?;
        Ok(game)
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn hotbar(&self) -> &Hotbar {
        &self.hotbar
    }

    pub fn current_path(&self) -> Option<&std::path::Path> {
        self.current_path.as_deref()
    }

    /// Load the named world, or generate and save it if it does not exist yet
    pub fn open_named(&mut self, name: &str) -> Result<()> {
        let path = self.store.path_for_name(name)?;
        if path.exists() {
            let saved = self
                .store
                .load(&path)
                .with_context(|| format!("Failed to load world {}", path.display()))?;
            self.install_world(saved);
        } else {
            self.install_fresh_world();
            self.store
                .save(&path, self.camera.offset.x, &self.world)
                .with_context(|| format!("Failed to save world {}", path.display()))?;
        }
        self.current_path = Some(path);
        self.set_screen(Screen::Playing);
        Ok(())
    }

    /// Save the current world to its file, if it has one
    pub fn shutdown(&mut self) -> Result<()> {
        match &self.current_path {
            Some(path) => self
                .store
                .save(path, self.camera.offset.x, &self.world)
                .with_context(|| format!("Failed to save world {}", path.display())),
            None => {
                log::info!("Current world has no name, not saving");
                Ok(())
            }
        }
    }

    /// Run one frame: react to input, advance the simulation and draw
    pub fn frame(
        &mut self,
        input: &InputState,
        dt: f32,
        canvas: &mut dyn Canvas,
        sound: &mut dyn SoundPlayer,
    ) -> FrameOutcome {
        self.clock += f64::from(dt);

        if input.was_pressed(Keys::ESCAPE) {
            log::info!("Quit requested");
            return FrameOutcome::Quit;
        }

        match self.screen {
            Screen::SelectWorld { .. } => self.select_world_frame(input, canvas),
            Screen::NameWorld { .. } => self.name_world_frame(input, canvas),
            Screen::Playing => self.playing_frame(input, dt, canvas, sound),
            Screen::ConfirmReset => self.confirm_reset_frame(input, canvas),
        }

        FrameOutcome::Continue
    }

    fn set_screen(&mut self, screen: Screen) {
        log::debug!("Screen: {:?}", screen);
        self.screen = screen;
    }

    fn enter_world_selection(&mut self) -> Result<()> {
        let entries = self
            .store
            .list_worlds()
            .with_context(|| format!("Failed to list worlds in {}", self.store.dir().display()))?;
        if entries.is_empty() {
            log::info!("No saved worlds, starting a fresh one");
            self.install_fresh_world();
            self.set_screen(Screen::Playing);
        } else {
            self.set_screen(Screen::SelectWorld { entries });
        }
        Ok(())
    }

    fn install_fresh_world(&mut self) {
        self.world = self.generator.generate_world();
        self.reset_play_state();
    }

    fn install_world(&mut self, saved: SavedWorld) {
        self.world = saved.world;
        self.reset_play_state();
        self.camera.offset.x = saved.camera_offset_x;
    }

    fn reset_play_state(&mut self) {
        self.character.respawn(Vec2::ZERO);
        self.camera = Camera2D::default();
        self.accumulator = 0.0;
    }

    fn select_world_frame(&mut self, input: &InputState, canvas: &mut dyn Canvas) {
        let Screen::SelectWorld { entries } = &self.screen else {
            return;
        };

        canvas.clear(Color::BLACK);
        canvas.draw_text(
            "press the number to load the file.\npress '-' for a new world.",
            Vec2::new(128.0, 100.0),
            MENU_FONT_SIZE,
            Color::WHITE,
        );
        for (i, entry) in entries.iter().enumerate() {
            canvas.draw_text(
                &format!("#{} : {}", i + 1, entry.name),
                Vec2::new(250.0, 150.0 + i as f32 * MENU_FONT_SIZE),
                MENU_FONT_SIZE,
                Color::WHITE,
            );
        }

        if input.was_pressed(Keys::MINUS) {
            self.install_fresh_world();
            self.current_path = None;
            self.set_screen(Screen::NameWorld {
                buffer: String::new(),
            });
            return;
        }

        let Some(entry) = input
            .pressed_digit()
            .and_then(|digit| entries.get(digit - 1))
            .cloned()
        else {
            return;
        };

        match self.store.load(&entry.path) {
            Ok(saved) => {
                self.install_world(saved);
                self.current_path = Some(entry.path);
            }
            Err(e) => {
                log::error!("Failed to load world {}: {}", entry.path.display(), e);
                self.install_fresh_world();
                self.current_path = None;
            }
        }
        self.set_screen(Screen::Playing);
    }

    fn name_world_frame(&mut self, input: &InputState, canvas: &mut dyn Canvas) {
        let Screen::NameWorld { buffer } = &mut self.screen else {
            return;
        };

        if input.was_pressed(Keys::BACKSPACE) {
            buffer.pop();
        } else if !input.was_pressed(Keys::ENTER) {
            buffer.extend(input.typed.iter().filter(|c| !c.is_control()));
        }

        canvas.clear(Color::BLACK);
        canvas.draw_text(
            "type a new world name, then press enter to save.",
            Vec2::new(150.0, 200.0),
            MENU_FONT_SIZE,
            Color::WHITE,
        );
        canvas.draw_text(buffer, Vec2::new(350.0, 250.0), MENU_FONT_SIZE, Color::WHITE);

        if !input.was_pressed(Keys::ENTER) {
            return;
        }

        let name = buffer.clone();
        let path = match self.store.path_for_name(&name) {
            Ok(path) => path,
            Err(e) => {
                log::warn!("{}", e);
                return;
            }
        };
        if let Err(e) = self.store.save(&path, self.camera.offset.x, &self.world) {
            log::error!("Failed to save world {}: {}", path.display(), e);
            return;
        }
        self.current_path = Some(path);
        self.set_screen(Screen::Playing);
    }

    fn playing_frame(
        &mut self,
        input: &InputState,
        dt: f32,
        canvas: &mut dyn Canvas,
        sound: &mut dyn SoundPlayer,
    ) {
        if input.ctrl_pressed(Keys::R) {
            self.set_screen(Screen::ConfirmReset);
            return;
        }
        if input.ctrl_pressed(Keys::S) {
            self.set_screen(Screen::NameWorld {
                buffer: String::new(),
            });
            return;
        }

        if self.hotbar.scroll(input.wheel, self.clock) && input.is_down(Keys::LEFT_SHIFT) {
            self.camera.adjust_zoom(input.wheel.trunc() / 100.0);
        }

        self.step_physics(input, dt);

        let screen_size = canvas.size();
        self.camera.follow(self.character.position, screen_size);

        canvas.clear(Color::SKY_BLUE);
        self.draw_world(canvas, screen_size);

        if let Some(pos) = hovered_block(&self.world, &self.camera, input.mouse_position) {
            let rect = self.camera.world_rect_to_screen(&self.world.block_rect(pos));
            canvas.fill_rect(rect, Color::YELLOW.with_alpha(HOVER_ALPHA));

            if let Some((_, cue)) =
                handle_click(&mut self.world, input, pos, self.hotbar.selected_block())
            {
                sound.play(cue);
            }
        }

        self.draw_character(canvas);
        self.hotbar
            .draw(canvas, self.clock, self.settings.hotbar_display_secs);
    }

    /// Run as many fixed steps as the elapsed time allows
    fn step_physics(&mut self, input: &InputState, dt: f32) {
        self.accumulator += dt.max(0.0);
        let mut steps = 0;
        while self.accumulator >= FIXED_TIMESTEP && steps < MAX_STEPS_PER_FRAME {
            CharacterPhysicsSystem::update(&mut self.character, &self.world, &self.settings.physics);
            self.character.apply_controls(input, &self.settings.physics);
            self.accumulator -= FIXED_TIMESTEP;
            steps += 1;
        }
        if self.accumulator >= FIXED_TIMESTEP {
            log::debug!("Dropping {:.3}s of simulation time", self.accumulator);
            self.accumulator = 0.0;
        }
    }

    fn draw_world(&self, canvas: &mut dyn Canvas, screen_size: Vec2) {
        let visible = self.camera.visible_world_rect(screen_size);
        for chunk in self.world.chunks() {
            if !chunk.bounds.overlaps(&visible) {
                continue;
            }
            for (x, y, block) in chunk.iter_blocks() {
                if block.is_air() {
                    continue;
                }
                let rect = chunk.block_rect(x, y);
                if rect.overlaps(&visible) {
                    canvas.draw_texture(
                        TextureId::Block(block),
                        self.camera.world_rect_to_screen(&rect),
                    );
                }
            }
        }
    }

    fn draw_character(&mut self, canvas: &mut dyn Canvas) {
        let rect = self.camera.world_rect_to_screen(&self.character.bounds());
        match self.character.animation.step() {
            Some(frame) => canvas.draw_texture(TextureId::CharacterFrame(frame), rect),
            None => canvas.fill_rect(rect, Color::DARK_GRAY),
        }
    }

    fn confirm_reset_frame(&mut self, input: &InputState, canvas: &mut dyn Canvas) {
        canvas.clear(Color::BLACK);
        canvas.draw_text(
            "are you sure you want to reset the world?\npress [y/n] to confirm/cancel",
            Vec2::new(250.0, 350.0),
            RESET_FONT_SIZE,
            Color::RED,
        );

        if input.was_pressed(Keys::Y) {
            log::info!("Resetting world");
            self.current_path = None;
            self.character.respawn(Vec2::ZERO);
            if let Err(e) = self.enter_world_selection() {
                log::error!("{:#}", e);
                self.install_fresh_world();
                self.set_screen(Screen::Playing);
            }
        } else if input.was_pressed(Keys::N) {
            self.set_screen(Screen::Playing);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::platform::SoundCue;

    struct NullCanvas;

    impl Canvas for NullCanvas {
        fn size(&self) -> Vec2 {
            Vec2::new(800.0, 600.0)
        }
        fn clear(&mut self, _color: Color) {}
        fn draw_texture(&mut self, _texture: TextureId, _dest: Rect) {}
        fn fill_rect(&mut self, _rect: Rect, _color: Color) {}
        fn stroke_rect(&mut self, _rect: Rect, _color: Color) {}
        fn draw_text(&mut self, _text: &str, _position: Vec2, _size: f32, _color: Color) {}
    }

    struct Silent;

    impl SoundPlayer for Silent {
        fn play(&mut self, _cue: SoundCue) {}
    }

    fn new_game(dir: &std::path::Path) -> Game {
        let store = WorldStore::new(dir).unwrap();
        Game::new(store, WorldGenerator::new(1), GameSettings::default()).unwrap()
    }

    #[test]
    fn test_empty_store_starts_playing() {
        let dir = tempfile::tempdir().unwrap();
        let game = new_game(dir.path());
        assert_eq!(game.screen(), &Screen::Playing);
        assert!(game.current_path().is_none());
        assert!(game.world().count_solid() > 0);
    }

    #[test]
    fn test_fixed_step_accumulator() {
        let dir = tempfile::tempdir().unwrap();
        let mut game = new_game(dir.path());
        let input = InputState::new();

        // Half a step: nothing moves yet
        game.step_physics(&input, FIXED_TIMESTEP * 0.5);
        assert_eq!(game.character().velocity, Vec2::ZERO);

        game.step_physics(&input, FIXED_TIMESTEP * 0.6);
        assert!(game.character().velocity.y > 0.0);

        // A long stall runs at most MAX_STEPS_PER_FRAME and drops the rest
        game.step_physics(&input, 10.0);
        assert_eq!(game.accumulator, 0.0);
    }

    #[test]
    fn test_escape_quits() {
        let dir = tempfile::tempdir().unwrap();
        let mut game = new_game(dir.path());
        let mut input = InputState::new();
        input.press_key(Keys::ESCAPE);
        let outcome = game.frame(&input, FIXED_TIMESTEP, &mut NullCanvas, &mut Silent);
        assert_eq!(outcome, FrameOutcome::Quit);
    }

    #[test]
    fn test_open_named_creates_then_loads() {
        let dir = tempfile::tempdir().unwrap();
        let mut game = new_game(dir.path());
        game.open_named("fresh").unwrap();
        let path = dir.path().join("fresh.data");
        assert_eq!(game.current_path(), Some(path.as_path()));
        assert!(path.exists());

        let saved_world = game.world().clone();
        let mut other = new_game(dir.path());
        other.open_named("fresh").unwrap();
        assert_eq!(other.world(), &saved_world);
    }

    #[test]
    fn test_shutdown_without_name_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut game = new_game(dir.path());
        game.shutdown().unwrap();
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
