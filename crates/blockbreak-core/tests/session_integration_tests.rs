//! Integration tests driving a whole game session through recorded input
//!
//! The canvas and sound player are fakes that record what the game asked for.

use std::path::Path;

use blockbreak_core::entity::{InputState, Keys, MouseButtons};
use blockbreak_core::geometry::Rect;
use blockbreak_core::platform::{Canvas, Color, SoundCue, SoundPlayer, TextureId};
use blockbreak_core::session::FIXED_TIMESTEP;
use blockbreak_core::world::{BlockPos, BlockType, WorldGenerator, WorldStore};
use blockbreak_core::{FrameOutcome, Game, GameSettings, Screen};
use glam::Vec2;

#[derive(Default)]
struct RecordingCanvas {
    texts: Vec<String>,
    textures: Vec<(TextureId, Rect)>,
    fills: Vec<(Rect, Color)>,
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> Vec2 {
        Vec2::new(800.0, 600.0)
    }

    fn clear(&mut self, _color: Color) {
        self.texts.clear();
        self.textures.clear();
        self.fills.clear();
    }

    fn draw_texture(&mut self, texture: TextureId, dest: Rect) {
        self.textures.push((texture, dest));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fills.push((rect, color));
    }

    fn stroke_rect(&mut self, _rect: Rect, _color: Color) {}

    fn draw_text(&mut self, text: &str, _position: Vec2, _size: f32, _color: Color) {
        self.texts.push(text.to_string());
    }
}

#[derive(Default)]
struct RecordingSound {
    cues: Vec<SoundCue>,
}

impl SoundPlayer for RecordingSound {
    fn play(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }
}

struct Harness {
    game: Game,
    input: InputState,
    canvas: RecordingCanvas,
    sound: RecordingSound,
}

impl Harness {
    fn new(dir: &Path) -> Self {
        let store = WorldStore::new(dir).unwrap();
        let settings = GameSettings {
            character_frames: 4,
            ..GameSettings::default()
        };
        Self {
            game: Game::new(store, WorldGenerator::new(42), settings).unwrap(),
            input: InputState::new(),
            canvas: RecordingCanvas::default(),
            sound: RecordingSound::default(),
        }
    }

    /// Run one frame with whatever input was queued, then clear the edges
    fn frame(&mut self) -> FrameOutcome {
        let outcome = self.game.frame(
            &self.input,
            FIXED_TIMESTEP,
            &mut self.canvas,
            &mut self.sound,
        );
        self.input.begin_frame();
        outcome
    }

    fn run(&mut self, frames: usize) {
        for _ in 0..frames {
            self.frame();
        }
    }

    fn tap_key(&mut self, key: Keys) {
        self.input.press_key(key);
        self.frame();
        self.input.release_key(key);
    }

    fn ctrl_tap(&mut self, key: Keys) {
        self.input.press_key(Keys::LEFT_CONTROL);
        self.tap_key(key);
        self.input.release_key(Keys::LEFT_CONTROL);
    }

    fn click(&mut self, button: MouseButtons, screen: Vec2) {
        self.input.mouse_position = screen;
        self.input.press_button(button);
        self.frame();
        self.input.release_button(button);
    }

    fn type_text(&mut self, text: &str) {
        self.input.typed.extend(text.chars());
        self.frame();
    }
}

// Character resting on the grass at x = 0: the camera centers (0, 250) on
// screen, so world (wx, wy) is at screen (wx + 400, wy + 50).
fn screen_of(world: Vec2) -> Vec2 {
    world + Vec2::new(400.0, 50.0)
}

#[test]
fn test_character_lands_on_surface() {
    let dir = tempfile::tempdir().unwrap();
    let mut h = Harness::new(dir.path());
    assert_eq!(h.game.screen(), &Screen::Playing);

    h.run(120);
    assert_eq!(h.game.character().position, Vec2::new(0.0, 250.0));
    assert!(h.game.character().is_resting());

    // Character sprite drawn centered on screen
    let character_frames: Vec<_> = h
        .canvas
        .textures
        .iter()
        .filter(|(id, _)| matches!(id, TextureId::CharacterFrame(_)))
        .collect();
    assert_eq!(character_frames.len(), 1);
    assert_eq!(character_frames[0].1, Rect::new(400.0, 300.0, 50.0, 50.0));
}

#[test]
fn test_walking_right_moves_character() {
    let dir = tempfile::tempdir().unwrap();
    let mut h = Harness::new(dir.path());
    h.run(120);

    h.input.press_key(Keys::D);
    h.run(30);
    h.input.release_key(Keys::D);

    let character = h.game.character();
    assert!(character.position.x > 0.0);
    assert_eq!(character.position.y, 250.0);
}

#[test]
fn test_mouse_edits_play_cues() {
    let dir = tempfile::tempdir().unwrap();
    let mut h = Harness::new(dir.path());
    h.run(120);

    // Break the grass block at cell (4, 6)
    h.click(MouseButtons::LEFT, screen_of(Vec2::new(225.0, 325.0)));
    let grass = BlockPos { chunk: 0, x: 4, y: 6 };
    assert_eq!(h.game.world().get_block(grass), BlockType::Air);
    assert_eq!(h.sound.cues, vec![SoundCue::Crunch]);

    // Left click on air does nothing
    h.click(MouseButtons::LEFT, screen_of(Vec2::new(225.0, 125.0)));
    assert_eq!(h.sound.cues.len(), 1);

    // Right click places the selected block (stone by default)
    h.click(MouseButtons::RIGHT, screen_of(Vec2::new(225.0, 125.0)));
    let sky = BlockPos { chunk: 0, x: 4, y: 2 };
    assert_eq!(h.game.world().get_block(sky), BlockType::Stone);
    assert_eq!(h.sound.cues, vec![SoundCue::Crunch, SoundCue::Place]);

    // Hovered block is highlighted
    let highlight = Color::YELLOW.with_alpha(0.25);
    assert!(h.canvas.fills.iter().any(|(_, color)| *color == highlight));
}

#[test]
fn test_scroll_selects_block_and_shows_hotbar() {
    let dir = tempfile::tempdir().unwrap();
    let mut h = Harness::new(dir.path());
    h.run(120);

    h.input.wheel = 1.0;
    h.frame();
    assert_eq!(h.game.hotbar().selected_block(), BlockType::Dirt);
    assert!(h.canvas.texts.contains(&"Dirt".to_string()));

    // Hidden again after the display time
    h.run(90);
    assert!(h.canvas.texts.is_empty());

    // Shift+scroll also zooms
    h.input.press_key(Keys::LEFT_SHIFT);
    h.input.wheel = -1.0;
    h.frame();
    assert_eq!(h.game.hotbar().selected_block(), BlockType::Stone);
    assert!((h.game.camera().zoom - 0.99).abs() < 1e-6);
}

#[test]
fn test_name_save_reset_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let mut h = Harness::new(dir.path());
    h.run(120);
    h.click(MouseButtons::RIGHT, screen_of(Vec2::new(225.0, 125.0)));

    h.ctrl_tap(Keys::S);
    assert!(matches!(h.game.screen(), Screen::NameWorld { .. }));

    h.type_text("alphx");
    h.tap_key(Keys::BACKSPACE);
    h.type_text("a");
    assert_eq!(
        h.game.screen(),
        &Screen::NameWorld {
            buffer: "alpha".to_string()
        }
    );
    h.tap_key(Keys::ENTER);
    assert_eq!(h.game.screen(), &Screen::Playing);
    let path = dir.path().join("alpha.data");
    assert_eq!(h.game.current_path(), Some(path.as_path()));
    assert!(path.exists());

    // Cancelling a reset keeps playing
    h.ctrl_tap(Keys::R);
    assert_eq!(h.game.screen(), &Screen::ConfirmReset);
    h.tap_key(Keys::N);
    assert_eq!(h.game.screen(), &Screen::Playing);

    // Confirming returns to world selection
    h.ctrl_tap(Keys::R);
    h.tap_key(Keys::Y);
    assert!(matches!(h.game.screen(), Screen::SelectWorld { .. }));
    assert!(h.game.current_path().is_none());
    h.frame();
    assert!(h.canvas.texts.contains(&"#1 : alpha".to_string()));

    h.tap_key(Keys::DIGIT_1);
    assert_eq!(h.game.screen(), &Screen::Playing);
    let placed = BlockPos { chunk: 0, x: 4, y: 2 };
    assert_eq!(h.game.world().get_block(placed), BlockType::Stone);
    assert_eq!(h.game.character().position, Vec2::ZERO);
}

#[test]
fn test_shutdown_saves_current_world() {
    let dir = tempfile::tempdir().unwrap();
    let mut h = Harness::new(dir.path());
    h.game.open_named("keep").unwrap();

    let pos = BlockPos { chunk: 3, x: 0, y: 0 };
    h.game.world_mut().set_block(pos, BlockType::Grass);
    h.game.shutdown().unwrap();

    let store = WorldStore::new(dir.path()).unwrap();
    let saved = store.load(&dir.path().join("keep.data")).unwrap();
    assert_eq!(saved.world.get_block(pos), BlockType::Grass);
}

#[test]
fn test_new_world_from_selection_screen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut h = Harness::new(dir.path());
        h.game.open_named("first").unwrap();
    }

    let mut h = Harness::new(dir.path());
    assert!(matches!(h.game.screen(), Screen::SelectWorld { .. }));

    h.tap_key(Keys::MINUS);
    assert!(matches!(h.game.screen(), Screen::NameWorld { .. }));
    h.type_text("second");
    h.tap_key(Keys::ENTER);

    let store = WorldStore::new(dir.path()).unwrap();
    let names: Vec<_> = store.list_worlds().unwrap().into_iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["first", "second"]);
}

#[test]
fn test_invalid_name_stays_on_name_screen() {
    let dir = tempfile::tempdir().unwrap();
    let mut h = Harness::new(dir.path());
    h.ctrl_tap(Keys::S);
    h.type_text("a/b");
    h.tap_key(Keys::ENTER);
    assert!(matches!(h.game.screen(), Screen::NameWorld { .. }));
    assert!(h.game.current_path().is_none());
}

#[test]
fn test_unreadable_world_starts_fresh_without_overwriting() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("broken.data");
    std::fs::write(&broken, "garbage").unwrap();

    let mut h = Harness::new(dir.path());
    assert!(matches!(h.game.screen(), Screen::SelectWorld { .. }));

    h.tap_key(Keys::DIGIT_1);
    assert_eq!(h.game.screen(), &Screen::Playing);
    assert!(h.game.current_path().is_none());
    assert!(h.game.world().count_solid() > 0);

    h.game.shutdown().unwrap();
    assert_eq!(std::fs::read_to_string(&broken).unwrap(), "garbage");
}
