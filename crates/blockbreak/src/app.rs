//! Application state and event loop

use anyhow::{Context, Result};
use std::sync::Arc;
use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use blockbreak_core::entity::{InputState, Keys, MouseButtons};
use blockbreak_core::platform::SoundPlayer;
use blockbreak_core::world::{WorldGenerator, WorldStore};
use blockbreak_core::{FrameOutcome, Game, GameSettings};
use glam::Vec2;

use crate::assets::AssetStore;
use crate::audio;
use crate::config::GameConfig;
use crate::render::{FrameCanvas, Renderer, TextCommand};

/// Pixel scroll distance counted as one wheel line
const PIXELS_PER_LINE: f32 = 100.0;

/// Main application state
pub struct App {
    // Window and rendering
    window: Arc<Window>,
    renderer: Renderer,
    canvas: FrameCanvas,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,

    // Game
    game: Game,
    input: InputState,
    sound: Box<dyn SoundPlayer>,

    // Timing
    last_frame: Instant,
    exiting: bool,
}

impl App {
    /// Create the window, renderer and game session. `world` opens (or
    /// creates) a named world directly instead of showing the selection screen.
    pub async fn new(config: GameConfig, world: Option<String>) -> Result<(Self, EventLoop<()>)> {
        // Create event loop
        let event_loop = EventLoop::new()?;

        // Create window
        let window_attrs = WindowAttributes::default()
            .with_title("Block Break")
            .with_inner_size(LogicalSize::new(
                config.ui.window_width,
                config.ui.window_height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);

        // Create renderer
        let renderer = Renderer::new(window.clone()).await?;

        let assets = AssetStore::load(&config.ui.assets_dir);
        let sound = audio::open_sound_player(&config.ui.assets_dir);
        let settings = GameSettings {
            physics: config.player.clone(),
            hotbar_display_secs: config.ui.hotbar_display_secs,
            character_frames: assets.character_frame_count(),
        };

        let store = WorldStore::new(&config.world.worlds_dir).with_context(|| {
            format!(
                "Failed to open worlds directory {}",
                config.world.worlds_dir.display()
            )
        })?;
        let generator = config
            .world
            .seed
            .map_or_else(WorldGenerator::from_entropy, WorldGenerator::new);
        log::info!("World seed: {}", generator.seed);

        let mut game = Game::new(store, generator, settings)?;
        if let Some(name) = world {
            game.open_named(&name)?;
        }

        let size = window.inner_size();
        let canvas = FrameCanvas::new(size.width, size.height, assets);

        // Setup egui
        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &renderer.device,
            renderer.surface_format(),
            egui_wgpu::RendererOptions::default(),
        );

        Ok((
            Self {
                window,
                renderer,
                canvas,
                egui_ctx,
                egui_state,
                egui_renderer,
                game,
                input: InputState::new(),
                sound,
                last_frame: Instant::now(),
                exiting: false,
            },
            event_loop,
        ))
    }

    /// Run the event loop
    pub fn run(event_loop: EventLoop<()>, mut app: Self) -> Result<()> {
        event_loop.run_app(&mut app)?;
        Ok(())
    }

    /// Advance the game by the time since the last frame
    fn update(&mut self) -> FrameOutcome {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        let outcome = self
            .game
            .frame(&self.input, dt, &mut self.canvas, self.sound.as_mut());
        self.input.begin_frame();
        outcome
    }

    /// Save the world once and leave the event loop
    fn exit(&mut self, event_loop: &ActiveEventLoop) {
        if self.exiting {
            return;
        }
        self.exiting = true;
        if let Err(e) = self.game.shutdown() {
            log::error!("{:#}", e);
        }
        event_loop.exit();
    }

    /// Render frame
    fn render(&mut self) -> Result<()> {
        self.renderer.upload(&self.canvas);
        let texts: Vec<TextCommand> = self.canvas.texts().to_vec();

        // Begin frame
        let output = self.renderer.begin_frame()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            self.renderer
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("render_encoder"),
                });

        self.renderer.render_frame(&mut encoder, &view);

        // Run egui: game text is queued in screen pixels
        let raw_input = self.egui_state.take_egui_input(&self.window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            paint_texts(ctx, &texts);
        });

        // Handle egui platform output
        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output);

        // Tessellate egui shapes
        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        // Update egui textures
        for (id, delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(
                &self.renderer.device,
                &self.renderer.queue,
                *id,
                delta,
            );
        }

        // Create screen descriptor
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.renderer.size().width, self.renderer.size().height],
            pixels_per_point: full_output.pixels_per_point,
        };

        // Update egui buffers
        self.egui_renderer.update_buffers(
            &self.renderer.device,
            &self.renderer.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        // Render egui
        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.egui_renderer.render(
                &mut render_pass.forget_lifetime(),
                &paint_jobs,
                &screen_descriptor,
            );
        }

        // Free egui textures
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        // Submit and present
        self.renderer
            .queue
            .submit(std::iter::once(encoder.finish()));
        self.renderer.end_frame(output);

        Ok(())
    }
}

/// Paint queued game text on top of the frame
fn paint_texts(ctx: &egui::Context, texts: &[TextCommand]) {
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("game_text"),
    ));
    let ppp = ctx.pixels_per_point();
    for cmd in texts {
        let [r, g, b, a] = cmd.color.to_array();
        painter.text(
            egui::pos2(cmd.position.x / ppp, cmd.position.y / ppp),
            egui::Align2::LEFT_TOP,
            &cmd.text,
            egui::FontId::proportional(cmd.size / ppp),
            egui::Color32::from_rgba_unmultiplied(r, g, b, a),
        );
    }
}

/// Game key for a physical key, if the game uses it
fn map_key(code: KeyCode) -> Option<Keys> {
    let key = match code {
        KeyCode::KeyW => Keys::W,
        KeyCode::KeyA => Keys::A,
        KeyCode::KeyS => Keys::S,
        KeyCode::KeyD => Keys::D,
        KeyCode::KeyY => Keys::Y,
        KeyCode::KeyN => Keys::N,
        KeyCode::KeyR => Keys::R,
        KeyCode::Minus | KeyCode::NumpadSubtract => Keys::MINUS,
        KeyCode::Enter | KeyCode::NumpadEnter => Keys::ENTER,
        KeyCode::Backspace => Keys::BACKSPACE,
        KeyCode::ControlLeft | KeyCode::ControlRight => Keys::LEFT_CONTROL,
        KeyCode::ShiftLeft => Keys::LEFT_SHIFT,
        KeyCode::Escape => Keys::ESCAPE,
        KeyCode::Digit1 | KeyCode::Numpad1 => Keys::DIGIT_1,
        KeyCode::Digit2 | KeyCode::Numpad2 => Keys::DIGIT_2,
        KeyCode::Digit3 | KeyCode::Numpad3 => Keys::DIGIT_3,
        KeyCode::Digit4 | KeyCode::Numpad4 => Keys::DIGIT_4,
        KeyCode::Digit5 | KeyCode::Numpad5 => Keys::DIGIT_5,
        KeyCode::Digit6 | KeyCode::Numpad6 => Keys::DIGIT_6,
        KeyCode::Digit7 | KeyCode::Numpad7 => Keys::DIGIT_7,
        KeyCode::Digit8 | KeyCode::Numpad8 => Keys::DIGIT_8,
        KeyCode::Digit9 | KeyCode::Numpad9 => Keys::DIGIT_9,
        _ => return None,
    };
    Some(key)
}

/// Wheel movement in lines, positive away from the user
fn wheel_lines(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {
        self.window.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle events first
        let egui_response = self.egui_state.on_window_event(&self.window, &event);
        if egui_response.consumed {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.exit(event_loop);
            }
            WindowEvent::Resized(size) => {
                self.renderer.resize(size);
                if size.width > 0 && size.height > 0 {
                    self.canvas.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                if self.update() == FrameOutcome::Quit {
                    self.exit(event_loop);
                    return;
                }
                if let Err(e) = self.render() {
                    log::error!("Render error: {}", e);
                }
                self.window.request_redraw();
            }
            WindowEvent::Focused(false) => {
                self.input.release_all();
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input.mouse_position = Vec2::new(position.x as f32, position.y as f32);
            }
            WindowEvent::CursorLeft { .. } => {
                self.input.release_button(MouseButtons::LEFT | MouseButtons::RIGHT);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = match button {
                    MouseButton::Left => MouseButtons::LEFT,
                    MouseButton::Right => MouseButtons::RIGHT,
                    _ => return,
                };
                match state {
                    ElementState::Pressed => self.input.press_button(button),
                    ElementState::Released => self.input.release_button(button),
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.input.wheel += wheel_lines(delta);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key
                    && let Some(key) = map_key(code)
                {
                    match event.state {
                        ElementState::Pressed => self.input.press_key(key),
                        ElementState::Released => self.input.release_key(key),
                    }
                }
                if event.state == ElementState::Pressed
                    && let Some(text) = &event.text
                {
                    self.input.typed.extend(text.chars());
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key(KeyCode::KeyW), Some(Keys::W));
        assert_eq!(map_key(KeyCode::Digit9), Some(Keys::DIGIT_9));
        assert_eq!(map_key(KeyCode::NumpadEnter), Some(Keys::ENTER));
        assert_eq!(map_key(KeyCode::ControlRight), Some(Keys::LEFT_CONTROL));
        assert_eq!(map_key(KeyCode::KeyQ), None);
    }

    #[test]
    fn test_wheel_lines() {
        assert_eq!(wheel_lines(MouseScrollDelta::LineDelta(0.0, -2.0)), -2.0);
        let pixels = winit::dpi::PhysicalPosition::new(0.0, 250.0);
        assert_eq!(wheel_lines(MouseScrollDelta::PixelDelta(pixels)), 2.5);
    }
}
