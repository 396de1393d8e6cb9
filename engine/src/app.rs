use std::collections::HashSet;
use std::time::{Duration, Instant};

use pixels::{PixelsBuilder, SurfaceTexture};
use thiserror::Error;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::graphics::Renderer2d;
use crate::pixels_renderer::PixelsRenderer2d;
use crate::surface::SurfaceSize;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to initialise pixel surface: {0}")]
    Pixels(#[from] pixels::Error),
}

pub struct AppConfig {
    pub title: String,
    pub desired_size: PhysicalSize<u32>,
    pub resizable: bool,
    pub vsync: bool,
    pub target_fps: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: String::from("engine"),
            desired_size: PhysicalSize::new(640, 400),
            resizable: true,
            vsync: true,
            target_fps: 60,
        }
    }
}

pub struct AppContext {
    pub window: Window,
    pub renderer: PixelsRenderer2d,
    pub surface_size: SurfaceSize,
    exit_requested: bool,
}

impl AppContext {
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }
}

/// Keyboard state gathered between two redraws.
///
/// `keys_pressed` only holds the first press of a key: OS auto-repeat presses of a key that
/// is already held are filtered out, so each physical press is seen once.
#[derive(Debug, Clone, Default)]
pub struct InputFrame {
    pub keys_pressed: Vec<VirtualKeyCode>,
    pub keys_down: HashSet<VirtualKeyCode>,
    pub focus_lost: bool,
}

impl InputFrame {
    /// Applies one raw key event. Returns `true` when it produced a fresh press.
    pub fn on_key(&mut self, key: VirtualKeyCode, state: ElementState) -> bool {
        match state {
            ElementState::Pressed => {
                let fresh = self.keys_down.insert(key);
                if fresh {
                    self.keys_pressed.push(key);
                }
                fresh
            }
            ElementState::Released => {
                self.keys_down.remove(&key);
                false
            }
        }
    }

    pub fn on_focus_lost(&mut self) {
        self.keys_down.clear();
        self.focus_lost = true;
    }

    /// Clears the per-frame parts; held keys carry over.
    pub fn end_frame(&mut self) {
        self.keys_pressed.clear();
        self.focus_lost = false;
    }
}

/// A game hosted by [`run_game`]. Exit is requested through [`AppContext::request_exit`].
pub trait GameApp {
    type State;

    fn init_state(&mut self, ctx: &mut AppContext) -> Self::State;

    fn update_state(
        &mut self,
        state: &mut Self::State,
        input: &InputFrame,
        dt: Duration,
        ctx: &mut AppContext,
    );

    fn render(&mut self, state: &Self::State, renderer: &mut dyn Renderer2d);
}

pub fn run_game<G: GameApp + 'static>(config: AppConfig, mut game: G) -> Result<(), AppError> {
    let event_loop = EventLoop::new();
    let initial_size = match event_loop.primary_monitor().map(|m| m.size()) {
        Some(monitor) => PhysicalSize::new(
            config.desired_size.width.min(monitor.width),
            config.desired_size.height.min(monitor.height),
        ),
        None => config.desired_size,
    };
    let window = WindowBuilder::new()
        .with_title(config.title)
        .with_inner_size(initial_size)
        .with_resizable(config.resizable)
        .build(&event_loop)?;

    let window_size = window.inner_size();
    let surface_size = SurfaceSize::new(window_size.width.max(1), window_size.height.max(1));
    let pixels = {
        let surface_texture = SurfaceTexture::new(surface_size.width, surface_size.height, &window);
        PixelsBuilder::new(surface_size.width, surface_size.height, surface_texture)
            .enable_vsync(config.vsync)
            .build()?
    };
    let renderer = PixelsRenderer2d::new(pixels, surface_size)?;

    let mut ctx = AppContext {
        window,
        renderer,
        surface_size,
        exit_requested: false,
    };
    let mut state = game.init_state(&mut ctx);
    let mut input = InputFrame::default();
    let frame_interval = Duration::from_secs_f64(1.0 / f64::from(config.target_fps.max(1)));
    let mut last_frame = Instant::now();
    let mut next_redraw = Instant::now();

    tracing::info!(
        width = surface_size.width,
        height = surface_size.height,
        "window ready"
    );

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::WaitUntil(next_redraw);

        match &event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    ctx.surface_size = SurfaceSize::new(size.width, size.height);
                    if let Err(err) = ctx.renderer.resize(ctx.surface_size) {
                        tracing::warn!("resize failed: {err}");
                    }
                    ctx.window.request_redraw();
                }
                WindowEvent::Focused(false) => input.on_focus_lost(),
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            virtual_keycode: Some(key),
                            state: key_state,
                            ..
                        },
                    ..
                } => {
                    input.on_key(*key, *key_state);
                }
                _ => {}
            },
            Event::RedrawRequested(_) => {
                let now = Instant::now();
                let dt = now.saturating_duration_since(last_frame);
                last_frame = now;

                game.update_state(&mut state, &input, dt, &mut ctx);
                ctx.renderer.draw_frame(|gfx| game.render(&state, gfx));
                if let Err(err) = ctx.renderer.present() {
                    tracing::error!("present failed: {err}");
                    *control_flow = ControlFlow::Exit;
                }

                input.end_frame();
                if ctx.exit_requested {
                    *control_flow = ControlFlow::Exit;
                }
            }
            Event::MainEventsCleared => {
                let now = Instant::now();
                if now >= next_redraw {
                    ctx.window.request_redraw();
                    next_redraw = now + frame_interval;
                }
            }
            _ => {}
        }
    });
}
