use std::time::{Duration, Instant};

use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use thiserror::Error;
use tracing::{debug, error, warn};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyboardInput, MouseButton, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::graphics::{CpuRenderer, Renderer2d, SurfaceSize};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to create pixel surface: {0}")]
    Pixels(#[from] pixels::Error),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub desired_size: PhysicalSize<u32>,
    pub vsync: bool,
    pub target_fps: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: String::from("app"),
            desired_size: PhysicalSize::new(960, 720),
            vsync: true,
            target_fps: 60,
        }
    }
}

/// Input gathered since the previous frame.
#[derive(Debug, Clone, Default)]
pub struct InputFrame {
    /// Fresh key presses, in arrival order. OS key-repeat is filtered out.
    pub keys_pressed: Vec<VirtualKeyCode>,
    pub mouse_pos: Option<(u32, u32)>,
    /// Left button was released this frame (a "click").
    pub clicked: bool,
}

impl InputFrame {
    fn clear_edges(&mut self) {
        self.keys_pressed.clear();
        self.clicked = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppControl {
    Continue,
    Exit,
}

pub trait GameApp {
    fn update(&mut self, input: &InputFrame, dt: Duration) -> AppControl;

    fn render(&mut self, renderer: &mut dyn Renderer2d);

    fn on_exit(&mut self) {}
}

/// Opens a window and drives `game` until it asks to exit or the window is closed.
///
/// Frames are paced with `ControlFlow::WaitUntil` at `target_fps`; rendering happens on the CPU
/// into the `pixels` frame buffer.
pub fn run_game<G: GameApp + 'static>(config: AppConfig, mut game: G) -> Result<(), AppError> {
    let event_loop = EventLoop::new();
    let monitor = event_loop.primary_monitor().map(|m| m.size());
    let initial_size = match monitor {
        Some(m) => PhysicalSize::new(
            config.desired_size.width.min(m.width),
            config.desired_size.height.min(m.height),
        ),
        None => config.desired_size,
    };

    let window = WindowBuilder::new()
        .with_title(config.title.clone())
        .with_inner_size(initial_size)
        .build(&event_loop)?;

    let inner = window.inner_size();
    let mut size = SurfaceSize::new(inner.width.max(1), inner.height.max(1));
    let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
    let mut pixels: Pixels = PixelsBuilder::new(size.width, size.height, surface_texture)
        .enable_vsync(config.vsync)
        .build()?;

    let frame_interval = Duration::from_secs_f64(1.0 / config.target_fps.max(1) as f64);
    let mut next_redraw = Instant::now();
    let mut last_frame = Instant::now();
    let mut input = InputFrame::default();
    let mut held: Vec<VirtualKeyCode> = Vec::new();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::WaitUntil(next_redraw);

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    game.on_exit();
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(new_size) => {
                    if new_size.width == 0 || new_size.height == 0 {
                        return;
                    }
                    size = SurfaceSize::new(new_size.width, new_size.height);
                    if let Err(err) = pixels.resize_surface(size.width, size.height) {
                        warn!(%err, "resize_surface failed");
                    }
                    if let Err(err) = pixels.resize_buffer(size.width, size.height) {
                        warn!(%err, "resize_buffer failed");
                    }
                }
                WindowEvent::Focused(false) => {
                    held.clear();
                }
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            virtual_keycode: Some(key),
                            state,
                            ..
                        },
                    ..
                } => match state {
                    ElementState::Pressed => {
                        if !held.contains(&key) {
                            held.push(key);
                            input.keys_pressed.push(key);
                        }
                    }
                    ElementState::Released => held.retain(|k| *k != key),
                },
                WindowEvent::CursorMoved { position, .. } => {
                    input.mouse_pos = Some((position.x.max(0.0) as u32, position.y.max(0.0) as u32));
                }
                WindowEvent::MouseInput {
                    state: ElementState::Released,
                    button: MouseButton::Left,
                    ..
                } => {
                    input.clicked = true;
                }
                _ => {}
            },
            Event::MainEventsCleared => {
                let now = Instant::now();
                if now < next_redraw {
                    return;
                }
                next_redraw = now + frame_interval;

                let dt = now.saturating_duration_since(last_frame);
                last_frame = now;

                if game.update(&input, dt) == AppControl::Exit {
                    game.on_exit();
                    *control_flow = ControlFlow::Exit;
                    return;
                }
                input.clear_edges();
                window.request_redraw();
            }
            Event::RedrawRequested(_) => {
                if size.is_empty() {
                    return;
                }
                match CpuRenderer::new(pixels.frame_mut(), size) {
                    Some(mut renderer) => game.render(&mut renderer),
                    None => debug!(?size, "frame buffer not resized yet; skipping draw"),
                }
                if let Err(err) = pixels.render() {
                    error!(%err, "present failed");
                    *control_flow = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    });
}
