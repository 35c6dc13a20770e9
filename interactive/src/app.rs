use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContextSurfaceAccessor,
    PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};

use glutin_winit::DisplayBuilder;

use raw_window_handle::HasRawWindowHandle;

use std::ffi::CString;
use std::num::NonZeroU32;
use std::time::Instant;

use cgmath::Vector2;

use thiserror::Error;

use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize, Size};
use winit::event::{ElementState, Event, MouseButton, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use gl_wrapper::renderer::GlRenderer;

use classroom::input::{Key, KeyState};
use classroom::ScreenSize;
use classroom_common::config::ConfigError;

use crate::scenes::{Scene, SceneError};

/// Upper bound of the frame step handed to a scene, in seconds.
const MAX_FRAME_TIME: f32 = 0.1;

pub struct App {
    event_loop: EventLoop<()>,
    gl_context: PossiblyCurrentContext,
    gl_window: GlWindow,
    screen: ScreenSize,
}

impl App {
    pub fn new(title: &str, screen: ScreenSize, vsync: bool) -> Result<Self, AppError> {
        let event_loop = EventLoop::new();
        let window_builder = WindowBuilder::new()
            .with_inner_size(Size::Logical(LogicalSize::new(
                screen.width as f64,
                screen.height as f64,
            )))
            .with_min_inner_size(Size::Physical(PhysicalSize::new(32, 32)))
            .with_title(title);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));
        let template = ConfigTemplateBuilder::new().with_alpha_size(8);

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |configs| {
                configs
                    .reduce(|best, c| {
                        if c.num_samples() > best.num_samples() {
                            c
                        } else {
                            best
                        }
                    })
                    .expect("display offered no GL configs")
            })
            .map_err(|e| AppError::Display(e.to_string()))?;

        let window = window.ok_or_else(|| AppError::Display("no window created".to_string()))?;

        let handle = Some(window.raw_window_handle());
        let gl_display = gl_config.display();

        let context_attr = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(4, 1))))
            .build(handle);

        let gl_window = GlWindow::new(window, &gl_config)?;

        let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attr)? }
            .make_current(&gl_window.surface)?;

        if vsync {
            let interval = SwapInterval::Wait(NonZeroU32::MIN);
            if let Err(e) = gl_window.surface.set_swap_interval(&gl_context, interval) {
                log::warn!("could not enable vsync: {e}");
            }
        }

        gl::load_with(|s| match CString::new(s) {
            Ok(s) => gl_display.get_proc_address(s.as_c_str()).cast(),
            Err(_) => std::ptr::null(),
        });

        log::info!("window {}x{} ready", screen.width, screen.height);

        Ok(Self {
            event_loop,
            gl_context,
            gl_window,
            screen,
        })
    }

    pub fn run(self, mut scene: Box<dyn Scene>) -> ! {
        let Self {
            event_loop,
            gl_context,
            gl_window,
            screen,
        } = self;

        let mut gl_renderer = GlRenderer::new();
        gl_renderer.enable_blending();

        let mut window_size = gl_window.window.inner_size();
        gl_renderer.resize(window_size.width, window_size.height);

        let mut cursor = PhysicalPosition::new(0.0, 0.0);
        let mut last_frame = Instant::now();

        event_loop.run(move |event, _window_target, control_flow| {
            *control_flow = ControlFlow::Poll;
            match event {
                Event::MainEventsCleared => {
                    let now = Instant::now();
                    let dt = (now - last_frame).as_secs_f32().min(MAX_FRAME_TIME);
                    last_frame = now;

                    scene.update(dt);
                    gl_window.window.request_redraw();
                }
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::Resized(size) => {
                        if let (Some(width), Some(height)) =
                            (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                        {
                            gl_window.surface.resize(&gl_context, width, height);
                            gl_renderer.resize(size.width, size.height);
                            window_size = size;
                        }
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        cursor = position;
                    }
                    WindowEvent::MouseInput {
                        state: ElementState::Pressed,
                        button: MouseButton::Left,
                        ..
                    } => {
                        scene.click(to_logical(cursor, window_size, screen));
                    }
                    WindowEvent::KeyboardInput { input, .. } => {
                        let state = match input.state {
                            ElementState::Pressed => KeyState::Pressed,
                            ElementState::Released => KeyState::Released,
                        };

                        match input.virtual_keycode.and_then(map_key) {
                            Some(Key::Escape) if state == KeyState::Pressed => {
                                scene.exit();
                                control_flow.set_exit();
                            }
                            Some(Key::Escape) => {}
                            Some(key) => scene.key(key, state),
                            None => {}
                        }
                    }
                    WindowEvent::CloseRequested => {
                        scene.exit();
                        control_flow.set_exit();
                    }
                    _ => (),
                },
                Event::RedrawRequested(_) => {
                    let [r, g, b] = scene.clear_color();
                    gl_renderer.clear_color(r, g, b);

                    scene.draw(&mut gl_renderer);

                    if let Err(e) = gl_window.surface.swap_buffers(&gl_context) {
                        log::error!("could not swap buffers: {e}");
                        control_flow.set_exit();
                    }
                }
                _ => (),
            }
        })
    }
}

/// Maps a cursor position in physical window pixels into the scene's logical space.
fn to_logical(
    cursor: PhysicalPosition<f64>,
    window: PhysicalSize<u32>,
    screen: ScreenSize,
) -> Vector2<f32> {
    let width = window.width.max(1) as f32;
    let height = window.height.max(1) as f32;

    Vector2::new(
        cursor.x as f32 * screen.width / width,
        cursor.y as f32 * screen.height / height,
    )
}

fn map_key(code: VirtualKeyCode) -> Option<Key> {
    Some(match code {
        VirtualKeyCode::W => Key::W,
        VirtualKeyCode::A => Key::A,
        VirtualKeyCode::S => Key::S,
        VirtualKeyCode::D => Key::D,
        VirtualKeyCode::Q => Key::Q,
        VirtualKeyCode::E => Key::E,
        VirtualKeyCode::Z => Key::Z,
        VirtualKeyCode::C => Key::C,
        VirtualKeyCode::R => Key::R,
        VirtualKeyCode::Escape => Key::Escape,
        _ => return None,
    })
}

pub struct GlWindow {
    // XXX the surface must be dropped before the window.
    pub surface: Surface<WindowSurface>,
    pub window: Window,
}

impl GlWindow {
    pub fn new(window: Window, config: &Config) -> Result<Self, AppError> {
        let (width, height): (u32, u32) = window.inner_size().into();
        let raw_window_handle = window.raw_window_handle();
        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            NonZeroU32::new(width).unwrap_or(NonZeroU32::MIN),
            NonZeroU32::new(height).unwrap_or(NonZeroU32::MIN),
        );

        let surface = unsafe { config.display().create_window_surface(config, &attrs)? };

        Ok(Self { window, surface })
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("Could not create window: {0}")]
    Display(String),
    #[error("OpenGL context: {0}")]
    Context(#[from] glutin::error::Error),
    #[error("{0}")]
    Scene(#[from] SceneError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_scales_to_logical_space() {
        let screen = ScreenSize::new(800.0, 600.0);
        let window = PhysicalSize::new(1600, 1200);

        let p = to_logical(PhysicalPosition::new(400.0, 300.0), window, screen);

        assert_eq!(p, Vector2::new(200.0, 150.0));
    }

    #[test]
    fn only_exercise_keys_are_mapped() {
        assert_eq!(map_key(VirtualKeyCode::Q), Some(Key::Q));
        assert_eq!(map_key(VirtualKeyCode::Escape), Some(Key::Escape));
        assert_eq!(map_key(VirtualKeyCode::F1), None);
    }
}
