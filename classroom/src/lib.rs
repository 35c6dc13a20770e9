pub mod color;
pub mod color_game;
pub mod input;
pub mod iso;
pub mod math;
pub mod parallax;
pub mod sprite;
pub mod tile_map;
pub mod triangles;
pub mod walk;

pub use color::Color;

/// Logical window size every screen-space exercise is laid out in.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScreenSize {
    pub width: f32,
    pub height: f32,
}

impl ScreenSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}
