use std::path::PathBuf;

use cgmath::Vector2;
use rand::rngs::SmallRng;
use thiserror::Error;

use gl_wrapper::geometry::GBError;
use gl_wrapper::program::PBError;
use gl_wrapper::renderer::GlRenderer;
use gl_wrapper::texture::TextureError;

use classroom::input::{Key, KeyState};
use classroom::tile_map::MapError;
use classroom::ScreenSize;
use classroom_common::config::Config;
use classroom_common::image::ImageError;

use crate::args::Exercise;

mod character;
mod colors;
mod iso;
mod parallax;
mod sprites;
mod triangles;
mod walk;

/// One exercise running inside the window.
pub trait Scene {
    fn key(&mut self, _key: Key, _state: KeyState) {}

    /// Left click, in the scene's logical coordinates.
    fn click(&mut self, _position: Vector2<f32>) {}

    fn update(&mut self, _dt: f32) {}

    fn draw(&mut self, renderer: &mut GlRenderer);

    fn clear_color(&self) -> [f32; 3] {
        [0.2, 0.3, 0.3]
    }

    fn exit(&mut self) {}
}

/// Everything a scene may need while it is being built.
pub struct SceneContext {
    pub config: Config,
    pub assets: PathBuf,
    pub screen: ScreenSize,
    pub rng: SmallRng,
}

impl SceneContext {
    pub fn asset(&self, path: &std::path::Path) -> PathBuf {
        self.assets.join(path)
    }
}

/// Builds the scene for `exercise`. Needs a current GL context.
pub fn create(exercise: &Exercise, ctx: SceneContext) -> Result<Box<dyn Scene>, SceneError> {
    let scene: Box<dyn Scene> = match exercise {
        Exercise::Triangles => Box::new(triangles::FixedTriangles::new()?),
        Exercise::Spawn { .. } => Box::new(triangles::Spawn::new(ctx)?),
        Exercise::Clicks { space } => Box::new(triangles::Clicks::new(ctx, (*space).into())?),
        Exercise::Colors { .. } => Box::new(colors::Colors::new(ctx)?),
        Exercise::Sprites => Box::new(sprites::Sprites::new(ctx)?),
        Exercise::Character { .. } => Box::new(character::CharacterScene::new(ctx)?),
        Exercise::Parallax { .. } => Box::new(parallax::Parallax::new(ctx)?),
        Exercise::Iso { .. } => Box::new(iso::Iso::new(ctx)?),
        Exercise::Walk { .. } => Box::new(walk::Walk::new(ctx)?),
    };

    Ok(scene)
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Shader program: {0}")]
    Program(#[from] PBError),
    #[error("Geometry: {0}")]
    Geometry(#[from] GBError),
    #[error("Texture: {0}")]
    Texture(#[from] TextureError),
    #[error("{path}: {source}")]
    Asset { path: PathBuf, source: ImageError },
    #[error("Map: {0}")]
    Map(#[from] MapError),
    #[error("{0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Blank;

    impl Scene for Blank {
        fn draw(&mut self, _renderer: &mut GlRenderer) {}
    }

    #[test]
    fn default_background() {
        assert_eq!(Blank.clear_color(), [0.2, 0.3, 0.3]);
    }
}
