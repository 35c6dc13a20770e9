use std::path::Path;

use cgmath::{Matrix4, Vector4};

use gl_wrapper::geometry::{Geometry, GeometryBuilder, VertexAttribute};
use gl_wrapper::program::{Program, ProgramBuilder};
use gl_wrapper::renderer::{GlRenderer, Primitive};
use gl_wrapper::texture::{Texture2D, TextureFilter, TextureFormats};
use gl_wrapper::{UNIT_QUAD, UNIT_QUAD_INDICES};

use classroom::math::{screen_projection, to_array};
use classroom::{Color, ScreenSize};
use classroom_common::image::{Image, PixelFormat};

use crate::scenes::SceneError;

/// Programs and the unit quad shared by the screen space exercises.
pub struct Painter {
    pub flat: Program,
    pub sprite: Program,
    pub quad: Geometry,
}

impl Painter {
    pub fn new(screen: ScreenSize) -> Result<Self, SceneError> {
        let flat = ProgramBuilder::new(
            include_str!("gl_shaders/screen.glsl"),
            include_str!("gl_shaders/color.glsl"),
        )
        .build()?;
        let sprite = ProgramBuilder::new(
            include_str!("gl_shaders/sprite_vert.glsl"),
            include_str!("gl_shaders/sprite_frag.glsl"),
        )
        .build()?;

        let quad = GeometryBuilder::new(&UNIT_QUAD)
            .with_attribute(VertexAttribute::Vec2)
            .with_attribute(VertexAttribute::Vec2)
            .with_indices(&UNIT_QUAD_INDICES)
            .build()?;

        let painter = Self { flat, sprite, quad };
        painter.set_projection(screen);
        painter.sprite.set_int("sprite_texture", 0);

        Ok(painter)
    }

    pub fn set_projection(&self, screen: ScreenSize) {
        let projection = to_array(&screen_projection(screen));

        self.flat.set_mat4("projection", &projection);
        self.sprite.set_mat4("projection", &projection);
    }

    /// Draws `geometry` with the flat color program.
    pub fn fill(
        &self,
        renderer: &mut GlRenderer,
        geometry: &Geometry,
        model: &Matrix4<f32>,
        color: Color,
        primitive: Primitive,
    ) {
        self.flat.set_mat4("model", &to_array(model));
        self.flat.set_vec4("input_color", color.rgba(1.0));
        renderer.draw(geometry, &self.flat, primitive);
    }

    pub fn fill_quad(&self, renderer: &mut GlRenderer, model: &Matrix4<f32>, color: Color) {
        self.flat.set_mat4("model", &to_array(model));
        self.flat.set_vec4("input_color", color.rgba(1.0));
        renderer.draw_indexed(&self.quad, &self.flat, Primitive::Triangles);
    }

    pub fn sprite(
        &self,
        renderer: &mut GlRenderer,
        texture: &Texture2D,
        model: &Matrix4<f32>,
        uvs: Vector4<f32>,
    ) {
        texture.bind(0);
        self.sprite.set_mat4("model", &to_array(model));
        self.sprite.set_vec4("sprite_uvs", uvs.into());
        renderer.draw_indexed(&self.quad, &self.sprite, Primitive::Triangles);
    }
}

/// Loads a PNG into a texture.
pub fn load_texture<P: AsRef<Path>>(path: P, filter: TextureFilter) -> Result<Texture2D, SceneError> {
    let path = path.as_ref();
    let image = Image::load_from_path(path).map_err(|e| SceneError::Asset {
        path: path.to_path_buf(),
        source: e,
    })?;

    let format = match image.format {
        PixelFormat::Rgb8 => TextureFormats::Rgb8,
        PixelFormat::Rgba8 => TextureFormats::Rgba8,
    };

    let texture = Texture2D::new(
        image.width,
        image.height,
        &image.data,
        format,
        filter,
    )?;

    Ok(texture)
}
