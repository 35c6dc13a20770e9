use crate::geometry::Geometry;
use crate::program::Program;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Primitive {
    Triangles,
    Points,
}

impl Primitive {
    fn gl_enum(&self) -> gl::types::GLenum {
        match self {
            Primitive::Triangles => gl::TRIANGLES,
            Primitive::Points => gl::POINTS,
        }
    }
}

pub struct GlRenderer {
    current_program: u32,
}

impl GlRenderer {
    pub fn new() -> Self {
        Self { current_program: 0 }
    }

    fn use_program(&mut self, program: &Program) {
        let p_id = program.get_id();
        if self.current_program != p_id {
            unsafe { gl::UseProgram(p_id) }
            self.current_program = p_id;
        }
    }

    pub fn draw(&mut self, geometry: &Geometry, program: &Program, primitive: Primitive) {
        self.use_program(program);

        unsafe {
            gl::BindVertexArray(geometry.vao());
            gl::DrawArrays(primitive.gl_enum(), 0, geometry.vertices() as i32);
        }
    }

    pub fn draw_indexed(&mut self, geometry: &Geometry, program: &Program, primitive: Primitive) {
        self.use_program(program);

        unsafe {
            gl::BindVertexArray(geometry.vao());
            gl::DrawElements(
                primitive.gl_enum(),
                geometry.indices() as i32,
                gl::UNSIGNED_INT,
                std::ptr::null(),
            );
        }
    }

    pub fn resize(&self, width: u32, height: u32) {
        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
        }
    }

    pub fn clear_color(&self, r: f32, g: f32, b: f32) {
        unsafe {
            gl::ClearColor(r, g, b, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }

    /// Standard `SRC_ALPHA, ONE_MINUS_SRC_ALPHA` blending.
    pub fn enable_blending(&self) {
        unsafe {
            gl::Enable(gl::BLEND);
            gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
        }
    }

    pub fn set_point_size(&self, size: f32) {
        unsafe { gl::PointSize(size) }
    }
}

impl Default for GlRenderer {
    fn default() -> Self {
        Self::new()
    }
}
