use gl::types::{GLenum, GLint, GLuint};
use std::ffi::{c_char, CString};
use thiserror::Error;

const LOG_SIZE: usize = 1024;

pub struct ProgramBuilder<'a> {
    vert: &'a str,
    frag: &'a str,
}

impl<'a> ProgramBuilder<'a> {
    pub fn new(vert_src: &'a str, frag_src: &'a str) -> Self {
        Self {
            vert: vert_src,
            frag: frag_src,
        }
    }

    pub fn build(self) -> Result<Program, PBError> {
        let vert = CString::new(self.vert).map_err(|_| PBError::InvalidSource)?;
        let frag = CString::new(self.frag).map_err(|_| PBError::InvalidSource)?;

        let vert = compile(gl::VERTEX_SHADER, &vert)?;
        let frag = match compile(gl::FRAGMENT_SHADER, &frag) {
            Ok(frag) => frag,
            Err(e) => {
                unsafe { gl::DeleteShader(vert) }
                return Err(e);
            }
        };

        let mut success: i32 = 0;

        unsafe {
            let program = gl::CreateProgram();
            gl::AttachShader(program, vert);
            gl::AttachShader(program, frag);
            gl::LinkProgram(program);

            gl::DeleteShader(vert);
            gl::DeleteShader(frag);

            gl::GetProgramiv(program, gl::LINK_STATUS, (&mut success) as *mut i32);
            if success != 1 {
                let mut buf = [0_u8; LOG_SIZE];

                gl::GetProgramInfoLog(
                    program,
                    LOG_SIZE as i32,
                    std::ptr::null_mut(),
                    buf.as_mut_ptr() as *mut c_char,
                );
                gl::DeleteProgram(program);

                return Err(PBError::Linking(info_log(&buf)));
            }

            Ok(Program { id: program })
        }
    }
}

fn compile(kind: GLenum, src: &CString) -> Result<GLuint, PBError> {
    let mut success: i32 = 0;

    unsafe {
        let shader = gl::CreateShader(kind);

        gl::ShaderSource(
            shader,
            1,
            (&src.as_ptr()) as *const *const c_char,
            std::ptr::null(),
        );

        gl::CompileShader(shader);
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, (&mut success) as *mut i32);
        if success != 1 {
            let mut buf = [0_u8; LOG_SIZE];

            gl::GetShaderInfoLog(
                shader,
                LOG_SIZE as i32,
                std::ptr::null_mut(),
                buf.as_mut_ptr() as *mut c_char,
            );
            gl::DeleteShader(shader);

            return Err(PBError::Compilation(info_log(&buf)));
        }

        Ok(shader)
    }
}

/// Text of a NUL terminated info log buffer.
fn info_log(buf: &[u8]) -> String {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());

    String::from_utf8_lossy(&buf[..end]).trim_end().to_string()
}

#[derive(Debug, Error)]
pub enum PBError {
    #[error("Shader source contains a NUL byte")]
    InvalidSource,
    #[error("{0}")]
    Compilation(String),
    #[error("{0}")]
    Linking(String),
}

pub struct Program {
    id: GLuint,
}

impl Program {
    pub fn get_id(&self) -> GLuint {
        self.id
    }

    /// Location of a uniform, -1 if the program has no such active uniform.
    pub fn uniform_location(&self, name: &str) -> GLint {
        match CString::new(name) {
            Ok(name) => unsafe { gl::GetUniformLocation(self.id, name.as_ptr()) },
            Err(_) => -1,
        }
    }

    pub fn set_mat4(&self, name: &str, value: &[f32; 16]) {
        unsafe {
            gl::ProgramUniformMatrix4fv(
                self.id,
                self.uniform_location(name),
                1,
                gl::FALSE,
                value.as_ptr(),
            );
        }
    }

    pub fn set_vec4(&self, name: &str, value: [f32; 4]) {
        unsafe {
            gl::ProgramUniform4f(
                self.id,
                self.uniform_location(name),
                value[0],
                value[1],
                value[2],
                value[3],
            );
        }
    }

    pub fn set_int(&self, name: &str, value: i32) {
        unsafe { gl::ProgramUniform1i(self.id, self.uniform_location(name), value) }
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_log_stops_at_nul() {
        let mut buf = [0_u8; 32];
        buf[..12].copy_from_slice(b"0:1: error\n\n");

        assert_eq!(info_log(&buf), "0:1: error");
        assert_eq!(info_log(b"no terminator"), "no terminator");
    }

    #[test]
    fn nul_in_source_is_rejected() {
        let result = ProgramBuilder::new("void main() {}\0", "void main() {}").build();

        assert!(matches!(result, Err(PBError::InvalidSource)));
    }
}
