use gl::types::GLenum;
use std::ffi::c_void;
use thiserror::Error;

pub struct Texture2D {
    id: u32,
}

impl Texture2D {
    /// Uploads 8 bit texels, top row first. Edges are clamped.
    pub fn new(
        width: u32,
        height: u32,
        data: &[u8],
        format: TextureFormats,
        filter: TextureFilter,
    ) -> Result<Self, TextureError> {
        check_source(width, height, data.len(), format)?;

        let mut id = 0;

        unsafe {
            gl::GenTextures(1, (&mut id) as *mut u32);
            gl::BindTexture(gl::TEXTURE_2D, id);

            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, filter.gl_enum() as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, filter.gl_enum() as i32);

            // rows of RGB8 images are not 4 byte aligned
            gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);

            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                format.internal_format() as i32,
                width as i32,
                height as i32,
                0,
                format.pixel_format(),
                gl::UNSIGNED_BYTE,
                data.as_ptr() as *const c_void,
            );
        }

        Ok(Self { id })
    }

    pub fn bind(&self, unit: u8) {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + unit as u32);
            gl::BindTexture(gl::TEXTURE_2D, self.id)
        }
    }
}

impl Drop for Texture2D {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteTextures(1, (&self.id) as *const u32);
        }
    }
}

fn check_source(
    width: u32,
    height: u32,
    len: usize,
    format: TextureFormats,
) -> Result<(), TextureError> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|texels| texels.checked_mul(format.channels() as usize));

    if expected != Some(len) {
        return Err(TextureError::InvalidSrcLength);
    }

    Ok(())
}

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("Invalid source data length")]
    InvalidSrcLength,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextureFormats {
    Rgb8 = gl::RGB8 as isize,
    Rgba8 = gl::RGBA8 as isize,
}

impl TextureFormats {
    pub fn channels(&self) -> u8 {
        match self {
            TextureFormats::Rgb8 => 3,
            TextureFormats::Rgba8 => 4,
        }
    }

    fn internal_format(&self) -> GLenum {
        *self as GLenum
    }

    fn pixel_format(&self) -> GLenum {
        match self {
            TextureFormats::Rgb8 => gl::RGB,
            TextureFormats::Rgba8 => gl::RGBA,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextureFilter {
    /// Pixel art tilesets.
    Nearest,
    Linear,
}

impl TextureFilter {
    fn gl_enum(&self) -> GLenum {
        match self {
            TextureFilter::Nearest => gl::NEAREST,
            TextureFilter::Linear => gl::LINEAR,
        }
    }
}
