use std::ffi::c_void;
use thiserror::Error;

pub struct GeometryBuilder<'a> {
    attributes: Vec<VertexAttribute>,
    data: &'a [f32],
    indices: Option<&'a [u32]>,
}

impl<'a> GeometryBuilder<'a> {
    pub fn new(data: &'a [f32]) -> Self {
        Self {
            data,
            attributes: Vec::new(),
            indices: None,
        }
    }

    pub fn with_attribute(mut self, attr: VertexAttribute) -> Self {
        self.attributes.push(attr);
        self
    }

    pub fn with_indices(mut self, indices: &'a [u32]) -> Self {
        self.indices = Some(indices);
        self
    }

    pub fn build(self) -> Result<Geometry, GBError> {
        let vertices = vertex_count(&self.attributes, self.data.len())?;
        if let Some(indices) = self.indices {
            check_indices(indices, vertices)?;
        }

        let total_len: usize = self.attributes.iter().map(|a| a.size()).sum();

        let mut vao = 0;
        let mut vbo = 0;
        let mut ebo = 0;

        unsafe {
            gl::GenVertexArrays(1, (&mut vao) as *mut u32);
            gl::GenBuffers(1, (&mut vbo) as *mut u32);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);

            gl::BufferData(
                gl::ARRAY_BUFFER,
                std::mem::size_of_val(self.data) as isize,
                self.data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );

            let mut offset = 0;

            for (i, attr) in self.attributes.iter().enumerate() {
                gl::VertexAttribPointer(
                    i as u32,
                    attr.size() as i32,
                    gl::FLOAT,
                    gl::FALSE,
                    (total_len * std::mem::size_of::<f32>()) as i32,
                    (offset * std::mem::size_of::<f32>()) as *const c_void,
                );
                offset += attr.size();
                gl::EnableVertexAttribArray(i as u32);
            }

            if let Some(indices) = self.indices {
                gl::GenBuffers(1, (&mut ebo) as *mut u32);
                gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ebo);
                gl::BufferData(
                    gl::ELEMENT_ARRAY_BUFFER,
                    std::mem::size_of_val(indices) as isize,
                    indices.as_ptr() as *const c_void,
                    gl::STATIC_DRAW,
                );
            }

            gl::BindVertexArray(0);
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        }

        Ok(Geometry {
            vao,
            vbo,
            ebo,
            vertices,
            indices: self.indices.map(|i| i.len()).unwrap_or(0),
        })
    }
}

fn vertex_count(attributes: &[VertexAttribute], data_len: usize) -> Result<usize, GBError> {
    let total_len: usize = attributes.iter().map(|a| a.size()).sum();

    if total_len == 0 || data_len % total_len != 0 {
        return Err(GBError::InvalidDataLength);
    }

    Ok(data_len / total_len)
}

fn check_indices(indices: &[u32], vertices: usize) -> Result<(), GBError> {
    match indices.iter().find(|&&i| i as usize >= vertices) {
        Some(&index) => Err(GBError::IndexOutOfRange { index, vertices }),
        None => Ok(()),
    }
}

#[derive(Debug, Error)]
pub enum GBError {
    #[error("Invalid data length for given attributes")]
    InvalidDataLength,
    #[error("Index {index} out of range for {vertices} vertices")]
    IndexOutOfRange { index: u32, vertices: usize },
}

pub enum VertexAttribute {
    Float,
    Vec2,
    Vec3,
    Vec4,
}

impl VertexAttribute {
    pub fn size(&self) -> usize {
        match self {
            VertexAttribute::Float => 1,
            VertexAttribute::Vec2 => 2,
            VertexAttribute::Vec3 => 3,
            VertexAttribute::Vec4 => 4,
        }
    }
}

pub struct Geometry {
    vao: u32,
    vbo: u32,
    ebo: u32,
    vertices: usize,
    indices: usize,
}

impl Geometry {
    pub fn vao(&self) -> u32 {
        self.vao
    }
    pub fn vertices(&self) -> usize {
        self.vertices
    }
    /// Element count, 0 for geometry without an index buffer.
    pub fn indices(&self) -> usize {
        self.indices
    }
}

impl Drop for Geometry {
    fn drop(&mut self) {
        unsafe {
            if self.ebo != 0 {
                gl::DeleteBuffers(1, (&self.ebo) as *const u32);
            }
            gl::DeleteBuffers(1, (&self.vbo) as *const u32);
            gl::DeleteVertexArrays(1, (&self.vao) as *const u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_must_divide_data() {
        let attrs = [VertexAttribute::Vec3, VertexAttribute::Vec2];

        assert_eq!(vertex_count(&attrs, 20).unwrap(), 4);
        assert!(matches!(
            vertex_count(&attrs, 21),
            Err(GBError::InvalidDataLength)
        ));
        assert!(matches!(
            vertex_count(&[], 3),
            Err(GBError::InvalidDataLength)
        ));
    }

    #[test]
    fn indices_stay_inside_vertices() {
        assert!(check_indices(&[0, 1, 2, 2, 1, 3], 4).is_ok());
        assert!(matches!(
            check_indices(&[0, 1, 4], 4),
            Err(GBError::IndexOutOfRange { index: 4, vertices: 4 })
        ));
    }
}
