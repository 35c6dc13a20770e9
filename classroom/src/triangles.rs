use cgmath::{Matrix4, Vector2};
use rand::Rng;

use crate::math::{pixel_to_ndc, translate_scale};
use crate::{Color, ScreenSize};

pub const FIXED_COLOR: Color = Color::new(1.0, 0.5, 0.2);

/// The five triangles of the first exercise, in normalized device coordinates.
#[rustfmt::skip]
pub const FIXED_TRIANGLES: [[f32; 6]; 5] = [
    [-0.9, -0.9, -0.7, -0.9, -0.8, -0.7],
    [0.1, -0.5, 0.3, -0.5, 0.2, -0.3],
    [-0.4, 0.2, -0.2, 0.2, -0.3, 0.4],
    [0.6, 0.6, 0.8, 0.6, 0.7, 0.8],
    [-0.1, 0.0, 0.1, 0.0, 0.0, 0.2],
];

/// Unit triangle centered on the origin, scaled per instance.
#[rustfmt::skip]
pub const UNIT_TRIANGLE: [f32; 9] = [
    -0.5, -0.5, 0.0,
    0.5, -0.5, 0.0,
    0.0, 0.5, 0.0,
];

pub const DEFAULT_TRIANGLE_SIZE: f32 = 20.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpawnedTriangle {
    pub position: Vector2<f32>,
    pub color: Color,
}

/// Triangles stamped at click positions.
pub struct TriangleSpawner {
    pub size: f32,
    triangles: Vec<SpawnedTriangle>,
}

impl TriangleSpawner {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            triangles: Vec::new(),
        }
    }

    pub fn spawn<R: Rng + ?Sized>(&mut self, position: Vector2<f32>, rng: &mut R) -> SpawnedTriangle {
        let triangle = SpawnedTriangle {
            position,
            color: Color::random(rng),
        };
        self.triangles.push(triangle);

        log::info!(
            "triangle added at ({}, {}) with color ({:.3}, {:.3}, {:.3})",
            position.x,
            position.y,
            triangle.color.r,
            triangle.color.g,
            triangle.color.b
        );

        triangle
    }

    pub fn clear(&mut self) {
        self.triangles.clear();
    }

    pub fn triangles(&self) -> &[SpawnedTriangle] {
        &self.triangles
    }

    pub fn model(&self, triangle: &SpawnedTriangle) -> Matrix4<f32> {
        translate_scale(triangle.position, Vector2::new(self.size, self.size))
    }
}

impl Default for TriangleSpawner {
    fn default() -> Self {
        Self::new(DEFAULT_TRIANGLE_SIZE)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VertexSpace {
    Screen,
    Ndc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClickedTriangle {
    pub vertices: [Vector2<f32>; 3],
    pub color: Color,
}

impl ClickedTriangle {
    pub fn flat(&self) -> [f32; 9] {
        let [a, b, c] = self.vertices;
        [a.x, a.y, 0.0, b.x, b.y, 0.0, c.x, c.y, 0.0]
    }
}

/// Collects clicked vertices, closing a triangle on every third one.
pub struct VertexCollector {
    space: VertexSpace,
    screen: ScreenSize,
    pending: Vec<Vector2<f32>>,
    triangles: Vec<ClickedTriangle>,
}

impl VertexCollector {
    pub fn new(space: VertexSpace, screen: ScreenSize) -> Self {
        Self {
            space,
            screen,
            pending: Vec::with_capacity(3),
            triangles: Vec::new(),
        }
    }

    pub fn space(&self) -> VertexSpace {
        self.space
    }

    /// Records a click given in window pixels. Returns the finished triangle, if any.
    pub fn click<R: Rng + ?Sized>(
        &mut self,
        pixel: Vector2<f32>,
        rng: &mut R,
    ) -> Option<&ClickedTriangle> {
        let vertex = match self.space {
            VertexSpace::Screen => pixel,
            VertexSpace::Ndc => pixel_to_ndc(pixel, self.screen),
        };
        self.pending.push(vertex);

        log::info!("vertex added: ({}, {})", vertex.x, vertex.y);

        if self.pending.len() < 3 {
            return None;
        }

        let triangle = ClickedTriangle {
            vertices: [self.pending[0], self.pending[1], self.pending[2]],
            color: Color::random(rng),
        };
        self.pending.clear();

        log::info!(
            "triangle created with color ({:.3}, {:.3}, {:.3})",
            triangle.color.r,
            triangle.color.g,
            triangle.color.b
        );

        self.triangles.push(triangle);
        self.triangles.last()
    }

    pub fn pending(&self) -> &[Vector2<f32>] {
        &self.pending
    }

    pub fn triangles(&self) -> &[ClickedTriangle] {
        &self.triangles
    }
}
