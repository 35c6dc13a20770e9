use cgmath::{Deg, Matrix4, Vector2, Vector3};

use crate::ScreenSize;

/// Orthographic projection with the origin in the top left corner and y growing downwards.
pub fn screen_projection(size: ScreenSize) -> Matrix4<f32> {
    cgmath::ortho(0.0, size.width, size.height, 0.0, -1.0, 1.0)
}

/// Model matrix for a unit quad placed with its top left corner at `position`,
/// stretched to `size` and rotated by `rotation` degrees around its center.
pub fn quad_model(position: Vector2<f32>, size: Vector2<f32>, rotation: f32) -> Matrix4<f32> {
    let half = Vector3::new(size.x * 0.5, size.y * 0.5, 0.0);

    Matrix4::from_translation(position.extend(0.0))
        * Matrix4::from_translation(half)
        * Matrix4::from_angle_z(Deg(rotation))
        * Matrix4::from_translation(-half)
        * Matrix4::from_nonuniform_scale(size.x, size.y, 1.0)
}

/// Model matrix that only translates and scales.
pub fn translate_scale(position: Vector2<f32>, scale: Vector2<f32>) -> Matrix4<f32> {
    Matrix4::from_translation(position.extend(0.0))
        * Matrix4::from_nonuniform_scale(scale.x, scale.y, 1.0)
}

/// Converts a window pixel into normalized device coordinates.
pub fn pixel_to_ndc(pixel: Vector2<f32>, size: ScreenSize) -> Vector2<f32> {
    Vector2::new(
        pixel.x / size.width * 2.0 - 1.0,
        (size.height - pixel.y) / size.height * 2.0 - 1.0,
    )
}

pub fn to_array(m: &Matrix4<f32>) -> [f32; 16] {
    *AsRef::<[f32; 16]>::as_ref(m)
}

/// Axis aligned rectangle in screen space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    pub position: Vector2<f32>,
    pub size: Vector2<f32>,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vector2::new(x, y),
            size: Vector2::new(width, height),
        }
    }

    pub fn model(&self) -> Matrix4<f32> {
        translate_scale(self.position, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Point3, Transform};

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn projection_maps_corners() {
        let proj = screen_projection(ScreenSize::new(800.0, 600.0));

        let top_left = proj.transform_point(Point3::new(0.0, 0.0, 0.0));
        let bottom_right = proj.transform_point(Point3::new(800.0, 600.0, 0.0));

        assert!(close(top_left.x, -1.0) && close(top_left.y, 1.0));
        assert!(close(bottom_right.x, 1.0) && close(bottom_right.y, -1.0));
    }

    #[test]
    fn unrotated_quad_covers_rect() {
        let m = quad_model(Vector2::new(10.0, 20.0), Vector2::new(30.0, 40.0), 0.0);

        let far = m.transform_point(Point3::new(1.0, 1.0, 0.0));
        assert!(close(far.x, 40.0) && close(far.y, 60.0));
    }

    #[test]
    fn rotation_keeps_center() {
        let m = quad_model(Vector2::new(100.0, 100.0), Vector2::new(100.0, 50.0), 45.0);

        let center = m.transform_point(Point3::new(0.5, 0.5, 0.0));
        assert!(close(center.x, 150.0) && close(center.y, 125.0));
    }

    #[test]
    fn ndc_conversion() {
        let size = ScreenSize::new(800.0, 600.0);

        let ndc = pixel_to_ndc(Vector2::new(0.0, 0.0), size);
        assert!(close(ndc.x, -1.0) && close(ndc.y, 1.0));

        let ndc = pixel_to_ndc(Vector2::new(400.0, 300.0), size);
        assert!(close(ndc.x, 0.0) && close(ndc.y, 0.0));
    }
}
