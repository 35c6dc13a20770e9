/// Unit quad over [0, 1]², `vec2 position, vec2 uv` per corner.
/// v grows downwards together with y.
#[rustfmt::skip]
pub const UNIT_QUAD: [f32; 16] = [
    0.0, 0.0, 0.0, 0.0,
    1.0, 0.0, 1.0, 0.0,
    0.0, 1.0, 0.0, 1.0,
    1.0, 1.0, 1.0, 1.0,
];

pub const UNIT_QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 1, 3];

pub mod geometry;
pub mod program;
pub mod renderer;
pub mod texture;
