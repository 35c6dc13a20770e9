use cgmath::{Matrix4, Vector2, Vector4};
use serde::Deserialize;

use crate::input::HeldKeys;
use crate::math::quad_model;
use crate::ScreenSize;

/// Row of the sprite sheet holding each animation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AnimationType {
    IdleFront = 0,
    IdleLeft = 1,
    IdleRight = 2,
    IdleBack = 3,
}

impl AnimationType {
    pub fn row(self) -> u32 {
        self as u32
    }
}

impl Default for AnimationType {
    fn default() -> Self {
        Self::IdleFront
    }
}

/// Grid layout of frames inside a texture.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SpriteSheet {
    pub rows: u32,
    pub cols: u32,
}

impl SpriteSheet {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows: rows.max(1),
            cols: cols.max(1),
        }
    }

    /// UV rectangle `(u_min, v_min, u_max, v_max)` of a frame.
    pub fn frame_uvs(&self, row: u32, col: u32) -> Vector4<f32> {
        let w = 1.0 / self.cols as f32;
        let h = 1.0 / self.rows as f32;

        let u_min = col as f32 * w;
        let v_min = row as f32 * h;

        Vector4::new(u_min, v_min, u_min + w, v_min + h)
    }

    /// UV rectangle of tile `id`, counting left to right, top to bottom.
    pub fn tile_uvs(&self, id: u32) -> Vector4<f32> {
        self.frame_uvs(id / self.cols, id % self.cols)
    }
}

pub const FULL_UVS: Vector4<f32> = Vector4::new(0.0, 0.0, 1.0, 1.0);

/// Steps through the columns of one sprite sheet row at a fixed rate.
#[derive(Debug, Clone)]
pub struct Animator {
    sheet: SpriteSheet,
    fps: f32,
    frame: u32,
    elapsed: f32,
    animation: AnimationType,
}

impl Animator {
    pub fn new(sheet: SpriteSheet, fps: f32) -> Self {
        Self {
            sheet,
            fps,
            frame: 0,
            elapsed: 0.0,
            animation: AnimationType::default(),
        }
    }

    pub fn update(&mut self, dt: f32) {
        if self.fps <= 0.0 {
            return;
        }

        self.elapsed += dt;
        if self.elapsed >= 1.0 / self.fps {
            self.frame = (self.frame + 1) % self.sheet.cols;
            self.elapsed = 0.0;
        }
    }

    pub fn set_animation(&mut self, animation: AnimationType) {
        if self.animation != animation {
            self.animation = animation;
            self.frame = 0;
            self.elapsed = 0.0;
        }
    }

    pub fn animation(&self) -> AnimationType {
        self.animation
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn uvs(&self) -> Vector4<f32> {
        self.sheet
            .frame_uvs(self.animation.row().min(self.sheet.rows - 1), self.frame)
    }
}

/// Textured quad with a fixed placement.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
pub struct Placement {
    pub position: [f32; 2],
    pub size: [f32; 2],
    #[serde(default)]
    pub rotation: f32,
}

impl Placement {
    pub fn model(&self) -> Matrix4<f32> {
        quad_model(self.position.into(), self.size.into(), self.rotation)
    }
}

/// Animated sprite moved freely with the WASD keys.
pub struct Character {
    pub position: Vector2<f32>,
    pub size: Vector2<f32>,
    pub speed: f32,
    pub animator: Animator,
    bounds: ScreenSize,
}

impl Character {
    pub fn new(size: Vector2<f32>, speed: f32, animator: Animator, bounds: ScreenSize) -> Self {
        Self {
            position: Vector2::new(
                bounds.width / 2.0 - size.x / 2.0,
                bounds.height / 2.0 - size.y / 2.0,
            ),
            size,
            speed,
            animator,
            bounds,
        }
    }

    pub fn process_input(&mut self, keys: &HeldKeys, dt: f32) {
        let mut animation = self.animator.animation();

        if keys.w {
            animation = AnimationType::IdleBack;
        }
        if keys.s {
            animation = AnimationType::IdleFront;
        }
        if keys.a {
            animation = AnimationType::IdleLeft;
        }
        if keys.d {
            animation = AnimationType::IdleRight;
        }

        self.position += keys.delta(self.speed, dt);
        self.animator.set_animation(animation);
        self.clamp();
    }

    pub fn update(&mut self, dt: f32) {
        self.animator.update(dt);
    }

    pub fn model(&self) -> Matrix4<f32> {
        quad_model(self.position, self.size, 0.0)
    }

    fn clamp(&mut self) {
        let max_x = (self.bounds.width - self.size.x).max(0.0);
        let max_y = (self.bounds.height - self.size.y).max(0.0);

        self.position.x = self.position.x.clamp(0.0, max_x);
        self.position.y = self.position.y.clamp(0.0, max_y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, KeyState};

    #[test]
    fn frame_uvs_follow_grid() {
        let sheet = SpriteSheet::new(4, 6);

        let uvs = sheet.frame_uvs(3, 5);
        assert!((uvs.x - 5.0 / 6.0).abs() < 1e-6);
        assert!((uvs.y - 0.75).abs() < 1e-6);
        assert!((uvs.z - 1.0).abs() < 1e-6);
        assert!((uvs.w - 1.0).abs() < 1e-6);

        assert_eq!(sheet.tile_uvs(7), sheet.frame_uvs(1, 1));
    }

    #[test]
    fn animator_steps_once_per_period() {
        let mut anim = Animator::new(SpriteSheet::new(4, 6), 10.0);

        anim.update(0.04);
        assert_eq!(anim.frame(), 0);
        anim.update(0.07);
        assert_eq!(anim.frame(), 1);

        // a long frame still advances a single step
        anim.update(1.0);
        assert_eq!(anim.frame(), 2);

        for _ in 0..4 {
            anim.update(0.1);
        }
        assert_eq!(anim.frame(), 0);
    }

    #[test]
    fn changing_animation_restarts() {
        let mut anim = Animator::new(SpriteSheet::new(4, 6), 10.0);
        anim.update(0.1);
        anim.update(0.1);
        assert_eq!(anim.frame(), 2);

        anim.set_animation(AnimationType::IdleFront);
        assert_eq!(anim.frame(), 2);

        anim.set_animation(AnimationType::IdleBack);
        assert_eq!(anim.frame(), 0);
        assert!((anim.uvs().y - 0.75).abs() < 1e-6);
    }

    #[test]
    fn zero_fps_freezes() {
        let mut anim = Animator::new(SpriteSheet::new(1, 4), 0.0);
        anim.update(10.0);
        assert_eq!(anim.frame(), 0);
    }

    #[test]
    fn character_moves_and_stays_on_screen() {
        let bounds = ScreenSize::new(800.0, 600.0);
        let mut character = Character::new(
            Vector2::new(64.0, 64.0),
            200.0,
            Animator::new(SpriteSheet::new(4, 6), 10.0),
            bounds,
        );
        assert_eq!(character.position, Vector2::new(368.0, 268.0));

        let mut keys = HeldKeys::default();
        keys.set(Key::A, KeyState::Pressed);
        character.process_input(&keys, 0.5);
        assert_eq!(character.position.x, 268.0);
        assert_eq!(character.animator.animation(), AnimationType::IdleLeft);

        character.process_input(&keys, 10.0);
        assert_eq!(character.position.x, 0.0);

        keys.set(Key::A, KeyState::Released);
        keys.set(Key::S, KeyState::Pressed);
        character.process_input(&keys, 10.0);
        assert_eq!(character.position.y, 536.0);
        assert_eq!(character.animator.animation(), AnimationType::IdleFront);
    }
}
