use cgmath::{Matrix4, Vector2};

use crate::math::translate_scale;

pub const DEFAULT_SPEED: f32 = 200.0;

/// Background layer scrolled at a fraction of the player's movement.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub position: Vector2<f32>,
    pub size: Vector2<f32>,
    pub factor: f32,
    pub tiling: bool,
}

impl Layer {
    pub fn new(position: Vector2<f32>, size: Vector2<f32>, factor: f32, tiling: bool) -> Self {
        Self {
            position,
            size,
            factor,
            tiling,
        }
    }

    pub fn update(&mut self, delta: Vector2<f32>) {
        self.position += delta * self.factor;
    }

    /// Keeps a tiling layer's copies covering the screen horizontally.
    pub fn wrap_around(&mut self, screen_width: f32) {
        if self.position.x + self.size.x < 0.0 {
            self.position.x += self.size.x * 2.0;
        }
        if self.position.x > screen_width {
            self.position.x -= self.size.x * 2.0;
        }
    }

    /// Model matrices for every copy of the layer that has to be drawn.
    pub fn models(&self) -> Vec<Matrix4<f32>> {
        let mut offsets = vec![0.0];
        if self.tiling {
            offsets.extend([self.size.x, -self.size.x]);
        }

        offsets
            .into_iter()
            .map(|dx| {
                translate_scale(
                    Vector2::new(self.position.x + dx, self.position.y),
                    self.size,
                )
            })
            .collect()
    }
}

/// Stack of layers drawn back to front, plus the player moving over them.
pub struct ParallaxScene {
    pub layers: Vec<Layer>,
    pub player: Layer,
    pub speed: f32,
    screen_width: f32,
}

impl ParallaxScene {
    pub fn new(layers: Vec<Layer>, player: Layer, speed: f32, screen_width: f32) -> Self {
        Self {
            layers,
            player,
            speed,
            screen_width,
        }
    }

    /// Moves the player by `delta` and scrolls the layers the opposite way.
    pub fn advance(&mut self, delta: Vector2<f32>) {
        for layer in &mut self.layers {
            layer.update(-delta);
            if layer.tiling {
                layer.wrap_around(self.screen_width);
            }
        }

        self.player.position += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(factor: f32) -> Layer {
        Layer::new(
            Vector2::new(0.0, 0.0),
            Vector2::new(800.0, 600.0),
            factor,
            true,
        )
    }

    #[test]
    fn layers_scroll_by_factor() {
        let player = Layer::new(Vector2::new(368.0, 268.0), Vector2::new(64.0, 64.0), 0.0, false);
        let mut scene = ParallaxScene::new(vec![layer(0.1), layer(0.5)], player, DEFAULT_SPEED, 800.0);

        scene.advance(Vector2::new(100.0, 0.0));

        assert_eq!(scene.layers[0].position.x, -10.0);
        assert_eq!(scene.layers[1].position.x, -50.0);
        assert_eq!(scene.player.position.x, 468.0);
    }

    #[test]
    fn wrap_left_and_right() {
        let mut l = layer(1.0);

        l.position.x = -801.0;
        l.wrap_around(800.0);
        assert_eq!(l.position.x, 799.0);

        l.wrap_around(800.0);
        assert_eq!(l.position.x, 799.0);

        l.position.x = 801.0;
        l.wrap_around(800.0);
        assert_eq!(l.position.x, -799.0);
    }

    #[test]
    fn non_tiling_layers_do_not_wrap() {
        let player = Layer::new(Vector2::new(0.0, 0.0), Vector2::new(64.0, 64.0), 0.0, false);
        let fixed = Layer::new(Vector2::new(0.0, 0.0), Vector2::new(800.0, 600.0), 1.0, false);
        let mut scene = ParallaxScene::new(vec![fixed, layer(1.0)], player, DEFAULT_SPEED, 800.0);

        scene.advance(Vector2::new(900.0, 0.0));

        assert_eq!(scene.layers[0].position.x, -900.0);
        assert_eq!(scene.layers[1].position.x, 700.0);
    }

    #[test]
    fn tiling_layers_draw_three_copies() {
        assert_eq!(layer(0.1).models().len(), 3);

        let single = Layer::new(Vector2::new(0.0, 0.0), Vector2::new(64.0, 64.0), 0.0, false);
        assert_eq!(single.models().len(), 1);
    }
}
