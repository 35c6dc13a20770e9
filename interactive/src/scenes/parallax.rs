use cgmath::Vector2;

use gl_wrapper::renderer::GlRenderer;
use gl_wrapper::texture::{Texture2D, TextureFilter};

use classroom::input::{HeldKeys, Key, KeyState};
use classroom::parallax::{Layer, ParallaxScene};
use classroom::sprite::FULL_UVS;

use crate::draw::{load_texture, Painter};
use crate::scenes::{Scene, SceneContext, SceneError};

pub struct Parallax {
    painter: Painter,
    layer_textures: Vec<Texture2D>,
    player_texture: Texture2D,
    scene: ParallaxScene,
    keys: HeldKeys,
}

impl Parallax {
    pub fn new(ctx: SceneContext) -> Result<Self, SceneError> {
        let config = &ctx.config.parallax;
        let screen_size = Vector2::new(ctx.screen.width, ctx.screen.height);

        let mut layers = Vec::with_capacity(config.layers.len());
        let mut layer_textures = Vec::with_capacity(config.layers.len());
        for layer in &config.layers {
            layer_textures.push(load_texture(ctx.asset(&layer.texture), TextureFilter::Linear)?);
            layers.push(Layer::new(
                Vector2::new(0.0, 0.0),
                screen_size,
                layer.factor,
                layer.tiling,
            ));
        }

        let player_size = Vector2::from(config.player_size);
        let player = Layer::new(
            (screen_size - player_size) / 2.0,
            player_size,
            0.0,
            false,
        );
        let player_texture = load_texture(ctx.asset(&config.player), TextureFilter::Linear)?;

        log::info!("{} parallax layers loaded", layers.len());

        Ok(Self {
            painter: Painter::new(ctx.screen)?,
            layer_textures,
            player_texture,
            scene: ParallaxScene::new(layers, player, config.speed, ctx.screen.width),
            keys: HeldKeys::default(),
        })
    }
}

impl Scene for Parallax {
    fn key(&mut self, key: Key, state: KeyState) {
        self.keys.set(key, state);
    }

    fn update(&mut self, dt: f32) {
        if self.keys.any() {
            let delta = self.keys.delta(self.scene.speed, dt);
            self.scene.advance(delta);
        }
    }

    fn draw(&mut self, renderer: &mut GlRenderer) {
        for (layer, texture) in self.scene.layers.iter().zip(&self.layer_textures) {
            for model in layer.models() {
                self.painter.sprite(renderer, texture, &model, FULL_UVS);
            }
        }

        for model in self.scene.player.models() {
            self.painter
                .sprite(renderer, &self.player_texture, &model, FULL_UVS);
        }
    }
}
