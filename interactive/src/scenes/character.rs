use cgmath::Vector2;

use gl_wrapper::renderer::GlRenderer;
use gl_wrapper::texture::{Texture2D, TextureFilter};

use classroom::input::{HeldKeys, Key, KeyState};
use classroom::sprite::{Animator, Character};

use crate::draw::{load_texture, Painter};
use crate::scenes::{Scene, SceneContext, SceneError};

pub struct CharacterScene {
    painter: Painter,
    texture: Texture2D,
    character: Character,
    keys: HeldKeys,
}

impl CharacterScene {
    pub fn new(ctx: SceneContext) -> Result<Self, SceneError> {
        let config = &ctx.config.character;

        let texture = load_texture(ctx.asset(&config.sheet.texture), TextureFilter::Linear)?;
        let animator = Animator::new(config.sheet.sheet(), config.sheet.fps);
        let character = Character::new(
            Vector2::from(config.size),
            config.speed,
            animator,
            ctx.screen,
        );

        Ok(Self {
            painter: Painter::new(ctx.screen)?,
            texture,
            character,
            keys: HeldKeys::default(),
        })
    }
}

impl Scene for CharacterScene {
    fn key(&mut self, key: Key, state: KeyState) {
        self.keys.set(key, state);
    }

    fn update(&mut self, dt: f32) {
        self.character.process_input(&self.keys, dt);
        self.character.update(dt);
    }

    fn draw(&mut self, renderer: &mut GlRenderer) {
        self.painter.sprite(
            renderer,
            &self.texture,
            &self.character.model(),
            self.character.animator.uvs(),
        );
    }
}
