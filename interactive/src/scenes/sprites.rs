use gl_wrapper::renderer::GlRenderer;
use gl_wrapper::texture::{Texture2D, TextureFilter};

use classroom::sprite::{Placement, FULL_UVS};

use crate::draw::{load_texture, Painter};
use crate::scenes::{Scene, SceneContext, SceneError};

pub struct Sprites {
    painter: Painter,
    textures: Vec<Texture2D>,
    placements: Vec<Placement>,
}

impl Sprites {
    pub fn new(ctx: SceneContext) -> Result<Self, SceneError> {
        let config = &ctx.config.sprites;
        if config.textures.is_empty() {
            return Err(SceneError::Invalid("no sprite textures configured".to_string()));
        }

        let textures = config
            .textures
            .iter()
            .map(|path| load_texture(ctx.asset(path), TextureFilter::Linear))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            painter: Painter::new(ctx.screen)?,
            textures,
            placements: config.placements.clone(),
        })
    }
}

impl Scene for Sprites {
    fn draw(&mut self, renderer: &mut GlRenderer) {
        // textures are reused in order when there are more placements
        for (placement, texture) in self.placements.iter().zip(self.textures.iter().cycle()) {
            self.painter
                .sprite(renderer, texture, &placement.model(), FULL_UVS);
        }
    }
}
