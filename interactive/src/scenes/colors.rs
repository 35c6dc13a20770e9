use cgmath::Vector2;
use rand::rngs::SmallRng;

use gl_wrapper::renderer::GlRenderer;

use classroom::color_game::ColorGame;
use classroom::input::{Key, KeyState};

use crate::draw::Painter;
use crate::scenes::{Scene, SceneContext, SceneError};

pub struct Colors {
    painter: Painter,
    game: ColorGame,
    rng: SmallRng,
    announced: bool,
}

impl Colors {
    pub fn new(mut ctx: SceneContext) -> Result<Self, SceneError> {
        let tolerance = ctx.config.colors.tolerance;
        if !(0.0..=1.0).contains(&tolerance) {
            return Err(SceneError::Invalid(format!(
                "color tolerance {tolerance} outside of 0..=1"
            )));
        }

        let game = ColorGame::new(tolerance, &mut ctx.rng);
        log::info!("click a tile to remove every tile of a similar color, R restarts");

        Ok(Self {
            painter: Painter::new(ctx.screen)?,
            game,
            rng: ctx.rng,
            announced: false,
        })
    }
}

impl Scene for Colors {
    fn key(&mut self, key: Key, state: KeyState) {
        if key == Key::R && state == KeyState::Pressed {
            self.game.restart(&mut self.rng);
            self.announced = false;
            log::info!("game restarted");
        }
    }

    fn click(&mut self, position: Vector2<f32>) {
        if self.game.click(position).is_none() {
            log::debug!("click at ({}, {}) hit no tile", position.x, position.y);
            return;
        }

        if self.game.is_cleared() && !self.announced {
            self.announced = true;
            log::info!(
                "board cleared in {} attempts, final score {}",
                self.game.attempts(),
                self.game.score()
            );
        }
    }

    fn draw(&mut self, renderer: &mut GlRenderer) {
        for quad in self.game.quads().iter().filter(|q| !q.eliminated) {
            self.painter
                .fill_quad(renderer, &quad.rect.model(), quad.color);
        }
    }

    fn clear_color(&self) -> [f32; 3] {
        [0.0, 0.0, 0.0]
    }

    fn exit(&mut self) {
        log::info!(
            "final score: {} after {} attempts",
            self.game.score(),
            self.game.attempts()
        );
    }
}
