use cgmath::Vector2;

use gl_wrapper::renderer::GlRenderer;
use gl_wrapper::texture::{Texture2D, TextureFilter};

use classroom::input::{Key, KeyState};
use classroom::sprite::{AnimationType, Animator};
use classroom::walk::{Direction, GameState, MoveOutcome, WalkGame};
use classroom_common::map_loader::load_map;

use crate::draw::{load_texture, Painter};
use crate::scenes::iso::IsoTiles;
use crate::scenes::{Scene, SceneContext, SceneError};

pub struct Walk {
    painter: Painter,
    tiles: IsoTiles,
    game: WalkGame,
    animator: Animator,
    player: Texture2D,
}

impl Walk {
    pub fn new(ctx: SceneContext) -> Result<Self, SceneError> {
        let config = &ctx.config.walk;

        let map = load_map(ctx.asset(&config.map))?;
        let tiles = IsoTiles::new(&map, config.scale, &ctx)?;
        let game = WalkGame::new(map);

        let player = load_texture(ctx.asset(&config.sheet.texture), TextureFilter::Linear)?;
        let animator = Animator::new(config.sheet.sheet(), config.sheet.fps);

        log::info!("collect every coin, avoid lava; WASD/QEZC move, R restarts");

        Ok(Self {
            painter: Painter::new(ctx.screen)?,
            tiles,
            game,
            animator,
            player,
        })
    }

    fn restart(&mut self) {
        self.game.reset();
        self.animator.set_animation(AnimationType::IdleFront);
        log::info!("game restarted");
    }
}

impl Scene for Walk {
    fn key(&mut self, key: Key, state: KeyState) {
        if state != KeyState::Pressed {
            return;
        }

        if key == Key::R {
            self.restart();
            return;
        }

        if self.game.state() != GameState::Playing {
            return;
        }

        let Some(dir) = Direction::from_key(key) else {
            return;
        };

        self.animator.set_animation(dir.animation());

        match self.game.step(dir) {
            MoveOutcome::Won | MoveOutcome::DiedInLava => {
                if self.game.apply_end_effect() {
                    log::info!("press R to play again");
                }
            }
            MoveOutcome::Ignored => log::debug!("move {dir:?} ignored"),
            _ => {}
        }
    }

    fn update(&mut self, dt: f32) {
        self.animator.update(dt);
    }

    fn draw(&mut self, renderer: &mut GlRenderer) {
        self.tiles.draw(self.game.map(), &self.painter, renderer);

        let projection = &self.tiles.projection;
        let size = Vector2::new(projection.tile_width, projection.tile_height * 2.0);
        let rect = projection.standing_rect(self.game.row, self.game.col, size);

        self.painter
            .sprite(renderer, &self.player, &rect.model(), self.animator.uvs());
    }
}
