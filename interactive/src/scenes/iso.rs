use gl_wrapper::renderer::GlRenderer;
use gl_wrapper::texture::{Texture2D, TextureFilter};

use classroom::input::{Key, KeyState};
use classroom::iso::IsoProjection;
use classroom::sprite::SpriteSheet;
use classroom::tile_map::TileMap;
use classroom::walk::{Cursor, Direction, TILE_CURSOR};
use classroom_common::map_loader::{builtin_map, load_map};

use crate::draw::{load_texture, Painter};
use crate::scenes::{Scene, SceneContext, SceneError};

/// Tileset and projection for drawing a map in painter's order.
pub struct IsoTiles {
    pub projection: IsoProjection,
    sheet: SpriteSheet,
    tileset: Texture2D,
}

impl IsoTiles {
    pub fn new(map: &TileMap, scale: f32, ctx: &SceneContext) -> Result<Self, SceneError> {
        if scale <= 0.0 {
            return Err(SceneError::Invalid(format!("tile scale {scale} must be positive")));
        }

        let tileset = load_texture(&map.tileset.path, TextureFilter::Nearest)?;
        let projection = IsoProjection::new(
            map.tileset.tile_width as f32 * scale,
            map.tileset.tile_height as f32 * scale,
            map.rows(),
            map.cols(),
            ctx.screen,
        );

        Ok(Self {
            sheet: map.tileset.sheet(),
            projection,
            tileset,
        })
    }

    pub fn draw_tile(&self, painter: &Painter, renderer: &mut GlRenderer, row: usize, col: usize, id: u8) {
        painter.sprite(
            renderer,
            &self.tileset,
            &self.projection.tile_rect(row, col).model(),
            self.sheet.tile_uvs(id as u32),
        );
    }

    pub fn draw(&self, map: &TileMap, painter: &Painter, renderer: &mut GlRenderer) {
        for (row, col, id) in map.iter() {
            self.draw_tile(painter, renderer, row, col, id);
        }
    }
}

pub struct Iso {
    painter: Painter,
    map: TileMap,
    tiles: IsoTiles,
    cursor: Cursor,
}

impl Iso {
    pub fn new(ctx: SceneContext) -> Result<Self, SceneError> {
        let config = &ctx.config.iso;

        let map = match &config.map {
            Some(path) => load_map(ctx.asset(path))?,
            None => {
                log::info!("no map given, using the built-in one");
                builtin_map(&ctx.assets)?
            }
        };

        Ok(Self {
            painter: Painter::new(ctx.screen)?,
            tiles: IsoTiles::new(&map, config.scale, &ctx)?,
            map,
            cursor: Cursor::default(),
        })
    }
}

impl Scene for Iso {
    fn key(&mut self, key: Key, state: KeyState) {
        if state != KeyState::Pressed {
            return;
        }

        let Some(dir) = Direction::from_key(key) else {
            return;
        };

        match self.cursor.step(&self.map, dir) {
            Some(id) => log::info!(
                "cursor at row {}, col {}: tile {id}",
                self.cursor.row,
                self.cursor.col
            ),
            None => log::debug!("cursor move {dir:?} leaves the map"),
        }
    }

    fn draw(&mut self, renderer: &mut GlRenderer) {
        self.tiles.draw(&self.map, &self.painter, renderer);
        self.tiles.draw_tile(
            &self.painter,
            renderer,
            self.cursor.row,
            self.cursor.col,
            TILE_CURSOR,
        );
    }

    fn clear_color(&self) -> [f32; 3] {
        [0.0, 0.0, 0.0]
    }
}
