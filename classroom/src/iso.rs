use cgmath::Vector2;

use crate::math::Rect;
use crate::ScreenSize;

/// Maps grid cells of an isometric map onto the screen, centering the whole map.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct IsoProjection {
    pub tile_width: f32,
    pub tile_height: f32,
    offset: Vector2<f32>,
}

impl IsoProjection {
    pub fn new(
        tile_width: f32,
        tile_height: f32,
        map_rows: usize,
        map_cols: usize,
        screen: ScreenSize,
    ) -> Self {
        let (rows, cols) = (map_rows as f32, map_cols as f32);
        let half_w = tile_width / 2.0;
        let half_h = tile_height / 2.0;

        let min_x = -(rows - 1.0) * half_w;
        let max_x = (cols - 1.0) * half_w;
        let min_y = 0.0;
        let max_y = (cols + rows - 2.0) * half_h + tile_height;

        let center = Vector2::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
        let offset = Vector2::new(screen.width / 2.0, screen.height / 2.0) - center;

        Self {
            tile_width,
            tile_height,
            offset,
        }
    }

    /// Screen position of the top corner of a cell's diamond.
    pub fn grid_to_screen(&self, row: usize, col: usize) -> Vector2<f32> {
        let (row, col) = (row as f32, col as f32);

        Vector2::new(
            (col - row) * (self.tile_width / 2.0),
            (col + row) * (self.tile_height / 2.0),
        ) + self.offset
    }

    /// Screen rectangle covered by the tile quad of a cell.
    pub fn tile_rect(&self, row: usize, col: usize) -> Rect {
        let anchor = self.grid_to_screen(row, col);

        Rect::new(
            anchor.x - self.tile_width / 2.0,
            anchor.y,
            self.tile_width,
            self.tile_height,
        )
    }

    /// Rectangle for a sprite standing on a cell: centered horizontally,
    /// bottom edge on the middle of the tile diamond.
    pub fn standing_rect(&self, row: usize, col: usize, size: Vector2<f32>) -> Rect {
        let anchor = self.grid_to_screen(row, col);
        let feet = anchor.y + self.tile_height / 2.0;

        Rect::new(anchor.x - size.x / 2.0, feet - size.y, size.x, size.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbours_form_a_diamond() {
        let proj = IsoProjection::new(64.0, 32.0, 3, 3, ScreenSize::new(800.0, 600.0));

        let origin = proj.grid_to_screen(0, 0);
        let right = proj.grid_to_screen(0, 1);
        let down = proj.grid_to_screen(1, 0);

        assert_eq!(right - origin, Vector2::new(32.0, 16.0));
        assert_eq!(down - origin, Vector2::new(-32.0, 16.0));
    }

    #[test]
    fn square_map_is_centered() {
        let proj = IsoProjection::new(64.0, 32.0, 3, 3, ScreenSize::new(800.0, 600.0));

        // the top cell sits on the vertical axis of the screen
        assert_eq!(proj.grid_to_screen(0, 0).x, 400.0);

        let top = proj.tile_rect(0, 0).position.y;
        let bottom = proj.tile_rect(2, 2);
        let bottom = bottom.position.y + bottom.size.y;
        assert_eq!((top + bottom) / 2.0, 300.0);
    }

    #[test]
    fn sprite_stands_on_tile_center() {
        let proj = IsoProjection::new(64.0, 32.0, 1, 1, ScreenSize::new(800.0, 600.0));
        let tile = proj.tile_rect(0, 0);
        let sprite = proj.standing_rect(0, 0, Vector2::new(64.0, 64.0));

        assert_eq!(sprite.position.x, tile.position.x);
        assert_eq!(
            sprite.position.y + sprite.size.y,
            tile.position.y + tile.size.y / 2.0
        );
    }
}
