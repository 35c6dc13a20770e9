use cgmath::Vector2;
use rand::Rng;

use crate::math::Rect;
use crate::Color;

pub const ROWS: usize = 6;
pub const COLS: usize = 8;
pub const QUAD_SIZE: f32 = 100.0;
pub const DEFAULT_TOLERANCE: f32 = 0.2;
pub const START_POINTS_PER_QUAD: u32 = 10;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quad {
    pub rect: Rect,
    pub color: Color,
    pub eliminated: bool,
}

/// Result of one selection.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub number: u32,
    pub eliminated: usize,
    pub points: u32,
    pub score: u32,
}

#[derive(Debug, Clone)]
pub struct ColorGame {
    quads: Vec<Quad>,
    tolerance: f32,
    score: u32,
    attempts: u32,
    points_per_quad: u32,
}

impl ColorGame {
    pub fn new<R: Rng + ?Sized>(tolerance: f32, rng: &mut R) -> Self {
        let mut game = Self {
            quads: Vec::with_capacity(ROWS * COLS),
            tolerance,
            score: 0,
            attempts: 0,
            points_per_quad: START_POINTS_PER_QUAD,
        };
        game.restart(rng);
        game
    }

    /// Builds a game from explicit colors, row by row.
    pub fn from_colors(tolerance: f32, colors: &[Color]) -> Self {
        assert_eq!(colors.len(), ROWS * COLS, "grid needs {} colors", ROWS * COLS);

        let quads = colors
            .iter()
            .enumerate()
            .map(|(i, &color)| Quad {
                rect: cell_rect(i / COLS, i % COLS),
                color,
                eliminated: false,
            })
            .collect();

        Self {
            quads,
            tolerance,
            score: 0,
            attempts: 0,
            points_per_quad: START_POINTS_PER_QUAD,
        }
    }

    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.quads.clear();
        for row in 0..ROWS {
            for col in 0..COLS {
                self.quads.push(Quad {
                    rect: cell_rect(row, col),
                    color: Color::random(rng),
                    eliminated: false,
                });
            }
        }

        self.score = 0;
        self.attempts = 0;
        self.points_per_quad = START_POINTS_PER_QUAD;
    }

    /// Maps a pixel to the index of a live quad.
    pub fn pick(&self, pixel: Vector2<f32>) -> Option<usize> {
        if pixel.x < 0.0 || pixel.y < 0.0 {
            return None;
        }

        let col = (pixel.x / QUAD_SIZE) as usize;
        let row = (pixel.y / QUAD_SIZE) as usize;

        if col >= COLS || row >= ROWS {
            return None;
        }

        let index = row * COLS + col;
        (!self.quads[index].eliminated).then_some(index)
    }

    /// Handles a click. Returns `None` if it did not hit a live quad.
    pub fn click(&mut self, pixel: Vector2<f32>) -> Option<Attempt> {
        let index = self.pick(pixel)?;
        Some(self.eliminate_similar(index))
    }

    /// Removes every live quad close enough to the color of `index` and scores the attempt.
    pub fn eliminate_similar(&mut self, index: usize) -> Attempt {
        let reference = self.quads[index].color;
        let tolerance = self.tolerance;

        let mut eliminated = 0;
        for quad in self.quads.iter_mut().filter(|q| !q.eliminated) {
            if quad.color.normalized_distance(&reference) <= tolerance {
                quad.eliminated = true;
                eliminated += 1;
            }
        }

        self.attempts += 1;
        let points = eliminated as u32 * self.points_per_quad;
        self.score += points;
        self.points_per_quad = 10_u32.saturating_sub(self.attempts * 2).max(1);

        let attempt = Attempt {
            number: self.attempts,
            eliminated,
            points,
            score: self.score,
        };

        log::info!(
            "attempt {}: {} quads eliminated, {} points gained, total score {}",
            attempt.number,
            attempt.eliminated,
            attempt.points,
            attempt.score
        );

        attempt
    }

    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    pub fn remaining(&self) -> usize {
        self.quads.iter().filter(|q| !q.eliminated).count()
    }

    pub fn is_cleared(&self) -> bool {
        self.remaining() == 0
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn points_per_quad(&self) -> u32 {
        self.points_per_quad
    }
}

fn cell_rect(row: usize, col: usize) -> Rect {
    Rect::new(
        col as f32 * QUAD_SIZE,
        row as f32 * QUAD_SIZE,
        QUAD_SIZE,
        QUAD_SIZE,
    )
}
