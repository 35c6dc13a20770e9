use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use classroom::color_game::ColorGame;
use classroom::iso::IsoProjection;
use classroom::ScreenSize;

pub fn eliminate(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(42);
    let game = ColorGame::new(0.2, &mut rng);

    c.bench_function("eliminate_similar", |b| {
        b.iter(|| {
            let mut game = game.clone();
            game.eliminate_similar(17)
        })
    });
}

pub fn iso_projection(c: &mut Criterion) {
    let proj = IsoProjection::new(64.0, 32.0, 256, 256, ScreenSize::default());

    c.bench_function("iso_tile_rects", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for row in 0..256 {
                for col in 0..256 {
                    sum += proj.tile_rect(row, col).position.x;
                }
            }
            sum
        })
    });
}

criterion_group!(benches, eliminate, iso_projection);
criterion_main!(benches);
