use cgmath::Vector2;
use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use thiserror::Error;

use classroom::color_game::ColorGame;
use classroom::input::Key;
use classroom::tile_map::{MapError, TileMap};
use classroom::walk::{Direction, GameState, MoveOutcome, WalkGame, TILE_COIN, TILE_START};
use classroom_common::map_loader::load_map;

mod args;

use args::{Args, Command};

fn main() {
    // clion needs help in trait annotation
    let args = <Args as Parser>::parse();

    env_logger::Builder::new()
        .parse_filters(&args.log)
        .format_timestamp(None)
        .init();

    if let Err(e) = run(args.command) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::CheckMap { map } => {
            let map = load_map(&map)?;
            print_summary(&map);
            Ok(())
        }
        Command::Walk { map, moves } => replay(load_map(&map)?, &moves),
        Command::Colors {
            seed,
            clicks,
            tolerance,
        } => play_colors(seed, &clicks, tolerance),
    }
}

fn print_summary(map: &TileMap) {
    let tileset = &map.tileset;

    println!("map: {} rows x {} cols", map.rows(), map.cols());
    println!(
        "tileset: {} ({} x {} tiles of {}x{} px)",
        tileset.path.display(),
        tileset.cols,
        tileset.rows,
        tileset.tile_width,
        tileset.tile_height
    );
    println!("coins: {}", map.count(TILE_COIN));

    match map.find(TILE_START) {
        Some((row, col)) => println!("start: row {row}, col {col}"),
        None => println!("start: none, the player starts at row 0, col 0"),
    }
}

fn replay(map: TileMap, moves: &str) -> Result<(), CliError> {
    let mut game = WalkGame::new(map);

    for (i, c) in moves.chars().filter(|c| !c.is_whitespace()).enumerate() {
        let key = Key::from_char(c).ok_or(CliError::InvalidMove(c))?;

        if key == Key::R {
            game.reset();
            println!("{i}: restart");
            continue;
        }

        let dir = Direction::from_key(key).ok_or(CliError::InvalidMove(c))?;
        let outcome = game.step(dir);
        if matches!(outcome, MoveOutcome::Won | MoveOutcome::DiedInLava) {
            game.apply_end_effect();
        }

        println!(
            "{i}: {dir:?} -> {outcome:?}, at row {}, col {}",
            game.row, game.col
        );
    }

    let verdict = match game.state() {
        GameState::Playing => "still playing",
        GameState::Won => "won",
        GameState::Lost => "lost",
    };
    println!(
        "{verdict}, coins {}/{}",
        game.collected(),
        game.total_coins()
    );

    Ok(())
}

fn parse_click(src: &str) -> Result<Vector2<f32>, CliError> {
    let invalid = || CliError::InvalidClick(src.to_string());

    let (x, y) = src.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse().map_err(|_| invalid())?;
    let y = y.trim().parse().map_err(|_| invalid())?;

    Ok(Vector2::new(x, y))
}

fn play_colors(seed: u64, clicks: &[String], tolerance: f32) -> Result<(), CliError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut game = ColorGame::new(tolerance, &mut rng);

    for click in clicks.iter().filter(|c| !c.is_empty()) {
        let pixel = parse_click(click)?;

        match game.click(pixel) {
            Some(attempt) => println!(
                "({}, {}): {} eliminated, +{} points, score {}",
                pixel.x, pixel.y, attempt.eliminated, attempt.points, attempt.score
            ),
            None => println!("({}, {}): no tile", pixel.x, pixel.y),
        }
    }

    println!(
        "final score {} after {} attempts, {} tiles left",
        game.score(),
        game.attempts(),
        game.remaining()
    );

    Ok(())
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Map(#[from] MapError),
    #[error("`{0}` is not a move")]
    InvalidMove(char),
    #[error("`{0}` is not an `x,y` click")]
    InvalidClick(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_pairs() {
        assert_eq!(parse_click("150,20.5").unwrap(), Vector2::new(150.0, 20.5));
        assert!(matches!(parse_click("150"), Err(CliError::InvalidClick(_))));
        assert!(matches!(parse_click("a,b"), Err(CliError::InvalidClick(_))));
    }

    #[test]
    fn missing_map_is_an_error() {
        let command = Command::CheckMap {
            map: "no/such/map.txt".into(),
        };

        assert!(matches!(run(command), Err(CliError::Map(MapError::Input(_)))));
    }

    #[test]
    fn replay_rejects_unknown_keys() {
        let map = TileMap::parse(classroom_common::map_loader::BUILTIN_MAP).unwrap();

        assert!(matches!(replay(map, "dx"), Err(CliError::InvalidMove('x'))));
    }
}
