use crate::input::Key;
use crate::sprite::AnimationType;
use crate::tile_map::TileMap;

pub const TILE_COIN: u8 = 0;
pub const TILE_FLOOR: u8 = 1;
pub const TILE_WALL: u8 = 2;
pub const TILE_LAVA: u8 = 3;
pub const TILE_START: u8 = 4;
pub const TILE_WATER: u8 = 5;
pub const TILE_VICTORY: u8 = 6;

/// Tile id drawn on top of the cell under the cursor.
pub const TILE_CURSOR: u8 = 6;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TileKind {
    Coin,
    Floor,
    Wall,
    Lava,
    Start,
    Water,
    Victory,
    Other(u8),
}

impl From<u8> for TileKind {
    fn from(id: u8) -> Self {
        match id {
            TILE_COIN => Self::Coin,
            TILE_FLOOR => Self::Floor,
            TILE_WALL => Self::Wall,
            TILE_LAVA => Self::Lava,
            TILE_START => Self::Start,
            TILE_WATER => Self::Water,
            TILE_VICTORY => Self::Victory,
            other => Self::Other(other),
        }
    }
}

/// One of the eight grid steps.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    pub fn from_key(key: Key) -> Option<Self> {
        Some(match key {
            Key::W => Self::Up,
            Key::S => Self::Down,
            Key::A => Self::Left,
            Key::D => Self::Right,
            Key::Q => Self::UpLeft,
            Key::E => Self::UpRight,
            Key::Z => Self::DownLeft,
            Key::C => Self::DownRight,
            _ => return None,
        })
    }

    /// `(row, col)` offset of the step.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
            Self::UpLeft => (-1, -1),
            Self::UpRight => (-1, 1),
            Self::DownLeft => (1, -1),
            Self::DownRight => (1, 1),
        }
    }

    pub fn animation(self) -> AnimationType {
        match self {
            Self::Up => AnimationType::IdleBack,
            Self::Down => AnimationType::IdleFront,
            Self::Left | Self::UpLeft | Self::DownLeft => AnimationType::IdleLeft,
            Self::Right | Self::UpRight | Self::DownRight => AnimationType::IdleRight,
        }
    }
}

/// Cell selection moved around a map with no rules other than staying on it.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

impl Cursor {
    /// Moves the cursor if the target lies on the map. Returns the new cell's tile id.
    pub fn step(&mut self, map: &TileMap, dir: Direction) -> Option<u8> {
        let (dr, dc) = dir.offset();
        let (row, col) = map.cell(self.row as i32 + dr, self.col as i32 + dc)?;

        self.row = row;
        self.col = col;

        map.get(row, col)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Won,
    Lost,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Target outside the map, or the game is over.
    Ignored,
    Blocked(TileKind),
    Moved,
    CoinCollected { collected: usize, total: usize },
    Won,
    DiedInLava,
}

/// Coin collecting game on a tile map.
pub struct WalkGame {
    initial: TileMap,
    map: TileMap,
    pub row: usize,
    pub col: usize,
    collected: usize,
    total_coins: usize,
    state: GameState,
    effect_applied: bool,
}

impl WalkGame {
    pub fn new(map: TileMap) -> Self {
        let mut game = Self {
            initial: map.clone(),
            map,
            row: 0,
            col: 0,
            collected: 0,
            total_coins: 0,
            state: GameState::Playing,
            effect_applied: false,
        };
        game.reset();
        game
    }

    /// Restores the map as loaded and puts the player back on the start tile.
    pub fn reset(&mut self) {
        self.map = self.initial.clone();
        self.collected = 0;
        self.state = GameState::Playing;
        self.effect_applied = false;
        self.total_coins = self.map.count(TILE_COIN);

        let (row, col) = self.map.find(TILE_START).unwrap_or_else(|| {
            log::warn!("no start tile (id {TILE_START}) on the map, starting at (0, 0)");
            (0, 0)
        });
        self.row = row;
        self.col = col;

        log::info!("coins on the map: {}", self.total_coins);
    }

    pub fn step(&mut self, dir: Direction) -> MoveOutcome {
        if self.state != GameState::Playing {
            return MoveOutcome::Ignored;
        }

        let (dr, dc) = dir.offset();
        let Some((row, col)) = self.map.cell(self.row as i32 + dr, self.col as i32 + dc) else {
            return MoveOutcome::Ignored;
        };

        let id = self.map.get(row, col).unwrap_or(TILE_FLOOR);
        let kind = TileKind::from(id);

        match kind {
            TileKind::Wall | TileKind::Water => {
                log::info!("tile ({col}, {row}) is not walkable ({kind:?})");
                return MoveOutcome::Blocked(kind);
            }
            _ if !self.map.is_walkable(row, col) => {
                log::info!("tile ({col}, {row}) is not walkable");
                return MoveOutcome::Blocked(kind);
            }
            TileKind::Lava => {
                self.state = GameState::Lost;
                log::info!("you fell into the lava, game over");
                return MoveOutcome::DiedInLava;
            }
            _ => {}
        }

        self.row = row;
        self.col = col;
        log::info!("player moved to ({col}, {row})");

        if kind != TileKind::Coin {
            return MoveOutcome::Moved;
        }

        self.collected += 1;
        self.map.set(row, col, TILE_FLOOR);
        log::info!("coin collected, total: {}", self.collected);

        if self.collected == self.total_coins {
            self.state = GameState::Won;
            log::info!("all coins collected, you win");
            return MoveOutcome::Won;
        }

        MoveOutcome::CoinCollected {
            collected: self.collected,
            total: self.total_coins,
        }
    }

    /// Paints the whole map once the game is decided. Runs only once per game.
    pub fn apply_end_effect(&mut self) -> bool {
        if self.effect_applied {
            return false;
        }

        let tile = match self.state {
            GameState::Won => TILE_VICTORY,
            GameState::Lost => TILE_LAVA,
            GameState::Playing => return false,
        };

        self.map.fill(tile);
        self.effect_applied = true;
        true
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn collected(&self) -> usize {
        self.collected
    }

    pub fn total_coins(&self) -> usize {
        self.total_coins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 0 coin, 1 floor, 2 wall, 3 lava, 4 start, 5 water
    const MAP: &str = "\
tileset_info: tiles.png 7 1 64 32
map_dimensions: 3 4
map_data:
4112
1510
3110
";

    fn game() -> WalkGame {
        WalkGame::new(TileMap::parse(MAP).unwrap())
    }

    #[test]
    fn starts_on_start_tile() {
        let game = game();

        assert_eq!((game.row, game.col), (0, 0));
        assert_eq!(game.total_coins(), 2);
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn edges_walls_and_water_block() {
        let mut game = game();

        assert_eq!(game.step(Direction::Up), MoveOutcome::Ignored);
        assert_eq!(game.step(Direction::DownRight), MoveOutcome::Blocked(TileKind::Water));

        game.step(Direction::Right);
        assert_eq!(game.step(Direction::Right), MoveOutcome::Moved);
        assert_eq!(game.step(Direction::Right), MoveOutcome::Blocked(TileKind::Wall));
        assert_eq!((game.row, game.col), (0, 2));
    }

    #[test]
    fn lava_ends_the_game_without_moving() {
        let mut game = game();

        game.step(Direction::Down);
        assert_eq!(game.step(Direction::Down), MoveOutcome::DiedInLava);
        assert_eq!((game.row, game.col), (1, 0));
        assert_eq!(game.state(), GameState::Lost);

        assert_eq!(game.step(Direction::Right), MoveOutcome::Ignored);

        assert!(game.apply_end_effect());
        assert!(!game.apply_end_effect());
        assert_eq!(game.map().count(TILE_LAVA), 12);
    }

    #[test]
    fn collecting_every_coin_wins() {
        let mut game = game();

        game.step(Direction::Right);
        game.step(Direction::Right);
        game.step(Direction::Down);
        assert_eq!(
            game.step(Direction::Right),
            MoveOutcome::CoinCollected {
                collected: 1,
                total: 2
            }
        );
        assert_eq!(game.map().get(1, 3), Some(TILE_FLOOR));

        assert_eq!(game.step(Direction::Down), MoveOutcome::Won);
        assert_eq!(game.state(), GameState::Won);

        assert!(game.apply_end_effect());
        assert_eq!(game.map().count(TILE_VICTORY), 12);
    }

    #[test]
    fn reset_restores_everything() {
        let mut game = game();

        game.step(Direction::Down);
        game.step(Direction::Down);
        game.apply_end_effect();
        game.reset();

        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.map().get(2, 0), Some(TILE_LAVA));
        assert_eq!(game.map().count(TILE_COIN), 2);
        assert_eq!((game.row, game.col), (0, 0));
        assert_eq!(game.collected(), 0);
    }

    #[test]
    fn map_without_start_or_coins() {
        let src = "tileset_info: tiles.png 7 1 64 32\nmap_dimensions: 2 2\nmap_data:\n11\n11\n";
        let mut game = WalkGame::new(TileMap::parse(src).unwrap());

        assert_eq!((game.row, game.col), (0, 0));
        assert_eq!(game.total_coins(), 0);

        for dir in [Direction::Right, Direction::Down, Direction::Left, Direction::Up] {
            assert_eq!(game.step(dir), MoveOutcome::Moved);
            assert_eq!(game.state(), GameState::Playing);
        }
        assert!(!game.apply_end_effect());
    }

    #[test]
    fn walkable_overlay_blocks() {
        let src = format!("{MAP}walkable_data:\nW.WW\nWWWW\nWWWW\n");
        let mut game = WalkGame::new(TileMap::parse(&src).unwrap());

        assert_eq!(game.step(Direction::Right), MoveOutcome::Blocked(TileKind::Floor));
    }

    #[test]
    fn cursor_stays_on_map() {
        let map = TileMap::parse(MAP).unwrap();
        let mut cursor = Cursor::default();

        assert_eq!(cursor.step(&map, Direction::UpLeft), None);
        assert_eq!(cursor.step(&map, Direction::DownRight), Some(5));
        assert_eq!((cursor.row, cursor.col), (1, 1));
    }

    #[test]
    fn key_mapping() {
        assert_eq!(Direction::from_key(Key::Q), Some(Direction::UpLeft));
        assert_eq!(Direction::from_key(Key::R), None);
        assert_eq!(Direction::UpRight.animation(), AnimationType::IdleRight);
        assert_eq!(Direction::Up.animation(), AnimationType::IdleBack);
    }
}
