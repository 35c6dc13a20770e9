use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::sprite::SpriteSheet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilesetInfo {
    pub path: PathBuf,
    pub cols: u32,
    pub rows: u32,
    pub tile_width: u32,
    pub tile_height: u32,
}

impl TilesetInfo {
    pub fn sheet(&self) -> SpriteSheet {
        SpriteSheet::new(self.rows, self.cols)
    }

    /// `None` when the tile count does not fit a `u32`.
    pub fn tile_count(&self) -> Option<u32> {
        self.cols.checked_mul(self.rows)
    }
}

/// Grid of tile ids with an optional walkability overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    pub tileset: TilesetInfo,
    rows: usize,
    cols: usize,
    tiles: Vec<u8>,
    walkable: Option<Vec<bool>>,
}

impl TileMap {
    pub fn new(
        tileset: TilesetInfo,
        rows: usize,
        cols: usize,
        tiles: Vec<u8>,
    ) -> Result<Self, MapError> {
        if rows == 0 || cols == 0 {
            return Err(MapError::EmptyMap);
        }
        let len = rows
            .checked_mul(cols)
            .ok_or(MapError::TooLarge("map_dimensions"))?;
        if tiles.len() != len {
            return Err(MapError::IncompleteData {
                section: "map_data",
                expected: rows,
                got: tiles.len() / cols,
            });
        }

        let count = tileset
            .tile_count()
            .ok_or(MapError::TooLarge("tileset_info"))?;
        if let Some(&id) = tiles.iter().find(|&&id| id as u32 >= count) {
            return Err(MapError::TileOutOfRange { id, count });
        }

        Ok(Self {
            tileset,
            rows,
            cols,
            tiles,
            walkable: None,
        })
    }

    pub fn with_walkable(mut self, walkable: Vec<bool>) -> Result<Self, MapError> {
        if walkable.len() != self.rows * self.cols {
            return Err(MapError::IncompleteData {
                section: "walkable_data",
                expected: self.rows,
                got: walkable.len() / self.cols,
            });
        }

        self.walkable = Some(walkable);
        Ok(self)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the `(row, col)` pair if it lies on the map.
    pub fn cell(&self, row: i32, col: i32) -> Option<(usize, usize)> {
        if row < 0 || col < 0 {
            return None;
        }

        let (row, col) = (row as usize, col as usize);
        (row < self.rows && col < self.cols).then_some((row, col))
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row >= self.rows || col >= self.cols {
            return None;
        }

        Some(self.tiles[row * self.cols + col])
    }

    pub fn set(&mut self, row: usize, col: usize, id: u8) {
        if row < self.rows && col < self.cols {
            self.tiles[row * self.cols + col] = id;
        }
    }

    pub fn fill(&mut self, id: u8) {
        self.tiles.iter_mut().for_each(|t| *t = id);
    }

    pub fn is_walkable(&self, row: usize, col: usize) -> bool {
        match &self.walkable {
            Some(w) => w.get(row * self.cols + col).copied().unwrap_or(false),
            None => true,
        }
    }

    /// Iterates over `(row, col, id)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        let cols = self.cols;

        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, &id)| (i / cols, i % cols, id))
    }

    /// First cell in row-major order holding `id`.
    pub fn find(&self, id: u8) -> Option<(usize, usize)> {
        self.iter()
            .find(|&(_, _, t)| t == id)
            .map(|(r, c, _)| (r, c))
    }

    pub fn count(&self, id: u8) -> usize {
        self.tiles.iter().filter(|&&t| t == id).count()
    }

    /// Parses the keyed text map format.
    pub fn parse(src: &str) -> Result<Self, MapError> {
        let mut tileset = None;
        let mut dims: Option<(usize, usize)> = None;
        let mut tiles = None;
        let mut walkable = None;

        let mut lines = src.lines().enumerate().map(|(i, l)| (i + 1, l));

        while let Some((line_no, line)) = lines.next() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let mut words = trimmed.split_whitespace();
            let key = words.next().unwrap_or_default();

            match key {
                "tileset_info:" => {
                    let path = words.next().ok_or(MapError::MalformedLine {
                        line: line_no,
                        key: "tileset_info",
                    })?;

                    let info = TilesetInfo {
                        path: PathBuf::from(path),
                        cols: number(&mut words, line_no, "tileset_info")?,
                        rows: number(&mut words, line_no, "tileset_info")?,
                        tile_width: number(&mut words, line_no, "tileset_info")?,
                        tile_height: number(&mut words, line_no, "tileset_info")?,
                    };
                    if info.tile_count().is_none() {
                        return Err(MapError::TooLarge("tileset_info"));
                    }
                    tileset = Some(info);
                }
                "map_dimensions:" => {
                    let rows: usize = number(&mut words, line_no, "map_dimensions")?;
                    let cols: usize = number(&mut words, line_no, "map_dimensions")?;
                    if rows.checked_mul(cols).is_none() {
                        return Err(MapError::TooLarge("map_dimensions"));
                    }
                    dims = Some((rows, cols));
                }
                "map_data:" => {
                    let (rows, cols) = dims.ok_or(MapError::DataBeforeDimensions)?;
                    let rows_text = read_rows(&mut lines, rows, cols, "map_data")?;

                    let mut data = Vec::new();
                    for (row_line, row) in rows_text {
                        for ch in row.chars() {
                            let id = ch.to_digit(10).ok_or(MapError::InvalidTile {
                                line: row_line,
                                ch,
                            })?;
                            data.push(id as u8);
                        }
                    }
                    tiles = Some(data);
                }
                "walkable_data:" => {
                    let (rows, cols) = dims.ok_or(MapError::DataBeforeDimensions)?;
                    let rows_text = read_rows(&mut lines, rows, cols, "walkable_data")?;

                    walkable = Some(
                        rows_text
                            .iter()
                            .flat_map(|(_, row)| row.chars().map(|ch| ch == 'W'))
                            .collect::<Vec<_>>(),
                    );
                }
                _ => {
                    log::debug!("ignoring unknown map key {key:?} on line {line_no}");
                }
            }
        }

        let tileset = tileset.ok_or(MapError::MissingSection("tileset_info"))?;
        let (rows, cols) = dims.ok_or(MapError::MissingSection("map_dimensions"))?;
        let tiles = tiles.ok_or(MapError::MissingSection("map_data"))?;

        let map = TileMap::new(tileset, rows, cols, tiles)?;

        match walkable {
            Some(w) => map.with_walkable(w),
            None => Ok(map),
        }
    }
}

fn number<'a, T: FromStr>(
    words: &mut impl Iterator<Item = &'a str>,
    line: usize,
    key: &'static str,
) -> Result<T, MapError> {
    let word = words.next().ok_or(MapError::MalformedLine { line, key })?;

    word.parse().map_err(|_| MapError::InvalidNumber {
        line,
        value: word.to_string(),
    })
}

fn read_rows<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    rows: usize,
    cols: usize,
    section: &'static str,
) -> Result<Vec<(usize, &'a str)>, MapError> {
    let mut out = Vec::new();

    for got in 0..rows {
        let (line_no, row) = lines.next().ok_or(MapError::IncompleteData {
            section,
            expected: rows,
            got,
        })?;
        let row = row.trim();

        if row.chars().count() != cols {
            return Err(MapError::RowWidth {
                line: line_no,
                expected: cols,
                got: row.chars().count(),
            });
        }

        out.push((line_no, row));
    }

    Ok(out)
}

#[derive(Debug, Error)]
pub enum MapError {
    #[error("Could not read map file: {0}")]
    Input(#[from] std::io::Error),
    #[error("Missing `{0}` section")]
    MissingSection(&'static str),
    #[error("Line {line}: malformed `{key}` entry")]
    MalformedLine { line: usize, key: &'static str },
    #[error("Line {line}: `{value}` is not a valid number")]
    InvalidNumber { line: usize, value: String },
    #[error("Map data appears before `map_dimensions`")]
    DataBeforeDimensions,
    #[error("Incomplete `{section}`: expected {expected} rows, got {got}")]
    IncompleteData {
        section: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("Line {line}: expected {expected} columns, got {got}")]
    RowWidth {
        line: usize,
        expected: usize,
        got: usize,
    },
    #[error("Line {line}: `{ch}` is not a tile id")]
    InvalidTile { line: usize, ch: char },
    #[error("Tile id {id} outside of a tileset with {count} tiles")]
    TileOutOfRange { id: u8, count: u32 },
    #[error("`{0}` describes more tiles than can be addressed")]
    TooLarge(&'static str),
    #[error("Map has no tiles")]
    EmptyMap,
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: &str = "\
# test map
tileset_info: tiles.png 7 1 64 32
map_dimensions: 3 4

map_data:
1104
  0253
3111
";

    #[test]
    fn parses_keyed_format() {
        let map = TileMap::parse(MAP).unwrap();

        assert_eq!(map.tileset.path, PathBuf::from("tiles.png"));
        assert_eq!(map.tileset.tile_count(), Some(7));
        assert_eq!((map.rows(), map.cols()), (3, 4));
        assert_eq!(map.get(1, 2), Some(5));
        assert_eq!(map.get(3, 0), None);
        assert_eq!(map.find(4), Some((0, 3)));
        assert_eq!(map.count(1), 5);
        assert!(map.is_walkable(2, 3));
    }

    #[test]
    fn walkable_overlay() {
        let src = format!("{MAP}walkable_data:\nWWW.\nW..W\nWWWW\n");
        let map = TileMap::parse(&src).unwrap();

        assert!(map.is_walkable(0, 0));
        assert!(!map.is_walkable(0, 3));
        assert!(!map.is_walkable(1, 1));
    }

    #[test]
    fn wrong_row_width() {
        let src = "tileset_info: t.png 7 1 64 32\nmap_dimensions: 2 3\nmap_data:\n111\n11\n";

        match TileMap::parse(src) {
            Err(MapError::RowWidth { line, expected, got }) => {
                assert_eq!((line, expected, got), (5, 3, 2));
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn incomplete_and_missing_sections() {
        let src = "tileset_info: t.png 7 1 64 32\nmap_dimensions: 3 3\nmap_data:\n111\n";
        assert!(matches!(
            TileMap::parse(src),
            Err(MapError::IncompleteData { got: 1, .. })
        ));

        let src = "map_dimensions: 1 1\nmap_data:\n1\n";
        assert!(matches!(
            TileMap::parse(src),
            Err(MapError::MissingSection("tileset_info"))
        ));

        let src = "tileset_info: t.png 7 1 64 32\nmap_data:\n1\n";
        assert!(matches!(
            TileMap::parse(src),
            Err(MapError::DataBeforeDimensions)
        ));
    }

    #[test]
    fn invalid_values() {
        let src = "tileset_info: t.png seven 1 64 32\n";
        assert!(matches!(
            TileMap::parse(src),
            Err(MapError::InvalidNumber { line: 1, .. })
        ));

        let src = "tileset_info: t.png 7 1 64 32\nmap_dimensions: 1 2\nmap_data:\n1x\n";
        assert!(matches!(
            TileMap::parse(src),
            Err(MapError::InvalidTile { ch: 'x', .. })
        ));

        let src = "tileset_info: t.png 3 1 64 32\nmap_dimensions: 1 2\nmap_data:\n15\n";
        assert!(matches!(
            TileMap::parse(src),
            Err(MapError::TileOutOfRange { id: 5, count: 3 })
        ));
    }

    #[test]
    fn oversized_headers() {
        let src = "tileset_info: t.png 70000 70000 32 16\nmap_dimensions: 1 1\nmap_data:\n1\n";
        assert!(matches!(
            TileMap::parse(src),
            Err(MapError::TooLarge("tileset_info"))
        ));

        let src = format!(
            "tileset_info: t.png 7 1 64 32\nmap_dimensions: {} 2\nmap_data:\n11\n",
            usize::MAX
        );
        assert!(matches!(
            TileMap::parse(&src),
            Err(MapError::TooLarge("map_dimensions"))
        ));

        let src = "tileset_info: t.png 7 1 64 32\nmap_dimensions: 3000000000 2\nmap_data:\n11\n";
        assert!(matches!(
            TileMap::parse(src),
            Err(MapError::IncompleteData { got: 1, .. })
        ));
    }

    #[test]
    fn oversized_tileset_built_directly() {
        let tileset = TilesetInfo {
            path: PathBuf::from("t.png"),
            cols: u32::MAX,
            rows: 2,
            tile_width: 1,
            tile_height: 1,
        };

        assert!(matches!(
            TileMap::new(tileset, 1, 1, vec![0]),
            Err(MapError::TooLarge("tileset_info"))
        ));
    }

    #[test]
    fn cell_bounds() {
        let map = TileMap::parse(MAP).unwrap();

        assert_eq!(map.cell(0, 0), Some((0, 0)));
        assert_eq!(map.cell(-1, 0), None);
        assert_eq!(map.cell(2, 4), None);
    }
}
