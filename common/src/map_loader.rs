use std::path::Path;

use classroom::tile_map::{MapError, TileMap};

/// Map used by the iso exercise when no file is given. Its tileset path is
/// resolved against the assets directory.
pub const BUILTIN_MAP: &str = "\
tileset_info: tilesets/iso.png 7 1 96 48
map_dimensions: 3 3
map_data:
114
414
441
";

/// Reads a map file. A relative tileset path is taken relative to the map file.
pub fn load_map<P: AsRef<Path>>(path: P) -> Result<TileMap, MapError> {
    let path = path.as_ref();
    let src = std::fs::read_to_string(path)?;

    let mut map = TileMap::parse(&src)?;

    if map.tileset.path.is_relative() {
        if let Some(dir) = path.parent() {
            map.tileset.path = dir.join(&map.tileset.path);
        }
    }

    log::info!(
        "loaded {}x{} map from {}",
        map.rows(),
        map.cols(),
        path.display()
    );

    Ok(map)
}

/// The built-in map with its tileset placed under `assets`.
pub fn builtin_map<P: AsRef<Path>>(assets: P) -> Result<TileMap, MapError> {
    let mut map = TileMap::parse(BUILTIN_MAP)?;
    map.tileset.path = assets.as_ref().join(&map.tileset.path);

    Ok(map)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn builtin_map_parses() {
        let map = builtin_map("assets").unwrap();

        assert_eq!((map.rows(), map.cols()), (3, 3));
        assert_eq!(map.count(4), 5);
        assert_eq!(map.tileset.path, PathBuf::from("assets/tilesets/iso.png"));
        assert_eq!(map.tileset.tile_width, 96);
    }

    #[test]
    fn tileset_next_to_the_map() {
        let dir = std::env::temp_dir().join("classroom-map-loader-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("map.txt");
        std::fs::write(&path, BUILTIN_MAP).unwrap();

        let map = load_map(&path).unwrap();

        assert_eq!(map.tileset.path, dir.join("tilesets/iso.png"));
    }

    #[test]
    fn bundled_maps() {
        let maps = Path::new(env!("CARGO_MANIFEST_DIR")).join("../assets/maps");

        let walk = load_map(maps.join("map.txt")).unwrap();
        assert_eq!((walk.rows(), walk.cols()), (8, 8));
        assert_eq!(walk.count(0), 6);
        assert!(!walk.is_walkable(7, 0));
        assert!(walk.tileset.path.ends_with("tilesets/walk.png"));

        let iso = load_map(maps.join("iso.txt")).unwrap();
        assert_eq!(iso.tileset.tile_width, 96);
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            load_map("no/such/map.txt"),
            Err(MapError::Input(_))
        ));
    }
}
