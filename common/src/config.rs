use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use classroom::sprite::{Placement, SpriteSheet};
use classroom::ScreenSize;

/// Settings for every exercise. Any field left out of the file keeps its default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub spawn: SpawnConfig,
    pub colors: ColorsConfig,
    pub sprites: SpritesConfig,
    pub character: CharacterConfig,
    pub parallax: ParallaxConfig,
    pub iso: IsoConfig,
    pub walk: WalkConfig,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let src = std::fs::read_to_string(path).map_err(ConfigError::Input)?;

        Self::parse(&src)
    }

    pub fn parse(src: &str) -> Result<Self, ConfigError> {
        json5::from_str(src).map_err(ConfigError::Format)
    }

    /// Loads the file when one is given, built-in defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                log::info!("loading configuration from {}", path.display());
                Self::load_from_path(path)
            }
            None => Ok(Self::default()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl WindowConfig {
    pub fn screen(&self) -> ScreenSize {
        ScreenSize::new(self.width as f32, self.height as f32)
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub size: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            size: classroom::triangles::DEFAULT_TRIANGLE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub tolerance: f32,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            tolerance: classroom::color_game::DEFAULT_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpritesConfig {
    pub textures: Vec<PathBuf>,
    pub placements: Vec<Placement>,
}

impl Default for SpritesConfig {
    fn default() -> Self {
        let placement = |x, y, w, h, rotation| Placement {
            position: [x, y],
            size: [w, h],
            rotation,
        };

        Self {
            textures: vec![
                PathBuf::from("sprites/1.png"),
                PathBuf::from("sprites/2.png"),
                PathBuf::from("sprites/3.png"),
                PathBuf::from("sprites/cart.png"),
            ],
            placements: vec![
                placement(100.0, 100.0, 100.0, 100.0, 45.0),
                placement(400.0, 300.0, 150.0, 150.0, 0.0),
                placement(600.0, 50.0, 200.0, 100.0, -30.0),
                placement(300.0, 450.0, 120.0, 80.0, 15.0),
            ],
        }
    }
}

/// Animated sprite sheet shared by the character and walk exercises.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    pub texture: PathBuf,
    pub rows: u32,
    pub cols: u32,
    pub fps: f32,
}

impl SheetConfig {
    pub fn sheet(&self) -> SpriteSheet {
        SpriteSheet::new(self.rows, self.cols)
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            texture: PathBuf::from("sprites/slime.png"),
            rows: 4,
            cols: 6,
            fps: 10.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    pub sheet: SheetConfig,
    pub size: [f32; 2],
    pub speed: f32,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            sheet: SheetConfig::default(),
            size: [64.0, 64.0],
            speed: 200.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LayerConfig {
    pub texture: PathBuf,
    pub factor: f32,
    #[serde(default = "enabled")]
    pub tiling: bool,
}

fn enabled() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub layers: Vec<LayerConfig>,
    pub player: PathBuf,
    pub player_size: [f32; 2],
    pub speed: f32,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        let layer = |texture: &str, factor| LayerConfig {
            texture: PathBuf::from(texture),
            factor,
            tiling: true,
        };

        Self {
            layers: vec![
                layer("parallax/far.png", 0.1),
                layer("parallax/mid.png", 0.4),
                layer("parallax/close.png", 0.8),
            ],
            player: PathBuf::from("parallax/character.png"),
            player_size: [64.0, 64.0],
            speed: classroom::parallax::DEFAULT_SPEED,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IsoConfig {
    /// Map file; the built-in map is used when absent.
    pub map: Option<PathBuf>,
    pub scale: f32,
}

impl Default for IsoConfig {
    fn default() -> Self {
        Self {
            map: None,
            scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    pub map: PathBuf,
    pub scale: f32,
    pub sheet: SheetConfig,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            map: PathBuf::from("maps/map.txt"),
            scale: 2.0,
            sheet: SheetConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read configuration: {0}")]
    Input(std::io::Error),
    #[error("Invalid configuration: {0}")]
    Format(json5::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_keeps_defaults() {
        let config = Config::parse("{}").unwrap();

        assert_eq!(config.window.width, 800);
        assert_eq!(config.colors.tolerance, 0.2);
        assert_eq!(config.sprites.placements.len(), 4);
        assert_eq!(config.parallax.layers.len(), 3);
        assert_eq!(config.walk.scale, 2.0);
        assert!(config.iso.map.is_none());
    }

    #[test]
    fn partial_sections() {
        let config = Config::parse(
            r#"{
                // comments are fine in json5
                colors: { tolerance: 0.35 },
                character: { sheet: { rows: 0, fps: 4 } },
                parallax: {
                    layers: [{ texture: "sky.png", factor: 0.05 }],
                },
                sprites: { placements: [{ position: [1, 2], size: [3, 4] }] },
            }"#,
        )
        .unwrap();

        assert_eq!(config.colors.tolerance, 0.35);
        assert_eq!(config.character.sheet.fps, 4.0);
        assert_eq!(config.character.sheet.cols, 6);
        assert_eq!(config.character.sheet.sheet(), SpriteSheet::new(1, 6));
        assert!(config.parallax.layers[0].tiling);
        assert_eq!(config.sprites.placements[0].rotation, 0.0);
    }

    #[test]
    fn bundled_example_parses() {
        let config = Config::parse(include_str!("../../assets/config.json5")).unwrap();

        assert_eq!(config.spawn.size, 30.0);
        assert_eq!(config.character.size, [96.0, 96.0]);
        assert_eq!(config.iso.map, Some(PathBuf::from("maps/iso.txt")));
        assert_eq!(config.parallax.player, PathBuf::from("parallax/character.png"));
    }

    #[test]
    fn format_errors() {
        assert!(matches!(
            Config::parse("{ colors: { tolerance: \"high\" } }"),
            Err(ConfigError::Format(_))
        ));
        assert!(matches!(
            Config::load_from_path("does/not/exist.json5"),
            Err(ConfigError::Input(_))
        ));
    }
}
