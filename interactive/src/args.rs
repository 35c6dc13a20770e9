use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use classroom::triangles::VertexSpace;
use classroom_common::config::Config;

#[derive(Debug, Parser)]
#[command(about = "Computer graphics classroom exercises")]
pub struct Args {
    /// Exercise configuration file (json5)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Directory textures and maps are looked up in
    #[arg(long, global = true, default_value_os_t = PathBuf::from("assets"))]
    pub assets: PathBuf,
    /// Seed for random colors, taken from the OS when absent
    #[arg(long, global = true)]
    pub seed: Option<u64>,
    /// Log filter, env_logger syntax (overrides RUST_LOG)
    #[arg(long, global = true)]
    pub log: Option<String>,
    #[command(subcommand)]
    pub exercise: Exercise,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Exercise {
    /// Five fixed triangles in normalized device coordinates
    Triangles,
    /// Left click spawns a triangle, C clears them
    Spawn {
        /// Triangle size in pixels
        #[arg(long)]
        size: Option<f32>,
    },
    /// Every three left clicks make a triangle
    Clicks {
        /// Space the clicked vertices are stored in
        #[arg(long, value_enum, default_value_t = SpaceArg::Screen)]
        space: SpaceArg,
    },
    /// Eliminate similarly colored tiles, R restarts
    Colors {
        /// Normalized color distance still counted as similar
        #[arg(long)]
        tolerance: Option<f32>,
    },
    /// Static textured sprites
    Sprites,
    /// Animated character moved with WASD
    Character {
        /// Animation frames per second
        #[arg(long)]
        fps: Option<f32>,
        /// Movement speed in pixels per second
        #[arg(long)]
        speed: Option<f32>,
    },
    /// Parallax scrolling layers, WASD moves the character
    Parallax {
        /// Movement speed in pixels per second
        #[arg(long)]
        speed: Option<f32>,
    },
    /// Cursor over an isometric map, WASD/QEZC move it
    Iso {
        /// Map file, a built-in map is used when absent
        #[arg(long)]
        map: Option<PathBuf>,
        /// Tile scale factor
        #[arg(long)]
        scale: Option<f32>,
    },
    /// Collect every coin without touching lava, R restarts
    Walk {
        /// Map file
        #[arg(long)]
        map: Option<PathBuf>,
        /// Tile scale factor
        #[arg(long)]
        scale: Option<f32>,
    },
}

impl Exercise {
    /// Writes the command line overrides into the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        match self {
            Exercise::Spawn { size: Some(size) } => config.spawn.size = *size,
            Exercise::Colors {
                tolerance: Some(tolerance),
            } => config.colors.tolerance = *tolerance,
            Exercise::Character { fps, speed } => {
                if let Some(fps) = fps {
                    config.character.sheet.fps = *fps;
                }
                if let Some(speed) = speed {
                    config.character.speed = *speed;
                }
            }
            Exercise::Parallax { speed: Some(speed) } => config.parallax.speed = *speed,
            Exercise::Iso { map, scale } => {
                if map.is_some() {
                    config.iso.map = map.clone();
                }
                if let Some(scale) = scale {
                    config.iso.scale = *scale;
                }
            }
            Exercise::Walk { map, scale } => {
                if let Some(map) = map {
                    config.walk.map = map.clone();
                }
                if let Some(scale) = scale {
                    config.walk.scale = *scale;
                }
            }
            _ => {}
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Exercise::Triangles => "Triangles",
            Exercise::Spawn { .. } => "Spawn triangles",
            Exercise::Clicks { .. } => "Click triangles",
            Exercise::Colors { .. } => "Color game",
            Exercise::Sprites => "Sprites",
            Exercise::Character { .. } => "Animated character",
            Exercise::Parallax { .. } => "Parallax",
            Exercise::Iso { .. } => "Isometric map",
            Exercise::Walk { .. } => "Tile walk",
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum SpaceArg {
    Screen,
    Ndc,
}

impl From<SpaceArg> for VertexSpace {
    fn from(s: SpaceArg) -> Self {
        match s {
            SpaceArg::Screen => Self::Screen,
            SpaceArg::Ndc => Self::Ndc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_reach_the_config() {
        let args = Args::parse_from(["classroom", "colors", "--tolerance", "0.4", "--seed", "3"]);
        let mut config = Config::default();

        args.exercise.apply(&mut config);

        assert_eq!(config.colors.tolerance, 0.4);
        assert_eq!(args.seed, Some(3));
    }

    #[test]
    fn walk_map_override() {
        let args = Args::parse_from(["classroom", "--assets", "data", "walk", "--map", "m.txt"]);
        let mut config = Config::default();

        args.exercise.apply(&mut config);

        assert_eq!(config.walk.map, PathBuf::from("m.txt"));
        assert_eq!(config.walk.scale, 2.0);
        assert_eq!(args.assets, PathBuf::from("data"));
    }

    #[test]
    fn clicks_space() {
        let args = Args::parse_from(["classroom", "clicks", "--space", "ndc"]);

        match args.exercise {
            Exercise::Clicks { space } => {
                assert_eq!(VertexSpace::from(space), VertexSpace::Ndc)
            }
            other => panic!("parsed {other:?}"),
        }
    }
}
