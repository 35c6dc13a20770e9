use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(about = "Headless tools for the classroom exercises")]
pub struct Args {
    /// Log filter, env_logger syntax
    #[arg(long, global = true, default_value = "warn")]
    pub log: String,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse a map file and print a summary
    CheckMap {
        /// Path to the map file
        #[arg()]
        map: PathBuf,
    },
    /// Replay moves on the tile walking game
    Walk {
        /// Path to the map file
        #[arg()]
        map: PathBuf,
        /// Keys to press in order: w a s d q e z c, r restarts
        #[arg(short, long)]
        moves: String,
    },
    /// Play the color game with a fixed seed
    Colors {
        /// Seed for the tile colors
        #[arg(short, long, default_value_t = 0)]
        seed: u64,
        /// Clicks as `x,y` pixel pairs separated by spaces
        #[arg(short, long, num_args = 1.., value_delimiter = ' ')]
        clicks: Vec<String>,
        /// Normalized color distance still counted as similar
        #[arg(short, long, default_value_t = classroom::color_game::DEFAULT_TOLERANCE)]
        tolerance: f32,
    },
}
