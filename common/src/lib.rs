pub mod config;
pub mod image;
pub mod map_loader;
