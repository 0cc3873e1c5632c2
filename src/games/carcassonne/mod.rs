pub mod types;
pub mod tiles;
pub mod tile_source;
pub mod board;
pub mod features;
pub mod scoring;
pub mod render;
