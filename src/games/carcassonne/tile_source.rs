//! Tile sources: where the bag gets its tiles from.
//!
//! Tile sets are described in a small ini-style format, one tile per line:
//!
//! ```text
//! [tiles]
//! ; comment
//! tiles[] = "C:R:G:R:R"
//! ```

use std::path::PathBuf;

use once_cell::sync::Lazy;

use crate::engine::error::{GameError, GameResult};
use super::tiles::Tile;

/// Supplies the full list of tiles for a game. Consumed once at startup.
pub trait TileSource {
    fn find_all(&self) -> GameResult<Vec<Tile>>;
}

const BASE_TILE_SET: &str = include_str!("../../../data/tiles.ini");

static BASE_TILES: Lazy<GameResult<Vec<Tile>>> = Lazy::new(|| parse_tile_set(BASE_TILE_SET));

/// The 72-tile base game, embedded in the binary.
pub struct CatalogTileSource;

impl TileSource for CatalogTileSource {
    fn find_all(&self) -> GameResult<Vec<Tile>> {
        BASE_TILES.clone()
    }
}

/// Reads a tile set from an ini file on disk.
pub struct IniTileSource {
    path: PathBuf,
}

impl IniTileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TileSource for IniTileSource {
    fn find_all(&self) -> GameResult<Vec<Tile>> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            GameError::TileSource(format!("failed to read {}: {}", self.path.display(), e))
        })?;
        let tiles = parse_tile_set(&content).map_err(|e| match e {
            GameError::TileSource(msg) => {
                GameError::TileSource(format!("{}: {}", self.path.display(), msg))
            }
            other => other,
        })?;
        tracing::debug!(path = %self.path.display(), count = tiles.len(), "loaded tile set");
        Ok(tiles)
    }
}

/// Parse an ini tile set. Any line that is not blank, a comment, a section
/// header or a `tiles[]` entry aborts the whole load.
pub fn parse_tile_set(content: &str) -> GameResult<Vec<Tile>> {
    let mut tiles = Vec::new();
    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') && line.ends_with(']') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(GameError::TileSource(format!("line {line_no}: expected 'tiles[] = ...'")));
        };
        if key.trim() != "tiles[]" {
            return Err(GameError::TileSource(format!(
                "line {line_no}: unknown key '{}'",
                key.trim()
            )));
        }

        let value = value.trim();
        let faces = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .ok_or_else(|| {
                GameError::TileSource(format!("line {line_no}: value must be quoted, got {value}"))
            })?;
        let tile = faces
            .parse::<Tile>()
            .map_err(|e| GameError::TileSource(format!("line {line_no}: {e}")))?;
        tiles.push(tile);
    }
    Ok(tiles)
}
