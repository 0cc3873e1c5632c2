//! Error taxonomy shared by the board, feature tracing, players and game loop.

use thiserror::Error;

use crate::games::carcassonne::types::{Bearing, Coordinate};

pub type GameResult<T> = Result<T, GameError>;

/// Every failure is a deterministic precondition violation. The game loop
/// recovers from all of them by skipping the turn, except `EmptyBag` (normal
/// end of game) and `TileSource` (fatal at startup).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Invalid tile placement at {0}")]
    InvalidTilePlacement(Coordinate),

    #[error("No tile placed at {0}")]
    UnoccupiedCoordinate(Coordinate),

    #[error("No feature faces at {coordinate} facing {bearing}")]
    NoFeatureFaces {
        coordinate: Coordinate,
        bearing: Bearing,
    },

    #[error("No valid move for the drawn tile")]
    NoValidMove,

    #[error("No playable positions on the map")]
    NoPlayablePositions,

    #[error("Cannot score unoccupied coordinate {0}")]
    ScoringInvalidCoordinate(Coordinate),

    #[error("Score increments must be positive, got {0}")]
    InvalidScore(i64),

    #[error("Unknown player '{0}'")]
    InvalidPlayer(String),

    #[error("The bag is empty")]
    EmptyBag,

    #[error("Rotation must be a multiple of 90, got {0}")]
    InvalidRotation(i32),

    #[error("Invalid tile: {0}")]
    InvalidTile(String),

    #[error("Invalid coordinate key '{0}'")]
    InvalidCoordinate(String),

    #[error("Coordinate {0} is already part of this feature")]
    DuplicateFeatureTile(Coordinate),

    #[error("Tile source error: {0}")]
    TileSource(String),
}
