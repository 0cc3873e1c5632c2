//! Core engine data types: turn actions and per-player scores.

use serde::{Deserialize, Serialize};

use crate::engine::error::{GameError, GameResult};
use crate::games::carcassonne::board::Map;
use crate::games::carcassonne::scoring::ScoringService;
use crate::games::carcassonne::tiles::Tile;
use crate::games::carcassonne::types::Coordinate;

pub type PlayerId = String;

/// Place the drawn tile, rotated by `rotation` degrees, at `coordinate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub coordinate: Coordinate,
    pub rotation: i32,
}

impl Action {
    pub fn new(coordinate: Coordinate, rotation: i32) -> Self {
        Self { coordinate, rotation }
    }

    /// Rotate `tile` and place it on `map`.
    pub fn run(&self, map: &mut Map, mut tile: Tile) -> GameResult<()> {
        tile.rotate_to(self.rotation)?;
        map.place(tile, self.coordinate)
    }

    /// Score the placement. Only meaningful after `run` succeeded on `map`.
    pub fn score(&self, map: &Map, scoring: &ScoringService) -> GameResult<u32> {
        scoring.calculate_score(map, self.coordinate)
    }
}

/// Cumulative score of one player. Only ever grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub player_id: PlayerId,
    score: i64,
}

impl PlayerScore {
    pub fn new(player_id: impl Into<PlayerId>) -> Self {
        Self {
            player_id: player_id.into(),
            score: 0,
        }
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn increment_score(&mut self, points: i64) -> GameResult<()> {
        if points <= 0 {
            return Err(GameError::InvalidScore(points));
        }
        self.score += points;
        Ok(())
    }
}
