//! Scoring for a freshly placed tile.

use crate::engine::error::{GameError, GameResult};
use super::board::Map;
use super::features::create_features;
use super::types::Coordinate;

/// Scores the features completed around a coordinate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringService;

impl ScoringService {
    pub fn new() -> Self {
        Self
    }

    /// Sum `tile_count × tile_value` over every complete feature touching
    /// `coordinate`. Cloisters are not scored.
    pub fn calculate_score(&self, map: &Map, coordinate: Coordinate) -> GameResult<u32> {
        if !map.is_occupied(coordinate) {
            return Err(GameError::ScoringInvalidCoordinate(coordinate));
        }
        let features = create_features(map, coordinate)?;
        Ok(features.iter().map(|f| f.points()).sum())
    }
}
