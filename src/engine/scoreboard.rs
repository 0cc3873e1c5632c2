//! Scoreboard: one `PlayerScore` per seat, in seat order.

use serde::{Deserialize, Serialize};

use crate::engine::error::{GameError, GameResult};
use crate::engine::models::{PlayerId, PlayerScore};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    scores: Vec<PlayerScore>,
}

impl Scoreboard {
    pub fn new<I, S>(players: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PlayerId>,
    {
        Self {
            scores: players.into_iter().map(|p| PlayerScore::new(p)).collect(),
        }
    }

    fn entry_mut(&mut self, player_id: &str) -> GameResult<&mut PlayerScore> {
        self.scores
            .iter_mut()
            .find(|s| s.player_id == player_id)
            .ok_or_else(|| GameError::InvalidPlayer(player_id.to_string()))
    }

    pub fn increment(&mut self, player_id: &str, points: i64) -> GameResult<()> {
        self.entry_mut(player_id)?.increment_score(points)
    }

    pub fn score(&self, player_id: &str) -> GameResult<i64> {
        self.scores
            .iter()
            .find(|s| s.player_id == player_id)
            .map(|s| s.score())
            .ok_or_else(|| GameError::InvalidPlayer(player_id.to_string()))
    }

    pub fn scores(&self) -> &[PlayerScore] {
        &self.scores
    }

    /// Every player sharing the highest score, in seat order.
    pub fn leaders(&self) -> Vec<PlayerId> {
        let Some(best) = self.scores.iter().map(|s| s.score()).max() else {
            return Vec::new();
        };
        self.scores
            .iter()
            .filter(|s| s.score() == best)
            .map(|s| s.player_id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_known_player() {
        let mut board = Scoreboard::new(["alice", "bob"]);
        board.increment("bob", 4).unwrap();
        board.increment("bob", 2).unwrap();
        assert_eq!(board.score("bob"), Ok(6));
        assert_eq!(board.score("alice"), Ok(0));
    }

    #[test]
    fn test_unknown_player_is_rejected() {
        let mut board = Scoreboard::new(["alice"]);
        assert_eq!(
            board.increment("mallory", 3),
            Err(GameError::InvalidPlayer("mallory".into()))
        );
        assert!(board.score("mallory").is_err());
    }

    #[test]
    fn test_leaders_keep_seat_order_on_ties() {
        let mut board = Scoreboard::new(["alice", "bob", "carol"]);
        board.increment("carol", 5).unwrap();
        board.increment("alice", 5).unwrap();
        assert_eq!(board.leaders(), vec!["alice".to_string(), "carol".to_string()]);
    }
}
