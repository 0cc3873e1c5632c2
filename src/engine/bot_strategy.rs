//! Player trait and bot strategy implementations.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::engine::error::{GameError, GameResult};
use crate::engine::models::Action;
use crate::games::carcassonne::board::Map;
use crate::games::carcassonne::scoring::ScoringService;
use crate::games::carcassonne::tiles::Tile;

pub const ROTATIONS: [i32; 4] = [0, 90, 180, 270];

/// A seat at the table: picks where the drawn tile goes.
pub trait Player: Send {
    fn name(&self) -> &str;

    /// Propose an action for `tile` on `map`. The map is never modified.
    fn play_turn(&mut self, map: &Map, tile: &Tile) -> GameResult<Action>;
}

/// Which built-in strategy a seat uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// First legal placement over a shuffled frontier.
    Random,
    /// Best immediate score over every placement.
    Exhaustive,
}

impl StrategyKind {
    pub fn build(self, name: &str, seed: Option<u64>) -> Box<dyn Player> {
        match self {
            StrategyKind::Random => match seed {
                Some(seed) => Box::new(RandomStrategy::with_seed(name, seed)),
                None => Box::new(RandomStrategy::new(name)),
            },
            StrategyKind::Exhaustive => Box::new(ExhaustiveStrategy::new(name)),
        }
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" | "first_fit" => Ok(StrategyKind::Random),
            "exhaustive" | "greedy" => Ok(StrategyKind::Exhaustive),
            other => Err(format!("unknown strategy '{other}'")),
        }
    }
}

/// Positions are shuffled, then each is tried at every rotation; the first
/// legal placement wins.
pub struct RandomStrategy {
    name: String,
    rng: StdRng,
}

impl RandomStrategy {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Player for RandomStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn play_turn(&mut self, map: &Map, tile: &Tile) -> GameResult<Action> {
        let mut positions = map.playable_positions();
        if positions.is_empty() {
            return Err(GameError::NoPlayablePositions);
        }
        positions.shuffle(&mut self.rng);

        for coordinate in positions {
            for rotation in ROTATIONS {
                let mut candidate = tile.clone();
                candidate.rotate_to(rotation)?;
                if map.can_place(&candidate, coordinate) {
                    return Ok(Action::new(coordinate, rotation));
                }
            }
        }
        Err(GameError::NoValidMove)
    }
}

/// Tries every position and rotation on a scratch copy of the map and keeps
/// the highest-scoring one. Ties go to the first found.
pub struct ExhaustiveStrategy {
    name: String,
    scoring: ScoringService,
}

impl ExhaustiveStrategy {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scoring: ScoringService::new(),
        }
    }
}

impl Player for ExhaustiveStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn play_turn(&mut self, map: &Map, tile: &Tile) -> GameResult<Action> {
        let positions = map.playable_positions();
        if positions.is_empty() {
            return Err(GameError::NoPlayablePositions);
        }

        let mut best: Option<(Action, u32)> = None;
        for coordinate in positions {
            for rotation in ROTATIONS {
                let action = Action::new(coordinate, rotation);
                let mut trial = map.clone();
                if action.run(&mut trial, tile.clone()).is_err() {
                    continue;
                }
                let score = action.score(&trial, &self.scoring)?;
                if best.map_or(true, |(_, top)| score > top) {
                    best = Some((action, score));
                }
            }
        }

        best.map(|(action, _)| action).ok_or(GameError::NoValidMove)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::carcassonne::types::Coordinate;

    fn tile(s: &str) -> Tile {
        s.parse().unwrap()
    }

    /// Start tile with city north and grass elsewhere. A tile without grass
    /// edges can only go north of it, with its city facing south.
    fn city_cap_map() -> Map {
        Map::new(tile("C:G:G:G:G"))
    }

    #[test]
    fn test_random_finds_legal_move() {
        let map = Map::new(tile("C:R:G:R:R"));
        let mut bot = RandomStrategy::with_seed("r", 42);
        let action = bot.play_turn(&map, &tile("R:G:R:G:R")).unwrap();

        let mut trial = map.clone();
        action.run(&mut trial, tile("R:G:R:G:R")).unwrap();
        assert_eq!(trial.len(), 2);
    }

    #[test]
    fn test_random_is_reproducible_with_seed() {
        let map = Map::new(tile("R:R:R:R:G"));
        let mut a = RandomStrategy::with_seed("a", 7);
        let mut b = RandomStrategy::with_seed("b", 7);
        let t = tile("R:G:G:G:G");
        assert_eq!(a.play_turn(&map, &t), b.play_turn(&map, &t));
    }

    #[test]
    fn test_random_single_legal_action() {
        let map = city_cap_map();
        let mut bot = RandomStrategy::with_seed("r", 3);
        assert_eq!(
            bot.play_turn(&map, &tile("C:R:R:R:R")),
            Ok(Action::new(Coordinate::new(0, 1), 180))
        );
    }

    #[test]
    fn test_random_no_valid_move() {
        let mut bot = RandomStrategy::with_seed("r", 1);
        assert_eq!(
            bot.play_turn(&city_cap_map(), &tile("R:R:R:R:G")),
            Err(GameError::NoValidMove)
        );
    }

    #[test]
    fn test_exhaustive_single_legal_action() {
        let action = ExhaustiveStrategy::new("e")
            .play_turn(&city_cap_map(), &tile("C:R:R:R:R"))
            .unwrap();
        assert_eq!(action, Action::new(Coordinate::new(0, 1), 180));
    }

    #[test]
    fn test_exhaustive_prefers_highest_score() {
        let map = Map::new(tile("C:R:G:R:R"));
        let cap = tile("C:G:G:G:G");
        let action = ExhaustiveStrategy::new("e").play_turn(&map, &cap).unwrap();
        // Closing the start tile's city is the only scoring move.
        assert_eq!(action, Action::new(Coordinate::new(0, 1), 180));

        let mut trial = map.clone();
        action.run(&mut trial, cap).unwrap();
        assert_eq!(action.score(&trial, &ScoringService), Ok(4));
    }

    #[test]
    fn test_exhaustive_no_valid_move() {
        let mut bot = ExhaustiveStrategy::new("e");
        assert_eq!(
            bot.play_turn(&city_cap_map(), &tile("R:R:R:R:G")),
            Err(GameError::NoValidMove)
        );
    }

    #[test]
    fn test_empty_frontier_has_no_playable_positions() {
        let empty = Map::default();
        let t = tile("C:G:G:G:G");
        assert_eq!(
            ExhaustiveStrategy::new("e").play_turn(&empty, &t),
            Err(GameError::NoPlayablePositions)
        );
        assert_eq!(
            RandomStrategy::with_seed("r", 0).play_turn(&empty, &t),
            Err(GameError::NoPlayablePositions)
        );
    }

    #[test]
    fn test_strategy_kind_parse() {
        assert_eq!("random".parse::<StrategyKind>(), Ok(StrategyKind::Random));
        assert_eq!("exhaustive".parse::<StrategyKind>(), Ok(StrategyKind::Exhaustive));
        assert!("mcts".parse::<StrategyKind>().is_err());
        assert_eq!(StrategyKind::Exhaustive.build("x", None).name(), "x");
    }
}
