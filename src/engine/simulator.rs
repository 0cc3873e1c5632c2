//! Synchronous game loop: draw, ask the seated player, place, score.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::bag::Bag;
use crate::engine::bot_strategy::Player;
use crate::engine::error::{GameError, GameResult};
use crate::engine::models::{Action, PlayerId, PlayerScore};
use crate::engine::scoreboard::Scoreboard;
use crate::games::carcassonne::board::Map;
use crate::games::carcassonne::scoring::ScoringService;
use crate::games::carcassonne::tile_source::TileSource;
use crate::games::carcassonne::tiles::Tile;

/// What happened on one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Placed {
        player_id: PlayerId,
        action: Action,
        points: u32,
    },
    /// The player failed to produce a legal action. Its tile is discarded.
    Skipped {
        player_id: PlayerId,
        reason: GameError,
    },
}

/// Final standings once the bag is empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSummary {
    pub scores: Vec<PlayerScore>,
    pub winners: Vec<PlayerId>,
    pub turns: usize,
    pub skipped_turns: usize,
    pub tiles_placed: usize,
}

pub struct Game {
    map: Map,
    bag: Bag,
    players: Vec<Box<dyn Player>>,
    scoreboard: Scoreboard,
    scoring: ScoringService,
    current_player_index: usize,
    turns: usize,
    skipped_turns: usize,
}

impl Game {
    /// Fill the bag from `source`, shuffle it, and lay the first drawn tile
    /// at the origin.
    pub fn new<R: Rng + ?Sized>(
        source: &dyn TileSource,
        players: Vec<Box<dyn Player>>,
        rng: &mut R,
    ) -> GameResult<Self> {
        Self::with_tiles(source.find_all()?, players, rng)
    }

    pub fn with_tiles<R: Rng + ?Sized>(
        tiles: Vec<Tile>,
        players: Vec<Box<dyn Player>>,
        rng: &mut R,
    ) -> GameResult<Self> {
        let mut bag = Bag::new(tiles);
        bag.shuffle(rng);
        let start = bag.draw()?;
        tracing::debug!(start = %start, bag = bag.len(), "starting tile placed");
        Self::from_parts(Map::new(start), bag, players)
    }

    /// Assemble a game from an existing map and bag. At least one player is
    /// required and player names must be unique.
    pub fn from_parts(map: Map, bag: Bag, players: Vec<Box<dyn Player>>) -> GameResult<Self> {
        if players.is_empty() {
            return Err(GameError::InvalidPlayer("a game needs at least one player".into()));
        }
        for (i, p) in players.iter().enumerate() {
            if players[..i].iter().any(|other| other.name() == p.name()) {
                return Err(GameError::InvalidPlayer(p.name().to_string()));
            }
        }
        let scoreboard = Scoreboard::new(players.iter().map(|p| p.name().to_string()));
        Ok(Self {
            map,
            bag,
            players,
            scoreboard,
            scoring: ScoringService::new(),
            current_player_index: 0,
            turns: 0,
            skipped_turns: 0,
        })
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn tiles_remaining(&self) -> usize {
        self.bag.len()
    }

    /// Play one turn. Fails only with `EmptyBag`, which ends the game; every
    /// other failure skips the turn.
    pub fn play_turn(&mut self) -> GameResult<TurnOutcome> {
        let tile = self.bag.draw()?;
        let seat = self.current_player_index;
        self.current_player_index = (seat + 1) % self.players.len();
        self.turns += 1;
        let player = &mut self.players[seat];

        let player_id = player.name().to_string();
        let placed = player.play_turn(&self.map, &tile).and_then(|action| {
            action.run(&mut self.map, tile.clone())?;
            let points = action.score(&self.map, &self.scoring)?;
            Ok((action, points))
        });

        match placed {
            Ok((action, points)) => {
                if points > 0 {
                    self.scoreboard.increment(&player_id, i64::from(points))?;
                }
                tracing::debug!(
                    player = %player_id,
                    tile = %tile,
                    coordinate = %action.coordinate,
                    rotation = action.rotation,
                    points,
                    "tile placed"
                );
                Ok(TurnOutcome::Placed {
                    player_id,
                    action,
                    points,
                })
            }
            Err(reason) => {
                self.skipped_turns += 1;
                tracing::warn!(player = %player_id, tile = %tile, error = %reason, "turn skipped, tile discarded");
                Ok(TurnOutcome::Skipped { player_id, reason })
            }
        }
    }

    /// Play until the bag is empty.
    pub fn run(&mut self) -> GameSummary {
        loop {
            match self.play_turn() {
                Ok(_) => {}
                Err(GameError::EmptyBag) => break,
                Err(e) => {
                    tracing::error!(error = %e, "game aborted");
                    break;
                }
            }
        }
        let summary = self.summary();
        tracing::info!(
            turns = summary.turns,
            skipped = summary.skipped_turns,
            tiles = summary.tiles_placed,
            winners = ?summary.winners,
            "game over"
        );
        summary
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            scores: self.scoreboard.scores().to_vec(),
            winners: self.scoreboard.leaders(),
            turns: self.turns,
            skipped_turns: self.skipped_turns,
            tiles_placed: self.map.len(),
        }
    }
}
