//! Bot-vs-bot arena runner. Games are independent and run in parallel.

use std::collections::BTreeMap;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;

use crate::engine::bot_profiles::PlayerProfile;
use crate::engine::bot_strategy::Player;
use crate::engine::error::{GameError, GameResult};
use crate::engine::simulator::{Game, GameSummary};
use crate::games::carcassonne::tiles::Tile;

/// Aggregated results from an arena run.
#[derive(Debug, Clone, Serialize)]
pub struct ArenaResult {
    pub num_games: usize,
    pub wins: BTreeMap<String, usize>,
    pub draws: usize,
    pub total_scores: BTreeMap<String, Vec<f64>>,
    pub game_durations_ms: Vec<f64>,
}

impl ArenaResult {
    fn new(names: &[&str], num_games: usize) -> Self {
        Self {
            num_games,
            wins: names.iter().map(|n| (n.to_string(), 0)).collect(),
            draws: 0,
            total_scores: names.iter().map(|n| (n.to_string(), Vec::new())).collect(),
            game_durations_ms: Vec::with_capacity(num_games),
        }
    }

    fn record(&mut self, summary: &GameSummary, elapsed_ms: f64) {
        self.game_durations_ms.push(elapsed_ms);
        for score in &summary.scores {
            if let Some(scores) = self.total_scores.get_mut(&score.player_id) {
                scores.push(score.score() as f64);
            }
        }
        match summary.winners.as_slice() {
            [winner] => {
                if let Some(wins) = self.wins.get_mut(winner) {
                    *wins += 1;
                }
            }
            _ => self.draws += 1,
        }
    }

    pub fn win_rate(&self, name: &str) -> f64 {
        self.wins.get(name).copied().unwrap_or(0) as f64 / self.num_games.max(1) as f64
    }

    pub fn avg_score(&self, name: &str) -> f64 {
        match self.total_scores.get(name) {
            Some(s) if !s.is_empty() => s.iter().sum::<f64>() / s.len() as f64,
            _ => 0.0,
        }
    }

    pub fn score_stddev(&self, name: &str) -> f64 {
        let scores = match self.total_scores.get(name) {
            Some(s) if s.len() >= 2 => s,
            _ => return 0.0,
        };
        let avg = self.avg_score(name);
        let variance = scores.iter().map(|s| (s - avg).powi(2)).sum::<f64>() / (scores.len() - 1) as f64;
        variance.sqrt()
    }

    /// Wilson score interval on the win rate.
    pub fn confidence_interval_95(&self, name: &str) -> (f64, f64) {
        let n = self.num_games as f64;
        if self.num_games == 0 {
            return (0.0, 0.0);
        }
        let p = self.win_rate(name);
        let z = 1.96_f64;
        let denom = 1.0 + z * z / n;
        let center = (p + z * z / (2.0 * n)) / denom;
        let margin = z * ((p * (1.0 - p) + z * z / (4.0 * n)) / n).sqrt() / denom;
        ((center - margin).max(0.0), (center + margin).min(1.0))
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![format!("Arena Results ({} games)", self.num_games)];
        lines.push("=".repeat(60));
        for (name, wins) in &self.wins {
            let (ci_lo, ci_hi) = self.confidence_interval_95(name);
            lines.push(format!(
                "  {:>12}: {:3} wins ({:5.1}%)  [95% CI: {:.1}%-{:.1}%]  avg={:5.1} +/- {:4.1}",
                name,
                wins,
                self.win_rate(name) * 100.0,
                ci_lo * 100.0,
                ci_hi * 100.0,
                self.avg_score(name),
                self.score_stddev(name),
            ));
        }
        lines.push(format!("  {:>12}: {}", "Draws", self.draws));
        if !self.game_durations_ms.is_empty() {
            let total_ms = self.game_durations_ms.iter().sum::<f64>();
            lines.push(format!(
                "  Avg game: {:.0}ms  |  Total: {:.1}s",
                total_ms / self.game_durations_ms.len() as f64,
                total_ms / 1000.0
            ));
        }
        lines.join("\n")
    }
}

/// Arena settings shared by every game.
#[derive(Debug, Clone, Copy)]
pub struct ArenaConfig {
    pub num_games: usize,
    pub base_seed: u64,
    /// Rotate the seating by one seat per game.
    pub alternate_seats: bool,
}

/// Seat order for game `game_idx`.
fn seating<'a>(entrants: &'a [(String, PlayerProfile)], game_idx: usize, alternate: bool) -> Vec<&'a (String, PlayerProfile)> {
    let n = entrants.len();
    let offset = if alternate { game_idx % n } else { 0 };
    (0..n).map(|i| &entrants[(i + offset) % n]).collect()
}

fn play_one_game(
    tiles: &[Tile],
    entrants: &[(String, PlayerProfile)],
    seed: u64,
    game_idx: usize,
    alternate_seats: bool,
) -> GameResult<(GameSummary, f64)> {
    let players: Vec<Box<dyn Player>> = seating(entrants, game_idx, alternate_seats)
        .into_iter()
        .enumerate()
        .map(|(seat, (name, profile))| profile.build(name, Some(seed.wrapping_add(seat as u64 + 1))))
        .collect();

    let t0 = Instant::now();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = Game::with_tiles(tiles.to_vec(), players, &mut rng)?;
    let summary = game.run();
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0;
    tracing::debug!(game = game_idx, seed, winners = ?summary.winners, elapsed_ms, "arena game finished");
    Ok((summary, elapsed_ms))
}

/// Play `config.num_games` games between `entrants`, game `i` seeded with
/// `base_seed + i`.
pub fn run_arena(
    tiles: &[Tile],
    entrants: &[(String, PlayerProfile)],
    config: ArenaConfig,
) -> GameResult<ArenaResult> {
    if entrants.is_empty() {
        return Err(GameError::InvalidPlayer("arena needs at least one entrant".into()));
    }

    let games: Vec<(GameSummary, f64)> = (0..config.num_games)
        .into_par_iter()
        .map(|game_idx| {
            let seed = config.base_seed.wrapping_add(game_idx as u64);
            play_one_game(tiles, entrants, seed, game_idx, config.alternate_seats)
        })
        .collect::<GameResult<_>>()?;

    let names: Vec<&str> = entrants.iter().map(|(name, _)| name.as_str()).collect();
    let mut result = ArenaResult::new(&names, config.num_games);
    for (summary, elapsed_ms) in &games {
        result.record(summary, *elapsed_ms);
    }
    tracing::info!(games = result.num_games, draws = result.draws, wins = ?result.wins, "arena finished");
    Ok(result)
}
