//! The draw pile.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::engine::error::{GameError, GameResult};
use crate::games::carcassonne::tiles::Tile;

#[derive(Debug, Clone, Default)]
pub struct Bag {
    tiles: Vec<Tile>,
}

impl Bag {
    pub fn new(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Shuffle so the sequence of tiles always changes: two tiles are
    /// swapped, three or more are reshuffled until they differ from the
    /// pre-shuffle order. A bag whose tiles are all equal has no other order
    /// and is left alone.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        match self.tiles.len() {
            0 | 1 => {}
            2 => self.tiles.swap(0, 1),
            _ => {
                if self.tiles.iter().all(|t| *t == self.tiles[0]) {
                    return;
                }
                let original = self.tiles.clone();
                while self.tiles == original {
                    self.tiles.shuffle(rng);
                }
            }
        }
    }

    /// Take the next tile from the top of the bag.
    pub fn draw(&mut self) -> GameResult<Tile> {
        self.tiles.pop().ok_or(GameError::EmptyBag)
    }

    /// Tiles in draw order, last drawn first.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}
