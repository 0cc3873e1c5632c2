//! Plain-text rendering of a map, one fixed-width cell per coordinate.
//!
//! ```text
//! +-C-+
//! R R R
//! +---+
//! ```
//!
//! Grass edges are drawn as dashes (top/bottom) or bars (sides); every other
//! face shows its code.

use super::board::Map;
use super::types::{Bearing, Coordinate, Face};

const CELL_WIDTH: usize = 5;

#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer {
    /// Mark playable positions with a dot.
    pub show_frontier: bool,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frontier(mut self) -> Self {
        self.show_frontier = true;
        self
    }

    pub fn render(&self, map: &Map) -> String {
        let bounds = map.bounds();
        let frontier = if self.show_frontier {
            map.playable_positions()
        } else {
            Vec::new()
        };

        // Frontier cells sit one step outside the tile bounds.
        let pad = i32::from(self.show_frontier);
        let (min_x, max_x) = (bounds.bottom_left.x - pad, bounds.top_right.x + pad);
        let (min_y, max_y) = (bounds.bottom_left.y - pad, bounds.top_right.y + pad);

        let mut out = String::new();
        for y in (min_y..=max_y).rev() {
            let mut lines = [String::new(), String::new(), String::new()];
            for x in min_x..=max_x {
                let c = Coordinate::new(x, y);
                let cell = match map.look(c) {
                    Ok(tile) => {
                        let code = |b: Bearing, grass: char| match tile.edge(b) {
                            Face::Grass => grass,
                            face => face.code(),
                        };
                        let center = match tile.center() {
                            Face::Grass => ' ',
                            face => face.code(),
                        };
                        [
                            format!("+-{}-+", code(Bearing::North, '-')),
                            format!("{} {} {}", code(Bearing::West, '|'), center, code(Bearing::East, '|')),
                            format!("+-{}-+", code(Bearing::South, '-')),
                        ]
                    }
                    Err(_) if frontier.contains(&c) => {
                        ["     ".to_string(), "  .  ".to_string(), "     ".to_string()]
                    }
                    Err(_) => [" ".repeat(CELL_WIDTH), " ".repeat(CELL_WIDTH), " ".repeat(CELL_WIDTH)],
                };
                for (line, part) in lines.iter_mut().zip(cell) {
                    line.push_str(&part);
                }
            }
            for line in lines {
                out.push_str(line.trim_end());
                out.push('\n');
            }
        }
        out
    }
}
