//! Tiles: four edge faces plus a centre, rotatable in 90° steps.

use std::fmt;
use std::str::FromStr;

use crate::engine::error::{GameError, GameResult};
use super::types::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Edges indexed by bearing: N=0, E=1, S=2, W=3. Already rotated.
    edges: [Face; 4],
    center: Face,
    rotation: u32,
}

impl Tile {
    /// Build a tile from its faces. A cloister may only sit in the centre.
    pub fn new(north: Face, east: Face, south: Face, west: Face, center: Face) -> GameResult<Self> {
        let edges = [north, east, south, west];
        if edges.contains(&Face::Cloister) {
            return Err(GameError::InvalidTile(format!(
                "cloister on an edge of {}",
                render_faces(&edges, center)
            )));
        }
        Ok(Self {
            edges,
            center,
            rotation: 0,
        })
    }

    #[inline]
    pub fn edge(&self, bearing: Bearing) -> Face {
        self.edges[bearing.index()]
    }

    pub fn center(&self) -> Face {
        self.center
    }

    pub fn rotation(&self) -> u32 {
        self.rotation
    }

    /// Rotate 90° clockwise: the west face moves north, north moves east, and so on.
    pub fn rotate(&mut self) {
        self.edges = rotate_edges(&self.edges, 90);
        self.rotation = (self.rotation + 90) % 360;
    }

    /// Rotate until the tile sits at `target` degrees. Negative and
    /// out-of-range targets are normalized into [0, 360).
    pub fn rotate_to(&mut self, target: i32) -> GameResult<()> {
        if target % 90 != 0 {
            return Err(GameError::InvalidRotation(target));
        }
        let target = target.rem_euclid(360) as u32;
        while self.rotation != target {
            self.rotate();
        }
        Ok(())
    }

    /// Group the feature edges of this tile. Same-typed edges that are
    /// angularly adjacent (N-E, E-S, S-W, W-N) share a group; opposite edges
    /// only join when a perpendicular edge of the same type links them.
    pub fn features(&self) -> Vec<BearingSet> {
        let mut groups: Vec<BearingSet> = Vec::new();
        for bearing in Bearing::ALL {
            let face = self.edge(bearing);
            if !face.is_feature() || groups.iter().any(|g| g.contains(&bearing)) {
                continue;
            }

            let mut group = BearingSet::from([bearing]);
            let mut next = bearing.clockwise();
            while next != bearing && self.edge(next) == face {
                group.insert(next);
                next = next.clockwise();
            }
            let mut prev = bearing.counter_clockwise();
            while !group.contains(&prev) && self.edge(prev) == face {
                group.insert(prev);
                prev = prev.counter_clockwise();
            }
            groups.push(group);
        }
        groups
    }

    /// The feature group containing `bearing`, or `None` for a grass edge.
    pub fn feature(&self, bearing: Bearing) -> Option<BearingSet> {
        self.features().into_iter().find(|g| g.contains(&bearing))
    }
}

fn render_faces(edges: &[Face; 4], center: Face) -> String {
    let mut s = String::with_capacity(9);
    for face in edges {
        s.push(face.code());
        s.push(':');
    }
    s.push(center.code());
    s
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_faces(&self.edges, self.center))
    }
}

/// Parse the `N:E:S:W:Center` form, e.g. `C:R:G:R:R`.
impl FromStr for Tile {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let codes: Vec<&str> = s.trim().split(':').collect();
        if codes.len() != 5 {
            return Err(GameError::InvalidTile(format!(
                "expected 5 faces in '{s}', found {}",
                codes.len()
            )));
        }
        let mut faces = [Face::Grass; 5];
        for (slot, code) in faces.iter_mut().zip(&codes) {
            *slot = Face::from_code(code.trim())
                .ok_or_else(|| GameError::InvalidTile(format!("unknown face code '{code}' in '{s}'")))?;
        }
        Tile::new(faces[0], faces[1], faces[2], faces[3], faces[4])
    }
}
