//! Core value types: bearings, faces, coordinates and the map bounding rectangle.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::engine::error::GameError;

/// A tile edge, or the direction from a coordinate to a touching neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bearing {
    North,
    East,
    South,
    West,
}

impl Bearing {
    /// Clockwise order, matching the edge index layout of a tile.
    pub const ALL: [Bearing; 4] = [Bearing::North, Bearing::East, Bearing::South, Bearing::West];

    pub fn opposite(self) -> Self {
        match self {
            Bearing::North => Bearing::South,
            Bearing::East => Bearing::West,
            Bearing::South => Bearing::North,
            Bearing::West => Bearing::East,
        }
    }

    /// Index into a `[_; 4]` edge array: N=0, E=1, S=2, W=3.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Bearing::North => 0,
            Bearing::East => 1,
            Bearing::South => 2,
            Bearing::West => 3,
        }
    }

    /// The next bearing clockwise.
    pub fn clockwise(self) -> Self {
        Self::ALL[(self.index() + 1) % 4]
    }

    pub fn counter_clockwise(self) -> Self {
        Self::ALL[(self.index() + 3) % 4]
    }
}

impl fmt::Display for Bearing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Bearing::North => "N",
            Bearing::East => "E",
            Bearing::South => "S",
            Bearing::West => "W",
        };
        f.write_str(s)
    }
}

/// The edges of one tile that belong to the same feature.
pub type BearingSet = BTreeSet<Bearing>;

/// The eight compass points around a coordinate. Only used for adjacency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompassPoint {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

/// What a tile face shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    Grass,
    Road,
    City,
    Cloister,
}

impl Face {
    pub fn code(self) -> char {
        match self {
            Face::Grass => 'G',
            Face::Road => 'R',
            Face::City => 'C',
            Face::Cloister => 'M',
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "G" => Some(Face::Grass),
            "R" => Some(Face::Road),
            "C" => Some(Face::City),
            "M" => Some(Face::Cloister),
            _ => None,
        }
    }

    /// Faces that take part in multi-tile features.
    pub fn is_feature(self) -> bool {
        matches!(self, Face::Road | Face::City)
    }
}

// --- Coordinate ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const ORIGIN: Coordinate = Coordinate { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn neighbor(self, bearing: Bearing) -> Self {
        match bearing {
            Bearing::North => Self::new(self.x, self.y + 1),
            Bearing::East => Self::new(self.x + 1, self.y),
            Bearing::South => Self::new(self.x, self.y - 1),
            Bearing::West => Self::new(self.x - 1, self.y),
        }
    }

    /// The four edge-sharing neighbours.
    pub fn touching(self) -> [(Bearing, Coordinate); 4] {
        Bearing::ALL.map(|b| (b, self.neighbor(b)))
    }

    /// All eight surrounding positions, clockwise from north.
    pub fn surrounding(self) -> [(CompassPoint, Coordinate); 8] {
        let Coordinate { x, y } = self;
        [
            (CompassPoint::North, Self::new(x, y + 1)),
            (CompassPoint::NorthEast, Self::new(x + 1, y + 1)),
            (CompassPoint::East, Self::new(x + 1, y)),
            (CompassPoint::SouthEast, Self::new(x + 1, y - 1)),
            (CompassPoint::South, Self::new(x, y - 1)),
            (CompassPoint::SouthWest, Self::new(x - 1, y - 1)),
            (CompassPoint::West, Self::new(x - 1, y)),
            (CompassPoint::NorthWest, Self::new(x - 1, y + 1)),
        ]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for Coordinate {
    type Err = GameError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let invalid = || GameError::InvalidCoordinate(key.to_string());
        let (x, y) = key.split_once(',').ok_or_else(invalid)?;
        let x = x.trim().parse().map_err(|_| invalid())?;
        let y = y.trim().parse().map_err(|_| invalid())?;
        Ok(Self { x, y })
    }
}

/// Inclusive bounding rectangle of every placed tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub bottom_left: Coordinate,
    pub top_right: Coordinate,
}

impl Bounds {
    pub fn around(coordinate: Coordinate) -> Self {
        Self {
            bottom_left: coordinate,
            top_right: coordinate,
        }
    }

    pub fn extend(&mut self, c: Coordinate) {
        self.bottom_left.x = self.bottom_left.x.min(c.x);
        self.bottom_left.y = self.bottom_left.y.min(c.y);
        self.top_right.x = self.top_right.x.max(c.x);
        self.top_right.y = self.top_right.y.max(c.y);
    }

    pub fn width(&self) -> usize {
        (self.top_right.x - self.bottom_left.x + 1) as usize
    }

    pub fn height(&self) -> usize {
        (self.top_right.y - self.bottom_left.y + 1) as usize
    }
}

// --- Rotation helpers ---

/// Rotate edge faces clockwise by rotation degrees (0, 90, 180, 270).
pub fn rotate_edges(edges: &[Face; 4], rotation: u32) -> [Face; 4] {
    let steps = ((rotation / 90) % 4) as usize;
    if steps == 0 {
        return *edges;
    }
    let mut rotated = [Face::Grass; 4];
    for i in 0..4 {
        let source = (i + 4 - steps) % 4;
        rotated[i] = edges[source];
    }
    rotated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_to_from_key() {
        let c = Coordinate::new(3, -1);
        assert_eq!(c.to_string(), "3,-1");
        assert_eq!("3,-1".parse::<Coordinate>().unwrap(), c);
        assert!("3;-1".parse::<Coordinate>().is_err());
        assert!("a,1".parse::<Coordinate>().is_err());
    }

    #[test]
    fn test_coordinate_neighbor() {
        let c = Coordinate::ORIGIN;
        assert_eq!(c.neighbor(Bearing::North), Coordinate::new(0, 1));
        assert_eq!(c.neighbor(Bearing::East), Coordinate::new(1, 0));
        assert_eq!(c.neighbor(Bearing::South), Coordinate::new(0, -1));
        assert_eq!(c.neighbor(Bearing::West), Coordinate::new(-1, 0));
    }

    #[test]
    fn test_touching_labels() {
        let touching = Coordinate::new(2, 2).touching();
        assert_eq!(touching[0], (Bearing::North, Coordinate::new(2, 3)));
        assert_eq!(touching[3], (Bearing::West, Coordinate::new(1, 2)));
    }

    #[test]
    fn test_surrounding() {
        let c = Coordinate::ORIGIN;
        let surrounding = c.surrounding();
        assert_eq!(surrounding.len(), 8);
        assert!(surrounding.iter().all(|(_, s)| *s != c));
        assert!(surrounding.contains(&(CompassPoint::SouthWest, Coordinate::new(-1, -1))));
    }

    #[test]
    fn test_opposite_is_involution() {
        for b in Bearing::ALL {
            assert_ne!(b.opposite(), b);
            assert_eq!(b.opposite().opposite(), b);
        }
    }

    #[test]
    fn test_rotate_edges() {
        // N=City, E=Road, S=Grass, W=Road
        let edges = [Face::City, Face::Road, Face::Grass, Face::Road];

        let rotated = rotate_edges(&edges, 90);
        assert_eq!(rotated[0], Face::Road); // W→N
        assert_eq!(rotated[1], Face::City); // N→E
        assert_eq!(rotated[2], Face::Road); // E→S
        assert_eq!(rotated[3], Face::Grass); // S→W
    }

    #[test]
    fn test_bounds_extend() {
        let mut bounds = Bounds::around(Coordinate::ORIGIN);
        bounds.extend(Coordinate::new(2, -1));
        bounds.extend(Coordinate::new(-1, 3));
        assert_eq!(bounds.bottom_left, Coordinate::new(-1, -1));
        assert_eq!(bounds.top_right, Coordinate::new(2, 3));
        assert_eq!(bounds.width(), 4);
        assert_eq!(bounds.height(), 5);
    }
}
