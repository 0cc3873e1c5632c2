//! Board logic: tile placement validation, playable frontier and bounds.

use std::collections::{BTreeSet, HashMap};

use crate::engine::error::{GameError, GameResult};
use super::tiles::Tile;
use super::types::*;

/// Placed tiles keyed by coordinate, plus the frontier of playable positions.
///
/// `Clone` is a deep copy; players simulate moves on clones so a rejected
/// trial never touches the authoritative map.
#[derive(Debug, Clone)]
pub struct Map {
    tiles: HashMap<Coordinate, Tile>,
    frontier: BTreeSet<Coordinate>,
    bounds: Bounds,
}

impl Default for Map {
    /// An empty map. Its frontier is empty; the first tile can only go to
    /// the origin.
    fn default() -> Self {
        Self {
            tiles: HashMap::new(),
            frontier: BTreeSet::new(),
            bounds: Bounds::around(Coordinate::ORIGIN),
        }
    }
}

impl Map {
    /// Start a map with `start` at the origin. No adjacency checks apply.
    pub fn new(start: Tile) -> Self {
        let mut map = Self::default();
        map.store(start, Coordinate::ORIGIN);
        map
    }

    /// Check if `tile`, as currently rotated, can be placed at `coordinate`.
    ///
    /// Rules:
    /// 1. The first tile goes to the origin, unchecked
    /// 2. Otherwise the position must be in the frontier (empty and next to a placed tile)
    /// 3. All edges touching placed tiles must match
    pub fn can_place(&self, tile: &Tile, coordinate: Coordinate) -> bool {
        if self.tiles.is_empty() {
            return coordinate == Coordinate::ORIGIN;
        }
        if !self.frontier.contains(&coordinate) || self.tiles.contains_key(&coordinate) {
            return false;
        }
        coordinate.touching().iter().all(|&(bearing, neighbor)| {
            match self.tiles.get(&neighbor) {
                Some(other) => other.edge(bearing.opposite()) == tile.edge(bearing),
                None => true,
            }
        })
    }

    pub fn place(&mut self, tile: Tile, coordinate: Coordinate) -> GameResult<()> {
        if !self.can_place(&tile, coordinate) {
            return Err(GameError::InvalidTilePlacement(coordinate));
        }
        self.store(tile, coordinate);
        Ok(())
    }

    fn store(&mut self, tile: Tile, coordinate: Coordinate) {
        self.tiles.insert(coordinate, tile);
        self.bounds.extend(coordinate);
        self.frontier.remove(&coordinate);
        for (_, neighbor) in coordinate.touching() {
            if !self.tiles.contains_key(&neighbor) {
                self.frontier.insert(neighbor);
            }
        }
    }

    /// A copy of the tile at `coordinate`.
    pub fn look(&self, coordinate: Coordinate) -> GameResult<Tile> {
        self.tiles
            .get(&coordinate)
            .cloned()
            .ok_or(GameError::UnoccupiedCoordinate(coordinate))
    }

    pub fn is_occupied(&self, coordinate: Coordinate) -> bool {
        self.tiles.contains_key(&coordinate)
    }

    /// Every legal placement target, in coordinate order.
    pub fn playable_positions(&self) -> Vec<Coordinate> {
        self.frontier.iter().copied().collect()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Occupied coordinates, in coordinate order.
    pub fn coordinates(&self) -> Vec<Coordinate> {
        let mut coords: Vec<Coordinate> = self.tiles.keys().copied().collect();
        coords.sort();
        coords
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn tile(s: &str) -> Tile {
        s.parse().unwrap()
    }

    fn make_map_with_starting_tile() -> Map {
        Map::new(tile("C:R:G:R:R"))
    }

    /// Recompute the frontier from scratch: empty cells touching a placed tile.
    fn expected_frontier(map: &Map) -> HashSet<Coordinate> {
        let mut open = HashSet::new();
        for c in map.coordinates() {
            for (_, n) in c.touching() {
                if !map.is_occupied(n) {
                    open.insert(n);
                }
            }
        }
        open
    }

    #[test]
    fn test_starting_tile_open_positions() {
        let map = make_map_with_starting_tile();
        let open = map.playable_positions();
        assert_eq!(open.len(), 4);
        assert!(open.contains(&Coordinate::new(-1, 0)));
        assert!(open.contains(&Coordinate::new(0, 1)));
        assert!(open.contains(&Coordinate::new(0, -1)));
        assert!(open.contains(&Coordinate::new(1, 0)));
    }

    #[test]
    fn test_cannot_place_on_occupied() {
        let mut map = make_map_with_starting_tile();
        let err = map.place(tile("C:R:G:R:R"), Coordinate::ORIGIN).unwrap_err();
        assert_eq!(err, GameError::InvalidTilePlacement(Coordinate::ORIGIN));
    }

    #[test]
    fn test_cannot_place_isolated() {
        let mut map = make_map_with_starting_tile();
        assert!(map.place(tile("G:G:G:G:G"), Coordinate::new(5, 5)).is_err());
    }

    #[test]
    fn test_can_place_matching_edge() {
        let mut map = make_map_with_starting_tile();
        // City on the start tile's north edge; the new tile's south edge must be city.
        let mut e = tile("C:G:G:G:G");
        e.rotate_to(180).unwrap();
        assert!(map.can_place(&e, Coordinate::new(0, 1)));
        map.place(e, Coordinate::new(0, 1)).unwrap();
        assert!(map.is_occupied(Coordinate::new(0, 1)));
    }

    #[test]
    fn test_cannot_place_mismatching_edge() {
        let mut map = make_map_with_starting_tile();
        let e = tile("C:G:G:G:G");
        let err = map.place(e, Coordinate::new(0, 1)).unwrap_err();
        assert_eq!(err, GameError::InvalidTilePlacement(Coordinate::new(0, 1)));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_every_occupied_neighbour_must_match() {
        let mut map = make_map_with_starting_tile();
        map.place(tile("R:R:R:R:G"), Coordinate::new(1, 0)).unwrap();
        map.place(tile("G:G:R:R:R"), Coordinate::new(1, 1)).unwrap();
        // (0,1) touches the start tile to the south (city) and (1,1) to the east (road).
        assert!(map.can_place(&tile("G:R:C:G:G"), Coordinate::new(0, 1)));
        assert!(!map.can_place(&tile("G:G:C:G:G"), Coordinate::new(0, 1)));
        assert!(!map.can_place(&tile("G:R:G:G:G"), Coordinate::new(0, 1)));
    }

    #[test]
    fn test_look_returns_copy() {
        let map = make_map_with_starting_tile();
        let mut copy = map.look(Coordinate::ORIGIN).unwrap();
        copy.rotate();
        assert_eq!(map.look(Coordinate::ORIGIN).unwrap().rotation(), 0);
        assert_eq!(
            map.look(Coordinate::new(3, 3)),
            Err(GameError::UnoccupiedCoordinate(Coordinate::new(3, 3)))
        );
    }

    #[test]
    fn test_frontier_and_bounds_track_placements() {
        let mut map = make_map_with_starting_tile();
        map.place(tile("R:R:R:R:G"), Coordinate::new(1, 0)).unwrap();
        map.place(tile("R:G:R:G:R"), Coordinate::new(1, -1)).unwrap();
        map.place(tile("G:R:G:R:R"), Coordinate::new(-1, 0)).unwrap();

        let frontier: HashSet<Coordinate> = map.playable_positions().into_iter().collect();
        assert_eq!(frontier, expected_frontier(&map));
        assert!(!frontier.contains(&Coordinate::new(1, 0)));

        let bounds = map.bounds();
        assert_eq!(bounds.bottom_left, Coordinate::new(-1, -1));
        assert_eq!(bounds.top_right, Coordinate::new(1, 0));
    }

    #[test]
    fn test_empty_map_bootstraps_at_origin() {
        let mut map = Map::default();
        assert!(map.is_empty());
        assert!(map.playable_positions().is_empty());
        assert!(map.place(tile("C:G:G:G:G"), Coordinate::new(1, 0)).is_err());
        map.place(tile("C:G:G:G:G"), Coordinate::ORIGIN).unwrap();
        assert_eq!(map.playable_positions().len(), 4);
    }

    #[test]
    fn test_clone_is_independent() {
        let map = make_map_with_starting_tile();
        let mut trial = map.clone();
        trial.place(tile("R:R:R:R:G"), Coordinate::new(1, 0)).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(trial.len(), 2);
        assert!(!map.is_occupied(Coordinate::new(1, 0)));
    }
}
