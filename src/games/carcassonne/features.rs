//! Feature tracing: follow a city or road across matching tile edges and
//! decide whether it is closed on every side.
//!
//! A trace keeps one `Tracked` map for its whole run. It records, per
//! coordinate, which edges of that tile belong to the feature, and doubles as
//! the visited set that stops the recursion from walking a loop forever.

use std::collections::BTreeMap;

use crate::engine::error::{GameError, GameResult};
use super::board::Map;
use super::types::*;

type Tracked = BTreeMap<Coordinate, BearingSet>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    City,
    Road,
    Cloister,
}

impl FeatureKind {
    /// Points per tile when the feature is complete.
    pub fn tile_value(self) -> u32 {
        match self {
            FeatureKind::City => 2,
            FeatureKind::Road => 1,
            FeatureKind::Cloister => 1,
        }
    }
}

/// A connected region of same-typed edges across one or more tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    kind: FeatureKind,
    complete: bool,
    tiles: BTreeMap<Coordinate, BearingSet>,
}

impl Feature {
    pub fn new(kind: FeatureKind, complete: bool) -> Self {
        Self {
            kind,
            complete,
            tiles: BTreeMap::new(),
        }
    }

    /// Record the edges of one tile. Each coordinate may only be added once.
    pub fn add_tile(&mut self, coordinate: Coordinate, bearings: BearingSet) -> GameResult<()> {
        if self.tiles.contains_key(&coordinate) {
            return Err(GameError::DuplicateFeatureTile(coordinate));
        }
        self.tiles.insert(coordinate, bearings);
        Ok(())
    }

    pub fn kind(&self) -> FeatureKind {
        self.kind
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// The edges of the tile at `coordinate` that belong to this feature.
    pub fn bearings_at(&self, coordinate: Coordinate) -> Option<&BearingSet> {
        self.tiles.get(&coordinate)
    }

    /// Points awarded for this feature: zero unless complete.
    pub fn points(&self) -> u32 {
        if self.complete {
            self.tile_count() as u32 * self.kind.tile_value()
        } else {
            0
        }
    }
}

/// Trace the feature that touches `bearing` of the tile at `start`.
pub fn create_feature(map: &Map, start: Coordinate, bearing: Bearing) -> GameResult<Feature> {
    let tile = map.look(start)?;
    let group = tile
        .feature(bearing)
        .ok_or(GameError::NoFeatureFaces { coordinate: start, bearing })?;

    let mut tracked = Tracked::new();
    tracked.insert(start, group.clone());

    let mut complete = true;
    for &edge in &group {
        // Every branch is walked even after one comes back open.
        complete &= find_feature_tiles(map, start, edge, &mut tracked)?;
    }

    let kind = match tile.edge(bearing) {
        Face::City => FeatureKind::City,
        Face::Road => FeatureKind::Road,
        _ => return Err(GameError::NoFeatureFaces { coordinate: start, bearing }),
    };

    let mut feature = Feature::new(kind, complete);
    for (coordinate, bearings) in tracked {
        feature.add_tile(coordinate, bearings)?;
    }
    Ok(feature)
}

/// Follow the feature out of `coordinate` through its `bearing` edge.
/// Returns whether everything reachable through that edge is closed.
fn find_feature_tiles(
    map: &Map,
    coordinate: Coordinate,
    bearing: Bearing,
    tracked: &mut Tracked,
) -> GameResult<bool> {
    let neighbor = coordinate.neighbor(bearing);
    let Ok(tile) = map.look(neighbor) else {
        return Ok(false);
    };

    let arrival = bearing.opposite();
    let group = tile.feature(arrival).ok_or(GameError::NoFeatureFaces {
        coordinate: neighbor,
        bearing: arrival,
    })?;

    if let Some(known) = tracked.get_mut(&neighbor) {
        // Looped back onto a visited tile: merge, never reopen.
        if !known.is_superset(&group) {
            known.extend(group);
        }
        return Ok(true);
    }

    tracked.insert(neighbor, group.clone());
    if group.len() == 1 {
        return Ok(true);
    }

    let mut complete = true;
    for &edge in group.iter().filter(|&&b| b != arrival) {
        complete &= find_feature_tiles(map, neighbor, edge, tracked)?;
    }
    Ok(complete)
}

/// Every distinct feature touching the tile at `start`. A feature that
/// reaches the tile on several faces is only built once. Cloisters are not
/// traced.
pub fn create_features(map: &Map, start: Coordinate) -> GameResult<Vec<Feature>> {
    let tile = map.look(start)?;
    let mut features: Vec<Feature> = Vec::new();

    for group in tile.features() {
        let covered = features.iter().any(|f| {
            f.bearings_at(start)
                .is_some_and(|known| group.iter().any(|b| known.contains(b)))
        });
        if covered {
            continue;
        }
        let Some(&first) = group.iter().next() else {
            continue;
        };
        features.push(create_feature(map, start, first)?);
    }

    Ok(features)
}
