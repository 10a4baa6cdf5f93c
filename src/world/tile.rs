//! Grid tiles and traversal costs

use crate::core::types::{Position, TileCoord};

/// Traversal cost marking a tile as non-walkable.
///
/// Resources, structures and placed obstacles occupy their cell with this
/// sentinel; the pathfinder skips any tile carrying it, which excludes the
/// cell from every route without removing it from the graph.
pub const BLOCKED_COST: f32 = f32::INFINITY;

/// Cost of stepping onto an open tile
pub const OPEN_COST: f32 = 1.0;

/// A unit cell of the world grid.
///
/// Tiles are read through the world query surface and are immutable from
/// the being's perspective; occupancy changes arrive as obstacle events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    coord: TileCoord,
    cost: f32,
}

impl Tile {
    pub fn new(coord: TileCoord, cost: f32) -> Self {
        Self { coord, cost }
    }

    pub fn coord(&self) -> TileCoord {
        self.coord
    }

    pub fn position(&self) -> Position {
        self.coord.position()
    }

    pub fn cost(&self) -> f32 {
        self.cost
    }

    pub fn is_walkable(&self) -> bool {
        self.cost.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_tile_is_walkable() {
        let tile = Tile::new(TileCoord::new(2, 3), OPEN_COST);
        assert!(tile.is_walkable());
        assert_eq!(tile.position(), Position::new(2.0, 3.0));
    }

    #[test]
    fn test_blocked_tile_is_not_walkable() {
        let tile = Tile::new(TileCoord::new(0, 0), BLOCKED_COST);
        assert!(!tile.is_walkable());
        assert!(tile.cost().is_infinite());
    }
}
