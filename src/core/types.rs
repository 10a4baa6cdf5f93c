//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for beings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BeingId(pub Uuid);

impl BeingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BeingId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for structures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructureId(pub Uuid);

impl StructureId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StructureId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for harvestable resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId(pub Uuid);

impl ResourceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ResourceId {
    fn default() -> Self {
        Self::new()
    }
}

/// Simulation tick counter
pub type Tick = u64;

/// 2D world position.
///
/// Equality is exact floating-point comparison. Beings snap exactly onto
/// their movement destination, so positions reached by movement compare
/// equal to the waypoint that produced them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance
    pub fn distance(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Manhattan distance
    pub fn manhattan_distance(&self, other: &Self) -> f32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl std::ops::Add for Position {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::Sub for Position {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::Mul<f32> for Position {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

impl From<TileCoord> for Position {
    fn from(coord: TileCoord) -> Self {
        Self { x: coord.x as f32, y: coord.y as f32 }
    }
}

/// Integer grid coordinates identifying a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Grid cell containing a world position
    pub fn from_position(pos: Position) -> Self {
        Self {
            x: pos.x.round() as i32,
            y: pos.y.round() as i32,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x as f32, self.y as f32)
    }

    /// 4-connected neighbours, unbounded (the world filters out-of-range cells)
    pub fn neighbours(&self) -> [TileCoord; 4] {
        [
            TileCoord::new(self.x + 1, self.y),
            TileCoord::new(self.x - 1, self.y),
            TileCoord::new(self.x, self.y + 1),
            TileCoord::new(self.x, self.y - 1),
        ]
    }

    pub fn manhattan_distance(&self, other: &Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}
