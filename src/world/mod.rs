//! World grid, occupants, and change notification

pub mod grid;
pub mod notify;
pub mod objects;
pub mod tile;

pub use grid::{GridWorld, Occupant};
pub use notify::{ObstacleBus, PathWatch};
pub use objects::{ItemKind, Resource, ResourceKind, Structure, StructureKind};
pub use tile::{Tile, BLOCKED_COST, OPEN_COST};
