//! Gridstead - Tile-Based Colony Simulation

pub mod actions;
pub mod being;
pub mod colony;
pub mod core;
pub mod pathfinding;
pub mod roles;
pub mod simulation;
pub mod world;
