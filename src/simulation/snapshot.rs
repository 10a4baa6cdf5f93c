//! Read-only snapshots for the render sink
//!
//! The renderer gets an owned, serializable copy of the state it draws;
//! the core never blocks on or waits for rendering.

use serde::Serialize;

use crate::colony::Colony;
use crate::core::types::{BeingId, Tick};
use crate::roles::Role;
use crate::world::grid::{GridWorld, Occupant};
use crate::world::objects::{ResourceKind, StructureKind};

#[derive(Debug, Clone, Serialize)]
pub struct BeingView {
    pub id: BeingId,
    pub x: f32,
    pub y: f32,
    pub role: Role,
    pub health: f32,
    pub hunger: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OccupantView {
    Obstacle,
    Resource(ResourceKind),
    Structure { kind: StructureKind, complete: bool },
}

#[derive(Debug, Clone, Serialize)]
pub struct TileView {
    pub x: i32,
    pub y: i32,
    pub occupant: OccupantView,
}

/// Immutable picture of agent and tile state at one tick
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub tick: Tick,
    pub beings: Vec<BeingView>,
    /// Only occupied tiles are listed; everything else is open ground
    pub tiles: Vec<TileView>,
}

/// Capture the current state for drawing
pub fn capture(tick: Tick, colony: &Colony, world: &GridWorld) -> RenderSnapshot {
    let beings = colony
        .beings()
        .iter()
        .map(|b| BeingView {
            id: b.id(),
            x: b.position.x,
            y: b.position.y,
            role: b.role,
            health: b.health,
            hunger: b.hunger,
        })
        .collect();

    let mut tiles: Vec<TileView> = world
        .occupied_tiles()
        .filter_map(|(coord, occupant)| {
            let occupant = match occupant {
                Occupant::Obstacle => OccupantView::Obstacle,
                Occupant::Resource(id) => OccupantView::Resource(world.resource(id)?.kind()),
                Occupant::Structure(id) => {
                    let s = world.structure(id)?;
                    OccupantView::Structure {
                        kind: s.kind(),
                        complete: s.is_complete(),
                    }
                }
            };
            Some(TileView {
                x: coord.x,
                y: coord.y,
                occupant,
            })
        })
        .collect();
    // Occupancy iterates a hash map; sort so snapshots are stable
    tiles.sort_by_key(|t| (t.y, t.x));

    RenderSnapshot { tick, beings, tiles }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::core::types::TileCoord;
    use crate::simulation::Simulation;

    #[test]
    fn test_snapshot_reflects_world_state() {
        let mut sim = Simulation::new(SimulationConfig::default(), 10, 10, 9).unwrap();
        sim.spawn_being().unwrap();
        sim.world
            .place_resource(ResourceKind::Tree, TileCoord::new(3, 4), 5)
            .unwrap();
        sim.world
            .place_structure(StructureKind::House, TileCoord::new(6, 6))
            .unwrap();

        let snap = sim.snapshot();
        assert_eq!(snap.beings.len(), 1);
        assert_eq!(snap.tiles.len(), 2);
        assert!(snap
            .tiles
            .iter()
            .any(|t| t.occupant == OccupantView::Resource(ResourceKind::Tree)));
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut sim = Simulation::new(SimulationConfig::default(), 10, 10, 9).unwrap();
        sim.spawn_being().unwrap();
        let json = serde_json::to_string(&sim.snapshot()).unwrap();
        assert!(json.contains("\"beings\""));
    }
}
