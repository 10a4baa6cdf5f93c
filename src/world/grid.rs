//! The tile grid and its query surface
//!
//! `GridWorld` answers the lookups the behavior layer depends on: tile
//! and neighbour queries, random vacant spots, closest vacant neighbour
//! of a target tile, and nearest-of-kind searches for resources and
//! structures. Placement of anything that occupies a tile publishes an
//! obstacle event before the call returns.

use std::cell::RefCell;
use std::rc::Rc;

use ahash::AHashMap;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::error::{GridsteadError, Result};
use crate::core::types::{Position, ResourceId, StructureId, TileCoord};
use crate::world::notify::ObstacleBus;
use crate::world::objects::{Resource, ResourceKind, Structure, StructureKind};
use crate::world::tile::{Tile, BLOCKED_COST, OPEN_COST};

/// What occupies a tile, if anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupant {
    Obstacle,
    Resource(ResourceId),
    Structure(StructureId),
}

/// A bounded tile world with mutable occupancy
pub struct GridWorld {
    width: i32,
    height: i32,
    occupancy: AHashMap<TileCoord, Occupant>,
    /// Insertion-ordered so nearest-of-kind searches are deterministic
    resources: Vec<Resource>,
    structures: Vec<Structure>,
    bus: Rc<ObstacleBus>,
    rng: RefCell<ChaCha8Rng>,
}

impl GridWorld {
    pub fn new(width: i32, height: i32, seed: u64, bus: Rc<ObstacleBus>) -> Self {
        Self {
            width,
            height,
            occupancy: AHashMap::new(),
            resources: Vec::new(),
            structures: Vec::new(),
            bus,
            rng: RefCell::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, coord: TileCoord) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }

    fn cost_at(&self, coord: TileCoord) -> f32 {
        if self.occupancy.contains_key(&coord) {
            BLOCKED_COST
        } else {
            OPEN_COST
        }
    }

    /// Tile containing a world position, if in bounds
    pub fn tile_at(&self, pos: Position) -> Option<Tile> {
        self.tile_at_coord(TileCoord::from_position(pos))
    }

    pub fn tile_at_coord(&self, coord: TileCoord) -> Option<Tile> {
        if !self.in_bounds(coord) {
            return None;
        }
        Some(Tile::new(coord, self.cost_at(coord)))
    }

    /// In-bounds 4-neighbours of a tile (walkable or not)
    pub fn neighbours_of(&self, tile: Tile) -> Vec<Tile> {
        tile.coord()
            .neighbours()
            .into_iter()
            .filter_map(|c| self.tile_at_coord(c))
            .collect()
    }

    pub fn is_vacant(&self, coord: TileCoord) -> bool {
        self.in_bounds(coord) && !self.occupancy.contains_key(&coord)
    }

    /// A uniformly random unoccupied tile position.
    ///
    /// Falls back to a deterministic scan when rejection sampling keeps
    /// hitting occupied cells; None only when the world is completely full.
    pub fn random_vacant_spot(&self) -> Option<Position> {
        let mut rng = self.rng.borrow_mut();
        for _ in 0..128 {
            let coord = TileCoord::new(
                rng.gen_range(0..self.width),
                rng.gen_range(0..self.height),
            );
            if !self.occupancy.contains_key(&coord) {
                return Some(coord.position());
            }
        }
        for y in 0..self.height {
            for x in 0..self.width {
                let coord = TileCoord::new(x, y);
                if !self.occupancy.contains_key(&coord) {
                    return Some(coord.position());
                }
            }
        }
        None
    }

    /// Walkable neighbour of `tile` closest to `from`.
    ///
    /// This is the adjacency oracle for harvest/build behavior: a target
    /// with no vacant neighbour is unreachable and callers degrade to
    /// doing nothing. Ties keep the first neighbour in fixed scan order.
    pub fn closest_neighbour_of(&self, tile: Tile, from: Position) -> Option<Position> {
        let mut best: Option<(Position, f32)> = None;
        for neighbour in self.neighbours_of(tile) {
            if !neighbour.is_walkable() {
                continue;
            }
            let d = neighbour.position().distance(&from);
            if best.map(|(_, bd)| d < bd).unwrap_or(true) {
                best = Some((neighbour.position(), d));
            }
        }
        best.map(|(pos, _)| pos)
    }

    /// Nearest stocked resource of `kind` within `radius` of `pos`
    pub fn nearby_resource(&self, pos: Position, kind: ResourceKind, radius: f32) -> Option<&Resource> {
        self.nearest(self.resources.iter(), pos, radius, |r: &&Resource| {
            r.kind() == kind && r.has_stock()
        })
    }

    /// Nearest stocked edible resource within `radius` of `pos`
    pub fn nearby_edible_resource(&self, pos: Position, radius: f32) -> Option<&Resource> {
        self.nearest(self.resources.iter(), pos, radius, |r: &&Resource| {
            r.kind().is_edible_source() && r.has_stock()
        })
    }

    /// Nearest structure of `kind` within `radius` of `pos`
    pub fn nearby_structure(&self, pos: Position, kind: StructureKind, radius: f32) -> Option<&Structure> {
        self.nearest(self.structures.iter(), pos, radius, |s: &&Structure| {
            s.kind() == kind
        })
    }

    /// Nearest structure still under construction within `radius` of `pos`
    pub fn nearby_incomplete_structure(&self, pos: Position, radius: f32) -> Option<&Structure> {
        self.nearest(self.structures.iter(), pos, radius, |s: &&Structure| {
            !s.is_complete()
        })
    }

    fn nearest<'a, T, I, F>(&self, items: I, pos: Position, radius: f32, keep: F) -> Option<T>
    where
        T: Locatable + Copy,
        I: Iterator<Item = T>,
        F: Fn(&T) -> bool,
    {
        let mut best: Option<(T, f32)> = None;
        for item in items.filter(keep) {
            let d = item.location().distance(&pos);
            if d > radius {
                continue;
            }
            if best.map(|(_, bd)| d < bd).unwrap_or(true) {
                best = Some((item, d));
            }
        }
        best.map(|(item, _)| item)
    }

    pub fn resource(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id() == id)
    }

    pub fn resource_mut(&mut self, id: ResourceId) -> Option<&mut Resource> {
        self.resources.iter_mut().find(|r| r.id() == id)
    }

    pub fn structure(&self, id: StructureId) -> Option<&Structure> {
        self.structures.iter().find(|s| s.id() == id)
    }

    pub fn structure_mut(&mut self, id: StructureId) -> Option<&mut Structure> {
        self.structures.iter_mut().find(|s| s.id() == id)
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn structures(&self) -> &[Structure] {
        &self.structures
    }

    /// Block a tile outright. Publishes the change before returning.
    pub fn place_obstacle(&mut self, coord: TileCoord) -> Result<()> {
        self.claim(coord, Occupant::Obstacle)?;
        self.bus.publish(coord);
        Ok(())
    }

    /// Place a resource occupying its tile. Publishes the change.
    pub fn place_resource(&mut self, kind: ResourceKind, coord: TileCoord, stock: u32) -> Result<ResourceId> {
        let resource = Resource::new(kind, coord.position(), stock);
        let id = resource.id();
        self.claim(coord, Occupant::Resource(id))?;
        self.resources.push(resource);
        self.bus.publish(coord);
        Ok(id)
    }

    /// Place a construction site occupying its tile. Publishes the change.
    pub fn place_structure(&mut self, kind: StructureKind, coord: TileCoord) -> Result<StructureId> {
        let structure = Structure::new(kind, coord.position());
        let id = structure.id();
        self.claim(coord, Occupant::Structure(id))?;
        self.structures.push(structure);
        self.bus.publish(coord);
        Ok(id)
    }

    fn claim(&mut self, coord: TileCoord, occupant: Occupant) -> Result<()> {
        if !self.in_bounds(coord) {
            return Err(GridsteadError::OutOfBounds(coord.x, coord.y));
        }
        if self.occupancy.contains_key(&coord) {
            return Err(GridsteadError::TileOccupied(coord.x, coord.y));
        }
        self.occupancy.insert(coord, occupant);
        Ok(())
    }

    /// Remove an exhausted resource and free its tile.
    ///
    /// Freeing a tile opens routes rather than blocking them, so no
    /// obstacle event is published.
    pub fn remove_resource(&mut self, id: ResourceId) {
        if let Some(idx) = self.resources.iter().position(|r| r.id() == id) {
            let resource = self.resources.remove(idx);
            self.occupancy
                .remove(&TileCoord::from_position(resource.position()));
        }
    }

    /// Remove a structure and free its tile
    pub fn remove_structure(&mut self, id: StructureId) {
        if let Some(idx) = self.structures.iter().position(|s| s.id() == id) {
            let structure = self.structures.remove(idx);
            self.occupancy
                .remove(&TileCoord::from_position(structure.position()));
        }
    }

    /// Occupied tiles, for render snapshots
    pub fn occupied_tiles(&self) -> impl Iterator<Item = (TileCoord, Occupant)> + '_ {
        self.occupancy.iter().map(|(c, o)| (*c, *o))
    }
}

/// Anything with a world position, for the shared nearest-of search
trait Locatable {
    fn location(&self) -> Position;
}

impl Locatable for &Resource {
    fn location(&self) -> Position {
        self.position()
    }
}

impl Locatable for &Structure {
    fn location(&self) -> Position {
        self.position()
    }
}
