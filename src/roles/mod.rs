//! Role behaviors: per-role action selection
//!
//! A role is a stateless strategy. Each tick it looks at the being and
//! the world and produces the next action to attempt; every chain ends in
//! DoNothing, which is the designed outcome for unreachable or missing
//! goals, never an error.

use serde::{Deserialize, Serialize};

use crate::actions::{Action, ActionFactory};
use crate::being::Being;
use crate::core::config::SimulationConfig;
use crate::core::types::Position;
use crate::world::grid::GridWorld;
use crate::world::objects::{ItemKind, ResourceKind, StructureKind};

/// How many items of its yield a harvester carries before delivering
/// them to a storehouse
const CARRY_LIMIT: u32 = 5;

/// Behavior strategy determining a being's action priorities.
///
/// Equality is by variant: two independently obtained roles of the same
/// kind are interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Idle,
    Builder,
    Farmer,
    Fisher,
    Guard,
    Lumberjack,
    Miner,
    /// Hunger-driven food gathering. Entered directly by the being when
    /// starving, bypassing the allocator, and left once satisfied; never
    /// assigned by the allocator itself.
    Forage,
}

impl Role {
    /// Roles the colony allocator may hand out
    pub const ALLOCATABLE: [Role; 6] = [
        Role::Builder,
        Role::Farmer,
        Role::Fisher,
        Role::Guard,
        Role::Lumberjack,
        Role::Miner,
    ];

    pub fn is_allocatable(&self) -> bool {
        Self::ALLOCATABLE.contains(self)
    }

    /// Select the next action for `being`.
    pub fn next_action(
        &self,
        being: &Being,
        world: &GridWorld,
        factory: &ActionFactory,
        config: &SimulationConfig,
    ) -> Action {
        match self {
            Role::Idle => wander(world, factory),
            Role::Lumberjack => harvester(ResourceKind::Tree, being, world, factory, config),
            Role::Miner => harvester(ResourceKind::Rock, being, world, factory, config),
            Role::Fisher => harvester(ResourceKind::FishingSpot, being, world, factory, config),
            Role::Builder => builder(being, world, factory, config),
            Role::Forage => forage(being, world, factory, config),
            // No task generators defined for these yet; they wander like
            // Idle until their behaviors exist.
            Role::Farmer | Role::Guard => wander(world, factory),
        }
    }
}

/// Idle behavior: drift to a random vacant tile
fn wander(world: &GridWorld, factory: &ActionFactory) -> Action {
    match world.random_vacant_spot() {
        Some(spot) => factory.move_to(spot),
        None => factory.do_nothing(),
    }
}

/// Shared harvester shape: deliver a full load, otherwise find the
/// nearest resource of the wanted kind, walk to its closest vacant
/// neighbour, and harvest once standing there.
fn harvester(
    kind: ResourceKind,
    being: &Being,
    world: &GridWorld,
    factory: &ActionFactory,
    config: &SimulationConfig,
) -> Action {
    if being.inventory.count(kind.yields()) >= CARRY_LIMIT {
        if let Some(action) = deliver_load(kind.yields(), being, world, factory, config) {
            return action;
        }
    }

    let Some(resource) = world.nearby_resource(being.position, kind, config.search_radius) else {
        return factory.do_nothing();
    };
    approach_then(resource.position(), being, world, factory, || {
        factory.harvest(resource)
    })
}

/// Hand a full load over to the nearest completed storehouse, if any.
/// A storehouse with no room left is no delivery target.
fn deliver_load(
    item: ItemKind,
    being: &Being,
    world: &GridWorld,
    factory: &ActionFactory,
    config: &SimulationConfig,
) -> Option<Action> {
    let store = world.nearby_structure(being.position, StructureKind::Storehouse, config.search_radius)?;
    if !store.is_complete() || !store.storage().has_space(1) {
        return None;
    }
    Some(approach_then(store.position(), being, world, factory, || {
        factory.give_item(store, item)
    }))
}

/// Builder: walk to the nearest incomplete structure and build. The
/// target is re-fetched immediately before constructing the build action;
/// a site that completed or vanished since the search degrades to
/// DoNothing instead of acting on the stale reference.
fn builder(
    being: &Being,
    world: &GridWorld,
    factory: &ActionFactory,
    config: &SimulationConfig,
) -> Action {
    let Some(site) = world.nearby_incomplete_structure(being.position, config.search_radius) else {
        return factory.do_nothing();
    };
    let id = site.id();
    approach_then(site.position(), being, world, factory, || {
        match world.structure(id) {
            Some(current) if !current.is_complete() => factory.build(current),
            _ => factory.do_nothing(),
        }
    })
}

/// Hunger-driven gathering: find the nearest edible resource and harvest
/// it. Eating the proceeds happens in the being's own update step.
fn forage(
    being: &Being,
    world: &GridWorld,
    factory: &ActionFactory,
    config: &SimulationConfig,
) -> Action {
    let Some(resource) = world.nearby_edible_resource(being.position, config.search_radius) else {
        return factory.do_nothing();
    };
    approach_then(resource.position(), being, world, factory, || {
        factory.harvest(resource)
    })
}

/// Adjacency is decided by the world's closest-neighbour lookup, not raw
/// distance: a target whose neighbours are all blocked is unreachable and
/// yields DoNothing even when the being stands right next to it.
fn approach_then<F>(
    target: Position,
    being: &Being,
    world: &GridWorld,
    factory: &ActionFactory,
    at_target: F,
) -> Action
where
    F: FnOnce() -> Action,
{
    let Some(tile) = world.tile_at(target) else {
        return factory.do_nothing();
    };
    let Some(spot) = world.closest_neighbour_of(tile, being.position) else {
        return factory.do_nothing();
    };
    if being.position == spot {
        at_target()
    } else {
        factory.move_to(spot)
    }
}
