//! Action taxonomy and factory
//!
//! Actions are a closed set of variants dispatched with `match`, so a new
//! action kind forces every call site to handle it. Equality compares the
//! action kind plus its target identity and ignores internal progress, so
//! a being can recognise "same goal as last tick" and keep accumulated
//! work instead of restarting it.

pub mod movement;
pub mod transfer;

use std::rc::Rc;

use crate::being::Being;
use crate::core::config::SimulationConfig;
use crate::core::types::{Position, ResourceId, StructureId};
use crate::pathfinding::Pathfinder;
use crate::world::grid::GridWorld;
use crate::world::notify::ObstacleBus;
use crate::world::objects::{ItemKind, Resource, Structure};

pub use movement::MoveAction;
pub use transfer::ActionTimer;

/// Harvest one unit from an adjacent resource. Instant: the first
/// successful perform moves the item and completes.
#[derive(Debug, PartialEq)]
pub struct HarvestAction {
    resource: ResourceId,
    target: Position,
    done: bool,
}

/// Deliver one unit of a needed material to an adjacent construction site
#[derive(Debug)]
pub struct BuildAction {
    structure: StructureId,
    target: Position,
    timer: ActionTimer,
}

/// Hand one item from the being's inventory to an adjacent storable
#[derive(Debug)]
pub struct GiveItemAction {
    structure: StructureId,
    item: ItemKind,
    target: Position,
    timer: ActionTimer,
}

/// Take one item from an adjacent takeable into the being's inventory
#[derive(Debug)]
pub struct TakeItemAction {
    structure: StructureId,
    item: ItemKind,
    target: Position,
    timer: ActionTimer,
}

/// A transient, possibly multi-tick unit of work
#[derive(Debug)]
pub enum Action {
    Move(MoveAction),
    Harvest(HarvestAction),
    Build(BuildAction),
    GiveItem(GiveItemAction),
    TakeItem(TakeItemAction),
    /// The designed degradation path: unreachable or unsatisfiable goals
    /// collapse to doing nothing for a tick
    DoNothing,
    /// Escape hatch meaning "nothing now, re-decide next tick"
    DoNext,
}

impl Action {
    /// Whether the action could make progress right now.
    ///
    /// Checks spatial proximity and the domain precondition; never looks
    /// at accumulated time, and a false result never resets it.
    pub fn can_perform(&self, being: &Being, world: &GridWorld, config: &SimulationConfig) -> bool {
        match self {
            Action::Move(_) => true,
            Action::Harvest(h) => {
                being.position.distance(&h.target) <= config.interact_distance
                    && world.resource(h.resource).map(|r| r.has_stock()).unwrap_or(false)
            }
            Action::Build(b) => {
                being.position.distance(&b.target) <= config.interact_distance
                    && world
                        .structure(b.structure)
                        .and_then(|s| s.next_needed())
                        .map(|kind| being.inventory.has(kind))
                        .unwrap_or(false)
            }
            Action::GiveItem(g) => {
                being.position.distance(&g.target) <= config.interact_distance
                    && being.inventory.has(g.item)
                    && world
                        .structure(g.structure)
                        .map(|s| s.is_complete() && s.storage().has_space(1))
                        .unwrap_or(false)
            }
            Action::TakeItem(t) => {
                being.position.distance(&t.target) <= config.interact_distance
                    && world
                        .structure(t.structure)
                        .map(|s| s.storage().count(t.item) > 0)
                        .unwrap_or(false)
            }
            Action::DoNothing | Action::DoNext => true,
        }
    }

    /// Attempt one time-slice of work.
    ///
    /// Completion side effects fire exactly once; performing an already
    /// completed action is a no-op.
    pub fn perform(&mut self, being: &mut Being, world: &mut GridWorld, dt: f32) {
        match self {
            Action::Move(m) => m.perform(being, world),
            Action::Harvest(h) => {
                if h.done {
                    return;
                }
                let taken = world.resource_mut(h.resource).and_then(|r| r.take_one());
                let Some(item) = taken else {
                    return;
                };
                being.inventory.add(item, 1);
                h.done = true;
                let exhausted = world
                    .resource(h.resource)
                    .map(|r| !r.has_stock())
                    .unwrap_or(false);
                if exhausted {
                    tracing::debug!(resource = ?h.resource, "resource exhausted");
                    world.remove_resource(h.resource);
                }
            }
            Action::Build(b) => {
                if b.timer.advance(dt) {
                    deliver_to_site(being, world, b.structure);
                }
            }
            Action::GiveItem(g) => {
                if g.timer.advance(dt) {
                    let Some(structure) = world.structure_mut(g.structure) else {
                        return;
                    };
                    // A full storable rejects the transfer; the item goes
                    // back to the being instead of vanishing.
                    if being.inventory.remove(g.item, 1) && !structure.storage_mut().store(g.item, 1) {
                        being.inventory.add(g.item, 1);
                    }
                }
            }
            Action::TakeItem(t) => {
                if t.timer.advance(dt) {
                    let Some(structure) = world.structure_mut(t.structure) else {
                        return;
                    };
                    if structure.storage_mut().withdraw(t.item, 1) {
                        being.inventory.add(t.item, 1);
                    }
                }
            }
            Action::DoNothing | Action::DoNext => {}
        }
    }

    pub fn is_completed(&self, being: &Being) -> bool {
        match self {
            Action::Move(m) => m.is_completed(being),
            Action::Harvest(h) => h.done,
            Action::Build(b) => b.timer.is_complete(),
            Action::GiveItem(g) => g.timer.is_complete(),
            Action::TakeItem(t) => t.timer.is_complete(),
            Action::DoNothing | Action::DoNext => true,
        }
    }
}

/// One delivery per completed work cycle: the first pending requirement
/// kind, one unit, if the worker still holds it and the site still wants it
fn deliver_to_site(being: &mut Being, world: &mut GridWorld, id: StructureId) {
    let Some(structure) = world.structure_mut(id) else {
        return;
    };
    let Some(kind) = structure.next_needed() else {
        return;
    };
    if !being.inventory.remove(kind, 1) {
        return;
    }
    structure.deliver(kind);
    if structure.is_complete() {
        tracing::info!(structure = ?id, kind = ?structure.kind(), "construction complete");
    }
}

/// Goal identity: same variant, same target. Progress state (path caches,
/// timers) is excluded on purpose.
impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Action::Move(a), Action::Move(b)) => a == b,
            (Action::Harvest(a), Action::Harvest(b)) => a.resource == b.resource,
            (Action::Build(a), Action::Build(b)) => a.structure == b.structure,
            (Action::GiveItem(a), Action::GiveItem(b)) => {
                a.structure == b.structure && a.item == b.item
            }
            (Action::TakeItem(a), Action::TakeItem(b)) => {
                a.structure == b.structure && a.item == b.item
            }
            (Action::DoNothing, Action::DoNothing) => true,
            (Action::DoNext, Action::DoNext) => true,
            _ => false,
        }
    }
}

/// Constructs actions with their shared collaborators wired in.
///
/// Built from the simulation context, which owns the pathfinder and the
/// obstacle bus; there is no way to construct a move action without them,
/// so "pathfinder not injected" is unrepresentable rather than a runtime
/// failure.
pub struct ActionFactory {
    pathfinder: Rc<dyn Pathfinder>,
    bus: Rc<ObstacleBus>,
    build_duration: f32,
    give_duration: f32,
    take_duration: f32,
}

impl ActionFactory {
    pub fn new(pathfinder: Rc<dyn Pathfinder>, bus: Rc<ObstacleBus>, config: &SimulationConfig) -> Self {
        Self {
            pathfinder,
            bus,
            build_duration: config.build_duration,
            give_duration: config.give_duration,
            take_duration: config.take_duration,
        }
    }

    pub fn move_to(&self, destination: Position) -> Action {
        Action::Move(MoveAction::new(
            destination,
            self.pathfinder.clone(),
            self.bus.subscribe(),
        ))
    }

    pub fn harvest(&self, resource: &Resource) -> Action {
        Action::Harvest(HarvestAction {
            resource: resource.id(),
            target: resource.position(),
            done: false,
        })
    }

    pub fn build(&self, structure: &Structure) -> Action {
        Action::Build(BuildAction {
            structure: structure.id(),
            target: structure.position(),
            timer: ActionTimer::new(self.build_duration),
        })
    }

    pub fn give_item(&self, structure: &Structure, item: ItemKind) -> Action {
        Action::GiveItem(GiveItemAction {
            structure: structure.id(),
            item,
            target: structure.position(),
            timer: ActionTimer::new(self.give_duration),
        })
    }

    pub fn take_item(&self, structure: &Structure, item: ItemKind) -> Action {
        Action::TakeItem(TakeItemAction {
            structure: structure.id(),
            item,
            target: structure.position(),
            timer: ActionTimer::new(self.take_duration),
        })
    }

    pub fn do_nothing(&self) -> Action {
        Action::DoNothing
    }

    pub fn do_next(&self) -> Action {
        Action::DoNext
    }
}
