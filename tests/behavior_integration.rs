//! Integration tests for the behavior layer
//!
//! These tests verify the action and role contracts end to end:
//! - accumulated-time actions complete independently of time slicing
//! - move actions replan exactly once when their path is obstructed
//! - stale builder targets degrade to doing nothing
//! - hunger drives the active role without touching the assignment

use std::cell::Cell;
use std::rc::Rc;

use gridstead::actions::Action;
use gridstead::being::Being;
use gridstead::core::config::SimulationConfig;
use gridstead::core::types::{Position, TileCoord};
use gridstead::pathfinding::{AStar, Pathfinder};
use gridstead::roles::Role;
use gridstead::simulation::SimContext;
use gridstead::world::grid::GridWorld;
use gridstead::world::objects::{ItemKind, ResourceKind, StructureKind};

/// Counts route computations so tests can observe replanning
#[derive(Default)]
struct CountingPathfinder {
    inner: AStar,
    calls: Cell<usize>,
}

impl Pathfinder for CountingPathfinder {
    fn path(&self, world: &GridWorld, from: Position, to: Position) -> Vec<Position> {
        self.calls.set(self.calls.get() + 1);
        self.inner.path(world, from, to)
    }
}

fn context() -> SimContext {
    SimContext::new(SimulationConfig::default()).unwrap()
}

fn counting_context() -> (SimContext, Rc<CountingPathfinder>) {
    let pathfinder = Rc::new(CountingPathfinder::default());
    let ctx = SimContext::with_pathfinder(SimulationConfig::default(), pathfinder.clone()).unwrap();
    (ctx, pathfinder)
}

// ============================================================================
// Obstacle replanning
// ============================================================================

#[test]
fn test_on_path_obstacle_triggers_exactly_one_replan() {
    let (ctx, pathfinder) = counting_context();
    let mut world = GridWorld::new(10, 10, 1, ctx.bus.clone());
    let mut being = Being::new(Position::new(0.0, 0.0), &ctx.config);

    let mut action = ctx.factory.move_to(Position::new(3.0, 0.0));
    action.perform(&mut being, &mut world, 0.1);
    assert_eq!(pathfinder.calls.get(), 1);

    // The straight-line path runs along y = 0; this waypoint is on it
    world.place_obstacle(TileCoord::new(2, 0)).unwrap();

    action.perform(&mut being, &mut world, 0.1);
    assert_eq!(pathfinder.calls.get(), 2);

    // No further recomputation while the new path stays clear
    action.perform(&mut being, &mut world, 0.1);
    action.perform(&mut being, &mut world, 0.1);
    assert_eq!(pathfinder.calls.get(), 2);
}

#[test]
fn test_off_path_obstacle_triggers_no_replan() {
    let (ctx, pathfinder) = counting_context();
    let mut world = GridWorld::new(10, 10, 1, ctx.bus.clone());
    let mut being = Being::new(Position::new(0.0, 0.0), &ctx.config);

    let mut action = ctx.factory.move_to(Position::new(3.0, 0.0));
    action.perform(&mut being, &mut world, 0.1);
    assert_eq!(pathfinder.calls.get(), 1);

    world.place_obstacle(TileCoord::new(7, 7)).unwrap();

    action.perform(&mut being, &mut world, 0.1);
    assert_eq!(pathfinder.calls.get(), 1);
}

#[test]
fn test_unreachable_destination_goes_stuck_and_counts_completed() {
    let ctx = context();
    let mut world = GridWorld::new(10, 10, 1, ctx.bus.clone());
    let goal = TileCoord::new(5, 5);
    for neighbour in goal.neighbours() {
        world.place_obstacle(neighbour).unwrap();
    }
    let mut being = Being::new(Position::new(0.0, 0.0), &ctx.config);

    let mut action = ctx.factory.move_to(goal.position());
    action.perform(&mut being, &mut world, 0.1);

    // Stuck is terminal and reads as completed, so the role re-decides
    assert!(action.is_completed(&being));
    assert_eq!(being.position, Position::new(0.0, 0.0));
}

#[test]
fn test_move_equality_ignores_path_cache() {
    let ctx = context();
    let mut world = GridWorld::new(10, 10, 1, ctx.bus.clone());
    let mut being = Being::new(Position::new(0.0, 0.0), &ctx.config);

    let mut advanced = ctx.factory.move_to(Position::new(4.0, 0.0));
    advanced.perform(&mut being, &mut world, 0.1);
    let fresh = ctx.factory.move_to(Position::new(4.0, 0.0));
    let other = ctx.factory.move_to(Position::new(5.0, 0.0));

    assert_eq!(advanced, fresh);
    assert_ne!(advanced, other);
}

// ============================================================================
// Accumulated-time actions
// ============================================================================

#[test]
fn test_build_completes_only_at_duration_boundary() {
    let ctx = context();
    let mut world = GridWorld::new(10, 10, 1, ctx.bus.clone());
    let site = world
        .place_structure(StructureKind::Storehouse, TileCoord::new(5, 5))
        .unwrap();

    let mut being = Being::new(Position::new(4.0, 5.0), &ctx.config);
    being.inventory.add(ItemKind::Wood, 1);

    let mut action = ctx.factory.build(world.structure(site).unwrap());
    let duration = ctx.config.build_duration;

    // Strictly below the duration: not complete, nothing delivered
    action.perform(&mut being, &mut world, duration - 0.5);
    assert!(!action.is_completed(&being));
    assert!(being.inventory.has(ItemKind::Wood));

    // Crossing the boundary completes and delivers exactly one unit
    action.perform(&mut being, &mut world, 0.5);
    assert!(action.is_completed(&being));
    assert!(!being.inventory.has(ItemKind::Wood));
}

#[test]
fn test_build_slicing_equivalence() {
    let ctx = context();
    let duration = ctx.config.build_duration;

    let run = |slices: &[f32]| -> (bool, u32) {
        let mut world = GridWorld::new(10, 10, 1, ctx.bus.clone());
        let site = world
            .place_structure(StructureKind::Storehouse, TileCoord::new(5, 5))
            .unwrap();
        let mut being = Being::new(Position::new(4.0, 5.0), &ctx.config);
        being.inventory.add(ItemKind::Wood, 1);
        let mut action = ctx.factory.build(world.structure(site).unwrap());
        for dt in slices {
            action.perform(&mut being, &mut world, *dt);
        }
        (action.is_completed(&being), being.inventory.count(ItemKind::Wood))
    };

    let whole = run(&[duration]);
    let halves = run(&[duration / 2.0, duration / 2.0]);
    let many: Vec<f32> = std::iter::repeat(duration / 8.0).take(8).collect();
    let fine = run(&many);

    assert_eq!(whole, (true, 0));
    assert_eq!(halves, whole);
    assert_eq!(fine, whole);
}

#[test]
fn test_failed_precondition_does_not_reset_accumulated_time() {
    let ctx = context();
    let mut world = GridWorld::new(10, 10, 1, ctx.bus.clone());
    let site = world
        .place_structure(StructureKind::Storehouse, TileCoord::new(5, 5))
        .unwrap();

    let mut being = Being::new(Position::new(4.0, 5.0), &ctx.config);
    being.inventory.add(ItemKind::Wood, 1);

    let mut action = ctx.factory.build(world.structure(site).unwrap());
    action.perform(&mut being, &mut world, ctx.config.build_duration * 0.75);

    // Walk out of range: the precondition fails but accumulation holds
    being.position = Position::new(0.0, 0.0);
    assert!(!action.can_perform(&being, &world, &ctx.config));

    being.position = Position::new(4.0, 5.0);
    action.perform(&mut being, &mut world, ctx.config.build_duration * 0.25);
    assert!(action.is_completed(&being));
}

#[test]
fn test_give_and_take_move_one_item() {
    let ctx = context();
    let mut world = GridWorld::new(10, 10, 1, ctx.bus.clone());
    let store = world
        .place_structure(StructureKind::Storehouse, TileCoord::new(5, 5))
        .unwrap();
    for _ in 0..6 {
        world.structure_mut(store).unwrap().deliver(ItemKind::Wood);
    }
    assert!(world.structure(store).unwrap().is_complete());

    let mut being = Being::new(Position::new(4.0, 5.0), &ctx.config);
    being.inventory.add(ItemKind::Fish, 2);

    let mut give = ctx.factory.give_item(world.structure(store).unwrap(), ItemKind::Fish);
    assert!(give.can_perform(&being, &world, &ctx.config));
    give.perform(&mut being, &mut world, ctx.config.give_duration);
    assert!(give.is_completed(&being));
    assert_eq!(being.inventory.count(ItemKind::Fish), 1);
    assert_eq!(world.structure(store).unwrap().storage().count(ItemKind::Fish), 1);

    let mut take = ctx.factory.take_item(world.structure(store).unwrap(), ItemKind::Fish);
    assert!(take.can_perform(&being, &world, &ctx.config));
    take.perform(&mut being, &mut world, ctx.config.take_duration);
    assert!(take.is_completed(&being));
    assert_eq!(being.inventory.count(ItemKind::Fish), 2);
    assert_eq!(world.structure(store).unwrap().storage().count(ItemKind::Fish), 0);
}

#[test]
fn test_give_item_to_full_storable_keeps_item() {
    let ctx = context();
    let mut world = GridWorld::new(10, 10, 1, ctx.bus.clone());
    let house = world
        .place_structure(StructureKind::House, TileCoord::new(5, 5))
        .unwrap();
    for _ in 0..4 {
        world.structure_mut(house).unwrap().deliver(ItemKind::Wood);
    }
    for _ in 0..2 {
        world.structure_mut(house).unwrap().deliver(ItemKind::Stone);
    }
    let capacity = StructureKind::House.storage_capacity();
    assert!(world
        .structure_mut(house)
        .unwrap()
        .storage_mut()
        .store(ItemKind::Fish, capacity));

    let mut being = Being::new(Position::new(4.0, 5.0), &ctx.config);
    being.inventory.add(ItemKind::Fish, 1);

    let mut give = ctx.factory.give_item(world.structure(house).unwrap(), ItemKind::Fish);
    assert!(!give.can_perform(&being, &world, &ctx.config));

    // Even a forced perform conserves the item: it stays with the being
    give.perform(&mut being, &mut world, ctx.config.give_duration);
    let stored = world.structure(house).unwrap().storage().count(ItemKind::Fish);
    assert_eq!(stored, capacity);
    assert_eq!(being.inventory.count(ItemKind::Fish), 1);
}

#[test]
fn test_take_from_empty_storable_cannot_perform() {
    let ctx = context();
    let mut world = GridWorld::new(10, 10, 1, ctx.bus.clone());
    let store = world
        .place_structure(StructureKind::Storehouse, TileCoord::new(5, 5))
        .unwrap();
    for _ in 0..6 {
        world.structure_mut(store).unwrap().deliver(ItemKind::Wood);
    }

    let being = Being::new(Position::new(4.0, 5.0), &ctx.config);
    let take = ctx.factory.take_item(world.structure(store).unwrap(), ItemKind::Fish);
    assert!(!take.can_perform(&being, &world, &ctx.config));
}

// ============================================================================
// Builder stale-target re-check
// ============================================================================

#[test]
fn test_builder_recheck_after_completion_yields_do_nothing() {
    let ctx = context();
    let mut world = GridWorld::new(10, 10, 1, ctx.bus.clone());
    let site = world
        .place_structure(StructureKind::Storehouse, TileCoord::new(6, 5))
        .unwrap();

    let mut being = Being::new(Position::new(5.0, 5.0), &ctx.config);
    being.inventory.add(ItemKind::Wood, 6);

    let first = Role::Builder.next_action(&being, &world, &ctx.factory, &ctx.config);
    assert!(matches!(first, Action::Build(_)));

    // The site completes between two decisions
    for _ in 0..6 {
        world.structure_mut(site).unwrap().deliver(ItemKind::Wood);
    }

    let second = Role::Builder.next_action(&being, &world, &ctx.factory, &ctx.config);
    assert_eq!(second, Action::DoNothing);
}

#[test]
fn test_builder_survives_vanished_structure() {
    let ctx = context();
    let mut world = GridWorld::new(10, 10, 1, ctx.bus.clone());
    let site = world
        .place_structure(StructureKind::House, TileCoord::new(6, 5))
        .unwrap();

    let mut being = Being::new(Position::new(5.0, 5.0), &ctx.config);
    being.inventory.add(ItemKind::Wood, 1);

    let mut action = ctx.factory.build(world.structure(site).unwrap());
    action.perform(&mut being, &mut world, ctx.config.build_duration * 0.5);

    world.remove_structure(site);

    // Stale target: the precondition fails and performing is harmless
    assert!(!action.can_perform(&being, &world, &ctx.config));
    action.perform(&mut being, &mut world, ctx.config.build_duration);
    assert!(being.inventory.has(ItemKind::Wood));
}

// ============================================================================
// Hunger-driven role switching
// ============================================================================

#[test]
fn test_hunger_switches_role_and_back() {
    let ctx = context();
    let mut world = GridWorld::new(10, 10, 1, ctx.bus.clone());
    let mut being = Being::new(Position::new(5.0, 5.0), &ctx.config);
    being.role = Role::Lumberjack;
    being.assigned_role = Role::Lumberjack;
    being.hunger = ctx.config.hungry_threshold();

    // Hungry, nothing edible carried: forage takes over
    being.update(0.1, &mut world, &ctx.factory, &ctx.config);
    assert_eq!(being.role, Role::Forage);
    assert_eq!(being.assigned_role, Role::Lumberjack);

    // Food shows up and restores hunger above half: assignment resumes
    being.inventory.add(ItemKind::Berries, 1);
    being.update(0.1, &mut world, &ctx.factory, &ctx.config);
    assert!(being.hunger > ctx.config.hungry_threshold());
    assert_eq!(being.role, Role::Lumberjack);
}

#[test]
fn test_harvest_workflow_collects_items() {
    // Slow hunger so the being works undisturbed
    let config = SimulationConfig {
        hunger_decay_rate: 0.01,
        ..Default::default()
    };
    let ctx = SimContext::new(config).unwrap();
    let mut world = GridWorld::new(12, 12, 4, ctx.bus.clone());
    world
        .place_resource(ResourceKind::Tree, TileCoord::new(8, 8), 3)
        .unwrap();

    let mut being = Being::new(Position::new(1.0, 1.0), &ctx.config);
    being.role = Role::Lumberjack;
    being.assigned_role = Role::Lumberjack;

    for _ in 0..600 {
        being.update(0.1, &mut world, &ctx.factory, &ctx.config);
        if being.inventory.has(ItemKind::Wood) {
            break;
        }
    }

    assert!(being.inventory.has(ItemKind::Wood));
}
