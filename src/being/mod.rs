//! The being runtime: vitals, role switching, action execution, movement

pub mod inventory;

use serde::Serialize;

use crate::actions::{Action, ActionFactory};
use crate::core::config::SimulationConfig;
use crate::core::types::{BeingId, Position};
use crate::roles::Role;
use crate::world::grid::GridWorld;

pub use inventory::Inventory;

/// Emitted when a being's health reaches exactly zero; the colony
/// deregisters the being at end of tick, never mid-iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeathNotice {
    pub being: BeingId,
}

/// An autonomous simulated entity.
///
/// `role` is the active behavior; `assigned_role` is the home role the
/// allocator gave it. The two diverge while hunger forces foraging:
/// allocation accounting follows the assignment, behavior follows the
/// active role. Collapsing them would change allocation counts during
/// foraging, so the split is deliberate.
#[derive(Debug)]
pub struct Being {
    id: BeingId,
    pub position: Position,
    /// Current physical movement target; never "null", a parked being
    /// targets its own position
    pub destination: Position,
    pub health: f32,
    pub hunger: f32,
    pub role: Role,
    pub assigned_role: Role,
    pub inventory: Inventory,
    current_action: Option<Action>,
}

impl Being {
    pub fn new(position: Position, config: &SimulationConfig) -> Self {
        Self {
            id: BeingId::new(),
            position,
            destination: position,
            health: config.max_health,
            hunger: config.max_hunger,
            role: Role::Idle,
            assigned_role: Role::Idle,
            inventory: Inventory::new(),
            current_action: None,
        }
    }

    pub fn id(&self) -> BeingId {
        self.id
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn is_hungry(&self, config: &SimulationConfig) -> bool {
        self.hunger <= config.hungry_threshold()
    }

    pub fn current_action(&self) -> Option<&Action> {
        self.current_action.as_ref()
    }

    /// Drop whatever the being was doing; accumulated action progress is
    /// lost, which is the only way progress ever resets.
    pub fn discard_action(&mut self) {
        self.current_action = None;
    }

    /// Advance this being by one tick.
    ///
    /// Step order matters and is fixed: hunger decay, eating / role
    /// switching, health update (possibly emitting a death notice).
    /// Only living beings go on to action selection, action execution,
    /// and physical movement.
    pub fn update(
        &mut self,
        dt: f32,
        world: &mut GridWorld,
        factory: &ActionFactory,
        config: &SimulationConfig,
    ) -> Option<DeathNotice> {
        if !self.is_alive() {
            return None;
        }

        // 1. Hunger decays, floored at zero.
        self.hunger = (self.hunger - config.hunger_decay_rate * dt).max(0.0);

        // 2. Hungry beings eat from inventory when they can; whether that
        // satisfied them decides which role runs this tick.
        if self.is_hungry(config) {
            if let Some(item) = self.inventory.any_edible() {
                self.inventory.remove(item, 1);
                self.hunger = (self.hunger + config.eat_restore).min(config.max_hunger);
            }
            if self.is_hungry(config) {
                if self.role != Role::Forage {
                    tracing::debug!(being = ?self.id, "hungry, switching to forage");
                    self.role = Role::Forage;
                    self.discard_action();
                }
            } else {
                self.return_to_assigned_role();
            }
        } else {
            self.return_to_assigned_role();
        }

        // 3. Health: starvation drains it, food regenerates it. Reaching
        // exactly zero emits the death notice and ends the tick here.
        if self.hunger <= 0.0 {
            self.health = (self.health - config.starvation_rate * dt).max(0.0);
            if self.health <= 0.0 {
                tracing::info!(being = ?self.id, "being starved to death");
                return Some(DeathNotice { being: self.id });
            }
        } else {
            self.health = (self.health + config.health_regen_rate * dt).min(config.max_health);
        }

        // 4. Decide, act, move.
        let next = self.role.next_action(self, world, factory, config);
        let mut action = match self.current_action.take() {
            Some(current) if current == next => current,
            _ => next,
        };
        if action.can_perform(self, world, config) {
            action.perform(self, world, dt);
        }
        if !action.is_completed(self) {
            self.current_action = Some(action);
        }

        self.step_toward_destination(dt, config);
        None
    }

    fn return_to_assigned_role(&mut self) {
        if self.role == Role::Forage {
            tracing::debug!(being = ?self.id, role = ?self.assigned_role, "satisfied, resuming assigned role");
            self.role = self.assigned_role;
            self.discard_action();
        }
    }

    /// Move at fixed speed toward the movement destination, snapping
    /// exactly onto it instead of oscillating past. The snap keeps exact
    /// position equality meaningful for waypoint bookkeeping.
    fn step_toward_destination(&mut self, dt: f32, config: &SimulationConfig) {
        let remaining = self.destination - self.position;
        let distance = remaining.length();
        let step = config.move_speed * dt;
        if distance <= step {
            self.position = self.destination;
        } else {
            self.position = self.position + remaining * (step / distance);
        }
    }
}
