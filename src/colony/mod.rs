//! The colony: its beings and role allocation
//!
//! Allocation accounting runs on the assigned role. A hungry being that
//! switched itself to foraging still counts under the role the allocator
//! gave it, so UI counts stay stable while it feeds.

pub mod stockpile;

use crate::being::{Being, DeathNotice};
use crate::core::config::SimulationConfig;
use crate::core::error::{GridsteadError, Result};
use crate::core::types::BeingId;
use crate::roles::Role;
use crate::world::grid::GridWorld;

pub use stockpile::Stockpile;

/// Registry of the colony's living beings
#[derive(Debug, Default)]
pub struct Colony {
    beings: Vec<Being>,
}

impl Colony {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a being at a random vacant spot with the Idle role
    pub fn spawn_being(&mut self, world: &GridWorld, config: &SimulationConfig) -> Result<BeingId> {
        let position = world
            .random_vacant_spot()
            .ok_or(GridsteadError::WorldFull)?;
        let being = Being::new(position, config);
        let id = being.id();
        tracing::info!(being = ?id, ?position, "being spawned");
        self.beings.push(being);
        Ok(id)
    }

    pub fn beings(&self) -> &[Being] {
        &self.beings
    }

    pub fn beings_mut(&mut self) -> &mut [Being] {
        &mut self.beings
    }

    pub fn being(&self, id: BeingId) -> Option<&Being> {
        self.beings.iter().find(|b| b.id() == id)
    }

    pub fn being_mut(&mut self, id: BeingId) -> Option<&mut Being> {
        self.beings.iter_mut().find(|b| b.id() == id)
    }

    pub fn population(&self) -> usize {
        self.beings.len()
    }

    /// Exact live count of beings allocated to `role`
    pub fn count_beings_with_role(&self, role: Role) -> usize {
        self.beings.iter().filter(|b| b.assigned_role == role).count()
    }

    fn idle_count(&self) -> usize {
        self.count_beings_with_role(Role::Idle)
    }

    /// Pure capacity check: could `amount` more beings take on a role?
    pub fn can_increase_allocation(&self, amount: usize) -> bool {
        self.idle_count() >= amount
    }

    /// Pure capacity check: do `amount` beings currently hold `role`?
    pub fn can_decrease_allocation(&self, role: Role, amount: usize) -> bool {
        self.count_beings_with_role(role) >= amount
    }

    /// Assign `role` to one idle being. Fails (false) when no being is
    /// idle or the role is not allocator-assignable.
    pub fn try_increase_allocation(&mut self, role: Role) -> bool {
        if !role.is_allocatable() {
            return false;
        }
        let Some(being) = self.beings.iter_mut().find(|b| b.assigned_role == Role::Idle) else {
            return false;
        };
        tracing::debug!(being = ?being.id(), ?role, "role assigned");
        being.assigned_role = role;
        // A forager keeps foraging; it resumes the new assignment once fed.
        if being.role != Role::Forage {
            being.role = role;
            being.discard_action();
        }
        true
    }

    /// Return one holder of `role` to Idle. Fails (false) when nobody
    /// holds the role.
    pub fn try_decrease_allocation(&mut self, role: Role) -> bool {
        if !role.is_allocatable() {
            return false;
        }
        let Some(being) = self.beings.iter_mut().find(|b| b.assigned_role == role) else {
            return false;
        };
        tracing::debug!(being = ?being.id(), ?role, "role released");
        being.assigned_role = Role::Idle;
        if being.role != Role::Forage {
            being.role = Role::Idle;
            being.discard_action();
        }
        true
    }

    /// All-or-nothing batch assignment: either `amount` idle beings take
    /// the role, or none do.
    pub fn try_increase_allocation_by(&mut self, role: Role, amount: usize) -> bool {
        if !self.can_increase_allocation(amount) {
            return false;
        }
        for _ in 0..amount {
            if !self.try_increase_allocation(role) {
                return false; // unreachable after the capacity check
            }
        }
        true
    }

    /// All-or-nothing batch release: either `amount` holders return to
    /// Idle, or none do.
    pub fn try_decrease_allocation_by(&mut self, role: Role, amount: usize) -> bool {
        if !self.can_decrease_allocation(role, amount) {
            return false;
        }
        for _ in 0..amount {
            if !self.try_decrease_allocation(role) {
                return false;
            }
        }
        true
    }

    /// Remove beings reported dead this tick. Called once at end of tick
    /// so the update loop never mutates the set it is iterating.
    pub fn remove_dead(&mut self, notices: &[DeathNotice]) {
        if notices.is_empty() {
            return;
        }
        self.beings
            .retain(|b| !notices.iter().any(|n| n.being == b.id()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::notify::ObstacleBus;
    use std::rc::Rc;

    fn colony_with(n: usize) -> Colony {
        let config = SimulationConfig::default();
        let world = GridWorld::new(20, 20, 5, Rc::new(ObstacleBus::new()));
        let mut colony = Colony::new();
        for _ in 0..n {
            colony.spawn_being(&world, &config).unwrap();
        }
        colony
    }

    #[test]
    fn test_spawned_beings_start_idle() {
        let colony = colony_with(3);
        assert_eq!(colony.count_beings_with_role(Role::Idle), 3);
    }

    #[test]
    fn test_increase_allocation_consumes_idle() {
        let mut colony = colony_with(2);
        assert!(colony.try_increase_allocation(Role::Lumberjack));
        assert!(colony.try_increase_allocation(Role::Lumberjack));
        assert!(!colony.try_increase_allocation(Role::Lumberjack));
        assert_eq!(colony.count_beings_with_role(Role::Lumberjack), 2);
        assert_eq!(colony.count_beings_with_role(Role::Idle), 0);
    }

    #[test]
    fn test_decrease_allocation_requires_holder() {
        let mut colony = colony_with(1);
        assert!(!colony.try_decrease_allocation(Role::Miner));
        assert!(colony.try_increase_allocation(Role::Miner));
        assert!(colony.try_decrease_allocation(Role::Miner));
        assert_eq!(colony.count_beings_with_role(Role::Miner), 0);
        assert_eq!(colony.count_beings_with_role(Role::Idle), 1);
    }

    #[test]
    fn test_unallocatable_roles_rejected() {
        let mut colony = colony_with(1);
        assert!(!colony.try_increase_allocation(Role::Forage));
        assert!(!colony.try_increase_allocation(Role::Idle));
    }

    #[test]
    fn test_batch_allocation_is_all_or_nothing() {
        let mut colony = colony_with(2);
        assert!(!colony.try_increase_allocation_by(Role::Builder, 3));
        // Nothing was assigned
        assert_eq!(colony.count_beings_with_role(Role::Builder), 0);
        assert_eq!(colony.count_beings_with_role(Role::Idle), 2);

        assert!(colony.try_increase_allocation_by(Role::Builder, 2));
        assert_eq!(colony.count_beings_with_role(Role::Builder), 2);

        assert!(!colony.try_decrease_allocation_by(Role::Builder, 3));
        assert_eq!(colony.count_beings_with_role(Role::Builder), 2);
        assert!(colony.try_decrease_allocation_by(Role::Builder, 2));
        assert_eq!(colony.count_beings_with_role(Role::Idle), 2);
    }

    #[test]
    fn test_role_counts_sum_to_population() {
        let mut colony = colony_with(5);
        colony.try_increase_allocation(Role::Lumberjack);
        colony.try_increase_allocation(Role::Builder);
        colony.try_increase_allocation(Role::Builder);

        let mut total = colony.count_beings_with_role(Role::Idle);
        for role in Role::ALLOCATABLE {
            total += colony.count_beings_with_role(role);
        }
        assert_eq!(total, colony.population());
    }

    #[test]
    fn test_remove_dead_excludes_from_registry() {
        let mut colony = colony_with(2);
        let victim = colony.beings()[0].id();
        colony.remove_dead(&[DeathNotice { being: victim }]);
        assert_eq!(colony.population(), 1);
        assert!(colony.being(victim).is_none());
    }
}
