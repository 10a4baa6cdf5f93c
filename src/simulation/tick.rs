//! Tick system - orchestrates simulation updates
//!
//! One tick advances every living being in registry order: vitals, role
//! decision, action execution, movement. All updates within a tick see
//! the previous tick's fully settled state of other beings; deaths
//! detected during the loop are applied to the registry only after the
//! loop finishes, so the active set is never mutated mid-iteration.

use crate::being::DeathNotice;
use crate::colony::Colony;
use crate::simulation::SimContext;
use crate::world::grid::GridWorld;

/// What happened during one tick, for callers and the UI log
#[derive(Debug, Default)]
pub struct TickReport {
    pub deaths: Vec<DeathNotice>,
}

/// Advance the colony by one tick of `dt` seconds
pub fn run_tick(colony: &mut Colony, world: &mut GridWorld, ctx: &SimContext, dt: f32) -> TickReport {
    let mut report = TickReport::default();

    for being in colony.beings_mut() {
        if let Some(notice) = being.update(dt, world, &ctx.factory, &ctx.config) {
            report.deaths.push(notice);
        }
    }

    // Deferred removal: dead beings drop out of the active set now, and
    // are not visited again by any later tick.
    colony.remove_dead(&report.deaths);

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::simulation::Simulation;

    #[test]
    fn test_dead_being_removed_at_end_of_tick() {
        let mut sim = Simulation::new(SimulationConfig::default(), 10, 10, 2).unwrap();
        let id = sim.spawn_being().unwrap();
        {
            let being = sim.colony.being_mut(id).unwrap();
            being.hunger = 0.0;
            being.health = 0.5;
        }

        let report = sim.run_tick(1.0);
        assert_eq!(report.deaths.len(), 1);
        assert_eq!(report.deaths[0].being, id);
        assert!(sim.colony.being(id).is_none());
    }

    #[test]
    fn test_survivors_unaffected_by_removal() {
        let mut sim = Simulation::new(SimulationConfig::default(), 10, 10, 2).unwrap();
        let doomed = sim.spawn_being().unwrap();
        let healthy = sim.spawn_being().unwrap();
        {
            let being = sim.colony.being_mut(doomed).unwrap();
            being.hunger = 0.0;
            being.health = 0.5;
        }

        sim.run_tick(1.0);
        assert_eq!(sim.colony.population(), 1);
        assert!(sim.colony.being(healthy).is_some());
    }
}
