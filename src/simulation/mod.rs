//! Simulation assembly and the per-tick driver

pub mod snapshot;
pub mod tick;

use std::rc::Rc;

use crate::actions::ActionFactory;
use crate::colony::Colony;
use crate::core::config::SimulationConfig;
use crate::core::error::{GridsteadError, Result};
use crate::core::types::{BeingId, Tick};
use crate::pathfinding::{AStar, Pathfinder};
use crate::world::grid::GridWorld;
use crate::world::notify::ObstacleBus;

pub use snapshot::RenderSnapshot;
pub use tick::{run_tick, TickReport};

/// Everything the behavior layer shares: validated config, the obstacle
/// bus, the pathfinder, and the action factory wired to both.
///
/// Constructed once at startup and threaded through explicitly; there is
/// no global configuration step that could be missed or reordered.
pub struct SimContext {
    pub config: SimulationConfig,
    pub bus: Rc<ObstacleBus>,
    pub pathfinder: Rc<dyn Pathfinder>,
    pub factory: ActionFactory,
}

impl SimContext {
    /// Build a context with the standard A* pathfinder.
    ///
    /// An invalid config is a configuration error surfaced here, at
    /// assembly time, never mid-simulation.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        Self::with_pathfinder(config, Rc::new(AStar))
    }

    /// Build a context around a caller-supplied pathfinder (tests use
    /// instrumented implementations to observe replanning).
    pub fn with_pathfinder(config: SimulationConfig, pathfinder: Rc<dyn Pathfinder>) -> Result<Self> {
        config.validate().map_err(GridsteadError::Config)?;
        let bus = Rc::new(ObstacleBus::new());
        let factory = ActionFactory::new(pathfinder.clone(), bus.clone(), &config);
        Ok(Self {
            config,
            bus,
            pathfinder,
            factory,
        })
    }
}

/// A complete running simulation: context, world, colony, clock
pub struct Simulation {
    pub ctx: SimContext,
    pub world: GridWorld,
    pub colony: Colony,
    pub current_tick: Tick,
}

impl Simulation {
    pub fn new(config: SimulationConfig, width: i32, height: i32, seed: u64) -> Result<Self> {
        let ctx = SimContext::new(config)?;
        let world = GridWorld::new(width, height, seed, ctx.bus.clone());
        Ok(Self {
            ctx,
            world,
            colony: Colony::new(),
            current_tick: 0,
        })
    }

    pub fn spawn_being(&mut self) -> Result<BeingId> {
        self.colony.spawn_being(&self.world, &self.ctx.config)
    }

    /// Advance the whole world by one tick of `dt` seconds
    pub fn run_tick(&mut self, dt: f32) -> TickReport {
        self.current_tick += 1;
        tick::run_tick(&mut self.colony, &mut self.world, &self.ctx, dt)
    }

    /// Read-only state for the render sink
    pub fn snapshot(&self) -> RenderSnapshot {
        snapshot::capture(self.current_tick, &self.colony, &self.world)
    }
}
